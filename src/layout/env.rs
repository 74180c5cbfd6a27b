//! The style/scale context threaded through layout.
//!
//! An [`Env`] carries the current [`Style`](super::Style), the font size and
//! a read-only view of the font registry. It is a small copyable value:
//! scoped style transitions hand a *copy* with the new style to a nested
//! layout call and the copy dies with that call, so no style state ever
//! leaks between siblings and independent layouts can run in parallel
//! against one registry.

use super::Style;
use crate::dimensions::units::{Em, FontSize, Px};
use crate::dimensions::Unit;
use crate::error::{FontError, FontResult};
use crate::font::{Char, Constants, FontId, FontRegistry, FontStyle, MathFont};

/// The per-call layout context: current style, font size, fonts.
pub struct Env<'f, F> {
    style: Style,
    font_size: Unit<FontSize>,
    fonts: &'f FontRegistry<F>,
    math_font: &'f F,
    math_font_id: FontId,
    constants: &'f Constants,
}

impl<'f, F> Clone for Env<'f, F> {
    fn clone(&self) -> Self { *self }
}
impl<'f, F> Copy for Env<'f, F> {}

impl<'f, F: MathFont> Env<'f, F> {
    /// Creates a context over the given registry. Refused when no math font
    /// has been selected yet: that configuration mistake surfaces here, not
    /// in the middle of a layout pass.
    pub fn new(fonts: &'f FontRegistry<F>, font_size: f64, style: Style) -> FontResult<Self> {
        let (math_font, math_font_id) = fonts.math_font().ok_or(FontError::NoMathFontSelected)?;
        let constants = fonts.math_constants().ok_or(FontError::NoMathFontSelected)?;
        Ok(Env {
            style,
            font_size: Unit::new(font_size),
            fonts,
            math_font,
            math_font_id,
            constants,
        })
    }

    /// The current style.
    pub fn style(&self) -> Style {
        self.style
    }

    /// The font size, in surface units per em.
    pub fn font_size(&self) -> Unit<FontSize> {
        self.font_size
    }

    /// The registry this context reads from.
    pub fn fonts(&self) -> &'f FontRegistry<F> {
        self.fonts
    }

    /// The constants table of the active math font.
    pub fn constants(&self) -> &'f Constants {
        self.constants
    }

    /// The point-size multiplier of the current style, applied uniformly to
    /// every constant and metric consumed during layout.
    pub fn scale(&self) -> f64 {
        match self.style {
            Style::Display |
            Style::DisplayCramped |
            Style::Text |
            Style::TextCramped => 1.0,

            Style::Script |
            Style::ScriptCramped => self.constants.script_percent_scale_down,

            Style::ScriptScript |
            Style::ScriptScriptCramped => self.constants.script_script_percent_scale_down,
        }
    }

    /// Whether the current style is cramped.
    pub fn is_cramped(&self) -> bool {
        self.style.is_cramped()
    }

    /// Runs `f` with a copy of this context carrying the requested style.
    /// The copy is dropped when `f` returns; nothing of it escapes or
    /// aliases the caller's context.
    pub fn with_style<T>(&self, style: Style, f: impl FnOnce(&Env<'f, F>) -> T) -> T {
        let env = Env { style, ..*self };
        f(&env)
    }

    /// Resolves a character under this context. Total: degradations
    /// (unmapped codepoints, missing main font) fall back rather than fail.
    pub fn char(&self, code: char, style: FontStyle, is_math_mode: bool) -> Char<'f, F> {
        self.fonts.resolve_with(
            (self.math_font, self.math_font_id),
            code,
            style,
            is_math_mode,
            self.scale(),
        )
    }

    /// Converts a surface measurement back into design units of the current
    /// style, for querying kern tables.
    pub fn to_design(&self, length: Unit<Px>) -> Unit<Em> {
        (length * self.font_size.recip()).scale(self.scale().recip())
    }
}

/// Conversion of design values into surface units under a context.
pub trait Scaled {
    /// The value in surface units, with the context's style scale applied.
    fn scaled<F: MathFont>(self, env: &Env<F>) -> Unit<Px>;
}

impl Scaled for Unit<Em> {
    fn scaled<F: MathFont>(self, env: &Env<F>) -> Unit<Px> {
        (self * env.font_size()).scale(env.scale())
    }
}

impl Scaled for Unit<Px> {
    fn scaled<F: MathFont>(self, env: &Env<F>) -> Unit<Px> {
        self.scale(env.scale())
    }
}
