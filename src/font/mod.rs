//! Fonts: the glyph-metrics boundary, the font registry, and glyph
//! resolution.
//!
//! Font files are decoded outside this crate: anything able to answer the
//! [`MathFont`] queries (glyph lookup, normalized metrics, corner kern
//! records, the math constants table) can back the layout engine. The
//! [`FontRegistry`] collects such fonts under user-chosen names with a
//! single-writer-then-many-readers lifecycle: register families and math
//! fonts, select the active ones, then hand the registry by reference to
//! layout contexts which only ever read it.

/// Per-glyph corner kerning tables and their stepwise lookup.
#[deny(missing_docs)]
pub mod kern;
/// Font style flags and styled-codepoint mapping.
#[deny(missing_docs)]
pub mod style;

pub use kern::{Corner, MathKern, MathKernRecord};
pub use style::{FontStyle, MathStyle};

use crate::dimensions::units::Em;
use crate::dimensions::Unit;
use crate::error::{FontError, FontResult};

/// The id of a glyph within a font (represented as u16).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GlyphId(u16);

impl From<u16> for GlyphId {
    fn from(x: u16) -> Self { Self(x) }
}

impl From<GlyphId> for u16 {
    fn from(x: GlyphId) -> u16 { x.0 }
}

impl GlyphId {
    /// The undefined glyph, used when a codepoint has no glyph at all.
    pub const NOTDEF: GlyphId = GlyphId(0);
}

/// The id of a font within a [`FontRegistry`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FontId(u16);

impl From<u16> for FontId {
    fn from(x: u16) -> Self { Self(x) }
}

impl From<FontId> for u16 {
    fn from(x: FontId) -> u16 { x.0 }
}

/// Measurements of a single glyph, normalized to em.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphMetrics {
    /// Horizontal advance
    #[serde(default)]
    pub advance: Unit<Em>,
    /// Extent above the baseline
    #[serde(default)]
    pub height: Unit<Em>,
    /// Extent below the baseline
    #[serde(default)]
    pub depth: Unit<Em>,
    /// Italic correction: slanted glyphs lean out of their advance towards
    /// the top; this is how much wider the glyph must be treated when
    /// something not equally slanted follows it.
    #[serde(default)]
    pub italics: Unit<Em>,
    /// Horizontal position at which to attach accents, zero if the font
    /// provides none.
    #[serde(default)]
    pub attachment: Unit<Em>,
}

/// The named design values layout reads from the active math font,
/// normalized to em. Values are consumed multiplied by the current context's
/// scale, so they hold for every style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constants {
    pub subscript_shift_down: Unit<Em>,
    pub subscript_top_max: Unit<Em>,
    pub subscript_baseline_drop_min: Unit<Em>,

    pub superscript_shift_up: Unit<Em>,
    pub superscript_shift_up_cramped: Unit<Em>,
    pub superscript_bottom_min: Unit<Em>,
    pub superscript_baseline_drop_max: Unit<Em>,
    pub superscript_bottom_max_with_subscript: Unit<Em>,
    pub sub_superscript_gap_min: Unit<Em>,
    pub space_after_script: Unit<Em>,

    pub upper_limit_gap_min: Unit<Em>,
    pub upper_limit_baseline_rise_min: Unit<Em>,
    pub lower_limit_gap_min: Unit<Em>,
    pub lower_limit_baseline_drop_min: Unit<Em>,

    pub axis_height: Unit<Em>,
    pub accent_base_height: Unit<Em>,

    pub script_percent_scale_down: f64,
    pub script_script_percent_scale_down: f64,
}

/// Everything layout needs from a decoded font. Implementations are pure
/// lookups; they perform no layout logic.
pub trait MathFont {
    /// Glyph id for a codepoint, `None` if the font has no glyph for it.
    fn glyph_index(&self, codepoint: char) -> Option<GlyphId>;
    /// Measurements of the glyph, normalized to em.
    fn glyph_metrics(&self, gid: GlyphId) -> GlyphMetrics;
    /// The four-corner kern record of the glyph, if the font has one.
    fn kern_record(&self, gid: GlyphId) -> Option<&MathKernRecord>;
    /// The math constants table of the font.
    fn constants(&self) -> Constants;
}

/// A resolved character: the requested codepoint, the styled codepoint
/// actually drawn, the font and glyph that draw it and the point-size
/// multiplier of the style it was resolved under.
pub struct Char<'f, F> {
    /// Codepoint as requested
    pub code: char,
    /// Codepoint after styled-alphabet mapping
    pub mapped_code: char,
    /// Font the glyph comes from
    pub font: &'f F,
    /// Registry id of that font
    pub font_id: FontId,
    /// Glyph within the font
    pub gid: GlyphId,
    /// Point-size multiplier of the resolving style
    pub scale: f64,
}

impl<'f, F> Clone for Char<'f, F> {
    fn clone(&self) -> Self { *self }
}
impl<'f, F> Copy for Char<'f, F> {}

impl<'f, F: MathFont> Char<'f, F> {
    /// Measurements of the resolved glyph, normalized to em.
    pub fn metrics(&self) -> GlyphMetrics {
        self.font.glyph_metrics(self.gid)
    }

    /// Italic correction of the resolved glyph.
    pub fn italics(&self) -> Unit<Em> {
        self.font.glyph_metrics(self.gid).italics
    }

    /// Corner kern record of the resolved glyph, if any.
    pub fn kern_record(&self) -> Option<&'f MathKernRecord> {
        self.font.kern_record(self.gid)
    }
}

impl<'f, F> std::fmt::Debug for Char<'f, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Char {{ code: {:?}, mapped: {:?}, font: {:?}, glyph: {:?}, scale: {} }}",
            self.code, self.mapped_code, self.font_id, self.gid, self.scale
        )
    }
}

/// A collection of fonts covering one typeface, keyed by style.
/// Registration order is kept: when no registered style matches a request
/// exactly, the *first* registered style with the largest flag overlap wins.
#[derive(Debug, Default)]
pub struct FontFamily {
    styles: Vec<(FontStyle, FontId)>,
}

impl FontFamily {
    fn add(&mut self, style: FontStyle, id: FontId) {
        self.styles.push((style, id));
    }

    /// Font registered under exactly the given style.
    pub fn get(&self, style: FontStyle) -> Option<FontId> {
        self.styles.iter().find(|&&(s, _)| s == style).map(|&(_, id)| id)
    }

    /// Font whose registered style shares the most flags with the request;
    /// ties resolve to whichever style was registered first.
    pub fn closest(&self, style: FontStyle) -> Option<FontId> {
        if let Some(exact) = self.get(style) {
            return Some(exact);
        }
        let mut best: Option<(u32, FontId)> = None;
        for &(candidate, id) in &self.styles {
            let overlap = candidate.overlap(style);
            if best.map_or(true, |(b, _)| overlap > b) {
                best = Some((overlap, id));
            }
        }
        best.map(|(_, id)| id)
    }
}

/// Owner of every registered font, with the main-family and math-font
/// selection state. Populate it once, then share it immutably: all layout
/// queries are reads, so distinct formulas may be laid out in parallel
/// against the same registry as long as nobody keeps registering fonts.
pub struct FontRegistry<F> {
    fonts: Vec<F>,
    main_fonts: Vec<(String, FontFamily)>,
    math_fonts: Vec<(String, FontId)>,
    main_font: Option<usize>,
    math_font: Option<(FontId, Constants)>,
    math_style: MathStyle,
}

impl<F> Default for FontRegistry<F> {
    fn default() -> Self {
        Self {
            fonts: Vec::new(),
            main_fonts: Vec::new(),
            math_fonts: Vec::new(),
            main_font: None,
            math_font: None,
            math_style: MathStyle::default(),
        }
    }
}

impl<F: MathFont> FontRegistry<F> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn push_font(&mut self, font: F) -> FontId {
        let id = FontId(self.fonts.len() as u16);
        self.fonts.push(font);
        id
    }

    /// Registers a main font collection under `version_name`, one font per
    /// style name (`"rm"`, `"bfit"`, ...). Unknown style names degrade to
    /// the none style.
    pub fn add_main_font(&mut self, version_name: &str, fonts: Vec<(&str, F)>) {
        let mut family = FontFamily::default();
        for (style_name, font) in fonts {
            let style = FontStyle::from_name(style_name);
            let id = self.push_font(font);
            family.add(style, id);
        }
        debug!("registered main font collection '{}'", version_name);
        self.main_fonts.push((version_name.to_owned(), family));
    }

    /// Registers a math font under the given name.
    pub fn add_math_font(&mut self, name: &str, font: F) {
        let id = self.push_font(font);
        debug!("registered math font '{}'", name);
        self.math_fonts.push((name.to_owned(), id));
    }

    /// Whether any math font has been registered.
    pub fn has_math_font(&self) -> bool {
        !self.math_fonts.is_empty()
    }

    /// Selects the active math font by name.
    pub fn select_math_font(&mut self, name: &str) -> FontResult<()> {
        let &(_, id) = self
            .math_fonts
            .iter()
            .find(|(n, _)| n == name)
            .ok_or_else(|| FontError::UnknownFontName(name.to_owned()))?;
        let constants = self.fonts[u16::from(id) as usize].constants();
        self.math_font = Some((id, constants));
        debug!("selected math font '{}'", name);
        Ok(())
    }

    /// Selects the active main font collection by name.
    pub fn select_main_font(&mut self, name: &str) -> FontResult<()> {
        let index = self
            .main_fonts
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| FontError::UnknownFontName(name.to_owned()))?;
        self.main_font = Some(index);
        debug!("selected main font collection '{}'", name);
        Ok(())
    }

    /// Sets the convention used for default letter styles in math mode.
    pub fn set_math_style(&mut self, style: MathStyle) {
        self.math_style = style;
    }

    /// The font registered under the given id.
    pub fn font(&self, id: FontId) -> Option<&F> {
        self.fonts.get(u16::from(id) as usize)
    }

    /// Constants table of the selected math font, `None` before selection.
    pub fn math_constants(&self) -> Option<&Constants> {
        self.math_font.as_ref().map(|(_, c)| c)
    }

    /// The selected math font, `None` before selection.
    pub fn math_font(&self) -> Option<(&F, FontId)> {
        let (id, _) = self.math_font?;
        Some((&self.fonts[u16::from(id) as usize], id))
    }

    /// Resolves a character against the selected fonts. Fails only when no
    /// math font has been selected; see [`FontRegistry::resolve_with`] for
    /// the total variant used during layout.
    pub fn resolve(
        &self,
        code: char,
        style: FontStyle,
        is_math_mode: bool,
        scale: f64,
    ) -> FontResult<Char<'_, F>> {
        let math = self.math_font().ok_or(FontError::NoMathFontSelected)?;
        Ok(self.resolve_with(math, code, style, is_math_mode, scale))
    }

    /// Resolves a character given an already-selected math font. Total:
    /// codepoints without a glyph fall back to the undefined glyph, text-mode
    /// requests without a main font fall back to the math font.
    pub(crate) fn resolve_with<'f>(
        &'f self,
        math: (&'f F, FontId),
        code: char,
        style: FontStyle,
        is_math_mode: bool,
        scale: f64,
    ) -> Char<'f, F> {
        let (mapped_code, font, font_id) = if is_math_mode {
            let mapped = style::styled_codepoint(code, style, self.math_style);
            (mapped, math.0, math.1)
        } else {
            match self
                .main_font
                .and_then(|i| self.main_fonts[i].1.closest(style))
                .and_then(|id| self.font(id).map(|f| (f, id)))
            {
                Some((font, id)) => (code, font, id),
                None => (code, math.0, math.1),
            }
        };

        let gid = font
            .glyph_index(mapped_code)
            .or_else(|| font.glyph_index(code))
            .unwrap_or_else(|| {
                warn!("no glyph for {:?} (mapped {:?}), using notdef", code, mapped_code);
                GlyphId::NOTDEF
            });

        Char { code, mapped_code, font, font_id, gid, scale }
    }
}
