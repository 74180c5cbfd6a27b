/*! # A math layout engine based on the TeX and OpenType MATH conventions.

This crate turns a tree of math atoms (a base with a superscript, an
operator with limits, an accented letter, ...) into a fully measured box
tree — widths, heights, depths and baseline shifts baked into every node —
ready to be painted by whatever graphics stack the caller prefers.

It deliberately starts *after* parsing and stops *before* rasterization:

  1. Something upstream builds [`Atom`](crate::atom::Atom) trees (a TeX
     parser, an editor's own document model, tests building them by hand).
  2. This crate lays the atoms out, driven by metrics served over the
     [`MathFont`](crate::font::MathFont) trait — implement it with your
     favorite font-parsing crate.
  3. The resulting [`LayoutNode`](crate::layout::LayoutNode) tree is walked
     by [`Renderer`](crate::render::Renderer), which emits glyph-placement
     calls through the [`Backend`](crate::render::Backend) traits —
     implement those with your favorite canvas.

## Basic usage

First, register fonts. The registry is populated once and then only read:

```no_run
# struct MyFont;
# impl mathbox::font::MathFont for MyFont {
#     fn glyph_index(&self, _: char) -> Option<mathbox::font::GlyphId> { None }
#     fn glyph_metrics(&self, _: mathbox::font::GlyphId) -> mathbox::font::GlyphMetrics { Default::default() }
#     fn kern_record(&self, _: mathbox::font::GlyphId) -> Option<&mathbox::font::MathKernRecord> { None }
#     fn constants(&self) -> mathbox::font::Constants { Default::default() }
# }
# fn load(_: &str) -> MyFont { MyFont }
use mathbox::font::FontRegistry;

let mut fonts = FontRegistry::new();
fonts.add_math_font("xits", load("XITS_Math.otf"));
fonts.select_math_font("xits").expect("name was just registered");
```

Then build an atom tree and lay it out under a context carrying the style
and the font size:

```no_run
# struct MyFont;
# impl mathbox::font::MathFont for MyFont {
#     fn glyph_index(&self, _: char) -> Option<mathbox::font::GlyphId> { None }
#     fn glyph_metrics(&self, _: mathbox::font::GlyphId) -> mathbox::font::GlyphMetrics { Default::default() }
#     fn kern_record(&self, _: mathbox::font::GlyphId) -> Option<&mathbox::font::MathKernRecord> { None }
#     fn constants(&self) -> mathbox::font::Constants { Default::default() }
# }
# let fonts = mathbox::font::FontRegistry::<MyFont>::new();
use mathbox::atom::{Atom, CharAtom, ScriptsAtom};
use mathbox::font::FontStyle;
use mathbox::layout::{Env, Style};

// x²
let formula = Atom::Scripts(ScriptsAtom::new(
    Some(Atom::Char(CharAtom::new('x', FontStyle::NONE))),
    None,
    Some(Atom::Char(CharAtom::new('2', FontStyle::NONE))),
));

let env = Env::new(&fonts, 16.0, Style::Display).expect("math font is selected");
let layout = formula.layout(&env);
println!("the formula is {} units wide", layout.width);
```

Finally, hand the box tree to the renderer along with a backend
implementing [`FontBackend`](crate::render::FontBackend) and
[`GraphicsBackend`](crate::render::GraphicsBackend):

```ignore
let renderer = Renderer::new();
renderer.render(&layout, &mut backend);
```

The contexts are small copyable values and every layout query against the
registry is a read, so distinct formulas may be laid out concurrently once
font registration is finished.
*/

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate log;

#[deny(missing_docs)]
pub mod error;
#[deny(missing_docs)]
pub mod dimensions;
#[macro_use]
pub mod layout;
pub mod font;
#[deny(missing_docs)]
pub mod atom;
#[deny(missing_docs)]
pub mod render;

pub use render::Renderer;
