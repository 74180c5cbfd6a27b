//! A synthetic [`MathFont`] built from a yaml metrics table, plus a backend
//! that records draw calls instead of painting.

use std::collections::BTreeMap;

use mathbox::font::{Constants, GlyphId, GlyphMetrics, MathFont, MathKernRecord};
use mathbox::render::{Cursor, FontBackend, GraphicsBackend};

const TESTFONT_YAML: &str = include_str!("../data/testfont.yaml");

#[derive(Debug, Deserialize)]
struct FontData {
    constants: Constants,
    glyphs: BTreeMap<char, GlyphMetrics>,
    #[serde(default)]
    kerns: BTreeMap<char, MathKernRecord>,
}

/// A font backed by the metrics table in `tests/data/testfont.yaml`.
/// Glyph ids are assigned in table order, starting at 1; id 0 is notdef.
pub struct TestFont {
    codepoints: Vec<char>,
    metrics: Vec<GlyphMetrics>,
    kerns: BTreeMap<u16, MathKernRecord>,
    constants: Constants,
}

impl TestFont {
    pub fn load() -> TestFont {
        let data: FontData =
            serde_yaml::from_str(TESTFONT_YAML).expect("failed to parse test font table");

        let mut codepoints = vec!['\0'];
        let mut metrics = vec![GlyphMetrics::default()];
        let mut kerns = BTreeMap::new();
        for (&code, &glyph_metrics) in &data.glyphs {
            let gid = codepoints.len() as u16;
            codepoints.push(code);
            metrics.push(glyph_metrics);
            if let Some(record) = data.kerns.get(&code) {
                kerns.insert(gid, record.clone());
            }
        }

        TestFont {
            codepoints,
            metrics,
            kerns,
            constants: data.constants,
        }
    }
}

impl MathFont for TestFont {
    fn glyph_index(&self, codepoint: char) -> Option<GlyphId> {
        self.codepoints
            .iter()
            .position(|&c| c == codepoint)
            .filter(|&i| i > 0)
            .map(|i| GlyphId::from(i as u16))
    }

    fn glyph_metrics(&self, gid: GlyphId) -> GlyphMetrics {
        self.metrics
            .get(u16::from(gid) as usize)
            .copied()
            .unwrap_or_default()
    }

    fn kern_record(&self, gid: GlyphId) -> Option<&MathKernRecord> {
        self.kerns.get(&u16::from(gid))
    }

    fn constants(&self) -> Constants {
        self.constants
    }
}

/// One recorded `symbol` call: position, glyph id, em size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnSymbol {
    pub x: f64,
    pub y: f64,
    pub gid: u16,
    pub size: f64,
}

/// A backend that records every draw call for inspection.
#[derive(Debug, Default)]
pub struct DebugBackend {
    pub symbols: Vec<DrawnSymbol>,
}

impl FontBackend<TestFont> for DebugBackend {
    fn symbol(&mut self, pos: Cursor, gid: GlyphId, size: f64, _font: &TestFont) {
        self.symbols.push(DrawnSymbol {
            x: pos.x,
            y: pos.y,
            gid: u16::from(gid),
            size,
        });
    }
}

impl GraphicsBackend for DebugBackend {}
