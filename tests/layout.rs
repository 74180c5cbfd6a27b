//! Layout behavior of the script-placement algorithms against a synthetic
//! font with hand-picked metrics, so every expected position is computable
//! by hand from the constants in `tests/data/testfont.yaml`.

#[macro_use]
extern crate serde_derive;
extern crate serde_yaml;

mod common;

use common::{DebugBackend, TestFont};

use mathbox::atom::{AccentedAtom, Atom, CharAtom, LimitsType, PhantomAtom, ScriptsAtom, SideSetsAtom};
use mathbox::dimensions::units::Px;
use mathbox::dimensions::Unit;
use mathbox::error::FontError;
use mathbox::font::{FontRegistry, FontStyle};
use mathbox::layout::{Env, LayoutNode, LayoutVariant, Style};
use mathbox::render::Renderer;

const FONT_SIZE: f64 = 10.0;
const EPS: f64 = 1e-9;

fn registry() -> FontRegistry<TestFont> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut fonts = FontRegistry::new();
    fonts.add_math_font("testfont", TestFont::load());
    fonts.select_math_font("testfont").unwrap();
    fonts
}

fn chr(c: char) -> Atom {
    Atom::Char(CharAtom::new(c, FontStyle::RM))
}

fn operator(c: char, limits: LimitsType) -> Atom {
    Atom::Char(CharAtom::big_operator(c, FontStyle::RM).with_limits(limits))
}

fn assert_close(actual: Unit<Px>, expected: f64) {
    assert!(
        (actual.to_unitless() - expected).abs() < EPS,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn hbox_contents<'a, 'f>(node: &'a LayoutNode<'f, TestFont>) -> &'a [LayoutNode<'f, TestFont>] {
    match &node.node {
        LayoutVariant::HorizontalBox(hbox) => &hbox.contents,
        _ => panic!("expected a horizontal box, got {:?}", node),
    }
}

fn vbox_contents<'a, 'f>(node: &'a LayoutNode<'f, TestFont>) -> &'a [LayoutNode<'f, TestFont>] {
    match &node.node {
        LayoutVariant::VerticalBox(vbox) => &vbox.contents,
        _ => panic!("expected a vertical box, got {:?}", node),
    }
}

#[test]
fn no_scripts_returns_base_box_unchanged() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    let bare = chr('x').layout(&env);
    let scripted = ScriptsAtom::new(Some(chr('x')), None, None).layout(&env);

    assert_eq!(scripted.width, bare.width);
    assert_eq!(scripted.height, bare.height);
    assert_eq!(scripted.depth, bare.depth);
    // no box got wrapped around the glyph
    assert!(scripted.is_symbol().is_some());
}

#[test]
fn scripts_alone_anchor_on_invisible_capital() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    let node = ScriptsAtom::new(None, Some(chr('n')), None).layout(&env);

    // the placeholder contributes the height of 'M' but no width
    assert_close(node.height, 6.8);
    // width: subscript (0.6 em at script size) plus the trailing script space
    assert_close(node.width, 0.6 * 7.0 + 0.56);

    let contents = hbox_contents(&node);
    assert!(matches!(contents[0].node, LayoutVariant::Kern));
    assert_close(contents[0].width, 0.0);
    // v anchors at the baseline for a non-glyph kernel: shift-down minimum wins
    assert_close(contents[1].shift, 2.5);
    assert_close(node.depth, 2.5);
}

#[test]
fn superscript_shift_reaches_style_minimum() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    // both competing terms stay below the style's shift-up: the baseline
    // drop gives 4.5 - 2.5 = 2.0 and the bottom minimum gives 1.25
    let node = ScriptsAtom::new(Some(chr('x')), None, Some(chr('2'))).layout(&env);
    let contents = hbox_contents(&node);

    // no kern record and no italics: nothing corrects, so base/script/space
    assert_eq!(contents.len(), 3);
    assert_close(contents[1].shift, -3.63);
    assert_close(node.height, 0.65 * 7.0 + 3.63);
}

#[test]
fn cramped_style_uses_smaller_superscript_shift() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::DisplayCramped).unwrap();

    let node = ScriptsAtom::new(Some(chr('x')), None, Some(chr('2'))).layout(&env);
    let contents = hbox_contents(&node);
    assert_close(contents[1].shift, -2.89);
}

#[test]
fn subscript_only_shift_formula() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    // for 'x' (no depth): baseline drop gives 2.0, the top-max term is
    // negative, so the style's shift-down 2.5 wins
    let node = ScriptsAtom::new(Some(chr('x')), Some(chr('j')), None).layout(&env);
    let contents = hbox_contents(&node);
    assert_eq!(contents.len(), 3);
    assert_close(contents[1].shift, 2.5);
    assert_close(contents[2].width, 0.56);
}

#[test]
fn subscript_kern_reads_bottom_right_corner() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    // 'f' has depth 0.2em: the baseline drop anchors v at 4.0, above the
    // shift-down minimum; the bottom-right kern at -0.4 em is -0.04 em
    let node = ScriptsAtom::new(Some(chr('f')), Some(chr('j')), None).layout(&env);
    let contents = hbox_contents(&node);

    assert_eq!(contents.len(), 4);
    assert!(matches!(contents[1].node, LayoutVariant::Kern));
    assert_close(contents[1].width, -0.4);
    assert_close(contents[2].shift, 4.0);
}

#[test]
fn superscript_kern_includes_italic_correction() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    // u anchors at 7.0 - 2.5 = 4.5; the top-right kern at 0.45 em reads the
    // second step (0.08 em), plus the italic correction 0.07 em
    let node = ScriptsAtom::new(Some(chr('f')), None, Some(chr('2'))).layout(&env);
    let contents = hbox_contents(&node);

    assert_eq!(contents.len(), 4);
    assert_close(contents[1].width, 0.8 + 0.7);
    assert_close(contents[2].shift, -4.5);
}

#[test]
fn both_scripts_keep_their_anchors_when_gap_suffices() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    let node = ScriptsAtom::new(Some(chr('x')), Some(chr('j')), Some(chr('2'))).layout(&env);
    let contents = hbox_contents(&node);
    let stack = &contents[1];
    let scripts = vbox_contents(stack);

    // u = 3.63 and v = 2.5 leave a gap of 2.91, already over the 2.0 minimum:
    // nothing rebalances
    assert_eq!(scripts.len(), 3);
    assert_close(scripts[1].height, 2.91);
    assert_close(stack.height, 0.65 * 7.0 + 3.63);
    assert_close(stack.depth, 0.2 * 7.0 + 2.5);
}

#[test]
fn both_scripts_pulled_apart_to_minimum_gap() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    // a tall subscript ('2' at script size has height 4.55) closes the gap
    // to 1.58; the subscript moves down until the gap is exactly 2.0
    let node = ScriptsAtom::new(Some(chr('x')), Some(chr('2')), Some(chr('2'))).layout(&env);
    let contents = hbox_contents(&node);
    let stack = &contents[1];
    let scripts = vbox_contents(stack);

    assert_close(scripts[1].height, 2.0);
    assert_close(stack.height, 4.55 + 3.63);
    // v = theta + sub.height + sup.depth - u = 2.0 + 4.55 + 0 - 3.63
    assert_close(stack.depth, 2.92);
}

#[test]
fn limits_always_stacks_scripts() {
    let fonts = registry();
    // not display style, yet the operator demands limits
    let env = Env::new(&fonts, FONT_SIZE, Style::Text).unwrap();

    let node = ScriptsAtom::new(
        Some(operator('∑', LimitsType::Always)),
        Some(chr('n')),
        Some(chr('2')),
    )
    .layout(&env);

    assert!(matches!(node.node, LayoutVariant::VerticalBox(_)));
    assert_close(node.width, 10.5);
    // over: gap max(2.0, 3.0 - 0) = 3.0 above the operator's 7.5
    assert_close(node.height, 7.5 + 3.0 + 4.55);
    // under: gap max(1.67, 6.0 - 3.22) = 2.78 below the operator's 2.5
    assert_close(node.depth, 2.5 + 2.78 + 3.22);

    // the operator stays on the box's baseline, centered
    let stacked = vbox_contents(&node);
    assert_eq!(stacked.len(), 5);
    assert!(stacked[2].is_symbol().is_some());
}

#[test]
fn normal_limits_follow_style() {
    let fonts = registry();

    fn formula<'f>(env: &Env<'f, TestFont>) -> LayoutNode<'f, TestFont> {
        ScriptsAtom::new(
            Some(operator('∑', LimitsType::Normal)),
            Some(chr('n')),
            Some(chr('2')),
        )
        .layout(env)
    }

    let display = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();
    assert!(matches!(formula(&display).node, LayoutVariant::VerticalBox(_)));

    let text = Env::new(&fonts, FONT_SIZE, Style::Text).unwrap();
    assert!(matches!(formula(&text).node, LayoutVariant::HorizontalBox(_)));
}

#[test]
fn never_limits_keep_corner_scripts_in_display() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    let node = ScriptsAtom::new(
        Some(operator('∑', LimitsType::Never)),
        Some(chr('n')),
        None,
    )
    .layout(&env);
    assert!(matches!(node.node, LayoutVariant::HorizontalBox(_)));
}

#[test]
fn operator_superscript_skips_baseline_drops() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Text).unwrap();

    // for an operator the anchors start at the baseline: although the
    // operator is 7.5 high, the shift is the style minimum 3.63, and the
    // italic correction both pulls the scripts left and widens the kern
    let node = ScriptsAtom::new(
        Some(operator('∑', LimitsType::Never)),
        None,
        Some(chr('2')),
    )
    .layout(&env);
    let contents = hbox_contents(&node);

    assert_eq!(contents.len(), 5);
    assert_close(contents[1].width, -0.6);
    assert_close(contents[2].width, 0.6);
    assert_close(contents[3].shift, -3.63);
}

#[test]
fn sideset_right_script_matches_corner_shifts() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Text).unwrap();

    let corner = ScriptsAtom::new(
        Some(operator('∑', LimitsType::Never)),
        None,
        Some(chr('2')),
    )
    .layout(&env);
    let sideset = SideSetsAtom::new(operator('∑', LimitsType::Normal))
        .with_right(None, Some(chr('2')))
        .layout(&env);

    let corner_sup = &hbox_contents(&corner)[3];
    let sideset_sup = &hbox_contents(&sideset)[3];
    assert_eq!(corner_sup.shift, sideset_sup.shift);
    assert_eq!(corner.height, sideset.height);
    assert_eq!(corner.width, sideset.width);
}

#[test]
fn sideset_left_script_lands_before_base() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Text).unwrap();

    let node = SideSetsAtom::new(operator('∑', LimitsType::Normal))
        .with_left(None, Some(chr('2')))
        .layout(&env);
    let contents = hbox_contents(&node);

    // left flank: no italic delta, no kern record on this corner
    assert_eq!(contents.len(), 2);
    assert_close(contents[0].shift, -3.63);
    assert!(contents[1].is_symbol().is_some());
    assert_close(node.width, 3.5 + 10.5);
}

#[test]
fn sideset_both_flanks_disjoint() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Text).unwrap();

    let node = SideSetsAtom::new(operator('∑', LimitsType::Normal))
        .with_left(Some(chr('n')), Some(chr('2')))
        .with_right(Some(chr('n')), Some(chr('2')))
        .layout(&env);
    let contents = hbox_contents(&node);

    // left stack, operator, italic pull-back, right stack, script space
    assert!(matches!(contents[0].node, LayoutVariant::VerticalBox(_)));
    assert!(contents[1].is_symbol().is_some());

    // each flank balances its own pair: gap = (3.63 - 0) - (3.22 - 2.5) = 2.91
    let left = vbox_contents(&contents[0]);
    assert_close(left[1].height, 2.91);
}

#[test]
fn accented_base_anchors_scripts_on_accentee() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    let accented = Atom::Accented(AccentedAtom::new(chr('x'), 'ˆ'));
    let node = ScriptsAtom::new(Some(accented), None, Some(chr('2'))).layout(&env);
    let contents = hbox_contents(&node);

    // the accent mark is painted...
    assert!(matches!(contents[0].node, LayoutVariant::VerticalBox(_)));
    assert!(contents[0].height > chr('x').layout(&env).height);
    // ...but the superscript sits exactly where it would on a bare 'x'
    assert_eq!(contents.len(), 3);
    assert_close(contents[1].shift, -3.63);
}

#[test]
fn phantom_keeps_selected_extents() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    let node = Atom::Phantom(PhantomAtom::new(chr('x'), false, true, true)).layout(&env);
    assert!(matches!(node.node, LayoutVariant::Kern));
    assert_close(node.width, 0.0);
    assert_close(node.height, 4.5);
    assert_close(node.depth, 0.0);
}

#[test]
fn layout_scales_linearly_with_font_size() {
    let fonts = registry();
    const K: f64 = 2.5;

    let formula = ScriptsAtom::new(Some(chr('f')), Some(chr('j')), Some(chr('2')));
    let small = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();
    let large = Env::new(&fonts, FONT_SIZE * K, Style::Display).unwrap();

    fn assert_scaled(small: &LayoutNode<TestFont>, large: &LayoutNode<TestFont>, k: f64) {
        assert_close(large.width, small.width.to_unitless() * k);
        assert_close(large.height, small.height.to_unitless() * k);
        assert_close(large.depth, small.depth.to_unitless() * k);
        assert_close(large.shift, small.shift.to_unitless() * k);
        match (&small.node, &large.node) {
            (LayoutVariant::HorizontalBox(a), LayoutVariant::HorizontalBox(b)) => {
                assert_eq!(a.contents.len(), b.contents.len());
                for (a, b) in a.contents.iter().zip(b.contents.iter()) {
                    assert_scaled(a, b, k);
                }
            }
            (LayoutVariant::VerticalBox(a), LayoutVariant::VerticalBox(b)) => {
                assert_eq!(a.contents.len(), b.contents.len());
                for (a, b) in a.contents.iter().zip(b.contents.iter()) {
                    assert_scaled(a, b, k);
                }
            }
            (LayoutVariant::Glyph(a), LayoutVariant::Glyph(b)) => {
                assert_eq!(a.gid, b.gid);
                assert_close(b.size, a.size.to_unitless() * k);
            }
            (LayoutVariant::Kern, LayoutVariant::Kern) => {}
            _ => panic!("tree shapes diverge between font sizes"),
        }
    }

    assert_scaled(&formula.layout(&small), &formula.layout(&large), K);
}

#[test]
fn renderer_accumulates_widths_and_shifts() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    let node = ScriptsAtom::new(Some(chr('x')), None, Some(chr('2'))).layout(&env);
    let mut backend = DebugBackend::default();
    Renderer::new().render(&node, &mut backend);

    assert_eq!(backend.symbols.len(), 2);
    assert_eq!((backend.symbols[0].x, backend.symbols[0].y), (0.0, 0.0));
    assert!((backend.symbols[1].x - 5.7).abs() < EPS);
    assert!((backend.symbols[1].y - (-3.63)).abs() < EPS);
    // superscripts render at the script size
    assert!((backend.symbols[0].size - 10.0).abs() < EPS);
    assert!((backend.symbols[1].size - 7.0).abs() < EPS);
}

#[test]
fn renderer_realizes_script_stack_positions() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    let node = ScriptsAtom::new(Some(chr('x')), Some(chr('2')), Some(chr('2'))).layout(&env);
    let mut backend = DebugBackend::default();
    Renderer::new().render(&node, &mut backend);

    // base, superscript, subscript in paint order
    assert_eq!(backend.symbols.len(), 3);
    let sup = backend.symbols[1];
    let sub = backend.symbols[2];
    assert!((sup.y - (-3.63)).abs() < EPS);
    assert!((sub.y - 2.92).abs() < EPS);
    // the realized gap between the superscript's bottom and the subscript's
    // top is exactly the minimum the font asks for
    let sup_bottom = sup.y + 0.0; // '2' has no depth
    let sub_top = sub.y - 4.55;
    assert!(((sub_top - sup_bottom) - 2.0).abs() < EPS);
}

#[test]
fn context_creation_requires_selected_math_font() {
    let fonts = FontRegistry::<TestFont>::new();
    match Env::new(&fonts, FONT_SIZE, Style::Display) {
        Err(FontError::NoMathFontSelected) => {}
        other => panic!("expected a refusal, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn style_transitions_are_scoped() {
    let fonts = registry();
    let env = Env::new(&fonts, FONT_SIZE, Style::Display).unwrap();

    let scale = env.with_style(Style::Script, |script| {
        assert_eq!(script.style(), Style::Script);
        script.scale()
    });
    assert!((scale - 0.7).abs() < EPS);
    // the transition never leaks back out
    assert_eq!(env.style(), Style::Display);
    assert!((env.scale() - 1.0).abs() < EPS);
}
