//! Property-based tests for fragment composition.
//!
//! Fragments are built from randomly generated composition steps while a
//! plain `String` tracks the text the result should flatten to.

use proptest::prelude::*;
use tinted::{Color, Fragment, NoColor, RenderConfig};

// ============================================================================
// Strategies
// ============================================================================

#[derive(Clone, Debug)]
struct LeafSpec {
    text: String,
    fore: Option<Color>,
    back: Option<Color>,
}

impl LeafSpec {
    fn build(&self) -> Fragment {
        Fragment::with_colors(self.text.clone(), self.fore, self.back)
    }
}

#[derive(Clone, Debug)]
enum Step {
    Append(String),
    Prepend(String),
    ConcatRight(LeafSpec),
    ConcatLeft(LeafSpec),
}

fn color_strategy() -> impl Strategy<Value = Color> {
    prop::sample::select(Color::ALL.to_vec())
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 éß]{0,8}"
}

fn leaf_strategy() -> impl Strategy<Value = LeafSpec> {
    (
        text_strategy(),
        prop::option::of(color_strategy()),
        prop::option::of(color_strategy()),
    )
        .prop_map(|(text, fore, back)| LeafSpec { text, fore, back })
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        text_strategy().prop_map(Step::Append),
        text_strategy().prop_map(Step::Prepend),
        leaf_strategy().prop_map(Step::ConcatRight),
        leaf_strategy().prop_map(Step::ConcatLeft),
    ]
}

/// Build a fragment by applying `steps` to `start`, returning it together
/// with the text it is expected to flatten to.
fn build(start: &LeafSpec, steps: &[Step]) -> (Fragment, String) {
    let mut fragment = start.build();
    let mut expected = start.text.clone();
    for step in steps {
        match step {
            Step::Append(s) => {
                fragment = fragment + s.as_str();
                expected.push_str(s);
            }
            Step::Prepend(s) => {
                fragment = s.as_str() + fragment;
                expected.insert_str(0, s);
            }
            Step::ConcatRight(leaf) => {
                fragment = fragment + leaf.build();
                expected.push_str(&leaf.text);
            }
            Step::ConcatLeft(leaf) => {
                fragment = leaf.build() + fragment;
                expected.insert_str(0, &leaf.text);
            }
        }
    }
    (fragment, expected)
}

fn tree_strategy() -> impl Strategy<Value = (LeafSpec, Vec<Step>)> {
    (leaf_strategy(), prop::collection::vec(step_strategy(), 0..12))
}

// ============================================================================
// Flatten
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A text leaf flattens to its text.
    #[test]
    fn flatten_text_leaf(s in ".{0,16}") {
        prop_assert_eq!(Fragment::from_text(s.clone()).flatten(), s);
    }

    /// Colors never show up in the flattened text.
    #[test]
    fn flatten_ignores_colors(leaf in leaf_strategy()) {
        prop_assert_eq!(leaf.build().flatten(), leaf.text);
    }

    /// Every composition step concatenates on text.
    #[test]
    fn flatten_follows_composition((start, steps) in tree_strategy()) {
        let (fragment, expected) = build(&start, &steps);
        prop_assert_eq!(fragment.flatten(), expected);
    }

    /// Flattening is repeatable.
    #[test]
    fn flatten_is_idempotent((start, steps) in tree_strategy()) {
        let (fragment, _) = build(&start, &steps);
        let first = fragment.flatten();
        prop_assert_eq!(fragment.flatten(), first);
    }
}

// ============================================================================
// Composition
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// `flatten(a + b) == flatten(a) ++ flatten(b)` for any two trees.
    #[test]
    fn concat_flattens_to_concatenation(
        (a_start, a_steps) in tree_strategy(),
        (b_start, b_steps) in tree_strategy(),
    ) {
        let (a, a_text) = build(&a_start, &a_steps);
        let (b, b_text) = build(&b_start, &b_steps);
        let joined = a.concat(&b);
        prop_assert_eq!(joined.flatten(), format!("{a_text}{b_text}"));
        prop_assert!(!joined.ptr_eq(&a));
        prop_assert!(!joined.ptr_eq(&b));
        // Concatenation leaves both operands as they were.
        prop_assert_eq!(a.flatten(), a_text);
        prop_assert_eq!(b.flatten(), b_text);
    }

    /// Appending text always returns the same fragment.
    #[test]
    fn append_keeps_identity((start, steps) in tree_strategy(), s in text_strategy()) {
        let (fragment, expected) = build(&start, &steps);
        let result = fragment.append_text(&s);
        prop_assert!(result.ptr_eq(&fragment));
        prop_assert_eq!(result.flatten(), format!("{expected}{s}"));
    }

    /// Prepending keeps identity for composites only.
    #[test]
    fn prepend_identity_depends_on_kind(
        (start, steps) in tree_strategy(),
        s in text_strategy(),
    ) {
        let (fragment, expected) = build(&start, &steps);
        let was_composite = fragment.is_composite();
        let children = fragment.children().len();
        let result = fragment.prepend_text(&s);
        prop_assert_eq!(result.ptr_eq(&fragment), was_composite);
        prop_assert!(result.is_composite());
        prop_assert_eq!(result.flatten(), format!("{s}{expected}"));
        if was_composite {
            prop_assert_eq!(result.children().len(), children + 1);
        } else {
            prop_assert_eq!(result.children().len(), 2);
            prop_assert_eq!(fragment.flatten(), expected);
        }
    }

    /// Composites built through `+` only ever hold leaves.
    #[test]
    fn composites_hold_leaves((start, steps) in tree_strategy()) {
        let (fragment, _) = build(&start, &steps);
        for child in fragment.children() {
            prop_assert!(!child.is_composite());
        }
    }

    /// A deep clone flattens the same but shares nothing.
    #[test]
    fn deep_clone_is_detached((start, steps) in tree_strategy()) {
        let (fragment, expected) = build(&start, &steps);
        let copy = fragment.deep_clone();
        prop_assert_eq!(copy.flatten(), expected.clone());
        let _ = fragment.append_text("!");
        prop_assert_eq!(copy.flatten(), expected);
    }
}

// ============================================================================
// Rendering
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Without colors, a render is exactly the flattened text.
    #[test]
    fn no_color_render_matches_flatten((start, steps) in tree_strategy()) {
        let (fragment, expected) = build(&start, &steps);
        let mut wtr = NoColor::new(Vec::new());
        fragment.render(&mut wtr, &RenderConfig::default()).unwrap();
        prop_assert_eq!(String::from_utf8(wtr.into_inner()).unwrap(), expected.clone());
        prop_assert_eq!(fragment.flatten(), expected);
    }
}
