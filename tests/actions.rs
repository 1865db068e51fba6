//! Action model tests: specification expansion and descriptor resolution.

use proptest::prelude::*;

use rust_gsm::actions::{
    Action, ActionController, ActionDescriptor, ActionGroup, ActionSpec, ResolutionError,
};
use rust_gsm::core::{EntityId, PlayerId, Term};

fn terms(action: &Action) -> Vec<String> {
    action.terms().iter().map(ToString::to_string).collect()
}

/// `(A, [B, C])` expands to `(A, B)` then `(A, C)`.
#[test]
fn test_tuple_with_choice() {
    let mut group = ActionGroup::new("g");
    group.extend(ActionSpec::tuple([
        ActionSpec::from("A"),
        ActionSpec::choice(["B", "C"]),
    ]));

    let expanded: Vec<_> = group.iter().map(terms).collect();
    assert_eq!(expanded, vec![vec!["A", "B"], vec!["A", "C"]]);
}

/// `[A, B]` expands to two single-term actions.
#[test]
fn test_choice_of_scalars() {
    let mut group = ActionGroup::new("g");
    group.extend(vec!["A", "B"]);

    let expanded: Vec<_> = group.iter().map(terms).collect();
    assert_eq!(expanded, vec![vec!["A"], vec!["B"]]);
}

/// Nested tuples flatten into one term sequence.
#[test]
fn test_nested_tuples_flatten() {
    let spec = ActionSpec::tuple([
        ActionSpec::from("play"),
        ActionSpec::tuple([ActionSpec::from(EntityId(1)), ActionSpec::choice([PlayerId(0), PlayerId(1)])]),
    ]);
    assert_eq!(spec.count(), 2);
    assert_eq!(
        spec.expand(),
        vec![
            vec![Term::from("play"), Term::Entity(EntityId(1)), Term::Player(PlayerId(0))],
            vec![Term::from("play"), Term::Entity(EntityId(1)), Term::Player(PlayerId(1))],
        ]
    );
}

/// An empty choice anywhere in a tuple yields no actions.
#[test]
fn test_empty_choice_yields_nothing() {
    let spec = ActionSpec::tuple([ActionSpec::from("play"), ActionSpec::Choice(Vec::new())]);
    assert!(spec.expand().is_empty());
    assert_eq!(spec.count(), 0);
}

/// Prebuilt actions pass through `extend` unchanged.
#[test]
fn test_prebuilt_action_passes_through() {
    let mut group = ActionGroup::new("g");
    let action = Action::new([Term::from("x"), Term::Int(3)]);
    group.extend(action.clone());
    assert_eq!(group.len(), 1);
    assert_eq!(group.iter().next(), Some(&action));
    assert_eq!(group.iter().next().and_then(|a| a.group.as_deref()), Some("g"));
}

fn controller() -> ActionController {
    let mut controller = ActionController::new();
    controller.new_group("draw").extend("draw");
    controller
        .new_group("play")
        .extend(ActionSpec::tuple([
            ActionSpec::from("play"),
            ActionSpec::choice([EntityId(5), EntityId(6)]),
        ]));
    controller.new_group("pass").extend("pass");
    controller
}

/// The three failure kinds are distinct.
#[test]
fn test_resolution_errors() {
    let controller = controller();
    assert_eq!(
        controller.find(&ActionDescriptor::Index(4)),
        Err(ResolutionError::IndexOutOfRange { index: 4, total: 4 })
    );
    assert_eq!(
        controller.find(&ActionDescriptor::Group {
            group: "attack".into(),
            idx: Some(0),
            pick: None,
        }),
        Err(ResolutionError::UnknownGroup("attack".into()))
    );
    assert_eq!(
        controller.find(&ActionDescriptor::Pick(vec![Term::from("fly")])),
        Err(ResolutionError::NoMatch(vec![Term::from("fly")]))
    );
}

/// A group descriptor's index is global and translated to the group.
#[test]
fn test_group_descriptor_uses_global_index() {
    let controller = controller();
    let found = controller
        .find(&ActionDescriptor::Group {
            group: "play".into(),
            idx: Some(2),
            pick: None,
        })
        .unwrap();
    assert_eq!(found.get(1), Some(&Term::Entity(EntityId(6))));

    // Index 3 exists but belongs to "pass".
    assert!(controller
        .find(&ActionDescriptor::Group {
            group: "play".into(),
            idx: Some(3),
            pick: None,
        })
        .is_err());
}

/// A bare pick is searched group by group.
#[test]
fn test_pick_resolution() {
    let controller = controller();
    let pick = vec![Term::from("play"), Term::Entity(EntityId(5))];
    let found = controller.find(&ActionDescriptor::Pick(pick.clone())).unwrap();
    assert!(found.matches(&pick));
    assert_eq!(found.group.as_deref(), Some("play"));
}

/// Descriptors arrive from transports as JSON.
#[test]
fn test_descriptor_wire_shapes() {
    let index: ActionDescriptor = serde_json::from_str("1").unwrap();
    assert_eq!(index, ActionDescriptor::Index(1));

    let pick: ActionDescriptor = serde_json::from_str(r#"[{"Text":"pass"}]"#).unwrap();
    assert_eq!(pick, ActionDescriptor::Pick(vec![Term::from("pass")]));

    let group: ActionDescriptor = serde_json::from_str(r#"{"group":"play","idx":2}"#).unwrap();
    assert_eq!(
        group,
        ActionDescriptor::Group {
            group: "play".into(),
            idx: Some(2),
            pick: None,
        }
    );
}

/// Numbering follows declaration order across groups.
#[test]
fn test_number_actions() {
    let mut controller = controller();
    controller.number_actions();
    let numbers: Vec<_> = controller.iter().map(|a| a.idx).collect();
    assert_eq!(numbers, vec![Some(0), Some(1), Some(2), Some(3)]);
}

fn group_sizes() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..5, 1..6)
}

fn build(sizes: &[usize]) -> ActionController {
    let mut controller = ActionController::new();
    for (g, size) in sizes.iter().enumerate() {
        let group = controller.new_group(format!("g{g}"));
        for i in 0..*size {
            group.push(Action::new([Term::Int(g as i64), Term::Int(i as i64)]));
        }
    }
    controller
}

proptest! {
    /// Global index lookup equals indexing the flattened groups.
    #[test]
    fn test_index_matches_flattening(sizes in group_sizes(), extra in 0usize..4) {
        let controller = build(&sizes);
        let flat: Vec<&Action> = controller.groups().iter().flat_map(ActionGroup::iter).collect();

        for (i, expected) in flat.iter().enumerate() {
            prop_assert_eq!(controller.find(&ActionDescriptor::Index(i)), Ok(*expected));
        }
        let past = flat.len() + extra;
        prop_assert_eq!(
            controller.find(&ActionDescriptor::Index(past)),
            Err(ResolutionError::IndexOutOfRange { index: past, total: flat.len() })
        );
    }

    /// Expansion count matches the product of choice sizes.
    #[test]
    fn test_count_matches_expansion(widths in prop::collection::vec(0usize..4, 0..4)) {
        let spec = ActionSpec::tuple(
            widths
                .iter()
                .map(|&w| ActionSpec::choice((0..w as i64).collect::<Vec<_>>())),
        );
        let expected: usize = widths.iter().product();
        prop_assert_eq!(spec.count(), expected);
        prop_assert_eq!(spec.expand().len(), expected);
    }
}
