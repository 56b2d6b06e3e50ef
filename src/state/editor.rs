//! Step-collection editor
//!
//! The editor owns the ordered form steps of one editing session together with
//! the lookup of available form definitions. Every edit is expressed as an
//! [`Intent`] and applied by [`reduce`], which never touches the previous
//! snapshot: it builds and returns a new [`EditorState`]. Older snapshots stay
//! valid, which is what the undo history relies on.
//!
//! Step `order` values always form the contiguous range `0..len`. `AddStep`
//! and `DeleteStep` keep storage position and `order` in lockstep;
//! `MoveStepUp` only exchanges the `order` of two neighbours and leaves their
//! storage position alone, so anything presenting the steps must go through
//! [`EditorState::steps_by_order`].

use super::models::{FormDefinition, FormStep, StepDefinition};
use std::collections::HashMap;
use std::sync::Arc;

/// Label of the leading "nothing selected" entry in the definition choices
pub const EMPTY_CHOICE_LABEL: &str = "---------";

/// One entry of the definition choice list; an empty `id` means "none"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionChoice {
    pub id: String,
    pub label: String,
}

impl DefinitionChoice {
    pub fn empty() -> Self {
        Self {
            id: String::new(),
            label: EMPTY_CHOICE_LABEL.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// Snapshot of the editor
#[derive(Debug, Clone)]
pub struct EditorState {
    pub steps: Vec<FormStep>,
    /// Definition lookup by identifier, shared between snapshots
    pub definitions: Arc<HashMap<String, Arc<FormDefinition>>>,
    /// Choice list in the order the definitions were loaded
    pub definition_choices: Arc<Vec<DefinitionChoice>>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            definitions: Arc::new(HashMap::new()),
            definition_choices: Arc::new(vec![DefinitionChoice::empty()]),
        }
    }
}

impl EditorState {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in presentation order, paired with their storage index
    pub fn indexed_steps_by_order(&self) -> Vec<(usize, &FormStep)> {
        let mut indexed: Vec<_> = self.steps.iter().enumerate().collect();
        indexed.sort_by_key(|(_, step)| step.order);
        indexed
    }

    /// Copy of the steps sorted by `order`
    pub fn steps_by_order(&self) -> Vec<FormStep> {
        self.indexed_steps_by_order()
            .into_iter()
            .map(|(_, step)| step.clone())
            .collect()
    }

    /// Whether the `order` values are exactly `0..len`, each used once
    pub fn is_order_contiguous(&self) -> bool {
        let mut orders: Vec<usize> = self.steps.iter().map(|s| s.order).collect();
        orders.sort_unstable();
        orders.iter().enumerate().all(|(i, order)| i == *order)
    }
}

/// A discrete request to change the editor state
#[derive(Debug, Clone)]
pub enum Intent {
    /// Replace the steps wholesale, as fetched; no renumbering
    Load { steps: Vec<FormStep> },
    /// Replace the definition lookup and rebuild the choice list
    LoadDefinitions { definitions: Vec<FormDefinition> },
    /// Append an empty step at the end
    AddStep,
    /// Remove the step stored at `index`
    DeleteStep { index: usize },
    /// Point the step at `index` to another definition; `None` or `""` clears it
    ChangeStepDefinition {
        index: usize,
        definition_id: Option<String>,
    },
    /// Exchange `order` between the steps stored at `index` and `index - 1`
    MoveStepUp { index: usize },
}

impl Intent {
    /// Moving a step down is moving its successor up
    pub fn move_step_down(index: usize) -> Self {
        Self::MoveStepUp {
            index: index.saturating_add(1),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Load { .. } => "Load",
            Self::LoadDefinitions { .. } => "LoadDefinitions",
            Self::AddStep => "AddStep",
            Self::DeleteStep { .. } => "DeleteStep",
            Self::ChangeStepDefinition { .. } => "ChangeStepDefinition",
            Self::MoveStepUp { .. } => "MoveStepUp",
        }
    }

    /// Whether applying this intent is a user edit worth keeping for undo
    pub fn is_edit(&self) -> bool {
        !matches!(self, Self::Load { .. } | Self::LoadDefinitions { .. })
    }
}

/// Apply `intent` to `state`, producing the next snapshot.
///
/// Out-of-range indices leave the snapshot unchanged.
pub fn reduce(state: &EditorState, intent: Intent) -> EditorState {
    match intent {
        Intent::Load { steps } => EditorState {
            steps,
            ..state.clone()
        },
        Intent::LoadDefinitions { definitions } => load_definitions(state, definitions),
        Intent::AddStep => {
            let steps = state
                .steps
                .iter()
                .cloned()
                .chain(std::iter::once(FormStep::placeholder(state.steps.len())))
                .collect();
            EditorState {
                steps,
                ..state.clone()
            }
        }
        Intent::DeleteStep { index } => delete_step(state, index),
        Intent::ChangeStepDefinition {
            index,
            definition_id,
        } => change_step_definition(state, index, definition_id.as_deref()),
        Intent::MoveStepUp { index } => move_step_up(state, index),
    }
}

fn load_definitions(state: &EditorState, definitions: Vec<FormDefinition>) -> EditorState {
    let definitions: Vec<Arc<FormDefinition>> = definitions.into_iter().map(Arc::new).collect();

    let choices = std::iter::once(DefinitionChoice::empty())
        .chain(definitions.iter().map(|d| DefinitionChoice {
            id: d.uuid.clone(),
            label: d.name.clone(),
        }))
        .collect();

    let lookup = definitions
        .into_iter()
        .map(|d| (d.uuid.clone(), d))
        .collect();

    EditorState {
        steps: state.steps.clone(),
        definitions: Arc::new(lookup),
        definition_choices: Arc::new(choices),
    }
}

fn delete_step(state: &EditorState, index: usize) -> EditorState {
    let Some(removed) = state.steps.get(index) else {
        return state.clone();
    };
    let removed_order = removed.order;

    // Everything that came after the removed step moves one slot forward
    let steps = state
        .steps
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, step)| {
            if step.order > removed_order {
                FormStep {
                    order: step.order - 1,
                    ..step.clone()
                }
            } else {
                step.clone()
            }
        })
        .collect();

    EditorState {
        steps,
        ..state.clone()
    }
}

fn change_step_definition(
    state: &EditorState,
    index: usize,
    definition_id: Option<&str>,
) -> EditorState {
    if index >= state.steps.len() {
        return state.clone();
    }

    let definition = definition_id
        .filter(|id| !id.is_empty())
        .and_then(|id| state.definitions.get(id))
        .map(|d| StepDefinition::Definition(Arc::clone(d)))
        .unwrap_or_default();

    let steps = state
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            if i == index {
                FormStep {
                    form_definition: definition.clone(),
                    order: step.order,
                }
            } else {
                step.clone()
            }
        })
        .collect();

    EditorState {
        steps,
        ..state.clone()
    }
}

fn move_step_up(state: &EditorState, index: usize) -> EditorState {
    if index == 0 || index >= state.steps.len() {
        return state.clone();
    }

    let upper_order = state.steps[index - 1].order;
    let lower_order = state.steps[index].order;

    let steps = state
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| match i {
            i if i == index - 1 => FormStep {
                order: lower_order,
                ..step.clone()
            },
            i if i == index => FormStep {
                order: upper_order,
                ..step.clone()
            },
            _ => step.clone(),
        })
        .collect();

    EditorState {
        steps,
        ..state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn definition(uuid: &str, name: &str) -> FormDefinition {
        FormDefinition {
            uuid: uuid.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            login_required: false,
            configuration: json!({"components": []}),
        }
    }

    fn loaded_definitions() -> EditorState {
        reduce(
            &EditorState::default(),
            Intent::LoadDefinitions {
                definitions: vec![
                    definition("fd-1", "Personal details"),
                    definition("fd-2", "Address"),
                    definition("fd-3", "Summary"),
                ],
            },
        )
    }

    fn with_steps(count: usize) -> EditorState {
        let base = loaded_definitions();
        let ids = ["fd-1", "fd-2", "fd-3"];
        let steps = (0..count)
            .map(|order| {
                let id = ids[order % ids.len()];
                FormStep::with_definition(Arc::clone(&base.definitions[id]), order)
            })
            .collect();
        reduce(&base, Intent::Load { steps })
    }

    fn orders(state: &EditorState) -> Vec<usize> {
        state.steps.iter().map(|s| s.order).collect()
    }

    #[test]
    fn test_default_has_only_empty_choice() {
        let state = EditorState::default();
        assert!(state.is_empty());
        assert_eq!(*state.definition_choices, vec![DefinitionChoice::empty()]);
    }

    #[test]
    fn test_load_replaces_steps_without_renumbering() {
        let state = EditorState::default();
        let steps = vec![FormStep::placeholder(1), FormStep::placeholder(0)];
        let next = reduce(&state, Intent::Load { steps });
        assert_eq!(orders(&next), vec![1, 0]);
    }

    #[test]
    fn test_load_definitions_builds_choices_in_input_order() {
        let state = loaded_definitions();
        let labels: Vec<_> = state
            .definition_choices
            .iter()
            .map(|c| (c.id.as_str(), c.label.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("", EMPTY_CHOICE_LABEL),
                ("fd-1", "Personal details"),
                ("fd-2", "Address"),
                ("fd-3", "Summary"),
            ]
        );
        assert_eq!(state.definitions.len(), 3);
    }

    #[test]
    fn test_load_definitions_keeps_steps() {
        let state = with_steps(2);
        let next = reduce(
            &state,
            Intent::LoadDefinitions {
                definitions: vec![definition("fd-9", "Other")],
            },
        );
        assert_eq!(next.steps, state.steps);
        assert_eq!(next.definition_choices.len(), 2);
    }

    #[test]
    fn test_add_step_appends_placeholder() {
        let state = with_steps(3);
        let next = reduce(&state, Intent::AddStep);

        assert_eq!(next.len(), 4);
        assert_eq!(next.steps[3].order, 3);
        assert!(next.steps[3].form_definition.is_empty());
        // Previous snapshot untouched
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_add_step_to_empty_collection() {
        let next = reduce(&EditorState::default(), Intent::AddStep);
        assert_eq!(next.steps, vec![FormStep::placeholder(0)]);
    }

    #[test]
    fn test_delete_step_renumbers_successors() {
        let state = with_steps(4);
        let next = reduce(&state, Intent::DeleteStep { index: 1 });

        assert_eq!(orders(&next), vec![0, 1, 2]);
        // Successors keep their definitions
        assert_eq!(next.steps[1].form_definition.uuid(), Some("fd-3"));
        assert_eq!(next.steps[2].form_definition.uuid(), Some("fd-1"));
    }

    #[test]
    fn test_delete_only_step_yields_empty_collection() {
        let state = with_steps(1);
        let next = reduce(&state, Intent::DeleteStep { index: 0 });
        assert!(next.is_empty());
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let state = with_steps(2);
        let next = reduce(&state, Intent::DeleteStep { index: 2 });
        assert_eq!(next.steps, state.steps);
    }

    #[test]
    fn test_delete_after_move_keeps_orders_contiguous() {
        let state = with_steps(3);
        let moved = reduce(&state, Intent::MoveStepUp { index: 2 });
        assert_eq!(orders(&moved), vec![0, 2, 1]);

        let next = reduce(&moved, Intent::DeleteStep { index: 1 });
        assert_eq!(orders(&next), vec![0, 1]);
        assert!(next.is_order_contiguous());
    }

    #[test]
    fn test_change_definition_uses_lookup_entry() {
        let state = with_steps(2);
        let next = reduce(
            &state,
            Intent::ChangeStepDefinition {
                index: 0,
                definition_id: Some("fd-3".to_string()),
            },
        );

        assert!(next.steps[0]
            .form_definition
            .is_same(&state.definitions["fd-3"]));
        assert_eq!(next.steps[0].order, 0);
        assert_eq!(next.steps[1], state.steps[1]);
    }

    #[test]
    fn test_change_definition_with_falsy_id_clears() {
        let state = with_steps(2);
        for definition_id in [None, Some(String::new())] {
            let next = reduce(
                &state,
                Intent::ChangeStepDefinition {
                    index: 1,
                    definition_id,
                },
            );
            assert!(next.steps[1].form_definition.is_empty());
            assert_eq!(next.steps[1].order, 1);
        }
    }

    #[test]
    fn test_change_definition_with_unknown_id_clears() {
        let state = with_steps(1);
        let next = reduce(
            &state,
            Intent::ChangeStepDefinition {
                index: 0,
                definition_id: Some("missing".to_string()),
            },
        );
        assert!(next.steps[0].form_definition.is_empty());
    }

    #[test]
    fn test_change_definition_out_of_range_is_noop() {
        let state = with_steps(1);
        let next = reduce(
            &state,
            Intent::ChangeStepDefinition {
                index: 5,
                definition_id: Some("fd-2".to_string()),
            },
        );
        assert_eq!(next.steps, state.steps);
    }

    #[test]
    fn test_move_step_up_swaps_orders_only() {
        let state = with_steps(3);
        let next = reduce(&state, Intent::MoveStepUp { index: 2 });

        assert_eq!(orders(&next), vec![0, 2, 1]);
        // Storage positions keep their definitions
        assert_eq!(next.steps[1].form_definition.uuid(), Some("fd-2"));
        assert_eq!(next.steps[2].form_definition.uuid(), Some("fd-3"));
        assert_eq!(next.steps[0], state.steps[0]);
    }

    #[test]
    fn test_move_step_up_bounds_are_noops() {
        let state = with_steps(3);
        assert_eq!(reduce(&state, Intent::MoveStepUp { index: 0 }).steps, state.steps);
        assert_eq!(reduce(&state, Intent::MoveStepUp { index: 3 }).steps, state.steps);
    }

    #[test]
    fn test_move_step_down_is_move_up_of_successor() {
        let state = with_steps(3);
        let down = reduce(&state, Intent::move_step_down(0));
        let up = reduce(&state, Intent::MoveStepUp { index: 1 });
        assert_eq!(down.steps, up.steps);
        assert_eq!(orders(&down), vec![1, 0, 2]);
    }

    #[test]
    fn test_move_step_down_at_index_max_is_noop() {
        let state = with_steps(3);
        let next = reduce(&state, Intent::move_step_down(usize::MAX));
        assert_eq!(next.steps, state.steps);
    }

    #[test]
    fn test_steps_by_order_follows_order_field() {
        let state = reduce(&with_steps(3), Intent::MoveStepUp { index: 2 });
        let names: Vec<_> = state
            .steps_by_order()
            .iter()
            .map(|s| s.form_definition.name().unwrap_or_default().to_string())
            .collect();
        assert_eq!(names, vec!["Personal details", "Summary", "Address"]);

        let indices: Vec<_> = state
            .indexed_steps_by_order()
            .iter()
            .map(|(i, _)| *i)
            .collect();
        assert_eq!(indices, vec![0, 2, 1]);
    }

    #[test]
    fn test_snapshots_share_definition_lookup() {
        let state = with_steps(2);
        let next = reduce(&state, Intent::AddStep);
        assert!(Arc::ptr_eq(&state.definitions, &next.definitions));
    }

    #[test]
    fn test_load_then_serialize_round_trips_identity() {
        let state = with_steps(3);
        let value = serde_json::to_value(&state.steps).unwrap();
        let reloaded: Vec<FormStep> = serde_json::from_value(value).unwrap();
        let next = reduce(&EditorState::default(), Intent::Load { steps: reloaded });

        let pairs = |s: &EditorState| -> Vec<(Option<String>, usize)> {
            s.steps
                .iter()
                .map(|step| (step.form_definition.uuid().map(str::to_string), step.order))
                .collect()
        };
        assert_eq!(pairs(&next), pairs(&state));
    }

    #[test]
    fn test_intent_names() {
        assert_eq!(Intent::AddStep.name(), "AddStep");
        assert_eq!(Intent::DeleteStep { index: 0 }.name(), "DeleteStep");
        assert!(Intent::AddStep.is_edit());
        assert!(!Intent::Load { steps: vec![] }.is_edit());
    }

    #[derive(Debug, Clone)]
    enum Edit {
        Add,
        Delete(usize),
        MoveUp(usize),
        Change(usize, u8),
    }

    prop_compose! {
        fn arbitrary_edit()(kind in 0..4u8, index in 0..8usize, def in 0..4u8) -> Edit {
            match kind {
                0 => Edit::Add,
                1 => Edit::Delete(index),
                2 => Edit::MoveUp(index),
                _ => Edit::Change(index, def),
            }
        }
    }

    proptest! {
        #[test]
        fn orders_stay_contiguous(
            initial in 0..5usize,
            edits in prop::collection::vec(arbitrary_edit(), 0..40)
        ) {
            let mut state = with_steps(initial);
            for edit in edits {
                let len = state.len().max(1);
                let intent = match edit {
                    Edit::Add => Intent::AddStep,
                    Edit::Delete(i) => Intent::DeleteStep { index: i % len },
                    Edit::MoveUp(i) => Intent::MoveStepUp { index: i },
                    Edit::Change(i, d) => Intent::ChangeStepDefinition {
                        index: i % len,
                        definition_id: match d {
                            0 => None,
                            n => Some(format!("fd-{n}")),
                        },
                    },
                };
                state = reduce(&state, intent);
                prop_assert!(state.is_order_contiguous());
            }
        }

        #[test]
        fn reduce_never_mutates_previous_snapshot(
            initial in 1..5usize,
            edit in arbitrary_edit()
        ) {
            let state = with_steps(initial);
            let before = state.steps.clone();
            let intent = match edit {
                Edit::Add => Intent::AddStep,
                Edit::Delete(i) => Intent::DeleteStep { index: i },
                Edit::MoveUp(i) => Intent::MoveStepUp { index: i },
                Edit::Change(i, _) => Intent::ChangeStepDefinition { index: i, definition_id: None },
            };
            let _next = reduce(&state, intent);
            prop_assert_eq!(state.steps, before);
        }
    }
}
