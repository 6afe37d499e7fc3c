//! Row actions injected into cell transforms.
//!
//! Pages hand the table an [`ActionSet`] instead of closing over their own
//! handlers. Transforms turn it into [`Node::Button`]s carrying an
//! [`ActionBinding`]; the caller later routes a triggered binding to its
//! [`ActionHandler`]. The renderer itself never invokes a handler.

use std::fmt;

use caredesk_model::{DEFAULT_ID_FIELD, Record, RecordId};
use serde::{Deserialize, Serialize};

use crate::node::Node;

/// What a row action does. Unknown names become [`ActionKind::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    View,
    Edit,
    Delete,
    Verify,
    Custom(String),
}

impl ActionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::View => "view",
            ActionKind::Edit => "edit",
            ActionKind::Delete => "delete",
            ActionKind::Verify => "verify",
            ActionKind::Custom(name) => name,
        }
    }

    /// Button label used when an action has none configured.
    pub fn default_label(&self) -> String {
        match self {
            ActionKind::View => "View".to_string(),
            ActionKind::Edit => "Edit".to_string(),
            ActionKind::Delete => "Delete".to_string(),
            ActionKind::Verify => "Verify".to_string(),
            ActionKind::Custom(name) => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

impl From<String> for ActionKind {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "view" => ActionKind::View,
            "edit" => ActionKind::Edit,
            "delete" => ActionKind::Delete,
            "verify" => ActionKind::Verify,
            _ => ActionKind::Custom(value.trim().to_string()),
        }
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self { kind, label: None }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.kind.default_label())
    }
}

/// A triggered or triggerable action for one row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBinding {
    pub kind: ActionKind,
    /// `None` when the record carries no identifier; such bindings are inert.
    pub record_id: Option<RecordId>,
    pub row_index: usize,
}

/// Caller-owned behaviour behind row actions.
///
/// Re-rendering re-emits the same bindings, so a handler may see the same
/// binding more than once and must tolerate that.
pub trait ActionHandler {
    fn on_action(&self, kind: &ActionKind, record_id: &RecordId);
}

/// The actions offered on every row of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionSet {
    id_field: Option<String>,
    items: Vec<Action>,
}

impl ActionSet {
    pub const fn empty() -> Self {
        Self {
            id_field: None,
            items: Vec::new(),
        }
    }

    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            id_field: None,
            items: actions.into_iter().collect(),
        }
    }

    /// Read record identifiers from `field` instead of `id`.
    #[must_use]
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.items.push(action);
        self
    }

    pub fn id_field(&self) -> &str {
        self.id_field.as_deref().unwrap_or(DEFAULT_ID_FIELD)
    }

    pub fn actions(&self) -> &[Action] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, kind: &ActionKind) -> bool {
        self.items.iter().any(|action| &action.kind == kind)
    }

    /// Buttons for one row, in configured order.
    pub fn bind(&self, record: &Record, row_index: usize) -> Vec<Node> {
        let record_id = record.id(self.id_field());
        self.items
            .iter()
            .map(|action| Node::Button {
                label: action.label(),
                binding: ActionBinding {
                    kind: action.kind.clone(),
                    record_id: record_id.clone(),
                    row_index,
                },
                disabled: record_id.is_none(),
            })
            .collect()
    }

    /// Route a binding to `handler`.
    ///
    /// Returns `false` without calling the handler when the binding has no
    /// record id or names an action this set does not offer.
    pub fn dispatch(&self, binding: &ActionBinding, handler: &dyn ActionHandler) -> bool {
        let Some(record_id) = binding.record_id.as_ref() else {
            return false;
        };
        if !self.contains(&binding.kind) {
            return false;
        }
        handler.on_action(&binding.kind, record_id);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(String, String)>>,
    }

    impl ActionHandler for Recorder {
        fn on_action(&self, kind: &ActionKind, record_id: &RecordId) {
            self.calls
                .borrow_mut()
                .push((kind.to_string(), record_id.to_string()));
        }
    }

    fn crud() -> ActionSet {
        ActionSet::new([
            Action::new(ActionKind::View),
            Action::new(ActionKind::Edit),
            Action::new(ActionKind::Delete).with_label("Remove"),
        ])
    }

    #[test]
    fn kind_parses_known_and_custom_names() {
        assert_eq!(ActionKind::from("VIEW".to_string()), ActionKind::View);
        assert_eq!(ActionKind::from(" verify ".to_string()), ActionKind::Verify);
        assert_eq!(
            ActionKind::from("archive".to_string()),
            ActionKind::Custom("archive".to_string())
        );
    }

    #[test]
    fn custom_kind_label_is_capitalized() {
        assert_eq!(
            ActionKind::Custom("archive".to_string()).default_label(),
            "Archive"
        );
    }

    #[test]
    fn bind_emits_one_button_per_action() {
        let record = Record::new(json!({"id": 42}));
        let buttons = crud().bind(&record, 3);

        assert_eq!(buttons.len(), 3);
        let Node::Button {
            label,
            binding,
            disabled,
        } = &buttons[2]
        else {
            panic!("expected button, got {:?}", buttons[2]);
        };
        assert_eq!(label, "Remove");
        assert_eq!(binding.kind, ActionKind::Delete);
        assert_eq!(binding.record_id, Some(RecordId::new("42")));
        assert_eq!(binding.row_index, 3);
        assert!(!disabled);
    }

    #[test]
    fn bind_without_identifier_disables_buttons() {
        let record = Record::new(json!({"name": "Ann"}));
        let buttons = crud().bind(&record, 0);
        assert!(
            buttons
                .iter()
                .all(|node| matches!(node, Node::Button { disabled: true, .. }))
        );
    }

    #[test]
    fn bind_reads_configured_id_field() {
        let actions = crud().with_id_field("providerId");
        let record = Record::new(json!({"id": 1, "providerId": "PR-9"}));
        let Node::Button { binding, .. } = &actions.bind(&record, 0)[0] else {
            panic!("expected button");
        };
        assert_eq!(binding.record_id, Some(RecordId::new("PR-9")));
    }

    #[test]
    fn dispatch_routes_to_handler_repeatedly() {
        let actions = crud();
        let recorder = Recorder::default();
        let binding = ActionBinding {
            kind: ActionKind::Edit,
            record_id: Some(RecordId::new("5")),
            row_index: 0,
        };

        assert!(actions.dispatch(&binding, &recorder));
        assert!(actions.dispatch(&binding, &recorder));
        assert_eq!(
            recorder.calls.borrow().as_slice(),
            &[
                ("edit".to_string(), "5".to_string()),
                ("edit".to_string(), "5".to_string())
            ]
        );
    }

    #[test]
    fn dispatch_ignores_inert_and_unknown_bindings() {
        let actions = crud();
        let recorder = Recorder::default();

        let no_id = ActionBinding {
            kind: ActionKind::View,
            record_id: None,
            row_index: 0,
        };
        let not_offered = ActionBinding {
            kind: ActionKind::Verify,
            record_id: Some(RecordId::new("5")),
            row_index: 0,
        };

        assert!(!actions.dispatch(&no_id, &recorder));
        assert!(!actions.dispatch(&not_offered, &recorder));
        assert!(recorder.calls.borrow().is_empty());
    }

    #[test]
    fn deserializes_from_config() {
        let actions: ActionSet = serde_json::from_value(json!({
            "idField": "patientId",
            "items": [{"kind": "view"}, {"kind": "verify", "label": "Approve"}]
        }))
        .unwrap();
        assert_eq!(actions.id_field(), "patientId");
        assert_eq!(actions.actions()[1].label(), "Approve");
        assert!(actions.contains(&ActionKind::Verify));
    }
}
