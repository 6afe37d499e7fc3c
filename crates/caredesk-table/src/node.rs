//! Markup produced for table cells.

use serde::Serialize;
use serde_json::Value;

use crate::actions::ActionBinding;

/// Visual tone of a badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
        }
    }
}

/// A rendered fragment emitted by a cell transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    #[default]
    Empty,
    Text {
        text: String,
    },
    /// A scalar passed through without formatting (e.g. a computed number).
    Value {
        value: Value,
    },
    Badge {
        text: String,
        tone: Tone,
    },
    /// An interactive control bound to a caller-owned action.
    Button {
        label: String,
        binding: ActionBinding,
        disabled: bool,
    },
    Group {
        children: Vec<Node>,
    },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Node::Value {
            value: value.into(),
        }
    }

    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        Node::Badge {
            text: text.into(),
            tone,
        }
    }

    pub fn group(children: Vec<Node>) -> Self {
        Node::Group { children }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Node::Empty => true,
            Node::Group { children } => children.iter().all(Node::is_empty),
            _ => false,
        }
    }

    /// Flatten to display text for plain-text outputs.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Empty => String::new(),
            Node::Text { text } | Node::Badge { text, .. } => text.clone(),
            Node::Value { value } => value_text(value),
            Node::Button { label, .. } => format!("[{label}]"),
            Node::Group { children } => children
                .iter()
                .map(Node::plain_text)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// The resolved content of one body cell.
///
/// `Value` is the raw field value, untouched; `None` means the field was
/// absent. `Node` is the output of the column's transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum CellContent {
    Value(Option<Value>),
    Node(Node),
}

impl CellContent {
    pub fn plain_text(&self) -> String {
        match self {
            CellContent::Value(Some(value)) => value_text(value),
            CellContent::Value(None) => String::new(),
            CellContent::Node(node) => node.plain_text(),
        }
    }
}

/// Display text for a JSON value. Strings are unquoted and `null` is blank.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn value_text_formats_scalars() {
        assert_eq!(value_text(&json!("Ann")), "Ann");
        assert_eq!(value_text(&json!(24)), "24");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&Value::Null), "");
        assert_eq!(value_text(&json!(["a"])), r#"["a"]"#);
    }

    #[test]
    fn group_plain_text_skips_empty_children() {
        let node = Node::group(vec![Node::text("Ann"), Node::Empty, Node::text("Lee")]);
        assert_eq!(node.plain_text(), "Ann Lee");
    }

    #[test]
    fn empty_group_is_empty() {
        assert!(Node::group(vec![Node::Empty]).is_empty());
        assert!(!Node::text("").is_empty());
    }

    #[test]
    fn missing_cell_value_is_blank() {
        assert_eq!(CellContent::Value(None).plain_text(), "");
    }
}
