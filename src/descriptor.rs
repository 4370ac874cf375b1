use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GenUiError, GenUiResult};

/// Where children may live on a descriptor.
///
/// `components` holds children directly; the other slots are lists of objects
/// whose `content` field holds the children of that item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub field: &'static str,
    pub item_content: Option<&'static str>,
}

pub const CHILD_SLOTS: &[SlotSpec] = &[
    SlotSpec {
        field: "components",
        item_content: None,
    },
    SlotSpec {
        field: "tabs",
        item_content: Some("content"),
    },
    SlotSpec {
        field: "steps",
        item_content: Some("content"),
    },
    SlotSpec {
        field: "sections",
        item_content: Some("content"),
    },
];

/// Address of one group of children, e.g. `components` or `tabs[1].content`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotPath {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl SlotPath {
    pub fn direct(field: &str) -> Self {
        Self {
            field: field.to_string(),
            index: None,
            content: None,
        }
    }

    pub fn item(field: &str, index: usize, content: &str) -> Self {
        Self {
            field: field.to_string(),
            index: Some(index),
            content: Some(content.to_string()),
        }
    }
}

impl std::fmt::Display for SlotPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.index, &self.content) {
            (Some(i), Some(content)) => write!(f, "{}[{}].{}", self.field, i, content),
            _ => write!(f, "{}", self.field),
        }
    }
}

/// One group of sibling children.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildSlot<'a> {
    pub path: SlotPath,
    pub children: Vec<&'a Value>,
}

impl ChildSlot<'_> {
    /// Declared `type` of every child, with `""` for children that lack one.
    pub fn child_types(&self) -> Vec<String> {
        self.children
            .iter()
            .map(|child| {
                child
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }
}

/// Collect the named child slots of a payload in declaration order.
///
/// A slot value that is a single object counts as a one-element list. Slots
/// that are absent or hold no children are skipped.
pub fn child_slots(payload: &Map<String, Value>) -> Vec<ChildSlot<'_>> {
    let mut slots = Vec::new();
    for spec in CHILD_SLOTS {
        let Some(value) = payload.get(spec.field) else {
            continue;
        };
        match spec.item_content {
            None => {
                let children = as_children(value);
                if !children.is_empty() {
                    slots.push(ChildSlot {
                        path: SlotPath::direct(spec.field),
                        children,
                    });
                }
            }
            Some(content) => {
                let Some(items) = value.as_array() else {
                    continue;
                };
                for (index, item) in items.iter().enumerate() {
                    let children = item.get(content).map(as_children).unwrap_or_default();
                    if !children.is_empty() {
                        slots.push(ChildSlot {
                            path: SlotPath::item(spec.field, index, content),
                            children,
                        });
                    }
                }
            }
        }
    }
    slots
}

fn as_children(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        _ => Vec::new(),
    }
}

/// An immutable snapshot of one generated component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ComponentDescriptor {
    fields: Map<String, Value>,
}

impl ComponentDescriptor {
    /// Wrap a JSON value. Fails unless it is an object with a non-empty `type`.
    pub fn from_value(value: Value) -> GenUiResult<Self> {
        let Value::Object(fields) = value else {
            return Err(GenUiError::EmptyOrMalformedTree {
                reason: "component descriptor must be a JSON object".to_string(),
            });
        };
        match fields.get("type") {
            Some(Value::String(t)) if !t.trim().is_empty() => Ok(Self { fields }),
            Some(_) => Err(GenUiError::EmptyOrMalformedTree {
                reason: "'type' must be a non-empty string".to_string(),
            }),
            None => Err(GenUiError::EmptyOrMalformedTree {
                reason: "missing 'type' field".to_string(),
            }),
        }
    }

    pub fn parse(json: &str) -> GenUiResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn component_type(&self) -> &str {
        self.fields
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    pub fn class_name(&self) -> Option<&str> {
        self.fields.get("className").and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn child_slots(&self) -> Vec<ChildSlot<'_>> {
        child_slots(&self.fields)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl TryFrom<Value> for ComponentDescriptor {
    type Error = GenUiError;

    fn try_from(value: Value) -> GenUiResult<Self> {
        Self::from_value(value)
    }
}

impl From<ComponentDescriptor> for Value {
    fn from(descriptor: ComponentDescriptor) -> Self {
        Value::Object(descriptor.fields)
    }
}
