//! Declarative structural schemas for component payloads.
//!
//! Each component type owns exactly one [`Schema`]. A schema pins the `type`
//! discriminator to its literal, declares fields with their [`FieldKind`],
//! fills defaults for absent optional fields, applies light coercions (see
//! [`coerce`]) and assigns stable ids to un-keyed list items.
//!
//! Validation never stops at the first problem: every field failure is
//! collected into a [`FieldError`] with a dotted path, and the payload is either
//! returned fully normalized or rejected as a whole.

pub mod catalog;
pub mod coerce;

use serde_json::{Map, Value};

use crate::error::{FieldError, GenUiError, GenUiResult};

/// Shape of a single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    /// Numbers and numeric-looking strings
    Number,
    Boolean,
    /// One of a fixed set of literals (case-insensitive, normalized)
    Enum(&'static [&'static str]),
    Color,
    List(Box<FieldKind>),
    Object(ObjectShape),
    /// Child component descriptors. A single object is wrapped into a list.
    /// Elements are not checked here: each child's own schema is applied when
    /// the renderer reaches it.
    Components,
    /// Anything at all; the escape hatch for loosely structured payloads
    Any,
}

impl FieldKind {
    pub fn list(item: FieldKind) -> Self {
        FieldKind::List(Box::new(item))
    }

    fn describe(&self) -> String {
        match self {
            FieldKind::String => "a string".to_string(),
            FieldKind::Number => "a number".to_string(),
            FieldKind::Boolean => "a boolean".to_string(),
            FieldKind::Enum(allowed) => format!("one of: {}", allowed.join(", ")),
            FieldKind::Color => "a hex or named color".to_string(),
            FieldKind::List(_) => "an array".to_string(),
            FieldKind::Object(_) => "an object".to_string(),
            FieldKind::Components => "a component or an array of components".to_string(),
            FieldKind::Any => "any value".to_string(),
        }
    }
}

/// A named field of an object.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
}

impl Field {
    pub fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
        }
    }

    pub fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
        }
    }

    pub fn with_default(name: &'static str, kind: FieldKind, default: Value) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: Some(default),
        }
    }
}

/// Fields of an object. Unknown keys are always passed through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectShape {
    pub fields: Vec<Field>,
    /// When set and the object sits in a list, a missing `id` becomes
    /// `"<prefix>-<index>"`.
    pub id_prefix: Option<&'static str>,
}

impl ObjectShape {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            id_prefix: None,
        }
    }

    pub fn keyed(id_prefix: &'static str, fields: Vec<Field>) -> Self {
        Self {
            fields,
            id_prefix: Some(id_prefix),
        }
    }
}

/// The schema of one component type.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub component_type: &'static str,
    pub shape: ObjectShape,
}

impl Schema {
    pub fn new(component_type: &'static str, fields: Vec<Field>) -> Self {
        Self {
            component_type,
            shape: ObjectShape::new(fields),
        }
    }

    /// Check `payload` and return it with defaults filled in and coercions
    /// applied. Running the result through `validate` again yields it unchanged.
    pub fn validate(&self, payload: &Value) -> GenUiResult<Value> {
        let mut errors = Vec::new();

        let Some(object) = payload.as_object() else {
            return Err(self.failure(vec![FieldError::new("", "expected an object")]));
        };

        match object.get("type").and_then(Value::as_str) {
            Some(t) if t == self.component_type => {}
            Some(t) => errors.push(FieldError::new(
                "type",
                format!("expected '{}', got '{}'", self.component_type, t),
            )),
            None => errors.push(FieldError::new("type", "is required")),
        }

        let mut out = check_object(&self.shape, object, "", None, &mut errors);
        check_common(&mut out, &mut errors);

        if errors.is_empty() {
            Ok(Value::Object(out))
        } else {
            Err(self.failure(errors))
        }
    }

    fn failure(&self, errors: Vec<FieldError>) -> GenUiError {
        GenUiError::SchemaValidation {
            component_type: self.component_type.to_string(),
            errors,
        }
    }
}

/// `id` and `className` are shared by every descriptor. `style` stays opaque.
fn check_common(out: &mut Map<String, Value>, errors: &mut Vec<FieldError>) {
    for key in ["id", "className"] {
        if let Some(value) = out.get(key) {
            if value.is_null() {
                out.remove(key);
                continue;
            }
            match coerce::to_string(value) {
                Some(coerced) => {
                    out.insert(key.to_string(), coerced);
                }
                None => errors.push(FieldError::new(key, "expected a string")),
            }
        }
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn check_object(
    shape: &ObjectShape,
    object: &Map<String, Value>,
    path: &str,
    index: Option<usize>,
    errors: &mut Vec<FieldError>,
) -> Map<String, Value> {
    let mut out = object.clone();

    for field in &shape.fields {
        let field_path = join_path(path, field.name);
        match object.get(field.name) {
            // Explicit null is treated as absent
            None | Some(Value::Null) => {
                out.remove(field.name);
                if let Some(default) = &field.default {
                    out.insert(field.name.to_string(), default.clone());
                } else if field.required {
                    errors.push(FieldError::new(field_path, "is required"));
                }
            }
            Some(value) => {
                if let Some(checked) = check_value(&field.kind, value, &field_path, errors) {
                    out.insert(field.name.to_string(), checked);
                }
            }
        }
    }

    if let (Some(prefix), Some(index)) = (shape.id_prefix, index) {
        let has_id = out
            .get("id")
            .map(|id| !id.is_null() && id.as_str() != Some(""))
            .unwrap_or(false);
        if has_id {
            match out.get("id").and_then(coerce::to_string) {
                Some(id) => {
                    out.insert("id".to_string(), id);
                }
                None => errors.push(FieldError::new(join_path(path, "id"), "expected a string")),
            }
        } else {
            out.insert("id".to_string(), Value::String(format!("{}-{}", prefix, index)));
        }
    }

    out
}

/// Give an un-keyed child `<type>-<index>`, or `component-<index>` when its
/// type is unusable. Existing ids are left for the child's own schema.
fn assign_child_id(child: &mut Map<String, Value>, index: usize) {
    let missing = match child.get("id") {
        None | Some(Value::Null) => true,
        Some(Value::String(id)) => id.trim().is_empty(),
        Some(_) => false,
    };
    if !missing {
        return;
    }
    let prefix = child
        .get("type")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("component");
    child.insert("id".to_string(), Value::String(format!("{}-{}", prefix, index)));
}

fn check_value(
    kind: &FieldKind,
    value: &Value,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Value> {
    let coerced = match kind {
        FieldKind::String => coerce::to_string(value),
        FieldKind::Number => coerce::to_number(value),
        FieldKind::Boolean => coerce::to_bool(value),
        FieldKind::Enum(allowed) => coerce::to_enum(value, allowed),
        FieldKind::Color => value
            .as_str()
            .filter(|raw| coerce::is_color(raw))
            .map(|_| value.clone()),
        FieldKind::Any => Some(value.clone()),
        FieldKind::List(item) => {
            let Value::Array(items) = value else {
                errors.push(FieldError::new(path, format!("expected {}", kind.describe())));
                return None;
            };
            let mut out = Vec::with_capacity(items.len());
            for (i, element) in items.iter().enumerate() {
                let element_path = format!("{}[{}]", path, i);
                let checked = match item.as_ref() {
                    FieldKind::Object(shape) => match element.as_object() {
                        Some(object) => {
                            Some(Value::Object(check_object(shape, object, &element_path, Some(i), errors)))
                        }
                        None => {
                            errors.push(FieldError::new(element_path, "expected an object"));
                            None
                        }
                    },
                    other => check_value(other, element, &element_path, errors),
                };
                if let Some(checked) = checked {
                    out.push(checked);
                }
            }
            return Some(Value::Array(out));
        }
        FieldKind::Object(shape) => {
            let Some(object) = value.as_object() else {
                errors.push(FieldError::new(path, "expected an object"));
                return None;
            };
            return Some(Value::Object(check_object(shape, object, path, None, errors)));
        }
        FieldKind::Components => {
            let mut children = match value {
                Value::Array(items) => items.clone(),
                Value::Object(_) => vec![value.clone()],
                _ => {
                    errors.push(FieldError::new(path, format!("expected {}", kind.describe())));
                    return None;
                }
            };
            // Malformed elements are kept: the renderer turns each into its own
            // placeholder so siblings still render.
            for (index, child) in children.iter_mut().enumerate() {
                if let Value::Object(object) = child {
                    assign_child_id(object, index);
                }
            }
            return Some(Value::Array(children));
        }
    };

    if coerced.is_none() {
        let message = match kind {
            FieldKind::Enum(_) | FieldKind::Color => format!(
                "invalid value {}: expected {}",
                value,
                kind.describe()
            ),
            _ => format!("expected {}", kind.describe()),
        };
        errors.push(FieldError::new(path, message));
    }
    coerced
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tabs_schema() -> Schema {
        Schema::new(
            "tabs",
            vec![
                Field::required(
                    "tabs",
                    FieldKind::list(FieldKind::Object(ObjectShape::keyed(
                        "tab",
                        vec![
                            Field::required("label", FieldKind::String),
                            Field::with_default("content", FieldKind::Components, json!([])),
                        ],
                    ))),
                ),
                Field::optional("defaultTab", FieldKind::String),
                Field::with_default("variant", FieldKind::Enum(&["line", "pills"]), json!("line")),
            ],
        )
    }

    #[test]
    fn defaults_and_ids_are_filled() {
        let out = tabs_schema()
            .validate(&json!({
                "type": "tabs",
                "tabs": [{"label": "A"}, {"label": "B", "id": "second", "content": {"type": "text"}}]
            }))
            .unwrap();
        assert_eq!(out["variant"], json!("line"));
        assert_eq!(out["tabs"][0]["id"], json!("tab-0"));
        assert_eq!(out["tabs"][0]["content"], json!([]));
        assert_eq!(out["tabs"][1]["id"], json!("second"));
        assert_eq!(out["tabs"][1]["content"], json!([{"type": "text", "id": "text-0"}]));
    }

    #[test]
    fn unkeyed_children_get_stable_ids() {
        let out = tabs_schema()
            .validate(&json!({
                "type": "tabs",
                "tabs": [{"label": "A", "content": [
                    {"type": "text"},
                    {"type": "chart", "id": "revenue"},
                    {"type": "  ", "id": ""},
                    7
                ]}]
            }))
            .unwrap();
        let content = &out["tabs"][0]["content"];
        assert_eq!(content[0]["id"], json!("text-0"));
        assert_eq!(content[1]["id"], json!("revenue"));
        assert_eq!(content[2]["id"], json!("component-2"));
        assert_eq!(content[3], json!(7));
        assert_eq!(tabs_schema().validate(&out).unwrap(), out);
    }

    #[test]
    fn keyed_item_id_must_be_a_string() {
        let err = tabs_schema()
            .validate(&json!({"type": "tabs", "tabs": [{"label": "A", "id": {"x": 1}}]}))
            .unwrap_err();
        let paths: Vec<_> = err.field_errors().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["tabs[0].id"]);

        let out = tabs_schema()
            .validate(&json!({"type": "tabs", "tabs": [{"label": "A", "id": 3}]}))
            .unwrap();
        assert_eq!(out["tabs"][0]["id"], json!("3"));
    }

    #[test]
    fn every_field_error_is_reported() {
        let err = tabs_schema()
            .validate(&json!({
                "type": "tabs",
                "tabs": [{"content": 5}],
                "variant": "zigzag"
            }))
            .unwrap_err();
        let paths: Vec<_> = err.field_errors().iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"tabs[0].label"));
        assert!(paths.contains(&"tabs[0].content"));
        assert!(paths.contains(&"variant"));
    }

    #[test]
    fn discriminator_is_pinned() {
        let err = tabs_schema()
            .validate(&json!({"type": "card", "tabs": []}))
            .unwrap_err();
        assert_eq!(err.field_errors()[0].path, "type");
    }

    #[test]
    fn unknown_keys_pass_through() {
        let out = tabs_schema()
            .validate(&json!({"type": "tabs", "tabs": [], "style": {"color": "red"}}))
            .unwrap();
        assert_eq!(out["style"], json!({"color": "red"}));
    }

    #[test]
    fn revalidation_is_idempotent() {
        let schema = tabs_schema();
        let once = schema
            .validate(&json!({"type": "tabs", "tabs": [{"label": 2024}], "variant": "PILLS", "id": 7}))
            .unwrap();
        let twice = schema.validate(&once).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once["tabs"][0]["label"], json!("2024"));
        assert_eq!(once["id"], json!("7"));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = tabs_schema().validate(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, GenUiError::SchemaValidation { .. }));
    }
}
