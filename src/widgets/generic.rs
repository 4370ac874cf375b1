//! Catch-all renderer for types without a bespoke implementation.
//!
//! Shows the type name and the scalar top-level properties as key/value pairs,
//! so an unsupported component still degrades to something inspectable.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::{display_value, Widget};
use crate::error::RenderError;
use crate::resolver::ComponentRenderer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyView {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericView {
    pub component_type: String,
    pub properties: Vec<PropertyView>,
    pub notice: String,
}

pub struct GenericRenderer;

impl ComponentRenderer for GenericRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        let component_type = props
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        let properties = props
            .as_object()
            .map(|fields| {
                fields
                    .iter()
                    .filter(|(key, value)| {
                        key.as_str() != "type"
                            && matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
                    })
                    .map(|(key, value)| PropertyView {
                        key: key.clone(),
                        value: display_value(value),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Widget::Generic(GenericView {
            notice: format!("No specific renderer for '{}'", component_type),
            component_type,
            properties,
        }))
    }
}

pub fn factory() -> Arc<dyn ComponentRenderer> {
    Arc::new(GenericRenderer)
}
