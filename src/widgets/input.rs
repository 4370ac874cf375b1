use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::{bool_or, display_value, humanize, items, opt_str, str_or, Widget};
use crate::error::RenderError;
use crate::resolver::ComponentRenderer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFieldView {
    pub id: String,
    pub name: String,
    pub label: String,
    pub field_type: String,
    pub required: bool,
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<FormFieldView>,
    pub submit_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonView {
    pub label: String,
    pub variant: String,
    pub action: Option<String>,
    pub disabled: bool,
}

/// Options may be plain strings or `{label, value}` objects.
fn option_view(option: &Value) -> OptionView {
    match option {
        Value::Object(_) => {
            let value = option.get("value").map(display_value).unwrap_or_default();
            let label = opt_str(option, "label").unwrap_or_else(|| value.clone());
            OptionView { label, value }
        }
        other => {
            let text = display_value(other);
            OptionView {
                label: text.clone(),
                value: text,
            }
        }
    }
}

pub struct FormRenderer;

impl ComponentRenderer for FormRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        let mut fields = Vec::new();
        for (i, field) in items(props, "fields").iter().enumerate() {
            let name = str_or(field, "name", "");
            let field_type = str_or(field, "fieldType", "text");
            let options: Vec<OptionView> = items(field, "options").iter().map(option_view).collect();

            if matches!(field_type.as_str(), "select" | "radio") && options.is_empty() {
                return Err(RenderError::InvalidProp {
                    prop: format!("fields[{}].options", i),
                    reason: format!("{} field '{}' has no options", field_type, name),
                });
            }

            fields.push(FormFieldView {
                id: opt_str(field, "id").unwrap_or_else(|| format!("field-{}", i)),
                label: opt_str(field, "label").unwrap_or_else(|| humanize(&name)),
                name,
                field_type,
                required: bool_or(field, "required", false),
                placeholder: opt_str(field, "placeholder"),
                options,
            });
        }

        Ok(Widget::Form(FormView {
            title: opt_str(props, "title"),
            description: opt_str(props, "description"),
            fields,
            submit_label: str_or(props, "submitLabel", "Submit"),
        }))
    }
}

pub struct ButtonRenderer;

impl ComponentRenderer for ButtonRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        Ok(Widget::Button(ButtonView {
            label: str_or(props, "label", ""),
            variant: str_or(props, "variant", "primary"),
            action: opt_str(props, "action"),
            disabled: bool_or(props, "disabled", false),
        }))
    }
}

pub fn form() -> Arc<dyn ComponentRenderer> {
    Arc::new(FormRenderer)
}

pub fn button() -> Arc<dyn ComponentRenderer> {
    Arc::new(ButtonRenderer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn labels_fall_back_to_humanized_names() {
        let widget = FormRenderer
            .render(&json!({
                "fields": [{"id": "field-0", "name": "firstName", "fieldType": "text"}],
                "submitLabel": "Go"
            }))
            .unwrap();
        let Widget::Form(form) = widget else {
            panic!("Expected form widget");
        };
        assert_eq!(form.fields[0].label, "First name");
        assert_eq!(form.submit_label, "Go");
    }

    #[test]
    fn select_without_options_fails() {
        let result = FormRenderer.render(&json!({
            "fields": [{"name": "plan", "fieldType": "select"}]
        }));
        assert!(matches!(result, Err(RenderError::InvalidProp { .. })));
    }

    #[test]
    fn mixed_option_shapes() {
        let widget = FormRenderer
            .render(&json!({
                "fields": [{"name": "plan", "fieldType": "radio",
                            "options": ["Free", {"label": "Pro", "value": "pro"}, 3]}]
            }))
            .unwrap();
        let Widget::Form(form) = widget else {
            panic!("Expected form widget");
        };
        let values: Vec<_> = form.fields[0].options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Free", "pro", "3"]);
    }
}
