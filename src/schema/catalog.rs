//! Built-in component schemas.

use serde_json::json;

use super::{Field, FieldKind, ObjectShape, Schema};

/// Prefixes for generated ids of tab, section and step items.
pub const TAB_ID_PREFIX: &str = "tab";
pub const SECTION_ID_PREFIX: &str = "section";
pub const STEP_ID_PREFIX: &str = "step";

pub const CHART_TYPES: &[&str] = &["bar", "line", "area", "pie", "donut", "scatter"];
pub const FIELD_TYPES: &[&str] = &[
    "text", "email", "number", "password", "textarea", "select", "checkbox", "radio", "date",
];
pub const BUTTON_VARIANTS: &[&str] = &["primary", "secondary", "outline", "ghost", "danger"];
pub const TEXT_VARIANTS: &[&str] = &["body", "heading", "subheading", "caption", "muted"];
pub const SEVERITIES: &[&str] = &["info", "success", "warning", "error"];
pub const BADGE_VARIANTS: &[&str] = &["default", "success", "warning", "error", "info"];
pub const CARD_VARIANTS: &[&str] = &["default", "outlined", "elevated"];
pub const TRENDS: &[&str] = &["up", "down", "neutral"];

fn card() -> Schema {
    Schema::new(
        "card",
        vec![
            Field::optional("title", FieldKind::String),
            Field::optional("description", FieldKind::String),
            Field::optional("footer", FieldKind::String),
            Field::with_default("variant", FieldKind::Enum(CARD_VARIANTS), json!("default")),
            Field::with_default("components", FieldKind::Components, json!([])),
        ],
    )
}

fn section() -> Schema {
    Schema::new(
        "section",
        vec![
            Field::optional("title", FieldKind::String),
            Field::optional("description", FieldKind::String),
            Field::with_default("collapsible", FieldKind::Boolean, json!(false)),
            Field::with_default("components", FieldKind::Components, json!([])),
        ],
    )
}

fn grid() -> Schema {
    Schema::new(
        "grid",
        vec![
            Field::optional("columns", FieldKind::Number),
            Field::with_default("components", FieldKind::Components, json!([])),
        ],
    )
}

fn tabs() -> Schema {
    Schema::new(
        "tabs",
        vec![
            Field::required(
                "tabs",
                FieldKind::list(FieldKind::Object(ObjectShape::keyed(
                    TAB_ID_PREFIX,
                    vec![
                        Field::required("label", FieldKind::String),
                        Field::with_default("content", FieldKind::Components, json!([])),
                    ],
                ))),
            ),
            Field::optional("defaultTab", FieldKind::String),
        ],
    )
}

fn accordion() -> Schema {
    Schema::new(
        "accordion",
        vec![
            Field::required(
                "sections",
                FieldKind::list(FieldKind::Object(ObjectShape::keyed(
                    SECTION_ID_PREFIX,
                    vec![
                        Field::required("title", FieldKind::String),
                        Field::with_default("content", FieldKind::Components, json!([])),
                    ],
                ))),
            ),
            Field::with_default("allowMultiple", FieldKind::Boolean, json!(false)),
        ],
    )
}

fn steps() -> Schema {
    Schema::new(
        "steps",
        vec![
            Field::required(
                "steps",
                FieldKind::list(FieldKind::Object(ObjectShape::keyed(
                    STEP_ID_PREFIX,
                    vec![
                        Field::required("title", FieldKind::String),
                        Field::optional("description", FieldKind::String),
                        Field::with_default("content", FieldKind::Components, json!([])),
                    ],
                ))),
            ),
            Field::with_default("currentStep", FieldKind::Number, json!(0)),
        ],
    )
}

fn form() -> Schema {
    let option = FieldKind::Any;
    Schema::new(
        "form",
        vec![
            Field::optional("title", FieldKind::String),
            Field::optional("description", FieldKind::String),
            Field::with_default(
                "fields",
                FieldKind::list(FieldKind::Object(ObjectShape::keyed(
                    "field",
                    vec![
                        Field::required("name", FieldKind::String),
                        Field::optional("label", FieldKind::String),
                        Field::with_default("fieldType", FieldKind::Enum(FIELD_TYPES), json!("text")),
                        Field::with_default("required", FieldKind::Boolean, json!(false)),
                        Field::optional("placeholder", FieldKind::String),
                        Field::optional("options", FieldKind::list(option)),
                    ],
                ))),
                json!([]),
            ),
            Field::with_default("submitLabel", FieldKind::String, json!("Submit")),
        ],
    )
}

fn button() -> Schema {
    Schema::new(
        "button",
        vec![
            Field::required("label", FieldKind::String),
            Field::with_default("variant", FieldKind::Enum(BUTTON_VARIANTS), json!("primary")),
            Field::optional("action", FieldKind::String),
            Field::with_default("disabled", FieldKind::Boolean, json!(false)),
        ],
    )
}

fn text() -> Schema {
    Schema::new(
        "text",
        vec![
            Field::required("content", FieldKind::String),
            Field::with_default("variant", FieldKind::Enum(TEXT_VARIANTS), json!("body")),
        ],
    )
}

fn image() -> Schema {
    Schema::new(
        "image",
        vec![
            Field::required("src", FieldKind::String),
            Field::with_default("alt", FieldKind::String, json!("")),
            Field::optional("caption", FieldKind::String),
        ],
    )
}

fn list() -> Schema {
    Schema::new(
        "list",
        vec![
            Field::optional("title", FieldKind::String),
            Field::required("items", FieldKind::list(FieldKind::Any)),
            Field::with_default("ordered", FieldKind::Boolean, json!(false)),
        ],
    )
}

fn badge() -> Schema {
    Schema::new(
        "badge",
        vec![
            Field::required("label", FieldKind::String),
            Field::with_default("variant", FieldKind::Enum(BADGE_VARIANTS), json!("default")),
        ],
    )
}

fn code() -> Schema {
    Schema::new(
        "code",
        vec![
            Field::required("content", FieldKind::String),
            Field::with_default("language", FieldKind::String, json!("text")),
        ],
    )
}

fn timeline() -> Schema {
    Schema::new(
        "timeline",
        vec![
            Field::optional("title", FieldKind::String),
            Field::required(
                "events",
                FieldKind::list(FieldKind::Object(ObjectShape::keyed(
                    "event",
                    vec![
                        Field::required("title", FieldKind::String),
                        Field::optional("date", FieldKind::String),
                        Field::optional("description", FieldKind::String),
                    ],
                ))),
            ),
        ],
    )
}

fn map() -> Schema {
    Schema::new(
        "map",
        vec![
            Field::optional("title", FieldKind::String),
            Field::optional("latitude", FieldKind::Number),
            Field::optional("longitude", FieldKind::Number),
            Field::with_default("zoom", FieldKind::Number, json!(10)),
            Field::with_default("markers", FieldKind::list(FieldKind::Any), json!([])),
        ],
    )
}

fn alert() -> Schema {
    Schema::new(
        "alert",
        vec![
            Field::optional("title", FieldKind::String),
            Field::required("message", FieldKind::String),
            Field::with_default("severity", FieldKind::Enum(SEVERITIES), json!("info")),
        ],
    )
}

fn progress() -> Schema {
    Schema::new(
        "progress",
        vec![
            Field::required("value", FieldKind::Number),
            Field::with_default("max", FieldKind::Number, json!(100)),
            Field::optional("label", FieldKind::String),
        ],
    )
}

fn chart() -> Schema {
    Schema::new(
        "chart",
        vec![
            Field::with_default("chartType", FieldKind::Enum(CHART_TYPES), json!("bar")),
            Field::optional("title", FieldKind::String),
            Field::required("data", FieldKind::list(FieldKind::Any)),
            Field::optional("xKey", FieldKind::String),
            Field::optional("yKeys", FieldKind::list(FieldKind::String)),
            Field::optional("colors", FieldKind::list(FieldKind::Color)),
        ],
    )
}

fn table() -> Schema {
    Schema::new(
        "table",
        vec![
            Field::optional("title", FieldKind::String),
            Field::required("columns", FieldKind::list(FieldKind::Any)),
            Field::with_default("rows", FieldKind::list(FieldKind::Any), json!([])),
            Field::optional("pageSize", FieldKind::Number),
        ],
    )
}

fn metric() -> Schema {
    Schema::new(
        "metric",
        vec![
            Field::required("label", FieldKind::String),
            Field::required("value", FieldKind::Any),
            Field::optional("change", FieldKind::Number),
            Field::optional("trend", FieldKind::Enum(TRENDS)),
            Field::optional("unit", FieldKind::String),
        ],
    )
}

/// Every built-in schema, in catalog order.
pub fn builtin_schemas() -> Vec<Schema> {
    vec![
        card(),
        section(),
        grid(),
        tabs(),
        accordion(),
        form(),
        button(),
        text(),
        image(),
        list(),
        badge(),
        code(),
        timeline(),
        map(),
        alert(),
        progress(),
        chart(),
        table(),
        metric(),
        steps(),
    ]
}
