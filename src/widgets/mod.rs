//! Built-in renderers and the widget view models they produce.
//!
//! A widget is the paint-ready description of one node: the display layer
//! turns it into DOM or terminal output. Children are not part of the widget;
//! the tree renderer attaches them separately.

pub mod containers;
pub mod data;
pub mod display;
pub mod generic;
pub mod input;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resolver::RendererFactory;

pub use containers::{AccordionView, CardView, GridView, SectionView, StepsView, TabsView};
pub use data::{ChartView, ColumnView, MetricView, SeriesView, TableView};
pub use display::{AlertView, BadgeView, ImageView, ListView, ProgressView, TextView};
pub use generic::{GenericView, PropertyView};
pub use input::{ButtonView, FormFieldView, FormView, OptionView};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "camelCase")]
pub enum Widget {
    Card(CardView),
    Section(SectionView),
    Grid(GridView),
    Tabs(TabsView),
    Accordion(AccordionView),
    Steps(StepsView),
    Form(FormView),
    Button(ButtonView),
    Text(TextView),
    Image(ImageView),
    List(ListView),
    Badge(BadgeView),
    Alert(AlertView),
    Progress(ProgressView),
    Chart(ChartView),
    Table(TableView),
    Metric(MetricView),
    Generic(GenericView),
}

const BUILTIN_RENDERERS: &[(&str, RendererFactory)] = &[
    ("card", containers::card),
    ("section", containers::section),
    ("grid", containers::grid),
    ("tabs", containers::tabs),
    ("accordion", containers::accordion),
    ("steps", containers::steps),
    ("form", input::form),
    ("button", input::button),
    ("text", display::text),
    ("image", display::image),
    ("list", display::list),
    ("badge", display::badge),
    ("alert", display::alert),
    ("progress", display::progress),
    ("chart", data::chart),
    ("table", data::table),
    ("metric", data::metric),
];

/// Renderer key and factory for every bespoke built-in renderer.
pub fn builtin_renderers() -> &'static [(&'static str, RendererFactory)] {
    BUILTIN_RENDERERS
}

// ─── Prop helpers ───────────────────────────────────────────────────────────

pub(crate) fn opt_str(props: &Value, key: &str) -> Option<String> {
    props.get(key).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn str_or(props: &Value, key: &str, default: &str) -> String {
    opt_str(props, key).unwrap_or_else(|| default.to_string())
}

pub(crate) fn bool_or(props: &Value, key: &str, default: bool) -> bool {
    props.get(key).and_then(Value::as_bool).unwrap_or(default)
}

pub(crate) fn opt_f64(props: &Value, key: &str) -> Option<f64> {
    props.get(key).and_then(Value::as_f64)
}

pub(crate) fn items<'a>(props: &'a Value, key: &str) -> &'a [Value] {
    props
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Human-readable form of any JSON value.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// `firstName` / `first_name` to `First name`.
pub(crate) fn humanize(name: &str) -> String {
    let mut words = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch == '_' || ch == '-' {
            words.push(' ');
        } else if ch.is_uppercase() && i > 0 {
            words.push(' ');
            words.extend(ch.to_lowercase());
        } else if i == 0 {
            words.extend(ch.to_uppercase());
        } else {
            words.push(ch);
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn humanize_names() {
        assert_eq!(humanize("firstName"), "First name");
        assert_eq!(humanize("zip_code"), "Zip code");
        assert_eq!(humanize("email"), "Email");
    }

    #[test]
    fn display_values() {
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!("a")), "a");
        assert_eq!(display_value(&json!(1.5)), "1.5");
        assert_eq!(display_value(&json!([1])), "[1]");
    }

    #[test]
    fn widgets_serialize_with_tag() {
        let widget = Widget::Badge(BadgeView {
            label: "New".to_string(),
            variant: "info".to_string(),
        });
        let value = serde_json::to_value(&widget).unwrap();
        assert_eq!(value, json!({"widget": "badge", "label": "New", "variant": "info"}));
    }
}
