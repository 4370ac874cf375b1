//! Data widgets: chart, table and metric.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::{display_value, humanize, items, opt_f64, opt_str, str_or, Widget};
use crate::error::RenderError;
use crate::resolver::ComponentRenderer;

/// Series colors used when the payload gives none.
const PALETTE: &[&str] = &[
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4", "#ec4899", "#84cc16",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesView {
    pub key: String,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub chart_type: String,
    pub title: Option<String>,
    pub x_key: Option<String>,
    pub series: Vec<SeriesView>,
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub title: Option<String>,
    pub columns: Vec<ColumnView>,
    pub rows: Vec<Vec<String>>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricView {
    pub label: String,
    pub value: String,
    pub change: Option<f64>,
    pub trend: Option<String>,
    pub unit: Option<String>,
}

// ─── Chart ──────────────────────────────────────────────────────────────────

pub struct ChartRenderer;

fn rows_as_objects(data: &[Value]) -> Result<Vec<&Map<String, Value>>, RenderError> {
    data.iter()
        .enumerate()
        .map(|(i, row)| {
            row.as_object().ok_or_else(|| RenderError::InvalidProp {
                prop: format!("data[{}]", i),
                reason: "chart data points must be objects".to_string(),
            })
        })
        .collect()
}

impl ComponentRenderer for ChartRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        let data = items(props, "data");
        let rows = rows_as_objects(data)?;
        let chart_type = str_or(props, "chartType", "bar");

        // Without an explicit xKey, the first string-valued key of the first row
        // labels the axis.
        let x_key = opt_str(props, "xKey").or_else(|| {
            rows.first().and_then(|row| {
                row.iter()
                    .find(|(_, v)| v.is_string())
                    .map(|(k, _)| k.clone())
            })
        });

        let y_keys: Vec<String> = match props.get("yKeys").and_then(Value::as_array) {
            Some(keys) => keys.iter().filter_map(Value::as_str).map(str::to_string).collect(),
            None => rows
                .first()
                .map(|row| {
                    row.iter()
                        .filter(|(k, v)| v.is_number() && Some(*k) != x_key.as_ref())
                        .map(|(k, _)| k.clone())
                        .collect()
                })
                .unwrap_or_default(),
        };

        if !rows.is_empty() {
            if let Some(missing) = y_keys
                .iter()
                .find(|key| rows.iter().all(|row| !row.contains_key(key.as_str())))
            {
                return Err(RenderError::InvalidProp {
                    prop: "yKeys".to_string(),
                    reason: format!("series '{}' does not appear in any data point", missing),
                });
            }
        }

        let colors: Vec<String> = items(props, "colors")
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();

        let series = y_keys
            .into_iter()
            .enumerate()
            .map(|(i, key)| SeriesView {
                label: humanize(&key),
                color: colors
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| PALETTE[i % PALETTE.len()].to_string()),
                key,
            })
            .collect();

        Ok(Widget::Chart(ChartView {
            chart_type,
            title: opt_str(props, "title"),
            x_key,
            series,
            data: data.to_vec(),
        }))
    }
}

// ─── Table ──────────────────────────────────────────────────────────────────

pub struct TableRenderer;

/// Columns may be plain header strings or `{key, label}` / `{key, header}` objects.
fn column_view(column: &Value) -> ColumnView {
    match column {
        Value::Object(_) => {
            let key = opt_str(column, "key")
                .or_else(|| opt_str(column, "accessor"))
                .or_else(|| opt_str(column, "label"))
                .unwrap_or_default();
            let label = opt_str(column, "label")
                .or_else(|| opt_str(column, "header"))
                .unwrap_or_else(|| humanize(&key));
            ColumnView { key, label }
        }
        other => {
            let label = display_value(other);
            ColumnView {
                key: label.clone(),
                label,
            }
        }
    }
}

fn row_cells(row: &Value, columns: &[ColumnView]) -> Vec<String> {
    match row {
        Value::Array(cells) => (0..columns.len())
            .map(|i| cells.get(i).map(display_value).unwrap_or_default())
            .collect(),
        Value::Object(map) => columns
            .iter()
            .map(|c| {
                map.get(&c.key)
                    .or_else(|| map.get(&c.label))
                    .map(display_value)
                    .unwrap_or_default()
            })
            .collect(),
        scalar => {
            let mut cells = vec![String::new(); columns.len()];
            if let Some(first) = cells.first_mut() {
                *first = display_value(scalar);
            }
            cells
        }
    }
}

impl ComponentRenderer for TableRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        let columns: Vec<ColumnView> = items(props, "columns").iter().map(column_view).collect();
        if columns.is_empty() {
            return Err(RenderError::MissingData("table declares no columns".to_string()));
        }
        let rows = items(props, "rows")
            .iter()
            .map(|row| row_cells(row, &columns))
            .collect();
        let page_size = opt_f64(props, "pageSize")
            .filter(|n| *n >= 1.0)
            .map(|n| n as usize);

        Ok(Widget::Table(TableView {
            title: opt_str(props, "title"),
            columns,
            rows,
            page_size,
        }))
    }
}

// ─── Metric ─────────────────────────────────────────────────────────────────

pub struct MetricRenderer;

impl ComponentRenderer for MetricRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        let change = opt_f64(props, "change");
        let trend = opt_str(props, "trend").or_else(|| {
            change.map(|c| {
                if c > 0.0 {
                    "up".to_string()
                } else if c < 0.0 {
                    "down".to_string()
                } else {
                    "neutral".to_string()
                }
            })
        });
        Ok(Widget::Metric(MetricView {
            label: str_or(props, "label", ""),
            value: props.get("value").map(display_value).unwrap_or_default(),
            change,
            trend,
            unit: opt_str(props, "unit"),
        }))
    }
}

pub fn chart() -> Arc<dyn ComponentRenderer> {
    Arc::new(ChartRenderer)
}

pub fn table() -> Arc<dyn ComponentRenderer> {
    Arc::new(TableRenderer)
}

pub fn metric() -> Arc<dyn ComponentRenderer> {
    Arc::new(MetricRenderer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chart_infers_axes() {
        let Widget::Chart(view) = ChartRenderer
            .render(&json!({
                "chartType": "line",
                "data": [{"month": "Jan", "revenue": 10, "cost": 4}]
            }))
            .unwrap()
        else {
            panic!("Expected chart widget");
        };
        assert_eq!(view.x_key.as_deref(), Some("month"));
        let keys: Vec<_> = view.series.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["cost", "revenue"]);
        assert_eq!(view.series[0].color, PALETTE[0]);
    }

    #[test]
    fn chart_rejects_unknown_series() {
        let result = ChartRenderer.render(&json!({
            "data": [{"month": "Jan", "revenue": 10}],
            "yKeys": ["profit"]
        }));
        assert!(matches!(result, Err(RenderError::InvalidProp { .. })));
    }

    #[test]
    fn chart_rejects_scalar_points() {
        assert!(ChartRenderer.render(&json!({"data": [1, 2, 3]})).is_err());
    }

    #[test]
    fn empty_chart_renders() {
        assert!(ChartRenderer.render(&json!({"data": []})).is_ok());
    }

    #[test]
    fn table_rows_follow_columns() {
        let Widget::Table(view) = TableRenderer
            .render(&json!({
                "columns": ["Name", {"key": "qty", "label": "Quantity"}],
                "rows": [["Apple", 3, "extra"], {"Name": "Pear", "qty": 5}, ["Fig"]]
            }))
            .unwrap()
        else {
            panic!("Expected table widget");
        };
        assert_eq!(view.rows[0], vec!["Apple", "3"]);
        assert_eq!(view.rows[1], vec!["Pear", "5"]);
        assert_eq!(view.rows[2], vec!["Fig", ""]);
    }

    #[test]
    fn table_without_columns_fails() {
        assert!(TableRenderer.render(&json!({"columns": [], "rows": []})).is_err());
    }

    #[test]
    fn metric_trend_from_change() {
        let Widget::Metric(view) = MetricRenderer
            .render(&json!({"label": "Churn", "value": 3.2, "change": -0.4}))
            .unwrap()
        else {
            panic!("Expected metric widget");
        };
        assert_eq!(view.trend.as_deref(), Some("down"));
        assert_eq!(view.value, "3.2");
    }
}
