use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::{bool_or, display_value, items, opt_f64, opt_str, str_or, Widget};
use crate::error::RenderError;
use crate::resolver::ComponentRenderer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextView {
    pub content: String,
    pub variant: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageView {
    pub src: String,
    pub alt: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub title: Option<String>,
    pub items: Vec<String>,
    pub ordered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeView {
    pub label: String,
    pub variant: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertView {
    pub title: Option<String>,
    pub message: String,
    pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    pub value: f64,
    pub max: f64,
    /// 0 to 100, clamped
    pub percent: f64,
    pub label: Option<String>,
}

pub struct TextRenderer;

impl ComponentRenderer for TextRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        Ok(Widget::Text(TextView {
            content: str_or(props, "content", ""),
            variant: str_or(props, "variant", "body"),
        }))
    }
}

pub struct ImageRenderer;

const ALLOWED_IMAGE_SCHEMES: &[&str] = &["http://", "https://", "data:image/", "/", "./"];

impl ComponentRenderer for ImageRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        let src = str_or(props, "src", "");
        let lowered = src.trim().to_ascii_lowercase();
        if !ALLOWED_IMAGE_SCHEMES.iter().any(|s| lowered.starts_with(s)) {
            return Err(RenderError::InvalidProp {
                prop: "src".to_string(),
                reason: format!("'{}' is not an http(s), data:image or relative URL", src),
            });
        }
        Ok(Widget::Image(ImageView {
            src,
            alt: str_or(props, "alt", ""),
            caption: opt_str(props, "caption"),
        }))
    }
}

pub struct ListRenderer;

impl ComponentRenderer for ListRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        let items = items(props, "items")
            .iter()
            .map(|item| {
                ["label", "title", "text"]
                    .iter()
                    .find_map(|key| opt_str(item, key))
                    .unwrap_or_else(|| display_value(item))
            })
            .collect();
        Ok(Widget::List(ListView {
            title: opt_str(props, "title"),
            items,
            ordered: bool_or(props, "ordered", false),
        }))
    }
}

pub struct BadgeRenderer;

impl ComponentRenderer for BadgeRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        Ok(Widget::Badge(BadgeView {
            label: str_or(props, "label", ""),
            variant: str_or(props, "variant", "default"),
        }))
    }
}

pub struct AlertRenderer;

impl ComponentRenderer for AlertRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        Ok(Widget::Alert(AlertView {
            title: opt_str(props, "title"),
            message: str_or(props, "message", ""),
            severity: str_or(props, "severity", "info"),
        }))
    }
}

pub struct ProgressRenderer;

impl ComponentRenderer for ProgressRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        let value = opt_f64(props, "value").unwrap_or(0.0);
        let max = opt_f64(props, "max").unwrap_or(100.0);
        if max <= 0.0 {
            return Err(RenderError::InvalidProp {
                prop: "max".to_string(),
                reason: format!("must be positive, got {}", max),
            });
        }
        let percent = (value / max * 100.0).clamp(0.0, 100.0);
        Ok(Widget::Progress(ProgressView {
            value,
            max,
            percent,
            label: opt_str(props, "label"),
        }))
    }
}

pub fn text() -> Arc<dyn ComponentRenderer> {
    Arc::new(TextRenderer)
}

pub fn image() -> Arc<dyn ComponentRenderer> {
    Arc::new(ImageRenderer)
}

pub fn list() -> Arc<dyn ComponentRenderer> {
    Arc::new(ListRenderer)
}

pub fn badge() -> Arc<dyn ComponentRenderer> {
    Arc::new(BadgeRenderer)
}

pub fn alert() -> Arc<dyn ComponentRenderer> {
    Arc::new(AlertRenderer)
}

pub fn progress() -> Arc<dyn ComponentRenderer> {
    Arc::new(ProgressRenderer)
}
