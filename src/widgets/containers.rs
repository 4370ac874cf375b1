//! Container widgets. Their children are rendered by the tree renderer; these
//! renderers only describe the chrome around them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::{bool_or, items, opt_f64, opt_str, str_or, Widget};
use crate::error::RenderError;
use crate::resolver::ComponentRenderer;
use crate::schema::catalog::{SECTION_ID_PREFIX, STEP_ID_PREFIX, TAB_ID_PREFIX};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub title: Option<String>,
    pub description: Option<String>,
    pub footer: Option<String>,
    pub variant: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub title: Option<String>,
    pub description: Option<String>,
    pub collapsible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridView {
    pub columns: Option<usize>,
}

/// Header of a tab, accordion section or step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelHeader {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabsView {
    pub tabs: Vec<PanelHeader>,
    pub active: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccordionView {
    pub sections: Vec<PanelHeader>,
    pub allow_multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsView {
    pub steps: Vec<PanelHeader>,
    pub current: usize,
}

fn headers(props: &Value, field: &str, id_prefix: &str, title_key: &str) -> Vec<PanelHeader> {
    items(props, field)
        .iter()
        .enumerate()
        .map(|(i, item)| PanelHeader {
            id: opt_str(item, "id").unwrap_or_else(|| format!("{}-{}", id_prefix, i)),
            title: str_or(item, title_key, ""),
            description: opt_str(item, "description"),
        })
        .collect()
}

pub struct CardRenderer;

impl ComponentRenderer for CardRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        Ok(Widget::Card(CardView {
            title: opt_str(props, "title"),
            description: opt_str(props, "description"),
            footer: opt_str(props, "footer"),
            variant: str_or(props, "variant", "default"),
        }))
    }
}

pub struct SectionRenderer;

impl ComponentRenderer for SectionRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        Ok(Widget::Section(SectionView {
            title: opt_str(props, "title"),
            description: opt_str(props, "description"),
            collapsible: bool_or(props, "collapsible", false),
        }))
    }
}

pub struct GridRenderer;

impl ComponentRenderer for GridRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        let columns = match opt_f64(props, "columns") {
            None => None,
            Some(c) if (1.0..=12.0).contains(&c) => Some(c.round() as usize),
            Some(c) => {
                return Err(RenderError::InvalidProp {
                    prop: "columns".to_string(),
                    reason: format!("{} is outside 1 to 12", c),
                })
            }
        };
        Ok(Widget::Grid(GridView { columns }))
    }
}

pub struct TabsRenderer;

impl ComponentRenderer for TabsRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        let tabs = headers(props, "tabs", TAB_ID_PREFIX, "label");
        let first = tabs
            .first()
            .ok_or_else(|| RenderError::MissingData("tabs declares no tabs".to_string()))?;

        // defaultTab may name a tab by id or by label
        let active = opt_str(props, "defaultTab")
            .and_then(|wanted| {
                tabs.iter()
                    .find(|t| t.id == wanted || t.title == wanted)
                    .map(|t| t.id.clone())
            })
            .unwrap_or_else(|| first.id.clone());

        Ok(Widget::Tabs(TabsView { tabs, active }))
    }
}

pub struct AccordionRenderer;

impl ComponentRenderer for AccordionRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        Ok(Widget::Accordion(AccordionView {
            sections: headers(props, "sections", SECTION_ID_PREFIX, "title"),
            allow_multiple: bool_or(props, "allowMultiple", false),
        }))
    }
}

pub struct StepsRenderer;

impl ComponentRenderer for StepsRenderer {
    fn render(&self, props: &Value) -> Result<Widget, RenderError> {
        let steps = headers(props, "steps", STEP_ID_PREFIX, "title");
        if steps.is_empty() {
            return Err(RenderError::MissingData("steps declares no steps".to_string()));
        }
        let requested = opt_f64(props, "currentStep").unwrap_or(0.0).max(0.0) as usize;
        let current = requested.min(steps.len() - 1);
        Ok(Widget::Steps(StepsView { steps, current }))
    }
}

pub fn card() -> Arc<dyn ComponentRenderer> {
    Arc::new(CardRenderer)
}

pub fn section() -> Arc<dyn ComponentRenderer> {
    Arc::new(SectionRenderer)
}

pub fn grid() -> Arc<dyn ComponentRenderer> {
    Arc::new(GridRenderer)
}

pub fn tabs() -> Arc<dyn ComponentRenderer> {
    Arc::new(TabsRenderer)
}

pub fn accordion() -> Arc<dyn ComponentRenderer> {
    Arc::new(AccordionRenderer)
}

pub fn steps() -> Arc<dyn ComponentRenderer> {
    Arc::new(StepsRenderer)
}
