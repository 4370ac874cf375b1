//! Layout engine.
//!
//! Turns the component types of a sibling group into a grid pattern, a
//! component-to-area assignment and responsive utility classes. Everything
//! here is a pure function of the type list and the screen bucket.

pub mod classes;
pub mod context;
pub mod css;
pub mod patterns;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use context::{ComponentKind, Intent, LayoutContext, ScreenSize};
pub use patterns::LayoutPattern;

/// Where one sibling goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPlacement {
    /// Position in the original sibling list
    pub index: usize,
    pub component_type: String,
    pub area: String,
    pub class_name: String,
}

/// Grid shape for one screen bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveOverride {
    pub screen: ScreenSize,
    /// `None` for the mobile-first base
    pub min_width: Option<String>,
    pub columns: usize,
    /// Empty for auto-flow patterns
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutAssignment {
    pub pattern: String,
    pub intent: Intent,
    pub screen: ScreenSize,
    /// Column count at `screen`
    pub columns: usize,
    /// Template at `screen`, empty for auto-flow
    pub grid_template: String,
    pub container_class: String,
    /// One entry per input type, in input order
    pub items: Vec<ItemPlacement>,
    /// One entry per screen bucket, mobile first
    pub responsive: Vec<ResponsiveOverride>,
}

impl LayoutAssignment {
    /// Sibling indices per area, areas in first-use order.
    pub fn groups(&self) -> IndexMap<&str, Vec<usize>> {
        let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
        for item in &self.items {
            groups.entry(item.area.as_str()).or_default().push(item.index);
        }
        groups
    }

    pub fn item(&self, index: usize) -> Option<&ItemPlacement> {
        self.items.get(index)
    }

    pub fn override_for(&self, screen: ScreenSize) -> Option<&ResponsiveOverride> {
        self.responsive.iter().find(|o| o.screen == screen)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutEngine {
    screen: ScreenSize,
}

impl LayoutEngine {
    pub fn new(screen: ScreenSize) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Arrange a sibling group. Total: any type list, including an empty one,
    /// yields a valid assignment.
    pub fn arrange(&self, types: &[String]) -> LayoutAssignment {
        let ctx = LayoutContext::new(types, self.screen);
        let form_count = types
            .iter()
            .filter(|t| ComponentKind::of(t) == ComponentKind::Form)
            .count();
        let pattern = patterns::select(&ctx, form_count);

        let responsive: Vec<ResponsiveOverride> = ScreenSize::ALL
            .iter()
            .map(|&screen| {
                let columns = classes::responsive_columns(screen, ctx.count)
                    .max(pattern.min_columns(screen));
                ResponsiveOverride {
                    screen,
                    min_width: screen.min_width().map(str::to_string),
                    columns,
                    template: pattern.template(columns),
                }
            })
            .collect();

        let current = responsive
            .iter()
            .find(|o| o.screen == self.screen)
            .map(|o| (o.columns, o.template.clone()))
            .unwrap_or((1, String::new()));
        let desktop_columns = responsive
            .iter()
            .find(|o| o.screen == ScreenSize::Desktop)
            .map(|o| o.columns)
            .unwrap_or(1);

        let auto_flow = !pattern.has_template();
        let single = pattern.name == patterns::SINGLE.name;

        let items: Vec<ItemPlacement> = types
            .iter()
            .enumerate()
            .map(|(index, component_type)| {
                let kind = ComponentKind::of(component_type);
                let area = match pattern.area_for(component_type) {
                    Some(area) => area.to_string(),
                    None => classes::heuristic_area(pattern, kind, index),
                };
                ItemPlacement {
                    index,
                    component_type: component_type.clone(),
                    area,
                    class_name: classes::item_classes(kind, desktop_columns, auto_flow, single),
                }
            })
            .collect();

        let column_steps: Vec<(ScreenSize, usize)> =
            responsive.iter().map(|o| (o.screen, o.columns)).collect();
        let container_class = classes::container_classes(pattern, &column_steps);

        debug!(
            pattern = pattern.name,
            intent = ?ctx.intent,
            screen = %self.screen,
            count = ctx.count,
            "Arranged sibling group"
        );

        LayoutAssignment {
            pattern: pattern.name.to_string(),
            intent: ctx.intent,
            screen: self.screen,
            columns: current.0,
            grid_template: current.1,
            container_class,
            items,
            responsive,
        }
    }
}

/// Arrange `types` for `screen` with a throwaway engine.
pub fn arrange(types: &[String], screen: ScreenSize) -> LayoutAssignment {
    LayoutEngine::new(screen).arrange(types)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn dashboard_group() {
        let layout = arrange(&types(&["card", "chart", "table"]), ScreenSize::Desktop);
        assert_eq!(layout.pattern, "dashboard-metrics");
        assert_eq!(layout.intent, Intent::Dashboard);
        assert_eq!(layout.columns, 3);
        let areas: Vec<_> = layout.items.iter().map(|i| i.area.as_str()).collect();
        assert_eq!(areas, vec!["metrics", "charts", "table"]);
        assert!(layout.items[2].class_name.contains("min-h-[320px]"));
    }

    #[test]
    fn portfolio_group() {
        let layout = arrange(
            &types(&["text", "card", "card", "chart", "table"]),
            ScreenSize::Large,
        );
        assert_eq!(layout.pattern, "portfolio-analytics");
        assert_eq!(layout.columns, 3);
        assert_eq!(
            layout.grid_template,
            r#""title title title" "metrics metrics metrics" "charts charts table""#
        );
        assert_eq!(layout.groups()["metrics"], vec![1, 2]);
    }

    #[test]
    fn mobile_is_single_column() {
        let layout = arrange(&types(&["card", "chart", "table"]), ScreenSize::Mobile);
        assert_eq!(layout.columns, 1);
        assert_eq!(layout.grid_template, r#""title" "metrics" "charts" "table""#);
    }

    #[test]
    fn lone_component_spans_everything() {
        let layout = arrange(&types(&["chart"]), ScreenSize::Desktop);
        assert_eq!(layout.pattern, "single");
        assert_eq!(layout.items[0].area, "main");
        assert!(layout.items[0].class_name.contains("col-span-full"));
    }

    #[test]
    fn forms() {
        let layout = arrange(&types(&["text", "form"]), ScreenSize::Desktop);
        assert_eq!(layout.pattern, "form-single-column");
        assert_eq!(layout.items[1].area, "form");

        let layout = arrange(&types(&["form", "form"]), ScreenSize::Desktop);
        assert_eq!(layout.pattern, "form-two-column");
        assert_eq!(layout.columns, 2);
    }

    #[test]
    fn generic_grid_uses_column_table() {
        let layout = arrange(
            &types(&["badge", "image", "list", "alert", "button"]),
            ScreenSize::Desktop,
        );
        assert_eq!(layout.pattern, "grid-responsive");
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.items[3].area, "item-3");
        assert!(layout.container_class.contains("lg:grid-cols-3"));
    }

    #[test]
    fn named_patterns_follow_column_table() {
        let tables = arrange(&types(&["table"; 7]), ScreenSize::Large);
        assert_eq!(tables.pattern, "data-table-focused");
        assert_eq!(tables.columns, 4);

        let pair = arrange(&types(&["table", "table"]), ScreenSize::Desktop);
        assert_eq!(pair.columns, 2);
        assert_eq!(pair.grid_template, r#""title title" "table table" "details details""#);

        let big = arrange(
            &types(&["card", "chart", "table", "card", "chart", "table", "card"]),
            ScreenSize::Desktop,
        );
        assert_eq!(big.pattern, "portfolio-analytics");
        assert_eq!(big.columns, 4);
    }

    #[test]
    fn empty_group() {
        let layout = arrange(&[], ScreenSize::Tablet);
        assert_eq!(layout.pattern, "single");
        assert!(layout.is_empty());
        assert_eq!(layout.columns, 1);
    }

    #[test]
    fn unknown_types_still_placed() {
        let layout = arrange(&types(&["sparkle", "widget"]), ScreenSize::Desktop);
        assert_eq!(layout.items.len(), 2);
        assert!(layout.items.iter().all(|i| !i.area.is_empty()));
    }
}
