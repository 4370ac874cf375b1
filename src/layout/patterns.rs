//! Static catalog of named layout patterns.
//!
//! A pattern is selected per render, never mutated. Templates use CSS
//! `grid-template-areas` syntax; an empty template means auto-flow placement.

use serde::Serialize;

use super::context::{Intent, LayoutContext, ScreenSize};

/// Area given to components no mapping or heuristic can place.
pub const AUTO_AREA: &str = "auto";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPattern {
    pub name: &'static str,
    pub description: &'static str,
    /// Template rows, each a list of areas sharing the row. Empty for auto-flow.
    pub rows: &'static [&'static [&'static str]],
    /// Component type to grid area
    pub areas: &'static [(&'static str, &'static str)],
    /// Buckets where the pattern needs more columns than the count table gives
    pub min_columns: &'static [(ScreenSize, usize)],
    pub spacing: &'static str,
    pub container_class: &'static str,
    pub fallback_area: &'static str,
}

impl LayoutPattern {
    pub fn area_for(&self, component_type: &str) -> Option<&'static str> {
        self.areas
            .iter()
            .find(|(t, _)| *t == component_type)
            .map(|(_, area)| *area)
    }

    pub fn min_columns(&self, screen: ScreenSize) -> usize {
        self.min_columns
            .iter()
            .find(|(s, _)| *s == screen)
            .map(|(_, columns)| *columns)
            .unwrap_or(1)
    }

    pub fn has_template(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Distinct area names used by the template, in order.
    pub fn template_areas(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        for area in self.rows.iter().flat_map(|row| row.iter()) {
            if !names.contains(area) {
                names.push(*area);
            }
        }
        names
    }

    pub fn defines_area(&self, area: &str) -> bool {
        self.rows.iter().any(|row| row.contains(&area))
    }

    /// `grid-template-areas` value for a grid `columns` wide.
    ///
    /// A row's areas split the columns left to right, earlier areas taking the
    /// remainder. A row with more areas than columns stacks one area per row.
    /// Auto-flow patterns yield an empty string.
    pub fn template(&self, columns: usize) -> String {
        let columns = columns.max(1);
        let mut lines = Vec::new();
        for row in self.rows {
            if row.len() > columns {
                lines.extend(row.iter().map(|area| template_row(&vec![*area; columns])));
                continue;
            }
            let mut cells = Vec::with_capacity(columns);
            for (i, area) in row.iter().enumerate() {
                let span = columns / row.len() + usize::from(i < columns % row.len());
                cells.extend(std::iter::repeat(*area).take(span));
            }
            lines.push(template_row(&cells));
        }
        lines.join(" ")
    }
}

fn template_row(cells: &[&str]) -> String {
    format!("\"{}\"", cells.join(" "))
}

/// Distinct area names in a `grid-template-areas` string, in order.
pub fn area_names(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    for name in template
        .split(|c: char| c == '"' || c.is_whitespace())
        .filter(|s| !s.is_empty() && *s != ".")
    {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

const DASHBOARD_AREAS: &[(&str, &str)] = &[
    ("text", "title"),
    ("card", "metrics"),
    ("metric", "metrics"),
    ("chart", "charts"),
    ("table", "table"),
];

const DASHBOARD_ROWS: &[&[&str]] = &[&["title"], &["metrics"], &["charts", "table"]];

pub const SINGLE: LayoutPattern = LayoutPattern {
    name: "single",
    description: "One component, full bleed",
    rows: &[&["main"]],
    areas: &[],
    min_columns: &[],
    spacing: "gap-4",
    container_class: "grid w-full",
    fallback_area: "main",
};

/// Three columns on desktop even for a three-component group.
pub const DASHBOARD_METRICS: LayoutPattern = LayoutPattern {
    name: "dashboard-metrics",
    description: "Metric cards across the top, charts and table below",
    rows: DASHBOARD_ROWS,
    areas: DASHBOARD_AREAS,
    min_columns: &[(ScreenSize::Desktop, 3), (ScreenSize::Large, 3)],
    spacing: "gap-6",
    container_class: "grid w-full",
    fallback_area: AUTO_AREA,
};

pub const PORTFOLIO_ANALYTICS: LayoutPattern = LayoutPattern {
    name: "portfolio-analytics",
    description: "Summary cards, wide charts and a holdings table",
    rows: DASHBOARD_ROWS,
    areas: DASHBOARD_AREAS,
    min_columns: &[],
    spacing: "gap-6",
    container_class: "grid w-full",
    fallback_area: AUTO_AREA,
};

pub const ANALYTICS_SPLIT: LayoutPattern = LayoutPattern {
    name: "analytics-split",
    description: "Chart beside its table",
    rows: &[&["title"], &["charts", "table"]],
    areas: &[("text", "title"), ("chart", "charts"), ("table", "table")],
    min_columns: &[],
    spacing: "gap-6",
    container_class: "grid w-full",
    fallback_area: AUTO_AREA,
};

pub const FORM_SINGLE_COLUMN: LayoutPattern = LayoutPattern {
    name: "form-single-column",
    description: "One form with its heading, stacked",
    rows: &[&["title"], &["form"]],
    areas: &[("text", "title"), ("form", "form")],
    min_columns: &[],
    spacing: "gap-4",
    container_class: "grid w-full max-w-2xl mx-auto",
    fallback_area: AUTO_AREA,
};

pub const FORM_TWO_COLUMN: LayoutPattern = LayoutPattern {
    name: "form-two-column",
    description: "Two forms side by side",
    rows: &[],
    areas: &[("form", "form")],
    min_columns: &[],
    spacing: "gap-6",
    container_class: "grid w-full",
    fallback_area: AUTO_AREA,
};

pub const DATA_TABLE_FOCUSED: LayoutPattern = LayoutPattern {
    name: "data-table-focused",
    description: "Tables at full width with supporting details below",
    rows: &[&["title"], &["table"], &["details"]],
    areas: &[
        ("text", "title"),
        ("table", "table"),
        ("metric", "details"),
        ("card", "details"),
    ],
    min_columns: &[],
    spacing: "gap-4",
    container_class: "grid w-full",
    fallback_area: AUTO_AREA,
};

/// Auto-flow placement sized purely by the count table.
pub const GRID_RESPONSIVE: LayoutPattern = LayoutPattern {
    name: "grid-responsive",
    description: "Auto-flow grid sized by component count",
    rows: &[],
    areas: &[],
    min_columns: &[],
    spacing: "gap-4",
    container_class: "grid w-full",
    fallback_area: AUTO_AREA,
};

pub const ALL_PATTERNS: &[LayoutPattern] = &[
    SINGLE,
    DASHBOARD_METRICS,
    PORTFOLIO_ANALYTICS,
    ANALYTICS_SPLIT,
    FORM_SINGLE_COLUMN,
    FORM_TWO_COLUMN,
    DATA_TABLE_FOCUSED,
    GRID_RESPONSIVE,
];

pub fn by_name(name: &str) -> Option<&'static LayoutPattern> {
    ALL_PATTERNS.iter().find(|p| p.name == name)
}

/// Pick the pattern for a sibling group. Pure: same context, same pattern.
pub fn select(ctx: &LayoutContext, form_count: usize) -> &'static LayoutPattern {
    if ctx.count <= 1 {
        return &SINGLE;
    }
    match ctx.intent {
        Intent::Dashboard | Intent::Analytics
            if ctx.has_card && ctx.has_chart && ctx.has_table && ctx.count >= 4 =>
        {
            &PORTFOLIO_ANALYTICS
        }
        Intent::Dashboard => &DASHBOARD_METRICS,
        Intent::Analytics => &ANALYTICS_SPLIT,
        Intent::Form if form_count >= 2 => &FORM_TWO_COLUMN,
        Intent::Form => &FORM_SINGLE_COLUMN,
        Intent::Data => &DATA_TABLE_FOCUSED,
        Intent::Generic => &GRID_RESPONSIVE,
    }
}
