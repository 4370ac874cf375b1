use serde::{Deserialize, Serialize};
use std::fmt;

/// Screen-size bucket the layout is computed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenSize {
    Mobile,
    Tablet,
    #[default]
    Desktop,
    Large,
}

impl ScreenSize {
    pub const ALL: [ScreenSize; 4] = [
        ScreenSize::Mobile,
        ScreenSize::Tablet,
        ScreenSize::Desktop,
        ScreenSize::Large,
    ];

    /// Bucket a viewport width in CSS pixels.
    pub fn from_width(px: u32) -> Self {
        match px {
            0..=767 => ScreenSize::Mobile,
            768..=1023 => ScreenSize::Tablet,
            1024..=1279 => ScreenSize::Desktop,
            _ => ScreenSize::Large,
        }
    }

    /// Class prefix that targets this bucket and up (`""` for mobile-first base).
    pub fn class_prefix(&self) -> &'static str {
        match self {
            ScreenSize::Mobile => "",
            ScreenSize::Tablet => "md:",
            ScreenSize::Desktop => "lg:",
            ScreenSize::Large => "xl:",
        }
    }

    pub fn min_width(&self) -> Option<&'static str> {
        match self {
            ScreenSize::Mobile => None,
            ScreenSize::Tablet => Some("48rem"),
            ScreenSize::Desktop => Some("64rem"),
            ScreenSize::Large => Some("80rem"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenSize::Mobile => "mobile",
            ScreenSize::Tablet => "tablet",
            ScreenSize::Desktop => "desktop",
            ScreenSize::Large => "large",
        }
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScreenSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" | "sm" => Ok(ScreenSize::Mobile),
            "tablet" | "md" => Ok(ScreenSize::Tablet),
            "desktop" | "lg" => Ok(ScreenSize::Desktop),
            "large" | "xl" => Ok(ScreenSize::Large),
            other => Err(format!(
                "unknown screen size '{}': expected mobile, tablet, desktop or large",
                other
            )),
        }
    }
}

/// What a group of siblings is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Dashboard,
    Form,
    Analytics,
    Data,
    Generic,
}

/// Coarse role of a component type, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Text,
    Card,
    Chart,
    Table,
    Form,
    Other,
}

impl ComponentKind {
    /// Classify by whole name tokens split on `-`, `_` and spaces, so
    /// `status-badge` is not a card and `platform` is not a form.
    pub fn of(component_type: &str) -> Self {
        let t = component_type.to_ascii_lowercase();
        let tokens: Vec<&str> = t
            .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        let has = |words: &[&str]| tokens.iter().any(|token| words.contains(token));

        let chart_suffix = tokens.iter().any(|token| token.ends_with("chart"));

        if chart_suffix || has(&["graph", "graphs", "charts"]) {
            ComponentKind::Chart
        } else if has(&["table", "tables", "datatable"]) {
            ComponentKind::Table
        } else if has(&["form", "forms"]) {
            ComponentKind::Form
        } else if has(&["card", "cards", "metric", "metrics", "stat", "stats", "kpi"]) {
            ComponentKind::Card
        } else if matches!(t.as_str(), "text" | "heading" | "title" | "markdown") {
            ComponentKind::Text
        } else {
            ComponentKind::Other
        }
    }
}

/// Per-render facts about a sibling group. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutContext {
    pub intent: Intent,
    pub screen: ScreenSize,
    pub count: usize,
    pub has_chart: bool,
    pub has_table: bool,
    pub has_form: bool,
    pub has_card: bool,
    /// Distinct types, ordered text, cards, charts, tables, forms, others
    pub priority: Vec<String>,
}

impl LayoutContext {
    pub fn new(types: &[String], screen: ScreenSize) -> Self {
        let kinds: Vec<ComponentKind> = types.iter().map(|t| ComponentKind::of(t)).collect();
        let tally = |kind| kinds.iter().filter(|k| **k == kind).count();

        let count = types.len();
        let charts = tally(ComponentKind::Chart);
        let tables = tally(ComponentKind::Table);
        let forms = tally(ComponentKind::Form);
        let cards = tally(ComponentKind::Card);

        let has_chart = charts > 0;
        let has_table = tables > 0;
        let has_form = forms > 0;
        let has_card = cards > 0;

        // "Dominates" means at least half of the group.
        let intent = if has_chart && has_card && count >= 3 {
            Intent::Dashboard
        } else if has_form && forms * 2 >= count && count <= 2 {
            Intent::Form
        } else if has_chart && has_table {
            Intent::Analytics
        } else if has_table && tables * 2 >= count && count >= 2 {
            Intent::Data
        } else {
            Intent::Generic
        };

        let mut ranked: Vec<(ComponentKind, &String)> =
            kinds.iter().copied().zip(types.iter()).collect();
        ranked.sort_by_key(|(kind, _)| *kind);
        let mut priority: Vec<String> = Vec::new();
        for (_, t) in ranked {
            if !priority.contains(t) {
                priority.push(t.clone());
            }
        }

        Self {
            intent,
            screen,
            count,
            has_chart,
            has_table,
            has_form,
            has_card,
            priority,
        }
    }
}
