//! Lookup tables for column counts, heuristic areas and utility classes.

use super::context::{ComponentKind, ScreenSize};
use super::patterns::LayoutPattern;

/// Column count for a bucket and a component count.
///
/// | screen          | count ≤ 1 | ≤ 3 | ≤ 6 | more |
/// |-----------------|-----------|-----|-----|------|
/// | mobile          | 1         | 1   | 1   | 1    |
/// | tablet          | 1         | 2   | 2   | 2    |
/// | desktop / large | 1         | 2   | 3   | 4    |
pub fn responsive_columns(screen: ScreenSize, count: usize) -> usize {
    match screen {
        ScreenSize::Mobile => 1,
        ScreenSize::Tablet => {
            if count <= 1 {
                1
            } else {
                2
            }
        }
        ScreenSize::Desktop | ScreenSize::Large => match count {
            0..=1 => 1,
            2..=3 => 2,
            4..=6 => 3,
            _ => 4,
        },
    }
}

/// Preferred areas per kind, most specific first.
const AREA_HEURISTICS: &[(ComponentKind, &[&str])] = &[
    (ComponentKind::Chart, &["charts", "chart"]),
    (ComponentKind::Table, &["table"]),
    (ComponentKind::Form, &["form", "main"]),
    (ComponentKind::Card, &["metrics", "auto"]),
    (ComponentKind::Text, &["title"]),
];

/// Area for a component the pattern does not map explicitly.
///
/// Templated patterns only hand out areas their template defines and use the
/// pattern's fallback otherwise. Auto-flow patterns take the first heuristic
/// candidate, or a per-index area for kinds without one.
pub fn heuristic_area(pattern: &LayoutPattern, kind: ComponentKind, index: usize) -> String {
    let candidates = AREA_HEURISTICS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, areas)| *areas)
        .unwrap_or_default();

    if pattern.has_template() {
        return candidates
            .iter()
            .find(|area| pattern.defines_area(area))
            .map(|area| area.to_string())
            .unwrap_or_else(|| pattern.fallback_area.to_string());
    }

    candidates
        .first()
        .map(|area| area.to_string())
        .unwrap_or_else(|| format!("item-{}", index))
}

/// Minimum-height floor per kind so content keeps a usable size.
fn min_height(kind: ComponentKind) -> Option<&'static str> {
    match kind {
        ComponentKind::Table => Some("min-h-[320px]"),
        ComponentKind::Chart => Some("min-h-[300px]"),
        ComponentKind::Form => Some("min-h-[200px]"),
        ComponentKind::Card => Some("min-h-[120px]"),
        ComponentKind::Text | ComponentKind::Other => None,
    }
}

/// Per-item classes. `columns` is the desktop column count of the container.
pub fn item_classes(kind: ComponentKind, columns: usize, auto_flow: bool, single: bool) -> String {
    let mut classes = vec!["min-w-0"];

    if single {
        classes.push("col-span-full");
        classes.push("w-full");
    } else if auto_flow && columns > 1 {
        match kind {
            ComponentKind::Table | ComponentKind::Text => classes.push("col-span-full"),
            ComponentKind::Chart if columns >= 3 => classes.push("lg:col-span-2"),
            _ => {}
        }
    }

    if let Some(floor) = min_height(kind) {
        classes.push(floor);
    }
    if kind == ComponentKind::Table {
        classes.push("overflow-x-auto");
    }

    classes.join(" ")
}

/// Container classes: pattern base, spacing, then mobile-first column classes.
///
/// A bucket whose column count equals the previous bucket's emits nothing.
pub fn container_classes(pattern: &LayoutPattern, columns: &[(ScreenSize, usize)]) -> String {
    let mut classes: Vec<String> = pattern
        .container_class
        .split_whitespace()
        .map(str::to_string)
        .collect();
    classes.push(pattern.spacing.to_string());

    let mut previous = None;
    for (screen, count) in columns {
        if previous != Some(*count) {
            classes.push(format!("{}grid-cols-{}", screen.class_prefix(), count));
            previous = Some(*count);
        }
    }

    classes.join(" ")
}
