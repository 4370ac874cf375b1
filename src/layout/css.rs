//! Stylesheet emission for a [`LayoutAssignment`].
//!
//! Only the utilities the layout engine itself produces are resolved: grid
//! display, column counts, gaps, column spans, min/max sizing and overflow.
//! Responsive prefixes (`md:`, `lg:`, `xl:`) become `@media (min-width: …)`
//! wrappers. Grid templates are attached to `[data-layout]` and each area to
//! `[data-area]`.

use std::collections::HashSet;

use super::context::ScreenSize;
use super::patterns::area_names;
use super::LayoutAssignment;

/// A single resolved CSS rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
    /// e.g. `@media (min-width: 48rem)`
    pub media_query: Option<String>,
}

impl CssRule {
    fn new(class: &str, props: &[(&str, &str)]) -> Self {
        Self::dynamic(
            class,
            props
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn dynamic(class: &str, declarations: Vec<(String, String)>) -> Self {
        Self {
            selector: format!(".{}", escape_selector(class)),
            declarations,
            media_query: None,
        }
    }

    fn with_compound_selector(selector: String, declarations: Vec<(String, String)>) -> Self {
        Self {
            selector,
            declarations,
            media_query: None,
        }
    }

    fn within(mut self, screen: ScreenSize) -> Self {
        self.media_query = media_query_for(screen);
        self
    }
}

fn media_query_for(screen: ScreenSize) -> Option<String> {
    screen
        .min_width()
        .map(|w| format!("@media (min-width: {})", w))
}

fn escape_selector(class: &str) -> String {
    let mut out = String::with_capacity(class.len() + 4);
    for ch in class.chars() {
        match ch {
            '.' | '/' | '[' | ']' | '(' | ')' | '%' | '#' | ':' | '!' | ',' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Splits `lg:grid-cols-3` into the bucket it targets and the bare utility.
fn split_variant(class: &str) -> (ScreenSize, &str) {
    for screen in [ScreenSize::Tablet, ScreenSize::Desktop, ScreenSize::Large] {
        if let Some(base) = class.strip_prefix(screen.class_prefix()) {
            return (screen, base);
        }
    }
    (ScreenSize::Mobile, class)
}

/// Tailwind spacing scale: one step is 0.25rem.
fn spacing_value(step: &str) -> Option<String> {
    let n: f64 = step.parse().ok()?;
    if n < 0.0 {
        return None;
    }
    if n == 0.0 {
        return Some("0px".to_string());
    }
    Some(format!("{}rem", n * 0.25))
}

fn arbitrary(val: &str) -> Option<String> {
    val.strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .map(|v| v.replace('_', " "))
}

/// Resolve a bare utility (no responsive prefix). `class` is the full name used
/// for the selector.
fn resolve_utility(base: &str, class: &str) -> Option<CssRule> {
    let rule = match base {
        "grid" => CssRule::new(class, &[("display", "grid")]),
        "w-full" => CssRule::new(class, &[("width", "100%")]),
        "min-w-0" => CssRule::new(class, &[("min-width", "0px")]),
        "mx-auto" => CssRule::new(class, &[("margin-left", "auto"), ("margin-right", "auto")]),
        "max-w-2xl" => CssRule::new(class, &[("max-width", "42rem")]),
        "overflow-x-auto" => CssRule::new(class, &[("overflow-x", "auto")]),
        "col-span-full" => CssRule::new(class, &[("grid-column", "1 / -1")]),
        _ => {
            if let Some(val) = base.strip_prefix("grid-cols-") {
                let n: u32 = val.parse().ok()?;
                if !(1..=12).contains(&n) {
                    return None;
                }
                CssRule::dynamic(
                    class,
                    vec![(
                        "grid-template-columns".into(),
                        format!("repeat({}, minmax(0, 1fr))", n),
                    )],
                )
            } else if let Some(val) = base.strip_prefix("col-span-") {
                let n: u32 = val.parse().ok()?;
                CssRule::dynamic(
                    class,
                    vec![("grid-column".into(), format!("span {} / span {}", n, n))],
                )
            } else if let Some(val) = base.strip_prefix("gap-") {
                CssRule::dynamic(class, vec![("gap".into(), spacing_value(val)?)])
            } else if let Some(val) = base.strip_prefix("min-h-") {
                let height = arbitrary(val).or_else(|| spacing_value(val))?;
                CssRule::dynamic(class, vec![("min-height".into(), height)])
            } else {
                return None;
            }
        }
    };
    Some(rule)
}

/// Resolve one class, including its responsive prefix.
pub fn resolve_class(class: &str) -> Option<CssRule> {
    let (screen, base) = split_variant(class);
    resolve_utility(base, class).map(|rule| rule.within(screen))
}

/// Every class used by the container and its items, first appearance wins.
fn layout_classes(layout: &LayoutAssignment) -> Vec<&str> {
    let mut seen = HashSet::new();
    std::iter::once(layout.container_class.as_str())
        .chain(layout.items.iter().map(|i| i.class_name.as_str()))
        .flat_map(str::split_whitespace)
        .filter(|class| seen.insert(*class))
        .collect()
}

fn template_defines(template: &str, area: &str) -> bool {
    area_names(template).contains(&area)
}

/// Grid template and area rules for templated patterns.
fn template_rules(layout: &LayoutAssignment) -> Vec<CssRule> {
    let mut rules = Vec::new();
    let container = format!("[data-layout=\"{}\"]", layout.pattern);

    for o in layout.responsive.iter().filter(|o| !o.template.is_empty()) {
        rules.push(
            CssRule::with_compound_selector(
                container.clone(),
                vec![("grid-template-areas".into(), o.template.clone())],
            )
            .within(o.screen),
        );
    }

    if rules.is_empty() {
        return rules;
    }

    let mut areas = HashSet::new();
    for item in &layout.items {
        let defined = layout
            .responsive
            .iter()
            .any(|o| template_defines(&o.template, &item.area));
        if defined && areas.insert(item.area.as_str()) {
            rules.push(CssRule::with_compound_selector(
                format!("{} > [data-area=\"{}\"]", container, item.area),
                vec![("grid-area".into(), item.area.clone())],
            ));
        }
    }
    rules
}

fn render_css(rules: &[CssRule]) -> String {
    let mut css = String::new();
    for rule in rules {
        let mut body = String::new();
        body.push_str(&rule.selector);
        body.push_str(" {");
        for (prop, val) in &rule.declarations {
            body.push(' ');
            body.push_str(prop);
            body.push_str(": ");
            body.push_str(val);
            body.push(';');
        }
        body.push_str(" }");

        match &rule.media_query {
            None => {
                css.push_str(&body);
                css.push('\n');
            }
            Some(mq) => {
                css.push_str(mq);
                css.push_str(" {\n  ");
                css.push_str(&body);
                css.push_str("\n}\n");
            }
        }
    }
    css
}

/// CSS for one layout. Base rules come first, then each breakpoint in
/// ascending width so later buckets override earlier ones.
pub fn stylesheet(layout: &LayoutAssignment) -> String {
    let mut rules: Vec<CssRule> = layout_classes(layout)
        .into_iter()
        .filter_map(resolve_class)
        .collect();
    rules.extend(template_rules(layout));

    rules.sort_by_key(|rule| {
        ScreenSize::ALL
            .iter()
            .position(|s| media_query_for(*s) == rule.media_query)
            .unwrap_or(0)
    });

    render_css(&rules)
}
