use genui_render::render::{NodeStatus, PlaceholderReason, RenderedNode};
use genui_render::{
    render, render_json, Category, ComponentRegistry, GenUiError, RenderConfig, RendererResolver,
    ScreenSize, SharedRegistry, TreeRenderer, Widget,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture(filename: &str) -> Value {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(filename);
    let content = fs::read_to_string(&path).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn children(node: &RenderedNode) -> Vec<RenderedNode> {
    node.as_component().unwrap().slots[0]
        .children
        .iter()
        .map(|c| c.node.clone())
        .collect()
}

// Scenarios

#[test]
fn test_dashboard_fixture() {
    let node = render(&fixture("dashboard.json")).unwrap();
    let section = node.as_component().unwrap();
    assert_eq!(section.status, NodeStatus::Rendered);

    let slot = section.slot("components").unwrap();
    assert_eq!(slot.layout.pattern, "dashboard-metrics");
    assert_eq!(slot.layout.columns, 3);

    let areas: Vec<_> = slot
        .children
        .iter()
        .map(|c| c.placement.as_ref().unwrap().area.as_str())
        .collect();
    assert_eq!(areas, vec!["metrics", "charts", "table"]);

    let Widget::Metric(metric) = &slot.children[0].node.as_component().unwrap().widget else {
        panic!("Expected metric widget");
    };
    assert_eq!(metric.change, Some(12.5));
    assert_eq!(metric.trend.as_deref(), Some("up"));

    let Widget::Chart(chart) = &slot.children[1].node.as_component().unwrap().widget else {
        panic!("Expected chart widget");
    };
    assert_eq!(chart.chart_type, "line");
}

#[test]
fn test_unknown_root() {
    let node = render(&fixture("unknown-root.json")).unwrap();
    let placeholder = node.as_placeholder().unwrap();
    assert_eq!(placeholder.reason, PlaceholderReason::NotAvailable);
    assert_eq!(placeholder.component_type.as_deref(), Some("bogus-widget"));
}

#[test]
fn test_card_with_form_and_unknown_child() {
    let node = render(&fixture("card-form-unknown.json")).unwrap();
    let card = node.as_component().unwrap();
    assert_eq!(card.status, NodeStatus::RenderedWithNestedErrors);

    let kids = children(&node);
    assert_eq!(kids.len(), 2);
    let Widget::Form(form) = &kids[0].as_component().unwrap().widget else {
        panic!("Expected form widget");
    };
    assert!(form.fields.is_empty());
    assert_eq!(form.submit_label, "Submit");

    let missing = kids[1].as_placeholder().unwrap();
    assert_eq!(missing.reason, PlaceholderReason::NotAvailable);
    assert_eq!(missing.component_type.as_deref(), Some("totally-unknown"));

    // the form renders the same with or without its broken sibling
    let alone = render(&json!({"type": "card", "components": [{"type": "form", "fields": []}]})).unwrap();
    assert_eq!(children(&alone)[0], kids[0]);
}

#[test]
fn test_nested_tabs_fixture() {
    let node = render(&fixture("nested-tabs.json")).unwrap();
    let tabs = node.as_component().unwrap();
    assert_eq!(tabs.status, NodeStatus::Rendered);
    assert_eq!(tabs.slots.len(), 3);

    let Widget::Tabs(view) = &tabs.widget else {
        panic!("Expected tabs widget");
    };
    assert_eq!(view.active, view.tabs[1].id);

    let setup = tabs.slot("tabs[2].content").unwrap();
    let steps = setup.children[0].node.as_component().unwrap();
    let Widget::Steps(steps_view) = &steps.widget else {
        panic!("Expected steps widget");
    };
    assert_eq!(steps_view.current, 1);

    let code = steps.slot("steps[0].content").unwrap().children[0]
        .node
        .as_component()
        .unwrap();
    assert!(code.fallback);
    assert!(matches!(code.widget, Widget::Generic(_)));
}

// Failure isolation

#[test]
fn test_invalid_sibling_does_not_affect_others() {
    let with_broken = render(&fixture("broken-siblings.json")).unwrap();
    let kids = children(&with_broken);
    assert_eq!(kids.len(), 3);

    let broken = kids[1].as_placeholder().unwrap();
    assert_eq!(broken.reason, PlaceholderReason::ValidationFailed);
    assert_eq!(broken.component_type.as_deref(), Some("chart"));
    assert!(!broken.errors.is_empty());

    let without = render(&json!({
        "type": "card",
        "title": "Mixed",
        "components": [
            {"type": "text", "content": "Before"},
            {"type": "text", "content": "After", "id": "text-2"}
        ]
    }))
    .unwrap();
    let clean = children(&without);
    assert_eq!(clean, vec![kids[0].clone(), kids[2].clone()]);
}

#[test]
fn test_every_failure_is_visible() {
    let node = render(&json!({
        "type": "section",
        "components": [
            {"title": "no type"},
            42,
            {"type": "nope"},
            {"type": "text"},
            {"type": "progress", "value": 1, "max": -1}
        ]
    }))
    .unwrap();
    let reasons: Vec<_> = children(&node)
        .iter()
        .map(|n| n.as_placeholder().unwrap().reason)
        .collect();
    assert_eq!(
        reasons,
        vec![
            PlaceholderReason::InvalidComponent,
            PlaceholderReason::InvalidComponent,
            PlaceholderReason::NotAvailable,
            PlaceholderReason::ValidationFailed,
            PlaceholderReason::RenderFailed,
        ]
    );
}

// Fallback totality

#[test]
fn test_unknown_types_never_fail() {
    for t in ["x", "Card", "chart2", "💥", "components", "a b c"] {
        let node = render(&json!({ "type": t })).unwrap();
        let placeholder = node.as_placeholder().unwrap();
        assert_eq!(placeholder.component_type.as_deref(), Some(t));
        assert!(placeholder.message.contains(t));
    }
}

#[test]
fn test_generic_fallback_for_unregistered_renderer() {
    let resolver = RendererResolver::new();
    let renderer = TreeRenderer::new(
        Arc::new(ComponentRegistry::builtin()),
        &resolver,
        RenderConfig::default(),
    );
    let node = renderer
        .render(&json!({"type": "badge", "label": "beta", "variant": "info"}))
        .unwrap();
    let component = node.as_component().unwrap();
    assert!(component.fallback);
    let Widget::Generic(view) = &component.widget else {
        panic!("Expected generic widget");
    };
    assert_eq!(view.component_type, "badge");
    assert!(view.properties.iter().any(|p| p.key == "label" && p.value == "beta"));
}

#[test]
fn test_missing_generic_is_the_only_fatal_error() {
    let resolver = RendererResolver::new().without_generic();
    let renderer = TreeRenderer::new(
        Arc::new(ComponentRegistry::builtin()),
        &resolver,
        RenderConfig::default(),
    );
    let err = renderer
        .render(&json!({"type": "text", "content": "hi"}))
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, GenUiError::RendererResolution { .. }));

    // bad input still renders a placeholder without touching the resolver
    assert!(renderer.render(&json!({"type": "nope"})).is_ok());
}

// Validation

#[test]
fn test_validation_is_idempotent() {
    let registry = ComponentRegistry::builtin();
    let payloads = [
        json!({"type": "form", "fields": [{"name": "email", "fieldType": "EMAIL"}, {"name": "age", "fieldType": "number"}]}),
        json!({"type": "tabs", "tabs": [{"label": "A", "content": {"type": "text", "content": "x"}}]}),
        json!({"type": "metric", "label": "Users", "value": "1,204", "change": "-3%"}),
        json!({"type": "table", "columns": ["a"], "rows": [[1]]}),
    ];
    for payload in payloads {
        let t = payload["type"].as_str().unwrap();
        let once = registry.validate(t, &payload).unwrap();
        let twice = registry.validate(t, &once).unwrap();
        assert_eq!(once, twice, "{} drifted on second validation", t);
    }
}

#[test]
fn test_unkeyed_children_become_addressable() {
    let payload = json!({
        "type": "card",
        "components": [
            {"type": "text", "content": "a"},
            {"type": "text", "content": "b"},
            {"type": "metric", "label": "Users", "value": 3, "id": "users"}
        ]
    });
    let node = render(&payload).unwrap();
    let ids: Vec<_> = children(&node)
        .iter()
        .map(|n| n.as_component().unwrap().id.clone())
        .collect();
    assert_eq!(
        ids,
        vec![Some("text-0".to_string()), Some("text-1".to_string()), Some("users".to_string())]
    );

    let registry = ComponentRegistry::builtin();
    let once = registry.validate("card", &payload).unwrap();
    assert_eq!(once["components"][0]["id"], "text-0");
    assert_eq!(registry.validate("card", &once).unwrap(), once);
}

#[test]
fn test_validate_unknown_type() {
    let registry = ComponentRegistry::builtin();
    let err = registry.validate("bogus", &json!({"type": "bogus"})).unwrap_err();
    assert!(matches!(err, GenUiError::UnknownComponentType { .. }));
}

// Registry

#[test]
fn test_registry_queries() {
    let registry = ComponentRegistry::builtin();
    assert!(registry.is_available("chart"));
    assert!(!registry.is_available("map"));
    assert!(registry.get("map").is_some());
    assert!(!registry.is_available("bogus"));

    let data: Vec<_> = registry
        .list_by_category(Category::Data)
        .iter()
        .map(|e| e.component_type.as_str())
        .collect();
    assert_eq!(data, vec!["chart", "table", "metric"]);
}

#[test]
fn test_registry_swap_is_atomic_for_readers() {
    let shared = SharedRegistry::default();
    let snapshot = shared.snapshot();
    shared.replace(ComponentRegistry::builder().build());

    let resolver = RendererResolver::builtin();
    let old = TreeRenderer::new(snapshot, &resolver, RenderConfig::default());
    let new = TreeRenderer::new(shared.snapshot(), &resolver, RenderConfig::default());
    let payload = json!({"type": "text", "content": "hi"});

    assert!(old.render(&payload).unwrap().as_component().is_some());
    assert!(new.render(&payload).unwrap().is_placeholder());
}

// Entry points

#[test]
fn test_render_json_reports_bad_json() {
    assert!(matches!(render_json("{not json"), Err(GenUiError::Json(_))));
    assert!(render_json("[]").unwrap().is_placeholder());
}

#[test]
fn test_screen_size_flows_into_layout() {
    let resolver = RendererResolver::builtin();
    let config = RenderConfig::default().with_screen(ScreenSize::Mobile);
    let node = TreeRenderer::new(Arc::new(ComponentRegistry::builtin()), &resolver, config)
        .render(&fixture("dashboard.json"))
        .unwrap();
    let slot = node.as_component().unwrap().slot("components").unwrap();
    assert_eq!(slot.layout.columns, 1);
    assert_eq!(slot.layout.screen, ScreenSize::Mobile);
}

#[test]
fn test_rendered_tree_serializes() {
    let node = render(&fixture("card-form-unknown.json")).unwrap();
    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(value["kind"], "component");
    assert_eq!(value["widget"]["widget"], "card");
    let second = &value["slots"][0]["children"][1]["node"];
    assert_eq!(second["kind"], "placeholder");
    assert_eq!(second["reason"], "notAvailable");

    let back: RenderedNode = serde_json::from_value(value).unwrap();
    assert_eq!(back, node);
}
