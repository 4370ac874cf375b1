//! Recursive, fault-tolerant tree renderer.
//!
//! Each node goes through the same steps: check its `type`, check the depth
//! cap, look it up in the registry, validate it, resolve a renderer, render
//! it, then arrange and render every named child slot. Anything that goes
//! wrong below the root turns into an inline [`Placeholder`] scoped to the
//! failing node. The only error that escapes [`TreeRenderer::render`] is a
//! missing generic renderer.

pub mod output;
pub mod session;

use serde_json::Value;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::descriptor::{self, ChildSlot, ComponentDescriptor};
use crate::error::{GenUiError, GenUiResult, RenderError};
use crate::layout::LayoutEngine;
use crate::registry::{Category, ComponentRegistry};
use crate::resolver::{ComponentRenderer, RendererResolver, Resolution};
use crate::widgets::Widget;

pub use output::{
    NodeStatus, Placeholder, PlaceholderReason, RenderedChild, RenderedComponent, RenderedNode,
    RenderedSlot,
};
pub use session::{PassId, RenderSession};

pub struct TreeRenderer<'r> {
    registry: Arc<ComponentRegistry>,
    resolver: &'r RendererResolver,
    layout: LayoutEngine,
    config: RenderConfig,
}

impl<'r> TreeRenderer<'r> {
    pub fn new(
        registry: Arc<ComponentRegistry>,
        resolver: &'r RendererResolver,
        config: RenderConfig,
    ) -> Self {
        Self {
            layout: LayoutEngine::new(config.screen),
            registry,
            resolver,
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Render a whole tree. Every input produces a node; `Err` means the
    /// deployment is broken (no generic renderer), not that the input is bad.
    pub fn render(&self, root: &Value) -> GenUiResult<RenderedNode> {
        self.render_node(root, 0)
    }

    pub fn render_descriptor(&self, descriptor: &ComponentDescriptor) -> GenUiResult<RenderedNode> {
        self.render(&descriptor.to_value())
    }

    /// Render `root` for `pass` and commit the result if the pass is still
    /// current. Returns whether the output was committed.
    pub fn render_pass(&self, session: &RenderSession, pass: PassId, root: &Value) -> GenUiResult<bool> {
        if !session.is_current(pass) {
            debug!(pass = pass.value(), "Skipping superseded render pass");
            return Ok(false);
        }
        let node = self.render(root)?;
        Ok(session.commit(pass, node))
    }

    fn render_node(&self, value: &Value, depth: usize) -> GenUiResult<RenderedNode> {
        let Some(component_type) = value
            .get("type")
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
        else {
            let message = if value.is_object() {
                "Component is missing a non-empty 'type'"
            } else {
                "Expected a component object"
            };
            warn!(depth, "{}", message);
            return Ok(Placeholder::new(PlaceholderReason::InvalidComponent, None, message).into());
        };

        if depth > self.config.max_depth {
            warn!(component_type, depth, "Maximum nesting depth exceeded");
            let err = GenUiError::MaxNestingDepthExceeded {
                max_depth: self.config.max_depth,
            };
            return Ok(Placeholder::new(
                PlaceholderReason::DepthExceeded,
                Some(component_type),
                err.to_string(),
            )
            .into());
        }

        let entry = match self.registry.get(component_type) {
            Some(entry) if entry.available => entry,
            _ => return Ok(self.not_available(component_type)),
        };

        let validated = match entry.schema.validate(value) {
            Ok(validated) => validated,
            Err(err) => {
                warn!(component_type, error = %err, "Schema validation failed");
                return Ok(Placeholder::new(
                    PlaceholderReason::ValidationFailed,
                    Some(component_type),
                    err.to_string(),
                )
                .with_errors(err.field_errors().to_vec())
                .into());
            }
        };

        let resolution = match entry.renderer.as_deref() {
            Some(key) => self.resolver.resolve(key)?,
            None => Resolution {
                renderer: self.resolver.generic()?,
                fallback: true,
            },
        };
        debug!(component_type, depth, fallback = resolution.fallback, "Rendering component");

        let widget = match self.invoke(resolution.renderer.as_ref(), &validated) {
            Ok(widget) => widget,
            Err(err) => {
                warn!(component_type, error = %err, "Renderer failed");
                return Ok(Placeholder::new(
                    PlaceholderReason::RenderFailed,
                    Some(component_type),
                    format!("Could not render '{}': {}", component_type, err),
                )
                .into());
            }
        };

        let slots = match validated.as_object() {
            Some(payload) => descriptor::child_slots(payload)
                .into_iter()
                .map(|slot| self.render_slot(component_type, slot, depth))
                .collect::<GenUiResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        let nested_errors = slots
            .iter()
            .flat_map(|slot| slot.children.iter())
            .any(|child| child.node.has_errors());

        Ok(RenderedNode::Component(RenderedComponent {
            component_type: component_type.to_string(),
            id: validated.get("id").and_then(Value::as_str).map(str::to_string),
            class_name: validated
                .get("className")
                .and_then(Value::as_str)
                .map(str::to_string),
            widget,
            fallback: resolution.fallback,
            slots,
            status: if nested_errors {
                NodeStatus::RenderedWithNestedErrors
            } else {
                NodeStatus::Rendered
            },
        }))
    }

    fn not_available(&self, component_type: &str) -> RenderedNode {
        let category = Category::guess(component_type);
        let suggestions = category
            .map(|c| self.registry.available_types(c))
            .unwrap_or_default();
        warn!(component_type, suggested = ?category, "Component not available");

        let mut message = format!("Component '{}' is not available", component_type);
        if let Some(category) = category {
            message.push_str(&format!(" (closest category: {})", category));
        }
        Placeholder::new(PlaceholderReason::NotAvailable, Some(component_type), message)
            .with_suggestions(category, suggestions)
            .into()
    }

    fn invoke(&self, renderer: &dyn ComponentRenderer, props: &Value) -> Result<Widget, RenderError> {
        if !self.config.contain_panics {
            return renderer.render(props);
        }
        catch_unwind(AssertUnwindSafe(|| renderer.render(props)))
            .unwrap_or_else(|payload| Err(RenderError::Panicked(panic_message(payload))))
    }

    fn render_slot(
        &self,
        parent_type: &str,
        slot: ChildSlot<'_>,
        depth: usize,
    ) -> GenUiResult<RenderedSlot> {
        let total = slot.children.len();
        let kept = total.min(self.config.max_children);
        let types = slot.child_types();
        let layout = self.layout.arrange(&types[..kept]);

        let mut children = Vec::with_capacity(kept + 1);
        for (index, child) in slot.children.iter().take(kept).enumerate() {
            let node = self.render_child(child, depth + 1, &slot, parent_type)?;
            children.push(RenderedChild {
                placement: layout.item(index).cloned(),
                node,
            });
        }

        if total > kept {
            let omitted = total - kept;
            warn!(slot = %slot.path, omitted, "Too many children, dropping the rest");
            children.push(RenderedChild {
                placement: None,
                node: Placeholder::new(
                    PlaceholderReason::Omitted,
                    None,
                    format!("{} more component(s) omitted from '{}'", omitted, slot.path),
                )
                .into(),
            });
        }

        Ok(RenderedSlot {
            path: slot.path,
            layout,
            children,
        })
    }

    /// One child, isolated: a panic anywhere in its subtree becomes a
    /// placeholder in its own position.
    fn render_child(
        &self,
        child: &Value,
        depth: usize,
        slot: &ChildSlot<'_>,
        parent_type: &str,
    ) -> GenUiResult<RenderedNode> {
        if !self.config.contain_panics {
            return self.render_node(child, depth);
        }
        match catch_unwind(AssertUnwindSafe(|| self.render_node(child, depth))) {
            Ok(result) => result,
            Err(payload) => {
                let component_type = child
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                let err = GenUiError::ChildRender {
                    component_type: component_type.to_string(),
                    slot: format!("{}.{}", parent_type, slot.path),
                    reason: panic_message(payload),
                };
                warn!(error = %err, "Child render panicked");
                Ok(Placeholder::new(PlaceholderReason::RenderFailed, Some(component_type), err.to_string()).into())
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ComponentRegistry, RegistryEntry};
    use crate::schema::{Field, FieldKind, Schema};
    use serde_json::json;

    fn render(value: Value) -> RenderedNode {
        let resolver = RendererResolver::builtin();
        TreeRenderer::new(
            Arc::new(ComponentRegistry::builtin()),
            &resolver,
            RenderConfig::default(),
        )
        .render(&value)
        .unwrap()
    }

    struct Exploding;

    impl ComponentRenderer for Exploding {
        fn render(&self, _props: &Value) -> Result<Widget, RenderError> {
            panic!("boom")
        }
    }

    fn exploding() -> Arc<dyn ComponentRenderer> {
        Arc::new(Exploding)
    }

    fn registry_with_bomb() -> Arc<ComponentRegistry> {
        let mut builder = ComponentRegistry::builder();
        for entry in ComponentRegistry::builtin().entries() {
            builder = builder.register(entry.clone());
        }
        let bomb = RegistryEntry::new(
            Schema::new("bomb", vec![Field::optional("label", FieldKind::String)]),
            "Bomb",
            Category::Display,
            "Always panics",
        );
        Arc::new(builder.register(bomb).build())
    }

    #[test]
    fn missing_type() {
        let node = render(json!({"title": "x"}));
        let placeholder = node.as_placeholder().unwrap();
        assert_eq!(placeholder.reason, PlaceholderReason::InvalidComponent);

        let node = render(json!("card"));
        assert_eq!(node.as_placeholder().unwrap().message, "Expected a component object");

        let node = render(json!({"type": "  "}));
        assert!(node.is_placeholder());
    }

    #[test]
    fn unknown_type_names_the_type() {
        let node = render(json!({"type": "bogus-widget", "title": "x"}));
        let placeholder = node.as_placeholder().unwrap();
        assert_eq!(placeholder.reason, PlaceholderReason::NotAvailable);
        assert_eq!(placeholder.component_type.as_deref(), Some("bogus-widget"));
        assert!(placeholder.message.contains("bogus-widget"));
    }

    #[test]
    fn unknown_type_suggests_category() {
        let node = render(json!({"type": "sparkline-chart"}));
        let placeholder = node.as_placeholder().unwrap();
        assert_eq!(placeholder.suggested_category, Some(Category::Data));
        assert!(placeholder.suggestions.contains(&"chart".to_string()));
    }

    #[test]
    fn unavailable_type_is_not_rendered() {
        let node = render(json!({"type": "map", "center": [0, 0]}));
        assert_eq!(node.as_placeholder().unwrap().reason, PlaceholderReason::NotAvailable);
    }

    #[test]
    fn validation_failure_lists_fields() {
        let node = render(json!({"type": "chart", "chartType": "radar"}));
        let placeholder = node.as_placeholder().unwrap();
        assert_eq!(placeholder.reason, PlaceholderReason::ValidationFailed);
        let paths: Vec<_> = placeholder.errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"data"));
        assert!(paths.contains(&"chartType"));
    }

    #[test]
    fn types_without_renderer_use_generic() {
        let node = render(json!({"type": "code", "content": "let x = 1;", "language": "rust"}));
        let component = node.as_component().unwrap();
        assert!(component.fallback);
        assert!(matches!(component.widget, Widget::Generic(_)));
    }

    #[test]
    fn renderer_error_is_contained() {
        let node = render(json!({
            "type": "card",
            "components": [
                {"type": "progress", "value": 5, "max": 0},
                {"type": "text", "content": "still here"}
            ]
        }));
        let card = node.as_component().unwrap();
        assert_eq!(card.status, NodeStatus::RenderedWithNestedErrors);
        let children = &card.slots[0].children;
        assert_eq!(
            children[0].node.as_placeholder().unwrap().reason,
            PlaceholderReason::RenderFailed
        );
        assert!(children[1].node.as_component().is_some());
    }

    #[test]
    fn panics_are_contained_per_child() {
        let resolver = RendererResolver::builtin().with_renderer("bomb", exploding);
        let renderer = TreeRenderer::new(registry_with_bomb(), &resolver, RenderConfig::default());
        let node = renderer
            .render(&json!({
                "type": "section",
                "components": [{"type": "text", "content": "a"}, {"type": "bomb"}, {"type": "text", "content": "c"}]
            }))
            .unwrap();
        let section = node.as_component().unwrap();
        let children = &section.slots[0].children;
        assert_eq!(children.len(), 3);
        let failed = children[1].node.as_placeholder().unwrap();
        assert_eq!(failed.reason, PlaceholderReason::RenderFailed);
        assert!(failed.message.contains("boom"));
        assert!(children[2].node.as_component().is_some());
    }

    #[test]
    fn missing_generic_is_fatal() {
        let resolver = RendererResolver::builtin().without_generic();
        let renderer = TreeRenderer::new(
            Arc::new(ComponentRegistry::builtin()),
            &resolver,
            RenderConfig::default(),
        );
        let result = renderer.render(&json!({
            "type": "card",
            "components": [{"type": "code", "content": "x"}]
        }));
        assert!(matches!(result, Err(GenUiError::RendererResolution { .. })));
    }

    #[test]
    fn depth_cap() {
        let mut tree = json!({"type": "text", "content": "leaf"});
        for _ in 0..4 {
            tree = json!({"type": "card", "components": [tree]});
        }
        let resolver = RendererResolver::builtin();
        let config = RenderConfig {
            max_depth: 2,
            ..RenderConfig::default()
        };
        let node = TreeRenderer::new(Arc::new(ComponentRegistry::builtin()), &resolver, config)
            .render(&tree)
            .unwrap();

        let mut current = node;
        for _ in 0..3 {
            let next = current.as_component().unwrap().slots[0].children[0].node.clone();
            current = next;
        }
        assert_eq!(
            current.as_placeholder().unwrap().reason,
            PlaceholderReason::DepthExceeded
        );
    }

    #[test]
    fn child_cap_adds_notice() {
        let resolver = RendererResolver::builtin();
        let config = RenderConfig {
            max_children: 2,
            ..RenderConfig::default()
        };
        let components: Vec<Value> = (0..5)
            .map(|i| json!({"type": "text", "content": format!("t{}", i)}))
            .collect();
        let node = TreeRenderer::new(Arc::new(ComponentRegistry::builtin()), &resolver, config)
            .render(&json!({"type": "section", "components": components}))
            .unwrap();
        let slot = &node.as_component().unwrap().slots[0];
        assert_eq!(slot.children.len(), 3);
        assert_eq!(slot.layout.items.len(), 2);
        let notice = slot.children[2].node.as_placeholder().unwrap();
        assert_eq!(notice.reason, PlaceholderReason::Omitted);
        assert!(notice.message.starts_with("3 more"));
    }

    #[test]
    fn tab_content_is_a_slot() {
        let node = render(json!({
            "type": "tabs",
            "tabs": [
                {"label": "One", "content": {"type": "text", "content": "first"}},
                {"label": "Two", "content": [{"type": "nope"}]}
            ]
        }));
        let tabs = node.as_component().unwrap();
        assert_eq!(tabs.slots.len(), 2);
        assert!(tabs.slot("tabs[0].content").is_some());
        let second = tabs.slot("tabs[1].content").unwrap();
        assert!(second.children[0].node.is_placeholder());
        assert_eq!(node.placeholder_count(), 1);
    }

    #[test]
    fn stale_pass_is_not_committed() {
        let resolver = RendererResolver::builtin();
        let renderer = TreeRenderer::new(
            Arc::new(ComponentRegistry::builtin()),
            &resolver,
            RenderConfig::default(),
        );
        let session = RenderSession::new();
        let old = session.begin();
        let new = session.begin();

        assert!(renderer
            .render_pass(&session, new, &json!({"type": "text", "content": "new"}))
            .unwrap());
        assert!(!renderer
            .render_pass(&session, old, &json!({"type": "text", "content": "old"}))
            .unwrap());
        let latest = session.latest().unwrap();
        let Widget::Text(text) = &latest.as_component().unwrap().widget else {
            panic!("Expected text widget");
        };
        assert_eq!(text.content, "new");
    }
}
