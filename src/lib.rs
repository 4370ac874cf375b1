//! # Generative UI Renderer
//!
//! Validates, resolves and lays out JSON component trees produced by a text
//! generation model, degrading every malformed or unknown node to a contained
//! inline placeholder instead of failing the whole render.
//!
//! ## Features
//! - Schema catalog with field-level errors, coercion and default filling
//! - Component registry with categories, availability and atomic refresh
//! - Lazily constructed, memoized renderers with a generic fallback
//! - Recursive tree renderer with per-child failure isolation
//! - Layout inference: grid pattern, areas, responsive columns and CSS
//!
//! ## Example
//! ```ignore
//! use genui_render::render_json;
//!
//! let json = r#"{
//!   "type": "card",
//!   "title": "Revenue",
//!   "components": [
//!     {"type": "metric", "label": "MRR", "value": "$12,400"},
//!     {"type": "chart", "data": [{"month": "Jan", "mrr": 12400}]}
//!   ]
//! }"#;
//!
//! let node = render_json(json).expect("generic renderer is always configured");
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod layout;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod schema;
pub mod widgets;

use serde_json::Value;
use std::sync::OnceLock;

// --- Core types ---
pub use config::RenderConfig;
pub use descriptor::{ComponentDescriptor, SlotPath};
pub use error::{FieldError, GenUiError, GenUiResult, RenderError};
pub use layout::{LayoutAssignment, LayoutEngine, ScreenSize};
pub use registry::{default_registry, Category, ComponentRegistry, RegistryEntry, SharedRegistry};
pub use render::{Placeholder, PlaceholderReason, RenderSession, RenderedNode, TreeRenderer};
pub use resolver::{ComponentRenderer, RendererResolver};
pub use widgets::Widget;

/// Process-wide resolver with every built-in renderer.
pub fn default_resolver() -> &'static RendererResolver {
    static RESOLVER: OnceLock<RendererResolver> = OnceLock::new();
    RESOLVER.get_or_init(RendererResolver::builtin)
}

/// Render a tree with the default registry, resolver and config.
pub fn render(root: &Value) -> GenUiResult<RenderedNode> {
    render_with_config(root, RenderConfig::default())
}

pub fn render_with_config(root: &Value, config: RenderConfig) -> GenUiResult<RenderedNode> {
    config.validate()?;
    TreeRenderer::new(default_registry().snapshot(), default_resolver(), config).render(root)
}

/// Parse and render. Input that is not JSON at all is reported as
/// [`GenUiError::Json`]; any JSON value renders.
pub fn render_json(json: &str) -> GenUiResult<RenderedNode> {
    let root: Value = serde_json::from_str(json)?;
    render(&root)
}

/// Arrange sibling types for a screen bucket.
pub fn arrange(types: &[String], screen: ScreenSize) -> LayoutAssignment {
    layout::arrange(types, screen)
}

pub fn is_available(component_type: &str) -> bool {
    default_registry().snapshot().is_available(component_type)
}

/// Available type names of one category in registration order.
pub fn list_by_category(category: Category) -> Vec<String> {
    default_registry().snapshot().available_types(category)
}
