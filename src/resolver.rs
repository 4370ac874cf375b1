//! Type string to concrete renderer, with a generic fallback.
//!
//! Renderers are constructed lazily on first use and memoized for the life of
//! the resolver: resolving the same key twice returns the same `Arc`.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, error};

use crate::error::{GenUiError, GenUiResult, RenderError};
use crate::widgets::{self, Widget};

/// A concrete renderer for one component type.
///
/// `props` is the schema-validated payload, defaults filled in.
pub trait ComponentRenderer: Send + Sync {
    fn render(&self, props: &Value) -> Result<Widget, RenderError>;
}

pub type RendererFactory = fn() -> Arc<dyn ComponentRenderer>;

struct LazyRenderer {
    factory: RendererFactory,
    instance: OnceLock<Arc<dyn ComponentRenderer>>,
}

impl LazyRenderer {
    fn new(factory: RendererFactory) -> Self {
        Self {
            factory,
            instance: OnceLock::new(),
        }
    }

    fn get(&self) -> Arc<dyn ComponentRenderer> {
        Arc::clone(self.instance.get_or_init(self.factory))
    }

    fn is_constructed(&self) -> bool {
        self.instance.get().is_some()
    }
}

/// The renderer picked for a node.
#[derive(Clone)]
pub struct Resolution {
    pub renderer: Arc<dyn ComponentRenderer>,
    /// True when the generic renderer stands in for a missing bespoke one
    pub fallback: bool,
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

pub struct RendererResolver {
    renderers: HashMap<String, LazyRenderer>,
    generic: Option<LazyRenderer>,
}

impl RendererResolver {
    /// No bespoke renderers, generic fallback only.
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
            generic: Some(LazyRenderer::new(widgets::generic::factory)),
        }
    }

    /// All built-in widget renderers plus the generic fallback.
    pub fn builtin() -> Self {
        widgets::builtin_renderers()
            .iter()
            .fold(Self::new(), |resolver, (key, factory)| {
                resolver.with_renderer(key, *factory)
            })
    }

    pub fn with_renderer(mut self, key: &str, factory: RendererFactory) -> Self {
        self.renderers
            .insert(key.to_string(), LazyRenderer::new(factory));
        self
    }

    pub fn with_generic(mut self, factory: RendererFactory) -> Self {
        self.generic = Some(LazyRenderer::new(factory));
        self
    }

    /// Drop the generic fallback. Only useful to exercise the fatal path.
    pub fn without_generic(mut self) -> Self {
        self.generic = None;
        self
    }

    /// The bespoke renderer for `key`, if one is registered.
    pub fn lookup(&self, key: &str) -> Option<Arc<dyn ComponentRenderer>> {
        self.renderers.get(key).map(LazyRenderer::get)
    }

    pub fn generic(&self) -> GenUiResult<Arc<dyn ComponentRenderer>> {
        self.generic
            .as_ref()
            .map(LazyRenderer::get)
            .ok_or_else(|| GenUiError::RendererResolution {
                component_type: "generic".to_string(),
                reason: "generic fallback renderer is not configured".to_string(),
            })
    }

    /// Resolve `key`, falling back to the generic renderer on a miss.
    ///
    /// Fails only when the fallback itself is missing.
    pub fn resolve(&self, key: &str) -> GenUiResult<Resolution> {
        if let Some(renderer) = self.lookup(key) {
            return Ok(Resolution {
                renderer,
                fallback: false,
            });
        }
        debug!(renderer = key, "no bespoke renderer, using generic");
        match self.generic() {
            Ok(renderer) => Ok(Resolution {
                renderer,
                fallback: true,
            }),
            Err(_) => {
                error!(renderer = key, "generic renderer unavailable");
                Err(GenUiError::RendererResolution {
                    component_type: key.to_string(),
                    reason: "no renderer registered and generic fallback is not configured"
                        .to_string(),
                })
            }
        }
    }

    pub fn has_renderer(&self, key: &str) -> bool {
        self.renderers.contains_key(key)
    }

    /// Number of renderers constructed so far, generic included.
    pub fn constructed(&self) -> usize {
        self.renderers
            .values()
            .chain(self.generic.iter())
            .filter(|r| r.is_constructed())
            .count()
    }
}

impl Default for RendererResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for RendererResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.renderers.keys().collect();
        keys.sort();
        f.debug_struct("RendererResolver")
            .field("renderers", &keys)
            .field("generic", &self.generic.is_some())
            .finish()
    }
}
