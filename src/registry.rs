//! The component registry: type string to schema, metadata and renderer key.
//!
//! A [`ComponentRegistry`] is built once and never mutated. Hot reloads go
//! through [`SharedRegistry`], which swaps the whole registry behind an `Arc`
//! so a reader either sees the old map or the new one, never a mix.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use tracing::{debug, info, warn};

use crate::error::{GenUiError, GenUiResult};
use crate::schema::catalog::builtin_schemas;
use crate::schema::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Layout,
    Input,
    Display,
    Feedback,
    Data,
    Navigation,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Layout,
        Category::Input,
        Category::Display,
        Category::Feedback,
        Category::Data,
        Category::Navigation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Layout => "layout",
            Category::Input => "input",
            Category::Display => "display",
            Category::Feedback => "feedback",
            Category::Data => "data",
            Category::Navigation => "navigation",
        }
    }

    /// Best guess at the category of a type name nobody registered.
    pub fn guess(component_type: &str) -> Option<Category> {
        const HINTS: &[(&[&str], Category)] = &[
            (&["chart", "graph", "plot", "table", "metric", "stat", "kpi"], Category::Data),
            (&["form", "input", "field", "button", "select", "checkbox", "slider"], Category::Input),
            (&["alert", "toast", "progress", "notice", "banner", "spinner"], Category::Feedback),
            (&["tab", "step", "nav", "menu", "breadcrumb", "wizard"], Category::Navigation),
            (&["card", "grid", "section", "layout", "panel", "container", "row", "column"], Category::Layout),
            (&["text", "image", "list", "badge", "code", "heading", "markdown", "timeline"], Category::Display),
        ];
        let lowered = component_type.to_ascii_lowercase();
        HINTS
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| lowered.contains(n)))
            .map(|(_, category)| *category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the renderer and help panel know about one component type.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub component_type: String,
    pub display_name: String,
    pub description: String,
    pub category: Category,
    pub available: bool,
    pub schema: Arc<Schema>,
    /// Key handed to the resolver; `None` means the generic renderer is used
    pub renderer: Option<String>,
    pub example_prompts: Vec<String>,
}

impl RegistryEntry {
    pub fn new(schema: Schema, display_name: &str, category: Category, description: &str) -> Self {
        let component_type = schema.component_type.to_string();
        Self {
            renderer: Some(component_type.clone()),
            component_type,
            display_name: display_name.to_string(),
            description: description.to_string(),
            category,
            available: true,
            schema: Arc::new(schema),
            example_prompts: Vec::new(),
        }
    }

    pub fn with_examples(mut self, prompts: &[&str]) -> Self {
        self.example_prompts = prompts.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn without_renderer(mut self) -> Self {
        self.renderer = None;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

/// Help-panel view of one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSummary {
    #[serde(rename = "type")]
    pub component_type: String,
    pub display_name: String,
    pub description: String,
    pub example_prompts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub components: Vec<ComponentSummary>,
}

/// Immutable type-string to entry map, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    entries: IndexMap<String, RegistryEntry>,
}

impl ComponentRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        let mut builder = Self::builder();
        for schema in builtin_schemas() {
            let component_type = schema.component_type;
            match builtin_entry(schema) {
                Some(entry) => builder = builder.register(entry),
                None => {
                    debug_assert!(false, "builtin schema '{}' has no entry", component_type);
                    warn!(component_type, "builtin schema has no registry entry, skipped");
                }
            }
        }
        builder.build()
    }

    pub fn get(&self, component_type: &str) -> Option<&RegistryEntry> {
        self.entries.get(component_type)
    }

    pub fn is_available(&self, component_type: &str) -> bool {
        self.get(component_type).map(|e| e.available).unwrap_or(false)
    }

    /// Run the schema registered for `component_type` against `payload`.
    pub fn validate(&self, component_type: &str, payload: &Value) -> GenUiResult<Value> {
        let entry = self
            .get(component_type)
            .ok_or_else(|| GenUiError::UnknownComponentType {
                component_type: component_type.to_string(),
            })?;
        entry.schema.validate(payload)
    }

    /// Entries of one category, in registration order.
    pub fn list_by_category(&self, category: Category) -> Vec<&RegistryEntry> {
        self.entries
            .values()
            .filter(|e| e.category == category)
            .collect()
    }

    pub fn available_types(&self, category: Category) -> Vec<String> {
        self.list_by_category(category)
            .into_iter()
            .filter(|e| e.available)
            .map(|e| e.component_type.clone())
            .collect()
    }

    /// Available components grouped by category, for "what can I ask for" panels.
    pub fn help_panel(&self) -> Vec<CategoryGroup> {
        Category::ALL
            .iter()
            .map(|&category| CategoryGroup {
                category,
                components: self
                    .list_by_category(category)
                    .into_iter()
                    .filter(|e| e.available)
                    .map(|e| ComponentSummary {
                        component_type: e.component_type.clone(),
                        display_name: e.display_name.clone(),
                        description: e.description.clone(),
                        example_prompts: e.example_prompts.clone(),
                    })
                    .collect(),
            })
            .filter(|group| !group.components.is_empty())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry, available or not, in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: IndexMap<String, RegistryEntry>,
}

impl RegistryBuilder {
    /// Add an entry. Registering a type twice keeps the first position and
    /// replaces the entry.
    pub fn register(mut self, entry: RegistryEntry) -> Self {
        if self.entries.contains_key(&entry.component_type) {
            debug!(component_type = %entry.component_type, "replacing registry entry");
        }
        self.entries.insert(entry.component_type.clone(), entry);
        self
    }

    pub fn build(self) -> ComponentRegistry {
        ComponentRegistry {
            entries: self.entries,
        }
    }
}

fn builtin_entry(schema: Schema) -> Option<RegistryEntry> {
    use Category::*;
    let entry = match schema.component_type {
        "card" => RegistryEntry::new(schema, "Card", Layout, "Titled container for related content")
            .with_examples(&["Show my account summary in a card"]),
        "section" => RegistryEntry::new(schema, "Section", Layout, "Titled group of components"),
        "grid" => RegistryEntry::new(schema, "Grid", Layout, "Explicit grid of components"),
        "tabs" => RegistryEntry::new(schema, "Tabs", Navigation, "Switch between groups of content")
            .with_examples(&["Split the report into overview and details tabs"]),
        "accordion" => RegistryEntry::new(schema, "Accordion", Layout, "Collapsible sections"),
        "form" => RegistryEntry::new(schema, "Form", Input, "Collects structured input")
            .with_examples(&["Create a signup form", "I need a contact form"]),
        "button" => RegistryEntry::new(schema, "Button", Input, "Triggers an action"),
        "text" => RegistryEntry::new(schema, "Text", Display, "Paragraph or heading"),
        "image" => RegistryEntry::new(schema, "Image", Display, "Picture with optional caption"),
        "list" => RegistryEntry::new(schema, "List", Display, "Ordered or bulleted list"),
        "badge" => RegistryEntry::new(schema, "Badge", Display, "Small status label"),
        "code" => RegistryEntry::new(schema, "Code", Display, "Code snippet").without_renderer(),
        "timeline" => RegistryEntry::new(schema, "Timeline", Display, "Dated sequence of events")
            .without_renderer(),
        "map" => RegistryEntry::new(schema, "Map", Display, "Geographic map").unavailable(),
        "alert" => RegistryEntry::new(schema, "Alert", Feedback, "Highlighted message"),
        "progress" => RegistryEntry::new(schema, "Progress", Feedback, "Completion indicator"),
        "chart" => RegistryEntry::new(schema, "Chart", Data, "Bar, line, area, pie or scatter chart")
            .with_examples(&["Chart monthly revenue", "Plot signups over the last week"]),
        "table" => RegistryEntry::new(schema, "Table", Data, "Rows and columns of data")
            .with_examples(&["List my recent transactions in a table"]),
        "metric" => RegistryEntry::new(schema, "Metric", Data, "Single KPI with trend"),
        "steps" => RegistryEntry::new(schema, "Steps", Navigation, "Multi-step walkthrough"),
        _ => return None,
    };
    Some(entry)
}

/// Process-wide handle whose registry can be replaced atomically.
#[derive(Debug)]
pub struct SharedRegistry {
    current: RwLock<Arc<ComponentRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: ComponentRegistry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
        }
    }

    /// The registry as of now. Hold on to it for the duration of a render pass.
    pub fn snapshot(&self) -> Arc<ComponentRegistry> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in a fully built registry and return the previous one.
    pub fn replace(&self, registry: ComponentRegistry) -> Arc<ComponentRegistry> {
        let next = Arc::new(registry);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        info!(entries = next.len(), "registry replaced");
        std::mem::replace(&mut *guard, next)
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new(ComponentRegistry::builtin())
    }
}

/// The registry used by the top-level convenience functions.
pub fn default_registry() -> &'static SharedRegistry {
    static DEFAULT_REGISTRY: OnceLock<SharedRegistry> = OnceLock::new();
    DEFAULT_REGISTRY.get_or_init(SharedRegistry::default)
}
