use serde::{Deserialize, Serialize};

use crate::descriptor::SlotPath;
use crate::error::FieldError;
use crate::layout::{ItemPlacement, LayoutAssignment};
use crate::registry::Category;
use crate::widgets::Widget;

/// What one descriptor turned into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderedNode {
    Component(RenderedComponent),
    Placeholder(Placeholder),
}

impl RenderedNode {
    pub fn as_component(&self) -> Option<&RenderedComponent> {
        match self {
            RenderedNode::Component(component) => Some(component),
            RenderedNode::Placeholder(_) => None,
        }
    }

    pub fn as_placeholder(&self) -> Option<&Placeholder> {
        match self {
            RenderedNode::Placeholder(placeholder) => Some(placeholder),
            RenderedNode::Component(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderedNode::Placeholder(_))
    }

    /// True if this node or anything below it is a placeholder.
    pub fn has_errors(&self) -> bool {
        match self {
            RenderedNode::Placeholder(_) => true,
            RenderedNode::Component(component) => component.status == NodeStatus::RenderedWithNestedErrors,
        }
    }

    /// Depth-first count of placeholders in the subtree.
    pub fn placeholder_count(&self) -> usize {
        match self {
            RenderedNode::Placeholder(_) => 1,
            RenderedNode::Component(component) => component
                .slots
                .iter()
                .flat_map(|slot| slot.children.iter())
                .map(|child| child.node.placeholder_count())
                .sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeStatus {
    Rendered,
    /// The node itself rendered but at least one descendant is a placeholder
    RenderedWithNestedErrors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedComponent {
    pub component_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub widget: Widget,
    /// The generic renderer stood in for a missing bespoke one
    pub fallback: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<RenderedSlot>,
    pub status: NodeStatus,
}

impl RenderedComponent {
    pub fn slot(&self, path: &str) -> Option<&RenderedSlot> {
        self.slots.iter().find(|s| s.path.to_string() == path)
    }
}

/// Rendered children of one named slot plus the layout they were arranged in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSlot {
    pub path: SlotPath,
    pub layout: LayoutAssignment,
    pub children: Vec<RenderedChild>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedChild {
    /// `None` for the trailing "omitted children" notice
    pub placement: Option<ItemPlacement>,
    pub node: RenderedNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaceholderReason {
    /// `type` missing, empty or not a string
    InvalidComponent,
    /// Unknown or disabled type
    NotAvailable,
    ValidationFailed,
    /// The renderer returned an error or panicked
    RenderFailed,
    DepthExceeded,
    /// Children past the per-slot cap
    Omitted,
}

/// Inline, contained notice standing in for a node that could not render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    pub reason: PlaceholderReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_category: Option<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl Placeholder {
    pub fn new(reason: PlaceholderReason, component_type: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            reason,
            component_type: component_type.map(str::to_string),
            message: message.into(),
            errors: Vec::new(),
            suggested_category: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_suggestions(mut self, category: Option<Category>, suggestions: Vec<String>) -> Self {
        self.suggested_category = category;
        self.suggestions = suggestions;
        self
    }
}

impl From<Placeholder> for RenderedNode {
    fn from(placeholder: Placeholder) -> Self {
        RenderedNode::Placeholder(placeholder)
    }
}
