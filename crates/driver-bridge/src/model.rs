//! Intent-level UI state model
//!
//! Snapshots describe what the page currently shows in terms of intent
//! (nav entries, buttons, headings, table headers, inputs, free text), not
//! selectors. The harness queries snapshots only through the helpers here,
//! which keeps any one application's DOM vocabulary out of the core.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of an observed UI node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Entry in the primary navigation
    NavItem,

    /// Clickable button
    Button,

    /// Heading or header-bar content
    Heading,

    /// Column header inside a table
    TableHeader,

    /// Text input field
    Input,

    /// Any other visible text content
    Text,
}

/// One observed UI node inside a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiNode {
    pub kind: NodeKind,
    pub text: String,

    /// Placeholder attribute, for inputs
    pub placeholder: Option<String>,
}

impl UiNode {
    pub fn nav_item(label: impl Into<String>) -> Self {
        Self::plain(NodeKind::NavItem, label)
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self::plain(NodeKind::Button, label)
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self::plain(NodeKind::Heading, text)
    }

    pub fn table_header(text: impl Into<String>) -> Self {
        Self::plain(NodeKind::TableHeader, text)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::plain(NodeKind::Text, text)
    }

    pub fn input(placeholder: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Input,
            text: String::new(),
            placeholder: Some(placeholder.into()),
        }
    }

    fn plain(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            placeholder: None,
        }
    }
}

/// Point-in-time snapshot of the current UI state.
///
/// Produced by [`crate::UiDriver::query_ui_state`]; consumed by readiness
/// predicates. Predicates must treat it as read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    pub nodes: Vec<UiNode>,
}

impl PageSnapshot {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            nodes: Vec::new(),
        }
    }

    pub fn with_node(mut self, node: UiNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_nav_item(self, label: impl Into<String>) -> Self {
        self.with_node(UiNode::nav_item(label))
    }

    pub fn with_button(self, label: impl Into<String>) -> Self {
        self.with_node(UiNode::button(label))
    }

    pub fn with_heading(self, text: impl Into<String>) -> Self {
        self.with_node(UiNode::heading(text))
    }

    pub fn with_table_header(self, text: impl Into<String>) -> Self {
        self.with_node(UiNode::table_header(text))
    }

    pub fn with_input(self, placeholder: impl Into<String>) -> Self {
        self.with_node(UiNode::input(placeholder))
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_node(UiNode::text(text))
    }

    /// Nav entry whose whitespace-normalized label equals `label`.
    pub fn has_nav_item(&self, label: &str) -> bool {
        self.nodes
            .iter()
            .any(|n| n.kind == NodeKind::NavItem && normalize(&n.text) == normalize(label))
    }

    /// Button whose whitespace-normalized label equals `label`.
    pub fn has_button(&self, label: &str) -> bool {
        self.nodes
            .iter()
            .any(|n| n.kind == NodeKind::Button && normalize(&n.text) == normalize(label))
    }

    /// Any heading containing `fragment`.
    pub fn heading_contains(&self, fragment: &str) -> bool {
        self.nodes
            .iter()
            .any(|n| n.kind == NodeKind::Heading && n.text.contains(fragment))
    }

    /// Any table header containing `fragment`.
    pub fn has_table_header(&self, fragment: &str) -> bool {
        self.nodes
            .iter()
            .any(|n| n.kind == NodeKind::TableHeader && n.text.contains(fragment))
    }

    /// Input with exactly this placeholder.
    pub fn has_input_placeholder(&self, placeholder: &str) -> bool {
        self.nodes
            .iter()
            .any(|n| n.kind == NodeKind::Input && n.placeholder.as_deref() == Some(placeholder))
    }

    /// Any node whose text contains `fragment`, regardless of kind.
    pub fn text_contains(&self, fragment: &str) -> bool {
        self.nodes.iter().any(|n| n.text.contains(fragment))
    }
}

/// Target of a click dispatched through the driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickTarget {
    /// Button identified by its visible label
    Button(String),

    /// Nav entry identified by its visible label
    NavItem(String),
}

impl ClickTarget {
    pub fn button(label: impl Into<String>) -> Self {
        Self::Button(label.into())
    }

    pub fn nav_item(label: impl Into<String>) -> Self {
        Self::NavItem(label.into())
    }

    pub fn label(&self) -> &str {
        match self {
            ClickTarget::Button(label) | ClickTarget::NavItem(label) => label,
        }
    }
}

impl fmt::Display for ClickTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClickTarget::Button(label) => write!(f, "button '{label}'"),
            ClickTarget::NavItem(label) => write!(f, "nav item '{label}'"),
        }
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
