//! Content fragment markup model
//!
//! A fragment is the parsed form of an authored content document. The header
//! only needs element names, classes, text and links, so this is a minimal
//! element tree rather than a DOM.

use serde::{Deserialize, Serialize};

/// Element in a fragment tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentNode {
    /// Element name (`div`, `ul`, `li`, `a`, ...)
    pub tag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Own text, excluding children
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FragmentNode>,
}

impl FragmentNode {
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: FragmentNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first search over descendants (not including `self`)
    pub fn find(&self, pred: &dyn Fn(&FragmentNode) -> bool) -> Option<&FragmentNode> {
        self.children.iter().find_map(|child| {
            if pred(child) {
                Some(child)
            } else {
                child.find(pred)
            }
        })
    }

    /// First descendant with the given tag
    pub fn find_tag(&self, tag: &str) -> Option<&FragmentNode> {
        self.find(&|node| node.tag == tag)
    }

    /// Direct children with the given tag
    pub fn children_with_tag<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a FragmentNode> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// Concatenated text of the node and all descendants, trimmed
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// Parsed fragment: its top-level blocks in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub blocks: Vec<FragmentNode>,
}

impl Fragment {
    #[must_use]
    pub fn new(blocks: Vec<FragmentNode>) -> Self {
        Self { blocks }
    }

    #[must_use]
    pub fn first_block(&self) -> Option<&FragmentNode> {
        self.blocks.first()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
