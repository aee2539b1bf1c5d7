//! Minimal HTML component tree.
//!
//! # Responsibility
//! - Let views describe markup as typed nodes instead of format strings.
//! - Escape every text node and attribute value at render time.
//!
//! # Invariants
//! - Tag and attribute names are `&'static str`; only values carry dynamic text.
//! - Rendering escapes `& < > " '`, so dynamic text can never open markup.

use std::borrow::Cow;
use std::fmt::{Display, Formatter, Write};

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Fragment(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrValue {
    Text(String),
    /// Boolean attribute rendered without a value (`checked`, `selected`).
    Flag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, AttrValue)>,
    children: Vec<Node>,
}

/// Starts an element builder.
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

pub fn text(value: impl Into<String>) -> Node {
    Node::Text(value.into())
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, AttrValue::Text(value.into())));
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn id(self, value: impl Into<String>) -> Self {
        self.attr("id", value)
    }

    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.push((name, AttrValue::Flag));
        self
    }

    pub fn flag_if(self, name: &'static str, enabled: bool) -> Self {
        if enabled {
            self.flag(name)
        } else {
            self
        }
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<N: Into<Node>>(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(Node::Text(value.into()))
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Value of a text attribute; `Some("")` for a boolean flag.
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr, _)| *attr == name)
            .map(|(_, value)| match value {
                AttrValue::Text(value) => value.as_str(),
                AttrValue::Flag => "",
            })
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr_value("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

impl Node {
    /// Serializes the tree to markup.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Concatenated unescaped text of this subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    /// Depth-first search for the first element with `id="{id}"`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(&|element| element.attr_value("id") == Some(id))
    }

    /// Depth-first search for the first element matching `predicate`.
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        match self {
            Node::Text(_) => None,
            Node::Fragment(nodes) => nodes.iter().find_map(|node| node.find(predicate)),
            Node::Element(element) => {
                if predicate(element) {
                    return Some(element);
                }
                element
                    .children
                    .iter()
                    .find_map(|node| node.find(predicate))
            }
        }
    }

    /// Every element in document order matching `predicate`.
    pub fn find_all(&self, predicate: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |element| {
            if predicate(element) {
                found.push(element);
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        match self {
            Node::Text(_) => {}
            Node::Fragment(nodes) => nodes.iter().for_each(|node| node.walk(visit)),
            Node::Element(element) => {
                visit(element);
                element.children.iter().for_each(|node| node.walk(visit));
            }
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(value) => out.push_str(value),
            Node::Fragment(nodes) => nodes.iter().for_each(|node| node.collect_text(out)),
            Node::Element(element) => element
                .children
                .iter()
                .for_each(|node| node.collect_text(out)),
        }
    }
}

impl Element {
    /// Text of this element's subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.children
            .iter()
            .for_each(|node| node.collect_text(&mut out));
        out
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Text(value) => f.write_str(&escape(value)),
            Node::Fragment(nodes) => nodes.iter().try_for_each(|node| write!(f, "{node}")),
            Node::Element(element) => write!(f, "{element}"),
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            match value {
                AttrValue::Text(value) => write!(f, " {name}=\"{}\"", escape(value))?,
                AttrValue::Flag => write!(f, " {name}")?,
            }
        }
        f.write_char('>')?;

        if VOID_TAGS.contains(&self.tag) {
            return Ok(());
        }
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.tag)
    }
}

/// Replaces the five markup-significant characters with entities.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 16);
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
