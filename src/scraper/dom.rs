//! Owned document tree the extractors work on.
//!
//! The upstream pages are addressed purely by element position, so the
//! parsers need every child node (comments included) in document order.
//! Building this tree from `scraper::Html` once keeps the extraction code
//! independent of the HTML engine, and lets tests describe fixtures directly.

use scraper::{ElementRef, Html};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Element(Element),
    /// Comments, doctypes and processing instructions. Kept so that child
    /// positions match the source markup.
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// All descendant text, unnormalized.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => el.collect_text(out),
            Node::Other => {}
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// First value of `name` on this element or any descendant, in document
    /// order.
    pub fn find_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).or_else(|| {
            self.child_elements()
                .find_map(|child| child.find_attr(name))
        })
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Descendants named `tag`, in document order.
    pub fn find_all<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_elements(&self.children, tag, &mut found);
        found
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    /// Descendant text with whitespace runs collapsed and the ends trimmed,
    /// which is how a cell or link reads on the rendered page.
    pub fn rendered_text(&self) -> String {
        collapse_whitespace(&self.text_content())
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        Self {
            children: vec![Node::Element(convert(parsed.root_element()))],
        }
    }

    pub fn find_all<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_elements(&self.children, tag, &mut found);
        found
    }
}

fn collect_elements<'a>(nodes: &'a [Node], tag: &str, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.is(tag) {
                found.push(el);
            }
            collect_elements(&el.children, tag, found);
        }
    }
}

fn convert(el: ElementRef<'_>) -> Element {
    let children = el
        .children()
        .map(|child| match child.value() {
            scraper::Node::Text(text) => Node::Text(text.to_string()),
            scraper::Node::Element(_) => ElementRef::wrap(child)
                .map(|child| Node::Element(convert(child)))
                .unwrap_or(Node::Other),
            _ => Node::Other,
        })
        .collect();

    let value = el.value();
    Element {
        tag: value.name().to_ascii_lowercase(),
        attrs: value
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        children,
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
