//! Generic XML element tree.
//!
//! The reader parses a UGX file into this tree before interpreting it, and
//! blocks whose meaning the codec does not model (the mark subset handler and
//! the projection handler) are kept in this form and written back verbatim.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Result, UgxError};

/// An uninterpreted XML element: name, attributes in document order,
/// text content and child elements.
///
/// Text is the concatenation of every text and CDATA fragment directly inside
/// the element, with comments and processing instructions removed. Only its
/// leading and trailing whitespace is dropped, so retained blocks are written
/// back with their interior whitespace as read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes, text or children
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style attribute append
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Builder-style text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Value of the first attribute named `key`
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First child named `name`
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children named `name`, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Parse a complete XML document and return its root element.
    pub fn parse_document(xml: &str) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => stack.push(Self::from_start(e)?),
                Event::Empty(ref e) => {
                    let element = Self::from_start(e)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let mut element = stack.pop().ok_or_else(|| {
                        UgxError::MalformedDocument("unbalanced closing tag".to_string())
                    })?;
                    let trimmed = element.text.trim();
                    if trimmed.len() != element.text.len() {
                        element.text = trimmed.to_string();
                    }
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::Text(ref t) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&t.unescape()?);
                    }
                }
                Event::CData(ref c) => {
                    if let Some(top) = stack.last_mut() {
                        let text = std::str::from_utf8(c.as_ref())
                            .map_err(|e| UgxError::Xml(format!("invalid UTF-8 in CDATA: {e}")))?;
                        top.text.push_str(text);
                    }
                }
                Event::Eof => break,
                // declaration, comments, processing instructions, doctype
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(UgxError::MalformedDocument(format!(
                "element <{}> is never closed",
                open.name
            )));
        }
        root.ok_or_else(|| UgxError::MalformedDocument("document has no root element".to_string()))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Element> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| UgxError::Xml(format!("invalid UTF-8 in element name: {e}")))?
            .to_string();

        let mut element = Element::new(name);
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| UgxError::Xml(format!("invalid UTF-8 in attribute name: {e}")))?
                .to_string();
            let value = attr.unescape_value()?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => {
                return Err(UgxError::MalformedDocument(format!(
                    "second root element <{}>",
                    element.name
                )))
            }
        }
        Ok(())
    }

    /// Serialize this element and its subtree.
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.text.is_empty() && self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if !self.text.is_empty() {
            writer.write_event(Event::Text(BytesText::new(&self.text)))?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}
