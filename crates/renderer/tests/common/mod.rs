//! Helpers for inspecting rendered SVG in integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A parsed element with its attributes, text content and enclosing group ids.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attrs: HashMap<String, String>,
    pub text: String,
    /// Ids of all enclosing elements, outermost first
    pub ancestors: Vec<String>,
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(|s| s.as_str())
    }

    pub fn attr_f64(&self, key: &str) -> f64 {
        self.attr(key)
            .unwrap_or_else(|| panic!("missing attribute {} on {:?}", key, self))
            .parse()
            .unwrap_or_else(|_| panic!("attribute {} is not numeric on {:?}", key, self))
    }

    pub fn within(&self, id: &str) -> bool {
        self.ancestors.iter().any(|a| a == id)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

fn read_attrs(e: &BytesStart) -> HashMap<String, String> {
    e.attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            (key, value)
        })
        .collect()
}

/// Parse an SVG document into a flat list of elements in document order.
pub fn parse_svg(svg: &str) -> Vec<Element> {
    let mut reader = Reader::from_str(svg);
    reader.trim_text(true);

    let mut elements: Vec<Element> = Vec::new();
    // (element index, id) for every open element
    let mut open: Vec<(usize, String)> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let attrs = read_attrs(&e);
                let id = attrs.get("id").cloned().unwrap_or_default();
                elements.push(Element {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    attrs,
                    text: String::new(),
                    ancestors: open.iter().map(|(_, id)| id.clone()).collect(),
                });
                open.push((elements.len() - 1, id));
            }
            Ok(Event::Empty(e)) => {
                elements.push(Element {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    attrs: read_attrs(&e),
                    text: String::new(),
                    ancestors: open.iter().map(|(_, id)| id.clone()).collect(),
                });
            }
            Ok(Event::Text(t)) => {
                if let Some((index, _)) = open.last() {
                    let text = t.unescape().expect("valid text").into_owned();
                    elements[*index].text.push_str(&text);
                }
            }
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!(
                "XML parsing error at position {}: {:?}",
                reader.buffer_position(),
                e
            ),
            _ => {}
        }
        buf.clear();
    }

    elements
}

/// All `rect.cell` elements.
pub fn cells(elements: &[Element]) -> Vec<&Element> {
    elements
        .iter()
        .filter(|e| e.name == "rect" && e.has_class("cell"))
        .collect()
}

/// Tick label texts inside the group with the given id.
pub fn tick_labels(elements: &[Element], group_id: &str) -> Vec<String> {
    elements
        .iter()
        .filter(|e| e.name == "text" && e.within(group_id))
        .map(|e| e.text.clone())
        .collect()
}
