//! HTML fragment parsing.
//!
//! Converts markup into [`Node`] trees using `scraper` (html5ever), so
//! stored article HTML can be read back into the same representation the
//! renderers produce. Comments, doctypes and processing instructions are
//! dropped.

use std::borrow::Cow;

use scraper::{ElementRef, Html};

use crate::node::{Element, IntoNode, Node};

/// Parses an HTML fragment into its top-level nodes.
///
/// Parsing is lenient: malformed markup is repaired the way a browser
/// would repair it, and never fails.
pub fn parse_fragment(html: &str) -> Vec<Node> {
	let fragment = Html::parse_fragment(html);
	convert_children(fragment.root_element())
}

/// Parses an HTML fragment and returns its top-level elements.
pub fn parse_elements(html: &str) -> Vec<Element> {
	parse_fragment(html)
		.into_iter()
		.filter_map(|node| match node {
			Node::Element(el) => Some(el),
			_ => None,
		})
		.collect()
}

fn convert_children(parent: ElementRef<'_>) -> Vec<Node> {
	let mut out = Vec::new();
	for child in parent.children() {
		match child.value() {
			scraper::Node::Text(text) => {
				let text: &str = text;
				if !text.is_empty() {
					out.push(Node::Text(Cow::Owned(text.to_string())));
				}
			}
			scraper::Node::Element(_) => {
				if let Some(el) = ElementRef::wrap(child) {
					out.push(convert_element(el).into_node());
				}
			}
			_ => {}
		}
	}
	out
}

fn convert_element(el: ElementRef<'_>) -> Element {
	let value = el.value();
	let mut element = Element::new(Cow::Owned(value.name().to_string()));
	for (name, attr) in value.attrs() {
		element.add_attr(name.to_string(), attr.to_string());
	}
	for child in convert_children(el) {
		element.add_child(child);
	}
	element
}
