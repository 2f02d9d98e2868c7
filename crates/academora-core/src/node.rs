//! Node types for static block rendering.
//!
//! This module provides the value-level tree that block renderers produce
//! and that the hydration pipeline reads back.
//!
//! ## Overview
//!
//! The `Node` enum is a plain data representation of HTML: elements, text,
//! fragments and the empty node. It carries no DOM handles, so the same
//! render function runs on the server (where no DOM exists) and in tests.
//!
//! ## Example
//!
//! ```ignore
//! use academora_core::node::{Element, IntoNode};
//!
//! let node = Element::new("div")
//!     .attr("class", "checklist-block")
//!     .child("Hello, World!")
//!     .into_node();
//!
//! let html = node.render_to_string();
//! ```

mod util;

pub(crate) use util::html_escape;
pub use util::{BOOLEAN_ATTRS, RAW_TEXT_ELEMENTS, is_boolean_attr_truthy};

use std::borrow::Cow;

/// A unified representation of renderable content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	/// An HTML element.
	Element(Element),
	/// A text node.
	Text(Cow<'static, str>),
	/// A fragment containing multiple nodes (no wrapper element).
	Fragment(Vec<Node>),
	/// An empty node (renders nothing).
	Empty,
}

/// Represents an HTML element in the node tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
	/// The tag name (e.g., "div", "span").
	tag: Cow<'static, str>,
	/// HTML attributes, in insertion order.
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	/// Child nodes.
	children: Vec<Node>,
	/// Whether this is a void element (no closing tag).
	is_void: bool,
}

impl Element {
	/// Creates a new element.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a boolean attribute.
	///
	/// Boolean attributes in HTML are either present (true) or absent (false).
	/// When true, the attribute is added with the attribute name as its value
	/// (e.g., `disabled="disabled"`). When false, the attribute is not added.
	pub fn bool_attr(self, name: impl Into<Cow<'static, str>>, value: bool) -> Self {
		if value {
			let name = name.into();
			self.attr(name.clone(), name)
		} else {
			self
		}
	}

	/// Adds an attribute only when `value` is `Some`.
	pub fn opt_attr(
		self,
		name: impl Into<Cow<'static, str>>,
		value: Option<impl Into<Cow<'static, str>>>,
	) -> Self {
		match value {
			Some(value) => self.attr(name, value),
			None => self,
		}
	}

	/// Adds a child node.
	pub fn child(mut self, child: impl IntoNode) -> Self {
		self.children.push(child.into_node());
		self
	}

	/// Adds multiple child nodes.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoNode>) -> Self {
		self.children
			.extend(children.into_iter().map(|c| c.into_node()));
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Returns the value of the first attribute named `name`.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(key, _)| key.as_ref() == name)
			.map(|(_, value)| value.as_ref())
	}

	/// Returns whether the element carries an attribute named `name`.
	pub fn has_attribute(&self, name: &str) -> bool {
		self.attrs.iter().any(|(key, _)| key.as_ref() == name)
	}

	/// Replaces the value of `name`, or appends it when absent.
	pub fn set_attribute(
		&mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) {
		let name = name.into();
		let value = value.into();
		match self.attrs.iter_mut().find(|(key, _)| *key == name) {
			Some(slot) => slot.1 = value,
			None => self.attrs.push((name, value)),
		}
	}

	/// Returns whether the space-separated `class` attribute contains `class`.
	pub fn has_class(&self, class: &str) -> bool {
		self.attribute("class")
			.is_some_and(|value| value.split_whitespace().any(|c| c == class))
	}

	/// Returns the child nodes.
	pub fn child_nodes(&self) -> &[Node] {
		&self.children
	}

	/// Returns the element children, flattening fragments.
	pub fn child_elements(&self) -> Vec<&Element> {
		let mut out = Vec::new();
		for child in &self.children {
			child.collect_elements(&mut out);
		}
		out
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}

	/// Adds an attribute mutably (for parser use).
	pub fn add_attr(
		&mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) {
		self.attrs.push((name.into(), value.into()));
	}

	/// Adds a child mutably (for parser use).
	pub fn add_child(&mut self, child: impl IntoNode) {
		self.children.push(child.into_node());
	}

	/// Concatenated text of every descendant text node.
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		for child in &self.children {
			child.push_text(&mut out);
		}
		out
	}

	/// Finds the first descendant element (depth-first, pre-order) matching
	/// `predicate`. The element itself is not considered.
	pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
		for child in &self.children {
			if let Some(found) = child.find(predicate) {
				return Some(found);
			}
		}
		None
	}

	/// Collects every descendant element matching `predicate`, in document order.
	pub fn find_all(&self, predicate: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
		let mut out = Vec::new();
		for child in &self.children {
			child.find_all_into(predicate, &mut out);
		}
		out
	}

	/// Consumes the element and returns all parts.
	///
	/// Returns a tuple of (tag, attrs, children).
	#[allow(clippy::type_complexity)] // Tuple decomposition is intentional for destructuring
	pub fn into_parts(
		self,
	) -> (
		Cow<'static, str>,
		Vec<(Cow<'static, str>, Cow<'static, str>)>,
		Vec<Node>,
	) {
		(self.tag, self.attrs, self.children)
	}

	fn is_raw_text(&self) -> bool {
		RAW_TEXT_ELEMENTS.contains(&self.tag.as_ref())
	}
}

impl Node {
	/// Creates an element node.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> Element {
		Element::new(tag)
	}

	/// Creates a text node.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment node.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoNode>) -> Self {
		Self::Fragment(children.into_iter().map(|c| c.into_node()).collect())
	}

	/// Creates an empty node.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Returns the element if this node is one.
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Node::Element(el) => Some(el),
			_ => None,
		}
	}

	/// Returns the top-level elements of this node, flattening fragments.
	pub fn elements(&self) -> Vec<&Element> {
		let mut out = Vec::new();
		self.collect_elements(&mut out);
		out
	}

	/// Finds the first element in this node (itself included) matching `predicate`.
	pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
		match self {
			Node::Element(el) => {
				if predicate(el) {
					Some(el)
				} else {
					el.find(predicate)
				}
			}
			Node::Fragment(children) => children.iter().find_map(|c| c.find(predicate)),
			Node::Text(_) | Node::Empty => None,
		}
	}

	/// Collects every element in this node (itself included) matching `predicate`.
	pub fn find_all(&self, predicate: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
		let mut out = Vec::new();
		self.find_all_into(predicate, &mut out);
		out
	}

	/// Concatenated text of every text node in this subtree.
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		self.push_text(&mut out);
		out
	}

	/// Renders the node to an HTML string.
	///
	/// Text inside raw-text elements (`script`, `style`) is written verbatim;
	/// every other text node and attribute value is escaped.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_to_string_inner(&mut output, false);
		output
	}

	fn render_to_string_inner(&self, output: &mut String, raw_text: bool) {
		match self {
			Node::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());

				for (name, value) in el.attrs() {
					// Skip boolean attributes with falsy values (empty, "false", "0")
					let name_str: &str = name.as_ref();
					if BOOLEAN_ATTRS.contains(&name_str) && !is_boolean_attr_truthy(value) {
						continue;
					}

					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if el.is_void() {
					output.push_str(" />");
				} else {
					output.push('>');
					let raw = el.is_raw_text();
					for child in el.child_nodes() {
						child.render_to_string_inner(output, raw);
					}
					output.push_str("</");
					output.push_str(el.tag_name());
					output.push('>');
				}
			}
			Node::Text(text) => {
				if raw_text {
					output.push_str(text);
				} else {
					output.push_str(&html_escape(text));
				}
			}
			Node::Fragment(children) => {
				for child in children {
					child.render_to_string_inner(output, raw_text);
				}
			}
			Node::Empty => {}
		}
	}

	fn collect_elements<'a>(&'a self, out: &mut Vec<&'a Element>) {
		match self {
			Node::Element(el) => out.push(el),
			Node::Fragment(children) => {
				for child in children {
					child.collect_elements(out);
				}
			}
			Node::Text(_) | Node::Empty => {}
		}
	}

	fn find_all_into<'a>(
		&'a self,
		predicate: &dyn Fn(&Element) -> bool,
		out: &mut Vec<&'a Element>,
	) {
		match self {
			Node::Element(el) => {
				if predicate(el) {
					out.push(el);
				}
				for child in el.child_nodes() {
					child.find_all_into(predicate, out);
				}
			}
			Node::Fragment(children) => {
				for child in children {
					child.find_all_into(predicate, out);
				}
			}
			Node::Text(_) | Node::Empty => {}
		}
	}

	fn push_text(&self, out: &mut String) {
		match self {
			Node::Element(el) => {
				for child in el.child_nodes() {
					child.push_text(out);
				}
			}
			Node::Text(text) => out.push_str(text),
			Node::Fragment(children) => {
				for child in children {
					child.push_text(out);
				}
			}
			Node::Empty => {}
		}
	}
}

/// Trait for types that can be converted into a Node.
pub trait IntoNode {
	/// Converts self into a Node.
	fn into_node(self) -> Node;
}

impl IntoNode for Node {
	fn into_node(self) -> Node {
		self
	}
}

impl IntoNode for Element {
	fn into_node(self) -> Node {
		Node::Element(self)
	}
}

impl IntoNode for String {
	fn into_node(self) -> Node {
		Node::Text(Cow::Owned(self))
	}
}

impl IntoNode for &String {
	fn into_node(self) -> Node {
		Node::Text(Cow::Owned(self.clone()))
	}
}

impl IntoNode for &'static str {
	fn into_node(self) -> Node {
		Node::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoNode> IntoNode for Option<T> {
	fn into_node(self) -> Node {
		match self {
			Some(v) => v.into_node(),
			None => Node::Empty,
		}
	}
}

impl<T: IntoNode> IntoNode for Vec<T> {
	fn into_node(self) -> Node {
		Node::Fragment(self.into_iter().map(|v| v.into_node()).collect())
	}
}

impl IntoNode for () {
	fn into_node(self) -> Node {
		Node::Empty
	}
}
