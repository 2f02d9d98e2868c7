//! Arena document model.
//!
//! [`Document`] is a minimal mutable DOM: elements and text nodes stored in
//! an arena and addressed by [`NodeId`]. It supports the operations block
//! hydration needs (attribute access, subtree queries, replacing an element
//! in place) plus subtree mutation observers that queue a
//! [`MutationRecord`] for every insertion.
//!
//! Detached nodes keep their slot until [`Document::release`] frees them;
//! [`Document::clear_children`] frees the removed subtrees itself. Freed
//! slots are reused, and a [`NodeId`] carries the generation of its slot, so
//! an id kept past its release resolves to nothing instead of to the new
//! occupant.
//!
//! ## Example
//!
//! ```ignore
//! use academora_core::dom::Document;
//!
//! let mut doc = Document::new();
//! let article = doc.create_element("article");
//! doc.append_child(doc.root(), article)?;
//!
//! let observer = doc.observe(article);
//! doc.append_html(article, "<p>Hello</p>")?;
//! assert_eq!(doc.take_records(observer).len(), 1);
//! ```

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

use crate::html;
use crate::node::{Element, IntoNode, Node};

/// Identifies a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
	index: usize,
	generation: u32,
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.generation {
			0 => write!(f, "#{}", self.index),
			generation => write!(f, "#{}.{}", self.index, generation),
		}
	}
}

/// Identifies a mutation observer registered on a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Errors raised by document mutations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
	/// The id does not belong to this document.
	#[error("Unknown node: {0}")]
	UnknownNode(NodeId),
	/// The operation requires an element but got a text node.
	#[error("Node {0} is not an element")]
	NotAnElement(NodeId),
	/// The insertion would make a node its own ancestor.
	#[error("Cannot insert {child} into {parent}: hierarchy request error")]
	HierarchyRequest {
		/// The intended parent.
		parent: NodeId,
		/// The node being inserted.
		child: NodeId,
	},
	/// The node is still attached and cannot be released.
	#[error("Node {0} is still attached")]
	StillAttached(NodeId),
	/// The reference node is not a child of the given parent.
	#[error("Node {child} is not a child of {parent}")]
	NotAChild {
		/// The parent searched.
		parent: NodeId,
		/// The node that was expected among its children.
		child: NodeId,
	},
}

/// A record of one child-list change, delivered to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
	/// The node whose children changed.
	pub target: NodeId,
	/// Nodes inserted under `target`.
	pub added: Vec<NodeId>,
	/// Nodes removed from `target`.
	pub removed: Vec<NodeId>,
}

#[derive(Debug, Clone)]
enum NodeKind {
	Element {
		tag: String,
		attrs: Vec<(String, String)>,
	},
	Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
	kind: NodeKind,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
}

#[derive(Debug)]
struct Slot {
	generation: u32,
	data: Option<NodeData>,
}

#[derive(Debug)]
struct Observer {
	id: ObserverId,
	target: NodeId,
	records: Vec<MutationRecord>,
}

/// A mutable arena document.
#[derive(Debug)]
pub struct Document {
	nodes: Vec<Slot>,
	free: Vec<usize>,
	root: NodeId,
	observers: Vec<Observer>,
	next_observer: u64,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// Creates a document whose root is an empty `<body>` element.
	pub fn new() -> Self {
		let root = NodeData {
			kind: NodeKind::Element {
				tag: "body".to_string(),
				attrs: Vec::new(),
			},
			parent: None,
			children: Vec::new(),
		};
		Self {
			nodes: vec![Slot {
				generation: 0,
				data: Some(root),
			}],
			free: Vec::new(),
			root: NodeId {
				index: 0,
				generation: 0,
			},
			observers: Vec::new(),
			next_observer: 0,
		}
	}

	/// Creates a document and parses `html` into its root.
	pub fn from_html(html: &str) -> Self {
		let mut doc = Self::new();
		let root = doc.root;
		for node in html::parse_fragment(html) {
			doc.build(root, &node);
		}
		doc
	}

	/// Returns the root element.
	pub fn root(&self) -> NodeId {
		self.root
	}

	/// Creates a detached element.
	pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
		self.push(NodeKind::Element {
			tag: tag.into(),
			attrs: Vec::new(),
		})
	}

	/// Creates a detached text node.
	pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
		self.push(NodeKind::Text(text.into()))
	}

	/// Returns the tag name of an element.
	pub fn tag_name(&self, id: NodeId) -> Option<&str> {
		match &self.data(id)?.kind {
			NodeKind::Element { tag, .. } => Some(tag),
			NodeKind::Text(_) => None,
		}
	}

	/// Returns whether `id` is an element.
	pub fn is_element(&self, id: NodeId) -> bool {
		self.tag_name(id).is_some()
	}

	/// Returns the parent of a node.
	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.data(id)?.parent
	}

	/// Returns the children of a node.
	pub fn children(&self, id: NodeId) -> &[NodeId] {
		self.data(id).map(|d| d.children.as_slice()).unwrap_or(&[])
	}

	/// Returns an attribute value.
	pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
		match &self.data(id)?.kind {
			NodeKind::Element { attrs, .. } => attrs
				.iter()
				.find(|(key, _)| key == name)
				.map(|(_, value)| value.as_str()),
			NodeKind::Text(_) => None,
		}
	}

	/// Returns whether an element carries an attribute.
	pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
		self.get_attribute(id, name).is_some()
	}

	/// Sets an attribute, replacing an existing value.
	pub fn set_attribute(
		&mut self,
		id: NodeId,
		name: impl Into<String>,
		value: impl Into<String>,
	) -> Result<(), DomError> {
		let name = name.into();
		let value = value.into();
		let attrs = self.attrs_mut(id)?;
		match attrs.iter_mut().find(|(key, _)| *key == name) {
			Some(slot) => slot.1 = value,
			None => attrs.push((name, value)),
		}
		Ok(())
	}

	/// Removes an attribute. Returns whether it was present.
	pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<bool, DomError> {
		let attrs = self.attrs_mut(id)?;
		let before = attrs.len();
		attrs.retain(|(key, _)| key != name);
		Ok(attrs.len() != before)
	}

	/// Returns whether `ancestor` is `node` or one of its ancestors.
	pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
		let mut current = Some(node);
		while let Some(id) = current {
			if id == ancestor {
				return true;
			}
			current = self.parent(id);
		}
		false
	}

	/// Returns whether a node is attached to the document root.
	pub fn is_connected(&self, id: NodeId) -> bool {
		self.contains(self.root, id)
	}

	/// Returns every descendant of `id` in document order, excluding `id`.
	pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
		while let Some(next) = stack.pop() {
			out.push(next);
			stack.extend(self.children(next).iter().rev().copied());
		}
		out
	}

	/// Returns every descendant element of `id` carrying attribute `name`.
	pub fn query_all_with_attribute(&self, id: NodeId, name: &str) -> Vec<NodeId> {
		self.descendants(id)
			.into_iter()
			.filter(|&node| self.has_attribute(node, name))
			.collect()
	}

	/// Concatenated text of every text node under `id`.
	pub fn text_content(&self, id: NodeId) -> String {
		let mut out = String::new();
		if let Some(NodeKind::Text(text)) = self.data(id).map(|d| &d.kind) {
			out.push_str(text);
		}
		for node in self.descendants(id) {
			if let Some(NodeKind::Text(text)) = self.data(node).map(|d| &d.kind) {
				out.push_str(text);
			}
		}
		out
	}

	/// Appends `child` to `parent`, detaching it from any previous parent.
	pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
		self.check_insert(parent, child)?;
		self.detach(child)?;
		self.data_mut(parent)?.children.push(child);
		self.data_mut(child)?.parent = Some(parent);
		self.notify(parent, vec![child], Vec::new());
		Ok(())
	}

	/// Inserts `child` before `reference` among `parent`'s children.
	pub fn insert_before(
		&mut self,
		parent: NodeId,
		child: NodeId,
		reference: NodeId,
	) -> Result<(), DomError> {
		self.check_insert(parent, child)?;
		if self.parent(reference) != Some(parent) {
			return Err(DomError::NotAChild {
				parent,
				child: reference,
			});
		}
		self.detach(child)?;
		let position = self.position_in_parent(parent, reference)?;
		self.data_mut(parent)?.children.insert(position, child);
		self.data_mut(child)?.parent = Some(parent);
		self.notify(parent, vec![child], Vec::new());
		Ok(())
	}

	/// Removes `child` from `parent`.
	pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
		if self.parent(child) != Some(parent) {
			return Err(DomError::NotAChild { parent, child });
		}
		self.detach(child)
	}

	/// Replaces `old` with `new` in `old`'s parent, keeping its position.
	///
	/// Observers see a single record with `new` added and `old` removed.
	pub fn replace_with(&mut self, old: NodeId, new: NodeId) -> Result<(), DomError> {
		self.data(old).ok_or(DomError::UnknownNode(old))?;
		let Some(parent) = self.parent(old) else {
			// Detached node: nothing to replace in
			return Err(DomError::NotAChild {
				parent: self.root,
				child: old,
			});
		};
		self.check_insert(parent, new)?;
		if self.contains(new, old) {
			return Err(DomError::HierarchyRequest { parent, child: new });
		}
		self.detach_silently(new)?;
		let position = self.position_in_parent(parent, old)?;
		self.data_mut(parent)?.children[position] = new;
		self.data_mut(new)?.parent = Some(parent);
		self.data_mut(old)?.parent = None;
		self.notify(parent, vec![new], vec![old]);
		Ok(())
	}

	/// Removes every child of `id` and frees the removed subtrees.
	///
	/// The ids in the queued record no longer resolve once this returns.
	pub fn clear_children(&mut self, id: NodeId) -> Result<(), DomError> {
		let removed = std::mem::take(&mut self.data_mut(id)?.children);
		for child in &removed {
			self.data_mut(*child)?.parent = None;
		}
		if removed.is_empty() {
			return Ok(());
		}
		for child in &removed {
			self.free_subtree(*child);
		}
		self.notify(id, Vec::new(), removed);
		Ok(())
	}

	/// Frees a detached node and its whole subtree. Returns the number of
	/// nodes freed.
	///
	/// # Errors
	///
	/// Returns [`DomError::StillAttached`] for the root or a node that has a
	/// parent, and [`DomError::UnknownNode`] for an id that does not resolve.
	pub fn release(&mut self, id: NodeId) -> Result<usize, DomError> {
		let data = self.data(id).ok_or(DomError::UnknownNode(id))?;
		if id == self.root || data.parent.is_some() {
			return Err(DomError::StillAttached(id));
		}
		Ok(self.free_subtree(id))
	}

	/// Number of live nodes, attached or not.
	pub fn node_count(&self) -> usize {
		self.nodes.len() - self.free.len()
	}

	/// Number of slots the arena holds, live or free.
	pub fn arena_len(&self) -> usize {
		self.nodes.len()
	}

	/// Builds `node` under `parent`. Returns the ids of the top-level nodes
	/// created (fragments are flattened, empty nodes create nothing).
	///
	/// Observers see one record per top-level node.
	pub fn append_node(&mut self, parent: NodeId, node: &Node) -> Result<Vec<NodeId>, DomError> {
		if !self.is_element(parent) {
			return Err(match self.data(parent) {
				Some(_) => DomError::NotAnElement(parent),
				None => DomError::UnknownNode(parent),
			});
		}
		let mut top = Vec::new();
		self.build_detached(node, &mut top);
		for id in &top {
			self.append_child(parent, *id)?;
		}
		Ok(top)
	}

	/// Parses `html` and appends the result under `parent`.
	pub fn append_html(&mut self, parent: NodeId, html: &str) -> Result<Vec<NodeId>, DomError> {
		let nodes = html::parse_fragment(html);
		self.append_node(parent, &Node::Fragment(nodes))
	}

	/// Creates a detached subtree from `node` and returns its top-level ids.
	pub fn create_node(&mut self, node: &Node) -> Vec<NodeId> {
		let mut top = Vec::new();
		self.build_detached(node, &mut top);
		top
	}

	/// Snapshots the subtree rooted at `id` as a [`Node`].
	pub fn to_node(&self, id: NodeId) -> Node {
		let Some(data) = self.data(id) else {
			return Node::Empty;
		};
		match &data.kind {
			NodeKind::Text(text) => Node::text(text.clone()),
			NodeKind::Element { tag, attrs } => {
				let mut element = Element::new(Cow::Owned(tag.clone()));
				for (name, value) in attrs {
					element.add_attr(name.clone(), value.clone());
				}
				for child in &data.children {
					element.add_child(self.to_node(*child));
				}
				element.into_node()
			}
		}
	}

	/// Serializes the subtree rooted at `id`, including `id` itself.
	pub fn outer_html(&self, id: NodeId) -> String {
		self.to_node(id).render_to_string()
	}

	/// Serializes the children of `id`.
	pub fn inner_html(&self, id: NodeId) -> String {
		self.children(id)
			.iter()
			.map(|child| self.to_node(*child).render_to_string())
			.collect()
	}

	/// Registers a subtree observer on `target`.
	///
	/// Every child-list change at or below `target` queues a record that
	/// [`take_records`](Self::take_records) drains. Observation lasts until
	/// [`disconnect`](Self::disconnect).
	pub fn observe(&mut self, target: NodeId) -> ObserverId {
		let id = ObserverId(self.next_observer);
		self.next_observer += 1;
		tracing::trace!(observer = id.0, target = %target, "observer registered");
		self.observers.push(Observer {
			id,
			target,
			records: Vec::new(),
		});
		id
	}

	/// Unregisters an observer. Returns whether it was registered.
	pub fn disconnect(&mut self, observer: ObserverId) -> bool {
		let before = self.observers.len();
		self.observers.retain(|o| o.id != observer);
		self.observers.len() != before
	}

	/// Drains the queued records of an observer.
	pub fn take_records(&mut self, observer: ObserverId) -> Vec<MutationRecord> {
		self.observers
			.iter_mut()
			.find(|o| o.id == observer)
			.map(|o| std::mem::take(&mut o.records))
			.unwrap_or_default()
	}

	/// Returns the number of queued records of an observer.
	pub fn pending_records(&self, observer: ObserverId) -> usize {
		self.observers
			.iter()
			.find(|o| o.id == observer)
			.map_or(0, |o| o.records.len())
	}

	fn push(&mut self, kind: NodeKind) -> NodeId {
		let data = NodeData {
			kind,
			parent: None,
			children: Vec::new(),
		};
		if let Some(index) = self.free.pop()
			&& let Some(slot) = self.nodes.get_mut(index)
		{
			slot.data = Some(data);
			return NodeId {
				index,
				generation: slot.generation,
			};
		}
		self.nodes.push(Slot {
			generation: 0,
			data: Some(data),
		});
		NodeId {
			index: self.nodes.len() - 1,
			generation: 0,
		}
	}

	fn free_subtree(&mut self, id: NodeId) -> usize {
		let mut freed = 0;
		let mut stack = vec![id];
		while let Some(next) = stack.pop() {
			let Some(slot) = self
				.nodes
				.get_mut(next.index)
				.filter(|slot| slot.generation == next.generation)
			else {
				continue;
			};
			let Some(data) = slot.data.take() else {
				continue;
			};
			slot.generation = slot.generation.wrapping_add(1);
			self.free.push(next.index);
			stack.extend(data.children);
			freed += 1;
		}
		freed
	}

	fn data(&self, id: NodeId) -> Option<&NodeData> {
		self.nodes
			.get(id.index)
			.filter(|slot| slot.generation == id.generation)
			.and_then(|slot| slot.data.as_ref())
	}

	fn data_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
		self.nodes
			.get_mut(id.index)
			.filter(|slot| slot.generation == id.generation)
			.and_then(|slot| slot.data.as_mut())
			.ok_or(DomError::UnknownNode(id))
	}

	fn attrs_mut(&mut self, id: NodeId) -> Result<&mut Vec<(String, String)>, DomError> {
		match &mut self.data_mut(id)?.kind {
			NodeKind::Element { attrs, .. } => Ok(attrs),
			NodeKind::Text(_) => Err(DomError::NotAnElement(id)),
		}
	}

	fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
		self.data(child).ok_or(DomError::UnknownNode(child))?;
		match self.data(parent).map(|d| &d.kind) {
			None => return Err(DomError::UnknownNode(parent)),
			Some(NodeKind::Text(_)) => return Err(DomError::NotAnElement(parent)),
			Some(NodeKind::Element { .. }) => {}
		}
		if self.contains(child, parent) {
			return Err(DomError::HierarchyRequest { parent, child });
		}
		Ok(())
	}

	fn position_in_parent(&self, parent: NodeId, child: NodeId) -> Result<usize, DomError> {
		self.children(parent)
			.iter()
			.position(|&c| c == child)
			.ok_or(DomError::NotAChild { parent, child })
	}

	fn detach(&mut self, child: NodeId) -> Result<(), DomError> {
		if let Some(parent) = self.detach_silently(child)? {
			self.notify(parent, Vec::new(), vec![child]);
		}
		Ok(())
	}

	fn detach_silently(&mut self, child: NodeId) -> Result<Option<NodeId>, DomError> {
		let Some(parent) = self.data_mut(child)?.parent.take() else {
			return Ok(None);
		};
		self.data_mut(parent)?.children.retain(|&c| c != child);
		Ok(Some(parent))
	}

	fn build(&mut self, parent: NodeId, node: &Node) {
		let mut top = Vec::new();
		self.build_detached(node, &mut top);
		for id in top {
			if let Ok(data) = self.data_mut(id) {
				data.parent = Some(parent);
			}
			if let Ok(data) = self.data_mut(parent) {
				data.children.push(id);
			}
		}
	}

	fn build_detached(&mut self, node: &Node, top: &mut Vec<NodeId>) {
		match node {
			Node::Element(el) => {
				let id = self.push(NodeKind::Element {
					tag: el.tag_name().to_string(),
					attrs: el
						.attrs()
						.iter()
						.map(|(k, v)| (k.to_string(), v.to_string()))
						.collect(),
				});
				for child in el.child_nodes() {
					self.build(id, child);
				}
				top.push(id);
			}
			Node::Text(text) => top.push(self.push(NodeKind::Text(text.to_string()))),
			Node::Fragment(children) => {
				for child in children {
					self.build_detached(child, top);
				}
			}
			Node::Empty => {}
		}
	}

	fn notify(&mut self, target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId>) {
		if self.observers.is_empty() {
			return;
		}
		let interested: Vec<usize> = self
			.observers
			.iter()
			.enumerate()
			.filter(|(_, o)| self.contains(o.target, target))
			.map(|(index, _)| index)
			.collect();
		for index in interested {
			self.observers[index].records.push(MutationRecord {
				target,
				added: added.clone(),
				removed: removed.clone(),
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn article(doc: &mut Document) -> NodeId {
		let article = doc.create_element("article");
		doc.append_child(doc.root(), article).unwrap();
		article
	}

	#[rstest]
	fn test_append_and_query() {
		// Arrange
		let mut doc = Document::new();
		let root = article(&mut doc);

		// Act
		doc.append_html(
			root,
			r#"<div data-block-type="quiz"><p>q</p></div><div data-block-type="tabs"></div>"#,
		)
		.unwrap();

		// Assert
		let blocks = doc.query_all_with_attribute(root, "data-block-type");
		assert_eq!(blocks.len(), 2);
		assert_eq!(doc.get_attribute(blocks[0], "data-block-type"), Some("quiz"));
		assert_eq!(doc.text_content(root), "q");
	}

	#[rstest]
	fn test_descendants_are_in_document_order() {
		let mut doc = Document::from_html("<ul><li>a</li><li>b</li></ul><p>c</p>");
		let tags: Vec<_> = doc
			.descendants(doc.root())
			.into_iter()
			.filter_map(|id| doc.tag_name(id).map(str::to_string))
			.collect();
		assert_eq!(tags, vec!["ul", "li", "li", "p"]);
		let p = doc.create_element("p");
		assert!(!doc.is_connected(p));
	}

	#[rstest]
	fn test_replace_with_keeps_position() {
		// Arrange
		let mut doc = Document::from_html("<a></a><b></b><c></c>");
		let b = doc.children(doc.root())[1];
		let replacement = doc.create_element("span");

		// Act
		doc.replace_with(b, replacement).unwrap();

		// Assert
		assert_eq!(doc.inner_html(doc.root()), "<a></a><span></span><c></c>");
		assert_eq!(doc.parent(b), None);
		assert!(!doc.is_connected(b));
	}

	#[rstest]
	fn test_replace_detached_node_fails() {
		let mut doc = Document::new();
		let old = doc.create_element("div");
		let new = doc.create_element("div");
		assert!(matches!(
			doc.replace_with(old, new),
			Err(DomError::NotAChild { .. })
		));
	}

	#[rstest]
	fn test_append_into_descendant_is_rejected() {
		let mut doc = Document::new();
		let outer = article(&mut doc);
		let inner = doc.create_element("div");
		doc.append_child(outer, inner).unwrap();

		let result = doc.append_child(inner, outer);

		assert_eq!(
			result,
			Err(DomError::HierarchyRequest {
				parent: inner,
				child: outer
			})
		);
	}

	#[rstest]
	fn test_text_node_cannot_have_children() {
		let mut doc = Document::new();
		let text = doc.create_text("hi");
		let el = doc.create_element("b");
		assert_eq!(doc.append_child(text, el), Err(DomError::NotAnElement(text)));
	}

	#[rstest]
	fn test_attributes() {
		let mut doc = Document::new();
		let el = doc.create_element("div");
		doc.set_attribute(el, "data-block-id", "a").unwrap();
		doc.set_attribute(el, "data-block-id", "b").unwrap();
		assert_eq!(doc.get_attribute(el, "data-block-id"), Some("b"));
		assert!(doc.remove_attribute(el, "data-block-id").unwrap());
		assert!(!doc.remove_attribute(el, "data-block-id").unwrap());
		assert!(!doc.has_attribute(el, "data-block-id"));
	}

	#[rstest]
	fn test_observer_receives_subtree_insertions() {
		// Arrange
		let mut doc = Document::new();
		let root = article(&mut doc);
		let section = doc.create_element("section");
		doc.append_child(root, section).unwrap();
		let observer = doc.observe(root);

		// Act
		let added = doc.append_html(section, "<p>one</p><p>two</p>").unwrap();

		// Assert
		let records = doc.take_records(observer);
		assert_eq!(records.len(), 2);
		assert!(records.iter().all(|r| r.target == section));
		assert_eq!(records[0].added, vec![added[0]]);
		assert_eq!(doc.pending_records(observer), 0);
	}

	#[rstest]
	fn test_observer_ignores_mutations_outside_target() {
		let mut doc = Document::new();
		let watched = article(&mut doc);
		let other = doc.create_element("aside");
		doc.append_child(doc.root(), other).unwrap();
		let observer = doc.observe(watched);

		doc.append_html(other, "<p>elsewhere</p>").unwrap();

		assert!(doc.take_records(observer).is_empty());
	}

	#[rstest]
	fn test_disconnected_observer_stops_recording() {
		let mut doc = Document::new();
		let root = article(&mut doc);
		let observer = doc.observe(root);

		assert!(doc.disconnect(observer));
		doc.append_html(root, "<p>x</p>").unwrap();

		assert!(!doc.disconnect(observer));
		assert!(doc.take_records(observer).is_empty());
	}

	#[rstest]
	fn test_replace_emits_single_record() {
		let mut doc = Document::from_html("<div id=\"a\"></div>");
		let old = doc.children(doc.root())[0];
		let observer = doc.observe(doc.root());
		let new = doc.create_element("div");

		doc.replace_with(old, new).unwrap();

		let records = doc.take_records(observer);
		assert_eq!(
			records,
			vec![MutationRecord {
				target: doc.root(),
				added: vec![new],
				removed: vec![old],
			}]
		);
	}

	#[rstest]
	fn test_to_node_round_trips_markup() {
		let html = r#"<div data-block-type="cta"><script type="application/json" data-block-config="">{"a":"<"}</script><p>x &amp; y</p></div>"#;
		let doc = Document::from_html(html);
		let block = doc.children(doc.root())[0];
		assert_eq!(doc.outer_html(block), html);
	}

	#[rstest]
	fn test_clear_children() {
		let mut doc = Document::from_html("<ul><li>a</li><li>b</li></ul>");
		let ul = doc.children(doc.root())[0];
		let li = doc.children(ul)[0];
		doc.clear_children(ul).unwrap();
		assert!(doc.children(ul).is_empty());
		assert_eq!(doc.outer_html(ul), "<ul></ul>");
		assert_eq!(doc.tag_name(li), None);
		assert_eq!(doc.node_count(), 2);
	}

	#[rstest]
	fn test_rebuilding_children_reuses_freed_slots() {
		// Arrange
		let mut doc = Document::new();
		let root = article(&mut doc);
		let view = Element::new("p").child("text").into_node();
		doc.append_node(root, &view).unwrap();
		let arena_len = doc.arena_len();

		// Act
		for _ in 0..100 {
			doc.clear_children(root).unwrap();
			doc.append_node(root, &view).unwrap();
		}

		// Assert
		assert_eq!(doc.arena_len(), arena_len);
		assert_eq!(doc.node_count(), 4);
		assert_eq!(doc.inner_html(root), "<p>text</p>");
	}

	#[rstest]
	fn test_released_id_does_not_resolve_to_new_occupant() {
		// Arrange
		let mut doc = Document::new();
		let old = doc.create_element("div");
		doc.append_html(old, "<span></span>").unwrap();

		// Act
		let freed = doc.release(old).unwrap();
		let new = doc.create_element("section");

		// Assert
		assert_eq!(freed, 2);
		assert_ne!(old, new);
		assert_eq!(doc.tag_name(old), None);
		assert_eq!(doc.tag_name(new), Some("section"));
		assert_eq!(doc.set_attribute(old, "id", "x"), Err(DomError::UnknownNode(old)));
	}

	#[rstest]
	fn test_release_rejects_attached_nodes() {
		let mut doc = Document::new();
		let root = article(&mut doc);

		assert_eq!(doc.release(root), Err(DomError::StillAttached(root)));
		assert_eq!(doc.release(doc.root()), Err(DomError::StillAttached(doc.root())));
	}
}
