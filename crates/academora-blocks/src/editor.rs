//! Authoring surface
//!
//! A [`BlockDocument`] is the ordered list of blocks an author is editing.
//! Blocks are inserted at the cursor through one insert command per type,
//! updated with partial attribute objects, and serialized to the static
//! HTML that is stored and served verbatim. [`BlockDocument::from_html`]
//! reads that HTML back, recovering each block from its embedded config.

use academora_core::html::parse_fragment;
use academora_core::markers::{BLOCK_ID_ATTR, BLOCK_TYPE_ATTR, generate_block_id};
use serde_json::Value;

use crate::attributes::BlockAttributes;
use crate::block_type::BlockType;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::{BlockError, BlockResult};
use crate::pipeline::{BlockRenderer, parse_static_html};
use crate::schema::merge_partial;

/// One block of a document
#[derive(Debug, Clone, PartialEq)]
pub struct BlockNode {
	block_id: String,
	attributes: BlockAttributes,
}

impl BlockNode {
	/// Creates a block node.
	pub fn new(attributes: BlockAttributes, block_id: impl Into<String>) -> Self {
		Self {
			block_id: block_id.into(),
			attributes,
		}
	}

	/// Creates a block node with a generated id.
	pub fn with_generated_id(attributes: BlockAttributes) -> Self {
		Self::new(attributes, generate_block_id())
	}

	/// Returns the block type.
	pub fn block_type(&self) -> BlockType {
		self.attributes.block_type()
	}

	/// Returns the block id.
	pub fn block_id(&self) -> &str {
		&self.block_id
	}

	/// Returns the attributes.
	pub fn attributes(&self) -> &BlockAttributes {
		&self.attributes
	}
}

/// Ordered blocks with an insertion cursor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockDocument {
	blocks: Vec<BlockNode>,
	cursor: usize,
}

impl BlockDocument {
	/// Creates an empty document.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the blocks in order.
	pub fn blocks(&self) -> &[BlockNode] {
		&self.blocks
	}

	/// Returns the number of blocks.
	pub fn len(&self) -> usize {
		self.blocks.len()
	}

	/// Returns whether the document has no blocks.
	pub fn is_empty(&self) -> bool {
		self.blocks.is_empty()
	}

	/// Returns the insertion position.
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Moves the insertion position, clamped to the document length.
	pub fn set_cursor(&mut self, position: usize) {
		self.cursor = position.min(self.blocks.len());
	}

	/// Looks a block up by id.
	pub fn get(&self, block_id: &str) -> Option<&BlockNode> {
		self.blocks.iter().find(|block| block.block_id == block_id)
	}

	fn position(&self, block_id: &str) -> BlockResult<usize> {
		self.blocks
			.iter()
			.position(|block| block.block_id == block_id)
			.ok_or_else(|| BlockError::BlockNotFound(block_id.to_string()))
	}

	/// Appends a block and moves the cursor past it.
	pub fn push(&mut self, block: BlockNode) {
		self.blocks.push(block);
		self.cursor = self.blocks.len();
	}

	/// Inserts a new block at the cursor.
	///
	/// `partial` is merged over the type's defaults before coercion; a
	/// non-object leaves the defaults untouched.
	pub fn insert(&mut self, block_type: BlockType, partial: &Value) -> &BlockNode {
		let definition = block_type.definition();
		let merged = merge_partial(definition.default_attributes().to_value(), partial);
		let block = BlockNode::with_generated_id(definition.parse_attributes(&merged));
		tracing::debug!(
			block_type = %block_type,
			block_id = %block.block_id,
			position = self.cursor,
			"inserting block"
		);

		let position = self.cursor.min(self.blocks.len());
		self.blocks.insert(position, block);
		self.cursor = position + 1;
		&self.blocks[position]
	}

	/// Runs an insert command such as `insertQuiz`.
	///
	/// # Errors
	///
	/// Returns [`BlockError::UnknownCommand`] when no block type registers
	/// `command`.
	pub fn run_command(&mut self, command: &str, partial: &Value) -> BlockResult<&BlockNode> {
		let block_type = BlockType::from_insert_command(command)
			.ok_or_else(|| BlockError::UnknownCommand(command.to_string()))?;
		Ok(self.insert(block_type, partial))
	}

	/// Merges `partial` into a block's attributes. Returns whether they changed.
	///
	/// # Errors
	///
	/// Returns [`BlockError::BlockNotFound`] for an unknown id.
	pub fn update(&mut self, block_id: &str, partial: &Value) -> BlockResult<bool> {
		let position = self.position(block_id)?;
		let block = &mut self.blocks[position];
		let block_type = block.block_type();
		let merged = merge_partial(block.attributes.to_value(), partial);
		let updated = block_type.definition().parse_attributes(&merged);
		if updated == block.attributes {
			return Ok(false);
		}
		block.attributes = updated;
		Ok(true)
	}

	/// Removes a block, keeping the cursor on the same neighbour.
	///
	/// # Errors
	///
	/// Returns [`BlockError::BlockNotFound`] for an unknown id.
	pub fn remove(&mut self, block_id: &str) -> BlockResult<BlockNode> {
		let position = self.position(block_id)?;
		if position < self.cursor {
			self.cursor -= 1;
		}
		Ok(self.blocks.remove(position))
	}

	/// Renders the document to static HTML.
	pub fn to_html(&self) -> String {
		BlockRenderer::new().render_document(self)
	}

	/// Reads a document back from static HTML. Failures are logged.
	pub fn from_html(html: &str) -> Self {
		Self::from_html_with_sink(html, &TracingSink)
	}

	/// Reads a document back from static HTML, reporting failures to `sink`.
	///
	/// Every element carrying `data-block-type` becomes one block. Unknown
	/// types are skipped; missing or malformed configs fall back to the
	/// type's defaults. Blocks without `data-block-id` get a generated one.
	pub fn from_html_with_sink(html: &str, sink: &dyn DiagnosticSink) -> Self {
		let mut document = Self::new();
		for node in parse_fragment(html) {
			for element in node.find_all(&|e| e.has_attribute(BLOCK_TYPE_ATTR)) {
				let Some((_, attributes)) = parse_static_html(element, sink) else {
					continue;
				};
				let block = match element.attribute(BLOCK_ID_ATTR) {
					Some(id) if !id.is_empty() => BlockNode::new(attributes, id),
					_ => BlockNode::with_generated_id(attributes),
				};
				document.push(block);
			}
		}
		document
	}
}
