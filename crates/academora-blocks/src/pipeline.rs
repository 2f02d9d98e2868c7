//! Static render pipeline
//!
//! [`BlockRenderer`] resolves a block type by name, coerces the raw
//! attributes and delegates to the registry. An unknown type never fails
//! the surrounding document: it renders an empty placeholder element and is
//! reported to the renderer's [`DiagnosticSink`].
//!
//! ```ignore
//! use academora_blocks::pipeline::{BlockRenderer, RenderOptions};
//! use serde_json::json;
//!
//! let renderer = BlockRenderer::with_options(RenderOptions::new().emit_block_ids(false));
//! let html = renderer.render_to_string("checklist", &json!({"title": "Visa"}));
//! ```

use std::fmt;
use std::sync::Arc;

use academora_core::markers::{BLOCK_PLACEHOLDER_ATTR, BLOCK_TYPE_ATTR};
use academora_core::node::{Element, IntoNode, Node};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attributes::BlockAttributes;
use crate::block_type::BlockType;
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::editor::{BlockDocument, BlockNode};
use crate::error::{BlockError, BlockResult};

/// Options for static rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
	/// Whether rendered blocks carry their `data-block-id`.
	pub emit_block_ids: bool,
	/// Whether unknown types render a placeholder element (otherwise nothing).
	pub unknown_placeholder: bool,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			emit_block_ids: true,
			unknown_placeholder: true,
		}
	}
}

impl RenderOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets whether block ids are written to the markup.
	pub fn emit_block_ids(mut self, emit: bool) -> Self {
		self.emit_block_ids = emit;
		self
	}

	/// Sets whether unknown types leave a placeholder behind.
	pub fn unknown_placeholder(mut self, enable: bool) -> Self {
		self.unknown_placeholder = enable;
		self
	}
}

/// Renders blocks to static HTML
#[derive(Clone)]
pub struct BlockRenderer {
	options: RenderOptions,
	sink: Arc<dyn DiagnosticSink>,
}

impl Default for BlockRenderer {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for BlockRenderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BlockRenderer")
			.field("options", &self.options)
			.finish_non_exhaustive()
	}
}

impl BlockRenderer {
	/// Creates a renderer with default options that logs diagnostics.
	pub fn new() -> Self {
		Self::with_options(RenderOptions::default())
	}

	/// Creates a renderer with custom options.
	pub fn with_options(options: RenderOptions) -> Self {
		Self {
			options,
			sink: Arc::new(TracingSink),
		}
	}

	/// Replaces the diagnostic sink.
	pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
		self.sink = sink;
		self
	}

	/// Returns the render options.
	pub fn options(&self) -> &RenderOptions {
		&self.options
	}

	/// Renders a block from its type name and raw attributes.
	pub fn render(&self, block_type: &str, attributes: &Value) -> Node {
		match block_type.parse::<BlockType>() {
			Ok(block_type) => {
				let definition = block_type.definition();
				definition.render_static_html(&definition.parse_attributes(attributes))
			}
			Err(error) => self.unknown(block_type, &error),
		}
	}

	/// Renders already coerced attributes.
	pub fn render_attributes(&self, attributes: &BlockAttributes, block_id: Option<&str>) -> Node {
		let block_id = block_id.filter(|_| self.options.emit_block_ids);
		attributes
			.block_type()
			.definition()
			.render_static_html_with_id(attributes, block_id)
	}

	/// Renders a block of a document.
	pub fn render_block(&self, block: &BlockNode) -> Node {
		self.render_attributes(block.attributes(), Some(block.block_id()))
	}

	/// Renders a block from its type name and raw attributes to HTML.
	pub fn render_to_string(&self, block_type: &str, attributes: &Value) -> String {
		self.render(block_type, attributes).render_to_string()
	}

	/// Renders every block of a document, one block per line.
	pub fn render_document(&self, document: &BlockDocument) -> String {
		document
			.blocks()
			.iter()
			.map(|block| self.render_block(block).render_to_string())
			.collect::<Vec<_>>()
			.join("\n")
	}

	fn unknown(&self, block_type: &str, error: &BlockError) -> Node {
		if let Some(diagnostic) = Diagnostic::from_error(error) {
			self.sink.report(diagnostic);
		}
		if self.options.unknown_placeholder {
			Element::new("div")
				.attr(BLOCK_PLACEHOLDER_ATTR, block_type.to_string())
				.into_node()
		} else {
			Node::Empty
		}
	}
}

/// Renders a block with the default renderer.
pub fn render(block_type: &str, attributes: &Value) -> Node {
	BlockRenderer::new().render(block_type, attributes)
}

/// Renders a block to HTML with the default renderer.
pub fn render_to_string(block_type: &str, attributes: &Value) -> String {
	BlockRenderer::new().render_to_string(block_type, attributes)
}

/// Resolves the block type of a marked element and reads its config.
///
/// # Errors
///
/// Returns [`BlockError::UnknownBlockType`] for a missing or unregistered
/// marker and the config errors of
/// [`BlockDefinition::try_parse_static_html`](crate::registry::BlockDefinition::try_parse_static_html).
pub fn try_parse_static_html(element: &Element) -> BlockResult<(BlockType, BlockAttributes)> {
	let block_type: BlockType = element.attribute(BLOCK_TYPE_ATTR).unwrap_or_default().parse()?;
	let attributes = block_type.definition().try_parse_static_html(element)?;
	Ok((block_type, attributes))
}

/// Lenient counterpart of [`try_parse_static_html`].
///
/// Unknown types yield `None`; missing or malformed configs degrade to the
/// type's defaults. Both are reported to `sink`.
pub fn parse_static_html(
	element: &Element,
	sink: &dyn DiagnosticSink,
) -> Option<(BlockType, BlockAttributes)> {
	let raw = element.attribute(BLOCK_TYPE_ATTR).unwrap_or_default();
	match raw.parse::<BlockType>() {
		Ok(block_type) => Some((
			block_type,
			block_type.definition().parse_static_html_with_sink(element, sink),
		)),
		Err(error) => {
			if let Some(diagnostic) = Diagnostic::from_error(&error) {
				sink.report(diagnostic);
			}
			None
		}
	}
}
