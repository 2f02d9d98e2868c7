//! Block error types

use thiserror::Error;

/// Block-related errors
///
/// The lenient entry points (`render`, `parse_static_html`, batch hydration)
/// never return these; they turn them into diagnostics and degrade. The
/// strict `try_*` variants surface them directly.
#[derive(Error, Debug)]
pub enum BlockError {
	/// Block type discriminator is not one of the registered kinds
	#[error("Unknown block type: {0}")]
	UnknownBlockType(String),

	/// No embedded config script was found inside the block markup
	#[error("Config script not found for block type: {0}")]
	ConfigMissing(String),

	/// Embedded config is present but not a JSON object
	#[error("Malformed config for block type {block_type}: {reason}")]
	ConfigMalformed {
		/// The block type whose config failed to parse
		block_type: String,
		/// Parser message
		reason: String,
	},

	/// Block type is valid but no interactive component is registered for it
	#[error("No component registered for block type: {0}")]
	RendererMissing(String),

	/// Insert command name is not registered
	#[error("Unknown insert command: {0}")]
	UnknownCommand(String),

	/// Block id not present in the document
	#[error("Block not found: {0}")]
	BlockNotFound(String),

	/// JSON serialization error
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// Settings could not be loaded
	#[error("Settings error: {0}")]
	Settings(String),
}

/// Result type for block operations
pub type BlockResult<T> = Result<T, BlockError>;
