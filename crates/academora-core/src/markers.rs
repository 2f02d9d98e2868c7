//! Block markers for static HTML.
//!
//! These markers are embedded in the rendered HTML so the hydration
//! pipeline can find each block, read its embedded config and mount an
//! interactive component in its place.

use rand::Rng;
use rand::distr::Alphanumeric;

/// The attribute carrying the block type discriminator.
pub const BLOCK_TYPE_ATTR: &str = "data-block-type";

/// The attribute carrying the (optional) block identifier.
pub const BLOCK_ID_ATTR: &str = "data-block-id";

/// The attribute marking the `<script>` that holds a block's JSON config.
pub const BLOCK_CONFIG_ATTR: &str = "data-block-config";

/// The `type` of the config script.
pub const CONFIG_SCRIPT_TYPE: &str = "application/json";

/// The attribute set on containers that hold a mounted component.
pub const BLOCK_MOUNTED_ATTR: &str = "data-block-mounted";

/// The attribute set on the placeholder rendered for unknown block types.
pub const BLOCK_PLACEHOLDER_ATTR: &str = "data-block-placeholder";

/// Default prefix for generated block ids.
pub const DEFAULT_ID_PREFIX: &str = "block";

const ID_SUFFIX_LEN: usize = 9;

/// Generates a block id of the form `block-{millis}-{suffix}`.
///
/// Uniqueness is best-effort: the id combines the current time in
/// milliseconds with a random base-36 suffix and is never checked for
/// collisions. It is only used for DOM bookkeeping.
pub fn generate_block_id() -> String {
	generate_block_id_with_prefix(DEFAULT_ID_PREFIX)
}

/// Generates a block id using a custom prefix.
pub fn generate_block_id_with_prefix(prefix: &str) -> String {
	let millis = chrono::Utc::now().timestamp_millis();
	let suffix: String = rand::rng()
		.sample_iter(Alphanumeric)
		.take(ID_SUFFIX_LEN)
		.map(|b| char::from(b).to_ascii_lowercase())
		.collect();
	format!("{}-{}-{}", prefix, millis, suffix)
}

/// Escapes serialized JSON for embedding as `<script>` text.
///
/// `<` becomes the JSON escape `\u003c`, so the payload can never contain
/// `</script>` while still parsing to the identical value.
pub fn escape_script_json(json: &str) -> String {
	json.replace('<', "\\u003c")
}

/// Represents the marker attributes of a rendered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMarker {
	/// The block type discriminator.
	pub block_type: String,
	/// The block id, when known.
	pub block_id: Option<String>,
}

impl BlockMarker {
	/// Creates a marker without an id.
	pub fn new(block_type: impl Into<String>) -> Self {
		Self {
			block_type: block_type.into(),
			block_id: None,
		}
	}

	/// Sets the block id.
	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.block_id = Some(id.into());
		self
	}

	/// Generates the HTML attributes for this marker.
	pub fn to_attrs(&self) -> Vec<(String, String)> {
		let mut attrs = vec![(BLOCK_TYPE_ATTR.to_string(), self.block_type.clone())];

		if let Some(ref id) = self.block_id {
			attrs.push((BLOCK_ID_ATTR.to_string(), id.clone()));
		}

		attrs
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_generate_block_id_shape() {
		let id = generate_block_id();
		let parts: Vec<&str> = id.split('-').collect();

		assert_eq!(parts.len(), 3);
		assert_eq!(parts[0], "block");
		assert!(parts[1].parse::<i64>().is_ok());
		assert_eq!(parts[2].len(), ID_SUFFIX_LEN);
		assert!(
			parts[2]
				.chars()
				.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
		);
	}

	#[rstest]
	fn test_generate_block_id_with_prefix() {
		let id = generate_block_id_with_prefix("quiz");
		assert!(id.starts_with("quiz-"));
	}

	#[rstest]
	fn test_generated_ids_differ() {
		// Best-effort uniqueness: two calls are overwhelmingly likely to differ
		assert_ne!(generate_block_id(), generate_block_id());
	}

	#[rstest]
	fn test_escape_script_json() {
		let escaped = escape_script_json(r#"{"content":"</script><b>"}"#);
		assert!(!escaped.contains('<'));
		assert_eq!(escaped, r#"{"content":"\u003c/script>\u003cb>"}"#);
	}

	#[rstest]
	fn test_marker_to_attrs() {
		let marker = BlockMarker::new("quiz").with_id("block-1");
		let attrs = marker.to_attrs();
		assert_eq!(
			attrs,
			vec![
				("data-block-type".to_string(), "quiz".to_string()),
				("data-block-id".to_string(), "block-1".to_string()),
			]
		);
	}

	#[rstest]
	fn test_marker_without_id() {
		let attrs = BlockMarker::new("tabs").to_attrs();
		assert_eq!(attrs.len(), 1);
	}
}
