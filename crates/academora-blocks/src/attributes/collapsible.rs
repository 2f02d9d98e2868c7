use serde::Serialize;
use serde_json::Value;

use crate::schema::coerce;

/// Attributes of the `collapsible` block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollapsibleAttributes {
	/// Summary line
	pub title: String,
	/// Hidden body text
	pub content: String,
	/// Whether the disclosure starts open
	pub default_open: bool,
}

impl Default for CollapsibleAttributes {
	fn default() -> Self {
		Self {
			title: "Click to expand".to_string(),
			content: "Add your content here.".to_string(),
			default_open: false,
		}
	}
}

impl CollapsibleAttributes {
	pub(crate) fn coerce(value: &Value) -> Self {
		let d = Self::default();
		Self {
			title: coerce::string(value.get("title"), &d.title),
			content: coerce::string(value.get("content"), &d.content),
			default_open: coerce::boolean(value.get("defaultOpen"), d.default_open),
		}
	}
}
