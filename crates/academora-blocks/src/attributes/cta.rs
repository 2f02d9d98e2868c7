use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::coerce;

/// Button size of a call-to-action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaSize {
	/// Compact banner
	Small,
	/// Regular banner
	#[default]
	Medium,
	/// Hero banner
	Large,
}

impl CtaSize {
	/// Returns the serde name.
	pub fn as_str(&self) -> &'static str {
		match self {
			CtaSize::Small => "small",
			CtaSize::Medium => "medium",
			CtaSize::Large => "large",
		}
	}
}

/// Content alignment of a call-to-action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaAlignment {
	/// Left aligned
	Left,
	/// Centered
	#[default]
	Center,
	/// Right aligned
	Right,
}

impl CtaAlignment {
	/// Returns the serde name.
	pub fn as_str(&self) -> &'static str {
		match self {
			CtaAlignment::Left => "left",
			CtaAlignment::Center => "center",
			CtaAlignment::Right => "right",
		}
	}
}

/// Attributes of the `cta` block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaAttributes {
	/// Heading
	pub title: String,
	/// Supporting text
	pub description: String,
	/// Button label
	pub button_text: String,
	/// Button target
	pub button_url: String,
	/// CSS background colour
	pub background_color: String,
	/// CSS text colour
	pub text_color: String,
	/// Size variant
	pub size: CtaSize,
	/// Alignment variant
	pub alignment: CtaAlignment,
	/// Whether the link opens a new tab
	pub open_in_new_tab: bool,
}

impl Default for CtaAttributes {
	fn default() -> Self {
		Self {
			title: "Ready to get started?".to_string(),
			description: "Take the next step in your academic journey.".to_string(),
			button_text: "Get Started".to_string(),
			button_url: "#".to_string(),
			background_color: "#3b82f6".to_string(),
			text_color: "#ffffff".to_string(),
			size: CtaSize::default(),
			alignment: CtaAlignment::default(),
			open_in_new_tab: false,
		}
	}
}

impl CtaAttributes {
	pub(crate) fn coerce(value: &Value) -> Self {
		let d = Self::default();
		Self {
			title: coerce::string(value.get("title"), &d.title),
			description: coerce::string(value.get("description"), &d.description),
			button_text: coerce::string(value.get("buttonText"), &d.button_text),
			button_url: coerce::string(value.get("buttonUrl"), &d.button_url),
			background_color: coerce::string(value.get("backgroundColor"), &d.background_color),
			text_color: coerce::string(value.get("textColor"), &d.text_color),
			size: coerce::variant(value.get("size"), d.size),
			alignment: coerce::variant(value.get("alignment"), d.alignment),
			open_in_new_tab: coerce::boolean(value.get("openInNewTab"), d.open_in_new_tab),
		}
	}
}
