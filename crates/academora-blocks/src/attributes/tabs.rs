use serde::Serialize;
use serde_json::Value;

use crate::schema::{Keyed, assign_ids, coerce};

/// One tab and its panel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabPanel {
	/// Identifier, referenced by `activeTab`
	pub id: String,
	/// Tab button label
	pub label: String,
	/// Panel text
	pub content: String,
}

impl TabPanel {
	fn panel(id: &str, label: &str, content: &str) -> Self {
		Self {
			id: id.to_string(),
			label: label.to_string(),
			content: content.to_string(),
		}
	}

	fn coerce(value: &Value) -> Self {
		Self {
			id: coerce::string(value.get("id"), ""),
			label: coerce::string(value.get("label"), ""),
			content: coerce::string(value.get("content"), ""),
		}
	}
}

impl Keyed for TabPanel {
	fn id(&self) -> &str {
		&self.id
	}

	fn set_id(&mut self, id: String) {
		self.id = id;
	}
}

/// Attributes of the `tabs` block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabsAttributes {
	/// Tabs in order
	pub tabs: Vec<TabPanel>,
	/// Id of the initially active tab
	pub active_tab: String,
}

impl Default for TabsAttributes {
	fn default() -> Self {
		Self {
			tabs: vec![
				TabPanel::panel("tab-1", "Overview", "A short overview of the program."),
				TabPanel::panel("tab-2", "Requirements", "Admission requirements and deadlines."),
			],
			active_tab: "tab-1".to_string(),
		}
	}
}

impl TabsAttributes {
	/// Missing `activeTab` selects the first tab; an explicit value is kept
	/// even when it matches no tab.
	pub(crate) fn coerce(value: &Value) -> Self {
		let d = Self::default();
		let mut tabs = coerce::entries(value.get("tabs"), &d.tabs, TabPanel::coerce, |label| {
			TabPanel {
				label,
				..TabPanel::default()
			}
		});
		assign_ids(&mut tabs, "tab");

		let first = tabs.first().map(|tab| tab.id.clone()).unwrap_or_default();
		Self {
			active_tab: coerce::string(value.get("activeTab"), &first),
			tabs,
		}
	}

	/// Returns whether `id` names an existing tab.
	pub fn has_tab(&self, id: &str) -> bool {
		self.tabs.iter().any(|tab| tab.id == id)
	}
}
