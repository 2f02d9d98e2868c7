use serde::Serialize;
use serde_json::Value;

use crate::schema::{Keyed, assign_ids, coerce};

/// One entry of a checklist
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
	/// Identifier
	pub id: String,
	/// Item text
	pub text: String,
	/// Initial checked state
	pub checked: bool,
}

impl ChecklistItem {
	fn item(id: &str, text: &str) -> Self {
		Self {
			id: id.to_string(),
			text: text.to_string(),
			checked: false,
		}
	}

	fn coerce(value: &Value) -> Self {
		Self {
			id: coerce::string(value.get("id"), ""),
			text: coerce::string(value.get("text"), ""),
			checked: coerce::boolean(value.get("checked"), false),
		}
	}
}

impl Keyed for ChecklistItem {
	fn id(&self) -> &str {
		&self.id
	}

	fn set_id(&mut self, id: String) {
		self.id = id;
	}
}

/// Attributes of the `checklist` block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistAttributes {
	/// Heading
	pub title: String,
	/// Entries
	pub items: Vec<ChecklistItem>,
	/// Whether readers may tick items
	pub allow_user_edit: bool,
}

impl Default for ChecklistAttributes {
	fn default() -> Self {
		Self {
			title: "Application Checklist".to_string(),
			items: vec![
				ChecklistItem::item("item-1", "Research programs"),
				ChecklistItem::item("item-2", "Prepare application documents"),
			],
			allow_user_edit: true,
		}
	}
}

impl ChecklistAttributes {
	pub(crate) fn coerce(value: &Value) -> Self {
		let d = Self::default();
		let mut items = coerce::entries(value.get("items"), &d.items, ChecklistItem::coerce, |text| {
			ChecklistItem {
				text,
				..ChecklistItem::default()
			}
		});
		assign_ids(&mut items, "item");

		Self {
			title: coerce::string(value.get("title"), &d.title),
			items,
			allow_user_edit: coerce::boolean(value.get("allowUserEdit"), d.allow_user_edit),
		}
	}
}
