use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{Keyed, assign_ids, coerce};

/// Layout direction of a timeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineOrientation {
	/// Top to bottom
	#[default]
	Vertical,
	/// Left to right
	Horizontal,
}

impl TimelineOrientation {
	/// Returns the serde name.
	pub fn as_str(&self) -> &'static str {
		match self {
			TimelineOrientation::Vertical => "vertical",
			TimelineOrientation::Horizontal => "horizontal",
		}
	}
}

/// One dated event
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
	/// Identifier
	pub id: String,
	/// Free-form date label
	pub date: String,
	/// Event heading
	pub title: String,
	/// Event body
	pub description: String,
}

impl TimelineItem {
	fn item(id: &str, date: &str, title: &str, description: &str) -> Self {
		Self {
			id: id.to_string(),
			date: date.to_string(),
			title: title.to_string(),
			description: description.to_string(),
		}
	}

	fn coerce(value: &Value) -> Self {
		Self {
			id: coerce::string(value.get("id"), ""),
			date: coerce::string(value.get("date"), ""),
			title: coerce::string(value.get("title"), ""),
			description: coerce::string(value.get("description"), ""),
		}
	}
}

impl Keyed for TimelineItem {
	fn id(&self) -> &str {
		&self.id
	}

	fn set_id(&mut self, id: String) {
		self.id = id;
	}
}

/// Attributes of the `timeline` block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineAttributes {
	/// Heading
	pub title: String,
	/// Events in order
	pub items: Vec<TimelineItem>,
	/// Layout direction
	pub orientation: TimelineOrientation,
}

impl Default for TimelineAttributes {
	fn default() -> Self {
		Self {
			title: "Application Timeline".to_string(),
			items: vec![
				TimelineItem::item("event-1", "September", "Applications open", "Start preparing your documents."),
				TimelineItem::item("event-2", "January", "Deadline", "Submit before the deadline."),
				TimelineItem::item("event-3", "March", "Decisions", "Offers are sent out."),
			],
			orientation: TimelineOrientation::default(),
		}
	}
}

impl TimelineAttributes {
	pub(crate) fn coerce(value: &Value) -> Self {
		let d = Self::default();
		let mut items = coerce::entries(value.get("items"), &d.items, TimelineItem::coerce, |title| {
			TimelineItem {
				title,
				..TimelineItem::default()
			}
		});
		assign_ids(&mut items, "event");

		Self {
			title: coerce::string(value.get("title"), &d.title),
			items,
			orientation: coerce::variant(value.get("orientation"), d.orientation),
		}
	}
}
