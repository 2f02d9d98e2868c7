use serde::Serialize;
use serde_json::Value;

use crate::schema::{Keyed, assign_ids, coerce};

/// One step card of a guide
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideStep {
	/// Identifier
	pub id: String,
	/// Step heading
	pub title: String,
	/// Step body
	pub description: String,
	/// Image URL; empty when the step has no image
	pub image: String,
}

impl GuideStep {
	fn step(id: &str, title: &str, description: &str) -> Self {
		Self {
			id: id.to_string(),
			title: title.to_string(),
			description: description.to_string(),
			image: String::new(),
		}
	}

	fn coerce(value: &Value) -> Self {
		Self {
			id: coerce::string(value.get("id"), ""),
			title: coerce::string(value.get("title"), ""),
			description: coerce::string(value.get("description"), ""),
			image: coerce::string(value.get("image"), ""),
		}
	}
}

impl Keyed for GuideStep {
	fn id(&self) -> &str {
		&self.id
	}

	fn set_id(&mut self, id: String) {
		self.id = id;
	}
}

/// Attributes of the `stepGuide` block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepGuideAttributes {
	/// Heading
	pub title: String,
	/// Steps in order
	pub steps: Vec<GuideStep>,
	/// Whether steps are numbered
	pub show_numbers: bool,
}

impl Default for StepGuideAttributes {
	fn default() -> Self {
		Self {
			title: "How to Apply".to_string(),
			steps: vec![
				GuideStep::step("step-1", "Create an account", "Sign up with your email address."),
				GuideStep::step("step-2", "Complete your profile", "Add your grades and interests."),
				GuideStep::step("step-3", "Submit your application", "Review everything and submit."),
			],
			show_numbers: true,
		}
	}
}

impl StepGuideAttributes {
	pub(crate) fn coerce(value: &Value) -> Self {
		let d = Self::default();
		let mut steps = coerce::entries(value.get("steps"), &d.steps, GuideStep::coerce, |title| {
			GuideStep {
				title,
				..GuideStep::default()
			}
		});
		assign_ids(&mut steps, "step");

		Self {
			title: coerce::string(value.get("title"), &d.title),
			steps,
			show_numbers: coerce::boolean(value.get("showNumbers"), d.show_numbers),
		}
	}
}
