use serde::Serialize;
use serde_json::Value;

use crate::schema::{Keyed, assign_ids, coerce};

/// One answer option of a quiz
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
	/// Identifier
	pub id: String,
	/// Option text
	pub text: String,
	/// Whether this is a correct answer
	pub is_correct: bool,
}

impl QuizOption {
	fn option(id: &str, text: &str, is_correct: bool) -> Self {
		Self {
			id: id.to_string(),
			text: text.to_string(),
			is_correct,
		}
	}

	fn coerce(value: &Value) -> Self {
		Self {
			id: coerce::string(value.get("id"), ""),
			text: coerce::string(value.get("text"), ""),
			is_correct: coerce::boolean(value.get("isCorrect"), false),
		}
	}
}

impl Keyed for QuizOption {
	fn id(&self) -> &str {
		&self.id
	}

	fn set_id(&mut self, id: String) {
		self.id = id;
	}
}

/// Attributes of the `quiz` block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttributes {
	/// The question
	pub question: String,
	/// Answer options
	pub options: Vec<QuizOption>,
	/// Text shown after answering
	pub explanation: String,
	/// Whether the explanation is shown at all
	pub show_explanation: bool,
}

impl Default for QuizAttributes {
	fn default() -> Self {
		Self {
			question: "Which document is usually required for a student visa?".to_string(),
			options: vec![
				QuizOption::option("opt-1", "Letter of acceptance", true),
				QuizOption::option("opt-2", "Driving licence", false),
				QuizOption::option("opt-3", "Gym membership", false),
			],
			explanation: "Consulates ask for proof of admission from the university.".to_string(),
			show_explanation: true,
		}
	}
}

impl QuizAttributes {
	pub(crate) fn coerce(value: &Value) -> Self {
		let d = Self::default();
		let mut options = coerce::entries(value.get("options"), &d.options, QuizOption::coerce, |text| {
			QuizOption {
				text,
				..QuizOption::default()
			}
		});
		assign_ids(&mut options, "opt");

		Self {
			question: coerce::string(value.get("question"), &d.question),
			options,
			explanation: coerce::string(value.get("explanation"), &d.explanation),
			show_explanation: coerce::boolean(value.get("showExplanation"), d.show_explanation),
		}
	}

	/// Returns whether the explanation block is rendered.
	pub fn explanation_visible(&self) -> bool {
		self.show_explanation && !self.explanation.is_empty()
	}

	/// Returns the option with the given id.
	pub fn option(&self, id: &str) -> Option<&QuizOption> {
		self.options.iter().find(|option| option.id == id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(true, "Because.", true)]
	#[case(true, "", false)]
	#[case(false, "Because.", false)]
	fn test_explanation_visible(
		#[case] show: bool,
		#[case] explanation: &str,
		#[case] expected: bool,
	) {
		let attrs = QuizAttributes {
			show_explanation: show,
			explanation: explanation.to_string(),
			..QuizAttributes::default()
		};
		assert_eq!(attrs.explanation_visible(), expected);
	}

	#[rstest]
	fn test_options_from_strings() {
		let attrs = QuizAttributes::coerce(&json!({"options": ["Yes", "No"]}));
		assert_eq!(attrs.options.len(), 2);
		assert_eq!(attrs.option("opt-2").map(|o| o.text.as_str()), Some("No"));
		assert!(attrs.options.iter().all(|o| !o.is_correct));
	}
}
