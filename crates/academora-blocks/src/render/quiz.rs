use academora_core::node::{Element, IntoNode, Node};

use super::StaticRender;
use crate::attributes::QuizAttributes;

/// Radio group name of the static markup
const STATIC_GROUP: &str = "quiz-options";

/// Reader state projected into quiz markup
#[derive(Debug, Clone)]
pub(crate) struct QuizView<'a> {
	pub group: String,
	pub selected: Option<&'a str>,
	pub submitted: bool,
	pub disabled: bool,
	pub show_explanation: bool,
}

pub(crate) fn quiz_view(attrs: &QuizAttributes, view: &QuizView<'_>) -> Vec<Node> {
	let options = attrs.options.iter().map(|option| {
		let is_selected = view.selected == Some(option.id.as_str());
		let mut class = String::from("quiz-option");
		if view.submitted {
			if option.is_correct {
				class.push_str(" correct");
			} else if is_selected {
				class.push_str(" incorrect");
			}
		}

		Element::new("li")
			.attr("class", class)
			.attr("data-option-id", option.id.clone())
			.child(
				Element::new("label")
					.child(
						Element::new("input")
							.attr("type", "radio")
							.attr("name", view.group.clone())
							.attr("value", option.id.clone())
							.bool_attr("checked", is_selected)
							.bool_attr("disabled", view.disabled),
					)
					.child(Element::new("span").child(option.text.clone())),
			)
	});

	let feedback = view.submitted.then(|| {
		let correct = view
			.selected
			.and_then(|id| attrs.option(id))
			.is_some_and(|option| option.is_correct);
		let (class, text) = if correct {
			("quiz-feedback correct", "Correct!")
		} else {
			("quiz-feedback incorrect", "Incorrect")
		};
		Element::new("p").attr("class", class).child(text)
	});

	let explanation = (view.show_explanation && attrs.explanation_visible()).then(|| {
		Element::new("div")
			.attr("class", "quiz-explanation")
			.child(Element::new("strong").child("Explanation: "))
			.child(Element::new("span").child(attrs.explanation.clone()))
	});

	vec![
		Element::new("p")
			.attr("class", "quiz-question")
			.child(attrs.question.clone())
			.into_node(),
		Element::new("ul")
			.attr("class", "quiz-options")
			.children(options)
			.into_node(),
		feedback.into_node(),
		explanation.into_node(),
	]
}

impl StaticRender for QuizAttributes {
	fn render_body(&self) -> Vec<Node> {
		quiz_view(
			self,
			&QuizView {
				group: STATIC_GROUP.to_string(),
				selected: None,
				submitted: false,
				disabled: true,
				show_explanation: true,
			},
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_static_radios_are_disabled() {
		let body = Node::Fragment(QuizAttributes::default().render_body());

		let radios = body.find_all(&|e| e.attribute("type") == Some("radio"));

		assert_eq!(radios.len(), 3);
		assert!(radios.iter().all(|r| r.has_attribute("disabled")));
		assert!(radios.iter().all(|r| !r.has_attribute("checked")));
		assert!(radios.iter().all(|r| r.attribute("name") == Some("quiz-options")));
	}

	#[rstest]
	#[case(true, "Because.", true)]
	#[case(true, "", false)]
	#[case(false, "Because.", false)]
	fn test_explanation_is_gated(
		#[case] show_explanation: bool,
		#[case] explanation: &str,
		#[case] expected: bool,
	) {
		let attrs = QuizAttributes {
			show_explanation,
			explanation: explanation.to_string(),
			..QuizAttributes::default()
		};

		let body = Node::Fragment(attrs.render_body());

		assert_eq!(body.find(&|e| e.has_class("quiz-explanation")).is_some(), expected);
	}

	#[rstest]
	fn test_submitted_view_marks_answers() {
		// Arrange
		let attrs = QuizAttributes::default();
		let view = QuizView {
			group: "quiz-b1".into(),
			selected: Some("opt-2"),
			submitted: true,
			disabled: true,
			show_explanation: true,
		};

		// Act
		let body = Node::Fragment(quiz_view(&attrs, &view));

		// Assert
		let feedback = body.find(&|e| e.has_class("quiz-feedback")).unwrap();
		assert_eq!(feedback.text_content(), "Incorrect");
		let correct = body.find(&|e| e.has_class("correct")).unwrap();
		assert_eq!(correct.attribute("data-option-id"), Some("opt-1"));
		let wrong = body.find(&|e| e.has_class("incorrect") && e.has_class("quiz-option")).unwrap();
		assert_eq!(wrong.attribute("data-option-id"), Some("opt-2"));
	}
}
