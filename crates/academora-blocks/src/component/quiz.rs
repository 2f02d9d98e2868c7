use academora_core::node::{Element, IntoNode, Node};

use super::{BlockEvent, Interactive};
use crate::attributes::QuizAttributes;
use crate::render::{QuizView, quiz_view};

/// Reader progress through a quiz
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizState {
	/// The chosen option id
	pub selected: Option<String>,
	/// Whether the answer was checked
	pub submitted: bool,
}

impl QuizState {
	/// Returns whether the submitted answer is correct.
	pub fn is_correct(&self, attrs: &QuizAttributes) -> bool {
		self.submitted
			&& self
				.selected
				.as_deref()
				.and_then(|id| attrs.option(id))
				.is_some_and(|option| option.is_correct)
	}
}

impl Interactive for QuizAttributes {
	type State = QuizState;

	fn initial_state(&self) -> Self::State {
		QuizState::default()
	}

	fn apply(&self, state: &mut Self::State, event: &BlockEvent) -> bool {
		match event {
			BlockEvent::SelectOption(id) => {
				if state.submitted
					|| self.option(id).is_none()
					|| state.selected.as_deref() == Some(id.as_str())
				{
					return false;
				}
				state.selected = Some(id.clone());
				true
			}
			BlockEvent::SubmitAnswer => {
				if state.submitted || state.selected.is_none() {
					return false;
				}
				state.submitted = true;
				true
			}
			BlockEvent::ResetAnswer => {
				if *state == QuizState::default() {
					return false;
				}
				*state = QuizState::default();
				true
			}
			_ => false,
		}
	}

	fn render_view(&self, state: &Self::State, block_id: &str) -> Vec<Node> {
		let mut nodes = quiz_view(
			self,
			&QuizView {
				group: format!("quiz-{}", block_id),
				selected: state.selected.as_deref(),
				submitted: state.submitted,
				disabled: state.submitted,
				show_explanation: state.submitted,
			},
		);

		let action = if state.submitted {
			Element::new("button")
				.attr("type", "button")
				.attr("class", "quiz-reset")
				.child("Try again")
		} else {
			Element::new("button")
				.attr("type", "button")
				.attr("class", "quiz-submit")
				.bool_attr("disabled", state.selected.is_none())
				.child("Check answer")
		};
		nodes.push(action.into_node());
		nodes
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::component::reader_view;
	use rstest::rstest;

	#[rstest]
	fn test_state_machine() {
		// Arrange
		let attrs = QuizAttributes::default();
		let mut state = attrs.initial_state();

		// Act & Assert
		assert!(!attrs.apply(&mut state, &BlockEvent::SubmitAnswer));
		assert!(attrs.apply(&mut state, &BlockEvent::SelectOption("opt-2".into())));
		assert!(!attrs.apply(&mut state, &BlockEvent::SelectOption("opt-2".into())));
		assert!(!attrs.apply(&mut state, &BlockEvent::SelectOption("missing".into())));
		assert!(attrs.apply(&mut state, &BlockEvent::SubmitAnswer));
		assert!(!state.is_correct(&attrs));
		assert!(!attrs.apply(&mut state, &BlockEvent::SelectOption("opt-1".into())));
		assert!(attrs.apply(&mut state, &BlockEvent::ResetAnswer));
		assert!(!attrs.apply(&mut state, &BlockEvent::ResetAnswer));
		assert!(attrs.apply(&mut state, &BlockEvent::SelectOption("opt-1".into())));
		assert!(attrs.apply(&mut state, &BlockEvent::SubmitAnswer));
		assert!(state.is_correct(&attrs));
	}

	#[rstest]
	fn test_explanation_appears_after_submit() {
		// Arrange
		let mut component = reader_view(QuizAttributes::default().into(), "b7");
		let has_explanation = |view: &Node| view.find(&|e| e.has_class("quiz-explanation")).is_some();
		assert!(!has_explanation(&component.view()));

		// Act
		component.handle(&BlockEvent::SelectOption("opt-1".into()));
		component.handle(&BlockEvent::SubmitAnswer);

		// Assert
		let view = component.view();
		assert!(has_explanation(&view));
		let feedback = view.find(&|e| e.has_class("quiz-feedback")).unwrap();
		assert_eq!(feedback.text_content(), "Correct!");
		let radios = view.find_all(&|e| e.attribute("type") == Some("radio"));
		assert!(radios.iter().all(|r| r.attribute("name") == Some("quiz-b7")));
		assert!(radios.iter().all(|r| r.has_attribute("disabled")));
		assert!(view.find(&|e| e.has_class("quiz-reset")).is_some());
	}

	#[rstest]
	fn test_submit_button_disabled_until_selection() {
		let component = reader_view(QuizAttributes::default().into(), "b7");

		let view = component.view();

		let submit = view.find(&|e| e.has_class("quiz-submit")).unwrap();
		assert!(submit.has_attribute("disabled"));
	}
}
