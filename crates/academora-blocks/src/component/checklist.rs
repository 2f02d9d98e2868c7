use academora_core::node::{Element, IntoNode, Node};

use super::{BlockEvent, Interactive};
use crate::attributes::ChecklistAttributes;
use crate::render::checklist_view;

impl Interactive for ChecklistAttributes {
	/// Checked flag per item, by position.
	type State = Vec<bool>;

	fn initial_state(&self) -> Self::State {
		self.items.iter().map(|item| item.checked).collect()
	}

	fn apply(&self, state: &mut Self::State, event: &BlockEvent) -> bool {
		let BlockEvent::ToggleItem(id) = event else {
			return false;
		};
		if !self.allow_user_edit {
			return false;
		}
		let Some(index) = self.items.iter().position(|item| &item.id == id) else {
			return false;
		};
		match state.get_mut(index) {
			Some(checked) => {
				*checked = !*checked;
				true
			}
			None => false,
		}
	}

	fn render_view(&self, state: &Self::State, _block_id: &str) -> Vec<Node> {
		let done = state.iter().filter(|checked| **checked).count();
		let mut nodes = checklist_view(
			self,
			|index| state.get(index).copied().unwrap_or(false),
			!self.allow_user_edit,
		);
		nodes.push(
			Element::new("p")
				.attr("class", "checklist-progress")
				.child(format!("{} of {} completed", done, self.items.len()))
				.into_node(),
		);
		nodes
	}
}

#[cfg(test)]
mod tests {
	use crate::attributes::{BlockAttributes, ChecklistAttributes};
	use crate::component::{BlockEvent, reader_view};
	use rstest::rstest;

	#[rstest]
	fn test_toggle_updates_progress() {
		// Arrange
		let mut component = reader_view(ChecklistAttributes::default().into(), "b1");

		// Act
		let changed = component.handle(&BlockEvent::ToggleItem("item-2".into()));

		// Assert
		assert!(changed);
		let view = component.view();
		let progress = view.find(&|e| e.has_class("checklist-progress")).unwrap();
		assert_eq!(progress.text_content(), "1 of 2 completed");
		let boxes = view.find_all(&|e| e.attribute("type") == Some("checkbox"));
		assert!(!boxes[0].has_attribute("checked"));
		assert!(boxes[1].has_attribute("checked"));
		assert!(boxes.iter().all(|b| !b.has_attribute("disabled")));
	}

	#[rstest]
	fn test_toggle_twice_restores_state() {
		let mut component = reader_view(ChecklistAttributes::default().into(), "b1");
		let before = component.view();

		component.handle(&BlockEvent::ToggleItem("item-1".into()));
		component.handle(&BlockEvent::ToggleItem("item-1".into()));

		assert_eq!(component.view(), before);
	}

	#[rstest]
	fn test_locked_checklist_rejects_toggles() {
		let attrs = ChecklistAttributes {
			allow_user_edit: false,
			..ChecklistAttributes::default()
		};
		let mut component = reader_view(BlockAttributes::Checklist(attrs), "b1");

		assert!(!component.handle(&BlockEvent::ToggleItem("item-1".into())));
		let view = component.view();
		let boxes = view.find_all(&|e| e.attribute("type") == Some("checkbox"));
		assert!(boxes.iter().all(|b| b.has_attribute("disabled")));
	}

	#[rstest]
	fn test_unknown_item_is_ignored() {
		let mut component = reader_view(ChecklistAttributes::default().into(), "b1");
		assert!(!component.handle(&BlockEvent::ToggleItem("nope".into())));
	}

	#[rstest]
	fn test_reader_state_does_not_touch_attributes() {
		let mut component = reader_view(ChecklistAttributes::default().into(), "b1");

		component.handle(&BlockEvent::ToggleItem("item-1".into()));

		assert_eq!(
			component.attributes(),
			BlockAttributes::from(ChecklistAttributes::default())
		);
	}
}
