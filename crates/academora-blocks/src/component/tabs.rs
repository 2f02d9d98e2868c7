use academora_core::node::Node;

use super::{BlockEvent, Interactive};
use crate::attributes::TabsAttributes;
use crate::render::tabs_view;

impl Interactive for TabsAttributes {
	/// Id of the active tab.
	type State = String;

	fn initial_state(&self) -> Self::State {
		self.active_tab.clone()
	}

	fn apply(&self, state: &mut Self::State, event: &BlockEvent) -> bool {
		match event {
			BlockEvent::SelectTab(id) if self.has_tab(id) && state != id => {
				*state = id.clone();
				true
			}
			_ => false,
		}
	}

	fn render_view(&self, state: &Self::State, _block_id: &str) -> Vec<Node> {
		tabs_view(self, state)
	}
}

#[cfg(test)]
mod tests {
	use crate::attributes::TabsAttributes;
	use crate::component::{BlockEvent, reader_view};
	use rstest::rstest;

	#[rstest]
	#[case("tab-2", true, "tab-2")]
	#[case("tab-1", false, "tab-1")]
	#[case("tab-9", false, "tab-1")]
	fn test_select_tab(#[case] target: &str, #[case] changed: bool, #[case] active: &str) {
		// Arrange
		let mut component = reader_view(TabsAttributes::default().into(), "b1");

		// Act
		let result = component.handle(&BlockEvent::SelectTab(target.to_string()));

		// Assert
		assert_eq!(result, changed);
		let view = component.view();
		let active_panels = view.find_all(&|e| e.has_class("tab-panel") && e.has_class("active"));
		assert_eq!(active_panels.len(), 1);
		assert_eq!(active_panels[0].attribute("data-tab-id"), Some(active));
	}
}
