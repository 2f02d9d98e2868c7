use academora_core::node::Node;

use super::{BlockEvent, Interactive};
use crate::attributes::CollapsibleAttributes;
use crate::render::collapsible_view;

impl Interactive for CollapsibleAttributes {
	/// Whether the disclosure is open.
	type State = bool;

	fn initial_state(&self) -> Self::State {
		self.default_open
	}

	fn apply(&self, state: &mut Self::State, event: &BlockEvent) -> bool {
		match event {
			BlockEvent::ToggleOpen => {
				*state = !*state;
				true
			}
			_ => false,
		}
	}

	fn render_view(&self, state: &Self::State, _block_id: &str) -> Vec<Node> {
		collapsible_view(self, *state)
	}
}
