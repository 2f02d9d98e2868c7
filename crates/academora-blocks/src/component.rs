//! Interactive block components
//!
//! Hydration mounts a [`BlockComponent`] in place of each static block.
//! A component owns its attributes plus per-reader state (ticked items,
//! calculator inputs, the selected quiz answer, ...), reacts to
//! [`BlockEvent`]s and renders its current view as a [`Node`].
//!
//! Editor views additionally accept [`BlockEvent::Update`], which merges a
//! partial attribute object and re-coerces the attributes.

mod calculator;
mod checklist;
mod collapsible;
mod quiz;
mod tabs;

pub use quiz::QuizState;

use std::fmt;

use academora_core::node::{Element, IntoNode, Node};
use serde_json::Value;

use crate::attributes::{
	BlockAttributes, ComparisonAttributes, CtaAttributes, StepGuideAttributes, TimelineAttributes,
};
use crate::block_type::BlockType;
use crate::render::StaticRender;
use crate::schema::merge_partial;

/// Who the component is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
	/// Article reader
	Reader,
	/// Authoring surface
	Editor,
}

impl ViewMode {
	/// Returns the lowercase name.
	pub fn as_str(&self) -> &'static str {
		match self {
			ViewMode::Reader => "reader",
			ViewMode::Editor => "editor",
		}
	}
}

/// User interaction delivered to a mounted component
#[derive(Debug, Clone, PartialEq)]
pub enum BlockEvent {
	/// Tick or untick a checklist item
	ToggleItem(String),
	/// Change a calculator input
	SetField {
		/// Field id
		field: String,
		/// New value, clamped to the field bounds
		value: f64,
	},
	/// Open or close a collapsible
	ToggleOpen,
	/// Choose a quiz option
	SelectOption(String),
	/// Check the chosen quiz option
	SubmitAnswer,
	/// Clear the quiz answer
	ResetAnswer,
	/// Switch tabs
	SelectTab(String),
	/// Merge a partial attribute object (editor views only)
	Update(Value),
}

/// A mounted, interactive block
pub trait BlockComponent: fmt::Debug + Send + Sync {
	/// Returns the block id.
	fn block_id(&self) -> &str;

	/// Returns the block type.
	fn block_type(&self) -> BlockType;

	/// Returns the current attributes.
	fn attributes(&self) -> BlockAttributes;

	/// Returns the view mode.
	fn mode(&self) -> ViewMode;

	/// Applies an event. Returns whether the view changed.
	fn handle(&mut self, event: &BlockEvent) -> bool;

	/// Renders the current view.
	fn view(&self) -> Node;
}

/// Reader behaviour of a block type
pub(crate) trait Interactive: StaticRender {
	type State: fmt::Debug + Clone + Send + Sync;

	fn initial_state(&self) -> Self::State;

	fn apply(&self, _state: &mut Self::State, _event: &BlockEvent) -> bool {
		false
	}

	fn render_view(&self, state: &Self::State, block_id: &str) -> Vec<Node>;
}

macro_rules! passive {
	($($ty:ty),* $(,)?) => {
		$(
			impl Interactive for $ty {
				type State = ();

				fn initial_state(&self) -> Self::State {}

				fn render_view(&self, _state: &Self::State, _block_id: &str) -> Vec<Node> {
					self.render_body()
				}
			}
		)*
	};
}

passive!(
	ComparisonAttributes,
	CtaAttributes,
	StepGuideAttributes,
	TimelineAttributes,
);

/// Generic component over typed attributes
#[derive(Debug)]
pub(crate) struct BlockWidget<T: Interactive> {
	block_id: String,
	mode: ViewMode,
	attributes: T,
	state: T::State,
}

impl<T: Interactive> BlockWidget<T> {
	pub(crate) fn new(attributes: T, block_id: String, mode: ViewMode) -> Self {
		let state = attributes.initial_state();
		Self {
			block_id,
			mode,
			attributes,
			state,
		}
	}
}

impl<T: Interactive> BlockComponent for BlockWidget<T> {
	fn block_id(&self) -> &str {
		&self.block_id
	}

	fn block_type(&self) -> BlockType {
		T::BLOCK_TYPE
	}

	fn attributes(&self) -> BlockAttributes {
		self.attributes.clone().into_attributes()
	}

	fn mode(&self) -> ViewMode {
		self.mode
	}

	fn handle(&mut self, event: &BlockEvent) -> bool {
		match event {
			BlockEvent::Update(partial) => {
				if self.mode != ViewMode::Editor {
					return false;
				}
				let updated = T::from_value(&merge_partial(self.attributes.to_value(), partial));
				if updated == self.attributes {
					return false;
				}
				self.attributes = updated;
				self.state = self.attributes.initial_state();
				true
			}
			other => self.attributes.apply(&mut self.state, other),
		}
	}

	/// The view carries no `data-block-type` marker, so mounted blocks are
	/// never rediscovered by hydration.
	fn view(&self) -> Node {
		Element::new("div")
			.attr(
				"class",
				format!("{} block-{}", T::BLOCK_TYPE.css_class(), self.mode.as_str()),
			)
			.attr("data-component", T::BLOCK_TYPE.as_str())
			.attr("data-view-mode", self.mode.as_str())
			.children(self.attributes.render_view(&self.state, &self.block_id))
			.into_node()
	}
}

pub(crate) fn widget<T: Interactive>(
	attributes: T,
	block_id: String,
	mode: ViewMode,
) -> Box<dyn BlockComponent> {
	Box::new(BlockWidget::new(attributes, block_id, mode))
}

/// Creates the reader component for `attributes`.
pub fn reader_view(attributes: BlockAttributes, block_id: impl Into<String>) -> Box<dyn BlockComponent> {
	create_view(attributes, block_id.into(), ViewMode::Reader)
}

/// Creates the editor component for `attributes`.
pub fn editor_view(attributes: BlockAttributes, block_id: impl Into<String>) -> Box<dyn BlockComponent> {
	create_view(attributes, block_id.into(), ViewMode::Editor)
}

/// Creates a component in the given mode.
pub fn create_view(attributes: BlockAttributes, block_id: String, mode: ViewMode) -> Box<dyn BlockComponent> {
	match attributes {
		BlockAttributes::Calculator(attrs) => widget(attrs, block_id, mode),
		BlockAttributes::Checklist(attrs) => widget(attrs, block_id, mode),
		BlockAttributes::Collapsible(attrs) => widget(attrs, block_id, mode),
		BlockAttributes::Comparison(attrs) => widget(attrs, block_id, mode),
		BlockAttributes::Cta(attrs) => widget(attrs, block_id, mode),
		BlockAttributes::Quiz(attrs) => widget(attrs, block_id, mode),
		BlockAttributes::StepGuide(attrs) => widget(attrs, block_id, mode),
		BlockAttributes::Tabs(attrs) => widget(attrs, block_id, mode),
		BlockAttributes::Timeline(attrs) => widget(attrs, block_id, mode),
	}
}
