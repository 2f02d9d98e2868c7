//! Component registry
//!
//! Maps each block type to the factory that builds its interactive reader
//! component. Hydration resolves a block's renderer here; a type without a
//! factory stays static.

use std::collections::HashMap;
use std::fmt;

use academora_blocks::component::reader_view;
use academora_blocks::{BlockAttributes, BlockComponent, BlockError, BlockResult, BlockType};

/// Factory function that creates a mounted component
type ComponentFactory = Box<dyn Fn(BlockAttributes, String) -> Box<dyn BlockComponent> + Send + Sync>;

/// Registry of interactive components
pub struct ComponentRegistry {
	factories: HashMap<BlockType, ComponentFactory>,
}

impl ComponentRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			factories: HashMap::new(),
		}
	}

	/// Creates a registry with the reader component of every block type.
	pub fn with_builtin() -> Self {
		let mut registry = Self::new();
		for block_type in BlockType::ALL {
			registry.register(block_type, |attributes, block_id| {
				reader_view(attributes, block_id)
			});
		}
		registry
	}

	/// Registers (or replaces) the factory of a block type.
	pub fn register<F>(&mut self, block_type: BlockType, factory: F)
	where
		F: Fn(BlockAttributes, String) -> Box<dyn BlockComponent> + Send + Sync + 'static,
	{
		self.factories.insert(block_type, Box::new(factory));
	}

	/// Removes the factory of a block type. Returns whether one was registered.
	pub fn unregister(&mut self, block_type: BlockType) -> bool {
		self.factories.remove(&block_type).is_some()
	}

	/// Returns whether a factory is registered for `block_type`.
	pub fn contains(&self, block_type: BlockType) -> bool {
		self.factories.contains_key(&block_type)
	}

	/// Creates a component instance.
	///
	/// # Errors
	///
	/// Returns [`BlockError::RendererMissing`] when no factory is registered.
	pub fn create(
		&self,
		block_type: BlockType,
		attributes: BlockAttributes,
		block_id: String,
	) -> BlockResult<Box<dyn BlockComponent>> {
		let factory = self
			.factories
			.get(&block_type)
			.ok_or_else(|| BlockError::RendererMissing(block_type.to_string()))?;

		Ok(factory(attributes, block_id))
	}
}

impl Default for ComponentRegistry {
	fn default() -> Self {
		Self::with_builtin()
	}
}

impl fmt::Debug for ComponentRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut types: Vec<_> = self.factories.keys().collect();
		types.sort();
		f.debug_struct("ComponentRegistry")
			.field("block_types", &types)
			.finish()
	}
}
