//! Hydration Runtime
//!
//! Replaces static blocks with mounted components. Each marked element goes
//! through Discovered, ConfigExtracted, RendererResolved and Mounted, or
//! stops at Skipped with a diagnostic and keeps its static markup. Blocks
//! are isolated: one corrupt block never prevents the others from mounting.
//!
//! Mounting swaps the static element for a fresh container that carries
//! `data-block-mounted` instead of `data-block-type`, so a second pass over
//! the same subtree finds nothing left to do.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use academora_blocks::registry::extract_config;
use academora_blocks::{
	BlockComponent, BlockError, BlockEvent, BlockType, Diagnostic, DiagnosticSink, TracingSink,
};
use academora_core::dom::{Document, DomError, NodeId, ObserverId};
use academora_core::markers::{
	BLOCK_ID_ATTR, BLOCK_MOUNTED_ATTR, BLOCK_TYPE_ATTR, DEFAULT_ID_PREFIX,
	generate_block_id_with_prefix,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::components::ComponentRegistry;
use super::report::{HydrationOutcome, HydrationReport, HydrationStage, MountedBlock};

/// Errors of operations on mounted components
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HydrationError {
	/// No component is mounted under this id
	#[error("No mounted block with id: {0}")]
	NotMounted(String),

	/// The document rejected a re-render
	#[error("DOM error: {0}")]
	Dom(#[from] DomError),
}

/// Options for hydration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydrationOptions {
	/// Prefix of generated block ids.
	pub id_prefix: String,
	/// Tag of the container that replaces a static block.
	pub container_tag: String,
}

impl Default for HydrationOptions {
	fn default() -> Self {
		Self {
			id_prefix: DEFAULT_ID_PREFIX.to_string(),
			container_tag: "div".to_string(),
		}
	}
}

impl HydrationOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the prefix of generated block ids.
	pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.id_prefix = prefix.into();
		self
	}

	/// Sets the container tag.
	pub fn container_tag(mut self, tag: impl Into<String>) -> Self {
		self.container_tag = tag.into();
		self
	}
}

/// Subscription created by [`HydrationRuntime::watch`]
#[derive(Debug, PartialEq, Eq)]
pub struct WatchHandle {
	observer: ObserverId,
	container: NodeId,
}

impl WatchHandle {
	/// Returns the watched container.
	pub fn container(&self) -> NodeId {
		self.container
	}
}

struct MountedComponent {
	container: NodeId,
	component: Box<dyn BlockComponent>,
}

/// Mounts and retains interactive block components
pub struct HydrationRuntime {
	options: HydrationOptions,
	components: ComponentRegistry,
	sink: Arc<dyn DiagnosticSink>,
	mounted: HashMap<String, MountedComponent>,
}

impl Default for HydrationRuntime {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for HydrationRuntime {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HydrationRuntime")
			.field("options", &self.options)
			.field("components", &self.components)
			.field("mounted", &self.mounted.len())
			.finish_non_exhaustive()
	}
}

impl HydrationRuntime {
	/// Creates a runtime with the built-in components that logs diagnostics.
	pub fn new() -> Self {
		Self::with_options(HydrationOptions::default())
	}

	/// Creates a runtime with custom options.
	pub fn with_options(options: HydrationOptions) -> Self {
		Self {
			options,
			components: ComponentRegistry::with_builtin(),
			sink: Arc::new(TracingSink),
			mounted: HashMap::new(),
		}
	}

	/// Replaces the component registry.
	pub fn with_components(mut self, components: ComponentRegistry) -> Self {
		self.components = components;
		self
	}

	/// Replaces the diagnostic sink.
	pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
		self.sink = sink;
		self
	}

	/// Returns the options.
	pub fn options(&self) -> &HydrationOptions {
		&self.options
	}

	/// Hydrates one element.
	///
	/// Nodes that are detached or carry no block marker are ignored, which
	/// makes hydrating an already hydrated element a no-op.
	pub fn hydrate_element(&mut self, doc: &mut Document, node: NodeId) -> HydrationOutcome {
		// Discovered
		let Some(raw_type) = doc.get_attribute(node, BLOCK_TYPE_ATTR).map(str::to_string) else {
			return HydrationOutcome::Ignored(node);
		};
		if !doc.is_connected(node) {
			return HydrationOutcome::Ignored(node);
		}
		let existing_id = doc
			.get_attribute(node, BLOCK_ID_ATTR)
			.filter(|id| !id.is_empty())
			.map(str::to_string);
		tracing::trace!(node = %node, block_type = %raw_type, stage = %HydrationStage::Discovered);

		// ConfigExtracted
		let snapshot = doc.to_node(node);
		let config = match snapshot
			.as_element()
			.map(|element| extract_config(&raw_type, element))
		{
			Some(Ok(config)) => config,
			Some(Err(error)) => {
				return self.skip(node, HydrationStage::Discovered, existing_id, &error);
			}
			None => return HydrationOutcome::Ignored(node),
		};

		// RendererResolved
		let block_type = match raw_type.parse::<BlockType>() {
			Ok(block_type) => block_type,
			Err(error) => {
				return self.skip(node, HydrationStage::ConfigExtracted, existing_id, &error);
			}
		};
		let attributes = block_type.definition().parse_attributes(&config);
		let block_id = existing_id
			.clone()
			.unwrap_or_else(|| generate_block_id_with_prefix(&self.options.id_prefix));
		let component = match self.components.create(block_type, attributes, block_id.clone()) {
			Ok(component) => component,
			Err(error) => {
				return self.skip(node, HydrationStage::ConfigExtracted, existing_id, &error);
			}
		};
		tracing::trace!(node = %node, block_id = %block_id, stage = %HydrationStage::RendererResolved);

		// Mounted
		match self.mount(doc, node, block_type, &block_id, component.as_ref()) {
			Ok(container) => {
				tracing::debug!(block_type = %block_type, block_id = %block_id, "block mounted");
				if self
					.mounted
					.insert(
						block_id.clone(),
						MountedComponent {
							container,
							component,
						},
					)
					.is_some()
				{
					tracing::debug!(block_id = %block_id, "block id reused, replacing earlier component");
				}
				HydrationOutcome::Mounted(MountedBlock {
					block_id,
					block_type,
					container,
				})
			}
			Err(error) => {
				tracing::error!(block_type = %block_type, node = %node, error = %error, "mount failed");
				HydrationOutcome::Failed { node, error }
			}
		}
	}

	/// Hydrates every marked descendant of `container`.
	///
	/// The marked elements are collected before any is mounted; each is then
	/// hydrated independently.
	pub fn hydrate_all(&mut self, doc: &mut Document, container: NodeId) -> HydrationReport {
		let targets = doc.query_all_with_attribute(container, BLOCK_TYPE_ATTR);
		let mut report = HydrationReport::new();
		for node in targets {
			match self.hydrate_element(doc, node) {
				// Nested inside a block mounted earlier in this pass
				HydrationOutcome::Ignored(_) => {}
				outcome => report.push(outcome),
			}
		}
		tracing::debug!(container = %container, %report, "hydration pass finished");
		report
	}

	/// Starts watching `container` for inserted blocks.
	pub fn watch(&self, doc: &mut Document, container: NodeId) -> WatchHandle {
		WatchHandle {
			observer: doc.observe(container),
			container,
		}
	}

	/// Hydrates blocks inserted under a watched container since the last call.
	///
	/// An inserted marked element is hydrated on its own; any other inserted
	/// subtree is scanned for marked descendants. Each element is hydrated at
	/// most once per call even when several records cover it. Containers
	/// inserted by hydration carry no marker and are passed over.
	pub fn process_mutations(&mut self, doc: &mut Document, handle: &WatchHandle) -> HydrationReport {
		let mut seen = HashSet::new();
		let mut targets = Vec::new();
		for record in doc.take_records(handle.observer) {
			for added in record.added {
				if !doc.contains(handle.container, added) {
					continue;
				}
				let candidates = if doc.has_attribute(added, BLOCK_TYPE_ATTR) {
					vec![added]
				} else {
					doc.query_all_with_attribute(added, BLOCK_TYPE_ATTR)
				};
				targets.extend(candidates.into_iter().filter(|node| seen.insert(*node)));
			}
		}

		let mut report = HydrationReport::new();
		for node in targets {
			match self.hydrate_element(doc, node) {
				HydrationOutcome::Ignored(_) => {}
				outcome => report.push(outcome),
			}
		}
		report
	}

	/// Stops watching. Returns whether the subscription was active.
	pub fn unwatch(&self, doc: &mut Document, handle: WatchHandle) -> bool {
		doc.disconnect(handle.observer)
	}

	/// Delivers an event to a mounted component and re-renders its container
	/// when the view changed. Returns whether it changed.
	///
	/// # Errors
	///
	/// Returns [`HydrationError::NotMounted`] for an unknown id and
	/// [`HydrationError::Dom`] when the container can no longer be updated.
	pub fn dispatch(
		&mut self,
		doc: &mut Document,
		block_id: &str,
		event: &BlockEvent,
	) -> Result<bool, HydrationError> {
		let mounted = self
			.mounted
			.get_mut(block_id)
			.ok_or_else(|| HydrationError::NotMounted(block_id.to_string()))?;
		if !mounted.component.handle(event) {
			return Ok(false);
		}
		doc.clear_children(mounted.container)?;
		doc.append_node(mounted.container, &mounted.component.view())?;
		Ok(true)
	}

	/// Returns the component mounted under `block_id`.
	pub fn component(&self, block_id: &str) -> Option<&dyn BlockComponent> {
		self.mounted.get(block_id).map(|m| m.component.as_ref())
	}

	/// Returns the container of the component mounted under `block_id`.
	pub fn container(&self, block_id: &str) -> Option<NodeId> {
		self.mounted.get(block_id).map(|m| m.container)
	}

	/// Returns the ids of every mounted component, sorted.
	pub fn mounted_ids(&self) -> Vec<&str> {
		let mut ids: Vec<&str> = self.mounted.keys().map(String::as_str).collect();
		ids.sort_unstable();
		ids
	}

	/// Drops components whose container is no longer in the document.
	/// Returns how many were released.
	pub fn release_detached(&mut self, doc: &Document) -> usize {
		let before = self.mounted.len();
		self.mounted.retain(|_, m| doc.is_connected(m.container));
		before - self.mounted.len()
	}

	fn mount(
		&self,
		doc: &mut Document,
		node: NodeId,
		block_type: BlockType,
		block_id: &str,
		component: &dyn BlockComponent,
	) -> Result<NodeId, DomError> {
		let container = doc.create_element(self.options.container_tag.clone());
		doc.set_attribute(container, BLOCK_MOUNTED_ATTR, block_type.as_str())?;
		doc.set_attribute(container, BLOCK_ID_ATTR, block_id)?;
		doc.append_node(container, &component.view())?;
		doc.replace_with(node, container)?;
		let freed = doc.release(node)?;
		tracing::trace!(node = %node, freed, "static markup released");
		Ok(container)
	}

	fn skip(
		&self,
		node: NodeId,
		reached: HydrationStage,
		block_id: Option<String>,
		error: &BlockError,
	) -> HydrationOutcome {
		let Some(diagnostic) = Diagnostic::from_error(error) else {
			tracing::warn!(node = %node, error = %error, "hydration stopped");
			return HydrationOutcome::Ignored(node);
		};
		let diagnostic = diagnostic.with_block_id(block_id);
		self.sink.report(diagnostic.clone());
		HydrationOutcome::Skipped {
			node,
			reached,
			diagnostic,
		}
	}
}
