//! Hydration outcomes

use std::fmt;

use academora_blocks::{BlockType, Diagnostic};
use academora_core::dom::{DomError, NodeId};

/// Lifecycle stage of one scanned element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HydrationStage {
	/// The element carries the block marker.
	Discovered,
	/// The embedded config was found and parsed.
	ConfigExtracted,
	/// The block type maps to a registered component.
	RendererResolved,
	/// The component replaced the static markup.
	Mounted,
	/// Hydration stopped; the static markup stays in place.
	Skipped,
}

impl HydrationStage {
	/// Returns the lowercase name.
	pub fn as_str(&self) -> &'static str {
		match self {
			HydrationStage::Discovered => "discovered",
			HydrationStage::ConfigExtracted => "config_extracted",
			HydrationStage::RendererResolved => "renderer_resolved",
			HydrationStage::Mounted => "mounted",
			HydrationStage::Skipped => "skipped",
		}
	}
}

impl fmt::Display for HydrationStage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A component mounted by hydration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedBlock {
	/// The block id (preserved or generated)
	pub block_id: String,
	/// The block type
	pub block_type: BlockType,
	/// The container that replaced the static element
	pub container: NodeId,
}

/// Result of hydrating one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationOutcome {
	/// The component is mounted.
	Mounted(MountedBlock),
	/// The element stays static.
	Skipped {
		/// The static element
		node: NodeId,
		/// Last stage reached before skipping
		reached: HydrationStage,
		/// Why it was skipped
		diagnostic: Diagnostic,
	},
	/// The node is not a marked, attached element (already hydrated,
	/// detached, or never a block).
	Ignored(NodeId),
	/// The document rejected the mount.
	Failed {
		/// The static element
		node: NodeId,
		/// The DOM error
		error: DomError,
	},
}

impl HydrationOutcome {
	/// Returns the mounted block, if any.
	pub fn mounted(&self) -> Option<&MountedBlock> {
		match self {
			HydrationOutcome::Mounted(block) => Some(block),
			_ => None,
		}
	}

	/// Returns the final stage of the element.
	pub fn stage(&self) -> HydrationStage {
		match self {
			HydrationOutcome::Mounted(_) => HydrationStage::Mounted,
			_ => HydrationStage::Skipped,
		}
	}
}

/// Outcomes of a batch hydration pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationReport {
	outcomes: Vec<HydrationOutcome>,
}

impl HydrationReport {
	/// Creates an empty report.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one outcome.
	pub fn push(&mut self, outcome: HydrationOutcome) {
		self.outcomes.push(outcome);
	}

	/// Appends every outcome of `other`.
	pub fn extend(&mut self, other: HydrationReport) {
		self.outcomes.extend(other.outcomes);
	}

	/// Returns every outcome, in processing order.
	pub fn outcomes(&self) -> &[HydrationOutcome] {
		&self.outcomes
	}

	/// Returns the mounted blocks.
	pub fn mounted(&self) -> Vec<&MountedBlock> {
		self.outcomes.iter().filter_map(HydrationOutcome::mounted).collect()
	}

	/// Number of mounted blocks.
	pub fn mounted_count(&self) -> usize {
		self.mounted().len()
	}

	/// Number of skipped blocks.
	pub fn skipped_count(&self) -> usize {
		self.outcomes
			.iter()
			.filter(|o| matches!(o, HydrationOutcome::Skipped { .. }))
			.count()
	}

	/// Diagnostics of the skipped blocks.
	pub fn diagnostics(&self) -> Vec<&Diagnostic> {
		self.outcomes
			.iter()
			.filter_map(|o| match o {
				HydrationOutcome::Skipped { diagnostic, .. } => Some(diagnostic),
				_ => None,
			})
			.collect()
	}

	/// Returns whether nothing was processed.
	pub fn is_empty(&self) -> bool {
		self.outcomes.is_empty()
	}
}

impl fmt::Display for HydrationReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} mounted, {} skipped",
			self.mounted_count(),
			self.skipped_count()
		)
	}
}
