//! Structured diagnostics
//!
//! Lenient code paths (rendering unknown types, parsing corrupt configs,
//! hydrating blocks) never fail; they report what went wrong to a
//! [`DiagnosticSink`] and degrade. [`TracingSink`] forwards reports to
//! `tracing`, [`MemorySink`] keeps them for assertions, and any
//! `Fn(Diagnostic)` closure is a sink as well.

use std::fmt;

use parking_lot::Mutex;

use crate::error::BlockError;

/// Degradation path taken for a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
	/// No embedded config script
	ConfigMissing,
	/// Config script present but unparseable
	ConfigMalformed,
	/// Discriminator not registered
	UnknownBlockType,
	/// No interactive component for a valid type
	RendererMissing,
}

impl DiagnosticKind {
	/// Returns a stable snake_case name.
	pub fn as_str(&self) -> &'static str {
		match self {
			DiagnosticKind::ConfigMissing => "config_missing",
			DiagnosticKind::ConfigMalformed => "config_malformed",
			DiagnosticKind::UnknownBlockType => "unknown_block_type",
			DiagnosticKind::RendererMissing => "renderer_missing",
		}
	}
}

impl fmt::Display for DiagnosticKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One degradation report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	/// What went wrong
	pub kind: DiagnosticKind,
	/// The block type as found in the markup
	pub block_type: String,
	/// The block id, when known
	pub block_id: Option<String>,
	/// Human-readable detail
	pub detail: String,
}

impl Diagnostic {
	/// Creates a diagnostic.
	pub fn new(kind: DiagnosticKind, block_type: impl Into<String>, detail: impl Into<String>) -> Self {
		Self {
			kind,
			block_type: block_type.into(),
			block_id: None,
			detail: detail.into(),
		}
	}

	/// Sets the block id.
	pub fn with_block_id(mut self, block_id: Option<String>) -> Self {
		self.block_id = block_id;
		self
	}

	/// Converts a block error into a diagnostic.
	///
	/// Returns `None` for errors that are not degradation paths.
	pub fn from_error(error: &BlockError) -> Option<Self> {
		let (kind, block_type) = match error {
			BlockError::ConfigMissing(block_type) => (DiagnosticKind::ConfigMissing, block_type),
			BlockError::ConfigMalformed { block_type, .. } => {
				(DiagnosticKind::ConfigMalformed, block_type)
			}
			BlockError::UnknownBlockType(block_type) => {
				(DiagnosticKind::UnknownBlockType, block_type)
			}
			BlockError::RendererMissing(block_type) => (DiagnosticKind::RendererMissing, block_type),
			_ => return None,
		};
		Some(Self::new(kind, block_type.clone(), error.to_string()))
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}] {}", self.kind, self.block_type)?;
		if let Some(id) = &self.block_id {
			write!(f, " ({})", id)?;
		}
		write!(f, ": {}", self.detail)
	}
}

/// Receiver of degradation reports
pub trait DiagnosticSink: Send + Sync {
	/// Records one diagnostic.
	fn report(&self, diagnostic: Diagnostic);
}

impl<F> DiagnosticSink for F
where
	F: Fn(Diagnostic) + Send + Sync,
{
	fn report(&self, diagnostic: Diagnostic) {
		self(diagnostic)
	}
}

/// Forwards diagnostics to `tracing`
///
/// `RendererMissing` is logged at error level since it indicates an
/// incomplete registration; everything else is a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
	fn report(&self, diagnostic: Diagnostic) {
		let block_id = diagnostic.block_id.as_deref().unwrap_or("-");
		match diagnostic.kind {
			DiagnosticKind::RendererMissing => tracing::error!(
				kind = %diagnostic.kind,
				block_type = %diagnostic.block_type,
				block_id,
				"Block left static: {}",
				diagnostic.detail
			),
			_ => tracing::warn!(
				kind = %diagnostic.kind,
				block_type = %diagnostic.block_type,
				block_id,
				"Block degraded: {}",
				diagnostic.detail
			),
		}
	}
}

/// Collects diagnostics in memory
#[derive(Debug, Default)]
pub struct MemorySink {
	records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
	/// Creates an empty sink.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a copy of every recorded diagnostic.
	pub fn diagnostics(&self) -> Vec<Diagnostic> {
		self.records.lock().clone()
	}

	/// Returns the kinds of every recorded diagnostic, in order.
	pub fn kinds(&self) -> Vec<DiagnosticKind> {
		self.records.lock().iter().map(|d| d.kind).collect()
	}

	/// Returns the number of recorded diagnostics.
	pub fn len(&self) -> usize {
		self.records.lock().len()
	}

	/// Returns whether nothing was recorded.
	pub fn is_empty(&self) -> bool {
		self.records.lock().is_empty()
	}

	/// Drains the recorded diagnostics.
	pub fn take(&self) -> Vec<Diagnostic> {
		std::mem::take(&mut *self.records.lock())
	}
}

impl DiagnosticSink for MemorySink {
	fn report(&self, diagnostic: Diagnostic) {
		self.records.lock().push(diagnostic);
	}
}
