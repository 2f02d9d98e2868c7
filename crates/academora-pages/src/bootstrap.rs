//! Page bootstrap
//!
//! Entry points a page calls once its document is ready: hydrate everything
//! already present, then keep watching for server-rendered fragments that
//! are inserted later.

use academora_core::dom::{Document, NodeId};

use crate::hydration::{HydrationOptions, HydrationReport, HydrationRuntime, WatchHandle};

/// A runtime bound to a watched container
#[derive(Debug)]
pub struct PageSession {
	runtime: HydrationRuntime,
	handle: WatchHandle,
}

impl PageSession {
	/// Hydrates blocks inserted since the last call.
	pub fn refresh(&mut self, doc: &mut Document) -> HydrationReport {
		self.runtime.process_mutations(doc, &self.handle)
	}

	/// Returns the runtime holding the mounted components.
	pub fn runtime(&self) -> &HydrationRuntime {
		&self.runtime
	}

	/// Returns the runtime mutably, e.g. to dispatch events.
	pub fn runtime_mut(&mut self) -> &mut HydrationRuntime {
		&mut self.runtime
	}

	/// Stops watching and returns the runtime.
	pub fn close(self, doc: &mut Document) -> HydrationRuntime {
		self.runtime.unwatch(doc, self.handle);
		self.runtime
	}
}

/// Hydrates the whole document with the built-in components.
pub fn bootstrap(doc: &mut Document) -> (HydrationRuntime, HydrationReport) {
	let mut runtime = HydrationRuntime::new();
	let root = doc.root();
	let report = runtime.hydrate_all(doc, root);
	(runtime, report)
}

/// Hydrates `container` and keeps watching it for inserted blocks.
pub fn start(
	doc: &mut Document,
	container: NodeId,
	options: HydrationOptions,
) -> (PageSession, HydrationReport) {
	let mut runtime = HydrationRuntime::with_options(options);
	let report = runtime.hydrate_all(doc, container);
	let handle = runtime.watch(doc, container);
	(PageSession { runtime, handle }, report)
}
