//! # AcademOra
//!
//! Content blocks for the AcademOra article CMS.
//!
//! Authors insert interactive blocks (calculators, checklists, quizzes, tabs
//! and more) into articles. Each block is stored as static HTML that embeds
//! its full configuration as JSON; on the reader's page the hydration runtime
//! finds those blocks and mounts live components in their place.
//!
//! ## Architecture
//!
//! ```text
//! academora
//! ├── core      - Node tree, HTML escaping/parsing, arena `Document`
//! ├── blocks    - Schemas, registry, static rendering, components, editor
//! ├── pages     - Hydration runtime and mutation watching (feature `pages`)
//! ├── settings  - TOML-backed `Settings`
//! └── logging   - `tracing-subscriber` initialisation
//! ```
//!
//! ## Feature Flags
//!
//! - `pages` (default) - Client hydration runtime
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use academora::prelude::*;
//! use serde_json::json;
//!
//! let html = render_to_string("quiz", &json!({"question": "Capital of France?"}));
//!
//! let mut doc = Document::from_html(&html);
//! let (runtime, report) = bootstrap(&mut doc);
//! assert_eq!(report.mounted_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod logging;
pub mod settings;

pub use academora_blocks as blocks;
pub use academora_core as core;
#[cfg(feature = "pages")]
pub use academora_pages as pages;

pub use academora_blocks::{
	BlockAttributes, BlockDocument, BlockError, BlockNode, BlockRenderer, BlockResult, BlockType,
	RenderOptions, render, render_to_string,
};
pub use settings::{Settings, SettingsError};

#[cfg(feature = "pages")]
pub use academora_pages::{HydrationOptions, HydrationReport, HydrationRuntime, bootstrap};

pub mod prelude {
	//! Convenient re-exports of commonly used items

	pub use academora_blocks::prelude::*;
	pub use academora_blocks::{render, render_to_string};
	pub use academora_core::dom::{Document, NodeId};
	pub use academora_core::node::{Element, Node};

	#[cfg(feature = "pages")]
	pub use academora_pages::{
		HydrationOptions, HydrationReport, HydrationRuntime, PageSession, bootstrap, start,
	};

	pub use crate::settings::Settings;
}
