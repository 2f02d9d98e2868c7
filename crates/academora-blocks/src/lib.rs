//! # AcademOra Blocks
//!
//! Rich content blocks for AcademOra articles: a closed set of nine block
//! types, each with a typed attribute schema, a deterministic static HTML
//! rendering that embeds its config as JSON, and an interactive component
//! that hydration mounts in place of the static markup.
//!
//! ## Architecture
//!
//! ```text
//! academora-blocks
//! ├── schema      - Coercion of raw JSON into fully defaulted attributes
//! ├── attributes  - The nine attribute structs and `BlockAttributes`
//! ├── registry    - One static `BlockDefinition` per block type
//! ├── render      - Static markup per block type
//! ├── pipeline    - `render(type, attributes)` with unknown-type placeholders
//! ├── component   - Reader and editor components
//! ├── formula     - Calculator formula evaluation
//! ├── editor      - `BlockDocument` authoring surface
//! └── diagnostics - Degradation reports
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use academora_blocks::prelude::*;
//! use serde_json::json;
//!
//! let mut document = BlockDocument::new();
//! document.run_command("insertChecklist", &json!({"title": "Visa steps"}))?;
//! let html = document.to_html();
//!
//! let restored = BlockDocument::from_html(&html);
//! assert_eq!(restored.blocks(), document.blocks());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub use serde_json;

pub mod attributes;
pub mod block_type;
pub mod component;
pub mod diagnostics;
pub mod editor;
pub mod error;
pub mod formula;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod schema;

pub use attributes::BlockAttributes;
pub use block_type::BlockType;
pub use component::{BlockComponent, BlockEvent, ViewMode};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, MemorySink, TracingSink};
pub use editor::{BlockDocument, BlockNode};
pub use error::{BlockError, BlockResult};
pub use pipeline::{BlockRenderer, RenderOptions, render, render_to_string};
pub use registry::BlockDefinition;

pub mod prelude {
	//! Convenient re-exports of commonly used items

	pub use crate::attributes::*;
	pub use crate::block_type::BlockType;
	pub use crate::component::{BlockComponent, BlockEvent, ViewMode, editor_view, reader_view};
	pub use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
	pub use crate::editor::{BlockDocument, BlockNode};
	pub use crate::error::{BlockError, BlockResult};
	pub use crate::pipeline::{BlockRenderer, RenderOptions};
	pub use crate::registry::BlockDefinition;
	pub use crate::schema::BlockSchema;
}
