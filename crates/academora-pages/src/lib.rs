//! # AcademOra Pages
//!
//! Client hydration runtime for AcademOra content blocks.
//!
//! Server-rendered articles contain static block markup (see
//! `academora-blocks`). This crate finds every marked block in an
//! [`academora_core::dom::Document`], reads its embedded config, and
//! replaces it with a mounted interactive component. Corrupt or unknown
//! blocks are skipped with a diagnostic and keep their static markup.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use academora_core::dom::Document;
//! use academora_pages::bootstrap::bootstrap;
//!
//! let mut doc = Document::from_html(&article_html);
//! let (runtime, report) = bootstrap(&mut doc);
//! println!("{report}");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod bootstrap;
pub mod hydration;

pub use bootstrap::{PageSession, bootstrap, start};
pub use hydration::{
	ComponentRegistry, HydrationError, HydrationOptions, HydrationOutcome, HydrationReport,
	HydrationRuntime, HydrationStage, MountedBlock, WatchHandle,
};
