//! Client hydration
//!
//! Turns server-rendered block markup into mounted, interactive components:
//!
//! - [`runtime`]: the per-element state machine, batch hydration, mutation
//!   watching and event dispatch
//! - [`components`]: which component each block type mounts
//! - [`report`]: per-element outcomes of a pass

pub mod components;
pub mod report;
pub mod runtime;

pub use components::ComponentRegistry;
pub use report::{HydrationOutcome, HydrationReport, HydrationStage, MountedBlock};
pub use runtime::{HydrationError, HydrationOptions, HydrationRuntime, WatchHandle};
