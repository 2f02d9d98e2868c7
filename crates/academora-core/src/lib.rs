//! # AcademOra Core
//!
//! Foundation types shared by the block renderer and the hydration runtime:
//!
//! - **node**: value-level HTML tree (`Node`, `Element`) with escaping
//!   serialization
//! - **html**: lenient HTML fragment parsing into `Node` trees
//! - **dom**: arena `Document` with subtree mutation observers
//! - **markers**: block marker attribute names and block id generation

pub mod dom;
pub mod html;
pub mod markers;
pub mod node;

pub use dom::{Document, DomError, MutationRecord, NodeId, ObserverId};
pub use markers::{BlockMarker, generate_block_id, generate_block_id_with_prefix};
pub use node::{Element, IntoNode, Node};
