//! Per-user fact graph.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               SharedFactGraph                │
//! │          (one lock around one graph)         │
//! │  ┌────────────────────────────────────────┐  │
//! │  │ FactGraph                              │  │
//! │  │  nodes:    id -> Node { kind }         │  │
//! │  │  outgoing: user -> [Edge] (ordered)    │  │
//! │  └────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────┘
//! ```

mod fact;
mod node;
mod relation;
mod shared;
mod store;

pub use fact::Fact;
pub use node::{Node, NodeKind};
pub use relation::Relation;
pub use shared::SharedFactGraph;
pub use store::FactGraph;
