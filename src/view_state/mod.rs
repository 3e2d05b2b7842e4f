//! # View State Helpers
//!
//! Small building blocks for the layer that renders API results:
//! - `generation`: discard responses that a newer request has superseded
//! - `reconcile`: tentative local patches replaced by server truth
//! - `degraded`: explicit placeholder data when a fetch fails
//! - `fallback`: the placeholder data itself

pub mod degraded;
pub mod fallback;
pub mod generation;
pub mod reconcile;

pub use degraded::Loaded;
pub use generation::{Generation, LatestSlot, RequestGenerations};
pub use reconcile::Reconciling;

use std::hash::Hash;

/// Records with a stable server-assigned identity
pub trait Keyed {
    type Key: Eq + Hash + Clone;

    fn key(&self) -> Self::Key;
}
