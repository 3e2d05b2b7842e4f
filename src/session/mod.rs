//! # Session Module
//!
//! The session store and the durable storage behind it.

pub mod storage;
pub mod store;

pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use store::{SessionSnapshot, SessionStore};
