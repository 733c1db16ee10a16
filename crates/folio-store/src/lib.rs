//! Folio Store: an in-process implementation of the realtime document
//! store capability.

pub mod memory_store;

pub use memory_store::MemoryStore;
