//! Store backends.

pub mod journal;
pub mod memory;

pub use journal::JournalStore;
pub use memory::InMemoryStore;
