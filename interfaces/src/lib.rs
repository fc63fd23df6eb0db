pub mod defs;
pub mod empty;

pub use defs::{Datastore, JournalEntry};
pub use empty::EmptyDatastore;
