mod contacts;
mod memory;

pub use contacts::{ContactStore, PgContactStore};
pub use memory::MemoryContactStore;
