pub mod memory;
pub mod types;

pub use memory::MemoryStore;
pub use types::AppState;
