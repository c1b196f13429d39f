pub mod agenda;
pub mod error;
pub mod respond;
pub mod store;
pub mod tasks;

pub use error::StoreError;
pub use store::{DynamoStore, TaskStore, AGENDA_LIST_LIMIT, TASK_LIST_LIMIT};
