use std::env;
use std::sync::Arc;

use focusmate_atoms::store::{DynamoStore, TaskStore};

use crate::memory::MemoryStore;

/// Shared state built once at startup and handed to every request.
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
}

impl AppState {
    /// Select the backend from the environment: STORE_BACKEND=memory keeps
    /// everything in-process (data has process lifetime only); anything else
    /// talks to DynamoDB using TABLE_NAME.
    pub async fn from_env() -> Self {
        let backend = env::var("STORE_BACKEND").unwrap_or_else(|_| "dynamodb".to_string());
        if backend == "memory" {
            tracing::info!("using in-memory store; data is lost on restart");
            return Self::with_store(Arc::new(MemoryStore::new()));
        }

        let table_name = env::var("TABLE_NAME").unwrap_or_else(|_| "focusmate".to_string());
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = aws_sdk_dynamodb::Client::new(&config);
        Self::with_store(Arc::new(DynamoStore::new(client, table_name)))
    }

    pub fn with_store(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}
