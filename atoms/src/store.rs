use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoClient;

use crate::agenda::model::{AgendaItem, AgendaItemPayload};
use crate::agenda::service as agenda_service;
use crate::error::StoreError;
use crate::tasks::model::{Task, TaskPayload};
use crate::tasks::service as task_service;

/// Fixed list caps; results past these are silently dropped, there is no
/// pagination.
pub const TASK_LIST_LIMIT: i32 = 1000;
pub const AGENDA_LIST_LIMIT: i32 = 100;

/// Owner-scoped CRUD over the two collections. Every method matches records
/// by {id, owner}, never by id alone, so one owner can never read or mutate
/// another's records.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list_tasks(&self, owner: &str) -> Result<Vec<Task>, StoreError>;
    async fn create_task(&self, owner: &str, payload: TaskPayload) -> Result<Task, StoreError>;
    async fn replace_task(
        &self,
        owner: &str,
        task_id: &str,
        payload: TaskPayload,
    ) -> Result<Task, StoreError>;
    async fn delete_task(&self, owner: &str, task_id: &str) -> Result<(), StoreError>;

    async fn list_agenda(&self, owner: &str) -> Result<Vec<AgendaItem>, StoreError>;
    async fn create_agenda_item(
        &self,
        owner: &str,
        payload: AgendaItemPayload,
    ) -> Result<AgendaItem, StoreError>;
    async fn replace_agenda_item(
        &self,
        owner: &str,
        item_id: &str,
        payload: AgendaItemPayload,
    ) -> Result<AgendaItem, StoreError>;
    async fn delete_agenda_item(&self, owner: &str, item_id: &str) -> Result<(), StoreError>;
}

/// Single-table DynamoDB backend: PK = USER#{owner}, SK = TASK#{id} or
/// AGENDA#{id}. Concurrent requests run independently; every operation is one
/// store call (replace adds a read-back).
pub struct DynamoStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: DynamoClient, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl TaskStore for DynamoStore {
    async fn list_tasks(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        task_service::list_tasks(&self.client, &self.table_name, owner).await
    }

    async fn create_task(&self, owner: &str, payload: TaskPayload) -> Result<Task, StoreError> {
        task_service::create_task(&self.client, &self.table_name, owner, payload).await
    }

    async fn replace_task(
        &self,
        owner: &str,
        task_id: &str,
        payload: TaskPayload,
    ) -> Result<Task, StoreError> {
        task_service::replace_task(&self.client, &self.table_name, owner, task_id, payload).await
    }

    async fn delete_task(&self, owner: &str, task_id: &str) -> Result<(), StoreError> {
        task_service::delete_task(&self.client, &self.table_name, owner, task_id).await
    }

    async fn list_agenda(&self, owner: &str) -> Result<Vec<AgendaItem>, StoreError> {
        agenda_service::list_agenda(&self.client, &self.table_name, owner).await
    }

    async fn create_agenda_item(
        &self,
        owner: &str,
        payload: AgendaItemPayload,
    ) -> Result<AgendaItem, StoreError> {
        agenda_service::create_agenda_item(&self.client, &self.table_name, owner, payload).await
    }

    async fn replace_agenda_item(
        &self,
        owner: &str,
        item_id: &str,
        payload: AgendaItemPayload,
    ) -> Result<AgendaItem, StoreError> {
        agenda_service::replace_agenda_item(&self.client, &self.table_name, owner, item_id, payload)
            .await
    }

    async fn delete_agenda_item(&self, owner: &str, item_id: &str) -> Result<(), StoreError> {
        agenda_service::delete_agenda_item(&self.client, &self.table_name, owner, item_id).await
    }
}
