use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use focusmate_atoms::agenda::model::{AgendaItem, AgendaItemPayload};
use focusmate_atoms::error::StoreError;
use focusmate_atoms::store::{TaskStore, AGENDA_LIST_LIMIT, TASK_LIST_LIMIT};
use focusmate_atoms::tasks::model::{Task, TaskPayload};

/// In-process backend with the same contract as DynamoDB. Every access goes
/// through one mutex held only across the map operation itself, so concurrent
/// writers cannot interleave partial updates. Data has process lifetime.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

/// Per-owner record lists, insertion order preserved ("store-native" order).
#[derive(Default)]
struct Collections {
    tasks: HashMap<String, Vec<Task>>,
    agenda: HashMap<String, Vec<AgendaItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        if owner.is_empty() {
            return Ok(Vec::new());
        }
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tasks
            .get(owner)
            .map(|records| {
                records
                    .iter()
                    .take(TASK_LIST_LIMIT as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create_task(&self, owner: &str, payload: TaskPayload) -> Result<Task, StoreError> {
        if owner.is_empty() {
            return Err(StoreError::MissingOwner);
        }
        let task = payload.into_task(uuid::Uuid::new_v4().to_string());
        let mut inner = self.inner.lock().unwrap();
        inner
            .tasks
            .entry(owner.to_string())
            .or_default()
            .push(task.clone());
        Ok(task)
    }

    async fn replace_task(
        &self,
        owner: &str,
        task_id: &str,
        payload: TaskPayload,
    ) -> Result<Task, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let records = inner
            .tasks
            .get_mut(owner)
            .ok_or(StoreError::NotFound("Task"))?;
        let slot = records
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(StoreError::NotFound("Task"))?;
        *slot = payload.into_task(task_id.to_string());
        Ok(slot.clone())
    }

    async fn delete_task(&self, owner: &str, task_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let records = inner
            .tasks
            .get_mut(owner)
            .ok_or(StoreError::NotFound("Task"))?;
        let before = records.len();
        records.retain(|t| t.id != task_id);
        if records.len() == before {
            return Err(StoreError::NotFound("Task"));
        }
        Ok(())
    }

    async fn list_agenda(&self, owner: &str) -> Result<Vec<AgendaItem>, StoreError> {
        if owner.is_empty() {
            return Ok(Vec::new());
        }
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .agenda
            .get(owner)
            .map(|records| {
                records
                    .iter()
                    .take(AGENDA_LIST_LIMIT as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create_agenda_item(
        &self,
        owner: &str,
        payload: AgendaItemPayload,
    ) -> Result<AgendaItem, StoreError> {
        if owner.is_empty() {
            return Err(StoreError::MissingOwner);
        }
        let item = payload.into_item(uuid::Uuid::new_v4().to_string());
        let mut inner = self.inner.lock().unwrap();
        inner
            .agenda
            .entry(owner.to_string())
            .or_default()
            .push(item.clone());
        Ok(item)
    }

    async fn replace_agenda_item(
        &self,
        owner: &str,
        item_id: &str,
        payload: AgendaItemPayload,
    ) -> Result<AgendaItem, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let records = inner
            .agenda
            .get_mut(owner)
            .ok_or(StoreError::NotFound("Agenda item"))?;
        let slot = records
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(StoreError::NotFound("Agenda item"))?;
        *slot = payload.into_item(item_id.to_string());
        Ok(slot.clone())
    }

    async fn delete_agenda_item(&self, owner: &str, item_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let records = inner
            .agenda
            .get_mut(owner)
            .ok_or(StoreError::NotFound("Agenda item"))?;
        let before = records.len();
        records.retain(|i| i.id != item_id);
        if records.len() == before {
            return Err(StoreError::NotFound("Agenda item"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_payload(content: &str) -> TaskPayload {
        serde_json::from_value(serde_json::json!({ "content": content })).unwrap()
    }

    fn agenda_payload(content: &str) -> AgendaItemPayload {
        serde_json::from_value(serde_json::json!({ "content": content })).unwrap()
    }

    #[tokio::test]
    async fn create_then_list_returns_record_with_id() {
        let store = MemoryStore::new();
        let created = store
            .create_task("alice", task_payload("buy milk"))
            .await
            .unwrap();
        assert!(!created.id.is_empty());

        let listed = store.list_tasks("alice").await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn list_without_owner_is_empty_not_an_error() {
        let store = MemoryStore::new();
        assert!(store.list_tasks("").await.unwrap().is_empty());
        assert!(store.list_agenda("").await.unwrap().is_empty());
        assert!(store.list_tasks("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_without_owner_is_rejected_and_persists_nothing() {
        let store = MemoryStore::new();
        let err = store.create_task("", task_payload("x")).await.unwrap_err();
        assert_eq!(err, StoreError::MissingOwner);
        assert!(store.inner.lock().unwrap().tasks.is_empty());
    }

    #[tokio::test]
    async fn replace_overwrites_whole_record() {
        let store = MemoryStore::new();
        let created = store
            .create_task(
                "alice",
                serde_json::from_value(serde_json::json!({
                    "content": "buy milk",
                    "project": "home",
                    "isUrgent": true,
                    "energy": "high"
                }))
                .unwrap(),
            )
            .await
            .unwrap();

        let replaced = store
            .replace_task("alice", &created.id, task_payload("buy oat milk"))
            .await
            .unwrap();

        // Nothing merges: fields absent from the PUT body fall back to defaults.
        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.content, "buy oat milk");
        assert_eq!(replaced.project, "");
        assert_eq!(replaced.energy, "medium");
        assert!(!replaced.is_urgent);
        assert_eq!(store.list_tasks("alice").await.unwrap(), vec![replaced]);
    }

    #[tokio::test]
    async fn replace_missing_record_is_not_found_and_touches_nothing() {
        let store = MemoryStore::new();
        let kept = store
            .create_task("alice", task_payload("keep me"))
            .await
            .unwrap();

        let err = store
            .replace_task("alice", "no-such-id", task_payload("x"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound("Task"));
        assert_eq!(store.list_tasks("alice").await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_and_second_delete_is_not_found() {
        let store = MemoryStore::new();
        let first = store.create_task("alice", task_payload("one")).await.unwrap();
        let second = store.create_task("alice", task_payload("two")).await.unwrap();

        store.delete_task("alice", &first.id).await.unwrap();
        assert_eq!(store.list_tasks("alice").await.unwrap(), vec![second]);

        let err = store.delete_task("alice", &first.id).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound("Task"));
    }

    #[tokio::test]
    async fn cross_owner_isolation() {
        let store = MemoryStore::new();
        let alices = store
            .create_task("alice", task_payload("alice task"))
            .await
            .unwrap();
        store
            .create_task("bob", task_payload("bob task"))
            .await
            .unwrap();

        let listed = store.list_tasks("alice").await.unwrap();
        assert_eq!(listed, vec![alices.clone()]);

        // Bob cannot mutate alice's record through her id.
        assert_eq!(
            store
                .replace_task("bob", &alices.id, task_payload("stolen"))
                .await
                .unwrap_err(),
            StoreError::NotFound("Task")
        );
        assert_eq!(
            store.delete_task("bob", &alices.id).await.unwrap_err(),
            StoreError::NotFound("Task")
        );
        assert_eq!(store.list_tasks("alice").await.unwrap(), vec![alices]);
    }

    #[tokio::test]
    async fn agenda_list_is_capped() {
        let store = MemoryStore::new();
        for i in 0..(AGENDA_LIST_LIMIT as usize + 5) {
            store
                .create_agenda_item("alice", agenda_payload(&format!("slot {}", i)))
                .await
                .unwrap();
        }
        let listed = store.list_agenda("alice").await.unwrap();
        assert_eq!(listed.len(), AGENDA_LIST_LIMIT as usize);
        assert_eq!(listed[0].content, "slot 0");
    }

    #[tokio::test]
    async fn agenda_delete_missing_is_not_found() {
        let store = MemoryStore::new();
        let created = store
            .create_agenda_item("alice", agenda_payload("standup"))
            .await
            .unwrap();
        store.delete_agenda_item("alice", &created.id).await.unwrap();
        assert_eq!(
            store
                .delete_agenda_item("alice", &created.id)
                .await
                .unwrap_err(),
            StoreError::NotFound("Agenda item")
        );
    }
}
