use aws_sdk_dynamodb::operation::put_item::builders::PutItemFluentBuilder;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;

use super::model::{SubTask, Task, TaskPayload};
use crate::error::StoreError;
use crate::store::TASK_LIST_LIMIT;

pub(crate) fn owner_pk(user_id: &str) -> String {
    format!("USER#{}", user_id)
}

fn task_sk(task_id: &str) -> String {
    format!("TASK#{}", task_id)
}

/// Load all tasks for one owner (pure domain logic, no HTTP). Store-native
/// order, capped at TASK_LIST_LIMIT. An empty owner never queries: it is
/// normalized to an empty list, not an error.
pub async fn list_tasks(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
) -> Result<Vec<Task>, StoreError> {
    if user_id.is_empty() {
        return Ok(Vec::new());
    }

    let result = client
        .query()
        .table_name(table_name)
        .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
        .expression_attribute_values(":pk", AttributeValue::S(owner_pk(user_id)))
        .expression_attribute_values(":sk_prefix", AttributeValue::S("TASK#".to_string()))
        .limit(TASK_LIST_LIMIT)
        .send()
        .await
        .map_err(|e| StoreError::Backend(format!("DynamoDB query error: {}", e)))?;

    let mut tasks = Vec::new();
    for item in result.items() {
        if let Some(sk) = item.get("SK").and_then(|v| v.as_s().ok()) {
            if let Some(task_id) = sk.strip_prefix("TASK#") {
                tasks.push(task_from_item(task_id, item));
            }
        }
    }

    Ok(tasks)
}

/// Create a new task owned by `user_id`. The identifier is assigned here and
/// never accepted from the client.
pub async fn create_task(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
    payload: TaskPayload,
) -> Result<Task, StoreError> {
    if user_id.is_empty() {
        return Err(StoreError::MissingOwner);
    }

    let task_id = uuid::Uuid::new_v4().to_string();
    let builder = client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S(owner_pk(user_id)))
        .item("SK", AttributeValue::S(task_sk(&task_id)));

    apply_task_items(builder, &payload)
        .send()
        .await
        .map_err(|e| StoreError::Backend(format!("DynamoDB put_item error: {}", e)))?;

    Ok(payload.into_task(task_id))
}

/// Fetch one task by {id, owner}.
pub async fn get_task(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
    task_id: &str,
) -> Result<Task, StoreError> {
    let result = client
        .get_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S(owner_pk(user_id)))
        .key("SK", AttributeValue::S(task_sk(task_id)))
        .send()
        .await
        .map_err(|e| StoreError::Backend(format!("DynamoDB get_item error: {}", e)))?;

    match result.item() {
        Some(item) => Ok(task_from_item(task_id, item)),
        None => Err(StoreError::NotFound("Task")),
    }
}

/// Overwrite the whole record matching {id, owner}. The condition makes a
/// missing record a 404 instead of an upsert. The response is read back from
/// storage, so a concurrent delete between the write and the read surfaces
/// as NotFound.
pub async fn replace_task(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
    task_id: &str,
    payload: TaskPayload,
) -> Result<Task, StoreError> {
    let builder = client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S(owner_pk(user_id)))
        .item("SK", AttributeValue::S(task_sk(task_id)))
        .condition_expression("attribute_exists(PK) AND attribute_exists(SK)");

    apply_task_items(builder, &payload)
        .send()
        .await
        .map_err(|e| {
            if e.as_service_error()
                .map(|se| se.is_conditional_check_failed_exception())
                .unwrap_or(false)
            {
                StoreError::NotFound("Task")
            } else {
                StoreError::Backend(format!("DynamoDB put_item error: {}", e))
            }
        })?;

    get_task(client, table_name, user_id, task_id).await
}

/// Delete the task matching {id, owner}; NotFound when nothing matched.
pub async fn delete_task(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
    task_id: &str,
) -> Result<(), StoreError> {
    let result = client
        .delete_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S(owner_pk(user_id)))
        .key("SK", AttributeValue::S(task_sk(task_id)))
        .return_values(ReturnValue::AllOld)
        .send()
        .await
        .map_err(|e| StoreError::Backend(format!("DynamoDB delete_item error: {}", e)))?;

    if result.attributes().is_none() {
        return Err(StoreError::NotFound("Task"));
    }

    Ok(())
}

/// The full non-key attribute set for a task record. Both create and replace
/// write every attribute, so a PUT is a genuine whole-record overwrite.
fn apply_task_items(builder: PutItemFluentBuilder, payload: &TaskPayload) -> PutItemFluentBuilder {
    let subtasks = payload.subtasks.iter().map(subtask_to_value).collect();
    let mut builder = builder
        .item("content", AttributeValue::S(payload.content.clone()))
        .item("project", AttributeValue::S(payload.project.clone()))
        .item("energy", AttributeValue::S(payload.energy.clone()))
        .item("is_urgent", AttributeValue::Bool(payload.is_urgent))
        .item("is_someday", AttributeValue::Bool(payload.is_someday))
        .item("is_completed", AttributeValue::Bool(payload.is_completed))
        .item("due_date", AttributeValue::S(payload.due_date.clone()))
        .item("subtasks", AttributeValue::L(subtasks));

    if let Some(step) = payload.step {
        builder = builder.item("step", AttributeValue::N(step.to_string()));
    }

    builder
}

/// Rebuild a Task from its stored attributes. The id comes from the SK, not
/// from an attribute, so it can never drift from the key.
pub(crate) fn task_from_item(task_id: &str, item: &HashMap<String, AttributeValue>) -> Task {
    Task {
        id: task_id.to_string(),
        content: item
            .get("content")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        project: item
            .get("project")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        energy: item
            .get("energy")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "medium".to_string()),
        is_urgent: item
            .get("is_urgent")
            .and_then(|v| v.as_bool().ok())
            .copied()
            .unwrap_or(false),
        is_someday: item
            .get("is_someday")
            .and_then(|v| v.as_bool().ok())
            .copied()
            .unwrap_or(false),
        is_completed: item
            .get("is_completed")
            .and_then(|v| v.as_bool().ok())
            .copied()
            .unwrap_or(false),
        due_date: item
            .get("due_date")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        step: item
            .get("step")
            .and_then(|v| v.as_n().ok())
            .and_then(|n| n.parse().ok()),
        subtasks: item
            .get("subtasks")
            .and_then(|v| v.as_l().ok())
            .map(|list| list.iter().filter_map(subtask_from_value).collect())
            .unwrap_or_default(),
    }
}

fn subtask_to_value(sub: &SubTask) -> AttributeValue {
    let mut map = HashMap::new();
    map.insert("id".to_string(), AttributeValue::S(sub.id.clone()));
    map.insert("content".to_string(), AttributeValue::S(sub.content.clone()));
    map.insert(
        "is_completed".to_string(),
        AttributeValue::Bool(sub.is_completed),
    );
    AttributeValue::M(map)
}

fn subtask_from_value(value: &AttributeValue) -> Option<SubTask> {
    let map = value.as_m().ok()?;
    Some(SubTask {
        id: map.get("id")?.as_s().ok()?.to_string(),
        content: map
            .get("content")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        is_completed: map
            .get("is_completed")
            .and_then(|v| v.as_bool().ok())
            .copied()
            .unwrap_or(false),
    })
}
