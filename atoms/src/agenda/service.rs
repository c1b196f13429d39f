use aws_sdk_dynamodb::operation::put_item::builders::PutItemFluentBuilder;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;

use super::model::{AgendaItem, AgendaItemPayload};
use crate::error::StoreError;
use crate::store::AGENDA_LIST_LIMIT;
use crate::tasks::service::owner_pk;

fn agenda_sk(item_id: &str) -> String {
    format!("AGENDA#{}", item_id)
}

/// Load the owner's agenda, store-native order, capped at AGENDA_LIST_LIMIT.
pub async fn list_agenda(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
) -> Result<Vec<AgendaItem>, StoreError> {
    if user_id.is_empty() {
        return Ok(Vec::new());
    }

    let result = client
        .query()
        .table_name(table_name)
        .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
        .expression_attribute_values(":pk", AttributeValue::S(owner_pk(user_id)))
        .expression_attribute_values(":sk_prefix", AttributeValue::S("AGENDA#".to_string()))
        .limit(AGENDA_LIST_LIMIT)
        .send()
        .await
        .map_err(|e| StoreError::Backend(format!("DynamoDB query error: {}", e)))?;

    let mut items = Vec::new();
    for item in result.items() {
        if let Some(sk) = item.get("SK").and_then(|v| v.as_s().ok()) {
            if let Some(item_id) = sk.strip_prefix("AGENDA#") {
                items.push(agenda_from_item(item_id, item));
            }
        }
    }

    Ok(items)
}

pub async fn create_agenda_item(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
    payload: AgendaItemPayload,
) -> Result<AgendaItem, StoreError> {
    if user_id.is_empty() {
        return Err(StoreError::MissingOwner);
    }

    let item_id = uuid::Uuid::new_v4().to_string();
    let builder = client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S(owner_pk(user_id)))
        .item("SK", AttributeValue::S(agenda_sk(&item_id)));

    apply_agenda_items(builder, &payload)
        .send()
        .await
        .map_err(|e| StoreError::Backend(format!("DynamoDB put_item error: {}", e)))?;

    Ok(payload.into_item(item_id))
}

pub async fn get_agenda_item(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
    item_id: &str,
) -> Result<AgendaItem, StoreError> {
    let result = client
        .get_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S(owner_pk(user_id)))
        .key("SK", AttributeValue::S(agenda_sk(item_id)))
        .send()
        .await
        .map_err(|e| StoreError::Backend(format!("DynamoDB get_item error: {}", e)))?;

    match result.item() {
        Some(item) => Ok(agenda_from_item(item_id, item)),
        None => Err(StoreError::NotFound("Agenda item")),
    }
}

/// Whole-record overwrite matching {id, owner}; 404 when nothing matches,
/// same policy as tasks.
pub async fn replace_agenda_item(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
    item_id: &str,
    payload: AgendaItemPayload,
) -> Result<AgendaItem, StoreError> {
    let builder = client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S(owner_pk(user_id)))
        .item("SK", AttributeValue::S(agenda_sk(item_id)))
        .condition_expression("attribute_exists(PK) AND attribute_exists(SK)");

    apply_agenda_items(builder, &payload)
        .send()
        .await
        .map_err(|e| {
            if e.as_service_error()
                .map(|se| se.is_conditional_check_failed_exception())
                .unwrap_or(false)
            {
                StoreError::NotFound("Agenda item")
            } else {
                StoreError::Backend(format!("DynamoDB put_item error: {}", e))
            }
        })?;

    get_agenda_item(client, table_name, user_id, item_id).await
}

pub async fn delete_agenda_item(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
    item_id: &str,
) -> Result<(), StoreError> {
    let result = client
        .delete_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S(owner_pk(user_id)))
        .key("SK", AttributeValue::S(agenda_sk(item_id)))
        .return_values(ReturnValue::AllOld)
        .send()
        .await
        .map_err(|e| StoreError::Backend(format!("DynamoDB delete_item error: {}", e)))?;

    if result.attributes().is_none() {
        return Err(StoreError::NotFound("Agenda item"));
    }

    Ok(())
}

fn apply_agenda_items(
    builder: PutItemFluentBuilder,
    payload: &AgendaItemPayload,
) -> PutItemFluentBuilder {
    builder
        .item("content", AttributeValue::S(payload.content.clone()))
        .item("time_slot", AttributeValue::S(payload.time_slot.clone()))
        .item("is_completed", AttributeValue::Bool(payload.is_completed))
}

fn agenda_from_item(item_id: &str, item: &HashMap<String, AttributeValue>) -> AgendaItem {
    AgendaItem {
        id: item_id.to_string(),
        content: item
            .get("content")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        time_slot: item
            .get("time_slot")
            .and_then(|v| v.as_s().ok())
            .map(|s| s.to_string())
            .unwrap_or_default(),
        is_completed: item
            .get("is_completed")
            .and_then(|v| v.as_bool().ok())
            .copied()
            .unwrap_or(false),
    }
}
