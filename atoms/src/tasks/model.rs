use serde::{Deserialize, Serialize};

fn default_energy() -> String {
    "medium".to_string()
}

/// A child item embedded in a task. The id is whatever the client supplied;
/// subtasks have no lifecycle of their own.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubTask {
    pub id: String,
    pub content: String,
    #[serde(rename = "isCompleted", default)]
    pub is_completed: bool,
}

/// Task domain model. Wire names are the camelCase ones the frontend expects;
/// DynamoDB attributes are snake_case (see service.rs).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub project: String,
    #[serde(default = "default_energy")]
    pub energy: String,
    #[serde(rename = "isUrgent", default)]
    pub is_urgent: bool,
    #[serde(rename = "isSomeday", default)]
    pub is_someday: bool,
    #[serde(rename = "isCompleted", default)]
    pub is_completed: bool,
    #[serde(rename = "dueDate", default)]
    pub due_date: String,
    #[serde(default)]
    pub step: Option<i64>,
    #[serde(default)]
    pub subtasks: Vec<SubTask>,
}

/// Body accepted on POST /tasks and PUT /tasks/{id}. A PUT replaces the whole
/// record with exactly these fields; nothing is merged.
#[derive(Debug, Deserialize, Clone)]
pub struct TaskPayload {
    pub content: String,
    #[serde(default)]
    pub project: String,
    #[serde(default = "default_energy")]
    pub energy: String,
    #[serde(rename = "isUrgent", default)]
    pub is_urgent: bool,
    #[serde(rename = "isSomeday", default)]
    pub is_someday: bool,
    #[serde(rename = "isCompleted", default)]
    pub is_completed: bool,
    #[serde(rename = "dueDate", default)]
    pub due_date: String,
    #[serde(default)]
    pub step: Option<i64>,
    #[serde(default)]
    pub subtasks: Vec<SubTask>,
}

impl TaskPayload {
    /// Materialize the record shape under an assigned identifier.
    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            content: self.content,
            project: self.project,
            energy: self.energy,
            is_urgent: self.is_urgent,
            is_someday: self.is_someday,
            is_completed: self.is_completed,
            due_date: self.due_date,
            step: self.step,
            subtasks: self.subtasks,
        }
    }
}
