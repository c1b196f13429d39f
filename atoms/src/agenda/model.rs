use serde::{Deserialize, Serialize};

/// One slot on the day's agenda. Independent of tasks; only the completion
/// flag and the free-form time label matter to the frontend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AgendaItem {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub time_slot: String,
    #[serde(rename = "isCompleted", default)]
    pub is_completed: bool,
}

/// Body accepted on POST /agenda and PUT /agenda/{id}; a PUT overwrites the
/// whole record.
#[derive(Debug, Deserialize, Clone)]
pub struct AgendaItemPayload {
    pub content: String,
    #[serde(default)]
    pub time_slot: String,
    #[serde(rename = "isCompleted", default)]
    pub is_completed: bool,
}

impl AgendaItemPayload {
    pub fn into_item(self, id: String) -> AgendaItem {
        AgendaItem {
            id,
            content: self.content,
            time_slot: self.time_slot,
            is_completed: self.is_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_defaults_from_minimal_body() {
        let payload: AgendaItemPayload =
            serde_json::from_str(r#"{"content":"standup"}"#).unwrap();
        assert_eq!(payload.content, "standup");
        assert_eq!(payload.time_slot, "");
        assert!(!payload.is_completed);
    }

    #[test]
    fn item_serializes_wire_names() {
        let item = AgendaItem {
            id: "a-1".to_string(),
            content: "standup".to_string(),
            time_slot: "09:00".to_string(),
            is_completed: true,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["time_slot"], "09:00");
        assert_eq!(value["isCompleted"], true);
        assert!(value.get("is_completed").is_none());
    }
}
