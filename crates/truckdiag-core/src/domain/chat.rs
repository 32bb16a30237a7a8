//! Chat assistant conversation turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use truckdiag_oracle::{ChatRole, OracleTurn};
use uuid::Uuid;

/// One message in the assistant conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        ChatTurn {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, text)
    }

    /// The part of the turn the oracle sees.
    pub fn to_oracle(&self) -> OracleTurn {
        OracleTurn {
            role: self.role,
            text: self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_get_distinct_ids() {
        let a = ChatTurn::user("hello");
        let b = ChatTurn::user("hello");
        assert_ne!(a.id, b.id);
        assert_eq!(a.role, ChatRole::User);
    }

    #[test]
    fn test_to_oracle_drops_metadata() {
        let turn = ChatTurn::model("Check the fuse.");
        let oracle_turn = turn.to_oracle();
        assert_eq!(oracle_turn.role, ChatRole::Model);
        assert_eq!(oracle_turn.text, "Check the fuse.");
    }

    #[test]
    fn test_round_trips_through_json_history() {
        let history = vec![ChatTurn::user("q"), ChatTurn::model("a")];
        let json = serde_json::to_string(&history).unwrap();
        let back: Vec<ChatTurn> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
