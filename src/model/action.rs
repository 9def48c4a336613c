use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// What happened to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Place,
    Move,
    Pickup,
    Discard,
}

impl ActionKind {
    /// Pickup and discard end an order's lifecycle.
    pub fn is_terminal(self) -> bool {
        matches!(self, ActionKind::Pickup | ActionKind::Discard)
    }
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::Place => "place",
            ActionKind::Move => "move",
            ActionKind::Pickup => "pickup",
            ActionKind::Discard => "discard",
        };
        f.write_str(name)
    }
}

/// One entry of the action log, in the shape the judge consumes:
/// `{"timestamp": 1700000000000000, "id": "a1", "action": "place"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Microseconds since the Unix epoch.
    pub timestamp: i64,
    pub id: String,
    pub action: ActionKind,
}

impl Action {
    pub fn new(timestamp: i64, id: impl Into<String>, action: ActionKind) -> Self {
        Self {
            timestamp,
            id: id.into(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_shape() {
        let action = Action::new(1_700_000_000_000_000, "a1", ActionKind::Discard);
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"timestamp": 1_700_000_000_000_000_i64, "id": "a1", "action": "discard"})
        );
    }

    #[test]
    fn test_terminal_kinds() {
        assert!(ActionKind::Pickup.is_terminal());
        assert!(ActionKind::Discard.is_terminal());
        assert!(!ActionKind::Place.is_terminal());
        assert!(!ActionKind::Move.is_terminal());
    }
}
