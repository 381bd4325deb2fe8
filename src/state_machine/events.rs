use serde::{Deserialize, Serialize};

/// Events that drive container state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerEvent {
    /// Open a new fill cycle.
    Fill,
    /// Close the current fill cycle.
    Empty,
    /// Amend the open fill in place without changing state.
    AmendFill,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde() {
        let json = serde_json::to_string(&ContainerEvent::AmendFill).unwrap();
        assert_eq!(json, "\"amend_fill\"");
    }
}
