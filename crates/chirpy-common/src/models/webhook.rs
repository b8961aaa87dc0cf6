//! Polka billing webhook payloads.
//!
//! Only `user.upgraded` carries data Chirpy acts on, so the rest of the
//! payload is parsed leniently and checked by the handler.

use serde::Deserialize;
use uuid::Uuid;

/// Event name Polka sends when a user pays for Chirpy Red.
pub const USER_UPGRADED: &str = "user.upgraded";

/// Body of `POST /api/polka/webhooks`.
#[derive(Debug, Deserialize)]
pub struct PolkaEvent {
    #[serde(default)]
    pub event: String,
    pub data: Option<PolkaEventData>,
}

#[derive(Debug, Deserialize)]
pub struct PolkaEventData {
    pub user_id: Option<String>,
}

impl PolkaEvent {
    pub fn is_user_upgraded(&self) -> bool {
        self.event == USER_UPGRADED
    }

    /// The `data.user_id` field, if present and a valid UUID.
    pub fn user_id(&self) -> Option<Uuid> {
        self.data
            .as_ref()?
            .user_id
            .as_deref()?
            .trim()
            .parse()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> PolkaEvent {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn parses_upgrade_event() {
        let event = parse(
            r#"{"event":"user.upgraded","data":{"user_id":"3311741c-680c-4546-99f3-fc9efac2036c"}}"#,
        );
        assert!(event.is_user_upgraded());
        assert_eq!(
            event.user_id().map(|id| id.to_string()).as_deref(),
            Some("3311741c-680c-4546-99f3-fc9efac2036c")
        );
    }

    #[test]
    fn other_events_parse_without_data() {
        for raw in [
            r#"{"event":"user.payment_failed"}"#,
            r#"{"event":"user.payment_failed","data":null}"#,
            r#"{"event":"user.payment_failed","data":{}}"#,
            r#"{"event":"user.payment_failed","data":{"user_id":"abc"}}"#,
        ] {
            let event = parse(raw);
            assert!(!event.is_user_upgraded(), "{raw}");
            assert_eq!(event.user_id(), None, "{raw}");
        }
    }
}
