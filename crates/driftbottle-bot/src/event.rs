//! OneBot v11 event payloads pushed by the gateway.
//!
//! Only the fields the bot routes on are modeled; everything else in the
//! push payload is ignored. Non-message and non-group events never reach the
//! dispatcher.

use serde::Deserialize;

/// A raw event as POSTed by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    /// Event family ("message", "notice", "meta_event", ...).
    #[serde(default)]
    pub post_type: String,
    /// Message scope ("group" or "private") for message events.
    #[serde(default)]
    pub message_type: String,
    /// Sender's user id.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Originating group id, for group messages.
    #[serde(default)]
    pub group_id: Option<i64>,
    /// Message text (CQ-code string for rich content).
    #[serde(default)]
    pub raw_message: String,
}

/// A group message extracted from a push event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMessage {
    /// Sender's user id.
    pub user_id: i64,
    /// Originating group id.
    pub group_id: i64,
    /// Message text.
    pub text: String,
}

impl PushEvent {
    /// Projects the event to a group message, or `None` for anything else.
    pub fn into_group_message(self) -> Option<GroupMessage> {
        if self.post_type != "message" || self.message_type != "group" {
            return None;
        }
        Some(GroupMessage {
            user_id: self.user_id?,
            group_id: self.group_id?,
            text: self.raw_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_message_event() {
        let json = r#"{
            "time": 1700000000,
            "self_id": 10000,
            "post_type": "message",
            "message_type": "group",
            "message_id": 42,
            "user_id": 100,
            "group_id": 200,
            "raw_message": "捡漂流瓶"
        }"#;

        let event: PushEvent = serde_json::from_str(json).unwrap();
        let msg = event.into_group_message().unwrap();
        assert_eq!(
            msg,
            GroupMessage {
                user_id: 100,
                group_id: 200,
                text: "捡漂流瓶".to_string(),
            }
        );
    }

    #[test]
    fn test_private_message_is_filtered() {
        let json = r#"{
            "post_type": "message",
            "message_type": "private",
            "user_id": 100,
            "raw_message": "捡漂流瓶"
        }"#;

        let event: PushEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.into_group_message(), None);
    }

    #[test]
    fn test_meta_event_is_filtered() {
        let json = r#"{ "post_type": "meta_event", "meta_event_type": "heartbeat" }"#;
        let event: PushEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.into_group_message(), None);
    }
}
