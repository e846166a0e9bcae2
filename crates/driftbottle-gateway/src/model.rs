//! API request and response types for the OneBot v11 HTTP gateway.

use serde::{Deserialize, Serialize};

use driftbottle_core::{GatewayError, GatewayResult};

/// A generic API response envelope from OneBot v11.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// The status: "ok", "async", or "failed".
    #[serde(default)]
    pub status: String,
    /// The return code (0 for success).
    pub retcode: i64,
    /// The response data (if successful).
    pub data: Option<T>,
    /// Error message (if failed).
    #[serde(default)]
    pub msg: Option<String>,
    /// Additional error info.
    #[serde(default)]
    pub wording: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Checks if the API call was successful.
    pub fn is_ok(&self) -> bool {
        self.retcode == 0
    }

    /// Converts the envelope into a result, requiring a `data` payload.
    pub fn into_result(self) -> GatewayResult<T> {
        if !self.is_ok() {
            return Err(GatewayError::Api {
                retcode: self.retcode,
                message: self
                    .msg
                    .or(self.wording)
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        self.data.ok_or(GatewayError::MissingData)
    }
}

/// Response for `get_stranger_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrangerInfo {
    /// The user's account number.
    pub user_id: i64,
    /// The user's nickname.
    pub nickname: String,
    /// The user's sex.
    #[serde(default)]
    pub sex: String,
    /// The user's age.
    #[serde(default)]
    pub age: i32,
}

/// Response for `get_group_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupInfo {
    /// The group ID.
    pub group_id: i64,
    /// The group name.
    pub group_name: String,
    /// The member count.
    #[serde(default)]
    pub member_count: i32,
    /// The maximum member count.
    #[serde(default)]
    pub max_member_count: i32,
}

/// Response for `send_group_msg`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageId {
    /// Id of the sent message.
    pub message_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_envelope() {
        let json = r#"{
            "status": "ok",
            "retcode": 0,
            "data": { "user_id": 100, "nickname": "sea-farer", "sex": "unknown", "age": 0 }
        }"#;

        let resp: ApiResponse<StrangerInfo> = serde_json::from_str(json).unwrap();
        assert!(resp.is_ok());
        let info = resp.into_result().unwrap();
        assert_eq!(info.user_id, 100);
        assert_eq!(info.nickname, "sea-farer");
    }

    #[test]
    fn test_decode_failed_envelope() {
        let json = r#"{
            "status": "failed",
            "retcode": 1400,
            "data": null,
            "msg": "invalid request"
        }"#;

        let resp: ApiResponse<GroupInfo> = serde_json::from_str(json).unwrap();
        assert!(!resp.is_ok());
        match resp.into_result() {
            Err(driftbottle_core::GatewayError::Api { retcode, message }) => {
                assert_eq!(retcode, 1400);
                assert_eq!(message, "invalid request");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_ok_envelope_without_data_is_missing_data() {
        let json = r#"{ "status": "ok", "retcode": 0, "data": null }"#;
        let resp: ApiResponse<StrangerInfo> = serde_json::from_str(json).unwrap();
        assert!(matches!(
            resp.into_result(),
            Err(driftbottle_core::GatewayError::MissingData)
        ));
    }
}
