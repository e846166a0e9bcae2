//! OneBot v11 HTTP API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use driftbottle_core::{GatewayError, GatewayResult, NameResolver};

use crate::model::{ApiResponse, GroupInfo, MessageId, StrangerInfo};

/// Gateway calls are best-effort and must not stall a pick; keep them short.
const API_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for a OneBot v11 gateway.
///
/// Each API action is a JSON POST to `{base_url}/{action}`; the response body
/// is the [`ApiResponse`] envelope.
pub struct OneBotHttpClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl OneBotHttpClient {
    /// Creates a client for the gateway at `address:port`.
    pub fn new(address: &str, port: u16, access_token: Option<String>) -> Self {
        let client = ClientBuilder::new()
            .timeout(API_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{address}:{port}"),
            access_token,
        }
    }

    /// Makes an API call and unwraps the response envelope.
    async fn call<P, T>(&self, action: &str, params: &P) -> GatewayResult<T>
    where
        P: Serialize + Sync,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, action);
        debug!(action = %action, "calling gateway api");

        let mut req = self.client.post(&url).json(params);
        if let Some(token) = &self.access_token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                code: status.as_u16(),
            });
        }

        let envelope: ApiResponse<T> = resp
            .json()
            .await
            .map_err(|e| GatewayError::Json(e.to_string()))?;
        envelope.into_result()
    }

    /// Gets user info; works regardless of shared group membership.
    pub async fn get_stranger_info(&self, user_id: i64) -> GatewayResult<StrangerInfo> {
        self.call("get_stranger_info", &json!({ "user_id": user_id }))
            .await
    }

    /// Gets group info.
    pub async fn get_group_info(&self, group_id: i64) -> GatewayResult<GroupInfo> {
        self.call(
            "get_group_info",
            &json!({ "group_id": group_id, "no_cache": false }),
        )
        .await
    }

    /// Sends a plain-text message to a group. Returns the message id.
    pub async fn send_group_msg(&self, group_id: i64, text: &str) -> GatewayResult<i64> {
        let data: MessageId = self
            .call(
                "send_group_msg",
                &json!({ "group_id": group_id, "message": text }),
            )
            .await?;
        Ok(data.message_id)
    }
}

#[async_trait]
impl NameResolver for OneBotHttpClient {
    async fn resolve_user_name(&self, user_id: i64) -> GatewayResult<String> {
        Ok(self.get_stranger_info(user_id).await?.nickname)
    }

    async fn resolve_group_name(&self, group_id: i64) -> GatewayResult<String> {
        Ok(self.get_group_info(group_id).await?.group_name)
    }
}
