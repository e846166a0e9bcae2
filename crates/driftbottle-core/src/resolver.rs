//! The [`NameResolver`] seam.

use async_trait::async_trait;

use crate::error::GatewayResult;

/// Best-effort resolution of numeric identifiers to display names.
///
/// Backed by the chat gateway in production. Calls are bounded by a short
/// timeout on the implementation side; every transport, protocol, and decode
/// failure surfaces as a typed [`GatewayError`](crate::GatewayError) — the
/// lifecycle service degrades all of them to a placeholder and never lets
/// enrichment fail a pick.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Resolves a user id to a display name (nickname).
    async fn resolve_user_name(&self, user_id: i64) -> GatewayResult<String>;

    /// Resolves a group id to the group's display name.
    async fn resolve_group_name(&self, group_id: i64) -> GatewayResult<String>;
}
