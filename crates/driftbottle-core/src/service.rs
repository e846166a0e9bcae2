//! Bottle lifecycle service.
//!
//! Orchestrates the two user-facing operations over the store:
//!
//! - [`throw`](BottleService::throw) — validate, persist, echo back.
//! - [`pick`](BottleService::pick) — random fetch, atomic claim, best-effort
//!   name enrichment.
//!
//! The fetch-then-claim flow is optimistic: the randomly fetched bottle may
//! be claimed by a concurrent picker first. A lost race is reported as
//! [`PickOutcome::Empty`] and is not retried — the user is told the sea is
//! empty even though a bottle existed at read time. This mirrors the
//! product's observed behavior and keeps picks free of retry loops.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::model::Bottle;
use crate::resolver::NameResolver;
use crate::store::BottleStore;

/// Placeholder display name used when enrichment fails.
pub const UNKNOWN_NAME: &str = "未知";

/// Outcome of a throw operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThrowOutcome {
    /// The bottle was persisted. Carries the assigned id and the trimmed
    /// content for the caller's confirmation message.
    Thrown {
        /// The new bottle's id.
        id: i64,
        /// The trimmed content, echoed for the confirmation reply.
        content: String,
    },
    /// The content was empty after trimming; the store was not touched.
    EmptyContent,
}

/// Outcome of a pick operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// A bottle was claimed.
    Picked {
        /// The claimed bottle as it was at fetch time.
        bottle: Bottle,
        /// Sender's display name, or [`UNKNOWN_NAME`] if enrichment failed.
        sender_name: String,
        /// Sender group's display name, or [`UNKNOWN_NAME`].
        sender_group_name: String,
    },
    /// No Adrift bottle was available, or the claim race was lost.
    Empty,
}

/// The bottle lifecycle service.
///
/// Collaborators are injected at construction — no ambient globals — so unit
/// tests run against fakes for both the store and the resolver.
pub struct BottleService {
    store: Arc<dyn BottleStore>,
    resolver: Arc<dyn NameResolver>,
}

impl BottleService {
    /// Creates a new service over the given store and resolver.
    pub fn new(store: Arc<dyn BottleStore>, resolver: Arc<dyn NameResolver>) -> Self {
        Self { store, resolver }
    }

    /// Throws a bottle into the pool.
    ///
    /// Trims surrounding whitespace; content that is empty after trimming is
    /// rejected before the store is touched.
    ///
    /// # Errors
    /// Propagates storage faults; these are fatal to the invocation.
    pub async fn throw(
        &self,
        content: &str,
        sender_id: i64,
        sender_group_id: i64,
    ) -> StoreResult<ThrowOutcome> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(ThrowOutcome::EmptyContent);
        }

        let id = self.store.create(content, sender_id, sender_group_id).await?;
        debug!(bottle_id = id, sender_id, sender_group_id, "bottle created");

        Ok(ThrowOutcome::Thrown {
            id,
            content: content.to_string(),
        })
    }

    /// Picks a random bottle from the pool.
    ///
    /// Fetches a uniformly random Adrift bottle, then attempts the atomic
    /// claim. An empty pool and a lost claim race both yield
    /// [`PickOutcome::Empty`]. Display names are resolved best-effort after a
    /// successful claim; failures degrade to [`UNKNOWN_NAME`].
    ///
    /// # Errors
    /// Propagates storage faults; resolver faults never fail the pick.
    pub async fn pick(&self, picker_id: i64, picker_group_id: i64) -> StoreResult<PickOutcome> {
        let Some(bottle) = self.store.fetch_random_adrift().await? else {
            return Ok(PickOutcome::Empty);
        };

        if !self
            .store
            .claim_if_adrift(bottle.id, picker_id, picker_group_id)
            .await?
        {
            // Another picker got there first; report an empty sea.
            debug!(bottle_id = bottle.id, picker_id, "claim race lost");
            return Ok(PickOutcome::Empty);
        }

        debug!(bottle_id = bottle.id, picker_id, picker_group_id, "bottle claimed");

        let sender_name = match self.resolver.resolve_user_name(bottle.sender_id).await {
            Ok(name) => name,
            Err(e) => {
                warn!(user_id = bottle.sender_id, error = %e, "sender name resolution failed");
                UNKNOWN_NAME.to_string()
            }
        };
        let sender_group_name = match self.resolver.resolve_group_name(bottle.sender_group_id).await
        {
            Ok(name) => name,
            Err(e) => {
                warn!(group_id = bottle.sender_group_id, error = %e, "group name resolution failed");
                UNKNOWN_NAME.to_string()
            }
        };

        Ok(PickOutcome::Picked {
            bottle,
            sender_name,
            sender_group_name,
        })
    }
}
