//! The [`BottleStore`] seam.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::model::Bottle;

/// Durable, queryable persistence for [`Bottle`] records.
///
/// Implementations must make [`claim_if_adrift`](BottleStore::claim_if_adrift)
/// a single atomic conditional update: the fetch-then-claim flow in the
/// lifecycle service is inherently racy between two concurrent pickers, and
/// correctness rests entirely on the claim being compare-and-swap shaped.
///
/// The service consumes this as `Arc<dyn BottleStore>`, so tests can slot in
/// an in-memory fake.
#[async_trait]
pub trait BottleStore: Send + Sync {
    /// Persists a new bottle with status Adrift and returns its assigned id.
    ///
    /// Content emptiness is enforced by the caller, not the store. Ids are
    /// monotonically assigned and never reused.
    ///
    /// # Errors
    /// Fails only on underlying storage I/O.
    async fn create(
        &self,
        content: &str,
        sender_id: i64,
        sender_group_id: i64,
    ) -> StoreResult<i64>;

    /// Returns one bottle chosen uniformly among the Adrift set, or `None`
    /// when the set is empty. Pure read; never mutates state.
    async fn fetch_random_adrift(&self) -> StoreResult<Option<Bottle>>;

    /// Atomically claims the bottle `id` for the given picker.
    ///
    /// Returns `true` iff this call performed the `Adrift → Picked`
    /// transition (setting the picker fields and `picked_at` in the same
    /// step). A missing or already-picked row returns `false` with no
    /// change. At most one call returns `true` per bottle, across any number
    /// of concurrent callers.
    async fn claim_if_adrift(
        &self,
        id: i64,
        picker_id: i64,
        picker_group_id: i64,
    ) -> StoreResult<bool>;
}
