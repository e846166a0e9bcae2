//! # driftbottle-core
//!
//! Domain layer of the drift bottle bot: the [`Bottle`] model, the
//! [`BottleStore`] and [`NameResolver`] seams, and the [`BottleService`]
//! lifecycle orchestrator.
//!
//! ## Lifecycle
//!
//! ```text
//! throw(content) ──▶ BottleStore::create ──▶ Bottle { status: Adrift }
//!                                                  │
//! pick() ──▶ fetch_random_adrift ──▶ claim_if_adrift (atomic CAS on status)
//!                                                  │
//!                                                  ▼
//!                                    Bottle { status: Picked } (terminal)
//! ```
//!
//! A bottle transitions `Adrift → Picked` at most once and is never deleted;
//! picked bottles remain as history. Selection over the Adrift set is uniform
//! at query time, with no ordering guarantee.
//!
//! The store and resolver are trait objects so the service can be exercised
//! against fakes without a database or a gateway.

mod error;
mod model;
mod resolver;
mod service;
mod store;

pub use error::{GatewayError, GatewayResult, StoreError, StoreResult};
pub use model::{Bottle, BottleStatus};
pub use resolver::NameResolver;
pub use service::{BottleService, PickOutcome, ThrowOutcome, UNKNOWN_NAME};
pub use store::BottleStore;
