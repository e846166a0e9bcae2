//! # driftbottle-gateway
//!
//! HTTP client for a OneBot v11 gateway (napcat-style): typed API envelope,
//! the three calls the bot needs (`get_stranger_info`, `get_group_info`,
//! `send_group_msg`), and the [`NameResolver`] implementation the lifecycle
//! service consumes.
//!
//! Every call is a JSON POST to `http://{address}:{port}/{action}` with a
//! 10-second timeout. Failures are typed [`GatewayError`] values; nothing in
//! this crate panics on a bad gateway.
//!
//! [`NameResolver`]: driftbottle_core::NameResolver

mod client;
mod model;

pub use client::OneBotHttpClient;
pub use model::{ApiResponse, GroupInfo, StrangerInfo};
