//! Load balancer admin API.
//!
//! # Data Flow
//! ```text
//! discovery loop                      prober
//!     → list_upstreams()                 → set_target_weight()
//!     → list_targets(upstream_id)            │
//!            │                               │
//!            └──────────► AdminApi ◄─────────┘
//!                            │
//!                     client.rs (Kong REST over reqwest)
//! ```
//!
//! # Design Decisions
//! - The pipeline only sees the `AdminApi` trait, so tests swap in fakes
//! - Weight is a binary health flag: `UNHEALTHY_WEIGHT` or `HEALTHY_WEIGHT`
//! - Every failure is a `FetchError`; callers decide whether it is soft

pub mod api;
pub mod client;
pub mod types;

pub use api::AdminApi;
pub use client::KongClient;
pub use types::{FetchError, FetchResult, Target, Upstream, HEALTHY_WEIGHT, UNHEALTHY_WEIGHT};
