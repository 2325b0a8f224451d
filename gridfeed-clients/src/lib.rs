//! GridFeed Clients — per-balancing-authority adapters over the core pipeline.
//!
//! Each adapter declares its constants (timezone, interval alignment,
//! interface allow-list, supported market/frequency combinations) and wires
//! the shared fetch loop: resolve options → iterate dates → fetch one CSV per
//! date → parse typed rows → normalize → aggregate → slice → serialize.
//!
//! The HTTP transport sits behind [`transport::FeedTransport`] so tests can
//! substitute fixture payloads. The [`registry`] maps BA codes to adapters.

pub mod client;
pub mod config;
pub mod nyiso;
pub mod registry;
pub mod transport;

pub use client::GridClient;
pub use config::ClientConfig;
pub use nyiso::NyisoClient;
pub use transport::{FeedTransport, HttpTransport};
