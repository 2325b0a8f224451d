//! GridFeed Core — request model and normalization pipeline for grid time series.
//!
//! Balancing authorities publish load, interchange, and price data in
//! incompatible shapes: different timestamp conventions (interval-start vs
//! interval-end), different batching (one file per calendar day per feed),
//! different reduction needs (zone sums, interface pivots). This crate holds
//! the shared, network-free half of the acquisition contract:
//! - Request options and their resolution rules ([`options`])
//! - The per-day fetch fan-out ([`dates`])
//! - Temporal normalization to UTC interval-start instants ([`series::normalize`])
//! - The two reduction shapes plus the price dedup ([`series::aggregate`])
//! - Window/latest/forecast slicing ([`series::slice`])
//! - Canonical record serialization ([`series::serialize`])
//!
//! Per-authority adapters and the HTTP transport live in `gridfeed-clients`.

pub mod dates;
pub mod domain;
pub mod error;
pub mod options;
pub mod series;

pub use domain::{DataKind, Frequency, KeyedSample, Market, Payload, Point, Record};
pub use error::GridError;
pub use options::{Capabilities, Request, ResolvedOptions, TemporalMode};
