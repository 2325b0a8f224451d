//! Domain types: canonical output records and intermediate series shapes.

pub mod point;
pub mod record;

pub use point::{KeyedSample, Point};
pub use record::{DataKind, Frequency, Market, Payload, Record};
