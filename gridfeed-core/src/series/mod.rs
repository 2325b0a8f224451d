//! Series pipeline: normalize → aggregate → slice → serialize.

pub mod aggregate;
pub mod normalize;
pub mod serialize;
pub mod slice;
