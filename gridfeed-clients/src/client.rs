//! The per-balancing-authority capability contract.

use gridfeed_core::domain::{DataKind, Record};
use gridfeed_core::error::GridError;
use gridfeed_core::options::{Capabilities, Request};

/// One balancing authority's adapter bundle.
///
/// Implementations are pure adapters: declared constants (timezone, interval
/// alignment, interface allow-lists) plus parsing functions over fetched
/// payloads. No shared mutable state lives behind this trait.
///
/// A data kind the authority does not publish returns
/// [`GridError::Configuration`]; the request never reaches the network.
pub trait GridClient: Send + Sync {
    /// Balancing-authority code, e.g. `"NYISO"`.
    fn ba_name(&self) -> &'static str;

    /// Market/frequency combinations this authority serves for a data kind.
    fn capabilities(&self, kind: DataKind) -> Capabilities;

    /// System load in MW.
    fn get_load(&self, req: &Request) -> Result<Vec<Record>, GridError>;

    /// Net interchange across external ties in MW, export-positive.
    fn get_trade(&self, req: &Request) -> Result<Vec<Record>, GridError>;

    /// Locational marginal prices, one record per (instant, node).
    fn get_lmp(&self, req: &Request) -> Result<Vec<Record>, GridError>;
}
