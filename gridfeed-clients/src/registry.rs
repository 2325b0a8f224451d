//! Read-only registry of known balancing authorities.
//!
//! A flat, statically initialized table from BA code to adapter constructor,
//! built once and never mutated — no dynamic factory, no global state.

use crate::client::GridClient;
use crate::config::ClientConfig;
use crate::nyiso::NyisoClient;
use crate::transport::{FeedTransport, HttpTransport};
use std::sync::Arc;

type Constructor = fn(&ClientConfig, Arc<dyn FeedTransport>) -> Box<dyn GridClient>;

static REGISTRY: &[(&str, Constructor)] = &[("NYISO", |config, transport| {
    Box::new(NyisoClient::new(config, transport))
})];

/// Look up the adapter bundle for a balancing-authority code
/// (case-insensitive). `None` means the authority is unknown.
pub fn for_ba(
    ba: &str,
    config: &ClientConfig,
    transport: Arc<dyn FeedTransport>,
) -> Option<Box<dyn GridClient>> {
    REGISTRY
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(ba))
        .map(|(_, make)| make(config, transport))
}

/// Like [`for_ba`] with the default configuration and the production HTTP
/// transport.
pub fn for_ba_default(ba: &str) -> Option<Box<dyn GridClient>> {
    let config = ClientConfig::default();
    let transport: Arc<dyn FeedTransport> = Arc::new(HttpTransport::new(&config));
    for_ba(ba, &config, transport)
}

/// Every registered balancing-authority code.
pub fn known_bas() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let client = for_ba_default("nyiso").unwrap();
        assert_eq!(client.ba_name(), "NYISO");
    }

    #[test]
    fn unknown_ba_is_none() {
        assert!(for_ba_default("NOPE").is_none());
    }

    #[test]
    fn registry_enumerates_codes() {
        let codes: Vec<_> = known_bas().collect();
        assert_eq!(codes, vec!["NYISO"]);
    }
}
