// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Candidate endpoint derivation and round-robin selection.

use crate::ClientError;

/// Fixed local fallbacks, tried after the origin-derived candidate.
const FALLBACK_URLS: [&str; 2] = ["ws://localhost:8000/ws", "ws://127.0.0.1:8000/ws"];

/// Connection settings for a [`crate::SyncClient`].
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Explicit endpoint override. When set it is the sole candidate and
    /// automatic derivation is skipped entirely.
    pub override_url: Option<String>,
    /// Origin host (`host[:port]`, optionally with a scheme prefix) used to
    /// derive a same-origin candidate. A `https`/`wss` prefix selects `wss`.
    pub origin: Option<String>,
    /// Force `wss` for the origin-derived candidate even when the origin
    /// carries no scheme prefix. The loopback fallbacks stay plain `ws`.
    pub tls: bool,
}

impl ClientConfig {
    /// Resolve the ordered candidate list. Never empty: without an override
    /// the loopback fallbacks are always appended.
    pub fn candidates(&self) -> Vec<String> {
        if let Some(url) = &self.override_url {
            return vec![url.clone()];
        }
        let mut urls = Vec::with_capacity(3);
        if let Some(origin) = &self.origin {
            urls.push(origin_candidate(origin, self.tls));
        }
        urls.extend(FALLBACK_URLS.iter().map(|&u| u.to_owned()));
        urls
    }
}

fn origin_candidate(origin: &str, tls: bool) -> String {
    let (prefixed_secure, host) = match origin.split_once("://") {
        Some(("https" | "wss", rest)) => (true, rest),
        Some((_, rest)) => (false, rest),
        None => (false, origin),
    };
    let host = host.trim_end_matches('/');
    let scheme = if tls || prefixed_secure { "wss" } else { "ws" };
    format!("{scheme}://{host}/ws")
}

/// Ordered, non-empty list of connection targets, cycled round-robin on
/// every (re)connect attempt. The list is fixed at construction.
#[derive(Debug)]
pub struct EndpointRing {
    urls: Vec<String>,
    next: usize,
}

impl EndpointRing {
    /// Build a ring over the given candidates.
    pub fn new(urls: Vec<String>) -> Result<Self, ClientError> {
        if urls.is_empty() {
            return Err(ClientError::NoCandidates);
        }
        Ok(Self { urls, next: 0 })
    }

    /// The candidate for the next attempt; advances the ring, wrapping
    /// modulo its length.
    pub fn next_url(&mut self) -> &str {
        let idx = self.next;
        self.next = (self.next + 1) % self.urls.len();
        &self.urls[idx]
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Always false: the ring rejects empty candidate lists.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_is_the_sole_candidate() {
        let config = ClientConfig {
            override_url: Some("ws://10.0.0.5:9000/ws".to_owned()),
            origin: Some("example.com".to_owned()),
            tls: false,
        };
        assert_eq!(config.candidates(), vec!["ws://10.0.0.5:9000/ws"]);
    }

    #[test]
    fn origin_candidate_precedes_loopback_fallbacks() {
        let config = ClientConfig {
            override_url: None,
            origin: Some("stage.example.com:8000".to_owned()),
            tls: false,
        };
        assert_eq!(
            config.candidates(),
            vec![
                "ws://stage.example.com:8000/ws",
                "ws://localhost:8000/ws",
                "ws://127.0.0.1:8000/ws",
            ]
        );
    }

    #[test]
    fn secure_origin_derives_wss() {
        let config = ClientConfig {
            override_url: None,
            origin: Some("https://stage.example.com".to_owned()),
            tls: false,
        };
        assert_eq!(config.candidates()[0], "wss://stage.example.com/ws");
    }

    #[test]
    fn tls_flag_upgrades_a_bare_origin() {
        let config = ClientConfig {
            override_url: None,
            origin: Some("stage.example.com:8443".to_owned()),
            tls: true,
        };
        assert_eq!(
            config.candidates(),
            vec![
                "wss://stage.example.com:8443/ws",
                "ws://localhost:8000/ws",
                "ws://127.0.0.1:8000/ws",
            ]
        );
    }

    #[test]
    fn tls_flag_forces_wss_over_a_plain_prefix() {
        let config = ClientConfig {
            override_url: None,
            origin: Some("http://stage.example.com".to_owned()),
            tls: true,
        };
        assert_eq!(config.candidates()[0], "wss://stage.example.com/ws");
    }

    #[test]
    fn no_origin_leaves_only_fallbacks() {
        let config = ClientConfig::default();
        assert_eq!(
            config.candidates(),
            vec!["ws://localhost:8000/ws", "ws://127.0.0.1:8000/ws"]
        );
    }

    #[test]
    fn ring_cycles_round_robin_and_wraps() {
        let mut ring = EndpointRing::new(vec![
            "a".to_owned(),
            "b".to_owned(),
            "c".to_owned(),
        ])
        .unwrap();
        let seen: Vec<String> = (0..7).map(|_| ring.next_url().to_owned()).collect();
        assert_eq!(seen, ["a", "b", "c", "a", "b", "c", "a"]);
    }

    #[test]
    fn empty_candidate_list_is_rejected() {
        assert!(matches!(
            EndpointRing::new(Vec::new()),
            Err(ClientError::NoCandidates)
        ));
    }
}
