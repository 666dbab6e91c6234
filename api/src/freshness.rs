use axum::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use axum::http::{HeaderMap, HeaderValue};

const NO_STORE: &str = "no-store, no-cache, must-revalidate, proxy-revalidate";

/// How long downstream caches may hold a dashboard response.
///
/// `NoStore` also cache-busts the outbound call so no intermediary between
/// the gateway and the sheet can answer with a stale copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FreshnessPolicy {
    #[default]
    NoStore,
    SharedTtl { seconds: u32 },
}

impl FreshnessPolicy {
    /// `None` or zero keeps the no-store policy.
    pub fn from_ttl(seconds: Option<u32>) -> Self {
        match seconds {
            Some(seconds) if seconds > 0 => FreshnessPolicy::SharedTtl { seconds },
            _ => FreshnessPolicy::NoStore,
        }
    }

    pub fn busts_cache(&self) -> bool {
        matches!(self, FreshnessPolicy::NoStore)
    }

    pub fn cache_control(&self) -> String {
        match self {
            FreshnessPolicy::NoStore => NO_STORE.to_string(),
            FreshnessPolicy::SharedTtl { seconds } => format!(
                "public, s-maxage={seconds}, stale-while-revalidate={}",
                seconds.saturating_mul(2)
            ),
        }
    }

    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.cache_control()) {
            headers.insert(CACHE_CONTROL, value);
        }
        if self.busts_cache() {
            headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
            headers.insert(EXPIRES, HeaderValue::from_static("0"));
        }
        headers
    }
}

/// Append a per-request nonce so intermediaries treat every call as new.
pub fn cache_busted(base: &str, nonce: i64) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}t={nonce}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_selects_policy() {
        assert_eq!(FreshnessPolicy::from_ttl(None), FreshnessPolicy::NoStore);
        assert_eq!(FreshnessPolicy::from_ttl(Some(0)), FreshnessPolicy::NoStore);
        assert_eq!(
            FreshnessPolicy::from_ttl(Some(30)),
            FreshnessPolicy::SharedTtl { seconds: 30 }
        );
    }

    #[test]
    fn no_store_headers() {
        let headers = FreshnessPolicy::NoStore.headers();
        assert_eq!(headers[CACHE_CONTROL], NO_STORE);
        assert_eq!(headers[PRAGMA], "no-cache");
        assert_eq!(headers[EXPIRES], "0");
    }

    #[test]
    fn shared_ttl_headers() {
        let headers = FreshnessPolicy::SharedTtl { seconds: 30 }.headers();
        assert_eq!(
            headers[CACHE_CONTROL],
            "public, s-maxage=30, stale-while-revalidate=60"
        );
        assert!(headers.get(PRAGMA).is_none());
    }

    #[test]
    fn nonce_respects_existing_query() {
        assert_eq!(cache_busted("https://x.test/exec", 7), "https://x.test/exec?t=7");
        assert_eq!(
            cache_busted("https://x.test/exec?sheet=1", 7),
            "https://x.test/exec?sheet=1&t=7"
        );
    }
}
