//! Cross-origin allow-list.
//!
//! Browsers only receive CORS headers for origins on the configured list.
//! Requests without an `Origin` header (curl, mobile clients) pass through untouched.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use url::Url;

/// One entry of the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginRule {
    /// Matches a single origin, e.g. `http://localhost:5173`.
    Exact(String),

    /// Matches every subdomain of a host, e.g. `https://*.vercel.app`.
    Subdomain { scheme: String, suffix: String },
}

impl OriginRule {
    /// Parse an allow-list entry. Returns `None` if the entry is not a valid origin.
    pub fn parse(raw: &str) -> Option<Self> {
        let (scheme, rest) = raw.split_once("://")?;

        if let Some(domain) = rest.strip_prefix("*.") {
            // Validate the remainder by substituting a concrete label for the wildcard
            let probe = Url::parse(&format!("{scheme}://wildcard.{domain}")).ok()?;
            if probe.path() != "/" || probe.port().is_some() {
                return None;
            }
            return Some(Self::Subdomain {
                scheme: scheme.to_ascii_lowercase(),
                suffix: format!(".{}", domain.to_ascii_lowercase()),
            });
        }

        let url = Url::parse(raw).ok()?;
        if url.host_str().is_none() || url.path() != "/" {
            return None;
        }
        Some(Self::Exact(url.origin().ascii_serialization()))
    }

    pub fn matches(&self, origin: &str) -> bool {
        match self {
            Self::Exact(allowed) => allowed == origin,
            Self::Subdomain { scheme, suffix } => {
                let Ok(url) = Url::parse(origin) else {
                    return false;
                };
                url.scheme() == scheme
                    && url.path() == "/"
                    && url.host_str().is_some_and(|host| host.ends_with(suffix.as_str()))
            }
        }
    }
}

/// Build the CORS layer for the given allow-list.
pub fn cors_layer(rules: Vec<OriginRule>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            let allowed = origin
                .to_str()
                .is_ok_and(|origin| rules.iter().any(|rule| rule.matches(origin)));
            if !allowed {
                tracing::debug!(?origin, "origin rejected by CORS allow-list");
            }
            allowed
        }))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
