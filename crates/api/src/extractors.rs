use axum::extract::{ConnectInfo, FromRequestParts};
use chronos_core::services::audit_service::RequestMeta;
use chronos_core::AppState;
use http::header::USER_AGENT;
use http::request::Parts;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Caller IP and user agent, recorded alongside audited changes.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta(pub RequestMeta);

impl FromRequestParts<Arc<AppState>> for ClientMeta {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(ClientMeta(client_meta(parts, state.config.trust_proxy)))
    }
}

/// The socket peer is authoritative. `X-Forwarded-For` can be set by any
/// client, so its first hop is used only when `trust_forwarded` is on.
pub fn client_meta(parts: &Parts, trust_forwarded: bool) -> RequestMeta {
    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let forwarded = trust_forwarded
        .then(|| {
            parts
                .headers
                .get("x-forwarded-for")
                .and_then(|h| h.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(|ip| ip.trim().to_string())
                .filter(|ip| !ip.is_empty())
        })
        .flatten();

    let user_agent = parts
        .headers
        .get(USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    RequestMeta {
        ip_address: forwarded.or(peer),
        user_agent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;

    fn parts_from(peer: Option<&str>, forwarded: Option<&str>) -> Parts {
        let mut builder = Request::builder().header(USER_AGENT, "curl/8.0");
        if let Some(value) = forwarded {
            builder = builder.header("x-forwarded-for", value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        if let Some(addr) = peer {
            parts
                .extensions
                .insert(ConnectInfo(addr.parse::<SocketAddr>().unwrap()));
        }
        parts
    }

    #[test]
    fn forwarded_header_ignored_without_trusted_proxy() {
        let parts = parts_from(Some("192.0.2.10:5000"), Some("203.0.113.7"));
        let meta = client_meta(&parts, false);
        assert_eq!(meta.ip_address.as_deref(), Some("192.0.2.10"));
        assert_eq!(meta.user_agent.as_deref(), Some("curl/8.0"));
    }

    #[test]
    fn trusted_proxy_uses_first_forwarded_hop() {
        let parts = parts_from(Some("10.0.0.1:5000"), Some("203.0.113.7, 10.0.0.1"));
        let meta = client_meta(&parts, true);
        assert_eq!(meta.ip_address.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn trusted_proxy_without_header_falls_back_to_peer() {
        let parts = parts_from(Some("192.0.2.10:5000"), None);
        assert_eq!(
            client_meta(&parts, true).ip_address.as_deref(),
            Some("192.0.2.10")
        );
    }

    #[test]
    fn spoofed_header_alone_records_nothing() {
        let parts = parts_from(None, Some("203.0.113.7"));
        assert!(client_meta(&parts, false).ip_address.is_none());
    }
}
