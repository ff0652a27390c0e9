//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Replenish rate per client, in requests per second.
const PER_SECOND: u64 = 10;

/// Bucket size per client.
const BURST_SIZE: u32 = 100;

/// Creates a per-client rate limiter.
///
/// # Limits
///
/// - **Rate**: 10 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// The client key comes from `key_extractor`; see [`peer_ip`] and
/// [`forwarded_ip`].
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/books", get(list_books_handler))
///     .layer(rate_limit::layer(rate_limit::peer_ip()));
/// ```
pub fn layer<K: KeyExtractor>(
    key_extractor: K,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit constants are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Keys clients by the socket peer address.
pub fn peer_ip() -> PeerIpKeyExtractor {
    PeerIpKeyExtractor
}

/// Keys clients by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`, falling
/// back to the peer address. Only for deployments behind a trusted proxy.
pub fn forwarded_ip() -> SmartIpKeyExtractor {
    SmartIpKeyExtractor
}
