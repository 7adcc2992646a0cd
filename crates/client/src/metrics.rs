use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static CACHE_HITS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "company_client_cache_hits_total",
        "Reads served from the client cache"
    )
    .expect("register cache_hits_total")
});

pub static CACHE_MISSES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "company_client_cache_misses_total",
        "Reads that fell through to the backend"
    )
    .expect("register cache_misses_total")
});

pub static CACHE_INVALIDATIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "company_client_cache_invalidations_total",
        "Cache entries evicted after a successful write"
    )
    .expect("register cache_invalidations_total")
});

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}
