//! Health check handlers.

/// GET /health - liveness probe for monitoring and load balancers.
pub async fn health() -> &'static str {
    "OK"
}

/// GET /heartbeat - legacy alias of /health kept for existing clients.
pub async fn heartbeat() -> &'static str {
    "OK"
}
