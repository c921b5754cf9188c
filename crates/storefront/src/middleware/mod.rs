//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (correlation id on the span, Sentry scope and response)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
