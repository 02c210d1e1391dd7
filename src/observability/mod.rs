//! Observability subsystem.
//!
//! Structured logging via `tracing`; per-request logs come from
//! tower-http's trace layer on the router.

pub mod logging;
