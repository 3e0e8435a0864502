//! HTTP infrastructure - outbound client for upstream services

mod client;

pub use client::{HttpUpstreamClient, DEFAULT_UPSTREAM_TIMEOUT};
