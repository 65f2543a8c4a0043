//! Sitewatch: HTTP reachability monitoring for registered sites.
//!
//! Sites are registered through a small JSON API and persisted in
//! `PostgreSQL`. A reconciliation pass re-probes every site whose last check
//! is older than the staleness threshold, with bounded concurrency, and
//! commits all observed statuses in one batch. A failed probe is stored as the
//! sentinel status `-1`.
//!
//! - [`site`]: domain, ports, adapters, and services
//! - [`web`]: the `axum` HTTP surface
//! - [`config`]: command-line and environment settings
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod site;
pub mod telemetry;
pub mod web;
