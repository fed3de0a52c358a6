//! Marquee - Movie metadata aggregator
//!
//! This library crate exposes the core functionality for integration testing.

pub mod advisory;
pub mod cache;
pub mod config;
pub mod enrichment;
pub mod list;
pub mod report;
pub mod sources;
