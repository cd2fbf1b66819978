//! btc-gold-tracker: Bitcoin market cap as a share of gold's
//!
//! This library provides the core components for:
//! - Asset price feed with a fallback sample when the quote API is down
//! - Market cap ratio and multiple-to-parity arithmetic
//! - Bounded rolling history for the trend chart
//! - Hypothetical price simulation
//! - A single-owner tracker controller with periodic and manual refresh
//! - Locale-aware text presentation
//! - Logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod display;
pub mod feed;
pub mod ratio;
pub mod simulation;
pub mod telemetry;
pub mod tracker;
