//! Task activity, mention, and relevance engine.
//!
//! This module implements permission-gated task mutation with an append-only
//! audit trail, mention resolution from free text, watcher subscription
//! maintenance, notification fan-out, and the personalized ranked "my tasks"
//! feed. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
