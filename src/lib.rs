//! Atelier: multi-tenant workspace collaboration core.
//!
//! This crate provides the task activity, mention, and relevance engine of a
//! workspace collaboration platform: mutating tasks under permission rules
//! while maintaining an immutable audit trail, resolving user mentions in
//! free text, maintaining the watcher subscription graph, and computing
//! personalized ranked feeds.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external collaborators
//! - **Adapters**: Concrete implementations of ports
//!
//! Persistence, membership resolution, and notification delivery are
//! consumed collaborator contracts, not reimplemented here; a surrounding
//! request layer supplies the wire surface.
//!
//! # Modules
//!
//! - [`workboard`]: Task mutation, mention fan-out, and feed ranking

pub mod workboard;
