//! Unit tests for the workboard module.
//!
//! Tests are organised by layer: domain behaviour, mention extraction, the
//! mutation service, mention dispatch, and feed ranking.

mod support;
