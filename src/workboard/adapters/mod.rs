//! Adapter implementations of the workboard ports.

pub mod memory;
