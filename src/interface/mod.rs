//! # Interface Layer
//!
//! User-facing command handlers and the routing table that wires them to command words.

pub mod commands;
