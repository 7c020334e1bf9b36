//! # Application Layer
//!
//! Contains the core dispatch logic of the bot.
//! This includes trigger parsing, command routing, the session holder and the outbound queues.

pub mod dispatcher;
pub mod filter;
pub mod handler;
pub mod logging;
pub mod outbound;
pub mod router;
pub mod session;
pub mod trigger;
pub mod utils;
