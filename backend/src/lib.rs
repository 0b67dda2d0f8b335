//! Exercise tracker library modules.
//!
//! Hexagonal layout: [`domain`] holds entities, use-cases and ports;
//! [`inbound`] adapts HTTP onto the use-cases; [`outbound`] implements the
//! record store over PostgreSQL or process memory.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::trace::{Trace, TraceId};
