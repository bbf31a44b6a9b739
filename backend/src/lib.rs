//! Watchlist backend library modules.
//!
//! A single-tenant movie watchlist: one administrator curates entries
//! through a cookie-session-authenticated HTML surface. The domain layer is
//! transport agnostic; inbound adapters map it onto actix-web handlers and
//! the outbound adapter persists to SQLite.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;
