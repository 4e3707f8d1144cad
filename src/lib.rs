//! Local servers for the browser-based walkie-talkie client.
//!
//! Two binaries share this library: `http-server` (port 3000) for quick
//! localhost use, and `https-server` (port 3443) which provisions a
//! self-signed certificate so browsers on other LAN devices will grant
//! microphone access.

pub mod config;
pub mod net;
pub mod routes;
pub mod server;
pub mod tls;
