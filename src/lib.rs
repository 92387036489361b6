//! depot - a small HTTP/1.1 file and echo server.
//!
//! Serves and stores files inside a single host directory, echoes path
//! segments (optionally gzip-compressed), and reflects the User-Agent
//! header, over persistent TCP connections.

pub mod concurrency;
pub mod config;
pub mod hostdir;
pub mod http;
pub mod routes;
