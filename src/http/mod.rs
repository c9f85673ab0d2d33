//! HTTP listener plumbing shared by all servers.
//!
//! - Binds the listener up front so bind failures surface as startup errors
//! - Graceful shutdown on SIGTERM/SIGINT with connection draining

mod server;
mod shutdown;

pub use server::{serve_with_handle, start_server, ServerError};
pub use shutdown::shutdown_signal;
