//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     logging → config (fatal on invalid) → metrics → monitor
//!     → consumer task → health server
//!
//! Shutdown:
//!     SIGTERM / Ctrl-C → broadcast → pump breaks, server drains, exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_on_signal;
