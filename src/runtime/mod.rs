//! Runtime orchestration and lifecycle management.
//!
//! - [`OrderSystem`]: spins up every actor, wires their dependencies, and
//!   shuts them down gracefully.
//! - [`SystemConfig`]: channel capacity, checkout timeout, gateway secret.
//! - [`setup_tracing`]: initializes the logging infrastructure.

pub mod config;
pub mod order_system;
pub mod tracing;

pub use config::*;
pub use order_system::*;
pub use tracing::*;
