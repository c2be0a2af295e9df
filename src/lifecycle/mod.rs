//! Runtime orchestration and lifecycle management.
//!
//! - [`HbnbSystem`] starts the six table actors (preloaded from the snapshot file when
//!   file storage is configured) and shuts them down again.
//! - [`setup_tracing`] initializes logging.

pub mod hbnb_system;
pub mod tracing;

pub use self::hbnb_system::*;
pub use self::tracing::*;
