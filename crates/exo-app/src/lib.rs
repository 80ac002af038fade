//! Exoscape application shell: window, frame clock, controls, and the
//! session that ties the catalog, habitability scoring and renderers together.

pub mod controls;
pub mod frame_clock;
pub mod platform;
pub mod scene;
pub mod session;
pub mod window;

pub use frame_clock::{FIXED_DT, FrameClock, MAX_FRAME_TIME};
pub use platform::{PlatformDirs, PlatformError};
pub use session::PlanetSession;
pub use window::{AppState, run_with_config, window_attributes_from_config};
