//! IOWindow - a minimal Win32 window with keyboard input routing
//!
//! A [`Window`] registers a window class, creates and shows one window and
//! is polled once per frame. Key messages are remapped to side-specific
//! codes and forwarded to a caller-owned [`KeyboardInput`].
//!
//! Everything except `platform::win32` builds on any host, so the dispatch
//! and keyboard logic can be tested without Windows.

// Include the log module first so the log! macro works everywhere
#[macro_use]
pub mod log;

pub mod config;
pub mod dispatch;
pub mod error;
pub mod keyboard;
pub mod keys;
pub mod platform;
pub mod port;
pub mod window;

pub use config::Config;
pub use error::{ConfigError, WindowError};
pub use keyboard::{KeyEvent, KeyEventKind, Keyboard, KeyboardInput};
pub use keys::KeyCode;
pub use port::{PumpStatus, WindowPort};
pub use window::Window;

#[cfg(windows)]
pub use window::Win32Window;
