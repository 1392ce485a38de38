//! Platform layer
//!
//! Only Windows (win32) is supported.

#[cfg(windows)]
pub mod win32;
