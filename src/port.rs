//! OS window port
//!
//! The window controller talks to the OS only through [`WindowPort`]. The
//! Win32 implementation lives in `platform::win32`; tests drive the
//! controller with a scripted port.

use std::rc::Rc;

use crate::dispatch::MessageRouter;
use crate::error::WindowError;
use crate::keys::ScanCodeMapper;

/// Outcome of draining the message queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PumpStatus {
    /// The queue is empty
    Drained,
    /// The quit signal was dequeued; remaining messages were left queued
    Quit,
}

/// Window class registrar, window handle owner and message pump for one window
pub trait WindowPort {
    /// Register the window class. Calling it while registered is a no-op.
    fn register_class(&mut self) -> Result<(), WindowError>;

    /// Unregister the window class; no-op when not registered
    fn unregister_class(&mut self);

    /// Create the window handle with a client area of `width` x `height`.
    ///
    /// Messages delivered to the window are routed through `router`.
    fn create_window(
        &mut self,
        title: &str,
        width: u32,
        height: u32,
        router: Rc<MessageRouter>,
    ) -> Result<(), WindowError>;

    /// Destroy the window handle; no-op when there is none
    fn destroy_window(&mut self);

    fn show_window(&mut self);

    /// Dispatch every queued message without waiting for new ones
    fn pump_messages(&mut self) -> PumpStatus;

    /// Client area (width, height)
    fn client_size(&self) -> Option<(u32, u32)>;

    /// Top-left corner of the window in screen coordinates
    fn window_position(&self) -> Option<(i32, i32)>;

    fn window_title(&self) -> Option<String>;

    /// Scan code table used to tell left shift from right shift
    fn scan_code_mapper(&self) -> Box<dyn ScanCodeMapper>;
}
