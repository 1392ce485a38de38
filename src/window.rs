//! Window controller
//!
//! Owns the OS window through a [`WindowPort`], pumps its messages and
//! forwards keyboard messages to an attached [`KeyboardInput`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Config;
use crate::dispatch::MessageRouter;
use crate::error::WindowError;
use crate::keyboard::KeyboardInput;
use crate::port::{PumpStatus, WindowPort};

const NO_ERRORS: &str = "no errors";

/// A single OS window driven by polling
pub struct Window<P: WindowPort> {
    port: P,
    router: Rc<MessageRouter>,
    should_be_closed: bool,
    last_error: String,
}

#[cfg(windows)]
pub type Win32Window = Window<crate::platform::win32::Win32Port>;

#[cfg(windows)]
impl Window<crate::platform::win32::Win32Port> {
    /// Window backed by the Win32 API, using the default class name
    pub fn new() -> Self {
        Self::with_port(crate::platform::win32::Win32Port::default())
    }

    /// Window backed by the Win32 API, registering its class under `[window] class_name`
    pub fn from_config(config: &Config) -> Self {
        Self::with_port(crate::platform::win32::Win32Port::new(
            &config.window.class_name,
        ))
    }
}

#[cfg(windows)]
impl Default for Window<crate::platform::win32::Win32Port> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: WindowPort> Window<P> {
    pub fn with_port(port: P) -> Self {
        let router = Rc::new(MessageRouter::new(port.scan_code_mapper()));
        Self {
            port,
            router,
            should_be_closed: false,
            last_error: NO_ERRORS.to_string(),
        }
    }

    /// Register the class, create the window and show it.
    ///
    /// A window made earlier is closed first. On failure the error is also
    /// kept as [`last_error`](Self::last_error). If only window creation
    /// fails, the class stays registered until `close_window` or drop.
    pub fn make_window(&mut self, title: &str, width: u32, height: u32) -> Result<(), WindowError> {
        self.close_window();

        if let Err(e) = self.port.register_class() {
            return Err(self.fail(e));
        }

        if let Err(e) = self
            .port
            .create_window(title, width, height, Rc::clone(&self.router))
        {
            return Err(self.fail(e));
        }

        self.port.show_window();
        log!("window '{}' created ({}x{})", title, width, height);
        Ok(())
    }

    /// [`make_window`](Self::make_window) using the `[window]` config section
    pub fn make_window_from_config(&mut self, config: &Config) -> Result<(), WindowError> {
        let settings = &config.window;
        self.make_window(&settings.title, settings.width, settings.height)
    }

    fn fail(&mut self, err: WindowError) -> WindowError {
        log!("make_window failed: {}", err);
        self.last_error = err.to_string();
        err
    }

    /// Destroy the window and unregister its class. Safe to call repeatedly.
    pub fn close_window(&mut self) {
        self.port.destroy_window();
        self.port.unregister_class();
        self.router.apply_pending_clear();
    }

    /// Drain all queued messages without blocking.
    ///
    /// A focus-loss reset that arrived while the keyboard was borrowed is
    /// applied here once the keyboard is free again.
    pub fn poll_window_messages(&mut self) {
        self.router.apply_pending_clear();
        let status = self.port.pump_messages();
        self.router.apply_pending_clear();

        if status == PumpStatus::Quit {
            if !self.should_be_closed {
                log!("quit received, window should close");
            }
            self.should_be_closed = true;
        }
    }

    /// Latched once a close request has been pumped; never resets
    pub fn should_be_closed(&self) -> bool {
        self.should_be_closed
    }

    /// Forward keyboard messages to `keyboard`.
    ///
    /// Only a weak reference is kept: once the caller drops the keyboard,
    /// key messages are ignored.
    pub fn set_keyboard_input<K: KeyboardInput + 'static>(&mut self, keyboard: &Rc<RefCell<K>>) {
        self.router.set_keyboard(keyboard);
    }

    pub fn clear_keyboard_input(&mut self) {
        self.router.clear_keyboard();
    }

    /// True iff (x, y) lies within [0, width] x [0, height] of the client area
    pub fn is_cursor_in_screen_bounds(&self, x: u32, y: u32) -> bool {
        let (width, height) = self.window_screen_resolution();
        x <= width && y <= height
    }

    /// Client area size; (0, 0) without a window
    pub fn window_screen_resolution(&self) -> (u32, u32) {
        self.port.client_size().unwrap_or((0, 0))
    }

    /// Window position in screen coordinates; (0, 0) without a window
    pub fn window_position(&self) -> (i32, i32) {
        self.port.window_position().unwrap_or((0, 0))
    }

    /// Current title; empty without a window
    pub fn window_title(&self) -> String {
        self.port.window_title().unwrap_or_default()
    }

    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// The OS port backing this window
    pub fn port(&self) -> &P {
        &self.port
    }
}

impl<P: WindowPort> Drop for Window<P> {
    fn drop(&mut self) {
        self.close_window();
    }
}
