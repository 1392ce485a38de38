//! Win32 platform implementation

pub mod class;
pub mod handle;
mod wndproc;

use std::rc::Rc;

use windows::Win32::Foundation::RECT;
use windows::Win32::UI::Input::KeyboardAndMouse::{MapVirtualKeyW, MAPVK_VSC_TO_VK_EX};
use windows::Win32::UI::WindowsAndMessaging::*;

pub use class::WindowClass;
pub use handle::WindowHandle;

use crate::dispatch::MessageRouter;
use crate::error::WindowError;
use crate::keys::ScanCodeMapper;
use crate::port::{PumpStatus, WindowPort};

/// Class name used when none is configured
pub const DEFAULT_CLASS_NAME: &str = "IOWindowClass";

/// Null-terminated UTF-16 copy of `s`
pub(crate) fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Scan code translation through the active keyboard layout
#[derive(Clone, Copy, Debug, Default)]
pub struct Win32ScanCodes;

impl ScanCodeMapper for Win32ScanCodes {
    fn scan_to_virtual_key(&self, scan_code: u32) -> u32 {
        unsafe { MapVirtualKeyW(scan_code, MAPVK_VSC_TO_VK_EX) }
    }
}

/// [`WindowPort`] backed by the Win32 API
pub struct Win32Port {
    // Declared first so the window is destroyed before its class
    handle: WindowHandle,
    class: WindowClass,
}

impl Win32Port {
    pub fn new(class_name: &str) -> Self {
        Self {
            handle: WindowHandle::default(),
            class: WindowClass::new(class_name),
        }
    }
}

impl Win32Port {
    /// Handle of the live window, if any
    pub fn hwnd(&self) -> Option<windows::Win32::Foundation::HWND> {
        self.handle.hwnd()
    }
}

impl Default for Win32Port {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_NAME)
    }
}

impl WindowPort for Win32Port {
    fn register_class(&mut self) -> Result<(), WindowError> {
        self.class.register()
    }

    fn unregister_class(&mut self) {
        self.class.destroy();
    }

    fn create_window(
        &mut self,
        title: &str,
        width: u32,
        height: u32,
        router: Rc<MessageRouter>,
    ) -> Result<(), WindowError> {
        self.handle.create(&self.class, title, width, height, router)
    }

    fn destroy_window(&mut self) {
        self.handle.destroy();
    }

    fn show_window(&mut self) {
        if let Some(hwnd) = self.handle.hwnd() {
            unsafe {
                let _ = ShowWindow(hwnd, SW_SHOWDEFAULT);
            }
        }
    }

    fn pump_messages(&mut self) -> PumpStatus {
        unsafe {
            let mut msg = MSG::default();
            while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                if msg.message == WM_QUIT {
                    return PumpStatus::Quit;
                }
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
        PumpStatus::Drained
    }

    fn client_size(&self) -> Option<(u32, u32)> {
        let hwnd = self.handle.hwnd()?;
        let mut rect = RECT::default();
        unsafe { GetClientRect(hwnd, &mut rect) }.ok()?;
        Some((
            (rect.right - rect.left).max(0) as u32,
            (rect.bottom - rect.top).max(0) as u32,
        ))
    }

    fn window_position(&self) -> Option<(i32, i32)> {
        let hwnd = self.handle.hwnd()?;
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd, &mut rect) }.ok()?;
        Some((rect.left, rect.top))
    }

    fn window_title(&self) -> Option<String> {
        let hwnd = self.handle.hwnd()?;
        unsafe {
            let len = GetWindowTextLengthW(hwnd).max(0) as usize;
            let mut buffer = vec![0u16; len + 1];
            let copied = GetWindowTextW(hwnd, &mut buffer).max(0) as usize;
            Some(String::from_utf16_lossy(&buffer[..copied]))
        }
    }

    fn scan_code_mapper(&self) -> Box<dyn ScanCodeMapper> {
        Box::new(Win32ScanCodes)
    }
}
