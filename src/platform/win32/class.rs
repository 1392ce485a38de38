//! Win32 window class registration

use windows::core::{Error, PCWSTR};
use windows::Win32::Foundation::HINSTANCE;
use windows::Win32::Graphics::Gdi::HBRUSH;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::*;

use super::to_wide;
use super::wndproc::wnd_proc;
use crate::error::WindowError;

/// Owns one registered window class; unregisters it on drop
pub struct WindowClass {
    name: Vec<u16>,
    display_name: String,
    instance: HINSTANCE,
    registered: bool,
}

impl WindowClass {
    pub fn new(name: &str) -> Self {
        Self {
            name: to_wide(name),
            display_name: name.to_string(),
            instance: HINSTANCE::default(),
            registered: false,
        }
    }

    /// Register the class (no-op when already registered)
    pub fn register(&mut self) -> Result<(), WindowError> {
        if self.registered {
            return Ok(());
        }

        unsafe {
            let module = GetModuleHandleW(None).map_err(WindowError::class_registration)?;
            let instance: HINSTANCE = module.into();

            let wc = WNDCLASSEXW {
                cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
                style: CS_OWNDC,
                lpfnWndProc: Some(wnd_proc),
                cbClsExtra: 0,
                cbWndExtra: 0,
                hInstance: instance,
                hIcon: LoadIconW(None, IDI_APPLICATION).unwrap_or_default(),
                hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
                hbrBackground: HBRUSH::default(),
                lpszMenuName: PCWSTR::null(),
                lpszClassName: self.name(),
                hIconSm: HICON::default(),
            };

            if RegisterClassExW(&wc) == 0 {
                return Err(WindowError::class_registration(Error::from_win32()));
            }

            self.instance = instance;
        }

        self.registered = true;
        log!("window class '{}' registered", self.display_name);
        Ok(())
    }

    /// Unregister the class (no-op when not registered)
    pub fn destroy(&mut self) {
        if !self.registered {
            return;
        }

        unsafe {
            if let Err(e) = UnregisterClassW(self.name(), self.instance) {
                log!("UnregisterClassW '{}' failed: {}", self.display_name, e);
            }
        }
        self.registered = false;
        log!("window class '{}' unregistered", self.display_name);
    }

    /// Null-terminated class name; valid as long as `self`
    pub fn name(&self) -> PCWSTR {
        PCWSTR(self.name.as_ptr())
    }

    pub fn instance(&self) -> HINSTANCE {
        self.instance
    }
}

impl Drop for WindowClass {
    fn drop(&mut self) {
        self.destroy();
    }
}
