//! Win32 window handle ownership

use std::rc::Rc;

use windows::core::PCWSTR;
use windows::Win32::Foundation::{FALSE, HWND, RECT};
use windows::Win32::UI::WindowsAndMessaging::*;

use super::class::WindowClass;
use super::{to_wide, wndproc};
use crate::dispatch::MessageRouter;
use crate::error::WindowError;

const STYLE: WINDOW_STYLE = WS_OVERLAPPEDWINDOW;

/// Owns at most one window handle; destroys it on drop
#[derive(Default)]
pub struct WindowHandle {
    hwnd: Option<HWND>,
}

impl WindowHandle {
    /// Create a window whose client area is `width` x `height`.
    ///
    /// `router` receives every message sent to the window, starting with
    /// WM_NCCREATE.
    pub fn create(
        &mut self,
        class: &WindowClass,
        title: &str,
        width: u32,
        height: u32,
        router: Rc<MessageRouter>,
    ) -> Result<(), WindowError> {
        if self.hwnd.is_some() {
            return Err(WindowError::WindowCreation(
                "window handle already exists".to_string(),
            ));
        }

        let width = i32::try_from(width)
            .map_err(|_| WindowError::WindowCreation(format!("width {} out of range", width)))?;
        let height = i32::try_from(height)
            .map_err(|_| WindowError::WindowCreation(format!("height {} out of range", height)))?;

        let mut rect = RECT {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        };
        let title = to_wide(title);

        wndproc::set_pending(router);
        let result = unsafe {
            AdjustWindowRect(&mut rect, STYLE, FALSE).and_then(|_| {
                CreateWindowExW(
                    WINDOW_EX_STYLE::default(),
                    class.name(),
                    PCWSTR(title.as_ptr()),
                    STYLE,
                    CW_USEDEFAULT,
                    CW_USEDEFAULT,
                    rect.right - rect.left,
                    rect.bottom - rect.top,
                    None,
                    None,
                    class.instance(),
                    None,
                )
            })
        };
        // Left over only if WM_NCCREATE never reached the window procedure
        let missed = wndproc::take_pending();

        let hwnd = result.map_err(WindowError::window_creation)?;
        if let Some(router) = missed {
            wndproc::attach(hwnd, router);
        }

        self.hwnd = Some(hwnd);
        log!("window handle created: {:?}", hwnd);
        Ok(())
    }

    /// Destroy the window (no-op when there is none)
    pub fn destroy(&mut self) {
        if let Some(hwnd) = self.hwnd.take() {
            unsafe {
                if let Err(e) = DestroyWindow(hwnd) {
                    log!("DestroyWindow({:?}) failed: {}", hwnd, e);
                }
            }
            wndproc::detach(hwnd);
            log!("window handle destroyed: {:?}", hwnd);
        }
    }

    pub fn hwnd(&self) -> Option<HWND> {
        self.hwnd
    }
}

impl Drop for WindowHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}
