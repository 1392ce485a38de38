//! Window procedure and the per-thread window registry
//!
//! The OS calls a free function; the registry maps each HWND back to the
//! router of the window that owns it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::dispatch::{MessageRouter, Route};

thread_local! {
    /// Router handed over during CreateWindowExW, claimed at WM_NCCREATE
    static PENDING: RefCell<Option<Rc<MessageRouter>>> = const { RefCell::new(None) };

    static ROUTERS: RefCell<HashMap<isize, Rc<MessageRouter>>> = RefCell::new(HashMap::new());
}

fn key(hwnd: HWND) -> isize {
    hwnd.0 as isize
}

pub(super) fn set_pending(router: Rc<MessageRouter>) {
    PENDING.with(|p| *p.borrow_mut() = Some(router));
}

pub(super) fn take_pending() -> Option<Rc<MessageRouter>> {
    PENDING.with(|p| p.borrow_mut().take())
}

pub(super) fn attach(hwnd: HWND, router: Rc<MessageRouter>) {
    ROUTERS.with(|r| {
        r.borrow_mut().insert(key(hwnd), router);
    });
}

pub(super) fn detach(hwnd: HWND) {
    ROUTERS.with(|r| {
        r.borrow_mut().remove(&key(hwnd));
    });
}

#[cfg(test)]
pub(super) fn is_attached(hwnd: HWND) -> bool {
    router_for(hwnd).is_some()
}

fn router_for(hwnd: HWND) -> Option<Rc<MessageRouter>> {
    ROUTERS.with(|r| r.borrow().get(&key(hwnd)).cloned())
}

/// Window procedure registered with every window class
pub(super) unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_NCCREATE {
        if let Some(router) = take_pending() {
            attach(hwnd, router);
        }
    }

    // The registry borrow is released before routing; routing may re-enter.
    let route = match router_for(hwnd) {
        Some(router) => router.route(msg, wparam.0, lparam.0),
        None => Route::Default,
    };

    if msg == WM_NCDESTROY {
        detach(hwnd);
    }

    match route {
        Route::Quit => {
            log!("close requested for {:?}, posting quit", hwnd);
            PostQuitMessage(0);
            LRESULT(0)
        }
        Route::Default => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
