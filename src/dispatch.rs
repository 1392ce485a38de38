//! Window message classification and keyboard routing

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::keyboard::KeyboardInput;
use crate::keys::{map_left_right_keys, KeyFlags, ScanCodeMapper};

pub const WM_KILLFOCUS: u32 = 0x0008;
pub const WM_CLOSE: u32 = 0x0010;
pub const WM_KEYDOWN: u32 = 0x0100;
pub const WM_KEYUP: u32 = 0x0101;
pub const WM_SYSKEYDOWN: u32 = 0x0104;
pub const WM_SYSKEYUP: u32 = 0x0105;

/// The messages the window reacts to; everything else is `Other`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowMessage {
    Close,
    FocusLost,
    /// WM_KEYDOWN or WM_SYSKEYDOWN
    KeyDown { vk: usize, flags: KeyFlags },
    /// WM_KEYUP or WM_SYSKEYUP
    KeyUp { vk: usize, flags: KeyFlags },
    Other(u32),
}

impl WindowMessage {
    /// Classify a raw (msg, wparam, lparam) triple
    pub fn classify(msg: u32, wparam: usize, lparam: isize) -> Self {
        match msg {
            WM_CLOSE => WindowMessage::Close,
            WM_KILLFOCUS => WindowMessage::FocusLost,
            WM_KEYDOWN | WM_SYSKEYDOWN => WindowMessage::KeyDown {
                vk: wparam,
                flags: KeyFlags(lparam),
            },
            WM_KEYUP | WM_SYSKEYUP => WindowMessage::KeyUp {
                vk: wparam,
                flags: KeyFlags(lparam),
            },
            other => WindowMessage::Other(other),
        }
    }
}

/// What the window procedure should do after routing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Post the quit signal and return 0 without default processing
    Quit,
    /// Hand the message to the OS default handler
    Default,
}

type KeyboardRef = Weak<RefCell<dyn KeyboardInput>>;

/// Applies the dispatch rules for one window.
///
/// Holds only a weak reference to the keyboard: the caller owns it, and once
/// it is dropped key messages are ignored as if none were attached.
pub struct MessageRouter {
    keyboard: RefCell<Option<KeyboardRef>>,
    scan_codes: Box<dyn ScanCodeMapper>,
    /// Focus was lost while the keyboard was borrowed elsewhere
    pending_clear: Cell<bool>,
}

impl MessageRouter {
    pub fn new(scan_codes: Box<dyn ScanCodeMapper>) -> Self {
        Self {
            keyboard: RefCell::new(None),
            scan_codes,
            pending_clear: Cell::new(false),
        }
    }

    pub fn set_keyboard<K: KeyboardInput + 'static>(&self, keyboard: &Rc<RefCell<K>>) {
        let keyboard: Rc<RefCell<dyn KeyboardInput>> = keyboard.clone();
        *self.keyboard.borrow_mut() = Some(Rc::downgrade(&keyboard));
    }

    pub fn clear_keyboard(&self) {
        *self.keyboard.borrow_mut() = None;
        self.pending_clear.set(false);
    }

    /// True while a focus-loss reset is waiting for the keyboard to be free
    pub fn has_pending_clear(&self) -> bool {
        self.pending_clear.get()
    }

    /// Apply a deferred focus-loss reset if the keyboard can be borrowed now
    pub fn apply_pending_clear(&self) {
        if !self.pending_clear.get() {
            return;
        }
        let Some(keyboard) = self.attached_keyboard() else {
            self.pending_clear.set(false);
            return;
        };
        if let Ok(mut keyboard) = keyboard.try_borrow_mut() {
            keyboard.clear_key_states();
            self.pending_clear.set(false);
        };
    }

    /// True when a keyboard is attached and still alive
    pub fn has_keyboard(&self) -> bool {
        self.attached_keyboard().is_some()
    }

    fn attached_keyboard(&self) -> Option<Rc<RefCell<dyn KeyboardInput>>> {
        self.keyboard.borrow().as_ref().and_then(Weak::upgrade)
    }

    /// Route a raw message
    pub fn route(&self, msg: u32, wparam: usize, lparam: isize) -> Route {
        self.route_message(WindowMessage::classify(msg, wparam, lparam))
    }

    pub fn route_message(&self, message: WindowMessage) -> Route {
        if message == WindowMessage::Close {
            return Route::Quit;
        }
        if let WindowMessage::Other(_) = message {
            return Route::Default;
        }

        let Some(keyboard) = self.attached_keyboard() else {
            return Route::Default;
        };
        let Ok(mut keyboard) = keyboard.try_borrow_mut() else {
            if message == WindowMessage::FocusLost {
                log!("keyboard busy, deferring focus-loss reset");
                self.pending_clear.set(true);
            } else {
                log!("keyboard busy, dropping {:?}", message);
            }
            return Route::Default;
        };

        if self.pending_clear.replace(false) && message != WindowMessage::FocusLost {
            keyboard.clear_key_states();
        }

        match message {
            WindowMessage::FocusLost => keyboard.clear_key_states(),
            WindowMessage::KeyDown { vk, flags } => {
                if !flags.is_repeat() || keyboard.is_autorepeat_enabled() {
                    let key = map_left_right_keys(vk, flags, self.scan_codes.as_ref());
                    keyboard.on_key_pressed(key as u8);
                }
            }
            WindowMessage::KeyUp { vk, flags } => {
                let key = map_left_right_keys(vk, flags, self.scan_codes.as_ref());
                keyboard.on_key_released(key as u8);
            }
            WindowMessage::Close | WindowMessage::Other(_) => {}
        }

        Route::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::StandardScanCodes;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Pressed(u8),
        Released(u8),
        Cleared,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        autorepeat: bool,
    }

    impl KeyboardInput for Recorder {
        fn on_key_pressed(&mut self, key_code: u8) {
            self.calls.push(Call::Pressed(key_code));
        }

        fn on_key_released(&mut self, key_code: u8) {
            self.calls.push(Call::Released(key_code));
        }

        fn clear_key_states(&mut self) {
            self.calls.push(Call::Cleared);
        }

        fn is_autorepeat_enabled(&self) -> bool {
            self.autorepeat
        }
    }

    const REPEAT: isize = 1 << 30;
    const EXTENDED: isize = 1 << 24;

    fn router_with(recorder: &Rc<RefCell<Recorder>>) -> MessageRouter {
        let router = MessageRouter::new(Box::new(StandardScanCodes));
        router.set_keyboard(recorder);
        router
    }

    #[test]
    fn test_classify() {
        assert_eq!(WindowMessage::classify(WM_CLOSE, 0, 0), WindowMessage::Close);
        assert_eq!(
            WindowMessage::classify(WM_KILLFOCUS, 0, 0),
            WindowMessage::FocusLost
        );
        assert_eq!(
            WindowMessage::classify(WM_SYSKEYDOWN, 0x12, EXTENDED),
            WindowMessage::KeyDown {
                vk: 0x12,
                flags: KeyFlags(EXTENDED)
            }
        );
        assert_eq!(
            WindowMessage::classify(WM_SYSKEYUP, 0x41, 0),
            WindowMessage::KeyUp {
                vk: 0x41,
                flags: KeyFlags(0)
            }
        );
        assert_eq!(
            WindowMessage::classify(0x000F, 0, 0),
            WindowMessage::Other(0x000F)
        );
    }

    #[test]
    fn test_close_requests_quit() {
        let router = MessageRouter::new(Box::new(StandardScanCodes));
        assert_eq!(router.route(WM_CLOSE, 0, 0), Route::Quit);
    }

    #[test]
    fn test_repeat_suppressed_without_autorepeat() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let router = router_with(&recorder);

        assert_eq!(router.route(WM_KEYDOWN, 0x41, REPEAT), Route::Default);
        router.route(WM_SYSKEYDOWN, 0x41, REPEAT);
        assert!(recorder.borrow().calls.is_empty());

        router.route(WM_KEYDOWN, 0x41, 0);
        assert_eq!(recorder.borrow().calls, vec![Call::Pressed(0x41)]);
    }

    #[test]
    fn test_repeat_reported_with_autorepeat() {
        let recorder = Rc::new(RefCell::new(Recorder {
            autorepeat: true,
            ..Default::default()
        }));
        let router = router_with(&recorder);

        router.route(WM_KEYDOWN, 0x41, REPEAT);
        router.route(WM_SYSKEYDOWN, 0x11, REPEAT | EXTENDED);
        assert_eq!(
            recorder.borrow().calls,
            vec![Call::Pressed(0x41), Call::Pressed(0xA3)]
        );
    }

    #[test]
    fn test_key_up_always_released() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let router = router_with(&recorder);

        router.route(WM_KEYUP, 0x41, REPEAT);
        router.route(WM_SYSKEYUP, 0x12, 0);
        router.route(WM_KEYUP, 0x10, 0x36 << 16);
        assert_eq!(
            recorder.borrow().calls,
            vec![
                Call::Released(0x41),
                Call::Released(0xA4),
                Call::Released(0xA1)
            ]
        );
    }

    #[test]
    fn test_focus_lost_clears_once() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let router = router_with(&recorder);

        assert_eq!(router.route(WM_KILLFOCUS, 0, 0), Route::Default);
        assert_eq!(recorder.borrow().calls, vec![Call::Cleared]);
    }

    #[test]
    fn test_shift_remapped_on_press() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let router = router_with(&recorder);

        router.route(WM_KEYDOWN, 0x10, 0x2A << 16);
        assert_eq!(recorder.borrow().calls, vec![Call::Pressed(0xA0)]);
    }

    #[test]
    fn test_no_keyboard_is_ignored() {
        let router = MessageRouter::new(Box::new(StandardScanCodes));
        assert!(!router.has_keyboard());
        assert_eq!(router.route(WM_KEYDOWN, 0x41, 0), Route::Default);
        assert_eq!(router.route(WM_KEYUP, 0x41, 0), Route::Default);
        assert_eq!(router.route(WM_KILLFOCUS, 0, 0), Route::Default);
    }

    #[test]
    fn test_dropped_keyboard_is_ignored() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let router = router_with(&recorder);
        assert!(router.has_keyboard());

        drop(recorder);
        assert!(!router.has_keyboard());
        assert_eq!(router.route(WM_KEYDOWN, 0x41, 0), Route::Default);
    }

    #[test]
    fn test_cleared_keyboard_stops_routing() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let router = router_with(&recorder);
        router.clear_keyboard();

        router.route(WM_KEYDOWN, 0x41, 0);
        assert!(recorder.borrow().calls.is_empty());
    }

    #[test]
    fn test_borrowed_keyboard_is_skipped() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let router = router_with(&recorder);

        let held = recorder.borrow();
        assert_eq!(router.route(WM_KEYDOWN, 0x41, 0), Route::Default);
        assert!(held.calls.is_empty());
    }

    #[test]
    fn test_focus_lost_while_borrowed_clears_on_next_message() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let router = router_with(&recorder);
        router.route(WM_KEYDOWN, 0x41, 0);

        {
            let _held = recorder.borrow();
            router.route(WM_KILLFOCUS, 0, 0);
        }
        assert!(router.has_pending_clear());

        router.route(WM_KEYUP, 0x42, 0);
        assert!(!router.has_pending_clear());
        assert_eq!(
            recorder.borrow().calls,
            vec![Call::Pressed(0x41), Call::Cleared, Call::Released(0x42)]
        );
    }

    #[test]
    fn test_apply_pending_clear_resets_stuck_keys() {
        let keyboard = Rc::new(RefCell::new(crate::keyboard::Keyboard::new()));
        let router = MessageRouter::new(Box::new(StandardScanCodes));
        router.set_keyboard(&keyboard);
        router.route(WM_KEYDOWN, 0x41, 0);

        {
            let held = keyboard.borrow();
            router.route(WM_KILLFOCUS, 0, 0);
            // Still borrowed: nothing can be applied yet
            router.apply_pending_clear();
            assert!(held.is_key_pressed(0x41));
        }

        router.apply_pending_clear();
        assert!(!router.has_pending_clear());
        assert!(!keyboard.borrow().is_key_pressed(0x41));
    }
}
