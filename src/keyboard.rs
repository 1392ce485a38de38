//! Keyboard state
//!
//! [`KeyboardInput`] is what the window forwards key events to. [`Keyboard`]
//! is the stock implementation: per-key down flags plus a bounded queue of
//! press/release events the caller drains once per frame.

use std::collections::VecDeque;

use crate::config::KeyboardSettings;
use crate::keys::KeyCode;

/// Receiver of keyboard events routed from the window
pub trait KeyboardInput {
    fn on_key_pressed(&mut self, key_code: u8);
    fn on_key_released(&mut self, key_code: u8);
    /// Forget every key currently held down
    fn clear_key_states(&mut self);
    /// Whether repeated key-down notifications count as presses
    fn is_autorepeat_enabled(&self) -> bool;
}

/// Kind of a queued key event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEventKind {
    Press,
    Release,
}

/// A queued key event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub code: u8,
}

impl KeyEvent {
    pub fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }

    pub fn is_release(&self) -> bool {
        self.kind == KeyEventKind::Release
    }

    /// Typed key, if the code is one [`KeyCode`] knows about
    pub fn key(&self) -> Option<KeyCode> {
        KeyCode::from_vk(self.code)
    }
}

/// Default queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// Key-state tracker with an event queue
#[derive(Clone, Debug)]
pub struct Keyboard {
    key_states: [bool; 256],
    events: VecDeque<KeyEvent>,
    capacity: usize,
    autorepeat: bool,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keyboard whose queue holds at most `capacity` events (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            key_states: [false; 256],
            events: VecDeque::with_capacity(capacity),
            capacity,
            autorepeat: false,
        }
    }

    pub fn from_config(settings: &KeyboardSettings) -> Self {
        let mut keyboard = Self::with_capacity(settings.queue_capacity);
        keyboard.autorepeat = settings.autorepeat;
        keyboard
    }

    pub fn is_key_pressed(&self, key_code: u8) -> bool {
        self.key_states[key_code as usize]
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.is_key_pressed(key.vk())
    }

    /// Pop the oldest queued event
    pub fn read_key(&mut self) -> Option<KeyEvent> {
        self.events.pop_front()
    }

    pub fn is_key_queue_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop every queued event
    pub fn flush(&mut self) {
        self.events.clear();
    }

    pub fn enable_autorepeat(&mut self) {
        self.autorepeat = true;
    }

    pub fn disable_autorepeat(&mut self) {
        self.autorepeat = false;
    }

    fn push_event(&mut self, event: KeyEvent) {
        self.events.push_back(event);
        while self.events.len() > self.capacity {
            self.events.pop_front();
        }
    }
}

impl KeyboardInput for Keyboard {
    fn on_key_pressed(&mut self, key_code: u8) {
        self.key_states[key_code as usize] = true;
        self.push_event(KeyEvent {
            kind: KeyEventKind::Press,
            code: key_code,
        });
    }

    fn on_key_released(&mut self, key_code: u8) {
        self.key_states[key_code as usize] = false;
        self.push_event(KeyEvent {
            kind: KeyEventKind::Release,
            code: key_code,
        });
    }

    fn clear_key_states(&mut self) {
        self.key_states = [false; 256];
    }

    fn is_autorepeat_enabled(&self) -> bool {
        self.autorepeat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release_track_state() {
        let mut keyboard = Keyboard::new();
        keyboard.on_key_pressed(KeyCode::A.vk());
        assert!(keyboard.is_key_down(KeyCode::A));
        assert!(!keyboard.is_key_down(KeyCode::B));

        keyboard.on_key_released(KeyCode::A.vk());
        assert!(!keyboard.is_key_down(KeyCode::A));

        let press = keyboard.read_key().unwrap();
        assert!(press.is_press());
        assert_eq!(press.key(), Some(KeyCode::A));
        let release = keyboard.read_key().unwrap();
        assert!(release.is_release());
        assert!(keyboard.read_key().is_none());
    }

    #[test]
    fn test_queue_drops_oldest_past_capacity() {
        let mut keyboard = Keyboard::with_capacity(3);
        for code in 1..=5u8 {
            keyboard.on_key_pressed(code);
        }

        let codes: Vec<u8> = std::iter::from_fn(|| keyboard.read_key())
            .map(|e| e.code)
            .collect();
        assert_eq!(codes, vec![3, 4, 5]);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut keyboard = Keyboard::with_capacity(0);
        keyboard.on_key_pressed(0x20);
        keyboard.on_key_pressed(0x21);
        assert_eq!(keyboard.read_key().map(|e| e.code), Some(0x21));
        assert!(keyboard.is_key_queue_empty());
    }

    #[test]
    fn test_clear_key_states_keeps_queue() {
        let mut keyboard = Keyboard::new();
        keyboard.on_key_pressed(0xA0);
        keyboard.on_key_pressed(0x41);
        keyboard.clear_key_states();

        assert!(!keyboard.is_key_pressed(0xA0));
        assert!(!keyboard.is_key_pressed(0x41));
        assert!(!keyboard.is_key_queue_empty());

        keyboard.flush();
        assert!(keyboard.is_key_queue_empty());
    }

    #[test]
    fn test_autorepeat_toggle_and_config() {
        let mut keyboard = Keyboard::new();
        assert!(!keyboard.is_autorepeat_enabled());
        keyboard.enable_autorepeat();
        assert!(keyboard.is_autorepeat_enabled());
        keyboard.disable_autorepeat();
        assert!(!keyboard.is_autorepeat_enabled());

        let keyboard = Keyboard::from_config(&KeyboardSettings {
            autorepeat: true,
            queue_capacity: 2,
        });
        assert!(keyboard.is_autorepeat_enabled());
    }

    #[test]
    fn test_highest_key_code_is_tracked() {
        let mut keyboard = Keyboard::new();
        keyboard.on_key_pressed(0xFF);
        assert!(keyboard.is_key_pressed(0xFF));
    }
}
