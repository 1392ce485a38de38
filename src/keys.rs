//! Virtual-key codes and left/right modifier remapping

/// Generic shift, either side
pub const VK_SHIFT: u8 = 0x10;
/// Generic control, either side
pub const VK_CONTROL: u8 = 0x11;
/// Generic alt (VK_MENU), either side
pub const VK_MENU: u8 = 0x12;
pub const VK_LSHIFT: u8 = 0xA0;
pub const VK_RSHIFT: u8 = 0xA1;
pub const VK_LCONTROL: u8 = 0xA2;
pub const VK_RCONTROL: u8 = 0xA3;
pub const VK_LMENU: u8 = 0xA4;
pub const VK_RMENU: u8 = 0xA5;

/// Named keys the demo and callers most often query.
///
/// Anything else is still delivered as a raw `u8` code; `from_vk` returns
/// `None` for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyCode {
    Backspace = 0x08,
    Tab = 0x09,
    Enter = 0x0D,
    Escape = 0x1B,
    Space = 0x20,
    Left = 0x25,
    Up = 0x26,
    Right = 0x27,
    Down = 0x28,
    A = 0x41,
    B = 0x42,
    D = 0x44,
    S = 0x53,
    W = 0x57,

    // Generic modifiers, only seen before remapping
    Shift = VK_SHIFT,
    Control = VK_CONTROL,
    Alt = VK_MENU,

    LeftShift = VK_LSHIFT,
    RightShift = VK_RSHIFT,
    LeftControl = VK_LCONTROL,
    RightControl = VK_RCONTROL,
    LeftAlt = VK_LMENU,
    RightAlt = VK_RMENU,
}

impl KeyCode {
    const ALL: [KeyCode; 23] = [
        KeyCode::Backspace,
        KeyCode::Tab,
        KeyCode::Enter,
        KeyCode::Escape,
        KeyCode::Space,
        KeyCode::Left,
        KeyCode::Up,
        KeyCode::Right,
        KeyCode::Down,
        KeyCode::A,
        KeyCode::B,
        KeyCode::D,
        KeyCode::S,
        KeyCode::W,
        KeyCode::Shift,
        KeyCode::Control,
        KeyCode::Alt,
        KeyCode::LeftShift,
        KeyCode::RightShift,
        KeyCode::LeftControl,
        KeyCode::RightControl,
        KeyCode::LeftAlt,
        KeyCode::RightAlt,
    ];

    /// Look up a virtual key code
    pub fn from_vk(vk: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.vk() == vk)
    }

    /// The raw virtual key code
    pub fn vk(self) -> u8 {
        self as u8
    }
}

/// Packed flags carried in the LPARAM of key-down / key-up messages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyFlags(pub isize);

impl KeyFlags {
    const REPEAT_BIT: isize = 0x4000_0000;
    const EXTENDED_BIT: isize = 0x0100_0000;
    const SCAN_CODE_MASK: isize = 0x00FF_0000;

    /// Set by the OS when the key was already down (auto-repeat)
    pub fn is_repeat(self) -> bool {
        self.0 & Self::REPEAT_BIT != 0
    }

    /// Right-hand control/alt and other extended keys
    pub fn is_extended(self) -> bool {
        self.0 & Self::EXTENDED_BIT != 0
    }

    /// Hardware scan code (bits 16-23)
    pub fn scan_code(self) -> u32 {
        ((self.0 & Self::SCAN_CODE_MASK) >> 16) as u32
    }
}

/// Translates hardware scan codes into side-specific virtual keys
pub trait ScanCodeMapper {
    /// Returns 0 when the scan code has no mapping
    fn scan_to_virtual_key(&self, scan_code: u32) -> u32;
}

/// Fixed US layout table for the two shift keys
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardScanCodes;

impl ScanCodeMapper for StandardScanCodes {
    fn scan_to_virtual_key(&self, scan_code: u32) -> u32 {
        match scan_code {
            0x2A => VK_LSHIFT as u32,
            0x36 => VK_RSHIFT as u32,
            _ => 0,
        }
    }
}

/// Resolve generic shift/control/alt into their left/right variants.
///
/// Every other code is returned unchanged.
pub fn map_left_right_keys(vk: usize, flags: KeyFlags, scan_codes: &dyn ScanCodeMapper) -> usize {
    const SHIFT: usize = VK_SHIFT as usize;
    const CONTROL: usize = VK_CONTROL as usize;
    const MENU: usize = VK_MENU as usize;

    match vk {
        SHIFT => scan_codes.scan_to_virtual_key(flags.scan_code()) as usize,
        CONTROL if flags.is_extended() => VK_RCONTROL as usize,
        CONTROL => VK_LCONTROL as usize,
        MENU if flags.is_extended() => VK_RMENU as usize,
        MENU => VK_LMENU as usize,
        other => other,
    }
}
