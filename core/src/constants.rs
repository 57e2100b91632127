/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Every address is 12 bits wide; anything computed beyond that wraps around.
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// ROMs are loaded (and execution begins) here.
pub const PROGRAM_START: u16 = 0x200;

/// The most bytes a ROM can contain.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const REGISTER_COUNT: usize = 16;

/// Index of VF, the flag register.
pub const FLAG_REGISTER: usize = 0xF;

/// Nesting depth of subroutine calls.
pub const STACK_DEPTH: usize = 16;

pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Default CPU cycles per second.
pub const CLOCK_SPEED: u32 = 500;

/// Delay and sound timers are decremented this many times per second.
pub const TIMER_SPEED: u32 = 60;

/// Address of the first byte of the built-in font.
pub const FONT_START: u16 = 0x050;

/// Every glyph is 5 rows of 8 pixels (only the high nibble is lit).
pub const FONT_GLYPH_SIZE: u16 = 5;

/// # Font
/// Sprites for the hexadecimal digits 0..F, e.g. 0 is:
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const FONT_SET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
