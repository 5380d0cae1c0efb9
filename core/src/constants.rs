use std::time::Duration;

/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Addresses wrap to the 12-bit address space.
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// ROMs are loaded into memory starting here and the PC starts here.
pub const PROGRAM_START: usize = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

pub const REGISTER_COUNT: usize = 16;

/// Nesting depth of subroutine calls.
pub const STACK_DEPTH: usize = 16;

/// The hex keypad has keys 0..F.
pub const KEY_COUNT: usize = 16;

/// Every glyph in the `FONT_SET` is 5 rows tall.
pub const FONT_SPRITE_BYTES: usize = 5;

/// How many instructions the driver executes between timer ticks by default.
pub const DEFAULT_INSTRUCTIONS_PER_FRAME: u32 = 10;

/// Timers count down at 60Hz, approximated as one tick per ~16ms frame.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// # Font Set
/// Sprites for the hex digits 0..F, 5 bytes each, stored at 0x000..0x050.
///
/// Each byte is one row of a glyph with its four leftmost bits set where the
/// glyph is lit, e.g. `0`:
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const FONT_SET: [u8; 16 * FONT_SPRITE_BYTES] = [
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
