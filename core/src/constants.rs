/// Width of the display in pixels
pub const DISPLAY_WIDTH: usize = 64;
/// Height of the display in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// Size of the addressable memory in bytes
pub const MEMORY_SIZE: usize = 4096;
/// Mask applied to addresses so they stay within the 12-bit address space
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Address at which programs are loaded and execution begins
pub const PROGRAM_START: u16 = 0x200;
/// Largest program that fits between `PROGRAM_START` and the end of memory
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Index of the register doubling as the carry/borrow/collision flag
pub const FLAG: usize = 0xF;

/// Number of bytes making up a single font glyph
pub const GLYPH_HEIGHT: u16 = 5;

/// Instructions executed per second by the host loop unless told otherwise
pub const CLOCK_SPEED: u32 = 700;
/// Frequency at which the delay and sound timers count down
pub const TIMER_SPEED: u32 = 60;

/// # Sprite Sheet
/// The hexadecimal font, 5 bytes per glyph for the digits 0..F.
///
/// Each byte is one row of a 4 pixel wide glyph stored in its high nibble:
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
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
