use std::fmt;

use crate::config::StackDepth;
use crate::constants::{ADDRESS_MASK, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::frame_buffer::FrameBuffer;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, advanced by 2 as each instruction is fetched
///
/// Timers
/// - 2 8-bit timers (delay & sound) counting down to 0 at 60Hz
///
/// ## Memory
/// - a call stack of 16 or 32 return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the hexadecimal font
///     - 0x200.. holds the program
/// - 64x32 frame buffer
///     - stores the contents of the next frame to be drawn
///
/// ## Input
/// - Emulation halts until a key's value is written to `register_needing_key`
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub register_needing_key: Option<u8>,
}

impl State {
    pub fn new(stack_depth: StackDepth) -> Self {
        // 0x000 - 0x050 is reserved for a sprite sheet
        let mut memory = [0; MEMORY_SIZE];
        memory[0..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::new(stack_depth),
            delay_timer: 0,
            sound_timer: 0,
            memory,
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            register_needing_key: None,
        }
    }

    /// Reads the byte at `addr`, wrapped into the 12-bit address space
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDRESS_MASK) as usize]
    }

    /// Writes the byte at `addr`, wrapped into the 12-bit address space
    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.memory[(addr & ADDRESS_MASK) as usize] = value;
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(StackDepth::default())
    }
}

/// # Stack
/// Return addresses pushed by `2NNN` and popped by `00EE`.
///
/// Storage always has room for 32 entries; `capacity` limits how many are used.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stack {
    slots: [u16; 32],
    sp: usize,
    capacity: usize,
}

impl Stack {
    pub fn new(depth: StackDepth) -> Self {
        Stack {
            slots: [0; 32],
            sp: 0,
            capacity: depth.slots(),
        }
    }

    /// Pushes a return address. Returns false and leaves the stack untouched if it is full.
    pub fn push(&mut self, addr: u16) -> bool {
        if self.sp == self.capacity {
            return false;
        }
        self.slots[self.sp] = addr;
        self.sp += 1;
        true
    }

    pub fn pop(&mut self) -> Option<u16> {
        if self.sp == 0 {
            return None;
        }
        self.sp -= 1;
        Some(self.slots[self.sp])
    }

    pub fn len(&self) -> usize {
        self.sp
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Human readable listing of memory, one `ADDR: BYTE` line per address
pub struct MemoryDump<'a>(pub &'a [u8]);

impl fmt::Display for MemoryDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (addr, byte) in self.0.iter().enumerate() {
            writeln!(f, "{:03X}: {:02X}", addr, byte)?;
        }
        Ok(())
    }
}
