pub use chip8::{Chip8, Step};
pub use config::{Config, Quirks, StackDepth, StackPolicy};
pub use constants::{CLOCK_SPEED, TIMER_SPEED};
pub use error::{Error, Result};
pub use frame_buffer::FrameBuffer;
pub use instruction::{Instruction, Mnemonic};
pub use keypad::Keypad;

mod chip8;
pub mod config;
pub mod constants;
mod error;
mod frame_buffer;
mod instruction;
mod keypad;
mod opcode;
mod operations;
pub mod state;
