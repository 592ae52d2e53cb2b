use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::config::Config;
use crate::constants::{MAX_PROGRAM_SIZE, PROGRAM_START};
use crate::error::{Error, Result};
use crate::frame_buffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::opcode;
use crate::state::{MemoryDump, State};

/// What happened when the CPU was asked to advance
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// An instruction was fetched and executed
    Executed(Instruction),
    /// Nothing ran; the program is waiting for a key press
    AwaitingKey,
    /// The word at the program counter is zero; the program has finished
    Halted,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `keys` with public interfaces for pressing and releasing them
///  - the `config` selecting quirks and stack behavior
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
///
/// It has no notion of time. Whoever drives it decides how often to call `step` and
/// `tick_timers` (nominally ~700Hz and 60Hz).
pub struct Chip8 {
    state: State,
    keys: Keypad,
    config: Config,
}

impl Chip8 {
    pub fn new(config: Config) -> Self {
        Chip8 {
            state: State::new(config.stack_depth),
            keys: Keypad::new(),
            config,
        }
    }

    /// Load a rom from a reader into memory at 0x200
    ///
    /// Program memory is cleared first so a shorter ROM leaves nothing of the previous one behind.
    /// Anything that doesn't fit before the end of memory is dropped.
    /// Returns the number of bytes loaded.
    ///
    /// # Arguments
    /// * `reader` a reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize> {
        let start = PROGRAM_START as usize;
        self.state.memory[start..].fill(0);
        let mut loaded = 0;
        while loaded < MAX_PROGRAM_SIZE {
            match reader.read(&mut self.state.memory[start + loaded..]) {
                Ok(0) => break,
                Ok(n) => loaded += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        // A failed read past the end counts as the end of the ROM
        if loaded == MAX_PROGRAM_SIZE && matches!(reader.read(&mut [0u8]), Ok(n) if n > 0) {
            log::warn!(
                "ROM is larger than {} bytes; the remainder was not loaded",
                MAX_PROGRAM_SIZE
            );
        }
        log::debug!("loaded {} bytes at {:#05X}", loaded, PROGRAM_START);
        Ok(loaded)
    }

    /// Load a rom from a file path
    ///
    /// # Arguments
    /// * `path` the location of a ROM file
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);
        self.load_rom(&mut reader).map_err(|e| match e {
            Error::Read(source) => Error::Load {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Returns the FrameBuffer if the display should be redrawn, clearing the redraw request
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether something has been drawn since the last `take_frame`
    pub fn needs_redraw(&self) -> bool {
        self.state.draw_flag
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set the pressed status of key
    ///
    /// If the program is waiting on a key, the key is written to the waiting register and
    /// execution may resume.
    ///
    /// # Arguments
    /// * `key` the logical key 0x0..=0xF that was pressed
    pub fn key_press(&mut self, key: u8) {
        if !self.keys.press(key) {
            log::warn!("ignoring press of unknown key {:#04X}", key);
            return;
        }
        if let Some(register) = self.state.register_needing_key.take() {
            log::debug!("key {:X} resolves wait on V{:X}", key, register);
            self.state.v[register as usize] = key;
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the logical key 0x0..=0xF that was released
    pub fn key_release(&mut self, key: u8) {
        self.keys.release(key);
    }

    pub fn awaiting_key(&self) -> bool {
        self.state.register_needing_key.is_some()
    }

    /// Whether the sound timer is running and a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Advances the CPU by a single instruction
    /// - does nothing if awaiting a keypress
    /// - halts on a zero word
    /// - otherwise fetches the next opcode, moves the pc past it, and executes it
    ///
    /// If the instruction fails the state is left exactly as it was before the call.
    pub fn step(&mut self) -> Result<Step> {
        if self.awaiting_key() {
            return Ok(Step::AwaitingKey);
        }

        let op = self.get_op();
        if op == 0x0000 {
            log::debug!("zero instruction at {:#05X}; halting", self.state.pc);
            return Ok(Step::Halted);
        }

        let instruction = Instruction::decode(op);
        log::trace!(
            "{:04X} {:04X} {:<16} v{:02X?} i{:04X}",
            self.state.pc,
            op,
            instruction.mnemonic(&self.config.quirks).to_string(),
            self.state.v,
            self.state.i
        );

        let mut fetched = self.state;
        fetched.pc = fetched.pc.wrapping_add(0x2);
        self.state = instruction.execute(&fetched, &self.keys, &self.config)?;
        Ok(Step::Executed(instruction))
    }

    /// Decrements the delay and sound timers towards zero.
    /// Meant to be called at 60Hz, independently of `step`.
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// A listing of every memory address and the byte stored there
    pub fn memory_dump(&self) -> String {
        MemoryDump(&self.state.memory).to_string()
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> u16 {
        let pc = self.state.pc;
        opcode::from_bytes(
            self.state.read_byte(pc),
            self.state.read_byte(pc.wrapping_add(1)),
        )
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
