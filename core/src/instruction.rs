use std::fmt;

use crate::config::{Config, Quirks, StackPolicy};
use crate::error::Result;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// A decoded Chip-8 instruction.
///
/// Every 16-bit word decodes to some `Instruction`; words that match no known opcode become
/// `Unknown` and execute as no-ops.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 0NNN machine code routine; ignored
    Sys { nnn: u16 },
    /// 1NNN
    Jump { nnn: u16 },
    /// 2NNN
    Call { nnn: u16 },
    /// 3XNN
    SkipEq { x: u8, nn: u8 },
    /// 4XNN
    SkipNe { x: u8, nn: u8 },
    /// 5XY0
    SkipRegEq { x: u8, y: u8 },
    /// 6XNN
    Load { x: u8, nn: u8 },
    /// 7XNN
    Add { x: u8, nn: u8 },
    /// 8XY0
    Move { x: u8, y: u8 },
    /// 8XY1
    Or { x: u8, y: u8 },
    /// 8XY2
    And { x: u8, y: u8 },
    /// 8XY3
    Xor { x: u8, y: u8 },
    /// 8XY4
    AddReg { x: u8, y: u8 },
    /// 8XY5
    Sub { x: u8, y: u8 },
    /// 8XY6
    ShiftRight { x: u8, y: u8 },
    /// 8XY7
    SubN { x: u8, y: u8 },
    /// 8XYE
    ShiftLeft { x: u8, y: u8 },
    /// 9XY0
    SkipRegNe { x: u8, y: u8 },
    /// ANNN
    LoadIndex { nnn: u16 },
    /// BNNN
    JumpOffset { nnn: u16 },
    /// CXNN
    Random { x: u8, nn: u8 },
    /// DXYN
    Draw { x: u8, y: u8, n: u8 },
    /// EX9E
    SkipPressed { x: u8 },
    /// EXA1
    SkipNotPressed { x: u8 },
    /// FX07
    ReadDelay { x: u8 },
    /// FX0A
    WaitKey { x: u8 },
    /// FX15
    SetDelay { x: u8 },
    /// FX18
    SetSound { x: u8 },
    /// FX1E
    AddIndex { x: u8 },
    /// FX29
    LoadGlyph { x: u8 },
    /// FX33
    Bcd { x: u8 },
    /// FX55
    Store { x: u8 },
    /// FX65
    Restore { x: u8 },
    Unknown(u16),
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode
    pub fn decode(op: u16) -> Self {
        let (x, y, n, nn, nnn) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Cls,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Ret,
            (0x0, ..) => Instruction::Sys { nnn },
            (0x1, ..) => Instruction::Jump { nnn },
            (0x2, ..) => Instruction::Call { nnn },
            (0x3, ..) => Instruction::SkipEq { x, nn },
            (0x4, ..) => Instruction::SkipNe { x, nn },
            (0x5, .., 0x0) => Instruction::SkipRegEq { x, y },
            (0x6, ..) => Instruction::Load { x, nn },
            (0x7, ..) => Instruction::Add { x, nn },
            (0x8, .., 0x0) => Instruction::Move { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddReg { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::ShiftRight { x, y },
            (0x8, .., 0x7) => Instruction::SubN { x, y },
            (0x8, .., 0xE) => Instruction::ShiftLeft { x, y },
            (0x9, .., 0x0) => Instruction::SkipRegNe { x, y },
            (0xA, ..) => Instruction::LoadIndex { nnn },
            (0xB, ..) => Instruction::JumpOffset { nnn },
            (0xC, ..) => Instruction::Random { x, nn },
            (0xD, ..) => Instruction::Draw { x, y, n },
            (0xE, .., 0x9, 0xE) => Instruction::SkipPressed { x },
            (0xE, .., 0xA, 0x1) => Instruction::SkipNotPressed { x },
            (0xF, .., 0x0, 0x7) => Instruction::ReadDelay { x },
            (0xF, .., 0x0, 0xA) => Instruction::WaitKey { x },
            (0xF, .., 0x1, 0x5) => Instruction::SetDelay { x },
            (0xF, .., 0x1, 0x8) => Instruction::SetSound { x },
            (0xF, .., 0x1, 0xE) => Instruction::AddIndex { x },
            (0xF, .., 0x2, 0x9) => Instruction::LoadGlyph { x },
            (0xF, .., 0x3, 0x3) => Instruction::Bcd { x },
            (0xF, .., 0x5, 0x5) => Instruction::Store { x },
            (0xF, .., 0x6, 0x5) => Instruction::Restore { x },
            _ => Instruction::Unknown(op),
        }
    }

    /// Executes the instruction against `state`, whose pc already points past it.
    ///
    /// On error `state` is left as it was. Under `StackPolicy::Lenient` stack faults are logged
    /// and the instruction is skipped instead.
    pub fn execute(&self, state: &State, keys: &Keypad, config: &Config) -> Result<State> {
        let quirks = &config.quirks;
        let next = match *self {
            Instruction::Cls => cls(state),
            Instruction::Ret => return stack_fault(rts(state), state, config),
            Instruction::Sys { .. } | Instruction::Unknown(_) => *state,
            Instruction::Jump { nnn } => jump(state, nnn),
            Instruction::Call { nnn } => return stack_fault(call(state, nnn), state, config),
            Instruction::SkipEq { x, nn } => ske(state, x, nn),
            Instruction::SkipNe { x, nn } => skne(state, x, nn),
            Instruction::SkipRegEq { x, y } => skre(state, x, y),
            Instruction::Load { x, nn } => load(state, x, nn),
            Instruction::Add { x, nn } => add(state, x, nn),
            Instruction::Move { x, y } => mv(state, x, y),
            Instruction::Or { x, y } => or(state, x, y, quirks),
            Instruction::And { x, y } => and(state, x, y, quirks),
            Instruction::Xor { x, y } => xor(state, x, y, quirks),
            Instruction::AddReg { x, y } => addr(state, x, y),
            Instruction::Sub { x, y } => sub(state, x, y),
            Instruction::ShiftRight { x, y } => shr(state, x, y, quirks),
            Instruction::SubN { x, y } => subn(state, x, y),
            Instruction::ShiftLeft { x, y } => shl(state, x, y, quirks),
            Instruction::SkipRegNe { x, y } => skrne(state, x, y),
            Instruction::LoadIndex { nnn } => loadi(state, nnn),
            Instruction::JumpOffset { nnn } => jumpi(state, nnn, quirks),
            Instruction::Random { x, nn } => rand(state, x, nn),
            Instruction::Draw { x, y, n } => draw(state, x, y, n, quirks),
            Instruction::SkipPressed { x } => skpr(state, x, keys),
            Instruction::SkipNotPressed { x } => skup(state, x, keys),
            Instruction::ReadDelay { x } => moved(state, x),
            Instruction::WaitKey { x } => keyd(state, x),
            Instruction::SetDelay { x } => loads(state, x),
            Instruction::SetSound { x } => ld(state, x),
            Instruction::AddIndex { x } => addi(state, x, quirks),
            Instruction::LoadGlyph { x } => ldspr(state, x),
            Instruction::Bcd { x } => bcd(state, x),
            Instruction::Store { x } => stor(state, x, quirks),
            Instruction::Restore { x } => read(state, x, quirks),
        };
        Ok(next)
    }
}

fn stack_fault(result: Result<State>, state: &State, config: &Config) -> Result<State> {
    match (result, config.stack_policy) {
        (Err(e), StackPolicy::Lenient) => {
            log::warn!("{}; skipping instruction", e);
            Ok(*state)
        }
        (result, _) => result,
    }
}

impl Instruction {
    /// Mnemonic for the instruction as it executes under `quirks`
    pub fn mnemonic<'a>(&'a self, quirks: &'a Quirks) -> Mnemonic<'a> {
        Mnemonic {
            instruction: self,
            quirks,
        }
    }
}

pub struct Mnemonic<'a> {
    instruction: &'a Instruction,
    quirks: &'a Quirks,
}

impl fmt::Display for Mnemonic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.instruction {
            Instruction::JumpOffset { nnn } if self.quirks.jump_uses_vx => {
                write!(f, "JP V{:X}, {:#05X}", nnn >> 8, nnn)
            }
            instruction => write!(f, "{}", instruction),
        }
    }
}

/// Conventional Chip-8 assembly mnemonics, with BNNN read as a jump from V0
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Cls => write!(f, "CLS"),
            Instruction::Ret => write!(f, "RET"),
            Instruction::Sys { nnn } => write!(f, "SYS {:#05X}", nnn),
            Instruction::Jump { nnn } => write!(f, "JP {:#05X}", nnn),
            Instruction::Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            Instruction::SkipEq { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            Instruction::SkipNe { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            Instruction::SkipRegEq { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::Load { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            Instruction::Add { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Instruction::Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            Instruction::SubN { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            Instruction::SkipRegNe { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::LoadIndex { nnn } => write!(f, "LD I, {:#05X}", nnn),
            Instruction::JumpOffset { nnn } => write!(f, "JP V0, {:#05X}", nnn),
            Instruction::Random { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Instruction::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {:#X}", x, y, n),
            Instruction::SkipPressed { x } => write!(f, "SKP V{:X}", x),
            Instruction::SkipNotPressed { x } => write!(f, "SKNP V{:X}", x),
            Instruction::ReadDelay { x } => write!(f, "LD V{:X}, DT", x),
            Instruction::WaitKey { x } => write!(f, "LD V{:X}, K", x),
            Instruction::SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            Instruction::SetSound { x } => write!(f, "LD ST, V{:X}", x),
            Instruction::AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            Instruction::LoadGlyph { x } => write!(f, "LD F, V{:X}", x),
            Instruction::Bcd { x } => write!(f, "LD B, V{:X}", x),
            Instruction::Store { x } => write!(f, "LD [I], V{:X}", x),
            Instruction::Restore { x } => write!(f, "LD V{:X}, [I]", x),
            Instruction::Unknown(op) => write!(f, "??? {:04X}", op),
        }
    }
}
