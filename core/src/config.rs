use serde::{Deserialize, Serialize};

/// # Quirks
/// Points on which historical Chip-8 interpreters disagree.
///
/// `Quirks::default()` follows modern interpreters. `Quirks::cosmac_vip()` follows the original
/// COSMAC VIP interpreter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quirks {
    /// 8XY6/8XYE copy Vy into Vx before shifting
    pub shift_legacy: bool,
    /// 8XY1/8XY2/8XY3 zero VF after the logic op
    pub reset_flag_on_logic_ops: bool,
    /// FX55/FX65 leave I pointing past the last register transferred
    pub increment_index_on_load_store: bool,
    /// BNNN jumps to NNN + Vx (x being the high nibble of NNN) instead of NNN + V0
    pub jump_uses_vx: bool,
    /// FX1E sets VF when I moves past 0xFFF
    pub index_overflow_sets_flag: bool,
    /// DXYN clips sprites at the screen edge instead of wrapping them around
    pub clip_sprites: bool,
}

impl Quirks {
    pub fn cosmac_vip() -> Self {
        Quirks {
            shift_legacy: true,
            reset_flag_on_logic_ops: true,
            increment_index_on_load_store: true,
            jump_uses_vx: false,
            index_overflow_sets_flag: true,
            clip_sprites: true,
        }
    }
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks {
            shift_legacy: false,
            reset_flag_on_logic_ops: false,
            increment_index_on_load_store: false,
            jump_uses_vx: false,
            index_overflow_sets_flag: true,
            clip_sprites: true,
        }
    }
}

/// Number of return addresses the call stack can hold
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StackDepth {
    Sixteen,
    ThirtyTwo,
}

impl StackDepth {
    pub fn slots(self) -> usize {
        match self {
            StackDepth::Sixteen => 16,
            StackDepth::ThirtyTwo => 32,
        }
    }
}

impl Default for StackDepth {
    fn default() -> Self {
        StackDepth::Sixteen
    }
}

impl TryFrom<u8> for StackDepth {
    type Error = String;

    fn try_from(slots: u8) -> Result<Self, Self::Error> {
        match slots {
            16 => Ok(StackDepth::Sixteen),
            32 => Ok(StackDepth::ThirtyTwo),
            other => Err(format!("stack depth must be 16 or 32, got {}", other)),
        }
    }
}

impl From<StackDepth> for u8 {
    fn from(depth: StackDepth) -> u8 {
        depth.slots() as u8
    }
}

/// What to do when a program calls past the stack's capacity or returns from an empty stack
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackPolicy {
    /// Stop with `Error::StackOverflow` / `Error::StackUnderflow`
    Strict,
    /// Log a warning and skip the offending instruction
    Lenient,
}

impl Default for StackPolicy {
    fn default() -> Self {
        StackPolicy::Strict
    }
}

/// # Config
/// Everything about the interpreter's behavior that is data rather than code.
///
/// Every field has a default so partial configuration files are accepted:
/// ```toml
/// stack_depth = 32
/// stack_policy = "lenient"
///
/// [quirks]
/// shift_legacy = true
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub quirks: Quirks,
    pub stack_depth: StackDepth,
    pub stack_policy: StackPolicy,
}
