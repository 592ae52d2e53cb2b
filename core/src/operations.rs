//! Instruction semantics.
//!
//! Each operation is a pure transition from one `State` to the next. The program counter has
//! already been advanced past the instruction by the time an operation runs, so skips add a
//! further 2 and calls push the address of the following instruction.

use crate::config::Quirks;
use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG, GLYPH_HEIGHT};
use crate::error::{Error, Result};
use crate::keypad::Keypad;
use crate::state::State;

/// Address of the instruction being executed
fn current_pc(state: &State) -> u16 {
    state.pc.wrapping_sub(0x2)
}

fn skip_if(state: &State, condition: bool) -> State {
    let pc = if condition {
        state.pc.wrapping_add(0x2)
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// clear
pub fn cls(state: &State) -> State {
    let mut frame_buffer = state.frame_buffer;
    frame_buffer.clear();
    State {
        frame_buffer,
        draw_flag: true,
        ..*state
    }
}

/// PC = STACK.pop()
pub fn rts(state: &State) -> Result<State> {
    let mut stack = state.stack;
    let pc = stack.pop().ok_or(Error::StackUnderflow {
        pc: current_pc(state),
    })?;
    Ok(State { pc, stack, ..*state })
}

/// PC = nnn
pub fn jump(state: &State, nnn: u16) -> State {
    State { pc: nnn, ..*state }
}

/// STACK.push(PC); PC = nnn
pub fn call(state: &State, nnn: u16) -> Result<State> {
    let mut stack = state.stack;
    if !stack.push(state.pc) {
        return Err(Error::StackOverflow {
            pc: current_pc(state),
            depth: stack.capacity(),
        });
    }
    Ok(State {
        pc: nnn,
        stack,
        ..*state
    })
}

/// if Vx == nn then pc += 2
pub fn ske(state: &State, x: u8, nn: u8) -> State {
    skip_if(state, state.v[x as usize] == nn)
}

/// if Vx != nn then pc += 2
pub fn skne(state: &State, x: u8, nn: u8) -> State {
    skip_if(state, state.v[x as usize] != nn)
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &State, x: u8, y: u8) -> State {
    skip_if(state, state.v[x as usize] == state.v[y as usize])
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &State, x: u8, y: u8) -> State {
    skip_if(state, state.v[x as usize] != state.v[y as usize])
}

/// Vx = nn
pub fn load(state: &State, x: u8, nn: u8) -> State {
    let mut v = state.v;
    v[x as usize] = nn;
    State { v, ..*state }
}

/// Vx += nn
/// Add nn to Vx; allow for overflow but implicitly drop it. VF is untouched.
pub fn add(state: &State, x: u8, nn: u8) -> State {
    let mut v = state.v;
    v[x as usize] = v[x as usize].wrapping_add(nn);
    State { v, ..*state }
}

/// Vx = Vy
pub fn mv(state: &State, x: u8, y: u8) -> State {
    let mut v = state.v;
    v[x as usize] = v[y as usize];
    State { v, ..*state }
}

fn logic(state: &State, x: u8, y: u8, quirks: &Quirks, op: fn(u8, u8) -> u8) -> State {
    let mut v = state.v;
    v[x as usize] = op(v[x as usize], v[y as usize]);
    if quirks.reset_flag_on_logic_ops {
        v[FLAG] = 0x0;
    }
    State { v, ..*state }
}

/// Vx |= Vy
pub fn or(state: &State, x: u8, y: u8, quirks: &Quirks) -> State {
    logic(state, x, y, quirks, |a, b| a | b)
}

/// Vx &= Vy
pub fn and(state: &State, x: u8, y: u8, quirks: &Quirks) -> State {
    logic(state, x, y, quirks, |a, b| a & b)
}

/// Vx ^= Vy
pub fn xor(state: &State, x: u8, y: u8, quirks: &Quirks) -> State {
    logic(state, x, y, quirks, |a, b| a ^ b)
}

/// Vx += Vy; VF = overflow
pub fn addr(state: &State, x: u8, y: u8) -> State {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[FLAG] = if over { 0x1 } else { 0x0 };
    State { v, ..*state }
}

/// Vx -= Vy; VF = !underflow
pub fn sub(state: &State, x: u8, y: u8) -> State {
    let (res, under) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[FLAG] = if under { 0x0 } else { 0x1 };
    State { v, ..*state }
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(state: &State, x: u8, y: u8) -> State {
    let (res, under) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[FLAG] = if under { 0x0 } else { 0x1 };
    State { v, ..*state }
}

/// The value a shift operates on: Vy under the legacy quirk, otherwise Vx
fn shift_source(state: &State, x: u8, y: u8, quirks: &Quirks) -> u8 {
    if quirks.shift_legacy {
        state.v[y as usize]
    } else {
        state.v[x as usize]
    }
}

/// Vx >>= 1; VF = bit shifted out
/// When x is F the flag wins and VF is left holding the shifted out bit.
pub fn shr(state: &State, x: u8, y: u8, quirks: &Quirks) -> State {
    let value = shift_source(state, x, y, quirks);
    let mut v = state.v;
    v[x as usize] = value >> 1;
    v[FLAG] = value & 0x1;
    State { v, ..*state }
}

/// Vx <<= 1; VF = bit shifted out
/// When x is F the flag wins and VF is left holding the shifted out bit.
pub fn shl(state: &State, x: u8, y: u8, quirks: &Quirks) -> State {
    let value = shift_source(state, x, y, quirks);
    let mut v = state.v;
    v[x as usize] = value << 1;
    v[FLAG] = value >> 7;
    State { v, ..*state }
}

/// I = nnn
pub fn loadi(state: &State, nnn: u16) -> State {
    State { i: nnn, ..*state }
}

/// PC = V0 + nnn, or Vx + nnn under the jump quirk
pub fn jumpi(state: &State, nnn: u16, quirks: &Quirks) -> State {
    let register = if quirks.jump_uses_vx {
        (nnn >> 8) as usize
    } else {
        0x0
    };
    State {
        pc: nnn + u16::from(state.v[register]),
        ..*state
    }
}

/// Vx = rand_byte & nn
pub fn rand(state: &State, x: u8, nn: u8) -> State {
    let rand_byte: u8 = rand::random();
    let mut v = state.v;
    v[x as usize] = rand_byte & nn;
    State { v, ..*state }
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs an 8 pixel wide sprite from memory I..I+n onto the FrameBuffer at (Vx, Vy).
///
/// The starting position wraps around the screen. Pixels falling off the right or bottom edge
/// are clipped, or wrapped when sprite clipping is disabled.
/// Sets VF if any pixels were erased.
pub fn draw(state: &State, x: u8, y: u8, n: u8, quirks: &Quirks) -> State {
    let mut frame_buffer = state.frame_buffer;
    let mut collision = false;

    let origin_x = state.v[x as usize] as usize & (DISPLAY_WIDTH - 1);
    let origin_y = state.v[y as usize] as usize & (DISPLAY_HEIGHT - 1);

    for row in 0..n as usize {
        let mut py = origin_y + row;
        if py >= DISPLAY_HEIGHT {
            if quirks.clip_sprites {
                break;
            }
            py %= DISPLAY_HEIGHT;
        }

        let sprite = state.read_byte(state.i.wrapping_add(row as u16));
        for bit in 0..8 {
            if sprite & (0x80 >> bit) == 0 {
                continue;
            }
            let mut px = origin_x + bit;
            if px >= DISPLAY_WIDTH {
                if quirks.clip_sprites {
                    break;
                }
                px %= DISPLAY_WIDTH;
            }
            collision |= frame_buffer.toggle(px, py);
        }
    }

    let mut v = state.v;
    v[FLAG] = if collision { 0x1 } else { 0x0 };
    State {
        v,
        frame_buffer,
        draw_flag: true,
        ..*state
    }
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &State, x: u8, keys: &Keypad) -> State {
    skip_if(state, keys.is_held(state.v[x as usize]))
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &State, x: u8, keys: &Keypad) -> State {
    skip_if(state, !keys.is_held(state.v[x as usize]))
}

/// Vx = DT
pub fn moved(state: &State, x: u8) -> State {
    let mut v = state.v;
    v[x as usize] = state.delay_timer;
    State { v, ..*state }
}

/// await keypress for Vx
pub fn keyd(state: &State, x: u8) -> State {
    State {
        register_needing_key: Some(x),
        ..*state
    }
}

/// DT = Vx
pub fn loads(state: &State, x: u8) -> State {
    State {
        delay_timer: state.v[x as usize],
        ..*state
    }
}

/// ST = Vx
pub fn ld(state: &State, x: u8) -> State {
    State {
        sound_timer: state.v[x as usize],
        ..*state
    }
}

/// I += Vx
/// VF is set when I moves past 0xFFF under the index overflow quirk and otherwise untouched.
pub fn addi(state: &State, x: u8, quirks: &Quirks) -> State {
    let i = state.i.wrapping_add(u16::from(state.v[x as usize]));
    let mut v = state.v;
    if quirks.index_overflow_sets_flag && i > 0x0FFF {
        v[FLAG] = 0x1;
    }
    State { i, v, ..*state }
}

/// I = Vx * 5
/// Set I to the memory address of the glyph for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &State, x: u8) -> State {
    State {
        i: u16::from(state.v[x as usize]) * GLYPH_HEIGHT,
        ..*state
    }
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address I
pub fn bcd(state: &State, x: u8) -> State {
    let value = state.v[x as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    let mut next = *state;
    for (offset, digit) in digits.iter().enumerate() {
        next.write_byte(state.i.wrapping_add(offset as u16), *digit);
    }
    next
}

/// Where I points after a register transfer of V0..=Vx
fn index_after_transfer(state: &State, x: u8, quirks: &Quirks) -> u16 {
    if quirks.increment_index_on_load_store {
        state.i.wrapping_add(u16::from(x) + 1)
    } else {
        state.i
    }
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &State, x: u8, quirks: &Quirks) -> State {
    let mut next = *state;
    for register in 0..=x {
        next.write_byte(
            state.i.wrapping_add(u16::from(register)),
            state.v[register as usize],
        );
    }
    next.i = index_after_transfer(state, x, quirks);
    next
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &State, x: u8, quirks: &Quirks) -> State {
    let mut v = state.v;
    for register in 0..=x {
        v[register as usize] = state.read_byte(state.i.wrapping_add(u16::from(register)));
    }
    State {
        v,
        i: index_after_transfer(state, x, quirks),
        ..*state
    }
}
