use rand::Rng;

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, FONT_GLYPH_SIZE, FONT_START,
    STACK_DEPTH,
};
use crate::error::Chip8Error;
use crate::opcode::Opcode;
use crate::state::State;

/// Every operation receives its opcode and the state with the pc already advanced past it.
pub type Operation = fn(op: Opcode, state: &mut State) -> Result<(), Chip8Error>;

/// clear
pub fn clr(_op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    if state.sp == 0 {
        return Err(Chip8Error::StackUnderflow {
            address: state.instruction_address(),
        });
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp];
    Ok(())
}

/// PC = addr
pub fn jump(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.pc = op.addr();
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    if state.sp == STACK_DEPTH {
        return Err(Chip8Error::StackOverflow {
            address: state.instruction_address(),
        });
    }
    state.stack[state.sp] = state.pc;
    state.sp += 1;
    state.pc = op.addr();
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    if state.v[op.x()] == op.byte() {
        state.skip_next();
    }
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    if state.v[op.x()] != op.byte() {
        state.skip_next();
    }
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    if state.v[op.x()] == state.v[op.y()] {
        state.skip_next();
    }
    Ok(())
}

/// Vx = kk
pub fn load(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.v[op.x()] = op.byte();
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.byte());
    Ok(())
}

/// Vx = Vy
pub fn mv(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.v[op.x()] = state.v[op.y()];
    Ok(())
}

/// Vx |= Vy
pub fn or(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.v[op.x()] |= state.v[op.y()];
    Ok(())
}

/// Vx &= Vy
pub fn and(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.v[op.x()] &= state.v[op.y()];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.v[op.x()] ^= state.v[op.y()];
    Ok(())
}

/// Vx += Vy; VF = overflow
pub fn addr(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    let (res, over) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    state.v[op.x()] = res;
    // VF is written last so that it wins when it is also the destination
    state.v[FLAG_REGISTER] = u8::from(over);
    Ok(())
}

/// Vx -= Vy; VF = !underflow
pub fn sub(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    let (res, under) = state.v[op.x()].overflowing_sub(state.v[op.y()]);
    state.v[op.x()] = res;
    state.v[FLAG_REGISTER] = u8::from(!under);
    Ok(())
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    let lsb = state.v[op.x()] & 0x1;
    state.v[op.x()] >>= 1;
    state.v[FLAG_REGISTER] = lsb;
    Ok(())
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    let (res, under) = state.v[op.y()].overflowing_sub(state.v[op.x()]);
    state.v[op.x()] = res;
    state.v[FLAG_REGISTER] = u8::from(!under);
    Ok(())
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    let msb = state.v[op.x()] >> 7;
    state.v[op.x()] <<= 1;
    state.v[FLAG_REGISTER] = msb;
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    if state.v[op.x()] != state.v[op.y()] {
        state.skip_next();
    }
    Ok(())
}

/// I = addr
pub fn loadi(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.i = op.addr();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.pc = (op.addr() + u16::from(state.v[0x0])) & ADDRESS_MASK;
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    let rand_byte: u8 = state.rng.gen();
    state.v[op.x()] = rand_byte & op.byte();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    let origin_x = state.v[op.x()] as usize % DISPLAY_WIDTH;
    let origin_y = state.v[op.y()] as usize % DISPLAY_HEIGHT;
    let mut collision = 0x0;

    for row in 0..u16::from(op.nibble()) {
        let sprite_byte = state.read(state.i.wrapping_add(row));
        let y = (origin_y + row as usize) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let x = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel_value = (sprite_byte >> (7 - bit)) & 0x1;
            collision |= pixel_value & state.frame_buffer[y][x];
            state.frame_buffer[y][x] ^= pixel_value;
        }
    }

    state.v[FLAG_REGISTER] = collision;
    state.draw_flag = true;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    if state.keypad[usize::from(state.v[op.x()] & 0xF)] {
        state.skip_next();
    }
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    if !state.keypad[usize::from(state.v[op.x()] & 0xF)] {
        state.skip_next();
    }
    Ok(())
}

/// Vx = DT
pub fn moved(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.v[op.x()] = state.delay_timer;
    Ok(())
}

/// await keypress for Vx
/// Without a held key the pc is wound back so this instruction runs again once one is.
pub fn keyd(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    match state.keypad.iter().position(|&pressed| pressed) {
        Some(key) => {
            state.v[op.x()] = key as u8;
            state.awaiting_key = None;
        }
        None => {
            state.awaiting_key = Some(op.x());
            state.pc = state.instruction_address();
        }
    }
    Ok(())
}

/// DT = Vx
pub fn loads(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.delay_timer = state.v[op.x()];
    Ok(())
}

/// ST = Vx
pub fn ld(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.sound_timer = state.v[op.x()];
    Ok(())
}

/// I += Vx
pub fn addi(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x()])) & ADDRESS_MASK;
    Ok(())
}

/// I = FONT_START + Vx * 5
/// Set I to the memory address of the font glyph for Vx
/// See constants::FONT_SET for more details
pub fn ldspr(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    let offset = u16::from(state.v[op.x()]) * FONT_GLYPH_SIZE;
    state.i = (FONT_START + offset) & ADDRESS_MASK;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    let value = state.v[op.x()];
    let digits = [value / 100, value / 10 % 10, value % 10];
    for (offset, digit) in (0u16..).zip(digits.iter()) {
        state.write(state.i.wrapping_add(offset), *digit);
    }
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
/// I is left unchanged
pub fn stor(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    for register in 0..=op.x() {
        state.write(state.i.wrapping_add(register as u16), state.v[register]);
    }
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
/// I is left unchanged
pub fn read(op: Opcode, state: &mut State) -> Result<(), Chip8Error> {
    for register in 0..=op.x() {
        state.v[register] = state.read(state.i.wrapping_add(register as u16));
    }
    Ok(())
}
