use crate::opcode::Opcode;
use crate::operations::*;

/// Operations selected by the family nibble alone.
/// Families that need a second look at the opcode are resolved in `from_op`.
const FAMILIES: [Option<Operation>; 16] = [
    None,
    Some(jump as Operation),
    Some(call as Operation),
    Some(ske as Operation),
    Some(skne as Operation),
    None,
    Some(load as Operation),
    Some(add as Operation),
    None,
    None,
    Some(loadi as Operation),
    Some(jumpi as Operation),
    Some(rand as Operation),
    Some(draw as Operation),
    None,
    None,
];

/// Register to register operations of the 0x8 family, indexed by their last nibble.
const REGISTER_OPS: [Option<Operation>; 16] = [
    Some(mv as Operation),
    Some(or as Operation),
    Some(and as Operation),
    Some(xor as Operation),
    Some(addr as Operation),
    Some(sub as Operation),
    Some(shr as Operation),
    Some(subn as Operation),
    None,
    None,
    None,
    None,
    None,
    None,
    Some(shl as Operation),
    None,
];

/// Selects the correct Operation for a given Opcode.
/// Returns None for encodings that aren't part of the instruction set.
pub fn from_op(op: Opcode) -> Option<Operation> {
    match op.family() {
        0x0 => match op.addr() {
            0x0E0 => Some(clr as Operation),
            0x0EE => Some(rts as Operation),
            _ => None,
        },
        0x5 if op.nibble() == 0x0 => Some(skre as Operation),
        0x8 => REGISTER_OPS[op.nibble() as usize],
        0x9 if op.nibble() == 0x0 => Some(skrne as Operation),
        0xE => match op.byte() {
            0x9E => Some(skpr as Operation),
            0xA1 => Some(skup as Operation),
            _ => None,
        },
        0xF => match op.byte() {
            0x07 => Some(moved as Operation),
            0x0A => Some(keyd as Operation),
            0x15 => Some(loads as Operation),
            0x18 => Some(ld as Operation),
            0x1E => Some(addi as Operation),
            0x29 => Some(ldspr as Operation),
            0x33 => Some(bcd as Operation),
            0x55 => Some(stor as Operation),
            0x65 => Some(read as Operation),
            _ => None,
        },
        family => FAMILIES[family],
    }
}

#[cfg(test)]
mod test_instruction {
    use super::*;
    use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
    use crate::error::Chip8Error;
    use crate::state::State;
    use rstest::rstest;

    /// Runs `op` as if it had just been fetched from the pc.
    fn execute(state: &mut State, op: u16) -> Result<(), Chip8Error> {
        let op = Opcode::new(op);
        state.pc += 0x2;
        let operation = from_op(op).expect("opcode should be recognized");
        operation(op, state)
    }

    #[rstest]
    #[case(0x0000)]
    #[case(0x0123)]
    #[case(0x00E1)]
    #[case(0x5121)]
    #[case(0x8128)]
    #[case(0x812F)]
    #[case(0x9121)]
    #[case(0xE19F)]
    #[case(0xF1FF)]
    #[case(0xF156)]
    fn test_unrecognized_opcodes(#[case] op: u16) {
        assert!(from_op(Opcode::new(op)).is_none());
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = State::with_seed(0);
        state.frame_buffer[0][0] = 1;
        execute(&mut state, 0x00E0).unwrap();
        assert_eq!(state.frame_buffer[0][0], 0);
        assert!(state.draw_flag);
    }

    #[test]
    fn test_00ee_ret() {
        let mut state = State::with_seed(0);
        state.sp = 0x1;
        state.stack[0] = 0x0ABC;
        execute(&mut state, 0x00EE).unwrap();
        assert_eq!(state.sp, 0x0);
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_00ee_ret_underflows() {
        let mut state = State::with_seed(0);
        let result = execute(&mut state, 0x00EE);
        assert!(matches!(
            result,
            Err(Chip8Error::StackUnderflow { address: 0x200 })
        ));
        assert_eq!(state.sp, 0x0);
    }

    #[test]
    fn test_1nnn_jp() {
        let mut state = State::with_seed(0);
        execute(&mut state, 0x1ABC).unwrap();
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_2nnn_call() {
        let mut state = State::with_seed(0);
        state.pc = 0x0ABC;
        execute(&mut state, 0x2123).unwrap();
        assert_eq!(state.sp, 0x1);
        assert_eq!(state.stack[0], 0x0ABE);
        assert_eq!(state.pc, 0x0123);
    }

    #[test]
    fn test_2nnn_call_overflows() {
        let mut state = State::with_seed(0);
        state.sp = 16;
        let stack = state.stack;
        let result = execute(&mut state, 0x2123);
        assert!(matches!(
            result,
            Err(Chip8Error::StackOverflow { address: 0x200 })
        ));
        assert_eq!(state.sp, 16);
        assert_eq!(state.stack, stack);
    }

    #[rstest]
    #[case::se_skips(0x3111, 0x11, 0x00, 0x0204)]
    #[case::se_doesnt_skip(0x3111, 0x00, 0x00, 0x0202)]
    #[case::sne_skips(0x4111, 0x00, 0x00, 0x0204)]
    #[case::sne_doesnt_skip(0x4111, 0x11, 0x00, 0x0202)]
    #[case::se_reg_skips(0x5120, 0x11, 0x11, 0x0204)]
    #[case::se_reg_doesnt_skip(0x5120, 0x11, 0x00, 0x0202)]
    #[case::sne_reg_skips(0x9120, 0x11, 0x00, 0x0204)]
    #[case::sne_reg_doesnt_skip(0x9120, 0x11, 0x11, 0x0202)]
    fn test_conditional_skips(#[case] op: u16, #[case] v1: u8, #[case] v2: u8, #[case] pc: u16) {
        let mut state = State::with_seed(0);
        state.v[0x1] = v1;
        state.v[0x2] = v2;
        execute(&mut state, op).unwrap();
        assert_eq!(state.pc, pc);
    }

    #[test]
    fn test_6xkk_ld() {
        let mut state = State::with_seed(0);
        execute(&mut state, 0x6122).unwrap();
        assert_eq!(state.v[0x1], 0x22);
    }

    #[test]
    fn test_7xkk_add() {
        let mut state = State::with_seed(0);
        state.v[0x1] = 0x1;
        execute(&mut state, 0x7122).unwrap();
        assert_eq!(state.v[0x1], 0x23);
    }

    #[test]
    fn test_7xkk_add_wraps_without_carry() {
        let mut state = State::with_seed(0);
        state.v[0x1] = 0xFF;
        execute(&mut state, 0x7102).unwrap();
        assert_eq!(state.v[0x1], 0x01);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = State::with_seed(0);
        state.v[0x2] = 0x1;
        execute(&mut state, 0x8120).unwrap();
        assert_eq!(state.v[0x1], 0x1);
    }

    #[rstest]
    #[case::or(0x8121, 0x7)]
    #[case::and(0x8122, 0x2)]
    #[case::xor(0x8123, 0x5)]
    fn test_8xy_bitwise_writes_back_to_vx(#[case] op: u16, #[case] expected: u8) {
        let mut state = State::with_seed(0);
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        execute(&mut state, op).unwrap();
        assert_eq!(state.v[0x1], expected);
        assert_eq!(state.v[0x2], 0x3);
    }

    #[rstest]
    #[case::add_nocarry(0x8124, 0xEE, 0x11, 0xFF, 0x0)]
    #[case::add_carry(0x8124, 0xFF, 0x01, 0x00, 0x1)]
    #[case::sub_noborrow(0x8125, 0x33, 0x11, 0x22, 0x1)]
    #[case::sub_equal(0x8125, 0x11, 0x11, 0x00, 0x1)]
    #[case::sub_borrow(0x8125, 0x05, 0x0A, 0xFB, 0x0)]
    #[case::subn_noborrow(0x8127, 0x11, 0x33, 0x22, 0x1)]
    #[case::subn_borrow(0x8127, 0x12, 0x11, 0xFF, 0x0)]
    fn test_8xy_arithmetic_sets_flag(
        #[case] op: u16,
        #[case] vx: u8,
        #[case] vy: u8,
        #[case] result: u8,
        #[case] flag: u8,
    ) {
        let mut state = State::with_seed(0);
        state.v[0x1] = vx;
        state.v[0x2] = vy;
        execute(&mut state, op).unwrap();
        assert_eq!(state.v[0x1], result);
        assert_eq!(state.v[0xF], flag);
    }

    #[rstest]
    #[case::shr_lsb(0x8106, 0x5, 0x2, 0x1)]
    #[case::shr_nolsb(0x8106, 0x4, 0x2, 0x0)]
    #[case::shl_msb(0x810E, 0xFF, 0xFE, 0x1)]
    #[case::shl_nomsb(0x810E, 0x4, 0x8, 0x0)]
    fn test_8xy_shifts_vx(#[case] op: u16, #[case] vx: u8, #[case] result: u8, #[case] flag: u8) {
        let mut state = State::with_seed(0);
        state.v[0x1] = vx;
        // Vy is ignored
        state.v[0x0] = 0xAA;
        execute(&mut state, op).unwrap();
        assert_eq!(state.v[0x1], result);
        assert_eq!(state.v[0xF], flag);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = State::with_seed(0);
        execute(&mut state, 0xAABC).unwrap();
        assert_eq!(state.i, 0xABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = State::with_seed(0);
        state.v[0x0] = 0x2;
        execute(&mut state, 0xBABC).unwrap();
        assert_eq!(state.pc, 0xABE);
    }

    #[test]
    fn test_bnnn_jp_wraps() {
        let mut state = State::with_seed(0);
        state.v[0x0] = 0x2;
        execute(&mut state, 0xBFFF).unwrap();
        assert_eq!(state.pc, 0x001);
    }

    #[test]
    fn test_cxkk_rnd_masks() {
        let mut state = State::with_seed(7);
        for _ in 0..32 {
            execute(&mut state, 0xC10F).unwrap();
            assert_eq!(state.v[0x1] & 0xF0, 0x0);
        }
        execute(&mut state, 0xC100).unwrap();
        assert_eq!(state.v[0x1], 0x0);
    }

    #[test]
    fn test_cxkk_rnd_is_reproducible_per_seed() {
        let mut first = State::with_seed(42);
        let mut second = State::with_seed(42);
        let mut drawn = Vec::new();
        for _ in 0..8 {
            execute(&mut first, 0xC1FF).unwrap();
            execute(&mut second, 0xC1FF).unwrap();
            assert_eq!(first.v[0x1], second.v[0x1]);
            drawn.push(first.v[0x1]);
        }
        assert!(drawn.iter().any(|&byte| byte != drawn[0]));
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut state = State::with_seed(0);
        state.v[0x0] = 0x1;
        // Draw the 0x0 glyph with a 1x 1y offset
        state.i = 0x050;
        execute(&mut state, 0xD005).unwrap();
        let mut expected = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        expected[1][1..5].copy_from_slice(&[1, 1, 1, 1]);
        expected[2][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[3][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[4][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[5][1..5].copy_from_slice(&[1, 1, 1, 1]);
        assert_eq!(state.frame_buffer, expected);
        assert_eq!(state.v[0xF], 0x0);
        assert!(state.draw_flag);
    }

    #[test]
    fn test_dxyn_drw_collides() {
        let mut state = State::with_seed(0);
        state.i = 0x050;
        state.frame_buffer[0][0] = 1;
        execute(&mut state, 0xD001).unwrap();
        assert_eq!(state.v[0xF], 0x1);
        assert_eq!(state.frame_buffer[0][0], 0);
    }

    #[test]
    fn test_dxyn_drw_xors() {
        let mut state = State::with_seed(0);
        state.i = 0x300;
        state.memory[0x300] = 0b1100_0000;
        state.v[0x1] = 0x2;
        // 0 1 0 1 -> Set
        state.frame_buffer[0][2..6].copy_from_slice(&[0, 1, 0, 1]);
        // 1 1 0 0 -> Draw xor
        execute(&mut state, 0xD101).unwrap();
        assert_eq!(state.frame_buffer[0][2..6], [1, 0, 0, 1]);
    }

    #[test]
    fn test_dxyn_drw_wraps_around_edges() {
        let mut state = State::with_seed(0);
        state.i = 0x300;
        state.memory[0x300..0x302].copy_from_slice(&[0xFF, 0xFF]);
        state.v[0x1] = 62;
        state.v[0x2] = 31;
        execute(&mut state, 0xD122).unwrap();
        assert_eq!(state.frame_buffer[31][62..64], [1, 1]);
        assert_eq!(state.frame_buffer[31][0..6], [1, 1, 1, 1, 1, 1]);
        assert_eq!(state.frame_buffer[0][62..64], [1, 1]);
        assert_eq!(state.frame_buffer[0][0..6], [1, 1, 1, 1, 1, 1]);
        assert_eq!(state.frame_buffer[1][0], 0);
    }

    #[test]
    fn test_dxyn_drw_origin_is_modulo_screen() {
        let mut state = State::with_seed(0);
        state.i = 0x300;
        state.memory[0x300] = 0x80;
        state.v[0x1] = 64 + 3;
        state.v[0x2] = 32 + 4;
        execute(&mut state, 0xD121).unwrap();
        assert_eq!(state.frame_buffer[4][3], 1);
    }

    #[rstest]
    #[case::skp_skips(0xE19E, true, 0x0204)]
    #[case::skp_doesnt_skip(0xE19E, false, 0x0202)]
    #[case::sknp_skips(0xE1A1, false, 0x0204)]
    #[case::sknp_doesnt_skip(0xE1A1, true, 0x0202)]
    fn test_key_skips(#[case] op: u16, #[case] pressed: bool, #[case] pc: u16) {
        let mut state = State::with_seed(0);
        state.keypad[0xE] = pressed;
        state.v[0x1] = 0xE;
        execute(&mut state, op).unwrap();
        assert_eq!(state.pc, pc);
    }

    #[test]
    fn test_fx07_ld() {
        let mut state = State::with_seed(0);
        state.delay_timer = 0xF;
        execute(&mut state, 0xF107).unwrap();
        assert_eq!(state.v[0x1], 0xF);
    }

    #[test]
    fn test_fx0a_ld_waits_without_key() {
        let mut state = State::with_seed(0);
        execute(&mut state, 0xF10A).unwrap();
        assert_eq!(state.awaiting_key, Some(0x1));
        assert_eq!(state.pc, 0x0200);
    }

    #[test]
    fn test_fx0a_ld_takes_held_key() {
        let mut state = State::with_seed(0);
        state.awaiting_key = Some(0x1);
        state.keypad[0x7] = true;
        state.keypad[0xC] = true;
        execute(&mut state, 0xF10A).unwrap();
        assert_eq!(state.awaiting_key, None);
        assert_eq!(state.v[0x1], 0x7);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_fx15_ld() {
        let mut state = State::with_seed(0);
        state.v[0x1] = 0xF;
        execute(&mut state, 0xF115).unwrap();
        assert_eq!(state.delay_timer, 0xF);
    }

    #[test]
    fn test_fx18_ld() {
        let mut state = State::with_seed(0);
        state.v[0x1] = 0xF;
        execute(&mut state, 0xF118).unwrap();
        assert_eq!(state.sound_timer, 0xF);
    }

    #[test]
    fn test_fx1e_add() {
        let mut state = State::with_seed(0);
        state.i = 0x1;
        state.v[0x1] = 0x1;
        execute(&mut state, 0xF11E).unwrap();
        assert_eq!(state.i, 0x2);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_fx1e_add_wraps() {
        let mut state = State::with_seed(0);
        state.i = 0xFFF;
        state.v[0x1] = 0x2;
        execute(&mut state, 0xF11E).unwrap();
        assert_eq!(state.i, 0x001);
    }

    #[test]
    fn test_fx29_ld() {
        let mut state = State::with_seed(0);
        state.v[0x1] = 0x2;
        execute(&mut state, 0xF129).unwrap();
        assert_eq!(state.i, 0x05A);
    }

    #[test]
    fn test_fx33_ld() {
        let mut state = State::with_seed(0);
        state.v[0x1] = 156;
        state.i = 0x300;
        execute(&mut state, 0xF133).unwrap();
        assert_eq!(state.memory[0x300..0x303], [0x1, 0x5, 0x6]);
    }

    #[test]
    fn test_fx_55_ld() {
        let mut state = State::with_seed(0);
        state.i = 0x300;
        state.v[0x0..0x5].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        state.v[0x5] = 0x6;
        execute(&mut state, 0xF455).unwrap();
        assert_eq!(state.memory[0x300..0x306], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx_65_ld() {
        let mut state = State::with_seed(0);
        state.i = 0x300;
        state.memory[0x300..0x306].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5, 0x6]);
        execute(&mut state, 0xF465).unwrap();
        assert_eq!(state.v[0x0..0x6], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.i, 0x300);
    }
}
