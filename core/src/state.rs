use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SET, FONT_START, KEY_COUNT, MEMORY_SIZE,
    PROGRAM_START, REGISTER_COUNT, STACK_DEPTH,
};

/// The FrameBuffer is indexed as [y][x]; every pixel is either 0 or 1.
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// The Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, always pointing inside the 12-bit address space
///
/// Pointer
/// - (sp) the number of occupied stack slots
///
/// Timers
/// - 2 8-bit timers (delay & sound)
/// - a tone plays while the sound timer is non-zero
///
/// ## Memory
/// - 16 slot stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x200 is reserved, with the font at 0x050
///     - 0x200.. is where roms are loaded
/// - 64x32 frame buffer
///
/// ## Input
/// - the pressed status of keys 0..F
/// - `awaiting_key` holds the register that Fx0A will write once any key is held
///
/// ## Randomness
/// - each state owns its own generator so that separate machines never share a sequence
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub stack: [u16; STACK_DEPTH],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keypad: [bool; KEY_COUNT],
    pub awaiting_key: Option<usize>,
    pub rng: StdRng,
}

impl State {
    /// A fresh machine with its generator seeded from the system clock.
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    /// A fresh machine whose random byte sequence is fully determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        memory[font..font + FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            delay_timer: 0,
            sound_timer: 0,
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            keypad: [false; KEY_COUNT],
            awaiting_key: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reads the byte at `address`, wrapping around the end of memory.
    pub fn read(&self, address: u16) -> u8 {
        self.memory[(address & ADDRESS_MASK) as usize]
    }

    /// Writes the byte at `address`, wrapping around the end of memory.
    pub fn write(&mut self, address: u16, value: u8) {
        self.memory[(address & ADDRESS_MASK) as usize] = value;
    }

    /// Moves the pc past the next instruction.
    pub fn skip_next(&mut self) {
        self.pc = self.pc.wrapping_add(0x2) & ADDRESS_MASK;
    }

    /// The address of the instruction being executed; the pc is advanced before dispatch.
    pub fn instruction_address(&self) -> u16 {
        self.pc.wrapping_sub(0x2) & ADDRESS_MASK
    }

    pub fn any_key_pressed(&self) -> bool {
        self.keypad.iter().any(|&pressed| pressed)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
