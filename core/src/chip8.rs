use std::io::Read;

use log::{debug, trace, warn};

use crate::constants::{ADDRESS_MASK, KEY_COUNT, MAX_ROM_SIZE, PROGRAM_START};
use crate::error::Chip8Error;
use crate::instruction::from_op;
use crate::opcode::Opcode;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks the current `state` and supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU by a single cycle
/// - advancing its timers, which the host should do at `TIMER_SPEED` regardless of clock speed
/// - inspecting its frame buffer for rendering by some display
/// - inspecting its sound timer for playing a tone
pub struct Chip8 {
    state: State,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
        }
    }

    /// A machine whose random numbers are determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Chip8 {
            state: State::with_seed(seed),
        }
    }

    /// Copy a rom into memory at the program start.
    ///
    /// # Arguments
    /// * `rom` the raw program bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                capacity: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        debug!("loaded {} byte rom at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> Result<(), Chip8Error> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_rom(&rom)
    }

    /// The current frame, regardless of whether it changed.
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if the display should be redrawn, clearing the draw flag
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, true);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.set_key(key, false);
    }

    fn set_key(&mut self, key: u8, pressed: bool) {
        match self.state.keypad.get_mut(usize::from(key)) {
            Some(slot) => *slot = pressed,
            None => warn!("ignoring key {:#X}; the keypad has {} keys", key, KEY_COUNT),
        }
    }

    /// Whether the CPU is suspended on Fx0A until a key is held.
    pub fn is_awaiting_key(&self) -> bool {
        self.state.awaiting_key.is_some()
    }

    /// Advances the CPU by a single cycle
    /// - breaks if awaiting a keypress and none is held
    /// - gets the next opcode and moves the pc past it
    /// - executes the opcode, skipping it if it isn't recognized
    pub fn execute_cycle(&mut self) -> Result<(), Chip8Error> {
        if self.state.awaiting_key.is_some() && !self.state.any_key_pressed() {
            return Ok(());
        }

        let op = self.get_op();
        trace!(
            "{} v{:02X?} i{:04X} pc{:04X} sp{}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc,
            self.state.sp
        );
        self.state.pc = self.state.pc.wrapping_add(0x2) & ADDRESS_MASK;

        match from_op(op) {
            Some(operation) => operation(op, &mut self.state),
            None => {
                warn!(
                    "skipping unrecognized opcode {} at {:#05X}",
                    op,
                    self.state.instruction_address()
                );
                Ok(())
            }
        }
    }

    /// Decrements the delay and sound timers towards 0
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// A tone should be playing while the sound timer is running.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Opcode {
        let pc = self.state.pc;
        Opcode::from_bytes(self.state.read(pc), self.state.read(pc.wrapping_add(1)))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
