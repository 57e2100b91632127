//! # emu8-core
//!
//! A CHIP-8 interpreter with no host dependencies.
//! Frontends drive it by loading a ROM, calling [`Chip8::execute_cycle`] at their chosen clock
//! speed and [`Chip8::tick_timers`] at [`constants::TIMER_SPEED`], and sampling the frame buffer.
pub use chip8::Chip8;
pub use constants::{CLOCK_SPEED, TIMER_SPEED};
pub use error::Chip8Error;
pub use opcode::Opcode;

mod chip8;
pub mod constants;
pub mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;
