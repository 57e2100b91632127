use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use log::{info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use display::Display;
use emu8_core::{Chip8, TIMER_SPEED};

use crate::audio::Beeper;
use crate::keymap::keymap;
use crate::Args;

pub fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut chip8: Chip8 = Chip8::new();

    // Load ROM
    let file = File::open(&args.rom)?;
    let mut reader = BufReader::new(file);
    chip8.load_rom_from(&mut reader)?;
    info!("loaded {}", args.rom.display());

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init()?;
    let mut display: Display = Display::new(&sdl, args.scale)?;
    let mut events = sdl.event_pump()?;
    let mut beeper = if args.mute {
        None
    } else {
        match Beeper::new(&sdl) {
            Ok(beeper) => Some(beeper),
            Err(e) => {
                warn!("continuing without sound: {}", e);
                None
            }
        }
    };

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / args.clock_speed.max(1);
    let timer_time = Duration::from_secs(1) / TIMER_SPEED;
    let mut last_cycle = Instant::now();
    let mut timer_debt = Duration::from_secs(0);

    // Whether or not the clock speed should be respected
    let mut fast_forward: bool = false;
    info!("running at {}Hz", args.clock_speed);

    'event: loop {
        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(frame)?;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        chip8.execute_cycle()?;

        // Handle timing; timers run at their own rate however fast the CPU is clocked
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        timer_debt += Instant::now() - last_cycle;
        last_cycle = Instant::now();
        while timer_debt >= timer_time {
            chip8.tick_timers();
            timer_debt -= timer_time;
        }

        if let Some(beeper) = beeper.as_mut() {
            beeper.set_playing(chip8.sound_active());
        }
    }

    info!("exiting");
    Ok(())
}
