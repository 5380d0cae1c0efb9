use std::time::{Duration, Instant};

use anyhow::Context;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use emu8_core::Chip8;
use emu8_display::Display;

use crate::keymap::keymap;

/// Pacing for the frame loop.
#[derive(Clone, Copy, Debug)]
pub struct Timing {
    pub instructions_per_frame: u32,
    pub frame_duration: Duration,
}

/// Runs `chip8` in an SDL2 window until the window is closed, Escape is pressed or the CPU
/// faults.
///
/// Every frame:
/// - handles input
/// - executes `instructions_per_frame` instructions
/// - renders the frame if it changed
/// - ticks the timers once
/// - sleeps out the rest of `frame_duration` unless fast forwarding
pub fn run(mut chip8: Chip8, timing: Timing, scale: u32) -> anyhow::Result<()> {
    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init()
        .map_err(anyhow::Error::msg)
        .context("unable to initialise sdl2")?;
    let mut display: Display = Display::new(&sdl, scale)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    // Whether or not the frame pacing should be respected
    let mut fast_forward: bool = false;
    let mut last_frame: Instant = Instant::now();

    tracing::info!(
        "Running at {} instructions per {:?} frame",
        timing.instructions_per_frame,
        timing.frame_duration
    );

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => break 'event,
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
        for _ in 0..timing.instructions_per_frame {
            chip8.step().context("CPU fault")?;
        }

        // If anything was drawn, render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(frame)?;
        }

        chip8.tick_timers();

        // Handle timing
        let elapsed = last_frame.elapsed();
        if !fast_forward && timing.frame_duration > elapsed {
            std::thread::sleep(timing.frame_duration - elapsed);
        }
        last_frame = Instant::now();
    }

    tracing::info!("Window closed");
    Ok(())
}
