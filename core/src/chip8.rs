use std::io::Read;

use crate::constants::{KEY_COUNT, MAX_PROGRAM_SIZE, PROGRAM_START};
use crate::error::{Fault, LoadError};
use crate::framebuffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::operations::execute;
use crate::state::State;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current CPU and memory `state`
///  - the `frame_buffer` sprites are drawn to
///  - the `keypad` with public interfaces for pressing and releasing keys
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU one instruction at a time
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
///
/// The driver decides how many steps to run per timer tick; nothing here keeps time.
pub struct Chip8 {
    state: State,
    frame_buffer: FrameBuffer,
    keypad: Keypad,
    loaded: bool,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            frame_buffer: FrameBuffer::new(),
            keypad: Keypad::new(),
            loaded: false,
        }
    }

    /// Returns the machine to its power-on state, unloading any ROM.
    pub fn reset(&mut self) {
        *self = Self::new();
        tracing::debug!("Reset");
    }

    /// Copies `rom` into memory at 0x200.
    ///
    /// The machine is reset first, so a failed load always leaves it with no program.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        self.reset();
        if rom.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                len: rom.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        self.state.memory[PROGRAM_START..PROGRAM_START + rom.len()].copy_from_slice(rom);
        self.loaded = true;
        tracing::debug!("Loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Reads a whole ROM from `reader` and loads it.
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        let mut rom = Vec::with_capacity(MAX_PROGRAM_SIZE);
        // Read one byte past the limit so oversized ROMs are detected without reading them whole
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut rom)?;
        self.load_rom(&rom)
    }

    /// Advances the CPU by a single instruction
    /// - does nothing while awaiting a keypress
    /// - gets, decodes and executes the next opcode
    pub fn step(&mut self) -> Result<(), Fault> {
        if !self.loaded {
            return Err(Fault::NoProgram);
        }
        if self.state.awaiting_key.is_some() {
            return Ok(());
        }

        let op = self.state.fetch();
        let instruction = Instruction::decode(op);
        tracing::trace!(
            "{:#05X} {:04X} {:<16} v{:02X?} i{:03X}",
            self.state.pc,
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i
        );

        execute(
            instruction,
            &mut self.state,
            &mut self.frame_buffer,
            &self.keypad,
        )
        .map_err(|fault| {
            tracing::warn!("{}", fault);
            fault
        })
    }

    /// Counts the delay and sound timers down; call at 60Hz regardless of instruction rate.
    pub fn tick_timers(&mut self) {
        self.state.tick_timers();
    }

    /// Set the pressed status of key
    ///
    /// If the CPU is waiting on a key, `key` is stored in the waiting register and execution
    /// resumes with the instruction after the wait.
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        if usize::from(key) >= KEY_COUNT {
            return;
        }
        self.keypad.press(key);
        if let Some(register) = self.state.awaiting_key.take() {
            self.state.v[register as usize] = key;
            self.state.advance();
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    /// The register waiting on a key press, if the CPU is blocked on one.
    pub fn awaiting_key(&self) -> Option<u8> {
        self.state.awaiting_key
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.frame_buffer.take_dirty() {
            Some(&self.frame_buffer)
        } else {
            None
        }
    }

    /// Whether the sound timer is running; the buzzer should sound while it is.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
