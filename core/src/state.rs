use crate::constants::{
    ADDRESS_MASK, FONT_SET, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, STACK_DEPTH,
};
use crate::error::Fault;

/// The Chip-8 CPU and memory.
///
/// ## Registers
/// - (v) 16 8-bit registers (V0..VF)
///     - VF doubles as the carry, borrow and collision flag for the instructions that set it
/// - (i) a 16-bit memory address register
///
/// ## Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// ## Stack
/// - (stack) 16 return addresses
/// - (sp) the number of return addresses currently on the stack
///
/// ## Timers
/// - 2 8-bit timers (delay & sound) that count down to 0 at 60Hz
///
/// ## Memory
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the font set
///     - 0x200.. holds the loaded program
///
/// ## Input
/// - (awaiting_key) the register waiting for the next key press, if any; the CPU doesn't
///   execute anything until it's filled
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub awaiting_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START as u16,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            awaiting_key: None,
        }
    }

    /// Reads a byte, wrapping `addr` into the 4K address space.
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[usize::from(addr & ADDRESS_MASK)]
    }

    /// Writes a byte, wrapping `addr` into the 4K address space.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[usize::from(addr & ADDRESS_MASK)] = value;
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> u16 {
        u16::from(self.read(self.pc)) << 8 | u16::from(self.read(self.pc.wrapping_add(1)))
    }

    pub fn push(&mut self, addr: u16) -> Result<(), Fault> {
        let slot = self
            .stack
            .get_mut(self.sp as usize)
            .ok_or(Fault::StackOverflow { pc: self.pc })?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow { pc: self.pc });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Moves the pc on to the next instruction.
    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Moves the pc past the next instruction if `condition` holds, otherwise onto it.
    pub fn skip_if(&mut self, condition: bool) {
        self.pc = self.pc.wrapping_add(if condition { 4 } else { 2 });
    }

    /// Counts both timers down by one, stopping at 0.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
