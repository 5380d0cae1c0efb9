pub use chip8::Chip8;
pub use error::{Fault, LoadError};
pub use framebuffer::FrameBuffer;
pub use instruction::{decode_raw, disassemble, Instruction, Line, Operands};
pub use keypad::Keypad;
pub use state::State;
pub use table::Kind;

mod chip8;
pub mod constants;
mod error;
mod framebuffer;
mod instruction;
mod keypad;
mod operations;
pub mod state;
pub mod table;
