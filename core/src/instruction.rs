use std::fmt;

use crate::table::{Kind, Operand, INSTRUCTIONS};

/// Operand values pulled out of an opcode, in table order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operands {
    values: [u16; 3],
    len: usize,
}

impl Operands {
    fn extract(opcode: u16, descriptors: &[Operand]) -> Self {
        let mut operands = Operands::default();
        for (slot, descriptor) in operands.values.iter_mut().zip(descriptors) {
            *slot = descriptor.extract(opcode);
            operands.len += 1;
        }
        operands
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.values[..self.len]
    }
}

/// Scans the instruction table and returns the first matching kind with its operands.
///
/// Returns `None` if no entry in the table matches `opcode`.
pub fn decode_raw(opcode: u16) -> Option<(Kind, Operands)> {
    INSTRUCTIONS
        .iter()
        .find(|entry| entry.matches(opcode))
        .map(|entry| (entry.kind, Operands::extract(opcode, entry.operands)))
}

/// # Instructions
///
/// A decoded opcode. `x` and `y` name the registers Vx and Vy, `kk` an 8-bit immediate,
/// `n` a 4-bit immediate and `addr` a 12-bit address.
///
/// `Unknown` holds any opcode that matches no entry in the instruction table; it executes
/// as a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Sys { addr: u16 },
    Cls,
    Ret,
    Jp { addr: u16 },
    Call { addr: u16 },
    SeByte { x: u8, kk: u8 },
    SneByte { x: u8, kk: u8 },
    SeReg { x: u8, y: u8 },
    LdByte { x: u8, kk: u8 },
    AddByte { x: u8, kk: u8 },
    LdReg { x: u8, y: u8 },
    Or { x: u8, y: u8 },
    And { x: u8, y: u8 },
    Xor { x: u8, y: u8 },
    AddReg { x: u8, y: u8 },
    Sub { x: u8, y: u8 },
    Shr { x: u8 },
    Subn { x: u8, y: u8 },
    Shl { x: u8 },
    SneReg { x: u8, y: u8 },
    LdI { addr: u16 },
    JpV0 { addr: u16 },
    Rnd { x: u8, kk: u8 },
    Drw { x: u8, y: u8, n: u8 },
    Skp { x: u8 },
    Sknp { x: u8 },
    LdFromDelay { x: u8 },
    LdKey { x: u8 },
    LdDelay { x: u8 },
    LdSound { x: u8 },
    AddI { x: u8 },
    LdFont { x: u8 },
    LdBcd { x: u8 },
    Store { x: u8 },
    Load { x: u8 },
    Unknown(u16),
}

impl Instruction {
    pub fn decode(opcode: u16) -> Self {
        match decode_raw(opcode) {
            Some((kind, operands)) => Instruction::from_parts(kind, operands.as_slice()),
            None => Instruction::Unknown(opcode),
        }
    }

    /// Builds the typed instruction for `kind` from operands laid out as the table lays them out.
    fn from_parts(kind: Kind, operands: &[u16]) -> Self {
        // Every operand is masked to at most 12 bits and registers/immediates to at most 8.
        let addr = || operands[0];
        let x = || operands[0] as u8;
        let y = || operands[1] as u8;
        let kk = || operands[1] as u8;
        match kind {
            Kind::Sys => Instruction::Sys { addr: addr() },
            Kind::Cls => Instruction::Cls,
            Kind::Ret => Instruction::Ret,
            Kind::JpAddr => Instruction::Jp { addr: addr() },
            Kind::CallAddr => Instruction::Call { addr: addr() },
            Kind::SeVxNn => Instruction::SeByte { x: x(), kk: kk() },
            Kind::SneVxNn => Instruction::SneByte { x: x(), kk: kk() },
            Kind::SeVxVy => Instruction::SeReg { x: x(), y: y() },
            Kind::LdVxNn => Instruction::LdByte { x: x(), kk: kk() },
            Kind::AddVxNn => Instruction::AddByte { x: x(), kk: kk() },
            Kind::LdVxVy => Instruction::LdReg { x: x(), y: y() },
            Kind::OrVxVy => Instruction::Or { x: x(), y: y() },
            Kind::AndVxVy => Instruction::And { x: x(), y: y() },
            Kind::XorVxVy => Instruction::Xor { x: x(), y: y() },
            Kind::AddVxVy => Instruction::AddReg { x: x(), y: y() },
            Kind::SubVxVy => Instruction::Sub { x: x(), y: y() },
            Kind::ShrVx => Instruction::Shr { x: x() },
            Kind::SubnVxVy => Instruction::Subn { x: x(), y: y() },
            Kind::ShlVx => Instruction::Shl { x: x() },
            Kind::SneVxVy => Instruction::SneReg { x: x(), y: y() },
            Kind::LdIAddr => Instruction::LdI { addr: addr() },
            Kind::JpV0Addr => Instruction::JpV0 { addr: addr() },
            Kind::RndVxNn => Instruction::Rnd { x: x(), kk: kk() },
            Kind::DrwVxVyN => Instruction::Drw {
                x: x(),
                y: y(),
                n: operands[2] as u8,
            },
            Kind::SkpVx => Instruction::Skp { x: x() },
            Kind::SknpVx => Instruction::Sknp { x: x() },
            Kind::LdVxDt => Instruction::LdFromDelay { x: x() },
            Kind::LdVxK => Instruction::LdKey { x: x() },
            Kind::LdDtVx => Instruction::LdDelay { x: x() },
            Kind::LdStVx => Instruction::LdSound { x: x() },
            Kind::AddIVx => Instruction::AddI { x: x() },
            Kind::LdFVx => Instruction::LdFont { x: x() },
            Kind::LdBVx => Instruction::LdBcd { x: x() },
            Kind::LdIVx => Instruction::Store { x: x() },
            Kind::LdVxI => Instruction::Load { x: x() },
        }
    }

    /// The table kind this instruction was decoded from, `None` for `Unknown`.
    pub fn kind(&self) -> Option<Kind> {
        let kind = match self {
            Instruction::Sys { .. } => Kind::Sys,
            Instruction::Cls => Kind::Cls,
            Instruction::Ret => Kind::Ret,
            Instruction::Jp { .. } => Kind::JpAddr,
            Instruction::Call { .. } => Kind::CallAddr,
            Instruction::SeByte { .. } => Kind::SeVxNn,
            Instruction::SneByte { .. } => Kind::SneVxNn,
            Instruction::SeReg { .. } => Kind::SeVxVy,
            Instruction::LdByte { .. } => Kind::LdVxNn,
            Instruction::AddByte { .. } => Kind::AddVxNn,
            Instruction::LdReg { .. } => Kind::LdVxVy,
            Instruction::Or { .. } => Kind::OrVxVy,
            Instruction::And { .. } => Kind::AndVxVy,
            Instruction::Xor { .. } => Kind::XorVxVy,
            Instruction::AddReg { .. } => Kind::AddVxVy,
            Instruction::Sub { .. } => Kind::SubVxVy,
            Instruction::Shr { .. } => Kind::ShrVx,
            Instruction::Subn { .. } => Kind::SubnVxVy,
            Instruction::Shl { .. } => Kind::ShlVx,
            Instruction::SneReg { .. } => Kind::SneVxVy,
            Instruction::LdI { .. } => Kind::LdIAddr,
            Instruction::JpV0 { .. } => Kind::JpV0Addr,
            Instruction::Rnd { .. } => Kind::RndVxNn,
            Instruction::Drw { .. } => Kind::DrwVxVyN,
            Instruction::Skp { .. } => Kind::SkpVx,
            Instruction::Sknp { .. } => Kind::SknpVx,
            Instruction::LdFromDelay { .. } => Kind::LdVxDt,
            Instruction::LdKey { .. } => Kind::LdVxK,
            Instruction::LdDelay { .. } => Kind::LdDtVx,
            Instruction::LdSound { .. } => Kind::LdStVx,
            Instruction::AddI { .. } => Kind::AddIVx,
            Instruction::LdFont { .. } => Kind::LdFVx,
            Instruction::LdBcd { .. } => Kind::LdBVx,
            Instruction::Store { .. } => Kind::LdIVx,
            Instruction::Load { .. } => Kind::LdVxI,
            Instruction::Unknown(_) => return None,
        };
        Some(kind)
    }
}

/// Renders the conventional assembler mnemonic, e.g. `DRW V0, V1, 5`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Sys { addr } => write!(f, "SYS 0x{:03X}", addr),
            Instruction::Cls => write!(f, "CLS"),
            Instruction::Ret => write!(f, "RET"),
            Instruction::Jp { addr } => write!(f, "JP 0x{:03X}", addr),
            Instruction::Call { addr } => write!(f, "CALL 0x{:03X}", addr),
            Instruction::SeByte { x, kk } => write!(f, "SE V{:X}, 0x{:02X}", x, kk),
            Instruction::SneByte { x, kk } => write!(f, "SNE V{:X}, 0x{:02X}", x, kk),
            Instruction::SeReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::LdByte { x, kk } => write!(f, "LD V{:X}, 0x{:02X}", x, kk),
            Instruction::AddByte { x, kk } => write!(f, "ADD V{:X}, 0x{:02X}", x, kk),
            Instruction::LdReg { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::Shr { x } => write!(f, "SHR V{:X}", x),
            Instruction::Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::Shl { x } => write!(f, "SHL V{:X}", x),
            Instruction::SneReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::LdI { addr } => write!(f, "LD I, 0x{:03X}", addr),
            Instruction::JpV0 { addr } => write!(f, "JP V0, 0x{:03X}", addr),
            Instruction::Rnd { x, kk } => write!(f, "RND V{:X}, 0x{:02X}", x, kk),
            Instruction::Drw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::Skp { x } => write!(f, "SKP V{:X}", x),
            Instruction::Sknp { x } => write!(f, "SKNP V{:X}", x),
            Instruction::LdFromDelay { x } => write!(f, "LD V{:X}, DT", x),
            Instruction::LdKey { x } => write!(f, "LD V{:X}, K", x),
            Instruction::LdDelay { x } => write!(f, "LD DT, V{:X}", x),
            Instruction::LdSound { x } => write!(f, "LD ST, V{:X}", x),
            Instruction::AddI { x } => write!(f, "ADD I, V{:X}", x),
            Instruction::LdFont { x } => write!(f, "LD F, V{:X}", x),
            Instruction::LdBcd { x } => write!(f, "LD B, V{:X}", x),
            Instruction::Store { x } => write!(f, "LD [I], V{:X}", x),
            Instruction::Load { x } => write!(f, "LD V{:X}, [I]", x),
            Instruction::Unknown(opcode) => write!(f, "DATA 0x{:04X}", opcode),
        }
    }
}

/// A single line of a disassembly listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    pub address: u16,
    pub opcode: u16,
    pub instruction: Instruction,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:03X}  {:04X}  {}",
            self.address, self.opcode, self.instruction
        )
    }
}

/// Decodes `rom` two bytes at a time as if it were loaded at `origin`.
///
/// A trailing odd byte is decoded as the high byte of an opcode whose low byte is 0.
/// Addresses wrap at 16 bits, so listings of arbitrarily long input never overflow.
pub fn disassemble(rom: &[u8], origin: u16) -> impl Iterator<Item = Line> + '_ {
    rom.chunks(2).enumerate().map(move |(index, pair)| {
        let opcode = u16::from(pair[0]) << 8 | u16::from(pair.get(1).copied().unwrap_or(0));
        Line {
            address: origin.wrapping_add((index as u16).wrapping_mul(2)),
            opcode,
            instruction: Instruction::decode(opcode),
        }
    })
}
