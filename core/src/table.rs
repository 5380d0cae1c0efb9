/// # Instruction Table
///
/// Every Chip-8 instruction is identified by masking the opcode and comparing the result
/// against a fixed pattern. The bits the mask drops carry the instruction's operands,
/// each pulled out with its own (mask, shift) pair:
/// - `0x0FFF >> 0` a 12-bit address
/// - `0x0F00 >> 8` the register Vx (or the range V0..Vx)
/// - `0x00F0 >> 4` the register Vy
/// - `0x00FF >> 0` an 8-bit immediate
/// - `0x000F >> 0` a 4-bit immediate (sprite height)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operand {
    pub mask: u16,
    pub shift: u8,
}

impl Operand {
    const fn new(mask: u16, shift: u8) -> Self {
        Operand { mask, shift }
    }

    /// `(opcode & mask) >> shift`
    pub const fn extract(&self, opcode: u16) -> u16 {
        (opcode & self.mask) >> self.shift
    }
}

const ADDR: Operand = Operand::new(0x0FFF, 0);
const X: Operand = Operand::new(0x0F00, 8);
const Y: Operand = Operand::new(0x00F0, 4);
const NN: Operand = Operand::new(0x00FF, 0);
const N: Operand = Operand::new(0x000F, 0);

const NONE: &[Operand] = &[];
const A: &[Operand] = &[ADDR];
const VX: &[Operand] = &[X];
const VX_NN: &[Operand] = &[X, NN];
const VX_VY: &[Operand] = &[X, Y];
const VX_VY_N: &[Operand] = &[X, Y, N];

/// The 35 canonical Chip-8 instruction kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Sys,
    Cls,
    Ret,
    JpAddr,
    CallAddr,
    SeVxNn,
    SneVxNn,
    SeVxVy,
    LdVxNn,
    AddVxNn,
    LdVxVy,
    OrVxVy,
    AndVxVy,
    XorVxVy,
    AddVxVy,
    SubVxVy,
    ShrVx,
    SubnVxVy,
    ShlVx,
    SneVxVy,
    LdIAddr,
    JpV0Addr,
    RndVxNn,
    DrwVxVyN,
    SkpVx,
    SknpVx,
    LdVxDt,
    LdVxK,
    LdDtVx,
    LdStVx,
    AddIVx,
    LdFVx,
    LdBVx,
    LdIVx,
    LdVxI,
}

impl Kind {
    /// The identifier conventionally used for this kind, e.g. `ADD_VX_VY`.
    pub fn id(self) -> &'static str {
        match self {
            Kind::Sys => "SYS_ADDR",
            Kind::Cls => "CLS",
            Kind::Ret => "RET",
            Kind::JpAddr => "JP_ADDR",
            Kind::CallAddr => "CALL_ADDR",
            Kind::SeVxNn => "SE_VX_NN",
            Kind::SneVxNn => "SNE_VX_NN",
            Kind::SeVxVy => "SE_VX_VY",
            Kind::LdVxNn => "LD_VX_NN",
            Kind::AddVxNn => "ADD_VX_NN",
            Kind::LdVxVy => "LD_VX_VY",
            Kind::OrVxVy => "OR_VX_VY",
            Kind::AndVxVy => "AND_VX_VY",
            Kind::XorVxVy => "XOR_VX_VY",
            Kind::AddVxVy => "ADD_VX_VY",
            Kind::SubVxVy => "SUB_VX_VY",
            Kind::ShrVx => "SHR_VX",
            Kind::SubnVxVy => "SUBN_VX_VY",
            Kind::ShlVx => "SHL_VX",
            Kind::SneVxVy => "SNE_VX_VY",
            Kind::LdIAddr => "LD_I_ADDR",
            Kind::JpV0Addr => "JP_V0_ADDR",
            Kind::RndVxNn => "RND_VX_NN",
            Kind::DrwVxVyN => "DRW_VX_VY_N",
            Kind::SkpVx => "SKP_VX",
            Kind::SknpVx => "SKNP_VX",
            Kind::LdVxDt => "LD_VX_DT",
            Kind::LdVxK => "LD_VX_K",
            Kind::LdDtVx => "LD_DT_VX",
            Kind::LdStVx => "LD_ST_VX",
            Kind::AddIVx => "ADD_I_VX",
            Kind::LdFVx => "LD_F_VX",
            Kind::LdBVx => "LD_B_VX",
            Kind::LdIVx => "LD_I_VX",
            Kind::LdVxI => "LD_VX_I",
        }
    }
}

/// One row of the instruction table.
#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub kind: Kind,
    pub mask: u16,
    pub pattern: u16,
    pub operands: &'static [Operand],
}

impl Entry {
    const fn new(kind: Kind, mask: u16, pattern: u16, operands: &'static [Operand]) -> Self {
        Entry {
            kind,
            mask,
            pattern,
            operands,
        }
    }

    pub const fn matches(&self, opcode: u16) -> bool {
        opcode & self.mask == self.pattern
    }
}

/// Scanned in order by the decoder; the first matching entry wins.
///
/// `SYS` (0NNN) overlaps `CLS` and `RET` under its mask so it must come after both.
pub static INSTRUCTIONS: [Entry; 35] = [
    Entry::new(Kind::Cls, 0xFFFF, 0x00E0, NONE),
    Entry::new(Kind::Ret, 0xFFFF, 0x00EE, NONE),
    Entry::new(Kind::Sys, 0xF000, 0x0000, A),
    Entry::new(Kind::JpAddr, 0xF000, 0x1000, A),
    Entry::new(Kind::CallAddr, 0xF000, 0x2000, A),
    Entry::new(Kind::SeVxNn, 0xF000, 0x3000, VX_NN),
    Entry::new(Kind::SneVxNn, 0xF000, 0x4000, VX_NN),
    Entry::new(Kind::SeVxVy, 0xF00F, 0x5000, VX_VY),
    Entry::new(Kind::LdVxNn, 0xF000, 0x6000, VX_NN),
    Entry::new(Kind::AddVxNn, 0xF000, 0x7000, VX_NN),
    Entry::new(Kind::LdVxVy, 0xF00F, 0x8000, VX_VY),
    Entry::new(Kind::OrVxVy, 0xF00F, 0x8001, VX_VY),
    Entry::new(Kind::AndVxVy, 0xF00F, 0x8002, VX_VY),
    Entry::new(Kind::XorVxVy, 0xF00F, 0x8003, VX_VY),
    Entry::new(Kind::AddVxVy, 0xF00F, 0x8004, VX_VY),
    Entry::new(Kind::SubVxVy, 0xF00F, 0x8005, VX_VY),
    Entry::new(Kind::ShrVx, 0xF00F, 0x8006, VX),
    Entry::new(Kind::SubnVxVy, 0xF00F, 0x8007, VX_VY),
    Entry::new(Kind::ShlVx, 0xF00F, 0x800E, VX),
    Entry::new(Kind::SneVxVy, 0xF00F, 0x9000, VX_VY),
    Entry::new(Kind::LdIAddr, 0xF000, 0xA000, A),
    Entry::new(Kind::JpV0Addr, 0xF000, 0xB000, A),
    Entry::new(Kind::RndVxNn, 0xF000, 0xC000, VX_NN),
    Entry::new(Kind::DrwVxVyN, 0xF000, 0xD000, VX_VY_N),
    Entry::new(Kind::SkpVx, 0xF0FF, 0xE09E, VX),
    Entry::new(Kind::SknpVx, 0xF0FF, 0xE0A1, VX),
    Entry::new(Kind::LdVxDt, 0xF0FF, 0xF007, VX),
    Entry::new(Kind::LdVxK, 0xF0FF, 0xF00A, VX),
    Entry::new(Kind::LdDtVx, 0xF0FF, 0xF015, VX),
    Entry::new(Kind::LdStVx, 0xF0FF, 0xF018, VX),
    Entry::new(Kind::AddIVx, 0xF0FF, 0xF01E, VX),
    Entry::new(Kind::LdFVx, 0xF0FF, 0xF029, VX),
    Entry::new(Kind::LdBVx, 0xF0FF, 0xF033, VX),
    Entry::new(Kind::LdIVx, 0xF0FF, 0xF055, VX),
    Entry::new(Kind::LdVxI, 0xF0FF, 0xF065, VX),
];
