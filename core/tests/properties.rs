use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8_core::{Chip8, Fault, Instruction};
use proptest::prelude::*;

/// Loads `rom` and executes `steps` instructions.
fn run(rom: &[u8], steps: usize) -> Chip8 {
    let mut chip8 = Chip8::new();
    chip8.load_rom(rom).unwrap();
    for _ in 0..steps {
        chip8.step().unwrap();
    }
    chip8
}

/// A pair of distinct general purpose registers, never VF.
fn registers() -> impl Strategy<Value = (u8, u8)> {
    (0u8..0xF, 0u8..0xF).prop_filter("registers must differ", |(x, y)| x != y)
}

fn unknown_opcodes() -> impl Strategy<Value = u16> {
    any::<u16>().prop_filter("opcode must not decode", |op| {
        Instruction::decode(*op).kind().is_none()
    })
}

proptest! {
    #[test]
    fn add_sets_carry_iff_sum_overflows((x, y) in registers(), a in any::<u8>(), b in any::<u8>()) {
        let rom = [0x60 | x, a, 0x60 | y, b, 0x80 | x, y << 4 | 0x4];
        let chip8 = run(&rom, 3);
        let sum = u16::from(a) + u16::from(b);
        prop_assert_eq!(chip8.state().v[x as usize], (sum % 256) as u8);
        prop_assert_eq!(chip8.state().v[0xF], (sum > 255) as u8);
    }

    #[test]
    fn sub_sets_flag_iff_no_borrow((x, y) in registers(), a in any::<u8>(), b in any::<u8>()) {
        let rom = [0x60 | x, a, 0x60 | y, b, 0x80 | x, y << 4 | 0x5];
        let chip8 = run(&rom, 3);
        prop_assert_eq!(chip8.state().v[x as usize], a.wrapping_sub(b));
        prop_assert_eq!(chip8.state().v[0xF], (a >= b) as u8);
    }

    #[test]
    fn subn_sets_flag_iff_no_borrow((x, y) in registers(), a in any::<u8>(), b in any::<u8>()) {
        let rom = [0x60 | x, a, 0x60 | y, b, 0x80 | x, y << 4 | 0x7];
        let chip8 = run(&rom, 3);
        prop_assert_eq!(chip8.state().v[x as usize], b.wrapping_sub(a));
        prop_assert_eq!(chip8.state().v[0xF], (b >= a) as u8);
    }

    #[test]
    fn bcd_writes_decimal_digits(value in any::<u8>()) {
        // LD V5, value; LD I, 0x300; LD B, V5
        let rom = [0x65, value, 0xA3, 0x00, 0xF5, 0x33];
        let chip8 = run(&rom, 3);
        let digits = &chip8.state().memory[0x300..0x303];
        prop_assert_eq!(u32::from(digits[0]) * 100 + u32::from(digits[1]) * 10 + u32::from(digits[2]), u32::from(value));
        prop_assert!(digits.iter().all(|d| *d < 10));
    }

    #[test]
    fn jp_v0_lands_exactly(v0 in any::<u8>(), addr in 0u16..0x1000) {
        let rom = [0x60, v0, 0xB0 | (addr >> 8) as u8, addr as u8];
        let chip8 = run(&rom, 2);
        prop_assert_eq!(chip8.state().pc, addr + u16::from(v0));
    }

    #[test]
    fn unknown_opcodes_only_advance(opcode in unknown_opcodes()) {
        let chip8 = run(&opcode.to_be_bytes(), 1);
        prop_assert_eq!(chip8.state().pc, 0x202);
        prop_assert_eq!(chip8.state().v, [0; 16]);
    }

    #[test]
    fn table_entries_only_overlap_on_sys(opcode in any::<u16>()) {
        let matching = emu8_core::table::INSTRUCTIONS
            .iter()
            .filter(|entry| entry.matches(opcode))
            .count();
        let expected_max = if opcode == 0x00E0 || opcode == 0x00EE { 2 } else { 1 };
        prop_assert!(matching <= expected_max);
    }
}

#[test]
fn cls_turns_every_pixel_off() {
    // LD V0, 0; LD F, V0; DRW V0, V0, 5; CLS
    let chip8 = run(&[0x60, 0x00, 0xF0, 0x29, 0xD0, 0x05, 0x00, 0xE0], 4);
    for y in 0..DISPLAY_HEIGHT {
        for x in 0..DISPLAY_WIDTH {
            assert!(!chip8.frame().get(x, y));
        }
    }
}

#[test]
fn redrawing_a_sprite_erases_it_and_collides() {
    // LD I, 0x20A; DRW V0, V0, 1; DRW V0, V0, 1; JP 0x206; DATA 0xFF
    let rom = [0xA2, 0x0A, 0xD0, 0x01, 0xD0, 0x01, 0x12, 0x06, 0x00, 0x00, 0xFF];
    let mut chip8 = run(&rom, 2);
    assert!((0..8).all(|x| chip8.frame().get(x, 0)));
    assert_eq!(chip8.state().v[0xF], 0);

    chip8.step().unwrap();
    assert!((0..8).all(|x| !chip8.frame().get(x, 0)));
    assert_eq!(chip8.state().v[0xF], 1);
}

#[test]
fn subroutine_loop_counts_down() {
    // 0x200 LD V0, 5
    // 0x202 CALL 0x20A
    // 0x204 SE V0, 0
    // 0x206 JP 0x202
    // 0x208 JP 0x208
    // 0x20A ADD V0, 0xFF
    // 0x20C RET
    let rom = [
        0x60, 0x05, 0x22, 0x0A, 0x30, 0x00, 0x12, 0x02, 0x12, 0x08, 0x70, 0xFF, 0x00, 0xEE,
    ];
    let mut chip8 = run(&rom, 1);
    for _ in 0..30 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().v[0x0], 0);
    assert_eq!(chip8.state().pc, 0x208);
    assert_eq!(chip8.state().sp, 0);
}

#[test]
fn arithmetic_into_vf_overwrites_the_flag() {
    // LD VF, 0x10; LD V1, 0x01; SUB VF, V1
    let chip8 = run(&[0x6F, 0x10, 0x61, 0x01, 0x8F, 0x15], 3);
    assert_eq!(chip8.state().v[0xF], 0x0F);

    // LD VF, 0xFF; LD V1, 0x02; ADD VF, V1
    let chip8 = run(&[0x6F, 0xFF, 0x61, 0x02, 0x8F, 0x14], 3);
    assert_eq!(chip8.state().v[0xF], 0x01);

    // LD VF, 0x01; LD V1, 0x03; SUBN VF, V1
    let chip8 = run(&[0x6F, 0x01, 0x61, 0x03, 0x8F, 0x17], 3);
    assert_eq!(chip8.state().v[0xF], 0x02);

    // LD VF, 0x81; SHR VF
    let chip8 = run(&[0x6F, 0x81, 0x8F, 0x06], 2);
    assert_eq!(chip8.state().v[0xF], 0x40);

    // LD VF, 0x81; SHL VF
    let chip8 = run(&[0x6F, 0x81, 0x8F, 0x0E], 2);
    assert_eq!(chip8.state().v[0xF], 0x02);
}

#[test]
fn runaway_recursion_faults() {
    // CALL 0x200
    let mut chip8 = run(&[0x22, 0x00], 16);
    assert_eq!(chip8.step(), Err(Fault::StackOverflow { pc: 0x200 }));
}
