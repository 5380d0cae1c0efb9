use crate::constants::{ADDRESS_MASK, FONT_SPRITE_BYTES};
use crate::error::Fault;
use crate::framebuffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::state::State;

/// Executes a single decoded instruction against the machine and moves the pc on.
///
/// A fault leaves `state` exactly as it was, pc included.
pub fn execute(
    instruction: Instruction,
    state: &mut State,
    frame: &mut FrameBuffer,
    keypad: &Keypad,
) -> Result<(), Fault> {
    match instruction {
        // clear
        Instruction::Cls => {
            frame.clear();
            state.advance();
        }
        // PC = STACK.pop(); the saved address already points past the CALL
        Instruction::Ret => state.pc = state.pop()?,
        // PC = addr
        Instruction::Jp { addr } => state.pc = addr,
        // STACK.push(PC + 2); PC = addr
        Instruction::Call { addr } => {
            state.push(state.pc.wrapping_add(2))?;
            state.pc = addr;
        }
        // if Vx == kk then pc += 2
        Instruction::SeByte { x, kk } => state.skip_if(state.v[x as usize] == kk),
        // if Vx != kk then pc += 2
        Instruction::SneByte { x, kk } => state.skip_if(state.v[x as usize] != kk),
        // if Vx == Vy then pc += 2
        Instruction::SeReg { x, y } => state.skip_if(state.v[x as usize] == state.v[y as usize]),
        // if Vx != Vy then pc += 2
        Instruction::SneReg { x, y } => state.skip_if(state.v[x as usize] != state.v[y as usize]),
        // Vx = kk
        Instruction::LdByte { x, kk } => {
            state.v[x as usize] = kk;
            state.advance();
        }
        // Vx += kk without touching VF
        Instruction::AddByte { x, kk } => {
            state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
            state.advance();
        }
        // Vx = Vy
        Instruction::LdReg { x, y } => {
            state.v[x as usize] = state.v[y as usize];
            state.advance();
        }
        // Vx |= Vy
        Instruction::Or { x, y } => {
            state.v[x as usize] |= state.v[y as usize];
            state.advance();
        }
        // Vx &= Vy
        Instruction::And { x, y } => {
            state.v[x as usize] &= state.v[y as usize];
            state.advance();
        }
        // Vx ^= Vy
        Instruction::Xor { x, y } => {
            state.v[x as usize] ^= state.v[y as usize];
            state.advance();
        }
        // Vx += Vy; VF = carry
        Instruction::AddReg { x, y } => {
            let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
            state.v[0xF] = over as u8;
            state.v[x as usize] = res;
            state.advance();
        }
        // Vx -= Vy; VF = !borrow
        Instruction::Sub { x, y } => {
            let (res, under) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
            state.v[0xF] = !under as u8;
            state.v[x as usize] = res;
            state.advance();
        }
        // Vx = Vy - Vx; VF = !borrow
        Instruction::Subn { x, y } => {
            let (res, under) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
            state.v[0xF] = !under as u8;
            state.v[x as usize] = res;
            state.advance();
        }
        // VF = Vx & 1; Vx >>= 1
        Instruction::Shr { x } => {
            let value = state.v[x as usize];
            state.v[0xF] = value & 0x1;
            state.v[x as usize] = value >> 1;
            state.advance();
        }
        // VF = Vx >> 7; Vx <<= 1
        Instruction::Shl { x } => {
            let value = state.v[x as usize];
            state.v[0xF] = value >> 7;
            state.v[x as usize] = value << 1;
            state.advance();
        }
        // I = addr
        Instruction::LdI { addr } => {
            state.i = addr;
            state.advance();
        }
        // PC = V0 + addr, not wrapped; fetching wraps instead
        Instruction::JpV0 { addr } => state.pc = addr + u16::from(state.v[0x0]),
        // Vx = rand() & kk
        Instruction::Rnd { x, kk } => {
            state.v[x as usize] = rand::random::<u8>() & kk;
            state.advance();
        }
        // draw_sprite(x=Vx y=Vy size=n)
        Instruction::Drw { x, y, n } => {
            draw(state, frame, x, y, n);
            state.advance();
        }
        // if key[Vx] is pressed then pc += 2
        Instruction::Skp { x } => state.skip_if(keypad.is_pressed(state.v[x as usize])),
        // if key[Vx] is not pressed then pc += 2
        Instruction::Sknp { x } => state.skip_if(!keypad.is_pressed(state.v[x as usize])),
        // Vx = DT
        Instruction::LdFromDelay { x } => {
            state.v[x as usize] = state.delay_timer;
            state.advance();
        }
        // Vx = next key press; the pc stays put until one arrives
        Instruction::LdKey { x } => state.awaiting_key = Some(x),
        // DT = Vx
        Instruction::LdDelay { x } => {
            state.delay_timer = state.v[x as usize];
            state.advance();
        }
        // ST = Vx
        Instruction::LdSound { x } => {
            state.sound_timer = state.v[x as usize];
            state.advance();
        }
        // I += Vx, wrapped to 12 bits; VF is left alone
        Instruction::AddI { x } => {
            state.i = state.i.wrapping_add(u16::from(state.v[x as usize])) & ADDRESS_MASK;
            state.advance();
        }
        // I = address of the font sprite for digit Vx
        Instruction::LdFont { x } => {
            state.i = u16::from(state.v[x as usize]) * FONT_SPRITE_BYTES as u16;
            state.advance();
        }
        // mem[I..I+3] = BCD(Vx)
        Instruction::LdBcd { x } => {
            let value = state.v[x as usize];
            let bcd = [value / 100, value / 10 % 10, value % 10];
            for (offset, digit) in (0u16..).zip(bcd) {
                state.write(state.i.wrapping_add(offset), digit);
            }
            state.advance();
        }
        // mem[I..=I+x] = V0..=Vx
        Instruction::Store { x } => {
            for r in 0..=x {
                state.write(state.i.wrapping_add(u16::from(r)), state.v[r as usize]);
            }
            state.advance();
        }
        // V0..=Vx = mem[I..=I+x]
        Instruction::Load { x } => {
            for r in 0..=x {
                state.v[r as usize] = state.read(state.i.wrapping_add(u16::from(r)));
            }
            state.advance();
        }
        // machine code routines are ignored
        Instruction::Sys { .. } => state.advance(),
        // skip
        Instruction::Unknown(opcode) => {
            tracing::warn!("Skipping unknown opcode {:04X} at {:#05X}", opcode, state.pc);
            state.advance();
        }
    }
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n byte sprite at memory[I..] onto the FrameBuffer; VF = any pixel erased.
fn draw(state: &mut State, frame: &mut FrameBuffer, x: u8, y: u8, n: u8) {
    let sprite: Vec<u8> = (0..u16::from(n))
        .map(|row| state.read(state.i.wrapping_add(row)))
        .collect();

    let collision = frame.draw(state.v[x as usize], state.v[y as usize], &sprite);
    state.v[0xF] = collision as u8;
}
