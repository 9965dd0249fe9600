use log::debug;
use rand::Rng;

use super::{
    Chip8Error, Instruction, Interpreter, Result, ADDRESS_MASK, FLAG, FONT_START, GLYPH_SIZE,
    HEIGHT, STACK_DEPTH, WIDTH,
};

impl Interpreter {
    /// Apply one decoded instruction. PC has already been advanced past it.
    ///
    /// Errors are raised before anything is written, so a failed instruction
    /// has no side effects.
    pub(super) fn execute(&mut self, instruction: Instruction) -> Result<()> {
        match instruction {
            Instruction::ClearScreen => self.display.clear(),
            Instruction::Return => {
                if self.sp == 0 {
                    return Err(Chip8Error::StackUnderflow {
                        pc: self.current_address(),
                    });
                }
                self.sp -= 1;
                self.pc = self.stack[self.sp];
            }
            Instruction::Jump(nnn) => self.pc = nnn,
            Instruction::Call(nnn) => {
                if self.sp == STACK_DEPTH {
                    return Err(Chip8Error::StackOverflow {
                        pc: self.current_address(),
                    });
                }
                self.stack[self.sp] = self.pc;
                self.sp += 1;
                self.pc = nnn;
            }
            Instruction::SkipIfEqual { x, byte } => self.skip_if(self.v[x] == byte),
            Instruction::SkipIfNotEqual { x, byte } => self.skip_if(self.v[x] != byte),
            Instruction::SkipIfRegistersEqual { x, y } => self.skip_if(self.v[x] == self.v[y]),
            Instruction::Load { x, byte } => self.v[x] = byte,
            Instruction::AddImmediate { x, byte } => self.v[x] = self.v[x].wrapping_add(byte),
            Instruction::Copy { x, y } => self.v[x] = self.v[y],
            Instruction::Or { x, y } => self.v[x] |= self.v[y],
            Instruction::And { x, y } => self.v[x] &= self.v[y],
            Instruction::Xor { x, y } => self.v[x] ^= self.v[y],
            Instruction::Add { x, y } => {
                let (sum, carry) = self.v[x].overflowing_add(self.v[y]);
                self.set_with_flag(x, sum, carry);
            }
            Instruction::Sub { x, y } => {
                let (vx, vy) = (self.v[x], self.v[y]);
                self.set_with_flag(x, vx.wrapping_sub(vy), vx > vy);
            }
            Instruction::ShiftRight { x } => {
                let vx = self.v[x];
                self.set_with_flag(x, vx >> 1, vx & 0x01 != 0);
            }
            Instruction::SubReverse { x, y } => {
                let (vx, vy) = (self.v[x], self.v[y]);
                self.set_with_flag(x, vy.wrapping_sub(vx), vy > vx);
            }
            Instruction::ShiftLeft { x } => {
                let vx = self.v[x];
                self.set_with_flag(x, vx << 1, vx & 0x80 != 0);
            }
            Instruction::SkipIfRegistersNotEqual { x, y } => self.skip_if(self.v[x] != self.v[y]),
            Instruction::SetIndex(nnn) => self.i = nnn,
            Instruction::JumpWithOffset(nnn) => {
                self.pc = nnn.wrapping_add(self.v[0] as u16) & ADDRESS_MASK;
            }
            Instruction::Random { x, byte } => self.v[x] = self.rng.gen::<u8>() & byte,
            Instruction::Draw { x, y, height } => {
                let sprite = self.memory.slice(self.i, height)?;
                let col = self.v[x] as usize % WIDTH;
                let row = self.v[y] as usize % HEIGHT;
                let collision = self.display.draw_sprite(col, row, sprite);
                self.v[FLAG] = collision as u8;
            }
            Instruction::SkipIfKeyPressed { x } => self.skip_if(self.key_in(x)),
            Instruction::SkipIfKeyNotPressed { x } => self.skip_if(!self.key_in(x)),
            Instruction::GetDelayTimer { x } => self.v[x] = self.delay_timer,
            Instruction::WaitForKey { x } => match self.keys.iter().position(|&down| down) {
                Some(key) => self.v[x] = key as u8,
                None => {
                    // run this instruction again next cycle
                    self.pc = self.current_address();
                    debug!("waiting for key at {:#05X}", self.pc);
                }
            },
            Instruction::SetDelayTimer { x } => self.delay_timer = self.v[x],
            Instruction::SetSoundTimer { x } => self.sound_timer = self.v[x],
            Instruction::AddToIndex { x } => self.i = self.i.wrapping_add(self.v[x] as u16),
            Instruction::SetIndexToGlyph { x } => {
                self.i = FONT_START + GLYPH_SIZE * self.v[x] as u16;
            }
            Instruction::StoreBcd { x } => {
                let value = self.v[x];
                let digits = self.memory.slice_mut(self.i, 3)?;
                digits[0] = value / 100;
                digits[1] = (value / 10) % 10;
                digits[2] = value % 10;
            }
            Instruction::DumpRegisters { x } => {
                let dst = self.memory.slice_mut(self.i, x + 1)?;
                dst.copy_from_slice(&self.v[..=x]);
            }
            Instruction::LoadRegisters { x } => {
                let src = self.memory.slice(self.i, x + 1)?;
                self.v[..=x].copy_from_slice(src);
            }
            Instruction::Unknown(opcode) => {
                let addr = self.current_address();
                debug!("unmapped opcode {:04X} at {:#05X}, ignoring", opcode, addr);
            }
        }
        Ok(())
    }

    /// address of the instruction being executed
    fn current_address(&self) -> u16 {
        self.pc.wrapping_sub(2) & ADDRESS_MASK
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = self.pc.wrapping_add(2) & ADDRESS_MASK;
        }
    }

    // VF is written last, so it holds the flag even when x is F
    fn set_with_flag(&mut self, x: usize, value: u8, flag: bool) {
        self.v[x] = value;
        self.v[FLAG] = flag as u8;
    }

    fn key_in(&self, x: usize) -> bool {
        self.keys[(self.v[x] & 0xF) as usize]
    }
}
