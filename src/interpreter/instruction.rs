/// A decoded CHIP-8 instruction. Register operands are indices into V0..VF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SkipIfEqual { x: usize, byte: u8 },
    /// 4xkk
    SkipIfNotEqual { x: usize, byte: u8 },
    /// 5xy0
    SkipIfRegistersEqual { x: usize, y: usize },
    /// 6xkk
    Load { x: usize, byte: u8 },
    /// 7xkk
    AddImmediate { x: usize, byte: u8 },
    /// 8xy0
    Copy { x: usize, y: usize },
    /// 8xy1
    Or { x: usize, y: usize },
    /// 8xy2
    And { x: usize, y: usize },
    /// 8xy3
    Xor { x: usize, y: usize },
    /// 8xy4
    Add { x: usize, y: usize },
    /// 8xy5
    Sub { x: usize, y: usize },
    /// 8xy6
    ShiftRight { x: usize },
    /// 8xy7
    SubReverse { x: usize, y: usize },
    /// 8xyE
    ShiftLeft { x: usize },
    /// 9xy0
    SkipIfRegistersNotEqual { x: usize, y: usize },
    /// Annn
    SetIndex(u16),
    /// Bnnn
    JumpWithOffset(u16),
    /// Cxkk
    Random { x: usize, byte: u8 },
    /// Dxyn
    Draw { x: usize, y: usize, height: usize },
    /// Ex9E
    SkipIfKeyPressed { x: usize },
    /// ExA1
    SkipIfKeyNotPressed { x: usize },
    /// Fx07
    GetDelayTimer { x: usize },
    /// Fx0A
    WaitForKey { x: usize },
    /// Fx15
    SetDelayTimer { x: usize },
    /// Fx18
    SetSoundTimer { x: usize },
    /// Fx1E
    AddToIndex { x: usize },
    /// Fx29
    SetIndexToGlyph { x: usize },
    /// Fx33
    StoreBcd { x: usize },
    /// Fx55
    DumpRegisters { x: usize },
    /// Fx65
    LoadRegisters { x: usize },
    /// Anything without a mapping; executes as a no-op.
    Unknown(u16),
}

impl Instruction {
    /// Split an opcode into its nibbles and pick the instruction.
    ///
    /// Families 0x0, 0x8 and 0xE select on the low nibble alone and 0xF on the
    /// low byte; 0x5 and 0x9 ignore the low nibble.
    pub fn decode(opcode: u16) -> Instruction {
        let nibbles = (
            ((opcode & 0xF000) >> 12) as u8,
            ((opcode & 0x0F00) >> 8) as u8,
            ((opcode & 0x00F0) >> 4) as u8,
            (opcode & 0x000F) as u8,
        );
        let nnn = opcode & 0x0FFF;
        let kk = (opcode & 0x00FF) as u8;
        let x = nibbles.1 as usize;
        let y = nibbles.2 as usize;
        let n = nibbles.3 as usize;

        match nibbles {
            (0x0, _, _, 0x0) => Instruction::ClearScreen,
            (0x0, _, _, 0xE) => Instruction::Return,
            (0x1, _, _, _) => Instruction::Jump(nnn),
            (0x2, _, _, _) => Instruction::Call(nnn),
            (0x3, _, _, _) => Instruction::SkipIfEqual { x, byte: kk },
            (0x4, _, _, _) => Instruction::SkipIfNotEqual { x, byte: kk },
            (0x5, _, _, _) => Instruction::SkipIfRegistersEqual { x, y },
            (0x6, _, _, _) => Instruction::Load { x, byte: kk },
            (0x7, _, _, _) => Instruction::AddImmediate { x, byte: kk },
            (0x8, _, _, 0x0) => Instruction::Copy { x, y },
            (0x8, _, _, 0x1) => Instruction::Or { x, y },
            (0x8, _, _, 0x2) => Instruction::And { x, y },
            (0x8, _, _, 0x3) => Instruction::Xor { x, y },
            (0x8, _, _, 0x4) => Instruction::Add { x, y },
            (0x8, _, _, 0x5) => Instruction::Sub { x, y },
            (0x8, _, _, 0x6) => Instruction::ShiftRight { x },
            (0x8, _, _, 0x7) => Instruction::SubReverse { x, y },
            (0x8, _, _, 0xE) => Instruction::ShiftLeft { x },
            (0x9, _, _, _) => Instruction::SkipIfRegistersNotEqual { x, y },
            (0xA, _, _, _) => Instruction::SetIndex(nnn),
            (0xB, _, _, _) => Instruction::JumpWithOffset(nnn),
            (0xC, _, _, _) => Instruction::Random { x, byte: kk },
            (0xD, _, _, _) => Instruction::Draw { x, y, height: n },
            (0xE, _, _, 0xE) => Instruction::SkipIfKeyPressed { x },
            (0xE, _, _, 0x1) => Instruction::SkipIfKeyNotPressed { x },
            (0xF, _, 0x0, 0x7) => Instruction::GetDelayTimer { x },
            (0xF, _, 0x0, 0xA) => Instruction::WaitForKey { x },
            (0xF, _, 0x1, 0x5) => Instruction::SetDelayTimer { x },
            (0xF, _, 0x1, 0x8) => Instruction::SetSoundTimer { x },
            (0xF, _, 0x1, 0xE) => Instruction::AddToIndex { x },
            (0xF, _, 0x2, 0x9) => Instruction::SetIndexToGlyph { x },
            (0xF, _, 0x3, 0x3) => Instruction::StoreBcd { x },
            (0xF, _, 0x5, 0x5) => Instruction::DumpRegisters { x },
            (0xF, _, 0x6, 0x5) => Instruction::LoadRegisters { x },
            _ => Instruction::Unknown(opcode),
        }
    }

    /// true for the instructions that can change the framebuffer
    pub fn touches_display(&self) -> bool {
        matches!(self, Instruction::ClearScreen | Instruction::Draw { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_system_family() {
        assert_eq!(Instruction::decode(0x00E0), Instruction::ClearScreen);
        assert_eq!(Instruction::decode(0x00EE), Instruction::Return);
        // only the low nibble selects inside family 0
        assert_eq!(Instruction::decode(0x0120), Instruction::ClearScreen);
        assert_eq!(Instruction::decode(0x0000), Instruction::ClearScreen);
        assert_eq!(Instruction::decode(0x0001), Instruction::Unknown(0x0001));
        assert_eq!(Instruction::decode(0x0123), Instruction::Unknown(0x0123));
    }

    #[test]
    fn test_decode_immediates() {
        assert_eq!(Instruction::decode(0x1ABC), Instruction::Jump(0xABC));
        assert_eq!(Instruction::decode(0x2400), Instruction::Call(0x400));
        assert_eq!(
            Instruction::decode(0x3A42),
            Instruction::SkipIfEqual { x: 0xA, byte: 0x42 }
        );
        assert_eq!(Instruction::decode(0xA123), Instruction::SetIndex(0x123));
        assert_eq!(Instruction::decode(0xB300), Instruction::JumpWithOffset(0x300));
        assert_eq!(
            Instruction::decode(0xD125),
            Instruction::Draw { x: 1, y: 2, height: 5 }
        );
    }

    #[test]
    fn test_decode_arithmetic_family() {
        assert_eq!(Instruction::decode(0x8124), Instruction::Add { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x8125), Instruction::Sub { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x8127), Instruction::SubReverse { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x812E), Instruction::ShiftLeft { x: 1 });
        assert_eq!(Instruction::decode(0x8128), Instruction::Unknown(0x8128));
        assert_eq!(Instruction::decode(0x812F), Instruction::Unknown(0x812F));
    }

    #[test]
    fn test_decode_skip_register_families_ignore_low_nibble() {
        assert_eq!(
            Instruction::decode(0x5121),
            Instruction::SkipIfRegistersEqual { x: 1, y: 2 }
        );
        assert_eq!(
            Instruction::decode(0x9127),
            Instruction::SkipIfRegistersNotEqual { x: 1, y: 2 }
        );
    }

    #[test]
    fn test_decode_key_and_misc_families() {
        assert_eq!(Instruction::decode(0xE39E), Instruction::SkipIfKeyPressed { x: 3 });
        assert_eq!(Instruction::decode(0xE3A1), Instruction::SkipIfKeyNotPressed { x: 3 });
        assert_eq!(Instruction::decode(0xE3A2), Instruction::Unknown(0xE3A2));
        assert_eq!(Instruction::decode(0xF50A), Instruction::WaitForKey { x: 5 });
        assert_eq!(Instruction::decode(0xF533), Instruction::StoreBcd { x: 5 });
        assert_eq!(Instruction::decode(0xFF65), Instruction::LoadRegisters { x: 15 });
        assert_eq!(Instruction::decode(0xF566), Instruction::Unknown(0xF566));
        assert_eq!(Instruction::decode(0xF5FF), Instruction::Unknown(0xF5FF));
    }

    #[test]
    fn test_touches_display() {
        assert!(Instruction::decode(0x00E0).touches_display());
        assert!(Instruction::decode(0xD011).touches_display());
        assert!(!Instruction::decode(0x1200).touches_display());
    }
}
