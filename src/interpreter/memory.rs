use super::error::{Chip8Error, Result};

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const FONT_START: u16 = 0x050;
pub const GLYPH_SIZE: u16 = 5;

/// Largest ROM that fits between the program start and the top of RAM.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

const ADDRESS_MASK: u16 = 0x0FFF;

#[rustfmt::skip]
const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Flat 4 KiB address space.
///
/// 0x000-0x1ff is reserved for the interpreter (the font lives at 0x050),
/// programs are loaded from 0x200 upward.
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    /// zeroed RAM with the hex font baked in
    pub fn new() -> Memory {
        let mut bytes = Box::new([0u8; MEMORY_SIZE]);
        let font_start = FONT_START as usize;
        bytes[font_start..font_start + FONT.len()].copy_from_slice(&FONT);
        Memory { bytes }
    }

    /// copy a ROM verbatim to 0x200; oversized ROMs leave memory untouched
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// big-endian instruction word; both byte addresses wrap into 12 bits
    pub fn fetch(&self, pc: u16) -> u16 {
        let hi = self.bytes[(pc & ADDRESS_MASK) as usize];
        let lo = self.bytes[(pc.wrapping_add(1) & ADDRESS_MASK) as usize];
        u16::from_be_bytes([hi, lo])
    }

    /// read-only view of `len` bytes starting at `addr`
    pub fn slice(&self, addr: u16, len: usize) -> Result<&[u8]> {
        let range = Self::checked_range(addr, len)?;
        Ok(&self.bytes[range])
    }

    /// writable view of `len` bytes starting at `addr`
    pub fn slice_mut(&mut self, addr: u16, len: usize) -> Result<&mut [u8]> {
        let range = Self::checked_range(addr, len)?;
        Ok(&mut self.bytes[range])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    fn checked_range(addr: u16, len: usize) -> Result<std::ops::Range<usize>> {
        let start = addr as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            // report the first byte that falls outside RAM
            return Err(Chip8Error::MemoryOutOfBounds {
                address: start.max(MEMORY_SIZE),
            });
        }
        Ok(start..end)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed_outside_font() {
        let m = Memory::new();
        assert!(m.as_bytes()[..0x50].iter().all(|&b| b == 0));
        assert!(m.as_bytes()[0xA0..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_font_loaded_at_0x50() {
        let m = Memory::new();
        assert_eq!(m.slice(0x50, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        // glyph F is the last one
        assert_eq!(m.slice(0x50 + 15 * 5, 5).unwrap(), &[0xF0, 0x80, 0xF0, 0x80, 0x80]);
    }

    #[test]
    fn test_program_load_ok() {
        let mut m = Memory::new();
        m.load_rom(&[0x00, 0xE0, 0x12, 0x00]).unwrap();
        assert_eq!(m.slice(0x200, 4).unwrap(), &[0x00, 0xE0, 0x12, 0x00]);
        assert_eq!(m.fetch(0x200), 0x00E0);
        assert_eq!(m.fetch(0x202), 0x1200);
    }

    #[test]
    fn test_program_load_fills_memory_exactly() {
        let mut m = Memory::new();
        let rom = vec![0xAB; MAX_ROM_SIZE];
        m.load_rom(&rom).unwrap();
        assert_eq!(m.as_bytes()[MEMORY_SIZE - 1], 0xAB);
    }

    #[test]
    fn test_program_too_large_rejected() {
        let mut m = Memory::new();
        let rom = vec![0xAB; MAX_ROM_SIZE + 1];
        let err = m.load_rom(&rom).unwrap_err();
        assert!(matches!(
            err,
            Chip8Error::RomTooLarge { size, max } if size == MAX_ROM_SIZE + 1 && max == MAX_ROM_SIZE
        ));
        // nothing was written
        assert_eq!(m.as_bytes()[0x200], 0);
    }

    #[test]
    fn test_fetch_wraps_at_top_of_memory() {
        let mut m = Memory::new();
        m.slice_mut(0xFFF, 1).unwrap()[0] = 0x12;
        m.slice_mut(0x000, 1).unwrap()[0] = 0x34;
        assert_eq!(m.fetch(0xFFF), 0x1234);
        // pc above 12 bits is masked
        assert_eq!(m.fetch(0x1FFF), 0x1234);
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let m = Memory::new();
        assert!(m.slice(0xFFE, 2).is_ok());
        let err = m.slice(0xFFE, 3).unwrap_err();
        assert!(matches!(err, Chip8Error::MemoryOutOfBounds { address: 0x1000 }));
        let err = m.slice(0x1005, 1).unwrap_err();
        assert!(matches!(err, Chip8Error::MemoryOutOfBounds { address: 0x1005 }));
    }
}
