use std::path::Path;
use std::time::Duration;

use chip8_base::{self, Display, Keys};
use log::{info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod display;
mod error;
mod execute;
mod instruction;
mod memory;

pub use display::{Framebuffer, HEIGHT, WIDTH};
pub use error::{Chip8Error, Result};
pub use instruction::Instruction;
pub use memory::{Memory, FONT_START, GLYPH_SIZE, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START};

pub const STACK_DEPTH: usize = 16;
pub const DEFAULT_CLOCK_SPEED: u64 = 700;

const ADDRESS_MASK: u16 = 0x0FFF;
const FLAG: usize = 0xF;

pub struct Interpreter {
    memory: Memory,
    v: [u8; 16],
    i: u16,
    pc: u16,
    delay_timer: u8,
    sound_timer: u8,
    sp: usize,
    stack: [u16; STACK_DEPTH],
    keys: Keys,
    display: Framebuffer,
    rng: StdRng,
    clock_speed: u64,
    fault: Option<Chip8Error>,
}

impl Interpreter {
    /// Power-on machine with an entropy-seeded random source.
    pub fn new() -> Interpreter {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same as `new`, but random-and instructions replay identically per seed.
    pub fn with_seed(seed: u64) -> Interpreter {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Interpreter {
        Interpreter {
            memory: Memory::new(),
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            delay_timer: 0,
            sound_timer: 0,
            sp: 0,
            stack: [0; STACK_DEPTH],
            keys: [false; 16],
            display: Framebuffer::new(),
            rng,
            clock_speed: DEFAULT_CLOCK_SPEED,
            fault: None,
        }
    }

    /// Instructions per second the host should run us at.
    pub fn clock_speed(mut self, hz: u64) -> Self {
        self.clock_speed = hz.max(1);
        self
    }

    /// Back to the power-on state. The random source and clock speed survive.
    pub fn reset(&mut self) {
        self.memory = Memory::new();
        self.v = [0; 16];
        self.i = 0;
        self.pc = PROGRAM_START;
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.sp = 0;
        self.stack = [0; STACK_DEPTH];
        self.keys = [false; 16];
        self.display.clear();
        self.fault = None;
    }

    pub fn load(&mut self, rom: &[u8]) -> Result<()> {
        self.memory.load_rom(rom)?;
        info!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let rom = std::fs::read(path.as_ref())?;
        info!("read ROM {}", path.as_ref().display());
        self.load(&rom)
    }

    /// Fetch the instruction at PC and run it.
    pub fn cycle(&mut self) -> Result<Instruction> {
        let opcode = self.memory.fetch(self.pc);
        self.run_opcode(opcode)
    }

    /// Run one cycle as if `opcode` had just been fetched from PC: advance PC,
    /// execute, then age the timers.
    ///
    /// A faulting instruction leaves the machine as it was, with PC pointing
    /// back at the instruction and the timers not aged.
    pub fn run_opcode(&mut self, opcode: u16) -> Result<Instruction> {
        let pc = self.pc;
        let instruction = Instruction::decode(opcode);
        trace!("{:#05X}: {:04X} {:?}", pc, opcode, instruction);

        self.set_pc(pc.wrapping_add(2));
        if let Err(e) = self.execute(instruction) {
            self.pc = pc;
            return Err(e);
        }

        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
        Ok(instruction)
    }

    pub fn press(&mut self, key: u8) {
        self.keys[(key & 0xF) as usize] = true;
    }

    pub fn release(&mut self, key: u8) {
        self.keys[(key & 0xF) as usize] = false;
    }

    pub fn set_keys(&mut self, keys: &Keys) {
        self.keys = *keys;
    }

    pub fn keypad(&self) -> &Keys {
        &self.keys
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.v
    }

    pub fn registers_mut(&mut self) -> &mut [u8; 16] {
        &mut self.v
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn set_index(&mut self, i: u16) {
        self.i = i;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.pc = pc & ADDRESS_MASK;
    }

    /// return addresses currently on the stack, oldest first
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.sp]
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn display(&self) -> &Framebuffer {
        &self.display
    }

    /// the fault that halted the host loop, if any
    pub fn fault(&self) -> Option<&Chip8Error> {
        self.fault.as_ref()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl chip8_base::Interpreter for Interpreter {
    fn step(&mut self, keys: &Keys) -> Option<Display> {
        if self.fault.is_some() {
            return None;
        }
        self.keys = *keys;

        match self.cycle() {
            Ok(instruction) if instruction.touches_display() => Some(self.display.to_display()),
            Ok(_) => None,
            Err(e) => {
                log::error!("halting at {:#05X}: {}", self.pc, e);
                self.fault = Some(e);
                None
            }
        }
    }

    fn speed(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.clock_speed)
    }

    fn buzzer_active(&self) -> bool {
        self.sound_timer > 0
    }
}
