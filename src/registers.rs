use std::fmt;

use crate::memory::{TypeAddr, ADDR_MASK};

/// Index of one of the sixteen V registers. Only built from a decoded nibble,
/// so it is always in 0..=15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reg(u8);

impl Reg {
    pub const V0: Reg = Reg(0x0);
    pub const VF: Reg = Reg(0xF);

    pub fn from_nibble(n: u8) -> Self {
        Reg(n & 0xF)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// V0 up to and including `self`.
    pub fn through(self) -> impl Iterator<Item = Reg> {
        (0..=self.0).map(Reg)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{:X}", self.0)
    }
}

pub struct Registers {
    registers: [u8; 16],
}

impl Registers {
    pub fn new() -> Self {
        Self { registers: [0; 16] }
    }

    pub fn set_register(&mut self, reg: Reg, value: u8) {
        self.registers[reg.index()] = value;
    }

    pub fn add_to_register(&mut self, reg: Reg, value: u8) {
        self.registers[reg.index()] = self.registers[reg.index()].wrapping_add(value);
    }

    pub fn get(&self, reg: Reg) -> u8 {
        self.registers[reg.index()]
    }

    /// VF doubles as the carry/borrow/collision flag.
    pub fn set_flag(&mut self, on: bool) {
        self.set_register(Reg::VF, on as u8);
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[u8] {
        &self.registers
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

// Special registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramCounter(pub TypeAddr);

impl ProgramCounter {
    pub fn increment(&mut self) {
        self.set_addr(self.0.wrapping_add(2));
    }

    /// Stores `addr` inside the 12-bit address space. Leaving it is logged but
    /// not fatal.
    pub fn set_addr(&mut self, addr: TypeAddr) {
        if addr > ADDR_MASK {
            log::warn!(
                "program counter {:#06x} outside address space, wrapping to {:#05x}",
                addr,
                addr & ADDR_MASK
            );
        }
        self.0 = addr & ADDR_MASK;
    }
}

/// The I register. Arithmetic on it is not masked; memory access through it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRegister(pub TypeAddr);

impl IndexRegister {
    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr;
    }

    /// Address `offset` bytes past I.
    pub fn offset(&self, offset: u16) -> TypeAddr {
        self.0.wrapping_add(offset)
    }
}
