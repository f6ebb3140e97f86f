pub type TypeAddr = u16; // in reality u12
type FontBytes = [u8; 5 * 16];

pub const MEMORY_SIZE: usize = 4096;
pub const ADDR_MASK: TypeAddr = 0x0FFF;
pub const STACK_DEPTH: usize = 16;

const DEFAULT_FONT: FontBytes = [
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

/// Bytes per font glyph.
pub const GLYPH_SIZE: u16 = 5;

pub struct Memory {
    // 4k bytes
    // font data stored from 000 -> 04F, program from the load address up
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zero-filled address space holding only the font table.
    pub fn new() -> Self {
        let mut mem = Self {
            bytes: [0; MEMORY_SIZE],
        };
        mem.bytes[..DEFAULT_FONT.len()].copy_from_slice(&DEFAULT_FONT);
        mem
    }

    /// Builds a fresh address space with the font at 0 and `program` copied to
    /// `load_address`. Anything past the end of memory is dropped.
    pub fn initialize(program: &[u8], load_address: TypeAddr) -> Self {
        let mut mem = Self::new();
        let start = (load_address & ADDR_MASK) as usize;
        let available = MEMORY_SIZE - start;
        let len = program.len().min(available);
        if len < program.len() {
            log::warn!(
                "program is {} bytes but only {} fit at {:#05x}; truncating",
                program.len(),
                available,
                start
            );
        }
        mem.bytes[start..start + len].copy_from_slice(&program[..len]);
        log::info!("loaded {} bytes at {:#05x}", len, start);
        mem
    }

    pub fn set(&mut self, addr: TypeAddr, val: u8) {
        self.bytes[(addr & ADDR_MASK) as usize] = val;
    }

    pub fn get(&self, addr: TypeAddr) -> u8 {
        self.bytes[(addr & ADDR_MASK) as usize]
    }

    /// Big-endian opcode at `addr`; the second byte wraps to 0x000 at the top.
    pub fn instruction_at(&self, addr: TypeAddr) -> u16 {
        let (l, r) = (self.get(addr), self.get(addr.wrapping_add(1)));
        ((l as u16) << 8) | r as u16
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// Sixteen return addresses addressed by a 4-bit stack pointer that starts at
/// the top and grows down. Over- and underflow wrap the pointer.
pub struct Stack {
    addresses: [TypeAddr; STACK_DEPTH],
    sp: u8,
    // live entries, clamped to 0..=16; the pointer alone can't tell full from empty
    depth: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            addresses: [0; STACK_DEPTH],
            sp: (STACK_DEPTH - 1) as u8,
            depth: 0,
        }
    }

    pub fn push(&mut self, addr: TypeAddr) {
        self.addresses[self.sp as usize] = addr;
        self.sp = self.sp.wrapping_sub(1) & 0xF;
        self.depth = (self.depth + 1).min(STACK_DEPTH);
    }

    pub fn pop(&mut self) -> TypeAddr {
        self.sp = (self.sp + 1) & 0xF;
        self.depth = self.depth.saturating_sub(1);
        self.addresses[self.sp as usize]
    }

    pub fn pointer(&self) -> u8 {
        self.sp
    }

    /// Return addresses pushed and not yet popped, at most 16.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
