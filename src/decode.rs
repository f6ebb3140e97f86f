use crate::memory::TypeAddr;
use crate::registers::Reg;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInstruction {
    code: u16,
}

impl RawInstruction {
    pub fn new(code: u16) -> Self {
        RawInstruction { code }
    }

    // n is starting digit, m is length
    pub fn nth_m_digits(&self, n: u8, m: u8) -> u16 {
        // 0110 1100 1111 0001
        // -------------------
        // 1111 1111 1111 1111
        //      1111 1111 1111
        //           1111 1111
        //                1111
        let shift_places = (4 - m - (n - 1)) * 4;
        let mask = (1u32 << (m * 4)) - 1;
        (self.code & ((mask as u16) << shift_places)) >> shift_places
    }

    pub fn family(&self) -> u8 {
        self.nth_m_digits(1, 1) as u8
    }

    pub fn x(&self) -> Reg {
        Reg::from_nibble(self.nth_m_digits(2, 1) as u8)
    }

    pub fn y(&self) -> Reg {
        Reg::from_nibble(self.nth_m_digits(3, 1) as u8)
    }

    pub fn n(&self) -> u8 {
        self.nth_m_digits(4, 1) as u8
    }

    pub fn nn(&self) -> u8 {
        self.nth_m_digits(3, 2) as u8
    }

    pub fn nnn(&self) -> TypeAddr {
        self.nth_m_digits(2, 3)
    }
}

impl PartialEq<u16> for RawInstruction {
    fn eq(&self, ins: &u16) -> bool {
        ins.eq(&self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCodes {
    // 00E0
    // turn all pixels to 0
    ClearScreen,
    // 00EE
    PopSubroutine,
    // 1NNN
    // set PC to address NNN, "jump" to memory location
    Jump(TypeAddr),
    // 2NNN
    PushSubroutine(TypeAddr),

    // 3XNN
    SkipEqualConstant(Reg, u8),
    // 4XNN
    SkipNotEqualConstant(Reg, u8),
    // 5XY0
    SkipEqualRegister(Reg, Reg),
    // 9XY0
    SkipNotEqualRegister(Reg, Reg),

    // 6XNN
    // set register VX to value NN
    SetRegister(Reg, u8),
    // 7XNN
    // add value NN to VX, no carry
    AddToRegister(Reg, u8),

    // 8XY0
    CopyRegister(Reg, Reg),
    // 8XY1
    Or(Reg, Reg),
    // 8XY2
    And(Reg, Reg),
    // 8XY3
    XOr(Reg, Reg),
    /// 8XY4
    Add(Reg, Reg),
    // 8XY5
    SubtractForward(Reg, Reg),
    // 8XY6
    // shifts VX itself, VY is ignored
    RightShift(Reg),
    // 8XY7
    SubtractBackward(Reg, Reg),
    // 8XYE
    LeftShift(Reg),

    // ANNN
    // set index register I to address NNN
    SetIndexRegister(TypeAddr),
    // BNNN
    JumpWithOffset(TypeAddr),
    // CXNN
    Random(Reg, u8),
    // DXYN
    // draw an N pixel tall sprite starting at I
    // at Coordinates (VX, VY)
    // XOR pixels on screen using sprite data
    // if any lit pixel was switched off: VF set to 1
    Display(Reg, Reg, u8),

    // EX9E
    SkipIfPressed(Reg),
    // EXA1
    SkipIfNotPressed(Reg),

    // FX07
    CopyDelayToRegister(Reg),
    // FX0A
    GetKey(Reg),
    // FX15
    CopyRegisterToDelay(Reg),
    // FX18
    CopyRegisterToSound(Reg),
    // FX1E
    AddToIndex(Reg),
    // FX29
    PointChar(Reg),
    // FX33
    ToDecimal(Reg),
    // FX55
    StoreRegisterToMemory(Reg),
    // FX65
    LoadRegisterFromMemory(Reg),

    // anything else, including 0NNN machine calls
    Unimplemented(u16),
}

impl OpCodes {
    pub fn decode_raw(ins: u16) -> Self {
        let raw = RawInstruction::new(ins);
        let (x, y) = (raw.x(), raw.y());

        match raw.family() {
            0x0 => match raw.nnn() {
                0x0E0 => Self::ClearScreen,
                0x0EE => Self::PopSubroutine,
                _ => Self::Unimplemented(ins),
            },
            0x1 => Self::Jump(raw.nnn()),
            0x2 => Self::PushSubroutine(raw.nnn()),
            0x3 => Self::SkipEqualConstant(x, raw.nn()),
            0x4 => Self::SkipNotEqualConstant(x, raw.nn()),
            0x5 if raw.n() == 0 => Self::SkipEqualRegister(x, y),
            0x6 => Self::SetRegister(x, raw.nn()),
            0x7 => Self::AddToRegister(x, raw.nn()),
            0x8 => match raw.n() {
                0x0 => Self::CopyRegister(x, y),
                0x1 => Self::Or(x, y),
                0x2 => Self::And(x, y),
                0x3 => Self::XOr(x, y),
                0x4 => Self::Add(x, y),
                0x5 => Self::SubtractForward(x, y),
                0x6 => Self::RightShift(x),
                0x7 => Self::SubtractBackward(x, y),
                0xE => Self::LeftShift(x),
                _ => Self::Unimplemented(ins),
            },
            0x9 if raw.n() == 0 => Self::SkipNotEqualRegister(x, y),
            0xA => Self::SetIndexRegister(raw.nnn()),
            0xB => Self::JumpWithOffset(raw.nnn()),
            0xC => Self::Random(x, raw.nn()),
            0xD => Self::Display(x, y, raw.n()),
            0xE => match raw.nn() {
                0x9E => Self::SkipIfPressed(x),
                0xA1 => Self::SkipIfNotPressed(x),
                _ => Self::Unimplemented(ins),
            },
            0xF => match raw.nn() {
                0x07 => Self::CopyDelayToRegister(x),
                0x0A => Self::GetKey(x),
                0x15 => Self::CopyRegisterToDelay(x),
                0x18 => Self::CopyRegisterToSound(x),
                0x1E => Self::AddToIndex(x),
                0x29 => Self::PointChar(x),
                0x33 => Self::ToDecimal(x),
                0x55 => Self::StoreRegisterToMemory(x),
                0x65 => Self::LoadRegisterFromMemory(x),
                _ => Self::Unimplemented(ins),
            },
            _ => Self::Unimplemented(ins),
        }
    }
}
