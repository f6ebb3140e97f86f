use crate::{
    config::Config,
    decode::OpCodes,
    display::FrameBuffer,
    keyboard::{Keypad, KEY_COUNT},
    memory::{Memory, Stack, TypeAddr, GLYPH_SIZE, STACK_DEPTH},
    registers::{IndexRegister, ProgramCounter, Reg, Registers},
    timer::Timer,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Flags handed from the machine to the presentation side once per frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutput {
    pub draw: bool,
    pub beep: bool,
}

/// Whole machine state. Owned by a single driver; every method is synchronous
/// and never blocks.
pub struct Emulator {
    pub regs: Registers,
    pub mem: Memory,
    pub pc: ProgramCounter,
    pub index: IndexRegister,
    pub stack: Stack,
    pub fb: FrameBuffer,
    pub keypad: Keypad,
    pub delay_timer: Timer,
    pub sound_timer: Timer,
    waiting_for_key: Option<Reg>,
    beep_requested: bool,
    instructions_per_frame: usize,
    rng: StdRng,
}

impl Emulator {
    pub fn new(program: &[u8], config: &Config) -> Self {
        let load_address = config.load_mode.load_address();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            regs: Registers::new(),
            mem: Memory::initialize(program, load_address),
            pc: ProgramCounter(load_address),
            index: IndexRegister(0),
            stack: Stack::new(),
            fb: FrameBuffer::new(),
            keypad: Keypad::new(),
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            waiting_for_key: None,
            beep_requested: false,
            instructions_per_frame: config.instructions_per_frame,
            rng,
        }
    }

    /// Register that the pending `FX0A` will write, if any.
    pub fn waiting_for_key(&self) -> Option<Reg> {
        self.waiting_for_key
    }

    pub fn fetch_decode(&mut self) -> OpCodes {
        let ins = self.mem.instruction_at(self.pc.0);
        self.pc.increment();
        OpCodes::decode_raw(ins)
    }

    /// One fetch/decode/execute cycle. Does nothing while waiting for a key.
    pub fn step(&mut self) {
        if self.waiting_for_key.is_some() {
            return;
        }
        let at = self.pc.0;
        let operation = self.fetch_decode();
        log::trace!("{:#05x}: {:?}", at, operation);
        self.execute_ins(operation);
    }

    pub fn execute_ins(&mut self, ins: OpCodes) {
        match ins {
            OpCodes::ClearScreen => {
                self.fb.clear_buffer();
            }
            OpCodes::PopSubroutine => {
                if self.stack.depth() == 0 {
                    log::warn!("return with empty call stack at {:#05x}", self.pc.0);
                }
                let addr = self.stack.pop();
                self.pc.set_addr(addr);
            }
            OpCodes::Jump(addr) => {
                self.pc.set_addr(addr);
            }
            OpCodes::PushSubroutine(addr) => {
                if self.stack.depth() == STACK_DEPTH {
                    log::warn!("call stack overflow at {:#05x}", self.pc.0);
                }
                self.stack.push(self.pc.0); // already points past the call
                self.pc.set_addr(addr);
            }
            OpCodes::SkipEqualConstant(vx, nn) => {
                self.skip_if(self.regs.get(vx) == nn);
            }
            OpCodes::SkipNotEqualConstant(vx, nn) => {
                self.skip_if(self.regs.get(vx) != nn);
            }
            OpCodes::SkipEqualRegister(vx, vy) => {
                self.skip_if(self.regs.get(vx) == self.regs.get(vy));
            }
            OpCodes::SkipNotEqualRegister(vx, vy) => {
                self.skip_if(self.regs.get(vx) != self.regs.get(vy));
            }
            OpCodes::SetRegister(vx, nn) => {
                self.regs.set_register(vx, nn);
            }
            OpCodes::AddToRegister(vx, nn) => {
                self.regs.add_to_register(vx, nn);
            }
            OpCodes::CopyRegister(vx, vy) => {
                self.regs.set_register(vx, self.regs.get(vy));
            }
            OpCodes::Or(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) | self.regs.get(vy));
            }
            OpCodes::And(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) & self.regs.get(vy));
            }
            OpCodes::XOr(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) ^ self.regs.get(vy));
            }
            // VF is written before the result, and the result reads the
            // registers afresh, so an operand that is VF sees the new flag.
            OpCodes::Add(vx, vy) => {
                let (_, carry) = self.regs.get(vx).overflowing_add(self.regs.get(vy));
                self.regs.set_flag(carry);
                self.regs
                    .set_register(vx, self.regs.get(vx).wrapping_add(self.regs.get(vy)));
            }
            OpCodes::SubtractForward(vx, vy) => {
                self.regs.set_flag(self.regs.get(vx) > self.regs.get(vy));
                self.regs
                    .set_register(vx, self.regs.get(vx).wrapping_sub(self.regs.get(vy)));
            }
            OpCodes::SubtractBackward(vx, vy) => {
                self.regs.set_flag(self.regs.get(vy) > self.regs.get(vx));
                self.regs
                    .set_register(vx, self.regs.get(vy).wrapping_sub(self.regs.get(vx)));
            }
            OpCodes::RightShift(vx) => {
                self.regs.set_flag(self.regs.get(vx) & 1 == 1);
                self.regs.set_register(vx, self.regs.get(vx) >> 1);
            }
            OpCodes::LeftShift(vx) => {
                self.regs.set_flag(self.regs.get(vx) >> 7 == 1);
                self.regs.set_register(vx, self.regs.get(vx) << 1);
            }
            OpCodes::SetIndexRegister(addr) => self.index.set_addr(addr),
            OpCodes::JumpWithOffset(addr) => {
                self.pc.set_addr(addr + self.regs.get(Reg::V0) as TypeAddr);
            }
            OpCodes::Random(vx, nn) => {
                let ransuu: u8 = self.rng.gen();
                self.regs.set_register(vx, nn & ransuu);
            }
            OpCodes::Display(reg_x, reg_y, height) => {
                let (x, y) = (self.regs.get(reg_x), self.regs.get(reg_y));
                // sprite rows come from I..I+N, each address masked
                let sprite: Vec<u8> = (0..height as u16)
                    .map(|row| self.mem.get(self.index.offset(row)))
                    .collect();

                self.regs.set_flag(false);
                let collision = self.fb.paint(x, y, &sprite);
                self.regs.set_flag(collision);
            }
            OpCodes::SkipIfPressed(vx) => {
                self.skip_if(self.keypad.get_key_status_from_num(self.regs.get(vx)));
            }
            OpCodes::SkipIfNotPressed(vx) => {
                self.skip_if(!self.keypad.get_key_status_from_num(self.regs.get(vx)));
            }
            OpCodes::CopyDelayToRegister(vx) => self.regs.set_register(vx, self.delay_timer.count),
            OpCodes::GetKey(vx) => {
                log::debug!("waiting for key into {}", vx);
                self.waiting_for_key = Some(vx);
            }
            OpCodes::CopyRegisterToDelay(vx) => self.delay_timer.set(self.regs.get(vx)),
            OpCodes::CopyRegisterToSound(vx) => self.sound_timer.set(self.regs.get(vx)),
            OpCodes::AddToIndex(vx) => {
                self.index
                    .set_addr(self.index.offset(self.regs.get(vx) as u16));
            }
            OpCodes::PointChar(vx) => {
                // not masked; Vx above 0xF points past the font
                self.index.set_addr(self.regs.get(vx) as u16 * GLYPH_SIZE);
            }
            OpCodes::ToDecimal(vx) => {
                let value = self.regs.get(vx);
                let digits = [value / 100, (value / 10) % 10, value % 10];
                for (i, digit) in digits.into_iter().enumerate() {
                    self.mem.set(self.index.offset(i as u16), digit);
                }
            }
            OpCodes::StoreRegisterToMemory(vx) => {
                for reg in vx.through() {
                    let reg_val = self.regs.get(reg);
                    self.mem.set(self.index.offset(reg.index() as u16), reg_val);
                }
            }
            OpCodes::LoadRegisterFromMemory(vx) => {
                for reg in vx.through() {
                    let reg_val = self.mem.get(self.index.offset(reg.index() as u16));
                    self.regs.set_register(reg, reg_val);
                }
            }
            OpCodes::Unimplemented(code) => {
                log::debug!("skipping unknown opcode {:04X}", code);
            }
        }
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc.increment();
        }
    }

    /// Counts both timers down once; the sound timer reaching zero requests a beep.
    pub fn tick_timers(&mut self) {
        self.delay_timer.tick();
        if self.sound_timer.tick() {
            self.beep_requested = true;
        }
    }

    /// Input bridge: records a key transition and resolves a pending `FX0A`
    /// on an up-to-down edge. A key already held does not count.
    pub fn set_key(&mut self, index: u8, is_down: bool) {
        if index as usize >= KEY_COUNT {
            log::warn!("ignoring out of range key index {}", index);
            return;
        }
        if !self.keypad.update_key(index, is_down) {
            return;
        }
        if let Some(vx) = self.waiting_for_key.take() {
            log::debug!("key {:X} pressed, resuming with {} = {:X}", index, vx, index);
            self.regs.set_register(vx, index);
        }
    }

    pub fn beep_requested(&self) -> bool {
        self.beep_requested
    }

    pub fn take_beep(&mut self) -> bool {
        std::mem::take(&mut self.beep_requested)
    }

    /// Runs one display frame worth of work and hands over the output flags.
    /// Key transitions must already have been delivered through [`Self::set_key`].
    pub fn run_frame(&mut self) -> FrameOutput {
        for _ in 0..self.instructions_per_frame {
            self.step();
        }
        self.tick_timers();
        FrameOutput {
            draw: self.fb.take_draw_request(),
            beep: self.take_beep(),
        }
    }
}
