/// Rate at which the driver is expected to call [`Timer::tick`].
pub const TIMER_DEC_PER_SECOND: u64 = 60;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub count: u8,
}

impl Timer {
    pub fn set(&mut self, value: u8) {
        self.count = value;
    }

    /// Counts down once. Returns true only on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.count -= 1;
        self.count == 0
    }
}
