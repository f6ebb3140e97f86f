use crate::memory::TypeAddr;

/// Where the program image is placed and where execution starts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    #[default]
    Standard,
    /// ETI 660 compatibility mode.
    Eti660,
}

impl LoadMode {
    pub fn load_address(self) -> TypeAddr {
        match self {
            LoadMode::Standard => 0x200,
            LoadMode::Eti660 => 0x660,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub load_mode: LoadMode,
    /// Foreground colour as RGBA.
    pub colour: u32,
    pub instructions_per_frame: usize,
    /// Window size as a multiple of 64x32.
    pub scale: usize,
    /// Fixed seed for the random opcode; entropy when unset.
    pub seed: Option<u64>,
    pub mute: bool,
}

pub const DEFAULT_COLOUR: u32 = 0xFFFF_FFFF;
pub const DEFAULT_INSTRUCTIONS_PER_FRAME: usize = 8;
pub const DEFAULT_SCALE: usize = 10;

impl Default for Config {
    fn default() -> Self {
        Self {
            load_mode: LoadMode::Standard,
            colour: DEFAULT_COLOUR,
            instructions_per_frame: DEFAULT_INSTRUCTIONS_PER_FRAME,
            scale: DEFAULT_SCALE,
            seed: None,
            mute: false,
        }
    }
}

/// Parses an RGBA colour written in hex, e.g. `F7A8B8FF`, `0xF7A8B8FF` or `#F7A8B8FF`.
pub fn parse_colour(s: &str) -> Result<u32, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix('#'))
        .unwrap_or(s);
    if digits.is_empty() || digits.len() > 8 {
        return Err(format!("`{s}` is not an RGBA hex colour"));
    }
    u32::from_str_radix(digits, 16).map_err(|e| format!("`{s}` is not an RGBA hex colour: {e}"))
}

/// Converts RGBA to the 0RGB layout window buffers use; alpha is dropped.
pub fn rgba_to_rgb(rgba: u32) -> u32 {
    rgba >> 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_addresses() {
        assert_eq!(LoadMode::Standard.load_address(), 0x200);
        assert_eq!(LoadMode::Eti660.load_address(), 0x660);
        assert_eq!(Config::default().load_mode, LoadMode::Standard);
    }

    #[test]
    fn test_parse_colour() {
        assert_eq!(parse_colour("F7A8B8FF"), Ok(0xF7A8B8FF));
        assert_eq!(parse_colour("0xf7a8b8ff"), Ok(0xF7A8B8FF));
        assert_eq!(parse_colour("#00FF00FF"), Ok(0x00FF00FF));
        assert!(parse_colour("").is_err());
        assert!(parse_colour("red").is_err());
        assert!(parse_colour("123456789").is_err());
    }

    #[test]
    fn test_rgba_to_rgb() {
        assert_eq!(rgba_to_rgb(0xF7A8B8FF), 0x00F7A8B8);
        assert_eq!(rgba_to_rgb(DEFAULT_COLOUR), 0x00FFFFFF);
    }
}
