use std::time::Duration;

use minifb::{Key, KeyRepeat, ScaleMode, Window, WindowOptions};

use crate::{
    config::{rgba_to_rgb, Config},
    display::{FrameBuffer, HEIGHT, WIDTH},
    keyboard::{KEY_COUNT, KEY_LAYOUT},
    timer::TIMER_DEC_PER_SECOND,
    Error,
};

const BACKGROUND: u32 = 0x0000_0000;

/// Window that shows the framebuffer and reports keypad transitions.
pub struct Screen {
    pixel_buffer: Vec<u32>,
    foreground: u32,
    held: [bool; KEY_COUNT],
    window: Window,
}

impl Screen {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut window = Window::new(
            "chipvm - ESC to exit",
            WIDTH * config.scale.max(1),
            HEIGHT * config.scale.max(1),
            WindowOptions {
                resize: true,
                scale_mode: ScaleMode::Stretch,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| Error::Window(e.to_string()))?;
        // one frame per timer tick, ~60 fps
        window.limit_update_rate(Some(Duration::from_micros(
            1_000_000 / TIMER_DEC_PER_SECOND,
        )));
        Ok(Self {
            pixel_buffer: vec![BACKGROUND; WIDTH * HEIGHT],
            foreground: rgba_to_rgb(config.colour),
            held: [false; KEY_COUNT],
            window,
        })
    }

    pub fn is_running(&self) -> bool {
        self.window.is_open() && !self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }

    /// Keypad indices whose physical key changed since the last poll, as
    /// `(index, is_down)` in index order.
    pub fn poll_keys(&mut self) -> Vec<(u8, bool)> {
        let mut changes = vec![];
        for (index, &key) in KEY_LAYOUT.iter().enumerate() {
            let down = self.window.is_key_down(key);
            if down != self.held[index] {
                self.held[index] = down;
                changes.push((index as u8, down));
            }
        }
        changes
    }

    /// Presents the framebuffer. The pixel buffer is only recomputed when the
    /// machine asked for a redraw; the window is updated regardless so input
    /// and pacing keep running.
    pub fn sync(&mut self, fb: &FrameBuffer, redraw: bool) -> Result<(), Error> {
        if redraw {
            for (out, &bit) in self.pixel_buffer.iter_mut().zip(fb.pixels()) {
                *out = if bit == 1 { self.foreground } else { BACKGROUND };
            }
        }
        self.window
            .update_with_buffer(&self.pixel_buffer, WIDTH, HEIGHT)
            .map_err(|e| Error::Window(e.to_string()))
    }
}
