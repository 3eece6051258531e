//! Headless surface that reports frames through the `log` facade

use super::{Frame, RenderSurface};

/// Logs the HUD every `every` frames and keeps the latest frame
#[derive(Debug, Clone)]
pub struct LogSurface {
    size: (u32, u32),
    every: u64,
    frames: u64,
    last: Option<Frame>,
}

impl LogSurface {
    pub fn new(width: u32, height: u32, every: u64) -> Self {
        Self {
            size: (width, height),
            every: every.max(1),
            frames: 0,
            last: None,
        }
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}

impl RenderSurface for LogSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        if let Some(banner) = &frame.banner {
            log::info!("{} (score: {})", banner.title, banner.score);
        } else if self.frames % self.every == 0 {
            log::info!("{}", frame.hud_text().join(" | "));
        }
        if log::log_enabled!(log::Level::Trace) {
            match serde_json::to_string(frame) {
                Ok(json) => log::trace!("{}", json),
                Err(e) => log::warn!("Can't serialize frame: {}", e),
            }
        }
        self.last = Some(frame.clone());
    }
}
