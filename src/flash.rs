/*
 * The enforcement flash: one short white blink of the RGB light each time a
 * red-light violation is recorded.
 */

use crate::clock::Millis;
use crate::output_image::OutputImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashStage {
    /// Triggered, light not switched on yet.
    Armed,
    Lit,
    /// Light off again, waiting out the dark period before the flash ends.
    Dark,
}

#[derive(Debug, Clone)]
pub struct Flash {
    stage_ms: u32,
    active: bool,
    stage: FlashStage,
    stage_start_at: Millis,
}

impl Flash {
    pub fn new(stage_ms: u32) -> Self {
        Flash {
            stage_ms,
            active: false,
            stage: FlashStage::Armed,
            stage_start_at: Millis::ZERO,
        }
    }

    /// Starts a flash. A trigger while a flash is running is dropped and
    /// returns `false`.
    pub fn trigger(&mut self, now: Millis) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.stage = FlashStage::Armed;
        self.stage_start_at = now;
        true
    }

    pub fn update(&mut self, now: Millis, outputs: &mut OutputImage) {
        if !self.active {
            return;
        }

        // Stage deadlines run from the previous deadline rather than from the
        // tick that noticed it, so the sequence length does not depend on the
        // loop rate.
        match self.stage {
            FlashStage::Armed => {
                outputs.set_flash(true, true, true);
                self.stage = FlashStage::Lit;
                self.stage_start_at = now;
            }
            FlashStage::Lit => {
                if now.has_elapsed(self.stage_start_at, self.stage_ms) {
                    outputs.set_flash(false, false, false);
                    self.stage = FlashStage::Dark;
                    self.stage_start_at = self.stage_start_at.wrapping_add(self.stage_ms);
                }
            }
            FlashStage::Dark => {
                if now.has_elapsed(self.stage_start_at, self.stage_ms) {
                    self.active = false;
                }
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stage(&self) -> FlashStage {
        self.stage
    }
}
