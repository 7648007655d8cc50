//! Sync signal generation. `SyncGen` is the clocked process of a raster
//! timing controller: two nested counters advanced once per pixel clock,
//! with hsync/vsync/active derived from porch-relative windows.
//!
//! The sync and active comparisons are made against the counter values
//! *entering* each tick, which is what gives the outputs their
//! registered, one-tick-delayed behavior: the value tested this tick is
//! the one the counters latched last tick. The only same-tick term is
//! the vertical gate on `active`, which reads the just-updated line
//! counter so that the pixel emitted on a line-wrap tick is blanked
//! whenever the new line sits in vertical blanking.

use tracing::trace;

use crate::timing::{Timing, TimingError};

/// Vertical phase of a line within the frame, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Active(u16),
    FrontPorch(u16),
    Sync(u16),
    BackPorch(u16),
}

#[derive(Debug)]
pub struct SyncGen {
    t: Timing,
    x: u16, // 0 only after reset; steady state 1..=Htot
    y: u16, // 0..Vtot-1
    active: bool,
    h_sync: bool,
    v_sync: bool,
}

impl SyncGen {
    /// Build a generator at the frame origin. Rejects profiles whose
    /// totals disagree with their phase widths, since the counters wrap
    /// on the totals and a mismatched profile would scan garbage.
    pub fn new(t: Timing) -> Result<Self, TimingError> {
        t.validate()?;
        Ok(Self {
            t,
            x: 0,
            y: 0,
            active: true,
            h_sync: false,
            v_sync: false,
        })
    }

    /// Advance by one pixel clock and return the latched outputs.
    ///
    /// - `reset_active`: synchronous reset, counters and outputs to zero
    /// - `enable`: when low, outputs are held low and the counters freeze
    /// - `sync`: re-sync to the frame origin, overrides everything else
    ///
    /// Returns `(active, h_sync, v_sync)`.
    pub fn tick(&mut self, reset_active: bool, enable: bool, sync: bool) -> (bool, bool, bool) {
        if reset_active {
            self.x = 0;
            self.y = 0;
            self.active = false;
            self.h_sync = false;
            self.v_sync = false;
        } else if enable {
            // Compare against the values entering the tick, then step.
            self.h_sync = self.x >= self.t.h_sync_start() && self.x < self.t.h_sync_end();
            self.v_sync = self.y >= self.t.v_sync_start() && self.y < self.t.v_sync_end();
            // The wrap tick is the first active pixel of the next line.
            self.active = self.x < self.t.h_active || self.x == self.t.h_total;

            if self.x == self.t.h_total {
                self.x = 1;
                if self.y == self.t.v_total - 1 {
                    trace!("frame complete, wrapping to line 0");
                    self.y = 0;
                } else {
                    self.y += 1;
                }
            } else {
                self.x += 1;
            }
        } else {
            self.active = false;
            self.h_sync = false;
            self.v_sync = false;
        }

        if sync {
            self.x = 0;
            self.y = 0;
            self.active = false;
            self.h_sync = false;
            self.v_sync = false;
        }

        self.outputs()
    }

    /// Latched outputs `(active, h_sync, v_sync)`. Active video is gated
    /// on the line counter so it can never assert during vertical
    /// blanking, whatever the horizontal window said.
    pub fn outputs(&self) -> (bool, bool, bool) {
        (self.active && self.y < self.t.v_active, self.h_sync, self.v_sync)
    }

    pub fn timing(&self) -> &Timing {
        &self.t
    }

    /// Horizontal position entering the next tick.
    pub fn x(&self) -> u16 {
        self.x
    }

    /// Vertical position (line) entering the next tick.
    pub fn y(&self) -> u16 {
        self.y
    }

    /// Vertical phase of the current line: active -> fp -> sync -> bp.
    pub fn v_phase(&self) -> SyncPhase {
        if self.y < self.t.v_active {
            SyncPhase::Active(self.y)
        } else {
            let y = self.y - self.t.v_active;
            if y < self.t.v_fp {
                SyncPhase::FrontPorch(y)
            } else {
                let y = y - self.t.v_fp;
                if y < self.t.v_sync {
                    SyncPhase::Sync(y)
                } else {
                    SyncPhase::BackPorch(y - self.t.v_sync)
                }
            }
        }
    }
}
