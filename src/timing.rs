//! Raster timing profiles. Each profile describes one scan axis as
//! active area, front porch, sync pulse and back porch, with the total
//! carried explicitly so a profile that doesn't add up can be rejected
//! before it drives a generator.

use thiserror::Error;

/// SVGA 800x600 @ 60Hz (40MHz pixel clock).
pub const TIMING_800X600: Timing = Timing {
    h_active: 800,
    h_fp: 40,
    h_sync: 128,
    h_bp: 88,
    h_total: 1056,
    v_active: 600,
    v_fp: 1,
    v_sync: 4,
    v_bp: 23,
    v_total: 628,
};

/// VGA 640x480 @ 60Hz (25.175MHz pixel clock).
pub const TIMING_640X480: Timing = Timing {
    h_active: 640,
    h_fp: 16,
    h_sync: 96,
    h_bp: 48,
    h_total: 800,
    v_active: 480,
    v_fp: 10,
    v_sync: 2,
    v_bp: 33,
    v_total: 525,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub h_active: u16, // pixels
    pub h_fp: u16,
    pub h_sync: u16,
    pub h_bp: u16,
    pub h_total: u16, // h_active + h_fp + h_sync + h_bp

    pub v_active: u16, // lines
    pub v_fp: u16,
    pub v_sync: u16,
    pub v_bp: u16,
    pub v_total: u16, // v_active + v_fp + v_sync + v_bp
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimingError {
    #[error("h_total is {total} but the horizontal phases sum to {sum}")]
    HorizontalTotalMismatch { total: u16, sum: u32 },
    #[error("v_total is {total} but the vertical phases sum to {sum}")]
    VerticalTotalMismatch { total: u16, sum: u32 },
    #[error("active area must be non-zero (got {h_active}x{v_active})")]
    EmptyActiveArea { h_active: u16, v_active: u16 },
}

impl Timing {
    /// Check that both totals equal the sum of their phase widths. The
    /// generator relies on this to wrap its counters; a profile that
    /// fails here would still produce a deterministic waveform, just
    /// not the one anybody asked for.
    pub fn validate(&self) -> Result<(), TimingError> {
        if self.h_active == 0 || self.v_active == 0 {
            return Err(TimingError::EmptyActiveArea {
                h_active: self.h_active,
                v_active: self.v_active,
            });
        }
        let h_sum =
            self.h_active as u32 + self.h_fp as u32 + self.h_sync as u32 + self.h_bp as u32;
        if h_sum != self.h_total as u32 {
            return Err(TimingError::HorizontalTotalMismatch {
                total: self.h_total,
                sum: h_sum,
            });
        }
        let v_sum =
            self.v_active as u32 + self.v_fp as u32 + self.v_sync as u32 + self.v_bp as u32;
        if v_sum != self.v_total as u32 {
            return Err(TimingError::VerticalTotalMismatch {
                total: self.v_total,
                sum: v_sum,
            });
        }
        Ok(())
    }

    pub fn h_blank(&self) -> u16 {
        self.h_fp + self.h_sync + self.h_bp
    }
    pub fn v_blank(&self) -> u16 {
        self.v_fp + self.v_sync + self.v_bp
    }

    /// First pixel of the hsync pulse within a line.
    pub fn h_sync_start(&self) -> u16 {
        self.h_active + self.h_fp
    }
    pub fn h_sync_end(&self) -> u16 {
        self.h_active + self.h_fp + self.h_sync
    }
    /// First line of the vsync pulse within a frame.
    pub fn v_sync_start(&self) -> u16 {
        self.v_active + self.v_fp
    }
    pub fn v_sync_end(&self) -> u16 {
        self.v_active + self.v_fp + self.v_sync
    }

    pub fn pixel_tot(&self) -> u32 {
        self.h_total as u32 * self.v_total as u32
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(TIMING_800X600)]
    #[case(TIMING_640X480)]
    fn test_builtin_profiles_validate(#[case] t: Timing) {
        t.validate().unwrap();
        assert_eq!(t.h_active + t.h_blank(), t.h_total);
        assert_eq!(t.v_active + t.v_blank(), t.v_total);
    }

    #[test]
    fn test_svga_windows() {
        let t = TIMING_800X600;
        assert_eq!(t.h_sync_start(), 840);
        assert_eq!(t.h_sync_end(), 968);
        assert_eq!(t.v_sync_start(), 601);
        assert_eq!(t.v_sync_end(), 605);
        assert_eq!(t.pixel_tot(), 1056 * 628);
    }

    #[test]
    fn test_bad_horizontal_total() {
        let t = Timing {
            h_total: 1000,
            ..TIMING_800X600
        };
        assert_eq!(
            t.validate(),
            Err(TimingError::HorizontalTotalMismatch {
                total: 1000,
                sum: 1056
            })
        );
    }

    #[test]
    fn test_bad_vertical_total() {
        let t = Timing {
            v_fp: 2,
            ..TIMING_800X600
        };
        assert_eq!(
            t.validate(),
            Err(TimingError::VerticalTotalMismatch {
                total: 628,
                sum: 629
            })
        );
    }

    #[test]
    fn test_empty_active_area() {
        let t = Timing {
            h_active: 0,
            h_bp: 888,
            ..TIMING_800X600
        };
        assert!(matches!(
            t.validate(),
            Err(TimingError::EmptyActiveArea { .. })
        ));
    }
}
