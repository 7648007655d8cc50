use std::error::Error;
use std::io::{IsTerminal, stdout};

use clap::Parser;
use tracing::{Level, info, trace};

use raster_sync::{SyncGen, TIMING_640X480, TIMING_800X600, Timing};

/// Raster sync timing simulator
/// Runs a timing profile for a number of frames and checks the measured
/// pulse widths against the profile.
#[derive(Parser)]
#[command(name = "raster-sync")]
#[command(about = "Simulate raster sync timing and report measured pulse widths")]
struct Args {
    /// Timing profile (800x600 or 640x480)
    #[arg(long, default_value = "800x600", value_parser = parse_mode)]
    mode: Timing,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 3)]
    frames: u32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_mode(s: &str) -> Result<Timing, String> {
    match s {
        "800x600" => Ok(TIMING_800X600),
        "640x480" => Ok(TIMING_640X480),
        _ => Err(format!("unknown mode {s:?}, expected 800x600 or 640x480")),
    }
}

/// Completed-pulse widths for one signal, folded to count/min/max.
#[derive(Default)]
struct PulseStats {
    count: u64,
    min: u64,
    max: u64,
    rose_at: u64,
}

impl PulseStats {
    fn edge(&mut self, now: u64, level: bool, prev: bool) {
        if level && !prev {
            self.rose_at = now;
        } else if !level && prev {
            let width = now - self.rose_at;
            self.count += 1;
            self.min = if self.count == 1 {
                width
            } else {
                self.min.min(width)
            };
            self.max = self.max.max(width);
        }
    }

    fn check(&self, name: &str, width: u64, count: u64, failures: &mut Vec<String>) {
        info!(
            "{name}: {} pulses, width {}..{} ticks (expected {count} x {width})",
            self.count, self.min, self.max
        );
        if self.count != count || self.min != width || self.max != width {
            failures.push(format!(
                "{name}: got {} pulses of {}..{} ticks, expected {count} x {width}",
                self.count, self.min, self.max
            ));
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = if args.verbose {
        Level::TRACE
    } else {
        Level::INFO
    };
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .with_line_number(false)
        .with_level(false)
        .without_time();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .event_format(format)
        .with_ansi(stdout().is_terminal())
        .init();

    let t = args.mode;
    let mut g = SyncGen::new(t)?;

    info!(
        "mode {}x{}: Htot {} ticks, Vtot {} lines, {} ticks/frame",
        t.h_active,
        t.v_active,
        t.h_total,
        t.v_total,
        t.pixel_tot()
    );

    // Bring the part out of reset, then raise enable.
    g.tick(true, false, false);
    g.tick(false, false, false);

    let mut active = PulseStats::default();
    let mut h_sync = PulseStats::default();
    let mut v_sync = PulseStats::default();
    let mut prev = (false, false, false);

    let total = args.frames as u64 * t.pixel_tot() as u64;
    for now in 1..=total {
        let out = g.tick(false, true, false);
        active.edge(now, out.0, prev.0);
        h_sync.edge(now, out.1, prev.1);
        v_sync.edge(now, out.2, prev.2);
        if out.2 && !prev.2 {
            trace!(
                "vsync rising at tick {now}, line {} ({:?})",
                g.y(),
                g.v_phase()
            );
        }
        prev = out;
    }

    let frames = args.frames as u64;
    let mut failures = Vec::new();
    active.check(
        "active",
        t.h_active as u64,
        frames * t.v_active as u64,
        &mut failures,
    );
    h_sync.check(
        "hsync",
        t.h_sync as u64,
        frames * t.v_total as u64,
        &mut failures,
    );
    v_sync.check(
        "vsync",
        t.v_sync as u64 * t.h_total as u64,
        frames,
        &mut failures,
    );

    if failures.is_empty() {
        info!("{frames} frames OK");
        Ok(())
    } else {
        Err(failures.join("; ").into())
    }
}
