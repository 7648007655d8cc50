//! Raster display sync timing, driven one pixel clock tick at a time.
//!
//! [`SyncGen`] turns a [`Timing`] profile into the three signals a
//! raster pipeline hangs off: active video, horizontal sync and
//! vertical sync. It is a pure in-process unit meant to be embedded
//! ahead of whatever generates pixel data.

pub mod sync_gen;
pub mod timing;

pub use sync_gen::{SyncGen, SyncPhase};
pub use timing::{TIMING_640X480, TIMING_800X600, Timing, TimingError};
