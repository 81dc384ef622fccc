//! # Sound Keeper
//!
//! Prevents idle audio endpoints (SPDIF/HDMI receivers, auto-suspending speakers)
//! from going to sleep by playing an inaudible keep-alive signal on them.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐     ┌──────────────────────┐
//! │ Executable base name │     │ Command-line trailer │
//! └──────────┬───────────┘     └──────────┬───────────┘
//!            │ pass 1                     │ pass 2 (wins per field)
//!            ▼                            ▼
//!       ┌─────────────────────────────────────┐
//!       │  Mode resolver (config::mode)       │
//!       │  keyword scan + parameter tokenizer │
//!       └──────────────────┬──────────────────┘
//!                          │ ModeDelta, folded in fixed order
//!                          ▼
//!       ┌─────────────────────────────────────┐
//!       │  KeepAliveConfig (config)           │
//!       │  device type, stream type, params   │
//!       └──────────────────┬──────────────────┘
//!                          │ handed over exactly once
//!                          ▼
//!       ┌─────────────────────────────────────┐
//!       │  KeepAliveEngine (engine::keeper)   │
//!       │  endpoint selection, cpal streams,  │
//!       │  sample rendering, rescan loop      │
//!       └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use error::{Error, Result};

/// Application-wide constants
pub mod constants {
    /// Frequency applied when a sine/noise directive is recognized (Hz)
    pub const DEFAULT_FREQUENCY_HZ: f64 = 1.0;

    /// Amplitude applied when a sine/noise directive is recognized (0..=1 scale)
    pub const DEFAULT_AMPLITUDE: f64 = 0.01;

    /// Fade duration applied when a sine/noise directive is recognized (seconds)
    pub const DEFAULT_FADING_SECS: f64 = 0.1;

    /// Upper bound for the frequency flag (Hz)
    pub const MAX_FREQUENCY_HZ: f64 = 96000.0;

    /// Upper bound for the amplitude after percent scaling
    pub const MAX_AMPLITUDE: f64 = 1.0;

    /// One quantization step at 16-bit scale, used by the fluctuate stream
    pub const FLUCTUATE_STEP: f32 = 1.0 / 65536.0;

    /// How often the engine re-checks the endpoint set (milliseconds)
    pub const DEVICE_RESCAN_INTERVAL_MS: u64 = 1000;

    /// Capacity of the stream-error channel shared by all output streams
    pub const ERROR_CHANNEL_CAPACITY: usize = 16;
}
