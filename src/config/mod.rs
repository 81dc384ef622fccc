//! Keep-alive configuration: types, resolution deltas, and folding
//!
//! Configuration is resolved from two mode texts (the executable's base name,
//! then the command-line trailer). Each text is parsed into a [`ModeDelta`], a
//! partially-populated record that only names the fields the text actually set.
//! The orchestrator folds deltas onto engine defaults in that fixed order, so a
//! later delta wins on any field it touches while leaving the rest alone.

pub mod mode;
pub mod params;
pub mod sources;

use crate::constants::{DEFAULT_AMPLITUDE, DEFAULT_FADING_SECS, DEFAULT_FREQUENCY_HZ};

/// Which output endpoints the keep-alive stream targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    /// No endpoints at all; the engine exits immediately
    None,
    /// The default output endpoint only
    Primary,
    /// Every output endpoint
    All,
    /// Output endpoints classified as analog
    Analog,
    /// Output endpoints classified as digital (SPDIF, HDMI, ...)
    Digital,
}

/// What signal the keep-alive stream renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamType {
    /// Digital silence
    Zero,
    /// A sub-audible one-LSB dither
    Fluctuate,
    /// A sine tone, shaped by [`StreamParameters`]
    Sine,
    /// White noise, shaped by [`StreamParameters`]
    WhiteNoise,
}

/// Numeric parameters for the sine and noise streams
///
/// Every field holds the absolute value of its parsed input, clamped per field
/// by the tokenizer before it ever lands here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamParameters {
    /// Tone frequency in Hz, at most 96000
    pub frequency_hz: f64,
    /// Peak amplitude on a 0..=1 scale
    pub amplitude: f64,
    /// Fade-in/out duration in seconds
    pub fading_secs: f64,
    /// Length of the periodic playing window in seconds; 0 means continuous
    pub periodic_playing_secs: f64,
    /// Length of the periodic silence window in seconds
    pub periodic_waiting_secs: f64,
}

impl Default for StreamParameters {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            amplitude: DEFAULT_AMPLITUDE,
            fading_secs: DEFAULT_FADING_SECS,
            periodic_playing_secs: 0.0,
            periodic_waiting_secs: 0.0,
        }
    }
}

/// The complete resolved configuration handed to the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeepAliveConfig {
    pub device_type: DeviceType,
    pub stream_type: StreamType,
    pub params: StreamParameters,
}

impl Default for KeepAliveConfig {
    /// Engine-level defaults, before any mode text is applied
    fn default() -> Self {
        Self {
            device_type: DeviceType::Primary,
            stream_type: StreamType::Fluctuate,
            params: StreamParameters::default(),
        }
    }
}

impl KeepAliveConfig {
    /// Fold one resolution delta into this configuration.
    ///
    /// Only fields the delta explicitly set are written; everything else keeps
    /// its current value. Applying the same delta twice is a no-op after the
    /// first application.
    pub fn apply(&mut self, delta: &ModeDelta) {
        if let Some(device_type) = delta.device_type {
            self.device_type = device_type;
        }
        if let Some(stream) = &delta.stream {
            self.stream_type = stream.stream_type;
            if let Some(v) = stream.frequency_hz {
                self.params.frequency_hz = v;
            }
            if let Some(v) = stream.amplitude {
                self.params.amplitude = v;
            }
            if let Some(v) = stream.fading_secs {
                self.params.fading_secs = v;
            }
            if let Some(v) = stream.periodic_playing_secs {
                self.params.periodic_playing_secs = v;
            }
            if let Some(v) = stream.periodic_waiting_secs {
                self.params.periodic_waiting_secs = v;
            }
        }
    }

    /// Resolve a configuration from the two mode texts in precedence order:
    /// engine defaults, then the executable base name, then the command line.
    pub fn resolve(exe_basename: &str, command_line: &str) -> Self {
        let mut config = Self::default();
        config.apply(&mode::parse_mode(exe_basename));
        config.apply(&mode::parse_mode(command_line));
        config
    }
}

/// Result of resolving one mode text: only the touched fields are populated
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModeDelta {
    pub device_type: Option<DeviceType>,
    pub stream: Option<StreamDelta>,
}

/// Stream-type selection plus any parameter assignments that came with it
///
/// Recognizing a sine/noise directive resets frequency, amplitude, and fading
/// to their directive defaults, so those three are always populated for tone
/// streams. The periodic fields are only populated when their flag appeared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamDelta {
    pub stream_type: StreamType,
    pub frequency_hz: Option<f64>,
    pub amplitude: Option<f64>,
    pub fading_secs: Option<f64>,
    pub periodic_playing_secs: Option<f64>,
    pub periodic_waiting_secs: Option<f64>,
}

impl StreamDelta {
    /// Delta for a parameterless stream directive (zero/null)
    pub fn plain(stream_type: StreamType) -> Self {
        Self {
            stream_type,
            frequency_hz: None,
            amplitude: None,
            fading_secs: None,
            periodic_playing_secs: None,
            periodic_waiting_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_defaults() {
        let config = KeepAliveConfig::default();
        assert_eq!(config.device_type, DeviceType::Primary);
        assert_eq!(config.stream_type, StreamType::Fluctuate);
        assert_eq!(config.params.frequency_hz, 1.0);
        assert_eq!(config.params.amplitude, 0.01);
        assert_eq!(config.params.fading_secs, 0.1);
        assert_eq!(config.params.periodic_playing_secs, 0.0);
        assert_eq!(config.params.periodic_waiting_secs, 0.0);
    }

    #[test]
    fn empty_delta_changes_nothing() {
        let mut config = KeepAliveConfig::default();
        config.params.frequency_hz = 440.0;
        let before = config;
        config.apply(&ModeDelta::default());
        assert_eq!(config, before);
    }

    #[test]
    fn command_line_overrides_basename_per_field() {
        // Basename picks digital endpoints and a tuned sine; the command line
        // switches the stream to noise, which re-applies the tone defaults but
        // leaves the device selection from pass 1 in place.
        let config = KeepAliveConfig::resolve("DigitalSine f440", "noise");
        assert_eq!(config.device_type, DeviceType::Digital);
        assert_eq!(config.stream_type, StreamType::WhiteNoise);
        assert_eq!(config.params.frequency_hz, 1.0);
        assert_eq!(config.params.amplitude, 0.01);
    }

    #[test]
    fn basename_survives_untouched_fields() {
        let config = KeepAliveConfig::resolve("sine f440", "all");
        assert_eq!(config.device_type, DeviceType::All);
        assert_eq!(config.stream_type, StreamType::Sine);
        assert_eq!(config.params.frequency_hz, 440.0);
    }

    #[test]
    fn applying_same_delta_twice_is_idempotent() {
        let delta = mode::parse_mode("sine f=440 l=5 w=10");
        let mut once = KeepAliveConfig::default();
        once.apply(&delta);
        let mut twice = KeepAliveConfig::default();
        twice.apply(&delta);
        twice.apply(&delta);
        assert_eq!(once, twice);
        assert_eq!(twice.params.periodic_playing_secs, 5.0);
        assert_eq!(twice.params.periodic_waiting_secs, 10.0);
    }

    #[test]
    fn periodic_fields_survive_stream_reset() {
        let mut config = KeepAliveConfig::default();
        config.apply(&mode::parse_mode("sine l=5 w=10"));
        config.apply(&mode::parse_mode("sine f=440"));
        assert_eq!(config.params.frequency_hz, 440.0);
        assert_eq!(config.params.periodic_playing_secs, 5.0);
        assert_eq!(config.params.periodic_waiting_secs, 10.0);
    }
}
