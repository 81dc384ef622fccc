//! Keep-alive sample rendering
//!
//! One renderer per output stream. All channels of a frame carry the same
//! sample; the renderer tracks its own position so periodic windows and fades
//! stay continuous across callbacks.

use rand::Rng;
use std::f64::consts::TAU;

use crate::config::{StreamParameters, StreamType};
use crate::constants::FLUCTUATE_STEP;

/// Stateful sample generator for one output stream
pub struct Renderer {
    stream_type: StreamType,
    params: StreamParameters,
    sample_rate: u32,
    /// Frames rendered so far
    position: u64,
    /// Current sign of the fluctuate dither
    flip: f32,
}

impl Renderer {
    pub fn new(stream_type: StreamType, params: StreamParameters, sample_rate: u32) -> Self {
        Self {
            stream_type,
            params,
            sample_rate,
            position: 0,
            flip: 1.0,
        }
    }

    /// Fill an interleaved output buffer, duplicating each sample across all
    /// channels of its frame.
    pub fn fill(&mut self, buffer: &mut [f32], channels: u16) {
        let channels = channels.max(1) as usize;
        for frame in buffer.chunks_mut(channels) {
            let sample = self.next_sample();
            for slot in frame {
                *slot = sample;
            }
        }
    }

    fn next_sample(&mut self) -> f32 {
        let t = self.position as f64 / self.sample_rate.max(1) as f64;
        self.position += 1;

        match self.stream_type {
            StreamType::Zero => 0.0,
            StreamType::Fluctuate => {
                self.flip = -self.flip;
                self.flip * FLUCTUATE_STEP
            }
            StreamType::Sine => {
                let envelope = self.envelope(t);
                if envelope <= 0.0 {
                    return 0.0;
                }
                let tone = (TAU * self.params.frequency_hz * t).sin();
                (self.params.amplitude * envelope * tone) as f32
            }
            StreamType::WhiteNoise => {
                let envelope = self.envelope(t);
                if envelope <= 0.0 {
                    return 0.0;
                }
                let noise: f64 = rand::rng().random_range(-1.0..=1.0);
                (self.params.amplitude * envelope * noise) as f32
            }
        }
    }

    /// Fade and periodic-window gain in `0..=1` at time `t`.
    ///
    /// With a periodic cycle configured the signal plays for the playing
    /// window (fading in and out inside it) and stays silent for the waiting
    /// window. Without one it fades in once and then holds.
    fn envelope(&self, t: f64) -> f64 {
        let playing = self.params.periodic_playing_secs;
        let waiting = self.params.periodic_waiting_secs;
        let cycle = playing + waiting;

        if cycle > 0.0 {
            if playing <= 0.0 {
                return 0.0;
            }
            let phase = t % cycle;
            if phase >= playing {
                return 0.0;
            }
            windowed_fade(phase, playing, self.params.fading_secs)
        } else if self.params.fading_secs > 0.0 {
            (t / self.params.fading_secs).min(1.0)
        } else {
            1.0
        }
    }
}

/// Linear fade-in and fade-out inside a playing window of `window` seconds.
fn windowed_fade(phase: f64, window: f64, fading: f64) -> f64 {
    if fading <= 0.0 {
        return 1.0;
    }
    let fading = fading.min(window / 2.0);
    if phase < fading {
        phase / fading
    } else if phase > window - fading {
        ((window - phase) / fading).max(0.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 48000;

    fn params() -> StreamParameters {
        StreamParameters::default()
    }

    fn render_seconds(renderer: &mut Renderer, seconds: f64) -> Vec<f32> {
        let mut buffer = vec![0.0; (seconds * RATE as f64) as usize];
        renderer.fill(&mut buffer, 1);
        buffer
    }

    #[test]
    fn zero_stream_is_silent() {
        let mut renderer = Renderer::new(StreamType::Zero, params(), RATE);
        let samples = render_seconds(&mut renderer, 0.5);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn fluctuate_is_nonzero_but_sub_audible() {
        let mut renderer = Renderer::new(StreamType::Fluctuate, params(), RATE);
        let samples = render_seconds(&mut renderer, 0.1);
        assert!(samples.iter().any(|&s| s != 0.0));
        assert!(samples.iter().all(|&s| s.abs() <= FLUCTUATE_STEP));
        // Zero DC offset: the dither alternates sign every sample.
        let sum: f32 = samples.iter().sum();
        assert_eq!(sum, 0.0);
    }

    #[test]
    fn sine_respects_amplitude_bound() {
        let mut p = params();
        p.frequency_hz = 440.0;
        p.amplitude = 0.5;
        let mut renderer = Renderer::new(StreamType::Sine, p, RATE);
        let samples = render_seconds(&mut renderer, 1.0);
        assert!(samples.iter().all(|&s| s.abs() <= 0.5 + 1e-6));
        assert!(samples.iter().any(|&s| s.abs() > 0.4));
    }

    #[test]
    fn sine_fades_in_from_silence() {
        let mut p = params();
        p.frequency_hz = 440.0;
        p.amplitude = 1.0;
        p.fading_secs = 0.5;
        let mut renderer = Renderer::new(StreamType::Sine, p, RATE);
        let samples = render_seconds(&mut renderer, 1.0);
        // Early samples sit under the fade ramp; later ones reach full swing.
        let early_peak = samples[..480].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        let late_peak = samples[24000..].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(early_peak < 0.05);
        assert!(late_peak > 0.9);
    }

    #[test]
    fn periodic_wait_phase_is_silent() {
        let mut p = params();
        p.frequency_hz = 440.0;
        p.amplitude = 1.0;
        p.fading_secs = 0.0;
        p.periodic_playing_secs = 1.0;
        p.periodic_waiting_secs = 1.0;
        let mut renderer = Renderer::new(StreamType::Sine, p, RATE);
        let samples = render_seconds(&mut renderer, 2.0);
        let playing = &samples[..RATE as usize];
        let waiting = &samples[RATE as usize..];
        assert!(playing.iter().any(|&s| s != 0.0));
        assert!(waiting.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn zero_length_playing_window_is_silent() {
        let mut p = params();
        p.amplitude = 1.0;
        p.periodic_playing_secs = 0.0;
        p.periodic_waiting_secs = 5.0;
        let mut renderer = Renderer::new(StreamType::Sine, p, RATE);
        let samples = render_seconds(&mut renderer, 0.5);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn noise_respects_amplitude_bound() {
        let mut p = params();
        p.amplitude = 0.25;
        p.fading_secs = 0.0;
        let mut renderer = Renderer::new(StreamType::WhiteNoise, p, RATE);
        let samples = render_seconds(&mut renderer, 0.5);
        assert!(samples.iter().any(|&s| s != 0.0));
        assert!(samples.iter().all(|&s| s.abs() <= 0.25 + 1e-6));
    }

    #[test]
    fn fill_duplicates_sample_across_channels() {
        let mut p = params();
        p.frequency_hz = 440.0;
        p.amplitude = 1.0;
        let mut renderer = Renderer::new(StreamType::Sine, p, RATE);
        let mut buffer = vec![0.0; 64];
        renderer.fill(&mut buffer, 2);
        for frame in buffer.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
    }
}
