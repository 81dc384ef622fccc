//! The keep-alive engine
//!
//! Holds a finished [`KeepAliveConfig`], opens one output stream per selected
//! endpoint, and blocks for the life of the process. The endpoint set is
//! re-checked on a fixed interval so device arrivals, removals, and stream
//! errors rebuild the streams instead of killing the process.

use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use crossbeam_channel::{bounded, Sender};
use std::thread;
use std::time::Duration;

use crate::config::{DeviceType, KeepAliveConfig, StreamType};
use crate::constants::{DEVICE_RESCAN_INTERVAL_MS, ERROR_CHANNEL_CAPACITY};
use crate::engine::device::{select_endpoints, OutputEndpoint};
use crate::engine::render::Renderer;
use crate::error::AudioError;

/// Streams currently playing, with the endpoint names they were built for
struct ActiveStreams {
    names: Vec<String>,
    // Held only to keep the streams alive; dropped on rebuild.
    _streams: Vec<cpal::Stream>,
}

impl ActiveStreams {
    fn empty() -> Self {
        Self {
            names: Vec::new(),
            _streams: Vec::new(),
        }
    }
}

/// The engine the resolved configuration is handed to, exactly once.
pub struct KeepAliveEngine {
    config: KeepAliveConfig,
}

impl KeepAliveEngine {
    pub fn new() -> Self {
        Self {
            config: KeepAliveConfig::default(),
        }
    }

    /// Replace the whole stored configuration.
    pub fn configure(&mut self, config: KeepAliveConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &KeepAliveConfig {
        &self.config
    }

    // Field setters and getters. Plain last-write-wins storage; clamping
    // happened in the resolution layer.

    pub fn set_device_type(&mut self, device_type: DeviceType) {
        self.config.device_type = device_type;
    }

    pub fn device_type(&self) -> DeviceType {
        self.config.device_type
    }

    pub fn set_stream_type(&mut self, stream_type: StreamType) {
        self.config.stream_type = stream_type;
    }

    pub fn stream_type(&self) -> StreamType {
        self.config.stream_type
    }

    pub fn set_frequency(&mut self, hz: f64) {
        self.config.params.frequency_hz = hz;
    }

    pub fn frequency(&self) -> f64 {
        self.config.params.frequency_hz
    }

    pub fn set_amplitude(&mut self, amplitude: f64) {
        self.config.params.amplitude = amplitude;
    }

    pub fn amplitude(&self) -> f64 {
        self.config.params.amplitude
    }

    pub fn set_fading(&mut self, seconds: f64) {
        self.config.params.fading_secs = seconds;
    }

    pub fn fading(&self) -> f64 {
        self.config.params.fading_secs
    }

    pub fn set_periodic_playing(&mut self, seconds: f64) {
        self.config.params.periodic_playing_secs = seconds;
    }

    pub fn periodic_playing(&self) -> f64 {
        self.config.params.periodic_playing_secs
    }

    pub fn set_periodic_waiting(&mut self, seconds: f64) {
        self.config.params.periodic_waiting_secs = seconds;
    }

    pub fn periodic_waiting(&self) -> f64 {
        self.config.params.periodic_waiting_secs
    }

    /// Run the keep-alive probe. Blocks until process termination; only a
    /// fatal initialization failure returns an error. `DeviceType::None`
    /// returns success immediately.
    pub fn run(&self) -> Result<(), AudioError> {
        if self.config.device_type == DeviceType::None {
            tracing::info!("Device type is None, nothing to keep awake");
            return Ok(());
        }

        let (error_tx, error_rx) = bounded::<AudioError>(ERROR_CHANNEL_CAPACITY);
        let mut active = self.open_streams(&error_tx)?;

        loop {
            thread::sleep(Duration::from_millis(DEVICE_RESCAN_INTERVAL_MS));

            let mut rebuild = false;
            while let Ok(err) = error_rx.try_recv() {
                tracing::warn!("Output stream error: {}", err);
                rebuild = true;
            }

            let mut names: Vec<String> = select_endpoints(self.config.device_type)
                .iter()
                .map(|e| e.name.clone())
                .collect();
            names.sort();
            if names != active.names {
                tracing::info!("Output endpoint set changed, rebuilding streams");
                rebuild = true;
            }

            if rebuild {
                // Old streams must be gone before the endpoints are reopened.
                active = ActiveStreams::empty();
                match self.open_streams(&error_tx) {
                    Ok(streams) => active = streams,
                    Err(err) => {
                        // Endpoints may come back; keep rescanning.
                        tracing::warn!("Rebuild failed: {}; retrying", err);
                    }
                }
            }
        }
    }

    /// Open one output stream per selected endpoint. Individual endpoints may
    /// be skipped with a warning; failing to open any stream is an error.
    fn open_streams(&self, error_tx: &Sender<AudioError>) -> Result<ActiveStreams, AudioError> {
        let endpoints = select_endpoints(self.config.device_type);
        if endpoints.is_empty() {
            return Err(AudioError::NoEndpoint(format!(
                "no output endpoint matches {:?}",
                self.config.device_type
            )));
        }

        // Remember every selected endpoint, opened or skipped, so the rescan
        // comparison stays stable when an endpoint is unusable.
        let mut names: Vec<String> = endpoints.iter().map(|e| e.name.clone()).collect();
        let mut streams = Vec::new();
        for endpoint in &endpoints {
            match self.open_stream(endpoint, error_tx) {
                Ok(stream) => streams.push(stream),
                Err(err) => {
                    tracing::warn!("Skipping endpoint {}: {}", endpoint.name, err);
                }
            }
        }

        if streams.is_empty() {
            return Err(AudioError::StreamError(
                "could not open a stream on any selected endpoint".to_string(),
            ));
        }

        names.sort();
        Ok(ActiveStreams {
            names,
            _streams: streams,
        })
    }

    fn open_stream(
        &self,
        endpoint: &OutputEndpoint,
        error_tx: &Sender<AudioError>,
    ) -> Result<cpal::Stream, AudioError> {
        let supported = endpoint.default_output_config()?;
        if supported.sample_format() != SampleFormat::F32 {
            return Err(AudioError::UnsupportedFormat(format!(
                "{:?} output is not supported",
                supported.sample_format()
            )));
        }

        let config: StreamConfig = supported.into();
        let channels = config.channels;
        let sample_rate = config.sample_rate.0;
        let mut renderer = Renderer::new(self.config.stream_type, self.config.params, sample_rate);
        let error_tx = error_tx.clone();

        let stream = endpoint
            .inner()
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    renderer.fill(data, channels);
                },
                move |err| {
                    let _ = error_tx.try_send(AudioError::StreamError(err.to_string()));
                },
                None,
            )
            .map_err(|e| AudioError::StreamError(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamError(e.to_string()))?;

        tracing::info!(
            "Keeping {} awake ({} Hz, {} channels)",
            endpoint.name,
            sample_rate,
            channels
        );
        Ok(stream)
    }
}

impl Default for KeepAliveEngine {
    fn default() -> Self {
        Self::new()
    }
}
