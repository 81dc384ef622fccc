//! Sound Keeper binary
//!
//! Resolves the keep-alive configuration from the executable's own file name
//! and the command-line trailer, hands it to the engine once, and surfaces the
//! engine's status as the process exit code.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use soundkeeper::config::{mode, sources, DeviceType, KeepAliveConfig, StreamType};
use soundkeeper::engine::KeepAliveEngine;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = KeepAliveConfig::default();

    // Pass 1: the executable's base name carries defaults for renamed copies.
    if let Some(exe_name) = sources::executable_mode_text() {
        tracing::debug!("Executable file name: {}", exe_name);
        config.apply(&mode::parse_mode(&exe_name));
    }

    // Pass 2: the command-line trailer wins on any field it sets.
    let trailer = sources::command_line_mode_text();
    if !trailer.is_empty() {
        tracing::debug!("Command line: {}", trailer);
        config.apply(&mode::parse_mode(&trailer));
    }

    log_configuration(&config);

    let mut engine = KeepAliveEngine::new();
    engine.configure(config);
    engine.run()?;
    Ok(())
}

fn log_configuration(config: &KeepAliveConfig) {
    match config.device_type {
        DeviceType::None => tracing::info!("Device type: None"),
        DeviceType::Primary => tracing::info!("Device type: Primary"),
        DeviceType::All => tracing::info!("Device type: All"),
        DeviceType::Analog => tracing::info!("Device type: Analog"),
        DeviceType::Digital => tracing::info!("Device type: Digital"),
    }

    match config.stream_type {
        StreamType::Zero => tracing::info!("Stream type: Zero"),
        StreamType::Fluctuate => tracing::info!("Stream type: Fluctuate"),
        StreamType::Sine => tracing::info!(
            "Stream type: Sine (frequency: {:.3} Hz; amplitude: {:.3}%; fading: {:.3}s)",
            config.params.frequency_hz,
            config.params.amplitude * 100.0,
            config.params.fading_secs
        ),
        StreamType::WhiteNoise => tracing::info!(
            "Stream type: White Noise (amplitude: {:.3}%; fading: {:.3}s)",
            config.params.amplitude * 100.0,
            config.params.fading_secs
        ),
    }

    if config.params.periodic_playing_secs > 0.0 || config.params.periodic_waiting_secs > 0.0 {
        tracing::info!(
            "Periodicity: play {:.3}s, wait {:.3}s",
            config.params.periodic_playing_secs,
            config.params.periodic_waiting_secs
        );
    }
}
