//! Output endpoint enumeration and selection

use cpal::traits::{DeviceTrait, HostTrait};

use crate::config::DeviceType;
use crate::error::AudioError;

/// Wrapper around a cpal output device
pub struct OutputEndpoint {
    inner: cpal::Device,
    pub name: String,
    pub is_default: bool,
}

impl OutputEndpoint {
    pub fn from_cpal(device: cpal::Device, is_default: bool) -> Self {
        let name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        Self {
            inner: device,
            name,
            is_default,
        }
    }

    pub fn inner(&self) -> &cpal::Device {
        &self.inner
    }

    /// Get default output config
    pub fn default_output_config(&self) -> Result<cpal::SupportedStreamConfig, AudioError> {
        self.inner
            .default_output_config()
            .map_err(|e| AudioError::UnsupportedFormat(e.to_string()))
    }
}

/// Name fragments that mark an endpoint as a digital transport
const DIGITAL_MARKERS: [&str; 7] = [
    "spdif", "s/pdif", "hdmi", "digital", "optical", "toslink", "adat",
];

/// Classify an endpoint as digital by its name. Anything else counts as
/// analog; the driver name is the only signal cpal exposes for this.
pub fn is_digital_endpoint(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    DIGITAL_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// List all available output endpoints
pub fn list_output_endpoints() -> Vec<OutputEndpoint> {
    let host = cpal::default_host();
    let mut endpoints = Vec::new();

    let default_name = host.default_output_device().and_then(|d| d.name().ok());

    if let Ok(devices) = host.output_devices() {
        for device in devices {
            if let Ok(name) = device.name() {
                let is_default = default_name.as_ref() == Some(&name);
                endpoints.push(OutputEndpoint::from_cpal(device, is_default));
            }
        }
    }

    endpoints
}

/// Select the endpoints a device-type tag targets. An empty vec is a valid
/// result; whether that is fatal is the caller's call.
pub fn select_endpoints(device_type: DeviceType) -> Vec<OutputEndpoint> {
    match device_type {
        DeviceType::None => Vec::new(),
        DeviceType::Primary => {
            let host = cpal::default_host();
            host.default_output_device()
                .map(|d| vec![OutputEndpoint::from_cpal(d, true)])
                .unwrap_or_default()
        }
        DeviceType::All => list_output_endpoints(),
        DeviceType::Analog => list_output_endpoints()
            .into_iter()
            .filter(|e| !is_digital_endpoint(&e.name))
            .collect(),
        DeviceType::Digital => list_output_endpoints()
            .into_iter()
            .filter(|e| is_digital_endpoint(&e.name))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digital_classification_by_name() {
        assert!(is_digital_endpoint("Digital Output (S/PDIF)"));
        assert!(is_digital_endpoint("HDMI Audio"));
        assert!(is_digital_endpoint("SPDIF Out"));
        assert!(is_digital_endpoint("Optical TOSLINK"));
        assert!(!is_digital_endpoint("Speakers (Realtek High Definition Audio)"));
        assert!(!is_digital_endpoint("Headphones"));
    }

    #[test]
    fn none_selects_nothing() {
        assert!(select_endpoints(DeviceType::None).is_empty());
    }
}
