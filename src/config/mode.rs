//! Mode directive resolver
//!
//! Recognizes device-type and stream-type keywords in a mode text by
//! case-insensitive substring search. The grammar is permissive: unrecognized
//! text is ignored, never rejected.

use super::params::parse_stream_args;
use super::{DeviceType, ModeDelta, StreamDelta, StreamType};

/// Device keywords in their fixed scan order. The checks are not mutually
/// exclusive and each hit overwrites the previous one, so the last matching
/// keyword in THIS order wins, regardless of where the keywords sit in the
/// text. "all digital kill" resolves to None, not Digital.
const DEVICE_KEYWORDS: [(&str, DeviceType); 4] = [
    ("all", DeviceType::All),
    ("analog", DeviceType::Analog),
    ("digital", DeviceType::Digital),
    ("kill", DeviceType::None),
];

/// Resolve one mode text into a delta. Never fails; a text without any
/// recognized keyword yields an empty delta.
pub fn parse_mode(text: &str) -> ModeDelta {
    let lower = text.to_ascii_lowercase();
    let mut delta = ModeDelta::default();

    for (keyword, device_type) in DEVICE_KEYWORDS {
        if lower.contains(keyword) {
            delta.device_type = Some(device_type);
        }
    }

    // Stream keywords are mutually exclusive, first match wins.
    if lower.contains("zero") || lower.contains("null") {
        delta.stream = Some(StreamDelta::plain(StreamType::Zero));
    } else if let Some(pos) = lower.find("sine") {
        delta.stream = Some(parse_stream_args(StreamType::Sine, &lower[pos + 4..]));
    } else if let Some(pos) = lower.find("noise") {
        delta.stream = Some(parse_stream_args(StreamType::WhiteNoise, &lower[pos + 5..]));
    }

    delta
}
