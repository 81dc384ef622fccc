//! Stream-argument tokenizer
//!
//! Scans the text after a sine/noise keyword for flagged numeric settings with
//! an explicit cursor. Each loop iteration advances the cursor by at least one
//! byte, so the scan always terminates, and the first byte that is neither a
//! separator nor a known flag letter ends it.

use super::{StreamDelta, StreamType};
use crate::constants::{
    DEFAULT_AMPLITUDE, DEFAULT_FADING_SECS, DEFAULT_FREQUENCY_HZ, MAX_AMPLITUDE, MAX_FREQUENCY_HZ,
};

/// Tokenize the flags trailing a stream directive.
///
/// Recognizing the directive re-applies the tone defaults (frequency 1 Hz,
/// amplitude 1%, fading 0.1 s); the periodic fields are only set when their
/// flag is present. Values are taken as absolute and clamped per field.
pub fn parse_stream_args(stream_type: StreamType, args: &str) -> StreamDelta {
    let mut delta = StreamDelta {
        stream_type,
        frequency_hz: Some(DEFAULT_FREQUENCY_HZ),
        amplitude: Some(DEFAULT_AMPLITUDE),
        fading_secs: Some(DEFAULT_FADING_SECS),
        periodic_playing_secs: None,
        periodic_waiting_secs: None,
    };

    let bytes = args.as_bytes();
    let mut cursor = 0;
    while cursor < bytes.len() {
        match bytes[cursor] {
            b' ' | b'-' => cursor += 1,
            flag @ (b'f' | b'a' | b'l' | b'w' | b't') => {
                cursor += 1;
                while cursor < bytes.len() && matches!(bytes[cursor], b' ' | b'=') {
                    cursor += 1;
                }
                // A flag with no number behind it parses as 0; the flag byte
                // was already consumed so the scan still makes progress.
                let (value, consumed) = parse_float(&bytes[cursor..]);
                cursor += consumed;
                let value = value.abs();
                match flag {
                    b'f' => delta.frequency_hz = Some(value.min(MAX_FREQUENCY_HZ)),
                    b'a' => delta.amplitude = Some((value / 100.0).min(MAX_AMPLITUDE)),
                    b'l' => delta.periodic_playing_secs = Some(value),
                    b'w' => delta.periodic_waiting_secs = Some(value),
                    _ => delta.fading_secs = Some(value),
                }
            }
            _ => break,
        }
    }

    delta
}

/// Parse the longest valid floating-point token at the start of `bytes`.
///
/// Accepts an optional sign, digits with an optional fraction, and an optional
/// exponent. Returns the value and the number of bytes consumed; no valid
/// token consumes nothing and yields 0.
fn parse_float(bytes: &[u8]) -> (f64, usize) {
    let mut end = 0;
    if matches!(bytes.first(), Some(&b'+') | Some(&b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return (0.0, 0);
    }

    // Only consume an exponent when at least one digit follows it.
    if matches!(bytes.get(end), Some(&b'e') | Some(&b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(&b'+') | Some(&b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    // The consumed range is ASCII digits, sign, dot, and exponent only.
    let token = std::str::from_utf8(&bytes[..end]).unwrap_or("");
    (token.parse::<f64>().unwrap_or(0.0), end)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
