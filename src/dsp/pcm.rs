//! Decoding of the speech service's audio payload.
//!
//! The service answers with base64 text wrapping raw 16-bit little-endian
//! mono PCM, no header.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::NarrationError;

/// Decode base64 PCM16LE into samples in [-1.0, 1.0).
pub fn decode_base64_pcm16(payload: &str) -> Result<Vec<f32>, NarrationError> {
    let bytes = STANDARD.decode(payload.trim())?;
    pcm16_to_f32(&bytes)
}

pub fn pcm16_to_f32(bytes: &[u8]) -> Result<Vec<f32>, NarrationError> {
    if bytes.len() % 2 != 0 {
        return Err(NarrationError::InvalidPcm(bytes.len()));
    }

    Ok(bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32_768.0)
        .collect())
}
