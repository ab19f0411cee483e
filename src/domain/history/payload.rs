//! Payload codec: captured text is stored as UTF-16LE bytes

use crate::domain::error::PayloadDecodeError;

/// Encode text into the stored payload representation
pub fn encode_payload(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Decode a stored payload back into text
pub fn decode_payload(bytes: &[u8]) -> Result<String, PayloadDecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(PayloadDecodeError::OddLength(bytes.len()));
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    String::from_utf16(&units).map_err(|_| PayloadDecodeError::InvalidUtf16)
}
