//! Text encodings used on the wire: hex, Base64 and Base58.
//!
//! The SDK passes binary data around as lowercase hex strings; keys,
//! addresses and signatures travel as Base58, raw transaction payloads
//! as padded standard Base64.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chainium_types::{ChainiumError, Result};

/// Hex representation of the UTF-8 bytes of `text`.
pub fn utf8_to_hex(text: &str) -> String {
    hex::encode(text.as_bytes())
}

/// Decodes a hex string, rejecting odd lengths and non-hex characters.
pub fn decode_hex(hex_data: &str) -> Result<Vec<u8>> {
    hex::decode(hex_data).map_err(|e| ChainiumError::Decode {
        reason: format!("invalid hex: {e}"),
    })
}

/// Decodes a Base58 string (Bitcoin alphabet) into raw bytes.
pub fn decode_base58(base58_data: &str) -> Result<Vec<u8>> {
    bs58::decode(base58_data)
        .into_vec()
        .map_err(|e| ChainiumError::Decode {
            reason: format!("invalid base58: {e}"),
        })
}

/// Encodes raw bytes as Base58.
pub fn encode_base58(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Encodes raw bytes as padded standard Base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decodes padded standard Base64 into raw bytes.
pub fn decode_base64(base64_data: &str) -> Result<Vec<u8>> {
    BASE64.decode(base64_data).map_err(|e| ChainiumError::Decode {
        reason: format!("invalid base64: {e}"),
    })
}

/// Re-encodes hex as padded standard Base64.
pub fn hex_to_base64(hex_data: &str) -> Result<String> {
    Ok(encode_base64(&decode_hex(hex_data)?))
}

/// Decodes Base64 into lowercase hex.
pub fn base64_to_hex(base64_data: &str) -> Result<String> {
    Ok(hex::encode(decode_base64(base64_data)?))
}

/// Re-encodes hex as Base58; leading zero bytes become leading `1`s.
pub fn hex_to_base58(hex_data: &str) -> Result<String> {
    Ok(encode_base58(&decode_hex(hex_data)?))
}

/// Decodes Base58 into lowercase hex.
pub fn base58_to_hex(base58_data: &str) -> Result<String> {
    Ok(hex::encode(decode_base58(base58_data)?))
}
