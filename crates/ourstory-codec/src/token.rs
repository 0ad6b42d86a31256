//! Deflate + URL-safe base64 transport encoding.

use std::io::{Read, Write};
use std::string::FromUtf8Error;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use thiserror::Error;

/// Upper bound on the inflated size of a token's payload.
pub const MAX_PAYLOAD_BYTES: u64 = 1024 * 1024;

/// Reasons a token cannot be turned back into a payload.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The token is empty.
    #[error("token is empty")]
    EmptyToken,

    /// The token is not URL-safe base64.
    #[error("token is not url-safe base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The token bytes are not a deflate stream.
    #[error("token does not inflate: {0}")]
    Inflate(#[from] std::io::Error),

    /// The inflated payload exceeds [`MAX_PAYLOAD_BYTES`].
    #[error("decoded payload exceeds {MAX_PAYLOAD_BYTES} bytes")]
    TooLarge,

    /// The token inflates to nothing.
    #[error("decoded payload is empty")]
    EmptyPayload,

    /// The payload is not UTF-8 text.
    #[error("decoded payload is not utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// The payload is not JSON.
    #[error("decoded payload is not json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Deflates `text` at the highest compression level and encodes the bytes
/// with the unpadded URL-safe base64 alphabet.
#[must_use]
pub fn compress(text: &str) -> String {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    // Writing into a Vec<u8> cannot fail.
    encoder
        .write_all(text.as_bytes())
        .expect("deflate into Vec<u8> is infallible");
    let bytes = encoder
        .finish()
        .expect("deflate into Vec<u8> is infallible");
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Reverses [`compress`].
///
/// # Errors
///
/// Returns a `CodecError` if the token is empty, is not base64, does not
/// inflate, inflates past the size limit, or inflates to nothing.
pub fn decompress(token: &str) -> Result<String, CodecError> {
    if token.is_empty() {
        return Err(CodecError::EmptyToken);
    }
    let bytes = URL_SAFE_NO_PAD.decode(token)?;

    let mut inflated = Vec::new();
    DeflateDecoder::new(bytes.as_slice())
        .take(MAX_PAYLOAD_BYTES + 1)
        .read_to_end(&mut inflated)?;

    if inflated.len() as u64 > MAX_PAYLOAD_BYTES {
        return Err(CodecError::TooLarge);
    }
    if inflated.is_empty() {
        return Err(CodecError::EmptyPayload);
    }
    Ok(String::from_utf8(inflated)?)
}
