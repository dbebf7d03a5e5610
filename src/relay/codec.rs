//! Frame payload codec
//!
//! Payloads travel and rest as base64 text. The single-stream feed
//! decodes them to pixels, normalizes to a fixed output width and
//! re-encodes as JPEG; the mix feed uses the decode step purely as
//! validation and relays the stored base64 untouched.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};

/// Error decoding or re-encoding a frame payload
#[derive(Debug)]
pub enum CodecError {
    /// Payload is not valid base64
    Base64(base64::DecodeError),
    /// Decoded bytes are not a well-formed image, or re-encoding failed
    Image(image::ImageError),
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Base64(e) => write!(f, "invalid base64 payload: {}", e),
            CodecError::Image(e) => write!(f, "invalid image payload: {}", e),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Base64(e) => Some(e),
            CodecError::Image(e) => Some(e),
        }
    }
}

impl From<base64::DecodeError> for CodecError {
    fn from(e: base64::DecodeError) -> Self {
        CodecError::Base64(e)
    }
}

impl From<image::ImageError> for CodecError {
    fn from(e: image::ImageError) -> Self {
        CodecError::Image(e)
    }
}

/// Decode a base64 payload into pixels
pub fn decode_frame(payload: &[u8]) -> Result<DynamicImage, CodecError> {
    let raw = BASE64.decode(payload)?;
    Ok(image::load_from_memory(&raw)?)
}

/// Resize a frame to the target width (aspect preserved) and encode as JPEG
pub fn encode_normalized(
    frame: &DynamicImage,
    target_width: u32,
    quality: u8,
) -> Result<Bytes, CodecError> {
    let (width, height) = frame.dimensions();
    let target_height =
        ((height as u64 * target_width as u64 + width as u64 / 2) / width.max(1) as u64).max(1);
    let resized = frame.resize_exact(
        target_width,
        target_height as u32,
        image::imageops::FilterType::Triangle,
    );

    let mut buf = Cursor::new(Vec::new());
    resized.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))?;
    Ok(Bytes::from(buf.into_inner()))
}

/// Encode raw image bytes (an uploaded file or request body) as base64 text
pub fn to_base64(raw: &[u8]) -> String {
    BASE64.encode(raw)
}
