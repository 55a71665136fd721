//! Parsing of `data:<mime>;base64,<payload>` image URLs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// A decoded data URL.
#[derive(Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Decode a base64 data URL like `data:image/png;base64,iVBORw0K...`.
pub fn parse_data_url(data_url: &str) -> Result<DecodedImage, String> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| "invalid data URL format".to_string())?;
    let (mime_type, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| "invalid data URL format".to_string())?;
    if mime_type.is_empty() {
        return Err("invalid data URL format".to_string());
    }
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| format!("invalid base64 payload: {e}"))?;
    Ok(DecodedImage {
        mime_type: mime_type.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_png_data_url() {
        let payload = STANDARD.encode(b"not really a png");
        let decoded = parse_data_url(&format!("data:image/png;base64,{payload}")).unwrap();
        assert_eq!(decoded.mime_type, "image/png");
        assert_eq!(decoded.bytes, b"not really a png");
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(parse_data_url("image/png;base64,AAAA").is_err());
    }

    #[test]
    fn rejects_missing_base64_marker() {
        assert!(parse_data_url("data:image/png,AAAA").is_err());
    }

    #[test]
    fn rejects_empty_mime_type() {
        assert!(parse_data_url("data:;base64,AAAA").is_err());
    }

    #[test]
    fn rejects_bad_base64() {
        assert!(parse_data_url("data:image/png;base64,@@@").is_err());
    }
}
