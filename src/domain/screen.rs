//! Captured screen image value object

use std::fmt;

/// Encodings a capture adapter may produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageEncoding {
    Jpeg,
    Png,
}

impl ImageEncoding {
    /// Get the media type string providers expect
    pub const fn media_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for ImageEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.media_type())
    }
}

impl Default for ImageEncoding {
    fn default() -> Self {
        Self::Jpeg
    }
}

/// Value object holding one compressed screen capture, ready to attach to a
/// provider request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenImage {
    data: Vec<u8>,
    encoding: ImageEncoding,
}

impl ScreenImage {
    /// Create a ScreenImage from encoded bytes
    pub fn new(data: Vec<u8>, encoding: ImageEncoding) -> Self {
        Self { data, encoding }
    }

    /// Get the encoded image bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the encoded image bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the encoding
    pub fn encoding(&self) -> ImageEncoding {
        self.encoding
    }

    /// Get the media type string
    pub fn media_type(&self) -> &'static str {
        self.encoding.media_type()
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Encode the image as base64
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Encode as a `data:` URL, the form OpenAI image parts take
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type(), self.to_base64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_types() {
        assert_eq!(ImageEncoding::Jpeg.media_type(), "image/jpeg");
        assert_eq!(ImageEncoding::Png.media_type(), "image/png");
    }

    #[test]
    fn size_bytes() {
        let image = ScreenImage::new(vec![0u8; 4096], ImageEncoding::Jpeg);
        assert_eq!(image.size_bytes(), 4096);
    }

    #[test]
    fn human_readable_sizes() {
        assert_eq!(
            ScreenImage::new(vec![0u8; 512], ImageEncoding::Jpeg).human_readable_size(),
            "512 B"
        );
        assert_eq!(
            ScreenImage::new(vec![0u8; 3072], ImageEncoding::Jpeg).human_readable_size(),
            "3.0 KB"
        );
        assert_eq!(
            ScreenImage::new(vec![0u8; 5 * 1024 * 1024], ImageEncoding::Jpeg)
                .human_readable_size(),
            "5.0 MB"
        );
    }

    #[test]
    fn to_base64_round_trips() {
        let image = ScreenImage::new(vec![9, 8, 7], ImageEncoding::Png);
        use base64::Engine;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(image.to_base64())
            .unwrap();
        assert_eq!(decoded, vec![9, 8, 7]);
    }

    #[test]
    fn data_url_carries_media_type() {
        let image = ScreenImage::new(vec![1, 2], ImageEncoding::Jpeg);
        let url = image.to_data_url();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn default_encoding_is_jpeg() {
        assert_eq!(ImageEncoding::default(), ImageEncoding::Jpeg);
    }
}
