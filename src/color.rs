//! RGB565 pixel encoding
//!
//! Converts between 8-bit RGBA pixels and the packed 16-bit RGB565 values
//! stored in an [`IconSequence`](crate::sequence::IconSequence):
//!
//! ```text
//! bit  15..11  10..5  4..0
//!      red     green  blue
//! ```
//!
//! Fully transparent pixels encode as black, since RGB565 has no alpha.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// Byte order of the stored 16-bit values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Value stored as computed (`0xF800` is red)
    Native,
    /// High and low bytes exchanged (`0x00F8` is red), the layout SPI display
    /// drivers expect when a little-endian MCU streams the array as bytes
    #[default]
    Swapped,
}

impl ByteOrder {
    /// Apply this byte order to a native RGB565 value. Applying it twice is a no-op.
    pub fn apply(self, value: u16) -> u16 {
        match self {
            ByteOrder::Native => value,
            ByteOrder::Swapped => value.swap_bytes(),
        }
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ByteOrder::Native => write!(f, "native"),
            ByteOrder::Swapped => write!(f, "swapped"),
        }
    }
}

/// Pack an RGBA pixel into native RGB565.
///
/// # Examples
///
/// ```
/// use image::Rgba;
/// use iconseq::color::rgba_to_rgb565;
///
/// assert_eq!(rgba_to_rgb565(Rgba([255, 0, 0, 255])), 0xF800);
/// assert_eq!(rgba_to_rgb565(Rgba([0, 255, 0, 255])), 0x07E0);
/// assert_eq!(rgba_to_rgb565(Rgba([0, 0, 255, 255])), 0x001F);
/// assert_eq!(rgba_to_rgb565(Rgba([255, 255, 255, 0])), 0x0000);
/// ```
pub fn rgba_to_rgb565(pixel: Rgba<u8>) -> u16 {
    let [r, g, b, a] = pixel.0;
    if a == 0 {
        return 0;
    }
    let r5 = (r >> 3) as u16;
    let g6 = (g >> 2) as u16;
    let b5 = (b >> 3) as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// Expand a native RGB565 value to an opaque RGBA pixel.
///
/// Channels are widened by bit replication, so `0xFFFF` maps to pure white.
pub fn rgb565_to_rgba(value: u16) -> Rgba<u8> {
    let r5 = ((value >> 11) & 0x1F) as u8;
    let g6 = ((value >> 5) & 0x3F) as u8;
    let b5 = (value & 0x1F) as u8;
    Rgba([(r5 << 3) | (r5 >> 2), (g6 << 2) | (g6 >> 4), (b5 << 3) | (b5 >> 2), 255])
}

/// Encode one pixel with the given byte order.
pub fn encode_pixel(pixel: Rgba<u8>, order: ByteOrder) -> u16 {
    order.apply(rgba_to_rgb565(pixel))
}

/// Decode one stored value with the given byte order.
pub fn decode_pixel(value: u16, order: ByteOrder) -> Rgba<u8> {
    rgb565_to_rgba(order.apply(value))
}

/// Encode a whole image, row-major.
pub fn encode_image(image: &RgbaImage, order: ByteOrder) -> Vec<u16> {
    image.pixels().map(|p| encode_pixel(*p, order)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        assert_eq!(rgba_to_rgb565(Rgba([255, 0, 0, 255])), 0xF800);
        assert_eq!(rgba_to_rgb565(Rgba([0, 255, 0, 255])), 0x07E0);
        assert_eq!(rgba_to_rgb565(Rgba([0, 0, 255, 255])), 0x001F);
        assert_eq!(rgba_to_rgb565(Rgba([255, 255, 255, 255])), 0xFFFF);
        assert_eq!(rgba_to_rgb565(Rgba([0, 0, 0, 255])), 0x0000);
    }

    #[test]
    fn test_low_bits_truncated() {
        // 0b00000111 drops entirely from the 5-bit channels
        assert_eq!(rgba_to_rgb565(Rgba([7, 3, 7, 255])), 0x0000);
        assert_eq!(rgba_to_rgb565(Rgba([8, 4, 8, 255])), 0x0821);
    }

    #[test]
    fn test_transparent_is_black() {
        assert_eq!(rgba_to_rgb565(Rgba([255, 128, 64, 0])), 0x0000);
    }

    #[test]
    fn test_partial_alpha_keeps_color() {
        assert_eq!(rgba_to_rgb565(Rgba([255, 0, 0, 1])), 0xF800);
    }

    #[test]
    fn test_swapped_byte_order() {
        assert_eq!(encode_pixel(Rgba([255, 0, 0, 255]), ByteOrder::Swapped), 0x00F8);
        assert_eq!(encode_pixel(Rgba([0, 255, 0, 255]), ByteOrder::Swapped), 0xE007);
        assert_eq!(encode_pixel(Rgba([0, 0, 255, 255]), ByteOrder::Native), 0x001F);
    }

    #[test]
    fn test_default_is_swapped() {
        assert_eq!(ByteOrder::default(), ByteOrder::Swapped);
    }

    #[test]
    fn test_decode_expands_channels() {
        assert_eq!(rgb565_to_rgba(0xFFFF), Rgba([255, 255, 255, 255]));
        assert_eq!(rgb565_to_rgba(0x0000), Rgba([0, 0, 0, 255]));
        assert_eq!(rgb565_to_rgba(0xF800), Rgba([255, 0, 0, 255]));
        assert_eq!(decode_pixel(0x00F8, ByteOrder::Swapped), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_encode_image_row_major() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 255, 255]));

        assert_eq!(encode_image(&img, ByteOrder::Native), vec![0xF800, 0x001F]);
        assert_eq!(encode_image(&img, ByteOrder::Swapped), vec![0x00F8, 0x1F00]);
    }

    #[test]
    fn test_byte_order_serde_names() {
        #[derive(Deserialize)]
        struct Holder {
            order: ByteOrder,
        }
        let h: Holder = toml::from_str("order = \"native\"").unwrap();
        assert_eq!(h.order, ByteOrder::Native);
        assert_eq!(ByteOrder::Swapped.to_string(), "swapped");
    }
}
