//! # 单平面 LSB 隐写
//!
//! 只使用蓝色分量 (分量 0) 的最低有效位，每个像素承载 1 比特。

use crate::carrier::Carrier;
use crate::constants::{BITS_PER_BYTE, LENGTH_PREFIX_BYTES};
use crate::mapping::{self, Coordinate};
use crate::steganography::Steganography;

/// 无需配置的单平面算法。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LsbSteganography;

impl Steganography for LsbSteganography {
    /// `floor(W * H / 8) - 4`，不做下限截断，极小的图像会得到负数。
    fn max_bytes<C: Carrier>(&self, image: &C) -> i64 {
        (image.pixel_count() / BITS_PER_BYTE) as i64 - LENGTH_PREFIX_BYTES as i64
    }

    fn locate(&self, offset: u64, width: u32, _height: u32) -> Coordinate {
        mapping::single_plane(offset, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StegoError;
    use image::{Rgba, RgbaImage};

    #[test]
    fn capacity_can_be_negative() {
        assert_eq!(LsbSteganography.max_bytes(&RgbaImage::new(1, 1)), -4);
        assert_eq!(LsbSteganography.max_bytes(&RgbaImage::new(10, 10)), 8);
        assert_eq!(LsbSteganography.max_bytes(&RgbaImage::new(16, 2)), 0);
    }

    #[test]
    fn round_trip_touches_only_blue_lsb() {
        let original = RgbaImage::from_pixel(12, 12, Rgba([0x5A, 0xA5, 0x3C, 0x77]));
        let mut stego = original.clone();
        LsbSteganography.hide_data(b"lsb only", &mut stego).unwrap();

        for (before, after) in original.pixels().zip(stego.pixels()) {
            assert_eq!(before[0], after[0]);
            assert_eq!(before[1], after[1]);
            assert_eq!(before[2] & 0xFE, after[2] & 0xFE);
            assert_eq!(before[3], after[3]);
        }
        assert_eq!(LsbSteganography.extract_data(&stego).unwrap(), b"lsb only");
    }

    #[test]
    fn tiny_image_rejects_even_empty_payload() {
        let mut image = RgbaImage::new(2, 2);
        assert_eq!(
            LsbSteganography.hide_data(&[], &mut image),
            Err(StegoError::InsufficientSpace {
                capacity: -4,
                requested: 0
            })
        );
    }

    #[test]
    fn extract_from_too_small_image_is_out_of_range() {
        let image = RgbaImage::new(4, 4);
        let err = LsbSteganography.extract_data(&image).unwrap_err();
        assert!(err.is_out_of_range());
    }
}
