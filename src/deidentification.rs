//! # 可逆去标识化
//!
//! 在隐藏之前，把图像中一个矩形区域涂成哨兵颜色。通常做法是先把该区域的原始像素
//! 作为载荷隐藏进图像，使得持有图像的人可以恢复被遮挡的内容。
//! 隐藏与提取本身完全委托给内部的 [`RgbBitsSteganography`]。

use crate::carrier::Carrier;
use crate::constants::SENTINEL_PIXEL;
use crate::error::StegoError;
use crate::mapping::Coordinate;
use crate::rgb_bits::RgbBitsSteganography;
use crate::steganography::Steganography;
use log::debug;
use std::str::FromStr;

/// 包含边界的矩形区域 `(x_start, y_start)` 到 `(x_end, y_end)`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x_start: u32,
    pub y_start: u32,
    pub x_end: u32,
    pub y_end: u32,
}

impl Region {
    // 只在 `check` 通过后调用，此时 start <= end < 图像尺寸。
    fn dimensions(&self) -> (usize, usize) {
        (
            (self.x_end - self.x_start) as usize + 1,
            (self.y_end - self.y_start) as usize + 1,
        )
    }

    fn check<C: Carrier>(&self, image: &C) -> Result<(), StegoError> {
        let fits = self.x_start <= self.x_end
            && self.y_start <= self.y_end
            && self.x_end < image.width()
            && self.y_end < image.height();
        if fits {
            Ok(())
        } else {
            Err(StegoError::InvalidRegion {
                x_start: self.x_start,
                y_start: self.y_start,
                x_end: self.x_end,
                y_end: self.y_end,
                width: image.width(),
                height: image.height(),
            })
        }
    }

    /// 按行优先顺序复制区域内的像素，每个像素 3 字节 (R, G, B)。
    ///
    /// # Errors
    ///
    /// 区域不在图像内时返回 [`StegoError::InvalidRegion`]。
    pub fn capture<C: Carrier>(&self, image: &C) -> Result<Vec<u8>, StegoError> {
        self.check(image)?;
        let (width, height) = self.dimensions();
        let mut bytes = Vec::with_capacity(width * height * 3);
        for y in self.y_start..=self.y_end {
            for x in self.x_start..=self.x_end {
                let [b, g, r, _] = image.get(x, y).to_le_bytes();
                bytes.extend_from_slice(&[r, g, b]);
            }
        }
        Ok(bytes)
    }

    /// [`Region::capture`] 的逆操作：把按行优先排列的 RGB 字节写回区域，alpha 置为不透明。
    ///
    /// # Errors
    ///
    /// 区域不在图像内时返回 [`StegoError::InvalidRegion`]；
    /// 字节数与区域大小不符时返回 [`StegoError::RegionSizeMismatch`]。
    pub fn restore<C: Carrier>(&self, image: &mut C, pixels: &[u8]) -> Result<(), StegoError> {
        self.check(image)?;
        let (width, height) = self.dimensions();
        let expected = width * height * 3;
        if pixels.len() != expected {
            return Err(StegoError::RegionSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let coordinates = (self.y_start..=self.y_end)
            .flat_map(|y| (self.x_start..=self.x_end).map(move |x| (x, y)));
        for ((x, y), rgb) in coordinates.zip(pixels.chunks_exact(3)) {
            image.set(x, y, u32::from_le_bytes([rgb[2], rgb[1], rgb[0], 0xFF]));
        }
        Ok(())
    }
}

/// 命令行格式 `X0,Y0,X1,Y1`。
impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid region '{s}': {e}"))?;

        match values.as_slice() {
            &[x_start, y_start, x_end, y_end] => Ok(Self {
                x_start,
                y_start,
                x_end,
                y_end,
            }),
            _ => Err(format!(
                "invalid region '{s}': expected four comma separated values X0,Y0,X1,Y1"
            )),
        }
    }
}

/// 带去标识化预处理的多平面算法。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeidentifyingSteganography {
    inner: RgbBitsSteganography,
}

impl DeidentifyingSteganography {
    pub fn new(inner: RgbBitsSteganography) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &RgbBitsSteganography {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut RgbBitsSteganography {
        &mut self.inner
    }

    /// 将 `region` 内的所有像素覆盖为哨兵颜色。
    ///
    /// # Errors
    ///
    /// 区域不在图像内时返回 [`StegoError::InvalidRegion`]，图像不会被修改。
    pub fn preprocess_original_image<C: Carrier>(
        &self,
        image: &mut C,
        region: Region,
    ) -> Result<(), StegoError> {
        region.check(image)?;
        debug!("Blacking out region {:?}", region);
        for x in region.x_start..=region.x_end {
            for y in region.y_start..=region.y_end {
                image.set(x, y, SENTINEL_PIXEL);
            }
        }
        Ok(())
    }
}

impl Steganography for DeidentifyingSteganography {
    fn max_bytes<C: Carrier>(&self, image: &C) -> i64 {
        self.inner.max_bytes(image)
    }

    fn locate(&self, offset: u64, width: u32, height: u32) -> Coordinate {
        self.inner.locate(offset, width, height)
    }
}
