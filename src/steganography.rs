//! # 隐写核心模块
//!
//! 定义所有隐写算法共同遵守的契约 [`Steganography`]，以及在其之上的两层实现：
//!
//! * 原始放置层 ([`write_bytes`] / [`read_bytes`])：按比特偏移递增的顺序逐个像素读写；
//! * 帧层 ([`Steganography::hide_data`] / [`Steganography::extract_data`])：
//!   先写入 4 字节大端长度前缀，再写入载荷本身。
//!
//! 图像中的比特布局是唯一的"线格式"：偏移 `[0, 32)` 为长度，`[32, 32 + 8n)` 为载荷，
//! 每个字节从最高有效位开始。

use crate::bits::{bit_value, clear_bit, pack_u32_be, set_bit, unpack_u32_be};
use crate::carrier::{Carrier, clear_component_bit, component_bit, set_component_bit};
use crate::constants::{BITS_PER_BYTE, LENGTH_PREFIX_BYTES, PACKED_PIXEL_BITS};
use crate::deidentification::DeidentifyingSteganography;
use crate::error::StegoError;
use crate::lsb::LsbSteganography;
use crate::mapping::Coordinate;
use crate::rgb_bits::RgbBitsSteganography;
use log::debug;

/// 在图像像素中隐藏字节数据的算法。
///
/// 实现者只需给出容量和索引映射，隐藏与提取的帧格式由默认方法统一完成。
/// 隐藏会原地修改图像；如果需要保留原图，调用方应先复制一份
/// (见 [`crate::carrier::working_copy`])。
pub trait Steganography {
    /// 当前配置下可以隐藏的最大载荷字节数 (已扣除长度前缀)。对很小的图像可能为 0 或负数。
    fn max_bytes<C: Carrier>(&self, image: &C) -> i64;

    /// 将比特偏移映射为图像坐标。
    fn locate(&self, offset: u64, width: u32, height: u32) -> Coordinate;

    /// 将 `payload` 隐藏到 `image` 中。
    ///
    /// # Errors
    ///
    /// 载荷超过容量时返回 [`StegoError::InsufficientSpace`]，此时图像未被修改。
    fn hide_data<C: Carrier>(&self, payload: &[u8], image: &mut C) -> Result<(), StegoError> {
        let capacity = self.max_bytes(image);
        let requested = payload.len();
        let insufficient = StegoError::InsufficientSpace {
            capacity,
            requested,
        };

        if !i64::try_from(requested).is_ok_and(|n| n <= capacity) {
            return Err(insufficient);
        }
        let length = u32::try_from(requested).map_err(|_| insufficient)?;

        debug!(
            "Hiding {} bytes into a {}x{} image (capacity {} bytes)",
            requested,
            image.width(),
            image.height(),
            capacity
        );

        write_bytes(self, image, &pack_u32_be(length), 0)?;
        write_bytes(self, image, payload, LENGTH_PREFIX_BYTES)
    }

    /// 从隐写图像中提取载荷。
    ///
    /// # Errors
    ///
    /// 长度前缀声明的载荷超出当前配置下的容量，或读取会越过图像边界时，
    /// 返回越界错误 (见 [`StegoError::is_out_of_range`])。
    fn extract_data<C: Carrier>(&self, image: &C) -> Result<Vec<u8>, StegoError> {
        let mut prefix = [0u8; LENGTH_PREFIX_BYTES];
        read_bytes(self, image, &mut prefix, 0)?;
        let declared = unpack_u32_be(prefix);

        let capacity = self.max_bytes(image);
        if i64::from(declared) > capacity {
            return Err(StegoError::DeclaredLengthOutOfRange { declared, capacity });
        }

        debug!(
            "Extracting {} bytes from a {}x{} image",
            declared,
            image.width(),
            image.height()
        );

        let mut payload = vec![0u8; declared as usize];
        read_bytes(self, image, &mut payload, LENGTH_PREFIX_BYTES)?;
        Ok(payload)
    }
}

/// 从第 `byte_offset` 个字节对应的比特偏移开始，将 `data` 的每个比特写入图像。
///
/// 每个比特只改动一个像素中的一位，其他比特保持原样。
pub fn write_bytes<S, C>(
    algorithm: &S,
    image: &mut C,
    data: &[u8],
    byte_offset: usize,
) -> Result<(), StegoError>
where
    S: Steganography + ?Sized,
    C: Carrier,
{
    let start = byte_offset as u64 * BITS_PER_BYTE;

    for index in 0..data.len() as u64 * BITS_PER_BYTE {
        let (x, y, component, bit) = checked_locate(algorithm, image, start + index)?;
        let pixel = image.get(x, y);
        let pixel = if bit_value(data, index) == 1 {
            set_component_bit(pixel, component, bit)
        } else {
            clear_component_bit(pixel, component, bit)
        };
        image.set(x, y, pixel);
    }

    Ok(())
}

/// 从第 `byte_offset` 个字节对应的比特偏移开始读取比特，填满 `out`。
pub fn read_bytes<S, C>(
    algorithm: &S,
    image: &C,
    out: &mut [u8],
    byte_offset: usize,
) -> Result<(), StegoError>
where
    S: Steganography + ?Sized,
    C: Carrier,
{
    let start = byte_offset as u64 * BITS_PER_BYTE;

    for index in 0..out.len() as u64 * BITS_PER_BYTE {
        let (x, y, component, bit) = checked_locate(algorithm, image, start + index)?;
        if component_bit(image.get(x, y), component, bit) == 1 {
            set_bit(out, index);
        } else {
            clear_bit(out, index);
        }
    }

    Ok(())
}

// 映射偏移并确认坐标落在图像之内，且移位 `8 * component + bit` 不超出 32 位的打包像素。
// 容量为 0 时长度前缀会用到第 8 位及以上，这些位仍在像素之内。
fn checked_locate<S, C>(
    algorithm: &S,
    image: &C,
    offset: u64,
) -> Result<(u32, u32, u8, u8), StegoError>
where
    S: Steganography + ?Sized,
    C: Carrier,
{
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(StegoError::OutOfRange {
            offset,
            x: 0,
            y: 0,
            component: 0,
            bit: 0,
            width,
            height,
        });
    }

    let Coordinate {
        x,
        y,
        component,
        bit,
    } = algorithm.locate(offset, width, height);

    let inside =
        y < u64::from(height) && BITS_PER_BYTE * u64::from(component) + bit < PACKED_PIXEL_BITS;
    if !inside {
        return Err(StegoError::OutOfRange {
            offset,
            x,
            y,
            component,
            bit,
            width,
            height,
        });
    }

    Ok((x, y as u32, component, bit as u8))
}

/// 所有可用隐写算法的封闭集合。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Algorithm {
    /// 仅使用蓝色分量最低有效位。
    Lsb(LsbSteganography),
    /// 使用低 K 个分量的低 N 位。
    RgbBits(RgbBitsSteganography),
    /// 先涂黑指定区域，再按多平面方式隐藏。
    Deidentifying(DeidentifyingSteganography),
}

impl Steganography for Algorithm {
    fn max_bytes<C: Carrier>(&self, image: &C) -> i64 {
        match self {
            Self::Lsb(algorithm) => algorithm.max_bytes(image),
            Self::RgbBits(algorithm) => algorithm.max_bytes(image),
            Self::Deidentifying(algorithm) => algorithm.max_bytes(image),
        }
    }

    fn locate(&self, offset: u64, width: u32, height: u32) -> Coordinate {
        match self {
            Self::Lsb(algorithm) => algorithm.locate(offset, width, height),
            Self::RgbBits(algorithm) => algorithm.locate(offset, width, height),
            Self::Deidentifying(algorithm) => algorithm.locate(offset, width, height),
        }
    }
}
