//! # 多平面隐写
//!
//! 使用低 K 个颜色分量 (按 B、G、R 顺序) 的低 N 位。
//! 只有当所有 K 个分量的当前位都在整幅图像上用完后，才会使用下一个更高的位。

use crate::carrier::Carrier;
use crate::constants::{BITS_PER_BYTE, LENGTH_PREFIX_BYTES, MAX_BITS_PER_COMPONENT, MAX_COMPONENTS};
use crate::error::StegoError;
use crate::mapping::{self, Coordinate};
use crate::steganography::Steganography;
use log::debug;

/// 多平面算法的配置，两个字段始终位于各自的闭区间内。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbBitsConfig {
    components_to_use: u8,
    bits_per_component: u8,
}

impl RgbBitsConfig {
    /// 创建并校验配置。
    ///
    /// # Errors
    ///
    /// `components_to_use` 不在 `[1, 3]` 或 `bits_per_component` 不在 `[1, 8]` 时返回
    /// [`StegoError::InvalidConfiguration`]。
    pub fn new(components_to_use: u8, bits_per_component: u8) -> Result<Self, StegoError> {
        Ok(Self {
            components_to_use: check_components_to_use(components_to_use)?,
            bits_per_component: check_bits_per_component(bits_per_component)?,
        })
    }

    pub fn components_to_use(&self) -> u8 {
        self.components_to_use
    }

    pub fn bits_per_component(&self) -> u8 {
        self.bits_per_component
    }

    /// 枚举所有合法配置：分量数 1..=3，每个分量数下比特数 1..=8。
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=MAX_COMPONENTS).flat_map(|components_to_use| {
            (1..=MAX_BITS_PER_COMPONENT).map(move |bits_per_component| Self {
                components_to_use,
                bits_per_component,
            })
        })
    }
}

impl std::fmt::Display for RgbBitsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}_components-{}_bits",
            self.components_to_use, self.bits_per_component
        )
    }
}

fn check_components_to_use(value: u8) -> Result<u8, StegoError> {
    check_range("color components to use", value, MAX_COMPONENTS)
}

fn check_bits_per_component(value: u8) -> Result<u8, StegoError> {
    check_range("bits per component", value, MAX_BITS_PER_COMPONENT)
}

fn check_range(parameter: &'static str, value: u8, max: u8) -> Result<u8, StegoError> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(StegoError::InvalidConfiguration {
            parameter,
            value,
            min: 1,
            max,
        })
    }
}

/// 参数化的多平面算法。配置可在两次操作之间修改，每次修改都会重新校验。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBitsSteganography {
    config: RgbBitsConfig,
}

impl RgbBitsSteganography {
    /// # Errors
    ///
    /// 参数越界时返回 [`StegoError::InvalidConfiguration`]。
    pub fn new(components_to_use: u8, bits_per_component: u8) -> Result<Self, StegoError> {
        RgbBitsConfig::new(components_to_use, bits_per_component).map(Self::from)
    }

    pub fn config(&self) -> RgbBitsConfig {
        self.config
    }

    /// 修改使用的分量数。失败时保留原配置。
    pub fn set_components_to_use(&mut self, components_to_use: u8) -> Result<(), StegoError> {
        self.config.components_to_use = check_components_to_use(components_to_use)?;
        debug!("Configuration changed to {}", self.config);
        Ok(())
    }

    /// 修改每个分量使用的比特数。失败时保留原配置。
    pub fn set_bits_per_component(&mut self, bits_per_component: u8) -> Result<(), StegoError> {
        self.config.bits_per_component = check_bits_per_component(bits_per_component)?;
        debug!("Configuration changed to {}", self.config);
        Ok(())
    }

    /// 配置的位平面共可承载的比特数 `W * H * K * N`。
    pub fn bit_budget<C: Carrier>(&self, image: &C) -> u64 {
        image.pixel_count()
            * u64::from(self.config.components_to_use)
            * u64::from(self.config.bits_per_component)
    }
}

impl From<RgbBitsConfig> for RgbBitsSteganography {
    fn from(config: RgbBitsConfig) -> Self {
        Self { config }
    }
}

impl Steganography for RgbBitsSteganography {
    /// `max(floor(W * H * K * N / 8) - 4, 0)`。
    fn max_bytes<C: Carrier>(&self, image: &C) -> i64 {
        let bytes = (self.bit_budget(image) / BITS_PER_BYTE) as i64;
        (bytes - LENGTH_PREFIX_BYTES as i64).max(0)
    }

    fn locate(&self, offset: u64, width: u32, height: u32) -> Coordinate {
        mapping::multi_plane(offset, width, height, self.config.components_to_use)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn rejects_out_of_range_parameters() {
        assert!(RgbBitsSteganography::new(0, 1).is_err());
        assert!(RgbBitsSteganography::new(4, 1).is_err());
        assert!(RgbBitsSteganography::new(1, 0).is_err());
        assert_eq!(
            RgbBitsSteganography::new(1, 9),
            Err(StegoError::InvalidConfiguration {
                parameter: "bits per component",
                value: 9,
                min: 1,
                max: 8
            })
        );
    }

    #[test]
    fn rejected_update_keeps_previous_configuration() {
        let mut algorithm = RgbBitsSteganography::new(2, 5).unwrap();
        assert!(algorithm.set_components_to_use(4).is_err());
        assert!(algorithm.set_bits_per_component(0).is_err());
        assert_eq!(algorithm.config(), RgbBitsConfig::new(2, 5).unwrap());

        algorithm.set_components_to_use(3).unwrap();
        algorithm.set_bits_per_component(8).unwrap();
        assert_eq!(algorithm.config().components_to_use(), 3);
        assert_eq!(algorithm.config().bits_per_component(), 8);
    }

    #[test]
    fn capacity_follows_configuration() {
        let image = RgbaImage::new(10, 10);
        assert_eq!(RgbBitsSteganography::new(1, 1).unwrap().max_bytes(&image), 8);
        assert_eq!(RgbBitsSteganography::new(3, 8).unwrap().max_bytes(&image), 296);
        assert_eq!(RgbBitsSteganography::new(2, 3).unwrap().max_bytes(&image), 71);
    }

    #[test]
    fn capacity_is_clamped_at_zero() {
        let image = RgbaImage::new(1, 1);
        for config in RgbBitsConfig::all() {
            assert_eq!(RgbBitsSteganography::from(config).max_bytes(&image), 0);
        }
    }

    #[test]
    fn all_configurations_are_enumerated_in_sweep_order() {
        let configs: Vec<_> = RgbBitsConfig::all().collect();
        assert_eq!(configs.len(), 24);
        assert_eq!(configs[0].to_string(), "1_components-1_bits");
        assert_eq!(configs[8].to_string(), "2_components-1_bits");
        assert_eq!(configs[23].to_string(), "3_components-8_bits");
    }
}
