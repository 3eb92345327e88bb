//! # 错误类型模块
//!
//! 隐写编解码器的所有失败情形。它们都是本地、同步的普通错误返回，
//! 调用方 (命令处理层) 通过 `anyhow` 为其附加上下文。

use thiserror::Error;

/// 隐写编解码过程中可能出现的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 载荷大于当前配置下图像的容量。在写入任何像素之前返回，图像保持不变。
    #[error("Maximum data size is {capacity} bytes! Given size: {requested} bytes")]
    InsufficientSpace { capacity: i64, requested: usize },

    /// 配置参数超出闭区间。之前的有效配置保持不变。
    #[error("Number of {parameter} must be between {min} and {max}, inclusive! Given: {value}")]
    InvalidConfiguration {
        parameter: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },

    /// 长度前缀声明的载荷超出了图像在当前配置下能容纳的范围，
    /// 通常意味着图像未经隐写、已损坏，或使用了不同的参数。
    #[error(
        "Declared payload of {declared} bytes exceeds the {capacity} bytes this image can hold under the current configuration"
    )]
    DeclaredLengthOutOfRange { declared: u32, capacity: i64 },

    /// 比特偏移映射到了图像之外的位置。
    #[error(
        "Bit offset {offset} maps outside the image or its 32-bit pixels (x: {x}, y: {y}, component: {component}, bit: {bit}) for a {width}x{height} image"
    )]
    OutOfRange {
        offset: u64,
        x: u32,
        y: u64,
        component: u8,
        bit: u64,
        width: u32,
        height: u32,
    },

    /// 去标识化区域不在图像内，或起点大于终点。
    #[error(
        "Region ({x_start}, {y_start})-({x_end}, {y_end}) does not fit inside a {width}x{height} image"
    )]
    InvalidRegion {
        x_start: u32,
        y_start: u32,
        x_end: u32,
        y_end: u32,
        width: u32,
        height: u32,
    },

    /// 提取出的像素字节数与去标识化区域的大小不一致。
    #[error("Region needs {expected} bytes of pixel data, but {actual} bytes were given")]
    RegionSizeMismatch { expected: usize, actual: usize },
}

impl StegoError {
    /// 判断错误是否属于"越界读取"一类 (坐标越界或长度前缀不可信)。
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::OutOfRange { .. } | Self::DeclaredLengthOutOfRange { .. }
        )
    }
}
