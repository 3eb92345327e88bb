//! # bitplane_hide 库
//!
//! 本库包含位平面隐写工具的核心逻辑：比特工具、索引映射、
//! 单平面与多平面隐写算法、去标识化预处理，以及命令行处理层。

// 声明库包含的所有模块。

pub mod bits;
pub mod carrier;
pub mod cli;
pub mod constants;
pub mod deidentification;
pub mod error;
pub mod handler;
pub mod lsb;
pub mod mapping;
pub mod rgb_bits;
pub mod steganography;
