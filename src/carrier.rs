//! # 载体图像模块
//!
//! 编解码器只通过 [`Carrier`] 访问图像：宽、高，以及按坐标读写打包后的像素值。
//! 打包格式为 `B | G << 8 | R << 16 | A << 24`，因此分量 0 是蓝色，分量 1 是绿色，分量 2 是红色。

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

/// 可随机访问的像素网格。
pub trait Carrier {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// 读取 `(x, y)` 处的打包像素。
    fn get(&self, x: u32, y: u32) -> u32;
    /// 写入 `(x, y)` 处的打包像素。
    fn set(&mut self, x: u32, y: u32, pixel: u32);

    /// 像素总数。
    fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }
}

impl Carrier for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn get(&self, x: u32, y: u32) -> u32 {
        let Rgba([r, g, b, a]) = *self.get_pixel(x, y);
        pack(r, g, b, a)
    }

    fn set(&mut self, x: u32, y: u32, pixel: u32) {
        let [b, g, r, a] = pixel.to_le_bytes();
        self.put_pixel(x, y, Rgba([r, g, b, a]));
    }
}

/// 没有 alpha 通道：读取时 alpha 视为 0xFF，写入时忽略。
impl Carrier for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn get(&self, x: u32, y: u32) -> u32 {
        let Rgb([r, g, b]) = *self.get_pixel(x, y);
        pack(r, g, b, 0xFF)
    }

    fn set(&mut self, x: u32, y: u32, pixel: u32) {
        let [b, g, r, _] = pixel.to_le_bytes();
        self.put_pixel(x, y, Rgb([r, g, b]));
    }
}

fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_le_bytes([b, g, r, a])
}

fn mask(component: u8, bit: u8) -> u32 {
    1 << (8 * u32::from(component) + u32::from(bit))
}

/// 读取像素中 `component` 分量的第 `bit` 位。
pub fn component_bit(pixel: u32, component: u8, bit: u8) -> u8 {
    ((pixel & mask(component, bit)) != 0) as u8
}

/// 将像素中 `component` 分量的第 `bit` 位置 1，其他比特不变。
pub fn set_component_bit(pixel: u32, component: u8, bit: u8) -> u32 {
    pixel | mask(component, bit)
}

/// 将像素中 `component` 分量的第 `bit` 位清 0，其他比特不变。
pub fn clear_component_bit(pixel: u32, component: u8, bit: u8) -> u32 {
    pixel & !mask(component, bit)
}

/// 为隐写准备一份独立的 RGBA 副本。
///
/// 隐藏操作会原地修改图像，调用方应只把这份副本交给编解码器。
pub fn working_copy(original: &DynamicImage) -> RgbaImage {
    original.to_rgba8()
}
