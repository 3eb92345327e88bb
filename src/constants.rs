/// 长度前缀占用的字节数。
/// 载荷长度以大端 `u32` 写入，位于最低的比特偏移处，紧随其后才是载荷本身。
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// 打包像素 `B | G << 8 | R << 16 | A << 24` 的总比特数。
pub const PACKED_PIXEL_BITS: u64 = 32;

/// 每个字节的比特数。
pub const BITS_PER_BYTE: u64 = 8;

/// 每个像素可用的颜色分量数量上限 (B, G, R)。
pub const MAX_COMPONENTS: u8 = 3;

/// 每个颜色分量可用的比特数上限。
pub const MAX_BITS_PER_COMPONENT: u8 = 8;

/// 反向去标识化预处理写入的哨兵颜色：不透明的纯黑 (打包格式 `B | G << 8 | R << 16 | A << 24`)。
pub const SENTINEL_PIXEL: u32 = 0xFF00_0000;

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复出的载荷文件名的前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";

/// 未指定输出路径时，恢复出的去标识化图像文件名的前缀。
pub const RESTORED_PREFIX: &str = "restored_";

/// 隐写图像的默认扩展名 (必须是无损格式)。
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// 恢复载荷的默认扩展名。
pub const DEFAULT_PAYLOAD_EXTENSION: &str = "bin";
