//! # 比特/字节工具
//!
//! 载荷按字节数组处理，比特编号从每个字节的最高有效位开始：
//! 比特 `i` 位于字节 `i / 8` 中，从高位数第 `i % 8` 位。

/// 返回 `bytes` 的第 `index` 个比特 (0 或 1)。
pub fn bit_value(bytes: &[u8], index: u64) -> u8 {
    let (byte, shift) = locate(index);
    (bytes[byte] >> shift) & 1
}

/// 将 `bytes` 的第 `index` 个比特置 1。
pub fn set_bit(bytes: &mut [u8], index: u64) {
    let (byte, shift) = locate(index);
    bytes[byte] |= 1 << shift;
}

/// 将 `bytes` 的第 `index` 个比特清 0。
pub fn clear_bit(bytes: &mut [u8], index: u64) {
    let (byte, shift) = locate(index);
    bytes[byte] &= !(1 << shift);
}

/// 将长度编码为 4 个大端字节。
pub fn pack_u32_be(n: u32) -> [u8; 4] {
    n.to_be_bytes()
}

/// 从 4 个大端字节解码长度。
pub fn unpack_u32_be(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

// 比特索引 -> (字节下标, 右移位数)
fn locate(index: u64) -> (usize, u32) {
    ((index / 8) as usize, 7 - (index % 8) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_numbering_starts_at_most_significant_bit() {
        let bytes = [0b1000_0000, 0b0000_0001];
        assert_eq!(bit_value(&bytes, 0), 1);
        assert_eq!(bit_value(&bytes, 1), 0);
        assert_eq!(bit_value(&bytes, 7), 0);
        assert_eq!(bit_value(&bytes, 15), 1);
    }

    #[test]
    fn set_and_clear_are_inverse_and_idempotent() {
        let mut bytes = [0u8; 3];
        set_bit(&mut bytes, 10);
        set_bit(&mut bytes, 10);
        assert_eq!(bytes, [0, 0b0010_0000, 0]);
        assert_eq!(bit_value(&bytes, 10), 1);

        clear_bit(&mut bytes, 10);
        clear_bit(&mut bytes, 10);
        assert_eq!(bytes, [0, 0, 0]);
        assert_eq!(bit_value(&bytes, 10), 0);
    }

    #[test]
    fn clear_leaves_neighbouring_bits() {
        let mut bytes = [0xFF];
        clear_bit(&mut bytes, 3);
        assert_eq!(bytes, [0b1110_1111]);
    }

    #[test]
    fn length_framing_is_big_endian() {
        assert_eq!(pack_u32_be(0x0102_0304), [1, 2, 3, 4]);
        assert_eq!(unpack_u32_be([0, 0, 1, 0]), 256);
        assert_eq!(unpack_u32_be(pack_u32_be(u32::MAX)), u32::MAX);
    }
}
