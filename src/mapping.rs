//! # 索引映射模块
//!
//! 将载荷流中的逻辑比特偏移映射为图像中的 `(x, y, 分量, 比特位)` 坐标。
//! 这里的函数都是纯函数，不接触图像，也不关心容量：偏移超出容量时
//! 得到的坐标可能落在图像之外 (`y >= height`) 或一个字节之外 (`bit >= 8`)，由调用方负责约束。

/// 一个比特在图像中的位置。只在计算时产生，从不存储。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    pub x: u32,
    pub y: u64,
    /// 颜色分量下标：0 = B, 1 = G, 2 = R。
    pub component: u8,
    /// 分量内的比特位，0 为最低有效位。
    pub bit: u64,
}

/// 单平面映射：只使用分量 0 的最低有效位，像素按行优先顺序排列。
///
/// # Panics
///
/// `width` 为 0 时除零。
pub fn single_plane(offset: u64, width: u32) -> Coordinate {
    let width = u64::from(width);
    Coordinate {
        x: (offset % width) as u32,
        y: offset / width,
        component: 0,
        bit: 0,
    }
}

/// 多平面映射。
///
/// 先用满整幅图像分量 0 的第 0 位，再依次是分量 1、分量 2 的第 0 位 (视 `components` 而定)，
/// 所有分量的当前位都用完之后才提升到下一个有效位：
///
/// ```text
/// pass      = offset / P
/// component = pass % K
/// bit       = pass / K
/// x         = (offset % P) % W
/// y         = (offset % P) / W
/// ```
///
/// # Panics
///
/// `width`、`height` 或 `components` 为 0 时除零。调用方需先确认图像非空、配置合法。
pub fn multi_plane(offset: u64, width: u32, height: u32, components: u8) -> Coordinate {
    let pixels = u64::from(width) * u64::from(height);
    let components = u64::from(components);
    let pass = offset / pixels;
    let linear = offset % pixels;
    Coordinate {
        x: (linear % u64::from(width)) as u32,
        y: linear / u64::from(width),
        component: (pass % components) as u8,
        bit: pass / components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_plane_walks_rows() {
        assert_eq!(
            single_plane(0, 10),
            Coordinate { x: 0, y: 0, component: 0, bit: 0 }
        );
        assert_eq!(
            single_plane(9, 10),
            Coordinate { x: 9, y: 0, component: 0, bit: 0 }
        );
        assert_eq!(
            single_plane(23, 10),
            Coordinate { x: 3, y: 2, component: 0, bit: 0 }
        );
    }

    #[test]
    fn multi_plane_exhausts_component_zero_first() {
        // 4x2 图像，8 个像素
        assert_eq!(
            multi_plane(7, 4, 2, 3),
            Coordinate { x: 3, y: 1, component: 0, bit: 0 }
        );
        assert_eq!(
            multi_plane(8, 4, 2, 3),
            Coordinate { x: 0, y: 0, component: 1, bit: 0 }
        );
        assert_eq!(
            multi_plane(17, 4, 2, 3),
            Coordinate { x: 1, y: 0, component: 2, bit: 0 }
        );
    }

    #[test]
    fn multi_plane_raises_significance_after_all_components() {
        assert_eq!(
            multi_plane(24, 4, 2, 3),
            Coordinate { x: 0, y: 0, component: 0, bit: 1 }
        );
        assert_eq!(
            multi_plane(16, 4, 2, 2),
            Coordinate { x: 0, y: 0, component: 0, bit: 1 }
        );
        assert_eq!(
            multi_plane(8, 4, 2, 1),
            Coordinate { x: 0, y: 0, component: 0, bit: 1 }
        );
    }

    #[test]
    fn multi_plane_with_one_component_matches_single_plane_on_first_pass() {
        for offset in 0..100 {
            assert_eq!(multi_plane(offset, 10, 10, 1), single_plane(offset, 10));
        }
    }

    #[test]
    fn mapping_is_capacity_agnostic() {
        // 1x1 图像、3 个分量：第 31 个比特落在第 10 位，超出一个字节
        let coordinate = multi_plane(31, 1, 1, 3);
        assert_eq!(coordinate.component, 1);
        assert_eq!(coordinate.bit, 10);
    }

    #[test]
    fn every_offset_within_budget_is_visited_once() {
        let (width, height, components) = (3u32, 2u32, 3u8);
        let total = u64::from(width) * u64::from(height) * u64::from(components) * 8;
        let mut seen = std::collections::HashSet::new();
        for offset in 0..total {
            let c = multi_plane(offset, width, height, components);
            assert!(c.bit < 8 && c.y < u64::from(height));
            assert!(seen.insert((c.x, c.y, c.component, c.bit)));
        }
    }

    #[test]
    #[should_panic]
    fn single_plane_needs_a_non_empty_row() {
        single_plane(0, 0);
    }

    #[test]
    #[should_panic]
    fn multi_plane_needs_pixels() {
        multi_plane(0, 4, 0, 1);
    }

    #[test]
    #[should_panic]
    fn multi_plane_needs_a_component() {
        multi_plane(0, 4, 4, 0);
    }
}
