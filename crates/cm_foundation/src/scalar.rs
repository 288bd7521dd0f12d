// crates/cm_foundation/src/scalar.rs

//! 精度抽象
//!
//! 网格块的浮点数组（坐标、法向、面积、体积）按 [`ScalarOps`] 泛型化，
//! 由构造时选择的精度决定实际存储类型。
//!
//! # 用法
//!
//! ```
//! use cm_foundation::scalar::ScalarOps;
//!
//! fn norm<S: ScalarOps>(v: &[S]) -> S {
//!     v.iter().fold(S::ZERO, |acc, &x| acc + x * x).sqrt()
//! }
//!
//! assert_eq!(norm(&[3.0f64, 4.0]), 5.0);
//! assert_eq!(<f32 as ScalarOps>::NAME, "f32");
//! ```

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// 标量 trait：网格浮点数组元素必须满足的约束
pub trait ScalarOps:
    Copy
    + Clone
    + Debug
    + Default
    + PartialOrd
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// 零值常量
    const ZERO: Self;
    /// 单位值常量
    const ONE: Self;
    /// 几何比较容差
    const EPSILON: Self;
    /// 精度名称
    const NAME: &'static str;
    /// 每个标量占用的字节数
    const SIZE_BYTES: usize;

    /// 绝对值
    fn abs(self) -> Self;
    /// 平方根
    fn sqrt(self) -> Self;
    /// 取较大值
    fn max(self, other: Self) -> Self;
    /// 取较小值
    fn min(self, other: Self) -> Self;
    /// 是否为有限数
    fn is_finite(self) -> bool;
    /// 从 f64 转换
    fn from_f64(v: f64) -> Self;
    /// 转换为 f64
    fn to_f64(self) -> f64;
}

impl ScalarOps for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const EPSILON: Self = 1e-12;
    const NAME: &'static str = "f64";
    const SIZE_BYTES: usize = 8;

    #[inline] fn abs(self) -> Self { f64::abs(self) }
    #[inline] fn sqrt(self) -> Self { f64::sqrt(self) }
    #[inline] fn max(self, other: Self) -> Self { f64::max(self, other) }
    #[inline] fn min(self, other: Self) -> Self { f64::min(self, other) }
    #[inline] fn is_finite(self) -> bool { f64::is_finite(self) }
    #[inline] fn from_f64(v: f64) -> Self { v }
    #[inline] fn to_f64(self) -> f64 { self }
}

impl ScalarOps for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const EPSILON: Self = 1e-6;
    const NAME: &'static str = "f32";
    const SIZE_BYTES: usize = 4;

    #[inline] fn abs(self) -> Self { f32::abs(self) }
    #[inline] fn sqrt(self) -> Self { f32::sqrt(self) }
    #[inline] fn max(self, other: Self) -> Self { f32::max(self, other) }
    #[inline] fn min(self, other: Self) -> Self { f32::min(self, other) }
    #[inline] fn is_finite(self) -> bool { f32::is_finite(self) }
    #[inline] fn from_f64(v: f64) -> Self { v as f32 }
    #[inline] fn to_f64(self) -> f64 { self as f64 }
}

/// 批量转换辅助函数
pub mod convert {
    use super::ScalarOps;

    /// 计算精度 -> f64（无损）
    pub fn slice_to_f64<S: ScalarOps>(src: &[S]) -> Vec<f64> {
        src.iter().map(|v| v.to_f64()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_ops() {
        let x: f64 = 4.0;
        assert!((ScalarOps::sqrt(x) - 2.0).abs() < 1e-10);
        let y: f32 = -3.0;
        assert!((ScalarOps::abs(y) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_precision_constants() {
        assert_eq!(<f64 as ScalarOps>::SIZE_BYTES, 8);
        assert_eq!(<f32 as ScalarOps>::SIZE_BYTES, 4);
        assert_eq!(<f64 as ScalarOps>::NAME, "f64");
    }

    #[test]
    fn test_convert() {
        let src = [1.5f32, -2.25];
        assert_eq!(convert::slice_to_f64(&src), vec![1.5, -2.25]);
    }
}
