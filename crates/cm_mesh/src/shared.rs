// crates/cm_mesh/src/shared.rs

//! 共享数组
//!
//! 每个属性只持有一块连续缓冲区，幽灵区在前、内部区在后：
//!
//! ```text
//! 位置:    0 ........ g-1 | g ............ g+n-1
//! 内容:    幽灵区 (逆序)   | 内部区
//! 相对索引: -1 ...... -g  | 0 ............ n-1
//! ```
//!
//! - 内部视图 [`SharedArray::interior`] 就是上半区的切片，不存在第二份拷贝；
//! - 构造顺序第 k 个幽灵实体位于位置 `g-1-k`，相对索引 `-(k+1)`；
//! - 连接性数组中存放的是相对索引，位置 = `g + 相对索引`。

use crate::error::{MeshError, MeshResult};

/// 定宽行、幽灵区在前的共享数组
#[derive(Debug, Clone, PartialEq)]
pub struct SharedArray<T> {
    data: Vec<T>,
    stride: usize,
    n_ghost: usize,
}

impl<T: Copy> SharedArray<T> {
    /// 创建只含内部区的数组，全部填充 `fill`
    pub fn filled(n_rows: usize, stride: usize, fill: T) -> Self {
        debug_assert!(stride > 0, "stride must be positive");
        Self {
            data: vec![fill; n_rows * stride],
            stride,
            n_ghost: 0,
        }
    }

    /// 分配 `n_ghost + n_interior` 行的共享数组，全部填充 `fill`
    pub fn allocate(n_ghost: usize, n_interior: usize, stride: usize, fill: T) -> Self {
        Self {
            data: vec![fill; (n_ghost + n_interior) * stride],
            stride,
            n_ghost,
        }
    }

    /// 行宽
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// 幽灵行数
    #[inline]
    pub fn n_ghost(&self) -> usize {
        self.n_ghost
    }

    /// 总行数
    #[inline]
    pub fn n_total(&self) -> usize {
        self.data.len() / self.stride
    }

    /// 内部行数
    #[inline]
    pub fn n_interior(&self) -> usize {
        self.n_total() - self.n_ghost
    }

    /// 整块共享缓冲区
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// 整块共享缓冲区（可变）
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// 内部区视图
    #[inline]
    pub fn interior(&self) -> &[T] {
        &self.data[self.n_ghost * self.stride..]
    }

    /// 内部区视图（可变）
    #[inline]
    pub fn interior_mut(&mut self) -> &mut [T] {
        let start = self.n_ghost * self.stride;
        &mut self.data[start..]
    }

    /// 幽灵区视图（位置顺序，即构造逆序）
    #[inline]
    pub fn ghost(&self) -> &[T] {
        &self.data[..self.n_ghost * self.stride]
    }

    /// 按共享位置取行
    #[inline]
    pub fn row(&self, pos: usize) -> &[T] {
        &self.data[pos * self.stride..(pos + 1) * self.stride]
    }

    /// 按共享位置取行（可变）
    #[inline]
    pub fn row_mut(&mut self, pos: usize) -> &mut [T] {
        let stride = self.stride;
        &mut self.data[pos * stride..(pos + 1) * stride]
    }

    /// 第 i 个内部行
    #[inline]
    pub fn interior_row(&self, i: usize) -> &[T] {
        self.row(self.n_ghost + i)
    }

    /// 第 i 个内部行（可变）
    #[inline]
    pub fn interior_row_mut(&mut self, i: usize) -> &mut [T] {
        let pos = self.n_ghost + i;
        self.row_mut(pos)
    }

    /// 构造顺序第 k 个幽灵行（位于位置 `g-1-k`）
    #[inline]
    pub fn ghost_row(&self, k: usize) -> &[T] {
        debug_assert!(k < self.n_ghost);
        self.row(self.n_ghost - 1 - k)
    }

    /// 相对索引转共享位置；越界返回 `None`
    #[inline]
    pub fn position(&self, rel: i64) -> Option<usize> {
        let pos = self.n_ghost as i64 + rel;
        if pos >= 0 && (pos as usize) < self.n_total() {
            Some(pos as usize)
        } else {
            None
        }
    }

    /// 按相对索引取行
    pub fn rel_row(&self, rel: i64) -> Option<&[T]> {
        self.position(rel).map(|pos| self.row(pos))
    }

    /// 丢弃全部数据，重建为 `n_rows` 行的纯内部数组
    pub fn reset_rows(&mut self, n_rows: usize, fill: T) {
        *self = Self::filled(n_rows, self.stride, fill);
    }

    /// 生成带幽灵区的新共享数组：幽灵区填充 `fill`，内部区拷贝自当前内部区
    ///
    /// 只能在尚无幽灵区时调用。
    pub fn repack_with_ghost(&self, n_ghost: usize, fill: T) -> MeshResult<Self> {
        if self.n_ghost != 0 {
            return Err(MeshError::internal(format!(
                "共享数组已含 {} 行幽灵区，不能重复打包",
                self.n_ghost
            )));
        }
        let mut packed = Self::allocate(n_ghost, self.n_interior(), self.stride, fill);
        packed.interior_mut().copy_from_slice(self.interior());
        Ok(packed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_only() {
        let arr = SharedArray::filled(3, 2, -1i32);
        assert_eq!(arr.n_total(), 3);
        assert_eq!(arr.n_interior(), 3);
        assert_eq!(arr.n_ghost(), 0);
        assert!(arr.ghost().is_empty());
        assert_eq!(arr.interior().len(), 6);
    }

    #[test]
    fn test_repack_keeps_interior_in_upper_region() {
        let mut arr = SharedArray::filled(2, 2, 0i32);
        arr.interior_mut().copy_from_slice(&[1, 2, 3, 4]);

        let packed = arr.repack_with_ghost(3, -1).unwrap();
        assert_eq!(packed.n_total(), 5);
        assert_eq!(packed.n_ghost(), 3);
        assert_eq!(packed.interior(), arr.interior());
        assert_eq!(&packed.as_slice()[6..], &[1, 2, 3, 4]);
        assert!(packed.ghost().iter().all(|&v| v == -1));
        assert_eq!(packed.interior_row(1), &[3, 4]);
    }

    #[test]
    fn test_repack_twice_rejected() {
        let arr = SharedArray::filled(2, 1, 0.0f64);
        let packed = arr.repack_with_ghost(1, 0.0).unwrap();
        assert!(packed.repack_with_ghost(1, 0.0).is_err());
    }

    #[test]
    fn test_relative_addressing() {
        let mut arr = SharedArray::allocate(2, 3, 1, 0i32);
        arr.as_mut_slice().copy_from_slice(&[11, 10, 0, 1, 2]);

        // 构造顺序第 0 个幽灵实体在位置 g-1
        assert_eq!(arr.ghost_row(0), &[10]);
        assert_eq!(arr.ghost_row(1), &[11]);
        assert_eq!(arr.rel_row(-1), Some(&[10][..]));
        assert_eq!(arr.rel_row(-2), Some(&[11][..]));
        assert_eq!(arr.rel_row(2), Some(&[2][..]));
        assert_eq!(arr.rel_row(-3), None);
        assert_eq!(arr.rel_row(3), None);
    }

    #[test]
    fn test_reset_rows() {
        let mut arr = SharedArray::filled(2, 3, 7i32);
        arr.reset_rows(4, -1);
        assert_eq!(arr.n_interior(), 4);
        assert_eq!(arr.stride(), 3);
        assert!(arr.as_slice().iter().all(|&v| v == -1));
    }
}
