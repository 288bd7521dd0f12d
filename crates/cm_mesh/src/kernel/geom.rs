// crates/cm_mesh/src/kernel/geom.rs

//! 几何辅助函数
//!
//! 坐标按 `ndim` 宽度存储，计算时补零扩展为 `DVec3`，结果按 `ndim` 写回。

use cm_foundation::ScalarOps;
use glam::DVec3;

/// 读取第 `row` 行的向量
#[inline]
pub(crate) fn load<S: ScalarOps>(buf: &[S], ndim: usize, row: usize) -> DVec3 {
    let src = &buf[row * ndim..(row + 1) * ndim];
    let mut v = [0.0f64; 3];
    for (dst, s) in v.iter_mut().zip(src) {
        *dst = s.to_f64();
    }
    DVec3::from_array(v)
}

/// 写入第 `row` 行的向量
#[inline]
pub(crate) fn store<S: ScalarOps>(buf: &mut [S], ndim: usize, row: usize, v: DVec3) {
    let dst = &mut buf[row * ndim..(row + 1) * ndim];
    for (d, s) in dst.iter_mut().zip(v.to_array()) {
        *d = S::from_f64(s);
    }
}

/// 点关于平面（过 `origin`，单位法向 `normal`）的镜像
#[inline]
pub(crate) fn reflect_point(p: DVec3, origin: DVec3, normal: DVec3) -> DVec3 {
    p - 2.0 * (p - origin).dot(normal) * normal
}

/// 向量关于法向为 `normal` 的平面的镜像
#[inline]
pub(crate) fn reflect_vector(v: DVec3, normal: DVec3) -> DVec3 {
    v - 2.0 * v.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_store_2d() {
        let mut buf = vec![0.0f32; 4];
        store(&mut buf, 2, 1, DVec3::new(3.0, 4.0, 9.0));
        assert_eq!(buf, vec![0.0, 0.0, 3.0, 4.0]);
        assert_eq!(load(&buf, 2, 1), DVec3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn test_reflection() {
        let origin = DVec3::new(0.0, 1.0, 0.0);
        let normal = DVec3::Y;
        let p = reflect_point(DVec3::new(0.5, 0.5, 0.0), origin, normal);
        assert!((p - DVec3::new(0.5, 1.5, 0.0)).length() < 1e-12);
        assert_eq!(reflect_vector(DVec3::new(1.0, 1.0, 0.0), normal), DVec3::new(1.0, -1.0, 0.0));
    }
}
