//! 圆弧中间点的属性测试

use gcode_arm_geometry::{GeometryError, Point3D, RotationSense, arc_center, secondary_point};
use proptest::prelude::*;

fn sense() -> impl Strategy<Value = RotationSense> {
    prop_oneof![
        Just(RotationSense::Clockwise),
        Just(RotationSense::CounterClockwise),
    ]
}

fn planar_endpoints() -> impl Strategy<Value = (Point3D, Point3D)> {
    (
        -500.0..500.0f64,
        -500.0..500.0f64,
        -500.0..500.0f64,
        -500.0..500.0f64,
        -200.0..200.0f64,
    )
        .prop_map(|(x0, y0, x1, y1, z)| (Point3D::new(x0, y0, z), Point3D::new(x1, y1, z)))
        .prop_filter("chord must have XY length", |(a, b)| (*b - *a).norm_xy() > 1e-3)
}

proptest! {
    /// 中间点、起点、终点到圆心的距离都等于 |R|
    #[test]
    fn secondary_point_lies_on_circle(
        (start, target) in planar_endpoints(),
        extra in 0.0..500.0f64,
        negative in any::<bool>(),
        sense in sense(),
    ) {
        let half_chord = start.distance(&target) / 2.0;
        let magnitude = half_chord + extra;
        let radius = if negative { -magnitude } else { magnitude };

        let p = secondary_point(start, target, radius, sense).unwrap();
        let c = arc_center(start, target, radius, sense).unwrap();
        let tol = 1e-6 * (1.0 + magnitude);
        prop_assert!((c.distance(&p) - magnitude).abs() < tol);
        prop_assert!((c.distance(&start) - magnitude).abs() < tol);
        prop_assert!((c.distance(&target) - magnitude).abs() < tol);
    }

    /// 中间点与起点、终点等距（位于弦的中垂线上），且 Z 取弦中点
    #[test]
    fn secondary_point_is_equidistant(
        (start, target) in planar_endpoints(),
        extra in 0.0..500.0f64,
        sense in sense(),
    ) {
        let radius = start.distance(&target) / 2.0 + extra;
        let p = secondary_point(start, target, radius, sense).unwrap();
        prop_assert!((p.distance(&start) - p.distance(&target)).abs() < 1e-6 * (1.0 + radius));
        prop_assert!((p.z - start.z).abs() < 1e-9);
    }

    /// 顺时针与逆时针的中间点关于弦对称
    #[test]
    fn opposite_senses_are_mirrored(
        (start, target) in planar_endpoints(),
        extra in 0.0..500.0f64,
    ) {
        let radius = start.distance(&target) / 2.0 + extra;
        let cw = secondary_point(start, target, radius, RotationSense::Clockwise).unwrap();
        let ccw = secondary_point(start, target, radius, RotationSense::CounterClockwise).unwrap();
        let midpoint = (start + target) / 2.0;
        let mirrored = midpoint * 2.0 - cw;
        prop_assert!(mirrored.distance(&ccw) < 1e-6 * (1.0 + radius));
    }

    /// 半径小于半弦长一律拒绝
    #[test]
    fn short_radius_is_rejected(
        (start, target) in planar_endpoints(),
        fraction in 0.0..0.999f64,
        sense in sense(),
    ) {
        let radius = start.distance(&target) / 2.0 * fraction;
        let result = secondary_point(start, target, radius, sense);
        let is_invalid_radius = matches!(result, Err(GeometryError::InvalidArcRadius { .. }));
        prop_assert!(is_invalid_radius);
    }
}
