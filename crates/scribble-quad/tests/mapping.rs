//! End-to-end mapping behaviour: corner acquisition through scene path.

use approx::assert_abs_diff_eq;
use scribble_math::{Point2, Point3};
use scribble_path::{plane_coords, ContourElement, ContourPath, ElementKind};
use scribble_quad::{
    map_path, map_point, ContourFrame, Corner, DetectionRegion, MapperConfig, PinholeCamera,
    PlaneRayCaster, QuadCorners, QuadError, QuadMapper,
};
use std::f64::consts::FRAC_PI_2;

const SCALE: f64 = 10.0;

fn flat_square() -> QuadCorners {
    QuadCorners::new(
        Point3::new(-1.0, 0.0, -1.0),
        Point3::new(1.0, 0.0, -1.0),
        Point3::new(-1.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
    )
    .unwrap()
}

fn noisy_quad() -> QuadCorners {
    QuadCorners::new(
        Point3::new(0.31, 0.004, -0.52),
        Point3::new(0.95, -0.006, -0.49),
        Point3::new(0.29, 0.001, 0.13),
        Point3::new(0.97, 0.009, 0.16),
    )
    .unwrap()
}

fn config(frame: ContourFrame) -> MapperConfig {
    MapperConfig {
        geometry_scale: SCALE,
        frame,
    }
}

#[test]
fn unit_square_vertices_land_on_scaled_corners() {
    let quad = noisy_quad();
    let centered = quad.center();
    let centroid = quad.centroid();
    let cfg = config(ContourFrame::TopLeft);

    let cases = [
        (Point2::new(0.0, 0.0), Corner::LeftTop),
        (Point2::new(1.0, 0.0), Corner::RightTop),
        (Point2::new(0.0, 1.0), Corner::LeftBottom),
        (Point2::new(1.0, 1.0), Corner::RightBottom),
    ];
    for (p, corner) in cases {
        let expected = (quad.get(corner) - centroid) * SCALE;
        let got = map_point(p, &centered, &cfg);
        assert_abs_diff_eq!((got.coords - expected).norm(), 0.0, epsilon = 1e-12);
    }
}

#[test]
fn centred_corners_sum_to_zero() {
    let centered = noisy_quad().center();
    let sum = centered
        .as_array()
        .iter()
        .fold(scribble_math::Vec3::zeros(), |acc, p| acc + p.coords);
    assert_abs_diff_eq!(sum.norm(), 0.0, epsilon = 1e-12);
}

#[test]
fn bottom_left_frame_reads_detector_output_directly() {
    let quad = noisy_quad();
    let centered = quad.center();
    let centroid = quad.centroid();
    let cfg = config(ContourFrame::BottomLeft);

    let got = map_point(Point2::new(0.0, 1.0), &centered, &cfg);
    let expected = (quad.get(Corner::LeftTop) - centroid) * SCALE;
    assert_abs_diff_eq!((got.coords - expected).norm(), 0.0, epsilon = 1e-12);
}

#[test]
fn centre_of_flat_square_maps_to_origin() {
    let centered = flat_square().center();
    for frame in [ContourFrame::TopLeft, ContourFrame::BottomLeft] {
        let p = map_point(Point2::new(0.5, 0.5), &centered, &config(frame));
        let flat = plane_coords(&p);
        assert_abs_diff_eq!(flat.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(flat.y, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn upper_right_regression_value() {
    // Detector frame (0.25, 0.75): weights left-top 0.5, right-top 0.25, left-bottom 0.25
    let centered = flat_square().center();
    let p = map_point(
        Point2::new(0.25, 0.75),
        &centered,
        &config(ContourFrame::BottomLeft),
    );
    let flat = plane_coords(&p);
    assert_abs_diff_eq!(flat.x, -0.5 * SCALE, epsilon = 1e-12);
    assert_abs_diff_eq!(flat.y, 0.5 * SCALE, epsilon = 1e-12);

    // y-down input flips to (0.25, 0.25), which sits on the diagonal and
    // takes the lower-left branch
    let p = map_point(
        Point2::new(0.25, 0.75),
        &centered,
        &config(ContourFrame::TopLeft),
    );
    let flat = plane_coords(&p);
    assert_abs_diff_eq!(flat.x, -0.5 * SCALE, epsilon = 1e-12);
    assert_abs_diff_eq!(flat.y, -0.5 * SCALE, epsilon = 1e-12);
}

#[test]
fn path_structure_is_preserved() {
    let centered = noisy_quad().center();
    let path = ContourPath::new(vec![
        ContourElement::MoveTo {
            to: Point2::new(0.2, 0.2),
        },
        ContourElement::LineTo {
            to: Point2::new(0.8, 0.2),
        },
        ContourElement::CurveTo {
            to: Point2::new(0.8, 0.8),
            control1: Point2::new(0.9, 0.4),
            control2: Point2::new(0.9, 0.6),
        },
        ContourElement::QuadCurveTo {
            to: Point2::new(0.2, 0.8),
            control: Point2::new(0.5, 0.95),
        },
        ContourElement::Close,
        ContourElement::MoveTo {
            to: Point2::new(0.4, 0.4),
        },
        ContourElement::LineTo {
            to: Point2::new(0.6, 0.5),
        },
        ContourElement::Close,
    ]);

    let scene = map_path(&path, &centered, &config(ContourFrame::TopLeft)).unwrap();
    assert_eq!(scene.len(), path.len());

    let expected: Vec<ElementKind> = path
        .kinds()
        .into_iter()
        .map(|k| match k {
            ElementKind::CurveTo | ElementKind::QuadCurveTo => ElementKind::LineTo,
            other => other,
        })
        .collect();
    assert_eq!(scene.kinds(), expected);
    assert_eq!(scene.outlines().len(), 2);
}

#[test]
fn full_cycle_with_overhead_camera() {
    let caster = PlaneRayCaster {
        camera: PinholeCamera {
            position: Point3::new(0.0, 1.0, 0.0),
            yaw: 0.0,
            pitch: -FRAC_PI_2,
            focal_length: 500.0,
            viewport_width: 640.0,
            viewport_height: 480.0,
        },
        plane_y: 0.0,
        half_extent: None,
    };
    let region = DetectionRegion::new(640.0, 480.0);
    let mut mapper = QuadMapper::new(config(ContourFrame::TopLeft)).unwrap();

    let corners = mapper.begin_cycle(&caster, &region).unwrap();
    // 160 px off-centre at f = 500 px, 1 m above the floor
    let lt = corners.get(Corner::LeftTop);
    assert_abs_diff_eq!(lt.x, -0.32, epsilon = 1e-9);
    assert_abs_diff_eq!(lt.z, -0.32, epsilon = 1e-9);

    let path = ContourPath::polygon(&[
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(0.0, 1.0),
    ]);
    let scene = mapper.map_path(&path).unwrap();
    let outlines = scene.plane_outlines();
    let outline = &outlines[0];

    // Top of the drawing ends up on the far side, which flattens to +y
    assert_abs_diff_eq!(outline[0].x, -3.2, epsilon = 1e-9);
    assert_abs_diff_eq!(outline[0].y, 3.2, epsilon = 1e-9);
    assert_abs_diff_eq!(outline[2].x, 3.2, epsilon = 1e-9);
    assert_abs_diff_eq!(outline[2].y, -3.2, epsilon = 1e-9);
}

#[test]
fn lost_tracking_produces_no_corners() {
    let caster = PlaneRayCaster {
        camera: PinholeCamera {
            position: Point3::new(0.0, 1.0, 0.0),
            yaw: 0.0,
            pitch: -FRAC_PI_2,
            focal_length: 500.0,
            viewport_width: 640.0,
            viewport_height: 480.0,
        },
        plane_y: 0.0,
        half_extent: Some(0.3),
    };
    let region = DetectionRegion::new(640.0, 480.0);
    let mut mapper = QuadMapper::new(MapperConfig::default()).unwrap();

    match mapper.begin_cycle(&caster, &region) {
        Err(QuadError::InsufficientTrackingData { missing }) => assert_eq!(missing.len(), 4),
        other => panic!("expected tracking failure, got {other:?}"),
    }
    assert_eq!(
        mapper.map_path(&ContourPath::default()),
        Err(QuadError::NoActiveCorners)
    );
}
