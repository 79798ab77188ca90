#![cfg(all(feature = "image", feature = "mesh"))]

use mosaic_build::{
    Actuator, BuildContext, BuildError, BuildSettings, FrameInfo, GridPlane, ImageRequest,
    JobState, Material, Outcome, RecordingActuator, SweepOrder, VoxelOp,
};
use mosaic_core::prelude::*;
use mosaic_image::SourceImage;
use mosaic_mesh::{Mesh, MeshTransform};
use mosaic_palette::{ColorMetric, PaletteError, PaletteRegistry};

use pretty_assertions::assert_eq;
use std::{sync::mpsc, thread};
use utilities::data_sets::*;

fn context(settings: BuildSettings) -> BuildContext {
    let palettes = PaletteRegistry::from_json_str(MONOCHROME_PALETTES_JSON).unwrap();
    BuildContext::new(palettes, settings)
}

fn request(width: usize, height: usize, palette: &str) -> ImageRequest {
    ImageRequest {
        width,
        height,
        base: PointN([0, 64, 0]),
        palette: palette.to_owned(),
        label: "test".to_owned(),
    }
}

fn placed(actuator: &RecordingActuator) -> Vec<(Point3i, Option<String>)> {
    actuator
        .voxel_ops()
        .map(|op| match op {
            VoxelOp::Place(p, m) => (*p, Some(m.clone())),
            VoxelOp::Clear(p) => (*p, None),
            VoxelOp::Tick => unreachable!(),
        })
        .collect()
}

#[test]
fn striped_image_follows_column_major_serpentine() {
    let mut ctx = context(BuildSettings {
        chunk_size: 2,
        sweep: SweepOrder::ColumnMajor,
        ..Default::default()
    });
    let image = SourceImage::from_shape_vec(&[4, 3, 3], striped_rgb(4, 3)).unwrap();
    let mut actuator = RecordingActuator::new();

    let report = ctx
        .build_image(&image, &request(4, 3, "black+white"), &mut actuator)
        .unwrap();

    assert!(!report.cancelled);
    assert_eq!((report.placed, report.total), (12, 12));
    let order: Vec<(i32, i32)> = placed(&actuator)
        .iter()
        .map(|(p, _)| (p.x(), p.z()))
        .collect();
    assert_eq!(
        order,
        vec![
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 1),
            (1, 2),
            (2, 2),
            (2, 1),
            (2, 0),
            (3, 2),
            (3, 1),
            (3, 0),
        ]
    );
    for (p, material) in placed(&actuator) {
        let expected = if p.x() % 2 == 0 { "black" } else { "white" };
        assert_eq!(material.as_deref(), Some(expected));
        assert_eq!(p.y(), 64);
    }
    let status = ctx.status();
    assert_eq!(status.state, JobState::Done);
    assert_eq!(status.placed_count, 12);
}

#[test]
fn transparent_pixels_clear_and_still_count() {
    let mut ctx = context(BuildSettings::default());
    let image = SourceImage::from_shape_vec(&[2, 2, 4], checkered_alpha_rgba(2, 2)).unwrap();
    let mut actuator = RecordingActuator::new();

    let report = ctx
        .build_image(&image, &request(2, 2, "white"), &mut actuator)
        .unwrap();

    assert_eq!(report.placed, 4);
    let ops = placed(&actuator);
    assert_eq!(ops.iter().filter(|(_, m)| m.is_none()).count(), 2);
    assert!(ops.contains(&(PointN([0, 64, 0]), Some("white".to_owned()))));
    assert!(ops.contains(&(PointN([1, 64, 0]), None)));
}

#[test]
fn unknown_palette_fails_before_any_voxel() {
    let mut ctx = context(BuildSettings::default());
    let image = SourceImage::from_shape_vec(&[1, 1, 3], vec![0, 0, 0]).unwrap();
    let mut actuator = RecordingActuator::new();

    let result = ctx.build_image(&image, &request(3, 3, "black+doesnotexist"), &mut actuator);

    assert!(matches!(
        result,
        Err(BuildError::Palette(PaletteError::UnknownPalette { .. }))
    ));
    assert!(actuator.ops.is_empty());
    assert_eq!(ctx.status().state, JobState::Idle);
}

#[test]
fn invalid_layouts_fail_fast() {
    let image = SourceImage::from_shape_vec(&[1, 1, 3], vec![0, 0, 0]).unwrap();
    let mut actuator = RecordingActuator::new();

    let mut ctx = context(BuildSettings {
        chunk_size: 0,
        ..Default::default()
    });
    assert!(matches!(
        ctx.build_image(&image, &request(2, 2, "black"), &mut actuator),
        Err(BuildError::InvalidChunkSize)
    ));

    let mut ctx = context(BuildSettings::default());
    assert!(matches!(
        ctx.build_image(&image, &request(0, 2, "black"), &mut actuator),
        Err(BuildError::EmptyGrid { width: 0, height: 2 })
    ));
    assert!(matches!(
        ctx.build_frame(&image, 1, &request(2, 2, "black"), &mut actuator),
        Err(BuildError::Image(_))
    ));
    assert!(actuator.ops.is_empty());
}

// Hands each tick to another thread and waits for it to be acknowledged.
struct SteppedActuator {
    inner: RecordingActuator,
    ticks: mpsc::Sender<()>,
    acks: mpsc::Receiver<()>,
}

impl Actuator for SteppedActuator {
    fn place(&mut self, position: Point3i, material: &str) -> Outcome {
        self.inner.place(position, material)
    }

    fn clear(&mut self, position: Point3i) -> Outcome {
        self.inner.clear(position)
    }

    fn wait_one_tick(&mut self) {
        self.inner.wait_one_tick();
        if self.ticks.send(()).is_ok() {
            let _ = self.acks.recv();
        }
    }
}

#[test]
fn cancel_from_another_thread_stops_between_voxels() {
    let mut ctx = context(BuildSettings {
        chunk_size: 2,
        ..Default::default()
    });
    let image = SourceImage::from_shape_vec(&[4, 3, 3], striped_rgb(4, 3)).unwrap();
    let (tick_tx, tick_rx) = mpsc::channel();
    let (ack_tx, ack_rx) = mpsc::channel();
    let mut actuator = SteppedActuator {
        inner: RecordingActuator::new(),
        ticks: tick_tx,
        acks: ack_rx,
    };

    let handle = ctx.job_handle();
    let reporter = thread::spawn(move || {
        // Let the first chunk row through, then cancel during the second tick.
        tick_rx.recv().unwrap();
        let mid_build = handle.snapshot();
        ack_tx.send(()).unwrap();
        tick_rx.recv().unwrap();
        assert!(handle.cancel());
        ack_tx.send(()).unwrap();
        // Drain anything else so the builder never blocks.
        while tick_rx.recv().is_ok() {
            let _ = ack_tx.send(());
        }
        mid_build
    });

    let report = ctx
        .build_image(&image, &request(4, 3, "black+white"), &mut actuator)
        .unwrap();
    drop(actuator);
    let mid_build = reporter.join().unwrap();

    assert_eq!(mid_build.state, JobState::Running);
    assert_eq!(mid_build.placed_count, 2);
    assert_eq!(mid_build.total_count, 12);

    assert!(report.cancelled);
    assert_eq!(report.placed, 4);
    assert!(report.placed < report.total);
    let status = ctx.status();
    assert_eq!(status.state, JobState::Done);
    assert_eq!(status.placed_count, 4);
}

#[test]
fn animation_frames_land_at_offsets() {
    let mut ctx = context(BuildSettings {
        chunk_size: 1,
        plane: GridPlane::Vertical,
        ..Default::default()
    });
    // Frame 0 black, frame 1 white, 1x1 pixels.
    let image = SourceImage::from_shape_vec(&[2, 1, 1, 3], vec![0, 0, 0, 255, 255, 255]).unwrap();
    let mut actuator = RecordingActuator::new();

    let report = ctx
        .build_animation(
            &image,
            &request(1, 2, "black+white"),
            PointN([0, 0, 5]),
            &mut actuator,
        )
        .unwrap();

    assert_eq!((report.placed, report.total), (4, 4));
    assert_eq!(
        placed(&actuator),
        vec![
            (PointN([0, 65, 0]), Some("black".to_owned())),
            (PointN([0, 64, 0]), Some("black".to_owned())),
            (PointN([0, 65, 5]), Some("white".to_owned())),
            (PointN([0, 64, 5]), Some("white".to_owned())),
        ]
    );
    assert_eq!(
        ctx.status().frame_info,
        Some(FrameInfo { index: 1, count: 2 })
    );
}

#[test]
fn single_frame_build_uses_that_frame() {
    let mut ctx = context(BuildSettings::default());
    let image = SourceImage::from_shape_vec(&[2, 1, 1, 3], vec![0, 0, 0, 255, 255, 255]).unwrap();
    let mut actuator = RecordingActuator::new();

    ctx.build_frame(&image, 1, &request(1, 1, "black+white"), &mut actuator)
        .unwrap();

    assert_eq!(placed(&actuator), vec![(PointN([0, 64, 0]), Some("white".to_owned()))]);
}

#[test]
fn resolve_material_reads_current_settings() {
    let mut ctx = context(BuildSettings::default());
    let gray = Rgba::new(128, 128, 128, 255);

    assert_eq!(ctx.resolve_material(gray, "gray").unwrap(), Material::Block("gray_a"));
    ctx.settings_mut().metric = ColorMetric::Lab;
    assert_eq!(ctx.resolve_material(gray, "gray").unwrap(), Material::Block("gray_a"));
    assert_eq!(
        ctx.resolve_material(Rgba::new(128, 128, 128, 0), "gray").unwrap(),
        Material::Transparent
    );
    assert!(ctx.resolve_material(gray, "gray+nope").is_err());
}

#[test]
fn position_specs_floor_into_voxels() {
    let here = PointN([10.5, 64.0, -3.2]);
    assert_eq!(
        BuildContext::parse_position("~ ~1 ~", here).unwrap(),
        PointN([10, 65, -4])
    );
    assert!(matches!(
        BuildContext::parse_position("1 2", here),
        Err(BuildError::InvalidVectorSpec(_))
    ));
}

#[test]
fn mesh_build_streams_every_rasterized_voxel() {
    let mut ctx = context(BuildSettings::default());
    let mesh = Mesh::parse(RIGHT_TRIANGLE_OBJ).unwrap();
    // A 2x2 texture: black on the left column, white on the right.
    let texture = SourceImage::from_shape_vec(&[2, 2, 3], striped_rgb(2, 2)).unwrap();
    let transform = MeshTransform {
        origin: PointN([100.0, 0.0, 0.0]),
        scale: 6.0,
    };
    let mut actuator = RecordingActuator::new();

    let report = ctx
        .build_mesh(&mesh, &texture, "black+white", &transform, "tri", &mut actuator)
        .unwrap();

    assert!(!report.cancelled);
    assert_eq!(report.placed, report.total);
    assert_eq!(actuator.voxel_ops().count(), report.total);
    assert_eq!(actuator.ticks(), 0);
    for (p, material) in placed(&actuator) {
        assert!((100..=106).contains(&p.x()) && (0..=6).contains(&p.y()) && p.z() == 0);
        assert!(material.is_some());
    }
    // The first voxel is vertex A with uv (0, 0), the black left column.
    assert_eq!(
        placed(&actuator)[0],
        (PointN([100, 0, 0]), Some("black".to_owned()))
    );
}

struct CancelOnPlace {
    inner: RecordingActuator,
    handle: mosaic_build::JobHandle,
    after: usize,
}

impl Actuator for CancelOnPlace {
    fn place(&mut self, position: Point3i, material: &str) -> Outcome {
        let outcome = self.inner.place(position, material);
        if self.inner.ops.len() == self.after {
            self.handle.cancel();
        }
        outcome
    }

    fn clear(&mut self, position: Point3i) -> Outcome {
        self.inner.clear(position)
    }

    fn wait_one_tick(&mut self) {}
}

#[test]
fn mesh_builds_can_be_cancelled() {
    let mut ctx = context(BuildSettings::default());
    let mesh = Mesh::parse(UNIT_CUBE_OBJ).unwrap();
    let texture = SourceImage::from_shape_vec(&[1, 1, 3], vec![9, 9, 9]).unwrap();
    let transform = MeshTransform {
        origin: Point3f::ZERO,
        scale: 5.0,
    };
    let mut actuator = CancelOnPlace {
        inner: RecordingActuator::new(),
        handle: ctx.job_handle(),
        after: 7,
    };

    let report = ctx
        .build_mesh(&mesh, &texture, "black", &transform, "cube", &mut actuator)
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.placed, 7);
    assert!(report.total > 7);
    assert_eq!(ctx.status().state, JobState::Done);
}

#[test]
fn points_build_places_marker_at_each_vertex() {
    let mut ctx = context(BuildSettings {
        marker_material: "minecraft:glowstone".to_owned(),
        ..Default::default()
    });
    let mesh = Mesh::parse(UNIT_CUBE_OBJ).unwrap();
    let transform = MeshTransform {
        origin: PointN([0.0, 10.0, 0.0]),
        scale: 3.0,
    };
    let mut actuator = RecordingActuator::new();

    let report = ctx
        .build_mesh_points(&mesh, &transform, "points", &mut actuator)
        .unwrap();

    assert_eq!((report.placed, report.total), (8, 8));
    let ops = placed(&actuator);
    assert!(ops
        .iter()
        .all(|(_, m)| m.as_deref() == Some("minecraft:glowstone")));
    assert_eq!(ops[6].0, PointN([3, 13, 3]));
}
