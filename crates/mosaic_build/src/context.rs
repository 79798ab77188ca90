use crate::{BuildSettings, JobHandle, JobSnapshot, Result};

use mosaic_core::{parse_vector3, prelude::*};
use mosaic_palette::{Material, PaletteRegistry};

#[cfg(any(feature = "image", feature = "mesh"))]
use crate::{Actuator, BuildError, BuildJob};
#[cfg(any(feature = "image", feature = "mesh"))]
use mosaic_palette::ColorMatcher;
#[cfg(feature = "image")]
use crate::{run_grid_build, BuildReport, FrameInfo, GridLayout};
#[cfg(feature = "image")]
use mosaic_image::SourceImage;

#[cfg(feature = "mesh")]
use crate::scheduler::apply;
#[cfg(feature = "mesh")]
use mosaic_mesh::{count_mesh_voxels, voxelize_mesh, voxelize_points, Mesh, MeshTransform};

/// Where an image build goes and which palette it uses.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageRequest {
    pub width: usize,
    pub height: usize,
    pub base: Point3i,
    /// One or more `+`-joined palette names.
    pub palette: String,
    pub label: String,
}

/// Everything one session needs to build: its palettes, its settings and its job.
///
/// The context is owned by the caller's session and lives exactly as long as it does. Only one
/// build runs at a time; other threads observe or cancel it through [`BuildContext::job_handle`].
#[derive(Debug, Default)]
pub struct BuildContext {
    palettes: PaletteRegistry,
    settings: BuildSettings,
    job: JobHandle,
}

impl BuildContext {
    pub fn new(palettes: PaletteRegistry, settings: BuildSettings) -> Self {
        Self {
            palettes,
            settings,
            job: JobHandle::default(),
        }
    }

    pub fn palettes(&self) -> &PaletteRegistry {
        &self.palettes
    }

    pub fn palettes_mut(&mut self) -> &mut PaletteRegistry {
        &mut self.palettes
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Changes apply to builds and matches started afterwards, never to voxels already issued.
    pub fn settings_mut(&mut self) -> &mut BuildSettings {
        &mut self.settings
    }

    /// A handle to this session's job, valid across builds. Clone it into a status reporter or
    /// a canceller.
    pub fn job_handle(&self) -> JobHandle {
        self.job.clone()
    }

    pub fn status(&self) -> JobSnapshot {
        self.job.snapshot()
    }

    /// Requests cancellation of the running build, if any.
    pub fn cancel(&self) -> bool {
        self.job.cancel()
    }

    /// Matches one color against `palette` with the current metric and color channel.
    pub fn resolve_material(&self, color: Rgba, palette: &str) -> Result<Material<'_>> {
        Ok(mosaic_palette::resolve_material(
            &self.palettes,
            color,
            palette,
            self.settings.match_mode(),
        )?)
    }

    /// Parses a caller's position spec (see [`parse_vector3`]) into the voxel containing it.
    pub fn parse_position(spec: &str, reference: Point3f) -> Result<Point3i> {
        Ok(parse_vector3(spec, reference)?.in_voxel())
    }

    #[cfg(any(feature = "image", feature = "mesh"))]
    fn matcher(&self, palette: &str) -> Result<ColorMatcher<'_>> {
        Ok(ColorMatcher::from_key(
            &self.palettes,
            palette,
            self.settings.match_mode(),
        )?)
    }

    #[cfg(any(feature = "image", feature = "mesh"))]
    fn start_job(&self, label: &str, total_count: usize) -> Result<BuildJob> {
        if self.job.state().is_active() {
            return Err(BuildError::JobAlreadyRunning);
        }
        tracing::info!(label, total_count, "build started");

        Ok(BuildJob::start(&self.job, label, total_count))
    }
}

#[cfg(feature = "image")]
impl BuildContext {
    fn grid_layout(&self, request: &ImageRequest) -> Result<GridLayout> {
        if self.settings.chunk_size == 0 {
            return Err(BuildError::InvalidChunkSize);
        }
        if request.width == 0 || request.height == 0 {
            return Err(BuildError::EmptyGrid {
                width: request.width,
                height: request.height,
            });
        }

        Ok(GridLayout {
            width: request.width,
            height: request.height,
            base: request.base,
            plane: self.settings.plane,
            chunk: self.settings.chunk_size,
            sweep: self.settings.sweep,
        })
    }

    /// Builds a still image (or the first frame of an animation) scaled onto a
    /// `request.width x request.height` grid.
    pub fn build_image(
        &mut self,
        image: &SourceImage,
        request: &ImageRequest,
        actuator: &mut impl Actuator,
    ) -> Result<BuildReport> {
        let layout = self.grid_layout(request)?;
        let mut matcher = self.matcher(&request.palette)?;

        let span = tracing::info_span!("build_image", label = %request.label);
        let _enter = span.enter();

        let job = self.start_job(&request.label, layout.num_cells())?;
        let report = run_grid_build(
            &job,
            &layout,
            |x, z| {
                let (u, v) = cell_uv(&layout, x, z);
                matcher.match_color(image.sample(u, v))
            },
            &mut *actuator,
        );
        finish(job, report);

        Ok(report)
    }

    /// Builds one frame of an animation. Frame 0 of a still image is the image itself.
    pub fn build_frame(
        &mut self,
        image: &SourceImage,
        frame: usize,
        request: &ImageRequest,
        actuator: &mut impl Actuator,
    ) -> Result<BuildReport> {
        let layout = self.grid_layout(request)?;
        // Fails fast on a bad frame index.
        image.sample_frame(frame, 0.0, 0.0)?;
        let mut matcher = self.matcher(&request.palette)?;

        let span = tracing::info_span!("build_frame", label = %request.label, frame);
        let _enter = span.enter();

        let job = self.start_job(&request.label, layout.num_cells())?;
        job.begin_frame(
            FrameInfo {
                index: frame,
                count: image.frame_count(),
            },
            layout.num_cells(),
        );
        let report = run_grid_build(
            &job,
            &layout,
            |x, z| matcher.match_color(sample_frame_cell(image, frame, &layout, x, z)),
            &mut *actuator,
        );
        finish(job, report);

        Ok(report)
    }

    /// Builds every frame in order, frame `i` at `request.base + frame_offset * i`. Stops at the
    /// first cancelled frame. The report sums over the frames that ran.
    pub fn build_animation(
        &mut self,
        image: &SourceImage,
        request: &ImageRequest,
        frame_offset: Point3i,
        actuator: &mut impl Actuator,
    ) -> Result<BuildReport> {
        let first_layout = self.grid_layout(request)?;
        let mut matcher = self.matcher(&request.palette)?;
        let count = image.frame_count();

        let span = tracing::info_span!("build_animation", label = %request.label, frames = count);
        let _enter = span.enter();

        let job = self.start_job(&request.label, first_layout.num_cells())?;
        let mut total = BuildReport::default();
        for index in 0..count {
            let layout = GridLayout {
                base: first_layout.base + frame_offset * index as i32,
                ..first_layout
            };
            job.begin_frame(FrameInfo { index, count }, layout.num_cells());
            tracing::debug!(index, base = ?layout.base, "frame started");

            let report = run_grid_build(
                &job,
                &layout,
                |x, z| matcher.match_color(sample_frame_cell(image, index, &layout, x, z)),
                &mut *actuator,
            );
            total.merge(report);
            if report.cancelled {
                break;
            }
        }
        finish(job, total);

        Ok(total)
    }
}

// Cells sample at their center, so a grid the size of the image hits every pixel exactly.
#[cfg(feature = "image")]
#[inline]
fn cell_uv(layout: &GridLayout, x: usize, z: usize) -> (f32, f32) {
    (
        (x as f32 + 0.5) / layout.width as f32,
        (z as f32 + 0.5) / layout.height as f32,
    )
}

#[cfg(feature = "image")]
#[inline]
fn sample_frame_cell(
    image: &SourceImage,
    frame: usize,
    layout: &GridLayout,
    x: usize,
    z: usize,
) -> Rgba {
    let (u, v) = cell_uv(layout, x, z);
    // The frame index was checked before the build started.
    image.sample_frame(frame, u, v).unwrap_or_default()
}

#[cfg(feature = "mesh")]
impl BuildContext {
    /// Voxelizes every face of `mesh`, coloring each voxel from `texture` at its interpolated
    /// texture coordinate. Voxels go to the actuator as soon as they are computed, in face order.
    /// Cancellation is checked before each voxel, as for image builds.
    pub fn build_mesh(
        &mut self,
        mesh: &Mesh,
        texture: &SourceImage,
        palette: &str,
        transform: &MeshTransform,
        label: &str,
        actuator: &mut impl Actuator,
    ) -> Result<BuildReport> {
        let mut matcher = self.matcher(palette)?;

        let span = tracing::info_span!("build_mesh", label, faces = mesh.faces.len());
        let _enter = span.enter();

        let job = self.start_job(label, count_mesh_voxels(mesh, transform))?;
        let mut report = BuildReport {
            total: job.handle().total_count(),
            ..Default::default()
        };
        let finished = voxelize_mesh(mesh, transform, &mut |p, uv| {
            if job.should_stop() {
                return false;
            }
            let material = matcher.match_color(texture.sample(uv.x(), uv.y()));
            if apply(&mut *actuator, p, material) {
                report.rejected += 1;
            }
            job.record_voxel();
            report.placed += 1;
            true
        });
        report.cancelled = !finished;
        finish(job, report);

        Ok(report)
    }

    /// Places the marker material at every vertex of `mesh`, ignoring faces and texture.
    pub fn build_mesh_points(
        &mut self,
        mesh: &Mesh,
        transform: &MeshTransform,
        label: &str,
        actuator: &mut impl Actuator,
    ) -> Result<BuildReport> {
        let span = tracing::info_span!("build_mesh_points", label);
        let _enter = span.enter();

        let marker = self.settings.marker_material.clone();
        let job = self.start_job(label, mesh.vertices.len())?;
        let mut report = BuildReport {
            total: mesh.vertices.len(),
            ..Default::default()
        };
        let finished = voxelize_points(mesh, transform, &mut |p| {
            if job.should_stop() {
                return false;
            }
            if apply(&mut *actuator, p, Material::Block(&marker)) {
                report.rejected += 1;
            }
            job.record_voxel();
            report.placed += 1;
            true
        });
        report.cancelled = !finished;
        finish(job, report);

        Ok(report)
    }
}

#[cfg(any(feature = "image", feature = "mesh"))]
fn finish(job: BuildJob, report: crate::BuildReport) {
    let cancelled = job.finish();
    debug_assert_eq!(cancelled, report.cancelled);
    if cancelled {
        tracing::info!(placed = report.placed, total = report.total, "build cancelled");
    } else {
        tracing::info!(
            placed = report.placed,
            rejected = report.rejected,
            "build finished"
        );
    }
}
