use crate::{Actuator, BuildJob, BuildReport, GridPlane, Outcome, SweepOrder};

use mosaic_core::Point3i;
use mosaic_palette::Material;

/// One step of a grid build: process a cell, or give the rate limiter a tick.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GridStep {
    Cell(usize, usize),
    Yield,
}

/// The serpentine (boustrophedon) order over a `width x height` grid.
///
/// Columns are grouped into chunks of `chunk` (the last chunk may be narrower). Each chunk sweeps
/// `z` across the full height, and the next chunk sweeps back the other way starting from the `z`
/// where the previous one ended, so consecutive cells are always close together. Within a chunk
/// the cells are ordered by [`SweepOrder`], and a [`GridStep::Yield`] follows every run of the
/// inner loop.
///
/// For a 4x3 grid with chunks of 2, `SweepOrder::Banded` visits
///
/// ```text
/// (0,0) (1,0) (0,1) (1,1) (0,2) (1,2) | (2,2) (3,2) (2,1) (3,1) (2,0) (3,0)
/// ```
///
/// and `SweepOrder::ColumnMajor` visits
///
/// ```text
/// (0,0) (0,1) (0,2) (1,0) (1,1) (1,2) | (2,2) (2,1) (2,0) (3,2) (3,1) (3,0)
/// ```
#[derive(Clone, Debug)]
pub struct SerpentineCells {
    width: usize,
    height: usize,
    chunk: usize,
    sweep: SweepOrder,
    // First column of the current chunk.
    chunk_x: usize,
    forward: bool,
    outer: usize,
    inner: usize,
    pending_yield: bool,
}

impl SerpentineCells {
    /// # Panics
    ///
    /// If `chunk` is 0.
    pub fn new(width: usize, height: usize, chunk: usize, sweep: SweepOrder) -> Self {
        assert!(chunk >= 1, "chunk size must be at least 1");

        Self {
            width,
            height,
            chunk,
            sweep,
            chunk_x: 0,
            forward: true,
            outer: 0,
            inner: 0,
            pending_yield: false,
        }
    }

    /// Only the cells, without yields.
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        self.filter_map(|step| match step {
            GridStep::Cell(x, z) => Some((x, z)),
            GridStep::Yield => None,
        })
    }
}

impl Iterator for SerpentineCells {
    type Item = GridStep;

    fn next(&mut self) -> Option<GridStep> {
        if self.pending_yield {
            self.pending_yield = false;
            return Some(GridStep::Yield);
        }
        if self.chunk_x >= self.width || self.height == 0 {
            return None;
        }

        let chunk_width = self.chunk.min(self.width - self.chunk_x);
        let (outer_len, inner_len) = match self.sweep {
            SweepOrder::Banded => (self.height, chunk_width),
            SweepOrder::ColumnMajor => (chunk_width, self.height),
        };
        let (dx, z_step) = match self.sweep {
            SweepOrder::Banded => (self.inner, self.outer),
            SweepOrder::ColumnMajor => (self.outer, self.inner),
        };
        let z = if self.forward {
            z_step
        } else {
            self.height - 1 - z_step
        };
        let cell = GridStep::Cell(self.chunk_x + dx, z);

        self.inner += 1;
        if self.inner == inner_len {
            self.inner = 0;
            self.pending_yield = true;
            self.outer += 1;
            if self.outer == outer_len {
                self.outer = 0;
                self.chunk_x += self.chunk;
                self.forward = !self.forward;
            }
        }

        Some(cell)
    }
}

/// Where a grid build lands and how it is walked.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GridLayout {
    pub width: usize,
    pub height: usize,
    pub base: Point3i,
    pub plane: GridPlane,
    pub chunk: usize,
    pub sweep: SweepOrder,
}

impl GridLayout {
    pub fn num_cells(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn position(&self, x: usize, z: usize) -> Point3i {
        self.plane.position(self.base, self.height, x, z)
    }
}

/// Runs `job` over every cell of `layout` in serpentine order, placing the material
/// `cell_material` picks for each cell or clearing the cell if it is transparent.
///
/// Cancellation is checked before each voxel. A voxel already handed to the actuator always
/// completes. On normal completion every cell has been processed exactly once.
pub fn run_grid_build<'m>(
    job: &BuildJob,
    layout: &GridLayout,
    mut cell_material: impl FnMut(usize, usize) -> Material<'m>,
    actuator: &mut impl Actuator,
) -> BuildReport {
    let mut report = BuildReport {
        total: layout.num_cells(),
        ..Default::default()
    };

    for step in SerpentineCells::new(layout.width, layout.height, layout.chunk, layout.sweep) {
        match step {
            GridStep::Yield => {
                tracing::trace!(placed = report.placed, total = report.total, "chunk row done");
                actuator.wait_one_tick();
            }
            GridStep::Cell(x, z) => {
                if job.should_stop() {
                    report.cancelled = true;
                    break;
                }
                let position = layout.position(x, z);
                if apply(&mut *actuator, position, cell_material(x, z)) {
                    report.rejected += 1;
                }
                job.record_voxel();
                report.placed += 1;
            }
        }
    }

    if !report.cancelled {
        assert_eq!(report.placed, report.total);
    }

    report
}

/// Places or clears one voxel. Returns `true` if the actuator rejected it.
pub(crate) fn apply(
    actuator: &mut impl Actuator,
    position: Point3i,
    material: Material<'_>,
) -> bool {
    let outcome = match material {
        Material::Block(m) => actuator.place(position, m),
        Material::Transparent => actuator.clear(position),
    };
    match outcome {
        Outcome::Applied => false,
        Outcome::Rejected(reason) => {
            tracing::debug!(?position, %reason, "voxel rejected");
            true
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
