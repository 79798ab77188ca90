use auto_impl::auto_impl;
use mosaic_core::Point3i;

/// The best-effort result of one voxel operation. Rejections are counted and logged, never retried.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Applied,
    Rejected(String),
}

/// The thing that actually changes the world, e.g. a bot connected to a game server.
///
/// Every method may block for as long as it needs (moving into range, waiting on the network).
/// Builds never reorder or batch calls, and a stalled actuator stalls the build.
#[auto_impl(&mut, Box)]
pub trait Actuator {
    fn place(&mut self, position: Point3i, material: &str) -> Outcome;

    fn clear(&mut self, position: Point3i) -> Outcome;

    /// Blocks for one rate-limiting tick.
    fn wait_one_tick(&mut self);
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum VoxelOp {
    Place(Point3i, String),
    Clear(Point3i),
    Tick,
}

impl VoxelOp {
    pub fn position(&self) -> Option<Point3i> {
        match self {
            VoxelOp::Place(p, _) | VoxelOp::Clear(p) => Some(*p),
            VoxelOp::Tick => None,
        }
    }
}

/// An actuator that applies nothing and remembers every call. Useful for dry runs and previews.
#[derive(Clone, Debug, Default)]
pub struct RecordingActuator {
    pub ops: Vec<VoxelOp>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the voxel operations, without ticks.
    pub fn voxel_ops(&self) -> impl Iterator<Item = &VoxelOp> {
        self.ops.iter().filter(|op| !matches!(op, VoxelOp::Tick))
    }

    pub fn ticks(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, VoxelOp::Tick)).count()
    }
}

impl Actuator for RecordingActuator {
    fn place(&mut self, position: Point3i, material: &str) -> Outcome {
        self.ops.push(VoxelOp::Place(position, material.to_owned()));
        Outcome::Applied
    }

    fn clear(&mut self, position: Point3i) -> Outcome {
        self.ops.push(VoxelOp::Clear(position));
        Outcome::Applied
    }

    fn wait_one_tick(&mut self) {
        self.ops.push(VoxelOp::Tick);
    }
}
