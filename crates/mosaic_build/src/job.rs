use parking_lot::Mutex;
use std::sync::{
    atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering},
    Arc,
};

/// `Idle -> Running -> {Done | Cancelling -> Done}`. `Done` only leaves for `Running` when a new
/// job starts.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum JobState {
    Idle = 0,
    Running = 1,
    Cancelling = 2,
    Done = 3,
}

impl JobState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => JobState::Running,
            2 => JobState::Cancelling,
            3 => JobState::Done,
            _ => JobState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, JobState::Running | JobState::Cancelling)
    }
}

/// Which frame of an animation a job is on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FrameInfo {
    pub index: usize,
    pub count: usize,
}

/// A point-in-time copy of the job fields. Fields are read one by one, so a snapshot taken
/// mid-update can mix old and new values.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JobSnapshot {
    pub state: JobState,
    pub placed_count: usize,
    pub total_count: usize,
    pub cancel_requested: bool,
    pub label: String,
    pub frame_info: Option<FrameInfo>,
}

// No frame.
const NO_FRAME: usize = usize::MAX;

#[derive(Debug)]
struct JobStatus {
    state: AtomicU8,
    placed_count: AtomicUsize,
    total_count: AtomicUsize,
    cancel_requested: AtomicBool,
    frame_index: AtomicUsize,
    frame_count: AtomicUsize,
    label: Mutex<String>,
}

impl Default for JobStatus {
    fn default() -> Self {
        Self {
            state: AtomicU8::new(JobState::Idle as u8),
            placed_count: AtomicUsize::new(0),
            total_count: AtomicUsize::new(0),
            cancel_requested: AtomicBool::new(false),
            frame_index: AtomicUsize::new(NO_FRAME),
            frame_count: AtomicUsize::new(0),
            label: Mutex::new(String::new()),
        }
    }
}

/// A cheap, thread-safe view of a session's build job, for status reporters and cancellers.
#[derive(Clone, Debug, Default)]
pub struct JobHandle {
    status: Arc<JobStatus>,
}

impl JobHandle {
    pub fn state(&self) -> JobState {
        JobState::from_u8(self.status.state.load(Ordering::Acquire))
    }

    pub fn placed_count(&self) -> usize {
        self.status.placed_count.load(Ordering::Relaxed)
    }

    pub fn total_count(&self) -> usize {
        self.status.total_count.load(Ordering::Relaxed)
    }

    /// Asks a running job to stop. The voxel in flight completes, then the job unwinds. Returns
    /// `false` if there is no active job to cancel.
    pub fn cancel(&self) -> bool {
        if !self.state().is_active() {
            return false;
        }
        self.status.cancel_requested.store(true, Ordering::Release);

        true
    }

    pub fn snapshot(&self) -> JobSnapshot {
        let s = &self.status;
        let frame_index = s.frame_index.load(Ordering::Relaxed);

        JobSnapshot {
            state: self.state(),
            placed_count: self.placed_count(),
            total_count: self.total_count(),
            cancel_requested: s.cancel_requested.load(Ordering::Acquire),
            label: s.label.lock().clone(),
            frame_info: (frame_index != NO_FRAME).then(|| FrameInfo {
                index: frame_index,
                count: s.frame_count.load(Ordering::Relaxed),
            }),
        }
    }
}

/// The scheduler's side of the job. Only one thread drives it; everyone else holds a
/// [`JobHandle`].
#[derive(Debug)]
pub struct BuildJob {
    handle: JobHandle,
}

impl BuildJob {
    /// Starts a job on `handle`, resetting every field. Callers make sure the previous job on the
    /// handle is no longer active.
    #[cfg_attr(not(any(feature = "image", feature = "mesh")), allow(dead_code))]
    pub(crate) fn start(handle: &JobHandle, label: &str, total_count: usize) -> Self {
        let s = &handle.status;
        debug_assert!(!handle.state().is_active());
        *s.label.lock() = label.to_owned();
        s.cancel_requested.store(false, Ordering::Release);
        s.placed_count.store(0, Ordering::Relaxed);
        s.total_count.store(total_count, Ordering::Relaxed);
        s.frame_index.store(NO_FRAME, Ordering::Relaxed);
        s.frame_count.store(0, Ordering::Relaxed);
        s.state.store(JobState::Running as u8, Ordering::Release);

        Self {
            handle: handle.clone(),
        }
    }

    pub fn handle(&self) -> &JobHandle {
        &self.handle
    }

    /// Moves on to another frame of an animation. Progress restarts at zero.
    #[cfg_attr(not(feature = "image"), allow(dead_code))]
    pub(crate) fn begin_frame(&self, frame: FrameInfo, total_count: usize) {
        let s = &self.handle.status;
        s.placed_count.store(0, Ordering::Relaxed);
        s.total_count.store(total_count, Ordering::Relaxed);
        s.frame_count.store(frame.count, Ordering::Relaxed);
        s.frame_index.store(frame.index, Ordering::Relaxed);
    }

    /// Checked before every voxel. Observing a cancel request moves the job to `Cancelling`.
    pub(crate) fn should_stop(&self) -> bool {
        let s = &self.handle.status;
        if s.cancel_requested.load(Ordering::Acquire) {
            s.state.store(JobState::Cancelling as u8, Ordering::Release);
            return true;
        }

        self.handle.state() == JobState::Cancelling
    }

    pub(crate) fn record_voxel(&self) {
        let placed = self.handle.status.placed_count.fetch_add(1, Ordering::Relaxed) + 1;
        debug_assert!(placed <= self.handle.total_count());
    }

    #[cfg_attr(not(any(feature = "image", feature = "mesh")), allow(dead_code))]
    pub(crate) fn is_cancelling(&self) -> bool {
        self.handle.state() == JobState::Cancelling
    }

    /// Moves the job to `Done` and reports whether it got there by cancellation.
    #[cfg_attr(not(any(feature = "image", feature = "mesh")), allow(dead_code))]
    pub(crate) fn finish(self) -> bool {
        let cancelled = self.is_cancelling();
        self.handle
            .status
            .state
            .store(JobState::Done as u8, Ordering::Release);

        cancelled
    }
}

/// How a build ended. Cancellation is a normal ending, not an error.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct BuildReport {
    pub cancelled: bool,
    /// Voxels processed, placements and clears alike.
    pub placed: usize,
    pub total: usize,
    /// Voxel operations the actuator reported as rejected.
    pub rejected: usize,
}

impl BuildReport {
    #[cfg_attr(not(feature = "image"), allow(dead_code))]
    pub(crate) fn merge(&mut self, other: BuildReport) {
        self.cancelled |= other.cancelled;
        self.placed += other.placed;
        self.total += other.total;
        self.rejected += other.rejected;
    }
}
