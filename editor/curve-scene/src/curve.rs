//! The mutable curve: knots, pipe parameters, and the mesh lifecycle.

use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

use knot_spline::{Ray, SplinePath};
use pipe_sweep::{sweep_path, PipeConfig, PipeMesh};

use crate::error::{SceneError, SceneResult};
use crate::generation::{GenerationStatus, GenerationTask, TaskPoll};

/// An editable curve: an ordered knot sequence plus pipe parameters.
///
/// The curve owns its derived data as caches: the interpolated
/// [`SplinePath`] is rebuilt on every knot edit, and the pipe mesh is
/// regenerated through the background status machine (see
/// [`GenerationStatus`]). Every mutating operation marks the curve dirty
/// and bumps its generation epoch so in-flight mesh results built from
/// older knots are discarded rather than committed.
///
/// A curve with fewer than 2 knots is valid: it has no segments and an
/// empty mesh, never an error.
///
/// # Example
///
/// ```
/// use curve_scene::Curve;
/// use nalgebra::Point3;
///
/// let mut curve = Curve::new();
/// curve.add_knot(Point3::new(0.0, 0.0, 0.0));
/// curve.add_knot(Point3::new(1.0, 0.0, 0.0));
/// curve.add_knot(Point3::new(2.0, 1.0, 0.0));
///
/// assert_eq!(curve.path().num_segments(), 2);
/// assert!(curve.is_dirty());
/// ```
#[derive(Debug, Default)]
pub struct Curve {
    knots: Vec<Point3<f64>>,
    config: PipeConfig,
    path: SplinePath,
    mesh: PipeMesh,
    pending: Option<PipeMesh>,
    status: GenerationStatus,
    epoch: u64,
    task: Option<GenerationTask>,
}

impl Curve {
    /// An empty curve with the default pipe parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A curve seeded with the given knots.
    #[must_use]
    pub fn from_knots(knots: Vec<Point3<f64>>) -> Self {
        let mut curve = Self {
            knots,
            ..Self::default()
        };
        curve.rebuild_path();
        curve
    }

    // --- Knot editing ---

    /// Append a knot at the end of the sequence.
    pub fn add_knot(&mut self, position: Point3<f64>) {
        self.knots.push(position);
        self.mark_dirty();
    }

    /// Insert a knot before `index` (`index == len` appends).
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds error when `index > len`.
    pub fn insert_knot(&mut self, index: usize, position: Point3<f64>) -> SceneResult<()> {
        if index > self.knots.len() {
            return Err(SceneError::knot_index_out_of_bounds(index, self.knots.len()));
        }
        self.knots.insert(index, position);
        self.mark_dirty();
        Ok(())
    }

    /// Remove and return the knot at `index`.
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds error when `index >= len`.
    pub fn remove_knot(&mut self, index: usize) -> SceneResult<Point3<f64>> {
        if index >= self.knots.len() {
            return Err(SceneError::knot_index_out_of_bounds(index, self.knots.len()));
        }
        let removed = self.knots.remove(index);
        self.mark_dirty();
        Ok(removed)
    }

    /// Remove every knot, leaving an empty curve.
    pub fn remove_all_knots(&mut self) {
        self.knots.clear();
        self.mark_dirty();
    }

    /// Move the knot at `index` to a new position.
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds error when `index >= len`.
    pub fn set_knot(&mut self, index: usize, position: Point3<f64>) -> SceneResult<()> {
        match self.knots.get_mut(index) {
            Some(knot) => {
                *knot = position;
                self.mark_dirty();
                Ok(())
            }
            None => Err(SceneError::knot_index_out_of_bounds(index, self.knots.len())),
        }
    }

    /// Translate every knot by `delta`.
    pub fn translate(&mut self, delta: Vector3<f64>) {
        for knot in &mut self.knots {
            *knot += delta;
        }
        self.mark_dirty();
    }

    /// Knot position at `index`.
    #[must_use]
    pub fn knot(&self, index: usize) -> Option<&Point3<f64>> {
        self.knots.get(index)
    }

    /// The ordered knot sequence.
    #[must_use]
    pub fn knots(&self) -> &[Point3<f64>] {
        &self.knots
    }

    /// Number of knots.
    #[must_use]
    pub fn knot_count(&self) -> usize {
        self.knots.len()
    }

    // --- Pipe parameters ---

    /// Set the pipe cross-section radius.
    ///
    /// # Errors
    ///
    /// Rejects non-positive or non-finite radii.
    pub fn set_radius(&mut self, radius: f64) -> SceneResult<()> {
        let config = self.config.with_radius(radius);
        config.validate()?;
        self.config = config;
        self.mark_dirty();
        Ok(())
    }

    /// Set the number of cross-section sectors.
    ///
    /// # Errors
    ///
    /// Rejects fewer than 3 sectors.
    pub fn set_sector_count(&mut self, sectors: usize) -> SceneResult<()> {
        let config = self.config.with_sectors(sectors);
        config.validate()?;
        self.config = config;
        self.mark_dirty();
        Ok(())
    }

    /// Set the number of longitudinal ticks per segment.
    ///
    /// # Errors
    ///
    /// Rejects a tick count of zero.
    pub fn set_tick_count(&mut self, ticks: usize) -> SceneResult<()> {
        let config = self.config.with_ticks(ticks);
        config.validate()?;
        self.config = config;
        self.mark_dirty();
        Ok(())
    }

    /// Pipe cross-section radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.config.radius
    }

    /// Cross-section sector count.
    #[must_use]
    pub const fn sector_count(&self) -> usize {
        self.config.sectors
    }

    /// Longitudinal ticks per segment.
    #[must_use]
    pub const fn tick_count(&self) -> usize {
        self.config.ticks
    }

    // --- Derived geometry ---

    /// The interpolated path through the current knots.
    ///
    /// Empty (no segments) while the curve has fewer than 2 knots.
    #[must_use]
    pub fn path(&self) -> &SplinePath {
        &self.path
    }

    /// Total chord length of the path.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.path.total_length()
    }

    // --- Picking ---

    /// Smallest sampled perpendicular distance from the ray to the curve.
    ///
    /// `+∞` when the curve has no segments or nothing projects forward of
    /// the ray origin.
    #[must_use]
    pub fn closest_distance_to_ray(&self, ray: &Ray) -> f64 {
        self.path.distance_to_ray(ray)
    }

    /// Index of the knot nearest the ray, within `max_distance`.
    ///
    /// Knots projecting behind the ray origin are skipped. Ties break to
    /// the first-encountered minimum in knot insertion order.
    #[must_use]
    pub fn closest_knot_to_ray(&self, ray: &Ray, max_distance: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, knot) in self.knots.iter().enumerate() {
            let Some(distance) = ray.perpendicular_distance(*knot) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }
            // Strict comparison keeps the earliest knot on exact ties.
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    // --- Mesh lifecycle ---

    /// Current generation status.
    #[must_use]
    pub const fn status(&self) -> GenerationStatus {
        self.status
    }

    /// Whether an edit has invalidated the mesh.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.status == GenerationStatus::Dirty
    }

    /// Current generation epoch. Bumped on every invalidating edit.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The last mesh handed over via [`Self::take_mesh_for_upload`].
    ///
    /// This is what the renderer keeps drawing while a newer mesh is
    /// being generated.
    #[must_use]
    pub const fn mesh(&self) -> &PipeMesh {
        &self.mesh
    }

    /// Drive the mesh lifecycle one step. Call once per frame.
    ///
    /// Polls the in-flight generation task if there is one, discarding
    /// stale results (epoch mismatch) and rescheduling from the latest
    /// knot state; spawns a new task when the curve is dirty and no task
    /// is in flight.
    pub fn update(&mut self) {
        if let Some(task) = &self.task {
            match task.poll() {
                TaskPoll::Pending => return,
                TaskPoll::Finished { epoch, mesh } => {
                    self.task = None;
                    if epoch == self.epoch {
                        self.pending = Some(mesh);
                        self.status = GenerationStatus::WaitingForUpload;
                        return;
                    }
                    debug!(
                        stale = epoch,
                        current = self.epoch,
                        "discarding stale mesh result"
                    );
                    self.status = GenerationStatus::Dirty;
                }
                TaskPoll::Failed(err) => {
                    self.task = None;
                    warn!(error = %err, "mesh generation failed");
                    self.status = GenerationStatus::Dirty;
                    // Parameters are validated at the setters, so a failed
                    // sweep will fail again; do not respawn this frame.
                    return;
                }
                TaskPoll::Lost => {
                    self.task = None;
                    warn!("mesh generation worker disappeared");
                    self.status = GenerationStatus::Dirty;
                }
            }
        }

        if self.status == GenerationStatus::Dirty {
            self.schedule();
        }
    }

    /// One-time `WaitingForUpload -> Ready` handoff.
    ///
    /// Swaps the freshly generated buffer in as the current mesh and
    /// returns it for upload. Returns `None` in every other state, so the
    /// renderer uploads each generation exactly once.
    pub fn take_mesh_for_upload(&mut self) -> Option<&PipeMesh> {
        if self.status != GenerationStatus::WaitingForUpload {
            return None;
        }
        let pending = self.pending.take()?;
        self.mesh = pending;
        self.status = GenerationStatus::Ready;
        Some(&self.mesh)
    }

    /// Regenerate the mesh synchronously on the calling thread.
    ///
    /// Skips the background task; the result still goes through the
    /// `WaitingForUpload` handoff. Useful for batch export and tests.
    ///
    /// # Errors
    ///
    /// Returns a pipe configuration error from the sweep.
    pub fn regenerate_blocking(&mut self) -> SceneResult<()> {
        let mesh = sweep_path(self.path.segments(), &self.config)?;
        self.task = None;
        self.pending = Some(mesh);
        self.status = GenerationStatus::WaitingForUpload;
        Ok(())
    }

    // --- Internals ---

    fn mark_dirty(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.status = GenerationStatus::Dirty;
        self.pending = None;
        self.rebuild_path();
    }

    fn rebuild_path(&mut self) {
        // Fewer than 2 knots is a valid empty path, not an error.
        self.path = SplinePath::through_knots(&self.knots).unwrap_or_default();
    }

    fn schedule(&mut self) {
        if self.path.is_empty() {
            // Nothing to sweep: hand the renderer an empty buffer so a
            // cleared curve actually disappears.
            self.pending = Some(PipeMesh::new());
            self.status = GenerationStatus::WaitingForUpload;
            return;
        }
        debug!(
            epoch = self.epoch,
            segments = self.path.num_segments(),
            "scheduling mesh generation"
        );
        self.task = Some(GenerationTask::spawn(
            self.epoch,
            self.path.segments().to_vec(),
            self.config,
        ));
        self.status = GenerationStatus::GeneratingVertices;
    }
}
