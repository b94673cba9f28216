//! Background pipe-mesh generation and its status machine.
//!
//! Mesh generation is the only operation that runs off the main thread.
//! A [`GenerationTask`] sweeps a snapshot of the curve's segments on a
//! worker thread and hands the finished buffer back over an `mpsc`
//! channel; the curve polls it once per frame. Results carry the curve's
//! generation epoch at spawn time, so a result produced from knots that
//! have since been edited is detected by epoch mismatch and discarded.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use knot_spline::CubicBezier;
use pipe_sweep::{sweep_path, PipeConfig, PipeError, PipeMesh};

/// Lifecycle of a curve's mesh buffer.
///
/// ```text
/// Dirty -> GeneratingVertices -> WaitingForUpload -> Ready
///   ^                                                  |
///   +------------------- any edit ---------------------+
/// ```
///
/// Any invalidating edit returns the curve to [`Dirty`](Self::Dirty),
/// regardless of the current state. The renderer must not read the
/// buffer while [`GeneratingVertices`](Self::GeneratingVertices); it
/// keeps drawing the previous buffer until the one-time
/// [`WaitingForUpload`](Self::WaitingForUpload) handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    /// Knots changed since the last generation; a fresh sweep is needed.
    #[default]
    Dirty,
    /// A worker thread is sweeping the mesh.
    GeneratingVertices,
    /// A fresh buffer is complete and waiting for the renderer to take it.
    WaitingForUpload,
    /// The renderer holds the current buffer; nothing to do.
    Ready,
}

/// Outcome of polling an in-flight generation task.
#[derive(Debug)]
pub(crate) enum TaskPoll {
    /// The worker has not finished yet.
    Pending,
    /// The worker finished; the mesh was swept from the tagged epoch.
    Finished { epoch: u64, mesh: PipeMesh },
    /// The sweep itself failed (invalid configuration).
    Failed(PipeError),
    /// The worker disappeared without sending a result.
    Lost,
}

/// One in-flight mesh generation for a single curve.
///
/// At most one task exists per curve at a time; the curve does not spawn
/// another until the current one has been drained.
#[derive(Debug)]
pub(crate) struct GenerationTask {
    epoch: u64,
    receiver: Receiver<Result<PipeMesh, PipeError>>,
}

impl GenerationTask {
    /// Spawn a worker sweeping `segments` with `config`.
    ///
    /// The segment list is a snapshot: later edits to the curve do not
    /// affect the running sweep, they only make its result stale.
    pub(crate) fn spawn(epoch: u64, segments: Vec<CubicBezier>, config: PipeConfig) -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            // Send failure means the curve dropped the receiver.
            drop(sender.send(sweep_path(&segments, &config)));
        });
        Self { epoch, receiver }
    }

    /// Non-blocking check for a finished result.
    pub(crate) fn poll(&self) -> TaskPoll {
        match self.receiver.try_recv() {
            Ok(Ok(mesh)) => TaskPoll::Finished {
                epoch: self.epoch,
                mesh,
            },
            Ok(Err(err)) => TaskPoll::Failed(err),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => TaskPoll::Lost,
        }
    }

    /// Epoch the task was spawned from.
    pub(crate) const fn epoch(&self) -> u64 {
        self.epoch
    }
}
