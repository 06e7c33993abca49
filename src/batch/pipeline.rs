use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::config::PipelineConfig;
use crate::error::{Result, SkeleratorError};
use crate::scene::{Scene, SceneGenerator, Watershed};
use super::stack::Batch;

/// Shape of the batches a worker produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRequest {
    pub batch_size: usize,
    pub n_objects: usize,
    pub points_per_skeleton: usize,
}

/// Anything that can produce independent scenes on a worker thread
pub trait SceneSource: Send + Sync + 'static {
    fn generate(&self, request: &BatchRequest, rng: &mut StdRng) -> Result<Scene>;
}

impl<W: Watershed + Send + Sync + 'static> SceneSource for SceneGenerator<W> {
    fn generate(&self, request: &BatchRequest, rng: &mut StdRng) -> Result<Scene> {
        self.generate_with(request.n_objects, request.points_per_skeleton, rng)
    }
}

/// What `shutdown` cleaned up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    pub workers_joined: usize,
    /// Batches finished or abandoned after the stop flag was raised
    pub discarded_in_flight: usize,
    /// Published batches nobody requested
    pub dropped_queued: usize,
}

struct Shared {
    stop: AtomicBool,
    discarded: AtomicUsize,
}

/// Holds one worker slot; releases it when the worker exits, even on panic
struct SlotGuard {
    slots: Receiver<()>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        let _ = self.slots.try_recv();
    }
}

struct Worker {
    id: u64,
    handle: Option<thread::JoinHandle<()>>,
}

impl Worker {
    fn join(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                if handle.join().is_err() {
                    warn!("batch worker {} panicked", self.id);
                }
                true
            }
            None => false,
        }
    }

    fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }
}

/// Body of a worker thread: generate `batch_size` scenes and publish once
fn run_worker<S: SceneSource>(
    id: u64,
    source: &S,
    request: BatchRequest,
    seed: u64,
    shared: &Shared,
    results: &Sender<Result<Batch>>,
    poll: Duration,
) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scenes = Vec::with_capacity(request.batch_size);

    for _ in 0..request.batch_size {
        if shared.stop.load(Ordering::SeqCst) {
            debug!("worker {} stopped mid-batch", id);
            shared.discarded.fetch_add(1, Ordering::SeqCst);
            return;
        }
        match source.generate(&request, &mut rng) {
            Ok(scene) => scenes.push(scene),
            Err(e) => {
                warn!("worker {} failed: {}", id, e);
                publish(id, Err(e), shared, results, poll);
                return;
            }
        }
    }

    publish(id, Batch::stack(&scenes), shared, results, poll);
}

/// Send unless stopped. A full queue is retried every `poll` so a stop
/// request is never missed.
fn publish(id: u64, mut item: Result<Batch>, shared: &Shared, results: &Sender<Result<Batch>>, poll: Duration) {
    loop {
        if shared.stop.load(Ordering::SeqCst) {
            debug!("worker {} discarding finished batch", id);
            shared.discarded.fetch_add(1, Ordering::SeqCst);
            return;
        }
        match results.send_timeout(item, poll) {
            Ok(()) => return,
            Err(SendTimeoutError::Timeout(back)) => item = back,
            Err(SendTimeoutError::Disconnected(_)) => return,
        }
    }
}

/// Bounded producer/consumer pool of scene-generating worker threads.
///
/// Finished batches wait in a queue of `queue_capacity`; at most
/// `worker_slots` workers run at once. Batches arrive in no particular
/// order.
///
/// Workers seed their generators from the process id, the wall clock and a
/// per-pipeline spawn counter. This decorrelates workers spawned in quick
/// succession but is no guarantee of independent streams. A fixed
/// `PipelineConfig::seed` makes worker `n` use `seed + n` instead.
pub struct BatchPipeline<S: SceneSource> {
    source: Arc<S>,
    config: PipelineConfig,
    shared: Arc<Shared>,
    results_tx: Sender<Result<Batch>>,
    results_rx: Receiver<Result<Batch>>,
    slots_tx: Sender<()>,
    slots_rx: Receiver<()>,
    workers: Vec<Worker>,
    spawned: u64,
    shut_down: bool,
}

impl<S: SceneSource> BatchPipeline<S> {
    pub fn new(source: S, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let (results_tx, results_rx) = bounded(config.queue_capacity);
        let (slots_tx, slots_rx) = bounded(config.worker_slots);
        Ok(Self {
            source: Arc::new(source),
            config,
            shared: Arc::new(Shared {
                stop: AtomicBool::new(false),
                discarded: AtomicUsize::new(0),
            }),
            results_tx,
            results_rx,
            slots_tx,
            slots_rx,
            workers: Vec::new(),
            spawned: 0,
            shut_down: false,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Batches waiting in the queue
    pub fn queued(&self) -> usize {
        self.results_rx.len()
    }

    /// Workers that have not been joined yet
    pub fn running(&self) -> usize {
        self.workers.iter().filter(|w| !w.is_finished()).count()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    fn next_seed(&mut self) -> u64 {
        let n = self.spawned;
        self.spawned += 1;
        match self.config.seed {
            Some(base) => base.wrapping_add(n),
            None => {
                let nanos = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(0);
                (std::process::id() as u64).rotate_left(32) ^ nanos ^ n.wrapping_mul(0x9E37_79B9_7F4A_7C15)
            }
        }
    }

    /// Join workers that have already exited
    fn reap(&mut self) {
        let (done, running): (Vec<Worker>, Vec<Worker>) =
            self.workers.drain(..).partition(|w| w.is_finished());
        self.workers = running;
        for mut worker in done {
            worker.join();
        }
    }

    /// Start workers while the queue has room and a slot is free.
    ///
    /// Returns how many were spawned. Never blocks.
    pub fn prefetch(&mut self, request: BatchRequest) -> Result<usize> {
        if self.shut_down {
            return Err(SkeleratorError::ShutDown);
        }
        if request.batch_size == 0 {
            return Err(SkeleratorError::InvalidInput("batch_size must be at least 1".into()));
        }
        self.reap();

        let mut count = 0;
        while !self.results_tx.is_full() && self.slots_tx.try_send(()).is_ok() {
            let id = self.spawned;
            let seed = self.next_seed();
            let slot = SlotGuard { slots: self.slots_rx.clone() };
            let source = Arc::clone(&self.source);
            let shared = Arc::clone(&self.shared);
            let results = self.results_tx.clone();
            let poll = self.config.poll_interval();

            let handle = thread::spawn(move || {
                let _slot = slot;
                run_worker(id, source.as_ref(), request, seed, &shared, &results, poll);
            });
            self.workers.push(Worker { id, handle: Some(handle) });
            count += 1;
        }

        if count > 0 {
            info!("spawned {} batch workers ({} queued)", count, self.queued());
        }
        Ok(count)
    }

    /// Top up the workers, then block until a batch is available.
    ///
    /// A worker error is returned as is; the failed batch is not retried.
    pub fn request_batch(&mut self, request: BatchRequest) -> Result<Batch> {
        self.prefetch(request)?;
        let poll = self.config.poll_interval();

        loop {
            match self.results_rx.recv_timeout(poll) {
                Ok(item) => return item,
                Err(RecvTimeoutError::Timeout) => {
                    self.reap();
                    if self.workers.is_empty() {
                        return match self.results_rx.try_recv() {
                            Ok(item) => item,
                            Err(_) => Err(SkeleratorError::WorkersExhausted),
                        };
                    }
                }
                Err(RecvTimeoutError::Disconnected) => return Err(SkeleratorError::WorkersExhausted),
            }
        }
    }

    /// Raise the stop flag, join every worker and drop queued batches.
    ///
    /// Work in progress is discarded rather than published. A worker
    /// finishes the scene it is generating before it sees the flag. Later
    /// requests fail with [`SkeleratorError::ShutDown`].
    pub fn shutdown(&mut self) -> ShutdownReport {
        if self.shut_down {
            return ShutdownReport::default();
        }
        self.shared.stop.store(true, Ordering::SeqCst);

        let workers_joined = self.workers.iter_mut().map(Worker::join).filter(|&joined| joined).count();
        self.workers.clear();

        let mut dropped_queued = 0;
        while self.results_rx.try_recv().is_ok() {
            dropped_queued += 1;
        }
        self.shut_down = true;

        let report = ShutdownReport {
            workers_joined,
            discarded_in_flight: self.shared.discarded.load(Ordering::SeqCst),
            dropped_queued,
        };
        info!(
            "batch pipeline shut down: {} workers joined, {} in-flight discarded, {} queued dropped",
            report.workers_joined, report.discarded_in_flight, report.dropped_queued
        );
        report
    }
}

impl<S: SceneSource> Drop for BatchPipeline<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
