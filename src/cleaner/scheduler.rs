//! Fork/join execution over a dedicated work-stealing pool.
//!
//! A `CleanupTask` produces one boolean, possibly after forking child tasks
//! with [`fork_join`] and waiting for all of them. Parents never finish
//! before their children.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;

/// Unit of work run on the pool
pub trait CleanupTask: Send {
    /// Run the task to completion. True means fully reclaimed.
    fn compute(self) -> bool;
}

/// Worker pool settings
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Worker threads; 0 means one per logical CPU
    pub threads: usize,
    /// Stack size per worker. Nested directories recurse on this stack.
    pub stack_size: Option<usize>,
    /// Prefix for worker thread names
    pub thread_name_prefix: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            stack_size: Some(DEFAULT_STACK_SIZE),
            thread_name_prefix: "bakprune".to_string(),
        }
    }
}

/// 16 MiB keeps very deep trees from overflowing worker stacks
pub const DEFAULT_STACK_SIZE: usize = 16 * 1024 * 1024;

impl SchedulerConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = Some(stack_size);
        self
    }

    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Thread count with 0 resolved to the number of CPUs
    pub fn effective_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get().max(1)
        } else {
            self.threads
        }
    }
}

/// Owns the worker pool that runs cleanup tasks
pub struct Scheduler {
    pool: ThreadPool,
}

impl Scheduler {
    pub fn new(config: &SchedulerConfig) -> Result<Self> {
        let prefix = config.thread_name_prefix.clone();
        let mut builder = ThreadPoolBuilder::new()
            .num_threads(config.effective_threads())
            .thread_name(move |i| format!("{}-{}", prefix, i));
        if let Some(stack_size) = config.stack_size {
            builder = builder.stack_size(stack_size);
        }

        Ok(Self {
            pool: builder.build()?,
        })
    }

    /// Pool with default settings
    pub fn with_defaults() -> Result<Self> {
        Self::new(&SchedulerConfig::default())
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `task` inside the pool and block until it and all of its
    /// descendants complete
    pub fn invoke<T: CleanupTask>(&self, task: T) -> bool {
        self.pool.install(move || task.compute())
    }
}

/// Run every task in parallel on the current pool and AND the results.
///
/// All tasks run even after one has returned false. An empty batch is
/// vacuously true.
pub fn fork_join<T: CleanupTask>(tasks: Vec<T>) -> bool {
    tasks
        .into_par_iter()
        .map(T::compute)
        .reduce(|| true, |a, b| a && b)
}

/// Fork two batches of possibly different task types at once and return
/// each batch's AND separately
pub fn fork_join_pair<A, B>(first: Vec<A>, second: Vec<B>) -> (bool, bool)
where
    A: CleanupTask,
    B: CleanupTask,
{
    rayon::join(move || fork_join(first), move || fork_join(second))
}
