//! Lock-free job queue.
//!
//! Jobs are pushed before any worker starts and never change afterwards.
//! Workers claim them by atomically decrementing a shared counter, so every
//! job index is handed out exactly once, in decreasing order.

use std::sync::atomic::{AtomicIsize, Ordering};

use crate::error::{RenderError, RenderResult};

/// Fixed-capacity stack of jobs shared by all workers.
pub struct JobQueue<J> {
    jobs: Vec<J>,
    capacity: usize,
    /// Number of jobs not yet claimed; goes negative once drained
    next: AtomicIsize,
}

impl<J> JobQueue<J> {
    /// Create an empty queue that holds at most `capacity` jobs.
    pub fn new(capacity: usize) -> Self {
        Self {
            jobs: Vec::with_capacity(capacity),
            capacity,
            next: AtomicIsize::new(0),
        }
    }

    /// Add a job. Only possible while the queue is exclusively owned.
    pub fn push(&mut self, job: J) -> RenderResult<()> {
        if self.jobs.len() >= self.capacity {
            return Err(RenderError::QueueCapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.jobs.push(job);
        *self.next.get_mut() = self.jobs.len() as isize;
        Ok(())
    }

    /// Claim the next job, or `None` once every job has been handed out.
    pub fn claim(&self) -> Option<(usize, &J)> {
        let previous = self.next.fetch_sub(1, Ordering::AcqRel);
        if previous <= 0 {
            return None;
        }
        let index = (previous - 1) as usize;
        Some((index, &self.jobs[index]))
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Jobs not yet claimed.
    pub fn remaining(&self) -> usize {
        self.next.load(Ordering::Acquire).max(0) as usize
    }
}
