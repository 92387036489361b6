use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::debug;

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Worker {
    thread: thread::JoinHandle<()>,
}

impl Worker {
    fn new(id: usize, receiver: Arc<Mutex<Receiver<Job>>>) -> Worker {
        let thread = thread::spawn(move || loop {
            let message = match receiver.lock() {
                Ok(guard) => guard.recv(),
                // A sibling worker panicked while holding the lock; there is
                // no queue left to drain safely.
                Err(_) => break,
            };

            match message {
                Ok(job) => job(),
                Err(_) => {
                    debug!(worker = id, "job channel closed, worker exiting");
                    break;
                }
            }
        });

        Worker { thread }
    }
}

/// Fixed-size pool of worker threads fed over an mpsc channel.
///
/// Dropping the pool closes the channel and joins every worker, so queued
/// jobs finish before shutdown completes.
pub struct ThreadPool {
    workers: Vec<Worker>,
    sender: Option<Sender<Job>>,
}

impl ThreadPool {
    pub fn new(size: usize) -> Self {
        assert!(size > 0);

        let (sender, receiver) = mpsc::channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(size);
        for id in 0..size {
            workers.push(Worker::new(id, Arc::clone(&receiver)));
        }

        ThreadPool {
            workers,
            sender: Some(sender),
        }
    }

    pub fn execute<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let job = Box::new(f) as Job;
        // The receiver outlives every send while workers are running.
        if let Some(sender) = self.sender.as_ref() {
            let _ = sender.send(job);
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        drop(self.sender.take());

        for worker in self.workers.drain(..) {
            let _ = worker.thread.join();
        }
    }
}
