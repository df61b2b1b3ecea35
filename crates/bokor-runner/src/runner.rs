use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use crate::consumer::Consumer;
use crate::executor::Executor;
use crate::stats::RunStatistics;

/// Multiplied by the worker count to size the input queue, so the feeding
/// side stays ahead of idle workers without running unboundedly far ahead.
const QUEUE_DEPTH_PER_WORKER: usize = 3;

/// Runs a producer/executor/consumer pipeline on a fixed-size worker pool.
#[derive(Debug, Clone, Copy)]
pub struct Runner {
    workers: usize,
}

/// One executed task on its way back to the consumer.
struct TaskResult<I, O> {
    input: I,
    output: O,
    started: Instant,
    finished: Instant,
}

impl Runner {
    /// Create a runner with the given worker count, clamped to at least one.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run the pipeline to completion.
    ///
    /// Every item the producer yields is executed on the worker pool and
    /// handed to the consumer exactly once before this returns. The consumer
    /// runs on the calling thread, interleaved with production, so results
    /// are consumed while the pool is still working. A panicking executor or
    /// consumer propagates to the caller.
    pub fn run<P, E, C>(&self, producer: P, executor: &E, consumer: &mut C) -> RunStatistics
    where
        P: IntoIterator,
        P::Item: Send,
        E: Executor<P::Item> + Sync,
        E::Output: Send,
        C: Consumer<P::Item, E::Output>,
    {
        let (req_tx, req_rx) = mpsc::sync_channel(self.workers * QUEUE_DEPTH_PER_WORKER);
        let (res_tx, res_rx) = mpsc::channel();
        let req_rx = Mutex::new(req_rx);

        tracing::debug!(workers = self.workers, "starting pipeline run");

        let stats = thread::scope(|s| {
            for _ in 0..self.workers {
                let res_tx = res_tx.clone();
                let req_rx = &req_rx;
                s.spawn(move || {
                    loop {
                        // The receiver is shared; whichever idle worker takes
                        // the lock first gets the next item. Disconnection of
                        // the sending side ends the loop.
                        let received = match req_rx.lock() {
                            Ok(rx) => rx.recv(),
                            Err(_) => break,
                        };
                        let Ok(input) = received else { break };

                        let started = Instant::now();
                        let output = executor.execute(&input);
                        let finished = Instant::now();

                        if res_tx
                            .send(TaskResult {
                                input,
                                output,
                                started,
                                finished,
                            })
                            .is_err()
                        {
                            break;
                        }
                    }
                });
            }
            // Workers hold the only remaining result senders; once they all
            // exit, the result channel disconnects and draining below ends.
            drop(res_tx);

            let mut acc = StatsAccum::new();
            for item in producer {
                while let Ok(task) = res_rx.try_recv() {
                    acc.absorb(task, consumer);
                }
                if req_tx.send(item).is_err() {
                    break;
                }
            }
            drop(req_tx);

            for task in res_rx {
                acc.absorb(task, consumer);
            }
            acc.finish()
        });

        tracing::debug!(
            completed = stats.completed,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "pipeline run finished"
        );
        stats
    }
}

/// Accumulates the execution window while results pass to the consumer.
struct StatsAccum {
    completed: u64,
    first_start: Option<Instant>,
    last_end: Option<Instant>,
}

impl StatsAccum {
    fn new() -> Self {
        Self {
            completed: 0,
            first_start: None,
            last_end: None,
        }
    }

    fn absorb<I, O, C>(&mut self, task: TaskResult<I, O>, consumer: &mut C)
    where
        C: Consumer<I, O>,
    {
        let elapsed = task.finished.duration_since(task.started);
        self.first_start = Some(
            self.first_start
                .map_or(task.started, |start| start.min(task.started)),
        );
        self.last_end = Some(
            self.last_end
                .map_or(task.finished, |end| end.max(task.finished)),
        );
        consumer.consume(task.input, task.output, elapsed);
        self.completed += 1;
    }

    fn finish(self) -> RunStatistics {
        let elapsed = match (self.first_start, self.last_end) {
            (Some(start), Some(end)) => end.duration_since(start),
            _ => Duration::ZERO,
        };
        RunStatistics {
            completed: self.completed,
            elapsed,
        }
    }
}
