use insomniac_exec::{Event, Status, Subscription};
use tokio::task::JoinHandle;

/// Prints a progress line to stderr as requests finish.
pub struct Progress {
    total: usize,
    completed: usize,
    failed: usize,
    skipped: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            failed: 0,
            skipped: 0,
        }
    }

    /// Follow `events` until the run's bus closes.
    pub fn spawn(mut self, mut events: Subscription) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    Event::RequestFinish(record) => {
                        match record.status {
                            Status::Code(_) => self.completed += 1,
                            Status::Error => self.failed += 1,
                            Status::NotRun => self.skipped += 1,
                        }
                        self.update_progress();
                    }
                    Event::Error(_) => break,
                    Event::Start => {}
                }
            }
            let done = self.done();
            if done > 0 && done < self.total {
                eprintln!();
            }
        })
    }

    fn done(&self) -> usize {
        self.completed + self.failed + self.skipped
    }

    fn update_progress(&self) {
        let done = self.done();
        let percent = if self.total > 0 {
            (done * 100) / self.total
        } else {
            0
        };
        eprint!(
            "\rProgress: [{}/{}] {}% (✓{} ✗{} ↷{})",
            done, self.total, percent, self.completed, self.failed, self.skipped
        );
        if done == self.total {
            eprintln!();
        }
    }
}
