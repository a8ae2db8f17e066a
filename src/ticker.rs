//! A cancellable repeating task.
//!
//! [`Ticker`] runs a task on a background thread once per delay until it is
//! stopped. It knows nothing about grids: the caller decides what a tick does,
//! usually locking a [`SharedGrid`] and stepping it.

use std::{
    sync::{
        Arc, Mutex, MutexGuard,
        mpsc::{self, RecvTimeoutError, Sender},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::Grid;

/// A grid shared between the ticker thread and whoever handles input
///
/// The lock is held for a whole generation, so readers never see a partial
/// update and input is never applied mid-step.
#[derive(Debug, Clone)]
pub struct SharedGrid(Arc<Mutex<Grid>>);

impl SharedGrid {
    pub fn new(grid: Grid) -> Self {
        Self(Arc::new(Mutex::new(grid)))
    }

    /// Locks the grid
    ///
    /// A panic while holding the lock cannot leave a half-written generation
    /// behind (the swap happens last), so a poisoned lock is recovered.
    pub fn lock(&self) -> MutexGuard<'_, Grid> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct Running {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

pub struct Ticker<F> {
    task: Arc<F>,
    delay: Duration,
    running: Option<Running>,
}

impl<F> Ticker<F>
where
    F: Fn() + Send + Sync + 'static,
{
    pub fn new(delay: Duration, task: F) -> Self {
        Self {
            task: Arc::new(task),
            delay,
            running: None,
        }
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Starts ticking; returns `false` if the ticker was already running
    pub fn start(&mut self) -> bool {
        if self.running.is_some() {
            return false;
        }

        let (stop, stopped) = mpsc::channel::<()>();
        let task = Arc::clone(&self.task);
        let delay = self.delay;
        let handle = thread::spawn(move || {
            loop {
                match stopped.recv_timeout(delay) {
                    Err(RecvTimeoutError::Timeout) => (*task)(),
                    // stop requested or the ticker was dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        self.running = Some(Running { stop, handle });
        tracing::debug!(delay_ms = delay.as_millis() as u64, "ticker started");
        true
    }

    /// Stops ticking and waits for an in-flight tick to finish
    ///
    /// Returns `false` if the ticker was not running.
    pub fn stop(&mut self) -> bool {
        let Some(Running { stop, handle }) = self.running.take() else {
            return false;
        };
        // the thread may already be gone if the task panicked
        let _ = stop.send(());
        if handle.join().is_err() {
            tracing::error!("ticker task panicked");
        }
        tracing::debug!("ticker stopped");
        true
    }

    /// Flips between running and stopped, returning whether it is now running
    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.stop();
            false
        } else {
            self.start()
        }
    }

    /// Changes the delay, restarting the ticker if it is running
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
        if self.stop() {
            self.start();
        }
    }
}

impl<F> Drop for Ticker<F> {
    fn drop(&mut self) {
        if let Some(Running { stop, handle }) = self.running.take() {
            let _ = stop.send(());
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_ticker(
        delay_ms: u64,
    ) -> (Ticker<impl Fn() + Send + Sync + 'static>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let ticker = Ticker::new(Duration::from_millis(delay_ms), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (ticker, count)
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let (mut ticker, _) = counting_ticker(5);

        assert!(!ticker.stop());
        assert!(ticker.start());
        assert!(!ticker.start());
        assert!(ticker.is_running());
        assert!(ticker.stop());
        assert!(!ticker.stop());
        assert!(!ticker.is_running());
    }

    #[test]
    fn ticks_until_stopped() {
        let (mut ticker, count) = counting_ticker(2);

        ticker.start();
        thread::sleep(Duration::from_millis(100));
        ticker.stop();

        let ticked = count.load(Ordering::SeqCst);
        assert!(ticked > 0);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), ticked);
    }

    #[test]
    fn double_start_does_not_double_schedule() {
        let (mut ticker, count) = counting_ticker(40);

        ticker.start();
        ticker.start();
        thread::sleep(Duration::from_millis(100));
        ticker.stop();

        // one schedule at 40ms gives at most two ticks in 100ms
        assert!(count.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn toggle_flips_state() {
        let (mut ticker, _) = counting_ticker(5);

        assert!(ticker.toggle());
        assert!(!ticker.toggle());
        assert!(!ticker.is_running());
    }

    #[test]
    fn set_delay_keeps_running_state() {
        let (mut ticker, _) = counting_ticker(5);

        ticker.set_delay(Duration::from_millis(7));
        assert!(!ticker.is_running());

        ticker.start();
        ticker.set_delay(Duration::from_millis(9));
        assert!(ticker.is_running());
        assert_eq!(ticker.delay(), Duration::from_millis(9));
    }

    #[test]
    fn steps_shared_grid() {
        let grid = SharedGrid::new(Grid::new(5, 5));
        grid.lock().toggle(2, 1).unwrap();
        grid.lock().toggle(2, 2).unwrap();
        grid.lock().toggle(2, 3).unwrap();

        let task_grid = grid.clone();
        let mut ticker = Ticker::new(Duration::from_millis(2), move || task_grid.lock().step());
        ticker.start();
        thread::sleep(Duration::from_millis(60));
        ticker.stop();

        let grid = grid.lock();
        assert!(grid.tick_count() > 0);
        // a blinker keeps three cells through any number of generations
        assert_eq!(grid.alive_count(), 3);
    }
}
