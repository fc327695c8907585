// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Background polling service for the telemetry collector.

use crate::collector::TelemetryCollector;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use ortho_core::telemetry::SensorReading;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Preset polling rates for the two display layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollingMode {
    /// The compact status bar.
    #[default]
    Compact,
    /// The full monitoring page.
    Full,
}

impl PollingMode {
    /// Interval between the starts of two refresh passes.
    pub fn interval(self) -> Duration {
        match self {
            PollingMode::Compact => Duration::from_millis(500),
            PollingMode::Full => Duration::from_millis(1500),
        }
    }
}

/// Configuration for the [`TelemetryPoller`].
#[derive(Debug, Clone)]
pub struct PollingConfig {
    /// Interval between refresh passes.
    pub interval: Duration,
    /// Maximum number of snapshots to buffer.
    /// If the buffer is full, new snapshots are dropped.
    pub event_buffer_size: usize,
}

impl PollingConfig {
    /// Configuration using the preset interval of `mode`.
    pub fn for_mode(mode: PollingMode) -> Self {
        Self {
            interval: mode.interval(),
            ..Self::default()
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: PollingMode::default().interval(),
            event_buffer_size: 16,
        }
    }
}

/// The result of one refresh pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    /// Zero-based pass counter.
    pub pass: u64,
    /// Readings in collected-handle order.
    pub readings: Vec<SensorReading>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Refreshes the collector on a fixed schedule from a background thread.
///
/// Passes never overlap: the next one starts only after the previous one has
/// finished and the remainder of the interval has elapsed. Each pass is
/// published as the latest readings and sent on the snapshot channel.
pub struct TelemetryPoller {
    config: PollingConfig,
    collector: Arc<Mutex<TelemetryCollector>>,
    latest: Arc<Mutex<Vec<SensorReading>>>,
    passes: Arc<AtomicU64>,
    running: Arc<AtomicBool>,
    shutdown: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
    event_tx: Sender<TelemetrySnapshot>,
}

impl TelemetryPoller {
    /// Creates a stopped poller and the receiving end of its snapshot channel.
    pub fn new(
        collector: TelemetryCollector,
        config: PollingConfig,
    ) -> (Self, Receiver<TelemetrySnapshot>) {
        let (tx, rx) = crossbeam_channel::bounded(config.event_buffer_size);
        let poller = Self {
            config,
            collector: Arc::new(Mutex::new(collector)),
            latest: Arc::new(Mutex::new(Vec::new())),
            passes: Arc::new(AtomicU64::new(0)),
            running: Arc::new(AtomicBool::new(false)),
            shutdown: None,
            handle: None,
            event_tx: tx,
        };
        (poller, rx)
    }

    /// Starts the polling thread, collecting handles first if needed.
    pub fn start(&mut self) {
        if self.running.load(Ordering::SeqCst) {
            return;
        }

        {
            let mut collector = lock(&self.collector);
            if !collector.is_collected() {
                collector.collect();
            }
        }

        self.running.store(true, Ordering::SeqCst);
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(1);
        self.shutdown = Some(shutdown_tx);

        let running = Arc::clone(&self.running);
        let collector = Arc::clone(&self.collector);
        let latest = Arc::clone(&self.latest);
        let passes = Arc::clone(&self.passes);
        let event_tx = self.event_tx.clone();
        let interval = self.config.interval;

        let handle = thread::spawn(move || {
            log::info!("Telemetry poller started ({} ms interval).", interval.as_millis());

            while running.load(Ordering::Relaxed) {
                let start_time = Instant::now();

                let readings = lock(&collector).refresh_all();
                *lock(&latest) = readings.clone();
                let pass = passes.fetch_add(1, Ordering::SeqCst);
                if event_tx
                    .try_send(TelemetrySnapshot { pass, readings })
                    .is_err()
                {
                    log::trace!("Telemetry snapshot {pass} dropped");
                }

                let remaining = interval.saturating_sub(start_time.elapsed());
                match shutdown_rx.recv_timeout(remaining) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            log::info!("Telemetry poller stopped.");
        });

        self.handle = Some(handle);
    }

    /// Stops the polling thread and waits for the current pass to finish.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.shutdown.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Telemetry poller thread panicked");
            }
        }
    }

    /// Whether the polling thread is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Number of completed refresh passes.
    pub fn pass_count(&self) -> u64 {
        self.passes.load(Ordering::SeqCst)
    }

    /// Readings from the most recent pass.
    pub fn latest(&self) -> Vec<SensorReading> {
        lock(&self.latest).clone()
    }

    /// The shared collector, for readers that need the handles themselves.
    pub fn collector(&self) -> Arc<Mutex<TelemetryCollector>> {
        Arc::clone(&self.collector)
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.config.interval
    }
}

impl Drop for TelemetryPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ortho_core::telemetry::{HardwareKind, HardwareNode, HardwareTree, SensorKind, SensorNode};

    #[derive(Debug)]
    struct CountingTree {
        nodes: Vec<HardwareNode>,
        updates: u32,
    }

    impl HardwareTree for CountingTree {
        fn hardware(&self) -> &[HardwareNode] {
            &self.nodes
        }

        fn update(&mut self, _index: usize) {
            self.updates += 1;
            let value = self.updates as f32;
            self.nodes[0].sensors[0].value = Some(value);
        }
    }

    fn collector() -> TelemetryCollector {
        let tree = CountingTree {
            nodes: vec![HardwareNode::new("Cpu", HardwareKind::Cpu).with_sensor(
                SensorNode::new("CPU Total", SensorKind::Load, Some(0.0)),
            )],
            updates: 0,
        };
        TelemetryCollector::new(Box::new(tree), None)
    }

    #[test]
    fn test_presets() {
        assert_eq!(PollingMode::Compact.interval(), Duration::from_millis(500));
        assert_eq!(PollingMode::Full.interval(), Duration::from_millis(1500));
        assert_eq!(
            PollingConfig::for_mode(PollingMode::Full).interval,
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_poller_publishes_passes_in_order() {
        let config = PollingConfig {
            interval: Duration::from_millis(10),
            event_buffer_size: 8,
        };
        let (mut poller, rx) = TelemetryPoller::new(collector(), config);
        poller.start();
        assert!(poller.is_running());

        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        poller.stop();

        assert_eq!(first.pass, 0);
        assert_eq!(second.pass, 1);
        assert_eq!(first.readings.len(), 1);
        assert_eq!(first.readings[0].value, "1.00");
        assert_eq!(second.readings[0].value, "2.00");
        assert!(!poller.is_running());
        assert!(poller.pass_count() >= 2);
        assert_eq!(poller.latest().len(), 1);
    }

    #[test]
    fn test_stop_interrupts_long_interval() {
        let config = PollingConfig {
            interval: Duration::from_secs(60),
            event_buffer_size: 1,
        };
        let (mut poller, rx) = TelemetryPoller::new(collector(), config);
        poller.start();
        rx.recv_timeout(Duration::from_secs(5)).unwrap();

        let started = Instant::now();
        poller.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(poller.pass_count(), 1);
    }
}
