//! Concurrent Window Store
//!
//! ## Overview
//!
//! Maps each sensor identifier to its [`Window`]. The store is an explicit
//! object: the service builds one at startup, hands it to the evaluator and
//! keeps it for the life of the process. Windows are created lazily on the
//! first value for a sensor and are never removed.
//!
//! ## Locking
//!
//! ```text
//! DashMap<String, Arc<Mutex<Window>>>
//!    │            │
//!    │            └── per-sensor lock: serializes read-compute-append
//!    └── sharded map lock: held only to find or insert the handle
//! ```
//!
//! Evaluations on different sensors only meet on a shard lock for the
//! duration of a lookup. Two evaluations on the same sensor queue on that
//! sensor's mutex, so each one sees every append that happened before it.
//! No map shard lock is held while a window lock is being acquired.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::window::Window;

/// Shared handle to one sensor's window
pub type WindowHandle = Arc<Mutex<Window>>;

/// Contents of every window keyed by sensor id, oldest value first
pub type WindowSnapshot = BTreeMap<String, Vec<f64>>;

/// Sensor id → bounded history
#[derive(Debug)]
pub struct WindowStore {
    windows: DashMap<String, WindowHandle>,
    capacity: usize,
}

impl WindowStore {
    /// Creates an empty store whose windows hold `capacity` values each
    pub fn new(capacity: usize) -> Self {
        Self {
            windows: DashMap::new(),
            capacity,
        }
    }

    /// Capacity given to every window
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the sensor's window, creating an empty one on first use
    pub fn get_or_create(&self, sensor_id: &str) -> WindowHandle {
        if let Some(window) = self.windows.get(sensor_id) {
            return Arc::clone(window.value());
        }

        let window = self
            .windows
            .entry(sensor_id.to_owned())
            .or_insert_with(|| {
                log::debug!("creating window for sensor {}", sensor_id);
                Arc::new(Mutex::new(Window::with_capacity(self.capacity)))
            });
        Arc::clone(window.value())
    }

    /// Appends a value, evicting the oldest one if the window is full
    pub fn push(&self, sensor_id: &str, value: f64) {
        self.with_window(sensor_id, |window| {
            window.push(value);
        });
    }

    /// Runs `f` with the sensor's window locked
    ///
    /// This is the unit of per-sensor atomicity: nothing else can read or
    /// write the window until `f` returns.
    pub fn with_window<R>(&self, sensor_id: &str, f: impl FnOnce(&mut Window) -> R) -> R {
        let handle = self.get_or_create(sensor_id);
        let mut window = handle.lock();
        f(&mut window)
    }

    /// Copies out every window without mutating anything
    ///
    /// Each window is read under its own lock, so every sequence is
    /// consistent on its own. Sequences of different sensors may reflect
    /// slightly different moments.
    pub fn snapshot_all(&self) -> WindowSnapshot {
        let handles: Vec<(String, WindowHandle)> = self
            .windows
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();

        handles
            .into_iter()
            .map(|(sensor_id, handle)| {
                let values = handle.lock().to_vec();
                (sensor_id, values)
            })
            .collect()
    }

    /// Number of sensors seen so far
    pub fn sensor_count(&self) -> usize {
        self.windows.len()
    }

    /// Current length of a sensor's window, `None` for an unknown sensor
    ///
    /// Does not create a window.
    pub fn window_len(&self, sensor_id: &str) -> Option<usize> {
        let handle = self.windows.get(sensor_id).map(|w| Arc::clone(w.value()))?;
        let len = handle.lock().len();
        Some(len)
    }
}
