//! Shared fixtures for backend integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use waste_ops_backend::services::pickup::{CreatePickupInput, PickupService};
use waste_ops_backend::services::{MaterialService, SalesService};
use waste_ops_backend::{AppState, Clock, Config, Store};

/// Clock that only moves when told to; every read advances it by `step`
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl ManualClock {
    pub fn with_step(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            now: Mutex::new(start),
            step,
        }
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut now = self.now.lock().unwrap();
        let current = *now;
        *now = current + self.step;
        current
    }
}

/// Isolated data directory plus a clock pinned to 2024-01-10 08:00 UTC that
/// advances one second per read
pub struct Fixture {
    pub dir: TempDir,
    pub store: Arc<Store>,
    pub clock: Arc<ManualClock>,
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap()
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = Arc::new(Store::open(dir.path()));
        let clock = Arc::new(ManualClock::with_step(start(), Duration::seconds(1)));
        Self { dir, store, clock }
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn pickups(&self) -> PickupService {
        PickupService::new(self.store.clone(), self.clock())
    }

    pub fn materials(&self) -> MaterialService {
        MaterialService::new(self.store.clone(), self.clock(), Arc::new(self.pickups()))
    }

    pub fn sales(&self) -> SalesService {
        SalesService::new(self.store.clone(), self.clock())
    }

    pub fn state(&self) -> AppState {
        let mut config = Config::default();
        config.storage.data_dir = self.dir.path().to_path_buf();
        AppState {
            store: self.store.clone(),
            config: Arc::new(config),
            clock: self.clock(),
        }
    }
}

pub fn pickup_input(company: &str, date: &str) -> CreatePickupInput {
    CreatePickupInput {
        company_name: Some(company.to_string()),
        pickup_date: Some(date.to_string()),
        ..Default::default()
    }
}
