//! Load sampling via sysinfo

use std::time::Duration;

use sysinfo::System;

/// One CPU/RAM observation, both in percent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoadSample {
    pub cpu: f64,
    pub ram: f64,
}

pub struct LoadSampler {
    system: System,
    interval: Duration,
}

impl LoadSampler {
    pub fn new(interval: Duration) -> Self {
        let mut system = System::new();
        system.refresh_cpu();
        system.refresh_memory();
        Self { system, interval }
    }

    /// Measure CPU over `interval`, then read memory
    pub async fn sample(&mut self) -> LoadSample {
        self.system.refresh_cpu();
        tokio::time::sleep(self.interval.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)).await;
        self.system.refresh_cpu();
        self.system.refresh_memory();

        let cpu = self.system.global_cpu_info().cpu_usage() as f64;
        let total = self.system.total_memory();
        let ram = if total > 0 {
            self.system.used_memory() as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        LoadSample {
            cpu: clamp_percent(cpu),
            ram: clamp_percent(ram),
        }
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, 100.0) } else { 0.0 }
}
