//! Seeded random workload generation.
//!
//! Arrivals follow a Bernoulli process: on every tick of the horizon each of
//! `arrival_slots` independent trials succeeds with `arrival_probability`.
//! Each arrival draws a short burst with `short_job_probability`, otherwise a
//! long one, which gives the mixed interactive/batch load where the policies
//! differ most.
//!
//! Generation is a pure function of the generator's fields: the same seed
//! always produces the same process list.

use std::ops::RangeInclusive;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{Process, Tick};

/// Random process-list generator.
///
/// # Example
/// ```
/// use u_cpusched::workload::WorkloadGenerator;
///
/// let generator = WorkloadGenerator::new(7)
///     .with_horizon(10)
///     .with_arrival_probability(0.5);
/// let processes = generator.generate();
/// assert_eq!(processes, generator.generate());
/// assert!(processes.iter().all(|p| p.arrival < 10 && p.burst >= 1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadGenerator {
    pub seed: u64,
    /// Arrivals are drawn for ticks `0..horizon`.
    pub horizon: Tick,
    /// Success probability of one arrival trial.
    pub arrival_probability: f64,
    /// Independent arrival trials per tick.
    pub arrival_slots: usize,
    /// Probability that an arrival is a short job.
    pub short_job_probability: f64,
    /// Inclusive burst bounds for short jobs.
    pub short_burst: (Tick, Tick),
    /// Inclusive burst bounds for long jobs.
    pub long_burst: (Tick, Tick),
}

impl WorkloadGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            horizon: 20,
            arrival_probability: 0.3,
            arrival_slots: 2,
            short_job_probability: 0.7,
            short_burst: (1, 4),
            long_burst: (6, 12),
        }
    }

    pub fn with_horizon(mut self, horizon: Tick) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the per-trial arrival probability (clamped to `0.0..=1.0`).
    pub fn with_arrival_probability(mut self, p: f64) -> Self {
        self.arrival_probability = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_arrival_slots(mut self, slots: usize) -> Self {
        self.arrival_slots = slots;
        self
    }

    /// Sets the short-job probability (clamped to `0.0..=1.0`).
    pub fn with_short_job_probability(mut self, p: f64) -> Self {
        self.short_job_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets short and long burst bounds. Bounds are raised to at least 1 and
    /// swapped if reversed.
    pub fn with_bursts(mut self, short: (Tick, Tick), long: (Tick, Tick)) -> Self {
        self.short_burst = normalize(short);
        self.long_burst = normalize(long);
        self
    }

    /// Generates processes named `P0`, `P1`, ... in arrival order.
    pub fn generate(&self) -> Vec<Process> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let short = bounds(self.short_burst);
        let long = bounds(self.long_burst);
        let mut processes = Vec::new();

        for tick in 0..self.horizon {
            for _ in 0..self.arrival_slots {
                if rng.random::<f64>() >= self.arrival_probability {
                    continue;
                }
                let burst = if rng.random::<f64>() < self.short_job_probability {
                    rng.random_range(short.clone())
                } else {
                    rng.random_range(long.clone())
                };
                let name = format!("P{}", processes.len());
                processes.push(Process::new(name, tick, burst));
            }
        }

        processes
    }
}

fn normalize((lo, hi): (Tick, Tick)) -> (Tick, Tick) {
    let lo = lo.max(1);
    let hi = hi.max(1);
    if lo <= hi {
        (lo, hi)
    } else {
        (hi, lo)
    }
}

// Public fields may bypass `with_bursts`; never hand an empty range to the rng.
fn bounds(pair: (Tick, Tick)) -> RangeInclusive<Tick> {
    let (lo, hi) = normalize(pair);
    lo..=hi
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventKind;
    use crate::simulation::{simulate, SimulationConfig, SimulationOutcome};

    const SEEDS: std::ops::Range<u64> = 0..40;

    fn workload(seed: u64) -> Vec<Process> {
        WorkloadGenerator::new(seed)
            .with_horizon(25)
            .with_arrival_probability(0.35)
            .generate()
    }

    fn configs() -> Vec<SimulationConfig> {
        vec![
            SimulationConfig::fcfs(60),
            SimulationConfig::srtf(60),
            SimulationConfig::round_robin(60, 1),
            SimulationConfig::round_robin(60, 3),
            // Short runs leave processes pending.
            SimulationConfig::fcfs(15),
            SimulationConfig::srtf(15),
            SimulationConfig::round_robin(15, 2),
        ]
    }

    fn for_each_run(mut check: impl FnMut(&SimulationConfig, &SimulationOutcome)) {
        for seed in SEEDS {
            for config in configs() {
                let outcome = simulate(workload(seed), &config).unwrap();
                check(&config, &outcome);
            }
        }
    }

    /// Remaining service of every process at the start of each tick,
    /// replayed from the timeline.
    fn remaining_by_tick(outcome: &SimulationOutcome) -> Vec<Vec<Tick>> {
        let mut remaining: Vec<Tick> = outcome.processes.iter().map(|p| p.burst).collect();
        let mut snapshots = Vec::with_capacity(outcome.timeline.len());
        for slot in &outcome.timeline {
            snapshots.push(remaining.clone());
            if let Some(id) = slot {
                remaining[id.0] -= 1;
            }
        }
        snapshots
    }

    fn runnable(outcome: &SimulationOutcome, remaining: &[Tick], tick: Tick) -> Vec<usize> {
        outcome
            .processes
            .iter()
            .enumerate()
            .filter(|(i, p)| p.arrival <= tick && remaining[*i] > 0)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_generator_deterministic_per_seed() {
        assert_eq!(workload(3), workload(3));
        assert_ne!(workload(3), workload(4));
    }

    #[test]
    fn test_generator_respects_bounds() {
        let generator = WorkloadGenerator::new(11)
            .with_horizon(50)
            .with_arrival_probability(0.8)
            .with_bursts((2, 3), (9, 7));
        assert_eq!(generator.long_burst, (7, 9));
        let processes = generator.generate();
        assert!(!processes.is_empty());
        for (i, p) in processes.iter().enumerate() {
            assert_eq!(p.name, format!("P{i}"));
            assert!(p.arrival < 50);
            assert!((2..=3).contains(&p.burst) || (7..=9).contains(&p.burst));
        }
        assert!(processes.windows(2).all(|w| w[0].arrival <= w[1].arrival));
    }

    #[test]
    fn test_generator_edge_probabilities() {
        let none = WorkloadGenerator::new(1).with_arrival_probability(-1.0);
        assert!(none.generate().is_empty());

        let every = WorkloadGenerator::new(1)
            .with_horizon(5)
            .with_arrival_slots(3)
            .with_arrival_probability(2.0)
            .with_short_job_probability(1.0)
            .with_bursts((0, 0), (5, 5));
        let processes = every.generate();
        assert_eq!(processes.len(), 15);
        assert!(processes.iter().all(|p| p.burst == 1));
    }

    #[test]
    fn test_service_matches_burst() {
        for_each_run(|_, outcome| {
            for (i, p) in outcome.processes.iter().enumerate() {
                let served = outcome
                    .timeline
                    .iter()
                    .filter(|slot| slot.map(|id| id.0) == Some(i))
                    .count() as Tick;
                assert_eq!(served, p.burst - p.remaining, "{}", p.name);
                if p.is_complete() {
                    assert_eq!(served, p.burst, "{}", p.name);
                }
            }
        });
    }

    #[test]
    fn test_one_dispatch_per_tick() {
        for_each_run(|config, outcome| {
            assert_eq!(outcome.timeline.len() as Tick, config.run_time);
            for tick in 0..config.run_time {
                let selected = outcome
                    .events
                    .at_tick(tick)
                    .filter(|e| e.kind == EventKind::Selected)
                    .count();
                assert!(selected <= 1, "tick {tick}");
            }
        });
    }

    #[test]
    fn test_idle_exactly_when_nothing_runnable() {
        for_each_run(|_, outcome| {
            let snapshots = remaining_by_tick(outcome);
            for (tick, remaining) in snapshots.iter().enumerate() {
                let tick = tick as Tick;
                let candidates = runnable(outcome, remaining, tick);
                let idle_logged = outcome
                    .events
                    .at_tick(tick)
                    .any(|e| e.kind == EventKind::Idle);
                assert_eq!(candidates.is_empty(), idle_logged, "tick {tick}");
                assert_eq!(candidates.is_empty(), outcome.running_at(tick).is_none());
            }
        });
    }

    #[test]
    fn test_completed_turnaround_is_wait_plus_burst() {
        for_each_run(|_, outcome| {
            for p in outcome.processes.iter().filter(|p| p.is_complete()) {
                let turnaround = p.turnaround.unwrap();
                assert_eq!(turnaround, p.completion_time.unwrap() - p.arrival);
                assert_eq!(turnaround, p.wait_time + p.burst, "{}", p.name);
                assert!(p.response_time.unwrap() <= p.wait_time);
            }
        });
    }

    #[test]
    fn test_fcfs_properties() {
        for seed in SEEDS {
            let outcome = simulate(workload(seed), &SimulationConfig::fcfs(60)).unwrap();
            for p in &outcome.processes {
                if let Some(response) = p.response_time {
                    assert_eq!(response, p.wait_time, "{}", p.name);
                }
            }
            // Generated names follow arrival order; completion follows it too.
            let completions: Vec<_> = outcome
                .processes
                .iter()
                .filter_map(|p| p.completion_time)
                .collect();
            assert!(completions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_srtf_runs_minimum_remaining() {
        for seed in SEEDS {
            let outcome = simulate(workload(seed), &SimulationConfig::srtf(60)).unwrap();
            let snapshots = remaining_by_tick(&outcome);
            for (tick, remaining) in snapshots.iter().enumerate() {
                let Some(chosen) = outcome.timeline[tick] else {
                    continue;
                };
                let candidates = runnable(&outcome, remaining, tick as Tick);
                let min = candidates.iter().map(|&i| remaining[i]).min().unwrap();
                assert_eq!(remaining[chosen.0], min, "seed {seed} tick {tick}");
            }
        }
    }

    #[test]
    fn test_rr_slice_never_exceeds_quantum() {
        for quantum in [1, 2, 3, 5] {
            for seed in SEEDS {
                let config = SimulationConfig::round_robin(60, quantum);
                let outcome = simulate(workload(seed), &config).unwrap();
                let mut slice_len = 0;
                for (tick, slot) in outcome.timeline.iter().enumerate() {
                    let dispatched = outcome
                        .events
                        .at_tick(tick as Tick)
                        .any(|e| e.kind == EventKind::Selected);
                    if dispatched {
                        slice_len = 0;
                    }
                    if slot.is_some() {
                        slice_len += 1;
                        assert!(slice_len <= quantum, "seed {seed} tick {tick}");
                    }
                }
                for p in outcome.processes.iter().filter(|p| p.is_complete()) {
                    assert_eq!(p.wait_time, p.turnaround.unwrap() - p.burst);
                }
            }
        }
    }

    #[test]
    fn test_identical_inputs_identical_outputs() {
        for config in configs() {
            let first = simulate(workload(9), &config).unwrap();
            let second = simulate(workload(9), &config).unwrap();
            assert_eq!(first.events, second.events);
            assert_eq!(first.metrics(), second.metrics());
        }
    }
}
