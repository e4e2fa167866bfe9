//! Process (job) model.
//!
//! A process is one simulated job: immutable input (name, arrival, burst)
//! plus the fields the simulation derives while it runs.
//!
//! # Time Representation
//! All times are integer ticks relative to the start of the run (t=0).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Simulation time in ticks.
pub type Tick = u64;

/// Stable handle of a process inside a [`ProcessTable`].
///
/// Equal to the position of the process in the caller's input list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProcessId(pub usize);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a process reached completion within the simulated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    /// Remaining time reached zero and completion was observed.
    Completed,
    /// Still had work left (or never arrived) when the run ended.
    Pending,
}

/// A simulated process.
///
/// `name`, `arrival` and `burst` are fixed at creation. Everything else is
/// written by the active policy during a run. Unset times are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process name.
    pub name: String,
    /// Tick at which the process becomes eligible to run.
    pub arrival: Tick,
    /// Total service time required.
    pub burst: Tick,
    /// Service time not yet consumed (`0..=burst`).
    pub remaining: Tick,
    /// First tick the process actually ran.
    pub start_time: Option<Tick>,
    /// Tick at which completion was observed.
    pub completion_time: Option<Tick>,
    /// Ticks spent arrived but not running.
    pub wait_time: Tick,
    /// `start_time - arrival`, set on first dispatch.
    pub response_time: Option<Tick>,
    /// `completion_time - arrival`, set once at completion.
    pub turnaround: Option<Tick>,
}

impl Process {
    /// Creates a fresh process with `remaining == burst`.
    pub fn new(name: impl Into<String>, arrival: Tick, burst: Tick) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            remaining: burst,
            start_time: None,
            completion_time: None,
            wait_time: 0,
            response_time: None,
            turnaround: None,
        }
    }

    /// Whether the process has arrived by tick `now`.
    #[inline]
    pub fn has_arrived(&self, now: Tick) -> bool {
        self.arrival <= now
    }

    /// Whether the process may be chosen to run at tick `now`.
    #[inline]
    pub fn is_runnable(&self, now: Tick) -> bool {
        self.has_arrived(now) && self.remaining > 0 && self.completion_time.is_none()
    }

    /// Whether completion has been recorded.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Whether all service has been consumed (completion may not be recorded yet).
    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.remaining == 0
    }

    pub fn status(&self) -> ProcessStatus {
        if self.is_complete() {
            ProcessStatus::Completed
        } else {
            ProcessStatus::Pending
        }
    }

    /// Ticks of service consumed so far.
    pub fn served(&self) -> Tick {
        self.burst - self.remaining
    }

    /// Records the first dispatch. Later calls leave start/response untouched.
    pub fn mark_dispatched(&mut self, now: Tick) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
            self.response_time = Some(now.saturating_sub(self.arrival));
        }
    }

    /// Consumes one tick of service.
    pub fn run_tick(&mut self) {
        debug_assert!(self.remaining > 0, "process {} ran with no work left", self.name);
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Records completion at tick `now` and returns the turnaround.
    pub fn mark_completed(&mut self, now: Tick) -> Tick {
        debug_assert!(self.is_depleted(), "process {} completed with work left", self.name);
        let turnaround = now.saturating_sub(self.arrival);
        self.completion_time = Some(now);
        self.turnaround = Some(turnaround);
        turnaround
    }
}

/// Arena of processes owned by one simulation run.
///
/// Processes are addressed by [`ProcessId`]; none is ever removed, so ids
/// stay valid for the whole run.
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    processes: Vec<Process>,
}

impl ProcessTable {
    pub fn new(processes: Vec<Process>) -> Self {
        Self { processes }
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// All ids in input order.
    pub fn ids(&self) -> impl Iterator<Item = ProcessId> {
        (0..self.processes.len()).map(ProcessId)
    }

    /// Ids of processes arriving exactly at `now`, in input order.
    pub fn arrivals_at(&self, now: Tick) -> impl Iterator<Item = ProcessId> + '_ {
        self.iter()
            .filter(move |(_, p)| p.arrival == now)
            .map(|(id, _)| id)
    }

    /// Ids of processes runnable at `now`, in input order.
    pub fn runnable_at(&self, now: Tick) -> impl Iterator<Item = ProcessId> + '_ {
        self.iter()
            .filter(move |(_, p)| p.is_runnable(now))
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProcessId, &Process)> {
        self.processes
            .iter()
            .enumerate()
            .map(|(i, p)| (ProcessId(i), p))
    }

    pub fn get(&self, id: ProcessId) -> Option<&Process> {
        self.processes.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<ProcessId> {
        self.processes
            .iter()
            .position(|p| p.name == name)
            .map(ProcessId)
    }

    pub fn as_slice(&self) -> &[Process] {
        &self.processes
    }

    /// Hands the processes back in input order.
    pub fn into_processes(self) -> Vec<Process> {
        self.processes
    }
}

impl Index<ProcessId> for ProcessTable {
    type Output = Process;

    fn index(&self, id: ProcessId) -> &Process {
        &self.processes[id.0]
    }
}

impl IndexMut<ProcessId> for ProcessTable {
    fn index_mut(&mut self, id: ProcessId) -> &mut Process {
        &mut self.processes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_new() {
        let p = Process::new("A", 2, 5);
        assert_eq!(p.name, "A");
        assert_eq!(p.remaining, 5);
        assert_eq!(p.start_time, None);
        assert_eq!(p.response_time, None);
        assert_eq!(p.turnaround, None);
        assert_eq!(p.status(), ProcessStatus::Pending);
    }

    #[test]
    fn test_runnable_window() {
        let p = Process::new("A", 2, 1);
        assert!(!p.is_runnable(1));
        assert!(p.is_runnable(2));
        assert!(p.is_runnable(10));
    }

    #[test]
    fn test_dispatch_sets_response_once() {
        let mut p = Process::new("A", 1, 3);
        p.mark_dispatched(4);
        p.mark_dispatched(7);
        assert_eq!(p.start_time, Some(4));
        assert_eq!(p.response_time, Some(3));
    }

    #[test]
    fn test_completion() {
        let mut p = Process::new("A", 1, 2);
        p.run_tick();
        p.run_tick();
        assert!(p.is_depleted());
        assert!(!p.is_runnable(3));
        assert_eq!(p.mark_completed(5), 4);
        assert_eq!(p.completion_time, Some(5));
        assert_eq!(p.status(), ProcessStatus::Completed);
        assert_eq!(p.served(), 2);
    }

    #[test]
    fn test_zero_completion_is_not_ambiguous() {
        // A completion at tick 0 is still distinguishable from "never completed".
        let mut p = Process::new("A", 0, 1);
        p.remaining = 0;
        p.mark_completed(0);
        assert_eq!(p.completion_time, Some(0));
        assert!(p.is_complete());
    }

    #[test]
    fn test_table_arrivals_in_input_order() {
        let table = ProcessTable::new(vec![
            Process::new("B", 1, 1),
            Process::new("A", 0, 1),
            Process::new("C", 1, 1),
        ]);
        let at_one: Vec<_> = table.arrivals_at(1).collect();
        assert_eq!(at_one, vec![ProcessId(0), ProcessId(2)]);
        assert_eq!(table.find("A"), Some(ProcessId(1)));
        assert_eq!(table.find("Z"), None);
        assert_eq!(table[ProcessId(2)].name, "C");
    }
}
