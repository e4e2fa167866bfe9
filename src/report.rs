//! Report rendering.
//!
//! Turns a [`SimulationOutcome`] into a human-readable actions/metrics
//! table or a JSON document. Pending processes are rendered distinctly:
//! `-` for unset times and `unfinished` as status.

use std::fmt;

use serde::Serialize;

use crate::metrics::{MetricsReport, ProcessMetrics};
use crate::models::{EventLog, ProcessStatus, Tick};
use crate::policy::PolicyKind;
use crate::simulation::SimulationOutcome;

/// Plain-text report of a run.
///
/// # Example
/// ```
/// use u_cpusched::models::Process;
/// use u_cpusched::report::TextReport;
/// use u_cpusched::simulation::{simulate, SimulationConfig};
///
/// let outcome = simulate(vec![Process::new("A", 0, 1)], &SimulationConfig::fcfs(2)).unwrap();
/// let text = TextReport::new(&outcome).to_string();
/// assert!(text.contains("selected"));
/// assert!(text.contains("completed"));
/// ```
pub struct TextReport<'a> {
    outcome: &'a SimulationOutcome,
    metrics: MetricsReport,
}

impl<'a> TextReport<'a> {
    pub fn new(outcome: &'a SimulationOutcome) -> Self {
        Self {
            outcome,
            metrics: outcome.metrics(),
        }
    }

    fn name_width(&self) -> usize {
        self.outcome
            .processes
            .iter()
            .map(|p| p.name.len())
            .max()
            .unwrap_or(0)
            .max("Process".len())
    }

    fn write_actions(&self, f: &mut fmt::Formatter<'_>, width: usize) -> fmt::Result {
        writeln!(f, "Actions:")?;
        writeln!(
            f,
            "{:>6}  {:<width$}  {:<9}  {:>10}",
            "Time", "Process", "Action", "Burst Left"
        )?;
        for event in &self.outcome.events {
            writeln!(
                f,
                "{:>6}  {:<width$}  {:<9}  {:>10}",
                event.tick,
                event.process.as_deref().unwrap_or(""),
                event.kind.label(),
                opt(event.burst_left),
            )?;
        }
        Ok(())
    }

    fn write_metrics(&self, f: &mut fmt::Formatter<'_>, width: usize) -> fmt::Result {
        writeln!(f, "Process Metrics:")?;
        writeln!(
            f,
            "{:<width$}  {:>6}  {:>10}  {:>8}  {:<10}",
            "Process", "Wait", "Turnaround", "Response", "Status"
        )?;
        for m in &self.metrics.processes {
            writeln!(
                f,
                "{:<width$}  {:>6}  {:>10}  {:>8}  {:<10}",
                m.name,
                wait_cell(m),
                opt(m.turnaround),
                opt(m.response_time),
                status_label(m.status),
            )?;
        }
        Ok(())
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.metrics.summary;
        writeln!(f, "Summary:")?;
        writeln!(f, "  Completed: {} of {}", s.completed, s.completed + s.pending)?;
        writeln!(f, "  Average wait: {:.2}", s.avg_wait)?;
        writeln!(f, "  Average turnaround: {:.2}", s.avg_turnaround)?;
        writeln!(f, "  Average response: {:.2}", s.avg_response)?;
        writeln!(
            f,
            "  CPU utilization: {:.1}% ({} busy, {} idle)",
            s.cpu_utilization * 100.0,
            s.busy_ticks,
            s.idle_ticks
        )?;
        writeln!(f, "  Throughput: {:.3} processes/tick", s.throughput)?;
        writeln!(f, "  Dispatches: {}", s.dispatches)
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.name_width();
        writeln!(
            f,
            "{} process(es), {} over {} ticks",
            self.outcome.processes.len(),
            self.outcome.policy,
            self.outcome.run_time
        )?;
        writeln!(f)?;
        self.write_actions(f, width)?;
        writeln!(f)?;
        self.write_metrics(f, width)?;
        writeln!(f)?;
        self.write_summary(f)
    }
}

fn opt(value: Option<Tick>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

// Wait of a process that never ran and never finished is not meaningful yet.
fn wait_cell(m: &ProcessMetrics) -> String {
    if m.status == ProcessStatus::Pending && m.response_time.is_none() {
        "-".to_string()
    } else {
        m.wait_time.to_string()
    }
}

fn status_label(status: ProcessStatus) -> &'static str {
    match status {
        ProcessStatus::Completed => "completed",
        ProcessStatus::Pending => "unfinished",
    }
}

/// Machine-readable report of a run.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    pub policy: PolicyKind,
    pub run_time: Tick,
    pub events: &'a EventLog,
    pub metrics: MetricsReport,
}

impl<'a> JsonReport<'a> {
    pub fn new(outcome: &'a SimulationOutcome) -> Self {
        Self {
            policy: outcome.policy,
            run_time: outcome.run_time,
            events: &outcome.events,
            metrics: outcome.metrics(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;
    use crate::simulation::{simulate, SimulationConfig};

    fn truncated_outcome() -> SimulationOutcome {
        let processes = vec![
            Process::new("A", 0, 3),
            Process::new("B", 1, 2),
            Process::new("Late", 9, 1),
        ];
        simulate(processes, &SimulationConfig::fcfs(4)).unwrap()
    }

    #[test]
    fn test_text_report_sections() {
        let text = TextReport::new(&truncated_outcome()).to_string();
        assert!(text.starts_with("3 process(es), First-Come First-Served over 4 ticks"));
        assert!(text.contains("Actions:"));
        assert!(text.contains("Process Metrics:"));
        assert!(text.contains("Summary:"));
        assert!(text.contains("Completed: 1 of 3"));
    }

    #[test]
    fn test_text_report_marks_unfinished() {
        let text = TextReport::new(&truncated_outcome()).to_string();
        let late_row = text
            .lines()
            .find(|l| l.starts_with("Late"))
            .expect("metrics row for Late");
        assert!(late_row.contains("unfinished"));
        assert!(late_row.contains('-'));
        let b_row = text
            .lines()
            .filter(|l| l.starts_with("B "))
            .last()
            .expect("metrics row for B");
        assert!(b_row.contains("unfinished"));
    }

    #[test]
    fn test_text_report_idle_rows() {
        let outcome = simulate(vec![Process::new("A", 1, 1)], &SimulationConfig::srtf(3)).unwrap();
        let text = TextReport::new(&outcome).to_string();
        let idle_rows = text
            .lines()
            .filter(|l| l.split_whitespace().nth(1) == Some("idle"))
            .count();
        assert_eq!(idle_rows, 2);
    }

    #[test]
    fn test_json_report() {
        let outcome = truncated_outcome();
        let json = JsonReport::new(&outcome).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["policy"]["policy"], "fcfs");
        assert_eq!(value["run_time"], 4);
        assert_eq!(value["events"][0]["kind"], "arrived");
        assert_eq!(value["metrics"]["summary"]["completed"], 1);
        assert_eq!(value["metrics"]["processes"][2]["status"], "pending");
    }
}
