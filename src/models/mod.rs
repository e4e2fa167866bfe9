//! Simulation domain models.
//!
//! Provides the data types shared by the simulation loop, the policies and
//! the metrics layer.
//!
//! # Domain Mappings
//!
//! | u-cpusched | Textbook term |
//! |------------|---------------|
//! | Process | Job / PCB |
//! | ProcessTable | Process list |
//! | EventLog | Gantt chart trace |

mod event;
mod process;

pub use event::{Event, EventKind, EventLog};
pub use process::{Process, ProcessId, ProcessStatus, ProcessTable, Tick};
