pub mod runner;
pub mod fairness;

pub use runner::{run_round, AuditError, RoundResult};
pub use fairness::{audit, make_seats, AuditConfig, FairnessReport, SeatKind};
