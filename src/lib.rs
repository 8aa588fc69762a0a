//! Rota CLI - A local-first staff rota and shift assignment tool
//!
//! Rota schedules staff shifts across houses and walks assignments
//! through a pending/accepted/rejected/expired lifecycle: schedulers
//! propose, staff accept or reject within an expiry window, and a
//! sweeper expires the rest. Conflict rules (a daily cap and an overlap
//! check) guard every assignment, with a reasoned override for the cap.

pub mod cli;
pub mod domain;
pub mod engine;
pub mod storage;

pub use domain::{Assignment, AssignmentId, AssignmentStatus, Shift, ShiftId, Staff, StaffId};
