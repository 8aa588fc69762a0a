//! # Assignment Engine
//!
//! The rules that decide whether a staff-to-shift assignment is legal and
//! the state machine that drives it from creation to resolution.
//!
//! Every operation works against a [`Snapshot`]: an in-memory view of all
//! records loaded by the storage layer under an exclusive workspace lock.
//! Operations take the current instant as a parameter (never read a global
//! clock) and return their result together with the list of side effects
//! ([`crate::domain::Effect`]) to dispatch after the state write commits.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`conflict`] | Daily-cap and overlap checks, pure |
//! | [`assignment_ops`] | Create / update / accept / reject / remove |
//! | [`application_ops`] | Staff apply for shifts, schedulers decide |
//! | [`sweeper`] | Expire overdue pending assignments |
//! | [`week`] | Week view aggregation, copy-week, open shifts |
//! | [`template_ops`] | Snapshot a week into a template, apply it |

pub mod application_ops;
pub mod assignment_ops;
pub mod conflict;
pub mod sweeper;
pub mod template_ops;
pub mod week;

mod snapshot;

pub use snapshot::Snapshot;

use thiserror::Error;

use crate::domain::{AssignmentId, TimeError};

/// Typed outcomes for every engine operation.
///
/// All of these are recoverable by the caller; the engine never retries
/// a failed precondition on its own.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    // NotFound family
    #[error("Staff user not found")]
    StaffNotFound,

    #[error("Shift not found")]
    ShiftNotFound,

    #[error("Assignment not found")]
    AssignmentNotFound,

    #[error("House not found")]
    HouseNotFound,

    #[error("Template not found")]
    TemplateNotFound,

    #[error("Application not found")]
    ApplicationNotFound,

    // Precondition family
    #[error("Staff user is inactive")]
    StaffInactive,

    #[error("An active assignment already exists for this shift and staff member")]
    AssignmentExists,

    #[error("Staff member is already assigned to this shift")]
    AlreadyAssigned,

    #[error("An application already exists for this shift and staff member")]
    ApplicationExists,

    #[error("Application has already been decided")]
    ApplicationDecided,

    #[error("Staff already has two assignments for this day (use an override with a reason)")]
    DailyAssignmentLimit,

    #[error("Shift overlaps with existing assignment {0}")]
    ShiftOverlap(AssignmentId),

    #[error("No shifts found for source week")]
    NoShifts,

    #[error("Assignment is not pending")]
    AssignmentNotPending,

    #[error("Assignment has expired")]
    AssignmentExpired,

    // Authorization
    #[error("Only the assigned staff member may respond to this assignment")]
    Forbidden,

    // Malformed input
    #[error(transparent)]
    InvalidTime(#[from] TimeError),
}
