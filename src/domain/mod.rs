//! Domain models for the rota
//!
//! Contains the core records and time arithmetic without any I/O concerns.

mod application;
mod assignment;
mod effect;
mod house;
mod id;
mod shift;
mod staff;
mod template;
pub mod time;

pub use application::{ApplicationStatus, ShiftApplication};
pub use assignment::{Assignment, AssignmentStatus};
pub use effect::{AuditAction, Effect, NotificationKind};
pub use house::House;
pub use id::{ApplicationId, AssignmentId, HouseId, IdError, ShiftId, StaffId, TemplateId};
pub use shift::{Shift, ShiftType};
pub use staff::{Gender, Role, Staff};
pub use template::{ShiftTemplate, TemplateItem};
pub use time::{ShiftRange, TimeError, TimeOfDay};
