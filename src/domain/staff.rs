//! Staff directory records
//!
//! The rota only assigns users with the `Staff` role; schedulers and
//! managers propose assignments but cannot hold them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::StaffId;

/// Role of a user in the rota
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,
    Scheduler,
    #[default]
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Scheduler => "scheduler",
            Role::Staff => "staff",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manager" => Ok(Role::Manager),
            "scheduler" => Ok(Role::Scheduler),
            "staff" => Ok(Role::Staff),
            other => Err(format!(
                "unknown role '{}' (expected manager, scheduler, or staff)",
                other
            )),
        }
    }
}

/// Self-reported gender, display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    #[default]
    Unspecified,
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "female" => Ok(Gender::Female),
            "male" => Ok(Gender::Male),
            "unspecified" | "" => Ok(Gender::Unspecified),
            other => Err(format!(
                "unknown gender '{}' (expected female, male, or unspecified)",
                other
            )),
        }
    }
}

/// A member of the staff directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    /// Unique identifier
    pub id: StaffId,

    pub first_name: String,
    pub last_name: String,

    /// Only `Role::Staff` users can hold assignments
    pub role: Role,

    /// Inactive staff cannot receive new assignments
    pub is_active: bool,

    #[serde(default)]
    pub gender: Gender,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Staff {
    /// Creates an active staff member
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: Role,
        gender: Gender,
        now: DateTime<Utc>,
    ) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let id = StaffId::new(&format!("{} {}", first_name, last_name), now);
        Self {
            id,
            first_name,
            last_name,
            role,
            is_active: true,
            gender,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full display name
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// True if this user can hold assignments right now
    pub fn is_assignable(&self) -> bool {
        self.role == Role::Staff && self.is_active
    }

    /// Marks the staff member inactive
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        if self.is_active {
            self.is_active = false;
            self.updated_at = now;
        }
    }
}
