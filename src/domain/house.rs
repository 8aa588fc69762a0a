//! Houses: the physical sites shifts are scheduled at

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::HouseId;

/// A physical site with its own rota
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: HouseId,
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl House {
    pub fn new(name: impl Into<String>, location: impl Into<String>, now: DateTime<Utc>) -> Self {
        let name = name.into();
        let id = HouseId::new(&name, now);
        Self {
            id,
            name,
            location: location.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
