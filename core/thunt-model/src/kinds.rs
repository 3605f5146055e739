//! The kinds served by thunt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thunt_types::EntityKey;

use crate::Entity;

/// A treasure hunt that can be undertaken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mission {
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityKey>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Entity for Mission {
    const KIND: &'static str = "Mission";

    fn set_id(&mut self, id: EntityKey) {
        self.id = Some(id);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }
}

/// One attempt at a mission, started at `timestamp`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hunt {
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityKey>,
    #[serde(rename = "missionID", default)]
    pub mission_id: i64,
    #[serde(default)]
    pub timestamp: DateTime<Utc>,
}

impl Entity for Hunt {
    const KIND: &'static str = "Hunt";

    fn set_id(&mut self, id: EntityKey) {
        self.id = Some(id);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }
}
