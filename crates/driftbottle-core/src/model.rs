//! Persisted data model.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a bottle.
///
/// The transition `Adrift → Picked` happens at most once and is never
/// reversed. Persisted as an integer column (`0` / `1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BottleStatus {
    /// Unclaimed, eligible for pick.
    Adrift,
    /// Claimed; terminal.
    Picked,
}

impl BottleStatus {
    /// The integer code stored in the `status` column.
    pub fn code(self) -> i64 {
        match self {
            Self::Adrift => 0,
            Self::Picked => 1,
        }
    }

    /// Decodes a stored status code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Adrift),
            1 => Some(Self::Picked),
            _ => None,
        }
    }
}

/// A drift bottle: a text message thrown into the shared pool, consumable by
/// exactly one pick.
///
/// The picker fields and `picked_at` are all-or-nothing with [`status`]:
/// all `None` while [`BottleStatus::Adrift`], all set once
/// [`BottleStatus::Picked`].
///
/// [`status`]: Bottle::status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bottle {
    /// Unique id, assigned once by the store, never reused.
    pub id: i64,
    /// Message text; non-empty, immutable after creation.
    pub content: String,
    /// Lifecycle status.
    pub status: BottleStatus,
    /// Originating user id.
    pub sender_id: i64,
    /// Originating group id.
    pub sender_group_id: i64,
    /// Claiming user id; set exactly once on claim.
    pub picker_id: Option<i64>,
    /// Claiming group id; set exactly once on claim.
    pub picker_group_id: Option<i64>,
    /// Unix seconds at creation.
    pub created_at: i64,
    /// Unix seconds at claim.
    pub picked_at: Option<i64>,
}

impl Bottle {
    /// Whether the bottle is still unclaimed.
    pub fn is_adrift(&self) -> bool {
        self.status == BottleStatus::Adrift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_round_trip() {
        assert_eq!(BottleStatus::from_code(0), Some(BottleStatus::Adrift));
        assert_eq!(BottleStatus::from_code(1), Some(BottleStatus::Picked));
        assert_eq!(BottleStatus::from_code(2), None);
        assert_eq!(BottleStatus::Adrift.code(), 0);
        assert_eq!(BottleStatus::Picked.code(), 1);
    }
}
