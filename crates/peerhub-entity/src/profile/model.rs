//! Profile display projection.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The display fields of a profile the notification factory needs:
/// who owns it and how to present it. Not the full profile record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDisplay {
    /// Profile identifier.
    pub id: Uuid,
    /// The user who owns/created the profile.
    pub owner: Uuid,
    /// Profile display name.
    pub name: String,
    /// Profile image URL, when set.
    pub image: Option<String>,
}
