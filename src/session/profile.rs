use serde::{Deserialize, Serialize};

use crate::policy::Role;

/// Work unit the user belongs to; owned by the backend, we only carry the
/// reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitRef {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub unit: Option<UnitRef>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// Fields a caller may merge locally after a confirmed backend write.
/// Role and unit are deliberately absent: they always come from a fresh
/// profile fetch.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
}

impl UserProfile {
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(v) = &patch.name { self.name = v.clone(); }
        if let Some(v) = &patch.email { self.email = v.clone(); }
        if let Some(v) = &patch.phone { self.phone = Some(v.clone()); }
        if let Some(v) = &patch.position { self.position = Some(v.clone()); }
    }
}
