//! Wire models shared across the API modules. List endpoints return the
//! standard pagination envelope; detail and mutation endpoints wrap their
//! payload in `data`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::policy::Role;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub total_pages: u32,
    pub current_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataBody<T> {
    pub data: T,
}

// --- Service catalog ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub portfolio: Option<Portfolio>,
    #[serde(default)]
    pub sub_portfolio: Option<SubPortfolio>,
    #[serde(default)]
    pub sector: Option<Sector>,
    #[serde(default)]
    pub sub_sector: Option<SubSector>,
    #[serde(default)]
    pub owner_unit_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubPortfolio {
    pub id: i64,
    pub portfolio_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sector {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubSector {
    pub id: i64,
    pub sector_id: i64,
    pub name: String,
}

/// Explicit form record for creating/updating a service; cascading fields
/// (sub-portfolio, sub-sector) are validated against their parents by the
/// backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_portfolio_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_sector_id: Option<i64>,
}

// --- Marketing kit ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingKit {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MarketingKitForm {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<i64>,
}

// --- User administration ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub unit_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitChangeRequest {
    pub id: i64,
    pub user_id: i64,
    pub requested_unit_id: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: ChangeRequestStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeRequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}
