//! Admin-panel endpoints: user accounts, role assignment, password reset,
//! unit-change requests and the work-unit catalog.

use crate::error::{AppError, AppResult};
use crate::gateway::{paged_path, Gateway};
use crate::policy::Role;

use super::models::{DataBody, Paginated, Unit, UnitChangeRequest, UserAccount, UserForm};

pub async fn list(
    gateway: &Gateway,
    page: u32,
    limit: u32,
    search: Option<&str>,
) -> AppResult<Paginated<UserAccount>> {
    gateway.get(&paged_path("/users", page, limit, search)).await
}

pub async fn create(gateway: &Gateway, form: &UserForm) -> AppResult<UserAccount> {
    validate(form)?;
    let body: DataBody<UserAccount> = gateway.post("/users", form).await?;
    Ok(body.data)
}

pub async fn update(gateway: &Gateway, id: i64, form: &UserForm) -> AppResult<UserAccount> {
    validate(form)?;
    let body: DataBody<UserAccount> = gateway.put(&format!("/users/{}", id), form).await?;
    Ok(body.data)
}

pub async fn remove(gateway: &Gateway, id: i64) -> AppResult<()> {
    gateway.delete(&format!("/users/{}", id)).await
}

pub async fn assign_role(gateway: &Gateway, id: i64, role: Role) -> AppResult<UserAccount> {
    let body: DataBody<UserAccount> = gateway
        .put(&format!("/users/{}/role", id), &serde_json::json!({ "role": role }))
        .await?;
    Ok(body.data)
}

/// Trigger the reset-mail flow for the given address. Unauthenticated
/// callers are allowed; the backend answers 200 either way.
pub async fn reset_password(gateway: &Gateway, email: &str) -> AppResult<()> {
    if email.trim().is_empty() {
        return Err(AppError::validation(
            "missing_email".to_string(),
            "Email is required".to_string(),
        ));
    }
    gateway.post("/password-reset", &serde_json::json!({ "email": email })).await
}

// --- Unit-change requests ---

pub async fn unit_change_requests(
    gateway: &Gateway,
    page: u32,
    limit: u32,
) -> AppResult<Paginated<UnitChangeRequest>> {
    gateway.get(&paged_path("/unit-change-requests", page, limit, None)).await
}

pub async fn submit_unit_change(
    gateway: &Gateway,
    requested_unit_id: i64,
    reason: Option<&str>,
) -> AppResult<UnitChangeRequest> {
    let body: DataBody<UnitChangeRequest> = gateway
        .post(
            "/unit-change-requests",
            &serde_json::json!({ "requested_unit_id": requested_unit_id, "reason": reason }),
        )
        .await?;
    Ok(body.data)
}

pub async fn approve_unit_change(gateway: &Gateway, id: i64) -> AppResult<UnitChangeRequest> {
    let body: DataBody<UnitChangeRequest> =
        gateway.put(&format!("/unit-change-requests/{}/approve", id), &serde_json::json!({})).await?;
    Ok(body.data)
}

pub async fn reject_unit_change(gateway: &Gateway, id: i64) -> AppResult<UnitChangeRequest> {
    let body: DataBody<UnitChangeRequest> =
        gateway.put(&format!("/unit-change-requests/{}/reject", id), &serde_json::json!({})).await?;
    Ok(body.data)
}

pub async fn units(gateway: &Gateway) -> AppResult<Vec<Unit>> {
    let body: DataBody<Vec<Unit>> = gateway.get("/units").await?;
    Ok(body.data)
}

fn validate(form: &UserForm) -> AppResult<()> {
    if form.name.trim().is_empty() || form.email.trim().is_empty() {
        return Err(AppError::validation(
            "missing_fields".to_string(),
            "Name and email are required".to_string(),
        ));
    }
    Ok(())
}
