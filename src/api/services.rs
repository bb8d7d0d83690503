//! Service catalog endpoints plus the cascading portfolio/sector lookups
//! the service form depends on.

use crate::error::{AppError, AppResult};
use crate::gateway::{paged_path, Gateway};

use super::models::{
    DataBody, Paginated, Portfolio, Sector, Service, ServiceForm, SubPortfolio, SubSector,
};

pub async fn list(
    gateway: &Gateway,
    page: u32,
    limit: u32,
    search: Option<&str>,
) -> AppResult<Paginated<Service>> {
    gateway.get(&paged_path("/services", page, limit, search)).await
}

pub async fn detail(gateway: &Gateway, id: i64) -> AppResult<Service> {
    let body: DataBody<Service> = gateway.get(&format!("/services/{}", id)).await?;
    Ok(body.data)
}

pub async fn create(gateway: &Gateway, form: &ServiceForm) -> AppResult<Service> {
    validate(form)?;
    let body: DataBody<Service> = gateway.post("/services", form).await?;
    Ok(body.data)
}

pub async fn update(gateway: &Gateway, id: i64, form: &ServiceForm) -> AppResult<Service> {
    validate(form)?;
    let body: DataBody<Service> = gateway.put(&format!("/services/{}", id), form).await?;
    Ok(body.data)
}

pub async fn remove(gateway: &Gateway, id: i64) -> AppResult<()> {
    gateway.delete(&format!("/services/{}", id)).await
}

// Local check for the fields the backend will reject anyway; everything
// else (cascade consistency, uniqueness) is its call.
fn validate(form: &ServiceForm) -> AppResult<()> {
    if form.name.trim().is_empty() {
        return Err(AppError::validation(
            "missing_name".to_string(),
            "Service name is required".to_string(),
        ));
    }
    if form.sub_portfolio_id.is_some() && form.portfolio_id.is_none() {
        return Err(AppError::validation(
            "orphan_sub_portfolio".to_string(),
            "Sub-portfolio requires a portfolio".to_string(),
        ));
    }
    if form.sub_sector_id.is_some() && form.sector_id.is_none() {
        return Err(AppError::validation(
            "orphan_sub_sector".to_string(),
            "Sub-sector requires a sector".to_string(),
        ));
    }
    Ok(())
}

// --- Cascading dropdown sources ---

pub async fn portfolios(gateway: &Gateway) -> AppResult<Vec<Portfolio>> {
    let body: DataBody<Vec<Portfolio>> = gateway.get("/portfolios").await?;
    Ok(body.data)
}

pub async fn sub_portfolios(gateway: &Gateway, portfolio_id: i64) -> AppResult<Vec<SubPortfolio>> {
    let body: DataBody<Vec<SubPortfolio>> =
        gateway.get(&format!("/portfolios/{}/sub-portfolios", portfolio_id)).await?;
    Ok(body.data)
}

pub async fn sectors(gateway: &Gateway) -> AppResult<Vec<Sector>> {
    let body: DataBody<Vec<Sector>> = gateway.get("/sectors").await?;
    Ok(body.data)
}

pub async fn sub_sectors(gateway: &Gateway, sector_id: i64) -> AppResult<Vec<SubSector>> {
    let body: DataBody<Vec<SubSector>> =
        gateway.get(&format!("/sectors/{}/sub-sectors", sector_id)).await?;
    Ok(body.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_validation_rejects_orphans() {
        let mut form = ServiceForm { name: "Managed WAN".into(), ..Default::default() };
        assert!(validate(&form).is_ok());

        form.sub_portfolio_id = Some(7);
        assert!(validate(&form).is_err());
        form.portfolio_id = Some(2);
        assert!(validate(&form).is_ok());

        form.sub_sector_id = Some(9);
        assert!(validate(&form).is_err());
        form.sector_id = Some(3);
        assert!(validate(&form).is_ok());

        form.name = "  ".into();
        assert!(validate(&form).is_err());
    }
}
