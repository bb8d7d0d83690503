//! Marketing-kit collateral endpoints. Downloads resolve through the
//! gateway's redirect handling: the backend answers with a redirect to the
//! stored file, and the caller opens that resolved URL.

use reqwest::Url;

use crate::error::{AppError, AppResult};
use crate::gateway::{paged_path, Gateway};

use super::models::{DataBody, MarketingKit, MarketingKitForm, Paginated};

pub async fn list(
    gateway: &Gateway,
    page: u32,
    limit: u32,
    search: Option<&str>,
) -> AppResult<Paginated<MarketingKit>> {
    gateway.get(&paged_path("/marketing-kits", page, limit, search)).await
}

pub async fn detail(gateway: &Gateway, id: i64) -> AppResult<MarketingKit> {
    let body: DataBody<MarketingKit> = gateway.get(&format!("/marketing-kits/{}", id)).await?;
    Ok(body.data)
}

pub async fn create(gateway: &Gateway, form: &MarketingKitForm) -> AppResult<MarketingKit> {
    validate(form)?;
    let body: DataBody<MarketingKit> = gateway.post("/marketing-kits", form).await?;
    Ok(body.data)
}

pub async fn update(gateway: &Gateway, id: i64, form: &MarketingKitForm) -> AppResult<MarketingKit> {
    validate(form)?;
    let body: DataBody<MarketingKit> = gateway.put(&format!("/marketing-kits/{}", id), form).await?;
    Ok(body.data)
}

pub async fn remove(gateway: &Gateway, id: i64) -> AppResult<()> {
    gateway.delete(&format!("/marketing-kits/{}", id)).await
}

/// Location of the actual collateral file for the given kit.
pub async fn download_url(gateway: &Gateway, id: i64) -> AppResult<Url> {
    gateway.resolve_download(&format!("/marketing-kits/{}/download", id)).await
}

fn validate(form: &MarketingKitForm) -> AppResult<()> {
    if form.title.trim().is_empty() {
        return Err(AppError::validation(
            "missing_title".to_string(),
            "Marketing kit title is required".to_string(),
        ));
    }
    Ok(())
}
