use std::future::Future;

use futures_util::future::try_join;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::projects::{Catalog, Preferences};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode {url}: {message}")]
    Decode { url: String, message: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteData {
    pub catalog: Catalog,
    pub preferences: Preferences,
}

pub async fn load_site_data(config: &SiteConfig) -> Result<SiteData, LoadError> {
    load_with(config, fetch_text).await
}

/// Both documents are fetched concurrently; either failing fails the load.
async fn load_with<F, Fut>(config: &SiteConfig, fetch: F) -> Result<SiteData, LoadError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String, LoadError>>,
{
    let (projects_body, preferences_body) = try_join(
        fetch(config.projects_url.clone()),
        fetch(config.preferences_url.clone()),
    )
    .await?;
    let catalog: Catalog = decode(&config.projects_url, &projects_body)?;
    let preferences: Preferences = decode(&config.preferences_url, &preferences_body)?;
    tracing::debug!(
        projects = catalog.projects().len(),
        preference_keys = preferences.key_count(),
        "loader: site data ready"
    );
    Ok(SiteData {
        catalog,
        preferences,
    })
}

async fn fetch_text(url: String) -> Result<String, LoadError> {
    let response = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|err| LoadError::Request {
            url: url.to_string(),
            message: err.to_string(),
        })?;
    if !response.ok() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    response.text().await.map_err(|err| LoadError::Request {
        url: url.clone(),
        message: err.to_string(),
    })
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, LoadError> {
    serde_json::from_str(body).map_err(|err| LoadError::Decode {
        url: url.to_string(),
        message: err.to_string(),
    })
}
