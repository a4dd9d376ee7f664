use dioxus::prelude::*;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_title: String,
    pub projects_url: String,
    pub preferences_url: String,
    pub media_base_url: String,
    /// Exact title of the section shown when the URL has no fragment. Empty
    /// means show nothing.
    pub default_section: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Portfolio".to_string(),
            projects_url: "/data/projects.json".to_string(),
            preferences_url: "/data/preferences.json".to_string(),
            media_base_url: "/images".to_string(),
            default_section: "Projects".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn default_section(&self) -> Option<&str> {
        Some(self.default_section.trim()).filter(|title| !title.is_empty())
    }
}

pub fn use_site_config() -> Resource<SiteConfig> {
    use_resource(|| async move { fetch_site_config().await })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_site_config() -> SiteConfig {
    match fetch_config_from("/config.json").await {
        Ok(config) => config,
        Err(first) => match fetch_config_from("/assets/config.json").await {
            Ok(config) => config,
            Err(second) => {
                tracing::debug!(%first, %second, "config: using defaults");
                SiteConfig::default()
            }
        },
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_config_from(path: &str) -> Result<SiteConfig, String> {
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|err| format!("config fetch failed: {err}"))?;
    if !response.ok() {
        return Err(format!("config fetch failed: status {}", response.status()));
    }
    response
        .json::<SiteConfig>()
        .await
        .map_err(|err| format!("config decode failed: {err}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_site_config() -> SiteConfig {
    config_from_env(|key| std::env::var(key).ok())
}

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn config_from_env(lookup: impl Fn(&str) -> Option<String>) -> SiteConfig {
    let defaults = SiteConfig::default();
    SiteConfig {
        site_title: lookup("PORTFOLIO_SITE_TITLE").unwrap_or(defaults.site_title),
        projects_url: lookup("PORTFOLIO_PROJECTS_URL").unwrap_or(defaults.projects_url),
        preferences_url: lookup("PORTFOLIO_PREFERENCES_URL").unwrap_or(defaults.preferences_url),
        media_base_url: lookup("PORTFOLIO_MEDIA_BASE_URL").unwrap_or(defaults.media_base_url),
        default_section: lookup("PORTFOLIO_DEFAULT_SECTION").unwrap_or(defaults.default_section),
    }
}
