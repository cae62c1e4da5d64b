//! Fragment artifact sources.
//!
//! # Responsibilities
//! - Fetch a fragment's markup and stylesheet text
//! - Map non-success responses to `LoadError::Status`
//!
//! # Design Decisions
//! - Async trait object so the router is independent of the transport
//! - Artifacts live at `<base>/pages/<fragment>/<file>`
//! - `StaticFragmentSource` serves artifacts compiled into the host

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::{ConfigError, FetchConfig};
use crate::error::{Artifact, LoadError, LoadResult};
use crate::routing::FragmentId;

/// Where fragment markup and styles come from.
#[async_trait]
pub trait FragmentSource: Send + Sync {
    async fn fetch_markup(&self, fragment: &FragmentId) -> LoadResult<String>;

    async fn fetch_style(&self, fragment: &FragmentId) -> LoadResult<String>;
}

/// Fetches artifacts over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFragmentSource {
    client: reqwest::Client,
    base: Url,
    markup_file: String,
    style_file: String,
}

impl HttpFragmentSource {
    pub fn from_config(config: &FetchConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Self::with_client(client, config)
    }

    pub fn with_client(client: reqwest::Client, config: &FetchConfig) -> Result<Self, ConfigError> {
        let mut base = Url::parse(&config.base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client,
            base,
            markup_file: config.markup_file.clone(),
            style_file: config.style_file.clone(),
        })
    }

    /// Location of one artifact of `fragment`.
    pub fn artifact_url(&self, fragment: &FragmentId, artifact: Artifact) -> LoadResult<Url> {
        let file = match artifact {
            Artifact::Markup => &self.markup_file,
            Artifact::Style => &self.style_file,
            Artifact::Behavior => {
                return Err(LoadError::InvalidUrl {
                    artifact,
                    fragment: fragment.clone(),
                    reason: "behaviors are resolved from the registry".to_string(),
                })
            }
        };

        self.base
            .join(&format!("pages/{}/{}", fragment, file))
            .map_err(|e| LoadError::InvalidUrl {
                artifact,
                fragment: fragment.clone(),
                reason: e.to_string(),
            })
    }

    async fn fetch_text(&self, fragment: &FragmentId, artifact: Artifact) -> LoadResult<String> {
        let url = self.artifact_url(fragment, artifact)?;
        let transport = |e: reqwest::Error| LoadError::Transport {
            artifact,
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self.client.get(url.clone()).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                artifact,
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(transport)
    }
}

#[async_trait]
impl FragmentSource for HttpFragmentSource {
    async fn fetch_markup(&self, fragment: &FragmentId) -> LoadResult<String> {
        self.fetch_text(fragment, Artifact::Markup).await
    }

    async fn fetch_style(&self, fragment: &FragmentId) -> LoadResult<String> {
        self.fetch_text(fragment, Artifact::Style).await
    }
}

/// Serves artifacts held in memory; unknown artifacts answer 404.
#[derive(Debug, Default)]
pub struct StaticFragmentSource {
    markup: HashMap<FragmentId, String>,
    styles: HashMap<FragmentId, String>,
    fetches: Mutex<HashMap<FragmentId, usize>>,
}

impl StaticFragmentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add both artifacts for `fragment`.
    pub fn with_fragment(mut self, fragment: impl Into<FragmentId>, markup: &str, css: &str) -> Self {
        let fragment = fragment.into();
        self.markup.insert(fragment.clone(), markup.to_string());
        self.styles.insert(fragment, css.to_string());
        self
    }

    /// Add only the markup, leaving the stylesheet missing.
    pub fn with_markup_only(mut self, fragment: impl Into<FragmentId>, markup: &str) -> Self {
        self.markup.insert(fragment.into(), markup.to_string());
        self
    }

    /// Total fetch requests (markup and style) seen for `fragment`.
    pub fn fetch_count(&self, fragment: &str) -> usize {
        self.fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(fragment)
            .copied()
            .unwrap_or(0)
    }

    fn serve(&self, fragment: &FragmentId, artifact: Artifact) -> LoadResult<String> {
        *self
            .fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(fragment.clone())
            .or_default() += 1;

        let store = match artifact {
            Artifact::Style => &self.styles,
            _ => &self.markup,
        };
        store.get(fragment).cloned().ok_or_else(|| LoadError::Status {
            artifact,
            url: format!("memory:pages/{}/{}", fragment, artifact),
            status: 404,
        })
    }
}

#[async_trait]
impl FragmentSource for StaticFragmentSource {
    async fn fetch_markup(&self, fragment: &FragmentId) -> LoadResult<String> {
        self.serve(fragment, Artifact::Markup)
    }

    async fn fetch_style(&self, fragment: &FragmentId) -> LoadResult<String> {
        self.serve(fragment, Artifact::Style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_url_layout() {
        let config = FetchConfig {
            base_url: "http://localhost:8080/app".into(),
            ..FetchConfig::default()
        };
        let source = HttpFragmentSource::from_config(&config).unwrap();
        let fragment = FragmentId::from("pagina1");

        let url = source.artifact_url(&fragment, Artifact::Markup).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/app/pages/pagina1/app.component.html");

        let url = source.artifact_url(&fragment, Artifact::Style).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/app/pages/pagina1/app.component.css");

        assert!(source.artifact_url(&fragment, Artifact::Behavior).is_err());
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticFragmentSource::new()
            .with_fragment("home", "<h1>Home</h1>", "h1{}")
            .with_markup_only("bare", "<p>bare</p>");

        let home = FragmentId::from("home");
        assert_eq!(source.fetch_markup(&home).await.unwrap(), "<h1>Home</h1>");
        assert_eq!(source.fetch_style(&home).await.unwrap(), "h1{}");
        assert_eq!(source.fetch_count("home"), 2);

        let err = source.fetch_style(&FragmentId::from("bare")).await.unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 404, artifact: Artifact::Style, .. }));
    }
}
