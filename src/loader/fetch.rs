//! Fragment fetch sequence.

use std::sync::Arc;

use crate::error::{Artifact, LoadResult};
use crate::fragment::{BehaviorRegistry, FragmentBundle, FragmentSource};
use crate::observability::metrics;
use crate::routing::{FragmentId, RouteName};
use crate::style::StyleCoordinator;

/// Builds bundles: markup, then stylesheet, then behavior module.
pub struct FragmentLoader {
    source: Arc<dyn FragmentSource>,
    behaviors: BehaviorRegistry,
    styles: Arc<StyleCoordinator>,
}

impl FragmentLoader {
    pub fn new(source: Arc<dyn FragmentSource>, behaviors: BehaviorRegistry, styles: Arc<StyleCoordinator>) -> Self {
        Self {
            source,
            behaviors,
            styles,
        }
    }

    /// Run the full fetch sequence. Any stage failing aborts the whole load.
    pub async fn load(&self, route: &RouteName, fragment: &FragmentId) -> LoadResult<FragmentBundle> {
        tracing::debug!(route = %route, fragment = %fragment, "Loading fragment");

        metrics::record_fetch(Artifact::Markup);
        let markup = self.source.fetch_markup(fragment).await?;

        metrics::record_fetch(Artifact::Style);
        let css = self.source.fetch_style(fragment).await?;

        metrics::record_fetch(Artifact::Behavior);
        let behavior = self.behaviors.resolve(fragment)?;

        let style = self.styles.create(css);
        tracing::debug!(route = %route, style = %style.id(), markup_len = markup.len(), "Fragment loaded");

        Ok(FragmentBundle::new(markup, style, behavior))
    }
}
