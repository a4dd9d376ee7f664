use std::rc::Rc;

use dioxus::prelude::*;

use crate::config::{use_site_config, SiteConfig};
use crate::letterfall::LetterfallCanvas;
use crate::lightbox::{Lightbox, LightboxOverlay};
use crate::loader::load_site_data;
use crate::media::MediaGridView;
use crate::projects::Catalog;
use crate::router::{current_fragment, ContentView, ProjectRouter};
use crate::sidebar::{build_navigation, Sidebar};

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let config_resource = use_site_config();

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        LetterfallCanvas {}
        {match config_resource() {
            None => rsx! {
                div { class: "layout loading" }
            },
            Some(config) => rsx! {
                Portfolio { config }
            },
        }}
    }
}

#[component]
fn Portfolio(config: SiteConfig) -> Element {
    let lightbox = use_signal(Lightbox::default);
    use_context_provider(|| lightbox);

    let data_config = config.clone();
    let catalog = use_resource(move || {
        let config = data_config.clone();
        async move {
            match load_site_data(&config).await {
                Ok(data) => Some(Rc::new(data.catalog)),
                Err(err) => {
                    tracing::error!(error = %err, "failed to load projects or preferences");
                    None
                }
            }
        }
    });

    match catalog() {
        Some(Some(catalog)) => rsx! {
            Site { catalog, config }
        },
        _ => rsx! {
            document::Title { "{config.site_title}" }
        },
    }
}

#[component]
fn Site(catalog: Rc<Catalog>, config: SiteConfig) -> Element {
    let mut router = use_signal(|| {
        let mut router = ProjectRouter::new(catalog.clone(), config.media_base_url.clone());
        router.route_initial(current_fragment().as_deref(), config.default_section());
        router
    });
    let entries = use_hook(|| build_navigation(&catalog));

    let (current, content) = {
        let router = router.read();
        (
            router.current_slug().map(str::to_string),
            router.content().cloned(),
        )
    };

    rsx! {
        document::Title { "{config.site_title}" }
        div { class: "layout",
            Sidebar {
                title: config.site_title.clone(),
                entries,
                current,
                on_navigate: move |slug: String| {
                    router.write().render(&slug);
                },
            }
            main { id: "main-content", class: "main-content",
                if let Some(view) = content {
                    ProjectContent { view }
                }
            }
        }
        LightboxOverlay {}
    }
}

#[component]
fn ProjectContent(view: ContentView) -> Element {
    rsx! {
        div { class: "project", id: "{view.slug}",
            for (index, grid) in view.sections.into_iter().enumerate() {
                MediaGridView { key: "{index}", grid }
            }
        }
    }
}
