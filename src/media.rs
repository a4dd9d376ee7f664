use dioxus::prelude::*;

use crate::lightbox::{open_lightbox, Lightbox};
use crate::projects::{MediaItem, Project};

#[derive(Clone, Debug, PartialEq)]
pub enum CellKind {
    Image,
    Video { poster: Option<String> },
}

/// One grid cell with its asset URLs already resolved against the media base.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaCell {
    pub kind: CellKind,
    pub src: String,
    pub alt: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MediaGrid {
    pub cells: Vec<MediaCell>,
    pub caption: Option<String>,
}

impl MediaGrid {
    pub fn for_project(project: &Project, media_base: &str) -> Self {
        let cells = project
            .media_items()
            .into_iter()
            .map(|item| MediaCell::new(item, &project.title, media_base))
            .collect();
        Self {
            cells,
            caption: project.caption().map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.caption.is_none()
    }
}

impl MediaCell {
    fn new(item: MediaItem, title: &str, media_base: &str) -> Self {
        let (kind, src) = match item {
            MediaItem::Image { src } => (CellKind::Image, src),
            MediaItem::Video { src, poster } => (
                CellKind::Video {
                    poster: poster.map(|poster| media_url(media_base, &poster)),
                },
                src,
            ),
        };
        Self {
            kind,
            src: media_url(media_base, &src),
            alt: title.to_string(),
        }
    }
}

pub fn media_url(base: &str, filename: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        filename.trim_start_matches('/')
    )
}

#[component]
pub fn MediaGridView(grid: MediaGrid) -> Element {
    rsx! {
        div { class: "project-section",
            div { class: "image-grid",
                for (index, cell) in grid.cells.into_iter().enumerate() {
                    MediaThumb { key: "{index}", cell }
                }
            }
            if let Some(caption) = grid.caption {
                p { class: "project-caption", "{caption}" }
            }
        }
    }
}

#[component]
fn MediaThumb(cell: MediaCell) -> Element {
    let lightbox = use_context::<Signal<Lightbox>>();
    let MediaCell { kind, src, alt } = cell.clone();

    rsx! {
        div { class: "thumb",
            {match kind {
                CellKind::Video { poster } => rsx! {
                    video {
                        src: "{src}",
                        poster,
                        controls: true,
                        preload: "metadata",
                        "controlslist": "nodownload",
                        draggable: "false",
                        aria_label: "{alt}",
                        oncontextmenu: move |event| event.prevent_default(),
                        // single clicks belong to the native controls
                        ondoubleclick: move |_| open_lightbox(lightbox, cell.clone()),
                    }
                },
                CellKind::Image => rsx! {
                    img {
                        src: "{src}",
                        alt: "{alt}",
                        loading: "lazy",
                        draggable: "false",
                        oncontextmenu: move |event| event.prevent_default(),
                        onclick: move |_| open_lightbox(lightbox, cell.clone()),
                    }
                },
            }}
        }
    }
}
