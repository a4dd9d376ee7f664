use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use gloo_timers::future::TimeoutFuture;

use crate::media::{CellKind, MediaCell};

pub const LIGHTBOX_VIDEO_ID: &str = "lightbox-video";
const BODY_OPEN_CLASS: &str = "lightbox-open";
#[cfg(target_arch = "wasm32")]
const CLOSE_TRANSITION_MS: u32 = 300;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Hidden,
    Opening,
    Visible,
}

/// Page-wide overlay state. The overlay element exists from the first `open`
/// onwards and is reused; each `open` swaps its content.
///
/// Every open/close bumps `generation`, so deferred work scheduled for an
/// earlier transition can tell it has been superseded. `opened` only moves on
/// `open` and identifies the media element, which must survive a close.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lightbox {
    mounted: bool,
    content: Option<MediaCell>,
    phase: Phase,
    generation: u64,
    opened: u64,
}

impl Lightbox {
    pub fn open(&mut self, media: MediaCell) -> u64 {
        self.mounted = true;
        self.content = Some(media);
        self.phase = Phase::Opening;
        self.opened += 1;
        self.generation += 1;
        self.generation
    }

    /// Applies the fade-in for the open identified by `ticket`.
    pub fn reveal(&mut self, ticket: u64) -> bool {
        if self.generation != ticket || self.phase != Phase::Opening {
            return false;
        }
        self.phase = Phase::Visible;
        true
    }

    /// Returns the ticket to hand to `should_pause` once the close transition
    /// has finished, or `None` if nothing was open.
    pub fn close(&mut self) -> Option<u64> {
        if !self.is_open() {
            return None;
        }
        self.phase = Phase::Hidden;
        self.generation += 1;
        Some(self.generation)
    }

    pub fn should_pause(&self, ticket: u64) -> bool {
        self.generation == ticket && self.phase == Phase::Hidden
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_open(&self) -> bool {
        self.phase != Phase::Hidden
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Visible
    }

    pub fn content(&self) -> Option<&MediaCell> {
        self.content.as_ref()
    }

    pub fn opened(&self) -> u64 {
        self.opened
    }
}

pub fn open_lightbox(mut lightbox: Signal<Lightbox>, media: MediaCell) {
    let ticket = lightbox.write().open(media);
    tracing::debug!(ticket, "lightbox: open");
    set_scroll_lock(true);

    #[cfg(target_arch = "wasm32")]
    spawn(async move {
        if let Err(err) = next_animation_frame().await {
            tracing::warn!(%err, "lightbox: animation frame unavailable");
        }
        lightbox.write().reveal(ticket);
    });
    #[cfg(not(target_arch = "wasm32"))]
    {
        lightbox.write().reveal(ticket);
    }
}

pub fn close_lightbox(mut lightbox: Signal<Lightbox>) {
    let Some(ticket) = lightbox.write().close() else {
        return;
    };
    tracing::debug!(ticket, "lightbox: close");
    set_scroll_lock(false);

    #[cfg(target_arch = "wasm32")]
    spawn(async move {
        TimeoutFuture::new(CLOSE_TRANSITION_MS).await;
        if lightbox.peek().should_pause(ticket) {
            pause_overlay_video();
        }
    });
}

#[component]
pub fn LightboxOverlay() -> Element {
    let lightbox = use_context::<Signal<Lightbox>>();
    let (mounted, active, content, opened) = {
        let state = lightbox.read();
        (
            state.is_mounted(),
            state.is_active(),
            state.content().cloned(),
            state.opened(),
        )
    };

    if !mounted {
        return rsx! {};
    }

    let class = if active { "lightbox active" } else { "lightbox" };
    rsx! {
        div {
            id: "lightbox",
            class: "{class}",
            onclick: move |_| close_lightbox(lightbox),
            button {
                class: "lightbox-close",
                aria_label: "Close",
                onclick: move |event| {
                    event.stop_propagation();
                    close_lightbox(lightbox);
                },
                "×"
            }
            div { class: "lightbox-content",
                if let Some(MediaCell { kind, src, alt }) = content {
                    {match kind {
                        CellKind::Video { poster } => rsx! {
                            video {
                                key: "{opened}",
                                id: LIGHTBOX_VIDEO_ID,
                                src: "{src}",
                                poster,
                                controls: true,
                                autoplay: true,
                                aria_label: "{alt}",
                                onclick: move |event| event.stop_propagation(),
                            }
                        },
                        CellKind::Image => rsx! {
                            img {
                                src: "{src}",
                                alt: "{alt}",
                                onclick: move |event| event.stop_propagation(),
                            }
                        },
                    }}
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn set_scroll_lock(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        tracing::warn!("lightbox: document body missing");
        return;
    };
    let classes = body.class_list();
    let result = if locked {
        classes.add_1(BODY_OPEN_CLASS)
    } else {
        classes.remove_1(BODY_OPEN_CLASS)
    };
    if result.is_err() {
        tracing::warn!(locked, "lightbox: scroll lock toggle failed");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn set_scroll_lock(locked: bool) {
    tracing::trace!(locked, class = BODY_OPEN_CLASS, "lightbox: scroll lock");
}

/// Resolves on the next `requestAnimationFrame` callback.
#[cfg(target_arch = "wasm32")]
async fn next_animation_frame() -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let mut scheduled = Ok(());
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Err(err) = window.request_animation_frame(&resolve) {
            scheduled = Err(format!("{err:?}"));
            let _ = resolve.call0(&wasm_bindgen::JsValue::NULL);
        }
    });
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|err| format!("{err:?}"))?;
    scheduled
}

#[cfg(target_arch = "wasm32")]
fn pause_overlay_video() {
    use wasm_bindgen::JsCast;

    let video = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(LIGHTBOX_VIDEO_ID))
        .and_then(|element| element.dyn_into::<web_sys::HtmlVideoElement>().ok());
    if let Some(video) = video {
        if video.pause().is_err() {
            tracing::warn!("lightbox: video pause failed");
        }
    }
}
