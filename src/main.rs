mod app;
mod config;
mod letterfall;
mod lightbox;
mod loader;
mod media;
mod projects;
mod router;
mod sidebar;
mod slug;

fn main() {
    dioxus::launch(app::App);
}
