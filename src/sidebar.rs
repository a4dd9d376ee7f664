use dioxus::prelude::*;

use crate::projects::Catalog;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub slug: String,
    pub label: String,
    pub main: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub link: NavLink,
    pub submenu: Vec<NavLink>,
}

impl NavEntry {
    pub fn has_submenu(&self) -> bool {
        !self.submenu.is_empty()
    }
}

pub fn build_navigation(catalog: &Catalog) -> Vec<NavEntry> {
    catalog
        .projects()
        .iter()
        .map(|project| NavEntry {
            link: NavLink {
                slug: project.slug(),
                label: project.title.clone(),
                main: true,
            },
            submenu: project
                .sub_projects()
                .iter()
                .map(|sub| NavLink {
                    slug: sub.slug(),
                    label: sub.title.clone(),
                    main: false,
                })
                .collect(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    ToggledSubmenu { slug: String, open: bool },
    Navigate(String),
}

/// At most one submenu is open at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavController {
    open_submenu: Option<String>,
}

impl NavController {
    pub fn click(&mut self, link: &NavLink, has_submenu: bool) -> NavAction {
        if link.main && has_submenu {
            let open = self.open_submenu.as_deref() != Some(link.slug.as_str());
            self.open_submenu = open.then(|| link.slug.clone());
            return NavAction::ToggledSubmenu {
                slug: link.slug.clone(),
                open,
            };
        }
        NavAction::Navigate(link.slug.clone())
    }

    pub fn is_open(&self, slug: &str) -> bool {
        self.open_submenu.as_deref() == Some(slug)
    }
}

#[component]
pub fn Sidebar(
    title: String,
    entries: Vec<NavEntry>,
    current: Option<String>,
    on_navigate: EventHandler<String>,
) -> Element {
    let controller = use_signal(NavController::default);

    rsx! {
        aside { class: "sidebar",
            h1 { class: "sidebar-title", "{title}" }
            nav { aria_label: "Projects",
                ul { class: "main-nav",
                    for entry in entries {
                        li { key: "{entry.link.slug}", class: "main-nav-item",
                            SidebarLink {
                                link: entry.link.clone(),
                                has_submenu: entry.has_submenu(),
                                current: current.clone(),
                                controller,
                                on_navigate,
                            }
                            if entry.has_submenu() {
                                ul {
                                    class: submenu_class(controller.read().is_open(&entry.link.slug)),
                                    for link in entry.submenu.clone() {
                                        li { key: "{link.slug}",
                                            SidebarLink {
                                                link,
                                                has_submenu: false,
                                                current: current.clone(),
                                                controller,
                                                on_navigate,
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn submenu_class(open: bool) -> &'static str {
    if open {
        "sub-nav active"
    } else {
        "sub-nav"
    }
}

#[component]
fn SidebarLink(
    link: NavLink,
    has_submenu: bool,
    current: Option<String>,
    controller: Signal<NavController>,
    on_navigate: EventHandler<String>,
) -> Element {
    let mut controller = controller;
    let class = match (link.main, current.as_deref() == Some(link.slug.as_str())) {
        (true, true) => "main-nav-link current",
        (true, false) => "main-nav-link",
        (false, true) => "sub-nav-link current",
        (false, false) => "sub-nav-link",
    };
    let href = format!("#{}", link.slug);
    let slug = link.slug.clone();
    let label = link.label.clone();

    rsx! {
        a {
            href: "{href}",
            class,
            "data-slug": "{slug}",
            onclick: move |event| {
                event.prevent_default();
                let action = controller.write().click(&link, has_submenu);
                match action {
                    NavAction::Navigate(slug) => on_navigate.call(slug),
                    NavAction::ToggledSubmenu { slug, open } => {
                        tracing::debug!(%slug, open, "sidebar: toggle submenu");
                    }
                }
            },
            "{label}"
        }
    }
}
