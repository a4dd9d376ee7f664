use std::rc::Rc;

use crate::media::MediaGrid;
use crate::projects::{Catalog, Project, Resolved};
use crate::slug::slugify;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RouteState {
    #[default]
    Unresolved,
    Resolved(String),
}

/// What the main content area shows for the current route.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentView {
    pub slug: String,
    pub sections: Vec<MediaGrid>,
}

impl ContentView {
    /// Sub-projects inline in source order, then the project's own grid.
    fn for_project(slug: &str, project: &Project, media_base: &str) -> Self {
        let mut sections: Vec<MediaGrid> = project
            .sub_projects()
            .iter()
            .map(|sub| MediaGrid::for_project(sub, media_base))
            .collect();
        let own = MediaGrid::for_project(project, media_base);
        if sections.is_empty() || !own.is_empty() {
            sections.push(own);
        }
        Self {
            slug: slug.to_string(),
            sections,
        }
    }

    fn for_sub_project(slug: &str, project: &Project, media_base: &str) -> Self {
        Self {
            slug: slug.to_string(),
            sections: vec![MediaGrid::for_project(project, media_base)],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectRouter {
    catalog: Rc<Catalog>,
    media_base: String,
    state: RouteState,
    content: Option<ContentView>,
}

impl ProjectRouter {
    pub fn new(catalog: Rc<Catalog>, media_base: impl Into<String>) -> Self {
        Self {
            catalog,
            media_base: media_base.into(),
            state: RouteState::Unresolved,
            content: None,
        }
    }

    /// Resolves `slug` and swaps the main content. An unknown slug leaves the
    /// current route and content untouched.
    pub fn render(&mut self, slug: &str) -> bool {
        let view = match self.catalog.resolve(slug) {
            Some(Resolved::Project(project)) => {
                ContentView::for_project(slug, project, &self.media_base)
            }
            Some(Resolved::SubProject { parent, project }) => {
                tracing::debug!(slug, parent = %parent.title, "router: nested match");
                ContentView::for_sub_project(slug, project, &self.media_base)
            }
            None => {
                tracing::warn!(slug, "router: no project matches slug");
                return false;
            }
        };

        tracing::debug!(slug, sections = view.sections.len(), "router: render");
        self.content = Some(view);
        self.state = RouteState::Resolved(slug.to_string());
        replace_fragment(slug);
        true
    }

    /// Routes to the URL fragment when there is one, otherwise to the
    /// top-level project titled exactly `default_section`.
    pub fn route_initial(&mut self, fragment: Option<&str>, default_section: Option<&str>) -> bool {
        if let Some(fragment) = fragment.filter(|value| !value.is_empty()) {
            return self.render(fragment);
        }
        let Some(title) = default_section.filter(|value| !value.is_empty()) else {
            return false;
        };
        let Some(slug) = self.catalog.find_by_title(title).map(|project| slugify(&project.title))
        else {
            tracing::debug!(title, "router: default section not in catalog");
            return false;
        };
        self.render(&slug)
    }

    pub fn state(&self) -> &RouteState {
        &self.state
    }

    pub fn current_slug(&self) -> Option<&str> {
        match self.state() {
            RouteState::Resolved(slug) => Some(slug),
            RouteState::Unresolved => None,
        }
    }

    pub fn content(&self) -> Option<&ContentView> {
        self.content.as_ref()
    }
}

#[cfg(target_arch = "wasm32")]
pub fn current_fragment() -> Option<String> {
    let hash = web_sys::window()?.location().hash().ok()?;
    let raw = hash.trim_start_matches('#');
    if raw.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(raw)
        .map(|value| value.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    Some(decoded)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_fragment() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
fn replace_fragment(slug: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let history = match window.history() {
        Ok(history) => history,
        Err(_) => {
            tracing::warn!("router: history unavailable");
            return;
        }
    };
    let url = format!("#{}", urlencoding::encode(slug));
    if history
        .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
        .is_err()
    {
        tracing::warn!(slug, "router: replaceState failed");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn replace_fragment(slug: &str) {
    tracing::trace!(slug, "router: replace fragment");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{CellKind, MediaCell};
    use crate::projects::tests::sample_catalog;
    use pretty_assertions::assert_eq;

    fn router() -> ProjectRouter {
        ProjectRouter::new(Rc::new(sample_catalog()), "/images")
    }

    fn sources(view: &ContentView) -> Vec<Vec<&str>> {
        view.sections
            .iter()
            .map(|grid| grid.cells.iter().map(|cell| cell.src.as_str()).collect())
            .collect()
    }

    #[test]
    fn starts_unresolved() {
        let router = router();
        assert_eq!(router.state(), &RouteState::Unresolved);
        assert_eq!(router.content(), None);
    }

    #[test]
    fn renders_top_level_project_cells_in_order() {
        let mut router = router();
        assert!(router.render("projects"));

        let view = router.content().unwrap();
        assert_eq!(view.slug, "projects");
        assert_eq!(view.sections.len(), 1);
        assert_eq!(
            view.sections[0].cells,
            vec![
                MediaCell {
                    kind: CellKind::Image,
                    src: "/images/one.jpg".into(),
                    alt: "Projects".into(),
                },
                MediaCell {
                    kind: CellKind::Image,
                    src: "/images/two.jpg".into(),
                    alt: "Projects".into(),
                },
            ]
        );
        assert_eq!(router.current_slug(), Some("projects"));
    }

    #[test]
    fn parent_renders_sub_projects_then_own_media() {
        let mut router = router();
        assert!(router.render("films"));
        assert_eq!(
            sources(router.content().unwrap()),
            vec![
                vec!["/images/night-1.jpg", "/images/night-2.jpg"],
                vec!["/images/cafe.jpg"],
                vec!["/images/reel.mp4"],
            ]
        );
    }

    #[test]
    fn nested_slug_renders_only_that_sub_project() {
        let mut router = router();
        assert!(router.render("night-shift"));

        let view = router.content().unwrap();
        assert_eq!(
            sources(view),
            vec![vec!["/images/night-1.jpg", "/images/night-2.jpg"]]
        );
        assert!(view.sections[0]
            .cells
            .iter()
            .all(|cell| cell.alt == "Night Shift"));
    }

    #[test]
    fn unknown_slug_changes_nothing() {
        let mut router = router();
        router.render("projects");
        let before = router.clone();

        assert!(!router.render("does-not-exist"));
        assert_eq!(router, before);
    }

    #[test]
    fn initial_route_prefers_fragment() {
        let mut router = router();
        assert!(router.route_initial(Some("night-shift"), Some("Projects")));
        assert_eq!(router.current_slug(), Some("night-shift"));
    }

    #[test]
    fn initial_route_falls_back_to_default_section() {
        let mut router = router();
        assert!(router.route_initial(None, Some("Projects")));
        assert_eq!(router.current_slug(), Some("projects"));

        let mut router = self::router();
        assert!(router.route_initial(Some(""), Some("Films")));
        assert_eq!(router.current_slug(), Some("films"));
    }

    #[test]
    fn default_section_needs_exact_title() {
        let mut router = router();
        assert!(!router.route_initial(None, Some("projects")));
        assert!(!router.route_initial(None, None));
        assert_eq!(router.state(), &RouteState::Unresolved);
    }

    #[test]
    fn empty_project_still_renders_an_empty_grid() {
        let mut router = router();
        assert!(router.render("about"));
        let view = router.content().unwrap();
        assert_eq!(view.sections.len(), 1);
        assert!(view.sections[0].is_empty());
    }
}
