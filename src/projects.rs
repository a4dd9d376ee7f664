use serde::Deserialize;
use serde_json::Value;

use crate::slug::slugify;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawMediaItem")]
pub enum MediaItem {
    Image { src: String },
    Video { src: String, poster: Option<String> },
}

// Wire shapes seen in projects.json: a bare filename, or an object with an
// optional `type` discriminant.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMediaItem {
    Bare(String),
    Entry {
        #[serde(rename = "type", default)]
        kind: Option<String>,
        src: String,
        #[serde(default)]
        poster: Option<String>,
    },
}

impl From<RawMediaItem> for MediaItem {
    fn from(raw: RawMediaItem) -> Self {
        match raw {
            RawMediaItem::Bare(src) => MediaItem::Image { src },
            RawMediaItem::Entry { kind, src, poster } => match kind.as_deref() {
                Some("video") => MediaItem::Video {
                    src,
                    poster: poster.filter(|value| !value.is_empty()),
                },
                _ => MediaItem::Image { src },
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub media: Option<Vec<MediaItem>>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default, rename = "projects")]
    pub sub_projects: Option<Vec<Project>>,
}

impl Project {
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref().filter(|caption| !caption.is_empty())
    }

    /// `media` wins when present; the legacy `images` list is read as images.
    pub fn media_items(&self) -> Vec<MediaItem> {
        match (&self.media, &self.images) {
            (Some(media), _) => media.clone(),
            (None, Some(images)) => images
                .iter()
                .map(|src| MediaItem::Image { src: src.clone() })
                .collect(),
            (None, None) => Vec::new(),
        }
    }

    pub fn sub_projects(&self) -> &[Project] {
        self.sub_projects.as_deref().unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolved<'a> {
    Project(&'a Project),
    SubProject {
        parent: &'a Project,
        project: &'a Project,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Top-level titles are checked before any sub-project; within each tier
    /// the first match in source order wins.
    pub fn resolve(&self, slug: &str) -> Option<Resolved<'_>> {
        if let Some(project) = self.projects.iter().find(|project| project.slug() == slug) {
            return Some(Resolved::Project(project));
        }
        self.projects.iter().find_map(|parent| {
            parent
                .sub_projects()
                .iter()
                .find(|project| project.slug() == slug)
                .map(|project| Resolved::SubProject { parent, project })
        })
    }

    pub fn find_by_title(&self, title: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.title == title)
    }
}

/// Fetched alongside the catalog and kept as-is; nothing reads individual keys.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Preferences(Value);

impl Preferences {
    pub fn key_count(&self) -> usize {
        self.0.as_object().map(|map| map.len()).unwrap_or(0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) fn sample_catalog() -> Catalog {
        serde_json::from_str(
            r#"[
                {
                    "title": "Projects",
                    "caption": "Selected work",
                    "images": ["one.jpg", "two.jpg"]
                },
                {
                    "title": "Films",
                    "media": [
                        { "type": "video", "src": "reel.mp4", "poster": "reel.jpg" }
                    ],
                    "projects": [
                        { "title": "Night Shift", "images": ["night-1.jpg", "night-2.jpg"] },
                        { "title": "Café Études", "media": ["cafe.jpg"], "caption": "" }
                    ]
                },
                { "title": "About" }
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn decodes_every_media_shape() {
        let items: Vec<MediaItem> = serde_json::from_str(
            r#"[
                "bare.jpg",
                { "src": "untyped.jpg" },
                { "type": "image", "src": "typed.jpg" },
                { "type": "video", "src": "clip.mp4", "poster": "clip.jpg" },
                { "type": "video", "src": "plain.mp4" }
            ]"#,
        )
        .unwrap();

        assert_eq!(
            items,
            vec![
                MediaItem::Image { src: "bare.jpg".into() },
                MediaItem::Image { src: "untyped.jpg".into() },
                MediaItem::Image { src: "typed.jpg".into() },
                MediaItem::Video {
                    src: "clip.mp4".into(),
                    poster: Some("clip.jpg".into()),
                },
                MediaItem::Video {
                    src: "plain.mp4".into(),
                    poster: None,
                },
            ]
        );
    }

    #[test]
    fn media_takes_precedence_over_legacy_images() {
        let project: Project = serde_json::from_str(
            r#"{ "title": "Both", "media": ["new.jpg"], "images": ["old.jpg"] }"#,
        )
        .unwrap();
        assert_eq!(
            project.media_items(),
            vec![MediaItem::Image { src: "new.jpg".into() }]
        );
    }

    #[test]
    fn missing_media_is_empty_not_an_error() {
        let catalog = sample_catalog();
        let about = catalog.find_by_title("About").unwrap();
        assert!(about.media_items().is_empty());
        assert!(about.sub_projects().is_empty());
        assert_eq!(about.caption(), None);
    }

    #[test]
    fn resolves_top_level_before_nested() {
        let catalog = sample_catalog();

        match catalog.resolve("projects") {
            Some(Resolved::Project(project)) => assert_eq!(project.title, "Projects"),
            other => panic!("unexpected resolution: {other:?}"),
        }

        match catalog.resolve("cafe-etudes") {
            Some(Resolved::SubProject { parent, project }) => {
                assert_eq!(parent.title, "Films");
                assert_eq!(project.title, "Café Études");
            }
            other => panic!("unexpected resolution: {other:?}"),
        }

        assert_eq!(catalog.resolve("missing"), None);
    }

    #[test]
    fn top_level_match_shadows_same_slug_sub_project() {
        let catalog: Catalog = serde_json::from_str(
            r#"[
                { "title": "Series", "projects": [{ "title": "Prints" }] },
                { "title": "Prints", "images": ["p.jpg"] }
            ]"#,
        )
        .unwrap();
        assert_eq!(
            catalog.resolve("prints"),
            Some(Resolved::Project(&catalog.projects()[1]))
        );
    }

    #[test]
    fn preferences_stay_opaque() {
        let prefs: Preferences =
            serde_json::from_str(r#"{ "theme": "light", "columns": 3 }"#).unwrap();
        assert_eq!(prefs.key_count(), 2);
        assert_eq!(Preferences::default().key_count(), 0);
    }
}
