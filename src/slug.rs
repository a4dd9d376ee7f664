use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const SEPARATOR: char = '-';

/// Turns a display title into a token usable as both an element id and a
/// URL fragment: diacritics stripped, lowercase ASCII letters and digits,
/// every other run collapsed into a single `-`, no leading or trailing `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    let folded = title
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase);

    for ch in folded {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.push(ch);
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;
    use pretty_assertions::assert_eq;

    #[test]
    fn folds_case_and_diacritics() {
        assert_eq!(slugify("Café"), "cafe");
        assert_eq!(slugify("cafe"), "cafe");
        assert_eq!(slugify("CAFE"), "cafe");
        assert_eq!(slugify("Ångström Über"), "angstrom-uber");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("A & B!!"), "a-b");
        assert_eq!(slugify("Hello---World"), "hello-world");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn trims_separators_and_keeps_digits() {
        assert_eq!(slugify("--2024 Archive--"), "2024-archive");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn is_idempotent() {
        for title in ["Café Society", "A & B!!", "Über-Projekt 3", "already-a-slug", "  "] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
        }
    }
}
