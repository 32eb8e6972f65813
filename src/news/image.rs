use regex::Regex;
use std::sync::OnceLock;

static IMG_SRC: OnceLock<Regex> = OnceLock::new();

/// Pulls the first `<img src>` URL out of an item's description HTML.
///
/// Best-effort pattern matching over whatever markup the feed embedded;
/// callers fall back to enclosure/media attributes and finally a placeholder
/// when nothing matches.
pub fn extract_image(description_html: &str) -> Option<String> {
    let pattern = IMG_SRC.get_or_init(|| {
        Regex::new(r#"<img[^>]+src=["']([^"']+)["']"#).expect("valid img pattern")
    });

    pattern
        .captures(description_html)
        .map(|captures| captures[1].to_string())
}
