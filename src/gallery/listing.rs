use serde::Serialize;

/// Image extensions shown in the gallery by default.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Path prefix of the transcoding endpoint.
pub const IMAGE_ROUTE_PREFIX: &str = "/image/";

/// One image in a gallery listing.
///
/// Recomputed on every request; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryEntry {
    /// Object key in the bucket
    pub key: String,

    /// Time-limited signed link to the original, `None` when credentials
    /// were unavailable
    pub original_url: Option<String>,

    /// Path of the transcoded preview, always `/image/<key>`
    #[serde(rename = "optimized_url")]
    pub transcoded_url: String,
}

impl GalleryEntry {
    /// Build an entry for `key`.
    pub fn new(key: impl Into<String>, original_url: Option<String>) -> Self {
        let key = key.into();
        let transcoded_url = transcoded_path(&key);
        Self {
            key,
            original_url,
            transcoded_url,
        }
    }
}

/// Path of the transcoding endpoint for a key.
pub fn transcoded_path(key: &str) -> String {
    format!("{}{}", IMAGE_ROUTE_PREFIX, key)
}

/// Decide which keys show up in the gallery.
#[derive(Debug, Clone)]
pub struct ImageFilter {
    extensions: Vec<String>,
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_EXTENSIONS.iter().copied())
    }
}

impl ImageFilter {
    /// Create a filter accepting the given extensions.
    ///
    /// Extensions are matched case-insensitively; a leading dot is ignored.
    pub fn new<I, E>(extensions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { extensions }
    }

    /// Accepted extensions, lowercased.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether `key` names an image the gallery should show.
    ///
    /// Folder markers (keys ending in `/`) and keys without an accepted
    /// extension are rejected.
    pub fn accepts(&self, key: &str) -> bool {
        if key.is_empty() || key.ends_with('/') {
            return false;
        }

        match extension(key) {
            Some(ext) => self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

/// Extension of the last path segment, without the dot.
fn extension(key: &str) -> Option<&str> {
    let file_name = key.rsplit('/').next()?;
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}
