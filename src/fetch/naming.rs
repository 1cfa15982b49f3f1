//! Content-addressed file naming for cached images.
//!
//! A cached image is named `img_<hash><ext>`, where `<hash>` is the first 10
//! hex characters of the MD5 digest of the URL and `<ext>` comes from the
//! URL path, the response `Content-Type`, or the `.jpg` fallback, in that
//! order.

use md5::{Digest, Md5};

/// Prefix shared by every cached image file.
pub const FILE_PREFIX: &str = "img_";

/// Number of hex characters of the digest kept in the file name.
pub const HASH_LEN: usize = 10;

/// Extension used when neither the URL nor the response names one.
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// URL suffixes trusted as image extensions.
pub const URL_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp"];

/// Short hex digest of a URL.
///
/// # Example
///
/// ```
/// use xhrpack::fetch::naming::url_hash;
///
/// let hash = url_hash("https://img.example/a.png");
/// assert_eq!(hash.len(), 10);
/// assert_eq!(hash, url_hash("https://img.example/a.png"));
/// ```
pub fn url_hash(url: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(url.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..HASH_LEN].to_string()
}

/// Builds the cache file name for a hash and extension (with leading dot).
pub fn file_name(hash: &str, ext: &str) -> String {
    format!("{FILE_PREFIX}{hash}{ext}")
}

/// Path component of a URL, without query or fragment.
fn url_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let url = &url[..end];

    match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            rest.find('/').map_or("", |slash| &rest[slash..])
        }
        None => url,
    }
}

/// Extension of the URL path's last segment, if it is a trusted image suffix.
///
/// Leading dots of the segment do not start an extension, so `/.png` has none.
///
/// # Example
///
/// ```
/// use xhrpack::fetch::naming::extension_from_url;
///
/// assert_eq!(extension_from_url("https://cdn.example/a/B.PNG?x=1"), Some(".png"));
/// assert_eq!(extension_from_url("https://cdn.example/a/file.php"), None);
/// assert_eq!(extension_from_url("https://cdn.example/image"), None);
/// ```
pub fn extension_from_url(url: &str) -> Option<&'static str> {
    let path = url_path(url);
    let segment = path.rsplit('/').next().unwrap_or(path);
    let stem_start = segment.len() - segment.trim_start_matches('.').len();
    let dot = segment[stem_start..].rfind('.')? + stem_start;
    let ext = segment[dot..].to_ascii_lowercase();

    URL_EXTENSIONS.iter().copied().find(|known| *known == ext)
}

/// Image extension for a `Content-Type` header value.
///
/// Parameters after `;` are ignored and matching is case-insensitive.
///
/// # Example
///
/// ```
/// use xhrpack::fetch::naming::extension_from_content_type;
///
/// assert_eq!(extension_from_content_type("image/webp"), Some(".webp"));
/// assert_eq!(extension_from_content_type("Image/JPEG; charset=binary"), Some(".jpg"));
/// assert_eq!(extension_from_content_type("text/html"), None);
/// ```
pub fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let ext = match mime.as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/bmp" | "image/x-ms-bmp" => ".bmp",
        "image/svg+xml" => ".svg",
        "image/tiff" => ".tiff",
        "image/x-icon" | "image/vnd.microsoft.icon" => ".ico",
        "image/avif" => ".avif",
        "image/heic" => ".heic",
        _ => return None,
    };
    Some(ext)
}

/// Resolves the extension for a download: URL suffix, then content type,
/// then [`DEFAULT_EXTENSION`].
pub fn resolve_extension(url: &str, content_type: Option<&str>) -> &'static str {
    extension_from_url(url)
        .or_else(|| content_type.and_then(extension_from_content_type))
        .unwrap_or(DEFAULT_EXTENSION)
}
