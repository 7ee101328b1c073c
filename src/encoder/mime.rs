//! MIME type inference from URL file extensions.

/// MIME type used when no recognizable extension exists
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

/// Derive a MIME type from the file extension of a URL path
///
/// Query strings and fragments are ignored and extensions are matched
/// case-insensitively. Total: any input yields a MIME type, falling back to
/// [`DEFAULT_MIME_TYPE`].
#[must_use]
pub fn mime_type_of(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let file_name = path.rsplit('/').next().unwrap_or_default();

    let Some((_, extension)) = file_name.rsplit_once('.') else {
        return DEFAULT_MIME_TYPE;
    };
    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return DEFAULT_MIME_TYPE;
    }

    lookup_extension(&extension.to_ascii_lowercase()).unwrap_or(DEFAULT_MIME_TYPE)
}

fn lookup_extension(extension: &str) -> Option<&'static str> {
    let mime = match extension {
        // Documents
        "html" | "htm" | "shtml" => "text/html",
        "xhtml" => "application/xhtml+xml",
        "xml" => "application/xml",
        "txt" | "text" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "pdf" => "application/pdf",

        // Stylesheets and scripts
        "css" => "text/css",
        "js" | "mjs" | "cjs" => "text/javascript",
        "json" | "map" => "application/json",
        "jsonld" => "application/ld+json",
        "wasm" => "application/wasm",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" | "svgz" => "image/svg+xml",
        "ico" => "image/vnd.microsoft.icon",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "apng" => "image/apng",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "eot" => "application/vnd.ms-fontobject",

        // Media
        "mp3" => "audio/mpeg",
        "ogg" | "oga" => "audio/ogg",
        "wav" => "audio/wav",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "ogv" => "video/ogg",

        _ => return None,
    };
    Some(mime)
}

/// Compact a `Content-Type` header value for use inside a data URI
///
/// `text/css; charset=UTF-8` becomes `text/css;charset=UTF-8`: data URI
/// media types allow parameters but not the whitespace HTTP permits.
#[must_use]
pub fn normalize_content_type(header: &str) -> String {
    header
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(";")
}

/// Whether a MIME type names binary content that must never be text-decoded
#[must_use]
pub fn is_binary_mime_type(mime_type: &str) -> bool {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == "image/svg+xml" {
        return false;
    }

    ["image/", "audio/", "video/", "font/"]
        .iter()
        .any(|prefix| essence.starts_with(prefix))
        || matches!(
            essence.as_str(),
            "application/octet-stream"
                | "application/pdf"
                | "application/wasm"
                | "application/zip"
                | "application/vnd.ms-fontobject"
                | "application/font-woff"
                | "application/x-font-ttf"
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_is_text_html() {
        assert_eq!(mime_type_of("https://sometest.com/index.html"), "text/html");
        assert_eq!(mime_type_of("a/b/index.html"), "text/html");
    }

    #[test]
    fn test_png_is_image_png() {
        assert_eq!(mime_type_of("https://sometest.com/images/test.png"), "image/png");
    }

    #[test]
    fn test_unknown_defaults_to_text_plain() {
        assert_eq!(mime_type_of("can you explain this?"), "text/plain");
        assert_eq!(mime_type_of("no extension at all"), "text/plain");
        assert_eq!(mime_type_of(""), "text/plain");
        assert_eq!(mime_type_of("archive.unknownext"), "text/plain");
    }

    #[test]
    fn test_query_and_fragment_are_ignored() {
        assert_eq!(mime_type_of("/css/site.css?v=1.2.3"), "text/css");
        assert_eq!(mime_type_of("/icons.svg#home"), "image/svg+xml");
        assert_eq!(mime_type_of("/download?file=logo.png"), "text/plain");
    }

    #[test]
    fn test_dot_in_directory_is_not_an_extension() {
        assert_eq!(mime_type_of("https://cdn.example.com/assets.v2/bundle"), "text/plain");
    }

    #[test]
    fn test_extension_case_is_ignored() {
        assert_eq!(mime_type_of("PHOTO.JPG"), "image/jpeg");
    }

    #[test]
    fn test_binary_detection() {
        assert!(is_binary_mime_type("image/png"));
        assert!(is_binary_mime_type("font/woff2"));
        assert!(is_binary_mime_type("application/octet-stream"));
        assert!(!is_binary_mime_type("image/svg+xml"));
        assert!(!is_binary_mime_type("text/css;charset=utf-8"));
        assert!(!is_binary_mime_type("text/javascript"));
    }
}
