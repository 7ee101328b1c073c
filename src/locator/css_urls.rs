//! Best-effort `url()` scanning over raw CSS text
//!
//! This is not a CSS parser. It finds `url(` tokens in any text (stylesheet
//! bodies, `style` attributes, `<style>` element contents) and extracts the
//! reference each one wraps, tolerating malformed input by skipping what it
//! cannot delimit.

const URL_TOKEN: &[u8] = b"url(";

/// Iterator over the references wrapped by `url(...)` tokens
///
/// Yields slices of the input with surrounding whitespace and quotes removed.
/// A fresh iterator re-scans from the start.
#[derive(Debug, Clone)]
pub struct CssUrls<'a> {
    css: &'a str,
    cursor: usize,
}

/// Scan `css` for `url()` references
#[must_use]
pub fn css_urls(css: &str) -> CssUrls<'_> {
    CssUrls { css, cursor: 0 }
}

impl<'a> Iterator for CssUrls<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.css.as_bytes();

        loop {
            let rest = bytes.get(self.cursor..)?;
            let offset = rest
                .windows(URL_TOKEN.len())
                .position(|window| window.eq_ignore_ascii_case(URL_TOKEN))?;
            let start = self.cursor + offset + URL_TOKEN.len();

            match delimit_reference(bytes, start) {
                Some((value_start, value_end, resume)) => {
                    self.cursor = resume;
                    let value = self.css[value_start..value_end].trim();
                    if !value.is_empty() {
                        return Some(value);
                    }
                }
                None => self.cursor = start,
            }
        }
    }
}

/// Locate the reference that starts right after a `url(` token
///
/// Returns `(value_start, value_end, resume_at)` or `None` when the token
/// cannot be closed.
fn delimit_reference(bytes: &[u8], start: usize) -> Option<(usize, usize, usize)> {
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }

    match *bytes.get(i)? {
        quote @ (b'"' | b'\'') => {
            // Quoted references may legally contain `;`, `)` and `}`.
            let value_start = i + 1;
            let value_end = value_start + bytes[value_start..].iter().position(|&b| b == quote)?;
            let after_quote = value_end + 1;
            let resume = bytes[after_quote..]
                .iter()
                .position(|&b| matches!(b, b')' | b'}' | b'\n'))
                .map_or(bytes.len(), |p| after_quote + p + 1);
            Some((value_start, value_end, resume))
        }
        _ => {
            // Unquoted references end at the first `)`, which must come
            // before the enclosing block or line ends.
            let bound = bytes[i..]
                .iter()
                .position(|&b| b == b'}' || b == b'\n')
                .map_or(bytes.len(), |p| i + p);
            let close = i + bytes[i..bound].iter().position(|&b| b == b')')?;
            Some((i, close, close + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(css: &str) -> Vec<&str> {
        css_urls(css).collect()
    }

    #[test]
    fn test_reference_between_parens() {
        assert_eq!(
            collect("background:url(/img/logo.png) no-repeat"),
            vec!["/img/logo.png"]
        );
    }

    #[test]
    fn test_full_declaration_block() {
        let css = "div#test { background:url(/images/srpr/logo11w.png) \
                   no-repeat;background-size:269px 95px;height:95px;width:269px }";

        assert_eq!(collect(css), vec!["/images/srpr/logo11w.png"]);
    }

    #[test]
    fn test_quotes_are_stripped() {
        assert_eq!(
            collect(r#"a { background: url("a.png") } b { background: url('b.png') }"#),
            vec!["a.png", "b.png"]
        );
    }

    #[test]
    fn test_multiple_urls_in_one_declaration() {
        assert_eq!(
            collect("background-image: url(a.png), url(b.png);"),
            vec!["a.png", "b.png"]
        );
    }

    #[test]
    fn test_import_and_font_face() {
        let css = "@import url(\"theme.css\");\n\
                   @font-face { src: url(fonts/x.woff2) format(\"woff2\"), url(fonts/x.woff) format(\"woff\"); }";

        assert_eq!(collect(css), vec!["theme.css", "fonts/x.woff2", "fonts/x.woff"]);
    }

    #[test]
    fn test_whitespace_inside_parens() {
        assert_eq!(collect("background: url(  spaced.png  );"), vec!["spaced.png"]);
    }

    #[test]
    fn test_token_is_case_insensitive() {
        assert_eq!(collect("background: URL(upper.png);"), vec!["upper.png"]);
    }

    #[test]
    fn test_unquoted_data_uri_is_kept_whole() {
        assert_eq!(
            collect("background: url(data:image/png;base64,aGVsbG8=);"),
            vec!["data:image/png;base64,aGVsbG8="]
        );
    }

    #[test]
    fn test_quoted_reference_with_parens() {
        assert_eq!(collect(r#"background: url("img/a(1).png");"#), vec!["img/a(1).png"]);
    }

    #[test]
    fn test_unclosed_token_is_skipped() {
        assert_eq!(
            collect("a { background: url(broken.png }\nb { background: url(ok.png) }"),
            vec!["ok.png"]
        );
    }

    #[test]
    fn test_empty_references_are_skipped() {
        assert_eq!(collect("a { background: url() } b { background: url('') }"), Vec::<&str>::new());
    }

    #[test]
    fn test_no_tokens() {
        assert!(collect("body { color: red; }").is_empty());
        assert!(collect("").is_empty());
        assert!(collect("url(").is_empty());
    }

    #[test]
    fn test_input_is_not_consumed() {
        let css = "a { background: url(a.png) }";
        let urls = css_urls(css);

        assert_eq!(urls.clone().count(), 1);
        assert_eq!(urls.count(), 1);
    }
}
