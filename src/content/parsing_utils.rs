use crate::content::frontmatter_format::{Delimiters, FrontmatterFormat};
use crate::error::PostDecodeError;

/// A post file split into its header and body, before any parsing of the header.
#[derive(Debug, PartialEq)]
pub struct RawPost<'a> {
    pub format: FrontmatterFormat,
    pub frontmatter: &'a str,
    pub body: &'a str,
}

/// Finds the frontmatter block at the start of `text`.
///
/// The first format whose opening marker matches wins. After that there is no fallback:
/// a YAML opener without a YAML closer is "not found", and a broken JSON object is a JSON error.
///
/// A multi-line TOML string may hold a line that reads exactly like the closing marker, so a
/// closing line only ends the header when `header_fits` accepts the text above it. If no closing
/// line is accepted the first one is used, and parsing that header reports the error.
pub fn split_frontmatter<F>(text: &str, header_fits: F) -> Result<RawPost<'_>, PostDecodeError>
    where F: Fn(FrontmatterFormat, &str) -> bool,
{
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    for format in FrontmatterFormat::ALL {
        let found = match format.delimiters() {
            Delimiters::Lines(open, close) => {
                let Some(after_open) = strip_marker_line(text, open) else {
                    continue;
                };
                split_delimited(after_open, close, |header| header_fits(format, header))
            }
            Delimiters::Braces => {
                if !text.starts_with('{') {
                    continue;
                }
                Some(split_json(text)?)
            }
        };

        return match found {
            Some((frontmatter, body)) => Ok(RawPost { format, frontmatter, body }),
            None => Err(PostDecodeError::frontmatter_not_found()),
        };
    }

    Err(PostDecodeError::frontmatter_not_found())
}

/// Returns what follows the first line when that line is exactly `marker`.
fn strip_marker_line<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let line = text.split_inclusive('\n').next()?;
    if line.trim_end() == marker && line.ends_with('\n') {
        Some(&text[line.len()..])
    } else {
        None
    }
}

fn split_delimited<'a>(text: &'a str, close: &str, header_fits: impl Fn(&str) -> bool) -> Option<(&'a str, &'a str)> {
    let mut first = None;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_end() == close {
            let frontmatter = &text[..offset];
            let body = strip_blank_line(&text[offset + line.len()..]);
            if header_fits(frontmatter) {
                return Some((frontmatter, body));
            }
            first.get_or_insert((frontmatter, body));
        }
        offset += line.len();
    }
    first
}

fn split_json(text: &str) -> Result<(&str, &str), PostDecodeError> {
    let mut stream = serde_json::Deserializer::from_str(text).into_iter::<serde_json::Value>();
    match stream.next() {
        Some(Ok(_)) => {}
        Some(Err(e)) => return Err(PostDecodeError::parser(FrontmatterFormat::Json, e)),
        None => return Err(PostDecodeError::frontmatter_not_found()),
    }

    let end = stream.byte_offset();
    let rest = &text[end..];
    // Drop whatever trails the closing brace on its line
    let rest = rest.trim_start_matches([' ', '\t']);
    let rest = strip_line_break(rest);
    Ok((&text[..end], strip_blank_line(rest)))
}

fn strip_line_break(text: &str) -> &str {
    text.strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
        .unwrap_or(text)
}

/// Removes the empty line written between the header and the content.
fn strip_blank_line(body: &str) -> &str {
    strip_line_break(body)
}

/// Content is required. Whitespace only counts as no content.
pub fn extract_content(body: &str) -> Result<&str, PostDecodeError> {
    if body.trim().is_empty() {
        return Err(PostDecodeError::content_not_found());
    }
    Ok(body)
}
