#[cfg(test)]
mod tests;

use crate::mark::MarkedSource;
use crate::types::{Marker, RenderOptions};

/// Rebuilds `source` with every marked run wrapped in the configured delimiters.
///
/// A byte counts as marked when the marked copy holds the marker there and the original
/// does not, so marker characters that are part of the source are left alone. The original
/// text is always written, never the marker. In HTML mode the text is escaped and a marked
/// run is closed before each newline and reopened only when the text after it is still
/// marked, so the delimiters never span a line break.
pub fn render_marked(
    source: &str,
    marked: &MarkedSource,
    marker: Marker,
    options: &RenderOptions,
) -> String {
    let original = source.as_bytes();
    let marked = marked.as_bytes();
    let start_tokens = options.start_tokens.as_str();
    let end_tokens = options.end_tokens.as_str();

    let mut out = String::with_capacity(source.len());
    let mut in_match = false;

    // Marks cover whole tokens, which never split a char, so the first byte decides.
    for (idx, ch) in source.char_indices() {
        let Some(&marked_byte) = marked.get(idx) else {
            break;
        };
        let is_marked = marked_byte == marker.as_byte() && marked_byte != original[idx];

        if is_marked != in_match {
            out.push_str(if is_marked { start_tokens } else { end_tokens });
            in_match = is_marked;
        }

        if !options.html_encoded {
            out.push(ch);
        } else if in_match && ch == '\n' {
            // Reopened by the next marked byte, if any.
            out.push_str(end_tokens);
            out.push('\n');
            in_match = false;
        } else {
            push_html_escaped(&mut out, ch);
        }
    }

    if in_match {
        out.push_str(end_tokens);
    }
    out
}

fn push_html_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#x27;"),
        _ => out.push(ch),
    }
}
