//! Case-insensitive slicing of raw HTML documents.
//! Isolates the `<style>` and `<table>` blocks so the markup reader never sees
//! scripts or other content that is not well-formed enough to tokenize.

/// Finds the first `<tag ...>` opening tag at or after `from`.
/// Returns the byte offsets of the `<` and of the byte after the closing `>`.
fn find_open_tag(lower: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let pattern = format!("<{}", tag);
    let mut cursor = from;
    while let Some(offset) = lower.get(cursor..)?.find(&pattern) {
        let start = cursor + offset;
        let after_name = start + pattern.len();
        match lower.as_bytes().get(after_name) {
            Some(b'>') | Some(b'/') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') => {
                let open_end = lower[after_name..].find('>')? + after_name + 1;
                return Some((start, open_end));
            }
            // `<tablex` or `<styles` are different elements
            _ => cursor = after_name,
        }
    }
    None
}

/// Returns the whole first `<tag>...</tag>` element, tags included.
/// An element that is never closed runs to the end of the document.
pub(crate) fn element_block<'a>(html: &'a str, tag: &str) -> Option<&'a str> {
    // ASCII lowercasing keeps byte offsets aligned with the original text
    let lower = html.to_ascii_lowercase();
    let tag = tag.to_ascii_lowercase();
    let (start, open_end) = find_open_tag(&lower, &tag, 0)?;
    let close = format!("</{}", tag);
    let end = match lower[open_end..].find(&close) {
        Some(offset) => {
            let close_start = open_end + offset;
            lower[close_start..]
                .find('>')
                .map(|gt| close_start + gt + 1)
                .unwrap_or(html.len())
        }
        None => html.len(),
    };
    Some(&html[start..end])
}

/// Returns the content between the first `<tag ...>` and its `</tag>`.
pub(crate) fn element_inner<'a>(html: &'a str, tag: &str) -> Option<&'a str> {
    let lower = html.to_ascii_lowercase();
    let tag = tag.to_ascii_lowercase();
    let (_, open_end) = find_open_tag(&lower, &tag, 0)?;
    let close = format!("</{}", tag);
    let end = lower[open_end..]
        .find(&close)
        .map(|offset| open_end + offset)
        .unwrap_or(html.len());
    Some(&html[open_end..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_includes_tags() {
        let html = "<html><body><p>x</p><TABLE class=\"waffle\"><tr><td>1</td></tr></Table><script>a<b</script>";
        assert_eq!(
            element_block(html, "table"),
            Some("<TABLE class=\"waffle\"><tr><td>1</td></tr></Table>")
        );
    }

    #[test]
    fn block_skips_longer_tag_names() {
        let html = "<tablex>no</tablex><table><tr></tr></table>";
        assert_eq!(element_block(html, "table"), Some("<table><tr></tr></table>"));
    }

    #[test]
    fn block_unclosed_runs_to_end() {
        let html = "<table><tr><td>open";
        assert_eq!(element_block(html, "table"), Some("<table><tr><td>open"));
    }

    #[test]
    fn block_missing() {
        assert_eq!(element_block("<div>nothing</div>", "table"), None);
        assert_eq!(element_inner("", "style"), None);
    }

    #[test]
    fn inner_of_style() {
        let html = "<head><style type=\"text/css\">.s0{background-color:#fff;}</style></head>";
        assert_eq!(element_inner(html, "style"), Some(".s0{background-color:#fff;}"));
    }

    #[test]
    fn non_ascii_text_keeps_offsets() {
        let html = "<p>Gebäude Türen</p><table><tr><td>Wände</td></tr></table>";
        assert_eq!(
            element_block(html, "table"),
            Some("<table><tr><td>Wände</td></tr></table>")
        );
    }
}
