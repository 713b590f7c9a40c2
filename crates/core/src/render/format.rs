use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.*?)\*\*").expect("hard-coded pattern is valid")
});
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*(.*?)\*").expect("hard-coded pattern is valid")
});

/// Escapes text so it can be embedded in HTML content or attribute values.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Formats message text for the full panel.
///
/// Supports `**bold**`, `*emphasis*`, and bullet lists (lines starting
/// with `- ` or `• `). Every other non-blank line becomes a paragraph.
/// The input is escaped first.
pub fn format_rich(content: &str) -> String {
    let content = escape_html(content);
    let content = BOLD.replace_all(&content, "<strong>${1}</strong>");
    let content = EMPHASIS.replace_all(&content, "<em>${1}</em>");

    let mut formatted = String::new();
    let mut in_list = false;
    for line in content.split('\n') {
        let trimmed = line.trim();
        let item = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("• "));
        if let Some(item) = item {
            if !in_list {
                formatted.push_str("<ul>");
                in_list = true;
            }
            formatted.push_str("<li>");
            formatted.push_str(item);
            formatted.push_str("</li>");
            continue;
        }

        if in_list {
            formatted.push_str("</ul>");
            in_list = false;
        }
        if !trimmed.is_empty() {
            formatted.push_str("<p>");
            formatted.push_str(line);
            formatted.push_str("</p>");
        }
    }
    if in_list {
        formatted.push_str("</ul>");
    }

    if formatted.is_empty() {
        format!("<p>{content}</p>")
    } else {
        formatted
    }
}

/// Formats message text for the floating bubble: `**bold**` only, and
/// every line break starts a new paragraph. The result is meant to be
/// wrapped in a `<p>` element.
pub fn format_compact(content: &str) -> String {
    let content = escape_html(content);
    BOLD.replace_all(&content, "<strong>${1}</strong>")
        .replace('\n', "</p><p>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src=x onerror="alert('x')">&"#),
            "&lt;img src=x onerror=&quot;alert(&#39;x&#39;)&quot;&gt;&amp;"
        );
    }

    #[test]
    fn test_rich_inline() {
        assert_eq!(
            format_rich("**Free Plan** is *really* free"),
            "<p><strong>Free Plan</strong> is <em>really</em> free</p>"
        );
    }

    #[test]
    fn test_rich_lists_and_paragraphs() {
        let text = "Plans:\n\n- **Free**\n• Basic\n\nAll plans have a trial.";
        assert_eq!(
            format_rich(text),
            "<p>Plans:</p>\
             <ul><li><strong>Free</strong></li><li>Basic</li></ul>\
             <p>All plans have a trial.</p>"
        );
    }

    #[test]
    fn test_rich_list_at_end() {
        assert_eq!(format_rich("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_rich_blank() {
        assert_eq!(format_rich("\n \n"), "<p>\n \n</p>");
    }

    #[test]
    fn test_rich_escapes_markup() {
        assert_eq!(
            format_rich("<script>alert(1)</script>"),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_compact() {
        assert_eq!(
            format_compact("**Hi** there\nsecond <b>line</b>"),
            "<strong>Hi</strong> there</p><p>second &lt;b&gt;line&lt;/b&gt;"
        );
    }
}
