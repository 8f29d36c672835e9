// src/core/sanitize.rs

/// Escape text for an HTML text node or a double-quoted attribute.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Collapse runs of whitespace (including newlines) to single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Make a user-supplied prefix safe to use as a file stem.
/// Whitespace becomes '_', anything outside [A-Za-z0-9_-] is dropped.
pub fn sanitize_file_stem(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { fallback.to_string() } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn normalize_ws_collapses() {
        assert_eq!(normalize_ws("  Half\n\tLife   2 "), "Half Life 2");
    }

    #[test]
    fn file_stem_variants() {
        assert_eq!(sanitize_file_stem("next fest", "x"), "next_fest");
        assert_eq!(sanitize_file_stem("../../etc", "x"), "etc");
        assert_eq!(sanitize_file_stem("***", "rando_bin"), "rando_bin");
        assert_eq!(sanitize_file_stem("bin-a__b", "x"), "bin-a_b");
    }
}
