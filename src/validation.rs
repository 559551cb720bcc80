//! Input sanitation for user-supplied display names.
//!
//! The transport hands us whatever the chat platform reports as the user's
//! name; it is echoed back in the profile card, so strip anything that could
//! mangle the reply and cap the length.

/// Maximum characters of a display name echoed back in replies.
pub const MAX_DISPLAY_NAME_CHARS: usize = 32;

/// Sanitize a display name for rendering: drop control characters, collapse
/// whitespace runs to a single space, and truncate to
/// [`MAX_DISPLAY_NAME_CHARS`]. Falls back to `"friend"` when nothing
/// printable remains.
pub fn sanitize_display_name(raw: &str) -> String {
    let mut out = String::new();
    let mut kept = 0usize;
    let mut last_was_space = true;
    for ch in raw.chars() {
        if kept >= MAX_DISPLAY_NAME_CHARS {
            break;
        }
        // Whitespace first: newlines and tabs are control characters too,
        // but should collapse into a space rather than vanish.
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                kept += 1;
                last_was_space = true;
            }
            continue;
        }
        if ch.is_control() {
            continue;
        }
        out.push(ch);
        kept += 1;
        last_was_space = false;
    }
    let trimmed = out.trim_end();
    if trimmed.is_empty() {
        "friend".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_ordinary_names() {
        assert_eq!(sanitize_display_name("Alice"), "Alice");
        assert_eq!(sanitize_display_name("  Bob Smith  "), "Bob Smith");
    }

    #[test]
    fn strips_control_characters_and_collapses_whitespace() {
        assert_eq!(sanitize_display_name("Ev\x07il\n\n  name"), "Evil name");
    }

    #[test]
    fn truncates_very_long_names() {
        let long = "a".repeat(100);
        assert_eq!(
            sanitize_display_name(&long).chars().count(),
            MAX_DISPLAY_NAME_CHARS
        );
    }

    #[test]
    fn empty_or_unprintable_falls_back() {
        assert_eq!(sanitize_display_name(""), "friend");
        assert_eq!(sanitize_display_name("\x01\x02"), "friend");
    }
}
