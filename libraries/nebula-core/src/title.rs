//! Display title normalization
//!
//! Search results carry raw video titles such as
//! `"Drake - One Dance (Official Video) | 4K"`. These helpers turn them into
//! the title and artist shown to the user.

/// Strip video-title noise and keep the song name
///
/// Removes `(...)` and `[...]` groups, drops everything from the first `|`,
/// and for `"Artist - Song"` titles keeps the segment after the first
/// `" - "`.
pub fn clean_title(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut title = strip_groups(raw, '(', ')');
    title = strip_groups(&title, '[', ']');

    if let Some((head, _)) = title.split_once('|') {
        title = head.to_string();
    }

    if title.contains(" - ") {
        title = title.split(" - ").nth(1).unwrap_or_default().to_string();
    }

    title.replace("&quot;", "\"").trim().to_string()
}

/// Derive the artist from an `"Artist - Song"` title, else use the channel
pub fn extract_artist(raw: &str, channel: Option<&str>) -> String {
    if let Some((artist, _)) = raw.split_once(" - ") {
        return artist.trim().to_string();
    }
    channel.unwrap_or_default().to_string()
}

/// Remove every non-nested `open ... close` group
///
/// An opener without a matching closer is left untouched.
fn strip_groups(input: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(open) {
        let after_open = &rest[start + open.len_utf8()..];
        match after_open.find(close) {
            Some(end) => {
                out.push_str(&rest[..start]);
                rest = &after_open[end + close.len_utf8()..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}
