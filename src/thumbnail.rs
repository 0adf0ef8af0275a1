const YOUTUBE_THUMB_BASE: &str = "https://img.youtube.com/vi";

/// Derives a thumbnail URL from a video URL. Only YouTube hosts are
/// recognized; anything else yields an empty string rather than an error.
pub fn thumbnail_url(url: &str) -> String {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        if let Some(id) = extract_youtube_id(url) {
            return format!("{YOUTUBE_THUMB_BASE}/{id}/hqdefault.jpg");
        }
    }
    String::new()
}

/// Pulls the video id out of the watch/short/embed URL forms. Watch-style
/// markers are tried first, the embed form is the fallback.
pub fn extract_youtube_id(url: &str) -> Option<String> {
    id_after_marker(url, &["youtube.com/watch?v=", "/v/", ".be/"])
        .or_else(|| id_after_marker(url, &["youtube.com/embed/"]))
}

fn id_after_marker(url: &str, markers: &[&str]) -> Option<String> {
    for marker in markers {
        if let Some(pos) = url.find(marker) {
            let rest = &url[pos + marker.len()..];
            let id = rest.split(['&', '?', '\n']).next().unwrap_or("");
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }
    }
    None
}
