//! MIME labeling for uploaded audio files.

/// Extensions offered by the file picker.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a", "ogg", "flac"];

/// Map a file name to the MIME label sent alongside the audio payload.
///
/// Unrecognized or missing extensions fall back to `audio/wav` rather than
/// being rejected; the remote service is the authority on whether the bytes
/// are actually acceptable.
pub fn mime_for_file_name(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "m4a" | "mp4" => "audio/mp4",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        _ => "audio/wav",
    }
}
