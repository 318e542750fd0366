//! Emoji icons for file listings.
//!
//! Files are matched by lowercase extension, directories get a folder or a lock
//! depending on whether their contents could be read.

use phf::phf_map;

pub const FILE_ICON: &str = "📄";
pub const DIR_ICON: &str = "📁";
pub const LOCKED_DIR_ICON: &str = "🔒";
pub const UNKNOWN_ICON: &str = "❓";
pub const PARENT_ICON: &str = "⬆️";

/// File extension (without the dot, lowercase) to icon.
static EXT_ICON_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "py" => "🐍",
    "js" => "📜",
    "html" => "🌐",
    "css" => "🎨",
    "md" => "📝",
    "txt" => "📄",
    "pdf" => "📕",
    "jpg" => "🖼️",
    "png" => "🖼️",
    "gif" => "🖼️",
    "mp3" => "🎵",
    "mp4" => "🎬",
    "zip" => "📦",
    "tar" => "📦",
    "gz" => "📦",
    "json" => "📋",
    "xml" => "📋",
    "csv" => "📊",
    "xls" => "📊",
    "xlsx" => "📊",
    "doc" => "📘",
    "docx" => "📘",
    "sh" => "⚙️",
    "bat" => "⚙️",
    "exe" => "⚙️",
    "db" => "🗄️",
    "sql" => "🗄️",
    "c" => "💻",
    "cpp" => "💻",
    "java" => "☕",
    "php" => "🐘",
    "rb" => "💎",
    "rs" => "🦀",
    "go" => "🐹",
};

/// Icon for a file with the given extension (no leading dot, any case).
pub fn file_icon(extension: &str) -> &'static str {
    if let Some(icon) = EXT_ICON_MAP.get(extension) {
        return icon;
    }
    with_lowered_stack(extension, |s| EXT_ICON_MAP.get(s).copied()).unwrap_or(FILE_ICON)
}

/// Icon for a directory depending on whether it could be read.
#[inline]
pub fn dir_icon(readable: bool) -> &'static str {
    if readable { DIR_ICON } else { LOCKED_DIR_ICON }
}

/// Lowercases short ASCII keys on the stack before running `f`.
fn with_lowered_stack<R>(s: &str, f: impl FnOnce(&str) -> Option<R>) -> Option<R> {
    let bytes = s.as_bytes();
    if bytes.is_empty() || bytes.len() > 16 || !s.is_ascii() {
        let lowered = s.to_lowercase();
        return f(&lowered);
    }
    let mut buf = [0u8; 16];
    for (dst, src) in buf.iter_mut().zip(bytes) {
        *dst = src.to_ascii_lowercase();
    }
    let lowered = std::str::from_utf8(&buf[..bytes.len()]).ok()?;
    f(lowered)
}
