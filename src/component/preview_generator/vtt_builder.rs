//! WebVTT 時間軸建構
//!
//! 每張縮圖一個 cue，時間範圍由索引與間隔推得。
//! 時間戳只到整數秒（`HH:MM:SS.000`），為刻意的簡化。

use super::sprite_compositor::SpriteLayout;
use crate::error::ThumbnailError;
use std::fs;
use std::path::{Path, PathBuf};

/// 將整數秒格式化為 `HH:MM:SS.000`
#[must_use]
pub fn format_timestamp(total_seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}.000",
        total_seconds / 3600,
        total_seconds / 60 % 60,
        total_seconds % 60
    )
}

/// 個別檔案模式：媒體參照為 `thumbnails/<檔名>` 相對路徑
#[must_use]
pub fn build_cues_for_files(files: &[PathBuf], interval_seconds: u32) -> String {
    render_cues(
        files.iter().map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("thumbnails/{name}")
        }),
        interval_seconds,
    )
}

/// sprite 模式：媒體參照為 `thumbnails.jpg#xywh=x,y,w,h` 像素區域
#[must_use]
pub fn build_cues_for_sprite(total: usize, layout: &SpriteLayout, interval_seconds: u32) -> String {
    render_cues(
        (0..total).map(|index| {
            let (x, y) = layout.tile_origin(index as u32);
            format!(
                "thumbnails.jpg#xywh={x},{y},{},{}",
                layout.tile_width, layout.tile_height
            )
        }),
        interval_seconds,
    )
}

fn render_cues(media_refs: impl Iterator<Item = String>, interval_seconds: u32) -> String {
    let interval = u64::from(interval_seconds);
    let mut vtt = String::from("WEBVTT\n\n");

    for (index, media_ref) in media_refs.enumerate() {
        let start = index as u64 * interval;
        let end = start + interval;
        vtt.push_str(&format!(
            "{} --> {}\n{media_ref}\n\n",
            format_timestamp(start),
            format_timestamp(end)
        ));
    }

    vtt
}

/// 寫出 VTT 檔（先寫暫存檔再改名，避免留下寫到一半的檔案）
pub fn write_vtt(path: &Path, content: &str) -> Result<(), ThumbnailError> {
    let temp_path = path.with_extension("vtt.tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
