//! 縮圖擷取
//!
//! 呼叫轉碼器依取樣步幅輸出一連串 JPEG，檔名為
//! `<stem>-%04d.jpg`。擷取完成後重新掃描資料夾，
//! 以內嵌序號的數值順序回傳實際產出的檔案列表。

use super::sampling::SamplingPlan;
use crate::config::Config;
use crate::error::ThumbnailError;
use crate::tools::{VideoInfo, run_with_timeout};
use log::{debug, warn};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 避免剛好 seek 到串流宣告的起始點（部分轉碼器處理不當）
const SEEK_EPSILON: f64 = 0.0001;

fn sequence_pattern(stem: &str) -> Regex {
    Regex::new(&format!(r"^{}-(\d{{4}})\.jpg$", regex::escape(stem))).expect("縮圖檔名 regex")
}

/// 刪除前一次執行留下、符合檔名樣式的縮圖，回傳刪除數量
pub fn delete_previous_thumbnails(dir: &Path, stem: &str) -> Result<usize, ThumbnailError> {
    let pattern = sequence_pattern(stem);
    let mut removed = 0;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if entry.file_type()?.is_file() && pattern.is_match(name) {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }

    debug!("刪除 {removed} 張舊縮圖（{stem}-*.jpg）");
    Ok(removed)
}

/// 擷取縮圖並回傳自然數值排序的檔案列表
///
/// 從 `start + epsilon` 開始，每 `frame_stride` 幀取一張，
/// 縮放至 `thumb_width`（高度依比例）。零張產出視為硬錯誤。
pub fn extract_frames(
    config: &Config,
    info: &VideoInfo,
    plan: &SamplingPlan,
) -> Result<Vec<PathBuf>, ThumbnailError> {
    let thumbs_dir = config.thumbnails_dir();
    let output_template = thumbs_dir.join(format!("{}-%04d.jpg", config.stem));
    let seek = info.start_seconds + SEEK_EPSILON;
    let filter = format!(
        "scale={}:-1,select=not(mod(n\\,{}))",
        plan.thumb_width, plan.frame_stride
    );

    let mut command = Command::new("ffmpeg");
    command
        .args(["-hide_banner", "-loglevel", "error", "-nostdin", "-ss"])
        .arg(format!("{seek:.4}"))
        .arg("-i")
        .arg(&config.input)
        .args([
            "-y", "-an", "-sn", "-vsync", "0", "-q:v", "5", "-threads", "1", "-vf",
        ])
        .arg(&filter)
        .arg(&output_template);

    let output = run_with_timeout(command, config.process_timeout)?;
    if !output.success {
        // 結束碼非零不直接視為失敗，以實際產出判斷
        warn!("轉碼器擷取結束碼非零: {}", output.stderr.trim());
    }

    let files = scan_thumbnails(&thumbs_dir, &config.stem)?;
    if files.is_empty() {
        return Err(ThumbnailError::NoFramesProduced {
            dir: thumbs_dir,
            pattern: format!("{}-\\d{{4}}.jpg", config.stem),
        });
    }

    debug!("擷取到 {} 張縮圖", files.len());
    Ok(files)
}

/// 掃描資料夾中符合樣式的縮圖，依內嵌序號的數值排序
///
/// 字典序會把 `-10` 排在 `-2` 之前，必須以數值比較。
pub fn scan_thumbnails(dir: &Path, stem: &str) -> Result<Vec<PathBuf>, ThumbnailError> {
    let pattern = sequence_pattern(stem);
    let mut found: Vec<(u64, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(caps) = pattern.captures(name) {
            let sequence: u64 = caps[1].parse().unwrap_or(0);
            found.push((sequence, entry.path()));
        }
    }

    found.sort_by_key(|(sequence, _)| *sequence);
    Ok(found.into_iter().map(|(_, path)| path).collect())
}

/// 從隨機時間點擷取單張 poster
pub fn extract_poster(config: &Config, timestamp: u32) -> Result<PathBuf, ThumbnailError> {
    let poster_path = config.poster_path();

    let mut command = Command::new("ffmpeg");
    command
        .args(["-hide_banner", "-loglevel", "error", "-nostdin", "-ss"])
        .arg(timestamp.to_string())
        .arg("-i")
        .arg(&config.input)
        .args(["-y", "-vframes", "1"])
        .arg(&poster_path);

    let output = run_with_timeout(command, config.process_timeout)?;
    if !output.success || !poster_path.exists() {
        return Err(ThumbnailError::Io(io::Error::other(format!(
            "poster 擷取失敗: {}",
            output.stderr.trim()
        ))));
    }

    Ok(poster_path)
}
