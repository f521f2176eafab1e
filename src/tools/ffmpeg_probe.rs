//! 影片資訊探測
//!
//! 以 `ffmpeg -i` 的診斷文字輸出取得影片長度、起始偏移與幀率。
//! 正規表示式解析與程序呼叫分離，解析邏輯可直接用抓取的輸出文字測試。

use crate::error::ThumbnailError;
use crate::tools::ffmpeg_command::run_with_timeout;
use log::debug;
use regex::Regex;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// 探測到的影片資訊，解析一次後不再變動
#[derive(Debug, Clone)]
pub struct VideoInfo {
    pub duration_seconds: f64,
    /// 串流宣告的起始偏移，用來略過開頭可能的無畫面片段
    pub start_seconds: f64,
    /// 轉碼器回報的名目幀率（tbr）
    pub frame_rate: f64,
}

/// 執行 `ffmpeg -i` 並解析輸出
///
/// 沒有輸出檔時 ffmpeg 以非零結束碼結束，這是預期行為；
/// 可用性以版本橫幅判斷，而非結束碼。
pub fn probe_video_info(input: &Path, timeout: Duration) -> Result<VideoInfo, ThumbnailError> {
    let mut command = Command::new("ffmpeg");
    command.arg("-i").arg(input);

    let output = run_with_timeout(command, timeout)?;
    let info = parse_video_info(&output.combined())?;

    debug!(
        "影片資訊: {:.2}s, start {:.4}s, {:.2} tbr ({})",
        info.duration_seconds,
        info.start_seconds,
        info.frame_rate,
        input.display()
    );

    Ok(info)
}

/// 從轉碼器診斷輸出解析影片資訊
///
/// 長度或幀率缺漏一律視為硬錯誤，不以未初始化的值繼續執行。
pub fn parse_video_info(text: &str) -> Result<VideoInfo, ThumbnailError> {
    let banner = Regex::new(r"(?im)^\s*ffmpeg version ([^\s,]+)").expect("版本橫幅 regex");
    if !banner.is_match(text) {
        return Err(ThumbnailError::ProbeUnavailable(
            "輸出中沒有 ffmpeg 版本橫幅".to_string(),
        ));
    }

    let duration_re = Regex::new(r"(?is)Duration: (\d+):(\d+):(\d+)\.\d+, start: ([^,]*)")
        .expect("Duration regex");
    let caps = duration_re.captures(text).ok_or_else(|| {
        ThumbnailError::ProbeParseError("找不到 Duration / start 欄位".to_string())
    })?;

    let hours: f64 = parse_field(&caps[1], "時")?;
    let minutes: f64 = parse_field(&caps[2], "分")?;
    let seconds: f64 = parse_field(&caps[3], "秒")?;
    let start_seconds: f64 = parse_field(caps[4].trim(), "start")?;

    let tbr_re = Regex::new(r"\b(\d+(?:\.\d+)?) tbr\b").expect("tbr regex");
    let frame_rate: f64 = tbr_re
        .captures(text)
        .map(|c| parse_field(&c[1], "tbr"))
        .transpose()?
        .ok_or_else(|| ThumbnailError::ProbeParseError("找不到 tbr 幀率".to_string()))?;

    Ok(VideoInfo {
        duration_seconds: hours * 3600.0 + minutes * 60.0 + seconds,
        start_seconds,
        frame_rate,
    })
}

fn parse_field(value: &str, field: &str) -> Result<f64, ThumbnailError> {
    value.parse().map_err(|_| {
        ThumbnailError::ProbeParseError(format!("{field} 欄位無法解析: '{value}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 抓取自實際 ffmpeg 6.x 的輸出節錄
    const SAMPLE_OUTPUT: &str = "\
ffmpeg version 6.1.1 Copyright (c) 2000-2023 the FFmpeg developers
  built with gcc 13 (GCC)
  configuration: --prefix=/usr
Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'video.mp4':
  Metadata:
    major_brand     : isom
  Duration: 00:02:05.43, start: 0.000000, bitrate: 1205 kb/s
  Stream #0:0[0x1](und): Video: h264 (High), yuv420p, 1280x720, 1071 kb/s, 24 fps, 24 tbr, 12288 tbn (default)
  Stream #0:1[0x2](und): Audio: aac (LC), 44100 Hz, stereo, fltp, 128 kb/s (default)
At least one output file must be specified
";

    #[test]
    fn test_parse_sample_output() {
        let info = parse_video_info(SAMPLE_OUTPUT).unwrap();
        assert!((info.duration_seconds - 125.0).abs() < 0.01);
        assert!(info.start_seconds.abs() < 0.0001);
        assert!((info.frame_rate - 24.0).abs() < 0.01);
    }

    #[test]
    fn test_parse_fractional_tbr_and_start() {
        let text = "\
ffmpeg version n7.0 Copyright (c) 2000-2024 the FFmpeg developers
Input #0, matroska,webm, from 'clip.mkv':
  Duration: 01:01:01.50, start: 2.500000, bitrate: 900 kb/s
  Stream #0:0: Video: vp9, yuv420p, 1920x1080, 29.97 fps, 29.97 tbr, 1k tbn
";
        let info = parse_video_info(text).unwrap();
        assert!((info.duration_seconds - 3661.0).abs() < 0.01);
        assert!((info.start_seconds - 2.5).abs() < 0.0001);
        assert!((info.frame_rate - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_missing_banner_is_unavailable() {
        let err = parse_video_info("command not found").unwrap_err();
        assert!(matches!(err, ThumbnailError::ProbeUnavailable(_)));
    }

    #[test]
    fn test_missing_duration_is_parse_error() {
        let text = "ffmpeg version 6.1.1 Copyright\nInput #0, mov, from 'x.mp4':\n  24 tbr\n";
        let err = parse_video_info(text).unwrap_err();
        assert!(matches!(err, ThumbnailError::ProbeParseError(_)));
    }

    #[test]
    fn test_missing_tbr_is_parse_error() {
        let text = "\
ffmpeg version 6.1.1 Copyright
Input #0, mov, from 'x.mp4':
  Duration: 00:00:10.00, start: 0.000000, bitrate: 1 kb/s
";
        let err = parse_video_info(text).unwrap_err();
        assert!(matches!(err, ThumbnailError::ProbeParseError(_)));
    }

    #[test]
    fn test_fractional_duration_part_is_discarded() {
        let text = "\
ffmpeg version 6.1.1 Copyright
  Duration: 00:00:59.99, start: 0.000000, bitrate: 1 kb/s
  30 tbr
";
        let info = parse_video_info(text).unwrap();
        assert!((info.duration_seconds - 59.0).abs() < 0.01);
    }
}
