//! 取樣排程
//!
//! 從影片長度、幀率與縮圖間隔計算幀取樣步幅。
//! 預估張數僅供參考，實際張數以擷取結果為準。

use crate::tools::VideoInfo;
use rand::Rng;

/// 取樣計畫
#[derive(Debug, Clone, Copy)]
pub struct SamplingPlan {
    pub interval_seconds: u32,
    /// 兩張縮圖之間跳過的來源幀數，恆 >= 1
    pub frame_stride: u32,
    pub thumb_width: u32,
}

/// 計算取樣計畫
///
/// `frame_stride = max(1, round(interval * frame_rate))`，
/// 間隔極短或幀率極低時下限為 1（逐幀取樣）。
#[must_use]
pub fn plan(info: &VideoInfo, interval_seconds: u32, thumb_width: u32) -> SamplingPlan {
    let stride = (f64::from(interval_seconds) * info.frame_rate).round();
    SamplingPlan {
        interval_seconds,
        frame_stride: (stride as u32).max(1),
        thumb_width,
    }
}

/// 預估的縮圖張數（`floor(duration / interval)`）
///
/// 擷取由幀取樣驅動而非明確的停止條件，呼叫端不可假設
/// 實際張數與此完全一致。
#[must_use]
pub fn expected_cue_count(duration_seconds: f64, interval_seconds: u32) -> usize {
    if interval_seconds == 0 {
        return 0;
    }
    (duration_seconds / f64::from(interval_seconds))
        .floor()
        .max(0.0) as usize
}

/// 在 `[1, duration-1]` 中均勻選一個整數秒作為 poster 時間點
///
/// 影片短於 2 秒時沒有有效區間，固定回傳 0。
#[must_use]
pub fn random_poster_timestamp(duration_seconds: f64) -> u32 {
    let limit = duration_seconds.floor() as i64 - 1;
    if limit < 1 {
        return 0;
    }
    rand::thread_rng().gen_range(1..=limit) as u32
}
