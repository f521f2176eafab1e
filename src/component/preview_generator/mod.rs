//! 預覽縮圖產生元件
//!
//! 五階段流程：
//! A. 檢查輸入與輸出
//! B. 探測影片資訊
//! C. 擷取縮圖
//! D. 合併 sprite 圖
//! E. 產生 VTT 時間軸

mod frame_extractor;
mod main;
mod sampling;
mod sprite_compositor;
mod vtt_builder;

pub use frame_extractor::{
    delete_previous_thumbnails, extract_frames, extract_poster, scan_thumbnails,
};
pub use main::{PreviewGenerator, PreviewSummary};
pub use sampling::{SamplingPlan, expected_cue_count, plan, random_poster_timestamp};
pub use sprite_compositor::{SpriteLayout, compose_sprite, remove_source_thumbnails};
pub use vtt_builder::{build_cues_for_files, build_cues_for_sprite, format_timestamp, write_vtt};
