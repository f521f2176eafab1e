use super::frame_extractor::{delete_previous_thumbnails, extract_frames, extract_poster};
use super::sampling::{self, expected_cue_count, random_poster_timestamp};
use super::sprite_compositor::{compose_sprite, remove_source_thumbnails};
use super::vtt_builder::{build_cues_for_files, build_cues_for_sprite, write_vtt};
use crate::config::Config;
use crate::error::ThumbnailError;
use crate::tools::{
    ensure_directory_exists, probe_video_info, validate_directory_writable,
    validate_input_readable,
};
use console::style;
use log::{debug, info};
use std::path::PathBuf;

/// 單次執行的結果摘要
#[derive(Debug)]
pub struct PreviewSummary {
    pub cue_count: usize,
    pub vtt_path: PathBuf,
    pub sprite_path: Option<PathBuf>,
    pub poster_path: Option<PathBuf>,
}

/// 預覽縮圖與 VTT 產生器
///
/// 五階段流程：
/// A. 檢查輸入與輸出
/// B. 探測影片資訊（長度、起始偏移、tbr）
/// C. 擷取縮圖（必要時先清除舊檔、擷取 poster）
/// D. 合併 sprite 圖（-v 模式略過）
/// E. 產生 VTT 時間軸
///
/// 輸出資料夾與其 `thumbnails/` 子資料夾視為本次執行獨佔，
/// 不支援多個執行同時寫入同一個輸出資料夾。
pub struct PreviewGenerator {
    config: Config,
}

impl PreviewGenerator {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<PreviewSummary, ThumbnailError> {
        let config = &self.config;
        let thumbs_dir = config.thumbnails_dir();

        // Stage A: 檢查輸入與輸出
        print!("  {} 檢查輸入與輸出...", style("A").dim());
        validate_input_readable(&config.input)?;
        ensure_directory_exists(&config.output_dir)?;
        validate_directory_writable(&config.output_dir)?;
        ensure_directory_exists(&thumbs_dir)?;
        println!(" 完成");

        // Stage B: 探測影片資訊
        print!("  {} 讀取影片資訊...", style("B").dim());
        let video_info = probe_video_info(&config.input, config.process_timeout)?;
        println!(
            " {:.1}s, start {:.3}s, {:.2} tbr",
            video_info.duration_seconds, video_info.start_seconds, video_info.frame_rate
        );

        let plan = sampling::plan(&video_info, config.interval_seconds, config.thumb_width);
        let expected = expected_cue_count(video_info.duration_seconds, config.interval_seconds);
        debug!(
            "取樣計畫: 每 {} 幀取一張，預估 {expected} 張",
            plan.frame_stride
        );

        // Stage C: 擷取縮圖
        print!("  {} 擷取縮圖...", style("C").dim());
        let poster_path = if config.generate_poster {
            let timestamp = random_poster_timestamp(video_info.duration_seconds);
            Some(extract_poster(config, timestamp)?)
        } else {
            None
        };

        if config.delete_previous {
            let removed = delete_previous_thumbnails(&thumbs_dir, &config.stem)?;
            if removed > 0 {
                info!("已清除前次執行的 {removed} 張縮圖");
            }
        }

        let thumbnails = extract_frames(config, &video_info, &plan)?;
        println!(" {} 張", thumbnails.len());
        if thumbnails.len() != expected {
            debug!("實際張數 {} 與預估 {expected} 不同，以實際為準", thumbnails.len());
        }

        // Stage D + E: 合併與時間軸
        let (vtt, sprite_path) = if config.keep_individual {
            println!("  {} 保留個別縮圖，略過合併", style("D").dim());
            (build_cues_for_files(&thumbnails, config.interval_seconds), None)
        } else {
            print!("  {} 合併 sprite 圖...", style("D").dim());
            let sprite_path = config.sprite_path();
            let layout = compose_sprite(&thumbnails, config.sprite_columns, &sprite_path)?;
            remove_source_thumbnails(&thumbnails)?;
            println!(" {}x{} 網格", layout.columns, layout.rows);
            (
                build_cues_for_sprite(thumbnails.len(), &layout, config.interval_seconds),
                Some(sprite_path),
            )
        };

        print!("  {} 產生 VTT...", style("E").dim());
        let vtt_path = config.vtt_path();
        write_vtt(&vtt_path, &vtt)?;
        println!(" {}", vtt_path.display());

        info!(
            "完成: {} 個 cue，輸出於 {}",
            thumbnails.len(),
            config.output_dir.display()
        );

        Ok(PreviewSummary {
            cue_count: thumbnails.len(),
            vtt_path,
            sprite_path,
            poster_path,
        })
    }
}
