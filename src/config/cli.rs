use crate::config::Config;
use crate::error::ThumbnailError;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// 從影片產生預覽縮圖與對應的 WebVTT 檔
#[derive(Debug, Parser)]
#[command(name = "thumbnails", version, about)]
pub struct Cli {
    /// 輸入影片檔案
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// 縮圖與 VTT 檔的輸出資料夾
    #[arg(short = 'o', long = "output", default_value = ".")]
    pub output: PathBuf,

    /// 每張縮圖之間的秒數
    #[arg(short = 't', long = "timespan", default_value_t = 10)]
    pub timespan: u32,

    /// 縮圖最大寬度（高度依比例縮放）
    #[arg(short = 'w', long = "width", default_value_t = 120)]
    pub width: u32,

    /// 不合併縮圖為單一 sprite 圖，VTT 直接參照個別檔案
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// 另外從隨機時間點擷取一張 poster.jpg
    #[arg(short = 'p', long = "poster")]
    pub poster: bool,

    /// 產生前先刪除前一次執行留下、符合此輸入檔名的縮圖
    #[arg(short = 'd', long = "delete-previous")]
    pub delete_previous: bool,

    /// sprite 圖每列的縮圖數量上限
    #[arg(long = "columns", default_value_t = 10)]
    pub columns: u32,

    /// 外部程序逾時秒數
    #[arg(long = "timeout", default_value_t = 300)]
    pub timeout: u64,
}

impl Config {
    /// 驗證命令列參數並建構唯讀設定
    pub fn from_cli(cli: Cli) -> Result<Self, ThumbnailError> {
        if cli.timespan == 0 {
            return Err(ThumbnailError::Usage(
                "縮圖間隔秒數（-t）必須大於 0".to_string(),
            ));
        }
        if cli.width == 0 {
            return Err(ThumbnailError::Usage(
                "縮圖寬度（-w）必須大於 0".to_string(),
            ));
        }
        if cli.columns == 0 {
            return Err(ThumbnailError::Usage(
                "sprite 每列數量（--columns）必須大於 0".to_string(),
            ));
        }
        if cli.timeout == 0 {
            return Err(ThumbnailError::Usage(
                "逾時秒數（--timeout）必須大於 0".to_string(),
            ));
        }

        let stem = cli
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ThumbnailError::Usage(format!(
                    "無法從輸入路徑取得檔名主幹: {}",
                    cli.input.display()
                ))
            })?;

        Ok(Self {
            input: cli.input,
            output_dir: cli.output,
            interval_seconds: cli.timespan,
            thumb_width: cli.width,
            keep_individual: cli.verbose,
            generate_poster: cli.poster,
            delete_previous: cli.delete_previous,
            sprite_columns: cli.columns,
            process_timeout: Duration::from_secs(cli.timeout),
            stem,
        })
    }
}
