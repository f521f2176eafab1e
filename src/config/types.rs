use std::path::PathBuf;
use std::time::Duration;

/// 單次執行的完整設定
///
/// 由命令列參數建構一次，之後以唯讀參考傳遞給各階段。
#[derive(Debug, Clone)]
pub struct Config {
    /// 輸入影片檔案
    pub input: PathBuf,
    /// 輸出資料夾
    pub output_dir: PathBuf,
    /// 每張縮圖之間的秒數
    pub interval_seconds: u32,
    /// 縮圖寬度（高度依比例縮放）
    pub thumb_width: u32,
    /// 保留個別縮圖檔，不合併為 sprite
    pub keep_individual: bool,
    /// 另外從隨機時間點擷取 poster.jpg
    pub generate_poster: bool,
    /// 擷取前先刪除前一次執行留下的縮圖
    pub delete_previous: bool,
    /// sprite 每列的縮圖數量上限
    pub sprite_columns: u32,
    /// 外部程序逾時
    pub process_timeout: Duration,
    /// 輸入檔名主幹（小寫、去副檔名），作為縮圖檔名前綴
    pub stem: String,
}

impl Config {
    #[must_use]
    pub fn thumbnails_dir(&self) -> PathBuf {
        self.output_dir.join("thumbnails")
    }

    #[must_use]
    pub fn sprite_path(&self) -> PathBuf {
        self.output_dir.join("thumbnails.jpg")
    }

    #[must_use]
    pub fn vtt_path(&self) -> PathBuf {
        self.output_dir.join("thumbnails.vtt")
    }

    #[must_use]
    pub fn poster_path(&self) -> PathBuf {
        self.output_dir.join("poster.jpg")
    }
}
