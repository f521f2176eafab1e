//! 錯誤類型定義
//!
//! 每個失敗都是單次執行的終點，沒有重試機制。
//! 結束碼沿用 sysexits.h 的慣例。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub const EX_USAGE: u8 = 64;
pub const EX_NOINPUT: u8 = 66;
pub const EX_UNAVAILABLE: u8 = 69;
pub const EX_SOFTWARE: u8 = 70;
pub const EX_CANTCREAT: u8 = 73;
pub const EX_IOERR: u8 = 74;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("參數錯誤: {0}")]
    Usage(String),

    #[error("無法讀取輸入檔案: {path}")]
    InputNotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("輸出資料夾無法寫入: {path}")]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("無法建立資料夾: {path}")]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("找不到可用的轉碼器: {0}")]
    ProbeUnavailable(String),

    #[error("無法從轉碼器輸出解析影片資訊: {0}")]
    ProbeParseError(String),

    #[error("在 {dir} 中找不到符合 {pattern} 的縮圖")]
    NoFramesProduced { dir: PathBuf, pattern: String },

    #[error(
        "縮圖尺寸不一致: {path} 為 {actual_width}x{actual_height}，預期 {expected_width}x{expected_height}"
    )]
    InconsistentThumbnailSize {
        path: PathBuf,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("外部程序逾時（{seconds} 秒）: {command}")]
    ExternalProcessTimeout { command: String, seconds: u64 },

    #[error("I/O 錯誤: {0}")]
    Io(#[from] io::Error),

    #[error("影像處理錯誤: {0}")]
    Image(#[from] image::ImageError),
}

impl ThumbnailError {
    /// 對應的程序結束碼
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => EX_USAGE,
            Self::InputNotReadable { .. } | Self::NoFramesProduced { .. } => EX_NOINPUT,
            Self::ProbeUnavailable(_)
            | Self::ProbeParseError(_)
            | Self::ExternalProcessTimeout { .. } => EX_UNAVAILABLE,
            Self::InconsistentThumbnailSize { .. } => EX_SOFTWARE,
            Self::OutputNotWritable { .. } | Self::DirectoryCreateFailed { .. } => EX_CANTCREAT,
            Self::Io(_) | Self::Image(_) => EX_IOERR,
        }
    }
}
