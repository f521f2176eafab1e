//! sprite 圖合併
//!
//! 將擷取順序的縮圖由左至右、由上而下排入網格，
//! 以品質 90 輸出單張 JPEG。所有縮圖必須與第一張同尺寸。

use crate::error::ThumbnailError;
use image::codecs::jpeg::JpegEncoder;
use image::{RgbImage, imageops};
use log::debug;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const JPEG_QUALITY: u8 = 90;

/// sprite 網格佈局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteLayout {
    pub columns: u32,
    pub rows: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl SpriteLayout {
    /// `columns = min(total, max_columns)`、`rows = ceil(total / columns)`
    #[must_use]
    pub fn plan(total: usize, max_columns: u32, tile_width: u32, tile_height: u32) -> Self {
        let total = u32::try_from(total).unwrap_or(u32::MAX);
        let columns = total.min(max_columns).max(1);
        Self {
            columns,
            rows: total.div_ceil(columns).max(1),
            tile_width,
            tile_height,
        }
    }

    /// 第 `index` 張縮圖的左上角像素座標
    #[must_use]
    pub const fn tile_origin(&self, index: u32) -> (u32, u32) {
        (
            (index % self.columns) * self.tile_width,
            (index / self.columns) * self.tile_height,
        )
    }

    #[must_use]
    pub const fn canvas_size(&self) -> (u32, u32) {
        (
            self.columns * self.tile_width,
            self.rows * self.tile_height,
        )
    }
}

/// 合併縮圖為單張 sprite 圖，回傳實際使用的佈局
///
/// 尺寸以第一張縮圖為準，其餘不一致即失敗。
/// 完全不透明貼上，不做混色。
pub fn compose_sprite(
    thumbnails: &[PathBuf],
    max_columns: u32,
    output_path: &Path,
) -> Result<SpriteLayout, ThumbnailError> {
    let first_path = thumbnails
        .first()
        .ok_or_else(|| ThumbnailError::Usage("沒有縮圖可合併為 sprite".to_string()))?;

    let first_tile = image::open(first_path)?.to_rgb8();
    let (tile_width, tile_height) = first_tile.dimensions();
    let layout = SpriteLayout::plan(thumbnails.len(), max_columns, tile_width, tile_height);
    let (canvas_width, canvas_height) = layout.canvas_size();

    debug!(
        "合併 {} 張縮圖為 {}x{} 網格（{}x{} px）",
        thumbnails.len(),
        layout.columns,
        layout.rows,
        canvas_width,
        canvas_height
    );

    let mut canvas = RgbImage::new(canvas_width, canvas_height);
    for (index, path) in thumbnails.iter().enumerate() {
        let loaded;
        let tile = if index == 0 {
            &first_tile
        } else {
            loaded = image::open(path)?.to_rgb8();
            &loaded
        };

        let (width, height) = tile.dimensions();
        if (width, height) != (tile_width, tile_height) {
            return Err(ThumbnailError::InconsistentThumbnailSize {
                path: path.clone(),
                expected_width: tile_width,
                expected_height: tile_height,
                actual_width: width,
                actual_height: height,
            });
        }

        let (x, y) = layout.tile_origin(index as u32);
        imageops::replace(&mut canvas, tile, i64::from(x), i64::from(y));
    }

    let file = fs::File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
    canvas.write_with_encoder(encoder)?;

    debug!("sprite 圖已建立: {}", output_path.display());
    Ok(layout)
}

/// 刪除已併入 sprite 的個別縮圖檔
pub fn remove_source_thumbnails(thumbnails: &[PathBuf]) -> Result<(), ThumbnailError> {
    for path in thumbnails {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb};

    fn write_tile(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        let tile = RgbImage::from_pixel(width, height, Rgb(color));
        tile.save(&path).unwrap();
        path
    }

    #[test]
    fn test_layout_plan() {
        let layout = SpriteLayout::plan(25, 10, 120, 68);
        assert_eq!(layout.columns, 10);
        assert_eq!(layout.rows, 3);
        assert_eq!(layout.canvas_size(), (1200, 204));

        // 張數少於每列上限時欄數收斂至張數
        let small = SpriteLayout::plan(3, 10, 120, 68);
        assert_eq!(small.columns, 3);
        assert_eq!(small.rows, 1);
    }

    #[test]
    fn test_layout_single_tile() {
        let layout = SpriteLayout::plan(1, 10, 120, 68);
        assert_eq!((layout.columns, layout.rows), (1, 1));
        assert_eq!(layout.canvas_size(), (120, 68));
    }

    #[test]
    fn test_tile_origin_formula() {
        let layout = SpriteLayout::plan(12, 5, 120, 68);
        for index in 0..12u32 {
            let (x, y) = layout.tile_origin(index);
            assert_eq!(x, (index % 5) * 120);
            assert_eq!(y, (index / 5) * 68);
        }
    }

    #[test]
    fn test_compose_sprite_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let thumbnails = vec![
            write_tile(dir.path(), "v-0001.jpg", 8, 4, [255, 0, 0]),
            write_tile(dir.path(), "v-0002.jpg", 8, 4, [0, 255, 0]),
            write_tile(dir.path(), "v-0003.jpg", 8, 4, [0, 0, 255]),
        ];
        let output = dir.path().join("thumbnails.jpg");

        let layout = compose_sprite(&thumbnails, 2, &output).unwrap();
        assert_eq!((layout.columns, layout.rows), (2, 2));

        let sprite = image::open(&output).unwrap();
        assert_eq!(sprite.dimensions(), (16, 8));
    }

    #[test]
    fn test_compose_sprite_rejects_inconsistent_size() {
        let dir = tempfile::tempdir().unwrap();
        let thumbnails = vec![
            write_tile(dir.path(), "v-0001.jpg", 8, 4, [255, 0, 0]),
            write_tile(dir.path(), "v-0002.jpg", 6, 4, [0, 255, 0]),
        ];
        let output = dir.path().join("thumbnails.jpg");

        let err = compose_sprite(&thumbnails, 10, &output).unwrap_err();
        match err {
            ThumbnailError::InconsistentThumbnailSize {
                expected_width,
                actual_width,
                ..
            } => {
                assert_eq!(expected_width, 8);
                assert_eq!(actual_width, 6);
            }
            other => panic!("預期尺寸不一致錯誤，實際為: {other}"),
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_compose_sprite_empty_set_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = compose_sprite(&[], 10, &dir.path().join("thumbnails.jpg")).unwrap_err();
        assert!(matches!(err, ThumbnailError::Usage(_)));
    }

    #[test]
    fn test_remove_source_thumbnails() {
        let dir = tempfile::tempdir().unwrap();
        let thumbnails = vec![
            write_tile(dir.path(), "v-0001.jpg", 4, 4, [1, 2, 3]),
            write_tile(dir.path(), "v-0002.jpg", 4, 4, [4, 5, 6]),
        ];
        remove_source_thumbnails(&thumbnails).unwrap();
        assert!(!thumbnails[0].exists());
        assert!(!thumbnails[1].exists());
    }
}
