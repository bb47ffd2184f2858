// Image loading module
// Decodes banner pages and pre-scales them to the page size

use crate::error::BannerError;
use crate::layout::{PAGE_HEIGHT, PAGE_WIDTH};
use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::DynamicImage;
use log::{debug, warn};
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

/// Where a page comes from
#[derive(Debug, Clone)]
pub enum PageSource {
    File(PathBuf),
    Bytes(Vec<u8>),
}

impl PageSource {
    fn describe(&self) -> String {
        match self {
            PageSource::File(path) => path.display().to_string(),
            PageSource::Bytes(data) => format!("<stdin, {} bytes>", data.len()),
        }
    }
}

/// One decoded page ready for painting
#[derive(Debug, Clone, PartialEq)]
pub struct PageImage {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Raw BGRA pixel data (4 bytes per pixel)
    pub bgra_data: Vec<u8>,
}

impl PageImage {
    /// BGRA pixel at (x, y), clamped to the image bounds
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let idx = ((y * self.width + x) * 4) as usize;
        match self.bgra_data.get(idx..idx + 4) {
            Some(p) => [p[0], p[1], p[2], p[3]],
            None => [0, 0, 0, 0],
        }
    }
}

/// Load every source, skipping the ones that fail to decode
pub fn load_pages(sources: &[PageSource]) -> Result<Vec<PageImage>> {
    let mut pages = Vec::with_capacity(sources.len());
    for source in sources {
        match load_page(source) {
            Ok(page) => {
                debug!("Loaded page {}", source.describe());
                pages.push(page);
            }
            Err(e) => warn!("Skipping {}: {:#}", source.describe(), e),
        }
    }

    if pages.is_empty() {
        return Err(BannerError::NoPages.into());
    }
    Ok(pages)
}

/// Load a single page and scale it to the page size
pub fn load_page(source: &PageSource) -> Result<PageImage> {
    let img = match source {
        PageSource::Bytes(data) => load_from_bytes(data)?,
        PageSource::File(path) => {
            let data = fs::read(path)
                .with_context(|| format!("Failed to read image file: {}", path.display()))?;
            load_from_bytes(&data)?
        }
    };

    Ok(to_page(img))
}

/// Resize ignoring aspect ratio and convert to BGRA
fn to_page(img: DynamicImage) -> PageImage {
    let img = if img.width() != PAGE_WIDTH as u32 || img.height() != PAGE_HEIGHT as u32 {
        img.resize_exact(PAGE_WIDTH as u32, PAGE_HEIGHT as u32, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    // Convert RGBA to BGRA (Wayland expects ARGB/BGRA in little-endian)
    let mut bgra_data = rgba.into_raw();
    for pixel in bgra_data.chunks_exact_mut(4) {
        pixel.swap(0, 2);
    }

    PageImage {
        width,
        height,
        bgra_data,
    }
}

/// Load an image from raw bytes, auto-detecting the format
fn load_from_bytes(data: &[u8]) -> Result<DynamicImage> {
    let format = image::guess_format(data).context("Failed to detect image format")?;

    let cursor = Cursor::new(data);
    let img = image::load(cursor, format).context("Failed to decode image")?;

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn pages_are_scaled_to_page_size_and_bgra() {
        let page = load_page(&PageSource::Bytes(png_bytes(40, 30, [10, 20, 30, 255]))).unwrap();
        assert_eq!((page.width, page.height), (PAGE_WIDTH as u32, PAGE_HEIGHT as u32));
        assert_eq!(page.bgra_data.len(), (page.width * page.height * 4) as usize);
        assert_eq!(page.pixel(250, 100), [30, 20, 10, 255]);
    }

    #[test]
    fn undecodable_sources_are_skipped() {
        let sources = vec![
            PageSource::Bytes(b"not an image".to_vec()),
            PageSource::File(PathBuf::from("/nonexistent/rbanner/page.png")),
            PageSource::Bytes(png_bytes(8, 8, [0, 0, 0, 255])),
        ];
        let pages = load_pages(&sources).unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn nothing_loadable_is_an_error() {
        let err = load_pages(&[PageSource::Bytes(Vec::new())]).unwrap_err();
        assert_eq!(err.downcast_ref::<BannerError>(), Some(&BannerError::NoPages));
    }

    #[test]
    fn pixel_lookup_clamps_to_bounds() {
        let page = PageImage {
            width: 1,
            height: 1,
            bgra_data: vec![1, 2, 3, 4],
        };
        assert_eq!(page.pixel(5, 9), [1, 2, 3, 4]);
    }
}
