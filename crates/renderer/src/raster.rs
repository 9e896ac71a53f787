//! Rasterization of the SVG scene and PNG encoding.
//!
//! The SVG is parsed with `usvg` and drawn by `resvg` onto an opaque white
//! `tiny-skia` pixmap, then written as an RGBA PNG (color type 6). Labels are
//! only drawn when fonts are available to `usvg`.

use std::io::Write;
use std::sync::{Arc, OnceLock};

use heatmap_common::{HeatmapError, HeatmapResult};
use tracing::{debug, warn};

/// System fonts, loaded on first use and shared by every rasterization.
fn system_fonts() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            if db.is_empty() {
                warn!("No system fonts found, PNG output will have no labels");
            } else {
                debug!(faces = db.len(), "Loaded system fonts");
            }
            Arc::new(db)
        })
        .clone()
}

/// Rasterize an SVG document to PNG bytes at the given scale factor.
pub fn rasterize(svg: &str, scale: f32) -> HeatmapResult<Vec<u8>> {
    let pixmap = render_pixmap(svg, scale)?;
    // Background is opaque, so premultiplied and straight alpha coincide
    create_png(pixmap.data(), pixmap.width() as usize, pixmap.height() as usize)
}

/// Draw an SVG document onto an opaque white pixmap.
fn render_pixmap(svg: &str, scale: f32) -> HeatmapResult<tiny_skia::Pixmap> {
    if !(scale > 0.0) || !scale.is_finite() {
        return Err(HeatmapError::RasterError(format!(
            "invalid scale factor {}",
            scale
        )));
    }

    let opt = usvg::Options {
        fontdb: system_fonts(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|e| HeatmapError::RasterError(format!("SVG parse failed: {}", e)))?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        HeatmapError::RasterError(format!("cannot allocate {}x{} pixmap", width, height))
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    debug!(width, height, "Rasterized chart");
    Ok(pixmap)
}

/// Create an RGBA PNG from raw pixel data (4 bytes per pixel, row-major).
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> HeatmapResult<Vec<u8>> {
    if pixels.len() != width * height * 4 {
        return Err(HeatmapError::RasterError(format!(
            "expected {} bytes for {}x{} RGBA, got {}",
            width * height * 4,
            width,
            height,
            pixels.len()
        )));
    }

    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(6); // color type (RGBA)
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    let idat_data = deflate_idat_rgba(pixels, width, height)
        .map_err(|e| HeatmapError::RasterError(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk: length, type, data, CRC over type and data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Deflate RGBA scanlines, each prefixed with filter type 0.
fn deflate_idat_rgba(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let stride = width * 4;
    let mut uncompressed = Vec::with_capacity(height * (1 + stride));
    for row in pixels.chunks_exact(stride.max(1)).take(height) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}
