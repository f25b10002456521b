use std::{io::Cursor, path::Path};

use anyhow::Context;
use image::{ImageFormat, RgbImage, RgbaImage, codecs::jpeg::JpegEncoder};

use crate::{
    assets::silhouette::SilhouetteLibrary,
    foundation::{
        core::{Frame, Rgba8},
        error::{GlyphError, GlyphResult, Recovery},
    },
    record::model::CraterRecord,
    render::flatten::flatten_layers,
    session::{
        driver::AnimationDriver,
        options::{DriverOpts, RenderOptions},
    },
};

/// Encoded still formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StillFormat {
    /// Lossless, keeps alpha.
    #[default]
    Png,
    /// Lossy, alpha dropped.
    Jpeg,
}

impl StillFormat {
    /// Guess the format from a file extension (`png`, `jpg`, `jpeg`; case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Options for [`export_still`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    /// Square output edge in pixels.
    pub size: u32,
    /// Solid backdrop under every layer.
    pub background: Rgba8,
    /// Dark-mode ground colors.
    pub is_dark_mode: bool,
    /// Keep the noise overlays (drawn at their first frame).
    pub wave_effect: bool,
    /// Mixed into every lattice seed.
    pub seed: u64,
    /// Encoding used by [`save_still`] when the path has no recognizable extension.
    pub format: StillFormat,
    /// JPEG quality, 1..=100.
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            size: 800,
            background: Rgba8::opaque_hex(0x1a1a1a),
            is_dark_mode: false,
            wave_effect: false,
            seed: 0,
            format: StillFormat::Jpeg,
            jpeg_quality: 100,
        }
    }
}

/// A flattened static render.
#[derive(Clone, Debug, PartialEq)]
pub struct Still {
    /// Premultiplied `size×size` pixels.
    pub frame: Frame,
    /// Fallbacks taken while rendering.
    pub recovered: Vec<Recovery>,
}

/// Render one static frame of `record` and flatten it onto the background.
#[tracing::instrument(skip(record, library), fields(id = %record.id))]
pub fn export_still(
    record: &CraterRecord,
    library: &SilhouetteLibrary,
    opts: &ExportOptions,
) -> GlyphResult<Still> {
    let mut driver = AnimationDriver::new(
        library.clone(),
        DriverOpts {
            seed: opts.seed,
            ..DriverOpts::default()
        },
    )?;
    let rendered = driver.render_layers(
        record,
        RenderOptions {
            disable_animations: true,
            size: opts.size,
            is_dark_mode: opts.is_dark_mode,
            disable_wave_effect: !opts.wave_effect,
        },
    )?;
    let frame = flatten_layers(&rendered.layers, opts.size, opts.background)?;
    driver.dispose(rendered.handle);

    Ok(Still {
        frame,
        recovered: rendered.recovered,
    })
}

fn straight_rgba(frame: &Frame) -> Vec<u8> {
    if !frame.premultiplied {
        return frame.data.clone();
    }
    let mut out = frame.data.clone();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

/// Encode a frame as PNG or JPEG bytes.
pub fn encode_still(
    frame: &Frame,
    format: StillFormat,
    jpeg_quality: u8,
) -> GlyphResult<Vec<u8>> {
    let rgba = RgbaImage::from_raw(frame.width, frame.height, straight_rgba(frame))
        .ok_or_else(|| GlyphError::render("frame buffer does not match its dimensions"))?;

    let mut buf = Vec::new();
    match format {
        StillFormat::Png => {
            rgba
                .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
                .context("encode png")?;
        }
        StillFormat::Jpeg => {
            let rgb: RgbImage = image::DynamicImage::ImageRgba8(rgba).to_rgb8();
            let quality = jpeg_quality.clamp(1, 100);
            rgb
                .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
                .context("encode jpeg")?;
        }
    }
    Ok(buf)
}

/// Encode `frame` and write it to `path`. The extension picks the format, falling back to
/// `opts.format`.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_still(
    frame: &Frame,
    path: impl AsRef<Path>,
    opts: &ExportOptions,
) -> GlyphResult<StillFormat> {
    let path = path.as_ref();
    let format = StillFormat::from_path(path).unwrap_or(opts.format);
    let bytes = encode_still(frame, format, opts.jpeg_quality)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(format)
}

#[cfg(test)]
#[path = "../../tests/unit/export/still.rs"]
mod tests;
