//! Heightmap images and nearest-neighbour resampling.
//!
//! Grayscale and RGB images are both accepted. Only channel 0 is read as
//! elevation; multi-channel heightmaps are assumed to be grayscale stored
//! as RGB. Sample values keep their native range (0..255 for 8-bit images,
//! 0..65535 for 16-bit ones).

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use relief_core::error::{ReliefError, ReliefResult};
use relief_core::types::GridResolution;

use crate::field::HeightField;

/// Decoded image samples, row-major, `channels` values per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHeightmap {
    width: u32,
    height: u32,
    channels: usize,
    samples: Vec<f32>,
}

impl RawHeightmap {
    pub fn new(width: u32, height: u32, channels: usize, samples: Vec<f32>) -> ReliefResult<Self> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(ReliefError::InvalidDimensions {
                x_range: width,
                y_range: height,
            });
        }
        let expected = width as usize * height as usize * channels;
        if samples.len() != expected {
            return Err(ReliefError::config(format!(
                "heightmap {width}x{height}x{channels} needs {expected} samples, got {}",
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Single-channel heightmap.
    pub fn from_grayscale(width: u32, height: u32, samples: Vec<f32>) -> ReliefResult<Self> {
        Self::new(width, height, 1, samples)
    }

    /// Convert a decoded image, keeping integer samples at their native range.
    pub fn from_image(img: DynamicImage) -> ReliefResult<Self> {
        let (width, height) = img.dimensions();
        let (channels, samples) = match img {
            DynamicImage::ImageLuma8(buf) => (1, widen(buf.into_raw())),
            DynamicImage::ImageLumaA8(buf) => (2, widen(buf.into_raw())),
            DynamicImage::ImageRgb8(buf) => (3, widen(buf.into_raw())),
            DynamicImage::ImageRgba8(buf) => (4, widen(buf.into_raw())),
            DynamicImage::ImageLuma16(buf) => (1, widen(buf.into_raw())),
            DynamicImage::ImageLumaA16(buf) => (2, widen(buf.into_raw())),
            DynamicImage::ImageRgb16(buf) => (3, widen(buf.into_raw())),
            DynamicImage::ImageRgba16(buf) => (4, widen(buf.into_raw())),
            other => (3, other.to_rgb32f().into_raw()),
        };
        Self::new(width, height, channels, samples)
    }

    /// Read and decode an image file.
    pub fn open(path: &Path) -> ReliefResult<Self> {
        let img = image::open(path).map_err(|e| ReliefError::image_load(path, e))?;
        Self::from_image(img).map_err(|e| ReliefError::image_load(path, e))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Native resolution of the image as a grid.
    pub fn resolution(&self) -> GridResolution {
        GridResolution::new(self.width, self.height)
    }

    /// Channel 0 of pixel `(x, y)`.
    pub fn intensity(&self, x: u32, y: u32) -> f32 {
        let pixel = y as usize * self.width as usize + x as usize;
        self.samples[pixel * self.channels]
    }
}

fn widen<T: Copy + Into<f32>>(raw: Vec<T>) -> Vec<f32> {
    raw.into_iter().map(Into::into).collect()
}

/// Source coordinate for logical cell `i` when mapping `src` pixels onto `dst` cells.
///
/// Nearest neighbour, no interpolation. Rounds half away from zero and clamps
/// to the last pixel, which matters when upsampling by 2x or more.
pub fn source_coordinate(i: u32, src: u32, dst: u32) -> u32 {
    let s = (i as f64 * src as f64 / dst as f64).round() as u32;
    s.min(src - 1)
}

/// Resamples a heightmap onto a logical grid of any resolution.
#[derive(Debug, Clone)]
pub struct HeightmapSampler {
    raw: RawHeightmap,
    source: Option<PathBuf>,
}

impl HeightmapSampler {
    pub fn new(raw: RawHeightmap) -> Self {
        Self { raw, source: None }
    }

    /// Load the heightmap at `path`.
    pub fn open(path: &Path) -> ReliefResult<Self> {
        let raw = RawHeightmap::open(path)?;
        log::info!(
            "Loaded heightmap {}: {}x{} px, {} channel(s)",
            path.display(),
            raw.width(),
            raw.height(),
            raw.channels()
        );
        Ok(Self {
            raw,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn raw(&self) -> &RawHeightmap {
        &self.raw
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Sample at `resolution`, or at the image's own size when `None`.
    pub fn sample(&self, resolution: Option<GridResolution>) -> ReliefResult<HeightField> {
        self.resample(resolution.unwrap_or_else(|| self.raw.resolution()))
    }

    /// Sample at the image's own size. Returns the source intensities exactly.
    pub fn sample_native(&self) -> ReliefResult<HeightField> {
        self.resample(self.raw.resolution())
    }

    /// Nearest-neighbour resample onto an `x_range × y_range` grid.
    pub fn resample(&self, resolution: GridResolution) -> ReliefResult<HeightField> {
        if !resolution.is_triangulable() {
            return Err(ReliefError::InvalidDimensions {
                x_range: resolution.x_range,
                y_range: resolution.y_range,
            });
        }

        let src_w = self.raw.width();
        let src_h = self.raw.height();
        let src_xs: Vec<u32> = (0..resolution.x_range)
            .map(|x_i| source_coordinate(x_i, src_w, resolution.x_range))
            .collect();

        let mut elevations = Vec::with_capacity(resolution.vertex_count());
        for y_i in 0..resolution.y_range {
            let src_y = source_coordinate(y_i, src_h, resolution.y_range);
            for &src_x in &src_xs {
                elevations.push(self.raw.intensity(src_x, src_y));
            }
        }

        log::debug!(
            "Resampled {src_w}x{src_h} heightmap onto {}x{} grid",
            resolution.x_range,
            resolution.y_range
        );

        HeightField::from_elevations(resolution, &elevations)
    }
}
