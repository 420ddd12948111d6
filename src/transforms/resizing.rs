//! Image resizing and stride padding for example streams.
//!
//! Scaling runs first (skipped at 1.0), then zero padding on the bottom and
//! right edges up to the next multiple of the stride (skipped at stride <= 1).
//! Pixel depth is preserved through both steps.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Pixel};
use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::example::{Example, Field};

#[derive(Debug)]
pub enum ResizeError {
    MissingKey(String),
    NotAnImage { key: String, found: &'static str },
    InvalidScale(f64, f64),
    EmptyOutput { width: u32, height: u32 },
    Image(image::ImageError),
}

impl std::fmt::Display for ResizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizeError::MissingKey(key) => write!(f, "Missing key: {}", key),
            ResizeError::NotAnImage { key, found } => {
                write!(f, "Field '{}' is {}, expected image", key, found)
            }
            ResizeError::InvalidScale(x, y) => write!(f, "Invalid scale: ({}, {})", x, y),
            ResizeError::EmptyOutput { width, height } => {
                write!(f, "Scaled image is empty: {}x{}", width, height)
            }
            ResizeError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for ResizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResizeError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for ResizeError {
    fn from(e: image::ImageError) -> Self {
        ResizeError::Image(e)
    }
}

/// Scale factor: one for both axes, or `[x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scale {
    Uniform(f64),
    Xy([f64; 2]),
}

impl Default for Scale {
    fn default() -> Self {
        Scale::Uniform(1.0)
    }
}

impl Scale {
    pub fn factors(self) -> (f64, f64) {
        match self {
            Scale::Uniform(s) => (s, s),
            Scale::Xy([x, y]) => (x, y),
        }
    }

    pub fn is_identity(self) -> bool {
        self.factors() == (1.0, 1.0)
    }
}

/// `(pad_bottom, pad_right)` making both dimensions divisible by `stride`.
/// A zero stride needs no padding.
pub fn find_padding_for_stride(height: u32, width: u32, stride: u32) -> (u32, u32) {
    if stride == 0 {
        return (0, 0);
    }
    let pad_bottom = (stride - height % stride) % stride;
    let pad_right = (stride - width % stride) % stride;
    (pad_bottom, pad_right)
}

fn pad_buffer<P: Pixel>(
    src: &ImageBuffer<P, Vec<P::Subpixel>>,
    width: u32,
    height: u32,
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let mut out = ImageBuffer::new(width, height);
    imageops::replace(&mut out, src, 0, 0);
    out
}

/// Zero-pad the bottom and right edges so both dimensions divide `stride`.
pub fn pad_to_stride(image: &DynamicImage, stride: u32) -> DynamicImage {
    let (pad_bottom, pad_right) = find_padding_for_stride(image.height(), image.width(), stride);
    if pad_bottom == 0 && pad_right == 0 {
        return image.clone();
    }
    let w = image.width() + pad_right;
    let h = image.height() + pad_bottom;
    trace!("pad {}x{} -> {}x{}", image.width(), image.height(), w, h);

    match image {
        DynamicImage::ImageLuma8(b) => DynamicImage::ImageLuma8(pad_buffer(b, w, h)),
        DynamicImage::ImageLumaA8(b) => DynamicImage::ImageLumaA8(pad_buffer(b, w, h)),
        DynamicImage::ImageRgb8(b) => DynamicImage::ImageRgb8(pad_buffer(b, w, h)),
        DynamicImage::ImageRgba8(b) => DynamicImage::ImageRgba8(pad_buffer(b, w, h)),
        DynamicImage::ImageLuma16(b) => DynamicImage::ImageLuma16(pad_buffer(b, w, h)),
        DynamicImage::ImageLumaA16(b) => DynamicImage::ImageLumaA16(pad_buffer(b, w, h)),
        DynamicImage::ImageRgb16(b) => DynamicImage::ImageRgb16(pad_buffer(b, w, h)),
        DynamicImage::ImageRgba16(b) => DynamicImage::ImageRgba16(pad_buffer(b, w, h)),
        DynamicImage::ImageRgb32F(b) => DynamicImage::ImageRgb32F(pad_buffer(b, w, h)),
        DynamicImage::ImageRgba32F(b) => DynamicImage::ImageRgba32F(pad_buffer(b, w, h)),
        other => DynamicImage::ImageRgba32F(pad_buffer(&other.to_rgba32f(), w, h)),
    }
}

/// Bilinear resize by a scale factor. New dimensions are truncated.
pub fn resize_image(image: &DynamicImage, scale: Scale) -> Result<DynamicImage, ResizeError> {
    let (sx, sy) = scale.factors();
    if !(sx.is_finite() && sy.is_finite() && sx > 0.0 && sy > 0.0) {
        return Err(ResizeError::InvalidScale(sx, sy));
    }
    let width = (image.width() as f64 * sx) as u32;
    let height = (image.height() as f64 * sy) as u32;
    if width == 0 || height == 0 {
        return Err(ResizeError::EmptyOutput { width, height });
    }
    Ok(image.resize_exact(width, height, FilterType::Triangle))
}

/// Open an image file as a one-field example plus its source path.
pub fn load_example(path: &Path, image_key: &str) -> Result<Example, ResizeError> {
    let img = image::open(path)?;
    let mut example = Example::new();
    example.insert(image_key.to_string(), Field::Image(img));
    example.insert("path".to_string(), Field::Text(path.display().to_string()));
    Ok(example)
}

/// Resize and/or pad the image under one key of every example.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resizer {
    pub image_key: String,
    pub scale: Scale,
    /// Max model stride; > 1 pads bottom/right after scaling
    pub pad_to_stride: u32,
}

impl Default for Resizer {
    fn default() -> Self {
        Self {
            image_key: "image".to_string(),
            scale: Scale::default(),
            pad_to_stride: 1,
        }
    }
}

impl Resizer {
    pub fn input_keys(&self) -> Vec<String> {
        vec![self.image_key.clone()]
    }

    pub fn output_keys(&self) -> Vec<String> {
        self.input_keys()
    }

    /// Transform one example; other fields pass through untouched.
    pub fn transform_example(&self, mut example: Example) -> Result<Example, ResizeError> {
        let image = match example.get_mut(&self.image_key) {
            Some(Field::Image(image)) => image,
            Some(other) => {
                return Err(ResizeError::NotAnImage {
                    key: self.image_key.clone(),
                    found: other.kind_name(),
                });
            }
            None => return Err(ResizeError::MissingKey(self.image_key.clone())),
        };

        if !self.scale.is_identity() {
            *image = resize_image(image, self.scale)?;
        }
        if self.pad_to_stride > 1 {
            *image = pad_to_stride(image, self.pad_to_stride);
        }
        Ok(example)
    }

    /// Lazy, in-order map over a stream of examples.
    pub fn transform_dataset<'a, I>(
        &'a self,
        input: I,
    ) -> impl Iterator<Item = Result<Example, ResizeError>> + 'a
    where
        I: IntoIterator<Item = Example>,
        I::IntoIter: 'a,
    {
        input.into_iter().map(move |example| self.transform_example(example))
    }

    /// Transform a batch in parallel. Output order matches input order.
    pub fn transform_batch(&self, batch: Vec<Example>) -> Vec<Result<Example, ResizeError>> {
        debug!(
            "resize batch of {} (scale {:?}, stride {})",
            batch.len(),
            self.scale,
            self.pad_to_stride
        );
        batch
            .into_par_iter()
            .map(|example| self.transform_example(example))
            .collect()
    }
}
