//! Example records: named fields flowing through a transform pipeline.

use image::DynamicImage;
use indexmap::IndexMap;

/// One record. Field order is kept so outputs read like inputs.
pub type Example = IndexMap<String, Field>;

#[derive(Clone, Debug)]
pub enum Field {
    /// Height x width x channels image, any pixel depth
    Image(DynamicImage),
    Scalar(f64),
    Text(String),
}

impl Field {
    pub fn as_image(&self) -> Option<&DynamicImage> {
        match self {
            Field::Image(img) => Some(img),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Field::Image(_) => "image",
            Field::Scalar(_) => "scalar",
            Field::Text(_) => "text",
        }
    }
}

impl From<DynamicImage> for Field {
    fn from(img: DynamicImage) -> Self {
        Field::Image(img)
    }
}

impl From<f64> for Field {
    fn from(v: f64) -> Self {
        Field::Scalar(v)
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::Text(s)
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Text(s.to_string())
    }
}
