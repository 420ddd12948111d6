//! Data transforms applied to streams of example records.

pub mod example;
pub mod resizing;

pub use example::{Example, Field};
pub use resizing::{
    ResizeError, Resizer, Scale, find_padding_for_stride, pad_to_stride, resize_image,
};
