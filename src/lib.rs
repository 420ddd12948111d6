//! Scrubline - video timeline slider and image resize/pad transforms
//!
//! Re-exports all modules for use by binary targets.

// Event plumbing
pub mod core;

// App modules
pub mod cli;
pub mod config;
pub mod logging;
pub mod transforms;
pub mod widgets;

pub use core::event_bus::{BoxedEvent, EventBus, EventEmitter, SliderEmitter, downcast_event};
pub use transforms::{Example, Field, ResizeError, Resizer, Scale};
pub use widgets::slider::{Mark, MarkKind, SliderConfig, VideoSlider, video_slider};
