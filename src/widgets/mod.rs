//! UI widgets
//!
//! Each widget owns its state and reports through the EventBus

pub mod slider;
