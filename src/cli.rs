use clap::Parser;
use std::path::PathBuf;

// Build version with stack info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "UI:     eframe/egui 0.33\n",
    "Images: image 0.25 (exr, png, jpeg, tiff, tga, hdr)\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Video timeline slider demo
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// First frame of the slider range
    #[arg(long = "min", value_name = "N", default_value_t = 0)]
    pub min: i64,

    /// Last frame of the slider range
    #[arg(long = "max", value_name = "N", default_value_t = 1000)]
    pub max: i64,

    /// Initial frame
    #[arg(long = "value", value_name = "N", default_value_t = 0)]
    pub value: i64,

    /// Frames to mark (can be specified multiple times)
    #[arg(short = 'm', long = "mark", value_name = "N")]
    pub marks: Vec<i64>,

    /// Start zoomed into a frame range
    #[arg(long = "zoom", value_names = ["START", "END"], num_args = 2)]
    pub zoom: Option<Vec<i64>>,

    /// Show generated demo tracks and a header sparkline
    #[arg(short = 'd', long = "demo")]
    pub demo: bool,

    /// Enable debug logging to file (default: scrubline.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

impl Args {
    /// Zoom range as a pair, when given.
    pub fn zoom_range(&self) -> Option<(i64, i64)> {
        match self.zoom.as_deref() {
            Some([start, end]) => Some((*start, *end)),
            _ => None,
        }
    }
}

/// Batch resize/pad images for model input
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct ResizeArgs {
    /// Input files or glob patterns
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Output directory
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Uniform scale factor
    #[arg(short = 's', long = "scale", value_name = "FACTOR", conflicts_with = "scale_xy")]
    pub scale: Option<f64>,

    /// Separate x and y scale factors
    #[arg(long = "scale-xy", value_names = ["X", "Y"], num_args = 2)]
    pub scale_xy: Option<Vec<f64>>,

    /// Pad bottom/right so both dimensions divide this stride
    #[arg(short = 'p', long = "pad-to-stride", value_name = "N")]
    pub pad_to_stride: Option<u32>,

    /// Load Resizer settings from a JSON file (flags override it)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging to file (default: scrubline-resize.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_args() {
        let args = Args::parse_from(["scrubline", "--max", "500", "-m", "10", "-m", "20", "--zoom", "5", "50", "-vv"]);
        assert_eq!(args.max, 500);
        assert_eq!(args.marks, vec![10, 20]);
        assert_eq!(args.zoom_range(), Some((5, 50)));
        assert_eq!(args.verbosity, 2);
        assert!(args.log_file.is_none());
    }

    /// Test: -l without a value means "default log file"
    #[test]
    fn test_log_flag_without_path() {
        let args = Args::parse_from(["scrubline", "-l"]);
        assert_eq!(args.log_file, Some(None));
    }

    #[test]
    fn test_resize_args() {
        let args = ResizeArgs::parse_from(["resize", "a/*.png", "b.jpg", "-o", "out", "-s", "0.5", "-p", "16"]);
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.scale, Some(0.5));
        assert_eq!(args.pad_to_stride, Some(16));

        assert!(ResizeArgs::try_parse_from(["resize", "x.png", "-o", "out", "-s", "2", "--scale-xy", "1", "2"]).is_err());
    }
}
