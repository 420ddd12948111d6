//! Batch resize/pad images for model input.
//!
//! Expands glob patterns, runs every image through a `Resizer` in parallel and
//! writes the results into the output directory under their original names.

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use scrubline::cli::ResizeArgs;
use scrubline::config::{self, AppSettings, PathConfig};
use scrubline::logging;
use scrubline::transforms::resizing::load_example;
use scrubline::transforms::{Example, Field, Resizer, Scale};

/// Expand inputs: glob patterns match files, anything else is taken as a path.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let matches: Vec<PathBuf> = glob::glob(pattern)
            .with_context(|| format!("Invalid glob pattern: {}", pattern))?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    None
                }
            })
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("No files match: {}", pattern);
        }
        files.extend(matches);
    }
    Ok(files)
}

/// Settings file, then --config, then flags.
fn build_resizer(args: &ResizeArgs, path_config: &PathConfig) -> Result<Resizer> {
    let mut resizer = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read resizer config: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse resizer config: {}", path.display()))?
        }
        None => AppSettings::load(&config::config_file(config::SETTINGS_FILE, path_config))?.resizer,
    };

    if let Some(s) = args.scale {
        resizer.scale = Scale::Uniform(s);
    }
    if let Some([x, y]) = args.scale_xy.as_deref() {
        resizer.scale = Scale::Xy([*x, *y]);
    }
    if let Some(stride) = args.pad_to_stride {
        resizer.pad_to_stride = stride;
    }
    Ok(resizer)
}

fn output_path(out_dir: &Path, example: &Example) -> Option<PathBuf> {
    match example.get("path") {
        Some(Field::Text(src)) => Path::new(src).file_name().map(|name| out_dir.join(name)),
        _ => None,
    }
}

fn main() -> Result<()> {
    let args = ResizeArgs::parse();
    let path_config = PathConfig::from_env_and_cli(args.config_dir.clone());
    logging::init_logger(args.verbosity, args.log_file.as_ref(), "scrubline-resize.log", &path_config)?;
    debug!("Command-line args: {:?}", args);

    let resizer = build_resizer(&args, &path_config)?;
    info!(
        "Resizer: key={} scale={:?} stride={}",
        resizer.image_key, resizer.scale, resizer.pad_to_stride
    );

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        bail!("No input images found");
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create output directory: {}", args.out_dir.display()))?;

    let mut batch = Vec::with_capacity(files.len());
    for path in &files {
        let example = load_example(path, &resizer.image_key)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        batch.push(example);
    }

    let mut written = 0usize;
    for (path, result) in files.iter().zip(resizer.transform_batch(batch)) {
        let example = result.with_context(|| format!("Failed to transform {}", path.display()))?;
        let Some(out) = output_path(&args.out_dir, &example) else {
            warn!("No output name for {}", path.display());
            continue;
        };
        if let Some(Field::Image(img)) = example.get(&resizer.image_key) {
            img.save(&out)
                .with_context(|| format!("Failed to save {}", out.display()))?;
            debug!("{} -> {} ({}x{})", path.display(), out.display(), img.width(), img.height());
            written += 1;
        }
    }

    info!("Wrote {} of {} images to {}", written, files.len(), args.out_dir.display());
    println!("{} images written to {}", written, args.out_dir.display());
    Ok(())
}
