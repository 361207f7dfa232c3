use std::fs;

use ankle_cut_detection::detector_config::load_config_from_file;
use ankle_cut_detection::systems::Systems;
use ankle_cut_detection::systems::cut_points::FrameOutcome;
use ankle_cut_detection::tracking::{PoseFrame, decode_json_frames, decode_msgpack_frames};
use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};

use crate::cli::{Cli, InputFormat};

mod cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger from the environment

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    debug!("Started; args: {:?}", cli);

    let mut config = load_config_from_file(&cli.config_path)?;
    if let Some(threshold) = cli.threshold {
        info!("Stability threshold overridden from CLI: {}", threshold);
        config.stability_threshold = threshold;
    }
    config.validate()?;

    if cli.save_config {
        config.write_config_to_file(&cli.config_path)?;
    }

    let frames = read_frames(&cli.input, cli.format)?;
    info!("Loaded {} pose frames from \"{}\"", frames.len(), &cli.input);

    let mut systems = Systems::new(&config);

    let (mut tracked, mut skipped, mut no_pose) = (0, 0, 0);
    systems.frame_stepper.play();
    for frame in frames.iter() {
        match systems.handle_frame(frame) {
            FrameOutcome::Tracked { .. } => tracked += 1,
            FrameOutcome::Skipped => skipped += 1,
            FrameOutcome::NoPose => no_pose += 1,
        }
    }
    systems.frame_stepper.pause();

    let cut_points = systems.cut_point_detector.cut_points();
    info!(
        "Done; {} frames tracked, {} skipped, {} without pose; {} cut points",
        tracked,
        skipped,
        no_pose,
        cut_points.len()
    );

    let text = serde_json::to_string_pretty(cut_points)?;
    match &cli.output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path))?;
            info!("Wrote cut points to {}", path);
        }
        None => println!("{}", text),
    }

    Ok(())
}

fn read_frames(path: &str, format: InputFormat) -> Result<Vec<PoseFrame>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read pose frames from {}", path))?;
    match format {
        InputFormat::Json => decode_json_frames(&bytes),
        InputFormat::Msgpack => decode_msgpack_frames(&bytes),
    }
}
