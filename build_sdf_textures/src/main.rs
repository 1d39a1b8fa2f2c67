//! This binary crate provides a CLI utility for batch converting a directory of images into
//! signed distance field textures. It's a thin frontend to
//! [sdf_texture_tools](../sdf_texture_tools), which does the file handling, and
//! [sdf_texture_renderer](../sdf_texture_renderer), which has the technical details on how the
//! fields are computed.
//!
//! ## Usage
//!
//! This tool will create `out_dir` if necessary, and writes one `<name>_SDF.png` per source
//! image (plus `<name>_SDF_Alpha.png` with `--alpha`). Existing outputs are skipped unless
//! `--overwrite` is given.
//!
//! ```
//! $ build_sdf_textures /path/to/image_dir /path/to/out_dir --fill-mode source-rgb --inside-distance 4
//! ```
//!
//! When a settings file is given with `--settings`, it provides the defaults for every option
//! not set on the command line, and the effective settings are written back to it afterwards.

use std::{
    fs::{create_dir_all, read_dir},
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::Instant,
};

use clap::{command, crate_authors, crate_description, crate_version, value_parser, Arg};
use sdf_texture_tools::sdf_texture_renderer::{
    generate, generate_alpha_mask, DistanceStrategy, FillMode, SdfConfig,
};
use sdf_texture_tools::{output_path, read_texture, write_texture, OutputKind, Settings};
use spmc::{channel, Receiver};
use tracing::error;

static TOTAL_TEXTURES_WRITTEN: AtomicUsize = AtomicUsize::new(0);
static TOTAL_TEXTURES_SKIPPED: AtomicUsize = AtomicUsize::new(0);

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "tga", "bmp"];

/// A worker function that converts source images into SDF textures.
///
/// Each image is decoded once, and every requested output kind is rendered from it and written
/// to `out_dir`.
fn render_worker(
    out_dir: PathBuf,
    overwrite: bool,
    config: SdfConfig,
    kinds: Vec<OutputKind>,
    rx: Receiver<Option<PathBuf>>,
) {
    while let Ok(Some(path)) = rx.recv() {
        let path_str = path.display();

        let mut pending = Vec::with_capacity(kinds.len());
        for kind in &kinds {
            let out_path = output_path(&path, &out_dir, *kind).expect("Unable to name output file");
            if !overwrite && Path::exists(&out_path) {
                TOTAL_TEXTURES_SKIPPED.fetch_add(1, Ordering::Relaxed);
            } else {
                pending.push((*kind, out_path));
            }
        }

        if pending.is_empty() {
            continue;
        }

        println!("Processing {path_str}");

        let texture = match read_texture(&path) {
            Ok(texture) => texture,
            Err(e) => {
                error!("Failed to read {path_str}: {e}");
                continue;
            }
        };

        for (kind, out_path) in pending {
            let output = match kind {
                OutputKind::Sdf => generate(&texture, &config),
                OutputKind::SdfAlpha => generate_alpha_mask(&texture, &config),
            };

            match output.map_err(Into::into).and_then(|output| write_texture(&out_path, &output)) {
                Ok(()) => {
                    TOTAL_TEXTURES_WRITTEN.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    error!("Failed to render {} from {path_str}: {e}", out_path.display());
                }
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let matches = command!()
        .author(crate_authors!())
        .version(crate_version!())
        .before_help(crate_description!())
        .arg(Arg::new("SOURCE_DIR")
            .help("Sets the source directory to be scanned for images")
            .required(true)
            .index(1))
        .arg(Arg::new("OUT_DIR")
            .help("Sets the output directory in which the SDF textures will be placed")
            .required(true)
            .index(2))
        .arg(Arg::new("SETTINGS")
            .help("Path to a JSON settings file. Its values are used for any option not given on the command line, and the effective settings are saved back to it.")
            .required(false)
            .short('s')
            .long("settings")
            .takes_value(true))
        .arg(Arg::new("FILL_MODE")
            .help("How to fill the colour channels: solid-white, solid-black, sdf or source-rgb")
            .long("fill-mode")
            .takes_value(true)
            .value_parser(value_parser!(FillMode)))
        .arg(Arg::new("INSIDE_DISTANCE")
            .help("Distance in px inside the outline at which the field saturates")
            .long("inside-distance")
            .takes_value(true)
            .value_parser(value_parser!(f32)))
        .arg(Arg::new("OUTSIDE_DISTANCE")
            .help("Distance in px outside the outline at which the field saturates")
            .long("outside-distance")
            .takes_value(true)
            .value_parser(value_parser!(f32)))
        .arg(Arg::new("POST_PROCESS_DISTANCE")
            .help("Search radius in px of the edge refinement pass; 0 disables it")
            .long("post-process-distance")
            .takes_value(true)
            .value_parser(value_parser!(f32)))
        .arg(Arg::new("STRATEGY")
            .help("Nearest boundary search: exhaustive (exact, slow on large images) or transform")
            .long("strategy")
            .takes_value(true)
            .value_parser(value_parser!(DistanceStrategy)))
        .arg(Arg::new("ALPHA")
            .help("Also write a texture that keeps the source colour and stores the field in its alpha channel")
            .long("alpha")
            .takes_value(false))
        .arg(Arg::new("OVERWRITE")
            .help("Overwrite existing textures; by default, generation will be skipped for any image with a matching file in the output directory. Note that the contents of the file are not inspected; only the name.")
            .required(false)
            .long("overwrite")
            .takes_value(false))
        .get_matches();

    let source_dir = Path::new(matches.get_one::<String>("SOURCE_DIR").unwrap());
    let out_dir = PathBuf::from(matches.get_one::<String>("OUT_DIR").unwrap());
    let settings_path = matches.get_one::<String>("SETTINGS").map(PathBuf::from);
    let overwrite = matches.is_present("OVERWRITE");

    // The settings store is the only async code in here, so spin up a runtime just for it.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Unable to start the async runtime");

    let mut config = match &settings_path {
        Some(path) => runtime
            .block_on(sdf_texture_tools::load_settings(path))
            .expect("Unable to load settings.")
            .to_config(),
        None => SdfConfig::default(),
    };

    if let Some(fill_mode) = matches.get_one::<FillMode>("FILL_MODE") {
        config.fill_mode = *fill_mode;
    }
    if let Some(distance) = matches.get_one::<f32>("INSIDE_DISTANCE") {
        config.inside_distance = *distance;
    }
    if let Some(distance) = matches.get_one::<f32>("OUTSIDE_DISTANCE") {
        config.outside_distance = *distance;
    }
    if let Some(radius) = matches.get_one::<f32>("POST_PROCESS_DISTANCE") {
        config.post_process_radius = *radius;
    }
    if let Some(strategy) = matches.get_one::<DistanceStrategy>("STRATEGY") {
        config.strategy = *strategy;
    }

    config.validate().expect("Invalid configuration");

    let mut kinds = vec![OutputKind::Sdf];
    if matches.is_present("ALPHA") {
        kinds.push(OutputKind::SdfAlpha);
    }

    create_dir_all(&out_dir).expect("Unable to create output directory");

    let (mut tx, rx) = channel();
    let num_threads = num_cpus::get();
    println!("Starting {num_threads} worker threads...");

    let join_handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let out_dir = out_dir.clone();
            let kinds = kinds.clone();
            let rx = rx.clone();
            thread::spawn(move || render_worker(out_dir, overwrite, config, kinds, rx))
        })
        .collect();

    let render_start = Instant::now();

    for dir_entry in read_dir(source_dir)
        .expect("Unable to open source directory")
        .flatten()
    {
        let path = dir_entry.path();
        let is_image = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map_or(false, |extension| {
                IMAGE_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
            });

        if path.is_file() && is_image {
            tx.send(Some(path))
                .expect("Unable to push job to thread worker");
        }
    }

    for _ in 0..num_threads {
        // Sentinel value to signal the end of the work pool for each thread
        tx.send(None)
            .expect("Unable to push completion job to thread worker");
    }

    for handle in join_handles {
        handle.join().unwrap();
    }

    let total_written = TOTAL_TEXTURES_WRITTEN.load(Ordering::Relaxed);
    let total_skipped = TOTAL_TEXTURES_SKIPPED.load(Ordering::Relaxed);
    let render_duration = render_start.elapsed();

    if total_skipped > 0 {
        println!("Skipped {total_skipped} existing texture(s)");
    }

    if total_written > 0 {
        let duration_per_texture = render_duration / total_written as u32;

        println!(
            "Rendered {} texture(s) in {:?} ({:?}/texture)",
            total_written, render_duration, duration_per_texture
        );
    }

    if let Some(path) = settings_path {
        runtime
            .block_on(sdf_texture_tools::save_settings(
                &path,
                &Settings::from_config(&config),
            ))
            .expect("Unable to save settings.");
    }
}
