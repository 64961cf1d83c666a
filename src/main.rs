//! chromasom CLI - Colour clustering with a Self-Organizing Map
//!
//! Command-line front end: configures a map, trains it on a background
//! thread while showing progress, and renders the result to PNG.

use chromasom::render::{render_comparison, render_grid, save_png};
use chromasom::{
    palette, ChromaError, Config, MapQuality, Result, SampleSet, Som, StoppingCriterion,
    TrainingOutcome,
};
use clap::{Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "chromasom")]
#[command(author = "chromasom Contributors")]
#[command(version)]
#[command(about = "Colour clustering with a Kohonen Self-Organizing Map", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a map on sample colours and render it
    Train(TrainArgs),

    /// List the preset sample colours
    Palette,
}

#[derive(clap::Args)]
struct TrainArgs {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Square grid size, sets both width and height (default: 50)
    #[arg(short, long)]
    size: Option<usize>,

    /// Grid width (overrides --size)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides --size)
    #[arg(long)]
    height: Option<usize>,

    /// Initial learning rate (default: 0.1)
    #[arg(short, long)]
    learning_rate: Option<f64>,

    /// Initial neighbourhood radius in cells (default: 150)
    #[arg(short, long)]
    radius: Option<u32>,

    /// Stop after this many iterations (default: 5000)
    #[arg(short = 'n', long, conflicts_with = "epochs")]
    iterations: Option<usize>,

    /// Stop after this many epochs (width x height x samples iterations each)
    #[arg(short, long)]
    epochs: Option<usize>,

    /// Number of preset colours to learn when no --color is given (default: 3)
    #[arg(short, long)]
    inputs: Option<usize>,

    /// Sample colour, as a preset name or #rrggbb (repeatable)
    #[arg(short, long = "color")]
    colors: Vec<String>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Cancel training after this many seconds
    #[arg(long)]
    max_seconds: Option<f64>,

    /// Output image of the trained grid
    #[arg(short, long, default_value = "som.png")]
    output: PathBuf,

    /// Also write the untrained grid to this file
    #[arg(long)]
    before: Option<PathBuf>,

    /// Also write a before/after comparison to this file
    #[arg(long)]
    comparison: Option<PathBuf>,

    /// Pixels per grid cell (default: 10)
    #[arg(long)]
    scale: Option<u32>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Train(args) => train_map(args),
        Commands::Palette => show_palette(),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Merges the configuration file (if any) with command-line overrides.
fn resolve_config(args: &TrainArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    if let Some(size) = args.size {
        config.som.width = size;
        config.som.height = size;
    }
    if let Some(width) = args.width {
        config.som.width = width;
    }
    if let Some(height) = args.height {
        config.som.height = height;
    }
    if let Some(lr) = args.learning_rate {
        config.som.initial_learning_rate = lr;
    }
    if let Some(radius) = args.radius {
        config.som.initial_radius = radius;
    }
    if let Some(n) = args.iterations {
        config.som.stopping = StoppingCriterion::Iterations(n);
    }
    if let Some(n) = args.epochs {
        config.som.stopping = StoppingCriterion::Epochs(n);
    }
    if args.seed.is_some() {
        config.som.seed = args.seed;
    }
    if let Some(scale) = args.scale {
        config.render.scale = scale;
    }

    config.som.validate()?;
    Ok(config)
}

/// Builds the sample set from explicit colours or from the presets.
fn resolve_samples(args: &TrainArgs) -> Result<SampleSet> {
    if args.colors.is_empty() {
        return SampleSet::new(palette::default_samples(args.inputs.unwrap_or(3)));
    }

    if let Some(n) = args.inputs {
        if n != args.colors.len() {
            return Err(ChromaError::Config(format!(
                "--inputs is {} but {} colours were given",
                n,
                args.colors.len()
            )));
        }
    }

    let colors = args
        .colors
        .iter()
        .map(|c| palette::parse_color(c))
        .collect::<Result<Vec<_>>>()?;
    SampleSet::new(colors)
}

/// Converts `--max-seconds` into a duration. Values a `Duration` cannot
/// hold are configuration errors.
fn time_limit(max_seconds: Option<f64>) -> Result<Option<Duration>> {
    max_seconds
        .map(|secs| {
            if !secs.is_finite() || secs < 0.0 {
                return Err(ChromaError::Config(format!(
                    "--max-seconds must be a finite, non-negative number, got {}",
                    secs
                )));
            }
            Duration::try_from_secs_f64(secs)
                .map_err(|e| ChromaError::Config(format!("--max-seconds {}: {}", secs, e)))
        })
        .transpose()
}

fn train_map(args: TrainArgs) -> Result<()> {
    let start_time = Instant::now();
    let config = resolve_config(&args)?;
    let samples = resolve_samples(&args)?;
    let limit = time_limit(args.max_seconds)?;

    let (width, height) = (config.som.width, config.som.height);
    let budget = config
        .som
        .stopping
        .iteration_budget(width, height, samples.len());

    println!("chromasom - Kohonen colour map");
    println!(
        "   Grid: {}x{}, {} samples, lr={}, radius={}",
        width,
        height,
        samples.len(),
        config.som.initial_learning_rate,
        config.som.initial_radius
    );
    println!();

    let som = Som::new(&config.som, samples);
    let before = som.snapshot();
    let quality_before = MapQuality::of(&som);
    println!(
        "✓ Initialized grid (QE {:.4}, TE {:.3})",
        quality_before.quantization_error, quality_before.topographic_error
    );

    let bar_style = ProgressStyle::default_bar()
        .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
        .map_err(|e| ChromaError::Config(e.to_string()))?
        .progress_chars("█▓▒░  ");

    let pb = ProgressBar::new(budget as u64);
    pb.set_style(bar_style);
    pb.set_message("Training SOM...");

    // A limit too far in the future to represent is no limit at all
    let deadline = limit.and_then(|limit| Instant::now().checked_add(limit));

    let summary = thread::scope(|scope| {
        let trainer = scope.spawn(|| som.train(budget, |i| pb.set_position(i as u64)));

        while !trainer.is_finished() {
            pb.set_message(format!(
                "Training SOM... lr={:.5} radius={}",
                som.learning_rate(),
                som.radius()
            ));
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline && !som.is_stop_requested() {
                    info!("Time limit reached, requesting stop");
                    som.request_stop();
                }
            }
            thread::sleep(Duration::from_millis(50));
        }

        trainer
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    });

    pb.finish_and_clear();
    match summary.outcome {
        TrainingOutcome::Cancelled => {
            println!("✓ Training cancelled after {} iterations", summary.iterations)
        }
        _ => println!("✓ Trained for {} iterations", summary.iterations),
    }

    let after = som.snapshot();
    let quality_after = MapQuality::of(&som);

    let scale = config.render.scale;
    save_png(&render_grid(&after, scale)?, &args.output)?;
    println!("✓ Saved trained grid to {}", args.output.display());

    if let Some(path) = &args.before {
        save_png(&render_grid(&before, scale)?, path)?;
        println!("✓ Saved untrained grid to {}", path.display());
    }
    if let Some(path) = &args.comparison {
        save_png(
            &render_comparison(&before, &after, scale, config.render.gutter)?,
            path,
        )?;
        println!("✓ Saved comparison to {}", path.display());
    }

    println!();
    println!("Training complete in {}", HumanDuration(start_time.elapsed()));
    println!("   Iterations: {}/{}", summary.iterations, budget);
    println!(
        "   Final learning rate: {:.6}, radius: {}",
        summary.learning_rate, summary.radius
    );
    println!(
        "   Quantization error: {:.4} -> {:.4}",
        quality_before.quantization_error, quality_after.quantization_error
    );
    println!(
        "   Topographic error: {:.3} -> {:.3}",
        quality_before.topographic_error, quality_after.topographic_error
    );

    Ok(())
}

fn show_palette() -> Result<()> {
    println!("Preset colours (used in order when --color is not given):");
    for (i, (name, rgb)) in palette::PRESETS.iter().enumerate() {
        println!(
            "  {}. {:<8} #{:02x}{:02x}{:02x}",
            i + 1,
            name,
            rgb[0],
            rgb[1],
            rgb[2]
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train_args(flags: &[&str]) -> TrainArgs {
        let argv = ["chromasom", "train"].iter().chain(flags).copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Train(args) => args,
            Commands::Palette => panic!("expected the train subcommand"),
        }
    }

    #[test]
    fn test_time_limit() {
        assert_eq!(time_limit(None).unwrap(), None);
        assert_eq!(time_limit(Some(1.5)).unwrap(), Some(Duration::from_millis(1500)));
        assert_eq!(time_limit(Some(0.0)).unwrap(), Some(Duration::ZERO));

        for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 1e30, -1.0] {
            assert!(
                matches!(time_limit(Some(bad)), Err(ChromaError::Config(_))),
                "{} was accepted",
                bad
            );
        }
    }

    #[test]
    fn test_max_seconds_flag_rejects_infinity() {
        let args = train_args(&["--max-seconds", "inf"]);
        assert!(matches!(time_limit(args.max_seconds), Err(ChromaError::Config(_))));
    }

    #[test]
    fn test_width_and_height_override_size() {
        let config = resolve_config(&train_args(&["--size", "20", "--width", "30"])).unwrap();
        assert_eq!((config.som.width, config.som.height), (30, 20));

        let config = resolve_config(&train_args(&["--height", "7", "-s", "12"])).unwrap();
        assert_eq!((config.som.width, config.som.height), (12, 7));

        let config = resolve_config(&train_args(&[])).unwrap();
        assert_eq!((config.som.width, config.som.height), (50, 50));
    }

    #[test]
    fn test_stopping_flags() {
        let config = resolve_config(&train_args(&["--epochs", "2"])).unwrap();
        assert_eq!(config.som.stopping, StoppingCriterion::Epochs(2));

        let config = resolve_config(&train_args(&["-n", "40"])).unwrap();
        assert_eq!(config.som.stopping, StoppingCriterion::Iterations(40));

        let both = ["chromasom", "train", "-n", "40", "--epochs", "2"];
        assert!(Cli::try_parse_from(both).is_err());
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        assert!(resolve_config(&train_args(&["--width", "0"])).is_err());
        assert!(resolve_config(&train_args(&["--learning-rate=-0.5"])).is_err());
    }

    #[test]
    fn test_inputs_must_match_colors() {
        let args = train_args(&["--inputs", "2", "-c", "red"]);
        assert!(matches!(resolve_samples(&args), Err(ChromaError::Config(_))));

        let args = train_args(&["--inputs", "2", "-c", "red", "--color", "#0000ff"]);
        assert_eq!(resolve_samples(&args).unwrap().len(), 2);
    }

    #[test]
    fn test_samples_from_presets_or_colors() {
        assert_eq!(resolve_samples(&train_args(&[])).unwrap().len(), 3);
        assert_eq!(resolve_samples(&train_args(&["-i", "4"])).unwrap().len(), 4);

        let samples = resolve_samples(&train_args(&["-c", "red", "-c", "#0000ff"])).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.get(1), Some(&[0.0, 0.0, 1.0]));

        assert!(resolve_samples(&train_args(&["-c", "not-a-colour"])).is_err());
    }
}
