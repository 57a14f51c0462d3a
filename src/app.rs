//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs ingest + selection + classification
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, PlotArgs, RunArgs, SampleArgs};
use crate::domain::{Point, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `fitc` binary.
pub fn run() -> Result<(), AppError> {
    // We want `fitc --train ... --candidates ...` to behave like
    // `fitc run ...`. Clap requires a subcommand name, so we do a small,
    // explicit rewrite of the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args, OutputMode::Full),
        Command::Fit(args) => handle_run(args, OutputMode::FitOnly),
        Command::Sample(args) => handle_sample(args),
        Command::Plot(args) => handle_plot(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    FitOnly,
}

fn handle_run(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let mut config = run_config_from_args(&args);
    if mode == OutputMode::FitOnly {
        config.test_path = None;
    }

    let run = pipeline::run_pipeline(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.training, &run.candidates, &run.fits, &config)
    );

    if !run.results.is_empty() {
        println!(
            "{}",
            crate::report::format_classifications(&run.results, &run.fits)
        );
    }

    if config.plot {
        for (index, fit) in run.fits.iter().enumerate() {
            let overlay = overlay_for(index, &run.results);
            let plot =
                crate::plot::render_fit_plot(fit, &overlay, config.plot_width, config.plot_height);
            println!("{plot}");
        }
    }

    if let Some(path) = &config.export_mapping {
        crate::io::export::write_mapping_csv(path, &run.results, &run.fits)?;
        println!("Wrote mapping CSV to {}", path.display());
    }
    if let Some(path) = &config.export_fits {
        crate::io::curve::write_fits_json(path, &run.fits, config.loss)?;
        println!("Wrote fits JSON to {}", path.display());
    }

    Ok(())
}

/// Points to overlay on one fit's plot: its own matches as `*`, plus every
/// point that matched no curve at all as `x`.
fn overlay_for(
    fit_index: usize,
    results: &[crate::domain::ClassifiedPoint],
) -> Vec<(Point, bool)> {
    results
        .iter()
        .filter_map(|r| match r.matched {
            Some(m) if m.index == fit_index => Some((r.point, true)),
            Some(_) => None,
            None => Some((r.point, false)),
        })
        .collect()
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = crate::data::SampleConfig {
        out_dir: args.out.clone(),
        candidate_count: args.candidates,
        training_count: args.training,
        test_count: args.test,
        x_start: args.x_start,
        x_end: args.x_end,
        x_step: args.x_step,
        noise_sigma: args.noise,
        outlier_prob: args.outlier_prob,
        outlier_k: args.outlier_k,
        seed: args.seed,
    };

    let data = crate::data::generate_sample(&config)?;
    crate::data::write_sample(&data, &config.out_dir)?;

    println!(
        "Wrote {}/ideal.csv ({} curves), {}/train.csv ({} curves), {}/test.csv ({} points)",
        config.out_dir.display(),
        data.candidates.len(),
        config.out_dir.display(),
        data.training.len(),
        config.out_dir.display(),
        data.test_points.len(),
    );

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file = crate::io::curve::read_fits_json(&args.fits)?;
    for record in &file.fits {
        let plot = crate::plot::render_fit_record_plot(record, args.width, args.height);
        println!("{plot}");
    }
    Ok(())
}

pub fn run_config_from_args(args: &RunArgs) -> RunConfig {
    RunConfig {
        train_path: args.train.clone(),
        candidates_path: args.candidates.clone(),
        test_path: args.test.clone(),
        loss: args.loss,
        tolerance_factor: args.tolerance_factor,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_mapping: args.export_mapping.clone(),
        export_fits: args.export_fits.clone(),
    }
}

/// Rewrite argv so `fitc` defaults to `fitc run`.
///
/// Rules:
/// - `fitc --train a.csv ...`     -> `fitc run --train a.csv ...`
/// - `fitc --help/--version/-h`   -> unchanged (show top-level help/version)
/// - explicit subcommands         -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "fit" | "sample" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClassifiedPoint, CurveMatch};

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_flags_get_the_run_subcommand() {
        let out = rewrite_args(argv(&["fitc", "--train", "a.csv"]));
        assert_eq!(out[1], "run");
        assert_eq!(out[2], "--train");
    }

    #[test]
    fn explicit_subcommands_are_untouched() {
        let out = rewrite_args(argv(&["fitc", "sample", "--seed", "7"]));
        assert_eq!(out[1], "sample");
    }

    #[test]
    fn help_is_untouched() {
        let out = rewrite_args(argv(&["fitc", "--help"]));
        assert_eq!(out[1], "--help");
    }

    #[test]
    fn overlay_separates_own_matches_from_global_misses() {
        let results = vec![
            ClassifiedPoint {
                point: Point { x: 1.0, y: 1.0 },
                matched: Some(CurveMatch {
                    index: 0,
                    distance: 0.1,
                }),
            },
            ClassifiedPoint {
                point: Point { x: 2.0, y: 2.0 },
                matched: Some(CurveMatch {
                    index: 1,
                    distance: 0.1,
                }),
            },
            ClassifiedPoint {
                point: Point { x: 3.0, y: 3.0 },
                matched: None,
            },
        ];

        let overlay = overlay_for(0, &results);
        assert_eq!(overlay.len(), 2);
        assert!(overlay[0].1);
        assert!(!overlay[1].1);
    }
}
