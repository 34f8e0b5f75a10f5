//! Upscale command implementation

use std::process::ExitCode;

use super::{Cli, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::{load_config, merge_cli_overrides, CliOverrides};
use crate::error::Anime4kError;
use crate::upscale::upscale_file;

/// Execute the upscale command
pub fn run_upscale(cli: &Cli) -> ExitCode {
    let mut config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let overrides = CliOverrides {
        scale: cli.scale,
        push_strength: cli.push_strength,
        push_grad_strength: cli.push_grad_strength,
        threads: cli.threads,
    };
    if let Err(e) = merge_cli_overrides(&mut config, &overrides) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut options = config.upscale_options();
    options.dump_dir = cli.dump_stages.clone();

    let summary = match upscale_file(&cli.input, &cli.output, &options) {
        Ok(s) => s,
        Err(e @ Anime4kError::InvalidScale { .. }) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: Failed to serialize report: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        println!(
            "Upscaled: {} ({}x{} -> {}x{}, push {}, push-grad {})",
            cli.output.display(),
            summary.source_size[0],
            summary.source_size[1],
            summary.target_size[0],
            summary.target_size[1],
            summary.color_strength,
            summary.gradient_strength
        );
        let pipeline_ms = summary.pipeline.total.as_secs_f64() * 1000.0;
        println!(
            "  Elapsed: {:.2} ms (resize {:.2} ms, pipeline {:.2} ms)",
            summary.resize_ms + pipeline_ms,
            summary.resize_ms,
            pipeline_ms
        );
    }

    ExitCode::from(EXIT_SUCCESS)
}
