//! Handling the optibench CLI
//!
//! This module handles the command line parsing and the validation of the given paths.
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::error::{BenchError, BenchResult};

/// Validated command line arguments for the optibench application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// file path of the scene, which should be read in
    pub file_path: PathBuf,
    /// number of update passes to run
    pub frames: usize,
    /// destination of the rendered SVG image
    pub svg: Option<PathBuf>,
    /// destination of the CSV table of all ray paths
    pub csv: Option<PathBuf>,
}

/// Raw command line arguments as parsed by `clap`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct PartialArgs {
    /// file path of the scene description (.yaml / .yml)
    #[arg(short, long)]
    file_path: String,

    /// number of update passes to run
    #[arg(short = 'n', long, default_value_t = 1)]
    frames: usize,

    /// write the traced bench as SVG image to this path
    #[arg(short, long)]
    svg: Option<String>,

    /// write all ray paths as CSV table to this path
    #[arg(short, long)]
    csv: Option<String>,
}

/// Checks if the passed path points to an existing scene file.
fn file_path_is_valid(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn eval_file_path_input(file_path: &str) -> BenchResult<PathBuf> {
    let path = PathBuf::from(file_path);
    if file_path_is_valid(&path) {
        Ok(path)
    } else {
        Err(BenchError::Console(format!(
            "invalid scene file path: {file_path} (must be an existing .yaml or .yml file)"
        )))
    }
}

/// Checks that the directory of an output file exists.
fn eval_output_path_input(output_path: &str) -> BenchResult<PathBuf> {
    let path = PathBuf::from(output_path);
    if path.file_name().is_none() {
        return Err(BenchError::Console(format!(
            "output path {output_path} does not name a file"
        )));
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(BenchError::Console(format!(
                "output directory {} does not exist",
                parent.display()
            )))
        }
        _ => Ok(path),
    }
}

impl TryFrom<PartialArgs> for Args {
    type Error = BenchError;

    fn try_from(part_args: PartialArgs) -> BenchResult<Self> {
        let file_path = eval_file_path_input(&part_args.file_path)?;
        if part_args.frames == 0 {
            return Err(BenchError::Console(
                "number of frames must be at least 1".into(),
            ));
        }
        let svg = part_args
            .svg
            .as_deref()
            .map(eval_output_path_input)
            .transpose()?;
        let csv = part_args
            .csv
            .as_deref()
            .map(eval_output_path_input)
            .transpose()?;
        Ok(Self {
            file_path,
            frames: part_args.frames,
            svg,
            csv,
        })
    }
}
