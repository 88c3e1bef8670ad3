#![warn(missing_docs)]
//! Export of ray paths as CSV table.
//!
//! Each row describes one path point: the index of the ray, the index of the point along the path, its coordinates
//! and the cumulative intensity of the light arriving at this point.
use log::info;
use serde::Serialize;
use std::{io::Write, path::Path};

use crate::{
    error::{BenchError, BenchResult},
    optical_system::OpticalSystem,
};

#[derive(Serialize)]
struct PathRecord {
    ray: usize,
    point: usize,
    x: f64,
    y: f64,
    intensity: f64,
}

/// Write the current paths of all rays of the given [`OpticalSystem`] as CSV to `writer`.
///
/// The table has the header `ray,point,x,y,intensity`.
///
/// # Errors
///
/// This function will return an error if writing fails.
pub fn write_paths_csv<W: Write>(system: &OpticalSystem, writer: W) -> BenchResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (ray_idx, ray) in system.rays().iter().enumerate() {
        for (point_idx, (point, intensity)) in ray
            .path_points()
            .iter()
            .zip(ray.intensities())
            .enumerate()
        {
            csv_writer
                .serialize(PathRecord {
                    ray: ray_idx,
                    point: point_idx,
                    x: point.x,
                    y: point.y,
                    intensity: *intensity,
                })
                .map_err(|e| BenchError::Export(format!("writing path record failed: {e}")))?;
        }
    }
    csv_writer
        .flush()
        .map_err(|e| BenchError::Export(format!("flushing csv output failed: {e}")))
}
/// Save the current paths of all rays of the given [`OpticalSystem`] to a CSV file.
///
/// # Errors
///
/// This function will return an error if the file cannot be created or written.
pub fn save_paths_csv(system: &OpticalSystem, path: &Path) -> BenchResult<()> {
    let file = std::fs::File::create(path).map_err(|e| {
        BenchError::Export(format!(
            "could not create file path: {}: {}",
            path.display(),
            e
        ))
    })?;
    write_paths_csv(system, file)?;
    info!("ray paths written to {}", path.display());
    Ok(())
}
