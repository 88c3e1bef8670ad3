//! Command line front end: load a scene, trace all rays and write the results.
use clap::Parser;
use log::info;
use optibench::{
    console::{Args, PartialArgs},
    error::{BenchError, BenchResult},
    export::save_paths_csv,
    render::render_svg,
    scene_document::SceneDocument,
};
use std::fs;
use uom::si::length::nanometer;

fn main() -> BenchResult<()> {
    env_logger::init();
    //parse CLI arguments
    let args = Args::try_from(PartialArgs::parse())?;
    //read scene from file and build the bench
    let document = SceneDocument::from_file(&args.file_path)?;
    let mut system = document.build_system()?;
    info!(
        "bench with {} elements and {} rays loaded",
        system.elements().len(),
        system.rays().len()
    );
    for _ in 0..args.frames {
        system.update(0.0);
    }
    for (idx, ray) in system.rays().iter().enumerate() {
        let termination = ray
            .termination()
            .map_or_else(|| "-".to_string(), |t| t.to_string());
        println!(
            "ray {idx}: {:.1} nm, {} path points, path length {:.3}, intensity {:.4}, {termination}",
            ray.wavelength().get::<nanometer>(),
            ray.path_points().len(),
            ray.path_length(),
            ray.intensity()
        );
    }
    if let Some(svg_path) = &args.svg {
        let svg = render_svg(&system)?;
        fs::write(svg_path, svg).map_err(|e| {
            BenchError::Render(format!(
                "writing to file path {} failed: {}",
                svg_path.display(),
                e
            ))
        })?;
        info!("image written to {}", svg_path.display());
    }
    if let Some(csv_path) = &args.csv {
        save_paths_csv(&system, csv_path)?;
    }
    Ok(())
}
