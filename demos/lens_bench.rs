use std::{fs, path::Path};

use optibench::{
    elements::Lens,
    error::{BenchError, BenchResult},
    export::save_paths_csv,
    nanometer,
    ray::LightRay,
    render::render_svg,
    OpticalSystem,
};

fn main() -> BenchResult<()> {
    let mut system = OpticalSystem::new(0.0, 0.0, 600.0, 300.0)?;
    system.add_optical_element(Lens::new(150.0, 150.0, 20.0, 160.0, 120.0, 1.5)?);
    system.add_optical_element(Lens::new(420.0, 150.0, 20.0, 160.0, -80.0, 1.5)?);
    for y in [90.0, 120.0, 150.0, 180.0, 210.0] {
        system.add_light_ray(LightRay::new(10.0, y, 0.0, nanometer!(532.0))?);
    }
    system.update(0.0);
    for (idx, ray) in system.rays().iter().enumerate() {
        let end = ray.path_points().last().copied().unwrap_or_else(|| ray.origin());
        println!(
            "ray {idx}: end point ({:.2}, {:.2}), intensity {:.4}",
            end.x,
            end.y,
            ray.intensity()
        );
    }
    let playground = Path::new("./playground");
    fs::create_dir_all(playground)
        .map_err(|e| BenchError::Other(format!("cannot create playground directory: {e}")))?;
    save_paths_csv(&system, &playground.join("lens_bench.csv"))?;
    fs::write(playground.join("lens_bench.svg"), render_svg(&system)?)
        .map_err(|e| BenchError::Render(format!("writing lens_bench.svg failed: {e}")))
}
