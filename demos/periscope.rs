use std::{f64::consts::FRAC_PI_4, fs, path::Path};

use optibench::{
    elements::Mirror,
    error::{BenchError, BenchResult},
    nanometer,
    ray::LightRay,
    render::render_svg,
    scene_document::SceneDocument,
    OpticalSystem,
};

fn main() -> BenchResult<()> {
    let mut system = OpticalSystem::new(0.0, 0.0, 400.0, 300.0)?;
    system.add_optical_element(Mirror::new(150.0, 250.0, 60.0, -FRAC_PI_4)?);
    system.add_optical_element(Mirror::new(150.0, 80.0, 60.0, -FRAC_PI_4)?);
    for (offset, wavelength) in [(-10.0, 450.0), (0.0, 550.0), (10.0, 650.0)] {
        system.add_light_ray(LightRay::new(20.0, 250.0 + offset, 0.0, nanometer!(wavelength))?);
    }
    system.update(0.0);
    for ray in system.rays() {
        println!("{ray}");
    }
    let playground = Path::new("./playground");
    fs::create_dir_all(playground)
        .map_err(|e| BenchError::Other(format!("cannot create playground directory: {e}")))?;
    SceneDocument::from_system(&system).save_to_file(&playground.join("periscope.yaml"))?;
    fs::write(playground.join("periscope.svg"), render_svg(&system)?)
        .map_err(|e| BenchError::Render(format!("writing periscope.svg failed: {e}")))
}
