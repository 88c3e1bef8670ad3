#![warn(missing_docs)]
//! Reading and writing of bench descriptions.
//!
//! A [`SceneDocument`] is the serializable description of an [`OpticalSystem`]: the region, the propagation limits,
//! all elements and all rays. It is stored as YAML file:
//!
//! ```yaml
//! version: '1.0'
//! system:
//!   position: [0.0, 0.0]
//!   width: 400.0
//!   height: 300.0
//! elements:
//!   - type: Mirror
//!     position: [200.0, 150.0]
//!     length: 100.0
//!     angle: 1.5707963267948966
//! rays:
//!   - position: [50.0, 150.0]
//!     angle: 0.0
//!     wavelength: 550.0
//! ```
//!
//! Ray wavelengths are given in nanometers. Angles are given in radians.
use log::{info, warn};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};
use uom::si::length::nanometer;

use crate::{
    elements::{Element, Lens, Mirror, OpticalElement, TopEdgeMode},
    error::{BenchError, BenchResult},
    nanometer,
    optical_system::OpticalSystem,
    ray::LightRay,
    trace_config::TraceConfig,
};

/// Version of the scene file format written by this crate.
pub const SCENE_FILE_VERSION: &str = "1.0";

/// Region of the described [`OpticalSystem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDesc {
    /// top left corner
    pub position: [f64; 2],
    /// width of the region
    pub width: f64,
    /// height of the region
    pub height: f64,
}
impl Default for SystemDesc {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            width: 400.0,
            height: 300.0,
        }
    }
}

/// Description of a single optical element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ElementDesc {
    /// a [`Lens`]
    Lens {
        /// center of the lens
        position: [f64; 2],
        /// width of the lens
        width: f64,
        /// height of the lens
        height: f64,
        /// focal length (positive: converging, negative: diverging)
        focal_length: f64,
        /// refractive index of the lens material
        refractive_index: f64,
        /// construction of hit points on the top edge
        #[serde(default)]
        top_edge: TopEdgeMode,
    },
    /// a [`Mirror`]
    Mirror {
        /// center of the mirror
        position: [f64; 2],
        /// length of the mirror
        length: f64,
        /// orientation of the mirror in radians
        angle: f64,
    },
}
impl ElementDesc {
    /// Create the described [`Element`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the described element has invalid parameters.
    pub fn build(&self) -> BenchResult<Element> {
        match self {
            Self::Lens {
                position,
                width,
                height,
                focal_length,
                refractive_index,
                top_edge,
            } => Ok(Lens::new(
                position[0],
                position[1],
                *width,
                *height,
                *focal_length,
                *refractive_index,
            )?
            .with_top_edge_mode(*top_edge)
            .into()),
            Self::Mirror {
                position,
                length,
                angle,
            } => Ok(Mirror::new(position[0], position[1], *length, *angle)?.into()),
        }
    }
}
impl From<&Element> for ElementDesc {
    fn from(element: &Element) -> Self {
        let position = element.position();
        match element {
            Element::Lens(lens) => Self::Lens {
                position: [position.x, position.y],
                width: lens.width(),
                height: lens.height(),
                focal_length: lens.focal_length(),
                refractive_index: lens.refractive_index(),
                top_edge: lens.top_edge_mode(),
            },
            Element::Mirror(mirror) => Self::Mirror {
                position: [position.x, position.y],
                length: mirror.length(),
                angle: mirror.angle(),
            },
        }
    }
}

/// Description of a single light ray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayDesc {
    /// emission point
    pub position: [f64; 2],
    /// emission angle in radians
    pub angle: f64,
    /// wavelength in nanometers
    pub wavelength: f64,
}
impl RayDesc {
    /// Create the described [`LightRay`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the described ray has invalid parameters.
    pub fn build(&self) -> BenchResult<LightRay> {
        LightRay::new(
            self.position[0],
            self.position[1],
            self.angle,
            nanometer!(self.wavelength),
        )
    }
}
impl From<&LightRay> for RayDesc {
    fn from(ray: &LightRay) -> Self {
        let origin: Point2<f64> = ray.origin();
        Self {
            position: [origin.x, origin.y],
            angle: ray.angle(),
            wavelength: ray.wavelength().get::<nanometer>(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// The serializable description of an [`OpticalSystem`].
pub struct SceneDocument {
    version: String,
    #[serde(default)]
    system: SystemDesc,
    #[serde(default)]
    config: TraceConfig,
    #[serde(default)]
    elements: Vec<ElementDesc>,
    #[serde(default)]
    rays: Vec<RayDesc>,
}
impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            version: SCENE_FILE_VERSION.to_string(),
            system: SystemDesc::default(),
            config: TraceConfig::default(),
            elements: Vec::new(),
            rays: Vec::new(),
        }
    }
}
impl SceneDocument {
    /// Create a new [`SceneDocument`] from a scene file at the given path.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the given path is not found or readable.
    ///   - the parsing / deserialization of the file failed.
    pub fn from_file(path: &Path) -> BenchResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            BenchError::SceneDocument(format!("cannot read file {} : {}", path.display(), e))
        })?;
        info!("read scene file {}", path.display());
        Self::from_string(&contents)
    }
    /// Create a new [`SceneDocument`] from the given YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the parsing of the string failed.
    pub fn from_string(yaml: &str) -> BenchResult<Self> {
        let document: Self = serde_yaml::from_str(yaml)
            .map_err(|e| BenchError::SceneDocument(format!("parsing of scene failed: {e}")))?;
        if document.version != SCENE_FILE_VERSION {
            warn!("scene file version does not match the supported version.");
            warn!(
                "read version '{}' <-> supported version '{}'",
                document.version, SCENE_FILE_VERSION
            );
        }
        Ok(document)
    }
    /// Create a [`SceneDocument`] describing the given [`OpticalSystem`].
    ///
    /// Rays are described by their current direction, elements by their current position.
    #[must_use]
    pub fn from_system(system: &OpticalSystem) -> Self {
        let position = system.position();
        Self {
            version: SCENE_FILE_VERSION.to_string(),
            system: SystemDesc {
                position: [position.x, position.y],
                width: system.width(),
                height: system.height(),
            },
            config: system.config().clone(),
            elements: system.elements().iter().map(ElementDesc::from).collect(),
            rays: system.rays().iter().map(RayDesc::from).collect(),
        }
    }
    /// Build the described [`OpticalSystem`].
    ///
    /// The paths of the rays are not calculated yet. Call [`OpticalSystem::update`] for this.
    ///
    /// # Errors
    ///
    /// This function will return an error if the region, the limits, an element or a ray has invalid parameters.
    pub fn build_system(&self) -> BenchResult<OpticalSystem> {
        let mut system = OpticalSystem::new(
            self.system.position[0],
            self.system.position[1],
            self.system.width,
            self.system.height,
        )?;
        system.set_config(self.config.clone())?;
        for element in &self.elements {
            system.add_optical_element(element.build()?);
        }
        for ray in &self.rays {
            system.add_light_ray(ray.build()?);
        }
        Ok(system)
    }
    /// Returns the file format version of this [`SceneDocument`].
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
    /// Returns the element descriptions of this [`SceneDocument`].
    #[must_use]
    pub fn elements(&self) -> &[ElementDesc] {
        &self.elements
    }
    /// Returns the ray descriptions of this [`SceneDocument`].
    #[must_use]
    pub fn rays(&self) -> &[RayDesc] {
        &self.rays
    }
    /// Return the YAML representation of this [`SceneDocument`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the serialization fails.
    pub fn to_yaml_string(&self) -> BenchResult<String> {
        serde_yaml::to_string(self).map_err(|e| {
            BenchError::SceneDocument(format!("serialization of scene document failed: {e}"))
        })
    }
    /// Save this [`SceneDocument`] to a YAML file with the given path.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the serialization of the document failed.
    ///   - the file cannot be created.
    ///   - it cannot write into the file (e.g. no space).
    pub fn save_to_file(&self, path: &Path) -> BenchResult<()> {
        let serialized = self.to_yaml_string()?;
        let mut output = File::create(path).map_err(|e| {
            BenchError::SceneDocument(format!(
                "could not create file path: {}: {}",
                path.display(),
                e
            ))
        })?;
        write!(output, "{serialized}").map_err(|e| {
            BenchError::SceneDocument(format!(
                "writing to file path {} failed: {}",
                path.display(),
                e
            ))
        })?;
        info!("scene written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ray::Termination, utils::test_helper::test_helper::check_warnings};
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use std::f64::consts::FRAC_PI_2;
    use tempfile::NamedTempFile;

    const MIRROR_SCENE: &str = "
version: '1.0'
system:
  position: [0.0, 0.0]
  width: 400.0
  height: 300.0
elements:
  - type: Mirror
    position: [200.0, 150.0]
    length: 100.0
    angle: 1.5707963267948966
rays:
  - position: [50.0, 150.0]
    angle: 0.0
    wavelength: 550.0
";

    #[test]
    fn default() {
        let document = SceneDocument::default();
        assert_eq!(document.version(), SCENE_FILE_VERSION);
        assert!(document.elements().is_empty());
        assert!(document.rays().is_empty());
        let system = document.build_system().unwrap();
        assert_eq!(system.width(), 400.0);
        assert_eq!(system.height(), 300.0);
    }
    #[test]
    fn from_string() {
        let document = SceneDocument::from_string(MIRROR_SCENE).unwrap();
        assert_eq!(document.elements().len(), 1);
        assert_eq!(
            document.rays(),
            &[RayDesc {
                position: [50.0, 150.0],
                angle: 0.0,
                wavelength: 550.0
            }]
        );
        let mut system = document.build_system().unwrap();
        assert_eq!(system.config(), &TraceConfig::default());
        system.update(0.0);
        let ray = &system.rays()[0];
        assert_eq!(ray.path_points().len(), 3);
        assert_abs_diff_eq!(ray.path_points()[2], Point2::new(0.0, 150.0), epsilon = 1e-10);
        assert_eq!(ray.termination(), Some(Termination::LeftSystem));
    }
    #[test]
    fn from_string_lens_defaults() {
        let document = SceneDocument::from_string(
            "
version: '1.0'
config:
  max_path_length: 500.0
elements:
  - type: Lens
    position: [200.0, 150.0]
    width: 20.0
    height: 100.0
    focal_length: -80.0
    refractive_index: 1.5
",
        )
        .unwrap();
        let system = document.build_system().unwrap();
        assert_eq!(system.width(), 400.0);
        assert_eq!(system.config().max_path_length(), 500.0);
        assert_eq!(system.config().min_intensity(), 0.01);
        let lens = system.elements()[0].as_lens().unwrap();
        assert_eq!(lens.focal_length(), -80.0);
        assert_eq!(lens.top_edge_mode(), TopEdgeMode::Corrected);
    }
    #[test]
    fn from_string_invalid() {
        assert_matches!(
            SceneDocument::from_string("system: [1, 2]"),
            Err(BenchError::SceneDocument(_))
        );
        // version is mandatory
        assert!(SceneDocument::from_string("elements: []").is_err());
        assert!(SceneDocument::from_string(
            "
version: '1.0'
elements:
  - type: Prism
    position: [0.0, 0.0]
"
        )
        .is_err());
    }
    #[test]
    fn from_string_version_mismatch() {
        testing_logger::setup();
        let document = SceneDocument::from_string("version: '0.1'").unwrap();
        assert_eq!(document.version(), "0.1");
        check_warnings(&[
            "scene file version does not match the supported version.",
            "read version '0.1' <-> supported version '1.0'",
        ]);
    }
    #[test]
    fn build_system_invalid() {
        let document = SceneDocument::from_string(
            "
version: '1.0'
elements:
  - type: Mirror
    position: [200.0, 150.0]
    length: 0.0
    angle: 0.0
",
        )
        .unwrap();
        assert_matches!(document.build_system(), Err(BenchError::Element(_)));
        let document = SceneDocument::from_string(
            "
version: '1.0'
system:
  position: [0.0, 0.0]
  width: -1.0
  height: 300.0
",
        )
        .unwrap();
        assert_matches!(document.build_system(), Err(BenchError::System(_)));
        let document = SceneDocument::from_string(
            "
version: '1.0'
rays:
  - position: [0.0, 0.0]
    angle: 0.0
    wavelength: 0.0
",
        )
        .unwrap();
        assert_matches!(document.build_system(), Err(BenchError::Ray(_)));
    }
    #[test]
    fn from_system() {
        let mut system = OpticalSystem::new(10.0, 20.0, 300.0, 200.0).unwrap();
        system.add_optical_element(
            Lens::new(100.0, 120.0, 20.0, 80.0, 60.0, 1.6)
                .unwrap()
                .with_top_edge_mode(TopEdgeMode::Transposed),
        );
        system.add_optical_element(Mirror::new(250.0, 120.0, 90.0, FRAC_PI_2).unwrap());
        system.add_light_ray(LightRay::new(20.0, 120.0, 0.1, nanometer!(633.0)).unwrap());
        let document = SceneDocument::from_system(&system);
        assert_eq!(
            document.elements()[1],
            ElementDesc::Mirror {
                position: [250.0, 120.0],
                length: 90.0,
                angle: FRAC_PI_2
            }
        );
        let yaml = document.to_yaml_string().unwrap();
        assert!(yaml.contains("type: Lens"));
        assert!(yaml.contains("top_edge: Transposed"));
        let rebuilt = SceneDocument::from_string(&yaml)
            .unwrap()
            .build_system()
            .unwrap();
        assert_eq!(rebuilt.position(), system.position());
        assert_eq!(rebuilt.elements(), system.elements());
        assert_eq!(rebuilt.rays().len(), 1);
        assert_abs_diff_eq!(rebuilt.rays()[0].angle(), 0.1, epsilon = 1e-12);
    }
    #[test]
    fn from_file() {
        let result = SceneDocument::from_file(Path::new("./invalid_file_path/invalid_file.yaml"));
        assert!(result
            .unwrap_err()
            .to_string()
            .starts_with("SceneDocument:cannot read file ./invalid_file_path/invalid_file.yaml"));
    }
    #[test]
    fn periscope_scene_file() {
        let document = SceneDocument::from_file(Path::new("./demos/scenes/periscope.yaml")).unwrap();
        let mut system = document.build_system().unwrap();
        system.update(0.0);
        for ray in system.rays() {
            // reflected up by the lower mirror, then to the right by the upper one
            assert_eq!(ray.path_points().len(), 4);
            let end = ray.path_points()[3];
            assert_abs_diff_eq!(end.x, 400.0, epsilon = 1e-9);
            assert!(end.y < 100.0);
            assert_abs_diff_eq!(ray.intensity(), 0.81, epsilon = 1e-9);
            assert_eq!(ray.termination(), Some(Termination::LeftSystem));
        }
    }
    #[test]
    fn save_to_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.into_temp_path();
        let document = SceneDocument::from_string(MIRROR_SCENE).unwrap();
        assert!(document.save_to_file(&path).is_ok());
        let read_back = SceneDocument::from_file(&path).unwrap();
        assert_eq!(read_back, document);
        path.close().unwrap();
    }
}
