#![warn(missing_docs)]
//! The bounded region containing optical elements and light rays.
//!
//! An [`OpticalSystem`] owns its elements and rays. On each [`update`](OpticalSystem::update) every ray path is
//! discarded and recomputed from scratch by marching the ray from element to element until it leaves the region,
//! runs out of intensity or reaches the maximum path length. Elements can therefore be moved freely between two
//! updates.
use log::debug;
use nalgebra::{Point2, Vector2};
use plotters::style::RGBAColor;
use rayon::prelude::*;

use crate::{
    elements::{Element, OpticalElement},
    error::{BenchError, BenchResult},
    ray::{LightRay, Termination},
    render::{DrawingSurface, Renderable},
    trace_config::TraceConfig,
};

/// Axis-aligned rectangle limiting the propagation of rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemBounds {
    min: Point2<f64>,
    max: Point2<f64>,
}
impl SystemBounds {
    /// Creates new [`SystemBounds`] from the top left corner and the size of the region.
    #[must_use]
    pub fn new(position: Point2<f64>, width: f64, height: f64) -> Self {
        Self {
            min: position,
            max: Point2::new(position.x + width, position.y + height),
        }
    }
    /// Returns the corner with the smallest coordinates.
    #[must_use]
    pub const fn min(&self) -> Point2<f64> {
        self.min
    }
    /// Returns the corner with the largest coordinates.
    #[must_use]
    pub const fn max(&self) -> Point2<f64> {
        self.max
    }
    /// Check if the given point lies inside the bounds (borders included).
    #[must_use]
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
    /// Calculate the point where a ray starting at `origin` leaves the bounds.
    ///
    /// For each axis the border facing the direction is used. The border reached first wins. Returns the exit point
    /// together with its distance from `origin`. A zero direction yields the origin itself.
    #[must_use]
    pub fn exit_point(&self, origin: &Point2<f64>, direction: &Vector2<f64>) -> (Point2<f64>, f64) {
        let axis_distance = |origin: f64, direction: f64, min: f64, max: f64| {
            if direction > 0.0 {
                (max - origin) / direction
            } else if direction < 0.0 {
                (min - origin) / direction
            } else {
                f64::INFINITY
            }
        };
        let tx = axis_distance(origin.x, direction.x, self.min.x, self.max.x);
        let ty = axis_distance(origin.y, direction.y, self.min.y, self.max.y);
        let t = tx.min(ty);
        if !t.is_finite() {
            return (*origin, 0.0);
        }
        (origin + t * direction, t * direction.norm())
    }
}

/// Size of the system at construction time, restored by [`OpticalSystem::reset`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct InitialSize {
    width: f64,
    height: f64,
}

/// A bounded 2D region containing [`Element`]s and [`LightRay`]s.
#[derive(Debug, Clone)]
pub struct OpticalSystem {
    position: Point2<f64>,
    width: f64,
    height: f64,
    elements: Vec<Element>,
    rays: Vec<LightRay>,
    config: TraceConfig,
    initial: InitialSize,
}
impl OpticalSystem {
    /// Creates a new (empty) [`OpticalSystem`] with its top left corner at `(x, y)`.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the position is not finite.
    ///   - width or height are <= 0.0 or not finite.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> BenchResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(BenchError::System("position must be finite".into()));
        }
        Self::check_size(width, height)?;
        Ok(Self {
            position: Point2::new(x, y),
            width,
            height,
            elements: Vec::new(),
            rays: Vec::new(),
            config: TraceConfig::default(),
            initial: InitialSize { width, height },
        })
    }
    /// Use the given [`TraceConfig`] for this [`OpticalSystem`].
    ///
    /// This function can be used with the "builder pattern".
    #[must_use]
    pub fn with_config(mut self, config: TraceConfig) -> Self {
        self.config = config;
        self
    }
    fn check_size(width: f64, height: f64) -> BenchResult<()> {
        if width <= 0.0 || !width.is_finite() || height <= 0.0 || !height.is_finite() {
            return Err(BenchError::System(
                "width and height of a system must be >0.0 and finite".into(),
            ));
        }
        Ok(())
    }
    /// Add an optical element to this [`OpticalSystem`].
    ///
    /// Returns the index of the new element.
    pub fn add_optical_element(&mut self, element: impl Into<Element>) -> usize {
        self.elements.push(element.into());
        self.elements.len() - 1
    }
    /// Add a light ray to this [`OpticalSystem`].
    ///
    /// Returns the index of the new ray.
    pub fn add_light_ray(&mut self, ray: LightRay) -> usize {
        self.rays.push(ray);
        self.rays.len() - 1
    }
    /// Returns the elements of this [`OpticalSystem`] in the order they were added.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
    /// Returns a mutable reference to the element with the given index.
    pub fn element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }
    /// Returns the rays of this [`OpticalSystem`] in the order they were added.
    #[must_use]
    pub fn rays(&self) -> &[LightRay] {
        &self.rays
    }
    /// Returns a mutable reference to the ray with the given index.
    pub fn ray_mut(&mut self, index: usize) -> Option<&mut LightRay> {
        self.rays.get_mut(index)
    }
    /// Returns the position (top left corner) of this [`OpticalSystem`].
    #[must_use]
    pub const fn position(&self) -> Point2<f64> {
        self.position
    }
    /// Sets the position (top left corner) of this [`OpticalSystem`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the position is not finite.
    pub fn set_position(&mut self, position: Point2<f64>) -> BenchResult<()> {
        if !position.x.is_finite() || !position.y.is_finite() {
            return Err(BenchError::System("position must be finite".into()));
        }
        self.position = position;
        Ok(())
    }
    /// Returns the width of this [`OpticalSystem`].
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }
    /// Returns the height of this [`OpticalSystem`].
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }
    /// Sets the size of this [`OpticalSystem`].
    ///
    /// # Errors
    ///
    /// This function will return an error if width or height are <= 0.0 or not finite.
    pub fn set_size(&mut self, width: f64, height: f64) -> BenchResult<()> {
        Self::check_size(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }
    /// Returns the [`TraceConfig`] of this [`OpticalSystem`].
    #[must_use]
    pub const fn config(&self) -> &TraceConfig {
        &self.config
    }
    /// Sets the [`TraceConfig`] of this [`OpticalSystem`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the given configuration contains invalid limits.
    pub fn set_config(&mut self, config: TraceConfig) -> BenchResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
    /// Returns the [`SystemBounds`] of this [`OpticalSystem`].
    #[must_use]
    pub fn bounds(&self) -> SystemBounds {
        SystemBounds::new(self.position, self.width, self.height)
    }
    /// Recompute the paths of all rays.
    ///
    /// `delta_time` is accepted for uniformity with other simulated objects but does not influence the result.
    /// Calling this function twice without modifying the system in between yields identical paths.
    pub fn update(&mut self, _delta_time: f64) {
        debug!(
            "propagating {} rays through {} elements",
            self.rays.len(),
            self.elements.len()
        );
        let bounds = self.bounds();
        let elements = &self.elements;
        let config = &self.config;
        self.rays
            .par_iter_mut()
            .for_each(|ray| propagate_ray(ray, elements, &bounds, config));
    }
    /// Recompute the path of a single ray, which does not need to be part of this [`OpticalSystem`].
    pub fn propagate_ray(&self, ray: &mut LightRay) {
        propagate_ray(ray, &self.elements, &self.bounds(), &self.config);
    }
    /// Check if the given point lies inside this [`OpticalSystem`] (borders included).
    #[must_use]
    pub fn is_point_inside(&self, x: f64, y: f64) -> bool {
        self.bounds().contains(&Point2::new(x, y))
    }
    /// Returns the index of the element at the given point.
    ///
    /// If several elements overlap at this point, the most recently added one (drawn on top) is returned.
    #[must_use]
    pub fn element_at(&self, x: f64, y: f64) -> Option<usize> {
        self.elements
            .iter()
            .rposition(|element| element.is_point_inside(x, y))
    }
    /// Restore the size given at construction time and reset all rays.
    pub fn reset(&mut self) {
        self.width = self.initial.width;
        self.height = self.initial.height;
        for ray in &mut self.rays {
            ray.reset();
        }
    }
}

/// Trace a ray through the given elements.
///
/// The previous path of the ray is discarded. The ray is marched from its origin to the nearest element hit (hits
/// closer than [`TraceConfig::min_step`] are ignored), interacts with this element and continues with the new
/// direction. The propagation stops when
///   - no further element is hit. The ray is extended to the border of `bounds`.
///   - the current point lies outside `bounds`.
///   - the intensity dropped to [`TraceConfig::min_intensity`] or below.
///   - the path length reached [`TraceConfig::max_path_length`]. The last segment is truncated at this limit.
///
/// The reason is stored as [`Termination`] in the ray.
pub fn propagate_ray(
    ray: &mut LightRay,
    elements: &[Element],
    bounds: &SystemBounds,
    config: &TraceConfig,
) {
    ray.reset_path();
    let wavelength = ray.wavelength();
    let mut point = ray.origin();
    let mut direction = ray.direction();
    loop {
        if !bounds.contains(&point) {
            ray.terminate(Termination::OutsideSystem);
            return;
        }
        if ray.intensity() <= config.min_intensity() {
            ray.terminate(Termination::Extinguished);
            return;
        }
        if ray.path_length() >= config.max_path_length() {
            ray.terminate(Termination::PathLengthLimit);
            return;
        }
        let nearest = elements
            .iter()
            .filter_map(|element| {
                element
                    .intersection(&point, &direction)
                    .filter(|hit| hit.distance > config.min_step())
                    .map(|hit| (element, hit))
            })
            .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance));
        let Some((element, hit)) = nearest else {
            let (exit, distance) = bounds.exit_point(&point, &direction);
            if advance(ray, &point, &exit, distance, config) {
                ray.terminate(Termination::LeftSystem);
            }
            return;
        };
        if !advance(ray, &point, &hit.point, hit.distance, config) {
            return;
        }
        let interaction = element.interact(&hit.point, &direction, wavelength);
        direction = interaction.direction;
        ray.attenuate(interaction.intensity_factor);
        point = hit.point;
    }
}

/// Append `target` to the ray path unless this would exceed the maximum path length.
///
/// In this case the segment is truncated at the limit, the ray is terminated and `false` is returned.
///
/// The path length grows by `distance`, the distance along the ray reported for `target`.
fn advance(
    ray: &mut LightRay,
    from: &Point2<f64>,
    target: &Point2<f64>,
    distance: f64,
    config: &TraceConfig,
) -> bool {
    let remaining = config.max_path_length() - ray.path_length();
    if distance > remaining {
        ray.add_path_segment(from + (target - from) * (remaining / distance), remaining);
        ray.terminate(Termination::PathLengthLimit);
        return false;
    }
    ray.add_path_segment(*target, distance);
    true
}

impl Renderable for OpticalSystem {
    fn render(&self, surface: &mut dyn DrawingSurface) -> BenchResult<()> {
        let bounds = self.bounds();
        surface.draw_rect(&bounds.min(), &bounds.max(), &RGBAColor(40, 40, 40, 1.0), false)?;
        for element in &self.elements {
            element.render(surface)?;
        }
        for ray in &self.rays {
            ray.render(surface)?;
        }
        Ok(())
    }
}
