#![warn(missing_docs)]
//! Module for handling light rays emitted into an optical system
use std::fmt::Display;

use log::warn;
use nalgebra::{Point2, Rotation2, Vector2};
use num::Zero;
use plotters::style::RGBAColor;
use serde::{Deserialize, Serialize};
use strum::Display as StrumDisplay;
use uom::si::{f64::Length, length::nanometer};

use crate::{
    error::{BenchError, BenchResult},
    render::{wavelength_to_color, DrawingSurface, Renderable},
};

/// Reason why the propagation of a [`LightRay`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, StrumDisplay)]
pub enum Termination {
    /// The ray reached the boundary of the system without hitting a further element.
    LeftSystem,
    /// The cumulative intensity dropped below the configured minimum.
    Extinguished,
    /// The accumulated path length reached the configured maximum.
    PathLengthLimit,
    /// The current ray position is outside the system (e.g. the ray was emitted outside).
    OutsideSystem,
}

/// Configuration of a [`LightRay`] at construction time, restored by [`LightRay::reset`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct InitialState {
    direction: Vector2<f64>,
    wavelength: Length,
}

/// A ray of light emitted at a fixed origin into an [`OpticalSystem`](crate::optical_system::OpticalSystem).
///
/// The path of a ray is not traced incrementally. It is rebuilt from scratch on each update of the system. It always
/// starts with the origin of the ray.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRay {
    /// Emission point of the ray
    origin: Point2<f64>,
    /// Emission direction (unit vector)
    direction: Vector2<f64>,
    wavelength: Length,
    /// Path of the ray (origin, intersection points, end point)
    path: Vec<Point2<f64>>,
    /// Cumulative intensity of the light arriving at the corresponding path point
    intensities: Vec<f64>,
    intensity: f64,
    path_length: f64,
    termination: Option<Termination>,
    initial: InitialState,
}
impl LightRay {
    /// Creates a new [`LightRay`].
    ///
    /// The ray starts at `(x, y)` and is emitted under the given `angle` (in radians, measured from the x axis). The
    /// wavelength is only used for the wavelength dependent behavior of the elements and the color of the ray. Values
    /// outside the visible range (400 nm - 700 nm) are accepted.
    ///
    /// # Errors
    /// This function returns an error if
    ///  - the position or angle is not finite
    ///  - the given wavelength is <= 0.0, `NaN` or +inf
    pub fn new(x: f64, y: f64, angle: f64, wavelength: Length) -> BenchResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(BenchError::Ray("position must be finite".into()));
        }
        if !angle.is_finite() {
            return Err(BenchError::Ray("emission angle must be finite".into()));
        }
        Self::check_wavelength(wavelength)?;
        let origin = Point2::new(x, y);
        let direction = Rotation2::new(angle) * Vector2::x();
        Ok(Self {
            origin,
            direction,
            wavelength,
            path: vec![origin],
            intensities: vec![1.0],
            intensity: 1.0,
            path_length: 0.0,
            termination: None,
            initial: InitialState {
                direction,
                wavelength,
            },
        })
    }
    fn check_wavelength(wavelength: Length) -> BenchResult<()> {
        if wavelength.is_zero() || wavelength.is_sign_negative() || !wavelength.is_finite() {
            return Err(BenchError::Ray("wavelength must be >0".into()));
        }
        Ok(())
    }
    /// Returns the origin (emission point) of this [`LightRay`].
    #[must_use]
    pub const fn origin(&self) -> Point2<f64> {
        self.origin
    }
    /// Moves the origin of this [`LightRay`].
    ///
    /// The path collapses to the new origin. Non-finite positions are ignored.
    pub fn set_origin(&mut self, origin: Point2<f64>) {
        if !origin.x.is_finite() || !origin.y.is_finite() {
            warn!("ignoring non-finite ray origin");
            return;
        }
        self.origin = origin;
        self.reset_path();
    }
    /// Returns the emission direction of this [`LightRay`] as unit vector.
    #[must_use]
    pub const fn direction(&self) -> Vector2<f64> {
        self.direction
    }
    /// Sets the emission direction of this [`LightRay`].
    ///
    /// The given vector is normalized. A vector with zero length (or non-finite components) cannot be normalized. In
    /// this case, the direction remains unchanged.
    pub fn set_direction(&mut self, direction: Vector2<f64>) {
        let norm = direction.norm();
        if norm.is_zero() || !norm.is_finite() {
            warn!("ignoring ray direction with zero or non-finite length");
            return;
        }
        self.direction = direction / norm;
    }
    /// Returns the emission angle (radians) of this [`LightRay`].
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.direction.y.atan2(self.direction.x)
    }
    /// Returns the wavelength of this [`LightRay`].
    #[must_use]
    pub const fn wavelength(&self) -> Length {
        self.wavelength
    }
    /// Sets the wavelength of this [`LightRay`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the given wavelength is <= 0.0, `NaN` or +inf.
    pub fn set_wavelength(&mut self, wavelength: Length) -> BenchResult<()> {
        Self::check_wavelength(wavelength)?;
        self.wavelength = wavelength;
        Ok(())
    }
    /// Returns the path points of this [`LightRay`].
    ///
    /// The first point is always the origin of the ray.
    #[must_use]
    pub fn path_points(&self) -> &[Point2<f64>] {
        &self.path
    }
    /// Returns the cumulative intensities of the light arriving at each path point.
    ///
    /// The returned slice has the same length as [`path_points`](Self::path_points). The light leaving point `i`
    /// has the intensity of entry `i+1`.
    #[must_use]
    pub fn intensities(&self) -> &[f64] {
        &self.intensities
    }
    /// Returns the current cumulative intensity of this [`LightRay`].
    #[must_use]
    pub const fn intensity(&self) -> f64 {
        self.intensity
    }
    /// Returns the accumulated geometric length of the path of this [`LightRay`].
    #[must_use]
    pub const fn path_length(&self) -> f64 {
        self.path_length
    }
    /// Returns the reason why the last propagation of this [`LightRay`] stopped.
    ///
    /// Returns `None` if the ray has not been propagated since its path was reset.
    #[must_use]
    pub const fn termination(&self) -> Option<Termination> {
        self.termination
    }
    /// Append a point to the path of this [`LightRay`].
    ///
    /// The distance to the previous path point is added to the path length. The point is recorded together with the
    /// current cumulative intensity.
    pub fn add_path_point(&mut self, point: Point2<f64>) {
        let length = self.path.last().map_or(0.0, |last| (point - last).norm());
        self.add_path_segment(point, length);
    }
    /// Append a point reached after travelling `length` along the ray.
    ///
    /// Unlike [`add_path_point`](Self::add_path_point) the path length grows by the given distance, which may differ
    /// from the geometric distance to the previous path point (e.g. for a transposed lens top edge).
    pub fn add_path_segment(&mut self, point: Point2<f64>, length: f64) {
        self.path_length += length;
        self.path.push(point);
        self.intensities.push(self.intensity);
    }
    /// Attenuate the cumulative intensity of this [`LightRay`] by the given factor.
    ///
    /// The factor is clamped to the range `(0.0..=1.0)`.
    pub fn attenuate(&mut self, intensity_factor: f64) {
        self.intensity *= intensity_factor.clamp(0.0, 1.0);
    }
    pub(crate) fn terminate(&mut self, termination: Termination) {
        self.termination = Some(termination);
    }
    /// Collapse the path of this [`LightRay`] to its origin.
    ///
    /// This also resets the intensity, the path length and the termination reason.
    pub fn reset_path(&mut self) {
        self.path.clear();
        self.path.push(self.origin);
        self.intensities.clear();
        self.intensities.push(1.0);
        self.intensity = 1.0;
        self.path_length = 0.0;
        self.termination = None;
    }
    /// Restore direction and wavelength given during construction of this [`LightRay`].
    pub fn reset(&mut self) {
        self.direction = self.initial.direction;
        self.wavelength = self.initial.wavelength;
        self.reset_path();
    }
}

impl Display for LightRay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "origin: ({:.3}, {:.3}), direction: ({:.4}, {:.4}), wavelength: {:.1} nm, path points: {}, intensity: {:.4}",
            self.origin.x,
            self.origin.y,
            self.direction.x,
            self.direction.y,
            self.wavelength.get::<nanometer>(),
            self.path.len(),
            self.intensity
        )
    }
}

impl Renderable for LightRay {
    fn render(&self, surface: &mut dyn DrawingSurface) -> BenchResult<()> {
        let base_color = wavelength_to_color(self.wavelength);
        // intensities[i + 1] is the intensity travelling on segment i
        for (segment, intensity) in self.path.windows(2).zip(self.intensities.iter().skip(1)) {
            let color = RGBAColor(base_color.0, base_color.1, base_color.2, intensity.clamp(0.0, 1.0));
            surface.draw_line(&segment[0], &segment[1], &color, 2)?;
        }
        surface.draw_circle(&self.origin, 4.0, &base_color, true)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{nanometer, utils::test_helper::test_helper::check_warnings};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;
    #[test]
    fn new() {
        let ray = LightRay::new(50.0, 150.0, 0.0, nanometer!(550.0)).unwrap();
        assert_eq!(ray.origin(), Point2::new(50.0, 150.0));
        assert_eq!(ray.direction(), Vector2::x());
        assert_eq!(ray.wavelength(), nanometer!(550.0));
        assert_eq!(ray.path_points(), &[Point2::new(50.0, 150.0)]);
        assert_eq!(ray.intensities(), &[1.0]);
        assert_eq!(ray.intensity(), 1.0);
        assert_eq!(ray.path_length(), 0.0);
        assert_eq!(ray.termination(), None);
        let ray = LightRay::new(0.0, 0.0, FRAC_PI_2, nanometer!(550.0)).unwrap();
        assert_abs_diff_eq!(ray.direction(), Vector2::y(), epsilon = 1e-15);
        assert_abs_diff_eq!(ray.angle(), FRAC_PI_2);
    }
    #[test]
    fn new_wrong_params() {
        let wvl = nanometer!(550.0);
        assert!(LightRay::new(f64::NAN, 0.0, 0.0, wvl).is_err());
        assert!(LightRay::new(0.0, f64::INFINITY, 0.0, wvl).is_err());
        assert!(LightRay::new(0.0, 0.0, f64::NAN, wvl).is_err());
        assert!(LightRay::new(0.0, 0.0, 0.0, nanometer!(0.0)).is_err());
        assert!(LightRay::new(0.0, 0.0, 0.0, nanometer!(-10.0)).is_err());
        assert!(LightRay::new(0.0, 0.0, 0.0, nanometer!(f64::NAN)).is_err());
        assert!(LightRay::new(0.0, 0.0, 0.0, nanometer!(f64::INFINITY)).is_err());
        assert!(LightRay::new(0.0, 0.0, 0.0, nanometer!(1200.0)).is_ok());
    }
    #[test]
    fn set_direction() {
        let mut ray = LightRay::new(0.0, 0.0, 0.0, nanometer!(550.0)).unwrap();
        ray.set_direction(Vector2::new(0.0, 3.0));
        assert_eq!(ray.direction(), Vector2::y());
        ray.set_direction(Vector2::new(1.0, 1.0));
        assert_abs_diff_eq!(ray.direction().norm(), 1.0, epsilon = 1e-15);
    }
    #[test]
    fn set_direction_zero() {
        testing_logger::setup();
        let mut ray = LightRay::new(0.0, 0.0, 0.0, nanometer!(550.0)).unwrap();
        ray.set_direction(Vector2::zeros());
        assert_eq!(ray.direction(), Vector2::x());
        check_warnings(&["ignoring ray direction with zero or non-finite length"]);
    }
    #[test]
    fn set_wavelength() {
        let mut ray = LightRay::new(0.0, 0.0, 0.0, nanometer!(550.0)).unwrap();
        assert!(ray.set_wavelength(nanometer!(0.0)).is_err());
        assert!(ray.set_wavelength(nanometer!(420.0)).is_ok());
        assert_eq!(ray.wavelength(), nanometer!(420.0));
    }
    #[test]
    fn add_path_segment() {
        let mut ray = LightRay::new(0.0, 0.0, 0.0, nanometer!(550.0)).unwrap();
        ray.add_path_segment(Point2::new(3.0, 4.0), 90.0);
        assert_eq!(ray.path_points(), &[Point2::origin(), Point2::new(3.0, 4.0)]);
        assert_eq!(ray.path_length(), 90.0);
        assert_eq!(ray.intensities(), &[1.0, 1.0]);
    }
    #[test]
    fn add_path_point() {
        let mut ray = LightRay::new(0.0, 0.0, 0.0, nanometer!(550.0)).unwrap();
        ray.add_path_point(Point2::new(3.0, 4.0));
        ray.attenuate(0.5);
        ray.add_path_point(Point2::new(3.0, 10.0));
        assert_eq!(
            ray.path_points(),
            &[
                Point2::new(0.0, 0.0),
                Point2::new(3.0, 4.0),
                Point2::new(3.0, 10.0)
            ]
        );
        assert_eq!(ray.intensities(), &[1.0, 1.0, 0.5]);
        assert_eq!(ray.path_length(), 11.0);
    }
    #[test]
    fn attenuate_clamped() {
        let mut ray = LightRay::new(0.0, 0.0, 0.0, nanometer!(550.0)).unwrap();
        ray.attenuate(1.5);
        assert_eq!(ray.intensity(), 1.0);
        ray.attenuate(-1.0);
        assert_eq!(ray.intensity(), 0.0);
    }
    #[test]
    fn reset_path() {
        let mut ray = LightRay::new(1.0, 2.0, 0.0, nanometer!(550.0)).unwrap();
        ray.add_path_point(Point2::new(5.0, 2.0));
        ray.attenuate(0.9);
        ray.terminate(Termination::LeftSystem);
        ray.reset_path();
        assert_eq!(ray.path_points(), &[Point2::new(1.0, 2.0)]);
        assert_eq!(ray.intensities(), &[1.0]);
        assert_eq!(ray.intensity(), 1.0);
        assert_eq!(ray.path_length(), 0.0);
        assert_eq!(ray.termination(), None);
    }
    #[test]
    fn set_origin() {
        let mut ray = LightRay::new(1.0, 2.0, 0.0, nanometer!(550.0)).unwrap();
        ray.add_path_point(Point2::new(5.0, 2.0));
        ray.set_origin(Point2::new(7.0, 8.0));
        assert_eq!(ray.origin(), Point2::new(7.0, 8.0));
        assert_eq!(ray.path_points(), &[Point2::new(7.0, 8.0)]);
        ray.set_origin(Point2::new(f64::NAN, 8.0));
        assert_eq!(ray.origin(), Point2::new(7.0, 8.0));
    }
    #[test]
    fn reset() {
        let mut ray = LightRay::new(1.0, 2.0, 0.0, nanometer!(550.0)).unwrap();
        ray.set_direction(Vector2::y());
        ray.set_wavelength(nanometer!(633.0)).unwrap();
        ray.add_path_point(Point2::new(1.0, 20.0));
        ray.reset();
        assert_eq!(ray.direction(), Vector2::x());
        assert_eq!(ray.wavelength(), nanometer!(550.0));
        assert_eq!(ray.path_points(), &[Point2::new(1.0, 2.0)]);
    }
    #[test]
    fn display() {
        let ray = LightRay::new(1.0, 2.0, 0.0, nanometer!(550.0)).unwrap();
        assert_eq!(
            format!("{ray}"),
            "origin: (1.000, 2.000), direction: (1.0000, 0.0000), wavelength: 550.0 nm, path points: 1, intensity: 1.0000"
        );
    }
    #[test]
    fn termination_display() {
        assert_eq!(format!("{}", Termination::LeftSystem), "LeftSystem");
        assert_eq!(format!("{}", Termination::PathLengthLimit), "PathLengthLimit");
    }
}
