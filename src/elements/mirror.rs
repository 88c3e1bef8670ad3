#![warn(missing_docs)]
//! Flat mirror
use nalgebra::{Point2, Vector2};
use plotters::style::RGBAColor;
use uom::si::{f64::Length, length::nanometer};

use super::{ElementAttr, Interaction, Intersection, OpticalElement};
use crate::{
    error::{BenchError, BenchResult},
    render::{DrawingSurface, Renderable},
    utils::{distance_to_segment, reflect},
};

/// Reflectivity of the coating in the visible range.
const BASE_REFLECTIVITY: f64 = 0.9;
/// Maximum distance of a point from the mirror segment still counted as "on the mirror".
const PICK_TOLERANCE: f64 = 5.0;
/// Rays (nearly) parallel to the mirror surface do not hit.
const PARALLEL_LIMIT: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
/// A flat mirror, modelled as a reflecting line segment.
///
/// The segment is centered at the position of the mirror and oriented by its angle (in radians) measured from the
/// x axis. The mirror reflects from both sides.
///
/// ## Properties
///   - `length`
///   - `angle`
pub struct Mirror {
    attr: ElementAttr,
    length: f64,
    angle: f64,
}
impl Mirror {
    /// Creates a new [`Mirror`] centered at `(x, y)` with the given `length` and `angle` (in radians).
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the position is not finite.
    ///   - the length is <= 0.0 or not finite.
    ///   - the angle is not finite.
    pub fn new(x: f64, y: f64, length: f64, angle: f64) -> BenchResult<Self> {
        Self::check_length(length)?;
        Self::check_angle(angle)?;
        Ok(Self {
            attr: ElementAttr::new(Point2::new(x, y), 1.0)?,
            length,
            angle,
        })
    }
    fn check_length(length: f64) -> BenchResult<()> {
        if length <= 0.0 || !length.is_finite() {
            return Err(BenchError::Element(
                "length of a mirror must be >0.0 and finite".into(),
            ));
        }
        Ok(())
    }
    fn check_angle(angle: f64) -> BenchResult<()> {
        if !angle.is_finite() {
            return Err(BenchError::Element("mirror angle must be finite".into()));
        }
        Ok(())
    }
    /// Returns the length of this [`Mirror`].
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }
    /// Sets the length of this [`Mirror`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the length is <= 0.0 or not finite.
    pub fn set_length(&mut self, length: f64) -> BenchResult<()> {
        Self::check_length(length)?;
        self.length = length;
        Ok(())
    }
    /// Returns the angle (in radians) of this [`Mirror`].
    #[must_use]
    pub const fn angle(&self) -> f64 {
        self.angle
    }
    /// Sets the angle (in radians) of this [`Mirror`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the angle is not finite.
    pub fn set_angle(&mut self, angle: f64) -> BenchResult<()> {
        Self::check_angle(angle)?;
        self.angle = angle;
        Ok(())
    }
    /// Returns the unit vector along the mirror surface.
    #[must_use]
    pub fn tangent(&self) -> Vector2<f64> {
        Vector2::new(self.angle.cos(), self.angle.sin())
    }
    /// Returns the unit normal of the mirror surface.
    #[must_use]
    pub fn normal(&self) -> Vector2<f64> {
        Vector2::new(self.angle.sin(), -self.angle.cos())
    }
    /// Returns both end points of the mirror segment.
    #[must_use]
    pub fn endpoints(&self) -> (Point2<f64>, Point2<f64>) {
        let half = 0.5 * self.length * self.tangent();
        let position = self.position();
        (position - half, position + half)
    }
    /// Returns the reflectivity of this [`Mirror`] for the given wavelength.
    ///
    /// The coating reflects slightly less in the blue (< 450 nm) and slightly more in the red (> 650 nm). The
    /// result is always in the range `(0.0..=1.0)`.
    #[must_use]
    pub fn reflectivity(&self, wavelength: Length) -> f64 {
        let wavelength = wavelength.get::<nanometer>();
        let reflectivity = if wavelength < 450.0 {
            BASE_REFLECTIVITY * 0.95
        } else if wavelength > 650.0 {
            BASE_REFLECTIVITY * 1.03
        } else {
            BASE_REFLECTIVITY
        };
        reflectivity.clamp(0.0, 1.0)
    }
}

impl OpticalElement for Mirror {
    fn attr(&self) -> &ElementAttr {
        &self.attr
    }
    fn attr_mut(&mut self) -> &mut ElementAttr {
        &mut self.attr
    }
    fn intersection(&self, origin: &Point2<f64>, direction: &Vector2<f64>) -> Option<Intersection> {
        let (start, end) = self.endpoints();
        let segment = end - start;
        let offset = start - origin;
        let det = direction.perp(&segment);
        if det.abs() < PARALLEL_LIMIT {
            return None;
        }
        // ray parameter and segment parameter
        let t = offset.perp(&segment) / det;
        let s = offset.perp(direction) / det;
        if t < 0.0 || !(0.0..=1.0).contains(&s) {
            return None;
        }
        Some(Intersection {
            point: origin + t * direction,
            distance: t * direction.norm(),
        })
    }
    fn interact(
        &self,
        _point: &Point2<f64>,
        incident: &Vector2<f64>,
        wavelength: Length,
    ) -> Interaction {
        Interaction {
            direction: reflect(incident, &self.normal()),
            intensity_factor: self.reflectivity(wavelength),
        }
    }
    fn is_point_inside(&self, x: f64, y: f64) -> bool {
        let (start, end) = self.endpoints();
        distance_to_segment(&Point2::new(x, y), &start, &end) <= PICK_TOLERANCE
    }
}

impl Renderable for Mirror {
    fn render(&self, surface: &mut dyn DrawingSurface) -> BenchResult<()> {
        let (start, end) = self.endpoints();
        surface.draw_line(&start, &end, &RGBAColor(120, 120, 130, 1.0), 3)
    }
}
