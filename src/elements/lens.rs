#![warn(missing_docs)]
//! Rectangular lens with a focal length (plano approximation)
use nalgebra::{Point2, Vector2};
use num::Zero;
use plotters::style::RGBAColor;
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

use super::{ElementAttr, Interaction, Intersection, OpticalElement};
use crate::{
    error::{BenchError, BenchResult},
    render::{DrawingSurface, Renderable},
    utils::{reflect, refract},
};

/// Refractive index of the medium surrounding all elements.
const AIR_INDEX: f64 = 1.0;
/// Relative distance from the optical axis up to which the paraxial model is used.
const PARAXIAL_LIMIT: f64 = 0.9;
/// Intensity factor of a lens, independent of the regime.
const TRANSMISSION: f64 = 0.95;

/// Construction of the hit point on the top edge of a [`Lens`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopEdgeMode {
    /// The hit point lies on the top edge: `(x, top)`.
    #[default]
    Corrected,
    /// The coordinates of the hit point are swapped: `(top, x)`. This reproduces the behavior of older lens
    /// models and is only kept for comparing light paths against them.
    ///
    /// The reported hit distance is the one along the ray, so the path length of a traced ray grows by this
    /// distance and not by the length of the recorded segment.
    Transposed,
}

#[derive(Debug, Clone, PartialEq)]
/// A rectangular refractive body with a given focal length.
///
/// The lens is an axis-aligned rectangle of `width × height` centered at its position. Its optical axis is the
/// horizontal line through the position. The top edge is the edge with the smaller y coordinate (screen
/// coordinates).
///
/// A ray hitting the lens close to the optical axis is steered towards (positive focal length, converging) or away
/// from (negative focal length, diverging) the focal point. Rays hitting the lens far from the axis are refracted
/// on the edge using Snell's law.
///
/// ## Properties
///   - `width`
///   - `height`
///   - `focal length`
///   - `refractive index`
pub struct Lens {
    attr: ElementAttr,
    width: f64,
    height: f64,
    focal_length: f64,
    top_edge: TopEdgeMode,
}
impl Lens {
    /// Creates a new [`Lens`] centered at `(x, y)`.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the position is not finite.
    ///   - width or height are <= 0.0 or not finite.
    ///   - the focal length is zero or not finite.
    ///   - the refractive index is < 1.0 or not finite.
    pub fn new(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        focal_length: f64,
        refractive_index: f64,
    ) -> BenchResult<Self> {
        Self::check_size(width, height)?;
        Self::check_focal_length(focal_length)?;
        Ok(Self {
            attr: ElementAttr::new(Point2::new(x, y), refractive_index)?,
            width,
            height,
            focal_length,
            top_edge: TopEdgeMode::default(),
        })
    }
    /// Modifies the construction of hit points on the top edge of a [`Lens`].
    ///
    /// This function can be used with the "builder pattern".
    #[must_use]
    pub fn with_top_edge_mode(mut self, top_edge: TopEdgeMode) -> Self {
        self.top_edge = top_edge;
        self
    }
    fn check_size(width: f64, height: f64) -> BenchResult<()> {
        if width <= 0.0 || !width.is_finite() || height <= 0.0 || !height.is_finite() {
            return Err(BenchError::Element(
                "width and height of a lens must be >0.0 and finite".into(),
            ));
        }
        Ok(())
    }
    fn check_focal_length(focal_length: f64) -> BenchResult<()> {
        if focal_length.is_zero() || !focal_length.is_finite() {
            return Err(BenchError::Element(
                "focal length must be != 0.0 & finite".into(),
            ));
        }
        Ok(())
    }
    /// Returns the width of this [`Lens`].
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }
    /// Returns the height of this [`Lens`].
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }
    /// Sets the size of this [`Lens`].
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
    /// Returns the focal length of this [`Lens`].
    #[must_use]
    pub const fn focal_length(&self) -> f64 {
        self.focal_length
    }
    /// Sets the focal length of this [`Lens`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the focal length is zero or not finite.
    pub fn set_focal_length(&mut self, focal_length: f64) -> BenchResult<()> {
        Self::check_focal_length(focal_length)?;
        self.focal_length = focal_length;
        Ok(())
    }
    /// Returns the [`TopEdgeMode`] of this [`Lens`].
    #[must_use]
    pub const fn top_edge_mode(&self) -> TopEdgeMode {
        self.top_edge
    }
    /// Sets the refractive index of this [`Lens`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the given refractive index is < 1.0 or not finite.
    pub fn set_refractive_index(&mut self, refractive_index: f64) -> BenchResult<()> {
        self.attr.set_refractive_index(refractive_index)
    }
    /// Returns the focal point of this [`Lens`] on its optical axis.
    #[must_use]
    pub fn focal_point(&self) -> Point2<f64> {
        let position = self.position();
        Point2::new(position.x + self.focal_length, position.y)
    }
    /// Returns the coordinates of the left, right, top and bottom edge.
    fn edges(&self) -> (f64, f64, f64, f64) {
        let position = self.position();
        let half_width = 0.5 * self.width;
        let half_height = 0.5 * self.height;
        (
            position.x - half_width,
            position.x + half_width,
            position.y - half_height,
            position.y + half_height,
        )
    }
    fn vertical_edge_hit(
        &self,
        origin: &Point2<f64>,
        direction: &Vector2<f64>,
        edge_x: f64,
    ) -> Option<Intersection> {
        let (_, _, top, bottom) = self.edges();
        let t = (edge_x - origin.x) / direction.x;
        if t < 0.0 {
            return None;
        }
        let y = t.mul_add(direction.y, origin.y);
        (top..=bottom).contains(&y).then(|| Intersection {
            point: Point2::new(edge_x, y),
            distance: t * direction.norm(),
        })
    }
    fn horizontal_edge_hit(
        &self,
        origin: &Point2<f64>,
        direction: &Vector2<f64>,
        edge_y: f64,
        transposed: bool,
    ) -> Option<Intersection> {
        let (left, right, _, _) = self.edges();
        let t = (edge_y - origin.y) / direction.y;
        if t < 0.0 {
            return None;
        }
        let x = t.mul_add(direction.x, origin.x);
        if !(left..=right).contains(&x) {
            return None;
        }
        let point = if transposed {
            Point2::new(edge_y, x)
        } else {
            Point2::new(x, edge_y)
        };
        Some(Intersection {
            point,
            distance: t * direction.norm(),
        })
    }
    /// Returns the outward unit normal of the edge closest to the given point.
    #[must_use]
    pub fn normal_at(&self, point: &Point2<f64>) -> Vector2<f64> {
        let (left, right, top, bottom) = self.edges();
        let candidates = [
            ((point.x - left).abs(), Vector2::new(-1.0, 0.0)),
            ((point.x - right).abs(), Vector2::new(1.0, 0.0)),
            ((point.y - top).abs(), Vector2::new(0.0, -1.0)),
            ((point.y - bottom).abs(), Vector2::new(0.0, 1.0)),
        ];
        candidates
            .into_iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map_or_else(Vector2::x, |(_, normal)| normal)
    }
    /// Distance of the point from the optical axis relative to half of the smaller lens extent.
    fn relative_axis_distance(&self, point: &Point2<f64>) -> f64 {
        let aperture = 0.5 * self.width.min(self.height);
        (point.y - self.position().y).abs() / aperture
    }
    fn paraxial_direction(
        &self,
        point: &Point2<f64>,
        incident: &Vector2<f64>,
        relative_distance: f64,
    ) -> Vector2<f64> {
        let focal_point = self.focal_point();
        let steering = if self.focal_length > 0.0 {
            focal_point - point
        } else {
            point - focal_point
        };
        let Some(steering) = steering.try_normalize(f64::EPSILON) else {
            return *incident;
        };
        let weight = (1.0 - relative_distance) * 0.5;
        (incident + weight * steering)
            .try_normalize(f64::EPSILON)
            .unwrap_or(*incident)
    }
    fn edge_direction(&self, point: &Point2<f64>, incident: &Vector2<f64>) -> Vector2<f64> {
        let outward = self.normal_at(point);
        let (normal, n1, n2) = if incident.dot(&outward) > 0.0 {
            (-outward, self.refractive_index(), AIR_INDEX)
        } else {
            (outward, AIR_INDEX, self.refractive_index())
        };
        let direction = refract(incident, &normal, n1, n2)
            .unwrap_or_else(|| reflect(incident, &normal));
        direction.try_normalize(f64::EPSILON).unwrap_or(*incident)
    }
}

impl OpticalElement for Lens {
    fn attr(&self) -> &ElementAttr {
        &self.attr
    }
    fn attr_mut(&mut self) -> &mut ElementAttr {
        &mut self.attr
    }
    fn intersection(&self, origin: &Point2<f64>, direction: &Vector2<f64>) -> Option<Intersection> {
        let (left, right, top, bottom) = self.edges();
        // only edges facing the incoming ray can be hit from outside
        let candidates = [
            (direction.x > 0.0)
                .then(|| self.vertical_edge_hit(origin, direction, left))
                .flatten(),
            (direction.x < 0.0)
                .then(|| self.vertical_edge_hit(origin, direction, right))
                .flatten(),
            (direction.y > 0.0)
                .then(|| {
                    self.horizontal_edge_hit(
                        origin,
                        direction,
                        top,
                        self.top_edge == TopEdgeMode::Transposed,
                    )
                })
                .flatten(),
            (direction.y < 0.0)
                .then(|| self.horizontal_edge_hit(origin, direction, bottom, false))
                .flatten(),
        ];
        candidates
            .into_iter()
            .flatten()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
    fn interact(
        &self,
        point: &Point2<f64>,
        incident: &Vector2<f64>,
        _wavelength: Length,
    ) -> Interaction {
        let relative_distance = self.relative_axis_distance(point);
        let direction = if relative_distance < PARAXIAL_LIMIT {
            self.paraxial_direction(point, incident, relative_distance)
        } else {
            self.edge_direction(point, incident)
        };
        Interaction {
            direction,
            intensity_factor: TRANSMISSION,
        }
    }
    fn is_point_inside(&self, x: f64, y: f64) -> bool {
        let (left, right, top, bottom) = self.edges();
        (left..=right).contains(&x) && (top..=bottom).contains(&y)
    }
}

impl Renderable for Lens {
    fn render(&self, surface: &mut dyn DrawingSurface) -> BenchResult<()> {
        let (left, right, top, bottom) = self.edges();
        let top_left = Point2::new(left, top);
        let bottom_right = Point2::new(right, bottom);
        surface.draw_rect(&top_left, &bottom_right, &RGBAColor(150, 200, 255, 0.3), true)?;
        surface.draw_rect(&top_left, &bottom_right, &RGBAColor(70, 130, 200, 1.0), false)?;
        surface.draw_circle(&self.focal_point(), 3.0, &RGBAColor(70, 130, 200, 0.8), true)
    }
}
