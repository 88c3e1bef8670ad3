#![warn(missing_docs)]
//! Optical elements a light ray can interact with.
//!
//! Every element implements the [`OpticalElement`] trait, which handles the interface for calculating
//! intersection points and the physical response of the element. An
//! [`OpticalSystem`](crate::optical_system::OpticalSystem) stores its elements as [`Element`], a closed enum over
//! all element types.
mod element_attr;
mod lens;
mod mirror;

pub use element_attr::ElementAttr;
pub use lens::{Lens, TopEdgeMode};
pub use mirror::Mirror;

use nalgebra::{Point2, Vector2};
use strum::Display;
use uom::si::f64::Length;

use crate::{
    error::BenchResult,
    render::{DrawingSurface, Renderable},
};

/// Intersection of a ray with an optical element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// intersection point
    pub point: Point2<f64>,
    /// distance from the ray origin to the intersection point (along the ray)
    pub distance: f64,
}
/// Physical response of an optical element to an incident ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    /// new propagation direction (unit vector)
    pub direction: Vector2<f64>,
    /// factor in the range `(0.0..=1.0)` by which the cumulative intensity of the ray is multiplied
    pub intensity_factor: f64,
}

/// Interface of all optical elements.
///
/// Implementations must not modify the element while calculating intersections or interactions. The propagation
/// of rays only reads elements.
pub trait OpticalElement {
    /// Returns a reference to the common attributes of this element.
    fn attr(&self) -> &ElementAttr;
    /// Returns a mutable reference to the common attributes of this element.
    fn attr_mut(&mut self) -> &mut ElementAttr;
    /// Calculate the nearest forward intersection of a ray starting at `origin` with the given `direction`.
    ///
    /// The returned distance is >= 0.0. This function returns `None` if the ray does not hit the element going
    /// forward.
    fn intersection(&self, origin: &Point2<f64>, direction: &Vector2<f64>) -> Option<Intersection>;
    /// Calculate the new direction and the intensity factor of a ray hitting the element at `point`.
    fn interact(
        &self,
        point: &Point2<f64>,
        incident: &Vector2<f64>,
        wavelength: Length,
    ) -> Interaction;
    /// Check if the given point lies on the element (used for picking drag targets).
    fn is_point_inside(&self, x: f64, y: f64) -> bool;
    /// Returns the position of this element.
    fn position(&self) -> Point2<f64> {
        self.attr().position()
    }
    /// Sets the position of this element.
    ///
    /// # Errors
    ///
    /// This function will return an error if the position is not finite.
    fn set_position(&mut self, position: Point2<f64>) -> BenchResult<()> {
        self.attr_mut().set_position(position)
    }
    /// Returns the refractive index of this element.
    fn refractive_index(&self) -> f64 {
        self.attr().refractive_index()
    }
    /// Restore the refractive index given at construction time.
    fn reset(&mut self) {
        self.attr_mut().reset();
    }
}

/// All element types which can be placed in an [`OpticalSystem`](crate::optical_system::OpticalSystem).
#[derive(Debug, Clone, PartialEq, Display)]
pub enum Element {
    /// a rectangular refractive element
    Lens(Lens),
    /// a flat reflective line segment
    Mirror(Mirror),
}
impl Element {
    /// Returns the contained [`Lens`] or `None` if this is not a lens.
    #[must_use]
    pub const fn as_lens(&self) -> Option<&Lens> {
        match self {
            Self::Lens(lens) => Some(lens),
            Self::Mirror(_) => None,
        }
    }
    /// Returns the contained [`Mirror`] or `None` if this is not a mirror.
    #[must_use]
    pub const fn as_mirror(&self) -> Option<&Mirror> {
        match self {
            Self::Mirror(mirror) => Some(mirror),
            Self::Lens(_) => None,
        }
    }
}
impl From<Lens> for Element {
    fn from(lens: Lens) -> Self {
        Self::Lens(lens)
    }
}
impl From<Mirror> for Element {
    fn from(mirror: Mirror) -> Self {
        Self::Mirror(mirror)
    }
}
impl OpticalElement for Element {
    fn attr(&self) -> &ElementAttr {
        match self {
            Self::Lens(lens) => lens.attr(),
            Self::Mirror(mirror) => mirror.attr(),
        }
    }
    fn attr_mut(&mut self) -> &mut ElementAttr {
        match self {
            Self::Lens(lens) => lens.attr_mut(),
            Self::Mirror(mirror) => mirror.attr_mut(),
        }
    }
    fn intersection(&self, origin: &Point2<f64>, direction: &Vector2<f64>) -> Option<Intersection> {
        match self {
            Self::Lens(lens) => lens.intersection(origin, direction),
            Self::Mirror(mirror) => mirror.intersection(origin, direction),
        }
    }
    fn interact(
        &self,
        point: &Point2<f64>,
        incident: &Vector2<f64>,
        wavelength: Length,
    ) -> Interaction {
        match self {
            Self::Lens(lens) => lens.interact(point, incident, wavelength),
            Self::Mirror(mirror) => mirror.interact(point, incident, wavelength),
        }
    }
    fn is_point_inside(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Lens(lens) => lens.is_point_inside(x, y),
            Self::Mirror(mirror) => mirror.is_point_inside(x, y),
        }
    }
}

impl Renderable for Element {
    fn render(&self, surface: &mut dyn DrawingSurface) -> BenchResult<()> {
        match self {
            Self::Lens(lens) => lens.render(surface),
            Self::Mirror(mirror) => mirror.render(surface),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::nanometer;
    #[test]
    fn from() {
        let lens = Lens::new(0.0, 0.0, 10.0, 20.0, 50.0, 1.5).unwrap();
        let element = Element::from(lens.clone());
        assert_eq!(element.as_lens(), Some(&lens));
        assert_eq!(element.as_mirror(), None);
        let mirror = Mirror::new(0.0, 0.0, 10.0, 0.0).unwrap();
        let element = Element::from(mirror.clone());
        assert_eq!(element.as_mirror(), Some(&mirror));
        assert_eq!(element.as_lens(), None);
    }
    #[test]
    fn display() {
        let element: Element = Mirror::new(0.0, 0.0, 10.0, 0.0).unwrap().into();
        assert_eq!(format!("{element}"), "Mirror");
        let element: Element = Lens::new(0.0, 0.0, 10.0, 20.0, 50.0, 1.5).unwrap().into();
        assert_eq!(format!("{element}"), "Lens");
    }
    #[test]
    fn dispatch() {
        let mirror = Mirror::new(200.0, 150.0, 100.0, std::f64::consts::FRAC_PI_2).unwrap();
        let mut element = Element::from(mirror.clone());
        let origin = Point2::new(50.0, 150.0);
        let dir = Vector2::x();
        assert_eq!(
            element.intersection(&origin, &dir),
            mirror.intersection(&origin, &dir)
        );
        let point = Point2::new(200.0, 150.0);
        assert_eq!(
            element.interact(&point, &dir, nanometer!(550.0)),
            mirror.interact(&point, &dir, nanometer!(550.0))
        );
        assert!(element.is_point_inside(201.0, 120.0));
        element.set_position(Point2::new(10.0, 10.0)).unwrap();
        assert_eq!(element.position(), Point2::new(10.0, 10.0));
        assert_eq!(element.refractive_index(), 1.0);
    }
}
