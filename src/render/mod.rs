#![warn(missing_docs)]
//! Drawing of optical systems.
//!
//! Rendering is strictly downstream of the propagation: it only reads the state produced by
//! [`OpticalSystem::update`](crate::optical_system::OpticalSystem::update). Every drawable object implements
//! [`Renderable`] and draws itself on a [`DrawingSurface`]. All coordinates are given in bench coordinates.
mod svg;

pub use svg::{render_svg, SvgSurface};

use nalgebra::Point2;
use plotters::style::RGBAColor;
use uom::si::{f64::Length, length::nanometer};

use crate::error::BenchResult;

/// Shortest wavelength with a distinct color. Shorter wavelengths are drawn in this color.
const VISIBLE_MIN: f64 = 400.0;
/// Longest wavelength with a distinct color. Longer wavelengths are drawn in this color.
const VISIBLE_MAX: f64 = 700.0;

/// A target for simple 2D primitives.
pub trait DrawingSurface {
    /// Draw a straight line with the given stroke width.
    ///
    /// # Errors
    ///
    /// This function will return an error if the underlying backend fails.
    fn draw_line(
        &mut self,
        from: &Point2<f64>,
        to: &Point2<f64>,
        color: &RGBAColor,
        width: u32,
    ) -> BenchResult<()>;
    /// Draw an axis-aligned rectangle given by two opposite corners.
    ///
    /// # Errors
    ///
    /// This function will return an error if the underlying backend fails.
    fn draw_rect(
        &mut self,
        corner: &Point2<f64>,
        opposite_corner: &Point2<f64>,
        color: &RGBAColor,
        filled: bool,
    ) -> BenchResult<()>;
    /// Draw a circle.
    ///
    /// # Errors
    ///
    /// This function will return an error if the underlying backend fails.
    fn draw_circle(
        &mut self,
        center: &Point2<f64>,
        radius: f64,
        color: &RGBAColor,
        filled: bool,
    ) -> BenchResult<()>;
}

/// Objects which can be drawn on a [`DrawingSurface`].
pub trait Renderable {
    /// Draw this object on the given surface.
    ///
    /// # Errors
    ///
    /// This function will return an error if drawing on the surface fails.
    fn render(&self, surface: &mut dyn DrawingSurface) -> BenchResult<()>;
}

/// Returns the (approximate) perceived color of light with the given wavelength.
///
/// The visible range from 400 nm to 700 nm is mapped on a violet - blue - green - yellow - red ramp. Wavelengths
/// outside this range get the color of the nearest border.
#[must_use]
pub fn wavelength_to_color(wavelength: Length) -> RGBAColor {
    let wvl = wavelength.get::<nanometer>();
    let wvl = if wvl.is_nan() {
        VISIBLE_MIN
    } else {
        wvl.clamp(VISIBLE_MIN, VISIBLE_MAX)
    };
    let (red, green, blue) = if wvl < 440.0 {
        (0.6 * (440.0 - wvl) / 40.0, 0.0, 1.0)
    } else if wvl < 490.0 {
        (0.0, (wvl - 440.0) / 50.0, 1.0)
    } else if wvl < 510.0 {
        (0.0, 1.0, (510.0 - wvl) / 20.0)
    } else if wvl < 580.0 {
        ((wvl - 510.0) / 70.0, 1.0, 0.0)
    } else if wvl < 645.0 {
        (1.0, (645.0 - wvl) / 65.0, 0.0)
    } else {
        (1.0, 0.0, 0.0)
    };
    RGBAColor(to_channel(red), to_channel(green), to_channel(blue), 1.0)
}
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}


#[cfg(test)]
mod test {
    use super::{test_surface::RecordingSurface, *};
    use crate::{
        elements::{Element, Lens, Mirror},
        nanometer,
        optical_system::OpticalSystem,
        ray::LightRay,
    };
    use std::f64::consts::FRAC_PI_2;

    fn channels(color: &RGBAColor) -> (u8, u8, u8) {
        (color.0, color.1, color.2)
    }
    #[test]
    fn wavelength_to_color_bands() {
        assert_eq!(channels(&wavelength_to_color(nanometer!(400.0))), (153, 0, 255));
        assert_eq!(channels(&wavelength_to_color(nanometer!(450.0))), (0, 51, 255));
        assert_eq!(channels(&wavelength_to_color(nanometer!(510.0))), (0, 255, 0));
        assert_eq!(channels(&wavelength_to_color(nanometer!(700.0))), (255, 0, 0));
        let green = wavelength_to_color(nanometer!(550.0));
        assert!(green.1 > green.0 && green.1 > green.2);
    }
    #[test]
    fn wavelength_to_color_clamped() {
        assert_eq!(
            wavelength_to_color(nanometer!(300.0)),
            wavelength_to_color(nanometer!(400.0))
        );
        assert_eq!(
            wavelength_to_color(nanometer!(1064.0)),
            wavelength_to_color(nanometer!(700.0))
        );
    }
    #[test]
    fn render_elements() {
        let mut surface = RecordingSurface::default();
        let mirror: Element = Mirror::new(200.0, 150.0, 100.0, FRAC_PI_2).unwrap().into();
        mirror.render(&mut surface).unwrap();
        assert_eq!(surface.lines.len(), 1);
        let lens: Element = Lens::new(100.0, 150.0, 20.0, 100.0, 50.0, 1.5)
            .unwrap()
            .into();
        lens.render(&mut surface).unwrap();
        assert_eq!(surface.rects.len(), 2);
        assert_eq!(
            surface.rects[0],
            (Point2::new(90.0, 100.0), Point2::new(110.0, 200.0), true)
        );
        assert_eq!(surface.circles, vec![(Point2::new(150.0, 150.0), 3.0, true)]);
    }
    #[test]
    fn render_system() {
        let mut system = OpticalSystem::new(0.0, 0.0, 400.0, 300.0).unwrap();
        system.add_optical_element(Mirror::new(200.0, 150.0, 100.0, FRAC_PI_2).unwrap());
        system.add_light_ray(LightRay::new(50.0, 150.0, 0.0, nanometer!(650.0)).unwrap());
        system.update(0.0);
        let mut surface = RecordingSurface::default();
        system.render(&mut surface).unwrap();
        // system border
        assert_eq!(
            surface.rects[0],
            (Point2::new(0.0, 0.0), Point2::new(400.0, 300.0), false)
        );
        // mirror and two ray segments
        assert_eq!(surface.lines.len(), 3);
        let (from, _, color) = surface.lines[1];
        assert_eq!(from, Point2::new(50.0, 150.0));
        assert_eq!(channels(&color), channels(&wavelength_to_color(nanometer!(650.0))));
        assert_eq!(color.3, 1.0);
        // the reflected segment is drawn with reduced opacity
        assert!(surface.lines[2].2 .3 < 1.0);
        // emitter
        assert_eq!(surface.circles.len(), 1);
    }
}
