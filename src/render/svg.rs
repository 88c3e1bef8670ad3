//! SVG output using the `plotters` SVG backend
use nalgebra::{Point2, Vector2};
use plotters::{
    coord::Shift,
    element::{Circle, PathElement, Rectangle},
    prelude::{DrawingArea, IntoDrawingArea, SVGBackend},
    style::{Color, RGBAColor, ShapeStyle, WHITE},
};

use super::{DrawingSurface, Renderable};
use crate::{
    error::{BenchError, BenchResult},
    optical_system::OpticalSystem,
};

/// A [`DrawingSurface`] writing an SVG document into a string.
///
/// The surface covers exactly the bounds of the rendered system. Bench coordinates are shifted so that the top left
/// corner of the system becomes the origin of the image.
pub struct SvgSurface<'a> {
    area: DrawingArea<SVGBackend<'a>, Shift>,
    offset: Vector2<f64>,
}
impl<'a> SvgSurface<'a> {
    /// Creates a new [`SvgSurface`] covering the bounds of the given [`OpticalSystem`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the background could not be filled.
    pub fn new(buffer: &'a mut String, system: &OpticalSystem) -> BenchResult<Self> {
        let size = (to_pixels(system.width()) + 1, to_pixels(system.height()) + 1);
        let area = SVGBackend::with_string(buffer, size).into_drawing_area();
        area.fill(&WHITE)
            .map_err(|e| BenchError::Render(format!("filling background failed: {e}")))?;
        Ok(Self {
            area,
            offset: -system.position().coords,
        })
    }
    /// Finish the SVG document.
    ///
    /// # Errors
    ///
    /// This function will return an error if the backend could not finalize the document.
    pub fn present(self) -> BenchResult<()> {
        self.area
            .present()
            .map_err(|e| BenchError::Render(format!("finishing svg document failed: {e}")))
    }
    #[allow(clippy::cast_possible_truncation)]
    fn pixel(&self, point: &Point2<f64>) -> (i32, i32) {
        let shifted = point + self.offset;
        (shifted.x.round() as i32, shifted.y.round() as i32)
    }
}
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixels(length: f64) -> u32 {
    length.max(0.0).ceil() as u32
}
fn shape_style(color: &RGBAColor, filled: bool) -> ShapeStyle {
    if filled {
        color.filled()
    } else {
        color.stroke_width(1)
    }
}

impl DrawingSurface for SvgSurface<'_> {
    fn draw_line(
        &mut self,
        from: &Point2<f64>,
        to: &Point2<f64>,
        color: &RGBAColor,
        width: u32,
    ) -> BenchResult<()> {
        let line = PathElement::new(vec![self.pixel(from), self.pixel(to)], color.stroke_width(width));
        self.area
            .draw(&line)
            .map_err(|e| BenchError::Render(format!("drawing line failed: {e}")))
    }
    fn draw_rect(
        &mut self,
        corner: &Point2<f64>,
        opposite_corner: &Point2<f64>,
        color: &RGBAColor,
        filled: bool,
    ) -> BenchResult<()> {
        let rect = Rectangle::new(
            [self.pixel(corner), self.pixel(opposite_corner)],
            shape_style(color, filled),
        );
        self.area
            .draw(&rect)
            .map_err(|e| BenchError::Render(format!("drawing rectangle failed: {e}")))
    }
    fn draw_circle(
        &mut self,
        center: &Point2<f64>,
        radius: f64,
        color: &RGBAColor,
        filled: bool,
    ) -> BenchResult<()> {
        let circle = Circle::new(self.pixel(center), to_pixels(radius), shape_style(color, filled));
        self.area
            .draw(&circle)
            .map_err(|e| BenchError::Render(format!("drawing circle failed: {e}")))
    }
}

/// Render the given [`OpticalSystem`] (including its current ray paths) as SVG document.
///
/// # Errors
///
/// This function will return an error if drawing fails.
pub fn render_svg(system: &OpticalSystem) -> BenchResult<String> {
    let mut buffer = String::new();
    {
        let mut surface = SvgSurface::new(&mut buffer, system)?;
        system.render(&mut surface)?;
        surface.present()?;
    }
    Ok(buffer)
}
