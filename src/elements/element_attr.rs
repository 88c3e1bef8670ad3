#![warn(missing_docs)]
//! Common attributes of all optical elements
use nalgebra::Point2;

use crate::error::{BenchError, BenchResult};

/// Attributes shared by every optical element: its position and refractive index.
///
/// The refractive index given at construction time is saved and restored by [`ElementAttr::reset`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElementAttr {
    position: Point2<f64>,
    refractive_index: f64,
    initial_refractive_index: f64,
}
impl ElementAttr {
    /// Creates new [`ElementAttr`].
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the position is not finite.
    ///   - the refractive index is < 1.0 or not finite.
    pub fn new(position: Point2<f64>, refractive_index: f64) -> BenchResult<Self> {
        Self::check_position(&position)?;
        Self::check_refractive_index(refractive_index)?;
        Ok(Self {
            position,
            refractive_index,
            initial_refractive_index: refractive_index,
        })
    }
    fn check_position(position: &Point2<f64>) -> BenchResult<()> {
        if !position.x.is_finite() || !position.y.is_finite() {
            return Err(BenchError::Element("position must be finite".into()));
        }
        Ok(())
    }
    fn check_refractive_index(refractive_index: f64) -> BenchResult<()> {
        if refractive_index < 1.0 || !refractive_index.is_finite() {
            return Err(BenchError::Element(
                "refractive index must be >=1.0 and finite".into(),
            ));
        }
        Ok(())
    }
    /// Returns the position of the element.
    #[must_use]
    pub const fn position(&self) -> Point2<f64> {
        self.position
    }
    /// Sets the position of the element.
    ///
    /// # Errors
    ///
    /// This function will return an error if the position is not finite.
    pub fn set_position(&mut self, position: Point2<f64>) -> BenchResult<()> {
        Self::check_position(&position)?;
        self.position = position;
        Ok(())
    }
    /// Returns the refractive index of the element.
    #[must_use]
    pub const fn refractive_index(&self) -> f64 {
        self.refractive_index
    }
    /// Sets the refractive index of the element.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given refractive index is < 1.0 or not finite.
    pub fn set_refractive_index(&mut self, refractive_index: f64) -> BenchResult<()> {
        Self::check_refractive_index(refractive_index)?;
        self.refractive_index = refractive_index;
        Ok(())
    }
    /// Restore the refractive index given at construction time.
    pub fn reset(&mut self) {
        self.refractive_index = self.initial_refractive_index;
    }
}
