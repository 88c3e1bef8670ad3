#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
//! This is the documentation for the **optibench** package, a two-dimensional geometric optics bench.
//!
//! An [`OpticalSystem`](optical_system::OpticalSystem) is a bounded region containing optical elements
//! ([`Lens`](elements::Lens), [`Mirror`](elements::Mirror)) and [`LightRay`](ray::LightRay)s. On each update the path
//! of every ray is recomputed from scratch: the ray is marched from element to element, refracted by lenses
//! (paraxial steering near the axis, Snell's law at the edges) and reflected by mirrors, until it leaves the region,
//! its intensity drops below a threshold or its path length reaches a limit.
//!
//! Benches can be described as YAML scene files ([`SceneDocument`](scene_document::SceneDocument)), rendered as SVG
//! ([`render`]) and their ray paths exported as CSV ([`export`]).
pub mod console;
pub mod elements;
pub mod error;
pub mod export;
pub mod optical_system;
pub mod ray;
pub mod render;
pub mod scene_document;
pub mod trace_config;
pub mod utils;

pub use optical_system::OpticalSystem;
