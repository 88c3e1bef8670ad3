//! Vector helpers for reflection, refraction and segment distances in the plane.
use nalgebra::{Point2, Vector2};

/// Reflect a direction on a surface with the given normal (`v' = v - 2 (v·n) n`).
///
/// The orientation of the normal does not matter. The normal is expected to be of unit length.
#[must_use]
pub fn reflect(incident: &Vector2<f64>, normal: &Vector2<f64>) -> Vector2<f64> {
    incident - 2.0 * incident.dot(normal) * normal
}
/// Refract a direction at a boundary using Snell's law in vector form.
///
/// `normal` must point against the incident direction (into the medium the ray comes from), `n1` is the refractive
/// index on the incident side, `n2` the one behind the boundary. Both vectors are expected to be of unit length.
///
/// Returns `None` in case of total internal reflection (`sin²θt > 1`).
#[must_use]
pub fn refract(
    incident: &Vector2<f64>,
    normal: &Vector2<f64>,
    n1: f64,
    n2: f64,
) -> Option<Vector2<f64>> {
    let mu = n1 / n2;
    let cos_i = -incident.dot(normal);
    let sin2_t = (mu * mu) * cos_i.mul_add(-cos_i, 1.0);
    if sin2_t > 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    Some(mu * incident + mu.mul_add(cos_i, -cos_t) * normal)
}
/// Calculate the distance of a point to the line segment between `start` and `end`.
#[must_use]
pub fn distance_to_segment(point: &Point2<f64>, start: &Point2<f64>, end: &Point2<f64>) -> f64 {
    let segment = end - start;
    let length_squared = segment.norm_squared();
    if length_squared == 0.0 {
        return (point - start).norm();
    }
    let t = ((point - start).dot(&segment) / length_squared).clamp(0.0, 1.0);
    (point - (start + t * segment)).norm()
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    #[test]
    fn reflect_perpendicular() {
        let reflected = reflect(&Vector2::new(1.0, 0.0), &Vector2::new(-1.0, 0.0));
        assert_abs_diff_eq!(reflected, Vector2::new(-1.0, 0.0));
    }
    #[test]
    fn reflect_oblique() {
        let incident = Vector2::new(1.0, 1.0).normalize();
        let reflected = reflect(&incident, &Vector2::new(0.0, 1.0));
        assert_abs_diff_eq!(reflected, Vector2::new(1.0, -1.0).normalize(), epsilon = 1e-12);
    }
    #[test]
    fn refract_perpendicular() {
        let refracted = refract(&Vector2::x(), &Vector2::new(-1.0, 0.0), 1.0, 1.5).unwrap();
        assert_abs_diff_eq!(refracted, Vector2::x(), epsilon = 1e-12);
    }
    #[test]
    fn refract_snell() {
        let incident = Vector2::new(1.0, 0.5).normalize();
        let refracted = refract(&incident, &Vector2::new(-1.0, 0.0), 1.0, 1.5).unwrap();
        assert_abs_diff_eq!(refracted.norm(), 1.0, epsilon = 1e-12);
        // tangential component scales with n1 / n2
        assert_abs_diff_eq!(refracted.y, incident.y / 1.5, epsilon = 1e-12);
        assert!(refracted.x > 0.0);
    }
    #[test]
    fn refract_total_internal_reflection() {
        let incident = Vector2::new(0.3, 1.0).normalize();
        assert!(refract(&incident, &Vector2::new(-1.0, 0.0), 1.5, 1.0).is_none());
        let incident = Vector2::new(1.0, 0.1).normalize();
        assert!(refract(&incident, &Vector2::new(-1.0, 0.0), 1.5, 1.0).is_some());
    }
    #[test]
    fn distance_to_segment_cases() {
        let start = Point2::new(0.0, 0.0);
        let end = Point2::new(10.0, 0.0);
        assert_abs_diff_eq!(distance_to_segment(&Point2::new(5.0, 3.0), &start, &end), 3.0);
        assert_abs_diff_eq!(distance_to_segment(&Point2::new(-4.0, 3.0), &start, &end), 5.0);
        assert_abs_diff_eq!(distance_to_segment(&Point2::new(13.0, 4.0), &start, &end), 5.0);
        assert_abs_diff_eq!(distance_to_segment(&Point2::new(1.0, 1.0), &start, &start), 2.0_f64.sqrt());
    }
}
