use crate::{InnerSpace, One, Quaternion, Vector3};

pub fn normalize_or(v: Vector3, fallback: Vector3) -> Vector3 {
    let len = v.magnitude();
    if len <= f64::EPSILON || !len.is_finite() {
        fallback
    } else {
        v / len
    }
}

/// Unit quaternion, or identity if `q` has collapsed to zero or gone non-finite.
pub fn renormalize(q: Quaternion) -> Quaternion {
    let len = q.magnitude();
    if len <= f64::EPSILON || !len.is_finite() {
        Quaternion::one()
    } else {
        q / len
    }
}

pub fn clamp_components(v: Vector3, limit: f64) -> Vector3 {
    let clamp = |value: f64| {
        if value.is_nan() {
            0.0
        } else {
            value.clamp(-limit, limit)
        }
    };
    Vector3::new(clamp(v.x), clamp(v.y), clamp(v.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renormalize_recovers_identity_from_zero() {
        let q = renormalize(Quaternion::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(q, Quaternion::one());
        let q = renormalize(Quaternion::new(2.0, 0.0, 0.0, 0.0));
        assert!((q.magnitude() - 1.0).abs() < 1.0e-12);
    }

    #[test]
    fn clamp_components_bounds_each_axis_and_drops_nan() {
        let v = clamp_components(Vector3::new(5.0, -7.0, f64::NAN), 2.0);
        assert_eq!(v, Vector3::new(2.0, -2.0, 0.0));
    }
}
