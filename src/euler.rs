use std::f32::consts::FRAC_PI_2;

/// Euler decomposition of a rotation, in radians.
/// heading is the rotation about Y, attitude about Z, bank about X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerAngles {
    pub heading: f32,
    pub attitude: f32,
    pub bank: f32,
}

/// Gimbal-lock band on x*y + z*w (the exact pole is at 0.5).
const SINGULARITY: f32 = 0.499;

/// Convert a unit quaternion [x, y, z, w] to Euler angles.
///
/// The input is not re-normalized; feed unit quaternions or accept angular
/// drift. Inside the singularity bands (|x*y + z*w| > 0.499) heading absorbs
/// the full twist, attitude pins to ±π/2 and bank collapses to zero.
pub fn quat_to_euler(quat: &[f32; 4]) -> EulerAngles {
    let [x, y, z, w] = *quat;
    let test = x * y + z * w;

    if test > SINGULARITY {
        // north pole
        return EulerAngles {
            heading: 2.0 * x.atan2(w),
            attitude: FRAC_PI_2,
            bank: 0.0,
        };
    }
    if test < -SINGULARITY {
        // south pole
        return EulerAngles {
            heading: -2.0 * x.atan2(w),
            attitude: -FRAC_PI_2,
            bank: 0.0,
        };
    }

    let sqx = x * x;
    let sqy = y * y;
    let sqz = z * z;
    EulerAngles {
        heading: (2.0 * y * w - 2.0 * x * z).atan2(1.0 - 2.0 * sqy - 2.0 * sqz),
        attitude: (2.0 * test).asin(),
        bank: (2.0 * x * w - 2.0 * y * z).atan2(1.0 - 2.0 * sqx - 2.0 * sqz),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_1_SQRT_2, PI};

    /// Rebuild a quaternion from heading/attitude/bank (inverse convention
    /// of quat_to_euler: Y, then Z, then X).
    fn quat_from_euler(heading: f32, attitude: f32, bank: f32) -> [f32; 4] {
        let (s1, c1) = (heading / 2.0).sin_cos();
        let (s2, c2) = (attitude / 2.0).sin_cos();
        let (s3, c3) = (bank / 2.0).sin_cos();
        [
            s1 * s2 * c3 + c1 * c2 * s3,
            s1 * c2 * c3 + c1 * s2 * s3,
            c1 * s2 * c3 - s1 * c2 * s3,
            c1 * c2 * c3 - s1 * s2 * s3,
        ]
    }

    fn assert_close(actual: f32, expected: f32, what: &str) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "{}: expected {}, got {}",
            what,
            expected,
            actual
        );
    }

    #[test]
    fn test_identity_is_all_zero() {
        let e = quat_to_euler(&[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(e, EulerAngles { heading: 0.0, attitude: 0.0, bank: 0.0 });
    }

    #[test]
    fn test_quarter_turn_about_y() {
        let e = quat_to_euler(&[0.0, FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2]);
        assert_close(e.heading, FRAC_PI_2, "heading");
        assert_close(e.attitude, 0.0, "attitude");
        assert_close(e.bank, 0.0, "bank");
    }

    #[test]
    fn test_quarter_turn_about_x() {
        let e = quat_to_euler(&[FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2]);
        assert_close(e.heading, 0.0, "heading");
        assert_close(e.attitude, 0.0, "attitude");
        assert_close(e.bank, FRAC_PI_2, "bank");
    }

    #[test]
    fn test_quarter_turn_about_z_is_north_pole() {
        // x*y + z*w = 0.5 for this quaternion, inside the north band
        let e = quat_to_euler(&[0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2]);
        assert_close(e.heading, 0.0, "heading");
        assert_close(e.attitude, FRAC_PI_2, "attitude");
        assert_eq!(e.bank, 0.0);
    }

    #[test]
    fn test_exact_pole_takes_north_branch() {
        // test evaluates to 0.5, which is strictly above the 0.499 cutoff
        let e = quat_to_euler(&[FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0]);
        assert_close(e.heading, PI, "heading");
        assert_close(e.attitude, FRAC_PI_2, "attitude");
        assert_eq!(e.bank, 0.0);
    }

    #[test]
    fn test_exact_pole_takes_south_branch() {
        let e = quat_to_euler(&[FRAC_1_SQRT_2, -FRAC_1_SQRT_2, 0.0, 0.0]);
        assert_close(e.heading, -PI, "heading");
        assert_close(e.attitude, -FRAC_PI_2, "attitude");
        assert_eq!(e.bank, 0.0);
    }

    #[test]
    fn test_round_trip_outside_singularity() {
        let cases = [
            (0.3, -0.2, 0.5),
            (1.0, 0.4, -0.7),
            (-2.0, 0.1, 2.5),
            (0.0, -0.9, 0.0),
            (-1.3, 0.8, -1.9),
        ];
        for &(heading, attitude, bank) in &cases {
            let q = quat_from_euler(heading, attitude, bank);
            let e = quat_to_euler(&q);
            // stay out of the gimbal band, otherwise the decomposition is
            // legitimately ambiguous
            assert!((q[0] * q[1] + q[2] * q[3]).abs() < SINGULARITY);
            assert_close(e.heading, heading, "heading");
            assert_close(e.attitude, attitude, "attitude");
            assert_close(e.bank, bank, "bank");
        }
    }

    #[test]
    fn test_round_trip_through_reconversion() {
        // convert -> rebuild -> convert must be a fixed point
        let q = quat_from_euler(0.7, -0.3, 1.1);
        let first = quat_to_euler(&q);
        let rebuilt = quat_from_euler(first.heading, first.attitude, first.bank);
        let second = quat_to_euler(&rebuilt);
        assert_close(second.heading, first.heading, "heading");
        assert_close(second.attitude, first.attitude, "attitude");
        assert_close(second.bank, first.bank, "bank");
    }
}
