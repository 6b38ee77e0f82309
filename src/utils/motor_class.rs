/// Impulse class of a motor, e.g. `K` at 95% of the way through its range.
#[derive(Debug, Clone, PartialEq)]
pub struct MotorClass {
    pub designation: String,
    pub percent: f64,
}

/// Classifies a total impulse given in newton-seconds.
///
/// Classes from `D` upward double in size (`D` is 10-20 N·s, `E` is 20-40 N·s
/// and so on). `A` to `C` cover the smaller fixed ranges below 10 N·s.
pub fn motor_class(total_impulse_ns: f64) -> MotorClass {
    if total_impulse_ns < 10.0 {
        let (designation, percent) = if total_impulse_ns > 5.0 {
            ("C", 100.0 * total_impulse_ns / 10.0)
        } else if total_impulse_ns > 2.5 {
            ("B", 100.0 * total_impulse_ns / 5.0)
        } else if total_impulse_ns > 1.25 {
            ("A", 100.0 * total_impulse_ns / 2.5)
        } else {
            ("N/A", 0.0)
        };

        return MotorClass {
            designation: designation.to_string(),
            percent,
        };
    }

    let offset = (total_impulse_ns / 10.0).log2().floor() as u32;
    let designation = char::from_u32('D' as u32 + offset)
        .map(|c| c.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let min_impulse = 10.0 * 2f64.powi(offset as i32);
    MotorClass {
        designation,
        percent: 100.0 * (total_impulse_ns - min_impulse) / min_impulse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_class_designation() {
        assert_eq!(motor_class(2500.0).designation, "K");
        assert_eq!(motor_class(1281.0).designation, "K");
        assert_eq!(motor_class(1279.0).designation, "J");
        assert_eq!(motor_class(350.0).designation, "I");
        assert_eq!(motor_class(10.0).designation, "D");
    }

    #[test]
    fn test_class_percent() {
        assert_relative_eq!(motor_class(2500.0).percent, 95.3125, epsilon = 1e-9);
        assert_relative_eq!(motor_class(1281.0).percent, 0.078125, epsilon = 1e-9);
        assert_relative_eq!(motor_class(1279.0).percent, 99.84375, epsilon = 1e-9);
        assert_relative_eq!(motor_class(350.0).percent, 9.375, epsilon = 1e-9);
    }

    #[test]
    fn test_small_motor_classes() {
        let a = motor_class(2.0);
        assert_eq!(a.designation, "A");
        assert_relative_eq!(a.percent, 80.0, epsilon = 1e-9);

        let c = motor_class(9.23);
        assert_eq!(c.designation, "C");
        assert_relative_eq!(c.percent, 92.3, epsilon = 1e-9);

        let b = motor_class(3.55);
        assert_eq!(b.designation, "B");
        assert_relative_eq!(b.percent, 71.0, epsilon = 1e-9);

        let none = motor_class(1.0);
        assert_eq!(none.designation, "N/A");
        assert_eq!(none.percent, 0.0);
    }
}
