//! SI (and a few customary) definitions.
//!
//! This module is pure data: named base dimensions, quantity kinds and units
//! built on the `symunit-core` algebra. Every entity is a lazily initialized
//! static, so definitions are constructed once and shared by clone.
//!
//! Lengths carry the customary chain `inch → foot → yard → mile` defined
//! exactly from the metre (`1 in = 254/10⁴ m`), and the angle units treat
//! the radian as a named dimensionless unit so that `degree → radian`
//! resolves to the exact irrational factor `π/180`.
//!
//! ```rust
//! use symunit::si;
//! use symunit::{Quantity, Reference};
//!
//! let in_km = Reference::new(si::LENGTH.clone(), si::KILOMETRE.clone()).unwrap();
//! let in_m = Reference::new(si::LENGTH.clone(), si::METRE.clone()).unwrap();
//! let trip = Quantity::new(2i64, in_km);
//! assert_eq!(trip.to(&in_m).unwrap().value(), 2000);
//! ```

use std::sync::LazyLock;

use symunit_core::{
    Character, Dimension, Magnitude, QuantityKind, QuantitySpec, Ratio, Unit,
};

/// Builds the magnitude of a positive integer literal.
fn int_mag(n: i64) -> Magnitude {
    Magnitude::from_int(n).expect("literal magnitudes are positive")
}

/// Builds the magnitude of an exact positive rational literal
/// `num/den × 10^exp`.
fn ratio_mag(num: i64, den: i64, exp: i32) -> Magnitude {
    Magnitude::from_ratio(Ratio::new_scaled(num, den, exp))
        .expect("literal magnitudes are positive")
}

// ─────────────────────────────────────────────────────────────────────────────
// Base dimensions
// ─────────────────────────────────────────────────────────────────────────────

/// Length, `L`.
pub static DIM_LENGTH: LazyLock<Dimension> = LazyLock::new(|| Dimension::base("L"));
/// Mass, `M`.
pub static DIM_MASS: LazyLock<Dimension> = LazyLock::new(|| Dimension::base("M"));
/// Time, `T`.
pub static DIM_TIME: LazyLock<Dimension> = LazyLock::new(|| Dimension::base("T"));
/// Electric current, `I`.
pub static DIM_CURRENT: LazyLock<Dimension> = LazyLock::new(|| Dimension::base("I"));
/// Thermodynamic temperature, `Θ`.
pub static DIM_TEMPERATURE: LazyLock<Dimension> = LazyLock::new(|| Dimension::base("Θ"));
/// Amount of substance, `N`.
pub static DIM_AMOUNT: LazyLock<Dimension> = LazyLock::new(|| Dimension::base("N"));
/// Luminous intensity, `J`.
pub static DIM_LUMINOSITY: LazyLock<Dimension> = LazyLock::new(|| Dimension::base("J"));

// ─────────────────────────────────────────────────────────────────────────────
// Quantity kinds and derived specifications
// ─────────────────────────────────────────────────────────────────────────────

/// Length.
pub static LENGTH: LazyLock<QuantitySpec> = LazyLock::new(|| {
    QuantityKind::new("length", DIM_LENGTH.clone(), Character::Scalar).into()
});
/// Mass.
pub static MASS: LazyLock<QuantitySpec> =
    LazyLock::new(|| QuantityKind::new("mass", DIM_MASS.clone(), Character::Scalar).into());
/// Time (duration).
pub static TIME: LazyLock<QuantitySpec> =
    LazyLock::new(|| QuantityKind::new("time", DIM_TIME.clone(), Character::Scalar).into());
/// Electric current.
pub static CURRENT: LazyLock<QuantitySpec> = LazyLock::new(|| {
    QuantityKind::new("electric_current", DIM_CURRENT.clone(), Character::Scalar).into()
});
/// Thermodynamic temperature.
pub static TEMPERATURE: LazyLock<QuantitySpec> = LazyLock::new(|| {
    QuantityKind::new("thermodynamic_temperature", DIM_TEMPERATURE.clone(), Character::Scalar)
        .into()
});
/// Amount of substance.
pub static AMOUNT: LazyLock<QuantitySpec> = LazyLock::new(|| {
    QuantityKind::new("amount_of_substance", DIM_AMOUNT.clone(), Character::Scalar).into()
});
/// Luminous intensity.
pub static LUMINOUS_INTENSITY: LazyLock<QuantitySpec> = LazyLock::new(|| {
    QuantityKind::new("luminous_intensity", DIM_LUMINOSITY.clone(), Character::Scalar).into()
});
/// Displacement: length with direction.
pub static DISPLACEMENT: LazyLock<QuantitySpec> = LazyLock::new(|| {
    QuantityKind::new("displacement", DIM_LENGTH.clone(), Character::Vector).into()
});
/// Angular measure, dimensionless by SI convention.
pub static ANGULAR_MEASURE: LazyLock<QuantitySpec> = LazyLock::new(|| {
    QuantityKind::new("angular_measure", Dimension::one(), Character::Scalar).into()
});

/// Area, `length²`.
pub static AREA: LazyLock<QuantitySpec> =
    LazyLock::new(|| LENGTH.pow(Ratio::from_int(2)));
/// Volume, `length³`.
pub static VOLUME: LazyLock<QuantitySpec> =
    LazyLock::new(|| LENGTH.pow(Ratio::from_int(3)));
/// Speed, `length / time`.
pub static SPEED: LazyLock<QuantitySpec> = LazyLock::new(|| &*LENGTH / &*TIME);
/// Velocity, `displacement / time`; a vector.
pub static VELOCITY: LazyLock<QuantitySpec> = LazyLock::new(|| &*DISPLACEMENT / &*TIME);
/// Acceleration, `speed / time`.
pub static ACCELERATION: LazyLock<QuantitySpec> = LazyLock::new(|| &*SPEED / &*TIME);
/// Frequency, `1 / time`.
pub static FREQUENCY: LazyLock<QuantitySpec> = LazyLock::new(|| TIME.invert());
/// Force, `mass × acceleration`.
pub static FORCE: LazyLock<QuantitySpec> = LazyLock::new(|| &*MASS * &*ACCELERATION);
/// Energy, `force × length`.
pub static ENERGY: LazyLock<QuantitySpec> = LazyLock::new(|| &*FORCE * &*LENGTH);

// ─────────────────────────────────────────────────────────────────────────────
// Length units
// ─────────────────────────────────────────────────────────────────────────────

/// The metre, base unit of length.
pub static METRE: LazyLock<Unit> = LazyLock::new(|| Unit::base("m", DIM_LENGTH.clone()));
/// The kilometre, `1000 m`.
pub static KILOMETRE: LazyLock<Unit> =
    LazyLock::new(|| Unit::scaled("km", int_mag(1000), &METRE));
/// The centimetre, `m / 100`.
pub static CENTIMETRE: LazyLock<Unit> =
    LazyLock::new(|| Unit::scaled("cm", ratio_mag(1, 1, -2), &METRE));
/// The millimetre, `m / 1000`.
pub static MILLIMETRE: LazyLock<Unit> =
    LazyLock::new(|| Unit::scaled("mm", ratio_mag(1, 1, -3), &METRE));
/// The international inch, exactly `254/10⁴ m`.
pub static INCH: LazyLock<Unit> =
    LazyLock::new(|| Unit::scaled("in", ratio_mag(254, 1, -4), &METRE));
/// The international foot, `12 in`.
pub static FOOT: LazyLock<Unit> = LazyLock::new(|| Unit::scaled("ft", int_mag(12), &INCH));
/// The yard, `3 ft`.
pub static YARD: LazyLock<Unit> = LazyLock::new(|| Unit::scaled("yd", int_mag(3), &FOOT));
/// The statute mile, `1760 yd`.
pub static MILE: LazyLock<Unit> = LazyLock::new(|| Unit::scaled("mi", int_mag(1760), &YARD));

// ─────────────────────────────────────────────────────────────────────────────
// Time units
// ─────────────────────────────────────────────────────────────────────────────

/// The second, base unit of time.
pub static SECOND: LazyLock<Unit> = LazyLock::new(|| Unit::base("s", DIM_TIME.clone()));
/// The millisecond, `s / 1000`.
pub static MILLISECOND: LazyLock<Unit> =
    LazyLock::new(|| Unit::scaled("ms", ratio_mag(1, 1, -3), &SECOND));
/// The minute, `60 s`.
pub static MINUTE: LazyLock<Unit> = LazyLock::new(|| Unit::scaled("min", int_mag(60), &SECOND));
/// The hour, `60 min`.
pub static HOUR: LazyLock<Unit> = LazyLock::new(|| Unit::scaled("h", int_mag(60), &MINUTE));
/// The day, `24 h`.
pub static DAY: LazyLock<Unit> = LazyLock::new(|| Unit::scaled("d", int_mag(24), &HOUR));

// ─────────────────────────────────────────────────────────────────────────────
// Mass units
// ─────────────────────────────────────────────────────────────────────────────

/// The gram, base unit of mass in this catalog; the kilogram is derived so
/// that prefixing stays multiplicative.
pub static GRAM: LazyLock<Unit> = LazyLock::new(|| Unit::base("g", DIM_MASS.clone()));
/// The kilogram, `1000 g`.
pub static KILOGRAM: LazyLock<Unit> = LazyLock::new(|| Unit::scaled("kg", int_mag(1000), &GRAM));
/// The tonne, `1000 kg`.
pub static TONNE: LazyLock<Unit> = LazyLock::new(|| Unit::scaled("t", int_mag(1000), &KILOGRAM));

// ─────────────────────────────────────────────────────────────────────────────
// Remaining base units
// ─────────────────────────────────────────────────────────────────────────────

/// The ampere, base unit of electric current.
pub static AMPERE: LazyLock<Unit> = LazyLock::new(|| Unit::base("A", DIM_CURRENT.clone()));
/// The kelvin, base unit of thermodynamic temperature.
pub static KELVIN: LazyLock<Unit> = LazyLock::new(|| Unit::base("K", DIM_TEMPERATURE.clone()));
/// The mole, base unit of amount of substance.
pub static MOLE: LazyLock<Unit> = LazyLock::new(|| Unit::base("mol", DIM_AMOUNT.clone()));
/// The candela, base unit of luminous intensity.
pub static CANDELA: LazyLock<Unit> = LazyLock::new(|| Unit::base("cd", DIM_LUMINOSITY.clone()));

// ─────────────────────────────────────────────────────────────────────────────
// Angle and derived units
// ─────────────────────────────────────────────────────────────────────────────

/// The radian, the named dimensionless unit of angular measure.
pub static RADIAN: LazyLock<Unit> =
    LazyLock::new(|| Unit::scaled("rad", Magnitude::one(), &Unit::one()));
/// The degree, `π/180 rad` exactly.
pub static DEGREE: LazyLock<Unit> = LazyLock::new(|| {
    Unit::scaled("°", Magnitude::pi() / int_mag(180), &RADIAN)
});
/// The newton, coherent unit of force: `kg·m/s²`.
pub static NEWTON: LazyLock<Unit> = LazyLock::new(|| {
    let coherent = &(&*KILOGRAM * &*METRE) / &SECOND.pow(Ratio::from_int(2));
    Unit::scaled("N", Magnitude::one(), &coherent)
});
/// The hertz, coherent unit of frequency: `1/s`.
pub static HERTZ: LazyLock<Unit> =
    LazyLock::new(|| Unit::scaled("Hz", Magnitude::one(), &SECOND.invert()));
/// The litre, `10⁻³ m³`.
pub static LITRE: LazyLock<Unit> = LazyLock::new(|| {
    Unit::scaled("L", ratio_mag(1, 1, -3), &METRE.pow(Ratio::from_int(3)))
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customary_chain_resolves_to_metres() {
        let c = MILE.canonical();
        assert_eq!(c.reference, *METRE);
        // 1760 * 3 * 12 * 254e-4 = 1609.344
        assert_eq!(c.magnitude, ratio_mag(1_609_344, 1, -3));
    }

    #[test]
    fn hour_is_3600_seconds() {
        let f = HOUR.conversion_factor(&SECOND).unwrap();
        assert_eq!(f.checked_value_i64().unwrap(), 3600);
    }

    #[test]
    fn newton_measures_the_force_dimension() {
        assert_eq!(NEWTON.dimension(), FORCE.dimension());
        assert!(NEWTON.canonical().magnitude.checked_value_i64().unwrap() == 1000);
        // The residual 1000 is the gram→kilogram scale inside the coherent
        // reference, which itself resolves to g·m/s².
    }

    #[test]
    fn degree_to_radian_is_pi_over_180() {
        let f = DEGREE.conversion_factor(&RADIAN).unwrap();
        let expected = Magnitude::pi() / int_mag(180);
        assert_eq!(f, expected);
        assert!((f.value_f64() - core::f64::consts::PI / 180.0).abs() < 1e-16);
    }

    #[test]
    fn litre_is_a_cubic_decimetre() {
        let f = LITRE.conversion_factor(&METRE.pow(Ratio::from_int(3))).unwrap();
        assert_eq!(f, ratio_mag(1, 1, -3));
    }

    #[test]
    fn derived_specs_compose() {
        assert_eq!(&*SPEED * &*TIME, *LENGTH);
        assert_eq!(SPEED.dimension(), &*DIM_LENGTH / &*DIM_TIME);
        assert_eq!(VELOCITY.character(), Character::Vector);
        assert_eq!(ENERGY.dimension().to_string(), "L^(2)·M/T^(2)");
    }
}
