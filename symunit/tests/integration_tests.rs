//! End-to-end tests exercising the public API the way downstream code uses
//! it: catalog definitions, reference validation, quantity arithmetic and the
//! conversion policy.

use approx::assert_relative_eq;
use proptest::prelude::*;

use symunit::si;
use symunit::{Character, Error, Magnitude, Quantity, Ratio, Reference};

fn in_m() -> Reference {
    Reference::new(si::LENGTH.clone(), si::METRE.clone()).unwrap()
}

fn in_km() -> Reference {
    Reference::new(si::LENGTH.clone(), si::KILOMETRE.clone()).unwrap()
}

fn in_s() -> Reference {
    Reference::new(si::TIME.clone(), si::SECOND.clone()).unwrap()
}

#[test]
fn magnitude_of_twelve_is_two_squared_times_three() {
    let twelve = Magnitude::from_int(12).unwrap();
    let by_hand = Magnitude::from_int(2).unwrap().pow(Ratio::from_int(2))
        * Magnitude::from_int(3).unwrap();
    assert_eq!(twelve, by_hand);
    assert_eq!(twelve.checked_value_i64().unwrap(), 12);
}

#[test]
fn magnitude_of_792_matches_its_prime_powers() {
    let m = |n| Magnitude::from_int(n).unwrap();
    let composed = m(2).pow(Ratio::from_int(3)) * m(3).pow(Ratio::from_int(2)) * m(11);
    assert_eq!(m(792), composed);
}

#[test]
fn two_kilometres_are_two_thousand_metres() {
    let trip = Quantity::new(2i64, in_km());
    assert_eq!(trip.to(&in_m()).unwrap().value(), 2000);
}

#[test]
fn metres_to_kilometres_needs_an_explicit_cast_for_integers() {
    let trip = Quantity::new(2000i64, in_m());
    assert!(matches!(
        trip.to(&in_km()),
        Err(Error::TruncatingConversionRejected { .. })
    ));
    assert_eq!(trip.cast_to(&in_km()).unwrap().value(), 2);
}

#[test]
fn length_and_mass_do_not_add() {
    let d = Quantity::new(5i64, in_m());
    let m = Quantity::new(
        5i64,
        Reference::new(si::MASS.clone(), si::GRAM.clone()).unwrap(),
    );
    assert!(matches!(
        d.checked_add(&m),
        Err(Error::IncompatibleDimension { .. })
    ));
}

#[test]
fn speed_times_time_is_length_for_any_units() {
    let cases = [
        (si::METRE.clone(), si::SECOND.clone()),
        (si::KILOMETRE.clone(), si::HOUR.clone()),
        (si::FOOT.clone(), si::MINUTE.clone()),
    ];
    for (length_unit, time_unit) in cases {
        let speed_ref =
            Reference::new(si::SPEED.clone(), &length_unit / &time_unit).unwrap();
        let time_ref = Reference::new(si::TIME.clone(), time_unit).unwrap();
        let product = Quantity::new(3.0f64, speed_ref) * Quantity::new(2.0f64, time_ref);
        assert_eq!(product.reference().spec(), &*si::LENGTH);
        assert_eq!(product.unit(), &length_unit);
        assert_eq!(product.value(), 6.0);
    }
}

#[test]
fn customary_lengths_convert_exactly_for_floats() {
    let in_yd = Reference::new(si::LENGTH.clone(), si::YARD.clone()).unwrap();
    let run = Quantity::new(100.0f64, in_m());
    assert_relative_eq!(
        run.to(&in_yd).unwrap().value(),
        100.0 / 0.9144,
        max_relative = 1e-15
    );
    let mile = Quantity::new(1i64, Reference::new(si::LENGTH.clone(), si::MILE.clone()).unwrap());
    // 1 mi = 1609.344 m: not an integer, so the millimetre is the natural
    // integral target.
    let in_mm = Reference::new(si::LENGTH.clone(), si::MILLIMETRE.clone()).unwrap();
    assert_eq!(mile.to(&in_mm).unwrap().value(), 1_609_344);
}

#[test]
fn degrees_convert_through_pi() {
    let in_deg = Reference::new(si::ANGULAR_MEASURE.clone(), si::DEGREE.clone()).unwrap();
    let in_rad = Reference::new(si::ANGULAR_MEASURE.clone(), si::RADIAN.clone()).unwrap();
    let right_angle = Quantity::new(90.0f64, in_deg);
    assert_relative_eq!(
        right_angle.to(&in_rad).unwrap().value(),
        std::f64::consts::FRAC_PI_2,
        max_relative = 1e-15
    );
}

#[test]
fn mixed_unit_sums_settle_in_the_left_operand() {
    let total = Quantity::new(500i64, in_m())
        .checked_add(&Quantity::new(2i64, in_km()))
        .unwrap();
    assert_eq!(total.value(), 2500);
    assert_eq!(total.unit(), &*si::METRE);
}

#[test]
fn velocity_keeps_its_vector_character() {
    assert_eq!(si::VELOCITY.character(), Character::Vector);
    assert_eq!(si::SPEED.character(), Character::Scalar);
    assert!(si::VELOCITY.interconvertible_with(&si::SPEED));
}

#[test]
fn newtons_relate_to_the_coherent_gram_base() {
    let coherent = &(&*si::KILOGRAM * &*si::METRE) / &si::SECOND.pow(Ratio::from_int(2));
    let f = si::NEWTON.conversion_factor(&coherent).unwrap();
    assert!(f.is_one());
}

#[test]
fn frequency_is_inverse_time() {
    let hz = Reference::new(si::FREQUENCY.clone(), si::HERTZ.clone()).unwrap();
    let per_s = Reference::new(si::FREQUENCY.clone(), si::SECOND.invert()).unwrap();
    let tone = Quantity::new(440i64, hz);
    assert_eq!(tone.to(&per_s).unwrap().value(), 440);
}

proptest! {
    #[test]
    fn kilometre_round_trips_are_exact_for_integers(n in -1_000_000i64..1_000_000) {
        let start = Quantity::new(n, in_km());
        let there = start.to(&in_m()).unwrap();
        let back = there.cast_to(&in_km()).unwrap();
        prop_assert_eq!(back.value(), n);
    }

    #[test]
    fn hour_second_round_trips_are_exact_for_floats(v in -1.0e12f64..1.0e12) {
        let in_h = Reference::new(si::TIME.clone(), si::HOUR.clone()).unwrap();
        let start = Quantity::new(v, in_h);
        let back = start.to(&in_s()).unwrap().to(&start.reference().clone()).unwrap();
        // A single multiply/divide pair by 3600 stays within one rounding step.
        prop_assert!((back.value() - v).abs() <= v.abs() * 1e-15);
    }

    #[test]
    fn magnitude_ratios_cancel(a in 1i64..10_000, b in 1i64..10_000) {
        let ma = Magnitude::from_int(a).unwrap();
        let mb = Magnitude::from_int(b).unwrap();
        prop_assert_eq!(&(&(&ma * &mb) / &mb), &ma);
        prop_assert!((&ma / &ma).is_one());
    }
}
