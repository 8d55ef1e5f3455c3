//! Shows the conversion policy in action: harmonic ratios convert
//! implicitly, truncating ones require an explicit cast, and irrational
//! ratios (degree → radian) stay symbolic until the last moment.

use symunit::si;
use symunit::{Quantity, Reference};

fn main() {
    let in_m = Reference::new(si::LENGTH.clone(), si::METRE.clone()).unwrap();
    let in_km = Reference::new(si::LENGTH.clone(), si::KILOMETRE.clone()).unwrap();

    // Widening is harmonic, so integers convert implicitly.
    let trip = Quantity::new(3i64, in_km.clone());
    println!("{trip} = {}", trip.to(&in_m).unwrap());

    // Narrowing truncates, so the implicit path refuses...
    let run = Quantity::new(2500i64, in_m.clone());
    match run.to(&in_km) {
        Err(err) => println!("implicit {run} to km rejected: {err}"),
        Ok(_) => unreachable!(),
    }
    // ...and the explicit cast truncates toward zero.
    println!("explicit cast: {run} = {}", run.cast_to(&in_km).unwrap());

    // Degree to radian goes through the exact symbolic factor pi/180.
    let in_deg = Reference::new(si::ANGULAR_MEASURE.clone(), si::DEGREE.clone()).unwrap();
    let in_rad = Reference::new(si::ANGULAR_MEASURE.clone(), si::RADIAN.clone()).unwrap();
    let angle = Quantity::new(180.0f64, in_deg);
    let radians = angle.to(&in_rad).unwrap();
    println!("{angle} = {radians}");
    assert!((radians.value() - std::f64::consts::PI).abs() < 1e-12);
}
