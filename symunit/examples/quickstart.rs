//! Minimal end-to-end example: convert lengths and compute a speed
//! (length / time).

use symunit::si;
use symunit::{Quantity, Reference};

fn main() {
    let in_km = Reference::new(si::LENGTH.clone(), si::KILOMETRE.clone()).unwrap();
    let in_m = Reference::new(si::LENGTH.clone(), si::METRE.clone()).unwrap();

    let trip = Quantity::new(2i64, in_km);
    let metres = trip.to(&in_m).unwrap();
    println!("{trip} = {metres}");
    assert_eq!(metres.value(), 2000);

    let mps = Reference::new(si::SPEED.clone(), &*si::METRE / &*si::SECOND).unwrap();
    let s = Reference::new(si::TIME.clone(), si::SECOND.clone()).unwrap();
    let v = Quantity::new(12.5f64, mps);
    let t = Quantity::new(8.0f64, s);
    let d = v.clone() * t;
    println!("{v} for 8 s covers {d}");
    assert_eq!(d.unit(), &*si::METRE);
    assert_eq!(d.value(), 100.0);
}
