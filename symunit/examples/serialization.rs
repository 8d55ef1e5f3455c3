//! Serializing quantities and symbolic values to JSON.
//!
//! To run this example with serde support:
//! ```bash
//! cargo run --example serialization --features serde
//! ```

#[cfg(feature = "serde")]
fn main() {
    use symunit::si;
    use symunit::{Quantity, Ratio, Reference};

    let in_km = Reference::new(si::LENGTH.clone(), si::KILOMETRE.clone()).unwrap();
    let trip = Quantity::new(42.5f64, in_km);
    let json = serde_json::to_string(&trip).unwrap();
    println!("{trip} -> {json}");
    assert_eq!(json, r#"{"value":42.5,"unit":"km"}"#);

    // Ratios round-trip and re-normalize on the way in.
    let r: Ratio = serde_json::from_str(r#"{"num":5,"den":10}"#).unwrap();
    println!("5/10 -> {r}");
    assert_eq!(r, Ratio::new(1, 2));
}

#[cfg(not(feature = "serde"))]
fn main() {
    eprintln!("rebuild with --features serde to run this example");
}
