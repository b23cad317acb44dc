//! The unit round-trip law, checked through the public surface: entering a
//! quantity in an alternate unit and reading the same unit back recovers
//! the value, and the canonical representation never leaks a unit mix-up.

use approx::assert_relative_eq;
use orrery::quantities::{
    Angle, AngularRate, Distance, DistanceVector, EphemerisInstant, EphemerisPeriod,
    MassParameter, Speed, StateVector, VelocityVector,
};

#[test]
fn scalar_round_trips_in_every_alternate_unit() {
    let samples = [0.0, 1.0, -2.5, 1.0e-9, 3.7e12];

    for &value in &samples {
        assert_relative_eq!(
            Distance::from_meters(value).meters(),
            value,
            max_relative = 1e-14
        );
        assert_relative_eq!(Distance::from_au(value).au(), value, max_relative = 1e-14);
        assert_relative_eq!(
            Angle::from_degrees(value).degrees(),
            value,
            max_relative = 1e-14
        );
        assert_relative_eq!(
            Angle::from_arcseconds(value).arcseconds(),
            value,
            max_relative = 1e-14
        );
        assert_relative_eq!(
            EphemerisPeriod::from_days(value).days(),
            value,
            max_relative = 1e-14
        );
        assert_relative_eq!(
            Speed::from_meters_per_second(value).meters_per_second(),
            value,
            max_relative = 1e-14
        );
        assert_relative_eq!(
            AngularRate::from_degrees_per_day(value).degrees_per_day(),
            value,
            max_relative = 1e-14
        );
    }
}

#[test]
fn canonical_representations_are_fixed() {
    // one kilometer is one kilometer no matter how it was entered
    assert_eq!(Distance::from_meters(1000.0).kilometers(), 1.0);
    assert_relative_eq!(
        Angle::from_degrees(180.0).radians(),
        std::f64::consts::PI,
        epsilon = 1e-15
    );
    assert_eq!(EphemerisPeriod::from_days(1.0).seconds(), 86_400.0);
    assert_eq!(MassParameter::from_km3_per_s2(42.0).km3_per_s2(), 42.0);
    assert_eq!(
        EphemerisInstant::from_tdb_seconds(7.0).tdb_seconds(),
        7.0
    );
}

#[test]
fn composite_quantities_are_plain_values() {
    let a = StateVector::new(
        DistanceVector::from_kilometers(1.0, 2.0, 3.0),
        VelocityVector::from_kilometers_per_second(0.1, 0.2, 0.3),
    );
    let b = StateVector::new(
        DistanceVector::from_kilometers(1.0, 2.0, 3.0),
        VelocityVector::from_kilometers_per_second(0.1, 0.2, 0.3),
    );
    // equal components, interchangeable values: no identity beyond that
    assert_eq!(a, b);

    let moved = StateVector {
        position: a.position + (a.velocity * EphemerisPeriod::from_seconds(10.0)),
        velocity: a.velocity,
    };
    assert_eq!(moved.position.x.kilometers(), 2.0);
    assert_eq!(moved.position.z.kilometers(), 6.0);
}

#[test]
fn dimension_crossings_are_explicit() {
    let distance = Distance::from_au(1.0);
    let period = distance / Speed::from_kilometers_per_second(299_792.458);
    // light crosses one astronomical unit in a bit under 500 seconds
    assert_relative_eq!(period.seconds(), 499.004_783_8, epsilon = 1e-3);

    let swept = AngularRate::from_degrees_per_day(360.0) * EphemerisPeriod::from_days(0.25);
    assert_relative_eq!(swept.degrees(), 90.0, epsilon = 1e-12);
}
