use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use nestcare::core::DurationUnit;
use nestcare::modules::bookings::services::convert_rate;

/// Property-based tests for hour/day rate conversion
///
/// Validates:
/// - hour-priced services booked by the day cost 24x the base rate
/// - day-priced services booked by the hour cost 1/24 of the base rate
/// - same-unit bookings keep the base rate
/// - converting there and back returns the base rate

fn unit() -> impl Strategy<Value = DurationUnit> {
    prop_oneof![Just(DurationUnit::Hour), Just(DurationUnit::Day)]
}

/// Base rates from 0.01 to 1,000,000.00
fn base_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn test_conversion_matches_table(rate in base_rate(), base in unit(), requested in unit()) {
        let converted = convert_rate(rate, base, requested);
        let expected = match (base, requested) {
            (DurationUnit::Hour, DurationUnit::Day) => rate * Decimal::from(24),
            (DurationUnit::Day, DurationUnit::Hour) => rate / Decimal::from(24),
            _ => rate,
        };

        prop_assert_eq!(converted, expected);
    }

    #[test]
    fn test_same_unit_is_identity(rate in base_rate(), requested in unit()) {
        prop_assert_eq!(convert_rate(rate, requested, requested), rate);
    }

    #[test]
    fn test_day_rate_is_24_hours(rate in base_rate()) {
        let per_day = convert_rate(rate, DurationUnit::Hour, DurationUnit::Day);
        prop_assert_eq!(per_day, rate * Decimal::from(24));
        prop_assert!(per_day > rate);
    }

    #[test]
    fn test_round_trip_through_hours(rate in base_rate()) {
        let per_hour = convert_rate(rate, DurationUnit::Day, DurationUnit::Hour);
        let back = convert_rate(per_hour, DurationUnit::Hour, DurationUnit::Day);

        prop_assert!((back - rate).abs() <= dec!(0.000000001));
    }
}

#[test]
fn test_reference_values() {
    assert_eq!(
        convert_rate(dec!(400), DurationUnit::Hour, DurationUnit::Day),
        dec!(9600)
    );
    assert_eq!(
        convert_rate(dec!(2400), DurationUnit::Day, DurationUnit::Hour),
        dec!(100)
    );
    assert_eq!(
        convert_rate(dec!(400), DurationUnit::Hour, DurationUnit::Hour),
        dec!(400)
    );
}
