// Per-unit rate conversion and booking price quotes.
//
// The rate is carried at RATE_SCALE decimal places. The total is computed
// from that stored rate, so `total_cost == duration_value * per_unit_rate`
// holds exactly for every persisted booking.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{AppError, Currency, DurationUnit, Result, HOURS_PER_DAY};
use crate::modules::catalog::models::Pricing;

/// Decimal places kept on the per-unit rate
pub const RATE_SCALE: u32 = 8;

/// Upper bound on `duration_value`
pub const MAX_DURATION_VALUE: u32 = 10_000;

/// Convert a base rate into the rate for the requested unit
pub fn convert_rate(base_rate: Decimal, base_unit: DurationUnit, requested: DurationUnit) -> Decimal {
    let hours_per_day = Decimal::from(HOURS_PER_DAY);

    match (base_unit, requested) {
        (DurationUnit::Day, DurationUnit::Hour) => base_rate / hours_per_day,
        (DurationUnit::Hour, DurationUnit::Day) => base_rate * hours_per_day,
        _ => base_rate,
    }
}

/// Price of a booking request
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub unit: DurationUnit,
    pub value: u32,
    pub per_unit_rate: Decimal,
    pub total_cost: Decimal,
    pub currency: Currency,
}

/// Quote `value` units of a service priced with `pricing`
pub fn quote(pricing: &Pricing, unit: DurationUnit, value: u32) -> Result<PriceQuote> {
    let invalid = || AppError::validation("Invalid duration or pricing configuration.");

    if value == 0 || value > MAX_DURATION_VALUE {
        return Err(invalid());
    }

    let per_unit_rate = convert_rate(pricing.base_rate, pricing.unit, unit)
        .round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if per_unit_rate <= Decimal::ZERO {
        return Err(invalid());
    }

    let total_cost = per_unit_rate
        .checked_mul(Decimal::from(value))
        .ok_or_else(invalid)?
        .normalize();

    Ok(PriceQuote {
        unit,
        value,
        per_unit_rate,
        total_cost,
        currency: pricing.currency,
    })
}
