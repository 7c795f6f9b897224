//! Stay pricing and currency conversion.

use std::sync::Arc;

use crate::booking::{BookingRequest, Money};
use crate::error::DomainError;

/// Price per guest per night, in USD.
pub const BASE_PRICE: Money = Money::from_dollars(50);

/// Rate source used to express a USD amount in euros.
///
/// Implemented for plain closures so tests can substitute a fixed function.
pub trait CurrencyConverter: Send + Sync {
    fn to_euro(&self, amount: Money) -> Money;
}

impl<F> CurrencyConverter for F
where
    F: Fn(Money) -> Money + Send + Sync,
{
    fn to_euro(&self, amount: Money) -> Money {
        self(amount)
    }
}

/// Converter applying a constant USD→EUR rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRateConverter {
    rate: f64,
}

impl FixedRateConverter {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl CurrencyConverter for FixedRateConverter {
    fn to_euro(&self, amount: Money) -> Money {
        amount.scale(self.rate)
    }
}

/// Computes the cost of a stay.
#[derive(Clone)]
pub struct PricingCalculator {
    converter: Arc<dyn CurrencyConverter>,
}

impl PricingCalculator {
    /// Creates a calculator using the given rate source for euro prices.
    pub fn new(converter: impl CurrencyConverter + 'static) -> Self {
        Self {
            converter: Arc::new(converter),
        }
    }

    /// `BASE_PRICE × guest_count × nights`.
    ///
    /// Empty or inverted date ranges and zero guests are rejected rather than
    /// priced at zero or below.
    pub fn calculate_price(&self, request: &BookingRequest) -> Result<Money, DomainError> {
        let nights = request.nights();
        if nights <= 0 {
            return Err(DomainError::InvalidRequest(format!(
                "stay must last at least one night, got {nights}"
            )));
        }
        if request.guest_count() == 0 {
            return Err(DomainError::InvalidRequest(
                "guest_count must be greater than 0".to_string(),
            ));
        }
        let nights = u32::try_from(nights).map_err(|_| {
            DomainError::InvalidRequest(format!("stay of {nights} nights is too long"))
        })?;

        let price = BASE_PRICE
            .checked_multiply(request.guest_count())
            .and_then(|per_night| per_night.checked_multiply(nights))
            .ok_or_else(|| {
                DomainError::InvalidRequest("stay too expensive to price".to_string())
            })?;
        tracing::debug!(%price, nights, guests = request.guest_count(), "stay priced");
        Ok(price)
    }

    /// [`calculate_price`](Self::calculate_price) converted to euros.
    pub fn calculate_price_euro(&self, request: &BookingRequest) -> Result<Money, DomainError> {
        let price = self.calculate_price(request)?;
        Ok(self.converter.to_euro(price))
    }
}

impl std::fmt::Debug for PricingCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingCalculator").finish_non_exhaustive()
    }
}
