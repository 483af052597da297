//! Pre-flight checks run on request bodies before the service is called.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ProductError, ProductResult};
use crate::messages;
use crate::models::{NewProduct, Product};

/// Digits allowed before the decimal point by the `NUMERIC(18,2)` column.
const PRICE_INTEGER_DIGITS: u32 = 16;

/// Check a create payload. `None` stands for a JSON `null` or empty body.
///
/// The returned price is rounded to cents, half away from zero, matching what
/// the store keeps.
pub fn validate_new_product(input: Option<NewProduct>) -> ProductResult<NewProduct> {
    let mut input = input.ok_or_else(|| invalid(messages::PRODUCT_EMPTY))?;
    input.price = to_cents(input.price);
    check_fields(&input.name, &input.category, input.price)?;
    Ok(input)
}

/// Check an update payload; the id is checked before any other field.
pub fn validate_product_update(input: Option<Product>) -> ProductResult<Product> {
    let mut input = input.ok_or_else(|| invalid(messages::PRODUCT_EMPTY))?;

    if input.id < 0 {
        return Err(invalid(messages::PRODUCT_ID_LESS_THAN_ZERO));
    }

    input.price = to_cents(input.price);
    check_fields(&input.name, &input.category, input.price)?;
    Ok(input)
}

fn check_fields(name: &str, category: &str, price: Decimal) -> ProductResult<()> {
    if name.is_empty() {
        return Err(invalid(messages::PRODUCT_NAME_EMPTY));
    }
    if category.is_empty() {
        return Err(invalid(messages::PRODUCT_CATEGORY_EMPTY));
    }
    if price <= Decimal::ZERO {
        return Err(invalid(messages::PRODUCT_PRICE_LESS_THAN_ZERO));
    }
    if price >= Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS)) {
        return Err(invalid(messages::PRODUCT_PRICE_TOO_LARGE));
    }
    Ok(())
}

fn to_cents(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn invalid(message: &str) -> ProductError {
    ProductError::Validation(message.to_string())
}
