//! Pure mathematical functions for the GNP ledger
//! All functions are deterministic and use fixed-point integer arithmetic
//! No floating point anywhere, fully testable in isolation

/// Multiply two u64 values and divide by a third, rounding DOWN
/// Returns None on overflow or a zero divisor
pub fn mul_div_down(a: u64, b: u64, c: u64) -> Option<u64> {
  if c == 0 {
    return None;
  }

  let result = (a as u128)
    .checked_mul(b as u128)?
    .checked_div(c as u128)?;

  u64::try_from(result).ok()
}

/// 10^exp as u128, None once it no longer fits
pub fn pow10(exp: u32) -> Option<u128> {
  10u128.checked_pow(exp)
}

/// Value of `amount` base units of a token priced at `price_per_unit`
/// (canonical base units per one whole token).
///
/// # Arguments
/// * `amount` - Raw token amount, scaled by `token_decimals`
/// * `price_per_unit` - Canonical base units for 10^token_decimals raw units
/// * `token_decimals` - Decimal count of the token
///
/// # Returns
/// Canonical value rounded down, None on overflow
pub fn value_at_unit_price(amount: u64, price_per_unit: u64, token_decimals: u8) -> Option<u64> {
  let scale = u64::try_from(pow10(token_decimals as u32)?).ok()?;
  mul_div_down(amount, price_per_unit, scale)
}

/// Value of `amount` base units of a token priced as `price * 10^expo`
/// whole reference units per whole token.
///
/// value = amount * price * 10^(reference_decimals + expo - token_decimals)
///
/// # Arguments
/// * `amount` - Raw token amount, scaled by `token_decimals`
/// * `price` - Integer mantissa of the quote (must be positive)
/// * `expo` - Decimal exponent of the quote
/// * `token_decimals` - Decimal count of the priced token
/// * `reference_decimals` - Decimal count of the canonical reference asset
///
/// # Returns
/// Canonical value rounded down, None on overflow or a non-positive price
pub fn value_at_exponent_price(
  amount: u64,
  price: i64,
  expo: i32,
  token_decimals: u8,
  reference_decimals: u8,
) -> Option<u64> {
  if price <= 0 {
    return None;
  }

  let shift = (reference_decimals as i32)
    .checked_add(expo)?
    .checked_sub(token_decimals as i32)?;

  let gross = (amount as u128).checked_mul(price as u128)?;

  let value = if shift >= 0 {
    gross.checked_mul(pow10(shift as u32)?)?
  } else {
    // 10^39 no longer fits in u128, and anything divided by it is zero
    match pow10(shift.unsigned_abs()) {
      Some(divisor) => gross / divisor,
      None => 0,
    }
  };

  u64::try_from(value).ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mul_div_rounding() {
    assert_eq!(mul_div_down(10, 10, 3), Some(33));
    assert_eq!(mul_div_down(1, 1, 0), None);
    assert_eq!(mul_div_down(u64::MAX, u64::MAX, 1), None);
  }

  #[test]
  fn test_value_at_unit_price_six_decimals() {
    // 250 USDC at 4_000_000 lamports per USDC
    let value = value_at_unit_price(250_000_000, 4_000_000, 6).unwrap();
    assert_eq!(value, 1_000_000_000);
  }

  #[test]
  fn test_value_at_unit_price_eighteen_decimals() {
    // 1.5 tokens with 18 decimals at 0.25 SOL each
    let value = value_at_unit_price(1_500_000_000_000_000_000, 250_000_000, 18).unwrap();
    assert_eq!(value, 375_000_000);
  }

  #[test]
  fn test_value_at_unit_price_rejects_huge_decimals() {
    assert_eq!(value_at_unit_price(1, 1, 20), None);
  }

  #[test]
  fn test_value_at_exponent_price_negative_shift() {
    // token with 6 decimals, quote 0.004 SOL (price=400000, expo=-8), SOL 9 decimals
    // 250 tokens -> 1 SOL
    let value = value_at_exponent_price(250_000_000, 400_000, -8, 6, 9).unwrap();
    assert_eq!(value, 1_000_000_000);
  }

  #[test]
  fn test_value_at_exponent_price_positive_shift() {
    // token with 0 decimals, quote 2 SOL (price=2, expo=0), SOL 9 decimals
    let value = value_at_exponent_price(3, 2, 0, 0, 9).unwrap();
    assert_eq!(value, 6_000_000_000);
  }

  #[test]
  fn test_value_at_exponent_price_rejects_non_positive() {
    assert_eq!(value_at_exponent_price(1, 0, -8, 6, 9), None);
    assert_eq!(value_at_exponent_price(1, -5, -8, 6, 9), None);
  }

  #[test]
  fn test_value_at_exponent_price_tiny_shift_rounds_to_zero() {
    assert_eq!(value_at_exponent_price(1, 1, -60, 0, 0), Some(0));
  }
}
