//! Mixed-radix (base-M) index encoding.
//!
//! Child slots and sample points are both addressed by a flat index that
//! decodes into one digit per axis. Digits are most-significant first, so
//! digit `k` belongs to axis `k` and axis 0 varies slowest (row-major):
//!
//! ```text
//! index = d[0] * M^(N-1) + d[1] * M^(N-2) + ... + d[N-1]
//! ```

use smallvec::SmallVec;

use crate::constants::INLINE_DIGITS;
use crate::error::{ConfigurationError, Result};

/// One digit per axis, most significant first.
pub type Digits = SmallVec<[usize; INLINE_DIGITS]>;

/// `base^exponent`, failing instead of wrapping.
pub fn checked_pow(base: usize, exponent: usize) -> Result<usize> {
  let exp = u32::try_from(exponent)
    .map_err(|_| ConfigurationError::ChildCountOverflow { base, exponent })?;
  base
    .checked_pow(exp)
    .ok_or_else(|| ConfigurationError::ChildCountOverflow { base, exponent }.into())
}

/// Encode `x` as exactly `digit_count` base-`base` digits.
///
/// Fails with `BaseOverflow` when `x >= base^digit_count`.
pub fn base_n(x: usize, base: usize, digit_count: usize) -> Result<Digits> {
  if base < 2 {
    return Err(ConfigurationError::InvalidBase(base).into());
  }
  if digit_count == 0 {
    return Err(ConfigurationError::InvalidDigitCount.into());
  }

  let mut digits: Digits = SmallVec::from_elem(0, digit_count);
  let mut rest = x;
  for slot in digits.iter_mut().rev() {
    *slot = rest % base;
    rest /= base;
  }

  if rest != 0 {
    return Err(
      ConfigurationError::BaseOverflow {
        value: x,
        base,
        digits: digit_count,
      }
      .into(),
    );
  }
  Ok(digits)
}

/// Fewest base-`base` digits that can hold `x` (at least one).
pub fn digit_count_for(x: usize, base: usize) -> Result<usize> {
  if base < 2 {
    return Err(ConfigurationError::InvalidBase(base).into());
  }
  let mut count = 1;
  let mut rest = x / base;
  while rest > 0 {
    rest /= base;
    count += 1;
  }
  Ok(count)
}

/// Decode most-significant-first digits back to a flat index.
pub fn base10(digits: &[usize], base: usize) -> Result<usize> {
  if base < 2 {
    return Err(ConfigurationError::InvalidBase(base).into());
  }
  if digits.is_empty() {
    return Err(ConfigurationError::InvalidDigitCount.into());
  }

  let overflow = || ConfigurationError::ChildCountOverflow {
    base,
    exponent: digits.len(),
  };

  let mut value: usize = 0;
  for (position, &digit) in digits.iter().enumerate() {
    if digit >= base {
      return Err(
        ConfigurationError::DigitOutOfRange {
          digit,
          position,
          base,
        }
        .into(),
      );
    }
    value = value
      .checked_mul(base)
      .and_then(|v| v.checked_add(digit))
      .ok_or_else(overflow)?;
  }
  Ok(value)
}

#[cfg(test)]
#[path = "radix_test.rs"]
mod radix_test;
