use super::*;
use crate::error::SpaceTreeError;

/// base10(base_n(x)) == x for every x < M^N, M in 2..=5, N in 1..=4.
#[test]
fn test_roundtrip_all_indices() {
  for base in 2..=5usize {
    for digits in 1..=4usize {
      let count = checked_pow(base, digits).unwrap();
      for x in 0..count {
        let encoded = base_n(x, base, digits).unwrap();
        assert_eq!(encoded.len(), digits);
        assert_eq!(
          base10(&encoded, base).unwrap(),
          x,
          "roundtrip failed for x={} base={} digits={}",
          x,
          base,
          digits
        );
      }
    }
  }
}

/// Most significant digit comes first (axis 0 varies slowest).
#[test]
fn test_digit_order_is_msb_first() {
  assert_eq!(base_n(1, 2, 3).unwrap().as_slice(), &[0, 0, 1]);
  assert_eq!(base_n(4, 2, 3).unwrap().as_slice(), &[1, 0, 0]);
  assert_eq!(base_n(5, 3, 2).unwrap().as_slice(), &[1, 2]);
}

#[test]
fn test_overflow_is_an_error() {
  let err = base_n(8, 2, 3).unwrap_err();
  assert!(matches!(
    err,
    SpaceTreeError::Configuration(ConfigurationError::BaseOverflow {
      value: 8,
      base: 2,
      digits: 3
    })
  ));
  // Largest representable value still encodes.
  assert!(base_n(7, 2, 3).is_ok());
}

#[test]
fn test_invalid_parameters() {
  assert!(matches!(
    base_n(0, 1, 3),
    Err(SpaceTreeError::Configuration(ConfigurationError::InvalidBase(1)))
  ));
  assert!(matches!(
    base_n(0, 2, 0),
    Err(SpaceTreeError::Configuration(ConfigurationError::InvalidDigitCount))
  ));
  assert!(matches!(
    base10(&[], 2),
    Err(SpaceTreeError::Configuration(ConfigurationError::InvalidDigitCount))
  ));
  assert!(matches!(
    base10(&[0, 3], 3),
    Err(SpaceTreeError::Configuration(
      ConfigurationError::DigitOutOfRange { digit: 3, position: 1, base: 3 }
    ))
  ));
}

#[test]
fn test_checked_pow_overflow() {
  assert_eq!(checked_pow(3, 3).unwrap(), 27);
  assert_eq!(checked_pow(7, 0).unwrap(), 1);
  assert!(checked_pow(2, 200).is_err());
}

#[test]
fn test_digit_count_for() {
  assert_eq!(digit_count_for(0, 2).unwrap(), 1);
  assert_eq!(digit_count_for(7, 2).unwrap(), 3);
  assert_eq!(digit_count_for(8, 2).unwrap(), 4);
  assert_eq!(digit_count_for(26, 3).unwrap(), 3);
  assert!(digit_count_for(5, 0).is_err());
  // The reported count always round-trips.
  for x in [0usize, 1, 99, 12345] {
    let count = digit_count_for(x, 5).unwrap();
    assert_eq!(base10(&base_n(x, 5, count).unwrap(), 5).unwrap(), x);
  }
}
