//! Exact rational arithmetic for reserve math.

use alloy::primitives::U256;
use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, Zero};

use crate::error::{Error, Result};

/// An exact rational number over arbitrary-precision integers.
///
/// Reserve ratios multiplied along a multi-hop route overflow fixed-width
/// integers and drift under floating point, so the scoring pass keeps the
/// exact dividend/divisor pair instead. Values are transient within a
/// single pass and are never reduced to lowest terms; the components grow
/// with each hop, which is acceptable for 1-3 hop routes.
#[derive(Clone, Debug)]
pub struct Fraction {
    /// Numerator
    dividend: BigInt,
    /// Denominator, never zero
    divisor: BigInt,
}

impl Fraction {
    /// Build `dividend / divisor`.
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] when `divisor` is zero.
    pub fn new(dividend: impl Into<BigInt>, divisor: impl Into<BigInt>) -> Result<Self> {
        let divisor = divisor.into();
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Self {
            dividend: dividend.into(),
            divisor,
        })
    }

    /// The integer `value` over a divisor of one.
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            dividend: value.into(),
            divisor: BigInt::one(),
        }
    }

    /// The unsigned 256-bit `value` over a divisor of one.
    #[must_use]
    pub fn from_u256(value: U256) -> Self {
        Self::from_integer(big_int(value))
    }

    /// Numerator of this fraction.
    #[must_use]
    pub fn dividend(&self) -> &BigInt {
        &self.dividend
    }

    /// Denominator of this fraction.
    #[must_use]
    pub fn divisor(&self) -> &BigInt {
        &self.divisor
    }

    /// Whether `self < other`, compared by cross-multiplication.
    #[must_use]
    pub fn lt(&self, other: &Self) -> bool {
        (&self.dividend * &other.divisor - &other.dividend * &self.divisor).is_negative()
    }

    /// Whether `self > other`, compared by cross-multiplication.
    #[must_use]
    pub fn gt(&self, other: &Self) -> bool {
        (&self.dividend * &other.divisor - &other.dividend * &self.divisor).is_positive()
    }

    /// `self + other` over the common denominator.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            dividend: &self.dividend * &other.divisor + &other.dividend * &self.divisor,
            divisor: &self.divisor * &other.divisor,
        }
    }

    /// `self - other` over the common denominator.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            dividend: &self.dividend * &other.divisor - &other.dividend * &self.divisor,
            divisor: &self.divisor * &other.divisor,
        }
    }

    /// `self * other`.
    ///
    /// A zero product collapses to the canonical `0/1` so that zero keeps a
    /// single representation regardless of how it was reached.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let dividend = &self.dividend * &other.dividend;
        let divisor = if dividend.is_zero() {
            BigInt::one()
        } else {
            &self.divisor * &other.divisor
        };
        Self { dividend, divisor }
    }

    /// `self / other`.
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] when `other` is zero-valued.
    pub fn div(&self, other: &Self) -> Result<Self> {
        if other.dividend.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Self {
            dividend: &self.dividend * &other.divisor,
            divisor: &self.divisor * &other.dividend,
        })
    }

    /// The reciprocal of this fraction.
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] when this fraction is zero-valued: the
    /// reciprocal would put zero in the divisor.
    pub fn reverse(&self) -> Result<Self> {
        if self.dividend.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Self {
            dividend: self.divisor.clone(),
            divisor: self.dividend.clone(),
        })
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            dividend: self.dividend.abs(),
            divisor: self.divisor.abs(),
        }
    }

    /// The smallest of `values`, or `None` for an empty slice.
    #[must_use]
    pub fn min(values: &[Self]) -> Option<&Self> {
        values
            .iter()
            .reduce(|smallest, value| if value.lt(smallest) { value } else { smallest })
    }

    /// The greatest of `values`, or `None` for an empty slice.
    #[must_use]
    pub fn max(values: &[Self]) -> Option<&Self> {
        values
            .iter()
            .reduce(|greatest, value| if value.gt(greatest) { value } else { greatest })
    }

    /// Materialize by truncating division.
    #[must_use]
    pub fn to_integer(&self) -> BigInt {
        &self.dividend / &self.divisor
    }
}

/// Equality by cross-multiplication, so `1/2 == 2/4` even though neither is
/// reduced.
impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        (&self.dividend * &other.divisor - &other.dividend * &self.divisor).is_zero()
    }
}

impl Eq for Fraction {}

/// Widen an unsigned 256-bit word into a signed big integer.
pub(crate) fn big_int(value: U256) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &value.to_be_bytes::<32>())
}
