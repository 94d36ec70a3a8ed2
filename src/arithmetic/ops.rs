//! Decimal magnitude algorithms and the arithmetic operators.
//!
//! Magnitudes are canonical digit vectors (least significant first, no
//! high-order zeros). The signed operators compose these with the
//! sign-magnitude rules; division truncates toward zero and the remainder
//! takes the dividend's sign.

use alloc::{vec, vec::Vec};
use core::{
    borrow::Borrow,
    cmp::Ordering,
    ops::{
        Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign,
        Sub, SubAssign,
    },
};

use num_traits::{One, Pow};

use crate::arithmetic::{
    digit,
    digit::Digit,
    BigInt, Sign,
};

/// Drops high-order zero digits, canonicalizing the magnitude.
pub(crate) fn trim(digits: &mut Vec<Digit>) {
    while digits.last() == Some(&0) {
        digits.pop();
    }
}

/// Compares two canonical magnitudes.
pub(crate) fn cmp(lhs: &[Digit], rhs: &[Digit]) -> Ordering {
    match lhs.len().cmp(&rhs.len()) {
        Ordering::Equal => {
            for (a, b) in lhs.iter().rev().zip(rhs.iter().rev()) {
                match a.cmp(b) {
                    Ordering::Equal => {}
                    order => return order,
                }
            }
            Ordering::Equal
        }
        order => order,
    }
}

/// Adds two magnitudes.
pub(crate) fn add(lhs: &[Digit], rhs: &[Digit]) -> Vec<Digit> {
    let (longer, shorter) =
        if lhs.len() >= rhs.len() { (lhs, rhs) } else { (rhs, lhs) };
    let mut out = Vec::with_capacity(longer.len() + 1);
    let mut carry = 0;
    for (i, &a) in longer.iter().enumerate() {
        let b = shorter.get(i).copied().unwrap_or(0);
        let (digit, c) = digit::adc(a, b, carry);
        out.push(digit);
        carry = c;
    }
    if carry != 0 {
        out.push(carry);
    }
    out
}

/// Subtracts `rhs` from `lhs`. The caller guarantees `lhs >= rhs`.
pub(crate) fn sub(lhs: &[Digit], rhs: &[Digit]) -> Vec<Digit> {
    debug_assert!(cmp(lhs, rhs) != Ordering::Less);
    let mut out = Vec::with_capacity(lhs.len());
    let mut borrow = 0;
    for (i, &a) in lhs.iter().enumerate() {
        let b = rhs.get(i).copied().unwrap_or(0);
        let (digit, next) = digit::sbb(a, b, borrow);
        out.push(digit);
        borrow = next;
    }
    debug_assert_eq!(borrow, 0);
    trim(&mut out);
    out
}

/// Schoolbook multiplication of two magnitudes.
pub(crate) fn mul(lhs: &[Digit], rhs: &[Digit]) -> Vec<Digit> {
    if lhs.is_empty() || rhs.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0; lhs.len() + rhs.len()];
    for (i, &a) in lhs.iter().enumerate() {
        let mut carry = 0;
        for (j, &b) in rhs.iter().enumerate() {
            let (digit, c) = digit::carrying_mac(out[i + j], a, b, carry);
            out[i + j] = digit;
            carry = c;
        }
        out[i + rhs.len()] = carry;
    }
    trim(&mut out);
    out
}

/// Truncating long division of magnitudes: `(quotient, remainder)`.
///
/// Feeds dividend digits into the remainder from the most significant end;
/// the remainder stays below `rhs * 10`, so each step subtracts the divisor
/// at most nine times.
///
/// # Panics
///
/// Panics when `rhs` is zero.
pub(crate) fn div_rem(lhs: &[Digit], rhs: &[Digit]) -> (Vec<Digit>, Vec<Digit>) {
    assert!(!rhs.is_empty(), "should not divide by zero");
    if cmp(lhs, rhs) == Ordering::Less {
        return (Vec::new(), lhs.to_vec());
    }
    let mut quotient = vec![0; lhs.len()];
    let mut remainder: Vec<Digit> = Vec::new();
    for i in (0..lhs.len()).rev() {
        remainder.insert(0, lhs[i]);
        trim(&mut remainder);
        let mut q = 0;
        while cmp(&remainder, rhs) != Ordering::Less {
            remainder = sub(&remainder, rhs);
            q += 1;
        }
        quotient[i] = q;
    }
    trim(&mut quotient);
    (quotient, remainder)
}

/// Doubles a magnitude in place.
pub(crate) fn mul2_assign(digits: &mut Vec<Digit>) {
    let mut carry = 0;
    for d in digits.iter_mut() {
        let (digit, c) = digit::adc(*d, *d, carry);
        *d = digit;
        carry = c;
    }
    if carry != 0 {
        digits.push(carry);
    }
}

/// Halves a magnitude in place, returning the remainder bit.
pub(crate) fn div2_assign(digits: &mut Vec<Digit>) -> bool {
    let mut rem = 0;
    for d in digits.iter_mut().rev() {
        let cur = rem * 10 + *d;
        *d = cur / 2;
        rem = cur % 2;
    }
    trim(digits);
    rem != 0
}

/// Adds one to a magnitude in place.
pub(crate) fn incr(digits: &mut Vec<Digit>) {
    for d in digits.iter_mut() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.push(1);
}

/// Signed addition of `lhs` and a (sign, magnitude) right-hand side.
fn add_signed(lhs: &BigInt, rhs_sign: Sign, rhs_digits: &[Digit]) -> BigInt {
    if lhs.sign == rhs_sign {
        return BigInt::from_sign_magnitude(lhs.sign, add(&lhs.digits, rhs_digits));
    }
    match cmp(&lhs.digits, rhs_digits) {
        Ordering::Equal => BigInt::ZERO,
        Ordering::Greater => {
            BigInt::from_sign_magnitude(lhs.sign, sub(&lhs.digits, rhs_digits))
        }
        Ordering::Less => {
            BigInt::from_sign_magnitude(rhs_sign, sub(rhs_digits, &lhs.digits))
        }
    }
}

impl BigInt {
    /// Raises `self` to the power `exp` by binary exponentiation.
    ///
    /// # Example
    ///
    /// ```
    /// use decint::BigInt;
    ///
    /// assert_eq!(BigInt::from(3).pow(5), BigInt::from(243));
    /// assert_eq!(
    ///     BigInt::from(2).pow(100).to_string(),
    ///     "1267650600228229401496703205376",
    /// );
    /// ```
    #[must_use]
    pub fn pow(&self, mut exp: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        while exp != 0 {
            if exp & 1 == 1 {
                result *= &base;
            }
            exp >>= 1;
            if exp != 0 {
                let square = base.clone() * &base;
                base = square;
            }
        }
        result
    }
}

impl Pow<u32> for &BigInt {
    type Output = BigInt;

    fn pow(self, rhs: u32) -> BigInt {
        BigInt::pow(self, rhs)
    }
}

impl Pow<u32> for BigInt {
    type Output = BigInt;

    fn pow(self, rhs: u32) -> BigInt {
        BigInt::pow(&self, rhs)
    }
}

// ----------- Operator impls -----------

impl<B: Borrow<BigInt>> AddAssign<B> for BigInt {
    fn add_assign(&mut self, rhs: B) {
        let rhs = rhs.borrow();
        *self = add_signed(self, rhs.sign, &rhs.digits);
    }
}

impl<B: Borrow<BigInt>> Add<B> for BigInt {
    type Output = Self;

    fn add(mut self, rhs: B) -> Self::Output {
        self += rhs;
        self
    }
}

impl<B: Borrow<BigInt>> SubAssign<B> for BigInt {
    fn sub_assign(&mut self, rhs: B) {
        let rhs = rhs.borrow();
        *self = add_signed(self, rhs.sign.flip(), &rhs.digits);
    }
}

impl<B: Borrow<BigInt>> Sub<B> for BigInt {
    type Output = Self;

    fn sub(mut self, rhs: B) -> Self::Output {
        self -= rhs;
        self
    }
}

impl<B: Borrow<BigInt>> MulAssign<B> for BigInt {
    fn mul_assign(&mut self, rhs: B) {
        let rhs = rhs.borrow();
        *self = BigInt::from_sign_magnitude(
            self.sign.compose(rhs.sign),
            mul(&self.digits, &rhs.digits),
        );
    }
}

impl<B: Borrow<BigInt>> Mul<B> for BigInt {
    type Output = Self;

    fn mul(mut self, rhs: B) -> Self::Output {
        self *= rhs;
        self
    }
}

impl<B: Borrow<BigInt>> DivAssign<B> for BigInt {
    /// Truncating division.
    ///
    /// # Panics
    ///
    /// Panics when `rhs` is zero.
    fn div_assign(&mut self, rhs: B) {
        let rhs = rhs.borrow();
        let (quotient, _) = div_rem(&self.digits, &rhs.digits);
        *self = BigInt::from_sign_magnitude(
            self.sign.compose(rhs.sign),
            quotient,
        );
    }
}

impl<B: Borrow<BigInt>> Div<B> for BigInt {
    type Output = Self;

    fn div(mut self, rhs: B) -> Self::Output {
        self /= rhs;
        self
    }
}

impl<B: Borrow<BigInt>> RemAssign<B> for BigInt {
    /// Remainder with the dividend's sign.
    ///
    /// # Panics
    ///
    /// Panics when `rhs` is zero.
    fn rem_assign(&mut self, rhs: B) {
        let rhs = rhs.borrow();
        let (_, remainder) = div_rem(&self.digits, &rhs.digits);
        *self = BigInt::from_sign_magnitude(self.sign, remainder);
    }
}

impl<B: Borrow<BigInt>> Rem<B> for BigInt {
    type Output = Self;

    fn rem(mut self, rhs: B) -> Self::Output {
        self %= rhs;
        self
    }
}

impl Neg for BigInt {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        if !self.is_zero() {
            self.sign = self.sign.flip();
        }
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        -self.clone()
    }
}
