/*!
Arbitrary-precision signed integers over a decimal-digit magnitude.

[`BigInt`] keeps a sign and an arbitrary-length sequence of decimal digits,
and equips it with exact decimal arithmetic plus the six bitwise operators
(`|`, `&`, `^`, `!`, `<<`, `>>`) carrying hardware-consistent
two's-complement semantics, for operands of any width.

When both operands fit a signed 64-bit integer, an operator delegates to the
machine instruction directly. Everything else flows through an explicit
bit-sequence pipeline: the decimal magnitudes are decomposed into bits,
negative operands are encoded by a two's-complement transform at the pair's
working width, the bits are combined elementwise, and the result is decoded
back into sign and decimal digits. Both paths produce identical results for
values in native range.

## Usage

```rust
use decint::{from_dec, BigInt};

let a = BigInt::from(-5);
let b = BigInt::from(3);
assert_eq!(a & b, BigInt::from(3));

let huge = BigInt::from(1) << BigInt::from(100);
assert_eq!(huge, from_dec!("1267650600228229401496703205376"));
assert_eq!(huge >> BigInt::from(100), BigInt::from(1));

assert_eq!(!BigInt::from(0), BigInt::from(-1));
```
*/

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod arithmetic;
mod bits;
mod bitwise;

pub use arithmetic::{
    from_dec_str, BigInt, ParseBigIntError, Sign, TryFromBigIntError,
};
