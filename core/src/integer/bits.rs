//! Bitwise operations, using infinite two's complement for negative values.

use gmp_mpfr_sys::gmp;
use std::ops::*;

use super::Integer;

impl Integer {
    fn bitand_ref(&self, other: &Self) -> Self {
        Self::build(|r| self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpz_and(r, a, b) })))
    }
    fn bitor_ref(&self, other: &Self) -> Self {
        Self::build(|r| self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpz_ior(r, a, b) })))
    }
    fn bitxor_ref(&self, other: &Self) -> Self {
        Self::build(|r| self.with_raw(|a| other.with_raw(|b| unsafe { gmp::mpz_xor(r, a, b) })))
    }
    fn not_ref(&self) -> Self {
        Self::build(|r| self.with_raw(|a| unsafe { gmp::mpz_com(r, a) }))
    }
    fn shl_ref(&self, bits: u32) -> Self {
        Self::build(|r| self.with_raw(|a| unsafe { gmp::mpz_mul_2exp(r, a, bits.into()) }))
    }
    fn shr_ref(&self, bits: u32) -> Self {
        Self::build(|r| self.with_raw(|a| unsafe { gmp::mpz_fdiv_q_2exp(r, a, bits.into()) }))
    }

    /// Returns the value of the bit at index `bit`.
    pub fn get_bit(&self, bit: u32) -> bool {
        self.with_raw(|raw| unsafe { gmp::mpz_tstbit(raw, bit.into()) != 0 })
    }
    /// Sets or clears the bit at index `bit`.
    pub fn set_bit(&mut self, bit: u32, value: bool) {
        self.with_raw_mut(|raw| unsafe {
            if value {
                gmp::mpz_setbit(raw, bit.into());
            } else {
                gmp::mpz_clrbit(raw, bit.into());
            }
        });
    }

    /// Returns `true` if the integer is even.
    #[inline]
    pub fn is_even(&self) -> bool {
        !self.get_bit(0)
    }
    /// Returns `true` if the integer is odd.
    #[inline]
    pub fn is_odd(&self) -> bool {
        self.get_bit(0)
    }

    /// Returns the number of one bits, or `None` if the integer is negative
    /// (and so has infinitely many).
    pub fn count_ones(&self) -> Option<u64> {
        if self.is_negative() {
            return None;
        }
        Some(self.with_raw(|raw| unsafe { gmp::mpz_popcount(raw) }).into())
    }

    /// Returns the number of bits needed to represent the absolute value.
    pub fn bit_length(&self) -> u64 {
        if self.is_zero() {
            return 0;
        }
        self.with_raw(|raw| unsafe { gmp::mpz_sizeinbase(raw, 2) }) as u64
    }
}

forward_binop!(impl BitAnd for Integer, bitand => bitand_ref);
forward_binop!(impl BitOr for Integer, bitor => bitor_ref);
forward_binop!(impl BitXor for Integer, bitxor => bitxor_ref);

forward_assign!(impl BitAndAssign for Integer, bitand_assign => bitand_ref);
forward_assign!(impl BitOrAssign for Integer, bitor_assign => bitor_ref);
forward_assign!(impl BitXorAssign for Integer, bitxor_assign => bitxor_ref);

impl Not for Integer {
    type Output = Integer;

    #[inline]
    fn not(self) -> Integer {
        self.not_ref()
    }
}
impl Not for &Integer {
    type Output = Integer;

    #[inline]
    fn not(self) -> Integer {
        self.not_ref()
    }
}

impl Shl<u32> for Integer {
    type Output = Integer;

    #[inline]
    fn shl(self, bits: u32) -> Integer {
        self.shl_ref(bits)
    }
}
impl Shl<u32> for &Integer {
    type Output = Integer;

    #[inline]
    fn shl(self, bits: u32) -> Integer {
        self.shl_ref(bits)
    }
}
impl Shr<u32> for Integer {
    type Output = Integer;

    /// Arithmetic right shift, which rounds toward negative infinity.
    #[inline]
    fn shr(self, bits: u32) -> Integer {
        self.shr_ref(bits)
    }
}
impl Shr<u32> for &Integer {
    type Output = Integer;

    /// Arithmetic right shift, which rounds toward negative infinity.
    #[inline]
    fn shr(self, bits: u32) -> Integer {
        self.shr_ref(bits)
    }
}

// Shifts only involve one value, so they can mutate in place.
impl ShlAssign<u32> for Integer {
    #[inline]
    fn shl_assign(&mut self, bits: u32) {
        self.with_raw_mut(|raw| unsafe { gmp::mpz_mul_2exp(raw, raw, bits.into()) });
    }
}
impl ShrAssign<u32> for Integer {
    #[inline]
    fn shr_assign(&mut self, bits: u32) {
        self.with_raw_mut(|raw| unsafe { gmp::mpz_fdiv_q_2exp(raw, raw, bits.into()) });
    }
}
