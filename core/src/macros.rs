//! Macros for implementing operator traits on the value types, in the style of
//! the ones in `num-bigint`.
//!
//! Every operator is forwarded to an inherent method taking two references
//! and returning a fresh value, so owned and borrowed operands share one
//! implementation. Compound assignment computes the result through shared
//! borrows first and only then moves it over `self`, which keeps a value
//! from ever being read and written through the same storage at once.

macro_rules! forward_val_val_binop {
    (impl $imp:ident for $res:ident, $method:ident => $inner:ident) => {
        impl $imp<$res> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                $res::$inner(&self, &other)
            }
        }
    };
}

macro_rules! forward_ref_val_binop {
    (impl $imp:ident for $res:ident, $method:ident => $inner:ident) => {
        impl<'a> $imp<$res> for &'a $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                $res::$inner(self, &other)
            }
        }
    };
}

macro_rules! forward_val_ref_binop {
    (impl $imp:ident for $res:ident, $method:ident => $inner:ident) => {
        impl<'a> $imp<&'a $res> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: &$res) -> $res {
                $res::$inner(&self, other)
            }
        }
    };
}

macro_rules! forward_ref_ref_binop {
    (impl $imp:ident for $res:ident, $method:ident => $inner:ident) => {
        impl<'a, 'b> $imp<&'b $res> for &'a $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: &$res) -> $res {
                $res::$inner(self, other)
            }
        }
    };
}

macro_rules! forward_val_assign {
    (impl $imp:ident for $res:ident, $method:ident => $inner:ident) => {
        impl $imp<$res> for $res {
            #[inline]
            fn $method(&mut self, other: $res) {
                *self = $res::$inner(self, &other);
            }
        }
    };
}

macro_rules! forward_ref_assign {
    (impl $imp:ident for $res:ident, $method:ident => $inner:ident) => {
        impl<'a> $imp<&'a $res> for $res {
            #[inline]
            fn $method(&mut self, other: &$res) {
                *self = $res::$inner(self, other);
            }
        }
    };
}

/// Implements a binary operator for all four combinations of owned and
/// borrowed operands.
macro_rules! forward_binop {
    (impl $imp:ident for $res:ident, $method:ident => $inner:ident $(,)?) => {
        forward_val_val_binop!(impl $imp for $res, $method => $inner);
        forward_ref_val_binop!(impl $imp for $res, $method => $inner);
        forward_val_ref_binop!(impl $imp for $res, $method => $inner);
        forward_ref_ref_binop!(impl $imp for $res, $method => $inner);
    };
}

/// Implements a compound assignment operator for owned and borrowed operands.
macro_rules! forward_assign {
    (impl $imp:ident for $res:ident, $method:ident => $inner:ident $(,)?) => {
        forward_val_assign!(impl $imp for $res, $method => $inner);
        forward_ref_assign!(impl $imp for $res, $method => $inner);
    };
}

/// Implements unary negation for owned and borrowed operands.
macro_rules! forward_neg {
    (impl Neg for $res:ident => $inner:ident $(,)?) => {
        impl Neg for $res {
            type Output = $res;

            #[inline]
            fn neg(self) -> $res {
                $res::$inner(&self)
            }
        }
        impl<'a> Neg for &'a $res {
            type Output = $res;

            #[inline]
            fn neg(self) -> $res {
                $res::$inner(self)
            }
        }
    };
}

/// Implements binary operators and comparisons between a value type and a
/// primitive by converting the primitive first.
macro_rules! forward_prim_ops {
    ($res:ident; $($prim:ty),+ $(,)?) => {
        $(
            impl Add<$prim> for $res {
                type Output = $res;

                #[inline]
                fn add(self, other: $prim) -> $res {
                    self + $res::from(other)
                }
            }
            impl<'a> Add<$prim> for &'a $res {
                type Output = $res;

                #[inline]
                fn add(self, other: $prim) -> $res {
                    self + $res::from(other)
                }
            }
            impl Sub<$prim> for $res {
                type Output = $res;

                #[inline]
                fn sub(self, other: $prim) -> $res {
                    self - $res::from(other)
                }
            }
            impl<'a> Sub<$prim> for &'a $res {
                type Output = $res;

                #[inline]
                fn sub(self, other: $prim) -> $res {
                    self - $res::from(other)
                }
            }
            impl Mul<$prim> for $res {
                type Output = $res;

                #[inline]
                fn mul(self, other: $prim) -> $res {
                    self * $res::from(other)
                }
            }
            impl<'a> Mul<$prim> for &'a $res {
                type Output = $res;

                #[inline]
                fn mul(self, other: $prim) -> $res {
                    self * $res::from(other)
                }
            }
            impl AddAssign<$prim> for $res {
                #[inline]
                fn add_assign(&mut self, other: $prim) {
                    *self += $res::from(other);
                }
            }
            impl SubAssign<$prim> for $res {
                #[inline]
                fn sub_assign(&mut self, other: $prim) {
                    *self -= $res::from(other);
                }
            }
            impl MulAssign<$prim> for $res {
                #[inline]
                fn mul_assign(&mut self, other: $prim) {
                    *self *= $res::from(other);
                }
            }
            impl PartialEq<$prim> for $res {
                #[inline]
                fn eq(&self, other: &$prim) -> bool {
                    *self == $res::from(*other)
                }
            }
            impl PartialOrd<$prim> for $res {
                #[inline]
                fn partial_cmp(&self, other: &$prim) -> Option<std::cmp::Ordering> {
                    Some(self.cmp(&$res::from(*other)))
                }
            }
        )+
    };
}
