// ABOUTME: Fixed-capacity arbitrary-precision signed decimal integer arithmetic

use std::fmt;

/// Maximum number of decimal digits a `Bignum` can hold.
pub const MAX_DIGITS: usize = 100;

const PLUS: i8 = 1;
const MINUS: i8 = -1;

/// A fixed-capacity signed decimal integer.
///
/// `digits[0..=last_digit]` holds the value low-order digit first.
/// `last_digit == -1` denotes zero, which is always normalized to
/// `sign == PLUS`. Operations that would need more than [`MAX_DIGITS`]
/// digits are out of scope: callers stay within the capacity the
/// original source assumed.
#[derive(Clone, Copy)]
pub struct Bignum {
    digits: [u8; MAX_DIGITS],
    sign: i8,
    last_digit: isize,
}

impl Bignum {
    pub fn zero() -> Self {
        Bignum {
            digits: [0; MAX_DIGITS],
            sign: PLUS,
            last_digit: -1,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.last_digit == -1
    }

    pub fn from_i64(n: i64) -> Self {
        let mut b = Bignum::zero();
        let sign = if n < 0 { MINUS } else { PLUS };
        let mut magnitude = n.unsigned_abs();

        if magnitude == 0 {
            return b;
        }

        let mut i = 0isize;
        while magnitude > 0 {
            b.digits[i as usize] = (magnitude % 10) as u8;
            magnitude /= 10;
            i += 1;
        }
        b.last_digit = i - 1;
        b.sign = sign;
        b
    }

    fn magnitude_less(a: &Bignum, b: &Bignum) -> bool {
        if a.last_digit != b.last_digit {
            return a.last_digit < b.last_digit;
        }
        let mut i = a.last_digit;
        while i >= 0 {
            let (da, db) = (a.digits[i as usize], b.digits[i as usize]);
            if da != db {
                return da < db;
            }
            i -= 1;
        }
        false
    }

    fn strip_leading_zeros(&mut self) {
        while self.last_digit >= 0 && self.digits[self.last_digit as usize] == 0 {
            self.last_digit -= 1;
        }
        if self.last_digit == -1 {
            self.sign = PLUS;
        }
    }

    fn magnitude_add(a: &Bignum, b: &Bignum) -> Bignum {
        let mut c = Bignum::zero();
        let mut carry = 0u8;
        let n = a.last_digit.max(b.last_digit);
        let mut i = 0isize;
        while i <= n || carry > 0 {
            let da = if i <= a.last_digit { a.digits[i as usize] } else { 0 };
            let db = if i <= b.last_digit { b.digits[i as usize] } else { 0 };
            let sum = da + db + carry;
            c.digits[i as usize] = sum % 10;
            carry = sum / 10;
            i += 1;
        }
        c.last_digit = i - 1;
        c.strip_leading_zeros();
        c
    }

    /// Subtracts magnitude of `b` from magnitude of `a`, assuming `a >= b`.
    fn magnitude_sub(a: &Bignum, b: &Bignum) -> Bignum {
        let mut c = Bignum::zero();
        let mut borrow = 0i8;
        let mut i = 0isize;
        while i <= a.last_digit {
            let da = a.digits[i as usize] as i8;
            let db = if i <= b.last_digit { b.digits[i as usize] as i8 } else { 0 };
            let mut diff = da - db - borrow;
            if diff < 0 {
                diff += 10;
                borrow = 1;
            } else {
                borrow = 0;
            }
            c.digits[i as usize] = diff as u8;
            i += 1;
        }
        c.last_digit = a.last_digit;
        c.strip_leading_zeros();
        c
    }

    pub fn add(a: &Bignum, b: &Bignum) -> Bignum {
        if a.sign == b.sign {
            let mut c = Bignum::magnitude_add(a, b);
            c.sign = a.sign;
            if c.is_zero() {
                c.sign = PLUS;
            }
            return c;
        }
        // Signs differ: delegate to subtraction, negating the smaller-magnitude operand.
        if Bignum::magnitude_less(a, b) {
            let mut neg_a = *a;
            neg_a.sign = -neg_a.sign;
            Bignum::sub(b, &neg_a)
        } else {
            let mut neg_b = *b;
            neg_b.sign = -neg_b.sign;
            Bignum::sub(a, &neg_b)
        }
    }

    pub fn sub(a: &Bignum, b: &Bignum) -> Bignum {
        if a.sign != b.sign {
            let mut neg_b = *b;
            neg_b.sign = -neg_b.sign;
            return Bignum::add(a, &neg_b);
        }
        // Same sign: magnitude subtraction, flipping result sign if |a| < |b|.
        if Bignum::magnitude_less(a, b) {
            let mut c = Bignum::magnitude_sub(b, a);
            c.sign = -a.sign;
            if c.is_zero() {
                c.sign = PLUS;
            }
            c
        } else {
            let mut c = Bignum::magnitude_sub(a, b);
            c.sign = a.sign;
            if c.is_zero() {
                c.sign = PLUS;
            }
            c
        }
    }

    pub fn mul(a: &Bignum, b: &Bignum) -> Bignum {
        let mut result = Bignum::zero();
        if a.is_zero() || b.is_zero() {
            return result;
        }
        // Repeated shifted add: accumulate a * 10^i for each nonzero digit of b.
        let mut i = 0isize;
        while i <= b.last_digit {
            let digit = b.digits[i as usize];
            let mut partial = Bignum::zero();
            for _ in 0..digit {
                partial = Bignum::magnitude_add(&partial, a);
            }
            let shifted = shift_left(&partial, i as usize);
            result = Bignum::magnitude_add(&result, &shifted);
            i += 1;
        }
        result.sign = a.sign * b.sign;
        if result.is_zero() {
            result.sign = PLUS;
        }
        result
    }

    /// Integer division truncating toward zero. Callers must guard against
    /// division by zero; this layer does not check it (spec.md §4.1).
    pub fn div(a: &Bignum, b: &Bignum) -> Bignum {
        if a.is_zero() {
            return Bignum::zero();
        }
        let mut remainder = *a;
        remainder.sign = PLUS;
        let mut divisor = *b;
        divisor.sign = PLUS;

        let mut quotient = Bignum::zero();
        let mut shift = remainder.last_digit - divisor.last_digit;
        if shift < 0 {
            return Bignum::zero();
        }

        while shift >= 0 {
            let aligned = shift_left(&divisor, shift as usize);
            let mut count = 0u8;
            while !Bignum::magnitude_less(&remainder, &aligned) {
                remainder = Bignum::magnitude_sub(&remainder, &aligned);
                count += 1;
            }
            if count > 0 {
                let placed = shift_left(&Bignum::from_i64(count as i64), shift as usize);
                quotient = Bignum::magnitude_add(&quotient, &placed);
            }
            shift -= 1;
        }

        quotient.sign = a.sign * b.sign;
        if quotient.is_zero() {
            quotient.sign = PLUS;
        }
        quotient
    }

    /// Returns `+1` if `a < b`, `-1` if `a > b`, `0` if equal. Note the
    /// inverted convention relative to `std::cmp::Ordering` — preserved
    /// verbatim from the source this was distilled from.
    pub fn compare(a: &Bignum, b: &Bignum) -> i32 {
        if a.sign != b.sign {
            return if a.sign < b.sign { 1 } else { -1 };
        }
        let less = Bignum::magnitude_less(a, b);
        let greater = Bignum::magnitude_less(b, a);
        let raw = if less {
            1
        } else if greater {
            -1
        } else {
            0
        };
        if a.sign == MINUS {
            -raw
        } else {
            raw
        }
    }
}

fn shift_left(n: &Bignum, places: usize) -> Bignum {
    if n.is_zero() || places == 0 {
        return *n;
    }
    let mut c = Bignum::zero();
    for i in 0..places {
        c.digits[i] = 0;
    }
    let mut i = 0isize;
    while i <= n.last_digit {
        c.digits[i as usize + places] = n.digits[i as usize];
        i += 1;
    }
    c.last_digit = n.last_digit + places as isize;
    c.sign = n.sign;
    c
}

impl fmt::Display for Bignum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        if self.sign == MINUS {
            write!(f, "-")?;
        }
        let mut i = self.last_digit;
        while i >= 0 {
            write!(f, "{}", self.digits[i as usize])?;
            i -= 1;
        }
        Ok(())
    }
}

impl fmt::Debug for Bignum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bignum({})", self)
    }
}
