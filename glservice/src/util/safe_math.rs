//! Overflow-checked integer arithmetic
//!
//! Every size computation in the service goes through these helpers so that a hostile client
//! cannot wrap a byte count around to a small value.

/// Multiply two `u32` values, returning `None` on overflow
pub fn safe_multiply_uint32(a: u32, b: u32) -> Option<u32> {
    a.checked_mul(b)
}

/// Add two `u32` values, returning `None` on overflow
pub fn safe_add_uint32(a: u32, b: u32) -> Option<u32> {
    a.checked_add(b)
}

/// Add two `i32` values, returning `None` on overflow in either direction
pub fn safe_add_int32(a: i32, b: i32) -> Option<i32> {
    a.checked_add(b)
}

pub fn is_npot(value: u32) -> bool {
    value & value.wrapping_sub(1) != 0
}

/// Floor of the base-2 logarithm, `None` for 0
pub fn log2_floor(value: u32) -> Option<u32> {
    if value == 0 {
        None
    } else {
        Some(31 - value.leading_zeros())
    }
}

/// Ceiling of the base-2 logarithm, `None` for 0
pub fn log2_ceiling(value: u32) -> Option<u32> {
    match value {
        0 => None,
        1 => Some(0),
        n => log2_floor(n - 1).map(|l| l + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_uint32() {
        assert_eq!(safe_multiply_uint32(2, 3), Some(6));
        assert_eq!(safe_multiply_uint32(0x80000000, 1), Some(0x80000000));
        assert_eq!(safe_multiply_uint32(0x80000000, 2), None);
        assert_eq!(safe_multiply_uint32(0xFFFF, 0x10001), Some(0xFFFFFFFF));
        assert_eq!(safe_multiply_uint32(0x10000, 0x10000), None);
        assert_eq!(safe_multiply_uint32(0, u32::max_value()), Some(0));
    }

    #[test]
    fn add_uint32() {
        assert_eq!(safe_add_uint32(2, 3), Some(5));
        assert_eq!(safe_add_uint32(0xFFFFFFFE, 1), Some(0xFFFFFFFF));
        assert_eq!(safe_add_uint32(0xFFFFFFFF, 1), None);
        assert_eq!(safe_add_uint32(0x80000000, 0x80000000), None);
    }

    #[test]
    fn add_int32() {
        assert_eq!(safe_add_int32(2, 3), Some(5));
        assert_eq!(safe_add_int32(-2, -3), Some(-5));
        assert_eq!(safe_add_int32(i32::max_value(), 1), None);
        assert_eq!(safe_add_int32(i32::min_value(), -1), None);
        assert_eq!(safe_add_int32(i32::max_value(), i32::min_value()), Some(-1));
    }

    #[test]
    fn npot() {
        assert!(!is_npot(0));
        assert!(!is_npot(1));
        assert!(!is_npot(64));
        assert!(is_npot(3));
        assert!(is_npot(0x80000001));
    }

    #[test]
    fn log2() {
        assert_eq!(log2_floor(0), None);
        assert_eq!(log2_floor(1), Some(0));
        assert_eq!(log2_floor(2), Some(1));
        assert_eq!(log2_floor(3), Some(1));
        assert_eq!(log2_floor(0xFFFFFFFF), Some(31));

        assert_eq!(log2_ceiling(0), None);
        assert_eq!(log2_ceiling(1), Some(0));
        assert_eq!(log2_ceiling(3), Some(2));
        assert_eq!(log2_ceiling(4), Some(2));
        assert_eq!(log2_ceiling(5), Some(3));
        assert_eq!(log2_ceiling(0x80000001), Some(32));
    }

    quickcheck::quickcheck! {
        fn multiply_matches_wide_arithmetic(a: u32, b: u32) -> bool {
            let wide = a as u64 * b as u64;
            match safe_multiply_uint32(a, b) {
                Some(r) => wide <= u32::max_value() as u64 && r as u64 == wide,
                None => wide > u32::max_value() as u64,
            }
        }
    }
}
