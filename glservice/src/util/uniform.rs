/// Result of splitting a uniform name like `u_name[3]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformName {
    /// Byte offset of the last `[`, if the name ends with an array subscript
    pub array_pos: Option<usize>,
    pub element_index: i32,
    pub getting_array: bool,
}

/// Parse the trailing `[<digits>]` subscript of a uniform name
///
/// Only the last subscript is parsed, so `u_name[1][2]` yields index 2 with the array position
/// pointing at the second bracket. Empty names, empty subscripts, non-digit characters and indices
/// that do not fit in an `i32` are rejected.
pub fn parse_uniform_name(name: &str) -> Option<UniformName> {
    let bytes = name.as_bytes();
    if bytes.is_empty() {
        return None;
    }

    if bytes[bytes.len() - 1] != b']' {
        return Some(UniformName {
            array_pos: None,
            element_index: 0,
            getting_array: false,
        });
    }

    if bytes.len() < 3 {
        return None;
    }

    let last = bytes.len() - 1;
    let open_pos = bytes.iter().rposition(|&b| b == b'[')?;
    if open_pos >= last - 1 {
        return None;
    }

    let mut index: i32 = 0;
    for &b in &bytes[open_pos + 1..last] {
        if !b.is_ascii_digit() {
            return None;
        }

        index = index.checked_mul(10)?.checked_add((b - b'0') as i32)?;
    }

    Some(UniformName {
        array_pos: Some(open_pos),
        element_index: index,
        getting_array: true,
    })
}
