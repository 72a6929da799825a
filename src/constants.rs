pub const NULL: &str = "null";
pub const TRUE: &str = "true";
pub const FALSE: &str = "false";

pub const MAX_DEPTH: usize = 256;

/// Whitespace skipped between tokens. Tab is not part of the set.
#[inline]
pub fn is_insignificant_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\r')
}

/// Renders a byte for error messages: printable ASCII as itself, anything
/// else as a hex escape.
pub fn describe_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        format!("`{}`", byte as char)
    } else {
        format!("0x{byte:02x}")
    }
}
