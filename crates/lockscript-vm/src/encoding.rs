//! Bytecode encodings: script numbers and minimal data pushes.

/// Encode an integer as a minimally-encoded VM script number.
///
/// Little-endian magnitude with a sign bit in the high bit of the last byte;
/// zero encodes as the empty vector.
pub fn encode_script_number(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let negative = value < 0;
    let mut magnitude = value.unsigned_abs();
    let mut bytes = Vec::new();
    while magnitude > 0 {
        bytes.push((magnitude & 0xff) as u8);
        magnitude >>= 8;
    }
    if let Some(last) = bytes.last_mut() {
        if *last & 0x80 != 0 {
            bytes.push(if negative { 0x80 } else { 0x00 });
        } else if negative {
            *last |= 0x80;
        }
    }
    bytes
}

/// Prefix `data` with the minimal push instruction for its length.
///
/// Empty data becomes the single byte `0x00` (push of the empty vector);
/// lengths 1-75 use a direct push; longer data uses OP_PUSHDATA1/2/4.
pub fn encode_data_push(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 5);
    match data.len() {
        0..=75 => out.push(data.len() as u8),
        76..=0xff => {
            out.push(0x4c);
            out.push(data.len() as u8);
        }
        0x100..=0xffff => {
            out.push(0x4d);
            out.extend_from_slice(&(data.len() as u16).to_le_bytes());
        }
        _ => {
            out.push(0x4e);
            out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        }
    }
    out.extend_from_slice(data);
    out
}
