//! ANT frame checksum
//!
//! The trailing checksum byte is the XOR of every preceding byte, chosen
//! so that the XOR of a complete well-formed frame is zero.

/// XOR of all bytes in `data`.
pub fn xor(data: &[u8]) -> u8 {
    data.iter().fold(0, |acc, b| acc ^ b)
}

/// Residue of a complete frame; zero means the checksum holds.
pub fn residue(frame: &[u8]) -> u8 {
    xor(frame)
}
