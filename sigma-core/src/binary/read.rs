use byteorder::{ByteOrder, LittleEndian};
use sigma_types::{SigmaError, SigmaResult};

/// Срез `buf[off..off + n]` или [`SigmaError::Truncated`].
fn take(
    buf: &[u8],
    off: usize,
    n: usize,
) -> SigmaResult<&[u8]> {
    off.checked_add(n)
        .and_then(|end| buf.get(off..end))
        .ok_or(SigmaError::Truncated {
            offset: off,
            needed: n,
            available: buf.len().saturating_sub(off),
        })
}

pub fn read_u8(
    buf: &[u8],
    off: &mut usize,
) -> SigmaResult<u8> {
    let b = take(buf, *off, 1)?[0];
    *off += 1;
    Ok(b)
}

pub fn read_u16_le(
    buf: &[u8],
    off: &mut usize,
) -> SigmaResult<u16> {
    let v = LittleEndian::read_u16(take(buf, *off, 2)?);
    *off += 2;
    Ok(v)
}

pub fn read_u32_le(
    buf: &[u8],
    off: &mut usize,
) -> SigmaResult<u32> {
    let v = LittleEndian::read_u32(take(buf, *off, 4)?);
    *off += 4;
    Ok(v)
}

pub fn read_f64_le(
    buf: &[u8],
    off: &mut usize,
) -> SigmaResult<f64> {
    let v = LittleEndian::read_f64(take(buf, *off, 8)?);
    *off += 8;
    Ok(v)
}

/// Читает `u32` LE по абсолютному смещению, не сдвигая курсор.
pub fn peek_u32_le(
    buf: &[u8],
    at: usize,
) -> SigmaResult<u32> {
    let mut off = at;
    read_u32_le(buf, &mut off)
}
