//! Punycode ([RFC 3492](https://tools.ietf.org/html/rfc3492)) codec.
//!
//! `encode` and `decode` work on codepoints (`char`); `encode_str` and
//! `decode_to_string` wrap them for `str`/`String`.
//!
//! All arithmetic goes through [`checked`] helpers so an overflow surfaces as
//! [`PunycodeError::Overflow`] instead of wrapping.

use crate::domain::error::PunycodeError;

// Bootstring parameters for Punycode
const BASE: u32 = 36;
const T_MIN: u32 = 1;
const T_MAX: u32 = 26;
const SKEW: u32 = 38;
const DAMP: u32 = 700;
const INITIAL_BIAS: u32 = 72;
const INITIAL_N: u32 = 0x80;
const DELIMITER: char = '-';

type PunyResult<T> = Result<T, PunycodeError>;

fn add(a: u32, b: u32) -> PunyResult<u32> {
    a.checked_add(b).ok_or(PunycodeError::Overflow)
}

fn mul(a: u32, b: u32) -> PunyResult<u32> {
    a.checked_mul(b).ok_or(PunycodeError::Overflow)
}

fn checked(len: usize) -> PunyResult<u32> {
    u32::try_from(len).map_err(|_| PunycodeError::Overflow)
}

fn adapt(mut delta: u32, num_points: u32, first_time: bool) -> u32 {
    delta /= if first_time { DAMP } else { 2 };
    delta += delta / num_points;
    let mut k = 0;
    while delta > ((BASE - T_MIN) * T_MAX) / 2 {
        delta /= BASE - T_MIN;
        k += BASE;
    }
    k + (((BASE - T_MIN + 1) * delta) / (delta + SKEW))
}

/// Threshold for digit position `k` under the current `bias`.
fn threshold(k: u32, bias: u32) -> u32 {
    if k <= bias {
        T_MIN
    } else if k >= bias + T_MAX {
        T_MAX
    } else {
        k - bias
    }
}

fn digit_value(byte: u8) -> PunyResult<u32> {
    match byte {
        b'0'..=b'9' => Ok(u32::from(byte - b'0') + 26),
        b'A'..=b'Z' => Ok(u32::from(byte - b'A')),
        b'a'..=b'z' => Ok(u32::from(byte - b'a')),
        _ => Err(PunycodeError::InvalidDigit(byte)),
    }
}

fn value_to_digit(value: u32) -> char {
    match value {
        0..=25 => char::from(b'a' + value as u8),
        // 26..=35; callers never pass anything larger
        _ => char::from(b'0' + (value - 26) as u8),
    }
}

/// Convert Punycode to an owned `String`.
pub fn decode_to_string(input: &str) -> PunyResult<String> {
    decode(input).map(|chars| chars.into_iter().collect())
}

/// Convert Punycode to codepoints.
///
/// Basic codepoints are everything before the last delimiter; a delimiter at
/// position 0 is not consumed and then fails as an invalid digit.
pub fn decode(input: &str) -> PunyResult<Vec<char>> {
    if !input.is_ascii() {
        return Err(PunycodeError::NonBasic);
    }
    let (mut output, digits): (Vec<char>, &str) = match input.rfind(DELIMITER) {
        Some(pos) if pos > 0 => (input[..pos].chars().collect(), &input[pos + 1..]),
        _ => (Vec::new(), input),
    };

    let mut code_point = INITIAL_N;
    let mut bias = INITIAL_BIAS;
    let mut i: u32 = 0;
    let mut bytes = digits.bytes();

    while let Some(first) = bytes.next() {
        let previous_i = i;
        let mut weight: u32 = 1;
        let mut k = BASE;
        let mut byte = first;

        // Decode a generalized variable-length integer into delta, added to i.
        loop {
            let digit = digit_value(byte)?;
            i = add(i, mul(digit, weight)?)?;
            let t = threshold(k, bias);
            if digit < t {
                break;
            }
            weight = mul(weight, BASE - t)?;
            k = add(k, BASE)?;
            byte = bytes.next().ok_or(PunycodeError::UnexpectedEnd)?;
        }

        let length = add(checked(output.len())?, 1)?;
        bias = adapt(i - previous_i, length, previous_i == 0);

        // i wraps around from length to 0, incrementing code_point each time.
        code_point = add(code_point, i / length)?;
        i %= length;

        let c = char::from_u32(code_point).ok_or(PunycodeError::InvalidCodePoint(code_point))?;
        output.insert(i as usize, c);
        i += 1;
    }
    Ok(output)
}

/// Convert a `str` to Punycode.
pub fn encode_str(input: &str) -> PunyResult<String> {
    encode(&input.chars().collect::<Vec<char>>())
}

/// Convert codepoints to Punycode.
pub fn encode(input: &[char]) -> PunyResult<String> {
    let mut output: String = input.iter().filter(|c| c.is_ascii()).collect();
    let basic_length = checked(output.len())?;
    if basic_length > 0 {
        output.push(DELIMITER);
    }

    let input_length = checked(input.len())?;
    let mut code_point = INITIAL_N;
    let mut delta: u32 = 0;
    let mut bias = INITIAL_BIAS;
    let mut processed = basic_length;

    while processed < input_length {
        // Every codepoint below code_point has been handled; find the next larger one.
        let min_code_point = input
            .iter()
            .map(|&c| c as u32)
            .filter(|&c| c >= code_point)
            .min()
            .ok_or(PunycodeError::Overflow)?;

        // Advance the decoder's <code_point, i> state to <min_code_point, 0>.
        delta = add(delta, mul(min_code_point - code_point, processed + 1)?)?;
        code_point = min_code_point;

        for &c in input {
            let c = c as u32;
            if c < code_point {
                delta = add(delta, 1)?;
            }
            if c == code_point {
                // Represent delta as a generalized variable-length integer.
                let mut q = delta;
                let mut k = BASE;
                loop {
                    let t = threshold(k, bias);
                    if q < t {
                        break;
                    }
                    output.push(value_to_digit(t + (q - t) % (BASE - t)));
                    q = (q - t) / (BASE - t);
                    k = add(k, BASE)?;
                }
                output.push(value_to_digit(q));
                bias = adapt(delta, processed + 1, processed == basic_length);
                delta = 0;
                processed += 1;
            }
        }
        delta = add(delta, 1)?;
        code_point = add(code_point, 1)?;
    }
    Ok(output)
}
