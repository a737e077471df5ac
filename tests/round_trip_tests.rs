//! Integration tests for the symbol codec round trip
//!
//! Every payload that encodes must decode back to the same bytes with the
//! same version, EC level and mask. The sweeps cover all 40 versions and
//! all four EC levels; the boundary tests pin the published capacity
//! limits for version 1.

use qr_symbol::encoder::segments;
use qr_symbol::{ECLevel, Error, Mode, Version, decode, encode};

const LEVELS: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

/// Largest payload length that still fits the version at the EC level.
fn max_fitting_len(mode: Mode, version: Version, ec_level: ECLevel) -> usize {
    let mut len = 0;
    while segments::fits(mode, len + 1, version, ec_level) {
        len += 1;
    }
    len
}

fn numeric_payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| b'0' + (i % 10) as u8).collect()
}

fn alphanumeric_payload(len: usize) -> Vec<u8> {
    let charset = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";
    (0..len).map(|i| charset[i % charset.len()]).collect()
}

fn byte_payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 37 + 5) as u8).collect()
}

fn assert_round_trip(data: &[u8], mode: Mode, ec_level: ECLevel, version: u8) {
    let symbol = encode(data, mode, ec_level, version).expect("payload should encode");
    let decoded = decode(symbol.grid().modules()).expect("symbol should decode");
    assert_eq!(decoded.version, symbol.version());
    assert_eq!(decoded.error_correction, ec_level);
    assert_eq!(decoded.mask_pattern, symbol.mask());
    assert_eq!(decoded.segments.len(), 1);
    assert_eq!(decoded.segments[0].mode, mode);
    assert_eq!(decoded.data(), data);
}

#[test]
fn test_byte_mode_full_capacity_all_versions() {
    for number in 1..=40 {
        let version = Version::new(number).unwrap();
        for ec_level in LEVELS {
            let len = max_fitting_len(Mode::Byte, version, ec_level);
            let data = byte_payload(len);
            assert_round_trip(&data, Mode::Byte, ec_level, number);
        }
    }
}

#[test]
fn test_numeric_mode_selected_versions() {
    for number in [1, 2, 6, 7, 9, 10, 26, 27, 40] {
        let version = Version::new(number).unwrap();
        for ec_level in LEVELS {
            let len = max_fitting_len(Mode::Numeric, version, ec_level);
            let data = numeric_payload(len);
            assert_round_trip(&data, Mode::Numeric, ec_level, number);
        }
    }
}

#[test]
fn test_alphanumeric_mode_selected_versions() {
    for number in [1, 4, 7, 9, 10, 26, 27, 40] {
        let version = Version::new(number).unwrap();
        for ec_level in LEVELS {
            let len = max_fitting_len(Mode::Alphanumeric, version, ec_level);
            let data = alphanumeric_payload(len);
            assert_round_trip(&data, Mode::Alphanumeric, ec_level, number);
        }
    }
}

#[test]
fn test_short_payloads_round_trip() {
    assert_round_trip(b"1", Mode::Numeric, ECLevel::H, 1);
    assert_round_trip(b"A", Mode::Alphanumeric, ECLevel::H, 1);
    assert_round_trip(&[0x00], Mode::Byte, ECLevel::H, 1);
    assert_round_trip(&[], Mode::Byte, ECLevel::L, 1);
}

#[test]
fn test_hello_v1m_payload_bytes() {
    let symbol = encode(b"HELLO", Mode::Byte, ECLevel::M, 1).unwrap();
    assert_eq!(symbol.version().number(), 1);
    assert_eq!(symbol.dim(), 21);

    let decoded = decode(symbol.grid().modules()).unwrap();
    assert_eq!(decoded.version.number(), 1);
    assert_eq!(decoded.error_correction, ECLevel::M);
    assert_eq!(decoded.segments[0].mode, Mode::Byte);
    assert_eq!(decoded.data(), [0x48, 0x45, 0x4C, 0x4C, 0x4F]);
    assert_eq!(decoded.text(), "HELLO");
}

#[test]
fn test_decode_reports_segment_mode() {
    // "123" packs in both numeric and byte mode and yields the same
    // payload bytes, so only the reported mode tells the symbols apart.
    let numeric = encode(b"123", Mode::Numeric, ECLevel::M, 1).unwrap();
    let byte = encode(b"123", Mode::Byte, ECLevel::M, 1).unwrap();

    let from_numeric = decode(numeric.grid().modules()).unwrap();
    let from_byte = decode(byte.grid().modules()).unwrap();

    assert_eq!(from_numeric.data(), from_byte.data());
    assert_eq!(from_numeric.segments[0].mode, Mode::Numeric);
    assert_eq!(from_byte.segments[0].mode, Mode::Byte);
}

#[test]
fn test_version_1_capacity_boundaries() {
    // Published capacities for v1-L: 41 digits, 25 alphanumerics, 17 bytes.
    assert_round_trip(&numeric_payload(41), Mode::Numeric, ECLevel::L, 1);
    assert_eq!(
        encode(&numeric_payload(42), Mode::Numeric, ECLevel::L, 1),
        Err(Error::InvalidInput("payload too long for the requested version"))
    );

    assert_round_trip(&alphanumeric_payload(25), Mode::Alphanumeric, ECLevel::L, 1);
    assert!(encode(&alphanumeric_payload(26), Mode::Alphanumeric, ECLevel::L, 1).is_err());

    assert_round_trip(&byte_payload(17), Mode::Byte, ECLevel::L, 1);
    assert!(encode(&byte_payload(18), Mode::Byte, ECLevel::L, 1).is_err());
}

#[test]
fn test_auto_version_picks_smallest() {
    // 42 digits overflow v1-L, so auto selection moves to v2.
    let symbol = encode(&numeric_payload(42), Mode::Numeric, ECLevel::L, 0).unwrap();
    assert_eq!(symbol.version().number(), 2);

    let symbol = encode(b"HI", Mode::Alphanumeric, ECLevel::H, 0).unwrap();
    assert_eq!(symbol.version().number(), 1);
}

#[test]
fn test_version_out_of_range() {
    assert_eq!(
        encode(b"X", Mode::Byte, ECLevel::L, 41),
        Err(Error::RangeError("version must be between 0 and 40"))
    );
    assert_eq!(
        encode(b"X", Mode::Byte, ECLevel::L, 255),
        Err(Error::RangeError("version must be between 0 and 40"))
    );
}

#[test]
fn test_kanji_mode_rejected() {
    assert!(matches!(
        encode(&[0x93, 0x5F], Mode::Kanji, ECLevel::L, 1),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn test_mode_charset_rejections() {
    assert!(encode(b"12A", Mode::Numeric, ECLevel::L, 1).is_err());
    assert!(encode(b"lower", Mode::Alphanumeric, ECLevel::L, 1).is_err());
}

#[test]
fn test_encode_is_deterministic() {
    let first = encode(b"DETERMINISM", Mode::Byte, ECLevel::Q, 3).unwrap();
    let second = encode(b"DETERMINISM", Mode::Byte, ECLevel::Q, 3).unwrap();
    assert_eq!(first.mask(), second.mask());
    assert_eq!(first.grid().modules(), second.grid().modules());
}
