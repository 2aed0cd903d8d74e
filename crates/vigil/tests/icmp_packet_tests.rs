//! Tests for the ICMP echo-request codec.

use vigil::probe::icmp::{build_echo_request, checksum, echo_identifier, ICMP_HEADER_SIZE};
use vigil::DEFAULT_ICMP_PAYLOAD_SIZE;

#[test]
fn test_checksum_known_vector() {
    // RFC 1071 style vector: 0x0001 + 0xf203 + 0xf4f5 + 0xf6f7 = 0x2ddf0,
    // folded to 0xddf2, complemented to 0x220d.
    let data = [0x00, 0x01, 0xf2, 0x03, 0xf4, 0xf5, 0xf6, 0xf7];
    assert_eq!(checksum(&data), 0x220d);
}

#[test]
fn test_checksum_all_zero() {
    assert_eq!(checksum(&[0u8; 8]), 0xffff);
}

#[test]
fn test_checksum_folds_carries() {
    // Enough 0xffff words to push the sum well past 16 bits.
    let data = [0xffu8; 64];
    assert_eq!(checksum(&data), 0x0000);
}

#[test]
#[should_panic(expected = "even-length")]
fn test_checksum_rejects_odd_length() {
    checksum(&[0x01, 0x02, 0x03]);
}

#[test]
fn test_checksum_round_trip() {
    let packet = build_echo_request(0x1234, 7, 32);

    // Recomputing over the full packet, checksum field included, must give
    // zero: the embedded value cancels the one's-complement sum.
    assert_eq!(checksum(&packet), 0);

    // Zeroing the checksum field reproduces the embedded value.
    let embedded = u16::from_be_bytes([packet[2], packet[3]]);
    let mut zeroed = packet.clone();
    zeroed[2] = 0;
    zeroed[3] = 0;
    assert_eq!(checksum(&zeroed), embedded);
}

#[test]
fn test_echo_request_layout() {
    let packet = build_echo_request(0xbeef, 3, DEFAULT_ICMP_PAYLOAD_SIZE);

    assert_eq!(packet.len(), ICMP_HEADER_SIZE + DEFAULT_ICMP_PAYLOAD_SIZE);
    assert_eq!(packet[0], 8, "type must be echo request");
    assert_eq!(packet[1], 0, "code must be zero");
    assert_eq!(u16::from_be_bytes([packet[4], packet[5]]), 0xbeef);
    assert_eq!(u16::from_be_bytes([packet[6], packet[7]]), 3);
}

#[test]
fn test_echo_request_payload_is_one_repeated_alphanumeric() {
    let packet = build_echo_request(1, 1, 64);
    let payload = &packet[ICMP_HEADER_SIZE..];

    let fill = payload[0];
    assert!(fill.is_ascii_alphanumeric());
    assert!(payload.iter().all(|&b| b == fill));
}

#[test]
fn test_echo_identifier_stable_within_thread() {
    assert_eq!(echo_identifier(), echo_identifier());
}
