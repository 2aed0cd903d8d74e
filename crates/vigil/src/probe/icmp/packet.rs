//! ICMP echo-request packet construction and checksumming.

use std::hash::{DefaultHasher, Hash, Hasher};

use rand::distributions::Alphanumeric;
use rand::Rng;

/// ICMP message type for an echo request.
const ECHO_REQUEST_TYPE: u8 = 8;

/// ICMP code for an echo request.
const ECHO_REQUEST_CODE: u8 = 0;

/// Fixed ICMP header length in bytes.
pub const ICMP_HEADER_SIZE: usize = 8;

/// Compute the one's-complement 16-bit Internet checksum over `data`.
///
/// Sums big-endian 16-bit words, folds carries back into the low 16 bits
/// until none remain, and complements the result. The checksum field must be
/// zeroed before computing. Only even-length buffers are accepted.
pub fn checksum(data: &[u8]) -> u16 {
    assert!(data.len() % 2 == 0, "checksum requires an even-length buffer");

    let mut sum: u32 = 0;
    for word in data.chunks_exact(2) {
        sum += u32::from(u16::from_be_bytes([word[0], word[1]]));
    }
    while sum >> 16 != 0 {
        sum = (sum >> 16) + (sum & 0xffff);
    }
    !(sum as u16)
}

/// Derive a 16-bit echo identifier from the current thread and process.
///
/// Concurrent probes share the same raw-socket type; the identifier keys an
/// echo request to the execution unit that sent it.
pub fn echo_identifier() -> u16 {
    let mut hasher = DefaultHasher::new();
    format!("{:?}{}", std::thread::current().id(), std::process::id()).hash(&mut hasher);
    hasher.finish() as u16
}

/// Build a complete ICMP echo-request packet.
///
/// The payload is `payload_size` repetitions of one randomly chosen
/// alphanumeric byte. The header is 8 bytes, so `payload_size` must be even
/// to keep the checksum buffer even; odd sizes trip the checksum assert.
pub fn build_echo_request(identifier: u16, sequence: u16, payload_size: usize) -> Vec<u8> {
    let fill: u8 = rand::thread_rng().sample(Alphanumeric);

    let mut packet = Vec::with_capacity(ICMP_HEADER_SIZE + payload_size);
    packet.push(ECHO_REQUEST_TYPE);
    packet.push(ECHO_REQUEST_CODE);
    packet.extend_from_slice(&[0, 0]); // checksum, filled in below
    packet.extend_from_slice(&identifier.to_be_bytes());
    packet.extend_from_slice(&sequence.to_be_bytes());
    packet.resize(ICMP_HEADER_SIZE + payload_size, fill);

    let sum = checksum(&packet);
    packet[2..4].copy_from_slice(&sum.to_be_bytes());
    packet
}
