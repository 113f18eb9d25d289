//! Non-cryptographic random bytes, used only for the event-id generator (C5).
//! Nothing security-sensitive goes through here; session/channel nonces live
//! outside this engine's scope.

use rand::RngCore;

pub fn bytes(buf: &mut [u8]) {
    rand::thread_rng().fill_bytes(buf);
}

/// An opaque 8-byte identifier assembled from two native `u32`s, per the
/// event-id generator's contract: best-effort uniqueness, not guaranteed.
pub fn event_id() -> Vec<u8> {
    let mut buf = [0u8; 8];
    bytes(&mut buf);
    buf.to_vec()
}
