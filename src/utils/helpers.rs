use rand::Rng;

const PAIRING_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const PAIRING_CODE_LEN: usize = 6;

/// Generate a short human-readable pairing code.
///
/// Displayed next to the connect URL so a peer app can show it during
/// pairing. The sync core does not verify it against inbound pairing
/// requests.
pub fn generate_pairing_code() -> String {
    let mut rng = rand::rng();
    (0..PAIRING_CODE_LEN)
        .map(|_| PAIRING_CODE_CHARSET[rng.random_range(0..PAIRING_CODE_CHARSET.len())] as char)
        .collect()
}

/// Shortened device id for status lines, safe on multi-byte ids.
pub fn short_id(device_id: &str) -> &str {
    match device_id.char_indices().nth(8) {
        Some((idx, _)) => &device_id[..idx],
        None => device_id,
    }
}
