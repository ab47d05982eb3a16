//! Flickr-style short links
//!
//! `flic.kr/p/<code>` codes are the photo id in base58 over Flickr's
//! alphabet (no `0`, `I`, `O`, or `l`). The mapping is pure arithmetic, so
//! links can be derived locally from the record key.

use crate::error::{BirbybotError, Result};

const ALPHABET: &[u8; 58] = b"123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";
const BASE_URL: &str = "https://flic.kr/p/";

/// Short URL for a numeric photo id
pub fn shortlink(photo_id: &str) -> Result<String> {
    let id: u64 = photo_id.parse().map_err(|_| {
        BirbybotError::InvalidRecord(format!("photo id '{}' is not numeric", photo_id))
    })?;
    Ok(format!("{}{}", BASE_URL, encode_base58(id)))
}

fn encode_base58(mut value: u64) -> String {
    let mut digits = Vec::new();
    loop {
        digits.push(ALPHABET[(value % 58) as usize] as char);
        value /= 58;
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}
