/// Decodes a Cloudflare-protected email (`data-cfemail` attribute).
///
/// The value is a run of hex byte pairs: the first pair is the XOR key and
/// every following pair is one character XOR'd with it. Malformed input never
/// fails; it decodes to whatever could be recovered.
pub fn decode_email(encoded: &str) -> String {
    let bytes = encoded.as_bytes();
    if bytes.len() < 2 {
        return String::new();
    }

    let Some(key) = parse_hex(&bytes[..2]) else {
        return String::new();
    };

    bytes[2..]
        .chunks(2)
        .filter_map(parse_hex)
        .map(|byte| char::from(byte ^ key))
        .collect()
}

fn parse_hex(pair: &[u8]) -> Option<u8> {
    if !pair.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let digits = std::str::from_utf8(pair).ok()?;
    u8::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(key: u8, email: &str) -> String {
        let mut out = format!("{:02x}", key);
        for byte in email.bytes() {
            out.push_str(&format!("{:02x}", byte ^ key));
        }
        out
    }

    #[test]
    fn decodes_xor_keyed_email() {
        let encoded = encode(0x5a, "jobs@umass.edu");
        assert_eq!(decode_email(&encoded), "jobs@umass.edu");
    }

    #[test]
    fn short_input_decodes_to_empty() {
        assert_eq!(decode_email(""), "");
        assert_eq!(decode_email("A"), "");
    }

    #[test]
    fn invalid_key_decodes_to_empty() {
        assert_eq!(decode_email("zz4142"), "");
    }

    #[test]
    fn key_only_decodes_to_empty() {
        assert_eq!(decode_email("5a"), "");
    }

    #[test]
    fn skips_unparseable_pairs() {
        let key = 0x10;
        let encoded = format!("{:02x}{:02x}zz{:02x}", key, b'a' ^ key, b'b' ^ key);
        assert_eq!(decode_email(&encoded), "ab");
    }

    #[test]
    fn half_hex_pair_is_skipped() {
        let key = 0x10;
        let encoded = format!("{:02x}{:02x}4z", key, b'a' ^ key);
        assert_eq!(decode_email(&encoded), "a");
    }

    #[test]
    fn trailing_single_digit_is_a_byte() {
        // "4" ^ 0x00 == 0x04
        assert_eq!(decode_email("00414"), "A\u{4}");
    }

    #[test]
    fn non_ascii_input_does_not_panic() {
        assert_eq!(decode_email("é"), "");
        assert_eq!(decode_email("00é41"), "A");
    }

    #[test]
    fn output_is_bounded_by_pair_count() {
        let encoded = encode(0x33, "someone@example.org");
        let decoded = decode_email(&encoded);
        assert!(decoded.chars().count() <= (encoded.len() - 2) / 2);
        assert_eq!(decoded, decode_email(&encoded));
    }
}
