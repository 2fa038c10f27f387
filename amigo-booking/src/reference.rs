use crate::models::BookingKind;
use amigo_shared::clock;
use rand::Rng;

const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 4;

/// Synthesize a booking reference: `<PREFIX>-<timestamp6>-<random4>`, where
/// the prefix names the booking kind, the middle is the trailing six digits
/// of the current unix-millis clock, and the suffix is four random uppercase
/// alphanumerics. No uniqueness guarantee beyond the clock; nothing durable
/// hangs off these.
pub fn generate_booking_reference(kind: BookingKind) -> String {
    let millis = clock::unix_millis_now().to_string();
    let timestamp = &millis[millis.len().saturating_sub(6)..];

    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();

    format!("{}-{}-{}", kind.reference_prefix(), timestamp, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_reference_shape(reference: &str, prefix: &str) {
        let parts: Vec<&str> = reference.split('-').collect();
        assert_eq!(parts.len(), 3, "reference: {}", reference);
        assert_eq!(parts[0], prefix);
        assert_eq!(parts[1].len(), 6);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_hotel_reference_shape() {
        assert_reference_shape(&generate_booking_reference(BookingKind::Hotel), "HTL");
    }

    #[test]
    fn test_flight_reference_shape() {
        assert_reference_shape(&generate_booking_reference(BookingKind::Flight), "FLT");
    }

    #[test]
    fn test_suffix_varies() {
        let suffixes: std::collections::HashSet<String> = (0..32)
            .map(|_| {
                generate_booking_reference(BookingKind::Hotel)
                    .split('-')
                    .nth(2)
                    .unwrap()
                    .to_string()
            })
            .collect();
        // 32 draws from a 36^4 space colliding down to one value would mean
        // the generator is not random at all.
        assert!(suffixes.len() > 1);
    }
}
