use crate::models::{BookingSelection, PriceQuote};

/// Parse a backend price display string ("₹18,500", "$120") into a number.
/// Currency symbols and comma separators are stripped first; anything that
/// still fails to parse is treated as zero, matching the payment form.
pub fn parse_price(price: &str) -> f64 {
    let cleaned: String = price
        .trim()
        .chars()
        .filter(|c| !matches!(c, '₹' | '$' | '€' | '£' | ','))
        .collect();
    cleaned.trim().parse().unwrap_or(0.0)
}

/// Whole-dollar USD display with thousands separators ("$1,234").
pub fn format_price(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Two travellers share a room; odd groups round up.
pub fn rooms_for(travellers: u32) -> u32 {
    travellers.div_ceil(2)
}

/// Total for one selection: hotels at the nightly price times rooms, flights
/// at the per-person price times passenger count.
pub fn quote_total(selection: &BookingSelection) -> PriceQuote {
    match selection {
        BookingSelection::Hotel {
            price_per_night,
            travellers,
            ..
        } => {
            let rooms = rooms_for(*travellers);
            PriceQuote {
                total: parse_price(price_per_night) * f64::from(rooms),
                rooms: Some(rooms),
            }
        }
        BookingSelection::Flight {
            price_per_person,
            passengers,
            ..
        } => PriceQuote {
            total: parse_price(price_per_person) * f64::from(*passengers),
            rooms: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_strips_symbols_and_commas() {
        assert_eq!(parse_price("₹18,500"), 18500.0);
        assert_eq!(parse_price("$120"), 120.0);
        assert_eq!(parse_price("€1,299.50"), 1299.5);
        assert_eq!(parse_price("£85"), 85.0);
    }

    #[test]
    fn test_parse_price_garbage_is_zero() {
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("call us"), 0.0);
    }

    #[test]
    fn test_format_price_whole_dollars() {
        assert_eq!(format_price(1234.0), "$1,234");
        assert_eq!(format_price(120.0), "$120");
        assert_eq!(format_price(74000.0), "$74,000");
        assert_eq!(format_price(1234567.0), "$1,234,567");
    }

    #[test]
    fn test_format_price_rounds() {
        assert_eq!(format_price(1299.5), "$1,300");
        assert_eq!(format_price(0.4), "$0");
    }

    #[test]
    fn test_rooms_round_up() {
        assert_eq!(rooms_for(1), 1);
        assert_eq!(rooms_for(2), 1);
        assert_eq!(rooms_for(3), 2);
        assert_eq!(rooms_for(4), 2);
        assert_eq!(rooms_for(5), 3);
    }

    #[test]
    fn test_hotel_quote_uses_room_count() {
        let quote = quote_total(&BookingSelection::Hotel {
            name: "Ubud Garden Resort".to_string(),
            price_per_night: "$120".to_string(),
            travellers: 5,
        });
        assert_eq!(quote.total, 360.0);
        assert_eq!(quote.rooms, Some(3));
    }

    #[test]
    fn test_flight_quote_is_per_passenger() {
        let quote = quote_total(&BookingSelection::Flight {
            name: "Bengaluru → Denpasar".to_string(),
            price_per_person: "₹18,500".to_string(),
            passengers: 4,
        });
        assert_eq!(quote.total, 74000.0);
        assert_eq!(quote.rooms, None);
    }
}
