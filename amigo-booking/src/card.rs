use amigo_shared::Masked;

/// Group card digits in blocks of four ("4111 1111 1111 1111"). Non-digits
/// are dropped, input past 16 digits is ignored, and fewer than four digits
/// pass through ungrouped. The result never exceeds 19 characters.
pub fn format_card_number(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return digits;
    }
    let capped = &digits[..digits.len().min(16)];
    capped
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Digits only, slash inserted after the month: "1226" becomes "12/26".
pub fn format_expiry(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(4)
        .collect();
    if digits.len() >= 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// Digits only, capped at three.
pub fn sanitize_cvv(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(3)
        .collect()
}

/// The payment form's card fields, normalized on construction. Number,
/// expiry and CVV are masked so a logged form never leaks them.
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub number: Masked<String>,
    pub expiry: Masked<String>,
    pub cvv: Masked<String>,
    pub cardholder_name: String,
}

impl CardDetails {
    pub fn new(number: &str, expiry: &str, cvv: &str, cardholder_name: &str) -> Self {
        Self {
            number: Masked::new(format_card_number(number)),
            expiry: Masked::new(format_expiry(expiry)),
            cvv: Masked::new(sanitize_cvv(cvv)),
            cardholder_name: cardholder_name.trim().to_string(),
        }
    }
}
