/// First of the 26 regional indicator symbols (🇦), the building blocks of
/// flag emoji.
const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// Alias the marketplace uses for the United Kingdom. ISO 3166 says `GB`.
const UK_ALIAS: &str = "UK";

/// Map a two-letter country code to its flag emoji
///
/// `"FR"` becomes the French flag. The marketplace labels the United
/// Kingdom `UK`, which has no regional-indicator pair of its own, so `UK`
/// renders the `GB` flag. Anything that is not two ASCII letters yields
/// `None`; callers fall back to showing the raw code.
pub fn flag_emoji(code: &str) -> Option<String> {
    let code = if code.eq_ignore_ascii_case(UK_ALIAS) {
        "GB"
    } else {
        code
    };

    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }

    let mut flag = String::with_capacity(8);
    for b in code.bytes() {
        let offset = (b.to_ascii_uppercase() - b'A') as u32;
        flag.push(char::from_u32(REGIONAL_INDICATOR_A + offset)?);
    }

    Some(flag)
}
