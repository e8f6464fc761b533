use std::collections::HashSet;

pub const MIN_RESULT_COUNT: u32 = 0;
pub const MAX_RESULT_COUNT: u32 = 1000;

// nationality codes accepted by the randomuser.me API
pub const SUPPORTED_NATIONALITIES: &[&str] = &[
    "AU", "BR", "CA", "CH", "DE", "DK", "ES", "FI", "FR", "GB", "IE", "IN", "IR", "MX", "NL",
    "NO", "NZ", "RS", "TR", "UA", "US",
];

pub fn parse_count(value: &str) -> Result<u32, String> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err("count is empty".to_string());
    }
    let count: u32 = raw.parse().map_err(|_| format!("invalid count '{raw}'"))?;
    if count > MAX_RESULT_COUNT {
        return Err(format!(
            "count {count} out of range, expected {MIN_RESULT_COUNT}-{MAX_RESULT_COUNT}"
        ));
    }
    Ok(count)
}

// lenient parse used by the input path: any integer is accepted and clamped
// into the supported range, anything else is rejected
pub fn parse_count_clamped(value: &str) -> Option<u32> {
    let raw = value.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed: i128 = raw.parse().ok()?;
    Some(clamp_count(parsed))
}

pub fn clamp_count(value: i128) -> u32 {
    if value < MIN_RESULT_COUNT as i128 {
        return MIN_RESULT_COUNT;
    }
    if value > MAX_RESULT_COUNT as i128 {
        return MAX_RESULT_COUNT;
    }
    value as u32
}

pub fn parse_nat_csv(value: &str) -> Result<Vec<String>, String> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err("nationality list is empty".to_string());
    }
    let mut out: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for part in raw.split(',') {
        let item = part.trim();
        if item.is_empty() {
            continue;
        }
        let canonical = item.to_ascii_uppercase();
        if !SUPPORTED_NATIONALITIES.contains(&canonical.as_str()) {
            return Err(format!("unsupported nationality '{item}'"));
        }
        if seen.insert(canonical.clone()) {
            out.push(canonical);
        }
    }
    if out.is_empty() {
        return Err("nationality list is empty".to_string());
    }
    Ok(out)
}

pub fn capitalize_ascii(input: &str) -> String {
    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(input.len());
    out.push(first.to_ascii_uppercase());
    for ch in chars {
        out.push(ch.to_ascii_lowercase());
    }
    out
}
