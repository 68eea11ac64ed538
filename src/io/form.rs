//! application/x-www-form-urlencoded body decoding

/// Username used when the submission carries none
pub const UNKNOWN_USERNAME: &str = "Unknown";

/// Decoded value of `name`, if present in the form body
pub fn get_form_field(form: &str, name: &str) -> Option<String> {
    for pair in form.split('&') {
        let mut parts = pair.splitn(2, '=');
        if let (Some(k), Some(v)) = (parts.next(), parts.next()) {
            if url_decode(k) == name {
                return Some(url_decode(v));
            }
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s).decode_utf8_lossy().to_string()
}

/// Username for a submission line: line breaks flattened, blank becomes `Unknown`
pub fn submission_username(form: &str, field: &str) -> String {
    let raw = get_form_field(form, field).unwrap_or_default();
    let flattened: String =
        raw.chars().map(|c| if c == '\r' || c == '\n' { ' ' } else { c }).collect();
    if flattened.trim().is_empty() {
        UNKNOWN_USERNAME.to_string()
    } else {
        flattened
    }
}
