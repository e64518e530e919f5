// Helper functions for safe logging

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
///
/// # Example
/// ```ignore
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    if email.len() > 3 {
        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() == 2 && !parts[0].is_empty() {
            let first = parts[0].chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, parts[1])
        } else {
            "***@***.***".to_string()
        }
    } else {
        "***@***.***".to_string()
    }
}

/// Masks a PEN, keeping only the last three digits
///
/// # Example
/// ```ignore
/// let masked = mask_pen("123456789");
/// // Returns: "******789"
/// ```
pub fn mask_pen(pen: &str) -> String {
    let count = pen.chars().count();
    if count <= 3 {
        return "*".repeat(count);
    }
    let visible: String = pen.chars().skip(count - 3).collect();
    format!("{}{}", "*".repeat(count - 3), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_email_log() {
        assert_eq!(safe_email_log("abc@gmail.com"), "a***@gmail.com");
        assert_eq!(safe_email_log("ab"), "***@***.***");
        assert_eq!(safe_email_log("not-an-email"), "***@***.***");
        assert_eq!(safe_email_log("@gmail.com"), "***@***.***");
    }

    #[test]
    fn test_mask_pen() {
        assert_eq!(mask_pen("123456789"), "******789");
        assert_eq!(mask_pen("12"), "**");
        assert_eq!(mask_pen(""), "");
    }
}
