use once_cell::sync::Lazy;
use regex::Regex;

// Regex untuk email validation (RFC 5322 compliant)
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$")
        .unwrap()
});

// Regex untuk nomor telepon Indonesia (08xx, 628xx, atau +628xx format)
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+62|62|0)8[1-9][0-9]{7,11}$").unwrap());

/// Validasi format email
pub fn validate_email(email: &str) -> Result<(), String> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err("Email tidak boleh kosong".to_string());
    }

    if trimmed.len() > 254 {
        return Err("Email terlalu panjang (maksimal 254 karakter)".to_string());
    }

    if !EMAIL_REGEX.is_match(trimmed) {
        return Err("Format email tidak valid".to_string());
    }

    Ok(())
}

/// Validasi kekuatan password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password minimal 8 karakter".to_string());
    }

    if password.len() > 128 {
        return Err("Password maksimal 128 karakter".to_string());
    }

    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_numeric());

    if !has_letter || !has_digit {
        return Err("Password harus mengandung huruf dan angka".to_string());
    }

    Ok(())
}

/// Validasi nomor telepon Indonesia dengan berbagai format
pub fn validate_phone(phone: &str) -> Result<(), String> {
    let trimmed = phone.trim().replace(&[' ', '-'][..], "");

    if trimmed.is_empty() {
        return Err("Nomor telepon tidak boleh kosong".to_string());
    }

    if !PHONE_REGEX.is_match(&trimmed) {
        return Err(
            "Format nomor telepon tidak valid (gunakan format 08xx, 628xx, atau +628xx)"
                .to_string(),
        );
    }

    Ok(())
}

/// Normalisasi nomor telepon ke format +628xx untuk konsistensi database
pub fn normalize_phone(phone: &str) -> String {
    let cleaned = phone.trim().replace(&[' ', '-'][..], "");

    if let Some(rest) = cleaned.strip_prefix("+62") {
        format!("+62{}", rest)
    } else if let Some(rest) = cleaned.strip_prefix("62") {
        format!("+62{}", rest)
    } else if let Some(rest) = cleaned.strip_prefix('0') {
        format!("+62{}", rest)
    } else {
        cleaned
    }
}

/// Validasi field wajib tidak kosong, dipakai oleh DTO create/update
pub fn validate_required(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} tidak boleh kosong", field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("budi@peternak.co.id").is_ok());
        assert!(validate_email("budi.santoso+ayam@gmail.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("tanpa-at.com").is_err());
        assert!(validate_email("spasi di@email.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("rahasia123").is_ok());
        assert!(validate_password("Ayam2024").is_ok());
        assert!(validate_password("pendek1").is_err());
        assert!(validate_password("hanyahuruf").is_err());
        assert!(validate_password("12345678").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("081234567890").is_ok());
        assert!(validate_phone("+6281234567890").is_ok());
        assert!(validate_phone("6281234567890").is_ok());
        assert!(validate_phone("0812-3456-7890").is_ok());
        assert!(validate_phone("021555123").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("081234567890"), "+6281234567890");
        assert_eq!(normalize_phone("6281234567890"), "+6281234567890");
        assert_eq!(normalize_phone("+6281234567890"), "+6281234567890");
        assert_eq!(normalize_phone("0812-3456-7890"), "+6281234567890");
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("isi", "Nama").is_ok());
        let err = validate_required("   ", "Nama").unwrap_err();
        assert_eq!(err, "Nama tidak boleh kosong");
    }
}
