use serde::{Deserialize, Serialize};

/// Model JWT claims yang digunakan di seluruh sistem untuk authentication.
/// Role mengikuti jenis akun user: "Pembeli", "Peternak", atau "Admin".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    pub sub: i32,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl TokenClaims {
    /// Cek apakah user adalah admin back-office
    pub fn is_admin(&self) -> bool {
        self.role == "Admin"
    }

    /// Cek apakah user adalah pembeli
    pub fn is_pembeli(&self) -> bool {
        self.role == "Pembeli"
    }

    /// Cek apakah user adalah peternak
    pub fn is_peternak(&self) -> bool {
        self.role == "Peternak"
    }

    /// Cek apakah token sudah expired berdasarkan current time
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        self.exp <= now
    }

    /// Get remaining validity duration dalam detik
    pub fn remaining_validity(&self) -> i64 {
        let now = chrono::Utc::now().timestamp();
        (self.exp - now).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_claims(role: &str) -> TokenClaims {
        let now = chrono::Utc::now().timestamp();
        TokenClaims {
            sub: 42,
            email: "budi@example.com".to_string(),
            role: role.to_string(),
            exp: now + 86400,
            iat: now,
            jti: "jti-test-42".to_string(),
        }
    }

    #[test]
    fn test_is_admin() {
        let claims = create_test_claims("Admin");
        assert!(claims.is_admin());
        assert!(!claims.is_pembeli());
        assert!(!claims.is_peternak());
    }

    #[test]
    fn test_is_pembeli() {
        let claims = create_test_claims("Pembeli");
        assert!(claims.is_pembeli());
        assert!(!claims.is_admin());
    }

    #[test]
    fn test_is_peternak() {
        let claims = create_test_claims("Peternak");
        assert!(claims.is_peternak());
        assert!(!claims.is_admin());
    }

    #[test]
    fn test_role_is_case_sensitive() {
        let claims = create_test_claims("admin");
        assert!(!claims.is_admin());
    }

    #[test]
    fn test_is_not_expired() {
        let claims = create_test_claims("Pembeli");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_is_expired() {
        let mut claims = create_test_claims("Pembeli");
        claims.exp = chrono::Utc::now().timestamp() - 1;
        assert!(claims.is_expired());
    }

    #[test]
    fn test_remaining_validity() {
        let claims = create_test_claims("Pembeli");
        let remaining = claims.remaining_validity();
        assert!(remaining > 0 && remaining <= 86400);
    }
}
