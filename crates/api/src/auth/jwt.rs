//! JWT access-token validation.
//!
//! Tokens are HS256-signed by the identity provider and carry the
//! principal's stable id in `sub`. This service never stores tokens; it
//! only verifies the signature, expiry, and (when configured) issuer and
//! audience.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims read from every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the principal's identity provider id.
    pub sub: String,
    /// Optional e-mail address, recorded on the principal's profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Optional display name, recorded on the principal's profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Issuer, checked when [`JwtConfig::issuer`] is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Unique token identifier.
    #[serde(default)]
    pub jti: String,
}

/// Configuration for JWT validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to verify tokens.
    pub secret: String,
    /// Required `iss` claim, if any.
    pub issuer: Option<String>,
    /// Required `aud` claim, if any.
    pub audience: Option<String>,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var        | Required | Default |
    /// |----------------|----------|---------|
    /// | `JWT_SECRET`   | **yes**  | --      |
    /// | `JWT_ISSUER`   | no       | --      |
    /// | `JWT_AUDIENCE` | no       | --      |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let optional = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            secret,
            issuer: optional("JWT_ISSUER"),
            audience: optional("JWT_AUDIENCE"),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::default(); // HS256, validates exp
        let mut required = vec!["exp"];
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
            required.push("iss");
        }
        match &self.audience {
            Some(audience) => {
                validation.set_audience(&[audience]);
                required.push("aud");
            }
            None => validation.validate_aud = false,
        }
        // A configured iss/aud is only compared when present, so require it.
        validation.set_required_spec_claims(&required);
        validation
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )?;
    Ok(token_data.claims)
}

/// Issue an HS256 access token for `sub`, valid for `ttl_mins` minutes.
///
/// Production tokens come from the identity provider; this exists for
/// local development and integration tests.
pub fn generate_access_token(
    sub: &str,
    email: Option<&str>,
    ttl_mins: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: sub.to_string(),
        email: email.map(str::to_string),
        name: None,
        exp: now + ttl_mins * 60,
        iat: now,
        iss: config.issuer.clone(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            issuer: None,
            audience: None,
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config();
        let token = generate_access_token("00u1abc", Some("a@b.c"), 15, &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, "00u1abc");
        assert_eq!(claims.email.as_deref(), Some("a@b.c"));
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Use a margin well beyond the default 60-second leeway.
        let token = generate_access_token("u1", None, -10, &config)
            .expect("encoding should succeed");

        let result = validate_token(&token, &config);
        assert!(result.is_err(), "expired token must fail validation");
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            ..test_config()
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            ..test_config()
        };

        let token = generate_access_token("u1", None, 15, &config_a)
            .expect("token generation should succeed");

        let result = validate_token(&token, &config_b);
        assert!(
            result.is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn test_issuer_mismatch_fails() {
        let issuing = JwtConfig {
            issuer: Some("https://idp.example.com".to_string()),
            ..test_config()
        };
        let verifying = JwtConfig {
            issuer: Some("https://other.example.com".to_string()),
            ..test_config()
        };

        let token = generate_access_token("u1", None, 15, &issuing).unwrap();

        assert!(validate_token(&token, &issuing).is_ok());
        assert!(validate_token(&token, &verifying).is_err());
    }

    #[test]
    fn test_configured_audience_requires_claim() {
        let config = JwtConfig {
            audience: Some("api://cityspire".to_string()),
            ..test_config()
        };

        // Tokens minted here carry no `aud`, so a configured audience rejects them.
        let token = generate_access_token("u1", None, 15, &test_config()).unwrap();
        assert!(validate_token(&token, &config).is_err());
    }
}
