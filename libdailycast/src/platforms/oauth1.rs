//! OAuth 1.0a request signing (HMAC-SHA1)
//!
//! Only what the microblog API needs for user-context requests: a signed
//! `Authorization` header. JSON request bodies are not part of the
//! signature; form or query parameters must be passed as `params`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;

use crate::error::PlatformError;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const VERSION: &str = "1.0";

/// RFC 3986 percent-encoding as OAuth 1.0a requires
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[derive(Debug, Clone)]
pub struct OAuth1Signer {
    consumer_key: SecretString,
    consumer_secret: SecretString,
    token: SecretString,
    token_secret: SecretString,
}

impl OAuth1Signer {
    pub fn new(
        consumer_key: SecretString,
        consumer_secret: SecretString,
        token: SecretString,
        token_secret: SecretString,
    ) -> Self {
        Self {
            consumer_key,
            consumer_secret,
            token,
            token_secret,
        }
    }

    /// Signed `Authorization` header value with a fresh nonce and timestamp
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<String, PlatformError> {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp().to_string();

        self.authorization_header_with(method, url, params, &nonce, &timestamp)
    }

    /// Signed header value for a fixed nonce and timestamp
    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> Result<String, PlatformError> {
        let mut oauth_params = vec![
            ("oauth_consumer_key", self.consumer_key.expose_secret()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.token.expose_secret()),
            ("oauth_version", VERSION),
        ];

        let signature = self.signature(method, url, params, &oauth_params)?;
        oauth_params.push(("oauth_signature", signature.as_str()));
        oauth_params.sort_by(|a, b| a.0.cmp(b.0));

        let fields: Vec<String> = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect();

        Ok(format!("OAuth {}", fields.join(", ")))
    }

    fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        oauth_params: &[(&str, &str)],
    ) -> Result<String, PlatformError> {
        let base = signature_base_string(method, url, params.iter().chain(oauth_params));
        let key = format!(
            "{}&{}",
            percent_encode(self.consumer_secret.expose_secret()),
            percent_encode(self.token_secret.expose_secret())
        );

        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| PlatformError::Authentication(format!("Invalid signing key: {}", e)))?;
        mac.update(base.as_bytes());

        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// `METHOD&encoded-url&encoded-sorted-params`
fn signature_base_string<'a, I>(method: &str, url: &str, params: I) -> String
where
    I: Iterator<Item = &'a (&'a str, &'a str)>,
{
    let mut encoded: Vec<(String, String)> = params
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&parameter_string)
    )
}
