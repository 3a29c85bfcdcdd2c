//! OAuth 1.0a request signing (HMAC-SHA1), as required by the v1.1 REST API.

use crate::config::Credentials;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 percent-encoding: everything except `A-Z a-z 0-9 - . _ ~`.
pub fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Per-request values that must be fresh for every call.
#[derive(Clone, Debug)]
pub struct Nonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl Nonce {
    pub fn fresh() -> Self {
        let nonce = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        Self { nonce, timestamp: chrono::Utc::now().timestamp() }
    }
}

/// Signs requests on behalf of one consumer/token pair.
#[derive(Clone, Debug)]
pub struct Signer {
    creds: Credentials,
}

impl Signer {
    pub fn new(creds: Credentials) -> Self {
        Self { creds }
    }

    fn oauth_params(&self, nonce: &Nonce) -> Vec<(&'static str, String)> {
        vec![
            ("oauth_consumer_key", self.creds.consumer_key.clone()),
            ("oauth_nonce", nonce.nonce.clone()),
            ("oauth_signature_method", "HMAC-SHA1".to_string()),
            ("oauth_timestamp", nonce.timestamp.to_string()),
            ("oauth_token", self.creds.access_token.clone()),
            ("oauth_version", "1.0".to_string()),
        ]
    }

    /// Signature for `method url` with the given request parameters (query and form body).
    pub fn signature(&self, method: &str, url: &str, params: &[(&str, String)], nonce: &Nonce) -> String {
        let oauth = self.oauth_params(nonce);
        let mut pairs: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (percent_encode(k), percent_encode(v)))
            .chain(oauth.iter().map(|(k, v)| (percent_encode(k), percent_encode(v))))
            .collect();
        pairs.sort();
        let param_string = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let base = format!(
            "{}&{}&{}",
            method.to_ascii_uppercase(),
            percent_encode(url),
            percent_encode(&param_string)
        );
        let key = format!(
            "{}&{}",
            percent_encode(&self.creds.consumer_secret),
            percent_encode(&self.creds.access_token_secret)
        );

        // HMAC accepts keys of any length.
        let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
        mac.update(base.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Full `Authorization` header value.
    pub fn authorization(&self, method: &str, url: &str, params: &[(&str, String)], nonce: &Nonce) -> String {
        let signature = self.signature(method, url, params, nonce);
        let mut fields = self.oauth_params(nonce);
        fields.push(("oauth_signature", signature));
        fields.sort_by(|a, b| a.0.cmp(b.0));
        let joined = fields
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("OAuth {joined}")
    }
}
