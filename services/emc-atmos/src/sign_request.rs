//! EMC Atmos request signer
use std::time::Duration;

use http::header::CONTENT_TYPE;
use http::header::DATE;
use http::HeaderValue;
use http::Method;
use log::debug;
use percent_encoding::utf8_percent_encode;

use cloudsign_core::hash::base64_hmac_sha1;
use cloudsign_core::time::format_http_date;
use cloudsign_core::time::now;
use cloudsign_core::time::DateTime;
use cloudsign_core::{Context, Error, Result, SignRequest, SigningMethod, SigningRequest};

use crate::constants::*;
use crate::credential::Credential;
use crate::share_url::share_url_string_to_sign;

/// RequestSigner that implements EMC Atmos shared secret authentication.
///
/// - Without `expires_in`, the request is signed with the `x-emc-signature` header.
/// - With `expires_in`, the request is turned into a share url carrying
///   `uid`, `expires` and `signature` query parameters. Only `GET` requests
///   can be shared.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new request signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        ctx: &Context,
        parts: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        // Take the time once, the same value is signed and sent.
        let now = self.time.unwrap_or_else(now);

        let method = if let Some(expires_in) = expires_in {
            SigningMethod::Query(expires_in)
        } else {
            SigningMethod::Header
        };

        let mut req = SigningRequest::build(parts)?;

        match method {
            SigningMethod::Header => {
                let date: HeaderValue = format_http_date(now).parse()?;
                if req.headers.contains_key(X_EMC_DATE) {
                    req.headers.insert(X_EMC_DATE, date.clone());
                }
                req.headers.insert(DATE, date);
                req.headers.insert(X_EMC_UID, cred.uid.parse()?);

                let string_to_sign = string_to_sign(&req)?;
                ctx.wire_output(&string_to_sign);
                let signature = sign_string(&string_to_sign, &cred.secret_key)?;
                ctx.wire_input(&signature);

                req.headers.insert(X_EMC_SIGNATURE, {
                    let mut value: HeaderValue = signature.parse()?;
                    value.set_sensitive(true);

                    value
                });
            }
            SigningMethod::Query(expires_in) => {
                if req.method != Method::GET {
                    return Err(Error::request_invalid(format!(
                        "only GET requests can be shared, got {}",
                        req.method
                    )));
                }

                let expires = chrono::TimeDelta::from_std(expires_in)
                    .ok()
                    .and_then(|d| now.checked_add_signed(d))
                    .ok_or_else(|| {
                        Error::request_invalid(format!(
                            "expiration duration {expires_in:?} is out of range"
                        ))
                    })?
                    .timestamp();

                let string_to_sign = share_url_string_to_sign(&req.path, &cred.uid, expires);
                ctx.wire_output(&string_to_sign);
                let signature = sign_string(&string_to_sign, &cred.secret_key)?;
                ctx.wire_input(&signature);

                // Signing a shared request again replaces the old signature.
                req.query.retain(|(k, _)| {
                    !matches!(k.as_str(), QUERY_UID | QUERY_EXPIRES | QUERY_SIGNATURE)
                });
                req.query_push(
                    QUERY_UID,
                    utf8_percent_encode(&cred.uid, QUERY_ENCODE_SET).to_string(),
                );
                req.query_push(QUERY_EXPIRES, expires.to_string());
                req.query_push(
                    QUERY_SIGNATURE,
                    utf8_percent_encode(&signature, QUERY_ENCODE_SET).to_string(),
                );
            }
        }

        req.apply(parts)
    }
}

/// Compute the base64 encoded HMAC-SHA1 of the string to sign.
///
/// `secret_key` is the shared secret after base64 decoding.
pub fn sign_string(string_to_sign: &str, secret_key: &[u8]) -> Result<String> {
    base64_hmac_sha1(secret_key, string_to_sign.as_bytes())
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-Type + "\n" +
/// lowercase(Range) + "\n" +
/// Date + "\n" +
/// lowercase(Path) +
/// ("\n" + CanonicalizedEmcHeader)*
/// ```
///
/// `CanonicalizedEmcHeader` is `name:value` for every `x-emc-*` header
/// except `x-emc-signature`, sorted by name. There is no trailing newline.
///
/// ## Non-ASCII values
///
/// Atmos signs header values as ASCII text, so every signed header value must
/// be visible ASCII. Values carrying other bytes are rejected with
/// `RequestInvalid` instead of being signed in some lossy form the server
/// would compute differently. To send UTF-8 metadata, percent-encode it and
/// add `x-emc-utf8: true`, which is signed like any other `x-emc-*` header.
pub fn string_to_sign(req: &SigningRequest) -> Result<String> {
    if req.path.is_empty() {
        return Err(Error::request_invalid(
            "request without path is invalid for signing",
        ));
    }

    let mut lines = Vec::with_capacity(8);
    lines.push(req.method.as_str().to_string());
    lines.push(req.header_get_or_default(&CONTENT_TYPE)?.to_string());
    for name in PASS_THROUGH_HEADERS.iter() {
        lines.push(req.header_get_or_default(name)?.to_lowercase());
    }
    lines.push(req.header_get_or_default(&DATE)?.to_string());
    lines.push(req.path.to_lowercase());

    let headers = canonicalize_header(req)?;
    if !headers.is_empty() {
        lines.push(headers);
    }

    let s = lines.join("\n");
    debug!("string to sign: {:?}", &s);
    Ok(s)
}

fn canonicalize_header(req: &SigningRequest) -> Result<String> {
    let headers = req
        .header_to_vec_with_prefix(X_EMC_PREFIX)?
        .into_iter()
        .filter(|(k, _)| k != X_EMC_SIGNATURE)
        .collect();

    Ok(SigningRequest::header_to_string(headers, ":", "\n"))
}
