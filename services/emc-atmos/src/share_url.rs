//! Pre-authenticated, time limited share urls.

use std::str::FromStr;

use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::Uri;
use log::debug;
use percent_encoding::utf8_percent_encode;

use cloudsign_core::{Error, Result};

use crate::config::Config;
use crate::constants::*;
use crate::credential::Credential;
use crate::sign_request::sign_string;

/// Construct the string to sign of a share url.
///
/// ```text
/// "GET" + "\n" +
/// lowercase(Path) + "\n" +
/// uid + "\n" +
/// expires
/// ```
pub fn share_url_string_to_sign(resource_path: &str, uid: &str, expires: i64) -> String {
    format!("GET\n{}\n{uid}\n{expires}", resource_path.to_lowercase())
}

/// Compute the signature of a share url.
///
/// `expires` is the unix timestamp in seconds after which atmos rejects the url.
pub fn share_url_signature(
    resource_path: &str,
    uid: &str,
    secret_key: &[u8],
    expires: i64,
) -> Result<String> {
    let string_to_sign = share_url_string_to_sign(resource_path, uid, expires);
    debug!("share url string to sign: {:?}", &string_to_sign);
    sign_string(&string_to_sign, secret_key)
}

/// ShareUrlSigner builds urls that can be used without credentials until they expire.
///
/// The expiry is part of the signature: changing the `uid` or `expires`
/// query parameter of a built url makes atmos reject it. This signer never
/// checks the clock, enforcing the expiry is up to atmos.
///
/// ```
/// use cloudsign_emc_atmos::{Credential, ShareUrlSigner};
///
/// # fn main() -> cloudsign_core::Result<()> {
/// let signer = ShareUrlSigner::new("https://atmos.example.com")?;
/// let cred = Credential::from_base64_secret("user1", "LJLuryj6zs8ste6Y3jTGQp71xq0=")?;
/// let url = signer.share_url("/rest/namespace/mydata", &cred, 1200000000)?;
/// assert_eq!(
///     url.to_string(),
///     "https://atmos.example.com/rest/namespace/mydata?uid=user1&expires=1200000000&signature=9Z5mA5P4Rlvzy98dhvT4jDQ1rRM%3D"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ShareUrlSigner {
    scheme: Scheme,
    authority: Authority,
}

impl ShareUrlSigner {
    /// Create a share url signer for given endpoint like `https://atmos.example.com`.
    pub fn new(endpoint: &str) -> Result<Self> {
        let uri = Uri::from_str(endpoint).map_err(|e| {
            Error::config_invalid(format!("endpoint {endpoint:?} is not a valid uri"))
                .with_source(e)
        })?;
        let parts = uri.into_parts();

        match (parts.scheme, parts.authority) {
            (Some(scheme), Some(authority)) => Ok(Self { scheme, authority }),
            _ => Err(Error::config_invalid(format!(
                "endpoint {endpoint:?} must contain scheme and host"
            ))),
        }
    }

    /// Create a share url signer from the endpoint in config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let endpoint = config
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::config_invalid("endpoint is required to build share urls"))?;

        Self::new(endpoint)
    }

    /// Build a share url for the resource at `resource_path`.
    ///
    /// `resource_path` must be the raw (percent-encoded) absolute path, for
    /// example `/rest/namespace/mydata` or `/rest/objects/<object id>`.
    pub fn share_url(&self, resource_path: &str, cred: &Credential, expires: i64) -> Result<Uri> {
        if !resource_path.starts_with('/') {
            return Err(Error::request_invalid(format!(
                "resource path {resource_path:?} must be absolute"
            )));
        }

        let signature = share_url_signature(resource_path, &cred.uid, &cred.secret_key, expires)?;

        let paq = format!(
            "{resource_path}?{QUERY_UID}={}&{QUERY_EXPIRES}={expires}&{QUERY_SIGNATURE}={}",
            utf8_percent_encode(&cred.uid, QUERY_ENCODE_SET),
            utf8_percent_encode(&signature, QUERY_ENCODE_SET),
        );

        let mut parts = http::uri::Parts::default();
        parts.scheme = Some(self.scheme.clone());
        parts.authority = Some(self.authority.clone());
        parts.path_and_query = Some(PathAndQuery::from_str(&paq)?);
        Ok(Uri::from_parts(parts)?)
    }

    /// Build a share url for the object `name` in the namespace interface.
    ///
    /// `name` is percent-encoded, `/` is kept as the directory separator.
    pub fn share_namespace_url(&self, name: &str, cred: &Credential, expires: i64) -> Result<Uri> {
        let path = format!(
            "{NAMESPACE_PREFIX}{}",
            utf8_percent_encode(name.trim_start_matches('/'), PATH_ENCODE_SET)
        );

        self.share_url(&path, cred, expires)
    }
}
