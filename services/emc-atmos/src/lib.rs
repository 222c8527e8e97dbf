//! EMC Atmos signing implementation for cloudsign.
//!
//! This crate provides signing support for the EMC Atmos REST API (shared
//! secret authentication with `x-emc-*` headers).
//!
//! ## Overview
//!
//! Atmos signs requests with HMAC-SHA1 over a canonical string built from the
//! method, content type, range, date, path and every `x-emc-*` header. The
//! base64 encoded digest is sent in the `x-emc-signature` header. A `GET`
//! request can also be turned into a share url that stays valid until a
//! fixed expiry without any credential.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cloudsign_core::{Context, OsEnv, Result, Signer};
//! use cloudsign_emc_atmos::{DefaultCredentialProvider, RequestSigner};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new().with_env(OsEnv);
//!
//!     // Load uid and secret from `CLOUDSIGN_ATMOS_UID` and `CLOUDSIGN_ATMOS_SECRET_KEY`.
//!     let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());
//!
//!     let mut req = http::Request::get("https://atmos.example.com/rest/namespace/mydata")
//!         .body(())
//!         .unwrap()
//!         .into_parts()
//!         .0;
//!
//!     signer.sign(&mut req, None).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Share urls
//!
//! Either sign a `GET` request with `expires_in`:
//!
//! ```no_run
//! # use cloudsign_core::{Result, Signer};
//! # use std::time::Duration;
//! # async fn example(signer: Signer<cloudsign_emc_atmos::Credential>) -> Result<()> {
//! let mut req = http::Request::get("https://atmos.example.com/rest/namespace/mydata")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//! signer.sign(&mut req, Some(Duration::from_secs(3600))).await?;
//! # Ok(())
//! # }
//! ```
//!
//! or build the url for an absolute expiry with [`ShareUrlSigner`].

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{sign_string, string_to_sign, RequestSigner};

mod share_url;
pub use share_url::{share_url_signature, share_url_string_to_sign, ShareUrlSigner};

mod provide_credential;
pub use provide_credential::*;

mod constants;
pub use constants::{
    CLOUDSIGN_ATMOS_ENDPOINT, CLOUDSIGN_ATMOS_SECRET_KEY, CLOUDSIGN_ATMOS_UID, X_EMC_DATE,
    X_EMC_SIGNATURE, X_EMC_UID,
};
