//! Signing cloud storage API requests without effort.
//!
//! This crate re-exports [`cloudsign_core`] together with the service
//! signers enabled by features:
//!
//! - `atmos` (default): EMC Atmos shared secret signing, see [`atmos`].
//!
//! ```no_run
//! use cloudsign::atmos::{RequestSigner, StaticCredentialProvider};
//! use cloudsign::{Context, Signer};
//!
//! # async fn example() -> cloudsign::Result<()> {
//! let signer = Signer::new(
//!     Context::new(),
//!     StaticCredentialProvider::new("subtenant/user1", "c2VjcmV0"),
//!     RequestSigner::new(),
//! );
//!
//! let mut parts = http::Request::get("https://atmos.example.com/rest/objects")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

pub use cloudsign_core::*;

#[cfg(feature = "atmos")]
pub mod atmos {
    //! EMC Atmos signing.
    pub use cloudsign_emc_atmos::*;
}
