mod presigned;
mod standard;

use std::sync::Arc;
use std::sync::Mutex;

use chrono::TimeZone;
use chrono::Utc;
use cloudsign_core::time::DateTime;
use cloudsign_core::{Context, SignatureWire};
use cloudsign_emc_atmos::{Credential, RequestSigner};

/// Shared secret from the atmos programmer's guide.
pub const SECRET: &str = "LJLuryj6zs8ste6Y3jTGQp71xq0=";
pub const UID: &str = "6039ac182f194e15b9261d73ce044939/user1";

/// Captures everything handed to the signature wire.
#[derive(Debug, Default, Clone)]
pub struct CapturingWire {
    pub outputs: Arc<Mutex<Vec<String>>>,
    pub inputs: Arc<Mutex<Vec<String>>>,
}

impl SignatureWire for CapturingWire {
    fn output(&self, string_to_sign: &str) {
        self.outputs.lock().unwrap().push(string_to_sign.to_string());
    }

    fn input(&self, signature: &str) {
        self.inputs.lock().unwrap().push(signature.to_string());
    }
}

pub fn init_signing_test() -> (Context, CapturingWire) {
    let _ = env_logger::builder().is_test(true).try_init();

    let wire = CapturingWire::default();
    let ctx = Context::new().with_signature_wire(wire.clone());
    (ctx, wire)
}

pub fn load_static_credential() -> Credential {
    Credential::from_base64_secret(UID, SECRET).expect("secret must be valid base64")
}

/// Thu, 05 Jun 2008 16:38:19 GMT
pub fn signing_time() -> DateTime {
    Utc.with_ymd_and_hms(2008, 6, 5, 16, 38, 19).unwrap()
}

/// Unix timestamp in seconds.
pub fn at_timestamp(secs: i64) -> DateTime {
    Utc.timestamp_opt(secs, 0).unwrap()
}

pub fn signer_at(time: DateTime) -> RequestSigner {
    RequestSigner::new().with_time(time)
}
