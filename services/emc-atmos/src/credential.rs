// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use cloudsign_core::hash::base64_decode;
use cloudsign_core::{utils::Redact, Error, Result, SigningCredential};

/// Credential for atmos.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Account id, usually in the form of `<subtenant id>/<user>`.
    pub uid: String,
    /// Shared secret, already base64 decoded.
    pub secret_key: Vec<u8>,
}

impl Credential {
    /// Create a new credential from a decoded secret key.
    pub fn new(uid: impl Into<String>, secret_key: impl Into<Vec<u8>>) -> Self {
        Self {
            uid: uid.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Create a new credential from the base64 encoded shared secret that
    /// atmos hands out.
    pub fn from_base64_secret(uid: impl Into<String>, secret_key: &str) -> Result<Self> {
        let uid = uid.into();
        let secret_key = base64_decode(secret_key).map_err(|e| {
            Error::credential_invalid(format!("secret key of {uid:?} is not valid base64"))
                .with_source(e)
        })?;

        Ok(Self { uid, secret_key })
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("uid", &Redact::from(&self.uid))
            .field("secret_key", &Redact::from(&self.secret_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.uid.is_empty() && !self.secret_key.is_empty()
    }
}
