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

use crate::Credential;
use async_trait::async_trait;
use cloudsign_core::{utils::Redact, Context, ProvideCredential, Result};
use std::fmt::{Debug, Formatter};

/// StaticCredentialProvider provides a fixed atmos credential.
///
/// This provider is used when you have the uid and the base64 encoded shared
/// secret directly and want to use them without any dynamic loading.
#[derive(Clone)]
pub struct StaticCredentialProvider {
    uid: String,
    secret_key: String,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with uid and base64 encoded secret key.
    pub fn new(uid: &str, secret_key: &str) -> Self {
        Self {
            uid: uid.to_string(),
            secret_key: secret_key.to_string(),
        }
    }
}

impl Debug for StaticCredentialProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentialProvider")
            .field("uid", &self.uid)
            .field("secret_key", &Redact::from(&self.secret_key))
            .finish()
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Credential::from_base64_secret(&self.uid, &self.secret_key).map(Some)
    }
}
