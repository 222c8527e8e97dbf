use std::time::Duration;

use anyhow::Result;
use cloudsign_core::SignRequest;
use cloudsign_emc_atmos::{Credential, ShareUrlSigner, X_EMC_SIGNATURE};
use http::header::DATE;
use http::Request;
use pretty_assertions::assert_eq;

use super::{at_timestamp, init_signing_test, load_static_credential, signer_at, SECRET};

#[tokio::test]
async fn test_presigned_get_matches_share_url() -> Result<()> {
    let (ctx, wire) = init_signing_test();
    let cred = Credential::from_base64_secret("user1", SECRET)?;

    // 1200000000 - 3600
    let signer = signer_at(at_timestamp(1199996400));
    let (mut parts, _) = Request::get("https://atmos.example.com/rest/namespace/mydata")
        .body(())?
        .into_parts();
    signer
        .sign_request(&ctx, &mut parts, Some(&cred), Some(Duration::from_secs(3600)))
        .await?;

    assert_eq!(
        wire.outputs.lock().unwrap().clone(),
        vec!["GET\n/rest/namespace/mydata\nuser1\n1200000000".to_string()]
    );

    let expected = ShareUrlSigner::new("https://atmos.example.com")?.share_url(
        "/rest/namespace/mydata",
        &cred,
        1200000000,
    )?;
    assert_eq!(parts.uri, expected);
    assert_eq!(
        parts.uri.query(),
        Some("uid=user1&expires=1200000000&signature=9Z5mA5P4Rlvzy98dhvT4jDQ1rRM%3D")
    );

    // Share urls carry everything in the query.
    assert!(parts.headers.get(DATE).is_none());
    assert!(parts.headers.get(X_EMC_SIGNATURE).is_none());

    Ok(())
}

#[tokio::test]
async fn test_presigned_encodes_uid_and_keeps_query() -> Result<()> {
    let (ctx, _) = init_signing_test();
    let cred = load_static_credential();

    let signer = signer_at(at_timestamp(1199996400));
    let (mut parts, _) = Request::get("https://atmos.example.com/rest/namespace/mydata?offset=1")
        .body(())?
        .into_parts();
    signer
        .sign_request(&ctx, &mut parts, Some(&cred), Some(Duration::from_secs(3600)))
        .await?;

    assert_eq!(
        parts.uri.query(),
        Some("offset=1&uid=6039ac182f194e15b9261d73ce044939%2Fuser1&expires=1200000000&signature=e1DaWOVCkp5rR1QYso1BnddTkoo%3D")
    );

    Ok(())
}

#[tokio::test]
async fn test_presigned_resign_replaces_query() -> Result<()> {
    let (ctx, _) = init_signing_test();
    let cred = Credential::from_base64_secret("user1", SECRET)?;

    let (mut parts, _) = Request::get("https://atmos.example.com/rest/namespace/mydata")
        .body(())?
        .into_parts();
    signer_at(at_timestamp(1199990000))
        .sign_request(&ctx, &mut parts, Some(&cred), Some(Duration::from_secs(60)))
        .await?;
    signer_at(at_timestamp(1199996400))
        .sign_request(&ctx, &mut parts, Some(&cred), Some(Duration::from_secs(3600)))
        .await?;

    assert_eq!(
        parts.uri.query(),
        Some("uid=user1&expires=1200000000&signature=9Z5mA5P4Rlvzy98dhvT4jDQ1rRM%3D")
    );

    Ok(())
}

#[tokio::test]
async fn test_share_url_is_not_checked_against_clock() -> Result<()> {
    let cred = load_static_credential();

    // An expiry far in the past still yields a url, atmos is the one rejecting it.
    let url = ShareUrlSigner::new("https://atmos.example.com")?.share_namespace_url(
        "mydata",
        &cred,
        0,
    )?;
    assert!(url.query().unwrap_or_default().contains("expires=0&"));

    Ok(())
}
