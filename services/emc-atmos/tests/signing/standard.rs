use std::time::Duration;

use anyhow::Result;
use cloudsign_core::hash::base64_decode;
use cloudsign_core::{SignRequest, Signer, SigningRequest};
use cloudsign_emc_atmos::{
    sign_string, string_to_sign, RequestSigner, StaticCredentialProvider, X_EMC_SIGNATURE,
    X_EMC_UID,
};
use http::header::DATE;
use http::Request;
use pretty_assertions::assert_eq;

use super::{init_signing_test, load_static_credential, signer_at, signing_time, SECRET, UID};

fn get_parts(uri: &str) -> http::request::Parts {
    Request::get(uri).body(()).unwrap().into_parts().0
}

#[tokio::test]
async fn test_sign_request_with_range() -> Result<()> {
    let (ctx, wire) = init_signing_test();
    let cred = load_static_credential();

    let mut parts = get_parts("https://atmos.example.com/rest/namespace/MyData");
    parts.headers.insert("range", "Bytes=0-9".parse()?);

    signer_at(signing_time())
        .sign_request(&ctx, &mut parts, Some(&cred), None)
        .await?;

    let expected = format!(
        "GET\n\nbytes=0-9\nThu, 05 Jun 2008 16:38:19 GMT\n/rest/namespace/mydata\nx-emc-uid:{UID}"
    );
    assert_eq!(wire.outputs.lock().unwrap().clone(), vec![expected.clone()]);

    let signature = parts.headers[X_EMC_SIGNATURE].to_str()?.to_string();
    assert_eq!(wire.inputs.lock().unwrap().clone(), vec![signature.clone()]);
    assert_eq!(
        signature,
        sign_string(&expected, &base64_decode(SECRET)?)?
    );

    Ok(())
}

#[tokio::test]
async fn test_signed_date_is_sent_date() -> Result<()> {
    let (ctx, wire) = init_signing_test();
    let cred = load_static_credential();

    let mut parts = get_parts("https://atmos.example.com/rest/objects");
    RequestSigner::new()
        .sign_request(&ctx, &mut parts, Some(&cred), None)
        .await?;

    let sent = parts.headers[DATE].to_str()?.to_string();
    chrono::DateTime::parse_from_rfc2822(&sent)?;

    let signed = wire.outputs.lock().unwrap()[0].clone();
    assert_eq!(signed.lines().nth(3), Some(sent.as_str()));

    Ok(())
}

#[tokio::test]
async fn test_resign_replaces_signature() -> Result<()> {
    let (ctx, _) = init_signing_test();
    let cred = load_static_credential();
    let signer = signer_at(signing_time());

    let mut parts = get_parts("https://atmos.example.com/rest/objects");
    parts.headers.insert("x-emc-meta", "part1=buy".parse()?);
    signer
        .sign_request(&ctx, &mut parts, Some(&cred), None)
        .await?;
    let first = parts.headers[X_EMC_SIGNATURE].clone();

    // Retrying signs the exact same request again.
    signer
        .sign_request(&ctx, &mut parts, Some(&cred), None)
        .await?;

    assert_eq!(parts.headers.get_all(X_EMC_SIGNATURE).iter().count(), 1);
    assert_eq!(parts.headers.get_all(X_EMC_UID).iter().count(), 1);
    assert_eq!(parts.headers.get_all(DATE).iter().count(), 1);
    assert_eq!(parts.headers[X_EMC_SIGNATURE], first);

    Ok(())
}

#[tokio::test]
async fn test_signature_is_deterministic() -> Result<()> {
    let (ctx, _) = init_signing_test();
    let cred = load_static_credential();
    let signer = signer_at(signing_time());

    let mut signatures = Vec::new();
    for _ in 0..3 {
        let mut parts = get_parts("https://atmos.example.com/rest/objects");
        parts.headers.insert("x-emc-meta", "part1=buy".parse()?);
        signer
            .sign_request(&ctx, &mut parts, Some(&cred), None)
            .await?;
        signatures.push(parts.headers[X_EMC_SIGNATURE].to_str()?.to_string());
    }

    assert!(signatures.windows(2).all(|w| w[0] == w[1]));
    Ok(())
}

#[tokio::test]
async fn test_header_insertion_order_does_not_matter() -> Result<()> {
    let (ctx, _) = init_signing_test();
    let cred = load_static_credential();
    let signer = signer_at(signing_time());

    let mut a = get_parts("https://atmos.example.com/rest/objects");
    a.headers.insert("x-emc-b", "1".parse()?);
    a.headers.insert("x-emc-a", "2".parse()?);
    a.headers.insert("content-type", "text/plain".parse()?);

    let mut b = get_parts("https://atmos.example.com/rest/objects");
    b.headers.insert("content-type", "text/plain".parse()?);
    b.headers.insert("x-emc-a", "2".parse()?);
    b.headers.insert("x-emc-b", "1".parse()?);

    signer.sign_request(&ctx, &mut a, Some(&cred), None).await?;
    signer.sign_request(&ctx, &mut b, Some(&cred), None).await?;

    assert_eq!(a.headers[X_EMC_SIGNATURE], b.headers[X_EMC_SIGNATURE]);
    Ok(())
}

#[tokio::test]
async fn test_tampering_changes_signature() -> Result<()> {
    let (ctx, wire) = init_signing_test();
    let cred = load_static_credential();

    let mut parts = get_parts("https://atmos.example.com/rest/namespace/mydata");
    signer_at(signing_time())
        .sign_request(&ctx, &mut parts, Some(&cred), None)
        .await?;
    let signature = parts.headers[X_EMC_SIGNATURE].to_str()?.to_string();

    // Any change of a signed field after signing must not verify.
    parts.headers.insert(DATE, "Thu, 05 Jun 2008 16:38:20 GMT".parse()?);
    let tampered = string_to_sign(&SigningRequest::build(&parts)?)?;
    assert_ne!(tampered, wire.outputs.lock().unwrap()[0]);
    assert_ne!(sign_string(&tampered, &cred.secret_key)?, signature);

    Ok(())
}

#[tokio::test]
async fn test_signer_with_static_provider() -> Result<()> {
    let (ctx, _) = init_signing_test();
    let signer = Signer::new(
        ctx,
        StaticCredentialProvider::new(UID, SECRET),
        signer_at(signing_time()),
    );

    let (mut parts, _) = Request::post("https://atmos.example.com/rest/objects")
        .header("content-type", "application/octet-stream")
        .header("x-emc-date", "Thu, 01 Jan 1970 00:00:00 GMT")
        .header("x-emc-groupacl", "other=NONE")
        .header("x-emc-listable-meta", "part4/part7/part8=quick")
        .header("x-emc-meta", "part1=buy")
        .header("x-emc-useracl", "john=FULL_CONTROL,mary=WRITE")
        .body(())?
        .into_parts();
    signer.sign(&mut parts, None).await?;

    assert_eq!(parts.headers[X_EMC_SIGNATURE], "WHJo1MFevMnK4jCthJ974L3YHoo=");
    Ok(())
}

#[tokio::test]
async fn test_concurrent_signing() -> Result<()> {
    let (ctx, _) = init_signing_test();
    let signer = Signer::new(
        ctx,
        StaticCredentialProvider::new(UID, SECRET),
        signer_at(signing_time()),
    );

    let mut handles = Vec::new();
    for i in 0..8 {
        let signer = signer.clone();
        handles.push(tokio::spawn(async move {
            let mut parts = get_parts(&format!("https://atmos.example.com/rest/namespace/f{}", i % 2));
            signer.sign(&mut parts, None).await.map(|_| {
                (
                    i % 2,
                    parts.headers[X_EMC_SIGNATURE].to_str().unwrap().to_string(),
                )
            })
        }));
    }

    let mut results = Vec::new();
    for h in handles {
        results.push(h.await??);
    }
    for (path, signature) in &results {
        let same_path = results.iter().filter(|(p, _)| p == path);
        assert!(same_path.clone().all(|(_, s)| s == signature));
    }
    assert_ne!(
        results.iter().find(|(p, _)| *p == 0).map(|(_, s)| s),
        results.iter().find(|(p, _)| *p == 1).map(|(_, s)| s)
    );

    Ok(())
}

#[tokio::test]
async fn test_expires_in_out_of_range() -> Result<()> {
    let (ctx, _) = init_signing_test();
    let cred = load_static_credential();

    let mut parts = get_parts("https://atmos.example.com/rest/objects");
    let err = RequestSigner::new()
        .sign_request(&ctx, &mut parts, Some(&cred), Some(Duration::MAX))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), cloudsign_core::ErrorKind::RequestInvalid);

    Ok(())
}
