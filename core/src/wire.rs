use std::fmt::Debug;

/// Log target used by [`LogSignatureWire`].
pub const SIGNATURE_WIRE_TARGET: &str = "cloudsign::signature";

/// SignatureWire is a diagnostic side channel for the signing process.
///
/// Signers hand every string to sign to [`SignatureWire::output`] and every
/// computed signature to [`SignatureWire::input`]. Implementations must not
/// influence the signing result, and calls from concurrent signers carry no
/// ordering guarantee between each other.
pub trait SignatureWire: Debug + Send + Sync + 'static {
    /// Returns whether this wire wants to receive data at all.
    fn enabled(&self) -> bool {
        true
    }

    /// Receive the string to sign produced by a canonical request builder.
    fn output(&self, string_to_sign: &str);

    /// Receive the signature computed over the string to sign.
    fn input(&self, signature: &str);
}

/// NoopSignatureWire drops everything.
///
/// This is used when no signature wire is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSignatureWire;

impl SignatureWire for NoopSignatureWire {
    fn enabled(&self) -> bool {
        false
    }

    fn output(&self, _: &str) {}

    fn input(&self, _: &str) {}
}

/// LogSignatureWire forwards the signing data to the `log` facade at debug
/// level under the [`SIGNATURE_WIRE_TARGET`] target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSignatureWire;

impl SignatureWire for LogSignatureWire {
    fn enabled(&self) -> bool {
        log::log_enabled!(target: SIGNATURE_WIRE_TARGET, log::Level::Debug)
    }

    fn output(&self, string_to_sign: &str) {
        log::debug!(target: SIGNATURE_WIRE_TARGET, ">> {string_to_sign:?}");
    }

    fn input(&self, signature: &str) {
        log::debug!(target: SIGNATURE_WIRE_TARGET, "<< {signature}");
    }
}
