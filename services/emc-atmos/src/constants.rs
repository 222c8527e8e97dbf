use http::header::HeaderName;
use http::header::RANGE;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Headers used by atmos.
pub const X_EMC_UID: &str = "x-emc-uid";
pub const X_EMC_SIGNATURE: &str = "x-emc-signature";
pub const X_EMC_DATE: &str = "x-emc-date";

/// Prefix of the headers that take part in the canonicalized headers.
pub const X_EMC_PREFIX: &str = "x-emc-";

/// Headers whose value is signed positionally, one line each, even when absent.
pub const PASS_THROUGH_HEADERS: [HeaderName; 1] = [RANGE];

// Query parameters of a share url.
pub const QUERY_UID: &str = "uid";
pub const QUERY_EXPIRES: &str = "expires";
pub const QUERY_SIGNATURE: &str = "signature";

/// Path prefix of the namespace interface.
pub const NAMESPACE_PREFIX: &str = "/rest/namespace/";

// Env values used by atmos.
pub const CLOUDSIGN_ATMOS_UID: &str = "CLOUDSIGN_ATMOS_UID";
pub const CLOUDSIGN_ATMOS_SECRET_KEY: &str = "CLOUDSIGN_ATMOS_SECRET_KEY";
pub const CLOUDSIGN_ATMOS_ENDPOINT: &str = "CLOUDSIGN_ATMOS_ENDPOINT";

/// Query values are encoded with every non-alphanumeric byte escaped.
pub const QUERY_ENCODE_SET: &AsciiSet = NON_ALPHANUMERIC;

/// Object names keep `/` and the unreserved characters.
pub const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');
