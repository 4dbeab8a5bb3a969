use super::patterns::SdkErrorCode;

/// Messages observed from the upstream, labeled with the code they must classify to.
///
/// Every entry must match exactly one row of the pattern table. New upstream
/// wording goes here first, then into the table.
pub const LABELED_MESSAGES: &[(&str, SdkErrorCode)] = &[
    ("Invalid token", SdkErrorCode::TokenInvalid),
    ("Token has expired", SdkErrorCode::TokenInvalid),
    ("The access token provided is invalid or has expired", SdkErrorCode::TokenInvalid),
    ("Unauthorized", SdkErrorCode::TokenInvalid),
    ("Expired bearer token supplied", SdkErrorCode::TokenInvalid),
    ("Invalid Username or Password", SdkErrorCode::InvalidCredentials),
    ("Invalid login credentials supplied", SdkErrorCode::InvalidCredentials),
    ("The password is incorrect", SdkErrorCode::InvalidCredentials),
    ("Account has been locked after 5 failed attempts", SdkErrorCode::InvalidCredentials),
    ("No Records Found", SdkErrorCode::NotFound),
    ("No record found for registration number KCA 123A", SdkErrorCode::NotFound),
    ("Record not found", SdkErrorCode::NotFound),
    ("Certificate number C12345678 does not exist", SdkErrorCode::NotFound),
    ("Vehicle with chassis number AHTFR22G106012345 does not exist", SdkErrorCode::NotFound),
    (
        "There is a gap of 12 days between the previous policy expiry and the new cover start date for vehicle KCB 456B",
        SdkErrorCode::CoverageGap,
    ),
    (
        "Insurance gap detected: previous cover for KDA 789C ended 45 days before the requested commencement date",
        SdkErrorCode::CoverageGap,
    ),
    ("Coverage gap of 1 day found for vehicle KBX 100X", SdkErrorCode::CoverageGap),
    (
        "Double Insurance: vehicle KCA 123A has an active certificate C1234567 valid until 31/12/2024",
        SdkErrorCode::DoubleInsurance,
    ),
    (
        "Vehicle KBZ 001Z already has an active cover with another insurer",
        SdkErrorCode::DoubleInsurance,
    ),
    ("Certificate C12345678 has already been cancelled", SdkErrorCode::CertificateCancelled),
    ("The certificate is already canceled", SdkErrorCode::CertificateCancelled),
    ("Insufficient certificate stock for Type A certificates", SdkErrorCode::InsufficientStock),
    ("No stock available for the selected certificate type", SdkErrorCode::InsufficientStock),
    ("Certificate stock exhausted for member company 23", SdkErrorCode::InsufficientStock),
    ("Duplicate transaction detected for policy POL/2024/001", SdkErrorCode::DuplicateRequest),
    ("Duplicate policy number", SdkErrorCode::DuplicateRequest),
    ("Commencing date cannot be in the past", SdkErrorCode::InvalidCoverPeriod),
    ("Expiry date must be after the commencing date", SdkErrorCode::InvalidCoverPeriod),
    (
        "Cover end date should not exceed 12 months from the start date",
        SdkErrorCode::InvalidCoverPeriod,
    ),
    ("VehicleRegistrationNumber is required", SdkErrorCode::ValidationFailed),
    ("Policy holder KRA PIN is not in the correct format", SdkErrorCode::ValidationFailed),
    ("Invalid vehicle registration number KCA12", SdkErrorCode::ValidationFailed),
    ("Email cannot be empty", SdkErrorCode::ValidationFailed),
    ("SumInsured is mandatory", SdkErrorCode::ValidationFailed),
    ("An unexpected error occurred. Please try again later", SdkErrorCode::UpstreamUnavailable),
    ("Service temporarily unavailable", SdkErrorCode::UpstreamUnavailable),
    ("Internal Server Error", SdkErrorCode::UpstreamUnavailable),
];

/// Upstream text that no pattern is expected to recognize
pub const UNRECOGNIZED_MESSAGES: &[&str] = &[
    "Something odd happened",
    "Request failed with HTTP status 500",
    "",
];
