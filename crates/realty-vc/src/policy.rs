//! Claims policy: the content checks applied after a credential's
//! signature has been verified.

use crate::claims::ClaimSet;
use crate::verifier::RejectReason;

/// Sentinel value of `fraudConvictionRecordStatus` that disqualifies a
/// broker. Compared case-insensitively.
pub const DISQUALIFYING_RECORD_STATUS: &str = "Exists";

/// Evaluate the claims policy over a verified claim set.
///
/// Absence of a policy claim is treated as "not asserted" and passes;
/// callers that require a claim to be present must check for it before
/// verification. Only explicit negative assertions reject.
pub fn evaluate(claims: &ClaimSet) -> Option<RejectReason> {
    if claims.is_licensed_broker == Some(false) {
        return Some(RejectReason::LicenseInvalid);
    }

    if let Some(status) = &claims.fraud_conviction_record_status {
        if status.eq_ignore_ascii_case(DISQUALIFYING_RECORD_STATUS) {
            return Some(RejectReason::DisqualifyingRecord);
        }
    }

    None
}
