use crate::models::{ApprovalStatus, Institution, RequesterProfile};

/// Check if an institution may be shown to the requester at all
///
/// This is the first stage of the matching pipeline. Only registered,
/// consenting, approved institutions pass; requesters who want online
/// sessions additionally require virtual counseling.
#[inline]
pub fn is_eligible(institution: &Institution, requester: &RequesterProfile) -> bool {
    if !institution.legally_registered || !institution.consent_to_display {
        return false;
    }

    if institution.approval_status != ApprovalStatus::Approved {
        return false;
    }

    // In-person preference does not gate on a physical address
    if requester.prefers_online() && !institution.offers_virtual {
        return false;
    }

    true
}

/// Keep the eligible institutions, preserving pool order
pub fn filter_eligible<'a>(
    pool: &'a [Institution],
    requester: &RequesterProfile,
) -> Vec<&'a Institution> {
    pool.iter()
        .filter(|institution| is_eligible(institution, requester))
        .collect()
}
