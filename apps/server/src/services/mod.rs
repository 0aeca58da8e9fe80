//! Business logic between the HTTP handlers and the repositories.

mod patients;
mod records;
mod staff;

pub use patients::PatientService;
pub use records::RecordService;
pub use staff::StaffService;

use halo_identifiers::{IdentityNumber, StaffId};

use crate::Result;

/// Decode a wire-form employee id, counting rejections.
fn decode_nip(raw: u64) -> Result<StaffId> {
    Ok(StaffId::from_u64(raw).map_err(crate::metrics::identifier_rejected)?)
}

fn decode_identity_number(raw: u64) -> Result<IdentityNumber> {
    Ok(IdentityNumber::from_u64(raw).map_err(crate::metrics::identifier_rejected)?)
}
