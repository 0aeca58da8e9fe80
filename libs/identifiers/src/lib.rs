//! Identifier codecs for the Halo staff/patient registry.
//!
//! - [`StaffId`]: the composite employee identifier (NIP) that packs role,
//!   gender, birth year/month and a sequence number into 13 digits.
//! - [`IdentityNumber`]: the 16-digit patient identity number.
//!
//! Everything here is pure and allocation-light; decoding never touches I/O.

#![forbid(unsafe_code)]

mod error;
mod identity;
mod staff;

pub use error::{Error, Field, Result};
pub use identity::IdentityNumber;
pub use staff::{Gender, Role, StaffId};
