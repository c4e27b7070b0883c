//! Domain model: raw vendor records, facts, statuses, errors, and the
//! time rules shared by the loader.

pub mod errors;
pub mod facts;
pub mod rules;
pub mod status;
pub mod until;
pub mod vendor;

pub use errors::ClassifyError;
pub use facts::{Fact, FactRecord};
pub use rules::DerivationRules;
pub use status::{TreeResult, VendorStatus};
pub use until::{UntilVendor, is_same_day, opens_later, parse_until, resolve_until};
pub use vendor::{
    ActionType, Address, Business, Delivery, DeliveryStatus, OfferType, OfferVendor, VendorAction,
    VendorDeliveryType, VendorId, VendorInfo, VendorOfferState, VendorState,
};
