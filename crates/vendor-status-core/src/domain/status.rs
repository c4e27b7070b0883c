//! Classification outcome.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::vendor::VendorId;

/// Final availability label of a vendor.
///
/// Serialized as SCREAMING_SNAKE_CASE to match what the serving layer
/// expects (`DELIVERY_ONLINE`, `OPENS_AT`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorStatus {
    DeliveryOnline,
    PickUpOnline,
    ProgramOrderOpensAt,
    OpensAt,
    CduDefault,
    DineInOnline,
    PreOrderOnline,
    ClosedTemporarily,
    WithoutDelivery,
    OpenDefault,
    Closed,
    ClosedDefault,
}

impl VendorStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VendorStatus::DeliveryOnline => "DELIVERY_ONLINE",
            VendorStatus::PickUpOnline => "PICK_UP_ONLINE",
            VendorStatus::ProgramOrderOpensAt => "PROGRAM_ORDER_OPENS_AT",
            VendorStatus::OpensAt => "OPENS_AT",
            VendorStatus::CduDefault => "CDU_DEFAULT",
            VendorStatus::DineInOnline => "DINE_IN_ONLINE",
            VendorStatus::PreOrderOnline => "PRE_ORDER_ONLINE",
            VendorStatus::ClosedTemporarily => "CLOSED_TEMPORARILY",
            VendorStatus::WithoutDelivery => "WITHOUT_DELIVERY",
            VendorStatus::OpenDefault => "OPEN_DEFAULT",
            VendorStatus::Closed => "CLOSED",
            VendorStatus::ClosedDefault => "CLOSED_DEFAULT",
        }
    }
}

impl fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified vendor. The batch runner returns these in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeResult {
    pub id: VendorId,
    pub status: VendorStatus,
}
