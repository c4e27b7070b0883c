//! Raw vendor/offer state as delivered by the upstream vendor service.
//!
//! These records are owned by the caller and only read here. Fields that
//! upstream sends as free-form strings (`status`, `type`, `action`, modes)
//! stay strings; the enums below give names to the values the loader cares
//! about.

use serde::{Deserialize, Serialize};

/// Identifier of a vendor record, carried through to the result.
pub type VendorId = i64;

/// One vendor with its offer state. Input unit of the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorOfferState {
    pub id: VendorId,
    pub vendor_info: VendorInfo,
    pub offer_vendor: OfferVendor,

    /// Vendor must be closed because of rider (hurrier) delays.
    #[serde(default)]
    pub vendor_to_close_hurrier_delay: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorInfo {
    pub id: VendorId,

    #[serde(default)]
    pub accepts_pre_order: bool,

    #[serde(default)]
    pub business: Business,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    pub delivery: Delivery,

    #[serde(default)]
    pub with_default_data: bool,

    #[serde(default)]
    pub is_test: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(default)]
    pub types: Vec<String>,

    #[serde(default)]
    pub is_darkstore: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub latitude: f64,
    pub longitude: f64,
}

/// Delivery setup of a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// `OWN_DELIVERY` or `VENDOR_DELIVERY`.
    #[serde(rename = "type")]
    pub delivery_type: String,

    /// `DELIVERY`, `PICK_UP`, `DINE_IN`. Absent means no modes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<String>>,
}

impl Delivery {
    pub fn contains_mode(&self, mode: OfferType) -> bool {
        self.modes
            .as_deref()
            .is_some_and(|modes| modes.iter().any(|m| m == mode.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferVendor {
    pub vendor_id: VendorId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<VendorAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_status: Option<String>,

    pub state: VendorState,
}

/// Availability state reported for the vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorState {
    #[serde(default)]
    pub vendor_id: VendorId,

    /// `OPEN` or `CLOSED`.
    #[serde(default)]
    pub status: String,

    /// `OUTSIDE_WORKING_HOURS`, anything else is a schedule variation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// ISO-8601 offset timestamp at which the current state changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_schedule_variation_id: Option<i32>,
}

/// Pending operational action on the vendor (close, shrink, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorAction {
    pub action: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Offer modes a vendor can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferType {
    Delivery,
    PickUp,
    DineIn,
}

impl OfferType {
    pub fn as_str(self) -> &'static str {
        match self {
            OfferType::Delivery => "DELIVERY",
            OfferType::PickUp => "PICK_UP",
            OfferType::DineIn => "DINE_IN",
        }
    }
}

/// Who fulfils deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorDeliveryType {
    OwnDelivery,
    VendorDelivery,
}

impl VendorDeliveryType {
    pub fn as_str(self) -> &'static str {
        match self {
            VendorDeliveryType::OwnDelivery => "OWN_DELIVERY",
            VendorDeliveryType::VendorDelivery => "VENDOR_DELIVERY",
        }
    }
}

/// Pending actions the loader reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Close,
    Shrink,
}

impl ActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Close => "CLOSE",
            ActionType::Shrink => "SHRINK",
        }
    }

    pub fn is_close(action: Option<&str>) -> bool {
        action == Some(Self::Close.as_str())
    }

    pub fn is_shrink(action: Option<&str>) -> bool {
        action == Some(Self::Shrink.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Open,
    Closed,
    NotAvailable,
}

impl DeliveryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Open => "OPEN",
            DeliveryStatus::Closed => "CLOSED",
            DeliveryStatus::NotAvailable => "NOT_AVAILABLE",
        }
    }
}
