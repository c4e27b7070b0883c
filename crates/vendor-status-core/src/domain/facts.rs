//! Fact schema: the named booleans the decision tree branches on.
//!
//! The original string keys survive only as the display/parse form of
//! [`Fact`]. Inside a built tree every branch holds a `Fact`, and
//! [`FactRecord::get`] is a total match, so traversal never looks up a name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ClassifyError;
use super::vendor::VendorId;

/// One named boolean of the fact schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Fact {
    IsOpen,
    IsDelivery,
    IsPickup,
    OpensLater,
    OutsideWorkingHours,
    IsShrinkEventActive,
    IsCloseEventActive,
    IsScheduleVariation,
    PreOrder,
    IsClosedForHurrierDelay,
}

impl Fact {
    pub const COUNT: usize = 10;

    pub const ALL: [Fact; Fact::COUNT] = [
        Fact::IsOpen,
        Fact::IsDelivery,
        Fact::IsPickup,
        Fact::OpensLater,
        Fact::OutsideWorkingHours,
        Fact::IsShrinkEventActive,
        Fact::IsCloseEventActive,
        Fact::IsScheduleVariation,
        Fact::PreOrder,
        Fact::IsClosedForHurrierDelay,
    ];

    /// Branch key as written in tree definitions.
    pub fn name(self) -> &'static str {
        match self {
            Fact::IsOpen => "IsOpen",
            Fact::IsDelivery => "IsDelivery",
            Fact::IsPickup => "IsPickup",
            Fact::OpensLater => "OpensLater",
            Fact::OutsideWorkingHours => "OutsideWorkingHours",
            Fact::IsShrinkEventActive => "IsShrinkEventActive",
            Fact::IsCloseEventActive => "IsCloseEventActive",
            Fact::IsScheduleVariation => "IsScheduleVariation",
            Fact::PreOrder => "PreOrder",
            Fact::IsClosedForHurrierDelay => "IsClosedForHurrierDelay",
        }
    }

    /// Position in [`Fact::ALL`]; used for fixed-size per-fact tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Fact {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fact::ALL
            .into_iter()
            .find(|fact| fact.name() == s)
            .ok_or_else(|| ClassifyError::UnknownFactName(s.to_string()))
    }
}

/// Facts derived from one raw vendor record.
///
/// Produced once by the loader, read once by the tree, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRecord {
    pub id: VendorId,
    pub is_open: bool,
    pub is_delivery: bool,
    pub is_pickup: bool,
    pub opens_later: bool,
    pub outside_working_hours: bool,
    pub is_shrink_event: bool,
    pub is_close_event: bool,
    pub is_schedule_variation: bool,
    pub is_pre_order: bool,
    pub is_closed_for_hurrier_delay: bool,
}

impl FactRecord {
    /// All facts false. Mostly useful as a starting point in tests.
    pub fn all_false(id: VendorId) -> Self {
        Self {
            id,
            is_open: false,
            is_delivery: false,
            is_pickup: false,
            opens_later: false,
            outside_working_hours: false,
            is_shrink_event: false,
            is_close_event: false,
            is_schedule_variation: false,
            is_pre_order: false,
            is_closed_for_hurrier_delay: false,
        }
    }

    pub fn get(&self, fact: Fact) -> bool {
        match fact {
            Fact::IsOpen => self.is_open,
            Fact::IsDelivery => self.is_delivery,
            Fact::IsPickup => self.is_pickup,
            Fact::OpensLater => self.opens_later,
            Fact::OutsideWorkingHours => self.outside_working_hours,
            Fact::IsShrinkEventActive => self.is_shrink_event,
            Fact::IsCloseEventActive => self.is_close_event,
            Fact::IsScheduleVariation => self.is_schedule_variation,
            Fact::PreOrder => self.is_pre_order,
            Fact::IsClosedForHurrierDelay => self.is_closed_for_hurrier_delay,
        }
    }

    /// Returns a copy with one fact overridden.
    pub fn with(mut self, fact: Fact, value: bool) -> Self {
        let slot = match fact {
            Fact::IsOpen => &mut self.is_open,
            Fact::IsDelivery => &mut self.is_delivery,
            Fact::IsPickup => &mut self.is_pickup,
            Fact::OpensLater => &mut self.opens_later,
            Fact::OutsideWorkingHours => &mut self.outside_working_hours,
            Fact::IsShrinkEventActive => &mut self.is_shrink_event,
            Fact::IsCloseEventActive => &mut self.is_close_event,
            Fact::IsScheduleVariation => &mut self.is_schedule_variation,
            Fact::PreOrder => &mut self.is_pre_order,
            Fact::IsClosedForHurrierDelay => &mut self.is_closed_for_hurrier_delay,
        };
        *slot = value;
        self
    }

    /// Builds a record from a bit mask, bit `i` being `Fact::ALL[i]`.
    pub fn from_bits(id: VendorId, bits: u16) -> Self {
        Fact::ALL
            .into_iter()
            .fold(Self::all_false(id), |record, fact| {
                record.with(fact, bits & (1 << fact.index()) != 0)
            })
    }
}
