//! Fact derivation: raw vendor record -> [`FactRecord`].

use chrono::{DateTime, TimeZone};

use crate::domain::{
    ActionType, ClassifyError, DerivationRules, FactRecord, OfferType, VendorOfferState,
    opens_later,
};

/// Turns raw vendor records into fact records using a fixed rule set.
///
/// Pure: the only time-dependent fact (`opens_later`) is computed against the
/// `now` passed in by the caller.
#[derive(Debug, Clone, Default)]
pub struct InputLoader {
    rules: DerivationRules,
}

impl InputLoader {
    pub fn new(rules: DerivationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &DerivationRules {
        &self.rules
    }

    /// Derives the facts of one vendor.
    ///
    /// Fails only when the vendor is closed and its `until` timestamp is
    /// malformed.
    pub fn derive_facts<Tz: TimeZone>(
        &self,
        raw: &VendorOfferState,
        now: &DateTime<Tz>,
    ) -> Result<FactRecord, ClassifyError> {
        let delivery = &raw.vendor_info.delivery;
        let state = &raw.offer_vendor.state;
        let action = raw.offer_vendor.action.as_ref().map(|a| a.action.as_str());

        let is_open =
            delivery.contains_mode(OfferType::Delivery) && state.status == self.rules.open_status;
        let is_delivery = is_open && delivery.delivery_type == self.rules.own_delivery_type;

        Ok(FactRecord {
            id: raw.id,
            is_open,
            is_delivery,
            is_pickup: delivery.contains_mode(OfferType::PickUp),
            opens_later: opens_later(is_open, state.until.as_deref(), now)?,
            // Working hours are not modelled upstream yet; every closed vendor
            // counts as outside them.
            outside_working_hours: true,
            is_shrink_event: ActionType::is_shrink(action),
            is_close_event: ActionType::is_close(action),
            is_schedule_variation: state.active_schedule_variation_id
                == Some(self.rules.schedule_variation_id),
            is_pre_order: raw.vendor_info.accepts_pre_order,
            is_closed_for_hurrier_delay: raw.vendor_to_close_hurrier_delay,
        })
    }

    /// Derives facts for every record, in order, stopping at the first error.
    pub fn load_inputs<Tz: TimeZone>(
        &self,
        raws: &[VendorOfferState],
        now: &DateTime<Tz>,
    ) -> Result<Vec<FactRecord>, ClassifyError> {
        raws.iter().map(|raw| self.derive_facts(raw, now)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VendorAction;
    use crate::domain::vendor::fixtures::{closed_vendor, vendor};
    use chrono::FixedOffset;
    use rstest::rstest;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2023-06-30T10:00:00+02:00").unwrap()
    }

    fn derive(raw: &VendorOfferState) -> FactRecord {
        InputLoader::default().derive_facts(raw, &now()).unwrap()
    }

    #[test]
    fn open_own_delivery_vendor() {
        let facts = derive(&vendor(1));
        assert_eq!(facts.id, 1);
        assert!(facts.is_open);
        assert!(facts.is_delivery);
        assert!(facts.is_pickup);
        assert!(!facts.opens_later);
        assert!(facts.outside_working_hours);
        assert!(!facts.is_shrink_event);
        assert!(!facts.is_close_event);
        assert!(!facts.is_schedule_variation);
        assert!(!facts.is_pre_order);
        assert!(!facts.is_closed_for_hurrier_delay);
    }

    #[test]
    fn open_requires_delivery_mode() {
        let mut raw = vendor(1);
        raw.vendor_info.delivery.modes = Some(vec!["PICK_UP".to_string()]);
        let facts = derive(&raw);
        assert!(!facts.is_open);
        assert!(!facts.is_delivery);
        assert!(facts.is_pickup);
    }

    #[test]
    fn vendor_delivery_is_open_but_not_delivery() {
        let mut raw = vendor(1);
        raw.vendor_info.delivery.delivery_type = "VENDOR_DELIVERY".to_string();
        let facts = derive(&raw);
        assert!(facts.is_open);
        assert!(!facts.is_delivery);
    }

    #[test]
    fn closed_vendor_is_neither_open_nor_delivery() {
        let facts = derive(&closed_vendor(1, None));
        assert!(!facts.is_open);
        assert!(!facts.is_delivery);
        assert!(facts.is_pickup);
        assert!(!facts.opens_later);
    }

    #[test]
    fn no_modes_means_no_pickup() {
        let mut raw = vendor(1);
        raw.vendor_info.delivery.modes = None;
        let facts = derive(&raw);
        assert!(!facts.is_open);
        assert!(!facts.is_pickup);
    }

    #[test]
    fn closed_vendor_opening_later_today() {
        let facts = derive(&closed_vendor(1, Some("2023-06-30T18:00:00+02:00")));
        assert!(facts.opens_later);
    }

    #[test]
    fn open_vendor_ignores_until() {
        let mut raw = vendor(1);
        raw.offer_vendor.state.until = Some("not-a-date".to_string());
        assert!(!derive(&raw).opens_later);
    }

    #[test]
    fn closed_vendor_with_malformed_until_fails() {
        let raw = closed_vendor(1, Some("not-a-date"));
        let err = InputLoader::default()
            .derive_facts(&raw, &now())
            .unwrap_err();
        assert!(matches!(err, ClassifyError::MalformedTimestamp { .. }));
    }

    #[rstest]
    #[case::close(Some("CLOSE"), true, false)]
    #[case::shrink(Some("SHRINK"), false, true)]
    #[case::other(Some("action1"), false, false)]
    #[case::lowercase(Some("close"), false, false)]
    #[case::none(None, false, false)]
    fn pending_actions(
        #[case] action: Option<&str>,
        #[case] close: bool,
        #[case] shrink: bool,
    ) {
        let mut raw = vendor(1);
        raw.offer_vendor.action = action.map(|a| VendorAction {
            action: a.to_string(),
            value: None,
        });
        let facts = derive(&raw);
        assert_eq!(facts.is_close_event, close);
        assert_eq!(facts.is_shrink_event, shrink);
    }

    #[rstest]
    #[case::sentinel(Some(1), true)]
    #[case::other_id(Some(0), false)]
    #[case::larger_id(Some(2), false)]
    #[case::absent(None, false)]
    fn schedule_variation_is_exact_match(#[case] id: Option<i32>, #[case] expected: bool) {
        let mut raw = vendor(1);
        raw.offer_vendor.state.active_schedule_variation_id = id;
        assert_eq!(derive(&raw).is_schedule_variation, expected);
    }

    #[test]
    fn flags_pass_through() {
        let mut raw = vendor(1);
        raw.vendor_info.accepts_pre_order = true;
        raw.vendor_to_close_hurrier_delay = true;
        let facts = derive(&raw);
        assert!(facts.is_pre_order);
        assert!(facts.is_closed_for_hurrier_delay);
    }

    #[test]
    fn custom_rules_change_the_constants() {
        let rules = DerivationRules {
            open_status: "ACTIVE".to_string(),
            own_delivery_type: "PLATFORM".to_string(),
            schedule_variation_id: 7,
        };
        let mut raw = vendor(1);
        raw.offer_vendor.state.status = "ACTIVE".to_string();
        raw.vendor_info.delivery.delivery_type = "PLATFORM".to_string();
        raw.offer_vendor.state.active_schedule_variation_id = Some(7);

        let facts = InputLoader::new(rules).derive_facts(&raw, &now()).unwrap();
        assert!(facts.is_open);
        assert!(facts.is_delivery);
        assert!(facts.is_schedule_variation);

        // The base rule set no longer recognises this vendor as open.
        assert!(!derive(&raw).is_open);
    }

    #[test]
    fn load_inputs_keeps_order_and_fails_fast() {
        let loader = InputLoader::default();
        let raws = vec![vendor(3), vendor(1), vendor(2)];
        let ids: Vec<_> = loader
            .load_inputs(&raws, &now())
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let raws = vec![vendor(1), closed_vendor(2, Some("bad")), vendor(3)];
        assert!(loader.load_inputs(&raws, &now()).is_err());
    }
}
