use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::MilestoneTemplateId;
use crate::enums::PeriodicityUnit;

/// Reusable definition of a recurring obligation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MilestoneTemplate {
    pub id: MilestoneTemplateId,
    pub name: String,
    pub frequency: u32,
    pub periodicity: PeriodicityUnit,
    pub valid_from: NaiveDate,
    pub valid_until: Option<NaiveDate>,
    pub description: Option<String>,
    pub mandatory: bool,
}

impl MilestoneTemplate {
    /// Whether `date` falls inside the template's validity window (both ends inclusive).
    #[must_use]
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date >= self.valid_from && self.valid_until.is_none_or(|until| date <= until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(until: Option<NaiveDate>) -> MilestoneTemplate {
        MilestoneTemplate {
            id: 1,
            name: "IVA mensual".into(),
            frequency: 1,
            periodicity: PeriodicityUnit::Month,
            valid_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            valid_until: until,
            description: None,
            mandatory: true,
        }
    }

    #[test]
    fn open_ended_window() {
        let t = template(None);
        assert!(t.is_active_on(NaiveDate::from_ymd_opt(2030, 5, 1).unwrap()));
        assert!(!t.is_active_on(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
    }

    #[test]
    fn closed_window_is_inclusive() {
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let t = template(Some(end));
        assert!(t.is_active_on(end));
        assert!(!t.is_active_on(end.succ_opt().unwrap()));
    }
}
