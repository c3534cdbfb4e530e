//! Loyalty program domain types: tiers, progress, birthdays.
//!
//! Four tiers keyed on accumulated points: Bronze → Silver → Gold → Platinum.
//! Tier and cashback are always derived from points, never stored.

use crate::error::{BrewError, BrewResult};
use crate::types::CustomerPaymentMethod;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Days before a birthday during which a gift offer is presented.
pub const GIFT_WINDOW_DAYS: u32 = 7;

// ─── Tier System ────────────────────────────────────────────────────────────

/// Loyalty tier levels with escalating benefits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LoyaltyTier {
    /// Entry level. 1% cashback.
    Bronze,
    /// 100 points. 2% cashback.
    Silver,
    /// 300 points. 3% cashback, priority service.
    Gold,
    /// 500 points. 5% cashback, exclusive events.
    Platinum,
}

impl LoyaltyTier {
    /// All tiers in ascending order.
    pub const ALL: [LoyaltyTier; 4] = [
        LoyaltyTier::Bronze,
        LoyaltyTier::Silver,
        LoyaltyTier::Gold,
        LoyaltyTier::Platinum,
    ];

    /// Points required to reach this tier.
    pub fn threshold(&self) -> u32 {
        match self {
            LoyaltyTier::Bronze => 0,
            LoyaltyTier::Silver => 100,
            LoyaltyTier::Gold => 300,
            LoyaltyTier::Platinum => 500,
        }
    }

    pub fn cashback_percentage(&self) -> u32 {
        match self {
            LoyaltyTier::Bronze => 1,
            LoyaltyTier::Silver => 2,
            LoyaltyTier::Gold => 3,
            LoyaltyTier::Platinum => 5,
        }
    }

    /// The tier immediately above, if any.
    pub fn next(&self) -> Option<LoyaltyTier> {
        match self {
            LoyaltyTier::Bronze => Some(LoyaltyTier::Silver),
            LoyaltyTier::Silver => Some(LoyaltyTier::Gold),
            LoyaltyTier::Gold => Some(LoyaltyTier::Platinum),
            LoyaltyTier::Platinum => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoyaltyTier::Bronze => "bronze",
            LoyaltyTier::Silver => "silver",
            LoyaltyTier::Gold => "gold",
            LoyaltyTier::Platinum => "platinum",
        }
    }
}

impl Default for LoyaltyTier {
    fn default() -> Self {
        LoyaltyTier::Bronze
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoyaltyTier {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoyaltyTier::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| BrewError::InvalidArgument(format!("unknown loyalty tier '{}'", s)))
    }
}

/// Tier above the current one, or the `max` sentinel once at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum NextTier {
    Tier(LoyaltyTier),
    Max,
}

impl From<NextTier> for String {
    fn from(next: NextTier) -> Self {
        match next {
            NextTier::Tier(tier) => tier.as_str().to_string(),
            NextTier::Max => "max".to_string(),
        }
    }
}

impl TryFrom<String> for NextTier {
    type Error = BrewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "max" {
            Ok(NextTier::Max)
        } else {
            value.parse().map(NextTier::Tier)
        }
    }
}

/// Tier assignment and progress toward the next tier for a points balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierInfo {
    pub points: u32,
    pub tier: LoyaltyTier,
    pub next_tier: NextTier,
    pub points_to_next_tier: u32,
    /// 0..100. Always 100 at the top tier.
    pub progress_percentage: f64,
}

// ─── Birthdays ──────────────────────────────────────────────────────────────

/// Month and day of a birthday. The year of a stored birthdate carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> BrewResult<Self> {
        // 2000 is a leap year, so Feb 29 is accepted.
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(BrewError::InvalidArgument(format!(
                "invalid month/day {:02}-{:02}",
                month, day
            )));
        }
        Ok(Self { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The date this month/day falls on in `year`. Feb 29 lands on Mar 1
    /// in non-leap years.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day).or_else(|| {
            if self.month == 2 && self.day == 29 {
                NaiveDate::from_ymd_opt(year, 3, 1)
            } else {
                None
            }
        })
    }
}

impl From<NaiveDate> for MonthDay {
    fn from(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Accepts a full date (`1990-10-22`) or a bare month/day (`10-22`).
impl FromStr for MonthDay {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(date.into());
        }
        let malformed = || BrewError::InvalidArgument(format!("malformed birthday '{}'", s));
        let (month, day) = s.split_once('-').ok_or_else(malformed)?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        let day: u32 = day.parse().map_err(|_| malformed())?;
        MonthDay::new(month, day)
    }
}

impl From<MonthDay> for String {
    fn from(md: MonthDay) -> Self {
        md.to_string()
    }
}

impl TryFrom<String> for MonthDay {
    type Error = BrewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Next birthday occurrence relative to a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayInfo {
    pub birthday: MonthDay,
    pub next_occurrence: NaiveDate,
    pub days_until: u32,
    pub is_eligible_for_gift: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BirthdayStatus {
    /// No birthday on record; nothing was computed.
    NoData,
    Upcoming(BirthdayInfo),
}

impl BirthdayStatus {
    pub fn is_eligible_for_gift(&self) -> bool {
        match self {
            BirthdayStatus::NoData => false,
            BirthdayStatus::Upcoming(info) => info.is_eligible_for_gift,
        }
    }

    pub fn days_until(&self) -> Option<u32> {
        match self {
            BirthdayStatus::NoData => None,
            BirthdayStatus::Upcoming(info) => Some(info.days_until),
        }
    }
}

// ─── Summary ────────────────────────────────────────────────────────────────

/// Everything the customer loyalty tab shows, computed for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltySummary {
    pub customer_id: i64,
    #[serde(flatten)]
    pub tier_info: TierInfo,
    pub cashback_percentage: u32,
    pub benefits: Vec<String>,
    pub birthday: BirthdayStatus,
    pub payment_methods: Vec<CustomerPaymentMethod>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_strictly_increasing() {
        for pair in LoyaltyTier::ALL.windows(2) {
            assert!(pair[0].threshold() < pair[1].threshold());
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
        assert_eq!(LoyaltyTier::Platinum.next(), None);
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!("Gold".parse::<LoyaltyTier>().unwrap(), LoyaltyTier::Gold);
        assert!("diamond".parse::<LoyaltyTier>().is_err());
    }

    #[test]
    fn test_next_tier_serializes_as_string() {
        assert_eq!(serde_json::to_string(&NextTier::Max).unwrap(), "\"max\"");
        assert_eq!(
            serde_json::to_string(&NextTier::Tier(LoyaltyTier::Silver)).unwrap(),
            "\"silver\""
        );
        let parsed: NextTier = serde_json::from_str("\"gold\"").unwrap();
        assert_eq!(parsed, NextTier::Tier(LoyaltyTier::Gold));
    }

    #[test]
    fn test_month_day_parse() {
        let md: MonthDay = "1990-10-22".parse().unwrap();
        assert_eq!((md.month(), md.day()), (10, 22));
        let md: MonthDay = "02-29".parse().unwrap();
        assert_eq!(md.to_string(), "02-29");
        assert!("13-01".parse::<MonthDay>().is_err());
        assert!("04-31".parse::<MonthDay>().is_err());
        assert!("tomorrow".parse::<MonthDay>().is_err());
    }

    #[test]
    fn test_leap_day_in_common_year() {
        let md = MonthDay::new(2, 29).unwrap();
        assert_eq!(md.in_year(2023), NaiveDate::from_ymd_opt(2023, 3, 1));
        assert_eq!(md.in_year(2024), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_birthday_status_no_data() {
        let status = BirthdayStatus::NoData;
        assert!(!status.is_eligible_for_gift());
        assert_eq!(status.days_until(), None);
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({"status": "no_data"})
        );
    }
}
