//! Days until a customer's next birthday and gift eligibility.

use brew_core::loyalty::{BirthdayInfo, BirthdayStatus, MonthDay, GIFT_WINDOW_DAYS};
use chrono::{Datelike, NaiveDate};
use tracing::warn;

pub fn birthday_status(birthday: Option<MonthDay>, today: NaiveDate) -> BirthdayStatus {
    let Some(birthday) = birthday else {
        return BirthdayStatus::NoData;
    };

    let next_occurrence = match birthday.in_year(today.year()) {
        Some(date) if date >= today => Some(date),
        _ => birthday.in_year(today.year() + 1),
    };
    let Some(next_occurrence) = next_occurrence else {
        // Only reachable at the edge of the representable calendar.
        warn!(%birthday, %today, "Birthday occurrence out of calendar range");
        return BirthdayStatus::NoData;
    };

    let days_until = (next_occurrence - today).num_days().max(0) as u32;
    BirthdayStatus::Upcoming(BirthdayInfo {
        birthday,
        next_occurrence,
        days_until,
        is_eligible_for_gift: days_until <= GIFT_WINDOW_DAYS,
    })
}
