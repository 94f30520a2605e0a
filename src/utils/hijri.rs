use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

const HIJRI_MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

pub fn hijri_month_name(month: usize) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| HIJRI_MONTH_NAMES.get(i))
        .copied()
        .unwrap_or("Unknown")
}

/// Hijri rendering of `date`, shifted by `offset_days` for local moon
/// sighting. `None` when the date is outside the converter's range.
pub fn hijri_string(date: NaiveDate, offset_days: i32) -> Option<String> {
    let adjusted = date + Duration::days(offset_days as i64);
    HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    )
    .ok()
    .map(|hd| format!("{} {} {}", hd.day(), hijri_month_name(hd.month()), hd.year()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(hijri_month_name(1), "Muharram");
        assert_eq!(hijri_month_name(9), "Ramadan");
        assert_eq!(hijri_month_name(0), "Unknown");
        assert_eq!(hijri_month_name(13), "Unknown");
    }
}
