use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The five daily prayers, in the order they are prayed.
///
/// The declaration order is the display order and also decides ties in
/// the reports, so it must not be rearranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerType {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerType {
    pub const ALL: [PrayerType; 5] = [
        PrayerType::Fajr,
        PrayerType::Dhuhr,
        PrayerType::Asr,
        PrayerType::Maghrib,
        PrayerType::Isha,
    ];

    /// Position in `ALL`, used to index per-prayer arrays.
    pub fn index(self) -> usize {
        match self {
            PrayerType::Fajr => 0,
            PrayerType::Dhuhr => 1,
            PrayerType::Asr => 2,
            PrayerType::Maghrib => 3,
            PrayerType::Isha => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "fajr",
            PrayerType::Dhuhr => "dhuhr",
            PrayerType::Asr => "asr",
            PrayerType::Maghrib => "maghrib",
            PrayerType::Isha => "isha",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "Fajr",
            PrayerType::Dhuhr => "Dhuhr",
            PrayerType::Asr => "Asr",
            PrayerType::Maghrib => "Maghrib",
            PrayerType::Isha => "Isha",
        }
    }
}

impl std::fmt::Display for PrayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fajr" | "subh" => Ok(PrayerType::Fajr),
            "dhuhr" | "zuhr" | "dhuhur" | "duhr" => Ok(PrayerType::Dhuhr),
            "asr" => Ok(PrayerType::Asr),
            "maghrib" => Ok(PrayerType::Maghrib),
            "isha" => Ok(PrayerType::Isha),
            _ => Err(anyhow::anyhow!("Unknown prayer type: {}", s)),
        }
    }
}

/// Parse a comma separated prayer list such as `fajr,asr`.
///
/// Duplicates are dropped while keeping the first occurrence.
pub fn parse_prayer_list(s: &str) -> anyhow::Result<Vec<PrayerType>> {
    let mut prayers = Vec::new();
    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let prayer = PrayerType::from_str(part)?;
        if !prayers.contains(&prayer) {
            prayers.push(prayer);
        }
    }
    Ok(prayers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        assert_eq!("Zuhr".parse::<PrayerType>().unwrap(), PrayerType::Dhuhr);
        assert_eq!(" isha ".parse::<PrayerType>().unwrap(), PrayerType::Isha);
        assert!("witr".parse::<PrayerType>().is_err());
    }

    #[test]
    fn index_follows_declaration_order() {
        for (i, prayer) in PrayerType::ALL.iter().enumerate() {
            assert_eq!(prayer.index(), i);
        }
        assert!(PrayerType::Fajr < PrayerType::Isha);
    }

    #[test]
    fn prayer_list_drops_duplicates() {
        let list = parse_prayer_list("asr, fajr,asr,,").unwrap();
        assert_eq!(list, vec![PrayerType::Asr, PrayerType::Fajr]);
        assert!(parse_prayer_list("fajr,nope").is_err());
    }
}
