use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Categories the API is known to use, in display order.
pub const KNOWN_CATEGORIES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Height,
    Weight,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Id, SortKey::Name, SortKey::Height, SortKey::Weight];

    pub fn next(self) -> Self {
        match self {
            SortKey::Id => SortKey::Name,
            SortKey::Name => SortKey::Height,
            SortKey::Height => SortKey::Weight,
            SortKey::Weight => SortKey::Id,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Height => "height",
            SortKey::Weight => "weight",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "height" => Ok(SortKey::Height),
            "weight" => Ok(SortKey::Weight),
            other => Err(format!(
                "Unknown sort key: {} (expected id, name, height or weight)",
                other
            )),
        }
    }
}

/// A named, contiguous range of identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u8);

impl Generation {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 9;

    pub fn new(number: u8) -> Option<Self> {
        (Self::FIRST..=Self::LAST)
            .contains(&number)
            .then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn range(self) -> RangeInclusive<u32> {
        match self.0 {
            1 => 1..=151,
            2 => 152..=251,
            3 => 252..=386,
            4 => 387..=493,
            5 => 494..=649,
            6 => 650..=721,
            7 => 722..=809,
            8 => 810..=898,
            _ => 899..=1010,
        }
    }

    pub fn contains(self, id: u32) -> bool {
        self.range().contains(&id)
    }

    /// Steps through `None → 1 → 2 → … → 9 → None`.
    pub fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Self::new(Self::FIRST),
            Some(g) => Self::new(g.0 + 1),
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.range();
        write!(f, "Gen {} (#{}-#{})", self.0, range.start(), range.end())
    }
}

impl FromStr for Generation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid generation: {}", s))?;
        Self::new(number).ok_or_else(|| {
            format!(
                "Generation must be between {} and {}, got {}",
                Self::FIRST,
                Self::LAST,
                number
            )
        })
    }
}

/// Everything that decides which items are shown and in what order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Lower-cased, trimmed search text. Empty matches everything.
    pub text: String,
    /// Every selected category must be present on an item. Empty matches everything.
    pub categories: BTreeSet<String>,
    pub generation: Option<Generation>,
    pub sort_by: SortKey,
    pub favorites_only: bool,
}

impl FilterConfig {
    pub fn set_text(&mut self, raw: &str) {
        self.text = raw.trim().to_lowercase();
    }

    /// Adds the category if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle_category(&mut self, category: &str) -> bool {
        if self.categories.remove(category) {
            false
        } else {
            self.categories.insert(category.to_string());
            true
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("id".parse::<SortKey>().unwrap(), SortKey::Id);
        assert_eq!("Name".parse::<SortKey>().unwrap(), SortKey::Name);
        assert_eq!(" height ".parse::<SortKey>().unwrap(), SortKey::Height);
        assert_eq!("WEIGHT".parse::<SortKey>().unwrap(), SortKey::Weight);
        assert!("speed".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_cycle_visits_all() {
        let mut key = SortKey::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(key);
            key = key.next();
        }
        assert_eq!(seen, SortKey::ALL.to_vec());
        assert_eq!(key, SortKey::Id);
    }

    #[test]
    fn test_generation_bounds() {
        assert!(Generation::new(0).is_none());
        assert!(Generation::new(10).is_none());
        let first = Generation::new(1).unwrap();
        assert_eq!(first.range(), 1..=151);
        assert!(first.contains(1));
        assert!(first.contains(151));
        assert!(!first.contains(152));
        assert_eq!(Generation::new(9).unwrap().range(), 899..=1010);
    }

    #[test]
    fn test_generation_ranges_are_contiguous() {
        for n in 1..9 {
            let current = Generation::new(n).unwrap().range();
            let next = Generation::new(n + 1).unwrap().range();
            assert_eq!(current.end() + 1, *next.start());
        }
    }

    #[test]
    fn test_generation_parse() {
        assert_eq!("3".parse::<Generation>().unwrap().number(), 3);
        assert!("0".parse::<Generation>().is_err());
        assert!("ten".parse::<Generation>().is_err());
    }

    #[test]
    fn test_generation_cycle_wraps_to_none() {
        let mut current = None;
        for expected in 1..=9 {
            current = Generation::cycle(current);
            assert_eq!(current.map(Generation::number), Some(expected));
        }
        assert_eq!(Generation::cycle(current), None);
    }

    #[test]
    fn test_set_text_normalizes() {
        let mut config = FilterConfig::default();
        config.set_text("  PiKa  ");
        assert_eq!(config.text, "pika");
    }

    #[test]
    fn test_toggle_category() {
        let mut config = FilterConfig::default();
        assert!(config.toggle_category("fire"));
        assert!(config.categories.contains("fire"));
        assert!(!config.toggle_category("fire"));
        assert!(config.categories.is_empty());
        assert!(config.is_default());
    }
}
