use serde::{Deserialize, Serialize};

/// A single named base stat, e.g. `hp: 45`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: u32,
}

/// One catalog entry, normalized from a raw detail record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    /// Metres.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    pub categories: Vec<String>,
    pub image: String,
    pub abilities: Vec<String>,
    pub stats: Vec<Stat>,
}

/// Upper bound used when drawing stat bars.
pub const STAT_SCALE_MAX: u32 = 200;

impl Item {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            height: 0.0,
            weight: 0.0,
            categories: Vec::new(),
            image: String::new(),
            abilities: Vec::new(),
            stats: Vec::new(),
        }
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Name with the first letter upper-cased, as shown in headings.
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

impl Stat {
    /// Fill ratio in `0.0..=1.0` against [`STAT_SCALE_MAX`].
    pub fn ratio(&self) -> f64 {
        (self.value as f64 / STAT_SCALE_MAX as f64).min(1.0)
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Hyphenated API names read better with a space: `special-attack` → `special attack`.
///
/// Only the first hyphen is replaced.
pub fn humanize(s: &str) -> String {
    s.replacen('-', " ", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_capitalizes() {
        let item = Item::new(25, "pikachu");
        assert_eq!(item.display_name(), "Pikachu");
    }

    #[test]
    fn test_capitalize_empty() {
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_has_category() {
        let mut item = Item::new(6, "charizard");
        item.categories = vec!["fire".into(), "flying".into()];
        assert!(item.has_category("fire"));
        assert!(item.has_category("flying"));
        assert!(!item.has_category("water"));
    }

    #[test]
    fn test_humanize_replaces_first_hyphen_only() {
        assert_eq!(humanize("special-attack"), "special attack");
        assert_eq!(humanize("a-b-c"), "a b-c");
        assert_eq!(humanize("speed"), "speed");
    }

    #[test]
    fn test_stat_ratio_is_capped() {
        let low = Stat { name: "hp".into(), value: 50 };
        let high = Stat { name: "hp".into(), value: 255 };
        assert!((low.ratio() - 0.25).abs() < f64::EPSILON);
        assert!((high.ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_has_image() {
        let mut item = Item::new(1, "bulbasaur");
        assert!(!item.has_image());
        item.image = "https://example.com/1.png".into();
        assert!(item.has_image());
    }
}
