use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Item, Stat};

/// Raw detail record as served by the API.
///
/// Every field defaults so that a sparse record still normalizes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawItem {
    pub id: u32,
    pub name: String,
    /// Decimetres.
    pub height: f64,
    /// Hectograms.
    pub weight: f64,
    pub types: Vec<RawTypeSlot>,
    pub sprites: RawSprites,
    pub abilities: Vec<RawAbilitySlot>,
    pub stats: Vec<RawStat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNamed {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTypeSlot {
    #[serde(rename = "type")]
    pub kind: RawNamed,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAbilitySlot {
    pub ability: RawNamed,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStat {
    pub stat: RawNamed,
    pub base_stat: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSprites {
    pub front_default: Option<String>,
    pub other: Option<RawOtherSprites>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<RawArtwork>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawArtwork {
    pub front_default: Option<String>,
}

/// Index listing returned by `GET <base>/<resource>?limit=N`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIndex {
    pub results: Vec<RawIndexEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawIndexEntry {
    pub url: String,
}

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, raw: &RawItem) -> Item {
        Item {
            id: raw.id,
            name: raw.name.clone(),
            height: raw.height / 10.0,
            weight: raw.weight / 10.0,
            categories: raw.types.iter().map(|t| t.kind.name.clone()).collect(),
            image: Self::pick_image(&raw.sprites),
            abilities: raw.abilities.iter().map(|a| a.ability.name.clone()).collect(),
            stats: raw
                .stats
                .iter()
                .map(|s| Stat {
                    name: s.stat.name.clone(),
                    value: s.base_stat,
                })
                .collect(),
        }
    }

    /// Normalizes a cached payload.
    ///
    /// Returns `None` when the payload is not a record with a positive `id`;
    /// such payloads are treated like a failed fetch.
    pub fn normalize_value(&self, value: &Value) -> Option<Item> {
        if !value.is_object() {
            return None;
        }
        let raw: RawItem = match RawItem::deserialize(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Skipping malformed record: {}", e);
                return None;
            }
        };
        if raw.id == 0 {
            return None;
        }
        Some(self.normalize(&raw))
    }

    fn pick_image(sprites: &RawSprites) -> String {
        sprites
            .other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.clone())
            .filter(|s| !s.is_empty())
            .or_else(|| sprites.front_default.clone().filter(|s| !s.is_empty()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "id": 6,
            "name": "charizard",
            "height": 17,
            "weight": 905,
            "types": [
                { "slot": 1, "type": { "name": "fire", "url": "https://example.com/type/10/" } },
                { "slot": 2, "type": { "name": "flying", "url": "https://example.com/type/3/" } }
            ],
            "sprites": {
                "front_default": "https://example.com/sprites/6.png",
                "other": {
                    "official-artwork": { "front_default": "https://example.com/artwork/6.png" }
                }
            },
            "abilities": [
                { "ability": { "name": "blaze" }, "is_hidden": false },
                { "ability": { "name": "solar-power" }, "is_hidden": true }
            ],
            "stats": [
                { "base_stat": 78, "stat": { "name": "hp" } },
                { "base_stat": 109, "stat": { "name": "special-attack" } }
            ]
        })
    }

    #[test]
    fn test_normalize_full_record() {
        let item = Normalizer::new().normalize_value(&sample()).unwrap();

        assert_eq!(item.id, 6);
        assert_eq!(item.name, "charizard");
        assert!((item.height - 1.7).abs() < 1e-9);
        assert!((item.weight - 90.5).abs() < 1e-9);
        assert_eq!(item.categories, vec!["fire", "flying"]);
        assert_eq!(item.image, "https://example.com/artwork/6.png");
        assert_eq!(item.abilities, vec!["blaze", "solar-power"]);
        assert_eq!(
            item.stats,
            vec![
                Stat { name: "hp".into(), value: 78 },
                Stat { name: "special-attack".into(), value: 109 },
            ]
        );
    }

    #[test]
    fn test_image_falls_back_to_default_sprite() {
        let mut value = sample();
        value["sprites"]["other"]["official-artwork"]["front_default"] = Value::Null;
        let item = Normalizer::new().normalize_value(&value).unwrap();
        assert_eq!(item.image, "https://example.com/sprites/6.png");
    }

    #[test]
    fn test_image_empty_when_no_sprites() {
        let mut value = sample();
        value["sprites"] = json!({ "front_default": null });
        let item = Normalizer::new().normalize_value(&value).unwrap();
        assert_eq!(item.image, "");
    }

    #[test]
    fn test_sparse_record_still_normalizes() {
        let item = Normalizer::new()
            .normalize_value(&json!({ "id": 132, "name": "ditto" }))
            .unwrap();
        assert_eq!(item.id, 132);
        assert!(item.categories.is_empty());
        assert_eq!(item.height, 0.0);
        assert_eq!(item.image, "");
    }

    #[test]
    fn test_non_record_payload_is_rejected() {
        let normalizer = Normalizer::new();
        assert!(normalizer.normalize_value(&json!([1, 2, 3])).is_none());
        assert!(normalizer.normalize_value(&json!({ "name": "missingno" })).is_none());
        assert!(normalizer.normalize_value(&json!({ "id": "six" })).is_none());
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let normalizer = Normalizer::new();
        let a = normalizer.normalize_value(&sample()).unwrap();
        let b = normalizer.normalize_value(&sample()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_index() {
        let index: RawIndex = serde_json::from_value(json!({
            "count": 1302,
            "next": "https://example.com/pokemon?offset=2&limit=2",
            "results": [
                { "name": "bulbasaur", "url": "https://example.com/pokemon/1/" },
                { "name": "ivysaur", "url": "https://example.com/pokemon/2/" }
            ]
        }))
        .unwrap();
        assert_eq!(index.results.len(), 2);
        assert_eq!(index.results[1].url, "https://example.com/pokemon/2/");
    }
}
