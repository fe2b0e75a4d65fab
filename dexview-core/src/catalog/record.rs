//! Detail and supplement records as returned by the API
//!
//! Only the fields the viewer reads are modelled. Everything the API may
//! omit or null out is optional or defaulted, so a sparse record still
//! decodes.

use serde::{Deserialize, Serialize};

/// A `{name, url}` pair the API uses for every linked resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub url: String,
}

/// Full record from `/pokemon/{nameOrId}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    #[serde(default)]
    pub id: u32,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub sprites: Option<Sprites>,

    #[serde(default)]
    pub types: Vec<TypeSlot>,

    #[serde(default)]
    pub stats: Vec<StatSlot>,

    /// Height in decimetres
    #[serde(default)]
    pub height: Option<u32>,

    /// Weight in hectograms
    #[serde(default)]
    pub weight: Option<u32>,

    #[serde(default)]
    pub base_experience: Option<u32>,

    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,

    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: Option<OfficialArtwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfficialArtwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u8,

    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,

    #[serde(default)]
    pub effort: u32,

    pub stat: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,

    #[serde(default)]
    pub is_hidden: bool,

    #[serde(default)]
    pub slot: u8,
}

/// Supplement record from `/pokemon-species/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Species {
    #[serde(default)]
    pub id: u32,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,

    pub language: NamedResource,

    #[serde(default)]
    pub version: Option<NamedResource>,
}

impl Pokemon {
    /// Best available image: official artwork, then the front sprite
    pub fn image_url(&self) -> Option<&str> {
        let sprites = self.sprites.as_ref()?;

        sprites
            .other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|artwork| artwork.front_default.as_deref())
            .or(sprites.front_default.as_deref())
    }

    /// Base value of a stat by API name (`hp`, `attack`, ...)
    pub fn stat(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|s| s.stat.name == name)
            .map(|s| s.base_stat)
    }

    pub fn hp(&self) -> Option<u32> {
        self.stat("hp")
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.kind.name.as_str()).collect()
    }

    pub fn ability_names(&self) -> Vec<&str> {
        self.abilities
            .iter()
            .map(|a| a.ability.name.as_str())
            .collect()
    }
}

impl Species {
    /// First flavor text in the given language, whitespace-normalized
    ///
    /// The API embeds form feeds and hard line breaks from the game text;
    /// they are replaced by spaces.
    pub fn flavor_text(&self, language: &str) -> Option<String> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| {
                entry
                    .flavor_text
                    .chars()
                    .map(|c| match c {
                        '\u{000C}' | '\n' | '\r' => ' ',
                        other => other,
                    })
                    .collect()
            })
    }

    pub fn english_flavor_text(&self) -> Option<String> {
        self.flavor_text("en")
    }
}
