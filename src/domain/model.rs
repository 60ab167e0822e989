use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A gating condition parsed out of a `reqs` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub range: String,
}

impl Requirement {
    pub fn tech(name: impl Into<String>) -> Self {
        Self {
            kind: "Tech".to_string(),
            name: name.into(),
            range: "Player".to_string(),
        }
    }

    pub fn is_tech(&self) -> bool {
        self.kind == "Tech"
    }
}

/// One parsed ruleset value. Numeric fields that fail to coerce stay `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    List(Vec<String>),
    Reqs(Vec<Requirement>),
}

/// Fields of one `[unit_*]` section, in the order they appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    pub data: IndexMap<String, FieldValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.data.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.data.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Scalar text view of a field; integers are rendered back to decimal.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.data.get(key)? {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Int(i) => Some(i.to_string()),
            FieldValue::List(_) | FieldValue::Reqs(_) => None,
        }
    }

    /// Parsed requirements, empty when the section had no `reqs` block.
    pub fn requirements(&self) -> &[Requirement] {
        match self.data.get("reqs") {
            Some(FieldValue::Reqs(reqs)) => reqs,
            _ => &[],
        }
    }
}

/// Numeric unit stat: an integer, or the raw ruleset text when it was not one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VeteranSystem {
    pub veteran_levels: u32,
    pub veteran_names: Vec<String>,
    pub veteran_base_raise_chance: Vec<u32>,
    pub veteran_work_raise_chance: Vec<u32>,
    pub veteran_power_fact: Vec<u32>,
    pub veteran_move_bonus: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedUnit {
    pub id: String,
    pub name: String,

    pub attack: Scalar,
    pub defense: Scalar,
    pub hitpoints: Scalar,
    pub firepower: Scalar,
    pub move_rate: Scalar,
    pub vision_radius_sq: Scalar,

    pub build_cost: Scalar,
    pub pop_cost: Scalar,

    pub uk_happy: Scalar,
    pub uk_shield: Scalar,
    pub uk_food: Scalar,
    pub uk_gold: Scalar,

    pub transport_cap: Scalar,
    pub fuel: Scalar,

    pub unit_class: String,
    pub roles: Vec<String>,
    pub flags: Vec<String>,

    pub required_tech: Option<String>,
    pub obsolete_by: Option<String>,

    pub tp_defense: String,
    pub cargo: Vec<String>,

    pub graphic: String,
    pub graphic_alt: String,
    pub sound_move: String,
    pub sound_fight: String,

    #[serde(flatten)]
    pub veteran: VeteranSystem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitClass {
    pub name: String,
    pub min_speed: u32,
    pub hp_loss_pct: u32,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFileInfo {
    pub description: String,
    pub options: String,
    pub format_version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutInfo {
    pub name: String,
    pub summary: String,
    pub source: String,
    pub total_units: usize,
}

/// Descriptive strings written into the units document header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    pub description: String,
    pub options: String,
    pub name: String,
    pub source: String,
    pub ruleset_label: String,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            description: "Complete Classic unit data for CivJS (ported from freeciv classic ruleset)"
                .to_string(),
            options: "+CivJS-ruleset-1.0-freeciv-classic-complete".to_string(),
            name: "Freeciv Classic Units Ruleset - Complete".to_string(),
            source: "freeciv/data/classic/units.ruleset".to_string(),
            ruleset_label: "freeciv classic ruleset".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitsDocument {
    pub datafile: DataFileInfo,
    pub about: AboutInfo,
    pub unit_classes: IndexMap<String, UnitClass>,
    pub units: IndexMap<String, EnrichedUnit>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// One technology as listed in the catalog data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechDefinition {
    pub id: String,
    pub catalog_id: u32,
    pub name: String,
    #[serde(default = "none_sentinel")]
    pub req1: String,
    #[serde(default = "none_sentinel")]
    pub req2: String,
    #[serde(default)]
    pub root_req: Option<String>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub graphic: String,
    #[serde(default)]
    pub helptext: String,
    #[serde(default)]
    pub bonus_message: String,
    #[serde(default)]
    pub position: Option<Position>,
}

fn none_sentinel() -> String {
    "None".to_string()
}

impl TechDefinition {
    /// Direct prerequisites, with the `None` slot sentinels removed.
    pub fn requirements(&self) -> Vec<String> {
        [&self.req1, &self.req2]
            .into_iter()
            .filter(|r| !r.is_empty() && r.as_str() != "None")
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechEntry {
    pub id: String,
    pub freeciv_id: u32,
    pub name: String,
    pub internal_name: String,
    pub cost: u32,
    pub req1: String,
    pub req2: String,
    pub requirements: Vec<String>,
    pub root_req: Option<String>,
    pub flags: Vec<String>,
    pub graphic: String,
    pub position: Position,
    pub helptext: String,
    pub bonus_message: String,
    pub order: u32,
}

pub type TechDocument = IndexMap<String, TechEntry>;

/// Intermediate output: unit identifier to its parsed section.
pub type RawUnits = IndexMap<String, RawRecord>;
