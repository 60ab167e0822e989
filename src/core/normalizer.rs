use crate::core::lookup::{classic_veteran_system, tech_identifier, to_identifier};
use crate::core::record_parser::parse_list;
use crate::domain::model::{EnrichedUnit, FieldValue, RawRecord, Scalar};
use once_cell::sync::Lazy;
use regex::Regex;

static PLAIN_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r#"_\("([^"]+)"\)"#).unwrap());
static QUALIFIED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"_\("\?[^:]*:([^"]+)"\)"#).unwrap());

/// Unwraps `_("text")` and `_("?context:text")` translation markers.
/// Anything else only loses its surrounding quotes.
pub fn clean_name(raw: &str) -> String {
    // `?ctx:` forms are tried first; a bare `_("?foo")` still unwraps as plain.
    let caps = if raw.starts_with("_(\"?") {
        QUALIFIED_NAME
            .captures(raw)
            .or_else(|| PLAIN_NAME.captures(raw))
    } else if raw.starts_with("_(\"") {
        PLAIN_NAME.captures(raw)
    } else {
        None
    };

    match caps {
        Some(caps) => caps[1].to_string(),
        None => raw.trim_matches('"').to_string(),
    }
}

/// Identifier of the first Tech requirement, if any.
pub fn resolve_required_tech(record: &RawRecord) -> Option<String> {
    record
        .requirements()
        .iter()
        .find(|req| req.is_tech())
        .map(|req| {
            tech_identifier(&req.name)
                .map(str::to_string)
                .unwrap_or_else(|| to_identifier(&req.name))
        })
}

/// `None`, empty or missing means the unit never goes obsolete.
pub fn resolve_obsolete_by(value: Option<&str>) -> Option<String> {
    match value {
        Some(name) if !name.is_empty() && name != "None" => Some(to_identifier(name)),
        _ => None,
    }
}

fn scalar(record: &RawRecord, key: &str, default: i64) -> Scalar {
    match record.get(key) {
        Some(FieldValue::Int(value)) => Scalar::Int(*value),
        Some(FieldValue::Text(raw)) => Scalar::Raw(raw.clone()),
        Some(other) => {
            tracing::warn!("Field '{}' has unexpected shape {:?}, using default", key, other);
            Scalar::Int(default)
        }
        None => Scalar::Int(default),
    }
}

fn text(record: &RawRecord, key: &str, default: &str) -> String {
    record.text(key).unwrap_or_else(|| default.to_string())
}

fn list(record: &RawRecord, key: &str) -> Vec<String> {
    match record.get(key) {
        Some(FieldValue::List(items)) => items.clone(),
        Some(FieldValue::Text(raw)) => parse_list(raw),
        _ => Vec::new(),
    }
}

/// Maps a parsed section onto the client schema, filling defaults.
pub fn enrich_unit(id: &str, record: &RawRecord) -> EnrichedUnit {
    EnrichedUnit {
        id: id.to_string(),
        name: clean_name(&text(record, "name", "")),

        attack: scalar(record, "attack", 0),
        defense: scalar(record, "defense", 0),
        hitpoints: scalar(record, "hitpoints", 10),
        firepower: scalar(record, "firepower", 1),
        move_rate: scalar(record, "move_rate", 1),
        vision_radius_sq: scalar(record, "vision_radius_sq", 2),

        build_cost: scalar(record, "build_cost", 10),
        pop_cost: scalar(record, "pop_cost", 0),

        uk_happy: scalar(record, "uk_happy", 0),
        uk_shield: scalar(record, "uk_shield", 0),
        uk_food: scalar(record, "uk_food", 0),
        uk_gold: scalar(record, "uk_gold", 0),

        transport_cap: scalar(record, "transport_cap", 0),
        fuel: scalar(record, "fuel", 0),

        unit_class: text(record, "class", "Land"),
        roles: list(record, "roles"),
        flags: list(record, "flags"),

        required_tech: resolve_required_tech(record),
        obsolete_by: resolve_obsolete_by(record.text("obsolete_by").as_deref()),

        tp_defense: text(record, "tp_defense", "Alight"),
        cargo: list(record, "cargo"),

        graphic: text(record, "graphic", ""),
        graphic_alt: text(record, "graphic_alt", "-"),
        sound_move: text(record, "sound_move", ""),
        sound_fight: text(record, "sound_fight", ""),

        veteran: classic_veteran_system(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record_parser::parse_ruleset;
    use crate::domain::model::Requirement;

    #[test]
    fn test_clean_name_conventions() {
        assert_eq!(clean_name("_(\"Warriors\")"), "Warriors");
        assert_eq!(clean_name("_(\"?unit:Cannon\")"), "Cannon");
        assert_eq!(clean_name("\"Explorer\""), "Explorer");
        assert_eq!(clean_name("AWACS"), "AWACS");
        assert_eq!(clean_name(""), "");
    }

    #[test]
    fn test_clean_name_question_mark_without_context() {
        assert_eq!(clean_name("_(\"?foo\")"), "?foo");
        assert_eq!(clean_name("_(\"?unit:\")"), "?unit:");
        assert_eq!(clean_name("_(\"?unit:Galleon\")"), "Galleon");
    }

    #[test]
    fn test_required_tech_uses_table_then_fallback() {
        let mut record = RawRecord::new();
        record.insert("reqs", FieldValue::Reqs(vec![Requirement::tech("Bronze Working")]));
        assert_eq!(resolve_required_tech(&record), Some("bronze_working".to_string()));

        let mut record = RawRecord::new();
        record.insert("reqs", FieldValue::Reqs(vec![Requirement::tech("Theory of Gravity")]));
        assert_eq!(
            resolve_required_tech(&record),
            Some("theory_of_gravity".to_string())
        );
    }

    #[test]
    fn test_no_tech_requirement_is_absent() {
        assert_eq!(resolve_required_tech(&RawRecord::new()), None);

        let mut record = RawRecord::new();
        record.insert(
            "reqs",
            FieldValue::Reqs(vec![Requirement {
                kind: "Building".to_string(),
                name: "Barracks".to_string(),
                range: "City".to_string(),
            }]),
        );
        assert_eq!(resolve_required_tech(&record), None);
    }

    #[test]
    fn test_obsolete_by() {
        assert_eq!(resolve_obsolete_by(None), None);
        assert_eq!(resolve_obsolete_by(Some("None")), None);
        assert_eq!(resolve_obsolete_by(Some("Musketeers")), Some("musketeers".to_string()));
        assert_eq!(
            resolve_obsolete_by(Some("Armored Train")),
            Some("armored_train".to_string())
        );
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let unit = enrich_unit("ghost", &RawRecord::new());

        assert_eq!(unit.id, "ghost");
        assert_eq!(unit.name, "");
        assert_eq!(unit.attack, Scalar::Int(0));
        assert_eq!(unit.hitpoints, Scalar::Int(10));
        assert_eq!(unit.firepower, Scalar::Int(1));
        assert_eq!(unit.move_rate, Scalar::Int(1));
        assert_eq!(unit.vision_radius_sq, Scalar::Int(2));
        assert_eq!(unit.build_cost, Scalar::Int(10));
        assert_eq!(unit.unit_class, "Land");
        assert_eq!(unit.tp_defense, "Alight");
        assert_eq!(unit.graphic_alt, "-");
        assert!(unit.cargo.is_empty());
        assert_eq!(unit.required_tech, None);
        assert_eq!(unit.obsolete_by, None);
        assert_eq!(unit.veteran.veteran_levels, 4);
    }

    #[test]
    fn test_serialized_unit_has_every_field() {
        let unit = enrich_unit("ghost", &RawRecord::new());
        let json = serde_json::to_string(&unit).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "id",
            "name",
            "attack",
            "defense",
            "hitpoints",
            "firepower",
            "move_rate",
            "vision_radius_sq",
            "build_cost",
            "pop_cost",
            "uk_happy",
            "uk_shield",
            "uk_food",
            "uk_gold",
            "transport_cap",
            "fuel",
            "unit_class",
            "roles",
            "flags",
            "required_tech",
            "obsolete_by",
            "tp_defense",
            "cargo",
            "graphic",
            "graphic_alt",
            "sound_move",
            "sound_fight",
            "veteran_levels",
            "veteran_names",
            "veteran_base_raise_chance",
            "veteran_work_raise_chance",
            "veteran_power_fact",
            "veteran_move_bonus",
        ] {
            assert!(object.contains_key(key), "missing {}", key);
        }
        assert_eq!(object["hitpoints"], 10);
        assert!(object["required_tech"].is_null());
    }

    #[test]
    fn test_phalanx_end_to_end() {
        let text = r#"
[unit_phalanx]
name          = _("Phalanx")
class         = "Land"
reqs
  { "type", "name", "range"
    "Tech", "Bronze Working", "Player"
  }
obsolete_by   = "Pikemen"
attack        = 1
defense       = 2
cargo         = ""
"#;
        let units = parse_ruleset(text);
        let unit = enrich_unit("phalanx", &units["phalanx"]);

        assert_eq!(unit.name, "Phalanx");
        assert_eq!(unit.required_tech.as_deref(), Some("bronze_working"));
        assert_eq!(unit.obsolete_by.as_deref(), Some("pikemen"));
        assert_eq!(unit.defense, Scalar::Int(2));
        assert!(unit.cargo.is_empty());
    }

    #[test]
    fn test_raw_numeric_text_is_carried_through() {
        let mut record = RawRecord::new();
        record.insert("fuel", FieldValue::Text("unlimited".to_string()));
        let unit = enrich_unit("x", &record);
        assert_eq!(unit.fuel, Scalar::Raw("unlimited".to_string()));
    }

    #[test]
    fn test_cargo_text_becomes_list() {
        let mut record = RawRecord::new();
        record.insert("cargo", FieldValue::Text("Land\", \"Big Land".to_string()));
        let unit = enrich_unit("transport", &record);
        assert_eq!(unit.cargo, vec!["Land".to_string(), "Big Land".to_string()]);
    }

    #[test]
    fn test_enrichment_is_idempotent() {
        let units = parse_ruleset("[unit_x]\nname = _(\"X\")\nattack = 4\nflags = \"IgZOC\"\n");
        let record = &units["x"];
        assert_eq!(enrich_unit("x", record), enrich_unit("x", record));
    }
}
