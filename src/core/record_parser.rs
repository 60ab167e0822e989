use crate::core::section::{is_section_header, unit_sections};
use crate::domain::model::{FieldValue, RawRecord, RawUnits, Requirement};
use once_cell::sync::Lazy;
use regex::Regex;

/// Fields coerced to integers. A value that does not parse keeps its text.
pub const NUMERIC_FIELDS: &[&str] = &[
    "build_cost",
    "pop_cost",
    "attack",
    "defense",
    "hitpoints",
    "firepower",
    "move_rate",
    "vision_radius_sq",
    "transport_cap",
    "fuel",
    "uk_happy",
    "uk_shield",
    "uk_food",
    "uk_gold",
];

static TECH_REQUIREMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r#""Tech",\s*"([^"]+)""#).unwrap());

/// Parses every `[unit_*]` section of a ruleset into a record keyed by unit name.
pub fn parse_ruleset(text: &str) -> RawUnits {
    let lines: Vec<&str> = text.lines().collect();
    let mut units = RawUnits::new();

    for (unit_name, start) in unit_sections(&lines) {
        tracing::debug!("Parsing unit: {}", unit_name);
        let record = parse_unit_section(&lines, start);
        if units.insert(unit_name.clone(), record).is_some() {
            tracing::warn!("Duplicate section [unit_{}], keeping the later one", unit_name);
        }
    }

    units
}

/// Parses the section whose header sits at `start`, stopping at the next
/// bracketed header or end of input.
pub fn parse_unit_section<S: AsRef<str>>(lines: &[S], start: usize) -> RawRecord {
    let mut record = RawRecord::new();
    let mut reqs_buffer: Option<String> = None;

    for raw_line in lines.iter().skip(start + 1) {
        let line: &str = raw_line.as_ref();
        let line = line.trim();

        if is_section_header(line) {
            break;
        }

        // An open reqs block swallows everything up to its closing brace.
        if let Some(mut buffer) = reqs_buffer.take() {
            buffer.push(' ');
            buffer.push_str(line);
            if line.ends_with('}') {
                record.insert("reqs", FieldValue::Reqs(parse_reqs(&buffer)));
            } else {
                reqs_buffer = Some(buffer);
            }
            continue;
        }

        if line.starts_with("reqs") {
            if line.ends_with('}') {
                record.insert("reqs", FieldValue::Reqs(parse_reqs(line)));
            } else {
                reqs_buffer = Some(line.to_string());
            }
            continue;
        }

        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = strip_quotes_once(value.trim());

        record.insert(key, parse_field(key, value));
    }

    if reqs_buffer.is_some() {
        tracing::debug!("Unterminated reqs block at end of section, ignoring it");
    }

    record
}

fn parse_field(key: &str, value: &str) -> FieldValue {
    if NUMERIC_FIELDS.contains(&key) {
        match value.parse::<i64>() {
            Ok(number) => FieldValue::Int(number),
            Err(_) => {
                tracing::debug!("Field '{}' is not an integer: {:?}", key, value);
                FieldValue::Text(value.to_string())
            }
        }
    } else if key == "flags" || key == "roles" {
        FieldValue::List(parse_list(value))
    } else {
        FieldValue::Text(value.to_string())
    }
}

/// Extracts requirements from a collected `reqs` block. Only the first
/// `"Tech", "<name>"` row is recognised.
pub fn parse_reqs(block: &str) -> Vec<Requirement> {
    TECH_REQUIREMENT
        .captures(block)
        .map(|caps| vec![Requirement::tech(&caps[1])])
        .unwrap_or_default()
}

/// Splits a comma separated, possibly quoted, value into trimmed tokens.
pub fn parse_list(value: &str) -> Vec<String> {
    let cleaned = value.trim().trim_matches('"').trim();
    if cleaned.is_empty() {
        return Vec::new();
    }

    cleaned
        .split(',')
        .map(|token| token.trim().trim_matches('"').trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_quotes_once(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WARRIORS: &str = r#"
[unit_warriors]
name          = _("Warriors")
class         = "Land"
tech_req      = "None"
obsolete_by   = "Pikemen"
graphic       = "u.warriors"
graphic_alt   = "-"
build_cost    = 10
pop_cost      = 0
attack        = "1"
defense       = 1
hitpoints     = 10
firepower     = 1
move_rate     = 1
vision_radius_sq = 2
uk_shield     = 1
flags         = "TerrainSpeed,ZOC"
roles         = "DefendOk", "FirstBuild"
"#;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_numeric_fields_become_integers() {
        let units = parse_ruleset(WARRIORS);
        let record = &units["warriors"];

        assert_eq!(record.get("attack"), Some(&FieldValue::Int(1)));
        assert_eq!(record.get("build_cost"), Some(&FieldValue::Int(10)));
        assert_eq!(
            record.get("class"),
            Some(&FieldValue::Text("Land".to_string()))
        );
    }

    #[test]
    fn test_quoted_attack_is_coerced() {
        let text = "[unit_x]\nattack = \"3\"\n";
        let record = parse_unit_section(&lines(text), 0);
        assert_eq!(record.get("attack"), Some(&FieldValue::Int(3)));
    }

    #[test]
    fn test_bad_number_keeps_raw_text() {
        let text = "[unit_x]\nmove_rate = \"fast\"\n";
        let record = parse_unit_section(&lines(text), 0);
        assert_eq!(
            record.get("move_rate"),
            Some(&FieldValue::Text("fast".to_string()))
        );
    }

    #[test]
    fn test_flags_and_roles_become_lists() {
        let units = parse_ruleset(WARRIORS);
        let record = &units["warriors"];

        assert_eq!(
            record.get("flags"),
            Some(&FieldValue::List(vec![
                "TerrainSpeed".to_string(),
                "ZOC".to_string()
            ]))
        );
        assert_eq!(
            record.get("roles"),
            Some(&FieldValue::List(vec![
                "DefendOk".to_string(),
                "FirstBuild".to_string()
            ]))
        );
    }

    #[test]
    fn test_empty_flags_yield_empty_list() {
        assert!(parse_list("").is_empty());
        assert!(parse_list("\"\"").is_empty());
        assert!(parse_list("\"").is_empty());

        let text = "[unit_x]\nflags = \"\"\n";
        let record = parse_unit_section(&lines(text), 0);
        assert_eq!(record.get("flags"), Some(&FieldValue::List(vec![])));
    }

    #[test]
    fn test_keys_match_section_lines() {
        let units = parse_ruleset(WARRIORS);
        let keys: Vec<_> = units["warriors"].keys().collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "class",
                "tech_req",
                "obsolete_by",
                "graphic",
                "graphic_alt",
                "build_cost",
                "pop_cost",
                "attack",
                "defense",
                "hitpoints",
                "firepower",
                "move_rate",
                "vision_radius_sq",
                "uk_shield",
                "flags",
                "roles",
            ]
        );
    }

    #[test]
    fn test_reqs_block_yields_single_tech_requirement() {
        let text = "[unit_phalanx]\nreqs\n  { \"type\", \"name\", \"range\"\n    \"Tech\", \"Bronze Working\", \"Player\"\n  }\nattack = 1\n";
        let record = parse_unit_section(&lines(text), 0);

        assert_eq!(record.requirements(), &[Requirement::tech("Bronze Working")]);
        assert_eq!(record.get("attack"), Some(&FieldValue::Int(1)));
    }

    #[test]
    fn test_reqs_block_buffers_key_value_lines() {
        let text = "[unit_x]\nreqs =\n  { \"type\", \"name\", \"range\"\n    hitpoints = 20\n    \"Tech\", \"Pottery\", \"Player\"\n  }\n";
        let record = parse_unit_section(&lines(text), 0);

        assert!(!record.contains_key("hitpoints"));
        assert_eq!(record.requirements(), &[Requirement::tech("Pottery")]);
    }

    #[test]
    fn test_only_first_tech_requirement_kept() {
        let block = r#"reqs = { "type", "name", "range" "Gov", "Monarchy", "Player" "Tech", "Feudalism", "Player" "Tech", "Chivalry", "Player" }"#;
        assert_eq!(parse_reqs(block), vec![Requirement::tech("Feudalism")]);
    }

    #[test]
    fn test_reqs_without_tech_is_empty() {
        let text = "[unit_x]\nreqs =\n  { \"type\", \"name\", \"range\"\n    \"Building\", \"Barracks\", \"City\"\n  }\n";
        let record = parse_unit_section(&lines(text), 0);

        assert!(record.contains_key("reqs"));
        assert!(record.requirements().is_empty());
    }

    #[test]
    fn test_single_line_reqs_closes_immediately() {
        let text = "[unit_x]\nreqs = { \"type\", \"name\", \"range\" \"Tech\", \"Horseback Riding\", \"Player\" }\nmove_rate = 2\n";
        let record = parse_unit_section(&lines(text), 0);

        assert_eq!(record.requirements(), &[Requirement::tech("Horseback Riding")]);
        assert_eq!(record.get("move_rate"), Some(&FieldValue::Int(2)));
    }

    #[test]
    fn test_any_header_ends_section() {
        let text = "[unit_a]\nattack = 1\n[unitclass_land]\nmin_speed = 1\n[unit_b]\nattack = 2\n";
        let units = parse_ruleset(text);

        assert_eq!(units.len(), 2);
        assert_eq!(units["a"].len(), 1);
        assert!(!units["a"].contains_key("min_speed"));
        assert_eq!(units["b"].get("attack"), Some(&FieldValue::Int(2)));
    }

    #[test]
    fn test_duplicate_section_keeps_later_record_in_first_slot() {
        let text = "[unit_a]\nattack = 1\n[unit_b]\nattack = 2\n[unit_a]\nattack = 3\ndefense = 4\n";
        let units = parse_ruleset(text);

        assert_eq!(units.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(units["a"].get("attack"), Some(&FieldValue::Int(3)));
        assert_eq!(units["a"].get("defense"), Some(&FieldValue::Int(4)));
    }

    #[test]
    fn test_unterminated_reqs_block_is_dropped() {
        let text = "[unit_x]\nattack = 1\nreqs =\n  { \"type\", \"name\", \"range\"\n    \"Tech\", \"Pottery\", \"Player\"\n[unit_y]\nattack = 2\n";
        let units = parse_ruleset(text);

        assert!(!units["x"].contains_key("reqs"));
        assert!(units["x"].requirements().is_empty());
        assert_eq!(units["x"].get("attack"), Some(&FieldValue::Int(1)));
        assert_eq!(units["y"].get("attack"), Some(&FieldValue::Int(2)));
    }

    #[test]
    fn test_splits_on_first_equals_only() {
        let text = "[unit_x]\nhelptext = _(\"a = b\")\n";
        let record = parse_unit_section(&lines(text), 0);
        assert_eq!(
            record.get("helptext"),
            Some(&FieldValue::Text("_(\"a = b\")".to_string()))
        );
    }

    #[test]
    fn test_comments_and_blank_lines_are_inert() {
        let text = "[unit_x]\n\n; attack = 9\n# defense = 9\n   \nattack = 2\n";
        let record = parse_unit_section(&lines(text), 0);

        assert_eq!(record.len(), 1);
        assert_eq!(record.get("attack"), Some(&FieldValue::Int(2)));
    }
}
