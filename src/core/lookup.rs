//! Constant tables attached to every run: tech display names, unit classes
//! and the veteran ladder.

use crate::domain::model::{UnitClass, VeteranSystem};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static TECH_IDENTIFIERS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("Bronze Working", "bronze_working"),
        ("Warrior Code", "warrior_code"),
        ("Iron Working", "iron_working"),
        ("Horseback Riding", "horseback_riding"),
        ("The Wheel", "the_wheel"),
        ("Map Making", "map_making"),
        ("Writing", "writing"),
        ("Pottery", "pottery"),
        ("Mathematics", "mathematics"),
        ("Chivalry", "chivalry"),
        ("Feudalism", "feudalism"),
        ("Navigation", "navigation"),
        ("Gunpowder", "gunpowder"),
        ("Magnetism", "magnetism"),
        ("Steam Engine", "steam_engine"),
        ("Metallurgy", "metallurgy"),
        ("Electricity", "electricity"),
        ("Machine Tools", "machine_tools"),
        ("Steel", "steel"),
        ("Industrialization", "industrialization"),
        ("Conscription", "conscription"),
        ("Leadership", "leadership"),
        ("Tactics", "tactics"),
        ("Flight", "flight"),
        ("Advanced Flight", "advanced_flight"),
        ("Rocketry", "rocketry"),
        ("Combined Arms", "combined_arms"),
        ("Amphibious Warfare", "amphibious_warfare"),
        ("Labor Union", "labor_union"),
        ("Mobile Warfare", "mobile_warfare"),
        ("Robotics", "robotics"),
        ("Stealth", "stealth"),
        ("Automobile", "automobile"),
        ("Combustion", "combustion"),
        ("Guerilla Warfare", "guerilla_warfare"),
        ("Explosives", "explosives"),
        ("Espionage", "espionage"),
        ("Trade", "trade"),
        ("The Corporation", "the_corporation"),
        ("Seafaring", "seafaring"),
    ]
    .into_iter()
    .collect()
});

/// Canonical identifier for a tech display name, if the name is known.
pub fn tech_identifier(display_name: &str) -> Option<&'static str> {
    TECH_IDENTIFIERS.get(display_name).copied()
}

/// `"Steam Engine"` -> `"steam_engine"`.
pub fn to_identifier(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

fn unit_class(name: &str, min_speed: u32, hp_loss_pct: u32, flags: &[&str]) -> UnitClass {
    UnitClass {
        name: name.to_string(),
        min_speed,
        hp_loss_pct,
        flags: flags.iter().map(|f| f.to_string()).collect(),
    }
}

pub fn unit_classes() -> IndexMap<String, UnitClass> {
    let classes = [
        unit_class(
            "Land",
            1,
            0,
            &[
                "TerrainSpeed",
                "DamageSlows",
                "CanOccupyCity",
                "BuildAnywhere",
                "CollectRansom",
                "ZOC",
                "CanFortify",
                "CanPillage",
                "TerrainDefense",
                "KillCitizen",
                "NonNatBombardTgt",
            ],
        ),
        unit_class("Sea", 2, 0, &["DamageSlows", "AttackNonNative", "AttFromNonNative"]),
        unit_class("Trireme", 2, 0, &["DamageSlows", "AttFromNonNative"]),
        unit_class("Air", 1, 0, &["Unreachable", "DoesntOccupyTile", "HutFrighten"]),
        unit_class("Helicopter", 1, 10, &["CanOccupyCity", "CollectRansom"]),
        unit_class(
            "Missile",
            1,
            0,
            &["Missile", "Unreachable", "DoesntOccupyTile", "HutFrighten"],
        ),
    ];

    classes
        .into_iter()
        .map(|class| (to_identifier(&class.name), class))
        .collect()
}

/// Four-rank ladder shared by every unit. Per-unit veteran systems in the
/// ruleset are not read.
pub fn classic_veteran_system() -> VeteranSystem {
    VeteranSystem {
        veteran_levels: 4,
        veteran_names: ["green", "veteran", "hardened", "elite"]
            .iter()
            .map(|n| n.to_string())
            .collect(),
        veteran_base_raise_chance: vec![50, 33, 20, 0],
        veteran_work_raise_chance: vec![0, 0, 0, 0],
        veteran_power_fact: vec![100, 150, 175, 200],
        veteran_move_bonus: vec![0, 0, 0, 0],
    }
}
