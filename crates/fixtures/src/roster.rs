//! Fixed candidate pools the generator draws from.

use shared::domain::NcoId;

#[derive(Debug, Clone, Copy)]
pub struct Soldier {
    pub rank: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub dod_id: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Commander {
    pub id: NcoId,
    pub name: &'static str,
}

pub const SOLDIERS: &[Soldier] = &[
    Soldier {
        rank: "PVT",
        first_name: "Marcus",
        last_name: "Bell",
        dod_id: "1093847562",
    },
    Soldier {
        rank: "PFC",
        first_name: "Alyssa",
        last_name: "Grant",
        dod_id: "1187203946",
    },
    Soldier {
        rank: "SPC",
        first_name: "Jordan",
        last_name: "Reyes",
        dod_id: "1210583974",
    },
    Soldier {
        rank: "SPC",
        first_name: "Tamika",
        last_name: "Cole",
        dod_id: "1145982730",
    },
    Soldier {
        rank: "PFC",
        first_name: "Devin",
        last_name: "Walsh",
        dod_id: "1329057816",
    },
    Soldier {
        rank: "PVT",
        first_name: "Chloe",
        last_name: "Barnes",
        dod_id: "1098435627",
    },
    Soldier {
        rank: "CPL",
        first_name: "Andre",
        last_name: "Fontaine",
        dod_id: "1274839105",
    },
    Soldier {
        rank: "SPC",
        first_name: "Maya",
        last_name: "Singh",
        dod_id: "1158274093",
    },
    Soldier {
        rank: "PFC",
        first_name: "Tyler",
        last_name: "Novak",
        dod_id: "1302918475",
    },
    Soldier {
        rank: "PVT",
        first_name: "Grace",
        last_name: "Okoro",
        dod_id: "1119846253",
    },
    Soldier {
        rank: "CPL",
        first_name: "Felix",
        last_name: "Marsh",
        dod_id: "1263098741",
    },
    Soldier {
        rank: "SPC",
        first_name: "Lena",
        last_name: "Vargas",
        dod_id: "1187650934",
    },
];

pub const LOCATIONS: &[&str] = &[
    "Main Exchange",
    "Commissary",
    "Post Gym",
    "Bowling Alley",
    "Food Court",
    "Library",
    "Barber Shop",
    "Recreation Center",
];

pub const COMMANDERS: &[Commander] = &[
    Commander {
        id: NcoId(1),
        name: "SSG Rivera",
    },
    Commander {
        id: NcoId(2),
        name: "SFC Thompson",
    },
    Commander {
        id: NcoId(3),
        name: "SSG Okafor",
    },
    Commander {
        id: NcoId(4),
        name: "SGT Delgado",
    },
];

/// Marks every generated row so seeded data is recognizable in the table.
pub const SYNTHETIC_NOTES: &str = "Seeded test data";
