//! Monster catalog, one entry per floor band.
//!
//! Floors 1-10 are band 0, 11-20 band 1, and so on; floor 101 wraps back to
//! band 0 with stronger monsters.

use crate::core::balance::floor_band;

/// Named monsters that can appear on the floors of one band.
#[derive(Debug, Clone, Copy)]
pub struct FloorBand {
    pub index: u32,
    pub name: &'static str,
    pub monsters: [&'static str; 5],
    pub rares: [&'static str; 2],
    pub legendary: &'static str,
    pub boss: &'static str,
}

pub const BANDS: [FloorBand; 10] = [
    FloorBand {
        index: 0,
        name: "Mossy Cellar",
        monsters: ["Rat", "Slime", "Bat", "Beetle", "Mold Crawler"],
        rares: ["Golden Rat", "Crystal Slime"],
        legendary: "Elder Slime",
        boss: "Cellar Warden",
    },
    FloorBand {
        index: 1,
        name: "Goblin Warrens",
        monsters: ["Goblin", "Goblin Archer", "Hobgoblin", "Wolf Rider", "Goblin Shaman"],
        rares: ["Goblin Hoarder", "Dire Wolf"],
        legendary: "Goblin Chieftain",
        boss: "Warren King",
    },
    FloorBand {
        index: 2,
        name: "Sunken Crypt",
        monsters: ["Skeleton", "Zombie", "Ghoul", "Wight", "Bone Hound"],
        rares: ["Gilded Skeleton", "Restless Knight"],
        legendary: "Crypt Lord",
        boss: "Lich Acolyte",
    },
    FloorBand {
        index: 3,
        name: "Fungal Depths",
        monsters: ["Sporeling", "Myconid", "Cave Spider", "Shrieker", "Rot Grub"],
        rares: ["Glowcap Myconid", "Broodmother"],
        legendary: "Sovereign Spore",
        boss: "Mycelium Heart",
    },
    FloorBand {
        index: 4,
        name: "Iron Foundry",
        monsters: ["Clockwork Drone", "Slag Golem", "Forge Imp", "Rivet Hound", "Smelter"],
        rares: ["Brass Sentinel", "Molten Imp"],
        legendary: "Foundry Titan",
        boss: "Overseer Engine",
    },
    FloorBand {
        index: 5,
        name: "Frozen Halls",
        monsters: ["Ice Wraith", "Frost Troll", "Yeti", "Snow Harpy", "Rime Elemental"],
        rares: ["Glacial Wraith", "Frostfang"],
        legendary: "Winter Monarch",
        boss: "Hall Jarl",
    },
    FloorBand {
        index: 6,
        name: "Ember Caverns",
        monsters: ["Salamander", "Magma Crab", "Fire Bat", "Cinder Hound", "Ash Wyrmling"],
        rares: ["Blazing Salamander", "Obsidian Crab"],
        legendary: "Ember Drake",
        boss: "Caldera Tyrant",
    },
    FloorBand {
        index: 7,
        name: "Abyssal Gate",
        monsters: ["Imp", "Hellhound", "Succubus", "Bone Fiend", "Pit Stalker"],
        rares: ["Soul Collector", "Gatekeeper Hound"],
        legendary: "Abyssal Herald",
        boss: "Gate Archon",
    },
    FloorBand {
        index: 8,
        name: "Astral Spire",
        monsters: ["Star Wisp", "Void Monk", "Astral Golem", "Comet Serpent", "Nebula Shade"],
        rares: ["Prism Wisp", "Eclipse Monk"],
        legendary: "Celestial Seraph",
        boss: "Spire Oracle",
    },
    FloorBand {
        index: 9,
        name: "Throne of Ages",
        monsters: ["Time Eater", "Dread Knight", "Chaos Spawn", "Elder Wyrm", "Null Shade"],
        rares: ["Chrono Knight", "Paradox Wyrm"],
        legendary: "Ageless One",
        boss: "Eternal Sovereign",
    },
];

/// Band data by index; out-of-range indices wrap.
pub fn band(index: u32) -> &'static FloorBand {
    &BANDS[index as usize % BANDS.len()]
}

pub fn band_for_floor(floor: u32) -> &'static FloorBand {
    band(floor_band(floor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_indices_match_positions() {
        for (i, b) in BANDS.iter().enumerate() {
            assert_eq!(b.index as usize, i);
        }
    }

    #[test]
    fn test_band_for_floor() {
        assert_eq!(band_for_floor(1).name, "Mossy Cellar");
        assert_eq!(band_for_floor(25).name, "Sunken Crypt");
        assert_eq!(band_for_floor(100).index, 9);
        assert_eq!(band_for_floor(101).index, 0);
    }
}
