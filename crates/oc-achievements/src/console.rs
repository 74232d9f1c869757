//! Console identification
//!
//! Numeric ids match the ones used by the achievement server, so they can be
//! passed straight through to hash resolution.

/// Consoles supported by the achievement server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Console {
    #[default]
    Unknown = 0,
    MegaDrive = 1,
    Nintendo64 = 2,
    SuperNintendo = 3,
    GameBoy = 4,
    GameBoyAdvance = 5,
    GameBoyColor = 6,
    Nes = 7,
    PcEngine = 8,
    SegaCd = 9,
    Sega32X = 10,
    MasterSystem = 11,
    PlayStation = 12,
    AtariLynx = 13,
    NeoGeoPocket = 14,
    GameGear = 15,
    GameCube = 16,
    AtariJaguar = 17,
    NintendoDs = 18,
    PlayStation2 = 21,
    PlayStationPortable = 41,
}

impl Console {
    const ALL: [Console; 20] = [
        Console::MegaDrive,
        Console::Nintendo64,
        Console::SuperNintendo,
        Console::GameBoy,
        Console::GameBoyAdvance,
        Console::GameBoyColor,
        Console::Nes,
        Console::PcEngine,
        Console::SegaCd,
        Console::Sega32X,
        Console::MasterSystem,
        Console::PlayStation,
        Console::AtariLynx,
        Console::NeoGeoPocket,
        Console::GameGear,
        Console::GameCube,
        Console::AtariJaguar,
        Console::NintendoDs,
        Console::PlayStation2,
        Console::PlayStationPortable,
    ];

    pub fn id(&self) -> u32 {
        *self as u32
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Console::Unknown => "Unknown",
            Console::MegaDrive => "Genesis/Mega Drive",
            Console::Nintendo64 => "Nintendo 64",
            Console::SuperNintendo => "SNES/Super Famicom",
            Console::GameBoy => "Game Boy",
            Console::GameBoyAdvance => "Game Boy Advance",
            Console::GameBoyColor => "Game Boy Color",
            Console::Nes => "NES/Famicom",
            Console::PcEngine => "PC Engine/TurboGrafx-16",
            Console::SegaCd => "Sega CD",
            Console::Sega32X => "32X",
            Console::MasterSystem => "Master System",
            Console::PlayStation => "PlayStation",
            Console::AtariLynx => "Atari Lynx",
            Console::NeoGeoPocket => "Neo Geo Pocket",
            Console::GameGear => "Game Gear",
            Console::GameCube => "GameCube",
            Console::AtariJaguar => "Atari Jaguar",
            Console::NintendoDs => "Nintendo DS",
            Console::PlayStation2 => "PlayStation 2",
            Console::PlayStationPortable => "PlayStation Portable",
        }
    }

    /// Short name accepted on the command line
    pub fn short_name(&self) -> &'static str {
        match self {
            Console::Unknown => "unknown",
            Console::MegaDrive => "md",
            Console::Nintendo64 => "n64",
            Console::SuperNintendo => "snes",
            Console::GameBoy => "gb",
            Console::GameBoyAdvance => "gba",
            Console::GameBoyColor => "gbc",
            Console::Nes => "nes",
            Console::PcEngine => "pce",
            Console::SegaCd => "segacd",
            Console::Sega32X => "32x",
            Console::MasterSystem => "sms",
            Console::PlayStation => "psx",
            Console::AtariLynx => "lynx",
            Console::NeoGeoPocket => "ngp",
            Console::GameGear => "gg",
            Console::GameCube => "gc",
            Console::AtariJaguar => "jaguar",
            Console::NintendoDs => "nds",
            Console::PlayStation2 => "ps2",
            Console::PlayStationPortable => "psp",
        }
    }

    /// Look up a console by numeric id. Unrecognized ids map to `Unknown`.
    pub fn from_id(id: u32) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|console| console.id() == id)
            .unwrap_or(Console::Unknown)
    }

    /// Look up a console by short name, display name or numeric id
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Ok(id) = name.parse::<u32>() {
            return match Self::from_id(id) {
                Console::Unknown => None,
                console => Some(console),
            };
        }

        Self::ALL.iter().copied().find(|console| {
            console.short_name().eq_ignore_ascii_case(name) || console.name().eq_ignore_ascii_case(name)
        })
    }
}

impl std::fmt::Display for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
