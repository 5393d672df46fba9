//! Wall layouts shipped with the game.

const ARENA: [&str; 16] = [
    "###########..###########",
    "#......................#",
    "#......................#",
    "#...#####......#####...#",
    "#......................#",
    "#......................#",
    "........................",
    "........................",
    "#......................#",
    "#......................#",
    "#......................#",
    "#......................#",
    "#...#####......#####...#",
    "#......................#",
    "#......................#",
    "###########..###########",
];

const TUNNELS: [&str; 20] = [
    "..............................",
    "..............................",
    "..............................",
    "#############....#############",
    "..............................",
    "..............................",
    "...#......................#...",
    "...#......................#...",
    "...#......................#...",
    "...#......................#...",
    "...#......................#...",
    "...#......................#...",
    "...#......................#...",
    "...#......................#...",
    "..............................",
    "..............................",
    "#############....#############",
    "..............................",
    "..............................",
    "..............................",
];

/// Named wall maps that can be selected without supplying a layout file.
///
/// Layouts use `#` as the wall marker and list the top row first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinMap {
    /// Walled room with two gaps on every side and four inner bars.
    Arena,
    /// Open torus split by two horizontal barriers and two vertical posts.
    Tunnels,
}

impl BuiltinMap {
    /// Every built-in map, in presentation order.
    pub const ALL: [BuiltinMap; 2] = [BuiltinMap::Arena, BuiltinMap::Tunnels];

    /// Identifier used to select the map from configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Arena => "arena",
            Self::Tunnels => "tunnels",
        }
    }

    /// Looks up a map by its identifier, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|map| map.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Rows of the layout, top row first.
    #[must_use]
    pub fn layout(self) -> Vec<String> {
        let rows: &[&str] = match self {
            Self::Arena => &ARENA,
            Self::Tunnels => &TUNNELS,
        };
        rows.iter().map(|row| (*row).to_owned()).collect()
    }
}
