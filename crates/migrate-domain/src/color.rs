//! Trello label colours mapped to Vikunja hex colours.

use std::collections::HashMap;

/// Entry every unset or unknown colour falls back to.
pub const TRANSPARENT: &str = "transparent";

const TRELLO_COLORS: &[(&str, &str)] = &[
    ("green", "4bce97"),
    ("yellow", "f5cd47"),
    ("orange", "fea362"),
    ("red", "f87168"),
    ("purple", "9f8fef"),
    ("blue", "579dff"),
    ("sky", "6cc3e0"),
    ("lime", "94c748"),
    ("pink", "e774bb"),
    ("black", "8590a2"),
    ("green_dark", "1f845a"),
    ("yellow_dark", "946f00"),
    ("orange_dark", "c25100"),
    ("red_dark", "c9372c"),
    ("purple_dark", "6e5dc6"),
    ("blue_dark", "0c66e4"),
    ("sky_dark", "227d9b"),
    ("lime_dark", "5b7f24"),
    ("pink_dark", "ae4787"),
    ("black_dark", "626f86"),
    ("green_light", "baf3db"),
    ("yellow_light", "f8e6a0"),
    ("orange_light", "fedec8"),
    ("red_light", "ffd5d2"),
    ("purple_light", "dfd8fd"),
    ("blue_light", "cce0ff"),
    ("sky_light", "c6edfb"),
    ("lime_light", "d3f1a7"),
    ("pink_light", "fdd0ec"),
    ("black_light", "dcdfe4"),
    (TRANSPARENT, ""),
];

/// Immutable colour lookup, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct ColorTable {
    colors: HashMap<&'static str, &'static str>,
}

impl ColorTable {
    pub fn trello() -> Self {
        Self::from_entries(TRELLO_COLORS.iter().copied())
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        let mut colors: HashMap<_, _> = entries.into_iter().collect();
        colors.entry(TRANSPARENT).or_insert("");
        Self { colors }
    }

    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.colors.get(name).copied()
    }

    pub fn fallback(&self) -> &'static str {
        self.get(TRANSPARENT).unwrap_or("")
    }

    /// Hex colour for a Trello colour name. Unset and unmapped names resolve
    /// to the transparent entry with a warning.
    pub fn resolve(&self, name: Option<&str>) -> &'static str {
        match name.filter(|n| !n.is_empty()) {
            Some(name) => self.get(name).unwrap_or_else(|| {
                tracing::warn!("Color {} not mapped, falling back to transparent", name);
                self.fallback()
            }),
            None => {
                tracing::warn!("Label has no color, falling back to transparent");
                self.fallback()
            }
        }
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::trello()
    }
}
