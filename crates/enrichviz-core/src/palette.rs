//! Color palettes for chart slices.
//!
//! A [`PaletteRegistry`] resolves palettes by provider and name. The
//! built-in [`BrewerPalettes`] registry ships the ColorBrewer qualitative
//! palettes, including the default used when a graph has no palette recorded
//! in its session.

use serde::{Deserialize, Serialize};

/// Provider consulted when no session palette is recorded.
pub const DEFAULT_PALETTE_PROVIDER: &str = "ColorBrewer";
/// Palette consulted when no session palette is recorded.
pub const DEFAULT_PALETTE_NAME: &str = "Paired colors";

/// An ordered list of colors, identified by provider and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub provider: String,
    pub name: String,
    pub colors: Vec<String>,
}

impl Palette {
    pub fn new(
        provider: impl Into<String>,
        name: impl Into<String>,
        colors: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Palette {
            provider: provider.into(),
            name: name.into(),
            colors: colors.into_iter().map(Into::into).collect(),
        }
    }

    /// Color for the `index`-th slice, cycling through the palette.
    pub fn color_at(&self, index: usize) -> Option<&str> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors[index % self.colors.len()].as_str())
    }
}

/// Lookup of palettes by provider and palette name.
pub trait PaletteRegistry {
    fn palette(&self, provider: &str, name: &str) -> Option<Palette>;
}

/// ColorBrewer qualitative palettes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrewerPalettes;

const PAIRED: [&str; 12] = [
    "#A6CEE3", "#1F78B4", "#B2DF8A", "#33A02C", "#FB9A99", "#E31A1C", "#FDBF6F", "#FF7F00",
    "#CAB2D6", "#6A3D9A", "#FFFF99", "#B15928",
];

const SET1: [&str; 9] = [
    "#E41A1C", "#377EB8", "#4DAF4A", "#984EA3", "#FF7F00", "#FFFF33", "#A65628", "#F781BF",
    "#999999",
];

const SET3: [&str; 12] = [
    "#8DD3C7", "#FFFFB3", "#BEBADA", "#FB8072", "#80B1D3", "#FDB462", "#B3DE69", "#FCCDE5",
    "#D9D9D9", "#BC80BD", "#CCEBC5", "#FFED6F",
];

const DARK2: [&str; 8] = [
    "#1B9E77", "#D95F02", "#7570B3", "#E7298A", "#66A61E", "#E6AB02", "#A6761D", "#666666",
];

impl BrewerPalettes {
    /// Names of the palettes this registry serves.
    pub fn names(&self) -> [&'static str; 4] {
        ["Paired colors", "Set1 colors", "Set3 colors", "Dark2 colors"]
    }
}

impl PaletteRegistry for BrewerPalettes {
    fn palette(&self, provider: &str, name: &str) -> Option<Palette> {
        if provider != DEFAULT_PALETTE_PROVIDER {
            return None;
        }
        let colors: &[&str] = match name {
            "Paired colors" => &PAIRED,
            "Set1 colors" => &SET1,
            "Set3 colors" => &SET3,
            "Dark2 colors" => &DARK2,
            _ => return None,
        };
        Some(Palette::new(provider, name, colors.iter().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_available() {
        let palette = BrewerPalettes
            .palette(DEFAULT_PALETTE_PROVIDER, DEFAULT_PALETTE_NAME)
            .unwrap();
        assert_eq!(palette.colors.len(), 12);
        assert_eq!(palette.colors[0], "#A6CEE3");
    }

    #[test]
    fn unknown_provider_or_name_resolves_to_none() {
        assert!(BrewerPalettes.palette("Viridis", "Paired colors").is_none());
        assert!(BrewerPalettes.palette("ColorBrewer", "Rainbow").is_none());
    }

    #[test]
    fn every_listed_name_resolves() {
        for name in BrewerPalettes.names() {
            assert!(BrewerPalettes.palette(DEFAULT_PALETTE_PROVIDER, name).is_some());
        }
    }

    #[test]
    fn color_at_cycles() {
        let palette = Palette::new("p", "n", ["#1", "#2", "#3"]);
        assert_eq!(palette.color_at(4), Some("#2"));
        assert_eq!(Palette::new("p", "empty", Vec::<String>::new()).color_at(0), None);
    }
}
