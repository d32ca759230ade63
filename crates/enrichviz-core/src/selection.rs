//! The ordered term selection driving a chart.
//!
//! Insertion order is significant: it fixes the column order of every node's
//! flag and name vectors and the segment order of the drawn glyph. Backed by
//! [`IndexMap`] so lookups by [`TermId`] stay cheap while order is kept.

use indexmap::IndexMap;

use crate::id::TermId;
use crate::palette::Palette;
use crate::term::EnrichmentTerm;

/// A selected term together with its assigned color.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedTerm {
    pub term: EnrichmentTerm,
    /// `None` when no color was assigned; rendered as an empty color entry.
    pub color: Option<String>,
}

/// Ordered map from term to color-or-unassigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    terms: IndexMap<TermId, SelectedTerm>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Assigns palette colors to `terms` in order, wrapping around when there
    /// are more terms than colors. An empty palette leaves every term
    /// unassigned.
    pub fn with_palette(
        terms: impl IntoIterator<Item = EnrichmentTerm>,
        palette: &Palette,
    ) -> Self {
        let mut selection = Selection::new();
        for (i, term) in terms.into_iter().enumerate() {
            let color = palette.color_at(i).map(str::to_string);
            selection.insert(term, color);
        }
        selection
    }

    /// Adds a term at the end, or updates the color of an already selected
    /// term in place (its position is kept).
    pub fn insert(&mut self, term: EnrichmentTerm, color: Option<String>) {
        let color = color.filter(|c| !c.is_empty());
        self.terms
            .insert(term.id().clone(), SelectedTerm { term, color });
    }

    /// Removes a term, preserving the relative order of the remaining ones.
    pub fn remove(&mut self, id: &TermId) -> Option<SelectedTerm> {
        self.terms.shift_remove(id)
    }

    pub fn get(&self, id: &TermId) -> Option<&SelectedTerm> {
        self.terms.get(id)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Selected terms in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &SelectedTerm> {
        self.terms.values()
    }

    /// Colors in selection order, with `""` for unassigned entries.
    pub fn ordered_colors(&self) -> Vec<String> {
        self.terms
            .values()
            .map(|sel| sel.color.clone().unwrap_or_default())
            .collect()
    }

    /// Term names in selection order.
    pub fn term_names(&self) -> Vec<String> {
        self.terms
            .values()
            .map(|sel| sel.term.name().to_string())
            .collect()
    }
}

impl FromIterator<(EnrichmentTerm, Option<String>)> for Selection {
    fn from_iter<I: IntoIterator<Item = (EnrichmentTerm, Option<String>)>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for (term, color) in iter {
            selection.insert(term, color);
        }
        selection
    }
}
