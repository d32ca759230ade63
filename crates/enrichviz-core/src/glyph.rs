//! Per-node glyph encoding.
//!
//! [`encode`] turns the selection's ordered colors and one node's membership
//! flags into the renderer directive for that node. It is a pure function:
//! the flag adjustment the membership-aware layouts make is handed back in
//! [`GlyphEncoding::adjusted_flags`] rather than written into the input.

use crate::chart::ChartType;
use crate::error::CoreError;

/// Placeholder drawn for a non-member slice in `SplitPie` charts.
pub const BLANK_SLICE: &str = "#ffffff";
/// Placeholder drawn for a non-member arc in `Teeth` charts (fully transparent).
pub const TRANSPARENT_SLICE: &str = "#ffffff00";
/// Alpha suffix appended to member arcs in `Teeth` charts.
pub const OPAQUE_ALPHA: &str = "ff";

/// Result of encoding one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphEncoding {
    /// Directive for the renderer, or `None` when the node belongs to no
    /// selected term and must not get a glyph at all.
    pub spec: Option<String>,
    /// Flags to store back for the node. For `SplitPie` and `Teeth` every
    /// placeholder slice is marked present (1); otherwise equal to the input.
    pub adjusted_flags: Vec<u8>,
}

/// Encodes one node's glyph.
///
/// `colors` and `flags` are parallel vectors in selection order.
pub fn encode(
    colors: &[String],
    flags: &[u8],
    chart: ChartType,
) -> Result<GlyphEncoding, CoreError> {
    if colors.len() != flags.len() {
        return Err(CoreError::LengthMismatch {
            colors: colors.len(),
            flags: flags.len(),
        });
    }

    let mut adjusted_flags = flags.to_vec();
    if flags.iter().all(|&flag| flag == 0) {
        return Ok(GlyphEncoding {
            spec: None,
            adjusted_flags,
        });
    }

    let slices: Vec<String> = if chart.ignores_membership() {
        colors.to_vec()
    } else {
        colors
            .iter()
            .zip(adjusted_flags.iter_mut())
            .map(|(color, flag)| {
                if *flag > 0 {
                    match chart {
                        ChartType::Teeth => format!("{color}{OPAQUE_ALPHA}"),
                        _ => color.clone(),
                    }
                } else {
                    *flag = 1;
                    match chart {
                        ChartType::Teeth => TRANSPARENT_SLICE.to_string(),
                        _ => BLANK_SLICE.to_string(),
                    }
                }
            })
            .collect()
    };

    let spec = format!("{}{}\"", chart.directive(), slices.join(","));
    Ok(GlyphEncoding {
        spec: Some(spec),
        adjusted_flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn colors(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    fn color_list(spec: &str) -> &str {
        let start = spec.find("colorlist=\"").unwrap() + "colorlist=\"".len();
        &spec[start..spec.len() - 1]
    }

    #[test]
    fn no_membership_yields_no_glyph() {
        for chart in ChartType::ALL {
            let out = encode(&colors(&["#ff0000", "#00ff00"]), &[0, 0], chart).unwrap();
            assert_eq!(out.spec, None);
            assert_eq!(out.adjusted_flags, vec![0, 0]);
        }
    }

    #[test]
    fn empty_selection_yields_no_glyph() {
        let out = encode(&[], &[], ChartType::Pie).unwrap();
        assert_eq!(out.spec, None);
        assert!(out.adjusted_flags.is_empty());
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = encode(&colors(&["#ff0000"]), &[1, 0], ChartType::Pie).unwrap_err();
        assert_eq!(err, CoreError::LengthMismatch { colors: 1, flags: 2 });
    }

    #[test]
    fn pie_emits_every_color() {
        let out = encode(
            &colors(&["#ff0000", "#00ff00", "#0000ff"]),
            &[0, 1, 0],
            ChartType::Pie,
        )
        .unwrap();
        insta::assert_snapshot!(
            out.spec.unwrap(),
            @r##"piechart: attributelist="enrichmentTermsIntegers" showlabels="false" colorlist="#ff0000,#00ff00,#0000ff""##
        );
        assert_eq!(out.adjusted_flags, vec![0, 1, 0]);
    }

    #[test]
    fn full_uses_circos_directive() {
        let out = encode(&colors(&["#ff0000", "#00ff00"]), &[1, 0], ChartType::Full).unwrap();
        insta::assert_snapshot!(
            out.spec.unwrap(),
            @r##"circoschart: firstarc=1.0 arcwidth=0.4 attributelist="enrichmentTermsIntegers" showlabels="false" colorlist="#ff0000,#00ff00""##
        );
    }

    #[test]
    fn split_pie_blanks_non_members() {
        let out = encode(&colors(&["#ff0000", "#00ff00"]), &[0, 1], ChartType::SplitPie).unwrap();
        insta::assert_snapshot!(
            out.spec.unwrap(),
            @r##"piechart: attributelist="enrichmentTermsIntegers" showlabels="false" colorlist="#ffffff,#00ff00""##
        );
        assert_eq!(out.adjusted_flags, vec![1, 1]);
    }

    #[test]
    fn teeth_adds_alpha_and_transparent_gaps() {
        let out = encode(
            &colors(&["#ff0000", "#00ff00", "#0000ff"]),
            &[1, 0, 1],
            ChartType::Teeth,
        )
        .unwrap();
        insta::assert_snapshot!(
            out.spec.unwrap(),
            @r##"circoschart: borderwidth=0 firstarc=1.0 arcwidth=0.4 attributelist="enrichmentTermsIntegers" showlabels="false" colorlist="#ff0000ff,#ffffff00,#0000ffff""##
        );
        assert_eq!(out.adjusted_flags, vec![1, 1, 1]);
    }

    #[test]
    fn unassigned_color_stays_blank() {
        let out = encode(&colors(&["", "#00ff00"]), &[1, 1], ChartType::Pie).unwrap();
        assert_eq!(color_list(out.spec.as_deref().unwrap()), ",#00ff00");
    }

    #[test]
    fn input_flags_are_not_mutated() {
        let flags = vec![1u8, 0];
        let out = encode(&colors(&["#ff0000", "#00ff00"]), &flags, ChartType::Teeth).unwrap();
        assert_eq!(flags, vec![1, 0]);
        assert_eq!(out.adjusted_flags, vec![1, 1]);
    }

    fn color_strategy() -> impl Strategy<Value = String> {
        "#[0-9a-f]{6}"
    }

    proptest! {
        #[test]
        fn uniform_layouts_ignore_membership(
            pairs in prop::collection::vec((color_strategy(), 0u8..=1), 1..8),
            full in any::<bool>(),
        ) {
            let (cols, flags): (Vec<String>, Vec<u8>) = pairs.into_iter().unzip();
            let chart = if full { ChartType::Full } else { ChartType::Pie };
            let out = encode(&cols, &flags, chart).unwrap();
            if flags.iter().all(|&f| f == 0) {
                prop_assert!(out.spec.is_none());
            } else {
                let spec = out.spec.unwrap();
                prop_assert_eq!(color_list(&spec), cols.join(","));
            }
            prop_assert_eq!(out.adjusted_flags, flags);
        }

        #[test]
        fn teeth_marks_every_slice_present(
            pairs in prop::collection::vec((color_strategy(), 0u8..=1), 1..8),
        ) {
            let (cols, flags): (Vec<String>, Vec<u8>) = pairs.into_iter().unzip();
            prop_assume!(flags.iter().any(|&f| f > 0));
            let out = encode(&cols, &flags, ChartType::Teeth).unwrap();
            let spec = out.spec.unwrap();
            let slices: Vec<&str> = color_list(&spec).split(',').collect();
            prop_assert_eq!(slices.len(), cols.len());
            for ((slice, color), flag) in slices.iter().zip(&cols).zip(&flags) {
                if *flag > 0 {
                    prop_assert_eq!(slice.to_string(), format!("{color}ff"));
                } else {
                    prop_assert_eq!(*slice, TRANSPARENT_SLICE);
                }
            }
            prop_assert!(out.adjusted_flags.iter().all(|&f| f == 1));
        }
    }
}
