//! Légende de la carte

use serde::Serialize;

use crate::color::{Rgb, DARK_RED, LIGHT_YELLOW};
use crate::types::Mode;

/// Extrémités du dégradé, barre CSS et texte explicatif
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub low: Rgb,
    pub high: Rgb,
    /// Dégradé CSS gauche → droite de la barre de légende
    pub gradient: String,
    pub caption: &'static str,
}

impl Legend {
    pub fn for_mode(mode: Mode) -> Self {
        let caption = match mode {
            Mode::DemandMismatch => {
                "Gradient: High Net Supply (light yellow) to Low/Negative Net Supply (dark red) \
                 [Outlined subzones have demand>supply]"
            }
            Mode::Population => {
                "Gradient: Low Population (light yellow) to High Population (dark red)"
            }
        };

        Self {
            low: LIGHT_YELLOW,
            high: DARK_RED,
            gradient: css_gradient(LIGHT_YELLOW, DARK_RED),
            caption,
        }
    }
}

fn css_gradient(low: Rgb, high: Rgb) -> String {
    format!("linear-gradient(to right, {}, {})", low.css(), high.css())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captions_depend_on_mode() {
        let mismatch = Legend::for_mode(Mode::DemandMismatch);
        assert!(mismatch.caption.contains("[Outlined subzones have demand>supply]"));
        assert!(mismatch.caption.contains("Net Supply (dark red) [Outlined"));

        let population = Legend::for_mode(Mode::Population);
        assert!(population.caption.starts_with("Gradient: Low Population"));
        assert_eq!(population.low, mismatch.low);
    }

    #[test]
    fn test_css_gradient() {
        assert_eq!(
            Legend::for_mode(Mode::Population).gradient,
            "linear-gradient(to right, rgb(255,255,204), rgb(153,0,0))"
        );
    }
}
