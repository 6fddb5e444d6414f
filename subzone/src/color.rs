//! Couleur de remplissage et épaisseur de contour d'une sous-zone
//!
//! Dégradé linéaire du jaune clair (norm = 0) au rouge foncé (norm = 1).
//! Une population nulle force toujours le gris neutre, quel que soit le mode.
//! Une population non numérique n'est pas nulle: seul le mode population,
//! qui n'a rien à placer dans le dégradé, la peint en gris.

use serde::Serialize;

use crate::range::ValueRange;
use crate::types::Mode;

/// Contour épais: demande supérieure à l'offre
pub const BOLD_STROKE: u32 = 50;

/// Contour normal
pub const DEFAULT_STROKE: u32 = 5;

/// Couleur RGB, sérialisée en `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub [u8; 3]);

pub const LIGHT_YELLOW: Rgb = Rgb([255, 255, 204]);
pub const DARK_RED: Rgb = Rgb([153, 0, 0]);
pub const NEUTRAL_GRAY: Rgb = Rgb([128, 128, 128]);

impl Rgb {
    /// Interpolation linéaire canal par canal, `t` borné à [0, 1]
    pub fn lerp(from: Rgb, to: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mut out = [0u8; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            let a = f64::from(from.0[i]);
            let b = f64::from(to.0[i]);
            *channel = (a - t * (a - b)).round().clamp(0.0, 255.0) as u8;
        }
        Rgb(out)
    }

    /// Notation CSS `rgb(r,g,b)`
    pub fn css(self) -> String {
        let [r, g, b] = self.0;
        format!("rgb({},{},{})", r, g, b)
    }
}

/// Position dans le dégradé jaune clair → rouge foncé
pub fn gradient(norm: f64) -> Rgb {
    Rgb::lerp(LIGHT_YELLOW, DARK_RED, norm)
}

/// Style de rendu d'une sous-zone pour l'année sélectionnée
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Paint {
    pub fill: Rgb,
    pub stroke_width: u32,
}

/// Calcule le style d'une sous-zone.
///
/// `population` et `net_supply` sont les valeurs de l'année sélectionnée
/// (`population` vaut `None` si elle n'est pas numérique), `range` les
/// bornes calculées pour `mode`.
pub fn paint(
    mode: Mode,
    range: &ValueRange,
    population: Option<f64>,
    net_supply: f64,
) -> Paint {
    let mut paint = match mode {
        Mode::DemandMismatch => {
            // Inversé: faible offre nette → rouge foncé
            let norm = 1.0 - range.normalize(net_supply);
            Paint {
                fill: gradient(norm),
                stroke_width: if net_supply < 0.0 {
                    BOLD_STROKE
                } else {
                    DEFAULT_STROKE
                },
            }
        }
        Mode::Population => {
            let fill = match population {
                Some(value) if value.is_finite() && value > 0.0 => {
                    gradient(range.normalize_from_zero(value))
                }
                _ => NEUTRAL_GRAY,
            };
            Paint {
                fill,
                stroke_width: DEFAULT_STROKE,
            }
        }
    };

    if population == Some(0.0) {
        paint.fill = NEUTRAL_GRAY;
    }
    paint
}
