//! # preschool-map
//!
//! Tableau de bord des sous-zones: écart entre l'offre de places
//! préscolaires et la demande, ou population d'âge préscolaire, par année.
//!
//! ## Features
//!
//! - Carte GeoJSON colorée (remplissage + contour) prête pour le rendu
//! - Tableau trié (CSV), légende, série temporelle par sous-zone
//! - Dégradation gracieuse: un fichier illisible donne des vues vides
//!
//! ## Usage CLI
//!
//! ```bash
//! # Toutes les vues pour 2026, mode écart offre/demande
//! preschool-map render --mode demand-mismatch --year 2026 --output ./out/
//!
//! # Tableau de population en console
//! preschool-map table --mode population --year 2024
//!
//! # Série temporelle d'une sous-zone
//! preschool-map series --subzone "BEDOK NORTH"
//! ```

pub mod config;
pub mod export;
pub mod report;
pub mod session;

pub use config::Config;
pub use report::{RenderReport, RenderStatus};
pub use session::Session;
