//! The built-in planet catalog and its stats readout.

use std::fmt::Write as _;

use crate::params::PlanetVisualParameters;
use crate::variant::PlanetVariant;

/// Baseline display stats for a catalog planet (Earth = 1 where relative).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetStats {
    pub mass: f32,
    pub radius: f32,
    pub distance_au: f32,
    pub orbital_period_days: f32,
    pub vegetation_percent: f32,
    pub temperature_k: f32,
    pub size: f32,
    pub atmosphere: f32,
    /// `None` renders as "N/A".
    pub sun_proximity_au: Option<f32>,
}

impl PlanetStats {
    /// One-line readout. `habitability` is `None` while a score is pending.
    pub fn readout(&self, habitability: Option<f32>) -> String {
        let mut line = String::new();
        let _ = write!(
            line,
            "Mass: {:.2} | Distance from Star: {} AU | Temperature: {} K | Vegetation: {}% | Sun Proximity: ",
            self.mass, self.distance_au, self.temperature_k, self.vegetation_percent,
        );
        match self.sun_proximity_au {
            Some(au) => {
                let _ = write!(line, "{au} AU");
            }
            None => line.push_str("N/A"),
        }
        let _ = write!(line, " | Size: {:.2}x Earth | Habitability: ", self.size);
        match habitability {
            Some(score) => {
                let _ = write!(line, "{score:.2}");
            }
            None => line.push_str("Calculating..."),
        }
        line
    }
}

/// A selectable planet: look, stats, and the controls it starts with.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetCatalogEntry {
    pub name: &'static str,
    pub stats: PlanetStats,
    pub variant: PlanetVariant,
    pub defaults: PlanetVisualParameters,
}

#[allow(clippy::too_many_arguments)]
const fn stats(
    mass: f32,
    radius: f32,
    distance_au: f32,
    orbital_period_days: f32,
    vegetation_percent: f32,
    temperature_k: f32,
    size: f32,
    atmosphere: f32,
    sun_proximity_au: Option<f32>,
) -> PlanetStats {
    PlanetStats {
        mass,
        radius,
        distance_au,
        orbital_period_days,
        vegetation_percent,
        temperature_k,
        size,
        atmosphere,
        sun_proximity_au,
    }
}

/// All catalog planets in display order. Earth comes first and is the
/// startup selection.
pub fn catalog() -> Vec<PlanetCatalogEntry> {
    vec![
        PlanetCatalogEntry {
            name: "Earth",
            stats: stats(1.0, 1.0, 1.0, 365.0, 56.0, 288.0, 1.0, 1.0, None),
            variant: PlanetVariant::layered(
                "Earth",
                "earthh.png",
                "ground.jpg",
                "finalLand.png",
                "seafinal.png",
            ),
            defaults: PlanetVisualParameters::new(0.0, 0.0, 0.2, 1.0),
        },
        PlanetCatalogEntry {
            name: "Kepler-22b",
            stats: stats(2.4, 2.38, 0.849, 290.0, 0.0, 295.0, 2.4, 0.7, Some(0.849)),
            variant: PlanetVariant::compact("Kepler-22b", "keplarveg.png", "keplarland.png"),
            defaults: PlanetVisualParameters::default(),
        },
        PlanetCatalogEntry {
            name: "Kepler-1229b",
            stats: stats(1.8, 1.4, 0.581, 86.0, 0.0, 243.0, 1.4, 0.8, Some(0.581)),
            variant: PlanetVariant::vegetation_tinted(
                "Kepler-1229b",
                "kepler1229b.jpg",
                "Keplernew.png",
                "clouds.jpg",
            ),
            defaults: PlanetVisualParameters::default(),
        },
        PlanetCatalogEntry {
            name: "Kepler-1544",
            stats: stats(1.9, 1.6, 0.659, 168.0, 0.0, 258.0, 1.6, 0.75, Some(0.659)),
            variant: PlanetVariant::vegetation_tinted(
                "Kepler-1544",
                "kepler1544b.jpg",
                "keplernew.png",
                "clouds.jpg",
            ),
            defaults: PlanetVisualParameters::default(),
        },
        PlanetCatalogEntry {
            name: "Kepler-442",
            stats: stats(2.36, 1.34, 0.409, 112.0, 0.0, 233.0, 1.34, 0.8, Some(0.409)),
            variant: PlanetVariant::vegetation_tinted(
                "Kepler-442",
                "kepler442b.jpg",
                "keplernew.png",
                "clouds.jpg",
            ),
            defaults: PlanetVisualParameters::default(),
        },
    ]
}

/// Look up an entry by name, ignoring ASCII case.
pub fn find_entry(name: &str) -> Option<PlanetCatalogEntry> {
    catalog()
        .into_iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(name))
}
