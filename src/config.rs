// Tunables handed over from JavaScript at mount time

use wasm_bindgen::prelude::*;

use crate::field::FieldConfig;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BackdropConfig {
    pub field: FieldConfig,
    pub star_count: usize,
    pub trail: bool,
    pub profile: bool,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        BackdropConfig {
            field: FieldConfig::default(),
            star_count: 50,
            trail: true,
            profile: false,
        }
    }
}

/// Options accepted by `mount`. Every field starts at its default, so JS only
/// sets what it wants to change.
#[wasm_bindgen]
#[derive(Copy, Clone, Debug)]
pub struct BackdropOptions {
    pub particle_count: u32,
    pub interaction_radius: f64,
    pub connection_distance: f64,
    pub scroll_wave: f64,
    pub star_count: u32,
    pub trail: bool,
    /// Wraps every frame in `console.time` / `console.timeEnd`.
    pub profile: bool,
}

#[wasm_bindgen]
impl BackdropOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> BackdropOptions {
        BackdropOptions::from(&BackdropConfig::default())
    }
}

impl Default for BackdropOptions {
    fn default() -> Self {
        BackdropOptions::new()
    }
}

impl From<&BackdropConfig> for BackdropOptions {
    fn from(config: &BackdropConfig) -> Self {
        BackdropOptions {
            particle_count: config.field.particle_count as u32,
            interaction_radius: config.field.interaction_radius,
            connection_distance: config.field.connection_distance,
            scroll_wave: config.field.scroll_wave,
            star_count: config.star_count as u32,
            trail: config.trail,
            profile: config.profile,
        }
    }
}

impl From<&BackdropOptions> for BackdropConfig {
    fn from(options: &BackdropOptions) -> Self {
        let defaults = FieldConfig::default();
        let positive_or = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        BackdropConfig {
            field: FieldConfig {
                particle_count: options.particle_count as usize,
                interaction_radius: positive_or(options.interaction_radius, defaults.interaction_radius),
                connection_distance: positive_or(options.connection_distance, defaults.connection_distance),
                scroll_wave: if options.scroll_wave.is_finite() {
                    options.scroll_wave
                } else {
                    defaults.scroll_wave
                },
                ..defaults
            },
            star_count: options.star_count as usize,
            trail: options.trail,
            profile: options.profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_survive_the_js_round_trip() {
        let config = BackdropConfig::from(&BackdropOptions::new());
        assert_eq!(config, BackdropConfig::default());
        assert_eq!(config.field.particle_count, 250);
        assert_eq!(config.field.interaction_radius, 300.0);
    }

    #[test]
    fn nonsense_distances_fall_back() {
        let mut options = BackdropOptions::new();
        options.interaction_radius = 0.0;
        options.connection_distance = f64::NAN;
        options.scroll_wave = 0.0;
        let config = BackdropConfig::from(&options);
        assert_eq!(config.field.interaction_radius, 300.0);
        assert_eq!(config.field.connection_distance, 100.0);
        assert_eq!(config.field.scroll_wave, 0.0);
    }
}
