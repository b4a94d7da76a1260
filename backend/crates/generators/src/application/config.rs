//! Generator Configuration

use crate::domain::country::Country;
use crate::domain::seed::SEED_MAX_LENGTH;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Country used when the request omits one
    pub default_country: Country,
    /// Countries the generator endpoint accepts
    pub enabled_countries: Vec<Country>,
    /// Upper bound on seed length (never above 64)
    pub max_seed_length: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_country: Country::De,
            enabled_countries: Country::ALL.to_vec(),
            max_seed_length: SEED_MAX_LENGTH,
        }
    }
}

impl GeneratorConfig {
    /// Development configuration (same as default)
    pub fn development() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, country: Country) -> bool {
        self.enabled_countries.contains(&country)
    }
}
