//! KB Configuration

#[derive(Debug, Clone)]
pub struct KbConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub max_tags: usize,
}

impl Default for KbConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            max_tags: 10,
        }
    }
}

impl KbConfig {
    /// Development configuration (same as default)
    pub fn development() -> Self {
        Self::default()
    }
}
