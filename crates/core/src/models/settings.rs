use serde::{Deserialize, Serialize};

use super::ownership::Perspective;

/// User-configurable settings, stored inside the household file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency code every amount is displayed in. There is no conversion:
    /// all values are in this single currency.
    pub display_currency: String,

    /// Perspective the dashboard opens with.
    pub default_perspective: Perspective,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_currency: "INR".to_string(),
            default_perspective: Perspective::Family,
        }
    }
}
