pub mod forecast_body;
pub mod forecast_display;
pub mod location_header;
pub mod location_picker;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use forecast_body::{ForecastBody, ForecastBodyProps};
pub use forecast_display::{ERROR_ICON, ForecastDisplay, ForecastDisplayProps};
pub use location_header::{LocationHeader, LocationHeaderProps};
pub use location_picker::{LocationPicker, LocationPickerProps};
