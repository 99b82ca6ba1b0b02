pub mod collapse_mode;
pub mod component_status;
pub mod status_color;

pub use collapse_mode::CollapseMode;
pub use component_status::ComponentStatus;
pub use status_color::StatusColor;
