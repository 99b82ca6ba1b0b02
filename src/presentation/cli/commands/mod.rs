pub mod component;
pub mod group;
pub mod status;
