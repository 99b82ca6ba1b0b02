pub mod entities;
pub mod ports;
pub mod rollup;
pub mod value_objects;
