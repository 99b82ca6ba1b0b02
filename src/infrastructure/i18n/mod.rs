pub mod static_translator;

pub use static_translator::{Language, StaticTranslator};
