use crate::domain::value_objects::component_status::ComponentStatus;

/// Localized labels for status levels.
pub trait Translator: Send + Sync {
    fn translate_status(&self, status: ComponentStatus) -> String;
}
