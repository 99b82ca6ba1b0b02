pub mod i18n;
pub mod notifications;
pub mod persistence;
