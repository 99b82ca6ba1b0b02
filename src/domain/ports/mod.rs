pub mod notifier;
pub mod store;
pub mod translator;

pub use notifier::{NotificationError, Notifier};
pub use store::{StoreError, TransactionOp, TreeReader, TreeStore, TreeTransaction};
pub use translator::Translator;
