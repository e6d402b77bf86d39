pub mod navigator;
pub mod notifier;
pub mod token_store;

pub use navigator::{HistoryNavigator, Navigator};
pub use notifier::{ConsoleNotifier, Notice, Notifier};
pub use token_store::{FileTokenStore, StaticTokenProvider, TokenProvider};
