mod auth;
mod chat;
mod completion;
mod event;
mod form;
mod language;
mod localized;
mod project;
mod store;
pub mod texts;

pub use auth::*;
pub use chat::*;
pub use completion::*;
pub use event::*;
pub use form::*;
pub use language::*;
pub use localized::*;
pub use project::*;
pub use store::*;
