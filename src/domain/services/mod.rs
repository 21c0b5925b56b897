mod admin_workflow;
mod auth;
mod browser;
pub mod chat_widget;
#[cfg(test)]
pub mod fakes;
mod language_context;
mod project_query;
mod project_repository;
mod screenshots;

pub use admin_workflow::*;
pub use auth::*;
pub use browser::*;
pub use chat_widget::ChatWidget;
pub use language_context::*;
pub use project_query::*;
pub use project_repository::*;
pub use screenshots::*;
