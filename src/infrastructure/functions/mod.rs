mod ensure_admin;
mod placeholder;

pub use ensure_admin::*;
pub use placeholder::*;
