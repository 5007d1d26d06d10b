mod form;
pub use form::*;

mod user;
pub use user::*;
