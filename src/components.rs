mod delete_modal;
pub use delete_modal::*;

mod user_form;
pub use user_form::*;

mod user_table;
pub use user_table::*;
