mod home;
pub use home::*;

mod user_detail;
pub use user_detail::*;
