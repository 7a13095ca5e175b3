pub mod dispatcher;
pub mod validator;

pub use dispatcher::{process_file, Dispatcher};
pub use validator::FileValidator;
