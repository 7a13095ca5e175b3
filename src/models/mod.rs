pub mod batch_state;
pub mod loaders;
pub mod processing_result;
pub mod uploaded_file;

pub use batch_state::BatchState;
pub use loaders::{load_uploaded_file, load_uploaded_files};
pub use processing_result::{ProcessingResult, ResultStatus, NO_NUMBERS_DETECTED};
pub use uploaded_file::UploadedFile;
