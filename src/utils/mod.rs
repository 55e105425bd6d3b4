pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{RemoverError, RemoverResult};
pub use validation::{validate_request, validate_quality};
pub use formats::{ImageFormat, has_supported_extension};
pub use fs::{
    select_candidates,
    output_path_for,
    create_dir_all,
    write_atomic,
    extract_filename,
};
