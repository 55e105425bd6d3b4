mod common;

use metadata_remover::processing::codec::decode;
use metadata_remover::{
    EncodeSettings, FileStage, OutcomeStatus, PngCompression, RemoverError, remove_image_metadata,
};
use tempfile::tempdir;

use common::{gradient_rgb, jpeg_with_metadata, listing, png_with_text, write};

fn settings() -> EncodeSettings {
    EncodeSettings::new(90, PngCompression::Default)
}

#[test]
fn cleans_one_file_into_a_new_folder() -> Result<(), Box<dyn std::error::Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    let source = write(input.path(), "portrait.jpg", &jpeg_with_metadata(&gradient_rgb(18, 30)));
    let dest = output.path().join("clean").join("portrait.png");

    let outcome = remove_image_metadata(&source, &dest, settings())?;

    assert!(outcome.is_success());
    assert_eq!(outcome.output_path, dest);
    let written = decode(&dest)?;
    assert!(!written.has_metadata());
    assert_eq!((written.width, written.height), (18, 30));
    Ok(())
}

#[test]
fn unsupported_output_extension_fails_the_file() -> Result<(), Box<dyn std::error::Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    let source = write(input.path(), "scan.png", &png_with_text(&gradient_rgb(6, 6)));
    let dest = output.path().join("scan.webp");

    let outcome = remove_image_metadata(&source, &dest, settings())?;

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(outcome.failed_stage, Some(FileStage::Encoding));
    assert!(
        outcome.reason.as_deref().unwrap_or_default().contains("Unsupported format"),
        "{:?}",
        outcome.reason
    );
    assert_eq!(outcome.bytes_written, 0);
    assert!(!dest.exists());
    assert!(listing(output.path()).is_empty());
    Ok(())
}

#[test]
fn missing_input_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let result = remove_image_metadata(
        dir.path().join("gone.jpg"),
        dir.path().join("out").join("gone.jpg"),
        settings(),
    );

    assert!(matches!(result, Err(RemoverError::IO(_))));
    assert!(!dir.path().join("out").exists());
}
