//! Bundles the stamped photos into a single zip archive.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use photostamp_common::error::{PhotostampError, PhotostampResult};
use photostamp_sequence_model::batch::InputFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Write `archive_name` into `target_dir` with one entry per input, in
/// input order, each holding the stamped output of that input.
///
/// Any existing archive of the same name is overwritten. Output files are
/// read but left in place. A missing output means the batch is
/// inconsistent and fails with [`PhotostampError::FileNotFound`].
pub fn package(
    target_dir: &Path,
    archive_name: &str,
    inputs: &[InputFile],
) -> PhotostampResult<PathBuf> {
    let archive_path = target_dir.join(archive_name);

    // Resolve every output first so a missing file never leaves a
    // half-written archive behind.
    let mut outputs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let name = input.output_name();
        let path = target_dir.join(&name);
        if !path.is_file() {
            return Err(PhotostampError::FileNotFound { path });
        }
        outputs.push((name, path));
    }

    let file = File::create(&archive_path).map_err(|e| PhotostampError::io(&archive_path, e))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, path) in &outputs {
        let source = File::open(path).map_err(|e| PhotostampError::io(path, e))?;
        writer
            .start_file(name.as_str(), options)
            .map_err(PhotostampError::archive)?;
        std::io::copy(&mut BufReader::new(source), &mut writer)
            .map_err(|e| PhotostampError::archive(format!("writing {name}: {e}")))?;
        tracing::trace!(entry = %name, "Added archive entry");
    }

    let mut inner = writer.finish().map_err(PhotostampError::archive)?;
    inner
        .flush()
        .map_err(|e| PhotostampError::io(&archive_path, e))?;

    tracing::info!(
        archive = %archive_path.display(),
        entries = outputs.len(),
        "Wrote archive"
    );
    Ok(archive_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_package_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"bbb").unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"aaaa").unwrap();

        let inputs = vec![InputFile::new("b.png"), InputFile::new("a.jpeg")];
        let archive_path = package(dir.path(), "photos.zip", &inputs).unwrap();
        assert_eq!(archive_path, dir.path().join("photos.zip"));

        let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.by_index(0).unwrap().name(), "b.jpg");
        assert_eq!(archive.by_index(1).unwrap().name(), "a.jpg");

        let mut content = Vec::new();
        archive
            .by_name("a.jpg")
            .unwrap()
            .read_to_end(&mut content)
            .unwrap();
        assert_eq!(content, b"aaaa");

        assert!(dir.path().join("a.jpg").exists());
    }

    #[test]
    fn test_missing_output_fails_without_archive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"a").unwrap();

        let inputs = vec![InputFile::new("a.png"), InputFile::new("b.png")];
        let err = package(dir.path(), "photos.zip", &inputs).unwrap_err();

        assert!(matches!(err, PhotostampError::FileNotFound { ref path } if path.ends_with("b.jpg")));
        assert!(!dir.path().join("photos.zip").exists());
    }

    #[test]
    fn test_package_overwrites_previous_archive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("photos.zip"), b"stale").unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"a").unwrap();

        package(dir.path(), "photos.zip", &[InputFile::new("a.png")]).unwrap();

        let archive = zip::ZipArchive::new(File::open(dir.path().join("photos.zip")).unwrap()).unwrap();
        assert_eq!(archive.len(), 1);
    }
}
