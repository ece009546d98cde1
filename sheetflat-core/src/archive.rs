//! Archive access: list members and pull one member's bytes

use crate::error::{ExtractError, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    let unreadable = |source: ZipError| ExtractError::ArchiveUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|e| unreadable(ZipError::Io(e)))?;
    ZipArchive::new(BufReader::new(file)).map_err(unreadable)
}

/// Member names in the order they are stored in the archive
pub fn list_members<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let archive = open_archive(path.as_ref())?;
    Ok(archive.file_names().map(str::to_string).collect())
}

/// Read the raw bytes of `member` from the archive at `path`.
///
/// The name must match exactly; directories inside the archive are part of
/// the name (`data/sheet.xlsx`).
pub fn read_member<P: AsRef<Path>>(path: P, member: &str) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let mut archive = open_archive(path)?;

    if !archive.file_names().any(|name| name == member) {
        return Err(ExtractError::MissingMember {
            path: path.to_path_buf(),
            member: member.to_string(),
            available: archive.file_names().map(str::to_string).collect(),
        });
    }

    let unreadable = |source: ZipError| ExtractError::ArchiveUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let mut entry = archive.by_name(member).map_err(unreadable)?;
    debug!(
        "Member '{}': {} bytes compressed, {} bytes uncompressed",
        member,
        entry.compressed_size(),
        entry.size()
    );

    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| unreadable(ZipError::Io(e)))?;

    info!(
        "Extracted '{}' ({} bytes) from {}",
        member,
        bytes.len(),
        path.display()
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, members: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, content) in members {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_read_existing_member() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.zip");
        write_zip(&path, &[("a.txt", b"alpha".as_slice()), ("nested/b.bin", b"\x00\x01\x02".as_slice())]);

        assert_eq!(read_member(&path, "a.txt").unwrap(), b"alpha");
        assert_eq!(read_member(&path, "nested/b.bin").unwrap(), vec![0, 1, 2]);
        assert_eq!(
            list_members(&path).unwrap(),
            vec!["a.txt".to_string(), "nested/b.bin".to_string()]
        );
    }

    #[test]
    fn test_missing_member() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.zip");
        write_zip(&path, &[("a.txt", b"alpha".as_slice())]);

        match read_member(&path, "b.txt") {
            Err(ExtractError::MissingMember {
                member, available, ..
            }) => {
                assert_eq!(member, "b.txt");
                assert_eq!(available, vec!["a.txt".to_string()]);
            }
            other => panic!("expected MissingMember, got {:?}", other),
        }
    }

    #[test]
    fn test_member_name_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.zip");
        write_zip(&path, &[("Data.xlsx", b"x".as_slice())]);

        assert!(matches!(
            read_member(&path, "data.xlsx"),
            Err(ExtractError::MissingMember { .. })
        ));
    }

    #[test]
    fn test_unreadable_archive() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("absent.zip");
        assert!(matches!(
            read_member(&missing, "a.txt"),
            Err(ExtractError::ArchiveUnreadable { .. })
        ));

        let corrupt = dir.path().join("corrupt.zip");
        std::fs::write(&corrupt, b"this is not a zip file").unwrap();
        assert!(matches!(
            list_members(&corrupt),
            Err(ExtractError::ArchiveUnreadable { .. })
        ));
    }
}
