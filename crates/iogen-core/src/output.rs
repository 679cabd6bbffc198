use std::fs;
use std::io;
use std::path::{Component, Path};

use crate::GeneratedFile;

/// Write generated files under `base`, creating parent directories as needed.
///
/// Every file path must be relative and free of `..` components; anything
/// else is rejected before a single file is written.
pub fn write_files(base: &Path, files: &[GeneratedFile]) -> io::Result<()> {
    if let Some(file) = files.iter().find(|f| !stays_inside(Path::new(&f.path))) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to write {} outside the output directory", file.path),
        ));
    }

    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.content)?;
        log::debug!("wrote {}", path.display());
    }
    Ok(())
}

fn stays_inside(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            GeneratedFile {
                path: "client/client.ts".to_string(),
                content: "export {};\n".to_string(),
            },
            GeneratedFile {
                path: "definitions/Pet.ts".to_string(),
                content: "export type Pet = {};\n".to_string(),
            },
        ];

        write_files(dir.path(), &files).unwrap();

        let written = fs::read_to_string(dir.path().join("definitions/Pet.ts")).unwrap();
        assert_eq!(written, "export type Pet = {};\n");
        assert!(dir.path().join("client/client.ts").is_file());
    }

    #[test]
    fn test_rejects_paths_leaving_base() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("out");
        let files = vec![
            GeneratedFile {
                path: "client/client.ts".to_string(),
                content: String::new(),
            },
            GeneratedFile {
                path: "definitions/../../escape.ts".to_string(),
                content: String::new(),
            },
        ];

        let err = write_files(&base, &files).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(!dir.path().join("escape.ts").exists());
        assert!(!base.join("client/client.ts").exists());
    }

    #[test]
    fn test_rejects_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![GeneratedFile {
            path: "/tmp/escape.ts".to_string(),
            content: String::new(),
        }];
        assert!(write_files(dir.path(), &files).is_err());
    }
}
