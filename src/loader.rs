//! This module provides the `MachineLoader` struct, responsible for loading
//! machine definitions from files and strings.

use crate::parser::parse;
use crate::types::{MachineSpec, NtmError};
use std::fs;
use std::path::{Path, PathBuf};

/// `MachineLoader` is a utility struct for loading machine definitions.
/// It provides methods to load a definition from an individual file, from
/// string content, and to discover and load all `.ntm` files within a
/// directory.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads a single machine definition from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineSpec)` if the file is successfully read and parsed.
    /// * `Err(NtmError::FileError)` if the file cannot be read.
    /// * `Err(NtmError::ParseError)` if the content is not a valid definition.
    pub fn load_machine(path: &Path) -> Result<MachineSpec, NtmError> {
        let content = fs::read_to_string(path).map_err(|e| {
            NtmError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single machine definition from the provided string content.
    ///
    /// This is useful for definitions that are not stored in files, e.g. from
    /// user input.
    pub fn load_machine_from_string(content: &str) -> Result<MachineSpec, NtmError> {
        parse(content)
    }

    /// Loads all machine definition files (`.ntm` extension) from a directory.
    ///
    /// It iterates through the directory, attempts to load each `.ntm` file,
    /// and collects the results. Directories and non-`.ntm` files are skipped.
    pub fn load_machines(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, MachineSpec), NtmError>> {
        if !directory.exists() {
            return vec![Err(NtmError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(NtmError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(NtmError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and non-.ntm files
                if path.is_dir() || path.extension().is_none_or(|ext| ext != "ntm") {
                    return None;
                }

                match Self::load_machine(&path) {
                    Ok(spec) => Some(Ok((path, spec))),
                    Err(e) => Some(Err(NtmError::FileError(format!(
                        "Failed to load machine from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const VALID_MACHINE: &str = "\
StartsWithOne
q0,qacc,qrej
0,1
0,1,_
q0
qacc
qrej
q0,1,qacc,1,R
";

    #[test]
    fn test_load_valid_machine() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.ntm");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(VALID_MACHINE.as_bytes()).unwrap();

        let result = MachineLoader::load_machine(&file_path);
        assert!(result.is_ok());

        let spec = result.unwrap();
        assert_eq!(spec.name, "StartsWithOne");
        assert_eq!(spec.start_state, "q0");
        assert_eq!(spec.rules.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = MachineLoader::load_machine(&dir.path().join("missing.ntm"));

        assert!(matches!(result.unwrap_err(), NtmError::FileError(_)));
    }

    #[test]
    fn test_load_invalid_machine() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.ntm");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"This is not a machine definition").unwrap();

        let result = MachineLoader::load_machine(&file_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_machines_from_directory() {
        let dir = tempdir().unwrap();

        // Create a valid machine file
        let valid_path = dir.path().join("valid.ntm");
        let mut valid_file = File::create(&valid_path).unwrap();
        valid_file.write_all(VALID_MACHINE.as_bytes()).unwrap();

        // Create an invalid machine file
        let invalid_path = dir.path().join("invalid.ntm");
        let mut invalid_file = File::create(&invalid_path).unwrap();
        invalid_file.write_all(b"not a machine").unwrap();

        // Create a non-.ntm file that should be ignored
        let ignored_path = dir.path().join("ignored.txt");
        let mut ignored_file = File::create(&ignored_path).unwrap();
        ignored_file.write_all(b"ignore me").unwrap();

        let results = MachineLoader::load_machines(dir.path());

        // We should have 2 results: 1 success and 1 error
        assert_eq!(results.len(), 2);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    }

    #[test]
    fn test_load_machines_from_missing_directory() {
        let dir = tempdir().unwrap();
        let results = MachineLoader::load_machines(&dir.path().join("nope"));

        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
