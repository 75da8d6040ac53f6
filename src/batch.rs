//! File-level orchestration: naming of the stored artifacts, single-unit
//! encode/decode, and parallel encoding of a whole directory.
//!
//! Each unit is encoded into two files next to each other in the output
//! directory, `<base>-map.bin` (the serialized [`Codebook`]) and
//! `<base>-data.bin` (the packed bits). Units are independent; a failed unit
//! is reported in [`BatchReport::failed`] and the rest of the batch carries on.

use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::codebook::Codebook;
use crate::error::{BatchError, UnitError};

pub const CODEBOOK_SUFFIX: &str = "-map.bin";
pub const DATA_SUFFIX: &str = "-data.bin";
pub const DECODED_EXTENSION: &str = "txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Worker threads; 0 lets rayon pick.
    pub jobs: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./input"),
            output_dir: PathBuf::from("./output"),
            jobs: 0,
        }
    }
}

/// Paths of the two stores that make up one encoded unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPaths {
    pub codebook: PathBuf,
    pub data: PathBuf,
}

impl UnitPaths {
    pub fn for_base(base: &Path) -> Self {
        let with_suffix = |suffix: &str| {
            let mut name = base.as_os_str().to_owned();
            name.push(suffix);
            PathBuf::from(name)
        };

        Self {
            codebook: with_suffix(CODEBOOK_SUFFIX),
            data: with_suffix(DATA_SUFFIX),
        }
    }
}

/// The unit name for an input file: everything before the first `.`.
pub fn unit_base_name(file_name: &str) -> &str {
    match file_name.split('.').next() {
        Some(base) if !base.is_empty() => base,
        _ => file_name,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitReport {
    pub input: PathBuf,
    pub paths: UnitPaths,
    pub original_len: usize,
    pub packed_len: usize,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub encoded: Vec<UnitReport>,
    pub failed: Vec<UnitError>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Encodes one file into its codebook and data stores under `output_dir`.
pub fn encode_file(input: &Path, output_dir: &Path) -> Result<UnitReport, UnitError> {
    let buffer = fs::read(input).map_err(|e| UnitError::io(input, e))?;
    let encoded = crate::encode(&buffer).map_err(|e| UnitError::codec(input, e))?;

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let paths = UnitPaths::for_base(&output_dir.join(unit_base_name(&file_name)));

    let codebook = encoded
        .codebook
        .to_bytes()
        .map_err(|e| UnitError::codec(input, e))?;
    fs::write(&paths.codebook, codebook).map_err(|e| UnitError::io(&paths.codebook, e))?;
    fs::write(&paths.data, &encoded.packed).map_err(|e| UnitError::io(&paths.data, e))?;

    info!(
        path = %input.display(),
        bytes = buffer.len(),
        packed = encoded.packed.len(),
        "encoded"
    );

    Ok(UnitReport {
        input: input.to_path_buf(),
        paths,
        original_len: buffer.len(),
        packed_len: encoded.packed.len(),
    })
}

/// Decodes the unit stored at `base` and writes `<output_dir>/<name>.txt`.
pub fn decode_unit(base: &Path, output_dir: &Path) -> Result<PathBuf, UnitError> {
    let paths = UnitPaths::for_base(base);

    let raw = fs::read(&paths.codebook).map_err(|e| UnitError::io(&paths.codebook, e))?;
    let codebook = Codebook::from_bytes(&raw).map_err(|e| UnitError::codec(&paths.codebook, e))?;
    let packed = fs::read(&paths.data).map_err(|e| UnitError::io(&paths.data, e))?;
    let decoded = crate::decode(&codebook, &packed).map_err(|e| UnitError::codec(base, e))?;

    fs::create_dir_all(output_dir).map_err(|e| UnitError::io(output_dir, e))?;
    let mut name = base.file_name().unwrap_or(base.as_os_str()).to_owned();
    name.push(".");
    name.push(DECODED_EXTENSION);
    let out = output_dir.join(name);
    fs::write(&out, &decoded).map_err(|e| UnitError::io(&out, e))?;

    info!(unit = %base.display(), bytes = decoded.len(), output = %out.display(), "decoded");
    Ok(out)
}

/// Encodes every regular file in `config.input_dir` in parallel.
pub fn encode_dir(config: &BatchConfig) -> Result<BatchReport, BatchError> {
    let entries = fs::read_dir(&config.input_dir).map_err(|source| BatchError::InputDir {
        path: config.input_dir.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| BatchError::InputDir {
            path: config.input_dir.clone(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-file entry");
        }
    }
    files.sort();

    fs::create_dir_all(&config.output_dir).map_err(|source| BatchError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    // one task per unit name, so no two tasks write the same stores
    let mut report = BatchReport::default();
    let mut units: HashMap<String, PathBuf> = HashMap::new();
    let mut unique = Vec::with_capacity(files.len());
    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let unit = unit_base_name(&file_name).to_string();
        match units.get(&unit) {
            Some(kept) => {
                let error = UnitError::NameCollision {
                    path,
                    unit,
                    kept: kept.clone(),
                };
                warn!(%error, "unit skipped");
                report.failed.push(error);
            }
            None => {
                units.insert(unit, path.clone());
                unique.push(path);
            }
        }
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()?;
    let results: Vec<_> = pool.install(|| {
        unique
            .par_iter()
            .map(|path| encode_file(path, &config.output_dir))
            .collect()
    });

    for result in results {
        match result {
            Ok(unit) => report.encoded.push(unit),
            Err(error) => {
                warn!(%error, "unit failed, continuing");
                report.failed.push(error);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn base_name_stops_at_first_dot() {
        assert_eq!(unit_base_name("notes.tar.gz"), "notes");
        assert_eq!(unit_base_name("README"), "README");
        assert_eq!(unit_base_name(".hidden"), ".hidden");
    }

    #[test]
    fn unit_paths_share_a_base() {
        let paths = UnitPaths::for_base(Path::new("out/notes"));
        assert_eq!(paths.codebook, PathBuf::from("out/notes-map.bin"));
        assert_eq!(paths.data, PathBuf::from("out/notes-data.bin"));
    }

    #[test]
    fn file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("story.txt");
        fs::write(&input, b"once upon a time there was a bit").unwrap();

        let report = encode_file(&input, dir.path()).unwrap();
        assert!(report.paths.codebook.exists());
        assert!(report.paths.data.exists());

        let decoded_dir = dir.path().join("decoded");
        let out = decode_unit(&dir.path().join("story"), &decoded_dir).unwrap();
        assert_eq!(out, decoded_dir.join("story.txt"));
        assert_eq!(fs::read(out).unwrap(), b"once upon a time there was a bit");
    }

    #[test]
    fn empty_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("empty.bin");
        fs::write(&input, b"").unwrap();

        let report = encode_file(&input, dir.path()).unwrap();
        assert_eq!(report.packed_len, 0);

        let out = decode_unit(&dir.path().join("empty"), dir.path()).unwrap();
        assert!(fs::read(out).unwrap().is_empty());
    }

    #[test]
    fn encode_dir_processes_every_file() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        for (name, body) in [
            ("a.txt", &b"alpha"[..]),
            ("b.txt", &b"bravo bravo"[..]),
            ("c", &b""[..]),
        ] {
            fs::write(input.path().join(name), body).unwrap();
        }
        fs::create_dir(input.path().join("nested")).unwrap();

        let config = BatchConfig {
            input_dir: input.path().to_path_buf(),
            output_dir: output.path().join("out"),
            jobs: 2,
        };
        let report = encode_dir(&config).unwrap();

        assert!(report.is_success());
        assert_eq!(report.encoded.len(), 3);
        for base in ["a", "b", "c"] {
            let paths = UnitPaths::for_base(&config.output_dir.join(base));
            assert!(paths.codebook.exists(), "{base}");
            assert!(paths.data.exists(), "{base}");
        }
    }

    #[test]
    fn shared_unit_name_keeps_first_file_and_reports_the_rest() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("a.md"), b"markdown notes").unwrap();
        fs::write(input.path().join("a.txt"), b"plain text body").unwrap();
        fs::write(input.path().join("b.txt"), b"unrelated").unwrap();

        let config = BatchConfig {
            input_dir: input.path().to_path_buf(),
            output_dir: output.path().to_path_buf(),
            jobs: 2,
        };
        let report = encode_dir(&config).unwrap();

        assert!(!report.is_success());
        assert_eq!(report.encoded.len(), 2);
        assert_eq!(report.failed.len(), 1);
        match &report.failed[0] {
            UnitError::NameCollision { path, unit, kept } => {
                assert_eq!(path, &input.path().join("a.txt"));
                assert_eq!(unit, "a");
                assert_eq!(kept, &input.path().join("a.md"));
            }
            other => panic!("unexpected error {other}"),
        }

        let out = decode_unit(&output.path().join("a"), &output.path().join("decoded")).unwrap();
        assert_eq!(fs::read(out).unwrap(), b"markdown notes");
    }

    #[test]
    fn missing_input_dir_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = BatchConfig {
            input_dir: dir.path().join("nope"),
            output_dir: dir.path().join("out"),
            jobs: 1,
        };
        assert!(matches!(encode_dir(&config), Err(BatchError::InputDir { .. })));
    }

    #[test]
    fn corrupt_codebook_fails_the_unit() {
        let dir = TempDir::new().unwrap();
        let paths = UnitPaths::for_base(&dir.path().join("broken"));
        fs::write(&paths.codebook, b"not msgpack").unwrap();
        fs::write(&paths.data, b"").unwrap();

        let err = decode_unit(&dir.path().join("broken"), dir.path()).unwrap_err();
        assert!(matches!(err, UnitError::Codec { .. }));
    }

    #[test]
    fn missing_unit_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = decode_unit(&dir.path().join("ghost"), dir.path()).unwrap_err();
        assert!(matches!(err, UnitError::Io { .. }));
    }
}
