use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use tracing::debug;

use crate::{
    error::{Error, Result},
    model::Coordinates,
};

/// File name of the config file, looked up in the user's home directory.
pub const CONFIG_FILE_NAME: &str = ".lotemp";

const LATITUDE_KEY: &str = "latitude";
const LONGITUDE_KEY: &str = "longitude";

/// Path to the config file: `$HOME/.lotemp`.
pub fn config_file_path() -> Result<PathBuf> {
    let dirs = BaseDirs::new().ok_or(Error::NoHomeDir)?;
    Ok(dirs.home_dir().join(CONFIG_FILE_NAME))
}

/// Load coordinates from `$HOME/.lotemp`.
pub fn load() -> Result<Coordinates> {
    load_from(&config_file_path()?)
}

/// Load coordinates from a config file. A missing file is an error; there is
/// no fallback to the built-in coordinates.
pub fn load_from(path: &Path) -> Result<Coordinates> {
    let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::ConfigNotFound(path.to_path_buf()),
        _ => Error::ConfigRead { path: path.to_path_buf(), source },
    })?;

    debug!(path = %path.display(), "read config file");
    parse(&contents)
}

/// Parse `latitude: <value>` / `longitude: <value>` lines. Unrelated lines are
/// skipped and the first occurrence of each key wins.
pub fn parse(contents: &str) -> Result<Coordinates> {
    let mut latitude = None;
    let mut longitude = None;

    for (idx, line) in contents.lines().enumerate() {
        let line_no = idx + 1;

        let Some((key, value)) = match_key(line) else {
            continue;
        };
        let value = value.ok_or(Error::MalformedLine { line_no, key })?;

        let slot = if key == LATITUDE_KEY { &mut latitude } else { &mut longitude };
        if slot.is_some() {
            debug!(line_no, key, "ignoring duplicate config key");
            continue;
        }
        *slot = Some(value);
    }

    let latitude = latitude.ok_or(Error::MissingKey { key: LATITUDE_KEY })?;
    let longitude = longitude.ok_or(Error::MissingKey { key: LONGITUDE_KEY })?;

    Coordinates::new(latitude, longitude)
}

/// Returns the recognised key and its first whitespace-delimited token, if any.
fn match_key(line: &str) -> Option<(&'static str, Option<&str>)> {
    let line = line.trim_start();

    [LATITUDE_KEY, LONGITUDE_KEY].into_iter().find_map(|key| {
        let rest = line.strip_prefix(key)?.strip_prefix(':')?;
        Some((key, rest.split_whitespace().next()))
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_both_keys_in_either_order() {
        let a = parse("latitude: 60.17116\nlongitude: 24.93265\n").expect("valid config");
        let b = parse("longitude: 24.93265\nlatitude: 60.17116\n").expect("valid config");

        assert_eq!(a, b);
        assert_eq!(a.latitude.as_str(), "60.17116");
        assert_eq!(a.longitude.as_str(), "24.93265");
    }

    #[test]
    fn skips_unrelated_lines() {
        let contents = "\
# home
units: metric
longitude: 24.93265 trailing words

  latitude:   60.17116
latitudes: 1
";
        let coords = parse(contents).expect("valid config");
        assert_eq!(coords.latitude.as_str(), "60.17116");
        assert_eq!(coords.longitude.as_str(), "24.93265");
    }

    #[test]
    fn first_occurrence_wins() {
        let coords = parse("latitude: 1.5\nlongitude: 2.5\nlatitude: 3.5\n").expect("valid config");
        assert_eq!(coords.latitude.as_str(), "1.5");
    }

    #[test]
    fn missing_key_fails() {
        let err = parse("latitude: 60.17116\n").unwrap_err();
        assert!(matches!(err, Error::MissingKey { key: "longitude" }));

        let err = parse("longitude: 24.93265\n").unwrap_err();
        assert!(matches!(err, Error::MissingKey { key: "latitude" }));

        let err = parse("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn key_without_value_is_malformed() {
        let err = parse("latitude: 60.17116\nlongitude:   \n").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line_no: 2, key: "longitude" }));
    }

    #[test]
    fn oversized_value_is_rejected() {
        let err = parse("latitude: 60.1711600\nlongitude: 24.93265\n").unwrap_err();
        assert!(matches!(err, Error::CoordinateTooLong { .. }));
    }

    #[test]
    fn load_from_missing_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);

        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(p) if p == path));
    }

    #[test]
    fn load_from_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "longitude: 24.93265").unwrap();
        writeln!(file, "latitude: 60.17116").unwrap();

        let coords = load_from(file.path()).expect("valid config file");
        assert_eq!(coords, Coordinates::helsinki());
    }

    #[test]
    fn config_path_is_dot_lotemp_in_home() {
        match BaseDirs::new() {
            Some(dirs) => {
                let path = config_file_path().expect("home directory is known");
                assert_eq!(path, dirs.home_dir().join(".lotemp"));
            }
            None => assert!(matches!(config_file_path(), Err(Error::NoHomeDir))),
        }
    }
}
