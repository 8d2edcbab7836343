use std::mem;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_yaml::Value;
use tracing::{debug, trace};

use super::path::split_key;
use super::ConfigError;

const DEFAULT_DELIMITER: &str = "_";

/// Read-only accessor over a hierarchical YAML configuration document.
///
/// A `Config` owns the parsed document tree and resolves compound keys
/// such as `"road_color_saturation"` through the nested maps they name,
/// decoding the value they reach into any `Deserialize`-capable type.
/// Lookups are fail-safe: a key that is absent at any level, holds an
/// explicit null, or holds a value of the wrong shape produces `None`
/// rather than an error.
///
/// ## Example
///
/// ```no_run
/// use conftree::{Config, Vec3i};
///
/// let config = Config::from_path("config.yaml")?;
///
/// let pi: Option<f64> = config.get("pi");
/// let name: Option<String> = config.get("attributes_name");
/// let rgb: Option<Vec3i> = config.get("attributes_rgb");
/// # Ok::<(), conftree::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct Config {
    root: Value,
    delimiter: String,
    path: PathBuf,
}

impl Config {
    /// Loads the document at `path` with the default `_` delimiter.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_path_with_delimiter(path, DEFAULT_DELIMITER)
    }

    /// Loads the document at `path`, splitting compound keys on
    /// `delimiter` (e.g. `"."` for `"road.color.saturation"`).
    ///
    /// ## Panics
    ///
    /// Panics if `delimiter` is empty.
    pub fn from_path_with_delimiter(
        path: impl AsRef<Path>,
        delimiter: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let delimiter = delimiter.into();
        assert!(!delimiter.is_empty(), "delimiter must not be empty");

        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let root = serde_yaml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("loaded config from {}", path.display());

        Ok(Self {
            root,
            delimiter,
            path: path.to_path_buf(),
        })
    }

    /// Re-reads the source document, producing an independent accessor
    /// with the same delimiter.
    ///
    /// `Config` deliberately does not implement `Clone`; duplicating an
    /// accessor always goes through this explicit re-load, so the file
    /// read is visible at the call site.
    pub fn reload(&self) -> Result<Self, ConfigError> {
        Self::from_path_with_delimiter(&self.path, self.delimiter.clone())
    }

    /// Returns the configured segment delimiter.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Returns the path the document was loaded from.
    pub fn source_path(&self) -> &Path {
        &self.path
    }

    /// Fetches the value at `key`, decoded as `T`.
    ///
    /// A key containing the delimiter is resolved level by level through
    /// nested maps; a key without it is looked up directly in the root
    /// map. Returns `None` when the key is absent at any level, the value
    /// is an explicit null, or the value does not decode as `T` (for
    /// example a two-element sequence requested as a three-element
    /// vector). A lookup either yields a fully decoded `T` or nothing.
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        if key.is_empty() {
            return None;
        }

        let node = if key.contains(self.delimiter.as_str()) {
            self.resolve(key)
        } else {
            self.root.get(key)
        };

        let node = node.filter(|node| !node.is_null())?;
        match serde_yaml::from_value(node.clone()) {
            Ok(value) => Some(value),
            Err(err) => {
                trace!("value at '{}' did not decode: {}", key, err);
                None
            }
        }
    }

    /// Walks the document tree along the key's segments.
    ///
    /// Descends while the current node is a map and segments remain; a
    /// missing child ends resolution with no node. The walk stops at the
    /// first non-map node it reaches (scalar, sequence, or null), which
    /// is the value the key addresses.
    fn resolve(&self, key: &str) -> Option<&Value> {
        let mut node = &self.root;
        for segment in split_key(key, &self.delimiter) {
            if !node.is_mapping() {
                break;
            }
            node = node.get(segment)?;
        }
        Some(node)
    }
}

/// Accessors compare by delimiter, source path, and the kind of the root
/// node, not by document contents.
impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        self.delimiter == other.delimiter
            && self.path == other.path
            && mem::discriminant(&self.root) == mem::discriminant(&other.root)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde::Deserialize;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::vector::{Vec3Str, Vec3b, Vec3d, Vec3i};

    const BASIC_CONFIG: &str = r#"
pi: 3.14159
attributes:
  name: some name
  debug: true
  point: [2.3, 5.2, 5.9]
  rgb: [255, 255, 255]
  flags: [true, false, true]
  names: [tom, dick, harry]
  pair: [1, 2]
  unset: null
road:
  dims:
    length: 50.0
    width: 12.0
    height: 5.1
  color:
    hue: 0.2
    saturation: 0.2
    value: 0.2
"#;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    fn basic_config() -> (NamedTempFile, Config) {
        let file = write_config(BASIC_CONFIG);
        let config = Config::from_path(file.path()).unwrap();
        (file, config)
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = Config::from_path("/nonexistent/path/config.yaml");
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let file = write_config("pi: [1, 2");
        let result = Config::from_path(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    #[should_panic(expected = "delimiter must not be empty")]
    fn empty_delimiter_is_rejected() {
        let file = write_config(BASIC_CONFIG);
        let _ = Config::from_path_with_delimiter(file.path(), "");
    }

    #[test]
    fn empty_key_is_absent() {
        let (_file, config) = basic_config();
        assert_eq!(config.get::<f64>(""), None);
    }

    #[test]
    fn top_level_scalar_is_found() {
        let (_file, config) = basic_config();
        assert_eq!(config.get::<f64>("pi"), Some(3.14159));
    }

    #[test]
    fn nested_scalars_are_found() {
        let (_file, config) = basic_config();
        assert_eq!(
            config.get::<String>("attributes_name"),
            Some("some name".to_string())
        );
        assert_eq!(config.get::<bool>("attributes_debug"), Some(true));
    }

    #[test]
    fn deeply_nested_scalars_are_found() {
        let (_file, config) = basic_config();
        assert_eq!(config.get::<f64>("road_dims_length"), Some(50.0));
        assert_eq!(config.get::<f64>("road_dims_width"), Some(12.0));
        assert_eq!(config.get::<f64>("road_dims_height"), Some(5.1));
        assert_eq!(config.get::<f64>("road_color_hue"), Some(0.2));
        assert_eq!(config.get::<f64>("road_color_saturation"), Some(0.2));
        assert_eq!(config.get::<f64>("road_color_value"), Some(0.2));
    }

    #[test]
    fn vectors_are_found() {
        let (_file, config) = basic_config();
        assert_eq!(
            config.get::<Vec3d>("attributes_point"),
            Some(Vec3d::new([2.3, 5.2, 5.9]))
        );
        assert_eq!(
            config.get::<Vec3i>("attributes_rgb"),
            Some(Vec3i::new([255, 255, 255]))
        );
        assert_eq!(
            config.get::<Vec3b>("attributes_flags"),
            Some(Vec3b::new([true, false, true]))
        );
        assert_eq!(
            config.get::<Vec3Str>("attributes_names"),
            Some(Vec3Str::new(["tom".into(), "dick".into(), "harry".into()]))
        );
    }

    #[test]
    fn wrong_sequence_length_is_a_miss() {
        let (_file, config) = basic_config();
        assert_eq!(config.get::<Vec3i>("attributes_pair"), None);
    }

    #[test]
    fn wrong_scalar_type_is_a_miss() {
        let (_file, config) = basic_config();
        assert_eq!(config.get::<f64>("attributes_name"), None);
    }

    #[test]
    fn explicit_null_is_a_miss() {
        let (_file, config) = basic_config();
        assert_eq!(config.get::<String>("attributes_unset"), None);
    }

    #[test]
    fn invalid_segments_are_misses_at_every_depth() {
        let (_file, config) = basic_config();
        assert_eq!(config.get::<f64>("invalid"), None);
        assert_eq!(config.get::<Vec3i>("attributes_invalid"), None);
        assert_eq!(config.get::<f64>("road_color_invalid"), None);
        assert_eq!(config.get::<i64>("all_levels_invalid"), None);
    }

    #[test]
    fn descent_stops_at_the_first_non_map_node() {
        let (_file, config) = basic_config();
        // Segments left over once a leaf is reached do not change the
        // resolved value.
        assert_eq!(config.get::<f64>("pi_extra"), Some(3.14159));
    }

    #[test]
    fn subtrees_decode_into_derived_structs() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Dims {
            length: f64,
            width: f64,
            height: f64,
        }

        let (_file, config) = basic_config();
        assert_eq!(
            config.get::<Dims>("road_dims"),
            Some(Dims {
                length: 50.0,
                width: 12.0,
                height: 5.1
            })
        );
    }

    #[test]
    fn dot_delimited_keys_resolve() {
        let file = write_config(BASIC_CONFIG);
        let config = Config::from_path_with_delimiter(file.path(), ".").unwrap();
        assert_eq!(config.get::<f64>("road.dims.length"), Some(50.0));
        // Underscores are ordinary key characters under a dot delimiter.
        assert_eq!(config.get::<f64>("road_dims_length"), None);
    }

    #[test]
    fn reload_observes_changed_contents() {
        let (file, config) = basic_config();
        assert_eq!(config.get::<f64>("pi"), Some(3.14159));

        std::fs::write(file.path(), "pi: 3.0\n").unwrap();
        let reloaded = config.reload().unwrap();
        assert_eq!(reloaded.get::<f64>("pi"), Some(3.0));
        // The original accessor still serves the tree it loaded.
        assert_eq!(config.get::<f64>("pi"), Some(3.14159));
    }

    #[test]
    fn accessors_compare_by_delimiter_source_and_root_kind() {
        let file = write_config(BASIC_CONFIG);
        let first = Config::from_path(file.path()).unwrap();
        let second = Config::from_path(file.path()).unwrap();
        assert_eq!(first, second);

        let dotted = Config::from_path_with_delimiter(file.path(), ".").unwrap();
        assert_ne!(first, dotted);
    }
}
