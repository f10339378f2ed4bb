use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Manifest file read from the workspace root.
pub const MANIFEST_FILE: &str = "package.json";

/// The parts of `package.json` that drive detection and templating.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default, rename = "devDependencies", deserialize_with = "null_as_empty")]
    pub dev_dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub scripts: BTreeMap<String, serde_json::Value>,
}

impl Manifest {
    /// Read `package.json` from a project directory.
    ///
    /// Returns `Ok(None)` when the file does not exist; a file that exists
    /// but is not a JSON object of the expected shape is an error.
    pub fn load(project_dir: &Path) -> crate::Result<Option<Self>> {
        let path = project_dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| crate::Error::ManifestRead {
            path: path.clone(),
            source: e,
        })?;

        Self::parse(&content)
            .map(Some)
            .map_err(|e| crate::Error::ManifestParse { path, source: e })
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Direct and development dependency names, merged.
    pub fn dependency_names(&self) -> BTreeSet<&str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }

    /// The `scripts.build` command, if it is a string.
    pub fn build_script(&self) -> Option<&str> {
        self.scripts.get("build").and_then(|v| v.as_str())
    }
}

/// An explicit `null` map reads the same as an absent one.
fn null_as_empty<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    Option::<BTreeMap<String, V>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
