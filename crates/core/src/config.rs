//! Run options, read from a JSON file.
//!
//! The options may sit at the top level or under a `"javamap"` key, which
//! lets a project keep them inside an existing manifest.

use crate::error::{JavaMapError, Result};
use crate::model::ClassName;
use crate::whitelist::{Whitelist, WhitelistEntry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Directories and archives searched for class files.
    pub classpath: Vec<PathBuf>,
    /// Whitelisted classes; also the seeds unless `seeds` is given.
    pub classes: Vec<String>,
    /// Whitelisted packages, non-hierarchical.
    pub packages: Vec<String>,
    pub seeds: Option<Vec<String>>,
    /// Also seed every class found directly in a whitelisted package.
    pub expand_packages: bool,
    /// Append the discovered JDK runtime image to the classpath.
    pub include_jdk: bool,
    pub output: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            classpath: Vec::new(),
            classes: Vec::new(),
            packages: Vec::new(),
            seeds: None,
            expand_packages: false,
            include_jdk: true,
            output: None,
        }
    }
}

impl Options {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(section) = value.get_mut("javamap") {
            value = section.take();
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Reads options from `path`; relative classpath entries are taken
    /// relative to the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            JavaMapError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let mut options = Self::from_json_str(&json)?;
        if let Some(base) = path.parent() {
            options.rebase(base);
        }
        Ok(options)
    }

    fn rebase(&mut self, base: &Path) {
        for entry in &mut self.classpath {
            if entry.is_relative() {
                *entry = base.join(&*entry);
            }
        }
        if let Some(output) = &mut self.output {
            if output.is_relative() {
                *output = base.join(&*output);
            }
        }
    }

    /// Builds the whitelist, failing on the first malformed entry.
    pub fn whitelist(&self) -> Result<Whitelist> {
        let classes = self.classes.iter().map(|c| WhitelistEntry::class(c));
        let packages = self.packages.iter().map(|p| WhitelistEntry::package(p));
        let entries = classes.chain(packages).collect::<Result<Vec<_>>>()?;
        Ok(Whitelist::new(entries))
    }

    /// Seeds in request order.
    pub fn seed_names(&self) -> Result<Vec<ClassName>> {
        let raw = self.seeds.as_ref().unwrap_or(&self.classes);
        raw.iter()
            .map(|s| {
                let name = ClassName::new(s.trim());
                if name.is_well_formed() {
                    Ok(name)
                } else {
                    Err(JavaMapError::Configuration(format!("invalid seed class name {s:?}")))
                }
            })
            .collect()
    }

    /// Checks everything a run needs before it starts.
    pub fn validate(&self) -> Result<()> {
        let whitelist = self.whitelist()?;
        if whitelist.is_empty() {
            return Err(JavaMapError::Configuration(
                "whitelist is empty: configure `classes` or `packages`".to_string(),
            ));
        }
        self.seed_names()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn reads_top_level_and_nested_sections() {
        let flat = Options::from_json_str(r#"{ "classes": ["java.lang.Object"] }"#).unwrap();
        let nested = Options::from_json_str(
            r#"{ "name": "demo", "javamap": { "classes": ["java.lang.Object"] } }"#,
        )
        .unwrap();
        assert_eq!(flat, nested);
        assert!(flat.include_jdk);
        assert!(!flat.expand_packages);
    }

    #[test]
    fn seeds_default_to_whitelisted_classes() {
        let options = Options::from_json_str(
            r#"{ "classes": ["java.util.Iterator"], "packages": ["com.example.*"] }"#,
        )
        .unwrap();
        assert_eq!(options.seed_names().unwrap(), vec![ClassName::new("java.util.Iterator")]);

        let options = Options::from_json_str(
            r#"{ "classes": ["java.util.Iterator"], "seeds": ["com.example.Main"] }"#,
        )
        .unwrap();
        assert_eq!(options.seed_names().unwrap(), vec![ClassName::new("com.example.Main")]);
    }

    #[test]
    fn malformed_entries_fail_before_resolution() {
        let options = Options::from_json_str(r#"{ "packages": ["com..example"] }"#).unwrap();
        assert_eq!(options.validate().unwrap_err().kind(), ErrorKind::Configuration);

        let options = Options::from_json_str(r#"{}"#).unwrap();
        assert_eq!(options.validate().unwrap_err().kind(), ErrorKind::Configuration);

        let options = Options::from_json_str(
            r#"{ "classes": ["java.lang.Object"], "seeds": ["not a class"] }"#,
        )
        .unwrap();
        assert_eq!(options.validate().unwrap_err().kind(), ErrorKind::Configuration);
    }

    #[test]
    fn load_rebases_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("javamap.json");
        std::fs::write(
            &path,
            r#"{ "classpath": ["lib/app.jar", "/abs/dir"], "classes": ["a.B"], "output": "out/map.json" }"#,
        )
        .unwrap();
        let options = Options::load(&path).unwrap();
        assert_eq!(options.classpath[0], dir.path().join("lib/app.jar"));
        assert_eq!(options.classpath[1], PathBuf::from("/abs/dir"));
        assert_eq!(options.output, Some(dir.path().join("out/map.json")));
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let err = Options::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
