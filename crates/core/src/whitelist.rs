use crate::error::{JavaMapError, Result};
use crate::model::ClassName;
use crate::model::name::is_identifier;
use crate::types::TypeRegistry;
use std::collections::HashSet;

/// One configured whitelist line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WhitelistEntry {
    /// A single fully qualified class.
    Class(ClassName),
    /// Every class directly inside the package, not in its sub-packages.
    Package(String),
}

impl WhitelistEntry {
    pub fn class(name: &str) -> Result<Self> {
        let class = ClassName::new(name.trim());
        if !class.is_well_formed() || class.package_name().is_none() {
            return Err(JavaMapError::Configuration(format!(
                "invalid whitelisted class name {name:?}"
            )));
        }
        Ok(WhitelistEntry::Class(class))
    }

    /// Accepts `pkg`, `pkg.` and `pkg.*`.
    pub fn package(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        let package = trimmed
            .strip_suffix(".*")
            .or_else(|| trimmed.strip_suffix('.'))
            .unwrap_or(trimmed)
            .replace('/', ".");
        if package.is_empty() || !package.split('.').all(is_identifier) {
            return Err(JavaMapError::Configuration(format!(
                "invalid whitelisted package name {name:?}"
            )));
        }
        Ok(WhitelistEntry::Package(package))
    }

    /// Single-string form: a trailing `.*` marks a package, anything else is a class.
    pub fn parse(entry: &str) -> Result<Self> {
        if entry.trim().ends_with(".*") {
            Self::package(entry)
        } else {
            Self::class(entry)
        }
    }
}

/// Decides which class names a run may map.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    entries: Vec<WhitelistEntry>,
    classes: HashSet<ClassName>,
    packages: HashSet<String>,
}

impl Whitelist {
    pub fn new(entries: impl IntoIterator<Item = WhitelistEntry>) -> Self {
        let mut whitelist = Self::default();
        for entry in entries {
            whitelist.insert(entry);
        }
        whitelist
    }

    /// Parses every line with [`WhitelistEntry::parse`], failing on the first bad one.
    pub fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let entries = lines
            .into_iter()
            .map(WhitelistEntry::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(entries))
    }

    fn insert(&mut self, entry: WhitelistEntry) {
        let fresh = match &entry {
            WhitelistEntry::Class(name) => self.classes.insert(name.clone()),
            WhitelistEntry::Package(pkg) => self.packages.insert(pkg.clone()),
        };
        if fresh {
            self.entries.push(entry);
        }
    }

    pub fn in_white_list(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        if self.classes.contains(name) {
            return true;
        }
        match name.rfind('.') {
            Some(idx) if idx + 1 < name.len() => self.packages.contains(&name[..idx]),
            _ => false,
        }
    }

    /// Configured entries in insertion order.
    pub fn entries(&self) -> &[WhitelistEntry] {
        &self.entries
    }

    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            WhitelistEntry::Package(pkg) => Some(pkg.as_str()),
            WhitelistEntry::Class(_) => None,
        })
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassName> {
        self.entries.iter().filter_map(|entry| match entry {
            WhitelistEntry::Class(name) => Some(name),
            WhitelistEntry::Package(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whitelisted classes are the ones being mapped, spelled by their short name.
impl TypeRegistry for Whitelist {
    fn lookup(&self, name: &ClassName) -> Option<String> {
        self.in_white_list(name.as_str())
            .then(|| name.short_name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tinkerpop() -> Whitelist {
        Whitelist::new(vec![
            WhitelistEntry::class("java.lang.Object").unwrap(),
            WhitelistEntry::class("java.util.Iterator").unwrap(),
            WhitelistEntry::package("com.tinkerpop.gremlin.process").unwrap(),
            WhitelistEntry::package("com.tinkerpop.gremlin.structure.*").unwrap(),
        ])
    }

    #[test]
    fn accepts_exact_classes_and_package_members() {
        let whitelist = tinkerpop();
        assert!(whitelist.in_white_list("java.lang.Object"));
        assert!(whitelist.in_white_list("java.util.Iterator"));
        // Package membership is path-shaped: Foo need not exist.
        assert!(whitelist.in_white_list("com.tinkerpop.gremlin.process.Foo"));
        assert!(whitelist.in_white_list("com.tinkerpop.gremlin.structure.Edge"));
    }

    #[test]
    fn rejects_everything_else() {
        let whitelist = tinkerpop();
        assert!(!whitelist.in_white_list(""));
        assert!(!whitelist.in_white_list("com"));
        assert!(!whitelist.in_white_list("java.util.Iterators"));
        assert!(!whitelist.in_white_list("com.tinkerpop.gremlin"));
        assert!(!whitelist.in_white_list("com.tinkerpop.Gremlin.Foo"));
        assert!(!whitelist.in_white_list("com.tinkerpop.gremlin.process.graph.Foo"));
        assert!(!whitelist.in_white_list("com.tinkerpop.gremlin.process."));
    }

    #[test]
    fn package_entries_are_not_hierarchical() {
        let whitelist = Whitelist::new(vec![WhitelistEntry::package("a.b").unwrap()]);
        assert!(whitelist.in_white_list("a.b.C"));
        assert!(!whitelist.in_white_list("a.C"));
        assert!(!whitelist.in_white_list("a.b.c.D"));
    }

    #[test]
    fn string_form_distinguishes_packages() {
        let whitelist = Whitelist::parse(["java.util.*", "java.lang.String"]).unwrap();
        assert_eq!(whitelist.packages().collect::<Vec<_>>(), vec!["java.util"]);
        assert_eq!(whitelist.classes().count(), 1);
        assert!(whitelist.in_white_list("java.util.List"));
        assert!(!whitelist.in_white_list("java.lang.Integer"));
    }

    #[test]
    fn malformed_entries_are_configuration_errors() {
        for bad in ["", "Foo", "java..util.List", "java.util.1List"] {
            assert!(matches!(
                WhitelistEntry::class(bad),
                Err(JavaMapError::Configuration(_))
            ));
        }
        for bad in ["", ".*", "java..util", "java.util-x"] {
            assert!(matches!(
                WhitelistEntry::package(bad),
                Err(JavaMapError::Configuration(_))
            ));
        }
    }

    #[test]
    fn duplicate_entries_are_collapsed() {
        let whitelist = Whitelist::parse(["a.B", "a.B", "c.*", "c.*"]).unwrap();
        assert_eq!(whitelist.entries().len(), 2);
    }

    #[test]
    fn registry_spells_whitelisted_classes_by_short_name() {
        let whitelist = tinkerpop();
        assert_eq!(
            whitelist.lookup(&ClassName::new("com.tinkerpop.gremlin.process.Step")),
            Some("Step".to_string())
        );
        assert_eq!(whitelist.lookup(&ClassName::new("java.util.List")), None);
    }
}
