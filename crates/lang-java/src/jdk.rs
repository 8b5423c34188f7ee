//! JDK runtime discovery.
//!
//! Looks for a JDK in:
//! - `JAVA_HOME`
//! - the macOS `java_home` tool
//! - common installation paths
//! - SDKMAN

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static VERSION_IN_PATH: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"jdk-?(\d+(?:\.\d+)*)").ok());

/// Class sources of the first JDK found.
#[derive(Debug, Default)]
pub struct JdkDiscoverer {
    assets: Vec<PathBuf>,
    root: Option<PathBuf>,
    version: Option<String>,
}

impl JdkDiscoverer {
    pub fn new() -> Self {
        let mut discoverer = Self::default();
        discoverer.discover_jdk();
        discoverer
    }

    /// Uses `home` only, without searching elsewhere.
    pub fn from_home(home: &Path) -> Self {
        let mut discoverer = Self::default();
        if discoverer.collect_sdk_assets(home).is_some() {
            discoverer.set_root(home.to_path_buf());
        }
        discoverer
    }

    /// `lib/modules`, `rt.jar` or the `.jmod` files, whichever the JDK ships.
    pub fn assets(&self) -> &[PathBuf] {
        &self.assets
    }

    pub fn jdk_root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn set_root(&mut self, root: PathBuf) {
        self.version = detect_jdk_version(&root);
        self.root = Some(root);
    }

    fn discover_jdk(&mut self) {
        if let Ok(java_home) = std::env::var("JAVA_HOME") {
            let path = PathBuf::from(&java_home);
            if self.collect_sdk_assets(&path).is_some() {
                self.set_root(path);
                return;
            }
        }

        #[cfg(target_os = "macos")]
        if let Ok(output) = std::process::Command::new("/usr/libexec/java_home").output() {
            if output.status.success() {
                let path = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
                if self.collect_sdk_assets(&path).is_some() {
                    self.set_root(path);
                    return;
                }
            }
        }

        for root in search_roots() {
            if !root.exists() {
                continue;
            }
            // The root itself may be a JDK (e.g. a Homebrew symlink).
            if self.collect_sdk_assets(&root).is_some() {
                self.set_root(root);
                return;
            }
            let Ok(entries) = std::fs::read_dir(&root) else {
                continue;
            };
            let mut candidates: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
            candidates.sort();
            for mut sdk_path in candidates {
                if cfg!(target_os = "macos") && sdk_path.join("Contents/Home").exists() {
                    sdk_path = sdk_path.join("Contents/Home");
                }
                if self.collect_sdk_assets(&sdk_path).is_some() {
                    self.set_root(sdk_path);
                    return;
                }
            }
        }
    }

    fn collect_sdk_assets(&mut self, sdk_path: &Path) -> Option<()> {
        if !sdk_path.exists() {
            return None;
        }

        // Java 9+ runtime image
        let modules = sdk_path.join("lib/modules");
        if modules.is_file() {
            self.assets.push(modules);
            return Some(());
        }

        // Java 8
        for rt_jar in [sdk_path.join("jre/lib/rt.jar"), sdk_path.join("lib/rt.jar")] {
            if rt_jar.is_file() {
                self.assets.push(rt_jar);
                return Some(());
            }
        }

        // Some JDK builds ship jmods only.
        let mut jmods: Vec<PathBuf> = std::fs::read_dir(sdk_path.join("jmods"))
            .ok()?
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("jmod"))
            .collect();
        if jmods.is_empty() {
            return None;
        }
        jmods.sort();
        self.assets.extend(jmods);
        Some(())
    }
}

fn search_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    #[cfg(target_os = "macos")]
    {
        roots.push(PathBuf::from("/Library/Java/JavaVirtualMachines/"));
        roots.push(PathBuf::from("/opt/homebrew/opt/openjdk/"));
        roots.push(PathBuf::from("/usr/local/opt/openjdk/"));
    }
    #[cfg(target_os = "linux")]
    roots.push(PathBuf::from("/usr/lib/jvm/"));
    #[cfg(target_os = "windows")]
    roots.push(PathBuf::from("C:\\Program Files\\Java\\"));

    if let Some(mut sdkman) = dirs::home_dir() {
        sdkman.push(".sdkman/candidates/java/");
        roots.push(sdkman);
    }
    roots
}

/// `JAVA_VERSION` from the `release` file, else a version spelled in the path.
pub fn detect_jdk_version(jdk_root: &Path) -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(jdk_root.join("release")) {
        if let Some(line) = content.lines().find(|l| l.starts_with("JAVA_VERSION=")) {
            return Some(
                line.trim_start_matches("JAVA_VERSION=")
                    .trim_matches('"')
                    .to_string(),
            );
        }
    }

    let path = jdk_root.to_string_lossy();
    VERSION_IN_PATH
        .as_ref()?
        .captures(&path)?
        .get(1)
        .map(|m| m.as_str().to_string())
}
