//! Locating compiled classes on a class path.
//!
//! An entry is a class directory, a zip archive (`.jar`, `.jmod`) or a JDK
//! runtime image (`lib/modules`). The format is detected from magic bytes.

use javamap_core::JavaMapError;
use javamap_core::bridge::BridgeError;
use javamap_core::model::ClassName;
use ristretto_jimage::Image;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

#[derive(Error, Debug)]
pub enum ClassPathError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read archive {}: {source}", .path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: ZipError,
    },
    #[error("cannot read runtime image {}: {reason}", .path.display())]
    Image { path: PathBuf, reason: String },
    #[error("not a class directory, archive or runtime image: {}", .0.display())]
    Unrecognized(PathBuf),
}

impl From<ClassPathError> for BridgeError {
    fn from(err: ClassPathError) -> Self {
        BridgeError::Unavailable(err.to_string())
    }
}

impl From<ClassPathError> for JavaMapError {
    fn from(err: ClassPathError) -> Self {
        JavaMapError::BridgeUnavailable(err.to_string())
    }
}

enum Entry {
    Directory(PathBuf),
    Archive {
        path: PathBuf,
        archive: ZipArchive<File>,
        /// `classes/` inside a jmod, empty for jars.
        prefix: &'static str,
    },
    Image {
        image: Image,
        /// Module-less resource paths, e.g. `java/lang/Object.class`.
        resources: BTreeSet<String>,
    },
}

/// Ordered class path; the first entry holding a class wins.
#[derive(Default)]
pub struct ClassPath {
    entries: Vec<Entry>,
}

impl ClassPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self, ClassPathError> {
        let mut class_path = Self::new();
        for path in paths {
            class_path.push(path.as_ref())?;
        }
        Ok(class_path)
    }

    pub fn push(&mut self, path: &Path) -> Result<(), ClassPathError> {
        let io = |source| ClassPathError::Io {
            path: path.to_path_buf(),
            source,
        };
        if path.is_dir() {
            self.entries.push(Entry::Directory(path.to_path_buf()));
            return Ok(());
        }

        let mut file = File::open(path).map_err(io)?;
        let mut magic = [0u8; 4];
        file.read_exact(&mut magic).map_err(io)?;

        let entry = match &magic {
            // PK for jars, JM for jmods
            [0x50, 0x4B, _, _] | [0x4A, 0x4D, _, _] => {
                file.seek(SeekFrom::Start(0)).map_err(io)?;
                let archive = ZipArchive::new(file).map_err(|source| ClassPathError::Zip {
                    path: path.to_path_buf(),
                    source,
                })?;
                let prefix = if magic[0] == 0x4A { "classes/" } else { "" };
                Entry::Archive {
                    path: path.to_path_buf(),
                    archive,
                    prefix,
                }
            }
            [0xCA, 0xFE, 0xDA, 0xDA] | [0xDA, 0xDA, 0xFE, 0xCA] => {
                drop(file);
                let image = Image::from_file(path).map_err(|e| ClassPathError::Image {
                    path: path.to_path_buf(),
                    reason: format!("{e:?}"),
                })?;
                let resources = image_resources(&image);
                Entry::Image {
                    image,
                    resources,
                }
            }
            _ => return Err(ClassPathError::Unrecognized(path.to_path_buf())),
        };
        debug!(path = %path.display(), "class path entry opened");
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes of the class file for `name`, trying nested-class spellings too.
    pub fn find(&mut self, name: &ClassName) -> Result<Option<Vec<u8>>, ClassPathError> {
        for candidate in binary_names(name) {
            let resource = format!("{candidate}.class");
            for entry in &mut self.entries {
                if let Some(bytes) = entry.read(&resource)? {
                    return Ok(Some(bytes));
                }
            }
        }
        Ok(None)
    }

    /// Top-level classes directly inside `package`, sorted and without duplicates.
    pub fn list_package(&mut self, package: &str) -> Result<Vec<ClassName>, ClassPathError> {
        let dir = package.replace('.', "/");
        let mut found = BTreeSet::new();
        for entry in &mut self.entries {
            for file_name in entry.list(&dir)? {
                if let Some(simple) = top_level_class(&file_name) {
                    found.insert(ClassName::new(format!("{package}.{simple}")));
                }
            }
        }
        Ok(found.into_iter().collect())
    }
}

impl Entry {
    fn read(&mut self, resource: &str) -> Result<Option<Vec<u8>>, ClassPathError> {
        match self {
            Entry::Directory(root) => {
                let file = root.join(resource);
                if !file.is_file() {
                    return Ok(None);
                }
                std::fs::read(&file)
                    .map(Some)
                    .map_err(|source| ClassPathError::Io { path: file, source })
            }
            Entry::Archive {
                path,
                archive,
                prefix,
            } => {
                let mut entry = match archive.by_name(&format!("{prefix}{resource}")) {
                    Ok(entry) => entry,
                    Err(ZipError::FileNotFound) => return Ok(None),
                    Err(source) => {
                        return Err(ClassPathError::Zip {
                            path: path.clone(),
                            source,
                        });
                    }
                };
                let mut bytes = Vec::new();
                entry
                    .read_to_end(&mut bytes)
                    .map_err(|source| ClassPathError::Io {
                        path: path.clone(),
                        source,
                    })?;
                Ok(Some(bytes))
            }
            Entry::Image { image, resources } => {
                if !resources.contains(resource) {
                    return Ok(None);
                }
                // The module is not part of the lookup key, so scan.
                for found in image.iter().flatten() {
                    let name = found.name();
                    if strip_module(&name) == resource {
                        return Ok(Some(found.data().to_vec()));
                    }
                }
                Ok(None)
            }
        }
    }

    /// File names directly inside `dir`.
    fn list(&mut self, dir: &str) -> Result<Vec<String>, ClassPathError> {
        let prefix = format!("{dir}/");
        let direct_child = |name: &str| {
            name.strip_prefix(prefix.as_str())
                .filter(|rest| !rest.is_empty() && !rest.contains('/'))
                .map(str::to_string)
        };
        match self {
            Entry::Directory(root) => {
                let path = root.join(dir);
                let Ok(read_dir) = std::fs::read_dir(&path) else {
                    return Ok(Vec::new());
                };
                Ok(read_dir
                    .flatten()
                    .filter(|e| e.path().is_file())
                    .filter_map(|e| e.file_name().to_str().map(str::to_string))
                    .collect())
            }
            Entry::Archive {
                archive, prefix: p, ..
            } => Ok(archive
                .file_names()
                .filter_map(|name| name.strip_prefix(*p))
                .filter_map(direct_child)
                .collect()),
            Entry::Image { resources, .. } => {
                Ok(resources.iter().filter_map(|r| direct_child(r.as_str())).collect())
            }
        }
    }
}

/// Internal names to try for `name`: `a/b/Outer/Inner`, then `a/b/Outer$Inner`.
///
/// Separators are only turned into `$` while the enclosing segment looks like
/// a type name.
pub fn binary_names(name: &ClassName) -> Vec<String> {
    let mut current = name.internal_name();
    let mut names = vec![current.clone()];
    while let Some(idx) = current.rfind('/') {
        let enclosing = current[..idx].rsplit('/').next().unwrap_or_default();
        if !enclosing.starts_with(|c: char| c.is_ascii_uppercase()) {
            break;
        }
        current.replace_range(idx..idx + 1, "$");
        names.push(current.clone());
    }
    names
}

fn top_level_class(file_name: &str) -> Option<&str> {
    let simple = file_name.strip_suffix(".class")?;
    let skip = simple.contains('$') || simple == "package-info" || simple == "module-info";
    (!skip).then_some(simple)
}

/// `/java.base/java/lang/Object.class` -> `java/lang/Object.class`
fn strip_module(name: &str) -> &str {
    match name.strip_prefix('/') {
        Some(rest) => rest.split_once('/').map_or(rest, |(_, path)| path),
        None => name,
    }
}

fn image_resources(image: &Image) -> BTreeSet<String> {
    image
        .iter()
        .flatten()
        .map(|resource| strip_module(&resource.name()).to_string())
        .filter(|name| name.ends_with(".class"))
        .collect()
}
