//! Project scaffolding from the installed package
//!
//! `init` copies a fixed set of folders and files out of the package's own
//! install location into the project root, then removes the package from the
//! project's `node_modules`. Each step is independent: a failed copy is
//! recorded and the remaining steps still run, and nothing already copied is
//! rolled back.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What `init` copies from the package root
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct InstallManifest {
    pub folders: Vec<String>,
    pub files: Vec<String>,
}

impl Default for InstallManifest {
    fn default() -> Self {
        Self {
            folders: vec![
                ".github".to_string(),
                "Generator_Patterns".to_string(),
                "Created_Generators".to_string(),
            ],
            files: vec!["README.md".to_string()],
        }
    }
}

/// File counts for one copied manifest entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: usize,
    pub failed: usize,
}

/// Outcome of a single manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Walked and copied; individual files may still have failed
    Copied(CopyStats),
    /// Source does not exist in the package
    Missing,
    /// Source and destination are the same path
    SameLocation,
    Failed(String),
}

/// Outcome of removing the package from `node_modules`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Removed(PathBuf),
    NotFound(PathBuf),
    Failed(PathBuf, String),
}

#[derive(Debug, Clone)]
pub struct InstallReport {
    pub entries: Vec<(String, CopyOutcome)>,
    pub removal: Removal,
}

impl InstallReport {
    #[cfg(test)]
    pub fn copied(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, outcome)| matches!(outcome, CopyOutcome::Copied(_)))
            .map(|(name, _)| name.as_str())
    }

    /// Failed entries and files, plus a failed removal
    pub fn failures(&self) -> usize {
        let copy_failures: usize = self
            .entries
            .iter()
            .map(|(_, outcome)| match outcome {
                CopyOutcome::Copied(stats) => stats.failed,
                CopyOutcome::Failed(_) => 1,
                CopyOutcome::Missing | CopyOutcome::SameLocation => 0,
            })
            .sum();
        copy_failures + usize::from(matches!(self.removal, Removal::Failed(..)))
    }
}

pub struct Installer {
    package_root: PathBuf,
    target_root: PathBuf,
    package_name: String,
    manifest: InstallManifest,
}

impl Installer {
    pub fn new(package_root: PathBuf, target_root: PathBuf, package_name: &str, manifest: InstallManifest) -> Self {
        Self {
            package_root,
            target_root,
            package_name: package_name.to_string(),
            manifest,
        }
    }

    pub fn package_root(&self) -> &Path {
        &self.package_root
    }

    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    /// Where the package sits inside the target project's dependency folder
    pub fn installed_copy(&self) -> PathBuf {
        self.target_root.join("node_modules").join(&self.package_name)
    }

    /// Copy every manifest entry, then remove the installed package
    pub fn run(&self) -> InstallReport {
        log::info!(
            "Installing from {} to {}",
            self.package_root.display(),
            self.target_root.display()
        );

        let mut entries = Vec::new();

        for folder in &self.manifest.folders {
            entries.push((folder.clone(), self.copy_entry(folder, true)));
        }
        for file in &self.manifest.files {
            entries.push((file.clone(), self.copy_entry(file, false)));
        }

        let removal = self.remove_installed_copy();

        InstallReport { entries, removal }
    }

    fn copy_entry(&self, name: &str, is_folder: bool) -> CopyOutcome {
        let src = self.package_root.join(name);
        let dest = self.target_root.join(name);

        let exists = if is_folder { src.is_dir() } else { src.is_file() };
        if !exists {
            log::info!("Skipping {}: not present in package", src.display());
            return CopyOutcome::Missing;
        }

        if same_location(&src, &dest) {
            log::info!("Skipping {}: source and destination are the same", src.display());
            return CopyOutcome::SameLocation;
        }

        log::info!("Copying {} to {}", src.display(), dest.display());
        if is_folder {
            return CopyOutcome::Copied(copy_recursive(&src, &dest));
        }

        match copy_file(&src, &dest) {
            Ok(()) => CopyOutcome::Copied(CopyStats { copied: 1, failed: 0 }),
            Err(e) => {
                log::warn!("Failed to copy {}: {:#}", src.display(), e);
                CopyOutcome::Failed(format!("{:#}", e))
            }
        }
    }

    fn remove_installed_copy(&self) -> Removal {
        let installed = self.installed_copy();
        log::info!("Attempting to remove: {}", installed.display());

        if !installed.exists() {
            return Removal::NotFound(installed);
        }

        match fs::remove_dir_all(&installed) {
            Ok(()) => {
                log::info!("Removed {}", installed.display());
                Removal::Removed(installed)
            }
            Err(e) => {
                log::warn!("Error removing package {}: {}", installed.display(), e);
                Removal::Failed(installed, e.to_string())
            }
        }
    }
}

/// Copy a directory tree, creating directories as needed and overwriting files.
///
/// A failed entry is logged and counted; the walk carries on with the rest.
pub fn copy_recursive(src: &Path, dest: &Path) -> CopyStats {
    let mut stats = CopyStats::default();

    for entry in WalkDir::new(src) {
        let result = entry
            .with_context(|| format!("Failed to walk {}", src.display()))
            .and_then(|entry| mirror_entry(&entry, src, dest));

        match result {
            Ok(true) => stats.copied += 1,
            Ok(false) => {}
            Err(e) => {
                log::warn!("{:#}", e);
                stats.failed += 1;
            }
        }
    }

    stats
}

/// Mirror one walked entry under `dest`; returns whether a file was written
fn mirror_entry(entry: &walkdir::DirEntry, src: &Path, dest: &Path) -> Result<bool> {
    let relative = entry
        .path()
        .strip_prefix(src)
        .with_context(|| format!("{} is outside {}", entry.path().display(), src.display()))?;
    let target = dest.join(relative);

    if entry.file_type().is_dir() {
        fs::create_dir_all(&target).with_context(|| format!("Failed to create {}", target.display()))?;
        return Ok(false);
    }

    copy_file(entry.path(), &target)?;
    Ok(true)
}

fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::copy(src, dest).with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;
    Ok(())
}

fn same_location(src: &Path, dest: &Path) -> bool {
    match (fs::canonicalize(src), fs::canonicalize(dest)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Lay out a package the way npm would unpack it
    fn create_package(root: &Path) {
        let agents = root.join(".github").join("agents");
        fs::create_dir_all(&agents).unwrap();
        fs::write(agents.join("SampleAgent.agent.md"), "description: 'Sample'\n").unwrap();
        fs::create_dir_all(root.join("Generator_Patterns").join("nested").join("deeper")).unwrap();
        fs::write(
            root.join("Generator_Patterns").join("nested").join("deeper").join("pattern.md"),
            "# Pattern\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("Created_Generators")).unwrap();
        fs::write(root.join("Created_Generators").join(".keep"), "").unwrap();
        fs::write(root.join("README.md"), "# Generator Agent\n").unwrap();
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::write(root.join("bin").join("cli.js"), "// not copied\n").unwrap();
    }

    fn project_with_package(temp: &TempDir) -> (PathBuf, PathBuf) {
        let project = temp.path().join("project");
        let package = project.join("node_modules").join("agentpublishtest");
        create_package(&package);
        (project, package)
    }

    #[test]
    fn test_run_copies_manifest_into_empty_target() {
        let temp = TempDir::new().unwrap();
        let package = temp.path().join("package");
        let target = temp.path().join("target");
        create_package(&package);
        fs::create_dir_all(&target).unwrap();

        let installer = Installer::new(package.clone(), target.clone(), "agentpublishtest", InstallManifest::default());
        let report = installer.run();

        assert_eq!(report.failures(), 0);
        assert_eq!(report.copied().count(), 4);
        assert_eq!(
            fs::read(target.join(".github/agents/SampleAgent.agent.md")).unwrap(),
            fs::read(package.join(".github/agents/SampleAgent.agent.md")).unwrap()
        );
        assert_eq!(
            fs::read(target.join("Generator_Patterns/nested/deeper/pattern.md")).unwrap(),
            b"# Pattern\n"
        );
        assert!(target.join("Created_Generators").join(".keep").exists());
        assert_eq!(fs::read(target.join("README.md")).unwrap(), b"# Generator Agent\n");
        assert!(!target.join("bin").exists());
        assert!(matches!(report.removal, Removal::NotFound(_)));
    }

    #[test]
    fn test_run_removes_installed_package() {
        let temp = TempDir::new().unwrap();
        let (project, package) = project_with_package(&temp);

        let installer = Installer::new(package.clone(), project.clone(), "agentpublishtest", InstallManifest::default());
        let report = installer.run();

        assert_eq!(report.failures(), 0);
        assert!(project.join(".github/agents/SampleAgent.agent.md").exists());
        assert!(project.join("README.md").exists());
        assert!(!package.exists());
        assert_eq!(report.removal, Removal::Removed(package));
    }

    #[test]
    fn test_run_overwrites_existing_files() {
        let temp = TempDir::new().unwrap();
        let package = temp.path().join("package");
        let target = temp.path().join("target");
        create_package(&package);
        fs::create_dir_all(target.join(".github").join("agents")).unwrap();
        fs::write(target.join(".github/agents/SampleAgent.agent.md"), "stale").unwrap();
        fs::write(target.join(".github/agents/Mine.agent.md"), "mine").unwrap();
        fs::write(target.join("README.md"), "old readme").unwrap();

        Installer::new(package, target.clone(), "agentpublishtest", InstallManifest::default()).run();

        assert_eq!(
            fs::read_to_string(target.join(".github/agents/SampleAgent.agent.md")).unwrap(),
            "description: 'Sample'\n"
        );
        assert_eq!(fs::read_to_string(target.join(".github/agents/Mine.agent.md")).unwrap(), "mine");
        assert_eq!(fs::read_to_string(target.join("README.md")).unwrap(), "# Generator Agent\n");
    }

    #[test]
    fn test_run_skips_missing_sources() {
        let temp = TempDir::new().unwrap();
        let package = temp.path().join("package");
        let target = temp.path().join("target");
        fs::create_dir_all(package.join(".github")).unwrap();
        fs::create_dir_all(&target).unwrap();

        let report = Installer::new(package, target.clone(), "agentpublishtest", InstallManifest::default()).run();

        assert_eq!(report.failures(), 0);
        assert_eq!(report.copied().collect::<Vec<_>>(), vec![".github"]);
        assert!(report.entries.contains(&("README.md".to_string(), CopyOutcome::Missing)));
        assert!(!target.join("Generator_Patterns").exists());
        assert!(!target.join("README.md").exists());
    }

    #[test]
    fn test_run_same_location_leaves_files_intact() {
        let temp = TempDir::new().unwrap();
        let package = temp.path().join("package");
        create_package(&package);

        let report = Installer::new(package.clone(), package.clone(), "agentpublishtest", InstallManifest::default()).run();

        assert!(report.entries.contains(&("README.md".to_string(), CopyOutcome::SameLocation)));
        assert_eq!(fs::read_to_string(package.join("README.md")).unwrap(), "# Generator Agent\n");
    }

    #[test]
    fn test_custom_manifest() {
        let temp = TempDir::new().unwrap();
        let package = temp.path().join("package");
        let target = temp.path().join("target");
        create_package(&package);

        let manifest = InstallManifest {
            folders: vec!["bin".to_string()],
            files: vec![],
        };
        let report = Installer::new(package, target.clone(), "agentpublishtest", manifest).run();

        assert_eq!(
            report.entries,
            vec![("bin".to_string(), CopyOutcome::Copied(CopyStats { copied: 1, failed: 0 }))]
        );
        assert!(target.join("bin").join("cli.js").exists());
        assert!(!target.join("README.md").exists());
    }

    #[test]
    fn test_copy_recursive_counts_files() {
        let temp = TempDir::new().unwrap();
        let package = temp.path().join("package");
        create_package(&package);

        let stats = copy_recursive(&package.join("Generator_Patterns"), &temp.path().join("out"));
        assert_eq!(stats, CopyStats { copied: 1, failed: 0 });
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_recursive_continues_past_broken_entry() {
        let temp = TempDir::new().unwrap();
        let agents = temp.path().join("package").join(".github").join("agents");
        fs::create_dir_all(&agents).unwrap();
        // dangling link: copying it fails even when running as root
        std::os::unix::fs::symlink(temp.path().join("gone.md"), agents.join("a.agent.md")).unwrap();
        fs::write(agents.join("b.agent.md"), "b").unwrap();
        fs::write(agents.join("c.agent.md"), "c").unwrap();

        let out = temp.path().join("out");
        let stats = copy_recursive(&temp.path().join("package").join(".github"), &out);

        assert_eq!(stats, CopyStats { copied: 2, failed: 1 });
        assert_eq!(fs::read_to_string(out.join("agents").join("b.agent.md")).unwrap(), "b");
        assert_eq!(fs::read_to_string(out.join("agents").join("c.agent.md")).unwrap(), "c");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_reports_partial_folder_copy() {
        let temp = TempDir::new().unwrap();
        let package = temp.path().join("package");
        let target = temp.path().join("target");
        create_package(&package);
        std::os::unix::fs::symlink(
            temp.path().join("gone.md"),
            package.join(".github").join("agents").join("Broken.agent.md"),
        )
        .unwrap();

        let report = Installer::new(package, target.clone(), "agentpublishtest", InstallManifest::default()).run();

        assert_eq!(report.failures(), 1);
        assert!(
            report
                .entries
                .contains(&(".github".to_string(), CopyOutcome::Copied(CopyStats { copied: 1, failed: 1 })))
        );
        assert!(target.join(".github/agents/SampleAgent.agent.md").exists());
        assert!(target.join("README.md").exists());
    }

    #[test]
    fn test_installed_copy_path() {
        let installer = Installer::new(
            PathBuf::from("/pkg"),
            PathBuf::from("/project"),
            "generator-agent",
            InstallManifest::default(),
        );
        assert_eq!(installer.installed_copy(), PathBuf::from("/project/node_modules/generator-agent"));
    }
}
