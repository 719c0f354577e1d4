//! Agent scanning - discover `.github/agents/*.agent.md` in installed packages
//!
//! The scan is best effort: missing directories mean zero results, and
//! unreadable directories or files are logged and skipped. Descriptor text
//! is decoded lossily, so invalid UTF-8 never hides a file. Nothing here
//! returns an error. Result order follows directory-listing order.

use std::fs;
use std::path::{Path, PathBuf};

use super::{AGENTS_DIR, AgentDescriptor, AgentOrigin};

/// Scan every dependency folder (`node_modules`) in `roots`
pub fn scan(roots: &[PathBuf]) -> Vec<AgentDescriptor> {
    roots.iter().flat_map(|root| scan_modules(root)).collect()
}

/// Scan the immediate package directories of one dependency folder.
///
/// Scoped packages (`@scope/pkg`) are descended one level and reported as
/// `@scope/pkg`.
pub fn scan_modules(modules_dir: &Path) -> Vec<AgentDescriptor> {
    let mut found = Vec::new();

    for (module, module_dir) in list_subdirs(modules_dir) {
        if module.starts_with('@') {
            for (scoped, scoped_dir) in list_subdirs(&module_dir) {
                let qualified = format!("{}/{}", module, scoped);
                found.extend(scan_candidate(&scoped_dir, &qualified, AgentOrigin::Package));
            }
        } else {
            found.extend(scan_candidate(&module_dir, &module, AgentOrigin::Package));
        }
    }

    log::debug!("Found {} agent(s) under {}", found.len(), modules_dir.display());
    found
}

/// Scan a directory's own `.github/agents` folder (no dependency folder involved)
pub fn scan_local(dir: &Path) -> Vec<AgentDescriptor> {
    let module = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string());

    scan_candidate(dir, &module, AgentOrigin::Local)
}

/// Path of the agents folder inside a package directory
pub fn agents_dir(package_dir: &Path) -> PathBuf {
    AGENTS_DIR.iter().fold(package_dir.to_path_buf(), |path, part| path.join(part))
}

/// Read every descriptor under `<candidate>/.github/agents/`
fn scan_candidate(candidate: &Path, source_module: &str, origin: AgentOrigin) -> Vec<AgentDescriptor> {
    let mut found = Vec::new();
    let agents_dir = agents_dir(candidate);

    if !agents_dir.is_dir() {
        return found;
    }

    let entries = match fs::read_dir(&agents_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Error reading agents from {}: {}", source_module, e);
            return found;
        }
    };

    for entry in entries.flatten() {
        let file_name = entry.file_name().to_string_lossy().to_string();
        if super::parser::agent_name(&file_name).is_none() {
            continue;
        }

        let path = entry.path();
        if !path.is_file() {
            log::debug!("Skipping non-file agent entry: {}", path.display());
            continue;
        }

        let content = match fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                log::warn!("Failed to read agent {}: {}", path.display(), e);
                continue;
            }
        };

        let file_path = absolute(&path);
        if let Some(agent) = AgentDescriptor::from_file(&file_name, file_path, content, source_module, origin) {
            log::info!("Found agent: {} in {}", agent.name, source_module);
            found.push(agent);
        }
    }

    found
}

/// Subdirectories of `dir` as (name, path); unreadable or missing dirs yield nothing
fn list_subdirs(dir: &Path) -> Vec<(String, PathBuf)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if dir.exists() {
                log::warn!("Error reading {}: {}", dir.display(), e);
            }
            return Vec::new();
        }
    };

    entries
        .flatten()
        .map(|entry| (entry.file_name().to_string_lossy().to_string(), entry.path()))
        .filter(|(_, path)| path.is_dir())
        .collect()
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
