/* Common utilities shared between inspect and codegen commands */

use anyhow::Context;
use indexmap::IndexMap;
use puffs_types::{IdMap, Package, load_file};
use std::path::PathBuf;

/* Load every file and group them by package, keeping first-seen order for
 * both packages and files within a package */
pub fn load_packages(files: &[PathBuf], ids: &mut IdMap) -> anyhow::Result<Vec<Package>> {
    let mut packages: IndexMap<String, Package> = IndexMap::new();

    for path in files {
        let loaded = load_file(path, ids).with_context(|| format!("loading {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            package = %loaded.package,
            decls = loaded.file.decls.len(),
            "loaded declarations"
        );
        packages
            .entry(loaded.package.clone())
            .or_insert_with(|| Package::new(loaded.package.clone()))
            .files
            .push(loaded.file);
    }

    Ok(packages.into_values().collect())
}
