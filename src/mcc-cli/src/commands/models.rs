//! Missing model generation command handler

use anyhow::{bail, Context, Result};
use mcc::Namespace;
use std::path::Path;

/// Handle the models command
pub fn handle(resourcepack: &Path, namespace: &str) -> Result<()> {
    let created = generate(resourcepack, namespace)?;
    println!("Generated {} missing item models", created);
    Ok(())
}

pub fn generate(resourcepack: &Path, namespace: &str) -> Result<usize> {
    let ns = Namespace::parse(namespace)?;
    let ns_dir = resourcepack.join("assets").join(ns.as_str());
    if !ns_dir.is_dir() {
        bail!("No asset folder at {}", ns_dir.display());
    }

    mcc::generate_missing_models(&ns_dir, &ns)
        .with_context(|| format!("Failed to generate models in {}", ns_dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_for_textures() {
        let tmp = TempDir::new().unwrap();
        let textures = tmp.path().join("assets/pack/textures/item/gems");
        fs::create_dir_all(&textures).unwrap();
        fs::write(textures.join("ruby.png"), "png").unwrap();

        assert_eq!(generate(tmp.path(), "pack").unwrap(), 1);
        assert!(tmp
            .path()
            .join("assets/pack/models/item/gems/ruby.json")
            .exists());

        // Second run finds nothing missing
        assert_eq!(generate(tmp.path(), "pack").unwrap(), 0);
    }

    #[test]
    fn test_missing_namespace_folder() {
        let tmp = TempDir::new().unwrap();
        assert!(generate(tmp.path(), "pack").is_err());
    }

    #[test]
    fn test_invalid_namespace() {
        let tmp = TempDir::new().unwrap();
        assert!(generate(tmp.path(), "Not Valid").is_err());
    }
}
