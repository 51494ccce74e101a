//! # Asset Loading
//!
//! The loader is the seam between the game and whatever produces models.
//! The game only needs each model's local bounds, so a load resolves an
//! asset path to a [`LoadedAsset`].
//!
//! [`CatalogAssetLoader`] answers from a JSON catalog of model bounds and can
//! check that the model file exists under the asset root.

use crate::world::Aabb;
use crate::{KeyhuntError, KeyhuntResult};
use log::{debug, info};
use macroquad::math::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

/// Catalog shipped with the game.
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Future returned by [`AssetLoader::load`].
pub type LoadFuture = Pin<Box<dyn Future<Output = KeyhuntResult<LoadedAsset>> + Send + 'static>>;

/// A model that finished loading.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAsset {
    pub path: String,
    /// Bounds in model space, before scale/rotation/translation
    pub local_bounds: Aabb,
}

/// Asynchronous source of models.
///
/// The returned future must not borrow the loader: it is spawned onto the
/// async runtime and may outlive the call.
pub trait AssetLoader: Send + Sync {
    fn load(&self, path: &str) -> LoadFuture;
}

/// Model-space bounds of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetBounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl AssetBounds {
    pub fn to_aabb(self) -> Aabb {
        Aabb::new(Vec3::from_array(self.min), Vec3::from_array(self.max))
    }
}

/// Known models keyed by file stem (`chair` for `assets/models/chair.glb`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetCatalog {
    pub models: HashMap<String, AssetBounds>,
}

impl AssetCatalog {
    /// The catalog embedded in the binary.
    pub fn builtin() -> KeyhuntResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> KeyhuntResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a catalog file without blocking the runtime.
    pub async fn load_from_file(path: impl AsRef<Path>) -> KeyhuntResult<Self> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&json)
    }

    pub fn lookup(&self, asset_path: &str) -> Option<AssetBounds> {
        let stem = Path::new(asset_path).file_stem()?.to_str()?;
        self.models.get(stem).copied()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Loader backed by an [`AssetCatalog`].
#[derive(Debug, Clone)]
pub struct CatalogAssetLoader {
    catalog: Arc<AssetCatalog>,
    root: PathBuf,
    verify_files: bool,
}

impl CatalogAssetLoader {
    pub fn new(catalog: AssetCatalog, root: impl Into<PathBuf>, verify_files: bool) -> Self {
        Self {
            catalog: Arc::new(catalog),
            root: root.into(),
            verify_files,
        }
    }

    /// Builds a loader from the configured catalog file, or the built-in
    /// catalog when none is configured.
    pub async fn from_config(config: &crate::config::AssetConfig) -> KeyhuntResult<Self> {
        let catalog = match &config.catalog {
            Some(path) => {
                info!("Loading asset catalog from {}", path.display());
                AssetCatalog::load_from_file(path).await?
            }
            None => AssetCatalog::builtin()?,
        };
        info!("Asset catalog has {} models", catalog.len());
        Ok(Self::new(catalog, config.root.clone(), config.verify_files))
    }

    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }
}

impl AssetLoader for CatalogAssetLoader {
    fn load(&self, path: &str) -> LoadFuture {
        let catalog = Arc::clone(&self.catalog);
        let full_path = self.root.join(path);
        let verify = self.verify_files;
        let path = path.to_string();

        Box::pin(async move {
            if verify && !tokio::fs::try_exists(&full_path).await? {
                return Err(KeyhuntError::AssetLoad {
                    path,
                    reason: format!("file not found at {}", full_path.display()),
                });
            }

            let bounds = catalog.lookup(&path).ok_or_else(|| KeyhuntError::AssetLoad {
                path: path.clone(),
                reason: "not in asset catalog".to_string(),
            })?;

            debug!("Loaded {}", path);
            Ok(LoadedAsset {
                path,
                local_bounds: bounds.to_aabb(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_covers_furniture() {
        let catalog = AssetCatalog::builtin().unwrap();
        for request in crate::generation::furnishing::all_furniture_paths() {
            assert!(
                catalog.lookup(request).is_some(),
                "{} missing from built-in catalog",
                request
            );
        }
    }

    #[test]
    fn test_lookup_by_stem() {
        let catalog = AssetCatalog::from_json(
            r#"{ "models": { "chair": { "min": [-0.2, 0.0, -0.2], "max": [0.2, 0.9, 0.2] } } }"#,
        )
        .unwrap();
        assert!(catalog.lookup("assets/models/chair.glb").is_some());
        assert!(catalog.lookup("chair").is_some());
        assert!(catalog.lookup("assets/models/desk.glb").is_none());
    }

    #[tokio::test]
    async fn test_catalog_loader_resolves_bounds() {
        let loader = CatalogAssetLoader::new(AssetCatalog::builtin().unwrap(), ".", false);
        let asset = loader.load("assets/models/chair.glb").await.unwrap();
        assert_eq!(asset.path, "assets/models/chair.glb");
        assert!(asset.local_bounds.size().y > 0.0);
    }

    #[tokio::test]
    async fn test_catalog_loader_unknown_asset_fails() {
        let loader = CatalogAssetLoader::new(AssetCatalog::default(), ".", false);
        let result = loader.load("assets/models/ghost.glb").await;
        assert!(matches!(result, Err(KeyhuntError::AssetLoad { .. })));
    }

    #[test]
    fn test_catalog_loader_verifies_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("models")).unwrap();
        std::fs::write(dir.path().join("models/chair.glb"), b"glTF").unwrap();

        let loader = CatalogAssetLoader::new(AssetCatalog::builtin().unwrap(), dir.path(), true);
        assert!(tokio_test::block_on(loader.load("models/chair.glb")).is_ok());
        assert!(matches!(
            tokio_test::block_on(loader.load("models/desk.glb")),
            Err(KeyhuntError::AssetLoad { .. })
        ));
    }

    #[tokio::test]
    async fn test_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "models": {{ "crate": {{ "min": [0, 0, 0], "max": [1, 1, 1] }} }} }}"#
        )
        .unwrap();

        let catalog = AssetCatalog::load_from_file(file.path()).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.lookup("crate.glb").unwrap().to_aabb().size(),
            Vec3::ONE
        );
    }
}
