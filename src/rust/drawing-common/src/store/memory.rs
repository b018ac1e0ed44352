//! インメモリ描画ストア

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::traits::{Drawing, DrawingStore};
use crate::error::{DrawingError, Result};

/// インメモリ描画ストア
#[derive(Debug, Default)]
pub struct MemoryDrawingStore {
    drawings: RwLock<HashMap<String, Drawing>>,
}

impl MemoryDrawingStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 描画リストからストアを作成
    pub fn with_drawings(drawings: Vec<Drawing>) -> Result<Self> {
        let mut map = HashMap::with_capacity(drawings.len());
        for drawing in drawings {
            if drawing.id.is_empty() {
                return Err(DrawingError::InvalidParameter(
                    "drawing id must not be empty".to_string(),
                ));
            }
            map.insert(drawing.id.clone(), drawing);
        }
        Ok(Self {
            drawings: RwLock::new(map),
        })
    }

    /// シードファイル（描画のJSON配列）から読み込む
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| DrawingError::Storage(format!("Failed to read seed file {}: {}", path.display(), e)))?;
        let drawings: Vec<Drawing> = serde_json::from_str(&content)?;

        info!("Loaded {} drawing(s) from {}", drawings.len(), path.display());
        Self::with_drawings(drawings)
    }

    /// 保持している描画数
    pub async fn len(&self) -> usize {
        self.drawings.read().await.len()
    }

    /// 保持しているIDの一覧（ソート済み）
    pub async fn ids(&self) -> Vec<String> {
        let drawings = self.drawings.read().await;
        let mut ids: Vec<String> = drawings.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[async_trait]
impl DrawingStore for MemoryDrawingStore {
    async fn get_drawing(&self, id: &str) -> Result<Drawing> {
        debug!("Looking up drawing: {}", id);
        let drawings = self.drawings.read().await;
        drawings
            .get(id)
            .cloned()
            .ok_or_else(|| DrawingError::NotFound(id.to_string()))
    }
}
