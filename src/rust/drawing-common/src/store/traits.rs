//! 描画ストア抽象化トレイト

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::error::Result;

/// 描画データ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    /// 描画ID（空文字不可）
    pub id: String,

    /// 描画名
    pub name: String,

    /// シリアライズ済みの描画内容（JSON文字列を想定）
    pub content: String,
}

impl Drawing {
    pub fn new(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Drawing {
            id: id.into(),
            name: name.into(),
            content: content.into(),
        }
    }
}

/// 描画ルックアップトレイト
///
/// 該当する描画がない場合は `DrawingError::NotFound` を返すこと。
/// それ以外の失敗はエクスポート側で `ExportFailed` に包まれる。
#[async_trait]
pub trait DrawingStore: Send + Sync {
    /// IDで描画を取得
    async fn get_drawing(&self, id: &str) -> Result<Drawing>;
}

/// Arc<T>にDrawingStoreトレイトを実装
#[async_trait]
impl<T: DrawingStore + ?Sized> DrawingStore for Arc<T> {
    async fn get_drawing(&self, id: &str) -> Result<Drawing> {
        (**self).get_drawing(id).await
    }
}
