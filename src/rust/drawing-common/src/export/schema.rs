//! エクスポートリクエストのスキーマ定義と検証
//!
//! | 操作 | フィールド | 制約 |
//! |---|---|---|
//! | export-svg | id | 空文字不可 |
//! | export-png | id, quality, scale, exportWithDarkMode, exportBackground | quality 0〜1（既定 0.92）、scale 0.1〜5（既定 1） |
//! | export-json | id | 空文字不可 |

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DrawingError, Result};

pub const DEFAULT_QUALITY: f64 = 0.92;
pub const DEFAULT_SCALE: f64 = 1.0;
pub const QUALITY_RANGE: (f64, f64) = (0.0, 1.0);
pub const SCALE_RANGE: (f64, f64) = (0.1, 5.0);

/// スキーマ検証トレイト
pub trait ExportRequest: DeserializeOwned {
    /// 値の範囲などを検証
    fn validate(&self) -> Result<()>;

    /// JSON値からデシリアライズして検証
    fn from_value(value: Value) -> Result<Self> {
        let request: Self = serde_json::from_value(value)
            .map_err(|e| DrawingError::InvalidParameter(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(DrawingError::InvalidParameter("id must not be empty".to_string()));
    }
    Ok(())
}

fn validate_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(DrawingError::InvalidParameter(format!(
            "{} must be between {} and {} (got {})",
            field, min, max, value
        )));
    }
    Ok(())
}

/// SVGエクスポートリクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgExportRequest {
    pub id: String,
}

impl SvgExportRequest {
    pub fn new(id: impl Into<String>) -> Self {
        SvgExportRequest { id: id.into() }
    }
}

impl ExportRequest for SvgExportRequest {
    fn validate(&self) -> Result<()> {
        validate_id(&self.id)
    }
}

/// JSONエクスポートリクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonExportRequest {
    pub id: String,
}

impl JsonExportRequest {
    pub fn new(id: impl Into<String>) -> Self {
        JsonExportRequest { id: id.into() }
    }
}

impl ExportRequest for JsonExportRequest {
    fn validate(&self) -> Result<()> {
        validate_id(&self.id)
    }
}

/// PNGエクスポートリクエスト
///
/// オプションは検証されるが、現状の出力には影響しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PngExportRequest {
    pub id: String,

    /// 画質 (0〜1)
    #[serde(default = "default_quality")]
    pub quality: f64,

    /// 拡大率 (0.1〜5)
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// ダークモードで出力
    #[serde(default)]
    pub export_with_dark_mode: bool,

    /// 背景を含める
    #[serde(default = "default_true")]
    pub export_background: bool,
}

impl PngExportRequest {
    /// 既定値のオプションでリクエストを作成
    pub fn new(id: impl Into<String>) -> Self {
        PngExportRequest {
            id: id.into(),
            quality: DEFAULT_QUALITY,
            scale: DEFAULT_SCALE,
            export_with_dark_mode: false,
            export_background: true,
        }
    }
}

impl ExportRequest for PngExportRequest {
    fn validate(&self) -> Result<()> {
        validate_id(&self.id)?;
        validate_range("quality", self.quality, QUALITY_RANGE)?;
        validate_range("scale", self.scale, SCALE_RANGE)?;
        Ok(())
    }
}

fn default_quality() -> f64 {
    DEFAULT_QUALITY
}

fn default_scale() -> f64 {
    DEFAULT_SCALE
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_png_defaults_applied() {
        let req = PngExportRequest::from_value(json!({ "id": "abc" })).unwrap();
        assert_eq!(req, PngExportRequest::new("abc"));
        assert_eq!(req.quality, 0.92);
        assert_eq!(req.scale, 1.0);
        assert!(!req.export_with_dark_mode);
        assert!(req.export_background);
    }

    #[test]
    fn test_png_camel_case_fields() {
        let req = PngExportRequest::from_value(json!({
            "id": "abc",
            "quality": 0.5,
            "scale": 2,
            "exportWithDarkMode": true,
            "exportBackground": false
        }))
        .unwrap();
        assert_eq!(req.quality, 0.5);
        assert_eq!(req.scale, 2.0);
        assert!(req.export_with_dark_mode);
        assert!(!req.export_background);
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(SvgExportRequest::from_value(json!({ "id": "" })).is_err());
        assert!(JsonExportRequest::from_value(json!({ "id": "" })).is_err());
        assert!(PngExportRequest::from_value(json!({ "id": "" })).is_err());
        assert!(SvgExportRequest::from_value(json!({})).is_err());
    }

    #[test]
    fn test_quality_bounds() {
        for q in [0.0, 0.92, 1.0] {
            assert!(PngExportRequest::from_value(json!({ "id": "a", "quality": q })).is_ok());
        }
        for q in [-0.01, 1.01] {
            let err = PngExportRequest::from_value(json!({ "id": "a", "quality": q })).unwrap_err();
            assert!(matches!(err, DrawingError::InvalidParameter(_)));
        }
    }

    #[test]
    fn test_scale_bounds() {
        for s in [0.1, 1.0, 5.0] {
            assert!(PngExportRequest::from_value(json!({ "id": "a", "scale": s })).is_ok());
        }
        for s in [0.09, 5.5, 0.0] {
            assert!(PngExportRequest::from_value(json!({ "id": "a", "scale": s })).is_err());
        }
    }

    #[test]
    fn test_non_boolean_flags_rejected() {
        assert!(PngExportRequest::from_value(json!({ "id": "a", "exportWithDarkMode": "yes" })).is_err());
        assert!(PngExportRequest::from_value(json!({ "id": "a", "exportBackground": 1 })).is_err());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let req = SvgExportRequest::from_value(json!({ "id": "a", "extra": true })).unwrap();
        assert_eq!(req.id, "a");
    }
}
