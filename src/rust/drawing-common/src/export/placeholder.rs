//! プレースホルダー出力
//!
//! 実レンダリングは未実装。SVGは固定テンプレート、PNGは固定の1x1画像を返す。

use super::format::{data_uri, ExportFormat};

/// 固定PNG（1x1）
pub const PLACEHOLDER_PNG: [u8; 70] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
    0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
    0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78,
    0xDA, 0x63, 0xFC, 0xCF, 0xC0, 0x50, 0x0F, 0x00, 0x04, 0x85, 0x01, 0x80, 0x84, 0xA9,
    0x8C, 0x21, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// SVGプレースホルダーの固定ラベル
pub const PLACEHOLDER_SVG_LABEL: &str = "This is a placeholder for the SVG export.";

/// 固定PNGのdata URI
pub fn placeholder_png_data_uri() -> String {
    data_uri(ExportFormat::Png.mime_type(), &PLACEHOLDER_PNG)
}

/// 描画名を埋め込んだSVGプレースホルダーを生成
///
/// 名前はそのまま埋め込む（エスケープしない）。
pub fn render_svg(name: &str) -> String {
    format!(
        "<svg>\n      <text x=\"10\" y=\"20\">Drawing: {}</text>\n      <text x=\"10\" y=\"40\">{}</text>\n    </svg>",
        name, PLACEHOLDER_SVG_LABEL
    )
}
