//! MCPツール実装

pub mod export;

use serde_json::{json, Value};

/// ツールリストを返す
pub async fn list() -> Result<Value, super::JsonRpcError> {
    Ok(json!({
        "tools": [
            {
                "name": "export_to_svg",
                "description": "Export a drawing to SVG markup.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "string",
                            "description": "ID of the drawing to export",
                            "minLength": 1
                        }
                    },
                    "required": ["id"]
                }
            },
            {
                "name": "export_to_png",
                "description": "Export a drawing to PNG, returned as a base64 data URI.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "string",
                            "description": "ID of the drawing to export",
                            "minLength": 1
                        },
                        "quality": {
                            "type": "number",
                            "description": "Image quality",
                            "minimum": 0,
                            "maximum": 1,
                            "default": 0.92
                        },
                        "scale": {
                            "type": "number",
                            "description": "Scale factor",
                            "minimum": 0.1,
                            "maximum": 5,
                            "default": 1
                        },
                        "exportWithDarkMode": {
                            "type": "boolean",
                            "description": "Render with the dark theme",
                            "default": false
                        },
                        "exportBackground": {
                            "type": "boolean",
                            "description": "Include the canvas background",
                            "default": true
                        }
                    },
                    "required": ["id"]
                }
            },
            {
                "name": "export_to_json",
                "description": "Export a drawing's stored JSON content unchanged.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "string",
                            "description": "ID of the drawing to export",
                            "minLength": 1
                        }
                    },
                    "required": ["id"]
                }
            }
        ]
    }))
}
