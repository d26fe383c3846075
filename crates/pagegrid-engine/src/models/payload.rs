use serde::{Deserialize, Serialize};

use crate::editing::EditError;
use crate::models::BlockKind;

/// Drag descriptor attached by the palette when a block kind is dragged
/// onto the canvas, e.g. `{"type":"text","isNewComponent":true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPayload {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub is_new_component: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
}

impl DropPayload {
    /// Payload for dragging a new block of `kind` out of the palette
    pub fn new_block(kind: BlockKind) -> Self {
        Self {
            kind,
            is_new_component: true,
            component_id: None,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, EditError> {
        serde_json::from_str(raw).map_err(|e| EditError::MalformedPayload(e.to_string()))
    }

    pub fn to_json(&self) -> String {
        // Only plain strings and booleans, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}
