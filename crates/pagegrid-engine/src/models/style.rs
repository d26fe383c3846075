//! Presentation attributes carried by every block.
//!
//! The engine never interprets these values: tokens such as `text-base` or
//! `border-0` are passed through to whatever renders the block. The only
//! rule enforced here is that opacity stays within `[0, 1]`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
    #[default]
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub font_size: String,
    pub font_weight: String,
    pub text_align: TextAlign,
    pub color: String,
    pub background_color: String,
    pub padding: String,
    pub margin: String,
    pub border_radius: String,
    pub border_width: String,
    pub border_color: String,
    pub border_style: BorderStyle,
    pub opacity: f32,
    pub box_shadow: String,
    pub line_height: String,
    pub letter_spacing: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_size: "text-base".to_string(),
            font_weight: "font-normal".to_string(),
            text_align: TextAlign::Left,
            color: "#000000".to_string(),
            background_color: "#ffffff".to_string(),
            padding: String::new(),
            margin: String::new(),
            border_radius: String::new(),
            border_width: "border-0".to_string(),
            border_color: "#e5e7eb".to_string(),
            border_style: BorderStyle::None,
            opacity: 1.0,
            box_shadow: String::new(),
            line_height: "1.5".to_string(),
            letter_spacing: "0".to_string(),
        }
    }
}

/// A sparse set of style changes. Unset fields leave the target untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StylePatch {
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
    pub text_align: Option<TextAlign>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub padding: Option<String>,
    pub margin: Option<String>,
    pub border_radius: Option<String>,
    pub border_width: Option<String>,
    pub border_color: Option<String>,
    pub border_style: Option<BorderStyle>,
    pub opacity: Option<f32>,
    pub box_shadow: Option<String>,
    pub line_height: Option<String>,
    pub letter_spacing: Option<String>,
}

macro_rules! merge_fields {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )+
    };
}

impl StylePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Style {
    /// Merge `patch` into this style key by key
    pub fn merge(&mut self, patch: StylePatch) {
        let opacity = patch.opacity;
        merge_fields!(
            self,
            patch,
            font_size,
            font_weight,
            text_align,
            color,
            background_color,
            padding,
            margin,
            border_radius,
            border_width,
            border_color,
            border_style,
            box_shadow,
            line_height,
            letter_spacing,
        );
        if let Some(opacity) = opacity {
            self.opacity = clamp_opacity(opacity);
        }
    }

    /// A copy of this style with `patch` applied
    pub fn merged(&self, patch: StylePatch) -> Self {
        let mut style = self.clone();
        style.merge(patch);
        style
    }
}

fn clamp_opacity(value: f32) -> f32 {
    if value.is_nan() {
        1.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_merge_only_touches_set_keys() {
        let mut style = Style::default();
        style.merge(StylePatch {
            color: Some("#ff0000".to_string()),
            text_align: Some(TextAlign::Center),
            ..Default::default()
        });

        let expected = Style {
            color: "#ff0000".to_string(),
            text_align: TextAlign::Center,
            ..Style::default()
        };
        assert_eq!(style, expected);
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let style = Style {
            padding: "p-4".to_string(),
            ..Style::default()
        };
        assert_eq!(style.merged(StylePatch::default()), style);
        assert!(StylePatch::default().is_empty());
    }

    #[test]
    fn test_successive_patches_accumulate() {
        let mut style = Style::default();
        style.merge(StylePatch {
            border_style: Some(BorderStyle::Dashed),
            ..Default::default()
        });
        style.merge(StylePatch {
            border_width: Some("border-2".to_string()),
            ..Default::default()
        });

        assert_eq!(style.border_style, BorderStyle::Dashed);
        assert_eq!(style.border_width, "border-2");
    }

    #[rstest]
    #[case(0.5, 0.5)]
    #[case(-0.2, 0.0)]
    #[case(1.7, 1.0)]
    #[case(f32::NAN, 1.0)]
    fn test_opacity_clamped(#[case] input: f32, #[case] expected: f32) {
        let style = Style::default().merged(StylePatch {
            opacity: Some(input),
            ..Default::default()
        });
        assert_eq!(style.opacity, expected);
    }

    #[test]
    fn test_patch_deserializes_partial_json() {
        let patch: StylePatch =
            serde_json::from_str(r#"{"fontWeight":"font-bold","borderStyle":"dotted"}"#).unwrap();

        assert_eq!(patch.font_weight.as_deref(), Some("font-bold"));
        assert_eq!(patch.border_style, Some(BorderStyle::Dotted));
        assert_eq!(patch.color, None);
    }
}
