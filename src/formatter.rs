//! Display helpers used when rendering address cells

use crate::grid::{Color, FontDescriptor, Icon, IconKind};

const CHUNK: usize = 5;

/// Presentation hints the table asks for while rendering
pub trait DisplayFormatter {
    /// Shorten an address for narrow columns
    fn truncate_for_display(&self, address: &str) -> String;

    fn monospace_font_hint(&self) -> FontDescriptor;

    /// Background used for addresses that already received funds
    fn used_highlight(&self) -> Color;

    fn icon(&self, kind: IconKind) -> Icon;
}

/// Chunked truncation: `sections` groups of five characters from the start,
/// an ellipsis, then `sections` groups from the end.
#[derive(Debug, Clone)]
pub struct StandardFormatter {
    pub sections: usize,
    pub separator: String,
}

impl Default for StandardFormatter {
    fn default() -> Self {
        Self {
            sections: 3,
            separator: " ".to_string(),
        }
    }
}

impl StandardFormatter {
    pub fn new(sections: usize, separator: impl Into<String>) -> Self {
        Self {
            sections: sections.max(1),
            separator: separator.into(),
        }
    }
}

impl DisplayFormatter for StandardFormatter {
    fn truncate_for_display(&self, address: &str) -> String {
        let chars: Vec<char> = address.chars().collect();
        let sections = self.sections.max(1);
        let shown = sections * CHUNK;

        // Nothing would be elided
        if chars.len() <= shown * 2 {
            return address.to_string();
        }

        let mut parts: Vec<String> = chars[..shown]
            .chunks(CHUNK)
            .map(|chunk| chunk.iter().collect())
            .collect();
        parts.push("…".to_string());
        parts.extend(
            chars[chars.len() - shown..]
                .chunks(CHUNK)
                .map(|chunk| chunk.iter().collect::<String>()),
        );

        parts.join(&self.separator)
    }

    fn monospace_font_hint(&self) -> FontDescriptor {
        FontDescriptor {
            family: "monospace".to_string(),
            point_size: None,
            fixed_pitch: true,
        }
    }

    fn used_highlight(&self) -> Color {
        Color::rgba(0xf4, 0x43, 0x36, 0x60)
    }

    fn icon(&self, kind: IconKind) -> Icon {
        let resource = match kind {
            IconKind::Pin => "pin.png",
            IconKind::HiddenEye => "eye_blind.png",
        };
        Icon {
            kind,
            resource: resource.to_string(),
        }
    }
}
