// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Layer list entries derived from server-reported layer strings.

/// One entry of the scene layer list.
///
/// The server reports layers as display strings such as
/// `"  /World/Cube (Cube)"`: an indented prim path followed by optional
/// annotations. The path is the prefix of the trimmed string up to its first
/// whitespace; the label is the string exactly as reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerEntry {
    /// Display string, verbatim from the server (indentation included).
    pub label: String,
    /// Logical slash-delimited identifier for the scene object.
    pub path: String,
}

impl LayerEntry {
    /// Derive an entry from a raw server-reported layer string.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let path = match trimmed.find(char::is_whitespace) {
            Some(end) => &trimmed[..end],
            None => trimmed,
        };
        Self {
            label: raw.to_owned(),
            path: path.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_first_whitespace() {
        let entry = LayerEntry::parse("/World/Props/Chair 4 verts");
        assert_eq!(entry.path, "/World/Props/Chair");
        assert_eq!(entry.label, "/World/Props/Chair 4 verts");
    }

    #[test]
    fn keeps_indentation_in_label_but_not_path() {
        let entry = LayerEntry::parse("  /World/Cube (Cube)");
        assert_eq!(entry.path, "/World/Cube");
        assert_eq!(entry.label, "  /World/Cube (Cube)");
    }

    #[test]
    fn bare_path_is_both_label_and_path() {
        let entry = LayerEntry::parse("/World");
        assert_eq!(entry.path, "/World");
        assert_eq!(entry.label, "/World");
    }
}
