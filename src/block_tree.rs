use std::collections::BTreeMap;

/// Portable serialized form of a block and everything attached below it.
///
/// This is what travels between the main canvas and the backpack: the source
/// canvas serializes a block into a `BlockTree`, the destination instantiates a
/// fresh, independent copy from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BlockTree {
    pub kind: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "BTreeMap::is_empty"))]
    pub fields: BTreeMap<String, String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<BlockTree>,
}

impl BlockTree {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Number of blocks in this tree, including the root.
    pub fn block_count(&self) -> usize {
        1 + self.children.iter().map(Self::block_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BlockTree {
        BlockTree::new("controls_if")
            .with_field("ELSE", "1")
            .with_child(BlockTree::new("logic_boolean").with_field("BOOL", "TRUE"))
            .with_child(BlockTree::new("text_print").with_child(BlockTree::new("text")))
    }

    #[test]
    fn block_count_includes_all_descendants() {
        assert_eq!(sample().block_count(), 4);
        assert_eq!(BlockTree::new("math_number").block_count(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_form_omits_empty_collections() {
        let json = serde_json::to_value(BlockTree::new("text")).expect("serialize");
        assert_eq!(json, serde_json::json!({ "kind": "text" }));

        let tree = sample();
        let text = serde_json::to_string(&tree).expect("serialize");
        let back: BlockTree = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, tree);
    }
}
