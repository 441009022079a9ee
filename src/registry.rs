use std::collections::HashMap;

/// Companion notification for the external label display: one row label per
/// registered joint.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelUpdate {
    pub row: usize,
    pub label: String,
}

/// Joint name → matrix row index.
///
/// Names are case-sensitive. Registering a name again overwrites its index;
/// no history is kept and nothing is ever pruned. Indices are taken as the
/// sender supplies them — range checking against the matrix happens at write
/// time, not here.
#[derive(Debug, Default)]
pub struct JointRegistry {
    map: HashMap<String, usize>,
}

impl JointRegistry {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Insert or overwrite a mapping and return the label update for the
    /// display surface.
    pub fn register(&mut self, name: &str, index: usize) -> LabelUpdate {
        self.map.insert(name.to_string(), index);
        LabelUpdate {
            row: index,
            label: format!("{}: {}", index, name),
        }
    }

    /// Pure lookup. None means the caller should drop the sample.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.map.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let mut registry = JointRegistry::new();
        assert!(registry.is_empty());
        registry.register("Head", 3);
        assert_eq!(registry.resolve("Head"), Some(3));
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_resolve_unknown_is_none() {
        let registry = JointRegistry::new();
        assert_eq!(registry.resolve("Foo"), None);
    }

    #[test]
    fn test_register_overwrites() {
        let mut registry = JointRegistry::new();
        registry.register("Head", 3);
        registry.register("Head", 7);
        assert_eq!(registry.resolve("Head"), Some(7));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut registry = JointRegistry::new();
        registry.register("Head", 3);
        assert_eq!(registry.resolve("head"), None);
    }

    #[test]
    fn test_label_format() {
        let mut registry = JointRegistry::new();
        let update = registry.register("LeftHand", 12);
        assert_eq!(update.row, 12);
        assert_eq!(update.label, "12: LeftHand");
    }

    #[test]
    fn test_out_of_range_index_accepted() {
        // the registry does not know the matrix shape; 999 is fine here
        let mut registry = JointRegistry::new();
        registry.register("Head", 999);
        assert_eq!(registry.resolve("Head"), Some(999));
    }
}
