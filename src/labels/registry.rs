use std::collections::HashMap;

/// Bidirectional mapping between identity labels and output-neuron indices.
///
/// Labels are lower-cased before lookup, so `Dime` and `dime` are the same
/// identity. Indices are handed out sequentially from 0 in first-seen order
/// and are never reused.
#[derive(Debug, Default, Clone)]
pub struct LabelRegistry {
    label_to_index: HashMap<String, usize>,
    index_to_label: Vec<String>,
}

impl LabelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of `label`, registering it if unseen.
    pub fn assign_index(&mut self, label: &str) -> usize {
        let key = label.to_lowercase();
        if let Some(&index) = self.label_to_index.get(&key) {
            return index;
        }
        let index = self.index_to_label.len();
        self.index_to_label.push(key.clone());
        self.label_to_index.insert(key, index);
        index
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.label_to_index.get(&label.to_lowercase()).copied()
    }

    pub fn label_of(&self, index: usize) -> Option<&str> {
        self.index_to_label.get(index).map(String::as_str)
    }

    /// Number of distinct labels seen so far.
    pub fn len(&self) -> usize {
        self.index_to_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_to_label.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_is_idempotent_and_case_insensitive() {
        let mut reg = LabelRegistry::new();
        assert_eq!(reg.assign_index("Dime"), 0);
        assert_eq!(reg.assign_index("dime"), 0);
        assert_eq!(reg.assign_index("DIME"), 0);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_distinct_labels_are_sequential() {
        let mut reg = LabelRegistry::new();
        let labels = ["dime", "dollar", "half dollar", "nickle", "penny", "quarter"];
        let indices: Vec<usize> = labels.iter().map(|l| reg.assign_index(l)).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(reg.assign_index("Penny"), 4);
        assert_eq!(reg.len(), 6);
    }

    #[test]
    fn test_reverse_lookup_is_lower_cased() {
        let mut reg = LabelRegistry::new();
        reg.assign_index("Quarter");
        assert_eq!(reg.label_of(0), Some("quarter"));
        assert_eq!(reg.index_of("QUARTER"), Some(0));
        assert_eq!(reg.label_of(1), None);
        assert_eq!(reg.index_of("dime"), None);
    }
}
