/// Ordered column-name hints for the AI backend.
///
/// Duplicates are allowed; the backend decides what to make of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetColumns {
    columns: Vec<String>,
}

impl TargetColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the trimmed input. Returns `false` (and changes nothing) when it is blank.
    pub fn add(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.columns.push(trimmed.to_string());
        true
    }

    /// Add from an editable buffer, clearing the buffer only if something was added.
    pub fn add_from_input(&mut self, input: &mut String) -> bool {
        let added = self.add(input);
        if added {
            input.clear();
        }
        added
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.columns.len() {
            Some(self.columns.remove(index))
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
