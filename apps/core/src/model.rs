use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlertId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClipboardTicket(pub u64);

pub type Millis = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementText {
    pub node: NodeId,
    pub text: String,
}

impl ElementText {
    pub fn new(node: NodeId, text: &str) -> Self {
        Self {
            node,
            text: text.to_string(),
        }
    }
}

pub fn normalize_query(input: &str) -> String {
    input.trim().to_lowercase()
}

pub fn submittable_query(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_query, submittable_query};

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_query("  Diabetes TYPE 2 "), "diabetes type 2");
    }

    #[test]
    fn whitespace_only_query_is_not_submittable() {
        assert_eq!(submittable_query(" \t\n "), None);
        assert_eq!(submittable_query("  asthma "), Some("asthma"));
    }
}
