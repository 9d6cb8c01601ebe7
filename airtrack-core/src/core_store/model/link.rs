use serde::{Deserialize, Serialize};

/// Upper bound on links per airdrop/testnet, enforced by the form layer
pub const MAX_LINKS: usize = 50;

/// A named external link attached to an airdrop or testnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl Link {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Link {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            url: url.into(),
        }
    }

    /// Both name and url are filled in
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.url.trim().is_empty()
    }

    /// Exactly one of name and url is filled in
    pub fn is_half_filled(&self) -> bool {
        self.name.trim().is_empty() != self.url.trim().is_empty()
    }
}

/// Keep only links with both a name and a url
pub fn retain_complete(links: Vec<Link>) -> Vec<Link> {
    links.into_iter().filter(Link::is_complete).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_completeness() {
        assert!(Link::new("site", "https://example.com").is_complete());
        assert!(Link::new(" ", "https://example.com").is_half_filled());
        assert!(Link::new("site", "").is_half_filled());

        let blank = Link::new("", "   ");
        assert!(!blank.is_complete());
        assert!(!blank.is_half_filled());
    }

    #[test]
    fn test_retain_complete_drops_blank_rows() {
        let kept = retain_complete(vec![
            Link::new("site", "https://example.com"),
            Link::new("", ""),
            Link::new("docs", "https://docs.example.com"),
        ]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].name, "docs");
    }
}
