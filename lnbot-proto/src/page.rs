//! Listing pages, cursors and resource identifiers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A resource that carries its own listing cursor.
pub trait Cursor {
    /// Value to pass as `after` to continue listing past this item.
    fn cursor(&self) -> u64;
}

/// One page of a listing.
///
/// The service answers listing calls either with a bare JSON array or with an
/// object `{ "items": [...], "next": ... }`. For a bare array the
/// continuation token is the cursor of the last item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page, in server order.
    pub items: Vec<T>,
    /// Token for the next call's `after`, `None` when the page is empty.
    pub next: Option<u64>,
}

impl<T> Page<T> {
    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Parameters that continue the listing after this page, keeping `limit`.
    #[must_use]
    pub fn next_params(&self, limit: Option<u32>) -> Option<ListParams> {
        self.next.map(|after| ListParams { limit, after: Some(after) })
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageRepr<T> {
    Bare(Vec<T>),
    Wrapped {
        items: Vec<T>,
        #[serde(default)]
        next: Option<u64>,
    },
}

impl<'de, T> Deserialize<'de> for Page<T>
where
    T: Deserialize<'de> + Cursor,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match PageRepr::deserialize(deserializer)? {
            PageRepr::Bare(items) => {
                let next = items.last().map(Cursor::cursor);
                Self { items, next }
            }
            PageRepr::Wrapped { items, next } => Self { items, next },
        })
    }
}

/// Page size and continuation token for a listing call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Maximum number of items to return.
    pub limit: Option<u32>,
    /// Return items after this cursor.
    pub after: Option<u64>,
}

impl ListParams {
    /// Server defaults for both size and position.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            limit: None,
            after: None,
        }
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the continuation token.
    #[must_use]
    pub const fn with_after(mut self, after: u64) -> Self {
        self.after = Some(after);
        self
    }
}

/// An invoice or payment reference: its sequence number or its payment hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceId {
    /// Per-wallet sequence number.
    Number(u64),
    /// Hex payment hash.
    Hash(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Hash(h) => f.write_str(h),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ResourceId {
    fn from(hash: &str) -> Self {
        Self::Hash(hash.to_owned())
    }
}

impl From<String> for ResourceId {
    fn from(hash: String) -> Self {
        Self::Hash(hash)
    }
}

impl From<&String> for ResourceId {
    fn from(hash: &String) -> Self {
        Self::Hash(hash.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        number: u64,
    }

    impl Cursor for Item {
        fn cursor(&self) -> u64 {
            self.number
        }
    }

    #[test]
    fn bare_array_takes_cursor_from_last_item() {
        let page: Page<Item> = serde_json::from_str(r#"[{"number":7},{"number":5}]"#).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.next, Some(5));
    }

    #[test]
    fn empty_bare_array_has_no_next() {
        let page: Page<Item> = serde_json::from_str("[]").unwrap();
        assert!(page.is_empty());
        assert_eq!(page.next, None);
        assert_eq!(page.next_params(Some(10)), None);
    }

    #[test]
    fn wrapped_page_keeps_server_token() {
        let page: Page<Item> =
            serde_json::from_str(r#"{"items":[{"number":3}],"next":42}"#).unwrap();
        assert_eq!(page.items, vec![Item { number: 3 }]);
        assert_eq!(
            page.next_params(Some(1)),
            Some(ListParams::new().with_limit(1).with_after(42))
        );
    }

    #[test]
    fn resource_id_displays_as_path_segment() {
        assert_eq!(ResourceId::from(12).to_string(), "12");
        assert_eq!(ResourceId::from("ab12").to_string(), "ab12");
    }
}
