//! In-memory snapshot source
//!
//! Serves snapshots from a document snapshot already in memory, applying
//! the type filter the way the remote service does. Used by the CLI and
//! for offline inspection of saved snapshots.

use std::path::Path;

use super::cache::{normalize_types, SnapshotFetcher, ALL_TYPES_KEY};
use super::types::{DocumentSnapshot, PageSnapshot};
use crate::error::{ModelError, Result};
use crate::refs::{ObjectRef, Reference};

#[derive(Debug, Clone)]
pub struct LocalSnapshotSource {
    document: DocumentSnapshot,
}

impl LocalSnapshotSource {
    pub fn new(document: DocumentSnapshot) -> Self {
        Self { document }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(DocumentSnapshot::from_path(path)?))
    }

    pub fn document(&self) -> &DocumentSnapshot {
        &self.document
    }
}

/// Keeps an element when either of its tags is named in the filter
fn keep(filter: &[&str], element: &ObjectRef) -> bool {
    [element.object_type(), element.object_ref_type()]
        .into_iter()
        .flatten()
        .any(|t| filter.contains(&t.as_str()))
}

fn filter_page(page: &PageSnapshot, key: &str) -> PageSnapshot {
    if key == ALL_TYPES_KEY {
        return page.clone();
    }
    let filter: Vec<&str> = key.split(',').collect();
    PageSnapshot {
        page_ref: page.page_ref.clone(),
        elements: page.elements.as_ref().map(|elements| {
            elements
                .iter()
                .filter(|e| e.as_ref().is_some_and(|e| keep(&filter, e)))
                .cloned()
                .collect()
        }),
        fonts: page.fonts.clone(),
    }
}

impl SnapshotFetcher for LocalSnapshotSource {
    fn fetch_document_snapshot(&self, types: Option<&str>) -> Result<DocumentSnapshot> {
        let key = normalize_types(types);
        Ok(DocumentSnapshot {
            page_count: self.document.page_count,
            fonts: self.document.fonts.clone(),
            pages: self.document.pages.as_ref().map(|pages| {
                pages
                    .iter()
                    .map(|p| p.as_ref().map(|p| filter_page(p, &key)))
                    .collect()
            }),
        })
    }

    fn fetch_page_snapshot(&self, page_index: u32, types: Option<&str>) -> Result<PageSnapshot> {
        let page = self
            .document
            .page(page_index as usize)
            .ok_or_else(|| ModelError::Fetch(format!("page {} not in snapshot", page_index)))?;
        Ok(filter_page(page, &normalize_types(types)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refs::{BasicRef, ObjectType, RefCore, TextRef};

    fn source() -> LocalSnapshotSource {
        let line = TextRef {
            core: RefCore::new(None, None, Some(ObjectType::Paragraph), Some(ObjectType::TextLine)),
            ..Default::default()
        };
        let page = PageSnapshot::new(
            None,
            vec![
                BasicRef::new(Some("i".into()), None, ObjectType::Image).into(),
                line.into(),
                BasicRef::new(Some("p".into()), None, ObjectType::Path).into(),
            ],
        );
        LocalSnapshotSource::new(DocumentSnapshot::new(vec![page]))
    }

    #[test]
    fn test_filter_by_either_tag() {
        let source = source();
        let page = source.fetch_page_snapshot(0, Some("path,text_line")).unwrap();
        assert_eq!(page.elements().count(), 2);

        let page = source.fetch_page_snapshot(0, Some("PARAGRAPH")).unwrap();
        assert_eq!(page.elements().count(), 1);

        let doc = source.fetch_document_snapshot(None).unwrap();
        assert_eq!(doc.pages().next().unwrap().elements().count(), 3);
    }

    #[test]
    fn test_missing_page_is_a_fetch_error() {
        assert!(matches!(
            source().fetch_page_snapshot(9, None),
            Err(ModelError::Fetch(_))
        ));
    }
}
