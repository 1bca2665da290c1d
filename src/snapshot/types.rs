//! Snapshot value graphs
//!
//! Read-only views of a document or page as produced by the remote
//! service. Missing pages, element lists and elements are kept as absent
//! values and skipped by traversal.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::refs::{ObjectRef, PageRef, RefVariant, Reference};
use crate::text::DocumentFontInfo;

/// One page: its identity reference and its elements in draw order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    #[serde(default)]
    pub page_ref: Option<ObjectRef>,
    #[serde(default)]
    pub elements: Option<Vec<Option<ObjectRef>>>,
    #[serde(default)]
    pub fonts: Option<Vec<DocumentFontInfo>>,
}

impl PageSnapshot {
    pub fn new(page_ref: Option<PageRef>, elements: Vec<ObjectRef>) -> Self {
        Self {
            page_ref: page_ref.map(ObjectRef::Page),
            elements: Some(elements.into_iter().map(Some).collect()),
            fonts: None,
        }
    }

    pub fn page_ref(&self) -> Option<&PageRef> {
        self.page_ref.as_ref().and_then(PageRef::narrow)
    }

    /// Page index from the page reference position
    pub fn page_index(&self) -> Option<u32> {
        self.page_ref()
            .and_then(|r| r.position())
            .and_then(|p| p.page_index())
    }

    /// Present elements in draw order
    pub fn elements(&self) -> impl Iterator<Item = &ObjectRef> + '_ {
        self.elements.iter().flatten().flatten()
    }

    /// Slot count including absent elements
    pub fn raw_len(&self) -> usize {
        self.elements.as_ref().map_or(0, Vec::len)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Whole document: page count, fonts and every page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub fonts: Option<Vec<DocumentFontInfo>>,
    #[serde(default)]
    pub pages: Option<Vec<Option<PageSnapshot>>>,
}

impl DocumentSnapshot {
    pub fn new(pages: Vec<PageSnapshot>) -> Self {
        Self {
            page_count: pages.len() as u32,
            fonts: None,
            pages: Some(pages.into_iter().map(Some).collect()),
        }
    }

    /// Present pages in document order
    pub fn pages(&self) -> impl Iterator<Item = &PageSnapshot> + '_ {
        self.pages.iter().flatten().flatten()
    }

    /// Page at `index`, counting absent slots
    pub fn page(&self, index: usize) -> Option<&PageSnapshot> {
        self.pages.as_ref()?.get(index)?.as_ref()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let snapshot = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            pages = snapshot.page_count,
            "Loaded document snapshot"
        );
        Ok(snapshot)
    }
}

/// Page snapshot whose elements are all expected to be `T`
///
/// The expectation is checked when the elements are narrowed, not on
/// construction.
pub struct TypedPageSnapshot<T> {
    snapshot: Arc<PageSnapshot>,
    marker: PhantomData<fn() -> T>,
}

impl<T> TypedPageSnapshot<T> {
    pub fn new(snapshot: impl Into<Arc<PageSnapshot>>) -> Self {
        Self {
            snapshot: snapshot.into(),
            marker: PhantomData,
        }
    }

    pub fn snapshot(&self) -> &PageSnapshot {
        &self.snapshot
    }

    /// Same data, different element expectation
    pub fn cast<U>(&self) -> TypedPageSnapshot<U> {
        TypedPageSnapshot {
            snapshot: Arc::clone(&self.snapshot),
            marker: PhantomData,
        }
    }
}

impl<T> Clone for TypedPageSnapshot<T> {
    fn clone(&self) -> Self {
        self.cast()
    }
}

impl<T> fmt::Debug for TypedPageSnapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedPageSnapshot")
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

impl<T> From<PageSnapshot> for TypedPageSnapshot<T> {
    fn from(snapshot: PageSnapshot) -> Self {
        Self::new(snapshot)
    }
}

/// Document snapshot whose elements are all expected to be `T`
pub struct TypedDocumentSnapshot<T> {
    pub page_count: u32,
    pub fonts: Option<Vec<DocumentFontInfo>>,
    pages: Vec<Option<TypedPageSnapshot<T>>>,
}

impl<T> TypedDocumentSnapshot<T> {
    /// Present pages in document order
    pub fn pages(&self) -> impl Iterator<Item = &TypedPageSnapshot<T>> + '_ {
        self.pages.iter().flatten()
    }

    /// Page slots including absent ones, indexed by page
    pub fn page_slots(&self) -> &[Option<TypedPageSnapshot<T>>] {
        &self.pages
    }

    pub fn cast<U>(&self) -> TypedDocumentSnapshot<U> {
        TypedDocumentSnapshot {
            page_count: self.page_count,
            fonts: self.fonts.clone(),
            pages: self
                .pages
                .iter()
                .map(|p| p.as_ref().map(TypedPageSnapshot::cast))
                .collect(),
        }
    }
}

impl<T> Clone for TypedDocumentSnapshot<T> {
    fn clone(&self) -> Self {
        self.cast()
    }
}

impl<T> fmt::Debug for TypedDocumentSnapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedDocumentSnapshot")
            .field("page_count", &self.page_count)
            .field("pages", &self.pages)
            .finish()
    }
}

impl<T> From<DocumentSnapshot> for TypedDocumentSnapshot<T> {
    fn from(snapshot: DocumentSnapshot) -> Self {
        Self {
            page_count: snapshot.page_count,
            fonts: snapshot.fonts,
            pages: snapshot
                .pages
                .unwrap_or_default()
                .into_iter()
                .map(|p| p.map(TypedPageSnapshot::new))
                .collect(),
        }
    }
}
