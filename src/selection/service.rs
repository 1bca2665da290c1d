//! Selection primitives
//!
//! Stateless helpers shared by every query: spatial containment, prefix
//! matching, snapshot traversal and strict typed narrowing.

use std::collections::HashSet;

use crate::error::{ModelError, Result};
use crate::refs::{FormFieldKind, FormFieldRef, ObjectRef, ObjectType, RefVariant, Reference};
use crate::snapshot::{
    DocumentSnapshot, PageSnapshot, SnapshotCache, SnapshotFetcher, TypedDocumentSnapshot,
    TypedPageSnapshot,
};

/// Tolerance used by point queries unless configured otherwise
pub const DEFAULT_EPSILON: f64 = 0.01;

/// Anything whose pages can be traversed for elements
pub trait ElementSource {
    /// Present pages in order
    fn source_pages(&self) -> Vec<&PageSnapshot>;
}

impl ElementSource for DocumentSnapshot {
    fn source_pages(&self) -> Vec<&PageSnapshot> {
        self.pages().collect()
    }
}

impl ElementSource for PageSnapshot {
    fn source_pages(&self) -> Vec<&PageSnapshot> {
        vec![self]
    }
}

impl<T> ElementSource for TypedPageSnapshot<T> {
    fn source_pages(&self) -> Vec<&PageSnapshot> {
        vec![self.snapshot()]
    }
}

impl<T> ElementSource for TypedDocumentSnapshot<T> {
    fn source_pages(&self) -> Vec<&PageSnapshot> {
        self.pages().map(TypedPageSnapshot::snapshot).collect()
    }
}

/// Inclusive point-in-rectangle test with a symmetric tolerance.
/// References without a position or bounding rectangle never match.
pub fn contains_point<R: Reference + ?Sized>(r: &R, x: f64, y: f64, epsilon: f64) -> bool {
    r.bounding_rect()
        .is_some_and(|rect| rect.contains_within(x, y, epsilon))
}

/// Single-char case mapping; multi-char expansions leave the char as is
fn single(c: char, mut mapped: impl Iterator<Item = char>) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(m), None) => m,
        _ => c,
    }
}

fn upper(c: char) -> char {
    single(c, c.to_uppercase())
}

fn lower(c: char) -> char {
    single(c, c.to_lowercase())
}

fn chars_match_ignore_case(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    let (ua, ub) = (upper(a), upper(b));
    ua == ub || lower(ua) == lower(ub)
}

/// Case-insensitive prefix test, folding one character at a time with no
/// normalisation. False when either side is absent.
pub fn starts_with_ignore_case(value: Option<&str>, prefix: Option<&str>) -> bool {
    let (Some(value), Some(prefix)) = (value, prefix) else {
        return false;
    };
    let mut chars = value.chars();
    prefix
        .chars()
        .all(|p| chars.next().is_some_and(|v| chars_match_ignore_case(v, p)))
}

/// Every typed element, pages first then elements, in snapshot order
pub fn collect_all_elements<S: ElementSource + ?Sized>(source: &S) -> Vec<&ObjectRef> {
    source
        .source_pages()
        .into_iter()
        .flat_map(PageSnapshot::elements)
        .filter(|e| e.object_type().is_some())
        .collect()
}

/// Elements whose concrete type is in `types`, in snapshot order
pub fn collect_objects_by_type<'a, S: ElementSource + ?Sized>(
    source: &'a S,
    types: &HashSet<ObjectType>,
) -> Vec<&'a ObjectRef> {
    source
        .source_pages()
        .into_iter()
        .flat_map(PageSnapshot::elements)
        .filter(|e| e.object_type().is_some_and(|t| types.contains(&t)))
        .collect()
}

/// Narrow every element to `T`, failing on the first one that is not
pub fn narrow_all<'a, T, I>(elements: I) -> Result<Vec<&'a T>>
where
    T: RefVariant,
    I: IntoIterator<Item = &'a ObjectRef>,
{
    elements
        .into_iter()
        .map(|e| {
            T::narrow(e).ok_or_else(|| {
                tracing::warn!(
                    expected = T::NAME,
                    found = e.variant_name(),
                    id = e.internal_id().unwrap_or("-"),
                    "Heterogeneous typed snapshot"
                );
                ModelError::HeterogeneousElements {
                    expected: T::NAME,
                    found: e.variant_name(),
                }
            })
        })
        .collect()
}

/// All elements of a typed page as `T`, or an error if any is not a `T`
pub fn typed_elements<T: RefVariant>(page: &TypedPageSnapshot<T>) -> Result<Vec<&T>> {
    narrow_all(page.snapshot().elements())
}

/// All elements of every page of a typed document, strictly narrowed
pub fn flatten_typed_document<T: RefVariant>(
    document: &TypedDocumentSnapshot<T>,
) -> Result<Vec<&T>> {
    narrow_all(document.pages().flat_map(|p| p.snapshot().elements()))
}

/// Substitute the concrete type named by `filter`.
/// An unknown filter name returns the reference unchanged.
pub fn adjust_form_field_type(r: &FormFieldRef, filter: &str) -> FormFieldRef {
    match filter.parse::<ObjectType>() {
        Ok(desired) if Some(desired) != r.object_type() => r.with_type(desired),
        _ => r.clone(),
    }
}

/// Where form fields are collected from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormScope {
    Document,
    Page(u32),
}

/// Form fields partitioned by kind
///
/// Fetches one typed snapshot per `FormFieldKind` and stamps each field
/// with the kind it was fetched under.
pub fn collect_form_fields<F: SnapshotFetcher>(
    source: &SnapshotCache<F>,
    scope: FormScope,
) -> Result<Vec<FormFieldRef>> {
    let mut results = Vec::new();
    for kind in FormFieldKind::ALL {
        let filter = kind.name();
        let fields: Vec<FormFieldRef> = match scope {
            FormScope::Document => {
                let snapshot = source.typed_document_snapshot::<FormFieldRef>(Some(filter))?;
                flatten_typed_document(&snapshot)?
                    .into_iter()
                    .map(|f| adjust_form_field_type(f, filter))
                    .collect()
            }
            FormScope::Page(page) => {
                let snapshot = source.typed_page_snapshot::<FormFieldRef>(page, Some(filter))?;
                typed_elements(&snapshot)?
                    .into_iter()
                    .map(|f| adjust_form_field_type(f, filter))
                    .collect()
            }
        };
        results.extend(fields);
    }
    tracing::debug!(count = results.len(), scope = ?scope, "Collected form fields");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundingRect, Position};
    use crate::refs::{BasicRef, PageRef, RefCore, TextRef};

    fn rect_ref(x: f64, y: f64, w: f64, h: f64) -> BasicRef {
        BasicRef::new(
            None,
            Some(Position::with_rect(Some(0), BoundingRect::new(x, y, w, h))),
            ObjectType::Image,
        )
    }

    fn text(id: &str, tag: ObjectType) -> ObjectRef {
        TextRef {
            core: RefCore::new(Some(id.into()), None, Some(tag), Some(tag)),
            ..Default::default()
        }
        .into()
    }

    fn basic(id: &str, tag: ObjectType) -> ObjectRef {
        BasicRef::new(Some(id.into()), None, tag).into()
    }

    fn ids(refs: &[&ObjectRef]) -> Vec<String> {
        refs.iter()
            .map(|r| r.internal_id().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_contains_point_corners_and_epsilon() {
        let r = rect_ref(10.0, 20.0, 30.0, 40.0);
        assert!(contains_point(&r, 10.0, 20.0, 0.0));
        assert!(contains_point(&r, 40.0, 60.0, 0.0));
        assert!(!contains_point(&r, 10.0 - 0.5 - 1e-9, 20.0, 0.5));
        assert!(contains_point(&r, 10.0 - 0.5, 20.0, 0.5));
        assert!(contains_point(&r, 40.5, 60.5, 0.5));
        assert!(!contains_point(&r, 25.0, 60.0 + 1e-6, 0.0));
    }

    #[test]
    fn test_contains_point_needs_rect() {
        assert!(!contains_point(&BasicRef::default(), 0.0, 0.0, 100.0));
        let mut at_page = BasicRef::default();
        at_page.core.position = Some(Position::at_page(0));
        assert!(!contains_point(&at_page, 0.0, 0.0, 100.0));
    }

    #[test]
    fn test_starts_with_ignore_case() {
        assert!(starts_with_ignore_case(
            Some("The Complete Guide"),
            Some("the complete")
        ));
        assert!(starts_with_ignore_case(Some("Hello World"), Some("hello")));
        assert!(starts_with_ignore_case(Some("ÉCOLE"), Some("école")));
        assert!(starts_with_ignore_case(Some("abc"), Some("")));
        assert!(!starts_with_ignore_case(Some("ab"), Some("abc")));
        assert!(!starts_with_ignore_case(Some("xhello"), Some("hello")));
        assert!(!starts_with_ignore_case(None, Some("a")));
        assert!(!starts_with_ignore_case(Some("a"), None));
    }

    fn two_pages() -> DocumentSnapshot {
        let mut first = PageSnapshot::new(
            None,
            vec![
                text("p1", ObjectType::Paragraph),
                basic("i1", ObjectType::Image),
                text("p2", ObjectType::Paragraph),
            ],
        );
        if let Some(elements) = first.elements.as_mut() {
            elements.insert(1, None);
        }
        let second = PageSnapshot::new(
            Some(PageRef::default()),
            vec![basic("x1", ObjectType::Path), text("p3", ObjectType::Paragraph)],
        );
        DocumentSnapshot {
            page_count: 3,
            fonts: None,
            pages: Some(vec![Some(first), None, Some(second)]),
        }
    }

    #[test]
    fn test_collect_by_type_keeps_page_then_element_order() {
        let doc = two_pages();
        let found = collect_objects_by_type(&doc, &HashSet::from([ObjectType::Paragraph]));
        assert_eq!(ids(&found), vec!["p1", "p2", "p3"]);

        let page = doc.page(2).unwrap();
        let on_page = collect_objects_by_type(page, &HashSet::from([ObjectType::Path]));
        assert_eq!(ids(&on_page), vec!["x1"]);
    }

    #[test]
    fn test_collect_all_skips_nulls_and_untyped() {
        let mut doc = two_pages();
        if let Some(Some(page)) = doc.pages.as_mut().and_then(|p| p.get_mut(2)) {
            page.elements
                .as_mut()
                .unwrap()
                .push(Some(BasicRef::default().into()));
        }
        let all = collect_all_elements(&doc);
        assert_eq!(ids(&all), vec!["p1", "i1", "p2", "x1", "p3"]);
    }

    #[test]
    fn test_narrowing_fails_on_single_odd_element() {
        let mut elements: Vec<ObjectRef> =
            (0..999).map(|i| text(&format!("t{i}"), ObjectType::TextLine)).collect();
        elements.push(basic("odd", ObjectType::Image));
        let page: TypedPageSnapshot<TextRef> = PageSnapshot::new(None, elements).into();

        let err = typed_elements(&page).unwrap_err();
        assert!(matches!(
            err,
            ModelError::HeterogeneousElements {
                expected: "TextRef",
                found: "BasicRef"
            }
        ));
    }

    #[test]
    fn test_flatten_typed_document() {
        let doc = DocumentSnapshot::new(vec![
            PageSnapshot::new(None, vec![text("a", ObjectType::Paragraph)]),
            PageSnapshot::new(None, vec![]),
            PageSnapshot::new(None, vec![text("b", ObjectType::TextLine)]),
        ]);
        let typed: TypedDocumentSnapshot<TextRef> = doc.into();
        let refs = flatten_typed_document(&typed).unwrap();
        let got: Vec<_> = refs.iter().map(|r| r.internal_id()).collect();
        assert_eq!(got, vec![Some("a"), Some("b")]);
    }

    #[test]
    fn test_adjust_form_field_type() {
        let field = FormFieldRef {
            core: RefCore::new(Some("f".into()), None, Some(ObjectType::FormField), None),
            name: Some("agree".into()),
            value: Some("Yes".into()),
        };
        let adjusted = adjust_form_field_type(&field, "CHECKBOX");
        assert_eq!(adjusted.object_type(), Some(ObjectType::Checkbox));
        assert_eq!(adjusted.name, field.name);

        assert_eq!(adjust_form_field_type(&field, "NOT_A_TYPE"), field);
        assert_eq!(adjust_form_field_type(&field, "FORM_FIELD"), field);
    }

    struct FormFetcher;

    impl SnapshotFetcher for FormFetcher {
        fn fetch_document_snapshot(&self, types: Option<&str>) -> Result<DocumentSnapshot> {
            Ok(DocumentSnapshot::new(vec![self.fetch_page_snapshot(0, types)?]))
        }

        fn fetch_page_snapshot(&self, _page: u32, types: Option<&str>) -> Result<PageSnapshot> {
            let elements = match types {
                Some("CHECKBOX") => vec![FormFieldRef {
                    core: RefCore::new(Some("c".into()), None, Some(ObjectType::FormField), None),
                    name: Some("agree".into()),
                    value: None,
                }
                .into()],
                Some("TEXT_FIELD") => vec![FormFieldRef {
                    core: RefCore::new(Some("t".into()), None, Some(ObjectType::FormField), None),
                    name: Some("email".into()),
                    value: Some("a@b.c".into()),
                }
                .into()],
                _ => vec![],
            };
            Ok(PageSnapshot::new(None, elements))
        }
    }

    #[test]
    fn test_collect_form_fields_stamps_kind() {
        let cache = SnapshotCache::new(FormFetcher);
        for scope in [FormScope::Document, FormScope::Page(0)] {
            let fields = collect_form_fields(&cache, scope).unwrap();
            let kinds: Vec<_> = fields.iter().map(|f| f.object_type()).collect();
            assert_eq!(
                kinds,
                vec![Some(ObjectType::TextField), Some(ObjectType::Checkbox)]
            );
        }
    }
}
