//! Selection queries over a page or document snapshot

use std::collections::HashSet;
use std::fmt;

use super::service::{
    collect_all_elements, collect_objects_by_type, contains_point, narrow_all,
    starts_with_ignore_case, ElementSource, DEFAULT_EPSILON,
};
use crate::error::Result;
use crate::geometry::full_match_regex;
use crate::refs::{FormFieldRef, ObjectRef, ObjectType, RefVariant, Reference, TextRef};

/// Read-only query surface over one or more page snapshots
///
/// Every query returns references in page order, then draw order within a
/// page. Text queries fail when an element tagged as text is not a text
/// reference.
#[derive(Clone, Copy)]
pub struct SelectionIndex<'a> {
    source: &'a dyn ElementSource,
    epsilon: f64,
}

impl fmt::Debug for SelectionIndex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionIndex")
            .field("pages", &self.source.source_pages().len())
            .field("epsilon", &self.epsilon)
            .finish()
    }
}

impl<'a> SelectionIndex<'a> {
    pub fn new(source: &'a dyn ElementSource) -> Self {
        Self {
            source,
            epsilon: DEFAULT_EPSILON,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn of_types(&self, types: &[ObjectType]) -> Vec<&'a ObjectRef> {
        let set: HashSet<ObjectType> = types.iter().copied().collect();
        collect_objects_by_type(self.source, &set)
    }

    fn typed<T: RefVariant>(&self, types: &[ObjectType]) -> Result<Vec<&'a T>> {
        narrow_all(self.of_types(types))
    }

    fn at<R: Reference>(&self, refs: Vec<&'a R>, x: f64, y: f64) -> Vec<&'a R> {
        let found: Vec<&R> = refs
            .into_iter()
            .filter(|r| contains_point(*r, x, y, self.epsilon))
            .collect();
        tracing::debug!(x, y, count = found.len(), "Point selection");
        found
    }

    fn starting_with(refs: Vec<&'a TextRef>, prefix: &str) -> Vec<&'a TextRef> {
        refs.into_iter()
            .filter(|r| starts_with_ignore_case(r.text().as_deref(), Some(prefix)))
            .collect()
    }

    fn matching(refs: Vec<&'a TextRef>, pattern: &str) -> Result<Vec<&'a TextRef>> {
        let regex = full_match_regex(pattern)?;
        Ok(refs
            .into_iter()
            .filter(|r| r.text().is_some_and(|t| regex.is_match(&t)))
            .collect())
    }

    /// Every typed element
    pub fn elements(&self) -> Vec<&'a ObjectRef> {
        let found = collect_all_elements(self.source);
        tracing::debug!(count = found.len(), "Selected all elements");
        found
    }

    /// Elements whose concrete type is one of `types`
    pub fn elements_of_type(&self, types: &[ObjectType]) -> Vec<&'a ObjectRef> {
        self.of_types(types)
    }

    pub fn elements_at(&self, x: f64, y: f64) -> Vec<&'a ObjectRef> {
        self.at(self.elements(), x, y)
    }

    /// Any element carrying text that starts with `prefix`
    pub fn elements_starting_with(&self, prefix: &str) -> Vec<&'a ObjectRef> {
        self.elements()
            .into_iter()
            .filter(|e| starts_with_ignore_case(e.text().as_deref(), Some(prefix)))
            .collect()
    }

    pub fn paragraphs(&self) -> Result<Vec<&'a TextRef>> {
        self.typed(&[ObjectType::Paragraph])
    }

    pub fn paragraphs_starting_with(&self, prefix: &str) -> Result<Vec<&'a TextRef>> {
        Ok(Self::starting_with(self.paragraphs()?, prefix))
    }

    pub fn paragraphs_at(&self, x: f64, y: f64) -> Result<Vec<&'a TextRef>> {
        Ok(self.at(self.paragraphs()?, x, y))
    }

    /// First paragraph containing the point
    pub fn paragraph_at(&self, x: f64, y: f64) -> Result<Option<&'a TextRef>> {
        Ok(self.paragraphs_at(x, y)?.into_iter().next())
    }

    /// Paragraphs whose whole text matches `pattern`; `.` matches newlines
    pub fn paragraphs_matching(&self, pattern: &str) -> Result<Vec<&'a TextRef>> {
        Self::matching(self.paragraphs()?, pattern)
    }

    pub fn text_lines(&self) -> Result<Vec<&'a TextRef>> {
        self.typed(&[ObjectType::TextLine])
    }

    pub fn text_lines_starting_with(&self, prefix: &str) -> Result<Vec<&'a TextRef>> {
        Ok(Self::starting_with(self.text_lines()?, prefix))
    }

    pub fn text_lines_at(&self, x: f64, y: f64) -> Result<Vec<&'a TextRef>> {
        Ok(self.at(self.text_lines()?, x, y))
    }

    pub fn text_line_at(&self, x: f64, y: f64) -> Result<Option<&'a TextRef>> {
        Ok(self.text_lines_at(x, y)?.into_iter().next())
    }

    pub fn text_lines_matching(&self, pattern: &str) -> Result<Vec<&'a TextRef>> {
        Self::matching(self.text_lines()?, pattern)
    }

    pub fn images(&self) -> Vec<&'a ObjectRef> {
        self.of_types(&[ObjectType::Image])
    }

    pub fn images_at(&self, x: f64, y: f64) -> Vec<&'a ObjectRef> {
        self.at(self.images(), x, y)
    }

    pub fn paths(&self) -> Vec<&'a ObjectRef> {
        self.of_types(&[ObjectType::Path])
    }

    pub fn paths_at(&self, x: f64, y: f64) -> Vec<&'a ObjectRef> {
        self.at(self.paths(), x, y)
    }

    /// Form XObjects
    pub fn forms(&self) -> Vec<&'a ObjectRef> {
        self.of_types(&[ObjectType::FormXObject])
    }

    pub fn forms_at(&self, x: f64, y: f64) -> Vec<&'a ObjectRef> {
        self.at(self.forms(), x, y)
    }

    /// Interactive form fields of every kind
    pub fn form_fields(&self) -> Result<Vec<&'a FormFieldRef>> {
        let kinds: Vec<ObjectType> = ObjectType::ALL
            .iter()
            .copied()
            .filter(ObjectType::is_form_field)
            .collect();
        self.typed(&kinds)
    }

    pub fn form_fields_at(&self, x: f64, y: f64) -> Result<Vec<&'a FormFieldRef>> {
        Ok(self.at(self.form_fields()?, x, y))
    }

    pub fn form_fields_by_name(&self, name: &str) -> Result<Vec<&'a FormFieldRef>> {
        Ok(self
            .form_fields()?
            .into_iter()
            .filter(|f| f.name.as_deref() == Some(name))
            .collect())
    }

    pub fn form_field_by_name(&self, name: &str) -> Result<Option<&'a FormFieldRef>> {
        Ok(self.form_fields_by_name(name)?.into_iter().next())
    }
}
