//! The document contract consumed by the index.

use std::collections::HashMap;

/// A value the index can ingest.
///
/// The single capability a document needs is to expose its indexable fields
/// as a mapping from field name to field values. Field order is irrelevant.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use tilia::Document;
///
/// struct City {
///     name: String,
///     country: String,
/// }
///
/// impl Document for City {
///     fn indexable_fields(&self) -> HashMap<String, Vec<String>> {
///         let mut out = HashMap::new();
///         out.insert("name".to_string(), vec![self.name.clone()]);
///         out.insert("country".to_string(), vec![self.country.clone()]);
///         out
///     }
/// }
/// ```
pub trait Document {
    /// The fields to index, as field name to list of values.
    ///
    /// A field with an empty value list is legal and contributes no
    /// postings.
    fn indexable_fields(&self) -> HashMap<String, Vec<String>>;
}
