//! Static naming metadata for model types.
//!
//! The compiler never inspects model types at runtime. Instead, the model
//! layer registers a read-only metadata table up front: which fields exist on
//! each type, which carry an explicit serialized-name override, and which are
//! marked for camelCase rendering (per field or per type). The resolver only
//! consumes this table.

use std::collections::HashMap;
use std::fmt;

/// A lightweight reference to a model type, keyed by its name.
///
/// # Examples
///
/// ```
/// use search_filter_rs::TypeRef;
///
/// const DOCUMENT: TypeRef = TypeRef::new("Document");
/// assert_eq!(DOCUMENT.name(), "Document");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef(&'static str);

impl TypeRef {
    /// Creates a type reference from a static type name.
    pub const fn new(name: &'static str) -> Self {
        TypeRef(name)
    }

    /// Returns the type name.
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Naming metadata for a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// Explicit serialized-name override. Always wins over case conversion.
    pub rename: Option<String>,
    /// Naming-strategy marker: render this segment (and, stickily, all
    /// descendants) in camelCase.
    pub camel_case: bool,
}

impl FieldMeta {
    /// A field with no override and no naming-strategy marker.
    pub fn new() -> Self {
        Self::default()
    }

    /// A field serialized under an explicit override name.
    pub fn renamed(name: impl Into<String>) -> Self {
        FieldMeta {
            rename: Some(name.into()),
            camel_case: false,
        }
    }

    /// A field carrying a camelCase naming-strategy marker.
    pub fn camel_case() -> Self {
        FieldMeta {
            rename: None,
            camel_case: true,
        }
    }
}

/// Read-only field-metadata lookup supplied by the model layer.
///
/// Implementations must be safe for concurrent reads; the resolver never
/// writes through this trait.
pub trait Schema {
    /// Looks up metadata for `name` on `ty`. `None` means the member does not
    /// exist on the declaring type.
    fn field(&self, ty: TypeRef, name: &str) -> Option<FieldMeta>;

    /// Returns true if `ty` carries a type-level "serialize as camelCase"
    /// marker.
    fn camel_case_type(&self, _ty: TypeRef) -> bool {
        false
    }
}

#[derive(Debug, Clone, Default)]
struct TypeEntry {
    camel_case: bool,
    fields: HashMap<&'static str, FieldMeta>,
}

/// A [`Schema`] backed by explicitly registered entries.
///
/// # Examples
///
/// ```
/// use search_filter_rs::{FieldMeta, Schema, StaticSchema, TypeRef};
///
/// const DOCUMENT: TypeRef = TypeRef::new("Document");
///
/// let schema = StaticSchema::new()
///     .with_field(DOCUMENT, "Id", FieldMeta::new())
///     .with_field(DOCUMENT, "JsonProperty", FieldMeta::renamed("json_property"));
///
/// assert!(schema.field(DOCUMENT, "Id").is_some());
/// assert!(schema.field(DOCUMENT, "Missing").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
    types: HashMap<&'static str, TypeEntry>,
}

impl StaticSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type without fields. Registration is implicit when a field
    /// is added, so this is only needed for empty marker types.
    pub fn with_type(mut self, ty: TypeRef) -> Self {
        self.types.entry(ty.name()).or_default();
        self
    }

    /// Marks a type as "serialize as camelCase".
    pub fn with_camel_case_type(mut self, ty: TypeRef) -> Self {
        self.types.entry(ty.name()).or_default().camel_case = true;
        self
    }

    /// Registers a field on a type, creating the type entry if needed.
    pub fn with_field(mut self, ty: TypeRef, name: &'static str, meta: FieldMeta) -> Self {
        self.types
            .entry(ty.name())
            .or_default()
            .fields
            .insert(name, meta);
        self
    }
}

impl Schema for StaticSchema {
    fn field(&self, ty: TypeRef, name: &str) -> Option<FieldMeta> {
        self.types.get(ty.name())?.fields.get(name).cloned()
    }

    fn camel_case_type(&self, ty: TypeRef) -> bool {
        self.types.get(ty.name()).is_some_and(|t| t.camel_case)
    }
}

/// Naming configuration threaded through resolution and compilation.
///
/// This is the only externally supplied configuration: the metadata table and
/// a caller-wide default camelCase flag.
#[derive(Clone, Copy)]
pub struct NamingOptions<'a> {
    /// The model layer's metadata table.
    pub schema: &'a dyn Schema,
    /// Caller-wide default: start every member chain in camelCase.
    pub camel_case: bool,
}

impl<'a> NamingOptions<'a> {
    /// Creates naming options over a schema with camelCase off by default.
    pub fn new(schema: &'a dyn Schema) -> Self {
        NamingOptions {
            schema,
            camel_case: false,
        }
    }

    /// Sets the caller-wide default camelCase flag.
    pub fn with_camel_case(mut self, camel_case: bool) -> Self {
        self.camel_case = camel_case;
        self
    }
}

impl fmt::Debug for NamingOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamingOptions")
            .field("camel_case", &self.camel_case)
            .finish_non_exhaustive()
    }
}
