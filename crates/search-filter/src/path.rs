//! Property-path resolution for member-access chains.
//!
//! Resolves a chain of member accesses (e.g. `_.Complex.Name`) into a
//! `/`-delimited field path, applying per-field serialized-name overrides and
//! sticky camelCase propagation. The camelCase flag is threaded explicitly
//! through every recursive call: once any ancestor segment establishes it,
//! all descendant segments without their own override render camelCase.

use crate::ast::{Call, Expr};
use crate::error::{FilterError, FilterResult};
use crate::naming::{NamingOptions, TypeRef};

/// Naming info for a single resolved path segment.
///
/// The rendered form is the override name if present, else the raw name with
/// its first character lower-cased iff the camelCase flag is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyName {
    /// The member's raw (source) name.
    pub raw: String,
    /// Explicit serialized-name override; always wins over case conversion.
    pub rename: Option<String>,
    /// Whether this segment renders camelCase.
    pub camel_case: bool,
}

impl PropertyName {
    /// Renders the segment's serialized name.
    pub fn render(&self) -> String {
        match &self.rename {
            Some(name) => name.clone(),
            None if self.camel_case => lower_first(&self.raw),
            None => self.raw.clone(),
        }
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A partially resolved path with its propagating camelCase flag.
struct Resolved {
    path: String,
    camel_case: bool,
}

/// Resolves a member-access (or supported call/constant) expression into a
/// field path string.
///
/// # Errors
///
/// Returns [`FilterError::UnknownMember`] if a referenced member does not
/// exist on its declaring type, and [`FilterError::InvalidShape`] if a node
/// of an unsupported kind appears in the chain.
///
/// # Examples
///
/// ```
/// use search_filter_rs::{
///     resolve_property_path, Expr, FieldMeta, NamingOptions, StaticSchema, TypeRef,
/// };
///
/// const DOCUMENT: TypeRef = TypeRef::new("Document");
///
/// let schema = StaticSchema::new().with_field(DOCUMENT, "Name", FieldMeta::new());
/// let naming = NamingOptions::new(&schema);
///
/// let path = resolve_property_path(&Expr::param("_").member(DOCUMENT, "Name"), &naming);
/// assert_eq!(path.unwrap(), "Name");
/// ```
pub fn resolve_property_path(expr: &Expr, naming: &NamingOptions) -> FilterResult<String> {
    resolve(expr, naming, naming.camel_case).map(|resolved| resolved.path)
}

fn resolve(expr: &Expr, naming: &NamingOptions, inherited: bool) -> FilterResult<Resolved> {
    match expr {
        // The chain root contributes no segment; camelCase starts from the
        // caller-wide default alone.
        Expr::Parameter(_) => Ok(Resolved {
            path: String::new(),
            camel_case: inherited,
        }),

        Expr::Member {
            target,
            declaring_type,
            name,
        } => {
            let parent = resolve(target, naming, inherited)?;
            append_member(parent, *declaring_type, name, naming)
        }

        // A fixed literal used as a pseudo-field.
        Expr::Constant(value) => Ok(Resolved {
            path: value.to_string(),
            camel_case: inherited,
        }),

        Expr::Call(call) => match call {
            // Projection normalizes to the same path as First + member.
            Call::Select {
                source,
                declaring_type,
                member,
            } => {
                let parent = resolve(source, naming, inherited)?;
                append_member(parent, *declaring_type, member, naming)
            }
            Call::First { source } => resolve(source, naming, inherited),
            Call::Score => Ok(Resolved {
                path: "search.score()".to_string(),
                camel_case: inherited,
            }),
            _ => Err(FilterError::invalid_shape(expr)),
        },

        _ => Err(FilterError::invalid_shape(expr)),
    }
}

fn append_member(
    parent: Resolved,
    declaring_type: TypeRef,
    name: &str,
    naming: &NamingOptions,
) -> FilterResult<Resolved> {
    let meta = naming
        .schema
        .field(declaring_type, name)
        .ok_or_else(|| FilterError::unknown_member(declaring_type, name))?;

    // Sticky downward propagation: the parent's flag is OR'ed with this
    // segment's own markers, and the result flows to every descendant.
    let camel_case = parent.camel_case
        || meta.camel_case
        || naming.schema.camel_case_type(declaring_type);

    let segment = PropertyName {
        raw: name.to_string(),
        rename: meta.rename,
        camel_case,
    }
    .render();

    let path = if parent.path.is_empty() {
        segment
    } else {
        format!("{}/{}", parent.path, segment)
    };

    Ok(Resolved { path, camel_case })
}
