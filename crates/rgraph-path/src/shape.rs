//! A minimal, hand-written schema shape used only for init-time checks and
//! path resolution.
//!
//! The original design walks arbitrary struct types via runtime reflection
//! (spec.md §9). In a statically typed port that becomes a small
//! hand-written (or derived) description of each resource's shape, just rich
//! enough to resolve a [`Path`] to the leaf type it reaches and to run the
//! init-time cycle/kind checks in `rgraph-resource`. It is not a general
//! purpose schema language.

use crate::{Error, Path, Result, Step};

/// The shape of a type reachable along a resource's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// `bool`.
    Bool,
    /// Any integer width.
    Int,
    /// Any float width.
    Float,
    /// `String`.
    Str,
    /// A struct, with named fields in declaration order.
    Struct(Vec<(String, TypeShape)>),
    /// A slice/`Vec` of the given element shape.
    Slice(Box<TypeShape>),
    /// A map from a basic key to the given value shape.
    Map(Box<TypeShape>),
    /// A pointer (`Option<Box<T>>`-like optionality) to the given shape.
    Pointer(Box<TypeShape>),
}

impl TypeShape {
    /// Look up a named field on a `Struct` shape.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&TypeShape> {
        match self {
            Self::Struct(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, t)| t),
            _ => None,
        }
    }
}

/// Walk `shape` along `path`, returning the reached leaf shape.
pub fn resolve_type<'a>(shape: &'a TypeShape, path: &Path) -> Result<&'a TypeShape> {
    let mut current = shape;
    let mut walked = Path::root();
    for step in path.steps() {
        current = match (current, step) {
            (TypeShape::Struct(_), Step::Field(name)) => {
                current.field(name).ok_or_else(|| Error::FieldNotFound {
                    field: name.clone(),
                    at: walked.to_string(),
                })?
            }
            (TypeShape::Slice(elem), Step::Index(_) | Step::AnySliceIndex) => elem.as_ref(),
            (TypeShape::Map(value), Step::MapIndex(_) | Step::AnyMapIndex) => value.as_ref(),
            (TypeShape::Pointer(inner), Step::Pointer) => inner.as_ref(),
            (_, Step::Field(_)) => {
                return Err(Error::FieldNotFound {
                    field: step.to_string(),
                    at: walked.to_string(),
                });
            }
            (_, Step::Index(_) | Step::AnySliceIndex) => {
                return Err(Error::NotIndexable { at: walked.to_string() });
            }
            (_, Step::MapIndex(_) | Step::AnyMapIndex) => {
                return Err(Error::NotMapIndexable { at: walked.to_string() });
            }
            (_, Step::Pointer) => return Err(Error::NotAPointer { at: walked.to_string() }),
        };
        walked.push(step.clone());
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_shape() -> TypeShape {
        TypeShape::Struct(vec![
            ("name".to_string(), TypeShape::Str),
            (
                "rules".to_string(),
                TypeShape::Slice(Box::new(TypeShape::Struct(vec![
                    ("port".to_string(), TypeShape::Int),
                ]))),
            ),
            (
                "tags".to_string(),
                TypeShape::Map(Box::new(TypeShape::Str)),
            ),
        ])
    }

    #[test]
    fn resolves_struct_field() {
        let shape = sample_shape();
        let resolved = resolve_type(&shape, &Path::field("name")).unwrap();
        assert_eq!(resolved, &TypeShape::Str);
    }

    #[test]
    fn resolves_through_slice_and_nested_struct() {
        let shape = sample_shape();
        let path = Path::field("rules")
            .join(Step::Index(0))
            .join(Step::Field("port".to_string()));
        let resolved = resolve_type(&shape, &path).unwrap();
        assert_eq!(resolved, &TypeShape::Int);
    }

    #[test]
    fn resolves_through_map() {
        let shape = sample_shape();
        let path = Path::field("tags").join(Step::MapIndex("env".to_string()));
        let resolved = resolve_type(&shape, &path).unwrap();
        assert_eq!(resolved, &TypeShape::Str);
    }

    #[test]
    fn missing_field_is_a_structured_error() {
        let shape = sample_shape();
        let err = resolve_type(&shape, &Path::field("nope")).unwrap_err();
        assert!(matches!(err, Error::FieldNotFound { .. }));
    }

    #[test]
    fn indexing_a_non_slice_is_a_structured_error() {
        let shape = sample_shape();
        let path = Path::field("name").join(Step::Index(0));
        let err = resolve_type(&shape, &path).unwrap_err();
        assert!(matches!(err, Error::NotIndexable { .. }));
    }
}
