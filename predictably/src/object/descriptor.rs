//! Static type descriptors for declared objects.
//!
//! Each declared object type owns one `static` [`TypeDescriptor`]. It lists
//! the constructor parameters, the type's own class-level tags and config,
//! and the parent type. Descriptors form a single-rooted chain ending at
//! [`BASE_OBJECT`]; class-level flags are merged along that chain. A type
//! that declares no constructor of its own inherits its parent's.
//!
//! ```
//! use predictably::object::{ParamSpec, TypeDescriptor, BASE_OBJECT};
//! use predictably::{FlagMap, Value};
//!
//! fn params() -> Vec<ParamSpec> {
//!     vec![ParamSpec::with_default("window", 3)]
//! }
//!
//! fn tags() -> FlagMap {
//!     FlagMap::from([("capability:missing".to_string(), Value::from(true))])
//! }
//!
//! static SMOOTHER: TypeDescriptor = TypeDescriptor {
//!     name: "Smoother",
//!     parent: Some(&BASE_OBJECT),
//!     params: Some(params),
//!     tags,
//!     ..TypeDescriptor::DEFAULT
//! };
//!
//! assert!(SMOOTHER.is_declared_object());
//! assert_eq!(SMOOTHER.lineage().len(), 2);
//! ```

use std::fmt;

use crate::value::{FlagMap, Value};

/// How a constructor parameter is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// An ordinary named parameter.
    Named,
    /// A catch-all positional parameter. Not allowed on declared objects.
    VariadicPositional,
    /// A catch-all keyword parameter. Not reported as a declared parameter.
    VariadicKeyword,
}

/// One constructor parameter of a declared object type.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Parameter name; also the attribute the value is stored under.
    pub name: &'static str,
    /// Declaration kind.
    pub kind: ParamKind,
    /// Default value, or `None` for a required parameter.
    pub default: Option<Value>,
}

impl ParamSpec {
    /// A named parameter with a default value.
    #[must_use]
    pub fn with_default(name: &'static str, default: impl Into<Value>) -> Self {
        Self {
            name,
            kind: ParamKind::Named,
            default: Some(default.into()),
        }
    }

    /// A named parameter that must be supplied at construction.
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Named,
            default: None,
        }
    }

    /// A variadic positional parameter.
    #[must_use]
    pub const fn variadic(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::VariadicPositional,
            default: None,
        }
    }

    /// A variadic keyword parameter.
    #[must_use]
    pub const fn variadic_keyword(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::VariadicKeyword,
            default: None,
        }
    }
}

/// Static description of a declared object type.
pub struct TypeDescriptor {
    /// Type name used in messages and representations.
    pub name: &'static str,
    /// Parent type, `None` only for the root.
    pub parent: Option<&'static TypeDescriptor>,
    /// The constructor signature, or `None` to inherit the parent's.
    pub params: Option<fn() -> Vec<ParamSpec>>,
    /// Tags declared by this type itself.
    pub tags: fn() -> FlagMap,
    /// Local config declared by this type itself.
    pub config: fn() -> FlagMap,
}

fn no_flags() -> FlagMap {
    FlagMap::new()
}

impl TypeDescriptor {
    /// Field defaults for struct-update syntax. `parent` must still be set.
    pub const DEFAULT: Self = Self {
        name: "",
        parent: None,
        params: None,
        tags: no_flags,
        config: no_flags,
    };

    /// The constructor signature, in declaration order.
    ///
    /// Taken from the closest type in the lineage that declares one.
    #[must_use]
    pub fn param_specs(&self) -> Vec<ParamSpec> {
        let mut current = Some(self);
        while let Some(descriptor) = current {
            if let Some(params) = descriptor.params {
                return params();
            }
            current = descriptor.parent;
        }
        Vec::new()
    }

    /// Ancestors of this type, root first and this type last.
    #[must_use]
    pub fn lineage(&self) -> Vec<&TypeDescriptor> {
        let mut chain = vec![self];
        let mut current = self.parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = parent.parent;
        }
        chain.reverse();
        chain
    }

    /// Whether `other` is this type or one of its ancestors.
    #[must_use]
    pub fn is_subtype_of(&self, other: &TypeDescriptor) -> bool {
        let mut current = Some(self);
        while let Some(descriptor) = current {
            if std::ptr::eq(descriptor, other) {
                return true;
            }
            current = descriptor.parent;
        }
        false
    }

    /// Whether this type participates in the object protocol.
    #[must_use]
    pub fn is_declared_object(&self) -> bool {
        self.is_subtype_of(&BASE_OBJECT)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("parent", &self.parent.map(|parent| parent.name))
            .finish_non_exhaustive()
    }
}

/// Root of the declared object hierarchy.
pub static BASE_OBJECT: TypeDescriptor = TypeDescriptor {
    name: "BaseObject",
    ..TypeDescriptor::DEFAULT
};
