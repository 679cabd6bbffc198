//! The compiled `(type, io, dependencies, refs)` tuple and its merge combinator.
//!
//! Every compiling function returns one of these values. Type text and codec
//! text are always produced together, so a structural change to one is
//! mirrored in the other within the same step.

use indexmap::{IndexMap, IndexSet};

/// Suffix appended to a type name to get its codec name.
pub const IO_SUFFIX: &str = "IO";

/// Codec identifier for a type name, e.g. `Pet` → `PetIO`.
pub fn io_name(name: &str) -> String {
    format!("{name}{IO_SUFFIX}")
}

/// "This file needs `name` from module `path`."
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub name: String,
    pub path: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Dependencies added whenever a field or parameter is wrapped as optional.
pub fn option_dependencies() -> Vec<Dependency> {
    vec![
        Dependency::new("Option", "fp-ts/lib/Option"),
        Dependency::new("createOptionFromNullable", "io-ts-types"),
    ]
}

/// Associative merge with an identity element.
///
/// Text fields concatenate, lists append, flags OR. Order is preserved, so
/// folding properties in declaration order yields fields in declaration order.
pub trait Combine: Sized {
    fn empty() -> Self;

    fn combine(self, other: Self) -> Self;

    fn fold_all(items: impl IntoIterator<Item = Self>) -> Self {
        items.into_iter().fold(Self::empty(), Self::combine)
    }

    /// Fold with `separator` placed between consecutive items.
    fn intercalate(separator: Self, items: impl IntoIterator<Item = Self>) -> Self
    where
        Self: Clone,
    {
        let mut result = Self::empty();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                result = result.combine(separator.clone());
            }
            result = result.combine(item);
        }
        result
    }
}

/// A schema node compiled into target-language type text and matching codec text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedType {
    pub type_: String,
    pub io: String,
    pub dependencies: Vec<Dependency>,
    /// Locally defined type names referenced below this node; used only to detect self-reference.
    pub refs: IndexSet<String>,
}

impl SerializedType {
    pub fn new(
        type_: impl Into<String>,
        io: impl Into<String>,
        dependencies: Vec<Dependency>,
        refs: IndexSet<String>,
    ) -> Self {
        Self {
            type_: type_.into(),
            io: io.into(),
            dependencies,
            refs,
        }
    }

    /// A type/codec pair with no dependencies and no references.
    pub fn plain(type_: impl Into<String>, io: impl Into<String>) -> Self {
        Self::new(type_, io, Vec::new(), IndexSet::new())
    }

    /// Structural equality ignoring dependencies and refs.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.type_ == other.type_ && self.io == other.io
    }
}

impl Combine for SerializedType {
    fn empty() -> Self {
        Self::plain("", "")
    }

    fn combine(mut self, other: Self) -> Self {
        self.type_.push_str(&other.type_);
        self.io.push_str(&other.io);
        self.dependencies.extend(other.dependencies);
        self.refs.extend(other.refs);
        self
    }
}

/// A compiled parameter: a [`SerializedType`] plus whether callers must supply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedParameter {
    pub serialized: SerializedType,
    pub is_required: bool,
}

impl SerializedParameter {
    pub fn new(serialized: SerializedType, is_required: bool) -> Self {
        Self {
            serialized,
            is_required,
        }
    }
}

impl Combine for SerializedParameter {
    fn empty() -> Self {
        Self::new(SerializedType::empty(), false)
    }

    fn combine(self, other: Self) -> Self {
        Self {
            serialized: self.serialized.combine(other.serialized),
            is_required: self.is_required || other.is_required,
        }
    }
}

/// A compiled path parameter. Path parameters are always required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedPathParameter {
    pub name: String,
    pub parameter: SerializedParameter,
}

/// Render import statements, one per module path in first-appearance order,
/// each listing its identifiers once.
pub fn serialize_dependencies(dependencies: &[Dependency]) -> Vec<String> {
    let mut by_path: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    for dependency in dependencies {
        by_path
            .entry(dependency.path.as_str())
            .or_default()
            .insert(dependency.name.as_str());
    }

    by_path
        .into_iter()
        .map(|(path, names)| {
            let names: Vec<&str> = names.into_iter().collect();
            format!("import {{ {} }} from '{}';", names.join(", "), path)
        })
        .collect()
}
