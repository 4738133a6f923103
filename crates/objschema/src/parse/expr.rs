use objschema_primitives::PropertyTypeName;
use std::fmt;

///
/// BaseType
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BaseType {
    /// Primitive tag, `mixed` included.
    Primitive(PropertyTypeName),
    UserDefined(String),
}

impl BaseType {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(ty) => ty.name(),
            Self::UserDefined(class) => class,
        }
    }
}

///
/// TypeExpr
///
/// Parsed shorthand type. The grammar only produces a collection at the
/// outermost level, wrapping an optional or plain scalar.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeExpr {
    Scalar(BaseType),
    Optional(Box<Self>),
    List(Box<Self>),
    Set(Box<Self>),
    Dictionary(Box<Self>),
}

impl TypeExpr {
    /// Collection tag of the outermost node, if any.
    #[must_use]
    pub const fn collection(&self) -> Option<PropertyTypeName> {
        match self {
            Self::List(_) => Some(PropertyTypeName::List),
            Self::Set(_) => Some(PropertyTypeName::Set),
            Self::Dictionary(_) => Some(PropertyTypeName::Dictionary),
            Self::Scalar(_) | Self::Optional(_) => None,
        }
    }

    /// Innermost base type, and whether an optional marker was crossed on
    /// the way down.
    #[must_use]
    pub fn element(&self) -> (&BaseType, bool) {
        match self {
            Self::Scalar(base) => (base, false),
            Self::Optional(inner) => (inner.element().0, true),
            Self::List(inner) | Self::Set(inner) | Self::Dictionary(inner) => inner.element(),
        }
    }
}

/// Renders the expression back in shorthand notation.
impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(base) => f.write_str(base.name()),
            Self::Optional(inner) => write!(f, "{inner}?"),
            Self::List(inner) => write!(f, "{inner}[]"),
            Self::Set(inner) => write!(f, "{inner}<>"),
            Self::Dictionary(inner) => write!(f, "{inner}{{}}"),
        }
    }
}

///
/// CollectionSuffix
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CollectionSuffix {
    List,
    Set,
    Dictionary,
}

impl CollectionSuffix {
    pub const ALL: [Self; 3] = [Self::List, Self::Set, Self::Dictionary];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "[]",
            Self::Set => "<>",
            Self::Dictionary => "{}",
        }
    }

    pub(crate) const fn template_args(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::List => &[("suffix", "[]")],
            Self::Set => &[("suffix", "<>")],
            Self::Dictionary => &[("suffix", "{}")],
        }
    }

    /// Split a trailing collection suffix off `input`.
    #[must_use]
    pub fn split(input: &str) -> Option<(&str, Self)> {
        Self::ALL.into_iter().find_map(|suffix| {
            input
                .strip_suffix(suffix.as_str())
                .map(|body| (body, suffix))
        })
    }

    #[must_use]
    pub fn wrap(self, element: TypeExpr) -> TypeExpr {
        let element = Box::new(element);

        match self {
            Self::List => TypeExpr::List(element),
            Self::Set => TypeExpr::Set(element),
            Self::Dictionary => TypeExpr::Dictionary(element),
        }
    }
}
