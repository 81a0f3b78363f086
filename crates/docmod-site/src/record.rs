//! Documentation records for individual declarations.
//!
//! Records carry rendered comment HTML and code text. Directive flags stay
//! attached for the passes that consume them and are never serialized.

use docmod_comment::Flags;
use serde::Serialize;

/// A constant declaration or constant group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Constant {
    /// Declared names in declaration order.
    pub names: Vec<String>,
    pub comment_html: String,
    pub code: String,
    #[serde(skip)]
    pub flags: Flags,
}

/// A variable declaration or group of variables declared together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Variable {
    /// Declared names in declaration order.
    pub names: Vec<String>,
    pub comment_html: String,
    pub code: String,
    #[serde(skip)]
    pub flags: Flags,
}

/// A function that is not a method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,
    pub comment_html: String,
    pub code: String,
    #[serde(skip)]
    pub flags: Flags,
}

/// A method in a type's method set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub comment_html: String,
    pub code: String,
    /// Receiver type name as declared (e.g. `*Buffer`).
    pub receiver: String,
    /// Embedded type the method is promoted from; `None` when declared directly.
    pub embedded_type: Option<String>,
    /// Number of embedding levels the method is promoted through.
    pub level: u32,
    #[serde(skip)]
    pub flags: Flags,
}

impl Method {
    /// Whether the method is promoted from an embedded type.
    #[must_use]
    pub fn is_promoted(&self) -> bool {
        self.level > 0
    }
}

/// A type declaration and the declarations grouped under it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Type {
    pub name: String,
    pub comment_html: String,
    pub code: String,
    #[serde(skip)]
    pub flags: Flags,
    pub constants: Vec<Constant>,
    pub variables: Vec<Variable>,
    /// Functions returning the type (constructors) and functions moved here.
    pub functions: Vec<Function>,
    pub methods: Vec<Method>,
}

/// A top-level record that a `type` directive can move into a [`Type`].
pub(crate) trait TypeMember: Sized {
    /// Record kind used in warnings.
    const KIND: &'static str;

    fn flags(&self) -> &Flags;

    /// Name identifying the record in warnings.
    fn first_name(&self) -> &str;

    /// The member list of `ty` holding records of this kind.
    fn members_of(ty: &mut Type) -> &mut Vec<Self>;
}

impl TypeMember for Constant {
    const KIND: &'static str = "constant";

    fn flags(&self) -> &Flags {
        &self.flags
    }

    fn first_name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }

    fn members_of(ty: &mut Type) -> &mut Vec<Self> {
        &mut ty.constants
    }
}

impl TypeMember for Variable {
    const KIND: &'static str = "variable";

    fn flags(&self) -> &Flags {
        &self.flags
    }

    fn first_name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }

    fn members_of(ty: &mut Type) -> &mut Vec<Self> {
        &mut ty.variables
    }
}

impl TypeMember for Function {
    const KIND: &'static str = "function";

    fn flags(&self) -> &Flags {
        &self.flags
    }

    fn first_name(&self) -> &str {
        &self.name
    }

    fn members_of(ty: &mut Type) -> &mut Vec<Self> {
        &mut ty.functions
    }
}
