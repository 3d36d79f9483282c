//! The closed symbol kind enumeration.
//!
//! Kinds round-trip to and from the index provider's string form through an
//! explicit mapping table. Classification predicates (`is_function`,
//! `is_variable`, ...) are explicit match tables as well: the string
//! spellings happen to share prefixes, but that is a provider artifact and
//! not something resolution may rely on.

use std::fmt;

/// The kind of a declaration or reference.
///
/// Declaration kinds and reference kinds share one string space; a resolved
/// reference carries the same kind as its target declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Kind {
    // Type kinds
    Class,
    Struct,
    Enum,
    EnumElement,
    Protocol,
    Typealias,
    AssociatedType,
    GenericTypeParam,
    Module,
    PrecedenceGroup,
    // Extension kinds
    Extension,
    ExtensionClass,
    ExtensionStruct,
    ExtensionEnum,
    ExtensionProtocol,
    // Function kinds
    FunctionFree,
    FunctionMethodInstance,
    FunctionMethodClass,
    FunctionMethodStatic,
    FunctionConstructor,
    FunctionDestructor,
    FunctionSubscript,
    FunctionOperator,
    FunctionOperatorInfix,
    FunctionOperatorPrefix,
    FunctionOperatorPostfix,
    FunctionAccessorGetter,
    FunctionAccessorSetter,
    FunctionAccessorWillSet,
    FunctionAccessorDidSet,
    FunctionAccessorAddress,
    FunctionAccessorMutableAddress,
    // Variable kinds
    VarInstance,
    VarClass,
    VarStatic,
    VarGlobal,
    VarLocal,
    VarParameter,
}

impl Kind {
    /// Parse the provider's string spelling. Returns `None` for anything
    /// outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        let kind = match s {
            "class" => Self::Class,
            "struct" => Self::Struct,
            "enum" => Self::Enum,
            "enumelement" => Self::EnumElement,
            "protocol" => Self::Protocol,
            "typealias" => Self::Typealias,
            "associatedtype" => Self::AssociatedType,
            "genericTypeParam" => Self::GenericTypeParam,
            "module" => Self::Module,
            "precedenceGroup" => Self::PrecedenceGroup,
            "extension" => Self::Extension,
            "extension.class" => Self::ExtensionClass,
            "extension.struct" => Self::ExtensionStruct,
            "extension.enum" => Self::ExtensionEnum,
            "extension.protocol" => Self::ExtensionProtocol,
            "function.free" => Self::FunctionFree,
            "function.method.instance" => Self::FunctionMethodInstance,
            "function.method.class" => Self::FunctionMethodClass,
            "function.method.static" => Self::FunctionMethodStatic,
            "function.constructor" => Self::FunctionConstructor,
            "function.destructor" => Self::FunctionDestructor,
            "function.subscript" => Self::FunctionSubscript,
            "function.operator" => Self::FunctionOperator,
            "function.operator.infix" => Self::FunctionOperatorInfix,
            "function.operator.prefix" => Self::FunctionOperatorPrefix,
            "function.operator.postfix" => Self::FunctionOperatorPostfix,
            "function.accessor.getter" => Self::FunctionAccessorGetter,
            "function.accessor.setter" => Self::FunctionAccessorSetter,
            "function.accessor.willset" => Self::FunctionAccessorWillSet,
            "function.accessor.didset" => Self::FunctionAccessorDidSet,
            "function.accessor.address" => Self::FunctionAccessorAddress,
            "function.accessor.mutableaddress" => Self::FunctionAccessorMutableAddress,
            "var.instance" => Self::VarInstance,
            "var.class" => Self::VarClass,
            "var.static" => Self::VarStatic,
            "var.global" => Self::VarGlobal,
            "var.local" => Self::VarLocal,
            "var.parameter" => Self::VarParameter,
            _ => return None,
        };
        Some(kind)
    }

    /// The provider's string spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::EnumElement => "enumelement",
            Self::Protocol => "protocol",
            Self::Typealias => "typealias",
            Self::AssociatedType => "associatedtype",
            Self::GenericTypeParam => "genericTypeParam",
            Self::Module => "module",
            Self::PrecedenceGroup => "precedenceGroup",
            Self::Extension => "extension",
            Self::ExtensionClass => "extension.class",
            Self::ExtensionStruct => "extension.struct",
            Self::ExtensionEnum => "extension.enum",
            Self::ExtensionProtocol => "extension.protocol",
            Self::FunctionFree => "function.free",
            Self::FunctionMethodInstance => "function.method.instance",
            Self::FunctionMethodClass => "function.method.class",
            Self::FunctionMethodStatic => "function.method.static",
            Self::FunctionConstructor => "function.constructor",
            Self::FunctionDestructor => "function.destructor",
            Self::FunctionSubscript => "function.subscript",
            Self::FunctionOperator => "function.operator",
            Self::FunctionOperatorInfix => "function.operator.infix",
            Self::FunctionOperatorPrefix => "function.operator.prefix",
            Self::FunctionOperatorPostfix => "function.operator.postfix",
            Self::FunctionAccessorGetter => "function.accessor.getter",
            Self::FunctionAccessorSetter => "function.accessor.setter",
            Self::FunctionAccessorWillSet => "function.accessor.willset",
            Self::FunctionAccessorDidSet => "function.accessor.didset",
            Self::FunctionAccessorAddress => "function.accessor.address",
            Self::FunctionAccessorMutableAddress => "function.accessor.mutableaddress",
            Self::VarInstance => "var.instance",
            Self::VarClass => "var.class",
            Self::VarStatic => "var.static",
            Self::VarGlobal => "var.global",
            Self::VarLocal => "var.local",
            Self::VarParameter => "var.parameter",
        }
    }

    /// Whether this is a function kind (methods, constructors, accessors,
    /// operators, subscripts, free functions).
    pub fn is_function(&self) -> bool {
        matches!(
            self,
            Self::FunctionFree
                | Self::FunctionMethodInstance
                | Self::FunctionMethodClass
                | Self::FunctionMethodStatic
                | Self::FunctionConstructor
                | Self::FunctionDestructor
                | Self::FunctionSubscript
                | Self::FunctionOperator
                | Self::FunctionOperatorInfix
                | Self::FunctionOperatorPrefix
                | Self::FunctionOperatorPostfix
                | Self::FunctionAccessorGetter
                | Self::FunctionAccessorSetter
                | Self::FunctionAccessorWillSet
                | Self::FunctionAccessorDidSet
                | Self::FunctionAccessorAddress
                | Self::FunctionAccessorMutableAddress
        )
    }

    /// Whether this is a variable kind.
    pub fn is_variable(&self) -> bool {
        matches!(
            self,
            Self::VarInstance
                | Self::VarClass
                | Self::VarStatic
                | Self::VarGlobal
                | Self::VarLocal
                | Self::VarParameter
        )
    }

    /// Whether this is an extension kind.
    pub fn is_extension(&self) -> bool {
        matches!(
            self,
            Self::Extension
                | Self::ExtensionClass
                | Self::ExtensionStruct
                | Self::ExtensionEnum
                | Self::ExtensionProtocol
        )
    }

    /// Whether this is a property accessor kind.
    pub fn is_accessor(&self) -> bool {
        matches!(
            self,
            Self::FunctionAccessorGetter
                | Self::FunctionAccessorSetter
                | Self::FunctionAccessorWillSet
                | Self::FunctionAccessorDidSet
                | Self::FunctionAccessorAddress
                | Self::FunctionAccessorMutableAddress
        )
    }

    /// Whether this kind belongs to the type group of the partition.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Struct
                | Self::Enum
                | Self::EnumElement
                | Self::Protocol
                | Self::Typealias
                | Self::AssociatedType
                | Self::GenericTypeParam
                | Self::Module
                | Self::PrecedenceGroup
        )
    }

    /// Whether this is an operator function kind.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Self::FunctionOperator
                | Self::FunctionOperatorInfix
                | Self::FunctionOperatorPrefix
                | Self::FunctionOperatorPostfix
        )
    }

    /// Whether a declaration of this kind can own stored properties,
    /// methods, and nested types.
    pub fn is_member_container(&self) -> bool {
        matches!(self, Self::Class | Self::Struct | Self::Enum | Self::Protocol)
            || self.is_extension()
    }

    /// The type kind an extension kind extends, or `None` for
    /// non-extension kinds. The plain `extension` spelling carries no
    /// extended kind and also maps to `None`.
    pub fn extended_type_kind(&self) -> Option<Kind> {
        match self {
            Self::ExtensionClass => Some(Self::Class),
            Self::ExtensionStruct => Some(Self::Struct),
            Self::ExtensionEnum => Some(Self::Enum),
            Self::ExtensionProtocol => Some(Self::Protocol),
            _ => None,
        }
    }

    /// A short label for display in reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::EnumElement => "enum case",
            Self::Protocol => "protocol",
            Self::Typealias => "typealias",
            Self::AssociatedType => "associated type",
            Self::GenericTypeParam => "generic type parameter",
            Self::Module => "module",
            Self::PrecedenceGroup => "precedence group",
            Self::Extension
            | Self::ExtensionClass
            | Self::ExtensionStruct
            | Self::ExtensionEnum
            | Self::ExtensionProtocol => "extension",
            Self::FunctionFree => "function",
            Self::FunctionMethodInstance => "instance method",
            Self::FunctionMethodClass => "class method",
            Self::FunctionMethodStatic => "static method",
            Self::FunctionConstructor => "initializer",
            Self::FunctionDestructor => "deinitializer",
            Self::FunctionSubscript => "subscript",
            Self::FunctionOperator
            | Self::FunctionOperatorInfix
            | Self::FunctionOperatorPrefix
            | Self::FunctionOperatorPostfix => "operator",
            Self::FunctionAccessorGetter
            | Self::FunctionAccessorSetter
            | Self::FunctionAccessorWillSet
            | Self::FunctionAccessorDidSet
            | Self::FunctionAccessorAddress
            | Self::FunctionAccessorMutableAddress => "accessor",
            Self::VarInstance => "property",
            Self::VarClass => "class property",
            Self::VarStatic => "static property",
            Self::VarGlobal => "global variable",
            Self::VarLocal => "local variable",
            Self::VarParameter => "parameter",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
