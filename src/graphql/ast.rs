//! Executable GraphQL document AST
//!
//! Owned, typed representation of operations and fragments. Transforms
//! never mutate a tree in place; they build a new one (see `fold`).

use std::collections::HashMap;
use std::fmt;

/// A parsed executable document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    /// Create a document from definitions
    pub fn new(definitions: Vec<Definition>) -> Self {
        Self { definitions }
    }

    /// Operation definitions in source order
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Operation(op) => Some(op),
            Definition::Fragment(_) => None,
        })
    }

    /// Fragment definitions in source order
    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Fragment(fragment) => Some(fragment),
            Definition::Operation(_) => None,
        })
    }

    /// Fragment lookup by name. The first definition wins on duplicates.
    pub fn fragment_index(&self) -> HashMap<&str, &FragmentDefinition> {
        let mut index = HashMap::new();
        for fragment in self.fragments() {
            index.entry(fragment.name.as_str()).or_insert(fragment);
        }
        index
    }
}

/// Top-level definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
}

impl Definition {
    /// Definition name, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Definition::Operation(op) => op.name.as_deref(),
            Definition::Fragment(fragment) => Some(&fragment.name),
        }
    }
}

/// Operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// Keyword as written in source
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }

    /// Parse an operation keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "query" => Some(OperationKind::Query),
            "mutation" => Some(OperationKind::Mutation),
            "subscription" => Some(OperationKind::Subscription),
            _ => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDefinition {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: String,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

/// `$name: Type = default @directives`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    /// Variable name without the `$`
    pub variable: String,
    pub var_type: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

/// Input type reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Named(String),
    List(Box<Type>),
    NonNull(Box<Type>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
}

impl SelectionSet {
    pub fn new(selections: Vec<Selection>) -> Self {
        Self { selections }
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    /// Directives attached to this selection
    pub fn directives(&self) -> &[Directive] {
        match self {
            Selection::Field(field) => &field.directives,
            Selection::FragmentSpread(spread) => &spread.directives,
            Selection::InlineFragment(inline) => &inline.directives,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    /// `None` for leaf fields
    pub selection_set: Option<SelectionSet>,
}

impl Field {
    /// Leaf field with no alias, arguments or directives
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            name: name.into(),
            arguments: Vec::new(),
            directives: Vec::new(),
            selection_set: None,
        }
    }

    /// Name under which the field appears in the response
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSpread {
    pub name: String,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineFragment {
    pub type_condition: Option<String>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectField {
    pub name: String,
    pub value: Value,
}

/// Input value. Numbers keep their source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Variable name without the `$`
    Variable(String),
    Int(String),
    Float(String),
    String { value: String, block: bool },
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<Value>),
    Object(Vec<ObjectField>),
}

impl Value {
    /// Non-block string value
    pub fn string(value: impl Into<String>) -> Self {
        Value::String {
            value: value.into(),
            block: false,
        }
    }
}
