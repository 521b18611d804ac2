//! Recursive-descent parser for executable GraphQL documents
//!
//! Accepts operations (including the `{ ... }` query shorthand) and
//! fragments. Type-system definitions are rejected: client documents are
//! registered as operations, never as schema.

use super::ast::{
    Argument, Definition, Directive, Document, Field, FragmentDefinition, FragmentSpread,
    InlineFragment, ObjectField, OperationDefinition, OperationKind, Selection, SelectionSet,
    Type, Value, VariableDefinition,
};
use super::errors::{GraphqlError, GraphqlResult};
use super::lexer::{tokenize, Position, Token, TokenKind};

const TYPE_SYSTEM_KEYWORDS: &[&str] = &[
    "schema",
    "scalar",
    "type",
    "interface",
    "union",
    "enum",
    "input",
    "directive",
    "extend",
];

/// Parse an executable document
pub fn parse_document(source: &str) -> GraphqlResult<Document> {
    let tokens = tokenize(source)?;
    Parser::new(tokens).parse_document()
}

struct Parser {
    tokens: Vec<Token>,
    index: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: 0 }
    }

    fn peek(&self) -> &Token {
        // tokenize() always ends with Eof, so the last token is a safe fallback
        self.tokens
            .get(self.index)
            .unwrap_or_else(|| &self.tokens[self.tokens.len() - 1])
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn position(&self) -> Position {
        self.peek().position
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.index += 1;
        }
        token
    }

    fn unexpected(&self) -> GraphqlError {
        GraphqlError::syntax(
            self.position(),
            format!("Unexpected {}", self.peek_kind().describe()),
        )
    }

    fn skip(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> GraphqlResult<()> {
        if self.skip(&kind) {
            Ok(())
        } else {
            Err(GraphqlError::syntax(
                self.position(),
                format!(
                    "Expected {}, found {}",
                    kind.describe(),
                    self.peek_kind().describe()
                ),
            ))
        }
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek_kind(), TokenKind::Name(name) if name == keyword)
    }

    fn expect_keyword(&mut self, keyword: &str) -> GraphqlResult<()> {
        if self.peek_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(GraphqlError::syntax(
                self.position(),
                format!(
                    "Expected \"{}\", found {}",
                    keyword,
                    self.peek_kind().describe()
                ),
            ))
        }
    }

    fn expect_name(&mut self) -> GraphqlResult<String> {
        match self.peek_kind() {
            TokenKind::Name(_) => match self.advance().kind {
                TokenKind::Name(name) => Ok(name),
                _ => Err(self.unexpected()),
            },
            other => Err(GraphqlError::syntax(
                self.position(),
                format!("Expected Name, found {}", other.describe()),
            )),
        }
    }

    fn parse_document(&mut self) -> GraphqlResult<Document> {
        let mut definitions = Vec::new();
        loop {
            definitions.push(self.parse_definition()?);
            if *self.peek_kind() == TokenKind::Eof {
                return Ok(Document::new(definitions));
            }
        }
    }

    fn parse_definition(&mut self) -> GraphqlResult<Definition> {
        let position = self.position();
        match self.peek_kind() {
            TokenKind::BraceL => Ok(Definition::Operation(self.parse_operation()?)),
            TokenKind::Name(name) if OperationKind::from_keyword(name).is_some() => {
                Ok(Definition::Operation(self.parse_operation()?))
            }
            TokenKind::Name(name) if name == "fragment" => {
                Ok(Definition::Fragment(self.parse_fragment()?))
            }
            TokenKind::Name(name) if TYPE_SYSTEM_KEYWORDS.contains(&name.as_str()) => {
                Err(GraphqlError::unsupported(position, name.clone()))
            }
            // A description can only precede a type-system definition
            TokenKind::String(_) | TokenKind::BlockString(_) => {
                Err(GraphqlError::unsupported(position, "description"))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_operation(&mut self) -> GraphqlResult<OperationDefinition> {
        if *self.peek_kind() == TokenKind::BraceL {
            return Ok(OperationDefinition {
                kind: OperationKind::Query,
                name: None,
                variable_definitions: Vec::new(),
                directives: Vec::new(),
                selection_set: self.parse_selection_set()?,
            });
        }

        let keyword = self.expect_name()?;
        let kind = OperationKind::from_keyword(&keyword).ok_or_else(|| {
            GraphqlError::syntax(self.position(), format!("Unknown operation type \"{}\"", keyword))
        })?;

        let name = match self.peek_kind() {
            TokenKind::Name(_) => Some(self.expect_name()?),
            _ => None,
        };

        Ok(OperationDefinition {
            kind,
            name,
            variable_definitions: self.parse_variable_definitions()?,
            directives: self.parse_directives(false)?,
            selection_set: self.parse_selection_set()?,
        })
    }

    fn parse_variable_definitions(&mut self) -> GraphqlResult<Vec<VariableDefinition>> {
        let mut definitions = Vec::new();
        if !self.skip(&TokenKind::ParenL) {
            return Ok(definitions);
        }
        loop {
            self.expect(TokenKind::Dollar)?;
            let variable = self.expect_name()?;
            self.expect(TokenKind::Colon)?;
            let var_type = self.parse_type()?;
            let default_value = if self.skip(&TokenKind::Equals) {
                Some(self.parse_value(true)?)
            } else {
                None
            };
            definitions.push(VariableDefinition {
                variable,
                var_type,
                default_value,
                directives: self.parse_directives(true)?,
            });
            if self.skip(&TokenKind::ParenR) {
                return Ok(definitions);
            }
        }
    }

    fn parse_type(&mut self) -> GraphqlResult<Type> {
        let inner = if self.skip(&TokenKind::BracketL) {
            let item = self.parse_type()?;
            self.expect(TokenKind::BracketR)?;
            Type::List(Box::new(item))
        } else {
            Type::Named(self.expect_name()?)
        };

        if self.skip(&TokenKind::Bang) {
            Ok(Type::NonNull(Box::new(inner)))
        } else {
            Ok(inner)
        }
    }

    fn parse_selection_set(&mut self) -> GraphqlResult<SelectionSet> {
        self.expect(TokenKind::BraceL)?;
        let mut selections = Vec::new();
        loop {
            selections.push(self.parse_selection()?);
            if self.skip(&TokenKind::BraceR) {
                return Ok(SelectionSet::new(selections));
            }
        }
    }

    fn parse_selection(&mut self) -> GraphqlResult<Selection> {
        if !self.skip(&TokenKind::Spread) {
            return Ok(Selection::Field(self.parse_field()?));
        }

        match self.peek_kind() {
            TokenKind::Name(name) if name != "on" => {
                let name = self.expect_name()?;
                Ok(Selection::FragmentSpread(FragmentSpread {
                    name,
                    directives: self.parse_directives(false)?,
                }))
            }
            _ => {
                let type_condition = if self.peek_keyword("on") {
                    self.advance();
                    Some(self.expect_name()?)
                } else {
                    None
                };
                Ok(Selection::InlineFragment(InlineFragment {
                    type_condition,
                    directives: self.parse_directives(false)?,
                    selection_set: self.parse_selection_set()?,
                }))
            }
        }
    }

    fn parse_field(&mut self) -> GraphqlResult<Field> {
        let first = self.expect_name()?;
        let (alias, name) = if self.skip(&TokenKind::Colon) {
            (Some(first), self.expect_name()?)
        } else {
            (None, first)
        };

        let arguments = self.parse_arguments(false)?;
        let directives = self.parse_directives(false)?;
        let selection_set = if *self.peek_kind() == TokenKind::BraceL {
            Some(self.parse_selection_set()?)
        } else {
            None
        };

        Ok(Field {
            alias,
            name,
            arguments,
            directives,
            selection_set,
        })
    }

    fn parse_arguments(&mut self, is_const: bool) -> GraphqlResult<Vec<Argument>> {
        let mut arguments = Vec::new();
        if !self.skip(&TokenKind::ParenL) {
            return Ok(arguments);
        }
        loop {
            let name = self.expect_name()?;
            self.expect(TokenKind::Colon)?;
            arguments.push(Argument {
                name,
                value: self.parse_value(is_const)?,
            });
            if self.skip(&TokenKind::ParenR) {
                return Ok(arguments);
            }
        }
    }

    fn parse_directives(&mut self, is_const: bool) -> GraphqlResult<Vec<Directive>> {
        let mut directives = Vec::new();
        while self.skip(&TokenKind::At) {
            let name = self.expect_name()?;
            directives.push(Directive {
                name,
                arguments: self.parse_arguments(is_const)?,
            });
        }
        Ok(directives)
    }

    fn parse_value(&mut self, is_const: bool) -> GraphqlResult<Value> {
        let position = self.position();
        match self.peek_kind() {
            TokenKind::BracketL => {
                self.advance();
                let mut values = Vec::new();
                while !self.skip(&TokenKind::BracketR) {
                    if *self.peek_kind() == TokenKind::Eof {
                        return Err(self.unexpected());
                    }
                    values.push(self.parse_value(is_const)?);
                }
                Ok(Value::List(values))
            }
            TokenKind::BraceL => {
                self.advance();
                let mut fields = Vec::new();
                while !self.skip(&TokenKind::BraceR) {
                    let name = self.expect_name()?;
                    self.expect(TokenKind::Colon)?;
                    fields.push(ObjectField {
                        name,
                        value: self.parse_value(is_const)?,
                    });
                }
                Ok(Value::Object(fields))
            }
            TokenKind::Dollar if !is_const => {
                self.advance();
                Ok(Value::Variable(self.expect_name()?))
            }
            TokenKind::Dollar => Err(GraphqlError::syntax(
                position,
                "Unexpected variable in constant value",
            )),
            _ => match self.advance().kind {
                TokenKind::Int(text) => Ok(Value::Int(text)),
                TokenKind::Float(text) => Ok(Value::Float(text)),
                TokenKind::String(value) => Ok(Value::String {
                    value,
                    block: false,
                }),
                TokenKind::BlockString(value) => Ok(Value::String { value, block: true }),
                TokenKind::Name(name) => Ok(match name.as_str() {
                    "true" => Value::Boolean(true),
                    "false" => Value::Boolean(false),
                    "null" => Value::Null,
                    _ => Value::Enum(name),
                }),
                other => Err(GraphqlError::syntax(
                    position,
                    format!("Unexpected {}", other.describe()),
                )),
            },
        }
    }

    fn parse_fragment(&mut self) -> GraphqlResult<FragmentDefinition> {
        self.expect_keyword("fragment")?;
        if self.peek_keyword("on") {
            return Err(self.unexpected());
        }
        let name = self.expect_name()?;
        self.expect_keyword("on")?;
        let type_condition = self.expect_name()?;

        Ok(FragmentDefinition {
            name,
            type_condition,
            directives: self.parse_directives(false)?,
            selection_set: self.parse_selection_set()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_operation(source: &str) -> OperationDefinition {
        let doc = parse_document(source).unwrap();
        let op = doc.operations().next().cloned().unwrap();
        op
    }

    #[test]
    fn test_parse_named_query_with_variables() {
        let op = single_operation("query GetUser($id: ID!, $first: Int = 10) { user(id: $id) { id } }");
        assert_eq!(op.kind, OperationKind::Query);
        assert_eq!(op.name.as_deref(), Some("GetUser"));
        assert_eq!(op.variable_definitions.len(), 2);
        assert_eq!(
            op.variable_definitions[0].var_type,
            Type::NonNull(Box::new(Type::Named("ID".into())))
        );
        assert_eq!(
            op.variable_definitions[1].default_value,
            Some(Value::Int("10".into()))
        );

        let Selection::Field(user) = &op.selection_set.selections[0] else {
            panic!("expected field");
        };
        assert_eq!(user.name, "user");
        assert_eq!(user.arguments[0].value, Value::Variable("id".into()));
        assert!(user.selection_set.is_some());
    }

    #[test]
    fn test_parse_shorthand_query() {
        let op = single_operation("{ viewer { login } }");
        assert_eq!(op.kind, OperationKind::Query);
        assert!(op.name.is_none());
    }

    #[test]
    fn test_parse_mutation_and_subscription() {
        assert_eq!(
            single_operation("mutation M { like(id: 1) }").kind,
            OperationKind::Mutation
        );
        assert_eq!(
            single_operation("subscription S { onEvent { id } }").kind,
            OperationKind::Subscription
        );
    }

    #[test]
    fn test_parse_alias_directives_and_fragments() {
        let doc = parse_document(
            r#"
            query Q($skip: Boolean!) {
              me: viewer @skip(if: $skip) {
                ...UserParts
                ... on Admin { level }
                ... @include(if: true) { extra }
              }
            }
            fragment UserParts on User @cached { id name }
            "#,
        )
        .unwrap();

        assert_eq!(doc.definitions.len(), 2);
        let op = doc.operations().next().unwrap();
        let Selection::Field(field) = &op.selection_set.selections[0] else {
            panic!("expected field");
        };
        assert_eq!(field.alias.as_deref(), Some("me"));
        assert_eq!(field.response_key(), "me");
        assert_eq!(field.directives[0].name, "skip");

        let inner = &field.selection_set.as_ref().unwrap().selections;
        assert!(matches!(&inner[0], Selection::FragmentSpread(s) if s.name == "UserParts"));
        assert!(matches!(&inner[1], Selection::InlineFragment(i) if i.type_condition.as_deref() == Some("Admin")));
        assert!(matches!(&inner[2], Selection::InlineFragment(i) if i.type_condition.is_none() && i.directives.len() == 1));

        let fragment = doc.fragments().next().unwrap();
        assert_eq!(fragment.name, "UserParts");
        assert_eq!(fragment.type_condition, "User");
        assert_eq!(fragment.directives[0].name, "cached");
    }

    #[test]
    fn test_parse_values() {
        let op = single_operation(
            r#"{ f(a: [1, 2.5, "s", """block""", true, null, RED], b: {x: 1, y: {z: $v}}) }"#,
        );
        let Selection::Field(field) = &op.selection_set.selections[0] else {
            panic!("expected field");
        };
        assert_eq!(
            field.arguments[0].value,
            Value::List(vec![
                Value::Int("1".into()),
                Value::Float("2.5".into()),
                Value::string("s"),
                Value::String {
                    value: "block".into(),
                    block: true
                },
                Value::Boolean(true),
                Value::Null,
                Value::Enum("RED".into()),
            ])
        );
        assert!(matches!(&field.arguments[1].value, Value::Object(fields) if fields.len() == 2));
    }

    #[test]
    fn test_variable_in_default_value_is_rejected() {
        let err = parse_document("query Q($a: Int = $b) { f }").unwrap_err();
        assert!(err.to_string().contains("variable"));
    }

    #[test]
    fn test_empty_selection_set_is_rejected() {
        assert!(parse_document("query Q { }").is_err());
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let err = parse_document("  # only a comment\n").unwrap_err();
        assert!(err.to_string().contains("<EOF>"));
    }

    #[test]
    fn test_type_system_definition_is_rejected() {
        let err = parse_document("type User { id: ID }").unwrap_err();
        assert!(matches!(
            err,
            GraphqlError::UnsupportedDefinition { ref keyword, line: 1, column: 1 } if keyword == "type"
        ));
    }

    #[test]
    fn test_fragment_named_on_is_rejected() {
        assert!(parse_document("fragment on on User { id }").is_err());
    }

    #[test]
    fn test_error_position_points_at_token() {
        let err = parse_document("query Q {\n  user(id: ) { id }\n}").unwrap_err();
        assert_eq!(err.position(), Some(Position { line: 2, column: 12 }));
    }
}
