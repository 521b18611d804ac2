//! Reduced-whitespace printer
//!
//! Produces the text a conventional GraphQL pretty printer would emit after
//! collapsing every whitespace run to one space and then dropping any space
//! that touches a non-name character. The printer writes that form
//! directly: a single space separates two tokens only when the last
//! character written and the next character are both name characters.
//!
//! Strings are always printed as JSON-escaped, non-block strings, so
//! whitespace inside string values survives untouched.

use super::ast::{
    Argument, Definition, Directive, Document, Field, FragmentDefinition, FragmentSpread,
    InlineFragment, OperationDefinition, OperationKind, Selection, SelectionSet, Type, Value,
    VariableDefinition,
};

/// Print a document in reduced-whitespace form
pub fn print_reduced(document: &Document) -> String {
    let mut printer = ReducedPrinter::default();
    for definition in &document.definitions {
        printer.definition(definition);
    }
    printer.finish()
}

fn is_name_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

#[derive(Default)]
struct ReducedPrinter {
    out: String,
}

impl ReducedPrinter {
    fn finish(self) -> String {
        self.out
    }

    fn emit(&mut self, text: &str) {
        let joins_names = matches!(
            (self.out.chars().last(), text.chars().next()),
            (Some(prev), Some(next)) if is_name_char(prev) && is_name_char(next)
        );
        if joins_names {
            self.out.push(' ');
        }
        self.out.push_str(text);
    }

    fn definition(&mut self, definition: &Definition) {
        match definition {
            Definition::Operation(op) => self.operation(op),
            Definition::Fragment(fragment) => self.fragment(fragment),
        }
    }

    fn operation(&mut self, op: &OperationDefinition) {
        let is_shorthand = op.kind == OperationKind::Query
            && op.name.is_none()
            && op.variable_definitions.is_empty()
            && op.directives.is_empty();

        if !is_shorthand {
            self.emit(op.kind.as_str());
            if let Some(name) = &op.name {
                self.emit(name);
            }
            self.variable_definitions(&op.variable_definitions);
            self.directives(&op.directives);
        }
        self.selection_set(&op.selection_set);
    }

    fn fragment(&mut self, fragment: &FragmentDefinition) {
        self.emit("fragment");
        self.emit(&fragment.name);
        self.emit("on");
        self.emit(&fragment.type_condition);
        self.directives(&fragment.directives);
        self.selection_set(&fragment.selection_set);
    }

    fn variable_definitions(&mut self, definitions: &[VariableDefinition]) {
        if definitions.is_empty() {
            return;
        }
        self.emit("(");
        for (i, definition) in definitions.iter().enumerate() {
            if i > 0 {
                self.emit(",");
            }
            self.emit("$");
            self.emit(&definition.variable);
            self.emit(":");
            self.type_ref(&definition.var_type);
            if let Some(default) = &definition.default_value {
                self.emit("=");
                self.value(default);
            }
            self.directives(&definition.directives);
        }
        self.emit(")");
    }

    fn type_ref(&mut self, ty: &Type) {
        match ty {
            Type::Named(name) => self.emit(name),
            Type::List(inner) => {
                self.emit("[");
                self.type_ref(inner);
                self.emit("]");
            }
            Type::NonNull(inner) => {
                self.type_ref(inner);
                self.emit("!");
            }
        }
    }

    fn selection_set(&mut self, selection_set: &SelectionSet) {
        self.emit("{");
        for selection in &selection_set.selections {
            match selection {
                Selection::Field(field) => self.field(field),
                Selection::FragmentSpread(spread) => self.fragment_spread(spread),
                Selection::InlineFragment(inline) => self.inline_fragment(inline),
            }
        }
        self.emit("}");
    }

    fn field(&mut self, field: &Field) {
        if let Some(alias) = &field.alias {
            self.emit(alias);
            self.emit(":");
        }
        self.emit(&field.name);
        self.arguments(&field.arguments);
        self.directives(&field.directives);
        if let Some(selection_set) = &field.selection_set {
            self.selection_set(selection_set);
        }
    }

    fn fragment_spread(&mut self, spread: &FragmentSpread) {
        self.emit("...");
        self.emit(&spread.name);
        self.directives(&spread.directives);
    }

    fn inline_fragment(&mut self, inline: &InlineFragment) {
        self.emit("...");
        if let Some(type_condition) = &inline.type_condition {
            self.emit("on");
            self.emit(type_condition);
        }
        self.directives(&inline.directives);
        self.selection_set(&inline.selection_set);
    }

    fn arguments(&mut self, arguments: &[Argument]) {
        if arguments.is_empty() {
            return;
        }
        self.emit("(");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.emit(",");
            }
            self.emit(&argument.name);
            self.emit(":");
            self.value(&argument.value);
        }
        self.emit(")");
    }

    fn directives(&mut self, directives: &[Directive]) {
        for directive in directives {
            self.emit("@");
            self.emit(&directive.name);
            self.arguments(&directive.arguments);
        }
    }

    fn value(&mut self, value: &Value) {
        match value {
            Value::Variable(name) => {
                self.emit("$");
                self.emit(name);
            }
            Value::Int(text) | Value::Float(text) | Value::Enum(text) => self.emit(text),
            Value::String { value, .. } => {
                let quoted = serde_json::Value::String(value.clone()).to_string();
                self.emit(&quoted);
            }
            Value::Boolean(true) => self.emit("true"),
            Value::Boolean(false) => self.emit("false"),
            Value::Null => self.emit("null"),
            Value::List(values) => {
                self.emit("[");
                for (i, item) in values.iter().enumerate() {
                    if i > 0 {
                        self.emit(",");
                    }
                    self.value(item);
                }
                self.emit("]");
            }
            Value::Object(fields) => {
                self.emit("{");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.emit(",");
                    }
                    self.emit(&field.name);
                    self.emit(":");
                    self.value(&field.value);
                }
                self.emit("}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::parse_document;

    fn reduce(source: &str) -> String {
        print_reduced(&parse_document(source).unwrap())
    }

    #[test]
    fn test_space_only_between_names() {
        assert_eq!(
            reduce("query GetUser {\n  user {\n    id\n    name\n  }\n}"),
            "query GetUser{user{id name}}"
        );
    }

    #[test]
    fn test_shorthand_query_prints_bare_selection_set() {
        assert_eq!(reduce("query { a }"), "{a}");
        assert_eq!(reduce("{ a }"), "{a}");
        assert_eq!(reduce("query ($x: Int) { a(x: $x) }"), "query($x:Int){a(x:$x)}");
    }

    #[test]
    fn test_arguments_variables_and_defaults() {
        assert_eq!(
            reduce("query Q($id: ID!, $tags: [String!] = [\"a\"] @deprecated) { node(id: $id, first: 10) { id } }"),
            "query Q($id:ID!,$tags:[String!]=[\"a\"]@deprecated){node(id:$id,first:10){id}}"
        );
    }

    #[test]
    fn test_fragments_and_inline_fragments() {
        assert_eq!(
            reduce("query Q { node { ...Parts ... on User { id } ... @include(if: true) { x } } } fragment Parts on Node { id }"),
            "query Q{node{...Parts...on User{id}...@include(if:true){x}}}fragment Parts on Node{id}"
        );
    }

    #[test]
    fn test_alias_and_directives() {
        assert_eq!(
            reduce("{ me: viewer @skip(if: false) { login } }"),
            "{me:viewer@skip(if:false){login}}"
        );
    }

    #[test]
    fn test_string_whitespace_is_preserved_and_escaped() {
        assert_eq!(
            reduce("{ search(text: \"two  spaces \\\"quoted\\\"\\n\") }"),
            "{search(text:\"two  spaces \\\"quoted\\\"\\n\")}"
        );
    }

    #[test]
    fn test_block_strings_print_as_plain_strings() {
        assert_eq!(
            reduce("{ f(s: \"\"\"\n  multi\n  line\n\"\"\") }"),
            "{f(s:\"multi\\nline\")}"
        );
    }

    #[test]
    fn test_objects_lists_enums_and_negative_numbers() {
        assert_eq!(
            reduce("{ f(o: {a: -1, b: [RED, GREEN], c: null, d: 1.5e3}) }"),
            "{f(o:{a:-1,b:[RED,GREEN],c:null,d:1.5e3})}"
        );
    }

    #[test]
    fn test_printing_is_idempotent_through_parse() {
        let source = "query Q($a: [Int]) { x(a: $a) @d { ... on T { y } } }";
        let once = reduce(source);
        let twice = reduce(&once);
        assert_eq!(once, twice);
    }
}
