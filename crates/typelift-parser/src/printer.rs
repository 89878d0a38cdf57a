//! JavaScript source emission
//!
//! Renders expression and statement AST back to JavaScript text. Type
//! annotations and casts are erased on the way out. Parentheses are
//! inserted from operator precedence rather than preserved from source,
//! so synthesized trees print correctly without carrying any formatting
//! state of their own.

use crate::ast::*;
use crate::interner::Interner;

// =========================================================================
// Precedence levels (higher binds tighter)
// =========================================================================

const PREC_ASSIGNMENT: u8 = 2;
const PREC_CONDITIONAL: u8 = 3;
const PREC_NULLISH: u8 = 4;
const PREC_LOGICAL_OR: u8 = 5;
const PREC_LOGICAL_AND: u8 = 6;
const PREC_BITWISE_OR: u8 = 7;
const PREC_BITWISE_AND: u8 = 8;
const PREC_EQUALITY: u8 = 9;
const PREC_RELATIONAL: u8 = 10;
const PREC_ADDITIVE: u8 = 11;
const PREC_MULTIPLICATIVE: u8 = 12;
const PREC_UNARY: u8 = 14;
const PREC_POSTFIX: u8 = 16;
const PREC_PRIMARY: u8 = 18;

fn binary_precedence(op: BinaryOperator) -> u8 {
    use BinaryOperator::*;
    match op {
        Add | Subtract => PREC_ADDITIVE,
        Multiply | Divide | Modulo => PREC_MULTIPLICATIVE,
        Equal | NotEqual | StrictEqual | StrictNotEqual => PREC_EQUALITY,
        LessThan | LessEqual | GreaterThan | GreaterEqual => PREC_RELATIONAL,
        BitwiseAnd => PREC_BITWISE_AND,
        BitwiseOr => PREC_BITWISE_OR,
    }
}

fn logical_precedence(op: LogicalOperator) -> u8 {
    match op {
        LogicalOperator::And => PREC_LOGICAL_AND,
        LogicalOperator::Or => PREC_LOGICAL_OR,
        LogicalOperator::NullishCoalescing => PREC_NULLISH,
    }
}

/// The precedence an expression produces, for deciding parentheses
/// around children.
fn expr_precedence(expr: &Expression) -> u8 {
    match expr {
        Expression::IntLiteral(_)
        | Expression::FloatLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::TemplateLiteral(_)
        | Expression::BooleanLiteral(_)
        | Expression::NullLiteral(_)
        | Expression::Identifier(_)
        | Expression::Array(_)
        | Expression::Object(_)
        | Expression::Parenthesized(_)
        | Expression::This(_)
        | Expression::Super(_) => PREC_PRIMARY,

        Expression::Member(_)
        | Expression::Index(_)
        | Expression::Call(_)
        | Expression::New(_) => PREC_POSTFIX,

        Expression::Unary(_) | Expression::Typeof(_) | Expression::Await(_) => PREC_UNARY,

        Expression::Binary(e) => binary_precedence(e.operator),
        Expression::Logical(e) => logical_precedence(e.operator),
        Expression::Conditional(_) => PREC_CONDITIONAL,
        Expression::Assignment(_) | Expression::Arrow(_) => PREC_ASSIGNMENT,

        // Casts are erased, so they are as tight as what they wrap
        Expression::TypeCast(e) => expr_precedence(&e.expression),
    }
}

fn binary_operator_text(op: BinaryOperator) -> &'static str {
    use BinaryOperator::*;
    match op {
        Add => "+",
        Subtract => "-",
        Multiply => "*",
        Divide => "/",
        Modulo => "%",
        Equal => "==",
        NotEqual => "!=",
        StrictEqual => "===",
        StrictNotEqual => "!==",
        LessThan => "<",
        LessEqual => "<=",
        GreaterThan => ">",
        GreaterEqual => ">=",
        BitwiseAnd => "&",
        BitwiseOr => "|",
    }
}

fn logical_operator_text(op: LogicalOperator) -> &'static str {
    match op {
        LogicalOperator::And => "&&",
        LogicalOperator::Or => "||",
        LogicalOperator::NullishCoalescing => "??",
    }
}

fn assignment_operator_text(op: AssignmentOperator) -> &'static str {
    use AssignmentOperator::*;
    match op {
        Assign => "=",
        AddAssign => "+=",
        SubAssign => "-=",
        MulAssign => "*=",
        DivAssign => "/=",
    }
}

fn unary_operator_text(op: UnaryOperator) -> &'static str {
    match op {
        UnaryOperator::Plus => "+",
        UnaryOperator::Minus => "-",
        UnaryOperator::Not => "!",
    }
}

// =========================================================================
// Printer
// =========================================================================

/// Renders AST nodes to JavaScript source text.
pub struct Printer<'a> {
    interner: &'a Interner,
    out: String,
    indent: usize,
    at_line_start: bool,
}

/// Print a single expression to JavaScript source.
pub fn print_expression(expr: &Expression, interner: &Interner) -> String {
    let mut printer = Printer::new(interner);
    printer.emit_expression(expr);
    printer.finish()
}

/// Print a single statement to JavaScript source.
pub fn print_statement(stmt: &Statement, interner: &Interner) -> String {
    let mut printer = Printer::new(interner);
    printer.emit_statement(stmt);
    printer.finish()
}

/// Print a whole module to JavaScript source.
pub fn print_module(module: &Module, interner: &Interner) -> String {
    let mut printer = Printer::new(interner);
    for stmt in &module.statements {
        printer.emit_statement(stmt);
        printer.write_line();
    }
    printer.finish()
}

impl<'a> Printer<'a> {
    pub fn new(interner: &'a Interner) -> Self {
        Printer {
            interner,
            out: String::new(),
            indent: 0,
            at_line_start: true,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    // ---------------------------------------------------------------------
    // Output primitives
    // ---------------------------------------------------------------------

    fn write(&mut self, text: &str) {
        if self.at_line_start && !text.is_empty() {
            for _ in 0..self.indent {
                self.out.push_str("  ");
            }
            self.at_line_start = false;
        }
        self.out.push_str(text);
    }

    fn write_line(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    fn increase_indent(&mut self) {
        self.indent += 1;
    }

    fn decrease_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    fn resolve(&self, sym: crate::interner::Symbol) -> &str {
        self.interner.resolve(sym)
    }

    // ---------------------------------------------------------------------
    // Expressions
    // ---------------------------------------------------------------------

    /// Emit an expression at the loosest context.
    pub fn emit_expression(&mut self, expr: &Expression) {
        self.emit_expr_prec(expr, PREC_ASSIGNMENT);
    }

    /// Emit an expression, parenthesizing when it binds looser than the
    /// context requires.
    fn emit_expr_prec(&mut self, expr: &Expression, min: u8) {
        if expr_precedence(expr) < min {
            self.write("(");
            self.emit_expr_inner(expr);
            self.write(")");
        } else {
            self.emit_expr_inner(expr);
        }
    }

    fn emit_expr_inner(&mut self, expr: &Expression) {
        match expr {
            Expression::IntLiteral(lit) => {
                self.write(&lit.value.to_string());
            }

            Expression::FloatLiteral(lit) => {
                self.write(&lit.value.to_string());
            }

            Expression::BigIntLiteral(lit) => {
                let digits = self.resolve(lit.digits).to_string();
                self.write(&digits);
                self.write("n");
            }

            Expression::StringLiteral(lit) => {
                self.emit_string_literal(lit.value);
            }

            Expression::TemplateLiteral(lit) => {
                let escaped = self
                    .resolve(lit.value)
                    .replace('\\', "\\\\")
                    .replace('`', "\\`")
                    .replace("${", "\\${");
                self.write("`");
                self.write(&escaped);
                self.write("`");
            }

            Expression::BooleanLiteral(lit) => {
                self.write(if lit.value { "true" } else { "false" });
            }

            Expression::NullLiteral(_) => {
                self.write("null");
            }

            Expression::Identifier(ident) => {
                let name = self.resolve(ident.name).to_string();
                self.write(&name);
            }

            Expression::Array(array) => {
                self.write("[");
                for (i, element) in array.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expr_prec(element, PREC_ASSIGNMENT);
                }
                self.write("]");
            }

            Expression::Object(object) => {
                self.emit_object_literal(object);
            }

            Expression::Unary(unary) => {
                self.write(unary_operator_text(unary.operator));
                // `- -x` must not fuse into a decrement token
                if needs_space_after_unary(unary.operator, &unary.operand) {
                    self.write(" ");
                }
                self.emit_expr_prec(&unary.operand, PREC_UNARY);
            }

            Expression::Binary(binary) => {
                let prec = binary_precedence(binary.operator);
                self.emit_expr_prec(&binary.left, prec);
                self.write(" ");
                self.write(binary_operator_text(binary.operator));
                self.write(" ");
                self.emit_expr_prec(&binary.right, prec + 1);
            }

            Expression::Logical(logical) => {
                let prec = logical_precedence(logical.operator);
                self.emit_logical_operand(&logical.left, logical.operator, prec);
                self.write(" ");
                self.write(logical_operator_text(logical.operator));
                self.write(" ");
                self.emit_logical_operand(&logical.right, logical.operator, prec + 1);
            }

            Expression::Assignment(assign) => {
                self.emit_expr_prec(&assign.left, PREC_POSTFIX);
                self.write(" ");
                self.write(assignment_operator_text(assign.operator));
                self.write(" ");
                self.emit_expr_prec(&assign.right, PREC_ASSIGNMENT);
            }

            Expression::Conditional(cond) => {
                self.emit_expr_prec(&cond.test, PREC_NULLISH);
                self.write(" ? ");
                self.emit_expr_prec(&cond.consequent, PREC_ASSIGNMENT);
                self.write(" : ");
                self.emit_expr_prec(&cond.alternate, PREC_ASSIGNMENT);
            }

            Expression::Call(call) => {
                self.emit_expr_prec(&call.callee, PREC_POSTFIX);
                self.write("(");
                self.emit_arguments(&call.arguments);
                self.write(")");
            }

            Expression::Member(member) => {
                // Integer receivers need parens so `.` is not read as a
                // decimal point
                if matches!(*member.object, Expression::IntLiteral(_)) {
                    self.write("(");
                    self.emit_expr_inner(&member.object);
                    self.write(")");
                } else {
                    self.emit_expr_prec(&member.object, PREC_POSTFIX);
                }
                self.write(if member.optional { "?." } else { "." });
                let name = self.resolve(member.property.name).to_string();
                self.write(&name);
            }

            Expression::Index(index) => {
                self.emit_expr_prec(&index.object, PREC_POSTFIX);
                self.write("[");
                self.emit_expr_prec(&index.index, PREC_ASSIGNMENT);
                self.write("]");
            }

            Expression::New(new) => {
                self.write("new ");
                if callee_contains_call(&new.callee) {
                    self.write("(");
                    self.emit_expr_inner(&new.callee);
                    self.write(")");
                } else {
                    self.emit_expr_prec(&new.callee, PREC_POSTFIX);
                }
                self.write("(");
                self.emit_arguments(&new.arguments);
                self.write(")");
            }

            Expression::Arrow(arrow) => {
                self.emit_arrow_function(arrow);
            }

            Expression::Await(await_expr) => {
                self.write("await ");
                self.emit_expr_prec(&await_expr.argument, PREC_UNARY);
            }

            Expression::Typeof(typeof_expr) => {
                self.write("typeof ");
                self.emit_expr_prec(&typeof_expr.argument, PREC_UNARY);
            }

            // Type casts are erased in output
            Expression::TypeCast(cast) => {
                self.emit_expr_inner(&cast.expression);
            }

            Expression::Parenthesized(paren) => {
                self.write("(");
                self.emit_expr_prec(&paren.expression, PREC_ASSIGNMENT);
                self.write(")");
            }

            Expression::This(_) => {
                self.write("this");
            }

            Expression::Super(_) => {
                self.write("super");
            }
        }
    }

    /// Emit one side of a logical expression. `??` refuses to mix with
    /// `&&`/`||` without parentheses, beyond what precedence implies.
    fn emit_logical_operand(&mut self, operand: &Expression, parent: LogicalOperator, min: u8) {
        let mixing = match operand {
            Expression::Logical(child) => {
                let parent_nullish = parent == LogicalOperator::NullishCoalescing;
                let child_nullish = child.operator == LogicalOperator::NullishCoalescing;
                parent_nullish != child_nullish
            }
            _ => false,
        };

        if mixing {
            self.write("(");
            self.emit_expr_inner(operand);
            self.write(")");
        } else {
            self.emit_expr_prec(operand, min);
        }
    }

    fn emit_arguments(&mut self, arguments: &[Expression]) {
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expr_prec(argument, PREC_ASSIGNMENT);
        }
    }

    fn emit_string_literal(&mut self, value: crate::interner::Symbol) {
        let mut escaped = String::from("\"");
        for c in self.resolve(value).chars() {
            match c {
                '"' => escaped.push_str("\\\""),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                '\0' => escaped.push_str("\\0"),
                c if (c as u32) < 0x20 => {
                    escaped.push_str(&format!("\\x{:02x}", c as u32));
                }
                c => escaped.push(c),
            }
        }
        escaped.push('"');
        self.write(&escaped);
    }

    fn emit_object_literal(&mut self, object: &ObjectExpression) {
        if object.properties.is_empty() {
            self.write("{}");
            return;
        }

        self.write("{ ");
        for (i, property) in object.properties.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            match &property.key {
                PropertyKey::Identifier(ident) => {
                    let name = self.resolve(ident.name).to_string();
                    self.write(&name);
                }
                PropertyKey::StringLiteral(lit) => {
                    self.emit_string_literal(lit.value);
                }
                PropertyKey::IntLiteral(lit) => {
                    self.write(&lit.value.to_string());
                }
                PropertyKey::Computed(expr) => {
                    self.write("[");
                    self.emit_expr_prec(expr, PREC_ASSIGNMENT);
                    self.write("]");
                }
            }
            self.write(": ");
            self.emit_expr_prec(&property.value, PREC_ASSIGNMENT);
        }
        self.write(" }");
    }

    fn emit_arrow_function(&mut self, arrow: &ArrowFunction) {
        if arrow.is_async {
            self.write("async ");
        }

        self.write("(");
        self.emit_parameters(&arrow.params);
        self.write(") => ");

        match &arrow.body {
            ArrowBody::Expression(expr) => {
                // Object-literal bodies would read as blocks
                if matches!(**expr, Expression::Object(_)) {
                    self.write("(");
                    self.emit_expr_inner(expr);
                    self.write(")");
                } else {
                    self.emit_expr_prec(expr, PREC_ASSIGNMENT);
                }
            }
            ArrowBody::Block(block) => {
                self.emit_block(block);
            }
        }
    }

    /// Emit parameters as JavaScript: names and defaults, types erased.
    fn emit_parameters(&mut self, params: &[Parameter]) {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            let name = self.resolve(param.name.name).to_string();
            self.write(&name);
            if let Some(ref default) = param.default_value {
                self.write(" = ");
                self.emit_expr_prec(default, PREC_ASSIGNMENT);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Statements
    // ---------------------------------------------------------------------

    pub fn emit_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::VariableDecl(decl) => {
                self.emit_variable_declaration(decl);
            }

            Statement::FunctionDecl(decl) => {
                if decl.is_async {
                    self.write("async ");
                }
                self.write("function ");
                let name = self.resolve(decl.name.name).to_string();
                self.write(&name);
                self.write("(");
                self.emit_parameters(&decl.params);
                self.write(") ");
                self.emit_block(&decl.body);
            }

            Statement::ClassDecl(decl) => {
                self.emit_class_declaration(decl);
            }

            // Type-only constructs leave no runtime trace
            Statement::TypeAliasDecl(_) => {}

            Statement::ImportDecl(decl) => {
                self.emit_import_declaration(decl);
            }

            Statement::ExportDecl(decl) => {
                self.write("export ");
                if decl.is_default {
                    self.write("default ");
                }
                self.emit_statement(&decl.declaration);
            }

            Statement::Expression(stmt) => {
                // A leading brace or `function` would change the parse
                let needs_parens = matches!(
                    stmt.expression,
                    Expression::Object(_) | Expression::Arrow(_)
                );
                if needs_parens {
                    self.write("(");
                    self.emit_expr_inner(&stmt.expression);
                    self.write(")");
                } else {
                    self.emit_expression(&stmt.expression);
                }
                self.write(";");
            }

            Statement::If(stmt) => {
                self.write("if (");
                self.emit_expression(&stmt.condition);
                self.write(") ");
                self.emit_statement_as_body(&stmt.then_branch);
                if let Some(ref else_branch) = stmt.else_branch {
                    self.write(" else ");
                    self.emit_statement_as_body(else_branch);
                }
            }

            Statement::Return(stmt) => {
                self.write("return");
                if let Some(ref value) = stmt.value {
                    self.write(" ");
                    self.emit_expression(value);
                }
                self.write(";");
            }

            Statement::Throw(stmt) => {
                self.write("throw ");
                self.emit_expression(&stmt.value);
                self.write(";");
            }

            Statement::Block(block) => {
                self.emit_block(block);
            }

            Statement::Empty(_) => {
                self.write(";");
            }
        }
    }

    fn emit_statement_as_body(&mut self, stmt: &Statement) {
        if let Statement::Block(block) = stmt {
            self.emit_block(block);
        } else {
            self.emit_statement(stmt);
        }
    }

    fn emit_block(&mut self, block: &BlockStatement) {
        if block.statements.is_empty() {
            self.write("{}");
            return;
        }

        self.write("{");
        self.write_line();
        self.increase_indent();
        for stmt in &block.statements {
            self.emit_statement(stmt);
            self.write_line();
        }
        self.decrease_indent();
        self.write("}");
    }

    fn emit_variable_declaration(&mut self, decl: &VariableDecl) {
        self.write(match decl.kind {
            VariableKind::Var => "var ",
            VariableKind::Let => "let ",
            VariableKind::Const => "const ",
        });

        for (i, declarator) in decl.declarations.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            let name = self.resolve(declarator.name.name).to_string();
            self.write(&name);
            if let Some(ref init) = declarator.init {
                self.write(" = ");
                self.emit_expr_prec(init, PREC_ASSIGNMENT);
            }
        }
        self.write(";");
    }

    fn emit_decorators(&mut self, decorators: &[Decorator], inline: bool) {
        for decorator in decorators {
            self.write("@");
            self.emit_expr_prec(&decorator.expression, PREC_POSTFIX);
            if inline {
                self.write(" ");
            } else {
                self.write_line();
            }
        }
    }

    fn emit_class_declaration(&mut self, decl: &ClassDecl) {
        self.emit_decorators(&decl.decorators, false);

        if decl.is_abstract {
            self.write("abstract ");
        }
        self.write("class ");
        let name = self.resolve(decl.name.name).to_string();
        self.write(&name);

        if let Some(ref extends) = decl.extends {
            if let Type::Reference(reference) = &extends.ty {
                self.write(" extends ");
                let parent = reference.name.to_string(self.interner);
                self.write(&parent);
            }
        }

        self.write(" ");
        if decl.members.is_empty() {
            self.write("{}");
            return;
        }

        self.write("{");
        self.write_line();
        self.increase_indent();
        for member in &decl.members {
            self.emit_class_member(member);
            self.write_line();
        }
        self.decrease_indent();
        self.write("}");
    }

    fn emit_class_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Field(field) => {
                self.emit_decorators(&field.decorators, false);
                if field.is_static {
                    self.write("static ");
                }
                let name = self.resolve(field.name.name).to_string();
                self.write(&name);
                if let Some(ref init) = field.initializer {
                    self.write(" = ");
                    self.emit_expr_prec(init, PREC_ASSIGNMENT);
                }
                self.write(";");
            }

            ClassMember::Method(method) => {
                self.emit_decorators(&method.decorators, false);
                if method.is_static {
                    self.write("static ");
                }
                if method.is_async {
                    self.write("async ");
                }
                match method.kind {
                    MethodKind::Getter => self.write("get "),
                    MethodKind::Setter => self.write("set "),
                    MethodKind::Method => {}
                }
                let name = self.resolve(method.name.name).to_string();
                self.write(&name);
                self.write("(");
                self.emit_parameters(&method.params);
                self.write(") ");
                self.emit_block(&method.body);
            }

            ClassMember::Constructor(ctor) => {
                self.write("constructor(");
                self.emit_parameters(&ctor.params);
                self.write(") ");
                self.emit_block(&ctor.body);
            }
        }
    }

    fn emit_import_declaration(&mut self, decl: &ImportDecl) {
        // Type-only imports are erased
        if decl.type_only {
            return;
        }

        self.write("import ");

        // Side-effect import
        if decl.specifiers.is_empty() {
            self.emit_string_literal(decl.source.value);
            self.write(";");
            return;
        }

        let mut bindings: Vec<&ImportSpecifier> = Vec::new();
        let mut named: Vec<&ImportSpecifier> = Vec::new();
        for specifier in &decl.specifiers {
            match specifier {
                ImportSpecifier::Named {
                    type_only: true, ..
                } => {}
                ImportSpecifier::Named { .. } => named.push(specifier),
                other => bindings.push(other),
            }
        }

        // Every specifier was type-only: keep the side effect only
        if bindings.is_empty() && named.is_empty() {
            self.emit_string_literal(decl.source.value);
            self.write(";");
            return;
        }

        let mut first = true;
        for specifier in bindings {
            if !first {
                self.write(", ");
            }
            first = false;
            match specifier {
                ImportSpecifier::Default(ident) => {
                    let name = self.resolve(ident.name).to_string();
                    self.write(&name);
                }
                ImportSpecifier::Namespace(ident) => {
                    self.write("* as ");
                    let name = self.resolve(ident.name).to_string();
                    self.write(&name);
                }
                ImportSpecifier::Named { .. } => {}
            }
        }

        if !named.is_empty() {
            if !first {
                self.write(", ");
            }
            self.write("{ ");
            for (i, specifier) in named.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                if let ImportSpecifier::Named { name, alias, .. } = specifier {
                    let imported = self.resolve(name.name).to_string();
                    self.write(&imported);
                    if let Some(alias) = alias {
                        self.write(" as ");
                        let local = self.resolve(alias.name).to_string();
                        self.write(&local);
                    }
                }
            }
            self.write(" }");
        }

        self.write(" from ");
        self.emit_string_literal(decl.source.value);
        self.write(";");
    }
}

/// `-(-x)` and `+(+x)` need a space so the output does not fuse into
/// `--`/`++`.
fn needs_space_after_unary(op: UnaryOperator, operand: &Expression) -> bool {
    let operand_op = match operand {
        Expression::Unary(inner) => inner.operator,
        _ => return false,
    };
    matches!(
        (op, operand_op),
        (UnaryOperator::Minus, UnaryOperator::Minus) | (UnaryOperator::Plus, UnaryOperator::Plus)
    )
}

/// Whether a `new` callee chain ends in a call, which would bind the
/// argument list to the wrong expression.
fn callee_contains_call(expr: &Expression) -> bool {
    match expr {
        Expression::Call(_) => true,
        Expression::Member(member) => callee_contains_call(&member.object),
        Expression::Index(index) => callee_contains_call(&index.object),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    /// Parse a single expression statement and print it back.
    fn roundtrip(source: &str) -> String {
        let parser = Parser::new(source).expect("should lex");
        let (module, interner) = parser.parse().expect("should parse");
        let Statement::Expression(stmt) = &module.statements[0] else {
            panic!("expected expression statement");
        };
        print_expression(&stmt.expression, &interner)
    }

    #[test]
    fn test_print_literals() {
        assert_eq!(roundtrip("42;"), "42");
        assert_eq!(roundtrip("true;"), "true");
        assert_eq!(roundtrip("null;"), "null");
        assert_eq!(roundtrip("123n;"), "123n");
    }

    #[test]
    fn test_print_string_escapes() {
        assert_eq!(roundtrip(r#""say \"hi\"";"#), r#""say \"hi\"""#);
        assert_eq!(roundtrip("\"line\\nbreak\";"), "\"line\\nbreak\"");
    }

    #[test]
    fn test_print_member_chain() {
        assert_eq!(roundtrip("a.b?.c.d;"), "a.b?.c.d");
    }

    #[test]
    fn test_print_typeof_guard() {
        assert_eq!(
            roundtrip(r#"typeof X === "undefined" ? Object : X;"#),
            r#"typeof X === "undefined" ? Object : X"#
        );
    }

    #[test]
    fn test_print_qualified_guard_with_assignment() {
        let source = r#"typeof (_ref = typeof Types !== "undefined" && Types?.ObjectId) === "function" ? _ref : Object;"#;
        let expected = r#"typeof (_ref = typeof Types !== "undefined" && Types?.ObjectId) === "function" ? _ref : Object"#;
        assert_eq!(roundtrip(source), expected);
    }

    #[test]
    fn test_precedence_parens_inserted() {
        // Parenthesized nodes in source survive; synthesized nesting
        // gets parens from precedence
        let parser = Parser::new("1 + 2 * 3;").unwrap();
        let (module, interner) = parser.parse().unwrap();
        let Statement::Expression(stmt) = &module.statements[0] else {
            panic!("expected expression statement");
        };
        assert_eq!(print_expression(&stmt.expression, &interner), "1 + 2 * 3");
    }

    #[test]
    fn test_synthesized_tree_needs_parens() {
        use crate::ast::{BinaryOperator, Expression};
        let mut interner = crate::interner::Interner::new();
        let a = interner.intern("a");
        let b = interner.intern("b");
        let c = interner.intern("c");

        // (a + b) * c built directly, without Parenthesized nodes
        let sum = Expression::binary(
            BinaryOperator::Add,
            Expression::identifier(a),
            Expression::identifier(b),
        );
        let product = Expression::binary(BinaryOperator::Multiply, sum, Expression::identifier(c));

        assert_eq!(print_expression(&product, &interner), "(a + b) * c");
    }

    #[test]
    fn test_nullish_mixing_parenthesized() {
        use crate::ast::{Expression, LogicalOperator};
        let mut interner = crate::interner::Interner::new();
        let a = interner.intern("a");
        let b = interner.intern("b");
        let c = interner.intern("c");

        let or = Expression::logical(
            LogicalOperator::Or,
            Expression::identifier(b),
            Expression::identifier(c),
        );
        let nullish = Expression::logical(
            LogicalOperator::NullishCoalescing,
            Expression::identifier(a),
            or,
        );

        assert_eq!(print_expression(&nullish, &interner), "a ?? (b || c)");
    }

    #[test]
    fn test_print_array_and_object() {
        assert_eq!(roundtrip("[String];"), "[String]");
        assert_eq!(
            roundtrip("({ nullable: true, name: \"id\" });"),
            "({ nullable: true, name: \"id\" })"
        );
    }

    #[test]
    fn test_print_arrow() {
        assert_eq!(roundtrip("(x) => x + 1;"), "(x) => x + 1");
    }

    #[test]
    fn test_print_new_expression() {
        assert_eq!(roundtrip("new Date();"), "new Date()");
    }

    #[test]
    fn test_negated_nested_unary_spaced() {
        assert_eq!(roundtrip("- -x;"), "- -x");
    }

    #[test]
    fn test_print_class_statement() {
        let source = "@ObjectType()\nclass User {\n  @Field()\n  name;\n}";
        let parser = Parser::new(source).unwrap();
        let (module, interner) = parser.parse().unwrap();
        let printed = print_statement(&module.statements[0], &interner);
        assert!(printed.contains("@ObjectType()"));
        assert!(printed.contains("class User {"));
        assert!(printed.contains("@Field()"));
        assert!(printed.contains("name;"));
    }

    #[test]
    fn test_type_only_import_erased() {
        let source = "import type { Document } from \"mongoose\";";
        let parser = Parser::new(source).unwrap();
        let (module, interner) = parser.parse().unwrap();
        assert_eq!(print_statement(&module.statements[0], &interner), "");
    }
}
