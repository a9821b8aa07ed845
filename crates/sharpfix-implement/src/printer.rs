//! Printing member IR as C# text.
//!
//! Output follows the layout generated members get with formatting
//! defaults: braces on their own lines, one indentation level per block, a
//! blank line between block-bodied accessors, auto-accessors on one line.
//! Blank lines carry no indentation.

use crate::ir::{
    AccessorNode, ArgNode, BodyNode, ConstraintNode, DeclNode, ExprNode, MemberNode, ParamNode,
    PropertyBody, StmtNode,
};

/// Render `node` with its first line indented by `indentation`, nested
/// blocks indented by `unit` per level. No trailing newline.
pub fn print_member(node: &MemberNode, indentation: &str, unit: &str) -> String {
    let mut printer = MemberPrinter::new(indentation, unit);
    printer.emit_member(node);
    printer.output
}

/// Render a single expression.
pub fn print_expression(expr: &ExprNode) -> String {
    let mut printer = MemberPrinter::new("", "");
    printer.emit_expr(expr);
    printer.output
}

struct MemberPrinter<'a> {
    output: String,
    base: &'a str,
    unit: &'a str,
    indent_level: u32,
}

impl<'a> MemberPrinter<'a> {
    const fn new(base: &'a str, unit: &'a str) -> Self {
        Self {
            output: String::new(),
            base,
            unit,
            indent_level: 0,
        }
    }

    fn emit_member(&mut self, node: &MemberNode) {
        for comment in &node.leading_comments {
            if comment.is_empty() {
                self.blank_line();
            } else {
                self.new_line();
                self.write(comment);
            }
        }
        for attribute in &node.attributes {
            self.new_line();
            self.write("[");
            self.write(attribute);
            self.write("]");
        }
        self.new_line();
        for modifier in &node.modifiers {
            self.write(modifier);
            self.write(" ");
        }
        self.emit_decl(&node.decl);
    }

    fn emit_decl(&mut self, decl: &DeclNode) {
        match decl {
            DeclNode::Field {
                ty,
                name,
                initializer,
            } => {
                self.write(ty);
                self.write(" ");
                self.write(name);
                if let Some(init) = initializer {
                    self.write(" = ");
                    self.emit_expr(init);
                }
                self.write(";");
            }
            DeclNode::Method {
                return_type,
                explicit_interface,
                name,
                type_parameters,
                parameters,
                constraints,
                body,
            } => {
                self.write(return_type);
                self.write(" ");
                self.emit_explicit_qualifier(explicit_interface.as_deref());
                self.write(name);
                if !type_parameters.is_empty() {
                    self.write("<");
                    self.write(&type_parameters.join(", "));
                    self.write(">");
                }
                self.emit_parameters(parameters, "(", ")");
                self.emit_constraints(constraints);
                self.emit_body(body);
            }
            DeclNode::Operator {
                return_type,
                explicit_interface,
                operator,
                parameters,
                body,
            } => {
                match operator.token() {
                    Some(token) => {
                        self.write(return_type);
                        self.write(" ");
                        self.emit_explicit_qualifier(explicit_interface.as_deref());
                        self.write("operator ");
                        self.write(token);
                    }
                    None => {
                        self.write(if matches!(
                            operator,
                            sharpfix_symbols::OperatorKind::ImplicitConversion
                        ) {
                            "implicit "
                        } else {
                            "explicit "
                        });
                        self.emit_explicit_qualifier(explicit_interface.as_deref());
                        self.write("operator ");
                        self.write(return_type);
                    }
                }
                self.emit_parameters(parameters, "(", ")");
                self.emit_body(body);
            }
            DeclNode::Property {
                ty,
                explicit_interface,
                name,
                parameters,
                body,
            } => {
                self.write(ty);
                self.write(" ");
                self.emit_explicit_qualifier(explicit_interface.as_deref());
                if parameters.is_empty() {
                    self.write(name);
                } else {
                    self.write("this");
                    self.emit_parameters(parameters, "[", "]");
                }
                match body {
                    PropertyBody::Expression(expr) => {
                        self.write(" => ");
                        self.emit_expr(expr);
                        self.write(";");
                    }
                    PropertyBody::Accessors(accessors) => self.emit_accessors(accessors),
                }
            }
            DeclNode::Event {
                ty,
                explicit_interface,
                name,
                accessors,
            } => {
                self.write("event ");
                self.write(ty);
                self.write(" ");
                self.emit_explicit_qualifier(explicit_interface.as_deref());
                self.write(name);
                match accessors {
                    Some(accessors) => self.emit_accessors(accessors),
                    None => self.write(";"),
                }
            }
        }
    }

    fn emit_explicit_qualifier(&mut self, interface: Option<&str>) {
        if let Some(interface) = interface {
            self.write(interface);
            self.write(".");
        }
    }

    fn emit_parameters(&mut self, params: &[ParamNode], open: &str, close: &str) {
        self.write(open);
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            for attribute in &param.attributes {
                self.write("[");
                self.write(attribute);
                self.write("] ");
            }
            self.write(param.modifier);
            self.write(&param.ty);
            self.write(" ");
            self.write(&param.name);
            if let Some(default) = &param.default {
                self.write(" = ");
                self.write(default);
            }
        }
        self.write(close);
    }

    fn emit_constraints(&mut self, constraints: &[ConstraintNode]) {
        for clause in constraints {
            self.write(" where ");
            self.write(&clause.parameter);
            self.write(" : ");
            self.write(&clause.constraints.join(", "));
        }
    }

    fn emit_body(&mut self, body: &BodyNode) {
        match body {
            BodyNode::Semicolon => self.write(";"),
            BodyNode::Expression(expr) => {
                self.write(" => ");
                self.emit_expr(expr);
                self.write(";");
            }
            BodyNode::Block(stmts) => self.emit_block(stmts),
        }
    }

    fn emit_block(&mut self, stmts: &[StmtNode]) {
        self.new_line();
        self.write("{");
        self.increase_indent();
        for stmt in stmts {
            self.emit_stmt(stmt);
        }
        self.decrease_indent();
        self.new_line();
        self.write("}");
    }

    fn emit_accessors(&mut self, accessors: &[AccessorNode]) {
        if accessors.iter().all(|a| a.body == BodyNode::Semicolon) {
            self.write(" {");
            for accessor in accessors {
                self.write(" ");
                self.write(accessor.keyword.as_str());
                self.write(";");
            }
            self.write(" }");
            return;
        }
        self.new_line();
        self.write("{");
        self.increase_indent();
        let mut previous_was_block = false;
        for (i, accessor) in accessors.iter().enumerate() {
            let is_block = matches!(accessor.body, BodyNode::Block(_));
            if i > 0 && (is_block || previous_was_block) {
                self.blank_line();
            }
            self.new_line();
            self.write(accessor.keyword.as_str());
            self.emit_body(&accessor.body);
            previous_was_block = is_block;
        }
        self.decrease_indent();
        self.new_line();
        self.write("}");
    }

    fn emit_stmt(&mut self, stmt: &StmtNode) {
        match stmt {
            StmtNode::Expr(expr) => {
                self.new_line();
                self.emit_expr(expr);
                self.write(";");
            }
            StmtNode::Return(expr) => {
                self.new_line();
                self.write("return ");
                self.emit_expr(expr);
                self.write(";");
            }
            StmtNode::Throw(expr) => {
                self.new_line();
                self.write("throw ");
                self.emit_expr(expr);
                self.write(";");
            }
            StmtNode::If { condition, then } => {
                self.new_line();
                self.write("if (");
                self.emit_expr(condition);
                self.write(")");
                self.emit_block(then);
            }
            StmtNode::Comment(text) => {
                self.new_line();
                self.write("// ");
                self.write(text);
            }
            StmtNode::Blank => self.blank_line(),
        }
    }

    fn emit_expr(&mut self, expr: &ExprNode) {
        match expr {
            ExprNode::Identifier(name) => self.write(name),
            ExprNode::This => self.write("this"),
            ExprNode::Literal(text) => self.write(text),
            ExprNode::New { ty, args } => {
                self.write("new ");
                self.write(ty);
                self.emit_args(args, "(", ")");
            }
            ExprNode::Throw(inner) => {
                self.write("throw ");
                self.emit_expr(inner);
            }
            ExprNode::Member { receiver, name } => {
                self.emit_receiver(receiver);
                self.write(".");
                self.write(name);
            }
            ExprNode::Call { callee, args } => {
                self.emit_receiver(callee);
                self.emit_args(args, "(", ")");
            }
            ExprNode::Element { receiver, args } => {
                self.emit_receiver(receiver);
                self.emit_args(args, "[", "]");
            }
            ExprNode::Cast { ty, expr } => {
                self.write("(");
                self.write(ty);
                self.write(")");
                self.emit_expr(expr);
            }
            ExprNode::Not(inner) => {
                self.write("!");
                self.emit_expr(inner);
            }
            ExprNode::Ref(inner) => {
                self.write("ref ");
                self.emit_expr(inner);
            }
            ExprNode::Assign {
                target,
                operator,
                value,
            } => {
                self.emit_expr(target);
                self.write(" ");
                self.write(operator);
                self.write(" ");
                self.emit_expr(value);
            }
        }
    }

    /// Receivers of member access, calls and element access bind tighter
    /// than casts and prefix operators.
    fn emit_receiver(&mut self, receiver: &ExprNode) {
        let needs_parens = matches!(
            receiver,
            ExprNode::Cast { .. }
                | ExprNode::Not(_)
                | ExprNode::Ref(_)
                | ExprNode::Assign { .. }
                | ExprNode::Throw(_)
        );
        if needs_parens {
            self.write("(");
            self.emit_expr(receiver);
            self.write(")");
        } else {
            self.emit_expr(receiver);
        }
    }

    fn emit_args(&mut self, args: &[ArgNode], open: &str, close: &str) {
        self.write(open);
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if let Some(name) = &arg.name {
                self.write(name);
                self.write(": ");
            }
            self.write(arg.modifier);
            self.emit_expr(&arg.value);
        }
        self.write(close);
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Start a new indented line. The first line of output gets indentation
    /// without a preceding newline.
    fn new_line(&mut self) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.write_indent();
    }

    fn blank_line(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        self.output.push_str(self.base);
        for _ in 0..self.indent_level {
            self.output.push_str(self.unit);
        }
    }

    const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}
