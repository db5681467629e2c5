//! Rust source emission for the Mint AST.
//!
//! The emitter is a pure function of the AST: one rendering rule per node
//! variant, no resolution and no validation. Indentation is a fixed unit
//! repeated per nesting level.
//!
//! # Example
//!
//! ```
//! use mint_ast::{Decl, Expr, Import, Program, Type};
//! use mint_emit::{emit_program, EmitConfig};
//!
//! let program = Program::new(
//!     vec![Import::new("std::collections::HashMap")],
//!     vec![Decl::Const { name: "x".into(), ty: Type::UInt64, value: Expr::u64(5) }],
//! );
//! let text = emit_program(&program, &EmitConfig::default());
//! assert_eq!(text, "use std::collections::HashMap;\n\npub const x: u64 = 5_u64;\n");
//! ```

use mint_ast::{Decl, Expr, Literal, Param, Program, Stmt, Type};

/// Configuration for the emitted layout.
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// Number of spaces per indentation level. Default: 4.
    pub indent_width: usize,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

/// Render a whole program: imports, a blank line, then declarations
/// separated by blank lines.
pub fn emit_program(program: &Program, config: &EmitConfig) -> String {
    Emitter::new(config).program(program)
}

/// Renders AST nodes as Rust text.
#[derive(Debug, Clone)]
pub struct Emitter {
    unit: String,
}

impl Emitter {
    pub fn new(config: &EmitConfig) -> Self {
        Self {
            unit: " ".repeat(config.indent_width),
        }
    }

    fn indent(&self, level: usize) -> String {
        self.unit.repeat(level)
    }

    pub fn program(&self, program: &Program) -> String {
        let mut out = String::new();
        for import in &program.imports {
            out.push_str(&format!("use {};\n", import.path));
        }
        out.push('\n');
        for (i, decl) in program.decls.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&self.decl(decl, 0));
            out.push('\n');
        }
        out
    }

    /// Render a declaration starting at `level`, without a trailing newline.
    pub fn decl(&self, decl: &Decl, level: usize) -> String {
        let ind = self.indent(level);
        match decl {
            Decl::Struct {
                name,
                fields,
                attributes,
            } => {
                let mut out = self.attributes(attributes, level);
                if fields.is_empty() {
                    out.push_str(&format!("{}pub struct {} {{}}", ind, name));
                    return out;
                }
                out.push_str(&format!("{}pub struct {} {{\n", ind, name));
                let field_ind = self.indent(level + 1);
                for field in fields {
                    out.push_str(&format!(
                        "{}pub {}: {},\n",
                        field_ind,
                        field.name,
                        self.ty(&field.ty)
                    ));
                }
                out.push_str(&ind);
                out.push('}');
                out
            }
            Decl::Function {
                name,
                params,
                return_type,
                body,
                attributes,
            } => {
                let mut out = self.attributes(attributes, level);
                let params: Vec<String> = params.iter().map(|p| self.param(p)).collect();
                out.push_str(&format!(
                    "{}pub fn {}({}) -> {} {{\n",
                    ind,
                    name,
                    params.join(", "),
                    self.ty(return_type)
                ));
                for stmt in body {
                    out.push_str(&self.stmt(stmt, level + 1));
                    out.push('\n');
                }
                out.push_str(&ind);
                out.push('}');
                out
            }
            Decl::Const { name, ty, value } => format!(
                "{}pub const {}: {} = {};",
                ind,
                name,
                self.ty(ty),
                self.expr(value, level)
            ),
            // A local binding, only valid inside a block. `resolve_document`
            // never puts one at the top level of a program.
            Decl::Val { name, value } => {
                format!("{}let {} = {};", ind, name, self.expr(value, level))
            }
            Decl::TypeAlias { name, ty } => {
                format!("{}pub type {} = {};", ind, name, self.ty(ty))
            }
        }
    }

    fn attributes(&self, attributes: &[String], level: usize) -> String {
        let ind = self.indent(level);
        attributes
            .iter()
            .map(|attr| format!("{}#[{}]\n", ind, attr))
            .collect()
    }

    fn param(&self, param: &Param) -> String {
        let mutability = if param.mutable { "mut " } else { "" };
        format!("{}{}: {}", mutability, param.name, self.ty(&param.ty))
    }

    /// Render a statement on its own line at `level`, without a trailing newline.
    pub fn stmt(&self, stmt: &Stmt, level: usize) -> String {
        let ind = self.indent(level);
        match stmt {
            Stmt::Assign { dest, value } => format!(
                "{}{} = {};",
                ind,
                self.expr(dest, level),
                self.expr(value, level)
            ),
            Stmt::Return(value) => format!("{}return {};", ind, self.expr(value, level)),
        }
    }

    /// Render an expression that starts mid-line at nesting `level`.
    ///
    /// Multi-line expressions indent their contents at `level + 1` and put
    /// their closing brace at `level`.
    pub fn expr(&self, expr: &Expr, level: usize) -> String {
        match expr {
            Expr::Literal(lit) => literal(lit),
            Expr::Variable(name) => name.clone(),
            Expr::FieldAccess { base, field } => {
                format!("{}.{}", self.operand(base, level), field)
            }
            Expr::StructCons {
                struct_name,
                fields,
            } => {
                if fields.is_empty() {
                    return format!("{} {{}}", struct_name);
                }
                let inner = self.indent(level + 1);
                let mut out = format!("{} {{\n", struct_name);
                for field in fields {
                    out.push_str(&format!(
                        "{}{}: {},\n",
                        inner,
                        field.name,
                        self.expr(&field.value, level + 1)
                    ));
                }
                out.push_str(&self.indent(level));
                out.push('}');
                out
            }
            Expr::EnumCons {
                enum_name,
                variant,
                args,
            } => {
                if args.is_empty() {
                    format!("{}::{}", enum_name, variant)
                } else {
                    format!("{}::{}({})", enum_name, variant, self.args(args, level))
                }
            }
            Expr::Tuple(elems) => {
                if elems.len() == 1 {
                    format!("({},)", self.expr(&elems[0], level))
                } else {
                    format!("({})", self.args(elems, level))
                }
            }
            Expr::Borrow(inner) => format!("&{}", self.operand(inner, level)),
            Expr::FunctionCall {
                name,
                type_args,
                args,
            } => format!(
                "{}{}({})",
                name,
                self.type_args(type_args),
                self.args(args, level)
            ),
            Expr::StaticMethodCall {
                ty,
                method,
                type_args,
                args,
            } => format!(
                "{}::{}{}({})",
                self.path_ty(ty),
                method,
                self.type_args(type_args),
                self.args(args, level)
            ),
            Expr::MethodCall {
                receiver,
                method,
                type_args,
                args,
            } => format!(
                "{}.{}{}({})",
                self.operand(receiver, level),
                method,
                self.type_args(type_args),
                self.args(args, level)
            ),
            Expr::IfElse {
                cond,
                then_branch,
                else_branch,
            } => {
                let ind = self.indent(level);
                let inner = self.indent(level + 1);
                format!(
                    "if {} {{\n{}{}\n{}}} else {{\n{}{}\n{}}}",
                    self.expr(cond, level),
                    inner,
                    self.expr(then_branch, level + 1),
                    ind,
                    inner,
                    self.expr(else_branch, level + 1),
                    ind
                )
            }
            Expr::Not(inner) => format!("!{}", self.operand(inner, level)),
            Expr::Add(left, right) => format!(
                "{} + {}",
                self.summand(left, level),
                self.summand(right, level)
            ),
            Expr::Let { name, value, body } => {
                let inner = self.indent(level + 1);
                format!(
                    "{{\n{}let {} = {};\n{}{}\n{}}}",
                    inner,
                    name,
                    self.expr(value, level + 1),
                    inner,
                    self.expr(body, level + 1),
                    self.indent(level)
                )
            }
            Expr::Block(stmts) => {
                if stmts.is_empty() {
                    return "{}".to_string();
                }
                let mut out = String::from("{\n");
                for stmt in stmts {
                    out.push_str(&self.stmt(stmt, level + 1));
                    out.push('\n');
                }
                out.push_str(&self.indent(level));
                out.push('}');
                out
            }
            Expr::Todo => "todo!()".to_string(),
        }
    }

    /// Render a type in type position.
    pub fn ty(&self, ty: &Type) -> String {
        ty.to_string()
    }

    /// Render a type in expression position, where generic arguments need
    /// the turbofish: `HashSet::<u64>::new()`.
    fn path_ty(&self, ty: &Type) -> String {
        match ty {
            Type::Set(elem) => format!("HashSet::<{}>", elem),
            Type::Map(key, value) => format!("HashMap::<{}, {}>", key, value),
            other => format!("<{}>", other),
        }
    }

    fn type_args(&self, type_args: &[Type]) -> String {
        if type_args.is_empty() {
            return String::new();
        }
        let rendered: Vec<String> = type_args.iter().map(|t| self.ty(t)).collect();
        format!("::<{}>", rendered.join(", "))
    }

    fn args(&self, args: &[Expr], level: usize) -> String {
        let rendered: Vec<String> = args.iter().map(|a| self.expr(a, level)).collect();
        rendered.join(", ")
    }

    /// Operand of a prefix operator, field access or method call.
    fn operand(&self, expr: &Expr, level: usize) -> String {
        match expr {
            Expr::Add(..)
            | Expr::Borrow(_)
            | Expr::Not(_)
            | Expr::IfElse { .. }
            | Expr::Let { .. } => format!("({})", self.expr(expr, level)),
            _ => self.expr(expr, level),
        }
    }

    /// Operand of `+`.
    fn summand(&self, expr: &Expr, level: usize) -> String {
        match expr {
            Expr::IfElse { .. } | Expr::Let { .. } => format!("({})", self.expr(expr, level)),
            _ => self.expr(expr, level),
        }
    }
}

fn literal(lit: &Literal) -> String {
    match lit {
        Literal::UInt64(n) => format!("{}_u64", n),
        Literal::String(s) => {
            let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
            format!("\"{}\".to_string()", escaped)
        }
        Literal::Bool(b) => b.to_string(),
    }
}
