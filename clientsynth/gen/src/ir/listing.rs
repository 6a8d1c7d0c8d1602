//! Human-readable listing of the IR.
//!
//! The listing is neutral pseudo-code meant for review and snapshot
//! comparison, not for compilation. Output is deterministic.

use std::fmt::{self, Display, Formatter, Write};

use super::{ErrorSelector, Expr, MethodBody, Signature, Stmt, SynthesizedMethod};

const INDENT: &str = "    ";

fn join<T: Display>(items: &[T]) -> String {
    let mut out = String::new();
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        // Writing to a String cannot fail.
        let _ = write!(out, "{item}");
    }
    out
}

fn pad(f: &mut Formatter<'_>, level: usize) -> fmt::Result {
    for _ in 0..level {
        f.write_str(INDENT)?;
    }
    Ok(())
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var { name } => f.write_str(name),
            Self::Field { base, name } => write!(f, "{base}.{name}"),
            Self::Deref { value } => write!(f, "*{value}"),
            Self::AddrOf { value } => write!(f, "&{value}"),
            Self::Str { value } => write!(f, "{value:?}"),
            Self::Null => f.write_str("null"),
            Self::Zero { ty } => write!(f, "zero({ty})"),
            Self::Stringify { format, value } => write!(f, "{format}_to_string({value})"),
            Self::BytesToString { bytes } => write!(f, "string({bytes})"),
            Self::Format { template, args } => {
                write!(f, "format({template:?}, {})", join(args))
            }
        }
    }
}

fn write_block(f: &mut Formatter<'_>, body: &[Stmt], level: usize) -> fmt::Result {
    for stmt in body {
        write_stmt(f, stmt, level)?;
    }
    Ok(())
}

fn write_selector(f: &mut Formatter<'_>, selector: &ErrorSelector, level: usize) -> fmt::Result {
    f.write_str("fn(code) {\n")?;
    match selector {
        ErrorSelector::Always { error } => {
            pad(f, level + 1)?;
            writeln!(f, "return {error}")?;
        }
        ErrorSelector::Single { code, error } => {
            pad(f, level + 1)?;
            writeln!(f, "if code == {code} {{ return {error} }}")?;
            pad(f, level + 1)?;
            writeln!(f, "return null")?;
        }
        ErrorSelector::Switch { cases, default } => {
            pad(f, level + 1)?;
            writeln!(f, "switch code {{")?;
            for case in cases {
                pad(f, level + 1)?;
                writeln!(f, "case {}: return {}", join(&case.codes), case.error)?;
            }
            pad(f, level + 1)?;
            match default {
                Some(error) => writeln!(f, "default: return {error}")?,
                None => writeln!(f, "default: return null")?,
            }
            pad(f, level + 1)?;
            writeln!(f, "}}")?;
        }
    }
    pad(f, level)?;
    f.write_str("}")
}

fn write_stmt(f: &mut Formatter<'_>, stmt: &Stmt, level: usize) -> fmt::Result {
    pad(f, level)?;
    match stmt {
        Stmt::Let { name, value } => writeln!(f, "let {name} = {value}"),
        Stmt::DeclareVar { name, ty } => writeln!(f, "var {name}: {ty}"),
        Stmt::DeclareIterator { name, ty, init } => {
            let fields: Vec<String> = init
                .iter()
                .map(|field| format!("{}: {}", field.name, field.value))
                .collect();
            writeln!(f, "let {name} = {ty} {{ {} }}", fields.join(", "))
        }
        Stmt::Marshal { bytes, value, err } => {
            writeln!(f, "{bytes}, {err} = marshal_text({value})")
        }
        Stmt::ReturnIfErr { err, values } => {
            writeln!(f, "if {err} != null {{ return {} }}", join(values))
        }
        Stmt::DeclareQuery { name } => writeln!(f, "var {name}: query"),
        Stmt::InitQuery { name } => writeln!(f, "{name} = new query"),
        Stmt::QuerySet { query, key, value } => writeln!(f, "{query}.set({key:?}, {value})"),
        Stmt::QueryAdd { query, key, value } => writeln!(f, "{query}.add({key:?}, {value})"),
        Stmt::ForEach { item, seq, body } => {
            writeln!(f, "for {item} in {seq} {{")?;
            write_block(f, body, level + 1)?;
            pad(f, level)?;
            writeln!(f, "}}")
        }
        Stmt::IfNotNull { value, body } => {
            writeln!(f, "if {value} != null {{")?;
            write_block(f, body, level + 1)?;
            pad(f, level)?;
            writeln!(f, "}}")
        }
        Stmt::NewRequest {
            request,
            backend,
            verb,
            path,
            query,
            body,
            err,
        } => writeln!(
            f,
            "{request}, {err} = {backend}.new_request({verb}, {path}, {query}, {body})"
        ),
        Stmt::HeaderSet {
            request,
            key,
            value,
        } => writeln!(f, "{request}.header.set({key:?}, {value})"),
        Stmt::Dispatch {
            backend,
            context,
            request,
            target,
            classifier,
            err,
        } => {
            write!(f, "_, {err} = {backend}.do({context}, {request}, {target}, ")?;
            match classifier {
                Some(selector) => write_selector(f, selector, level)?,
                None => f.write_str("null")?,
            }
            writeln!(f, ")")
        }
        Stmt::Return { values } if values.is_empty() => writeln!(f, "return"),
        Stmt::Return { values } => writeln!(f, "return {}", join(values)),
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_stmt(f, self, 0)
    }
}

impl Display for ErrorSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_selector(f, self, 0)
    }
}

fn write_body(f: &mut Formatter<'_>, body: &MethodBody, level: usize) -> fmt::Result {
    for (idx, section) in body.sections.iter().enumerate() {
        if idx > 0 {
            writeln!(f)?;
        }
        pad(f, level)?;
        writeln!(f, "// {}", section.phase)?;
        write_block(f, &section.stmts, level)?;
    }
    Ok(())
}

impl Display for MethodBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_body(f, self, 0)
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|param| format!("{}: {}", param.name, param.ty))
            .collect();
        write!(
            f,
            "fn ({}: {}) {}({}) -> ",
            self.receiver.id,
            self.receiver.type_name,
            self.name,
            params.join(", ")
        )?;
        match self.results.as_slice() {
            [single] => write!(f, "{single}"),
            results => write!(f, "({})", join(results)),
        }
    }
}

impl Display for SynthesizedMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}.{}", self.client, self.signature.name)?;
        for line in self.doc.lines() {
            if line.is_empty() {
                writeln!(f, "//")?;
            } else {
                writeln!(f, "// {line}")?;
            }
        }
        writeln!(f, "{} {{", self.signature)?;
        write_body(f, &self.body, 1)?;
        writeln!(f, "}}")
    }
}
