use std::fmt;

use crate::ast::Literal;
use crate::interner::{self, Symbol};

/// Unique identifier for a type variable within one inference run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TyVarId(pub u32);

/// Internal type representation for the inference core.
/// Separate from `ast::TypeExpr` — this is what unification operates on.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Unification variable
    Var(TyVarId),

    /// Nominal or built-in type with ordered arguments: Number, Pair<A, B>
    Named(Symbol, Vec<Type>),

    /// n-ary function; arity is part of identity
    Function(Vec<Type>, Box<Type>),

    /// Structural record. Fields keep insertion order; keys are unique.
    /// A record with a row variable is open: it additionally contains
    /// whatever fields the row variable is later unified to carry.
    Record(Vec<(Symbol, Type)>, Option<TyVarId>),

    /// Surface-level union annotation, unified positionally
    Union(Vec<Type>),

    /// Surface-level intersection annotation, unified positionally
    Intersection(Vec<Type>),

    /// Singleton refinement, e.g. `42 : Number`. The symbol is the name
    /// of the base built-in type.
    Literal(Literal, Symbol),
}

impl Type {
    pub fn number() -> Type {
        Type::Named(interner::intern("Number"), Vec::new())
    }

    pub fn string() -> Type {
        Type::Named(interner::intern("String"), Vec::new())
    }

    pub fn boolean() -> Type {
        Type::Named(interner::intern("Boolean"), Vec::new())
    }

    pub fn function(params: Vec<Type>, ret: Type) -> Type {
        Type::Function(params, Box::new(ret))
    }

    /// Identifiers of `Var` nodes reachable from this type, in first-visit
    /// order, including the row variable of an open record.
    pub fn free_vars(&self) -> Vec<TyVarId> {
        let mut vars = Vec::new();
        self.collect_free_vars(&mut vars);
        vars
    }

    fn collect_free_vars(&self, vars: &mut Vec<TyVarId>) {
        match self {
            Type::Var(v) => {
                if !vars.contains(v) {
                    vars.push(*v);
                }
            }
            Type::Named(_, args) | Type::Union(args) | Type::Intersection(args) => {
                for arg in args {
                    arg.collect_free_vars(vars);
                }
            }
            Type::Function(params, ret) => {
                for param in params {
                    param.collect_free_vars(vars);
                }
                ret.collect_free_vars(vars);
            }
            Type::Record(fields, row) => {
                for (_, ty) in fields {
                    ty.collect_free_vars(vars);
                }
                if let Some(row) = row {
                    if !vars.contains(row) {
                        vars.push(*row);
                    }
                }
            }
            Type::Literal(_, _) => {}
        }
    }

    /// True iff `var` appears anywhere in this type.
    pub fn occurs(&self, var: TyVarId) -> bool {
        match self {
            Type::Var(v) => *v == var,
            Type::Named(_, args) | Type::Union(args) | Type::Intersection(args) => {
                args.iter().any(|arg| arg.occurs(var))
            }
            Type::Function(params, ret) => {
                params.iter().any(|param| param.occurs(var)) || ret.occurs(var)
            }
            Type::Record(fields, row) => {
                fields.iter().any(|(_, ty)| ty.occurs(var)) || *row == Some(var)
            }
            Type::Literal(_, _) => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Var(v) => write!(f, "T{}", v.0),
            Type::Named(name, args) => {
                write!(f, "{}", interner::resolve(*name).unwrap_or_default())?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            Type::Function(params, ret) => {
                // A lone function-typed parameter is parenthesized; a tuple
                // of parameters already carries parentheses of its own.
                match params.as_slice() {
                    [param @ Type::Function(_, _)] => write!(f, "({}) -> {}", param, ret),
                    [param] => write!(f, "{} -> {}", param, ret),
                    _ => {
                        write!(f, "(")?;
                        for (i, param) in params.iter().enumerate() {
                            if i > 0 {
                                write!(f, ", ")?;
                            }
                            write!(f, "{}", param)?;
                        }
                        write!(f, ") -> {}", ret)
                    }
                }
            }
            Type::Record(fields, row) => {
                if fields.is_empty() && row.is_none() {
                    return write!(f, "rect {{}}");
                }
                write!(f, "rect {{ ")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", interner::resolve(*name).unwrap_or_default(), ty)?;
                }
                if let Some(row) = row {
                    if fields.is_empty() {
                        write!(f, "| T{}", row.0)?;
                    } else {
                        write!(f, " | T{}", row.0)?;
                    }
                }
                write!(f, " }}")
            }
            Type::Union(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Type::Intersection(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Type::Literal(lit, _) => write!(f, "{}", lit),
        }
    }
}

/// A type scheme (polytype): quantified type variables plus a body.
/// A scheme with an empty quantifier list is a monotype.
#[derive(Debug, Clone, PartialEq)]
pub struct Scheme {
    pub vars: Vec<TyVarId>,
    pub ty: Type,
}

impl Scheme {
    /// Create a monomorphic scheme (no quantified variables).
    pub fn mono(ty: Type) -> Self {
        Scheme {
            vars: Vec::new(),
            ty,
        }
    }

    /// Free variables of a scheme: free variables of the body minus the
    /// quantified list.
    pub fn free_vars(&self) -> Vec<TyVarId> {
        self.ty
            .free_vars()
            .into_iter()
            .filter(|v| !self.vars.contains(v))
            .collect()
    }
}
