pub mod constraint;
pub mod convert;
pub mod env;
pub mod error;
pub mod infer;
pub mod subst;
pub mod supply;
pub mod types;
pub mod unify;

use std::collections::HashMap;

use crate::ast::{Decl, Expr, NodeId, Program};
use crate::interner::{self, Symbol};
use crate::span::Spanned;

use convert::resolve_type_expr;
use env::TypeEnv;
use error::TypeError;
use infer::InferCtx;
use subst::Subst;
use types::{TyVarId, Type};
use unify::solve;

/// Result of inferring a whole program: the resolved top-level
/// environment plus a type for every visited AST node.
#[derive(Debug)]
pub struct InferResult {
    pub env: TypeEnv,
    pub node_types: HashMap<NodeId, Type>,
}

/// Infer types for a program.
///
/// Declarations are processed sequentially: each `let` is solved and
/// generalized before the next is visited. Every top-level name is
/// pre-declared with a placeholder first, so later declarations may be
/// referenced before they are checked.
pub fn infer(program: &Program) -> Result<InferResult, TypeError> {
    let mut ctx = InferCtx::new();
    let mut env = TypeEnv::with_builtins();

    // Pre-declare top-level names: a fresh variable per let, the bare
    // nominal type per type declaration.
    let mut placeholders: HashMap<Symbol, TyVarId> = HashMap::new();
    for decl in &program.decls {
        match decl {
            Decl::Let { name, .. } => {
                let var = ctx.supply.fresh();
                placeholders.insert(name.value, var);
                env.insert_mono(name.value, Type::Var(var));
            }
            Decl::Type { name, .. } => {
                env.insert_mono(name.value, Type::Named(name.value, Vec::new()));
            }
            Decl::Expr { .. } => {}
        }
    }

    let mut subst = Subst::empty();
    for decl in &program.decls {
        match decl {
            Decl::Type { id, name, generics, ty, .. } => {
                // Aliases are nominal: the right-hand side is resolved for
                // well-formedness only.
                let ann_env = env_with_generics(&env, generics);
                let resolved = resolve_type_expr(&ann_env, ty)?;
                ctx.node_types.insert(*id, resolved);
                log::debug!(
                    "registered type {}",
                    interner::resolve(name.value).unwrap_or_default()
                );
            }

            Decl::Expr { id, expr, .. } => {
                let ty = ctx.infer_expr(&env, expr)?;
                ctx.node_types.insert(*id, ty);
                subst = solve(&ctx.constraints, &mut ctx.supply)?;
            }

            Decl::Let {
                id,
                span,
                name,
                generics,
                params,
                ann,
                body,
            } => {
                let decl_ty = ctx.supply.fresh_ty();
                ctx.node_types.insert(*id, decl_ty.clone());
                let ann_env = env_with_generics(&env, generics);

                let bound_ty = match params {
                    None => {
                        let ty = ctx.infer_expr(&env, body)?;
                        ctx.apply_annotation(&ann_env, ann.as_ref(), &ty)?;
                        ty
                    }
                    Some(params) => {
                        // A parameter-list declaration types like the
                        // corresponding lambda; the annotation is its
                        // return type.
                        let ty = ctx.infer_function(&env, &ann_env, params, body)?;
                        if let Type::Function(_, ret) = &ty {
                            ctx.apply_annotation(&ann_env, ann.as_ref(), ret)?;
                        }
                        ty
                    }
                };

                ctx.constraints
                    .push_equal(decl_ty, bound_ty.clone(), *span);
                if let Some(&placeholder) = placeholders.get(&name.value) {
                    ctx.constraints
                        .push_equal(Type::Var(placeholder), bound_ty.clone(), *span);
                }

                subst = solve(&ctx.constraints, &mut ctx.supply)?;
                let resolved_env = env.apply_subst(&subst);
                let scheme =
                    resolved_env.generalize_excluding(&subst.apply(&bound_ty), name.value);
                log::debug!(
                    "inferred {} : {}",
                    interner::resolve(name.value).unwrap_or_default(),
                    scheme.ty
                );
                env.insert_scheme(name.value, scheme);
            }
        }
    }

    let env = env.apply_subst(&subst);
    let node_types = ctx
        .node_types
        .into_iter()
        .map(|(id, ty)| (id, subst.apply(&ty)))
        .collect();
    Ok(InferResult { env, node_types })
}

/// Infer the type of a single expression in an environment seeded with
/// the built-in types.
pub fn infer_expr(expr: &Expr) -> Result<Type, TypeError> {
    infer_expr_with_env(&TypeEnv::with_builtins(), expr)
}

/// Infer the type of an expression with a pre-populated environment.
pub fn infer_expr_with_env(env: &TypeEnv, expr: &Expr) -> Result<Type, TypeError> {
    let mut ctx = InferCtx::new();
    let ty = ctx.infer_expr(env, expr)?;
    let subst = solve(&ctx.constraints, &mut ctx.supply)?;
    Ok(subst.apply(&ty))
}

/// Pretty-print the inferred type of each top-level `let` binding.
pub fn inferred_types_as_strings(program: &Program) -> Result<HashMap<String, String>, TypeError> {
    let result = infer(program)?;
    let mut out = HashMap::new();
    for decl in &program.decls {
        if let Decl::Let { name, .. } = decl {
            if let Some(scheme) = result.env.lookup_scheme(name.value) {
                out.insert(
                    interner::resolve(name.value).unwrap_or_default(),
                    scheme.ty.to_string(),
                );
            }
        }
    }
    Ok(out)
}

/// Extend an environment with a declaration's generic parameters, bound
/// as opaque nominal types for annotation resolution.
fn env_with_generics(env: &TypeEnv, generics: &[Spanned<Symbol>]) -> TypeEnv {
    let mut extended = env.child();
    for generic in generics {
        extended.insert_mono(generic.value, Type::Named(generic.value, Vec::new()));
    }
    extended
}
