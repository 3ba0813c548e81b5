use std::collections::HashMap;

use crate::ast::{Expr, NodeId, Param, Pattern, TypeExpr};
use crate::interner::{self, Symbol};

use super::constraint::ConstraintSet;
use super::convert::resolve_type_expr;
use super::env::TypeEnv;
use super::error::TypeError;
use super::supply::VarSupply;
use super::types::Type;

/// The constraint generator. Walks the AST assigning a type to every
/// node, emitting equality constraints as it goes. Solving happens
/// separately, at declaration boundaries.
pub struct InferCtx {
    pub supply: VarSupply,
    pub constraints: ConstraintSet,
    pub node_types: HashMap<NodeId, Type>,
}

impl InferCtx {
    pub fn new() -> Self {
        InferCtx {
            supply: VarSupply::new(),
            constraints: ConstraintSet::new(),
            node_types: HashMap::new(),
        }
    }

    fn record(&mut self, id: NodeId, ty: &Type) {
        self.node_types.insert(id, ty.clone());
    }

    /// Infer the type of an expression, emitting constraints.
    pub fn infer_expr(&mut self, env: &TypeEnv, expr: &Expr) -> Result<Type, TypeError> {
        let ty = match expr {
            Expr::Literal { lit, .. } => Type::Named(interner::intern(lit.type_name()), Vec::new()),

            Expr::Var { span, name, .. } => env
                .lookup(*name, &mut self.supply)
                .ok_or(TypeError::UnboundIdentifier {
                    span: *span,
                    name: *name,
                })?,

            Expr::Ctor { span, name, .. } => env
                .lookup(*name, &mut self.supply)
                .ok_or(TypeError::UnboundTypeOrConstructor {
                    span: *span,
                    name: *name,
                })?,

            Expr::Lambda { params, body, .. } => self.infer_function(env, env, params, body)?,

            Expr::Call {
                span, callee, args, ..
            } => {
                let callee_ty = self.infer_expr(env, callee)?;
                let arg_tys = args
                    .iter()
                    .map(|arg| self.infer_expr(env, arg))
                    .collect::<Result<Vec<_>, _>>()?;
                let result = self.supply.fresh_ty();
                self.constraints.push_equal(
                    callee_ty,
                    Type::Function(arg_tys, Box::new(result.clone())),
                    *span,
                );
                result
            }

            Expr::Access {
                span, base, field, ..
            } => {
                // Row-polymorphic access: the base may be any record that
                // at least contains this field.
                let base_ty = self.infer_expr(env, base)?;
                let field_ty = self.supply.fresh_ty();
                let row = self.supply.fresh();
                self.constraints.push_equal(
                    base_ty,
                    Type::Record(vec![(field.value, field_ty.clone())], Some(row)),
                    *span,
                );
                field_ty
            }

            Expr::Record { fields, .. } => {
                let fields = fields
                    .iter()
                    .map(|(name, value)| Ok((name.value, self.infer_expr(env, value)?)))
                    .collect::<Result<Vec<_>, TypeError>>()?;
                Type::Record(fields, None)
            }

            Expr::Const {
                name, value, body, ..
            } => {
                // const binds monomorphically; no generalization here.
                let value_ty = self.infer_expr(env, value)?;
                let mut inner = env.child();
                inner.insert_mono(name.value, value_ty);
                self.infer_expr(&inner, body)?
            }

            Expr::Match {
                scrutinee, arms, ..
            } => {
                let scrutinee_ty = self.infer_expr(env, scrutinee)?;
                let result = self.supply.fresh_ty();
                for arm in arms {
                    let mut bindings = Vec::new();
                    let pattern_ty = self.infer_pattern(env, &arm.pattern, &mut bindings)?;
                    self.constraints.push_equal(
                        scrutinee_ty.clone(),
                        pattern_ty,
                        arm.pattern.span(),
                    );
                    let mut arm_env = env.child();
                    for (name, ty) in bindings {
                        arm_env.insert_mono(name, ty);
                    }
                    let body_ty = self.infer_expr(&arm_env, &arm.body)?;
                    self.constraints
                        .push_equal(result.clone(), body_ty, arm.body.span());
                }
                result
            }
        };
        self.record(expr.id(), &ty);
        Ok(ty)
    }

    /// Infer a function body under freshly bound parameters. Parameter
    /// annotations are resolved against `ann_env`, which may carry a
    /// declaration's generic parameters in addition to `env`.
    pub fn infer_function(
        &mut self,
        env: &TypeEnv,
        ann_env: &TypeEnv,
        params: &[Param],
        body: &Expr,
    ) -> Result<Type, TypeError> {
        let mut inner = env.child();
        let mut param_tys = Vec::new();
        for param in params {
            let ty = match &param.ann {
                Some(ann) => resolve_type_expr(ann_env, ann)?,
                None => self.supply.fresh_ty(),
            };
            self.record(param.id, &ty);
            inner.insert_mono(param.name.value, ty.clone());
            param_tys.push(ty);
        }
        let body_ty = self.infer_expr(&inner, body)?;
        Ok(Type::Function(param_tys, Box::new(body_ty)))
    }

    /// Infer a pattern, collecting the variables it binds.
    pub fn infer_pattern(
        &mut self,
        env: &TypeEnv,
        pattern: &Pattern,
        bindings: &mut Vec<(Symbol, Type)>,
    ) -> Result<Type, TypeError> {
        let ty = match pattern {
            Pattern::Var { name, .. } => {
                let ty = self.supply.fresh_ty();
                bindings.push((*name, ty.clone()));
                ty
            }

            Pattern::Literal { lit, .. } => {
                Type::Named(interner::intern(lit.type_name()), Vec::new())
            }

            // Record patterns expose the full shape: closed, no row.
            Pattern::Record { fields, .. } => {
                let fields = fields
                    .iter()
                    .map(|(name, sub)| Ok((name.value, self.infer_pattern(env, sub, bindings)?)))
                    .collect::<Result<Vec<_>, TypeError>>()?;
                Type::Record(fields, None)
            }

            Pattern::Ctor {
                span, name, args, ..
            } => {
                let ctor_ty = env.lookup(name.value, &mut self.supply).ok_or(
                    TypeError::UnboundTypeOrConstructor {
                        span: name.span,
                        name: name.value,
                    },
                )?;
                match args {
                    // Bare constructor: its type is the pattern's type.
                    None => ctor_ty,
                    Some(args) => {
                        let arg_tys = args
                            .iter()
                            .map(|arg| self.infer_pattern(env, arg, bindings))
                            .collect::<Result<Vec<_>, _>>()?;
                        let result = self.supply.fresh_ty();
                        self.constraints.push_equal(
                            ctor_ty,
                            Type::Function(arg_tys, Box::new(result.clone())),
                            *span,
                        );
                        result
                    }
                }
            }
        };
        self.record(pattern.id(), &ty);
        Ok(ty)
    }

    /// Resolve an optional annotation and pin the given type to it.
    pub fn apply_annotation(
        &mut self,
        ann_env: &TypeEnv,
        ann: Option<&TypeExpr>,
        ty: &Type,
    ) -> Result<(), TypeError> {
        if let Some(ann) = ann {
            let annotated = resolve_type_expr(ann_env, ann)?;
            self.constraints
                .push_equal(ty.clone(), annotated, ann.span());
        }
        Ok(())
    }
}
