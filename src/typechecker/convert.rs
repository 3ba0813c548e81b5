use crate::ast::TypeExpr;
use crate::interner;

use super::env::TypeEnv;
use super::error::TypeError;
use super::types::Type;

/// Convert a surface type expression (annotation syntax) into the internal
/// type representation. Type-name references are checked against the
/// environment; everything else translates compositionally.
pub fn resolve_type_expr(env: &TypeEnv, ty: &TypeExpr) -> Result<Type, TypeError> {
    match ty {
        TypeExpr::Named { name, args, .. } => {
            if env.lookup_scheme(name.value).is_none() {
                return Err(TypeError::UnboundTypeOrConstructor {
                    span: name.span,
                    name: name.value,
                });
            }
            let args = args
                .iter()
                .map(|arg| resolve_type_expr(env, arg))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Type::Named(name.value, args))
        }

        TypeExpr::Function { param, ret, .. } => {
            let param = resolve_type_expr(env, param)?;
            let ret = resolve_type_expr(env, ret)?;
            Ok(Type::function(vec![param], ret))
        }

        // Annotation records are always closed.
        TypeExpr::Record { fields, .. } => {
            let fields = fields
                .iter()
                .map(|(name, ty)| Ok((name.value, resolve_type_expr(env, ty)?)))
                .collect::<Result<Vec<_>, TypeError>>()?;
            Ok(Type::Record(fields, None))
        }

        TypeExpr::Union { items, .. } => {
            let items = items
                .iter()
                .map(|item| resolve_type_expr(env, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Type::Union(items))
        }

        TypeExpr::Intersection { items, .. } => {
            let items = items
                .iter()
                .map(|item| resolve_type_expr(env, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Type::Intersection(items))
        }

        TypeExpr::Literal { lit, .. } => {
            Ok(Type::Literal(lit.clone(), interner::intern(lit.type_name())))
        }
    }
}
