use crate::interner::Symbol;
use crate::span::Span;

use super::constraint::{Constraint, ConstraintSet};
use super::error::TypeError;
use super::subst::Subst;
use super::supply::VarSupply;
use super::types::{TyVarId, Type};

/// Solve a constraint set in insertion order, producing one substitution.
/// Each constraint is unified after applying the substitution accumulated
/// so far to both sides. `Subtype` constraints are solved as equalities;
/// the generator never emits them and no lattice search is attempted.
pub fn solve(constraints: &ConstraintSet, supply: &mut VarSupply) -> Result<Subst, TypeError> {
    let mut subst = Subst::empty();
    for constraint in constraints.iter() {
        let (left, right, span) = match constraint {
            Constraint::Equal { left, right, span } => (left, right, *span),
            Constraint::Subtype { sub, sup, span } => (sub, sup, *span),
        };
        let step = unify(&subst.apply(left), &subst.apply(right), span, supply)?;
        subst = step.compose(&subst);
    }
    Ok(subst)
}

/// Syntactic unification with occurs check, a row-polymorphic rule for
/// records, and conservative positional rules for union, intersection,
/// and literal types.
pub fn unify(
    t1: &Type,
    t2: &Type,
    span: Span,
    supply: &mut VarSupply,
) -> Result<Subst, TypeError> {
    if t1 == t2 {
        return Ok(Subst::empty());
    }
    match (t1, t2) {
        (Type::Var(var), other) | (other, Type::Var(var)) => bind_var(*var, other, span),

        (Type::Function(params1, ret1), Type::Function(params2, ret2)) => {
            if params1.len() != params2.len() {
                return Err(TypeError::ArityMismatch {
                    span,
                    expected: params1.len(),
                    found: params2.len(),
                });
            }
            let mut subst = unify(ret1, ret2, span, supply)?;
            for (p1, p2) in params1.iter().zip(params2) {
                let step = unify(&subst.apply(p1), &subst.apply(p2), span, supply)?;
                subst = step.compose(&subst);
            }
            Ok(subst)
        }

        (Type::Record(fields1, row1), Type::Record(fields2, row2)) => {
            unify_records(fields1, *row1, fields2, *row2, span, supply)
        }

        (Type::Named(name1, args1), Type::Named(name2, args2)) => {
            if name1 != name2 || args1.len() != args2.len() {
                return Err(TypeError::UnificationFailure {
                    span,
                    left: t1.clone(),
                    right: t2.clone(),
                });
            }
            unify_pairwise(args1, args2, span, supply)
        }

        (Type::Union(items1), Type::Union(items2))
        | (Type::Intersection(items1), Type::Intersection(items2)) => {
            if items1.len() != items2.len() {
                return Err(TypeError::UnificationFailure {
                    span,
                    left: t1.clone(),
                    right: t2.clone(),
                });
            }
            unify_pairwise(items1, items2, span, supply)
        }

        (Type::Literal(lit1, base1), Type::Literal(lit2, base2)) => {
            if lit1 == lit2 && base1 == base2 {
                Ok(Subst::empty())
            } else {
                Err(TypeError::LiteralMismatch {
                    span,
                    left: lit1.clone(),
                    right: lit2.clone(),
                })
            }
        }

        // A literal refinement matches its own base type.
        (Type::Literal(_, base), Type::Named(name, _))
        | (Type::Named(name, _), Type::Literal(_, base)) => {
            if base == name {
                Ok(Subst::empty())
            } else {
                Err(TypeError::UnificationFailure {
                    span,
                    left: t1.clone(),
                    right: t2.clone(),
                })
            }
        }

        _ => Err(TypeError::UnificationFailure {
            span,
            left: t1.clone(),
            right: t2.clone(),
        }),
    }
}

fn bind_var(var: TyVarId, ty: &Type, span: Span) -> Result<Subst, TypeError> {
    // `Var(a) ~ Var(a)` is caught by the structural-equality fast path.
    if ty.occurs(var) {
        return Err(TypeError::RecursiveType {
            span,
            var,
            ty: ty.clone(),
        });
    }
    Ok(Subst::singleton(var, ty.clone()))
}

fn unify_pairwise(
    items1: &[Type],
    items2: &[Type],
    span: Span,
    supply: &mut VarSupply,
) -> Result<Subst, TypeError> {
    let mut subst = Subst::empty();
    for (i1, i2) in items1.iter().zip(items2) {
        let step = unify(&subst.apply(i1), &subst.apply(i2), span, supply)?;
        subst = step.compose(&subst);
    }
    Ok(subst)
}

/// Unify two record types, handling row polymorphism.
///
/// Shared fields unify pairwise. Fields present on one side only must be
/// absorbed by the other side's row variable: the row is bound to a record
/// of the extra fields, closed when the donating record is closed and open
/// (with a shared fresh tail) when both records are open.
fn unify_records(
    fields1: &[(Symbol, Type)],
    row1: Option<TyVarId>,
    fields2: &[(Symbol, Type)],
    row2: Option<TyVarId>,
    span: Span,
    supply: &mut VarSupply,
) -> Result<Subst, TypeError> {
    let mut subst = Subst::empty();

    for (name, ty1) in fields1 {
        if let Some((_, ty2)) = fields2.iter().find(|(other, _)| other == name) {
            let step = unify(&subst.apply(ty1), &subst.apply(ty2), span, supply)?;
            subst = step.compose(&subst);
        }
    }

    let extras = |from: &[(Symbol, Type)], other: &[(Symbol, Type)], s: &Subst| {
        from.iter()
            .filter(|(name, _)| !other.iter().any(|(o, _)| o == name))
            .map(|(name, ty)| (*name, s.apply(ty)))
            .collect::<Vec<_>>()
    };
    let extra1 = extras(fields1, fields2, &subst);
    let extra2 = extras(fields2, fields1, &subst);

    let mismatch = || TypeError::RecordFieldMismatch {
        span,
        left: fields1.iter().map(|(n, _)| *n).collect(),
        right: fields2.iter().map(|(n, _)| *n).collect(),
    };

    match (row1, row2) {
        (None, None) => {
            if !extra1.is_empty() || !extra2.is_empty() {
                return Err(mismatch());
            }
            Ok(subst)
        }

        // One side open, the other closed: the closed side fixes the shape.
        // Extra fields on the open side have nowhere to go.
        (Some(row1), None) => {
            if !extra1.is_empty() {
                return Err(mismatch());
            }
            let step = unify(
                &subst.apply(&Type::Var(row1)),
                &Type::Record(extra2, None),
                span,
                supply,
            )?;
            Ok(step.compose(&subst))
        }
        (None, Some(row2)) => {
            if !extra2.is_empty() {
                return Err(mismatch());
            }
            let step = unify(
                &subst.apply(&Type::Var(row2)),
                &Type::Record(extra1, None),
                span,
                supply,
            )?;
            Ok(step.compose(&subst))
        }

        (Some(row1), Some(row2)) => {
            if extra1.is_empty() && extra2.is_empty() {
                let step = unify(
                    &subst.apply(&Type::Var(row1)),
                    &subst.apply(&Type::Var(row2)),
                    span,
                    supply,
                )?;
                return Ok(step.compose(&subst));
            }
            if row1 == row2 {
                // Same row on both sides: it must absorb both extra sets.
                let mut merged = extra1;
                merged.extend(extra2);
                let tail = supply.fresh();
                let step = unify(
                    &subst.apply(&Type::Var(row1)),
                    &Type::Record(merged, Some(tail)),
                    span,
                    supply,
                )?;
                return Ok(step.compose(&subst));
            }
            let tail = supply.fresh();
            let step = unify(
                &subst.apply(&Type::Var(row2)),
                &Type::Record(extra1, Some(tail)),
                span,
                supply,
            )?;
            subst = step.compose(&subst);
            let extra2: Vec<_> = extra2
                .into_iter()
                .map(|(name, ty)| (name, subst.apply(&ty)))
                .collect();
            let step = unify(
                &subst.apply(&Type::Var(row1)),
                &Type::Record(extra2, Some(tail)),
                span,
                supply,
            )?;
            Ok(step.compose(&subst))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner;

    fn var(id: u32) -> Type {
        Type::Var(TyVarId(id))
    }

    fn unify_at(t1: &Type, t2: &Type) -> Result<Subst, TypeError> {
        let mut supply = VarSupply::new();
        for _ in 0..100 {
            supply.fresh();
        }
        unify(t1, t2, Span::new(0, 0), &mut supply)
    }

    // ===== Variables and occurs check =====

    #[test]
    fn test_unify_identical_types_is_empty() {
        let s = unify_at(&Type::number(), &Type::number()).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn test_unify_var_binds() {
        let s = unify_at(&var(0), &Type::number()).unwrap();
        assert_eq!(s.apply(&var(0)), Type::number());
    }

    #[test]
    fn test_unify_var_with_itself_is_empty() {
        let s = unify_at(&var(0), &var(0)).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn test_occurs_check_fails_recursive_type() {
        let result = unify_at(&var(0), &Type::function(vec![var(0)], var(1)));
        assert!(matches!(
            result,
            Err(TypeError::RecursiveType { var: TyVarId(0), .. })
        ));
    }

    #[test]
    fn test_occurs_check_sees_row_variable() {
        let f = interner::intern("f");
        let rec = Type::Record(vec![(f, Type::number())], Some(TyVarId(0)));
        assert!(matches!(
            unify_at(&var(0), &rec),
            Err(TypeError::RecursiveType { .. })
        ));
    }

    // ===== Functions =====

    #[test]
    fn test_function_arity_mismatch() {
        let f1 = Type::function(vec![var(0)], var(1));
        let f2 = Type::function(vec![var(0), var(2)], var(1));
        assert!(matches!(
            unify_at(&f1, &f2),
            Err(TypeError::ArityMismatch {
                expected: 1,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_function_unifies_returns_then_params() {
        let f1 = Type::function(vec![var(0)], var(0));
        let f2 = Type::function(vec![Type::number()], var(1));
        let s = unify_at(&f1, &f2).unwrap();
        assert_eq!(s.apply(&var(0)), Type::number());
        assert_eq!(s.apply(&var(1)), Type::number());
    }

    // ===== Records =====

    fn record(fields: Vec<(&str, Type)>, row: Option<u32>) -> Type {
        Type::Record(
            fields
                .into_iter()
                .map(|(name, ty)| (interner::intern(name), ty))
                .collect(),
            row.map(TyVarId),
        )
    }

    #[test]
    fn test_closed_records_with_different_keys_fail() {
        let r1 = record(vec![("x", Type::number())], None);
        let r2 = record(vec![("y", Type::number())], None);
        assert!(matches!(
            unify_at(&r1, &r2),
            Err(TypeError::RecordFieldMismatch { .. })
        ));
    }

    #[test]
    fn test_open_record_absorbs_closed_extras() {
        // rect { x: T0 | T1 } ~ rect { x: Number, y: String }
        let open = record(vec![("x", var(0))], Some(1));
        let closed = record(
            vec![("x", Type::number()), ("y", Type::string())],
            None,
        );
        let s = unify_at(&open, &closed).unwrap();
        assert_eq!(s.apply(&var(0)), Type::number());
        assert_eq!(
            s.apply(&var(1)),
            record(vec![("y", Type::string())], None)
        );
    }

    #[test]
    fn test_open_record_extra_field_missing_from_closed_fails() {
        let open = record(vec![("z", var(0))], Some(1));
        let closed = record(vec![("x", Type::number())], None);
        assert!(matches!(
            unify_at(&open, &closed),
            Err(TypeError::RecordFieldMismatch { .. })
        ));
    }

    #[test]
    fn test_two_open_records_share_a_fresh_tail() {
        // rect { x: Number | T0 } ~ rect { y: String | T1 }
        let r1 = record(vec![("x", Type::number())], Some(0));
        let r2 = record(vec![("y", Type::string())], Some(1));
        let s = unify_at(&r1, &r2).unwrap();
        // Both sides must now contain both fields and stay open on the
        // same tail.
        let x = interner::intern("x");
        let y = interner::intern("y");
        let mut tails = Vec::new();
        for side in [&r1, &r2] {
            match s.apply(side) {
                Type::Record(fields, Some(tail)) => {
                    assert!(fields.iter().any(|(n, _)| *n == x));
                    assert!(fields.iter().any(|(n, _)| *n == y));
                    tails.push(tail);
                }
                other => panic!("expected open record, got: {}", other),
            }
        }
        assert_eq!(tails[0], tails[1]);
    }

    #[test]
    fn test_shared_field_types_unify() {
        let r1 = record(vec![("x", var(0))], None);
        let r2 = record(vec![("x", Type::boolean())], None);
        let s = unify_at(&r1, &r2).unwrap();
        assert_eq!(s.apply(&var(0)), Type::boolean());
    }

    // ===== Named, union, literal =====

    #[test]
    fn test_named_mismatch_fails() {
        assert!(matches!(
            unify_at(&Type::number(), &Type::string()),
            Err(TypeError::UnificationFailure { .. })
        ));
    }

    #[test]
    fn test_named_args_unify_pairwise() {
        let pair = interner::intern("Pair");
        let n1 = Type::Named(pair, vec![var(0), Type::string()]);
        let n2 = Type::Named(pair, vec![Type::number(), var(1)]);
        let s = unify_at(&n1, &n2).unwrap();
        assert_eq!(s.apply(&var(0)), Type::number());
        assert_eq!(s.apply(&var(1)), Type::string());
    }

    #[test]
    fn test_union_sizes_must_match() {
        let u1 = Type::Union(vec![Type::number(), Type::string()]);
        let u2 = Type::Union(vec![Type::number()]);
        assert!(matches!(
            unify_at(&u1, &u2),
            Err(TypeError::UnificationFailure { .. })
        ));
    }

    #[test]
    fn test_union_components_unify_positionally() {
        let u1 = Type::Union(vec![var(0), Type::string()]);
        let u2 = Type::Union(vec![Type::number(), Type::string()]);
        let s = unify_at(&u1, &u2).unwrap();
        assert_eq!(s.apply(&var(0)), Type::number());
    }

    #[test]
    fn test_literal_against_matching_base_named() {
        let lit = Type::Literal(crate::ast::Literal::Int(42), interner::intern("Number"));
        assert!(unify_at(&lit, &Type::number()).unwrap().is_empty());
        assert!(matches!(
            unify_at(&lit, &Type::string()),
            Err(TypeError::UnificationFailure { .. })
        ));
    }

    #[test]
    fn test_literal_mismatch() {
        let l1 = Type::Literal(crate::ast::Literal::Int(1), interner::intern("Number"));
        let l2 = Type::Literal(crate::ast::Literal::Int(2), interner::intern("Number"));
        assert!(matches!(
            unify_at(&l1, &l2),
            Err(TypeError::LiteralMismatch { .. })
        ));
    }

    #[test]
    fn test_record_vs_function_fails() {
        let rec = record(vec![("x", Type::number())], None);
        let fun = Type::function(vec![Type::number()], Type::number());
        assert!(matches!(
            unify_at(&rec, &fun),
            Err(TypeError::UnificationFailure { .. })
        ));
    }

    // ===== solve =====

    #[test]
    fn test_solve_consumes_constraints_in_order() {
        let mut supply = VarSupply::new();
        let a = supply.fresh_ty();
        let b = supply.fresh_ty();
        let mut constraints = ConstraintSet::new();
        constraints.push_equal(a.clone(), b.clone(), Span::new(0, 0));
        constraints.push_equal(b.clone(), Type::number(), Span::new(0, 0));
        let s = solve(&constraints, &mut supply).unwrap();
        assert_eq!(s.apply(&a), Type::number());
        assert_eq!(s.apply(&b), Type::number());
    }

    #[test]
    fn test_solve_satisfies_every_constraint() {
        let mut supply = VarSupply::new();
        let a = supply.fresh_ty();
        let b = supply.fresh_ty();
        let c = supply.fresh_ty();
        let mut constraints = ConstraintSet::new();
        constraints.push_equal(
            a.clone(),
            Type::function(vec![b.clone()], c.clone()),
            Span::new(0, 0),
        );
        constraints.push_equal(b.clone(), Type::string(), Span::new(0, 0));
        let s = solve(&constraints, &mut supply).unwrap();
        for constraint in constraints.iter() {
            if let Constraint::Equal { left, right, .. } = constraint {
                assert_eq!(s.apply(left), s.apply(right));
            }
        }
    }

    #[test]
    fn test_solve_reports_conflict() {
        let mut supply = VarSupply::new();
        let a = supply.fresh_ty();
        let mut constraints = ConstraintSet::new();
        constraints.push_equal(a.clone(), Type::number(), Span::new(0, 0));
        constraints.push_equal(a, Type::string(), Span::new(0, 0));
        assert!(matches!(
            solve(&constraints, &mut supply),
            Err(TypeError::UnificationFailure { .. })
        ));
    }
}
