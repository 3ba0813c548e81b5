use std::collections::HashMap;

use crate::interner::Symbol;

use super::types::{Scheme, TyVarId, Type};

/// A finite map from type-variable identifiers to types.
///
/// Application chases transitive bindings, so callers never observe a
/// variable that the substitution has already eliminated. Composition
/// keeps the map idempotent: no variable in the domain appears in the
/// codomain afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subst {
    map: HashMap<TyVarId, Type>,
}

impl Subst {
    pub fn empty() -> Self {
        Subst::default()
    }

    pub fn singleton(var: TyVarId, ty: Type) -> Self {
        let mut map = HashMap::new();
        map.insert(var, ty);
        Subst { map }
    }

    pub fn insert(&mut self, var: TyVarId, ty: Type) {
        self.map.insert(var, ty);
    }

    pub fn get(&self, var: TyVarId) -> Option<&Type> {
        self.map.get(&var)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TyVarId, &Type)> {
        self.map.iter()
    }

    /// Apply this substitution to a type.
    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Var(v) => match self.map.get(v) {
                Some(bound) => self.apply(bound),
                None => ty.clone(),
            },
            Type::Named(name, args) => {
                Type::Named(*name, args.iter().map(|a| self.apply(a)).collect())
            }
            Type::Function(params, ret) => Type::Function(
                params.iter().map(|p| self.apply(p)).collect(),
                Box::new(self.apply(ret)),
            ),
            Type::Record(fields, row) => self.apply_record(fields, *row),
            Type::Union(items) => Type::Union(items.iter().map(|i| self.apply(i)).collect()),
            Type::Intersection(items) => {
                Type::Intersection(items.iter().map(|i| self.apply(i)).collect())
            }
            Type::Literal(_, _) => ty.clone(),
        }
    }

    /// Apply to a record: a bound row variable resolves to another record
    /// whose fields are absorbed and whose tail becomes the new row.
    fn apply_record(&self, fields: &[(Symbol, Type)], row: Option<TyVarId>) -> Type {
        let mut out: Vec<(Symbol, Type)> = fields
            .iter()
            .map(|(name, ty)| (*name, self.apply(ty)))
            .collect();
        let Some(row) = row else {
            return Type::Record(out, None);
        };
        let Some(bound) = self.map.get(&row) else {
            return Type::Record(out, Some(row));
        };
        match self.apply(bound) {
            Type::Record(more, tail) => {
                for (name, ty) in more {
                    if !out.iter().any(|(existing, _)| *existing == name) {
                        out.push((name, ty));
                    }
                }
                Type::Record(out, tail)
            }
            Type::Var(v) => Type::Record(out, Some(v)),
            // Row variables only ever unify with records or variables.
            _ => Type::Record(out, Some(row)),
        }
    }

    /// Apply to a scheme, leaving quantified variables untouched.
    pub fn apply_scheme(&self, scheme: &Scheme) -> Scheme {
        if scheme.vars.is_empty() {
            return Scheme::mono(self.apply(&scheme.ty));
        }
        let mut trimmed = self.clone();
        for var in &scheme.vars {
            trimmed.map.remove(var);
        }
        Scheme {
            vars: scheme.vars.clone(),
            ty: trimmed.apply(&scheme.ty),
        }
    }

    /// Composition `self ∘ other`: applying the result is the same as
    /// applying `other` first and `self` second.
    pub fn compose(&self, other: &Subst) -> Subst {
        let mut map = HashMap::with_capacity(self.map.len() + other.map.len());
        for (&var, ty) in &other.map {
            map.insert(var, self.apply(ty));
        }
        for (&var, ty) in &self.map {
            map.entry(var).or_insert_with(|| ty.clone());
        }
        Subst { map }
    }
}
