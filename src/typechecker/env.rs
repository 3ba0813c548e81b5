use std::collections::HashMap;

use crate::interner::Symbol;

use super::subst::Subst;
use super::supply::VarSupply;
use super::types::{Scheme, TyVarId, Type};

/// Type environment: maps identifier names to their type schemes.
/// Environments are values; nested scopes use the `child()` clone pattern.
#[derive(Debug, Clone, Default)]
pub struct TypeEnv {
    bindings: HashMap<Symbol, Scheme>,
}

impl TypeEnv {
    pub fn new() -> Self {
        TypeEnv::default()
    }

    /// Environment seeded with the built-in types.
    pub fn with_builtins() -> Self {
        let mut env = TypeEnv::new();
        for name in ["Number", "String", "Boolean", "Any", "Nothing"] {
            let sym = crate::interner::intern(name);
            env.insert_mono(sym, Type::Named(sym, Vec::new()));
        }
        env
    }

    /// Look up a name and instantiate its scheme: each quantified variable
    /// is replaced by a fresh one. Monotypes come back unchanged.
    pub fn lookup(&self, name: Symbol, supply: &mut VarSupply) -> Option<Type> {
        let scheme = self.bindings.get(&name)?;
        if scheme.vars.is_empty() {
            return Some(scheme.ty.clone());
        }
        let mut subst = Subst::empty();
        for &var in &scheme.vars {
            subst.insert(var, supply.fresh_ty());
        }
        Some(subst.apply(&scheme.ty))
    }

    /// Look up the raw scheme without instantiating.
    pub fn lookup_scheme(&self, name: Symbol) -> Option<&Scheme> {
        self.bindings.get(&name)
    }

    /// Insert a monomorphic binding (no quantified variables).
    pub fn insert_mono(&mut self, name: Symbol, ty: Type) {
        self.bindings.insert(name, Scheme::mono(ty));
    }

    /// Insert a polymorphic binding.
    pub fn insert_scheme(&mut self, name: Symbol, scheme: Scheme) {
        self.bindings.insert(name, scheme);
    }

    /// Create a child scope (clone for entering a lambda/const/match body).
    pub fn child(&self) -> TypeEnv {
        self.clone()
    }

    /// Free variables across all bindings in the environment.
    pub fn free_vars(&self) -> Vec<TyVarId> {
        self.free_vars_filtered(None)
    }

    fn free_vars_filtered(&self, exclude: Option<Symbol>) -> Vec<TyVarId> {
        let mut vars = Vec::new();
        for (name, scheme) in &self.bindings {
            if exclude == Some(*name) {
                continue;
            }
            for var in scheme.free_vars() {
                if !vars.contains(&var) {
                    vars.push(var);
                }
            }
        }
        vars
    }

    /// Generalize a type: quantify exactly the variables free in `ty`
    /// but not free in the environment.
    pub fn generalize(&self, ty: &Type) -> Scheme {
        self.generalize_filtered(ty, None)
    }

    /// Generalize a binding's type, ignoring the free variables contributed
    /// by that name's own entry. The placeholder for a binding being checked
    /// must not pin down its own type variables.
    pub fn generalize_excluding(&self, ty: &Type, exclude: Symbol) -> Scheme {
        self.generalize_filtered(ty, Some(exclude))
    }

    fn generalize_filtered(&self, ty: &Type, exclude: Option<Symbol>) -> Scheme {
        let env_vars = self.free_vars_filtered(exclude);
        let vars: Vec<TyVarId> = ty
            .free_vars()
            .into_iter()
            .filter(|v| !env_vars.contains(v))
            .collect();
        Scheme {
            vars,
            ty: ty.clone(),
        }
    }

    /// Apply a substitution to every scheme, producing a new environment.
    pub fn apply_subst(&self, subst: &Subst) -> TypeEnv {
        TypeEnv {
            bindings: self
                .bindings
                .iter()
                .map(|(name, scheme)| (*name, subst.apply_scheme(scheme)))
                .collect(),
        }
    }
}
