use super::types::{TyVarId, Type};

/// Monotonic supply of fresh type-variable identifiers.
///
/// One supply belongs to one inference run; the order in which the
/// generator requests variables determines the numeric labels visible
/// in pretty-printed types.
#[derive(Debug, Default)]
pub struct VarSupply {
    next: u32,
}

impl VarSupply {
    pub fn new() -> Self {
        VarSupply::default()
    }

    /// Return the current identifier and advance the counter.
    pub fn fresh(&mut self) -> TyVarId {
        let id = TyVarId(self.next);
        self.next += 1;
        id
    }

    pub fn fresh_ty(&mut self) -> Type {
        Type::Var(self.fresh())
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}
