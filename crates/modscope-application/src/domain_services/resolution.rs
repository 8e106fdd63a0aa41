//! Override resolution for one registered name
//!
//! Both the live registration log and the static resolver feed candidates
//! into a [`Resolution`] in registration order; it keeps what the host
//! runtime would keep.

use modscope_domain::value_objects::ComponentDeclaration;

/// Accumulated declarations of one `(provider, name)` pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    declarations: Vec<ComponentDeclaration>,
}

impl Resolution {
    /// Empty resolution
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer the next candidate, in registration order
    ///
    /// Non-overriding providers accumulate every candidate. Overriding
    /// providers keep only the latest, except that a recorded constant is
    /// never replaced by a non-constant. Returns whether the candidate was
    /// kept.
    pub fn offer(&mut self, candidate: ComponentDeclaration, overrides: bool) -> bool {
        if !overrides {
            self.declarations.push(candidate);
            return true;
        }
        if let Some(current) = self.declarations.last()
            && current.is_constant()
            && !candidate.is_constant()
        {
            return false;
        }
        self.declarations.clear();
        self.declarations.push(candidate);
        true
    }

    /// The effective declaration: the last one kept
    pub fn winner(&self) -> Option<&ComponentDeclaration> {
        self.declarations.last()
    }

    /// Whether the effective declaration is a constant
    pub fn is_constant(&self) -> bool {
        self.winner().is_some_and(ComponentDeclaration::is_constant)
    }

    /// Every kept declaration, in registration order
    pub fn declarations(&self) -> &[ComponentDeclaration] {
        &self.declarations
    }

    /// Consume into the kept declarations
    pub fn into_declarations(self) -> Vec<ComponentDeclaration> {
        self.declarations
    }

    /// Number of kept declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether nothing was kept
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
