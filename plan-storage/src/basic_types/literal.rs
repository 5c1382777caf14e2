use std::num::NonZeroI32;
use std::num::NonZeroU32;

/// A boolean decision variable. Identifiers are 1-based so that they coincide with the DIMACS
/// numbering used by the solving engines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropositionalVariable {
    index: NonZeroU32,
}

impl PropositionalVariable {
    pub(crate) fn new(index: NonZeroU32) -> PropositionalVariable {
        crate::planner_assert_simple!(
            index.get() <= i32::MAX as u32,
            "Variable identifiers must fit in a DIMACS literal."
        );
        PropositionalVariable { index }
    }

    /// The 1-based identifier of this variable.
    pub fn index(&self) -> u32 {
        self.index.get()
    }
}

impl std::fmt::Display for PropositionalVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.index)
    }
}

/// A signed reference to a [`PropositionalVariable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    code: NonZeroI32,
}

impl Literal {
    pub fn new(propositional_variable: PropositionalVariable, is_positive: bool) -> Literal {
        let index = propositional_variable.index() as i32;
        let code = if is_positive { index } else { -index };

        Literal {
            code: NonZeroI32::new(code).expect("variable indices are non-zero"),
        }
    }

    pub fn is_positive(&self) -> bool {
        self.code.get() > 0
    }

    pub fn is_negative(&self) -> bool {
        self.code.get() < 0
    }

    pub fn get_propositional_variable(&self) -> PropositionalVariable {
        PropositionalVariable::new(self.code.unsigned_abs())
    }

    /// The signed integer form of this literal, e.g. `-3` for `~x3`.
    pub fn to_dimacs(self) -> i32 {
        self.code.get()
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal::new(self.get_propositional_variable(), !self.is_positive())
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_negative() {
            write!(f, "~{}", self.get_propositional_variable())
        } else {
            write!(f, "{}", self.get_propositional_variable())
        }
    }
}
