use trbox_expr::Expr;

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Domain a variable's value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Domain {
    #[default]
    Reals,
    NonNegativeReals,
    Integers,
    Binary,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Reals => "Reals",
            Domain::NonNegativeReals => "NonNegativeReals",
            Domain::Integers => "Integers",
            Domain::Binary => "Binary",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Domain::Integers | Domain::Binary)
    }

    /// Bounds implied by the domain alone.
    pub fn implied_bounds(self) -> Bounds {
        match self {
            Domain::Reals | Domain::Integers => Bounds::free(),
            Domain::NonNegativeReals => Bounds::new(0.0, f64::INFINITY),
            Domain::Binary => Bounds::new(0.0, 1.0),
        }
    }
}

/// Bounds for a variable or constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn free() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn fixed(value: f64) -> Self {
        Self::new(value, value)
    }

    pub fn is_equality(&self) -> bool {
        self.lower == self.upper
    }

    pub(crate) fn is_valid(&self) -> bool {
        !self.lower.is_nan() && !self.upper.is_nan() && self.lower <= self.upper
    }
}

/// A decision variable with bounds, domain and current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub bounds: Bounds,
    pub domain: Domain,
    /// Current value; `None` means unset.
    pub value: Option<f64>,
}

impl Variable {
    /// Unbounded real variable.
    pub fn reals() -> Self {
        Self::in_domain(Domain::Reals)
    }

    /// Real variable bounded below by zero.
    pub fn non_negative() -> Self {
        Self::in_domain(Domain::NonNegativeReals)
    }

    /// Create a binary variable with bounds [0, 1].
    pub fn binary() -> Self {
        Self::in_domain(Domain::Binary)
    }

    /// Create a continuous variable with specified bounds.
    pub fn continuous(bounds: Bounds) -> Self {
        Self {
            bounds,
            domain: Domain::Reals,
            value: None,
        }
    }

    /// Create an integer variable with specified bounds.
    pub fn integer(bounds: Bounds) -> Self {
        Self {
            bounds,
            domain: Domain::Integers,
            value: None,
        }
    }

    pub fn in_domain(domain: Domain) -> Self {
        Self {
            bounds: domain.implied_bounds(),
            domain,
            value: None,
        }
    }

    /// Same variable with an initial value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// A constraint `lower <= body <= upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub body: Expr,
    pub bounds: Bounds,
    pub is_active: bool,
}

impl Constraint {
    pub fn new(body: Expr, bounds: Bounds) -> Self {
        Self {
            body,
            bounds,
            is_active: true,
        }
    }
}

/// Objective function with a sense and an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub sense: Option<Sense>,
    pub expr: Expr,
}

impl Objective {
    /// Create a new empty objective
    pub fn new() -> Self {
        Self {
            sense: None,
            expr: Expr::constant(0.0),
        }
    }

    pub fn minimize(expr: Expr) -> Self {
        Self {
            sense: Some(Sense::Minimize),
            expr,
        }
    }

    pub fn maximize(expr: Expr) -> Self {
        Self {
            sense: Some(Sense::Maximize),
            expr,
        }
    }
}

impl Default for Objective {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn binary_variable_constructor() {
        let var = Variable::binary();
        assert_eq!(var.bounds.lower, 0.0);
        assert_eq!(var.bounds.upper, 1.0);
        assert!(var.domain.is_integer());
        assert!(var.value.is_none());
    }

    #[test]
    fn non_negative_reals_bound_below() {
        let var = Variable::non_negative();
        assert_eq!(var.bounds.lower, 0.0);
        assert!(var.bounds.upper.is_infinite());
        assert!(!var.domain.is_integer());
    }

    #[test]
    fn with_value_sets_initial_point() {
        let var = Variable::reals().with_value(2.0);
        assert_eq!(var.value, Some(2.0));
    }

    #[test]
    fn bounds_validity() {
        assert!(Bounds::free().is_valid());
        assert!(Bounds::fixed(1.0).is_equality());
        assert!(!Bounds::new(1.0, 0.0).is_valid());
        assert!(!Bounds::new(f64::NAN, 0.0).is_valid());
    }
}
