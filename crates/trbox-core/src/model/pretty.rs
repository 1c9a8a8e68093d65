//! Human-readable ASCII model formatting.

use crate::model::Model;
use crate::types::{Bounds, Constraint};

const FLOAT_EQ_EPSILON: f64 = 1e-12;
const PREVIEW_CONSTRAINTS: usize = 20;

/// Formatting controls for pretty-print output.
#[derive(Debug, Clone, Copy)]
pub struct PrettyPrintOptions {
    /// Maximum number of constraints to render.
    pub constraints: Option<usize>,
    /// Render deactivated constraints too.
    pub include_inactive: bool,
}

impl PrettyPrintOptions {
    /// Preview mode used by terse displays.
    pub fn preview() -> Self {
        Self {
            constraints: Some(PREVIEW_CONSTRAINTS),
            include_inactive: false,
        }
    }

    /// Full mode with no truncation.
    pub fn full() -> Self {
        Self {
            constraints: None,
            include_inactive: true,
        }
    }
}

struct ConstraintRenderLine {
    lhs: String,
    op: &'static str,
    rhs: String,
}

impl Model {
    /// Render the model to ASCII.
    pub fn format_ascii(&self, options: PrettyPrintOptions) -> String {
        let mut lines = Vec::new();
        if let Some(name) = self.name() {
            lines.push(format!("model {name}"));
        }
        lines.push(self.render_objective_line());
        lines.push(String::new());

        lines.push("s.t.".to_string());
        let shown: Vec<_> = self
            .constraints()
            .filter(|(_, con)| options.include_inactive || con.is_active)
            .collect();
        let total = shown.len();
        let limit = options.constraints.unwrap_or(total).min(total);

        if limit == 0 {
            lines.push(" (none)".to_string());
        } else {
            let rendered: Vec<ConstraintRenderLine> = shown
                .iter()
                .take(limit)
                .map(|(id, con)| {
                    let label = self
                        .get_constraint_name(*id)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("c{}", id.inner()));
                    self.render_constraint_line(&label, con)
                })
                .collect();
            let lhs_width = rendered.iter().map(|entry| entry.lhs.len()).max().unwrap_or(0);
            for entry in rendered {
                lines.push(format!(
                    " {:lhs_width$} {:>2} {}",
                    entry.lhs,
                    entry.op,
                    entry.rhs,
                    lhs_width = lhs_width
                ));
            }
        }
        if limit < total {
            lines.push(format!(" ... ({} more constraints)", total - limit));
        }

        let bounds_lines: Vec<String> = self
            .variables()
            .filter_map(|(id, var)| {
                let label = trbox_expr::NameResolver::variable_name(self, id);
                format_variable_bounds_line(&label, var.bounds)
            })
            .collect();
        if !bounds_lines.is_empty() {
            lines.push(String::new());
            lines.push("bounds".to_string());
            for line in bounds_lines {
                lines.push(format!(" {line}"));
            }
        }

        if self.num_external_functions() > 0 {
            lines.push(String::new());
            lines.push("external".to_string());
            for (_, function) in self.external_functions() {
                match function.arity() {
                    Some(arity) => lines.push(format!(" {}/{}", function.name(), arity)),
                    None => lines.push(format!(" {}", function.name())),
                }
            }
        }

        lines.join("\n")
    }

    fn render_objective_line(&self) -> String {
        let Some(sense) = self.objective.sense else {
            return "objective: (none)".to_string();
        };
        let prefix = match sense {
            crate::types::Sense::Minimize => "min",
            crate::types::Sense::Maximize => "max",
        };
        let body = self.objective.expr.render(self);
        match self.get_objective_name() {
            Some(name) => format!("{prefix} {name}: {body}"),
            None => format!("{prefix} {body}"),
        }
    }

    fn render_constraint_line(&self, label: &str, constraint: &Constraint) -> ConstraintRenderLine {
        let body = constraint.body.render(self);
        let lhs = format!("{label}: {body}");
        let Bounds { lower, upper } = constraint.bounds;
        if (lower - upper).abs() <= FLOAT_EQ_EPSILON {
            ConstraintRenderLine {
                lhs,
                op: "==",
                rhs: format_number(lower),
            }
        } else if lower.is_infinite() {
            ConstraintRenderLine {
                lhs,
                op: "<=",
                rhs: format_number(upper),
            }
        } else if upper.is_infinite() {
            ConstraintRenderLine {
                lhs,
                op: ">=",
                rhs: format_number(lower),
            }
        } else {
            ConstraintRenderLine {
                lhs: format!("{} <= {}", format_number(lower), lhs),
                op: "<=",
                rhs: format_number(upper),
            }
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_infinite() {
        if value.is_sign_positive() {
            "inf".to_string()
        } else {
            "-inf".to_string()
        }
    } else {
        format!("{value}")
    }
}

fn format_variable_bounds_line(label: &str, bounds: Bounds) -> Option<String> {
    match (bounds.lower.is_infinite(), bounds.upper.is_infinite()) {
        (true, true) => None,
        (false, true) => Some(format!("{label} >= {}", format_number(bounds.lower))),
        (true, false) => Some(format!("{label} <= {}", format_number(bounds.upper))),
        (false, false) => Some(format!(
            "{} <= {label} <= {}",
            format_number(bounds.lower),
            format_number(bounds.upper)
        )),
    }
}

#[cfg(test)]
mod tests {
    use trbox_expr::Expr;

    use super::PrettyPrintOptions;
    use crate::external::ExternalFunction;
    use crate::model::Model;
    use crate::types::Variable;

    fn sample() -> Model {
        let mut model = Model::named("demo");
        let x = model.add_named_variable("x", Variable::non_negative()).unwrap();
        let y = model.add_named_variable("y", Variable::reals()).unwrap();
        let f = model.add_external_function(ExternalFunction::new("bb", |a| a[0].sin()).with_arity(1));
        model.minimize(Expr::var(x) + Expr::var(y)).unwrap();
        let c1 = model
            .add_named_constraint("c1", (Expr::var(x) + Expr::call(f, [Expr::var(y)])).eq_scalar(2.0))
            .unwrap();
        model
            .add_named_constraint("c2", Expr::var(y).ge_scalar(-1.0))
            .unwrap();
        model.deactivate_constraint(c1).unwrap();
        model
    }

    #[test]
    fn renders_sections() {
        let text = sample().format_ascii(PrettyPrintOptions::full());
        assert!(text.starts_with("model demo\nmin x + y"));
        assert!(text.contains("c1: x + bb(y) == 2"));
        assert!(text.contains("c2: y"));
        assert!(text.contains(" x >= 0"));
        assert!(text.contains(" bb/1"));
    }

    #[test]
    fn preview_skips_inactive_constraints() {
        let text = sample().format_ascii(PrettyPrintOptions::preview());
        assert!(!text.contains("c1:"));
        assert!(text.contains("c2: y >= -1"));
    }

    #[test]
    fn truncates_constraints() {
        let options = PrettyPrintOptions {
            constraints: Some(1),
            include_inactive: true,
        };
        let text = sample().format_ascii(options);
        assert!(text.contains("(1 more constraints)"));
    }
}
