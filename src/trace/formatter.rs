use crate::ast::EvaluationTrace;

/// Formats evaluation traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format an evaluation trace into a human-readable explanation.
    pub fn format_trace(trace: &EvaluationTrace) -> String {
        // Start the recursive formatting with the lowest possible parent precedence.
        Self::format_recursive(trace, 0)
    }

    /// Recursively formats the trace, adding parentheses only when necessary.
    fn format_recursive(trace: &EvaluationTrace, parent_precedence: u8) -> String {
        let current_precedence = trace.precedence();
        let needs_parens = current_precedence < parent_precedence;

        let mut result = String::new();
        if needs_parens {
            result.push('(');
        }

        match trace {
            EvaluationTrace::BinaryOp {
                op_symbol,
                left,
                right,
                ..
            } => {
                let left_str = Self::format_recursive(left, current_precedence);

                // Short-circuited operators only show the side that decided the result.
                if !matches!(**right, EvaluationTrace::NotEvaluated) {
                    let right_str = Self::format_recursive(right, current_precedence);
                    result.push_str(&format!("{} {} {}", left_str, op_symbol, right_str));
                } else {
                    result.push_str(&left_str);
                }
            }
            EvaluationTrace::Leaf {
                source, observed, ..
            } => match observed {
                Some(value) => result.push_str(&format!("{} (was {})", source, value)),
                None => result.push_str(source),
            },
            EvaluationTrace::NotEvaluated => {}
        }

        if needs_parens {
            result.push(')');
        }
        result
    }
}
