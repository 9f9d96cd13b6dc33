/// A record of how a condition was evaluated, including the observed inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationTrace {
    BinaryOp {
        op_symbol: &'static str,
        left: Box<EvaluationTrace>,
        right: Box<EvaluationTrace>,
        outcome: bool,
    },
    Leaf {
        /// The predicate as written in the recipe, e.g. `^libfuse@:2.9.99`.
        source: String,
        /// What the configuration supplied for it, if anything.
        observed: Option<String>,
        outcome: bool,
    },
    NotEvaluated,
}

impl EvaluationTrace {
    pub fn get_outcome(&self) -> bool {
        match self {
            EvaluationTrace::BinaryOp { outcome, .. }
            | EvaluationTrace::Leaf { outcome, .. } => *outcome,
            EvaluationTrace::NotEvaluated => false,
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            EvaluationTrace::BinaryOp { op_symbol, .. } => match *op_symbol {
                "AND" => 2,
                _ => 0,
            },
            EvaluationTrace::Leaf { .. } | EvaluationTrace::NotEvaluated => 9,
        }
    }
}
