//! Operator catalog for unary double functions.

/// Scalar operators that take one numeric operand and return a double.
///
/// The discriminant is the operator's wire code. Codes are append-only:
/// never renumber an existing operator, only add new ones at the end.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallOperator {
    // Trigonometric
    Cos = 1,
    Sin = 2,
    Tan = 3,
    Cot = 4,

    // Inverse trigonometric
    Acos = 5,
    Asin = 6,
    Atan = 7,

    // Roots, exponent and logarithms
    Sqrt = 8,
    Exp = 9,
    Ln = 10,
    Log10 = 11,
}

impl CallOperator {
    /// Every operator, in code order
    pub const ALL: [CallOperator; 11] = [
        CallOperator::Cos,
        CallOperator::Sin,
        CallOperator::Tan,
        CallOperator::Cot,
        CallOperator::Acos,
        CallOperator::Asin,
        CallOperator::Atan,
        CallOperator::Sqrt,
        CallOperator::Exp,
        CallOperator::Ln,
        CallOperator::Log10,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }

    /// Look up an operator by SQL name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(name))
    }

    /// The function this operator applies.
    ///
    /// Out-of-domain input follows IEEE-754: `ACOS(2)` and `LN(-1)` are NaN,
    /// `COT(0)` is infinite.
    pub fn function(self) -> fn(f64) -> f64 {
        match self {
            CallOperator::Cos => f64::cos,
            CallOperator::Sin => f64::sin,
            CallOperator::Tan => f64::tan,
            CallOperator::Cot => |x: f64| 1.0 / x.tan(),
            CallOperator::Acos => f64::acos,
            CallOperator::Asin => f64::asin,
            CallOperator::Atan => f64::atan,
            CallOperator::Sqrt => f64::sqrt,
            CallOperator::Exp => f64::exp,
            CallOperator::Ln => f64::ln,
            CallOperator::Log10 => f64::log10,
        }
    }

    pub fn apply(self, operand: f64) -> f64 {
        (self.function())(operand)
    }

    /// Get the display string for this operator
    pub fn as_str(self) -> &'static str {
        match self {
            CallOperator::Cos => "COS",
            CallOperator::Sin => "SIN",
            CallOperator::Tan => "TAN",
            CallOperator::Cot => "COT",
            CallOperator::Acos => "ACOS",
            CallOperator::Asin => "ASIN",
            CallOperator::Atan => "ATAN",
            CallOperator::Sqrt => "SQRT",
            CallOperator::Exp => "EXP",
            CallOperator::Ln => "LN",
            CallOperator::Log10 => "LOG10",
        }
    }
}
