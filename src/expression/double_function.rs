//! Unary math functions returning a double.

use crate::access::{DataType, NumericAccessor, Row, Value};
use crate::expression::unary::UniCall;
use crate::expression::{
    CallOperator, Evaluate, Expression, ExpressionError, ExpressionResult, QueryContext,
};
use crate::wire::{self, DataInput, DataOutput, DataSerializable};
use once_cell::sync::OnceCell;

/// Function of a single numeric operand which returns a double.
///
/// The operand's accessor is resolved from its declared type at most once per
/// instance, either by [`DoubleFunction::bind`] or by the first evaluated row
/// whose operand is not null. The cached accessor takes no part in equality
/// and is never serialized.
#[derive(Debug, Clone)]
pub struct DoubleFunction<E = Expression> {
    call: UniCall<E>,
    /// Raw operator code as carried on the wire
    code: i32,
    /// `None` for codes outside the catalog, which fail at evaluation
    operator: Option<CallOperator>,
    accessor: OnceCell<NumericAccessor>,
}

impl<E> DoubleFunction<E> {
    pub fn new(operand: E, operator: CallOperator) -> Self {
        Self::with_code(operand, operator.code())
    }

    /// Build from a raw operator code as carried on the wire
    pub fn with_code(operand: E, operator: i32) -> Self {
        Self::from_parts(UniCall::new(operand), operator)
    }

    fn from_parts(call: UniCall<E>, code: i32) -> Self {
        Self {
            call,
            code,
            operator: CallOperator::from_code(code),
            accessor: OnceCell::new(),
        }
    }

    pub fn operand(&self) -> &E {
        self.call.operand()
    }

    pub fn operator_code(&self) -> i32 {
        self.code
    }

    pub fn operator(&self) -> Option<CallOperator> {
        self.operator
    }

    /// The cached operand accessor, if it has been resolved
    pub fn resolved_accessor(&self) -> Option<NumericAccessor> {
        self.accessor.get().copied()
    }
}

impl<E: Evaluate> DoubleFunction<E> {
    /// Resolve and cache the operand accessor.
    ///
    /// Concurrent callers block until the first resolution finishes and then
    /// share its result. A failed resolution leaves the cache empty.
    pub fn bind(&self) -> ExpressionResult<NumericAccessor> {
        self.accessor
            .get_or_try_init(|| -> ExpressionResult<NumericAccessor> {
                let data_type = self.call.operand_type();
                let accessor = data_type.numeric_accessor().inspect_err(|_| {
                    log::debug!("rejecting non-numeric {} operand", data_type);
                })?;
                log::debug!("resolved {:?} accessor for {} operand", accessor, data_type);
                Ok(accessor)
            })
            .copied()
    }
}

impl<E: Evaluate> Evaluate for DoubleFunction<E> {
    fn eval(&self, ctx: &QueryContext, row: &dyn Row) -> ExpressionResult<Value> {
        let res = self.call.eval_operand(ctx, row)?;

        if res.is_null() {
            return Ok(Value::Null);
        }

        let accessor = self.bind()?;
        let operand = accessor.as_double(&res)?;

        let op = self
            .operator
            .ok_or(ExpressionError::UnsupportedOperator { code: self.code })?;

        Ok(Value::Double(op.apply(operand)))
    }

    fn data_type(&self) -> DataType {
        DataType::Double
    }
}

impl<E: PartialEq> PartialEq for DoubleFunction<E> {
    fn eq(&self, other: &Self) -> bool {
        self.call == other.call && self.code == other.code
    }
}

impl<E: DataSerializable> DataSerializable for DoubleFunction<E> {
    fn write_data(&self, out: &mut DataOutput) -> wire::Result<()> {
        self.call.write_data(out)?;
        out.write_i32(self.code);
        Ok(())
    }

    fn read_data(input: &mut DataInput<'_>) -> wire::Result<Self> {
        let call = UniCall::read_data(input)?;
        let func = Self::from_parts(call, input.read_i32()?);
        if func.operator.is_none() {
            log::warn!("read double function with unknown operator code {}", func.code);
        }
        Ok(func)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::ValueRow;
    use std::f64::consts::FRAC_PI_2;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    /// Operand that counts how often its declared type is looked up
    #[derive(Debug)]
    struct CountingOperand {
        value: Value,
        data_type: DataType,
        type_lookups: AtomicUsize,
    }

    impl CountingOperand {
        fn new(value: Value, data_type: DataType) -> Self {
            Self {
                value,
                data_type,
                type_lookups: AtomicUsize::new(0),
            }
        }

        fn lookups(&self) -> usize {
            self.type_lookups.load(Ordering::SeqCst)
        }
    }

    impl Evaluate for CountingOperand {
        fn eval(&self, _ctx: &QueryContext, _row: &dyn Row) -> ExpressionResult<Value> {
            Ok(self.value.clone())
        }

        fn data_type(&self) -> DataType {
            self.type_lookups.fetch_add(1, Ordering::SeqCst);
            self.data_type
        }
    }

    impl DataSerializable for CountingOperand {
        fn write_data(&self, out: &mut DataOutput) -> wire::Result<()> {
            out.write_data_type(self.data_type);
            out.write_value(&self.value, self.data_type)
        }

        fn read_data(input: &mut DataInput<'_>) -> wire::Result<Self> {
            let data_type = input.read_data_type()?;
            let value = input.read_value(data_type)?;
            Ok(Self::new(value, data_type))
        }
    }

    fn eval_literal(op: CallOperator, value: Value) -> ExpressionResult<Value> {
        DoubleFunction::new(Expression::literal(value), op)
            .eval(&QueryContext::default(), &ValueRow::empty())
    }

    fn as_f64(value: Value) -> f64 {
        match value {
            Value::Double(v) => v,
            other => panic!("expected a double, got {:?}", other),
        }
    }

    #[test]
    fn test_concrete_scenarios() {
        assert_eq!(
            eval_literal(CallOperator::Sqrt, Value::Double(0.0)),
            Ok(Value::Double(0.0))
        );

        let ln = as_f64(eval_literal(CallOperator::Ln, Value::Double(-1.0)).unwrap());
        assert!(ln.is_nan());

        let sin = as_f64(eval_literal(CallOperator::Sin, Value::Double(FRAC_PI_2)).unwrap());
        assert!((sin - 1.0).abs() < 1e-15);

        let cos_null = DoubleFunction::new(
            Expression::typed_literal(Value::Null, DataType::Double).unwrap(),
            CallOperator::Cos,
        );
        assert_eq!(
            cos_null.eval(&QueryContext::default(), &ValueRow::empty()),
            Ok(Value::Null)
        );
    }

    #[test]
    fn test_matches_reference_functions() {
        let x: f64 = 0.7;
        for op in CallOperator::ALL {
            let expected = match op {
                CallOperator::Cos => x.cos(),
                CallOperator::Sin => x.sin(),
                CallOperator::Tan => x.tan(),
                CallOperator::Cot => 1.0 / x.tan(),
                CallOperator::Acos => x.acos(),
                CallOperator::Asin => x.asin(),
                CallOperator::Atan => x.atan(),
                CallOperator::Sqrt => x.sqrt(),
                CallOperator::Exp => x.exp(),
                CallOperator::Ln => x.ln(),
                CallOperator::Log10 => x.log10(),
            };
            let actual = as_f64(eval_literal(op, Value::Double(x)).unwrap());
            assert_eq!(actual.to_bits(), expected.to_bits(), "{}", op.as_str());
        }
    }

    #[test]
    fn test_integral_and_decimal_operands() {
        assert_eq!(
            eval_literal(CallOperator::Sqrt, Value::Int32(16)),
            Ok(Value::Double(4.0))
        );
        assert_eq!(
            eval_literal(CallOperator::Exp, Value::TinyInt(0)),
            Ok(Value::Double(1.0))
        );
        assert_eq!(
            eval_literal(CallOperator::Sqrt, Value::Decimal(rust_decimal::Decimal::from(9))),
            Ok(Value::Double(3.0))
        );
        assert_eq!(
            eval_literal(CallOperator::Sqrt, Value::Real(6.25)),
            Ok(Value::Double(2.5))
        );
    }

    #[test]
    fn test_null_propagates_for_every_operator() {
        let row = ValueRow::new(vec![Value::Null]);
        for op in CallOperator::ALL {
            let func = DoubleFunction::new(Expression::column(0, DataType::Double), op);
            assert_eq!(func.eval(&QueryContext::default(), &row), Ok(Value::Null));
            assert!(func.resolved_accessor().is_none());
        }
    }

    #[test]
    fn test_null_skips_type_resolution() {
        // a null row must not trip the type check
        let operand = CountingOperand::new(Value::Null, DataType::Varchar);
        let func = DoubleFunction::new(operand, CallOperator::Exp);

        assert_eq!(
            func.eval(&QueryContext::default(), &ValueRow::empty()),
            Ok(Value::Null)
        );
        assert_eq!(func.operand().lookups(), 0);
    }

    #[test]
    fn test_accessor_resolved_once() {
        let func = DoubleFunction::new(Expression::column(0, DataType::BigInt), CallOperator::Ln);
        assert!(func.resolved_accessor().is_none());

        let ctx = QueryContext::default();
        let mut results = Vec::new();
        for i in 1..=5 {
            let row = ValueRow::new(vec![Value::BigInt(i)]);
            results.push(func.eval(&ctx, &row).unwrap());
        }
        assert_eq!(results[0], Value::Double(0.0));
        assert_eq!(func.resolved_accessor(), Some(NumericAccessor::BigInt));

        let operand = CountingOperand::new(Value::Double(2.0), DataType::Double);
        let func = DoubleFunction::new(operand, CallOperator::Sqrt);
        for _ in 0..10 {
            func.eval(&ctx, &ValueRow::empty()).unwrap();
        }
        assert_eq!(func.operand().lookups(), 1);
    }

    #[test]
    fn test_concurrent_first_calls_resolve_once() {
        let operand = CountingOperand::new(Value::SmallInt(4), DataType::SmallInt);
        let func = Arc::new(DoubleFunction::new(operand, CallOperator::Sqrt));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let func = func.clone();
                thread::spawn(move || {
                    func.eval(&QueryContext::default(), &ValueRow::empty())
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Value::Double(2.0));
        }
        assert_eq!(func.operand().lookups(), 1);
        assert_eq!(func.resolved_accessor(), Some(NumericAccessor::SmallInt));
    }

    #[test]
    fn test_non_numeric_operand_rejected() {
        let operand = Expression::literal(Value::String("abc".to_string()));
        let func = DoubleFunction::new(operand, CallOperator::Sqrt);

        assert_eq!(
            func.eval(&QueryContext::default(), &ValueRow::empty()),
            Err(ExpressionError::OperandNotNumeric {
                data_type: DataType::Varchar
            })
        );
        assert!(func.resolved_accessor().is_none());
    }

    #[test]
    fn test_type_error_precedes_unknown_operator() {
        let operand = Expression::literal(Value::Boolean(true));
        let func = DoubleFunction::with_code(operand, 500);

        assert!(matches!(
            func.eval(&QueryContext::default(), &ValueRow::empty()),
            Err(ExpressionError::OperandNotNumeric { .. })
        ));
    }

    #[test]
    fn test_operator_resolved_at_construction() {
        for op in CallOperator::ALL {
            let func = DoubleFunction::with_code(Expression::literal(Value::Double(0.5)), op.code());
            assert_eq!(func.operator(), Some(op));
            assert_eq!(func.operator_code(), op.code());
        }
    }

    #[test]
    fn test_unknown_operator() {
        let func = DoubleFunction::with_code(Expression::literal(Value::Double(1.0)), 500);
        assert_eq!(func.operator(), None);
        assert_eq!(
            func.eval(&QueryContext::default(), &ValueRow::empty()),
            Err(ExpressionError::UnsupportedOperator { code: 500 })
        );
    }

    #[test]
    fn test_row_disagreeing_with_declared_type() {
        let func = DoubleFunction::new(Expression::column(0, DataType::Int32), CallOperator::Cos);
        let row = ValueRow::new(vec![Value::Double(1.0)]);
        assert!(matches!(
            func.eval(&QueryContext::default(), &row),
            Err(ExpressionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_equality_ignores_cache() {
        let resolved = DoubleFunction::new(Expression::literal(Value::Int32(1)), CallOperator::Tan);
        resolved.bind().unwrap();
        let fresh = DoubleFunction::new(Expression::literal(Value::Int32(1)), CallOperator::Tan);

        assert!(resolved.resolved_accessor().is_some());
        assert!(fresh.resolved_accessor().is_none());
        assert_eq!(resolved, fresh);
        assert_ne!(
            resolved,
            DoubleFunction::new(Expression::literal(Value::Int32(1)), CallOperator::Cot)
        );
    }

    #[test]
    fn test_read_back_starts_unresolved() {
        let func = DoubleFunction::new(Expression::column(0, DataType::Int32), CallOperator::Atan);
        let row = ValueRow::new(vec![Value::Int32(3)]);
        let ctx = QueryContext::default();
        let before = func.eval(&ctx, &row).unwrap();
        assert!(func.resolved_accessor().is_some());

        let mut out = DataOutput::new();
        func.write_data(&mut out).unwrap();
        let bytes = out.into_bytes();

        let mut input = DataInput::new(&bytes);
        let read: DoubleFunction = DoubleFunction::read_data(&mut input).unwrap();
        assert_eq!(input.remaining(), 0);
        assert!(read.resolved_accessor().is_none());
        assert_eq!(read.operator(), Some(CallOperator::Atan));
        assert_eq!(read, func);
        assert_eq!(read.eval(&ctx, &row).unwrap(), before);
    }

    #[test]
    fn test_unknown_operator_survives_the_wire() {
        let func = DoubleFunction::with_code(Expression::literal(Value::Double(1.0)), -7);
        let mut out = DataOutput::new();
        func.write_data(&mut out).unwrap();
        let bytes = out.into_bytes();

        let read: DoubleFunction = DoubleFunction::read_data(&mut DataInput::new(&bytes)).unwrap();
        assert_eq!(read.operator_code(), -7);
        assert_eq!(
            read.eval(&QueryContext::default(), &ValueRow::empty()),
            Err(ExpressionError::UnsupportedOperator { code: -7 })
        );
    }
}
