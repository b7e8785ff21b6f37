//! mathcall - evaluate a unary math function the way a cluster member would

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use mathcall::access::{DataType, Value, ValueRow};
use mathcall::executor::project_partitioned;
use mathcall::expression::{CallOperator, Expression, QueryContext};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Declared type of the operand column
#[derive(ValueEnum, Clone, Copy, Debug)]
enum OperandType {
    Tinyint,
    Smallint,
    Int,
    Bigint,
    Real,
    Double,
    Decimal,
    Varchar,
}

impl From<OperandType> for DataType {
    fn from(value: OperandType) -> Self {
        match value {
            OperandType::Tinyint => DataType::TinyInt,
            OperandType::Smallint => DataType::SmallInt,
            OperandType::Int => DataType::Int32,
            OperandType::Bigint => DataType::BigInt,
            OperandType::Real => DataType::Real,
            OperandType::Double => DataType::Double,
            OperandType::Decimal => DataType::Decimal,
            OperandType::Varchar => DataType::Varchar,
        }
    }
}

/// Evaluate COS, SIN, SQRT, LN, ... over one or more operand values
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Operator name (COS, SIN, TAN, COT, ACOS, ASIN, ATAN, SQRT, EXP, LN, LOG10)
    #[arg(short, long)]
    op: String,

    /// Operand values, one row each; NULL for an absent operand
    #[arg(required = true, allow_hyphen_values = true)]
    values: Vec<String>,

    /// Declared type of the operand
    #[arg(short = 't', long = "type", value_enum, default_value = "double")]
    operand_type: OperandType,

    /// Serialize the expression and evaluate the deserialized copy
    #[arg(short, long)]
    ship: bool,

    /// Number of worker threads
    #[arg(short, long, default_value = "1")]
    workers: usize,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn parse_value(raw: &str, data_type: DataType) -> Result<Value> {
    if raw.eq_ignore_ascii_case("null") {
        return Ok(Value::Null);
    }

    let value = match data_type {
        DataType::TinyInt => Value::TinyInt(raw.parse()?),
        DataType::SmallInt => Value::SmallInt(raw.parse()?),
        DataType::Int32 => Value::Int32(raw.parse()?),
        DataType::BigInt => Value::BigInt(raw.parse()?),
        DataType::Real => Value::Real(raw.parse()?),
        DataType::Double => Value::Double(raw.parse()?),
        DataType::Decimal => Value::Decimal(Decimal::from_str(raw)?),
        DataType::Varchar => Value::String(raw.to_string()),
        DataType::Boolean | DataType::Null => bail!("Unsupported operand type: {}", data_type),
    };
    Ok(value)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let op = CallOperator::from_name(&args.op)
        .with_context(|| format!("Unknown operator: {}", args.op))?;
    let data_type = DataType::from(args.operand_type);

    let rows = args
        .values
        .iter()
        .map(|raw| {
            parse_value(raw, data_type)
                .with_context(|| format!("Invalid {} value: {}", data_type, raw))
                .map(|value| ValueRow::new(vec![value]))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut expr = Expression::call(op, Expression::column_with_name(0, data_type, "x"));
    if args.ship {
        let bytes = expr.to_bytes().context("Failed to ship expression")?;
        log::info!("shipping {} as {} bytes", expr, bytes.len());
        expr = Expression::from_bytes(&bytes).context("Failed to read shipped expression")?;
    }

    let ctx = QueryContext::default();
    let exprs = [expr];
    let results = project_partitioned(&exprs, &ctx, &rows, args.workers)
        .with_context(|| format!("Failed to evaluate {}", exprs[0]))?;

    for (raw, row) in args.values.iter().zip(&results) {
        println!("{}({}) = {}", op.as_str(), raw, row.values()[0]);
    }

    Ok(())
}
