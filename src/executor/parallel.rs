//! Partitioned evaluation of one expression tree on several worker threads.

use crate::access::ValueRow;
use crate::executor::projection::project_row;
use crate::expression::{Expression, ExpressionResult, QueryContext};
use std::thread;

/// Evaluate `exprs` over `rows`, split into contiguous partitions.
///
/// Every worker shares the same expression instances, so an accessor resolved
/// by one worker is seen by all. Output order matches input order. The first
/// failing partition (in partition order) decides the error.
pub fn project_partitioned(
    exprs: &[Expression],
    ctx: &QueryContext,
    rows: &[ValueRow],
    workers: usize,
) -> ExpressionResult<Vec<ValueRow>> {
    let workers = workers.max(1);
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = rows.len().div_ceil(workers);
    log::debug!(
        "evaluating {} rows in {} partitions of up to {} rows",
        rows.len(),
        rows.len().div_ceil(chunk_size),
        chunk_size
    );

    let partitions: Vec<ExpressionResult<Vec<ValueRow>>> = thread::scope(|scope| {
        let handles: Vec<_> = rows
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|row| project_row(exprs, ctx, row))
                        .collect::<ExpressionResult<Vec<ValueRow>>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut output = Vec::with_capacity(rows.len());
    for partition in partitions {
        output.extend(partition?);
    }
    Ok(output)
}
