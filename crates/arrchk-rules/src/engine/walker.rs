use arrchk_core::model::{ArrayAccess, BasicBlock, Expr};

/// Visits every expression of every statement exactly once, pre-order and
/// left to right, block by block.
pub fn walk_expressions<'a>(blocks: &'a [BasicBlock], mut visit: impl FnMut(&'a Expr)) {
    let mut stack = Vec::<&'a Expr>::new();
    for statement in blocks.iter().flat_map(|block| &block.statements) {
        stack.extend(statement.operands.iter().rev());
        while let Some(expr) = stack.pop() {
            visit(expr);
            stack.extend(expr.children().rev());
        }
    }
}

/// Array accesses in walk order, nested ones included.
pub fn walk_array_accesses<'a>(blocks: &'a [BasicBlock], mut visit: impl FnMut(&'a ArrayAccess)) {
    walk_expressions(blocks, |expr| {
        if let Expr::ArrayAccess(access) = expr {
            visit(access);
        }
    });
}
