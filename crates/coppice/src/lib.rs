//! # Coppice
//!
//! A minimal-copy rewriting engine for immutable expression trees.
//!
//! Coppice walks a tree of typed expression nodes (arithmetic, comparisons,
//! member access, method calls, lambdas, object and collection construction)
//! and produces a possibly-transformed tree. Concrete rewriters override the
//! per-variant handlers they care about; the default handlers recurse into
//! children and rebuild a node only when a child actually changed, detected
//! by handle identity. Untouched subtrees are shared between input and
//! output, never copied. This is the classic shape of a query-translation
//! layer that rewrites an expression tree before handing it to a backend.
//!
//! ## Example
//!
//! ```
//! use coppice::{BinaryOp, ConstValue, ConstantExpr, Expr, ExprRef, Result, Rewriter, Ty};
//! use std::sync::Arc;
//!
//! // Fold every integer constant to zero.
//! struct Zero;
//! impl Rewriter for Zero {
//!     fn rewrite_constant(&mut self, expr: &ExprRef, node: &ConstantExpr) -> Result<ExprRef> {
//!         match node.value {
//!             ConstValue::Int(_) => Ok(Expr::constant(ConstValue::Int(0), node.ty.clone())),
//!             _ => Ok(expr.clone()),
//!         }
//!     }
//! }
//!
//! let ty = Ty::new("Int32");
//! let tree = Expr::binary(
//!     BinaryOp::Add,
//!     Expr::constant(ConstValue::Int(1), ty.clone()),
//!     Expr::parameter("x", ty.clone()),
//!     ty.clone(),
//! );
//! let out = Zero.rewrite(&tree).unwrap();
//! assert!(!Arc::ptr_eq(&out, &tree));
//!
//! // The untouched parameter subtree is shared, not copied.
//! let (Expr::Binary(before), Expr::Binary(after)) = (tree.as_ref(), out.as_ref()) else {
//!     unreachable!()
//! };
//! assert!(Arc::ptr_eq(&before.right, &after.right));
//! ```
//!
//! The engine never executes, optimizes, or type-checks a tree; it only
//! walks and rebuilds it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod queue;
pub mod rewrite;
pub mod tree;

// Re-export main types
pub use error::{Result, RewriteError};
pub use queue::ByteQueue;
pub use rewrite::{rewrite_items, Rewriter};
pub use tree::{
    ArrayForm, AssignmentBinding, BinaryExpr, BinaryOp, Binding, BindingRef, ConditionalExpr,
    ConstValue, ConstantExpr, Constructor, ElementInit, ElementInitRef, Expr, ExprRef,
    ExtensionNode, InvokeExpr, LambdaExpr, ListBinding, ListInitExpr, Member, MemberAccessExpr,
    MemberBinding, MemberInitExpr, Method, MethodCallExpr, NewArrayExpr, NewExpr, NewRef,
    ParameterExpr, Ty, TypeTestExpr, UnaryExpr, UnaryOp,
};

/// Coppice version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
