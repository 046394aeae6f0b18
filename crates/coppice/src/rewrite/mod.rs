//! The rewriting engine: recursive descent with minimal-copy rebuilds.
//!
//! [`Rewriter`] walks an [`Expr`] tree and produces a tree that is either the
//! identical input handle (when no handler changed anything underneath) or a
//! fresh node embedding the visited children. Change detection is handle
//! identity (`Arc::ptr_eq`), never structural equality: a handler that
//! returns a distinct-but-equal node still counts as a change and forces the
//! ancestor chain to rebuild, which is exactly the structural-sharing
//! contract.
//!
//! A concrete rewriter overrides the per-variant methods it cares about and
//! inherits traversal for everything else, so one rule never has to
//! re-implement the walk. Every default method delegates to a free `walk_*`
//! function; an override that wants the default traversal before or after
//! its own logic calls the matching `walk_*` itself.
//!
//! Traversal is plain recursion: stack use grows with tree depth, and a
//! pathologically deep tree can overflow the thread stack. Producers of such
//! trees should rewrite on a thread with an appropriately sized stack.

pub mod lists;

pub use lists::rewrite_items;

use std::sync::Arc;

use crate::error::{Result, RewriteError};
use crate::tree::{
    AssignmentBinding, BinaryExpr, Binding, BindingRef, ConditionalExpr, ConstantExpr,
    ElementInit, ElementInitRef, Expr, ExprRef, InvokeExpr, LambdaExpr, ListBinding, ListInitExpr,
    MemberAccessExpr, MemberBinding, MemberInitExpr, MethodCallExpr, NewArrayExpr, NewExpr,
    NewRef, ParameterExpr, TypeTestExpr, UnaryExpr,
};

/// Recursive tree rewriter with overridable per-variant handlers.
///
/// The default implementation of every method rebuilds a node only when at
/// least one visited child came back as a different handle; otherwise it
/// returns the input handle itself, so an untouched subtree is shared, not
/// copied. Non-node payload (operators, types, member and method tokens,
/// flags) is always copied verbatim from the original.
///
/// The engine holds no state of its own; a rewriter may carry whatever state
/// its overrides need (methods take `&mut self`).
pub trait Rewriter {
    /// Visit one node, dispatching on its variant.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::UnsupportedNode`] for an [`Expr::Extension`]
    /// node; the error is fatal and no partial result is produced.
    fn rewrite(&mut self, expr: &ExprRef) -> Result<ExprRef> {
        walk(self, expr)
    }

    /// Visit an optional child: `None` passes through as a no-op.
    fn rewrite_opt(&mut self, expr: &Option<ExprRef>) -> Result<Option<ExprRef>> {
        match expr {
            Some(e) => Ok(Some(self.rewrite(e)?)),
            None => Ok(None),
        }
    }

    /// Visit an expression list.
    ///
    /// `None` means every item came back identical and the caller should
    /// keep its original vector. See [`rewrite_items`] for the exact
    /// copy-before/visit-after discipline around the first change.
    fn rewrite_exprs(&mut self, items: &[ExprRef]) -> Result<Option<Vec<ExprRef>>> {
        rewrite_items(items, |item| self.rewrite(item))
    }

    /// Visit a binding list; same contract as [`Rewriter::rewrite_exprs`].
    fn rewrite_bindings(&mut self, items: &[BindingRef]) -> Result<Option<Vec<BindingRef>>> {
        rewrite_items(items, |item| self.rewrite_binding(item))
    }

    /// Visit an element-initializer list; same contract as
    /// [`Rewriter::rewrite_exprs`].
    fn rewrite_element_inits(
        &mut self,
        items: &[ElementInitRef],
    ) -> Result<Option<Vec<ElementInitRef>>> {
        rewrite_items(items, |item| self.rewrite_element_init(item))
    }

    /// Visit a unary node.
    fn rewrite_unary(&mut self, expr: &ExprRef, node: &UnaryExpr) -> Result<ExprRef> {
        walk_unary(self, expr, node)
    }

    /// Visit a binary node.
    fn rewrite_binary(&mut self, expr: &ExprRef, node: &BinaryExpr) -> Result<ExprRef> {
        walk_binary(self, expr, node)
    }

    /// Visit a type-test node.
    fn rewrite_type_test(&mut self, expr: &ExprRef, node: &TypeTestExpr) -> Result<ExprRef> {
        walk_type_test(self, expr, node)
    }

    /// Visit a conditional node.
    fn rewrite_conditional(&mut self, expr: &ExprRef, node: &ConditionalExpr) -> Result<ExprRef> {
        walk_conditional(self, expr, node)
    }

    /// Visit a constant: a leaf, returned as-is.
    fn rewrite_constant(&mut self, expr: &ExprRef, node: &ConstantExpr) -> Result<ExprRef> {
        walk_constant(self, expr, node)
    }

    /// Visit a parameter: a leaf, returned as-is.
    fn rewrite_parameter(&mut self, expr: &ExprRef, node: &ParameterExpr) -> Result<ExprRef> {
        walk_parameter(self, expr, node)
    }

    /// Visit a member-access node.
    fn rewrite_member_access(
        &mut self,
        expr: &ExprRef,
        node: &MemberAccessExpr,
    ) -> Result<ExprRef> {
        walk_member_access(self, expr, node)
    }

    /// Visit a method-call node.
    fn rewrite_method_call(&mut self, expr: &ExprRef, node: &MethodCallExpr) -> Result<ExprRef> {
        walk_method_call(self, expr, node)
    }

    /// Visit a lambda node.
    fn rewrite_lambda(&mut self, expr: &ExprRef, node: &LambdaExpr) -> Result<ExprRef> {
        walk_lambda(self, expr, node)
    }

    /// Visit an object construction.
    ///
    /// Operates on the typed [`NewRef`] handle so the same override serves
    /// the standalone [`Expr::New`] node and the construction embedded in
    /// `MemberInit`/`ListInit`.
    fn rewrite_new(&mut self, new: &NewRef) -> Result<NewRef> {
        walk_new(self, new)
    }

    /// Visit an array construction.
    fn rewrite_new_array(&mut self, expr: &ExprRef, node: &NewArrayExpr) -> Result<ExprRef> {
        walk_new_array(self, expr, node)
    }

    /// Visit an invocation node.
    fn rewrite_invoke(&mut self, expr: &ExprRef, node: &InvokeExpr) -> Result<ExprRef> {
        walk_invoke(self, expr, node)
    }

    /// Visit a member-initializer node.
    fn rewrite_member_init(&mut self, expr: &ExprRef, node: &MemberInitExpr) -> Result<ExprRef> {
        walk_member_init(self, expr, node)
    }

    /// Visit a list-initializer node.
    fn rewrite_list_init(&mut self, expr: &ExprRef, node: &ListInitExpr) -> Result<ExprRef> {
        walk_list_init(self, expr, node)
    }

    /// Visit one member binding, dispatching on its variant.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::UnsupportedNode`] for a
    /// [`Binding::Extension`] tag.
    fn rewrite_binding(&mut self, binding: &BindingRef) -> Result<BindingRef> {
        walk_binding(self, binding)
    }

    /// Visit an assignment binding.
    fn rewrite_assignment(
        &mut self,
        binding: &BindingRef,
        node: &AssignmentBinding,
    ) -> Result<BindingRef> {
        walk_assignment(self, binding, node)
    }

    /// Visit a nested member binding.
    fn rewrite_member_binding(
        &mut self,
        binding: &BindingRef,
        node: &MemberBinding,
    ) -> Result<BindingRef> {
        walk_member_binding(self, binding, node)
    }

    /// Visit a nested list binding.
    fn rewrite_list_binding(
        &mut self,
        binding: &BindingRef,
        node: &ListBinding,
    ) -> Result<BindingRef> {
        walk_list_binding(self, binding, node)
    }

    /// Visit one element-add call.
    fn rewrite_element_init(&mut self, init: &ElementInitRef) -> Result<ElementInitRef> {
        walk_element_init(self, init)
    }
}

/// Handle-identity comparison of optional children.
fn same_opt(a: &Option<ExprRef>, b: &Option<ExprRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Default dispatch: route `expr` to the rewriter's per-variant handler.
///
/// # Errors
///
/// Returns [`RewriteError::UnsupportedNode`] for an [`Expr::Extension`]
/// node, before touching any child.
pub fn walk<R: Rewriter + ?Sized>(r: &mut R, expr: &ExprRef) -> Result<ExprRef> {
    match expr.as_ref() {
        Expr::Unary(node) => r.rewrite_unary(expr, node),
        Expr::Binary(node) => r.rewrite_binary(expr, node),
        Expr::TypeTest(node) => r.rewrite_type_test(expr, node),
        Expr::Conditional(node) => r.rewrite_conditional(expr, node),
        Expr::Constant(node) => r.rewrite_constant(expr, node),
        Expr::Parameter(node) => r.rewrite_parameter(expr, node),
        Expr::MemberAccess(node) => r.rewrite_member_access(expr, node),
        Expr::MethodCall(node) => r.rewrite_method_call(expr, node),
        Expr::Lambda(node) => r.rewrite_lambda(expr, node),
        Expr::New(new) => {
            let visited = r.rewrite_new(new)?;
            if Arc::ptr_eq(&visited, new) {
                Ok(expr.clone())
            } else {
                Ok(Arc::new(Expr::New(visited)))
            }
        }
        Expr::NewArray(node) => r.rewrite_new_array(expr, node),
        Expr::Invoke(node) => r.rewrite_invoke(expr, node),
        Expr::MemberInit(node) => r.rewrite_member_init(expr, node),
        Expr::ListInit(node) => r.rewrite_list_init(expr, node),
        Expr::Extension(ext) => Err(RewriteError::unsupported(ext.kind.clone())),
    }
}

/// Default unary traversal: recurses into the operand.
pub fn walk_unary<R: Rewriter + ?Sized>(
    r: &mut R,
    expr: &ExprRef,
    node: &UnaryExpr,
) -> Result<ExprRef> {
    let operand = r.rewrite(&node.operand)?;
    if Arc::ptr_eq(&operand, &node.operand) {
        return Ok(expr.clone());
    }
    Ok(Arc::new(Expr::Unary(UnaryExpr {
        operand,
        ..node.clone()
    })))
}

/// Default binary traversal: recurses into both operands and, when present,
/// the coalesce conversion lambda.
///
/// A rebuild carries the conversion over only because the original had one;
/// it is never synthesized.
pub fn walk_binary<R: Rewriter + ?Sized>(
    r: &mut R,
    expr: &ExprRef,
    node: &BinaryExpr,
) -> Result<ExprRef> {
    let left = r.rewrite(&node.left)?;
    let right = r.rewrite(&node.right)?;
    let conversion = r.rewrite_opt(&node.conversion)?;
    if Arc::ptr_eq(&left, &node.left)
        && Arc::ptr_eq(&right, &node.right)
        && same_opt(&conversion, &node.conversion)
    {
        return Ok(expr.clone());
    }
    Ok(Arc::new(Expr::Binary(BinaryExpr {
        left,
        right,
        conversion,
        ..node.clone()
    })))
}

/// Default type-test traversal: recurses into the tested expression.
pub fn walk_type_test<R: Rewriter + ?Sized>(
    r: &mut R,
    expr: &ExprRef,
    node: &TypeTestExpr,
) -> Result<ExprRef> {
    let inner = r.rewrite(&node.expr)?;
    if Arc::ptr_eq(&inner, &node.expr) {
        return Ok(expr.clone());
    }
    Ok(Arc::new(Expr::TypeTest(TypeTestExpr {
        expr: inner,
        ..node.clone()
    })))
}

/// Default conditional traversal: recurses into test and both branches.
pub fn walk_conditional<R: Rewriter + ?Sized>(
    r: &mut R,
    expr: &ExprRef,
    node: &ConditionalExpr,
) -> Result<ExprRef> {
    let test = r.rewrite(&node.test)?;
    let if_true = r.rewrite(&node.if_true)?;
    let if_false = r.rewrite(&node.if_false)?;
    if Arc::ptr_eq(&test, &node.test)
        && Arc::ptr_eq(&if_true, &node.if_true)
        && Arc::ptr_eq(&if_false, &node.if_false)
    {
        return Ok(expr.clone());
    }
    Ok(Arc::new(Expr::Conditional(ConditionalExpr {
        test,
        if_true,
        if_false,
    })))
}

/// Default constant traversal: a leaf, never recurses.
pub fn walk_constant<R: Rewriter + ?Sized>(
    _r: &mut R,
    expr: &ExprRef,
    _node: &ConstantExpr,
) -> Result<ExprRef> {
    Ok(expr.clone())
}

/// Default parameter traversal: a leaf, never recurses.
pub fn walk_parameter<R: Rewriter + ?Sized>(
    _r: &mut R,
    expr: &ExprRef,
    _node: &ParameterExpr,
) -> Result<ExprRef> {
    Ok(expr.clone())
}

/// Default member-access traversal: recurses into the target when present
/// (static accesses have none).
pub fn walk_member_access<R: Rewriter + ?Sized>(
    r: &mut R,
    expr: &ExprRef,
    node: &MemberAccessExpr,
) -> Result<ExprRef> {
    let target = r.rewrite_opt(&node.target)?;
    if same_opt(&target, &node.target) {
        return Ok(expr.clone());
    }
    Ok(Arc::new(Expr::MemberAccess(MemberAccessExpr {
        target,
        ..node.clone()
    })))
}

/// Default method-call traversal: recurses into the receiver (when present)
/// and every argument.
pub fn walk_method_call<R: Rewriter + ?Sized>(
    r: &mut R,
    expr: &ExprRef,
    node: &MethodCallExpr,
) -> Result<ExprRef> {
    let target = r.rewrite_opt(&node.target)?;
    let args = r.rewrite_exprs(&node.args)?;
    if same_opt(&target, &node.target) && args.is_none() {
        return Ok(expr.clone());
    }
    Ok(Arc::new(Expr::MethodCall(MethodCallExpr {
        target,
        args: args.unwrap_or_else(|| node.args.clone()),
        ..node.clone()
    })))
}

/// Default lambda traversal: recurses into the parameter list and the body.
pub fn walk_lambda<R: Rewriter + ?Sized>(
    r: &mut R,
    expr: &ExprRef,
    node: &LambdaExpr,
) -> Result<ExprRef> {
    let params = r.rewrite_exprs(&node.params)?;
    let body = r.rewrite(&node.body)?;
    if params.is_none() && Arc::ptr_eq(&body, &node.body) {
        return Ok(expr.clone());
    }
    Ok(Arc::new(Expr::Lambda(LambdaExpr {
        params: params.unwrap_or_else(|| node.params.clone()),
        body,
        ..node.clone()
    })))
}

/// Default object-construction traversal: recurses into the argument list.
pub fn walk_new<R: Rewriter + ?Sized>(r: &mut R, new: &NewRef) -> Result<NewRef> {
    match r.rewrite_exprs(&new.args)? {
        Some(args) => Ok(Arc::new(NewExpr {
            args,
            ..(**new).clone()
        })),
        None => Ok(new.clone()),
    }
}

/// Default array-construction traversal: recurses into the dimension or
/// element list. The bounds-vs-init form is part of the copied payload, so a
/// rebuild keeps the original form.
pub fn walk_new_array<R: Rewriter + ?Sized>(
    r: &mut R,
    expr: &ExprRef,
    node: &NewArrayExpr,
) -> Result<ExprRef> {
    match r.rewrite_exprs(&node.exprs)? {
        Some(exprs) => Ok(Arc::new(Expr::NewArray(NewArrayExpr {
            exprs,
            ..node.clone()
        }))),
        None => Ok(expr.clone()),
    }
}

/// Default invocation traversal: recurses into the callee and every argument.
pub fn walk_invoke<R: Rewriter + ?Sized>(
    r: &mut R,
    expr: &ExprRef,
    node: &InvokeExpr,
) -> Result<ExprRef> {
    let callee = r.rewrite(&node.callee)?;
    let args = r.rewrite_exprs(&node.args)?;
    if Arc::ptr_eq(&callee, &node.callee) && args.is_none() {
        return Ok(expr.clone());
    }
    Ok(Arc::new(Expr::Invoke(InvokeExpr {
        callee,
        args: args.unwrap_or_else(|| node.args.clone()),
    })))
}

/// Default member-initializer traversal: recurses into the embedded
/// construction and the binding list, rebuilding when either changed.
pub fn walk_member_init<R: Rewriter + ?Sized>(
    r: &mut R,
    expr: &ExprRef,
    node: &MemberInitExpr,
) -> Result<ExprRef> {
    let new = r.rewrite_new(&node.new)?;
    let bindings = r.rewrite_bindings(&node.bindings)?;
    if Arc::ptr_eq(&new, &node.new) && bindings.is_none() {
        return Ok(expr.clone());
    }
    Ok(Arc::new(Expr::MemberInit(MemberInitExpr {
        new,
        bindings: bindings.unwrap_or_else(|| node.bindings.clone()),
    })))
}

/// Default list-initializer traversal: recurses into the embedded
/// construction and the element-add list, rebuilding when either changed.
pub fn walk_list_init<R: Rewriter + ?Sized>(
    r: &mut R,
    expr: &ExprRef,
    node: &ListInitExpr,
) -> Result<ExprRef> {
    let new = r.rewrite_new(&node.new)?;
    let inits = r.rewrite_element_inits(&node.inits)?;
    if Arc::ptr_eq(&new, &node.new) && inits.is_none() {
        return Ok(expr.clone());
    }
    Ok(Arc::new(Expr::ListInit(ListInitExpr {
        new,
        inits: inits.unwrap_or_else(|| node.inits.clone()),
    })))
}

/// Default binding dispatch: route the binding to the rewriter's per-variant
/// handler.
///
/// # Errors
///
/// Returns [`RewriteError::UnsupportedNode`] for a [`Binding::Extension`]
/// tag, before touching any child.
pub fn walk_binding<R: Rewriter + ?Sized>(r: &mut R, binding: &BindingRef) -> Result<BindingRef> {
    match binding.as_ref() {
        Binding::Assignment(node) => r.rewrite_assignment(binding, node),
        Binding::MemberBinding(node) => r.rewrite_member_binding(binding, node),
        Binding::ListBinding(node) => r.rewrite_list_binding(binding, node),
        Binding::Extension(ext) => Err(RewriteError::unsupported(ext.kind.clone())),
    }
}

/// Default assignment-binding traversal: recurses into the assigned value.
pub fn walk_assignment<R: Rewriter + ?Sized>(
    r: &mut R,
    binding: &BindingRef,
    node: &AssignmentBinding,
) -> Result<BindingRef> {
    let value = r.rewrite(&node.value)?;
    if Arc::ptr_eq(&value, &node.value) {
        return Ok(binding.clone());
    }
    Ok(Arc::new(Binding::Assignment(AssignmentBinding {
        value,
        ..node.clone()
    })))
}

/// Default nested-member-binding traversal: recurses into its binding list.
pub fn walk_member_binding<R: Rewriter + ?Sized>(
    r: &mut R,
    binding: &BindingRef,
    node: &MemberBinding,
) -> Result<BindingRef> {
    match r.rewrite_bindings(&node.bindings)? {
        Some(bindings) => Ok(Arc::new(Binding::MemberBinding(MemberBinding {
            bindings,
            ..node.clone()
        }))),
        None => Ok(binding.clone()),
    }
}

/// Default nested-list-binding traversal: recurses into its element-add list.
pub fn walk_list_binding<R: Rewriter + ?Sized>(
    r: &mut R,
    binding: &BindingRef,
    node: &ListBinding,
) -> Result<BindingRef> {
    match r.rewrite_element_inits(&node.inits)? {
        Some(inits) => Ok(Arc::new(Binding::ListBinding(ListBinding {
            inits,
            ..node.clone()
        }))),
        None => Ok(binding.clone()),
    }
}

/// Default element-add traversal: recurses into its argument list.
pub fn walk_element_init<R: Rewriter + ?Sized>(
    r: &mut R,
    init: &ElementInitRef,
) -> Result<ElementInitRef> {
    match r.rewrite_exprs(&init.args)? {
        Some(args) => Ok(Arc::new(ElementInit {
            args,
            ..(**init).clone()
        })),
        None => Ok(init.clone()),
    }
}
