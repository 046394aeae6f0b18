use std::sync::Arc;

use coppice::rewrite::walk;
use coppice::*;

// Helpers shared by the property tests

fn int_ty() -> Ty {
    Ty::new("Int32")
}

fn int(n: i64) -> ExprRef {
    Expr::constant(ConstValue::Int(n), int_ty())
}

/// No overrides: default traversal everywhere.
struct Noop;
impl Rewriter for Noop {}

/// Replaces exactly the given handle, wherever it appears.
struct ReplaceHandle {
    target: ExprRef,
    replacement: ExprRef,
}

impl Rewriter for ReplaceHandle {
    fn rewrite(&mut self, expr: &ExprRef) -> Result<ExprRef> {
        if Arc::ptr_eq(expr, &self.target) {
            Ok(self.replacement.clone())
        } else {
            walk(self, expr)
        }
    }
}

fn replace(tree: &ExprRef, target: &ExprRef, replacement: &ExprRef) -> ExprRef {
    ReplaceHandle {
        target: target.clone(),
        replacement: replacement.clone(),
    }
    .rewrite(tree)
    .unwrap()
}

/// A tree exercising every supported variant.
fn kitchen_sink() -> ExprRef {
    let p = Expr::parameter("x", int_ty());
    let add = Expr::binary(BinaryOp::Add, p.clone(), int(1), int_ty());
    let lambda = Expr::lambda(vec![p], add, Ty::new("Func<Int32,Int32>"));
    let call = Expr::method_call(
        Some(Expr::new_array_init(int_ty(), vec![int(1), int(2)])),
        Method::new("Select"),
        vec![lambda],
    );
    let cond = Expr::conditional(
        Expr::type_test(call.clone(), Ty::new("IEnumerable")),
        Expr::unary(UnaryOp::Negate, int(3), int_ty()),
        Expr::invoke(
            Expr::member_access(None, Member::new("Default")),
            vec![call],
        ),
    );
    let obj = Expr::member_init(
        NewExpr::plain(Constructor::new("Holder"), vec![cond]),
        vec![
            Binding::assignment(Member::new("Count"), int(0)),
            Binding::member_binding(
                Member::new("Inner"),
                vec![Binding::assignment(Member::new("Name"), int(7))],
            ),
            Binding::list_binding(
                Member::new("Items"),
                vec![ElementInit::new(Method::new("Add"), vec![int(9)])],
            ),
        ],
    );
    Expr::list_init(
        NewExpr::plain(Constructor::new("List"), vec![obj]),
        vec![ElementInit::new(
            Method::new("Add"),
            vec![Expr::new_array_bounds(int_ty(), vec![int(4)])],
        )],
    )
}

// ═══════════════════════════════════════════════════════════════════════
// Identity preservation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_noop_rewrite_is_identity_everywhere() {
    let tree = kitchen_sink();
    let out = Noop.rewrite(&tree).unwrap();
    assert!(Arc::ptr_eq(&out, &tree));
}

#[test]
fn test_leaves_never_recurse() {
    let c = int(5);
    let p = Expr::parameter("x", int_ty());
    assert!(Arc::ptr_eq(&Noop.rewrite(&c).unwrap(), &c));
    assert!(Arc::ptr_eq(&Noop.rewrite(&p).unwrap(), &p));
}

// ═══════════════════════════════════════════════════════════════════════
// Minimal copy
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_single_leaf_change_reallocates_only_ancestor_chain() {
    let leaf = int(1);
    let changed_branch = Expr::unary(
        UnaryOp::Negate,
        Expr::binary(BinaryOp::Multiply, leaf.clone(), int(2), int_ty()),
        int_ty(),
    );
    let sibling = Expr::binary(BinaryOp::Add, int(3), int(4), int_ty());
    let test = Expr::parameter("flag", Ty::new("Boolean"));
    let tree = Expr::conditional(test.clone(), changed_branch.clone(), sibling.clone());

    let out = replace(&tree, &leaf, &int(10));

    // Root and the chain down to the leaf are fresh allocations.
    assert!(!Arc::ptr_eq(&out, &tree));
    let Expr::Conditional(cond) = out.as_ref() else {
        panic!("expected conditional");
    };
    assert!(!Arc::ptr_eq(&cond.if_true, &changed_branch));

    // Untouched siblings keep their identity at every level.
    assert!(Arc::ptr_eq(&cond.test, &test));
    assert!(Arc::ptr_eq(&cond.if_false, &sibling));

    let Expr::Unary(unary) = cond.if_true.as_ref() else {
        panic!("expected unary");
    };
    let Expr::Binary(mul) = unary.operand.as_ref() else {
        panic!("expected binary");
    };
    assert_eq!(mul.left, int(10));
    let Expr::Unary(orig_unary) = changed_branch.as_ref() else {
        panic!("expected unary");
    };
    let Expr::Binary(orig_mul) = orig_unary.operand.as_ref() else {
        panic!("expected binary");
    };
    assert!(Arc::ptr_eq(&mul.right, &orig_mul.right));
}

// ═══════════════════════════════════════════════════════════════════════
// List semantics
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_list_change_at_index_two() {
    let args: Vec<ExprRef> = (0..5).map(int).collect();
    let tree = Expr::method_call(None, Method::new("Format"), args.clone());

    let out = replace(&tree, &args[2], &int(20));

    let Expr::MethodCall(call) = out.as_ref() else {
        panic!("expected method call");
    };
    assert_eq!(call.args.len(), 5);
    // Before the change: original handles.
    assert!(Arc::ptr_eq(&call.args[0], &args[0]));
    assert!(Arc::ptr_eq(&call.args[1], &args[1]));
    // The change itself.
    assert!(!Arc::ptr_eq(&call.args[2], &args[2]));
    assert_eq!(call.args[2], int(20));
    // After the change: still visited; the identity-preserving default
    // brings back the original handles.
    assert!(Arc::ptr_eq(&call.args[3], &args[3]));
    assert!(Arc::ptr_eq(&call.args[4], &args[4]));
}

#[test]
fn test_items_after_change_are_visited_not_copied() {
    struct Tracker {
        target: ExprRef,
        replacement: ExprRef,
        constants_seen: Vec<i64>,
    }
    impl Rewriter for Tracker {
        fn rewrite_constant(&mut self, expr: &ExprRef, node: &ConstantExpr) -> Result<ExprRef> {
            if let ConstValue::Int(n) = node.value {
                self.constants_seen.push(n);
            }
            if Arc::ptr_eq(expr, &self.target) {
                Ok(self.replacement.clone())
            } else {
                Ok(expr.clone())
            }
        }
    }

    let args: Vec<ExprRef> = (0..5).map(int).collect();
    let tree = Expr::method_call(None, Method::new("Format"), args.clone());
    let mut tracker = Tracker {
        target: args[2].clone(),
        replacement: int(20),
        constants_seen: Vec::new(),
    };
    tracker.rewrite(&tree).unwrap();

    // Every argument went through the handler exactly once, including the
    // ones after the changed index.
    assert_eq!(tracker.constants_seen, vec![0, 1, 2, 3, 4]);
}

// ═══════════════════════════════════════════════════════════════════════
// Array construction forms
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_bounds_form_round_trips() {
    let dim = int(3);
    let tree = Expr::new_array_bounds(int_ty(), vec![dim.clone()]);
    let out = replace(&tree, &dim, &int(6));
    let Expr::NewArray(arr) = out.as_ref() else {
        panic!("expected new array");
    };
    assert_eq!(arr.form, ArrayForm::Bounds);
    assert_eq!(arr.exprs[0], int(6));
    assert_eq!(arr.element_ty, int_ty());
}

#[test]
fn test_init_form_round_trips() {
    let elem = int(3);
    let tree = Expr::new_array_init(int_ty(), vec![elem.clone(), int(4)]);
    let out = replace(&tree, &elem, &int(6));
    let Expr::NewArray(arr) = out.as_ref() else {
        panic!("expected new array");
    };
    assert_eq!(arr.form, ArrayForm::Init);
    assert_eq!(arr.exprs[0], int(6));
}

// ═══════════════════════════════════════════════════════════════════════
// Coalesce conversion
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_coalesce_conversion_preserved_across_rebuild() {
    let p = Expr::parameter("v", Ty::new("String"));
    let conversion = Expr::lambda(
        vec![p.clone()],
        p,
        Ty::new("Func<String,Int32>"),
    );
    let right = int(0);
    let tree = Expr::coalesce(
        Expr::parameter("maybe", Ty::new("String")),
        right.clone(),
        int_ty(),
        Some(conversion.clone()),
    );

    let out = replace(&tree, &right, &int(1));

    let Expr::Binary(node) = out.as_ref() else {
        panic!("expected binary");
    };
    assert_eq!(node.op, BinaryOp::Coalesce);
    assert!(node.conversion.is_some());
    assert!(Arc::ptr_eq(node.conversion.as_ref().unwrap(), &conversion));
}

#[test]
fn test_coalesce_unchanged_returns_original() {
    let conversion = {
        let p = Expr::parameter("v", Ty::new("String"));
        Expr::lambda(vec![p.clone()], p, Ty::new("Func<String,Int32>"))
    };
    let tree = Expr::coalesce(
        Expr::parameter("maybe", Ty::new("String")),
        int(0),
        int_ty(),
        Some(conversion),
    );
    let out = Noop.rewrite(&tree).unwrap();
    assert!(Arc::ptr_eq(&out, &tree));
}

// ═══════════════════════════════════════════════════════════════════════
// Unsupported tags
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_extension_node_fails_fatally() {
    let tree = Expr::binary(BinaryOp::Add, Expr::extension("vendor-hint"), int(1), int_ty());
    let err = Noop.rewrite(&tree).unwrap_err();
    assert_eq!(
        err,
        RewriteError::UnsupportedNode {
            kind: "vendor-hint".into()
        }
    );
    assert_eq!(err.to_string(), "unsupported node kind: vendor-hint");
}

#[test]
fn test_extension_binding_fails_fatally() {
    let tree = Expr::member_init(
        NewExpr::plain(Constructor::new("Obj"), vec![]),
        vec![
            Binding::assignment(Member::new("A"), int(1)),
            Binding::extension("vendor-binding"),
        ],
    );
    let err = Noop.rewrite(&tree).unwrap_err();
    assert_eq!(err, RewriteError::unsupported("vendor-binding"));
}

// ═══════════════════════════════════════════════════════════════════════
// Combined-change OR
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_member_init_rebuilds_when_only_binding_changed() {
    let bound_value = int(7);
    let new = NewExpr::plain(Constructor::new("Obj"), vec![int(1)]);
    let tree = Expr::member_init(
        new.clone(),
        vec![Binding::assignment(Member::new("A"), bound_value.clone())],
    );

    let out = replace(&tree, &bound_value, &int(8));

    assert!(!Arc::ptr_eq(&out, &tree));
    let Expr::MemberInit(init) = out.as_ref() else {
        panic!("expected member init");
    };
    // The construction half did not change, so it keeps its handle.
    assert!(Arc::ptr_eq(&init.new, &new));
    let Binding::Assignment(binding) = init.bindings[0].as_ref() else {
        panic!("expected assignment");
    };
    assert_eq!(binding.value, int(8));
}

#[test]
fn test_member_init_rebuilds_when_only_new_changed() {
    let ctor_arg = int(1);
    let binding = Binding::assignment(Member::new("A"), int(7));
    let tree = Expr::member_init(
        NewExpr::plain(Constructor::new("Obj"), vec![ctor_arg.clone()]),
        vec![binding.clone()],
    );

    let out = replace(&tree, &ctor_arg, &int(2));

    assert!(!Arc::ptr_eq(&out, &tree));
    let Expr::MemberInit(init) = out.as_ref() else {
        panic!("expected member init");
    };
    assert_eq!(init.new.args[0], int(2));
    // The binding half did not change, so it keeps its handle.
    assert!(Arc::ptr_eq(&init.bindings[0], &binding));
}

// ═══════════════════════════════════════════════════════════════════════
// Optional children
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_absent_target_is_a_noop() {
    let access = Expr::member_access(None, Member::new("Empty"));
    let call = Expr::method_call(None, Method::new("Now"), vec![]);
    assert!(Arc::ptr_eq(&Noop.rewrite(&access).unwrap(), &access));
    assert!(Arc::ptr_eq(&Noop.rewrite(&call).unwrap(), &call));
}

#[test]
fn test_deep_sharing_survives_repeated_rewrites() {
    let tree = kitchen_sink();
    let first = Noop.rewrite(&tree).unwrap();
    let second = Noop.rewrite(&first).unwrap();
    assert!(Arc::ptr_eq(&second, &tree));
}
