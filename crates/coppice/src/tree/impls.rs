//! Construction helpers and kind names.

use std::sync::Arc;

use super::{
    ArrayForm, AssignmentBinding, BinaryExpr, BinaryOp, Binding, BindingRef, ConditionalExpr,
    ConstValue, ConstantExpr, Constructor, ElementInit, ElementInitRef, Expr, ExprRef,
    ExtensionNode, InvokeExpr, LambdaExpr, ListBinding, ListInitExpr, Member, MemberAccessExpr,
    MemberBinding, MemberInitExpr, Method, MethodCallExpr, NewArrayExpr, NewExpr, NewRef,
    ParameterExpr, Ty, TypeTestExpr, UnaryExpr, UnaryOp,
};

impl Expr {
    /// Build a constant leaf.
    pub fn constant(value: ConstValue, ty: Ty) -> ExprRef {
        Arc::new(Expr::Constant(ConstantExpr { value, ty }))
    }

    /// Build a parameter leaf.
    ///
    /// The returned handle is the parameter's identity: reusing the handle
    /// in several places in a tree means the same bound variable, while a
    /// second call with the same name makes an unrelated parameter.
    pub fn parameter(name: impl Into<Arc<str>>, ty: Ty) -> ExprRef {
        Arc::new(Expr::Parameter(ParameterExpr {
            name: name.into(),
            ty,
        }))
    }

    /// Build a unary node without an overload method.
    pub fn unary(op: UnaryOp, operand: ExprRef, ty: Ty) -> ExprRef {
        Arc::new(Expr::Unary(UnaryExpr {
            op,
            operand,
            ty,
            method: None,
        }))
    }

    /// Build a binary node without lifting, overload method, or conversion.
    pub fn binary(op: BinaryOp, left: ExprRef, right: ExprRef, ty: Ty) -> ExprRef {
        Arc::new(Expr::Binary(BinaryExpr {
            op,
            left,
            right,
            ty,
            lifted: false,
            method: None,
            conversion: None,
        }))
    }

    /// Build a null-coalescing node, optionally with a converter lambda
    /// applied to the left operand.
    pub fn coalesce(left: ExprRef, right: ExprRef, ty: Ty, conversion: Option<ExprRef>) -> ExprRef {
        Arc::new(Expr::Binary(BinaryExpr {
            op: BinaryOp::Coalesce,
            left,
            right,
            ty,
            lifted: false,
            method: None,
            conversion,
        }))
    }

    /// Build a runtime type-test node.
    pub fn type_test(expr: ExprRef, type_operand: Ty) -> ExprRef {
        Arc::new(Expr::TypeTest(TypeTestExpr { expr, type_operand }))
    }

    /// Build a ternary conditional node.
    pub fn conditional(test: ExprRef, if_true: ExprRef, if_false: ExprRef) -> ExprRef {
        Arc::new(Expr::Conditional(ConditionalExpr {
            test,
            if_true,
            if_false,
        }))
    }

    /// Build a member access; pass `None` as target for static members.
    pub fn member_access(target: Option<ExprRef>, member: Member) -> ExprRef {
        Arc::new(Expr::MemberAccess(MemberAccessExpr { target, member }))
    }

    /// Build a method call; pass `None` as target for static methods.
    pub fn method_call(target: Option<ExprRef>, method: Method, args: Vec<ExprRef>) -> ExprRef {
        Arc::new(Expr::MethodCall(MethodCallExpr {
            target,
            method,
            args,
        }))
    }

    /// Build a lambda node. Each element of `params` must be an
    /// [`Expr::Parameter`].
    pub fn lambda(params: Vec<ExprRef>, body: ExprRef, ty: Ty) -> ExprRef {
        Arc::new(Expr::Lambda(LambdaExpr { params, body, ty }))
    }

    /// Wrap an object-construction payload as an expression node.
    pub fn from_new(new: NewRef) -> ExprRef {
        Arc::new(Expr::New(new))
    }

    /// Build an object-construction node.
    pub fn new_object(constructor: Constructor, args: Vec<ExprRef>) -> ExprRef {
        Self::from_new(NewExpr::plain(constructor, args))
    }

    /// Build a bounds-form array construction (`new T[n, m]`).
    pub fn new_array_bounds(element_ty: Ty, bounds: Vec<ExprRef>) -> ExprRef {
        Arc::new(Expr::NewArray(NewArrayExpr {
            element_ty,
            exprs: bounds,
            form: ArrayForm::Bounds,
        }))
    }

    /// Build an init-form array construction (`new T[] { .. }`).
    pub fn new_array_init(element_ty: Ty, elements: Vec<ExprRef>) -> ExprRef {
        Arc::new(Expr::NewArray(NewArrayExpr {
            element_ty,
            exprs: elements,
            form: ArrayForm::Init,
        }))
    }

    /// Build an invocation of a first-class callable.
    pub fn invoke(callee: ExprRef, args: Vec<ExprRef>) -> ExprRef {
        Arc::new(Expr::Invoke(InvokeExpr { callee, args }))
    }

    /// Build a member-initializer node over an object construction.
    pub fn member_init(new: NewRef, bindings: Vec<BindingRef>) -> ExprRef {
        Arc::new(Expr::MemberInit(MemberInitExpr { new, bindings }))
    }

    /// Build a list-initializer node over a collection construction.
    pub fn list_init(new: NewRef, inits: Vec<ElementInitRef>) -> ExprRef {
        Arc::new(Expr::ListInit(ListInitExpr { new, inits }))
    }

    /// Build a producer-defined node the engine will reject.
    pub fn extension(kind: impl Into<String>) -> ExprRef {
        Arc::new(Expr::Extension(ExtensionNode { kind: kind.into() }))
    }

    /// Human-readable variant name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Unary(_) => "unary",
            Expr::Binary(_) => "binary",
            Expr::TypeTest(_) => "type test",
            Expr::Conditional(_) => "conditional",
            Expr::Constant(_) => "constant",
            Expr::Parameter(_) => "parameter",
            Expr::MemberAccess(_) => "member access",
            Expr::MethodCall(_) => "method call",
            Expr::Lambda(_) => "lambda",
            Expr::New(_) => "new",
            Expr::NewArray(_) => "new array",
            Expr::Invoke(_) => "invocation",
            Expr::MemberInit(_) => "member init",
            Expr::ListInit(_) => "list init",
            Expr::Extension(_) => "extension",
        }
    }
}

impl NewExpr {
    /// Build an ordinary constructor call (no positional member list).
    pub fn plain(constructor: Constructor, args: Vec<ExprRef>) -> NewRef {
        Arc::new(NewExpr {
            constructor,
            args,
            members: None,
        })
    }

    /// Build an anonymous-type style construction where each positional
    /// argument initializes the corresponding member.
    pub fn with_members(constructor: Constructor, args: Vec<ExprRef>, members: Vec<Member>) -> NewRef {
        Arc::new(NewExpr {
            constructor,
            args,
            members: Some(members),
        })
    }
}

impl Binding {
    /// Build a `member = value` binding.
    pub fn assignment(member: Member, value: ExprRef) -> BindingRef {
        Arc::new(Binding::Assignment(AssignmentBinding { member, value }))
    }

    /// Build a nested member binding.
    pub fn member_binding(member: Member, bindings: Vec<BindingRef>) -> BindingRef {
        Arc::new(Binding::MemberBinding(MemberBinding { member, bindings }))
    }

    /// Build a nested collection binding.
    pub fn list_binding(member: Member, inits: Vec<ElementInitRef>) -> BindingRef {
        Arc::new(Binding::ListBinding(ListBinding { member, inits }))
    }

    /// Build a producer-defined binding the engine will reject.
    pub fn extension(kind: impl Into<String>) -> BindingRef {
        Arc::new(Binding::Extension(ExtensionNode { kind: kind.into() }))
    }

    /// Human-readable variant name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Binding::Assignment(_) => "assignment binding",
            Binding::MemberBinding(_) => "member binding",
            Binding::ListBinding(_) => "list binding",
            Binding::Extension(_) => "extension binding",
        }
    }
}

impl ElementInit {
    /// Build one element-add call.
    pub fn new(add_method: Method, args: Vec<ExprRef>) -> ElementInitRef {
        Arc::new(ElementInit { add_method, args })
    }
}

impl Ty {
    /// Make a type token from a name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Ty(name.into())
    }

    /// The token's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Member {
    /// Make a member token from a name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Member(name.into())
    }

    /// The token's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Method {
    /// Make a method token from a name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Method(name.into())
    }

    /// The token's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Constructor {
    /// Make a constructor token from a type name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Constructor(name.into())
    }

    /// The token's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ty {
    fn from(name: &str) -> Self {
        Ty::new(name)
    }
}

impl From<&str> for Member {
    fn from(name: &str) -> Self {
        Member::new(name)
    }
}

impl From<&str> for Method {
    fn from(name: &str) -> Self {
        Method::new(name)
    }
}

impl From<&str> for Constructor {
    fn from(name: &str) -> Self {
        Constructor::new(name)
    }
}

impl ConstValue {
    /// Shorthand for a string literal.
    pub fn str(s: impl Into<Arc<str>>) -> Self {
        ConstValue::Str(s.into())
    }
}
