//! Immutable expression tree representation.
//!
//! Nodes are organized as a closed sum type, [`Expr`], whose variants carry
//! dedicated payload structs. Every node handle is an [`ExprRef`] (an `Arc`),
//! so unchanged subtrees are shared between the input and output of a rewrite
//! rather than copied, and handle identity (`Arc::ptr_eq`) is the signal for
//! "this child was replaced".
//!
//! Trees are built once by a producer and never mutated afterwards; the
//! rewriting engine in [`crate::rewrite`] only ever reads them.

mod binding;
mod display;
mod impls;
mod ops;

pub use binding::{AssignmentBinding, Binding, ElementInit, ListBinding, MemberBinding};
pub use ops::{ArrayForm, BinaryOp, UnaryOp};

use std::sync::Arc;

/// Shared handle to an expression node.
pub type ExprRef = Arc<Expr>;

/// Shared handle to an object-construction payload.
///
/// `New` keeps its payload behind its own `Arc` so that [`MemberInitExpr`]
/// and [`ListInitExpr`] can embed the same typed handle the standalone
/// [`Expr::New`] variant wraps.
pub type NewRef = Arc<NewExpr>;

/// Shared handle to a member binding.
pub type BindingRef = Arc<Binding>;

/// Shared handle to a collection-initializer element.
pub type ElementInitRef = Arc<ElementInit>;

/// One node of an expression tree.
///
/// The variant set is closed: the rewriting engine matches it exhaustively,
/// so adding a variant is a compile-checked change everywhere it matters.
/// Producer-defined nodes outside this set travel as [`Expr::Extension`] and
/// are rejected by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Unary operation (negation, NOT, conversion, array length, cast, quote)
    Unary(UnaryExpr),
    /// Binary operation (arithmetic, comparison, logic, shifts, coalesce,
    /// array index)
    Binary(BinaryExpr),
    /// Runtime type test (`x is T`)
    TypeTest(TypeTestExpr),
    /// Ternary conditional (`test ? a : b`)
    Conditional(ConditionalExpr),
    /// Literal constant; a leaf
    Constant(ConstantExpr),
    /// Named parameter; a leaf. The same handle denotes the same bound
    /// variable wherever it appears in a tree.
    Parameter(ParameterExpr),
    /// Field or property access
    MemberAccess(MemberAccessExpr),
    /// Method call
    MethodCall(MethodCallExpr),
    /// Lambda abstraction
    Lambda(LambdaExpr),
    /// Object construction
    New(NewRef),
    /// Array construction, by bounds or by initial elements
    NewArray(NewArrayExpr),
    /// Invocation of a first-class callable
    Invoke(InvokeExpr),
    /// Object construction followed by member bindings
    MemberInit(MemberInitExpr),
    /// Object construction followed by collection-add calls
    ListInit(ListInitExpr),
    /// Producer-defined node outside the closed variant set
    Extension(ExtensionNode),
}

/// Payload of [`Expr::Unary`].
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    /// Operator tag
    pub op: UnaryOp,
    /// The operand
    pub operand: ExprRef,
    /// Result type of the operation
    pub ty: Ty,
    /// User-defined operator method, when the operator is overloaded
    pub method: Option<Method>,
}

/// Payload of [`Expr::Binary`].
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    /// Operator tag
    pub op: BinaryOp,
    /// Left operand
    pub left: ExprRef,
    /// Right operand
    pub right: ExprRef,
    /// Result type of the operation
    pub ty: Ty,
    /// Whether the operation is lifted over nullable operands
    pub lifted: bool,
    /// User-defined operator method, when the operator is overloaded
    pub method: Option<Method>,
    /// Converter lambda applied to the left operand of a
    /// [`BinaryOp::Coalesce`]; absent for every other operator
    pub conversion: Option<ExprRef>,
}

/// Payload of [`Expr::TypeTest`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypeTestExpr {
    /// Value being tested
    pub expr: ExprRef,
    /// Type the value is tested against
    pub type_operand: Ty,
}

/// Payload of [`Expr::Conditional`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr {
    /// Condition
    pub test: ExprRef,
    /// Value when the condition holds
    pub if_true: ExprRef,
    /// Value when the condition does not hold
    pub if_false: ExprRef,
}

/// Payload of [`Expr::Constant`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantExpr {
    /// The literal value
    pub value: ConstValue,
    /// Declared type of the constant
    pub ty: Ty,
}

/// Payload of [`Expr::Parameter`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterExpr {
    /// Parameter name, for diagnostics only; binding is by handle identity
    pub name: Arc<str>,
    /// Declared type of the parameter
    pub ty: Ty,
}

/// Payload of [`Expr::MemberAccess`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemberAccessExpr {
    /// Instance whose member is read; `None` for static members
    pub target: Option<ExprRef>,
    /// The member being read
    pub member: Member,
}

/// Payload of [`Expr::MethodCall`].
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCallExpr {
    /// Receiver of the call; `None` for static methods
    pub target: Option<ExprRef>,
    /// The method being called
    pub method: Method,
    /// Argument expressions, in call order
    pub args: Vec<ExprRef>,
}

/// Payload of [`Expr::Lambda`].
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    /// Parameters, in declaration order; each is an [`Expr::Parameter`]
    pub params: Vec<ExprRef>,
    /// Body expression
    pub body: ExprRef,
    /// Declared delegate type of the lambda
    pub ty: Ty,
}

/// Payload of [`Expr::New`], behind a [`NewRef`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpr {
    /// Constructor being invoked
    pub constructor: Constructor,
    /// Constructor arguments, in positional order
    pub args: Vec<ExprRef>,
    /// Members initialized by the positional arguments (anonymous-type
    /// construction); `None` for ordinary constructor calls
    pub members: Option<Vec<Member>>,
}

/// Payload of [`Expr::NewArray`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewArrayExpr {
    /// Element type of the array
    pub element_ty: Ty,
    /// Dimension lengths ([`ArrayForm::Bounds`]) or initial elements
    /// ([`ArrayForm::Init`])
    pub exprs: Vec<ExprRef>,
    /// Which of the two construction forms this node is
    pub form: ArrayForm,
}

/// Payload of [`Expr::Invoke`].
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeExpr {
    /// The callable being invoked (typically a lambda or a delegate-typed
    /// expression)
    pub callee: ExprRef,
    /// Argument expressions, in call order
    pub args: Vec<ExprRef>,
}

/// Payload of [`Expr::MemberInit`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemberInitExpr {
    /// The object construction being initialized
    pub new: NewRef,
    /// Member bindings applied to the fresh object, in source order
    pub bindings: Vec<BindingRef>,
}

/// Payload of [`Expr::ListInit`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListInitExpr {
    /// The collection construction being initialized
    pub new: NewRef,
    /// Element-add calls applied to the fresh collection, in source order
    pub inits: Vec<ElementInitRef>,
}

/// Payload of [`Expr::Extension`] and [`Binding::Extension`]: a tag the
/// engine does not understand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionNode {
    /// Producer-defined tag name, reported in the rejection error
    pub kind: String,
}

/// Opaque type token attached to nodes.
///
/// The engine copies it verbatim on rebuild and never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ty(Arc<str>);

/// Opaque field/property token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member(Arc<str>);

/// Opaque method token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method(Arc<str>);

/// Opaque constructor token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constructor(Arc<str>);

/// Literal payload of a [`ConstantExpr`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    /// The null literal
    Null,
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Floating-point literal
    Float(f64),
    /// String literal
    Str(Arc<str>),
}
