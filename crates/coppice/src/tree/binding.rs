//! Member bindings and collection initializers.
//!
//! These only ever appear inside [`MemberInit`](super::MemberInitExpr) and
//! [`ListInit`](super::ListInitExpr) nodes; they are not expressions
//! themselves, but they contain expressions and participate in the same
//! rebuild-on-change discipline.

use super::{BindingRef, ElementInitRef, ExprRef, ExtensionNode, Member, Method};

/// One member binding inside a `MemberInit` node.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// `member = value`
    Assignment(AssignmentBinding),
    /// `member = { nested member bindings }`
    MemberBinding(MemberBinding),
    /// `member = { collection-add calls }`
    ListBinding(ListBinding),
    /// Producer-defined binding outside the closed variant set
    Extension(ExtensionNode),
}

/// Payload of [`Binding::Assignment`].
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentBinding {
    /// Member being assigned
    pub member: Member,
    /// Assigned value
    pub value: ExprRef,
}

/// Payload of [`Binding::MemberBinding`]: initializes the members of a
/// member's existing value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberBinding {
    /// Member whose value is initialized
    pub member: Member,
    /// Nested bindings, in source order
    pub bindings: Vec<BindingRef>,
}

/// Payload of [`Binding::ListBinding`]: fills a member's existing collection
/// value through add calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ListBinding {
    /// Member whose collection is filled
    pub member: Member,
    /// Element-add calls, in source order
    pub inits: Vec<ElementInitRef>,
}

/// One element-add call of a collection initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementInit {
    /// The add method invoked on the collection
    pub add_method: Method,
    /// Arguments of the add call, in call order
    pub args: Vec<ExprRef>,
}
