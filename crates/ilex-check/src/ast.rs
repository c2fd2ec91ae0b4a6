//! A minimal AST contract (spec §1 explicitly places lexer/parser/AST
//! shape out of scope; this is the skeleton the pass needs something
//! concrete to walk). Every node carries a `NodeId` the `CompileInfo` side
//! tables are keyed by.

use ilex_ir::{ClassId, NodeId};

#[derive(Clone, Debug)]
pub enum Expr {
    IntLiteral {
        node: NodeId,
        value: i64,
        /// Declared width suffix; `None` means unsuffixed (defaults to i64,
        /// spec §4.4 "Literals").
        width: Option<u32>,
    },
    FloatLiteral {
        node: NodeId,
        width: u32,
    },
    BoolLiteral {
        node: NodeId,
    },
    Null {
        node: NodeId,
    },
    /// A reference to an already-resolved name; the resolved definition and
    /// whether it needs a receiver live in `CompileInfo::use_info`.
    UseRef {
        node: NodeId,
    },
    This {
        node: NodeId,
    },
    Super {
        node: NodeId,
    },
    Block {
        node: NodeId,
        stmts: Vec<Stmt>,
    },
    Assign {
        node: NodeId,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    If {
        node: NodeId,
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    While {
        node: NodeId,
        cond: Box<Expr>,
        body: Box<Expr>,
    },
    Try {
        node: NodeId,
        body: Box<Expr>,
        catches: Vec<Expr>,
        finally: Option<Box<Expr>>,
    },
    Throw {
        node: NodeId,
        value: Box<Expr>,
    },
    Return {
        node: NodeId,
        value: Option<Box<Expr>>,
    },
    NewArray {
        node: NodeId,
        array_class: ClassId,
        length: Box<Expr>,
    },
    /// A call node; the candidate set and actual argument types are
    /// resolved by `crate::call` and recorded into `callInfo`, not carried
    /// inline here.
    Call {
        node: NodeId,
        args: Vec<Expr>,
    },
    Lambda {
        node: NodeId,
        body: Box<Expr>,
    },
    Match {
        node: NodeId,
        scrutinee: Box<Expr>,
        arms: Vec<(Pattern, Expr)>,
    },
}

impl Expr {
    pub fn node(&self) -> NodeId {
        match self {
            Expr::IntLiteral { node, .. }
            | Expr::FloatLiteral { node, .. }
            | Expr::BoolLiteral { node }
            | Expr::Null { node }
            | Expr::UseRef { node }
            | Expr::This { node }
            | Expr::Super { node }
            | Expr::Block { node, .. }
            | Expr::Assign { node, .. }
            | Expr::If { node, .. }
            | Expr::While { node, .. }
            | Expr::Try { node, .. }
            | Expr::Throw { node, .. }
            | Expr::Return { node, .. }
            | Expr::NewArray { node, .. }
            | Expr::Call { node, .. }
            | Expr::Lambda { node, .. }
            | Expr::Match { node, .. } => *node,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Stmt {
    Expr(Expr),
    /// A nested definition; a block ending in one yields `unit` rather than
    /// the definition's own type (spec §4.4 "Block").
    Def(NodeId),
}

#[derive(Clone, Debug)]
pub enum Pattern {
    Variable {
        node: NodeId,
        annotation: Option<ilex_ir::Type>,
    },
    Blank {
        node: NodeId,
        annotation: Option<ilex_ir::Type>,
    },
    Literal {
        node: NodeId,
    },
    /// Named existing binding whose type must equal the scrutinee's.
    Value {
        node: NodeId,
    },
    Tuple {
        node: NodeId,
        elements: Vec<Pattern>,
    },
    Destructure {
        node: NodeId,
        matcher: NodeId,
        elements: Vec<Pattern>,
    },
}

impl Pattern {
    pub fn node(&self) -> NodeId {
        match self {
            Pattern::Variable { node, .. }
            | Pattern::Blank { node, .. }
            | Pattern::Literal { node }
            | Pattern::Value { node }
            | Pattern::Tuple { node, .. }
            | Pattern::Destructure { node, .. } => *node,
        }
    }
}

pub struct Module {
    pub top_level: Vec<NodeId>,
}
